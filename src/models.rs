pub mod catalog;
pub mod project;
pub mod skill;
