use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectCategory {
    Web,
    Mobile,
    Design,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [
        ProjectCategory::Web,
        ProjectCategory::Mobile,
        ProjectCategory::Design,
    ];

    /// The value carried by `data-category` / `data-filter` attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Web => "Web",
            ProjectCategory::Mobile => "Mobile",
            ProjectCategory::Design => "Design",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: ProjectCategory,
    pub technologies: Vec<String>,
    pub image: String,
}
