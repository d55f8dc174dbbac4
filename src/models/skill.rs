use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    Technical,
    Design,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
}

impl SkillCategory {
    /// Bucket order on the page.
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Technical,
        SkillCategory::Design,
        SkillCategory::SoftSkills,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::Design => "Design",
            SkillCategory::SoftSkills => "Soft Skills",
        }
    }

    /// Id of the element each bucket renders into.
    pub fn container_id(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical-skills",
            SkillCategory::Design => "design-skills",
            SkillCategory::SoftSkills => "soft-skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Percentage, 0..=100.
    pub level: u8,
    pub category: SkillCategory,
}
