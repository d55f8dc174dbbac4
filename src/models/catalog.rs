use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::project::Project;
use super::skill::{Skill, SkillCategory};

const EMBEDDED_CATALOG: &str = include_str!("../../data/portfolio.json");

/// The fixed set of projects and skills the page is painted from.
/// Loaded once at startup and shared read-only (`Arc<Catalog>`) afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    projects: Vec<Project>,
    skills: Vec<Skill>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>, skills: Vec<Skill>) -> Result<Self, String> {
        let catalog = Catalog { projects, skills };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, String> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(raw: &str) -> Result<Self, String> {
        let catalog: Catalog =
            serde_json::from_str(raw).map_err(|e| format!("invalid catalog JSON: {}", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_json(&raw)
    }

    /// Catalog from `path` when given, otherwise the embedded one.
    /// A broken file is logged and the embedded catalog is used instead.
    pub fn load(path: Option<&str>) -> Result<Self, String> {
        if let Some(p) = path {
            match Self::from_file(Path::new(p)) {
                Ok(c) => {
                    log::info!(
                        "Loaded catalog from {} ({} projects, {} skills)",
                        p,
                        c.projects.len(),
                        c.skills.len()
                    );
                    return Ok(c);
                }
                Err(e) => log::warn!("{}; falling back to embedded catalog", e),
            }
        }
        Self::embedded()
    }

    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for p in &self.projects {
            if !seen.insert(p.id) {
                return Err(format!("duplicate project id {}", p.id));
            }
        }
        if let Some(s) = self.skills.iter().find(|s| s.level > 100) {
            return Err(format!("skill '{}' has level {} (max 100)", s.name, s.level));
        }
        Ok(())
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Skills of one category, catalog order.
    pub fn skills_in(&self, category: SkillCategory) -> Vec<&Skill> {
        self.skills.iter().filter(|s| s.category == category).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::ProjectCategory;

    fn project(id: i64) -> Project {
        Project {
            id,
            title: format!("P{}", id),
            description: String::new(),
            category: ProjectCategory::Web,
            technologies: vec![],
            image: String::new(),
        }
    }

    #[test]
    fn embedded_catalog_parses() {
        let c = Catalog::embedded().unwrap();
        assert_eq!(c.projects().len(), 6);
        assert_eq!(c.skills().len(), 8);
        assert_eq!(c.projects()[0].title, "E-Commerce Dashboard");
        assert_eq!(c.skills()[7].category, SkillCategory::SoftSkills);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![project(1), project(1)], vec![]).unwrap_err();
        assert!(err.contains("duplicate project id 1"));
    }

    #[test]
    fn rejects_level_over_100() {
        let raw = r#"{"projects":[],"skills":[{"name":"X","level":101,"category":"Design"}]}"#;
        assert!(Catalog::from_json(raw).unwrap_err().contains("max 100"));
    }

    #[test]
    fn rejects_unknown_category() {
        let raw = r#"{"projects":[],"skills":[{"name":"X","level":1,"category":"Music"}]}"#;
        assert!(Catalog::from_json(raw).is_err());
    }

    #[test]
    fn load_falls_back_on_missing_file() {
        let c = Catalog::load(Some("/definitely/not/here.json")).unwrap();
        assert_eq!(c, Catalog::embedded().unwrap());
    }
}
