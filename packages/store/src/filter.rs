//! Explore-page search and tag filters, applied in memory.

use crate::models::Project;

pub const CATEGORY_OPTIONS: &[&str] = &["Web", "IA", "Mobile", "Data Science"];
pub const TECHNOLOGY_OPTIONS: &[&str] = &["React", "Firebase", "Node.js", "Python"];
pub const TAG_OPTIONS: &[&str] = &["open source", "educativo", "startup"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectFilters {
    pub search: String,
    pub category: Option<String>,
    pub technology: Option<String>,
    pub tag: Option<String>,
}

/// Select `value`, or clear the selection when it is already selected.
fn toggle(slot: &mut Option<String>, value: &str) {
    if slot.as_deref() == Some(value) {
        *slot = None;
    } else {
        *slot = Some(value.to_string());
    }
}

impl ProjectFilters {
    pub fn toggle_category(&mut self, value: &str) {
        toggle(&mut self.category, value);
    }

    pub fn toggle_technology(&mut self, value: &str) {
        toggle(&mut self.technology, value);
    }

    pub fn toggle_tag(&mut self, value: &str) {
        toggle(&mut self.tag, value);
    }

    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_none()
            && self.technology.is_none()
            && self.tag.is_none()
    }

    /// Search is a case-insensitive substring match on title, description or author.
    pub fn matches(&self, project: &Project) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_match = needle.is_empty()
            || [&project.title, &project.description, &project.author]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        let selected = |slot: &Option<String>, values: &[String]| match slot {
            Some(wanted) => values.iter().any(|v| v == wanted),
            None => true,
        };

        text_match
            && selected(&self.category, &project.categories)
            && selected(&self.technology, &project.technologies)
            && selected(&self.tag, &project.labels)
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, author: &str, categories: &[&str], technologies: &[&str]) -> Project {
        Project {
            title: title.into(),
            author: author.into(),
            categories: categories.iter().map(|s| s.to_string()).collect(),
            technologies: technologies.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let projects = vec![
            project("Chat IA", "ana", &["IA"], &["Python"]),
            project("Tienda", "Bruno", &["Web"], &["React"]),
        ];
        let filters = ProjectFilters {
            search: "  bRUno ".into(),
            ..Default::default()
        };
        let hits = filters.apply(&projects);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Tienda");
    }

    #[test]
    fn test_selecting_twice_clears() {
        let projects = vec![
            project("Chat IA", "ana", &["IA"], &["Python"]),
            project("Tienda", "Bruno", &["Web"], &["React"]),
        ];
        let mut filters = ProjectFilters::default();

        filters.toggle_category("Web");
        assert_eq!(filters.apply(&projects).len(), 1);

        filters.toggle_technology("Python");
        assert!(filters.apply(&projects).is_empty());

        filters.toggle_category("Web");
        filters.toggle_technology("Python");
        assert!(filters.is_empty());
        assert_eq!(filters.apply(&projects).len(), 2);
    }
}
