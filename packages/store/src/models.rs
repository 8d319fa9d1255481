//! # Domain models
//!
//! Typed projections of the documents stored in each collection. Field names on
//! the wire follow the database layout (`titulo`, `descripcion`, `likedBy`, ...)
//! through serde renames, so a document written by any client decodes here.
//!
//! Every model carries its document id in `id`. The id is filled in by
//! [`crate::Document::decode`] and never written back as a field.
//!
//! | Struct | Collection |
//! |--------|-----------|
//! | [`Project`] | `proyectos` |
//! | [`UserProfile`] | `users` (document id = auth uid) |
//! | [`Comment`] | `proyectos/{id}/comments` |
//! | [`Group`] | `groups` |
//! | [`Post`] | `groups/{id}/posts` |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown when a project carries no author name.
pub const ANONYMOUS_AUTHOR: &str = "anónimo";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    /// Author display name at creation time.
    #[serde(rename = "autor", default)]
    pub author: String,
    /// Owner uid. Never rewritten after creation.
    #[serde(default)]
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
    #[serde(rename = "categorias", default)]
    pub categories: Vec<String>,
    #[serde(rename = "tecnologias", default)]
    pub technologies: Vec<String>,
    #[serde(rename = "etiquetas", default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Author name, falling back to [`ANONYMOUS_AUTHOR`].
    pub fn display_author(&self) -> &str {
        if self.author.trim().is_empty() {
            ANONYMOUS_AUTHOR
        } else {
            &self.author
        }
    }

    /// Image URL if one is set and non-empty.
    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    pub fn github(&self) -> Option<&str> {
        non_empty(&self.github_link)
    }

    pub fn demo(&self) -> Option<&str> {
        non_empty(&self.demo_link)
    }

    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.uid == uid
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "rol", default)]
    pub role: String,
    #[serde(rename = "empresa", default)]
    pub company: String,
    #[serde(rename = "desde", default)]
    pub from: String,
    #[serde(rename = "hasta", default)]
    pub to: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "institucion", default)]
    pub institution: String,
    #[serde(rename = "desde", default)]
    pub from: String,
    #[serde(rename = "hasta", default)]
    pub to: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// The `users/{uid}` document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub following: Vec<String>,
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
    #[serde(rename = "habilidades", default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(rename = "experiencia", default)]
    pub experience: Vec<Experience>,
    #[serde(rename = "educacion", default)]
    pub education: Vec<Education>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<DateTime<Utc>>,
    #[serde(default)]
    pub activity_log: Vec<ActivityEntry>,
}

impl UserProfile {
    pub fn linkedin(&self) -> Option<&str> {
        non_empty(&self.linkedin)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Group {
    pub fn is_member(&self, uid: &str) -> bool {
        self.members.iter().any(|m| m == uid)
    }
}

/// Append `uid` to the members of group `group_id` in a loaded list.
///
/// Returns `false` when the group is not in the list or `uid` already belongs
/// to it, in which case nothing changes and no write should follow.
pub fn join_locally(groups: &mut [Group], group_id: &str, uid: &str) -> bool {
    match groups.iter_mut().find(|g| g.id == group_id) {
        Some(group) if !group.is_member(uid) => {
            group.members.push(uid.to_string());
            true
        }
        _ => false,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The signed-in user performing a write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub uid: String,
    /// Display name, email, or "Anónimo", in that order of preference.
    pub name: String,
}

impl Actor {
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{to_fields, Document};
    use serde_json::json;

    #[test]
    fn test_project_wire_names() {
        let project = Project {
            id: "ignored".into(),
            title: "Portfolio".into(),
            description: "Mi sitio".into(),
            uid: "u1".into(),
            categories: vec!["Web".into()],
            liked_by: vec!["u2".into()],
            ..Default::default()
        };

        let fields = to_fields(&project).unwrap();
        assert_eq!(fields["titulo"], json!("Portfolio"));
        assert_eq!(fields["descripcion"], json!("Mi sitio"));
        assert_eq!(fields["categorias"], json!(["Web"]));
        assert_eq!(fields["likedBy"], json!(["u2"]));
        assert!(!fields.contains_key("id"));
        assert!(!fields.contains_key("imageUrl"));

        let decoded: Project = Document::new("p1", fields).decode().unwrap();
        assert_eq!(decoded.id, "p1");
        assert_eq!(decoded.title, "Portfolio");
        assert_eq!(decoded.display_author(), ANONYMOUS_AUTHOR);
    }

    #[test]
    fn test_sparse_user_document_decodes() {
        let fields = match json!({ "email": "ana@lab.dev", "experiencia": [{ "rol": "Dev" }] }) {
            serde_json::Value::Object(f) => f,
            _ => unreachable!(),
        };
        let user: UserProfile = Document::new("u1", fields).decode().unwrap();
        assert_eq!(user.id, "u1");
        assert!(user.favorites.is_empty());
        assert_eq!(user.experience[0].role, "Dev");
        assert_eq!(user.points, 0);
    }

    #[test]
    fn test_join_locally() {
        let mut groups = vec![
            Group {
                id: "g1".into(),
                members: vec!["u1".into()],
                ..Default::default()
            },
            Group {
                id: "g2".into(),
                ..Default::default()
            },
        ];

        assert!(join_locally(&mut groups, "g2", "u1"));
        assert_eq!(groups[1].members, vec!["u1".to_string()]);

        assert!(!join_locally(&mut groups, "g1", "u1"));
        assert_eq!(groups[0].members, vec!["u1".to_string()]);

        assert!(!join_locally(&mut groups, "missing", "u1"));
    }

    #[test]
    fn test_empty_links_are_hidden() {
        let project = Project {
            image_url: Some(String::new()),
            github_link: Some("https://github.com/lab/p".into()),
            ..Default::default()
        };
        assert_eq!(project.image(), None);
        assert_eq!(project.github(), Some("https://github.com/lab/p"));
        assert_eq!(project.demo(), None);
    }
}
