use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-form label attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Parse a comma-separated list such as `"backend, q3 ,urgent"`.
    ///
    /// Names are trimmed and blanks are dropped. Every tag gets a fresh id.
    pub fn parse_list(input: &str) -> Vec<Tag> {
        input
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Tag::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_skips_blanks() {
        let tags = Tag::parse_list(" backend, ,q3 ,, urgent ");
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["backend", "q3", "urgent"]);
        assert_ne!(tags[0].id, tags[1].id);
    }

    #[test]
    fn parse_list_of_empty_input() {
        assert!(Tag::parse_list("").is_empty());
        assert!(Tag::parse_list(" , ").is_empty());
    }
}
