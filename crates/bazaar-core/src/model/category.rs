use bazaar_core_types::UniqueEntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: UniqueEntityId,
    pub title: String,
    pub slug: String,
}

impl Category {
    /// Create a category; the slug is the lowercased, dash-joined title
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = title
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self {
            id: UniqueEntityId::new(),
            title,
            slug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_title() {
        let category = Category::new("Home  Appliances");
        assert_eq!(category.slug, "home-appliances");
    }
}
