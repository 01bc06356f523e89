//! Category reference entity and its static seed catalog.
//!
//! # Invariants
//! - The catalog is the single source for seed rows; ids always match the
//!   `CategoryId` enumeration one-to-one.
//! - Categories are never created, updated or deleted at runtime.

use crate::model::card::CategoryId;
use serde::{Deserialize, Serialize};

/// Fixed top-level grouping for cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name, e.g. `Business & Finance`.
    pub name: String,
    /// Short human-readable purpose line.
    pub description: String,
    /// Icon identifier understood by the frontend.
    pub icon: String,
}

struct CatalogEntry {
    id: CategoryId,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: CategoryId::Business,
        name: "Business & Finance",
        description: "Financial planning, investments, and business tasks",
        icon: "briefcase",
    },
    CatalogEntry {
        id: CategoryId::Coding,
        name: "Coding Projects",
        description: "Development projects, issues, and technical tasks",
        icon: "code",
    },
    CatalogEntry {
        id: CategoryId::Health,
        name: "Health & Life",
        description: "Fitness, wellness, and personal development",
        icon: "heart",
    },
    CatalogEntry {
        id: CategoryId::Communications,
        name: "Communications",
        description: "Emails, messages, and correspondence",
        icon: "mail",
    },
];

impl Category {
    /// Returns the full seed catalog in canonical order.
    pub fn catalog() -> Vec<Category> {
        CATALOG
            .iter()
            .map(|entry| Category {
                id: entry.id,
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                icon: entry.icon.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use crate::model::card::CategoryId;

    #[test]
    fn catalog_covers_every_category_id_exactly_once() {
        let catalog = Category::catalog();
        assert_eq!(catalog.len(), CategoryId::ALL.len());
        for (entry, id) in catalog.iter().zip(CategoryId::ALL) {
            assert_eq!(entry.id, id);
            assert!(!entry.name.is_empty());
            assert!(!entry.icon.is_empty());
        }
    }
}
