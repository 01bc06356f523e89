//! Category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide read access to the fixed category catalog.
//! - Own the idempotent bootstrap seeding step.
//!
//! # Invariants
//! - Seeding only inserts missing rows; existing rows are never updated.
//! - Listing returns catalog rows in a stable, deterministic order.

use crate::model::card::CategoryId;
use crate::model::category::Category;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const CATEGORY_SELECT_SQL: &str = "SELECT id, name, description, icon FROM categories";

const CATEGORY_REQUIRED_COLUMNS: &[&str] = &["id", "name", "description", "icon"];

/// Repository interface for category operations.
pub trait CategoryRepository {
    /// Lists all seeded categories.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    /// Ensures the static catalog exists; returns how many rows were
    /// inserted. Safe to call on every process start.
    fn seed_categories(&self) -> RepoResult<usize>;
}

/// SQLite-backed category repository.
pub struct SqliteCategoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryRepository<'conn> {
    /// Builds a repository after verifying the connection carries the
    /// migrated `categories` schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "categories", CATEGORY_REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CategoryRepository for SqliteCategoryRepository<'_> {
    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY rowid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn seed_categories(&self) -> RepoResult<usize> {
        let mut inserted = 0;
        for category in Category::catalog() {
            inserted += self.conn.execute(
                "INSERT OR IGNORE INTO categories (id, name, description, icon)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    category.id.as_str(),
                    category.name,
                    category.description,
                    category.icon,
                ],
            )?;
        }
        Ok(inserted)
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_text: String = row.get("id")?;
    let id = CategoryId::parse(&id_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid category id `{id_text}` in categories.id"))
    })?;

    Ok(Category {
        id,
        name: row.get("name")?,
        description: row.get::<_, Option<String>>("description")?.unwrap_or_default(),
        icon: row.get::<_, Option<String>>("icon")?.unwrap_or_default(),
    })
}
