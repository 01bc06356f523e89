//! Card repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `cards` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths receive normalized `Card` values; enumeration checking
//!   happened upstream in the validation engine.
//! - Primary-key collisions surface as `RepoError::DuplicateId`, never as a
//!   raw SQLite failure.
//! - Listing is ordered `created_at DESC, id ASC` for a stable recency scan.

use crate::model::card::{Card, CategoryId, ColumnId, Priority};
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{ffi, params, Connection, Row};

const CARD_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    category_id,
    column_id,
    priority,
    tags,
    created_at,
    updated_at
FROM cards";

const CARD_REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "category_id",
    "column_id",
    "priority",
    "tags",
    "created_at",
    "updated_at",
];

/// Query options for listing cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardListQuery {
    /// Optional equality filter on the card's category.
    pub category: Option<CategoryId>,
}

/// Repository interface for card CRUD operations.
pub trait CardRepository {
    /// Persists a new card; fails with `DuplicateId` when the id exists.
    fn create_card(&self, card: &Card) -> RepoResult<()>;
    /// Gets one card by id.
    fn get_card(&self, id: &str) -> RepoResult<Option<Card>>;
    /// Lists cards newest-created-first, optionally filtered by category.
    fn list_cards(&self, query: &CardListQuery) -> RepoResult<Vec<Card>>;
    /// Replaces all mutable fields of an existing card.
    fn update_card(&self, card: &Card) -> RepoResult<()>;
    /// Hard-deletes one card; missing id yields `NotFound`.
    fn delete_card(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed card repository.
pub struct SqliteCardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCardRepository<'conn> {
    /// Builds a repository after verifying the connection carries the
    /// migrated `cards` schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "cards", CARD_REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CardRepository for SqliteCardRepository<'_> {
    fn create_card(&self, card: &Card) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO cards (
                id,
                title,
                description,
                category_id,
                column_id,
                priority,
                tags,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                card.id.as_str(),
                card.title.as_str(),
                card.description.as_deref(),
                card.category_id.as_str(),
                card.column_id.as_str(),
                card.priority.map(Priority::as_str),
                tags_to_db(&card.tags)?,
                card.created_at,
                card.updated_at,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || err.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(RepoError::DuplicateId(card.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_card(&self, id: &str) -> RepoResult<Option<Card>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CARD_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_card_row(row)?));
        }

        Ok(None)
    }

    fn list_cards(&self, query: &CardListQuery) -> RepoResult<Vec<Card>> {
        let mut sql = CARD_SELECT_SQL.to_string();
        if query.category.is_some() {
            sql.push_str(" WHERE category_id = ?1");
        }
        sql.push_str(" ORDER BY created_at DESC, id ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = match query.category {
            Some(category) => stmt.query([category.as_str()])?,
            None => stmt.query([])?,
        };

        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(parse_card_row(row)?);
        }

        Ok(cards)
    }

    fn update_card(&self, card: &Card) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE cards
             SET
                title = ?1,
                description = ?2,
                category_id = ?3,
                column_id = ?4,
                priority = ?5,
                tags = ?6,
                updated_at = ?7
             WHERE id = ?8;",
            params![
                card.title.as_str(),
                card.description.as_deref(),
                card.category_id.as_str(),
                card.column_id.as_str(),
                card.priority.map(Priority::as_str),
                tags_to_db(&card.tags)?,
                card.updated_at,
                card.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(card.id.clone()));
        }

        Ok(())
    }

    fn delete_card(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

fn parse_card_row(row: &Row<'_>) -> RepoResult<Card> {
    let category_text: String = row.get("category_id")?;
    let category_id = CategoryId::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in cards.category_id"
        ))
    })?;

    let column_text: String = row.get("column_id")?;
    let column_id = ColumnId::parse(&column_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid column `{column_text}` in cards.column_id"))
    })?;

    let priority = match row.get::<_, Option<String>>("priority")? {
        Some(value) => Some(Priority::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid priority `{value}` in cards.priority"))
        })?),
        None => None,
    };

    let tags_text: String = row.get("tags")?;
    let tags = tags_from_db(&tags_text)?;

    Ok(Card {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        category_id,
        column_id,
        priority,
        tags,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn tags_to_db(tags: &[String]) -> RepoResult<String> {
    serde_json::to_string(tags)
        .map_err(|err| RepoError::InvalidData(format!("unserializable tags: {err}")))
}

fn tags_from_db(text: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(text)
        .map_err(|_| RepoError::InvalidData(format!("invalid tags value `{text}` in cards.tags")))
}
