//! Card domain model and mutation contract.
//!
//! # Responsibility
//! - Define the canonical card record and its closed enumerations.
//! - Provide the pure merge rules for create, partial update and move.
//!
//! # Invariants
//! - `id` is stable and never changes after creation.
//! - `created_at` is set exactly once; `updated_at >= created_at` always.
//! - `updated_at` strictly increases across successive mutations, even when
//!   the wall clock has not advanced by a full millisecond.

use serde::{Deserialize, Serialize};

/// Stable identifier for a card.
///
/// Caller-supplied opaque string; kept as a type alias to make semantic
/// intent explicit in signatures.
pub type CardId = String;

/// Fixed top-level grouping for cards.
///
/// The category set is a static catalog seeded at bootstrap; it is never
/// extended or mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryId {
    /// Financial planning, investments, and business tasks.
    Business,
    /// Development projects, issues, and technical tasks.
    Coding,
    /// Fitness, wellness, and personal development.
    Health,
    /// Emails, messages, and correspondence.
    Communications,
}

impl CategoryId {
    /// All category members, in catalog order.
    pub const ALL: [CategoryId; 4] = [
        Self::Business,
        Self::Coding,
        Self::Health,
        Self::Communications,
    ];

    /// Canonical string form used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Coding => "coding",
            Self::Health => "health",
            Self::Communications => "communications",
        }
    }

    /// Parses the canonical string form; `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "business" => Some(Self::Business),
            "coding" => Some(Self::Coding),
            "health" => Some(Self::Health),
            "communications" => Some(Self::Communications),
            _ => None,
        }
    }
}

/// Kanban lane of a card; doubles as its only workflow state dimension.
///
/// Transitions form a complete graph over the three members, reflexive moves
/// included. No transition is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    /// Created but not started.
    Todo,
    /// Work is in progress.
    InProgress,
    /// Completed.
    Done,
}

impl ColumnId {
    /// Canonical string form used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Parses the canonical string form; `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "todo" => Some(Self::Todo),
            "inProgress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

/// Optional urgency marker on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Canonical string form used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the canonical string form; `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canonical card record.
///
/// Construction goes through [`Card::create`] with a validated [`NewCard`];
/// mutation goes through [`Card::apply_patch`] / [`Card::apply_move`]. The
/// persistence layer stores this shape verbatim and performs no enumeration
/// checking of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable caller-supplied ID used for all lookups.
    pub id: CardId,
    /// Short human-readable title, non-empty, at most 255 chars.
    pub title: String,
    /// Optional free-form body, unconstrained length.
    pub description: Option<String>,
    /// Fixed category the card belongs to.
    pub category_id: CategoryId,
    /// Current kanban lane.
    pub column_id: ColumnId,
    /// Optional urgency marker.
    pub priority: Option<Priority>,
    /// Ordered tag list, insertion order preserved.
    pub tags: Vec<String>,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every successful mutation.
    pub updated_at: i64,
}

/// Normalized create input produced by the validation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub id: CardId,
    pub title: String,
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub column_id: ColumnId,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
}

/// Normalized partial-update input produced by the validation engine.
///
/// `None` means "caller did not mention this field" (exclude-unset merge).
/// An explicit JSON `null` in the inbound payload is dropped during
/// validation, so a patch cannot clear a field back to null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
    pub column_id: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl CardPatch {
    /// Returns whether the patch carries no field at all.
    ///
    /// An empty patch is still a legal update: it only refreshes
    /// `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.column_id.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
    }
}

impl Card {
    /// Constructs a fresh card from normalized create input.
    ///
    /// # Contract
    /// - `created_at == updated_at == now_ms`.
    /// - Every field equals the normalized input verbatim.
    pub fn create(new: NewCard, now_ms: i64) -> Self {
        Self {
            id: new.id,
            title: new.title,
            description: new.description,
            category_id: new.category_id,
            column_id: new.column_id,
            priority: new.priority,
            tags: new.tags,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Merges a normalized partial update into this card.
    ///
    /// # Contract
    /// - Only fields present in the patch are overwritten; absent fields are
    ///   left bit-for-bit unchanged.
    /// - `updated_at` is refreshed on every call, field changes or not.
    pub fn apply_patch(&mut self, patch: &CardPatch, now_ms: i64) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(column_id) = patch.column_id {
            self.column_id = column_id;
        }
        if let Some(priority) = patch.priority {
            self.priority = Some(priority);
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        self.touch(now_ms);
    }

    /// Moves this card to the target column.
    ///
    /// Specialization of [`Card::apply_patch`] with only `column_id` set;
    /// reflexive moves are allowed and still refresh `updated_at`.
    pub fn apply_move(&mut self, column_id: ColumnId, now_ms: i64) {
        self.column_id = column_id;
        self.touch(now_ms);
    }

    /// Refreshes `updated_at`, bumping by one millisecond when the clock has
    /// not advanced so the strictly-increasing invariant stays observable.
    fn touch(&mut self, now_ms: i64) {
        self.updated_at = if now_ms > self.updated_at {
            now_ms
        } else {
            self.updated_at + 1
        };
    }
}
