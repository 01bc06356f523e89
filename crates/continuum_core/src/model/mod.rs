//! Domain model for kanban cards and their fixed category set.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the mutation contract: how normalized input becomes or changes a
//!   `Card`.
//!
//! # Invariants
//! - Every card is identified by a stable, caller-supplied `CardId`.
//! - `category_id`, `column_id` and `priority` only ever hold members of
//!   their closed enumerations.

pub mod card;
pub mod category;
