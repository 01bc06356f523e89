//! Transport-boundary contract for the Continuum card backend.
//!
//! # Responsibility
//! - Translate between the wire shape (camelCase aliases, ISO-8601
//!   timestamps) and the core's internal types.
//! - Map typed core results onto HTTP-style status codes and JSON bodies.
//!
//! # Invariants
//! - The core never sees wire aliases; translation happens here both ways.
//! - Handlers never panic; every outcome becomes an `ApiResponse`.
//! - No framing: actual HTTP serving belongs to an outer collaborator that
//!   consumes these envelopes.

pub mod api;
pub mod wire;

pub use api::{
    create_card, delete_card, get_card, health, list_cards, list_categories, move_card,
    update_card, ApiResponse,
};
pub use wire::{card_to_wire, category_to_wire, normalize_payload, WIRE_ALIASES};
