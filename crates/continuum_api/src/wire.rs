//! Two-way wire mapping: alias table, key normalization and rendering.
//!
//! # Invariants
//! - `WIRE_ALIASES` is the single source for camelCase <-> snake_case pairs.
//! - Inbound payloads may use either spelling; outbound bodies always use
//!   the camelCase form.
//! - Timestamps render as RFC 3339 UTC strings with millisecond precision.

use chrono::{DateTime, SecondsFormat, Utc};
use continuum_core::{Card, Category, RawPayload};
use serde_json::{json, Map, Value};

/// Wire-name to internal-name pairs for card fields.
pub const WIRE_ALIASES: &[(&str, &str)] = &[
    ("categoryId", "category_id"),
    ("columnId", "column_id"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
];

/// Converts an inbound JSON body into a core payload with internal keys.
///
/// Returns `None` when the body is not a JSON object. When both spellings of
/// one field appear, the later entry in the body wins.
pub fn normalize_payload(body: &Value) -> Option<RawPayload> {
    let object = body.as_object()?;
    let mut payload = Map::with_capacity(object.len());
    for (key, value) in object {
        payload.insert(internal_name(key).to_string(), value.clone());
    }
    Some(payload)
}

/// Renders a card in its external wire representation.
pub fn card_to_wire(card: &Card) -> Value {
    json!({
        "id": card.id,
        "title": card.title,
        "description": card.description,
        "categoryId": card.category_id.as_str(),
        "columnId": card.column_id.as_str(),
        "priority": card.priority.map(|priority| priority.as_str()),
        "tags": card.tags,
        "createdAt": format_timestamp(card.created_at),
        "updatedAt": format_timestamp(card.updated_at),
    })
}

/// Renders a category in its external wire representation.
pub fn category_to_wire(category: &Category) -> Value {
    json!({
        "id": category.id.as_str(),
        "name": category.name,
        "description": category.description,
        "icon": category.icon,
    })
}

fn internal_name(key: &str) -> &str {
    WIRE_ALIASES
        .iter()
        .find(|(wire, _)| *wire == key)
        .map_or(key, |(_, internal)| internal)
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms).map_or_else(String::new, |timestamp| {
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    })
}
