//! Validation engine for inbound card payloads.
//!
//! # Responsibility
//! - Turn raw JSON objects into normalized, fully-typed create/update/move
//!   inputs.
//! - Act as the sole gatekeeper for the closed enumerations; the store
//!   trusts normalized input on write.
//!
//! # Invariants
//! - Payload keys are internal snake_case names; wire alias translation is
//!   the transport boundary's job and never reaches this module.
//! - All violations in a payload are collected into one error, never just
//!   the first.
//! - An explicit JSON `null` is treated as an absent field and dropped
//!   before the merge step; patches cannot clear a field.

use crate::model::card::{CardPatch, CategoryId, ColumnId, NewCard, Priority};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw key-value payload as received from the transport boundary.
pub type RawPayload = Map<String, Value>;

/// Maximum length, in characters, for `id` and `title`.
pub const TEXT_FIELD_MAX_CHARS: usize = 255;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    /// Field is missing, null, or an empty string where one is required.
    Required,
    /// Text exceeds the per-field character cap.
    TooLong,
    /// Value is a string but not a member of the field's closed enumeration.
    NotInEnumeration,
    /// Value has the wrong JSON type for the field.
    WrongType,
}

impl ViolationReason {
    /// Stable machine-readable reason token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooLong => "too long",
            Self::NotInEnumeration => "not in enumeration",
            Self::WrongType => "wrong type",
        }
    }
}

impl Display for ViolationReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated constraint on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: ViolationReason,
}

/// Aggregated validation failure carrying every violated constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Returns whether any violation names the given field.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed:")?;
        for violation in &self.violations {
            write!(f, " {}={};", violation.field, violation.reason)?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

#[derive(Debug, Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, field: &'static str, reason: ViolationReason) {
        self.0.push(FieldViolation { field, reason });
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_error(self) -> ValidationError {
        ValidationError { violations: self.0 }
    }
}

/// Validates and normalizes a create payload.
///
/// Required: `id`, `title`, `category_id`, `column_id`. Optional:
/// `description`, `priority`, `tags` (defaults to an empty sequence).
/// Unknown keys are ignored.
pub fn validate_create(payload: &RawPayload) -> Result<NewCard, ValidationError> {
    let mut violations = Violations::default();

    let id = required_text(payload, "id", &mut violations);
    let title = required_text(payload, "title", &mut violations);
    let description = optional_unbounded_text(payload, "description", &mut violations);
    let category_id = required_member(payload, "category_id", CategoryId::parse, &mut violations);
    let column_id = required_member(payload, "column_id", ColumnId::parse, &mut violations);
    let priority = optional_member(payload, "priority", Priority::parse, &mut violations);
    let tags = tag_list(payload, &mut violations);

    match (id, title, category_id, column_id) {
        (Some(id), Some(title), Some(category_id), Some(column_id))
            if violations.is_empty() =>
        {
            Ok(NewCard {
                id,
                title,
                description,
                category_id,
                column_id,
                priority,
                tags: tags.unwrap_or_default(),
            })
        }
        _ => Err(violations.into_error()),
    }
}

/// Validates and normalizes a partial-update payload.
///
/// Every field is optional. A present, non-null field is validated with the
/// create rules and included in the patch; absent or null fields are
/// excluded entirely (exclude-unset merge). `id` is not patchable and is
/// ignored when present; unknown keys are ignored.
pub fn validate_update(payload: &RawPayload) -> Result<CardPatch, ValidationError> {
    let mut violations = Violations::default();

    let patch = CardPatch {
        title: optional_text(payload, "title", &mut violations),
        description: optional_unbounded_text(payload, "description", &mut violations),
        category_id: optional_member(payload, "category_id", CategoryId::parse, &mut violations),
        column_id: optional_member(payload, "column_id", ColumnId::parse, &mut violations),
        priority: optional_member(payload, "priority", Priority::parse, &mut violations),
        tags: tag_list(payload, &mut violations),
    };

    if violations.is_empty() {
        Ok(patch)
    } else {
        Err(violations.into_error())
    }
}

/// Validates a move payload, which carries exactly the target `column_id`.
///
/// Semantically a specialized single-field update.
pub fn validate_move(payload: &RawPayload) -> Result<ColumnId, ValidationError> {
    let mut violations = Violations::default();
    let column_id = required_member(payload, "column_id", ColumnId::parse, &mut violations);

    match column_id {
        Some(column_id) if violations.is_empty() => Ok(column_id),
        _ => Err(violations.into_error()),
    }
}

fn required_text(
    payload: &RawPayload,
    field: &'static str,
    violations: &mut Violations,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            violations.push(field, ViolationReason::Required);
            None
        }
        Some(Value::String(text)) => checked_text(text, field, violations),
        Some(_) => {
            violations.push(field, ViolationReason::WrongType);
            None
        }
    }
}

fn optional_text(
    payload: &RawPayload,
    field: &'static str,
    violations: &mut Violations,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => checked_text(text, field, violations),
        Some(_) => {
            violations.push(field, ViolationReason::WrongType);
            None
        }
    }
}

// The reason set has no dedicated "too short"; an empty required text reads
// as the field not being supplied at all.
fn checked_text(
    text: &str,
    field: &'static str,
    violations: &mut Violations,
) -> Option<String> {
    if text.is_empty() {
        violations.push(field, ViolationReason::Required);
        return None;
    }
    if text.chars().count() > TEXT_FIELD_MAX_CHARS {
        violations.push(field, ViolationReason::TooLong);
        return None;
    }
    Some(text.to_string())
}

fn optional_unbounded_text(
    payload: &RawPayload,
    field: &'static str,
    violations: &mut Violations,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.to_string()),
        Some(_) => {
            violations.push(field, ViolationReason::WrongType);
            None
        }
    }
}

fn required_member<T>(
    payload: &RawPayload,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
    violations: &mut Violations,
) -> Option<T> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            violations.push(field, ViolationReason::Required);
            None
        }
        Some(Value::String(text)) => checked_member(text, field, parse, violations),
        Some(_) => {
            violations.push(field, ViolationReason::WrongType);
            None
        }
    }
}

fn optional_member<T>(
    payload: &RawPayload,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
    violations: &mut Violations,
) -> Option<T> {
    match payload.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => checked_member(text, field, parse, violations),
        Some(_) => {
            violations.push(field, ViolationReason::WrongType);
            None
        }
    }
}

fn checked_member<T>(
    text: &str,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
    violations: &mut Violations,
) -> Option<T> {
    match parse(text) {
        Some(member) => Some(member),
        None => {
            violations.push(field, ViolationReason::NotInEnumeration);
            None
        }
    }
}

fn tag_list(payload: &RawPayload, violations: &mut Violations) -> Option<Vec<String>> {
    match payload.get("tags") {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let mut tags = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(tag) => tags.push(tag.clone()),
                    _ => {
                        violations.push("tags", ViolationReason::WrongType);
                        return None;
                    }
                }
            }
            Some(tags)
        }
        Some(_) => {
            violations.push("tags", ViolationReason::WrongType);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_create, validate_move, validate_update, ViolationReason};
    use crate::model::card::{CategoryId, ColumnId, Priority};
    use serde_json::{json, Map, Value};

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("test payload must be an object, got {other}"),
        }
    }

    #[test]
    fn create_normalizes_full_payload() {
        let new_card = validate_create(&payload(json!({
            "id": "c1",
            "title": "Pay invoice",
            "description": "Q3 hosting bill",
            "category_id": "business",
            "column_id": "todo",
            "priority": "high",
            "tags": ["finance", "urgent"],
        })))
        .unwrap();

        assert_eq!(new_card.id, "c1");
        assert_eq!(new_card.title, "Pay invoice");
        assert_eq!(new_card.description.as_deref(), Some("Q3 hosting bill"));
        assert_eq!(new_card.category_id, CategoryId::Business);
        assert_eq!(new_card.column_id, ColumnId::Todo);
        assert_eq!(new_card.priority, Some(Priority::High));
        assert_eq!(new_card.tags, vec!["finance", "urgent"]);
    }

    #[test]
    fn create_defaults_optional_fields() {
        let new_card = validate_create(&payload(json!({
            "id": "c1",
            "title": "Pay invoice",
            "category_id": "business",
            "column_id": "todo",
        })))
        .unwrap();

        assert_eq!(new_card.description, None);
        assert_eq!(new_card.priority, None);
        assert!(new_card.tags.is_empty());
    }

    #[test]
    fn create_collects_all_violations_in_one_error() {
        let err = validate_create(&payload(json!({
            "id": "c1",
            "title": "Pay invoice",
            "category_id": "unknown",
            "column_id": "archived",
        })))
        .unwrap_err();

        assert_eq!(err.violations.len(), 2);
        assert!(err.names_field("category_id"));
        assert!(err.names_field("column_id"));
        for violation in &err.violations {
            assert_eq!(violation.reason, ViolationReason::NotInEnumeration);
        }
    }

    #[test]
    fn create_reports_missing_required_fields() {
        let err = validate_create(&payload(json!({}))).unwrap_err();

        for field in ["id", "title", "category_id", "column_id"] {
            assert!(err.names_field(field), "missing violation for {field}");
        }
        assert_eq!(err.violations.len(), 4);
    }

    #[test]
    fn create_rejects_empty_and_overlong_text() {
        let long_title = "x".repeat(256);
        let err = validate_create(&payload(json!({
            "id": "",
            "title": long_title,
            "category_id": "coding",
            "column_id": "todo",
        })))
        .unwrap_err();

        assert_eq!(err.violations.len(), 2);
        assert!(err
            .violations
            .iter()
            .any(|v| v.field == "id" && v.reason == ViolationReason::Required));
        assert!(err
            .violations
            .iter()
            .any(|v| v.field == "title" && v.reason == ViolationReason::TooLong));
    }

    #[test]
    fn create_accepts_title_at_exact_cap() {
        let title = "x".repeat(255);
        let new_card = validate_create(&payload(json!({
            "id": "c1",
            "title": title,
            "category_id": "coding",
            "column_id": "todo",
        })))
        .unwrap();

        assert_eq!(new_card.title.chars().count(), 255);
    }

    #[test]
    fn create_rejects_wrong_types_per_field() {
        let err = validate_create(&payload(json!({
            "id": 42,
            "title": "ok",
            "category_id": "coding",
            "column_id": "todo",
            "tags": ["fine", 7],
        })))
        .unwrap_err();

        assert!(err
            .violations
            .iter()
            .any(|v| v.field == "id" && v.reason == ViolationReason::WrongType));
        assert!(err
            .violations
            .iter()
            .any(|v| v.field == "tags" && v.reason == ViolationReason::WrongType));
    }

    #[test]
    fn update_excludes_absent_fields_from_patch() {
        let patch = validate_update(&payload(json!({
            "title": "Renamed",
        })))
        .unwrap();

        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.description, None);
        assert_eq!(patch.category_id, None);
        assert_eq!(patch.column_id, None);
        assert_eq!(patch.priority, None);
        assert_eq!(patch.tags, None);
    }

    #[test]
    fn update_treats_explicit_null_as_absent() {
        let patch = validate_update(&payload(json!({
            "description": null,
            "priority": null,
        })))
        .unwrap();

        assert!(patch.is_empty());
    }

    #[test]
    fn update_validates_present_fields_with_create_rules() {
        let err = validate_update(&payload(json!({
            "title": "",
            "priority": "urgent",
        })))
        .unwrap_err();

        assert_eq!(err.violations.len(), 2);
        assert!(err.names_field("title"));
        assert!(err.names_field("priority"));
    }

    #[test]
    fn update_accepts_empty_payload() {
        let patch = validate_update(&payload(json!({}))).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn update_ignores_unknown_and_id_keys() {
        let patch = validate_update(&payload(json!({
            "id": "someone-elses-id",
            "owner": "nobody",
            "column_id": "done",
        })))
        .unwrap();

        assert_eq!(patch.column_id, Some(ColumnId::Done));
        assert_eq!(patch.title, None);
    }

    #[test]
    fn move_accepts_members_and_rejects_outsiders() {
        let column = validate_move(&payload(json!({"column_id": "done"}))).unwrap();
        assert_eq!(column, ColumnId::Done);

        let err = validate_move(&payload(json!({"column_id": "blocked"}))).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.names_field("column_id"));
        assert_eq!(err.violations[0].reason, ViolationReason::NotInEnumeration);

        let err = validate_move(&payload(json!({}))).unwrap_err();
        assert_eq!(err.violations[0].reason, ViolationReason::Required);
    }
}
