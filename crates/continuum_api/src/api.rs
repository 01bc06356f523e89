//! Request handlers producing HTTP-style response envelopes.
//!
//! # Responsibility
//! - Invoke core services and fold every typed outcome into an
//!   `ApiResponse` with the agreed status code and JSON body.
//!
//! # Invariants
//! - Validation failures map to 400, missing cards to 404, duplicate ids
//!   and store failures to 500; success is 200 (201 for create).
//! - Error bodies carry a stable `error` string; validation bodies add a
//!   `details` list naming every violated field.

use crate::wire::{card_to_wire, category_to_wire, normalize_payload};
use continuum_core::{
    core_version, CardListQuery, CardRepository, CardService, CategoryId, CategoryRepository,
    CategoryService, ServiceError, ValidationError,
};
use log::error;
use serde_json::{json, Value};

/// Transport-agnostic response envelope: status code plus JSON body.
///
/// The outer HTTP collaborator writes these onto the wire verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    fn bad_request(validation: &ValidationError) -> Self {
        let details: Vec<Value> = validation
            .violations
            .iter()
            .map(|violation| {
                json!({
                    "field": violation.field,
                    "reason": violation.reason.as_str(),
                })
            })
            .collect();
        Self {
            status: 400,
            body: json!({"error": "Validation error", "details": details}),
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            body: json!({"error": "Card not found"}),
        }
    }

    fn internal(context: &str, err: &ServiceError) -> Self {
        error!("event=api_failure module=api status=error context={context} error={err}");
        Self {
            status: 500,
            body: json!({"error": format!("Failed to {context}"), "message": err.to_string()}),
        }
    }
}

/// Health probe for liveness checks.
pub fn health() -> ApiResponse {
    ApiResponse::ok(json!({
        "status": "healthy",
        "service": "continuum-api",
        "version": core_version(),
    }))
}

/// Lists all categories.
pub fn list_categories<R: CategoryRepository>(service: &CategoryService<R>) -> ApiResponse {
    match service.list_categories() {
        Ok(categories) => {
            let body: Vec<Value> = categories.iter().map(category_to_wire).collect();
            ApiResponse::ok(Value::Array(body))
        }
        Err(err) => {
            error!("event=api_failure module=api status=error context=list categories error={err}");
            ApiResponse {
                status: 500,
                body: json!({"error": "Failed to list categories", "message": err.to_string()}),
            }
        }
    }
}

/// Lists cards, optionally filtered by the wire `categoryId` value.
///
/// A filter value outside the category set matches nothing, mirroring a
/// plain equality filter over stored rows.
pub fn list_cards<R: CardRepository>(
    service: &CardService<R>,
    category_filter: Option<&str>,
) -> ApiResponse {
    let query = match category_filter {
        Some(raw) => match CategoryId::parse(raw) {
            Some(category) => CardListQuery {
                category: Some(category),
            },
            None => return ApiResponse::ok(json!([])),
        },
        None => CardListQuery::default(),
    };

    match service.list_cards(&query) {
        Ok(cards) => {
            let body: Vec<Value> = cards.iter().map(card_to_wire).collect();
            ApiResponse::ok(Value::Array(body))
        }
        Err(err) => ApiResponse::internal("list cards", &err),
    }
}

/// Gets a single card by id.
pub fn get_card<R: CardRepository>(service: &CardService<R>, id: &str) -> ApiResponse {
    match service.get_card(id) {
        Ok(Some(card)) => ApiResponse::ok(card_to_wire(&card)),
        Ok(None) => ApiResponse::not_found(),
        Err(err) => ApiResponse::internal("get card", &err),
    }
}

/// Creates a card from a raw JSON body.
pub fn create_card<R: CardRepository>(service: &CardService<R>, body: &Value) -> ApiResponse {
    let Some(payload) = normalize_payload(body) else {
        return non_object_body();
    };

    match service.create_card(&payload) {
        Ok(card) => ApiResponse::created(card_to_wire(&card)),
        Err(ServiceError::Validation(validation)) => ApiResponse::bad_request(&validation),
        // Duplicate ids fall through the generic failure path, as do opaque
        // store errors.
        Err(err) => ApiResponse::internal("create card", &err),
    }
}

/// Applies a partial update to a card.
pub fn update_card<R: CardRepository>(
    service: &CardService<R>,
    id: &str,
    body: &Value,
) -> ApiResponse {
    let Some(payload) = normalize_payload(body) else {
        return non_object_body();
    };

    match service.update_card(id, &payload) {
        Ok(card) => ApiResponse::ok(card_to_wire(&card)),
        Err(ServiceError::Validation(validation)) => ApiResponse::bad_request(&validation),
        Err(ServiceError::CardNotFound(_)) => ApiResponse::not_found(),
        Err(err) => ApiResponse::internal("update card", &err),
    }
}

/// Moves a card to another column.
pub fn move_card<R: CardRepository>(
    service: &CardService<R>,
    id: &str,
    body: &Value,
) -> ApiResponse {
    let Some(payload) = normalize_payload(body) else {
        return non_object_body();
    };

    match service.move_card(id, &payload) {
        Ok(card) => ApiResponse::ok(card_to_wire(&card)),
        Err(ServiceError::Validation(validation)) => ApiResponse::bad_request(&validation),
        Err(ServiceError::CardNotFound(_)) => ApiResponse::not_found(),
        Err(err) => ApiResponse::internal("move card", &err),
    }
}

/// Deletes a card by id.
pub fn delete_card<R: CardRepository>(service: &CardService<R>, id: &str) -> ApiResponse {
    match service.delete_card(id) {
        Ok(()) => ApiResponse::ok(json!({"message": "Card deleted successfully"})),
        Err(ServiceError::CardNotFound(_)) => ApiResponse::not_found(),
        Err(err) => ApiResponse::internal("delete card", &err),
    }
}

fn non_object_body() -> ApiResponse {
    ApiResponse {
        status: 400,
        body: json!({
            "error": "Validation error",
            "details": [{"field": "body", "reason": "wrong type"}],
        }),
    }
}
