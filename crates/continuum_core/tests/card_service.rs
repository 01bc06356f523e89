use continuum_core::db::open_db_in_memory;
use continuum_core::{
    CardListQuery, CardService, CategoryId, ColumnId, Priority, ServiceError,
    SqliteCardRepository, ValidationError,
};
use serde_json::{json, Map, Value};

fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("test payload must be an object, got {other}"),
    }
}

#[test]
fn create_then_move_worked_example() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let created = service
        .create_card(&payload(json!({
            "id": "c1",
            "title": "Pay invoice",
            "category_id": "business",
            "column_id": "todo",
        })))
        .unwrap();

    assert_eq!(created.id, "c1");
    assert_eq!(created.title, "Pay invoice");
    assert_eq!(created.description, None);
    assert_eq!(created.category_id, CategoryId::Business);
    assert_eq!(created.column_id, ColumnId::Todo);
    assert_eq!(created.priority, None);
    assert!(created.tags.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let moved = service
        .move_card("c1", &payload(json!({"column_id": "done"})))
        .unwrap();

    assert_eq!(moved.column_id, ColumnId::Done);
    assert_eq!(moved.created_at, created.created_at);
    assert!(moved.updated_at > created.updated_at);

    // The move was persisted, not just computed.
    let stored = service.get_card("c1").unwrap().unwrap();
    assert_eq!(stored, moved);
}

#[test]
fn partial_update_leaves_absent_fields_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let created = service
        .create_card(&payload(json!({
            "id": "c1",
            "title": "Write report",
            "description": "quarterly numbers",
            "category_id": "business",
            "column_id": "todo",
            "priority": "medium",
            "tags": ["q3"],
        })))
        .unwrap();

    let updated = service
        .update_card("c1", &payload(json!({"title": "Write Q3 report"})))
        .unwrap();

    assert_eq!(updated.title, "Write Q3 report");
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.category_id, created.category_id);
    assert_eq!(updated.column_id, created.column_id);
    assert_eq!(updated.priority, created.priority);
    assert_eq!(updated.tags, created.tags);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[test]
fn update_with_explicit_nulls_changes_nothing_but_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let created = service
        .create_card(&payload(json!({
            "id": "c1",
            "title": "Call dentist",
            "description": "ask about friday",
            "category_id": "health",
            "column_id": "todo",
            "priority": "low",
        })))
        .unwrap();

    let updated = service
        .update_card(
            "c1",
            &payload(json!({"description": null, "priority": null})),
        )
        .unwrap();

    assert_eq!(updated.description.as_deref(), Some("ask about friday"));
    assert_eq!(updated.priority, Some(Priority::Low));
    assert!(updated.updated_at > created.updated_at);
}

#[test]
fn create_rejects_invalid_payload_with_all_violations() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let err = service
        .create_card(&payload(json!({
            "id": "c1",
            "title": "Bad enums",
            "category_id": "unknown",
            "column_id": "archived",
        })))
        .unwrap_err();

    let validation: ValidationError = match err {
        ServiceError::Validation(validation) => validation,
        other => panic!("unexpected error: {other}"),
    };
    assert!(validation.names_field("category_id"));
    assert!(validation.names_field("column_id"));

    // Nothing was persisted for the rejected payload.
    assert!(service.get_card("c1").unwrap().is_none());
}

#[test]
fn create_duplicate_id_surfaces_domain_error() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let card = payload(json!({
        "id": "c1",
        "title": "first",
        "category_id": "coding",
        "column_id": "todo",
    }));
    service.create_card(&card).unwrap();

    let err = service.create_card(&card).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateId(id) if id == "c1"));
}

#[test]
fn update_and_move_on_missing_card_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let err = service
        .update_card("ghost", &payload(json!({"title": "nope"})))
        .unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == "ghost"));

    let err = service
        .move_card("ghost", &payload(json!({"column_id": "done"})))
        .unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == "ghost"));
}

#[test]
fn move_validation_runs_before_lookup() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    let err = service
        .move_card("ghost", &payload(json!({"column_id": "blocked"})))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[test]
fn delete_twice_reports_not_found_both_times() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    service
        .create_card(&payload(json!({
            "id": "c1",
            "title": "temp",
            "category_id": "communications",
            "column_id": "todo",
        })))
        .unwrap();
    service.delete_card("c1").unwrap();

    for _ in 0..2 {
        let err = service.delete_card("c1").unwrap_err();
        assert!(matches!(err, ServiceError::CardNotFound(id) if id == "c1"));
    }
}

#[test]
fn list_through_service_honors_filter_and_order() {
    let conn = open_db_in_memory().unwrap();
    let service = CardService::new(SqliteCardRepository::try_new(&conn).unwrap());

    for (id, category) in [("c1", "coding"), ("c2", "business"), ("c3", "coding")] {
        service
            .create_card(&payload(json!({
                "id": id,
                "title": format!("card {id}"),
                "category_id": category,
                "column_id": "todo",
            })))
            .unwrap();
    }

    let all = service.list_cards(&CardListQuery::default()).unwrap();
    assert_eq!(all.len(), 3);
    // Newest-created-first over the full set.
    assert!(all
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));

    let coding = service
        .list_cards(&CardListQuery {
            category: Some(CategoryId::Coding),
        })
        .unwrap();
    assert_eq!(coding.len(), 2);
    assert!(coding
        .iter()
        .all(|card| card.category_id == CategoryId::Coding));
}
