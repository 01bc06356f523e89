//! Core domain logic for the Continuum card backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::card::{Card, CardId, CardPatch, CategoryId, ColumnId, NewCard, Priority};
pub use model::category::Category;
pub use repo::card_repo::{CardListQuery, CardRepository, SqliteCardRepository};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::{RepoError, RepoResult};
pub use service::card_service::{CardService, ServiceError, ServiceResult};
pub use service::category_service::CategoryService;
pub use validate::{
    validate_create, validate_move, validate_update, FieldViolation, RawPayload, ValidationError,
    ViolationReason,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
