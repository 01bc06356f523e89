//! Card use-case service.
//!
//! # Responsibility
//! - Run raw payloads through the validation engine, apply the mutation
//!   contract, and delegate persistence to the card repository.
//! - Emit structured event logs for every mutating operation.
//!
//! # Invariants
//! - No payload reaches the repository without passing validation first.
//! - Timestamps are owned here: the repository persists whatever the
//!   mutation contract computed.
//! - Concurrent updates on one id are last-write-wins at the store's native
//!   isolation; this layer adds no coordination.

use crate::model::card::{Card, CardId};
use crate::repo::card_repo::{CardListQuery, CardRepository};
use crate::repo::RepoError;
use crate::validate::{validate_create, validate_move, validate_update, RawPayload, ValidationError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for card use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Payload failed validation; caller-correctable.
    Validation(ValidationError),
    /// Target card does not exist.
    CardNotFound(CardId),
    /// Create collided with an existing card id.
    DuplicateId(CardId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CardNotFound(id) => write!(f, "card not found: {id}"),
            Self::DuplicateId(id) => write!(f, "card id already exists: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::CardNotFound(id),
            RepoError::DuplicateId(id) => Self::DuplicateId(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for card operations.
pub struct CardService<R: CardRepository> {
    repo: R,
}

impl<R: CardRepository> CardService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates a create payload and persists the resulting card.
    ///
    /// # Contract
    /// - Returned card has `created_at == updated_at`.
    /// - Duplicate ids surface as `ServiceError::DuplicateId`.
    pub fn create_card(&self, payload: &RawPayload) -> ServiceResult<Card> {
        let new_card = validate_create(payload)?;
        let card = Card::create(new_card, now_epoch_ms());
        self.repo.create_card(&card)?;
        info!(
            "event=card_create module=service status=ok id={} category={} column={}",
            card.id,
            card.category_id.as_str(),
            card.column_id.as_str()
        );
        Ok(card)
    }

    /// Validates a partial-update payload and merges it into the stored card.
    ///
    /// # Contract
    /// - Fields absent from the payload stay untouched (exclude-unset merge).
    /// - `updated_at` is refreshed even when no field changed.
    pub fn update_card(&self, id: &str, payload: &RawPayload) -> ServiceResult<Card> {
        let patch = validate_update(payload)?;
        let mut card = self.fetch_existing(id)?;
        card.apply_patch(&patch, now_epoch_ms());
        self.repo.update_card(&card)?;
        info!("event=card_update module=service status=ok id={}", card.id);
        Ok(card)
    }

    /// Validates a move payload and relocates the card to the target column.
    ///
    /// Reflexive moves are legal and still refresh `updated_at`.
    pub fn move_card(&self, id: &str, payload: &RawPayload) -> ServiceResult<Card> {
        let column_id = validate_move(payload)?;
        let mut card = self.fetch_existing(id)?;
        card.apply_move(column_id, now_epoch_ms());
        self.repo.update_card(&card)?;
        info!(
            "event=card_move module=service status=ok id={} column={}",
            card.id,
            card.column_id.as_str()
        );
        Ok(card)
    }

    /// Gets one card by id.
    pub fn get_card(&self, id: &str) -> ServiceResult<Option<Card>> {
        Ok(self.repo.get_card(id)?)
    }

    /// Lists cards newest-created-first with an optional category filter.
    pub fn list_cards(&self, query: &CardListQuery) -> ServiceResult<Vec<Card>> {
        Ok(self.repo.list_cards(query)?)
    }

    /// Deletes one card by id.
    ///
    /// Deleting a missing id yields `CardNotFound` every time; repeated
    /// deletes are safe and report the same condition.
    pub fn delete_card(&self, id: &str) -> ServiceResult<()> {
        self.repo.delete_card(id)?;
        info!("event=card_delete module=service status=ok id={id}");
        Ok(())
    }

    fn fetch_existing(&self, id: &str) -> ServiceResult<Card> {
        self.repo
            .get_card(id)?
            .ok_or_else(|| ServiceError::CardNotFound(id.to_string()))
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// A clock before the epoch collapses to 0 rather than panicking; the
/// mutation contract's monotonic bump keeps `updated_at` consistent anyway.
fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
