//! Category use-case service.
//!
//! # Responsibility
//! - Expose the fixed category catalog to transport callers.
//! - Run the idempotent bootstrap seeding step during process init.

use crate::model::category::Category;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoResult;
use log::info;

/// Use-case service wrapper for category operations.
pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all seeded categories in catalog order.
    pub fn list_categories(&self) -> RepoResult<Vec<Category>> {
        self.repo.list_categories()
    }

    /// Ensures the static category set exists.
    ///
    /// Run once during process initialization; calling it again inserts
    /// nothing and reports zero rows.
    pub fn ensure_seeded(&self) -> RepoResult<usize> {
        let inserted = self.repo.seed_categories()?;
        info!("event=category_seed module=service status=ok inserted={inserted}");
        Ok(inserted)
    }
}
