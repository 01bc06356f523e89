//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, mutation and repository calls into use-case
//!   level APIs.
//! - Keep transport layers decoupled from storage details.

pub mod card_service;
pub mod category_service;
