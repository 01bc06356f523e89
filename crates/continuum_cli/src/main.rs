//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `continuum_core` linkage and
//!   database bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use continuum_core::db::open_db_in_memory;
use continuum_core::{CategoryService, SqliteCategoryRepository};

fn main() {
    println!("continuum_core ping={}", continuum_core::ping());
    println!("continuum_core version={}", continuum_core::core_version());

    // Exercise bootstrap end to end: open, migrate, seed, list.
    match smoke_bootstrap() {
        Ok(count) => println!("continuum_core categories={count}"),
        Err(message) => {
            eprintln!("continuum_core bootstrap failed: {message}");
            std::process::exit(1);
        }
    }
}

fn smoke_bootstrap() -> Result<usize, String> {
    let conn = open_db_in_memory().map_err(|err| err.to_string())?;
    let repo = SqliteCategoryRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let service = CategoryService::new(repo);
    service.ensure_seeded().map_err(|err| err.to_string())?;
    let categories = service
        .list_categories()
        .map_err(|err| err.to_string())?;
    Ok(categories.len())
}
