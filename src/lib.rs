/// Artisan CRM - Universal Search
///
/// Core library providing the universal search engine over artisans and
/// interventions: context classification, weighted scoring, ranking and
/// the SQLite-backed candidate repository.

pub mod config;
pub mod core;
pub mod database;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
