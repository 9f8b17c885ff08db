//! Tubely Database Layer
//!
//! Video record persistence. Callers depend on the [`VideoRepository`] trait;
//! [`PgVideoRepository`] backs it with PostgreSQL and [`MemoryVideoRepository`]
//! keeps records in process for tests and local tooling.
//!
// Module declarations
pub mod db;
pub mod memory;
pub mod traits;

pub use db::PgVideoRepository;
pub use memory::MemoryVideoRepository;
pub use traits::VideoRepository;
