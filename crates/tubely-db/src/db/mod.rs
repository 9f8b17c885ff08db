//! PostgreSQL repositories

pub mod video;

pub use video::PgVideoRepository;
