//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod sector_repo;
pub mod transaction_repo;

pub use sector_repo::SectorRepo;
pub use transaction_repo::TransactionRepo;
