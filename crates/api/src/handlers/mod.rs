pub mod sector;
pub mod transaction;
