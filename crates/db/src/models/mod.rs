//! Row structs and request DTOs.
//!
//! Row structs derive `FromRow` against the column aliases in each
//! repository's `COLUMNS` list and serialize with the wire field names.

pub mod sector;
pub mod transaction;
