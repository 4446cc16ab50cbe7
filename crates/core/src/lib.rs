//! Domain types and rules shared by the stockroom server and client.
//!
//! Nothing in here touches the network or the database: the enums, typed
//! records, validation rules and the history filter are pure functions over
//! plain data so both sides of the wire agree on them.

pub mod error;
pub mod filter;
pub mod inventory;
pub mod types;
pub mod validation;
pub mod wire;
