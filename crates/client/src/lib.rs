//! Client side of the stockroom: a typed HTTP gateway over the REST API and
//! the view models behind the registration, history and sectors screens.

pub mod error;
pub mod gateway;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ClientError;
pub use gateway::{Gateway, HttpGateway, DEFAULT_API_URL};
