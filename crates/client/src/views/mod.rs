//! View models for the three screens. Each owns only presentation state and
//! input validation; all persistence goes through a [`Gateway`].
//!
//! [`Gateway`]: crate::gateway::Gateway

pub mod history;
pub mod registration;
pub mod sectors;

use stockroom_core::validation::ValidationError;

use crate::error::ClientError;

pub use history::HistoryView;
pub use registration::RegistrationForm;
pub use sectors::SectorsView;

/// Why a view action did not go through.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// The action refers to a row the view does not currently hold.
    #[error("Registro não encontrado: {0}")]
    UnknownRecord(String),
}
