/// Errors raised by the shared domain layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A value outside the set the domain accepts.
    #[error("Validation failed: {0}")]
    Validation(String),
}
