/// Errors from the client data gateway.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection refused, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The API answered 2xx but the body was not what the endpoint promises.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The configured API URL cannot carry a resource path.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_status() {
        let err = ClientError::Status {
            status: 500,
            body: r#"{"code":"INTERNAL_ERROR"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"API error (500): {"code":"INTERNAL_ERROR"}"#
        );
    }

    #[test]
    fn json_errors_become_decode() {
        let err: ClientError = serde_json::from_str::<Vec<i32>>("{").unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
