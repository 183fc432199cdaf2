use thiserror::Error;

/// Message used when a failure carries no usable text.
pub const UNKNOWN_ERROR_MESSAGE: &str = "an unknown error occurred";

/// Error types for Last.fm API operations.
///
/// Every failure the client can produce lands in one of these variants. The
/// browse controller never lets them escape: it turns them into a one-line
/// message with [`LastFmError::user_message`] and stores that in session state.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use lastfm_explorer::{ClientConfig, LastFmApiClient, LastFmApiClientImpl, LastFmError};
///
/// #[tokio::main]
/// async fn main() {
///     let config = ClientConfig::new("my-api-key");
///     let client = LastFmApiClientImpl::new(
///         Box::new(http_client::native::NativeClient::new()),
///         config,
///     );
///
///     match client.get_artist_detail("Queen").await {
///         Ok(detail) => println!("{} has {} listeners", detail.name, detail.stats.listeners),
///         Err(LastFmError::Api { code, message }) => eprintln!("Last.fm said no ({code}): {message}"),
///         Err(LastFmError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum LastFmError {
    /// HTTP/network related errors.
    ///
    /// Connection failures, DNS errors and non-success status codes whose body
    /// did not carry a Last.fm error payload.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with an error-shaped body.
    ///
    /// Last.fm reports failures as `{"error": <code>, "message": "..."}`,
    /// sometimes with a 200 status.
    #[error("Last.fm API error {code}: {message}")]
    Api {
        /// Numeric Last.fm error code (6 = not found, 10 = invalid key, ...)
        code: u32,
        /// Message supplied by the service
        message: String,
    },

    /// Failed to parse Last.fm's response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Missing or invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LastFmError {
    /// Single-line message suitable for showing to a user.
    ///
    /// Prefers the message embedded in an error response, then the transport
    /// error's own text, and falls back to [`UNKNOWN_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        let raw = match self {
            LastFmError::Api { message, .. } => message.as_str(),
            LastFmError::Http(msg) | LastFmError::Parse(msg) | LastFmError::Config(msg) => {
                msg.as_str()
            }
        };

        let line = raw.lines().map(str::trim).find(|l| !l.is_empty());
        match line {
            Some(line) => line.to_string(),
            None => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether the service itself rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self, LastFmError::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_api_message() {
        let err = LastFmError::Api {
            code: 6,
            message: "The artist you supplied could not be found".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "The artist you supplied could not be found"
        );
        assert!(err.is_api_error());
    }

    #[test]
    fn test_user_message_uses_transport_text() {
        let err = LastFmError::Http("connection refused".to_string());
        assert_eq!(err.user_message(), "connection refused");
        assert!(!err.is_api_error());
    }

    #[test]
    fn test_user_message_falls_back_when_empty() {
        assert_eq!(
            LastFmError::Http("   ".to_string()).user_message(),
            UNKNOWN_ERROR_MESSAGE
        );
        assert_eq!(
            LastFmError::Api {
                code: 8,
                message: String::new()
            }
            .user_message(),
            UNKNOWN_ERROR_MESSAGE
        );
    }

    #[test]
    fn test_user_message_is_single_line() {
        let err = LastFmError::Parse("\nexpected value\nat line 1 column 1".to_string());
        assert_eq!(err.user_message(), "expected value");
    }
}
