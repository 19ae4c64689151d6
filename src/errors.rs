use reqwest::StatusCode;
use thiserror::Error;

/// Failure surface of the orders API client.
///
/// `Api` means the service answered with a non-2xx status; `message` is
/// the display string taken from the response body's `message` field.
/// `Transport` is everything below HTTP semantics: connection failures,
/// invalid response bodies, and so on.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// The text shown in the flash area for this failure.
    pub fn flash_text(&self) -> String {
        self.to_string()
    }

    /// Status code of the server response, when there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_the_server_message_verbatim() {
        let err = ApiError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Order with id '42' was not found.".to_string(),
        };
        assert_eq!(err.flash_text(), "Order with id '42' was not found.");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
