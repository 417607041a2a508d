use thiserror::Error;

/// Top-level error type for the `petsbridge-api` crate.
///
/// Covers every failure mode a client implementation can report across the
/// cloud API and the local backend. `petsbridge-core` maps these into the
/// user-facing taxonomy -- consumers never see raw transport errors.
///
/// `Clone` is required so an in-flight refresh outcome can be fanned out to
/// every caller that coalesced onto it.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected by the cloud backend.
    ///
    /// `code` carries the OAuth-style error code when the backend provides
    /// one (e.g. `invalid_client`).
    #[error("Authentication failed: {message}")]
    Authentication {
        code: Option<String>,
        message: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Rate limited by the cloud API. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error reported by the cloud API.
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// Response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode { message: String },

    // ── Local backend ───────────────────────────────────────────────
    /// The local device-control backend could not be queried.
    #[error("Local backend unavailable: {reason}")]
    LocalUnavailable { reason: String },
}

impl ApiError {
    /// Shorthand for the `invalid_client` authentication rejection.
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::Authentication {
            code: Some("invalid_client".into()),
            message: message.into(),
        }
    }

    /// Returns `true` if this is the non-retryable `invalid_client`
    /// rejection that requires the user to re-authenticate.
    ///
    /// Some backends put the code in a structured field, others only in the
    /// message text; both signatures are recognized.
    pub fn is_invalid_client(&self) -> bool {
        match self {
            Self::Authentication { code, message } => {
                code.as_deref() == Some("invalid_client") || message.contains("invalid_client")
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying on the
    /// next scheduled refresh.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Timeout { .. }
                | Self::RateLimited { .. }
                | Self::LocalUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_client_detected_by_code() {
        let err = ApiError::invalid_client("bad credentials");
        assert!(err.is_invalid_client());
    }

    #[test]
    fn invalid_client_detected_by_message() {
        let err = ApiError::Authentication {
            code: None,
            message: "token endpoint returned invalid_client".into(),
        };
        assert!(err.is_invalid_client());
    }

    #[test]
    fn other_auth_errors_are_not_invalid_client() {
        let err = ApiError::Authentication {
            code: Some("invalid_grant".into()),
            message: "refresh token expired".into(),
        };
        assert!(!err.is_invalid_client());
    }

    #[test]
    fn transport_is_transient_but_auth_is_not() {
        let transport = ApiError::Transport {
            message: "connection reset".into(),
        };
        assert!(transport.is_transient());
        assert!(!ApiError::invalid_client("nope").is_transient());
    }
}
