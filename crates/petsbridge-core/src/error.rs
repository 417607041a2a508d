// ── User-facing error taxonomy ──
//
// Everything the host platform can observe from the bridge. These are NOT
// API-specific -- lower-level client errors are caught at the refresh
// boundary, logged, and translated here. The platform decides what each
// variant means for the user: re-authenticate, abort setup, or show stale.

use thiserror::Error;

use petsbridge_api::ApiError;

/// Unified error type for the core crate.
///
/// `Clone` because a refresh outcome is shared with every caller that
/// coalesced onto the same in-flight build.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// Credentials rejected by the cloud. Non-retryable; the user must
    /// re-authenticate. Fatal during setup, marks the bridge unavailable
    /// when raised later.
    #[error("Authentication failed: {message}")]
    AuthFailure { message: String },

    /// Any other initialization-time error. Setup aborts and nothing is
    /// registered.
    #[error("Setup failed: {message}")]
    SetupFailure { message: String },

    /// A scheduled or manual refresh failed after setup. The previously
    /// published snapshot stays visible; data is stale until the next
    /// successful refresh.
    #[error("Refresh failed: {source}")]
    RefreshFailed {
        #[source]
        source: ApiError,
    },
}

impl From<ApiError> for BridgeError {
    /// Route client errors: the `invalid_client` signature is the distinct
    /// "re-authentication required" condition; everything else is a
    /// recoverable refresh failure.
    fn from(err: ApiError) -> Self {
        if err.is_invalid_client() {
            Self::AuthFailure {
                message: err.to_string(),
            }
        } else {
            Self::RefreshFailed { source: err }
        }
    }
}

impl BridgeError {
    /// Demote to the setup-time taxonomy: during initial setup a refresh
    /// failure is a setup failure, while auth failures keep their identity
    /// so the platform can start its re-auth flow.
    pub(crate) fn into_setup_error(self) -> Self {
        match self {
            Self::RefreshFailed { source } => Self::SetupFailure {
                message: source.to_string(),
            },
            other => other,
        }
    }
}
