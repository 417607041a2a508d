// ── Runtime bridge configuration ──
//
// These types describe *what* to connect to and *how fast* to poll.
// They carry credential data and cadence tuning, but never touch disk.
// The host platform constructs a `BridgeConfig` and hands it to setup.

use std::time::Duration;

use secrecy::SecretString;
use strum::Display;

/// How often a full snapshot refresh runs.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Spacing inserted between successive outbound calls to stay under the
/// vendor's request-rate ceiling.
pub const DEFAULT_CALL_DELAY: Duration = Duration::from_millis(500);

/// OAuth token pair for the cloud client.
///
/// The bridge treats these as opaque: they flow to the client factory at
/// setup and are never read again. Refreshing the access token is the
/// client's own business.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::from(access_token.into()),
            refresh_token: SecretString::from(refresh_token.into()),
        }
    }
}

/// Tuya local protocol version spoken by the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum ProtocolVersion {
    #[strum(serialize = "3.1")]
    V3_1,
    #[strum(serialize = "3.3")]
    V3_3,
    #[default]
    #[strum(serialize = "3.4")]
    V3_4,
}

/// Connection triple for the optional Tuya local backend.
#[derive(Debug, Clone)]
pub struct LocalBackendConfig {
    pub client_id: String,
    /// Network address of the device on the LAN.
    pub address: String,
    pub local_key: SecretString,
    pub version: ProtocolVersion,
}

impl LocalBackendConfig {
    /// Assemble the local backend config from individually-optional fields.
    ///
    /// The backend is only considered configured when the whole triple is
    /// present and non-empty; anything less means "no local backend", not an
    /// error. The protocol version falls back to 3.4 when unspecified.
    pub fn from_parts(
        client_id: Option<&str>,
        address: Option<&str>,
        local_key: Option<&str>,
        version: Option<ProtocolVersion>,
    ) -> Option<Self> {
        let client_id = client_id.filter(|v| !v.is_empty())?;
        let address = address.filter(|v| !v.is_empty())?;
        let local_key = local_key.filter(|v| !v.is_empty())?;

        Some(Self {
            client_id: client_id.to_owned(),
            address: address.to_owned(),
            local_key: SecretString::from(local_key.to_owned()),
            version: version.unwrap_or_default(),
        })
    }
}

/// Configuration for one bridge instance.
///
/// Built by the host platform, passed to setup -- the bridge never reads
/// config files.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Cloud credentials, consumed by the client factory.
    pub credentials: Credentials,
    /// Optional local device-control backend.
    pub local_backend: Option<LocalBackendConfig>,
    /// Full-refresh period. Zero disables the scheduled refresh entirely;
    /// only explicit `refresh_now` calls run then.
    pub refresh_interval: Duration,
    /// Inter-call delay enforced by the snapshot builder.
    pub delay_between_calls: Duration,
}

impl BridgeConfig {
    /// Config with the production cadence (5 min period, 0.5 s spacing).
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            local_backend: None,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            delay_between_calls: DEFAULT_CALL_DELAY,
        }
    }

    pub fn with_local_backend(mut self, local: LocalBackendConfig) -> Self {
        self.local_backend = Some(local);
        self
    }
}
