//! Configuration for the sync and delivery tools.
//!
//! Settings are resolved once at start-up from three layers, highest
//! precedence first: command-line flags, an optional TOML file passed with
//! `--config`, and built-in defaults. The resolved structs are immutable and
//! passed by reference into the protocols.
//!
//! The file only carries connection settings. Credentials are accepted on the
//! command line alone.
//!
//! ```toml
//! [sync]
//! servername = "nexus.example.com"
//! port = 8081
//! repository = "releases"
//!
//! [delivery]
//! url = "https://nexus.example.com/nexus/content/repositories/APDS"
//! timeout_secs = 120
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use nexus_sync_common::{Gav, GavError};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::cli::{DeliverCli, SyncCli};
use crate::delivery::DeliverySettings;
use crate::sync::{RepositoryEndpoint, SyncSettings};
use crate::transport::{TransportOptions, basic_auth_value};

/// Default repository manager host.
pub const DEFAULT_SERVER: &str = "localhost";
/// Default repository manager port.
pub const DEFAULT_PORT: u16 = 8081;
/// Default URL scheme for the sync tool.
pub const DEFAULT_SCHEME: &str = "http";
/// Path under which Nexus serves hosted repositories.
pub const DEFAULT_CONTEXT_PATH: &str = "/nexus/content/repositories";
/// Default repository to synchronise against.
pub const DEFAULT_REPOSITORY: &str = "releases";
/// Default delivery store URL.
pub const DEFAULT_DELIVERY_URL: &str = "http://localhost:8081/nexus/content/repositories/APDS";

/// Errors arising while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid configuration file {path}: {source}")]
    Parse {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The coordinate supplied on the command line is incomplete.
    #[error("invalid artifact coordinate: {0}")]
    InvalidGav(#[from] GavError),
}

/// HTTP Basic credentials.
///
/// Authentication is only attached when both parts are non-empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials from optional command-line values.
    #[must_use]
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self {
            username: username.unwrap_or_default(),
            password: password.unwrap_or_default(),
        }
    }

    /// Return true when both username and password are set.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Return the `Authorization` header value, if credentials are complete.
    ///
    /// # Examples
    ///
    /// ```
    /// use nexus_sync::config::Credentials;
    ///
    /// let anonymous = Credentials::new(Some("admin".to_owned()), None);
    /// assert_eq!(anonymous.basic_auth_header(), None);
    ///
    /// let admin = Credentials::new(Some("admin".to_owned()), Some("admin123".to_owned()));
    /// assert_eq!(
    ///     admin.basic_auth_header().as_deref(),
    ///     Some("Basic YWRtaW46YWRtaW4xMjM=")
    /// );
    /// ```
    #[must_use]
    pub fn basic_auth_header(&self) -> Option<String> {
        self.is_complete()
            .then(|| basic_auth_value(&self.username, &self.password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Contents of the optional TOML configuration file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Defaults for `nexus-sync`.
    pub sync: SyncFileConfig,
    /// Defaults for `nexus-deliver`.
    pub delivery: DeliveryFileConfig,
}

/// The `[sync]` table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SyncFileConfig {
    /// Repository manager host.
    pub servername: Option<String>,
    /// Repository manager port.
    pub port: Option<u16>,
    /// URL scheme (`http` or `https`).
    pub scheme: Option<String>,
    /// Path under which repositories are served.
    pub context_path: Option<String>,
    /// Repository name.
    pub repository: Option<String>,
}

/// The `[delivery]` table.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeliveryFileConfig {
    /// Delivery store base URL.
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or contains keys this
    /// version does not understand.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Load configuration from `path` when given, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`FileConfig::load`].
    pub fn load_optional(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}

/// Fully resolved settings for one `nexus-sync` run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Protocol settings.
    pub sync: SyncSettings,
    /// HTTP agent settings.
    pub transport: TransportOptions,
}

/// Fully resolved settings for one `nexus-deliver` run.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Protocol settings.
    pub delivery: DeliverySettings,
    /// HTTP agent settings.
    pub transport: TransportOptions,
    /// Input file; `None` reads stdin.
    pub input: Option<Utf8PathBuf>,
    /// Output file; `None` writes stdout.
    pub output: Option<Utf8PathBuf>,
}

/// Resolve `nexus-sync` settings from flags and file.
#[must_use]
pub fn resolve_sync(cli: &SyncCli, file: &FileConfig) -> SyncConfig {
    let defaults = &file.sync;
    let endpoint = RepositoryEndpoint {
        scheme: pick(&cli.scheme, &defaults.scheme, DEFAULT_SCHEME),
        server: pick(&cli.servername, &defaults.servername, DEFAULT_SERVER),
        port: cli.port.or(defaults.port).unwrap_or(DEFAULT_PORT),
        context_path: pick(&cli.context_path, &defaults.context_path, DEFAULT_CONTEXT_PATH),
        repository: pick(&cli.repository, &defaults.repository, DEFAULT_REPOSITORY),
    };
    SyncConfig {
        sync: SyncSettings {
            endpoint,
            upload: cli.upload,
        },
        transport: TransportOptions {
            credentials: Credentials::new(cli.username.clone(), cli.password.clone()),
            timeout: None,
            insecure_skip_verify: false,
        },
    }
}

/// Resolve `nexus-deliver` settings from flags and file.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidGav`] if a coordinate field is empty.
pub fn resolve_delivery(cli: &DeliverCli, file: &FileConfig) -> Result<DeliveryConfig, ConfigError> {
    let defaults = &file.delivery;
    let gav = Gav::new(
        cli.group_id.as_str(),
        cli.artifact_id.as_str(),
        cli.version.as_str(),
        cli.packaging.as_str(),
    )?;
    let timeout = cli
        .timeout
        .or(defaults.timeout_secs)
        .map(Duration::from_secs);
    Ok(DeliveryConfig {
        delivery: DeliverySettings {
            base_url: pick(&cli.url, &defaults.url, DEFAULT_DELIVERY_URL),
            gav,
            dry_run: cli.dry_run,
        },
        transport: TransportOptions {
            credentials: Credentials::new(cli.username.clone(), cli.password.clone()),
            timeout,
            insecure_skip_verify: cli.insecure_skip_verify,
        },
        input: cli.input.clone(),
        output: cli.output.clone(),
    })
}

fn pick(flag: &Option<String>, file: &Option<String>, default: &str) -> String {
    flag.as_ref()
        .or(file.as_ref())
        .cloned()
        .unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
