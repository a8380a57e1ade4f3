//! Client configuration and construction options.

use std::path::PathBuf;

use crate::error::Error;

/// Credentials for one tenant account on the portal.
///
/// All three fields are required; they are validated once at client
/// construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct ZacConfig {
    /// Per-customer segment embedded in every portal URL.
    pub tenant_code: String,
    /// Login user identifier.
    pub id: String,
    /// Login password.
    pub password: String,
}

impl ZacConfig {
    /// Check every required field, in order tenant code, id, password.
    /// The first empty field fails validation and is named in the error.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.tenant_code.is_empty() {
            return Err(Error::Config("tenant_code"));
        }
        if self.id.is_empty() {
            return Err(Error::Config("id"));
        }
        if self.password.is_empty() {
            return Err(Error::Config("password"));
        }
        Ok(())
    }
}

/// Optional client behavior switches.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Log wire-level request/response details via `tracing`.
    pub debug: bool,
    /// Override the portal base URL. Used to point the client at a local
    /// stand-in portal in tests.
    pub base_url: Option<String>,
    /// Directory for response body snapshots. Defaults to the working
    /// directory.
    pub sink_dir: Option<PathBuf>,
}
