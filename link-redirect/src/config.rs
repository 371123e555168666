use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::Credentials;
use crate::SettingsError;

/// Batched round robin redirect service.
#[derive(Clone, Debug, Parser)]
#[command(name = "link-redirect", version, about)]
pub struct Args {
    /// Username for the control panel's basic auth.
    #[arg(short = 'u', long, env = "LINK_REDIRECT_USER")]
    pub user: String,

    /// Password for the control panel's basic auth.
    #[arg(short = 'p', long, env = "LINK_REDIRECT_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Public host name, used in the advertised redirect link and the HTTPS redirect.
    #[arg(long, env = "LINK_REDIRECT_HOST")]
    pub host: String,

    /// Listener for visitor traffic.
    #[arg(long, env = "LINK_REDIRECT_PUBLIC_ADDR", default_value = "0.0.0.0:80")]
    pub public_addr: SocketAddr,

    /// Listener for the control panel. Serves plain HTTP: put a TLS
    /// terminating proxy in front of it, listening on 443 for `--host`, or the
    /// public `/` redirect to `https://<host>/` reaches nothing and basic auth
    /// credentials cross the network in cleartext.
    #[arg(long, env = "LINK_REDIRECT_ADMIN_ADDR", default_value = "0.0.0.0:8443")]
    pub admin_addr: SocketAddr,

    /// Maximum time to spend on a single request, e.g. `500ms` or `10s`.
    #[arg(
        long,
        env = "LINK_REDIRECT_REQUEST_TIMEOUT",
        default_value = "10s",
        value_parser = humantime::parse_duration
    )]
    pub request_timeout: Duration,
}

impl Args {
    /// Rejects empty credentials or host.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] naming the first empty setting.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if self.user.trim().is_empty() {
            return Err(SettingsError::Missing("username for basic auth (-u)"));
        }
        if self.password.is_empty() {
            return Err(SettingsError::Missing("password for basic auth (-p)"));
        }
        if self.host.trim().is_empty() {
            return Err(SettingsError::Missing("host (--host)"));
        }
        Ok(self)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.user, &self.password)
    }
}
