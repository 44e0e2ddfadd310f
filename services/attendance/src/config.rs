use serde::Deserialize;

use muster_core::config::Config;

use crate::domain::types::SessionDefaults;
use crate::usecase::bootstrap::BootstrapAdmin;

/// Attendance service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AttendanceConfig {
    /// SQLite connection URL. Env var: `DATABASE_URL`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// TCP port for the HTTP server (default 5000). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// HMAC secret for signing bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Bearer token lifetime in seconds (default 24h). Env var: `TOKEN_TTL_SECS`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    pub default_department: Option<String>,
    pub default_location: Option<String>,
    pub default_training_type: Option<String>,
    pub default_training_title: Option<String>,
    /// Admin seeded at startup when both email and password are set.
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
    pub bootstrap_admin_name: Option<String>,
}

fn default_database_url() -> String {
    "sqlite://muster.db?mode=rwc".to_owned()
}

fn default_port() -> u16 {
    5000
}

fn default_token_ttl_secs() -> u64 {
    24 * 60 * 60
}

impl Config for AttendanceConfig {}

impl AttendanceConfig {
    pub fn session_defaults(&self) -> SessionDefaults {
        let base = SessionDefaults::default();
        let pick = |value: &Option<String>, fallback: String| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .unwrap_or(fallback)
        };
        SessionDefaults {
            department: pick(&self.default_department, base.department),
            location: pick(&self.default_location, base.location),
            training_type: pick(&self.default_training_type, base.training_type),
            training_title: pick(&self.default_training_title, base.training_title),
        }
    }

    pub fn bootstrap_admin(&self) -> Option<BootstrapAdmin> {
        let email = self.bootstrap_admin_email.clone()?;
        let password = self.bootstrap_admin_password.clone()?;
        Some(BootstrapAdmin {
            email,
            password,
            full_name: self
                .bootstrap_admin_name
                .clone()
                .unwrap_or_else(|| "Administrator".to_owned()),
        })
    }
}
