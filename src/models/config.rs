use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Credentials accepted by the admin login.
#[derive(Clone, Debug, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    /// Argon2 PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`.
    pub password_hash: String,
}

/// Configuration options of the storefront service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// SQLite database path.
    pub database_url: String,
    /// Glob passed to Tera.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub assets_dir: String,
    /// Cookie signing key; at least 64 bytes.
    pub secret_key: String,
    pub admin: AdminConfig,
}

impl ServerConfig {
    /// Reads `path` (any format supported by `config`, extension optional)
    /// and overlays `APP__*` environment variables, e.g.
    /// `APP__ADMIN__PASSWORD_HASH`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("database_url", "app.db")?
            .set_default("templates_dir", "templates/**/*")?
            .set_default("assets_dir", "./assets")?
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
