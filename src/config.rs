use figment::{Figment, providers::Env};
use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use std::sync::LazyLock;

/// Runtime configuration, resolved once from the environment.
///
/// Every field can be set with a `DASH_`-prefixed variable, e.g.
/// `DASH_DB_HOST`, `DASH_DB_PASSWORD`. Credentials live here and nowhere
/// else in the source.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_user")]
    pub db_user: String,
    #[serde(default)]
    pub db_password: String,
    #[serde(default = "default_db_name")]
    pub db_name: String,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "cakedash".to_string()
}

fn default_db_name() -> String {
    "Cake_Store".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

impl Config {
    pub fn from_env() -> Self {
        Figment::new()
            .merge(Env::prefixed("DASH_"))
            .extract()
            .unwrap_or_else(|e| panic!("invalid DASH_* configuration: {e}"))
    }

    /// Connection options built from parts; the password never passes
    /// through a URL string.
    pub fn mysql_connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);
