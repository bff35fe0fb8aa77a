use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};

use crate::domain::models::validate_target_amount;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub billing: BillingSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub app_url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub request_timeout_secs: u64,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub max_connections: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub acquire_timeout_secs: u64,
}

#[derive(Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct BillingSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub default_yearly_target: Decimal,
}

impl BillingSettings {
    fn validate(&self) -> Result<(), config::ConfigError> {
        validate_target_amount(self.default_yearly_target).map_err(|err| {
            config::ConfigError::Message(format!("invalid billing.default_yearly_target: {err}"))
        })
    }
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|err| {
        config::ConfigError::Message(format!("failed to determine the current directory: {err}"))
    })?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|err| config::ConfigError::Message(format!("failed to parse APP_ENVIRONMENT: {err}")))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("TALLY")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    parse_settings(settings)
}

fn parse_settings(config: config::Config) -> Result<Settings, config::ConfigError> {
    let settings = config.try_deserialize::<Settings>()?;
    settings.billing.validate()?;

    Ok(settings)
}

#[derive(Display, Debug, EnumString, PartialEq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
