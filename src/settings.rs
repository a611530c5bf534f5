use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct Settings {
    pub database_url: SecretString,
    pub host: String,
    pub port: u16,
    /// Apply the embedded schema migrations before serving
    pub run_migrations: bool,
}

impl Settings {
    /// Defaults, then an optional `trivia.{toml,yaml,json}` file, then `TRIVIA_*`
    /// environment variables (a `.env` file is honoured).
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_builder(
            Self::defaults()?
                .add_source(File::with_name("trivia").required(false))
                .add_source(Environment::with_prefix("TRIVIA").try_parsing(true)),
        )
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("run_migrations", true)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
