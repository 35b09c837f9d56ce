use std::path::PathBuf;

use axum::http::{HeaderValue, Method};
use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tracing::warn;

/// Selects the in-memory store instead of a data file.
const MEMORY_DATABASE: &str = "memory";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Clone, Debug, Parser)]
#[command(about = "HTTP API for the tally todo list")]
pub struct Config {
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Path of the data file, or `memory` to keep todos in memory only.
    #[arg(long, env = "DATABASE_URL", default_value = "data.ron")]
    pub database: String,

    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Origin of the deployed client, allowed in production.
    #[arg(long, env = "FRONTEND_URL")]
    pub frontend_url: Option<String>,

    #[arg(long, env = "PRODUCTION_ORIGINS", value_delimiter = ',')]
    pub production_origins: Vec<String>,

    #[arg(
        long,
        env = "DEVELOPMENT_ORIGINS",
        value_delimiter = ',',
        default_values = ["http://localhost:3000", "http://localhost:5173"]
    )]
    pub development_origins: Vec<String>,

    #[arg(long, env = "SSL_CERT", requires = "tls_key")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long, env = "SSL_KEY", requires = "tls_cert")]
    pub tls_key: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Database {
    Memory,
    File(PathBuf),
}

impl Config {
    pub fn database(&self) -> Database {
        match self.database.trim() {
            MEMORY_DATABASE => Database::Memory,
            path => Database::File(PathBuf::from(path)),
        }
    }

    pub fn tls(&self) -> Option<(PathBuf, PathBuf)> {
        self.tls_cert.clone().zip(self.tls_key.clone())
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        let origins: Vec<&String> = match self.environment {
            Environment::Production => (self.frontend_url.iter())
                .chain(&self.production_origins)
                .collect(),
            Environment::Development => self.development_origins.iter().collect(),
        };

        (origins.into_iter())
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn cors(&self) -> eyre::Result<CorsLayer> {
        let origins = self.allowed_origins();

        if origins.is_empty() {
            warn!(environment = ?self.environment, "no allowed origins, cross-origin requests will be refused");
        }

        if origins.iter().any(|origin| origin == "*") {
            eyre::bail!("wildcard origin cannot be combined with credentials");
        }

        let origins = (origins.iter())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .wrap_err_with(|| format!("invalid allowed origin `{origin}`"))
            })
            .collect::<eyre::Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::parse_from(std::iter::once("back").chain(args.iter().copied()))
    }

    #[test]
    fn development_allows_local_clients() {
        let config = parse(&["--environment", "development"]);

        assert_eq!(
            config.allowed_origins(),
            ["http://localhost:3000", "http://localhost:5173"]
        );
    }

    #[test]
    fn production_allows_the_frontend_and_extra_origins() {
        let config = parse(&[
            "--environment",
            "production",
            "--frontend-url",
            "https://tally.example.com",
            "--production-origins",
            "https://a.example.com, ,https://b.example.com",
        ]);

        assert_eq!(
            config.allowed_origins(),
            [
                "https://tally.example.com",
                "https://a.example.com",
                "https://b.example.com"
            ]
        );
    }

    #[test]
    fn memory_database_is_recognised() {
        assert_eq!(parse(&["--database", "memory"]).database(), Database::Memory);
        assert_eq!(
            parse(&["--database", "todos.ron"]).database(),
            Database::File(PathBuf::from("todos.ron"))
        );
    }

    #[test]
    fn tls_needs_both_halves() {
        let config = parse(&["--tls-cert", "cert.pem", "--tls-key", "key.pem"]);
        assert_eq!(
            config.tls(),
            Some((PathBuf::from("cert.pem"), PathBuf::from("key.pem")))
        );

        let result = Config::try_parse_from(["back", "--tls-cert", "cert.pem"]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_origins_are_reported() {
        let config = parse(&["--development-origins", "http://bad\norigin"]);
        assert!(config.cors().is_err());
    }

    #[test]
    fn wildcard_origins_are_refused() {
        let config = parse(&["--development-origins", "http://localhost:3000,*"]);
        let err = config.cors().unwrap_err();
        assert!(err.to_string().contains("wildcard"), "{err}");

        let config = parse(&[
            "--environment",
            "production",
            "--production-origins",
            " * ",
        ]);
        assert!(config.cors().is_err());
    }
}
