use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_CONTENT_DIR: &str = "./data";
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    3000,
);
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum BackendConfig {
    File { dir: PathBuf },
    Sql { url: String, max_connections: u32 },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub backend: BackendConfig,
    pub bind_addr: SocketAddr,
    /// Directory of JSON collections to copy into an empty SQL backend.
    pub import_from: Option<PathBuf>,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Unknown CONTENT_BACKEND `{0}`, expected `file` or `sql`")]
    UnknownBackend(String),
    #[error("DATABASE_URL must be set for the sql backend")]
    MissingDatabaseUrl,
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenvy::dotenv().ok();
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("CONTENT_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("file") => BackendConfig::File {
                dir: lookup("CONTENT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
            },
            Some("sql") => BackendConfig::Sql {
                url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
                max_connections: parse(
                    "DATABASE_MAX_CONNECTIONS",
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    DEFAULT_MAX_CONNECTIONS,
                )?,
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let bind_addr = parse("BIND_ADDR", lookup("BIND_ADDR"), DEFAULT_BIND_ADDR)?;

        Ok(Config {
            backend,
            bind_addr,
            import_from: lookup("IMPORT_FROM_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        })
    }
}

fn parse<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
