use mongodb::options::Credential;
use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_SCHEME: &str = "mongodb+srv";
const DEFAULT_OPTIONS: &str = "retryWrites=true&w=majority";
const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
}

/// Where the catalog lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// `mongodb+srv` for clusters resolved through DNS, `mongodb` for a
    /// plain host list.
    pub scheme: String,
    pub host: String,
    /// No credential is sent when unset.
    pub user: Option<String>,
    pub password: Secret<String>,
    pub database: String,
    pub collection: String,
    /// Query string appended to the connection URI.
    pub options: String,
    pub server_selection_timeout_secs: u64,
}

impl CatalogConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(CatalogConfig {
            common: common_config,
            mongodb: MongoConfig::from_lookup(|key| env::var(key).ok(), is_prod)?,
        })
    }
}

impl MongoConfig {
    /// Resolve the `MONGO_*` settings through `lookup`.
    ///
    /// In production every connection parameter must be given explicitly;
    /// elsewhere the host falls back to a local server and the user is
    /// optional.
    pub fn from_lookup<F>(lookup: F, is_prod: bool) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scheme = lookup("MONGO_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme != "mongodb" && scheme != "mongodb+srv" {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "MONGO_SCHEME must be 'mongodb' or 'mongodb+srv', got '{}'",
                scheme
            )));
        }

        let user = if is_prod {
            Some(get_env(&lookup, "MONGO_USER", None, is_prod)?)
        } else {
            lookup("MONGO_USER").filter(|u| !u.is_empty())
        };

        Ok(MongoConfig {
            scheme,
            host: get_env(&lookup, "MONGO_HOST", Some("localhost:27017"), is_prod)?,
            user,
            password: Secret::new(get_env(&lookup, "MONGO_PASSWORD", Some(""), is_prod)?),
            database: get_env(&lookup, "MONGO_DB_NAME", None, is_prod)?,
            collection: get_env(&lookup, "MONGO_DB_COLLECTION", None, is_prod)?,
            options: lookup("MONGO_OPTIONS").unwrap_or_else(|| DEFAULT_OPTIONS.to_string()),
            server_selection_timeout_secs: lookup("MONGO_SERVER_SELECTION_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_SELECTION_TIMEOUT_SECS),
        })
    }

    /// Connection string without credentials.
    pub fn connection_uri(&self) -> String {
        let mut uri = format!("{}://{}/", self.scheme, self.host);
        if !self.options.is_empty() {
            uri.push('?');
            uri.push_str(&self.options);
        }
        uri
    }

    /// Driver credential built from the user and password, kept out of the
    /// URI so neither needs escaping.
    pub fn credential(&self) -> Option<Credential> {
        self.user.as_ref().map(|user| {
            Credential::builder()
                .username(user.clone())
                .password(self.password.expose_secret().clone())
                .build()
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
