mod client;
pub use client::*;
mod memory;
pub use memory::*;
mod mongo;
pub use mongo::*;
mod sqlite;
pub use sqlite::*;

use crate::utils;

/// Connection settings, read from `DB_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DBConfig {
    pub db_type: String,
    pub db_file: String,
    pub db_uri: String,
    pub db_name: String,
}

impl DBConfig {
    pub fn from_env() -> Self {
        DBConfig::from_lookup(|key, fallback| utils::get_env(key, fallback))
    }

    /// Builds the config from any key lookup with the same contract as `utils::get_env`.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> String,
    {
        let db_uri = match get("DB_URI", None) {
            uri if !uri.is_empty() => uri,
            _ => {
                let db_username = get("DB_USER", None);
                let db_password = get("DB_PASS", None);
                let db_host = get("DB_HOST", Some("localhost"));
                let db_port = get("DB_PORT", Some("27017"));
                if db_username.is_empty() || db_password.is_empty() {
                    format!("mongodb://{}:{}", db_host, db_port)
                } else {
                    format!("mongodb://{}:{}@{}:{}", db_username, db_password, db_host, db_port)
                }
            }
        };

        DBConfig {
            db_type: get("DB_TYPE", Some("sqlite")),
            db_file: get("DB_FILE", Some("db.sqlite3")),
            db_uri,
            db_name: get("DB_NAME", Some("soundboard")),
        }
    }
}

/// Creates a new database client based on the environment variable "DB_TYPE".
/// Supported types are "mongo", "sqlite" and "memory". If not set, defaults to "sqlite".
pub async fn new_db_client() -> Result<Box<dyn DBClient>, DBError> {
    new_db_client_from_config(&DBConfig::from_env()).await
}

pub async fn new_db_client_from_config(config: &DBConfig) -> Result<Box<dyn DBClient>, DBError> {
    match config.db_type.as_str() {
        "mongo" => {
            let mongo_client = MongoClient::new(&config.db_uri, &config.db_name).await?;
            Ok(Box::new(mongo_client))
        }
        "sqlite" => Ok(Box::new(SQLiteClient::new(&config.db_file)?)),
        "memory" => Ok(Box::new(MemoryClient::from_json_file(&config.db_file)?)),
        other => Err(DBError::UnsupportedType(other.to_string())),
    }
}
