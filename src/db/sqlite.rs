use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, params};
use serde_json::Value as JsonValue;

use crate::db::client::{DBClient, DBError};

/// SQLiteClient stores JSON documents in a single table keyed by collection name.
pub struct SQLiteClient {
    pub db: Arc<Mutex<Connection>>,
}

impl SQLiteClient {
    /// Opens a new SQLite connection using the given data source name and creates the required tables.
    pub fn new(data_source_name: &str) -> Result<Self, DBError> {
        let db = Connection::open(data_source_name)?;
        create_tables(&db)?;
        Ok(SQLiteClient { db: Arc::new(Mutex::new(db)) })
    }

    /// Opens a private in-memory database with the same schema.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, DBError> {
        let db = Connection::open_in_memory()?;
        create_tables(&db)?;
        Ok(SQLiteClient { db: Arc::new(Mutex::new(db)) })
    }
}

#[async_trait]
impl DBClient for SQLiteClient {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    // rusqlite blocks, so the query runs on the blocking pool instead of the async worker.
    async fn get_documents(&self, collection: &str) -> Result<Vec<JsonValue>, DBError> {
        let db = Arc::clone(&self.db);
        let collection = collection.to_string();
        tokio::task::spawn_blocking(move || query_documents(&db, &collection)).await?
    }
}

fn query_documents(db: &Mutex<Connection>, collection: &str) -> Result<Vec<JsonValue>, DBError> {
    let db = db.lock().map_err(|_| DBError::Poisoned)?;
    let mut stmt = db.prepare("SELECT body FROM documents WHERE collection = ?1 ORDER BY id")?;
    let mut rows = stmt.query(params![collection])?;

    let mut docs = Vec::new();
    while let Some(row) = rows.next()? {
        let body: String = row.get(0)?;
        let doc = serde_json::from_str(&body).map_err(|e| DBError::Document {
            collection: collection.to_string(),
            source: e,
        })?;
        docs.push(doc);
    }
    Ok(docs)
}

fn create_tables(db: &Connection) -> Result<(), DBError> {
    db.execute_batch(
        "CREATE TABLE IF NOT EXISTS documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection TEXT NOT NULL,
            body TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents (collection);",
    )?;
    Ok(())
}
