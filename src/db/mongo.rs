use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{Bson, Document, doc},
    options::ClientOptions,
};
use serde_json::Value as JsonValue;

use crate::db::client::{DBClient, DBError};

/// MongoClient wraps a MongoDB client bound to one database.
pub struct MongoClient {
    pub client: Client,
    db_name: String,
}

impl MongoClient {
    /// Creates a new MongoDB client using the provided URI.
    ///
    /// The driver connects lazily, so an unreachable server only shows up on the first query.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, DBError> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        let client = Client::with_options(client_options)?;
        Ok(MongoClient {
            client,
            db_name: db_name.to_string(),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.client.database(&self.db_name).collection(name)
    }
}

/// Converts a BSON document to relaxed extended JSON, so strings and plain
/// numbers stay plain and only BSON-specific types such as ObjectId get a `$` wrapper.
fn document_to_json(doc: Document) -> JsonValue {
    Bson::Document(doc).into_relaxed_extjson()
}

#[async_trait]
impl DBClient for MongoClient {
    fn kind(&self) -> &'static str {
        "mongo"
    }

    async fn get_documents(&self, collection: &str) -> Result<Vec<JsonValue>, DBError> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(document_to_json).collect())
    }

    async fn close(&self) -> Result<(), DBError> {
        self.client.clone().shutdown().await;
        Ok(())
    }
}
