use std::collections::HashMap;
use std::fs;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::db::client::{DBClient, DBError};

/// In-process document store, seeded once and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct MemoryClient {
    collections: HashMap<String, Vec<JsonValue>>,
}

impl MemoryClient {
    pub fn new(collections: HashMap<String, Vec<JsonValue>>) -> Self {
        MemoryClient { collections }
    }

    /// Builds a store holding a single collection.
    #[cfg(test)]
    pub fn with_collection(name: &str, documents: Vec<JsonValue>) -> Self {
        MemoryClient::new(HashMap::from([(name.to_string(), documents)]))
    }

    /// Loads a fixture file shaped like `{"<collection>": [<document>, ...], ...}`.
    pub fn from_json_file(path: &str) -> Result<Self, DBError> {
        let raw = fs::read_to_string(path).map_err(|e| DBError::Io {
            path: path.to_string(),
            source: e,
        })?;
        let collections = serde_json::from_str(&raw).map_err(|e| DBError::Document {
            collection: path.to_string(),
            source: e,
        })?;
        Ok(MemoryClient::new(collections))
    }
}

#[async_trait]
impl DBClient for MemoryClient {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn get_documents(&self, collection: &str) -> Result<Vec<JsonValue>, DBError> {
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn returns_only_the_requested_collection() {
        let client = MemoryClient::new(HashMap::from([
            ("sounds".to_string(), vec![json!({"url": "a.mp3"})]),
            ("users".to_string(), vec![json!({"name": "ann"})]),
        ]));

        assert_eq!(client.get_documents("sounds").await.unwrap(), vec![json!({"url": "a.mp3"})]);
        assert!(client.get_documents("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn loads_collections_from_a_fixture_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sounds": [{{"url": "a.mp3"}}, {{"url": "b.mp3", "volume": 0.5}}]}}"#).unwrap();

        let client = MemoryClient::from_json_file(file.path().to_str().unwrap()).unwrap();
        let docs = client.get_documents("sounds").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1], json!({"url": "b.mp3", "volume": 0.5}));
    }

    #[test]
    fn missing_fixture_is_an_io_error() {
        let err = MemoryClient::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DBError::Io { .. }));
    }

    #[test]
    fn fixture_that_is_not_a_collection_map_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"url": "a.mp3"}}]"#).unwrap();

        let err = MemoryClient::from_json_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, DBError::Document { .. }));
    }
}
