use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Name of the collection every sound document lives in.
pub const SOUNDS_COLLECTION: &str = "sounds";

/// A single entry on the sounds page. Only the URL is exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Page data handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundsPage {
    pub sounds: Vec<Sound>,
}

/// The part of a stored sound document that is read. Other fields are ignored.
///
/// `url` is kept as raw JSON so a value of the wrong type can be reported
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoundDocument {
    #[serde(default)]
    pub url: Option<JsonValue>,
}
