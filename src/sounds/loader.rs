use serde_json::Value as JsonValue;
use slog::{Logger, info, warn};

use crate::db::{DBClient, DBError};
use crate::models::{SOUNDS_COLLECTION, Sound, SoundDocument, SoundsPage};
use crate::utils;

/// Reads every document in the sounds collection and keeps only its `url`.
///
/// Exactly one record comes out per stored document, in store order. A
/// document without a usable `url` still produces a record, with `url` unset.
pub async fn fetch_sounds(db: &dyn DBClient) -> Result<Vec<Sound>, DBError> {
    let logger = utils::get_logger();
    let docs = db.get_documents(SOUNDS_COLLECTION).await?;
    Ok(docs
        .into_iter()
        .enumerate()
        .map(|(index, doc)| project_sound(&logger, index, doc))
        .collect())
}

/// Produces the page data for the sounds page. Fetch errors are returned as-is.
pub async fn load(db: &dyn DBClient) -> Result<SoundsPage, DBError> {
    let sounds = fetch_sounds(db).await?;
    info!(utils::get_logger(), "loaded sounds";
        "backend" => db.kind(), "count" => sounds.len());
    Ok(SoundsPage { sounds })
}

fn project_sound(logger: &Logger, index: usize, doc: JsonValue) -> Sound {
    // Derived structs also accept sequences, so only JSON objects go through serde.
    let parsed: SoundDocument = match doc {
        JsonValue::Object(map) => match serde_json::from_value(JsonValue::Object(map)) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(logger, "sound document could not be read";
                    "index" => index, "error" => %e);
                return Sound::default();
            }
        },
        other => {
            warn!(logger, "sound document is not an object";
                "index" => index, "document" => %other);
            return Sound::default();
        }
    };

    match parsed.url {
        Some(JsonValue::String(url)) => Sound { url: Some(url) },
        None => Sound { url: None },
        Some(other) => {
            warn!(logger, "sound document has a non-string url";
                "index" => index, "url" => %other);
            Sound { url: None }
        }
    }
}
