use std::sync::Arc;

use actix_web::{App, Error, HttpResponse, HttpServer, Responder, web};
use slog::info;

use crate::db::DBClient;
use crate::sounds;
use crate::utils;

// API endpoint serving the sounds page data
async fn api_sounds(db: web::Data<dyn DBClient>) -> Result<impl Responder, Error> {
    let page = sounds::load(db.get_ref()).await.map_err(|e| {
        utils::error_context(&utils::get_logger(), "failed to load sounds", &e);
        actix_web::error::ErrorInternalServerError(e)
    })?;

    Ok(HttpResponse::Ok().json(page))
}

/// Registers the API routes. Expects a `web::Data<dyn DBClient>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/sounds", web::get().to(api_sounds));
}

// Configure and start the web server
pub async fn start_server(host: &str, port: u16, db: Arc<dyn DBClient>) -> std::io::Result<()> {
    info!(utils::get_logger(), "starting api server";
        "host" => host, "port" => port, "backend" => db.kind());

    let db = web::Data::from(db);
    HttpServer::new(move || App::new().app_data(db.clone()).configure(configure))
        .bind((host, port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DBError, MemoryClient};
    use crate::models::{SOUNDS_COLLECTION, SoundsPage};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use async_trait::async_trait;
    use serde_json::{Value as JsonValue, json};

    struct UnreachableClient;

    #[async_trait]
    impl DBClient for UnreachableClient {
        fn kind(&self) -> &'static str {
            "unreachable"
        }

        async fn get_documents(&self, _collection: &str) -> Result<Vec<JsonValue>, DBError> {
            Err(DBError::Poisoned)
        }
    }

    fn app_data(db: impl DBClient + 'static) -> web::Data<dyn DBClient> {
        let db: Arc<dyn DBClient> = Arc::new(db);
        web::Data::from(db)
    }

    #[actix_web::test]
    async fn serves_sound_urls_as_json() {
        let db = MemoryClient::with_collection(
            SOUNDS_COLLECTION,
            vec![json!({"url": "a.mp3", "name": "A"}), json!({"url": "b.mp3"})],
        );
        let app = test::init_service(App::new().app_data(app_data(db)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/sounds").to_request();
        let body: JsonValue = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"sounds": [{"url": "a.mp3"}, {"url": "b.mp3"}]}));
    }

    #[actix_web::test]
    async fn empty_collection_still_has_sounds_field() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(MemoryClient::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/sounds").to_request();
        let page: SoundsPage = test::call_and_read_body_json(&app, req).await;
        assert_eq!(page, SoundsPage::default());
    }

    #[actix_web::test]
    async fn fetch_failure_is_a_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(UnreachableClient))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/sounds").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn only_get_is_routed() {
        let app = test::init_service(
            App::new()
                .app_data(app_data(MemoryClient::default()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/sounds").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
