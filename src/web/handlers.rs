use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

use crate::upstream::CompletionClient;
use crate::web::models::ChatRequest;

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Relay endpoint: forwards the message sequence to the completion API and
/// returns its response verbatim. Any upstream failure becomes a 500 with
/// the failure message in an `error` field.
pub async fn chat(
    upstream: web::Data<CompletionClient>,
    req: web::Json<ChatRequest>,
) -> impl Responder {
    let ChatRequest { messages } = req.into_inner();

    info!(
        "Chat request with {} message(s)",
        messages.as_array().map_or(0, |m| m.len())
    );

    match upstream.complete(messages).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => {
            error!("Error in /api/chat: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "error": e.to_string()
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse, HttpServer};
    use serde_json::{json, Value};

    use crate::config::Config;
    use crate::upstream::CompletionClient;
    use crate::web::routes;

    fn test_config(endpoint: &str) -> Config {
        Config {
            endpoint: endpoint.to_string(),
            api_key: "test-key".to_string(),
            deployment: "test-deployment".to_string(),
            api_version: "2024-02-01".to_string(),
            port: 0,
            allowed_origins: Vec::new(),
        }
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(
            App::new().route("/health", web::get().to(super::health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_web::test]
    async fn chat_returns_500_with_error_when_upstream_unreachable() {
        let upstream = web::Data::new(CompletionClient::new(&test_config("http://127.0.0.1:1")));
        let app = test::init_service(
            App::new()
                .app_data(upstream)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({ "messages": [{ "role": "user", "content": "hi" }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert!(!body["error"].as_str().unwrap_or_default().is_empty());
    }

    #[actix_web::test]
    async fn chat_passes_upstream_body_through() {
        // Canned completion API listening on an ephemeral port.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(|| {
            App::new().route(
                "/openai/deployments/{deployment}/chat/completions",
                web::post().to(|| async {
                    HttpResponse::Ok().json(json!({
                        "choices": [{ "message": { "content": "hello" } }]
                    }))
                }),
            )
        })
        .listen(listener)
        .unwrap()
        .workers(1)
        .run();
        actix_web::rt::spawn(server);

        let endpoint = format!("http://{}", addr);
        let upstream = web::Data::new(CompletionClient::new(&test_config(&endpoint)));
        let app = test::init_service(
            App::new()
                .app_data(upstream)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({ "messages": [{ "role": "user", "content": "hi" }] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["choices"][0]["message"]["content"], "hello");
    }

    #[actix_web::test]
    async fn chat_forwards_body_without_messages_and_surfaces_upstream_rejection() {
        // Upstream that rejects anything without a messages array.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(|| {
            App::new().route(
                "/openai/deployments/{deployment}/chat/completions",
                web::post().to(|payload: web::Json<Value>| async move {
                    if payload["messages"].is_array() {
                        HttpResponse::Ok().json(json!({ "choices": [] }))
                    } else {
                        HttpResponse::BadRequest().json(json!({
                            "error": "messages must be an array"
                        }))
                    }
                }),
            )
        })
        .listen(listener)
        .unwrap()
        .workers(1)
        .run();
        actix_web::rt::spawn(server);

        let endpoint = format!("http://{}", addr);
        let upstream = web::Data::new(CompletionClient::new(&test_config(&endpoint)));
        let app = test::init_service(
            App::new()
                .app_data(upstream)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]
            .as_str()
            .unwrap_or_default()
            .contains("messages must be an array"));
    }
}
