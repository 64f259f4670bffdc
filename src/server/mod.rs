//! Thin HTTP shell over the topographer core.
//!
//! Endpoints:
//! - `GET /{ip}`: resolve a single address, `{"result": ...}`.
//! - `GET /?ips=a,b&providers=x,y`: resolve a batch, `{"results": [...]}`.
//! - `POST /`: same batch resolve with a JSON body.
//! - `GET /stats`: per-provider usage counters, `{"results": [...]}`.
//!
//! Everything here is mechanical translation between JSON envelopes and the
//! library API; no resolution logic lives in this module.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::info;
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::errors::TopographerError;
use crate::topographer::Topographer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    topographer: Arc<Topographer>,
    cancel: CancellationToken,
}

/// Builds the router over a running topographer. Handlers observe `cancel`
/// so an in-flight resolve dies with the server instead of outliving it.
pub fn router(topographer: Arc<Topographer>, cancel: CancellationToken) -> Router {
    let state = AppState {
        topographer,
        cancel,
    };

    Router::new()
        .route("/", get(get_resolve_batch).post(post_resolve_batch))
        .route("/stats", get(get_stats))
        .route("/{ip}", get(get_resolve_one))
        .with_state(state)
}

/// Binds `addr` and serves until `cancel` fires.
pub async fn serve(
    addr: SocketAddr,
    topographer: Arc<Topographer>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let app = router(topographer, cancel.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind to {addr}"))?;

    info!("listening on http://{addr}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await
        .context("server error")
}

struct ApiError {
    status: StatusCode,
    message: String,
    context: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
            context: String::new(),
        }
    }

    fn from_resolve_error(err: anyhow::Error) -> Self {
        let (status, message) = match err.downcast_ref::<TopographerError>() {
            Some(TopographerError::Shutdown) | Some(TopographerError::Cancelled) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Cannot resolve IP address")
            }
            Some(TopographerError::UnknownProvider(_)) => {
                (StatusCode::BAD_REQUEST, "Unknown provider")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Cannot resolve IP address"),
        };

        ApiError {
            status,
            message: message.to_string(),
            context: format!("{err:#}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "message": self.message,
                "context": self.context,
            }
        });

        (self.status, Json(body)).into_response()
    }
}

fn parse_ip(raw: &str) -> Result<IpAddr, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("incorrect IP address {raw:?}"),
        )
    })
}

fn split_csv(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

async fn get_resolve_one(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let ip = parse_ip(&ip)?;

    let result = state
        .topographer
        .resolve(&state.cancel, ip, &[])
        .await
        .map_err(ApiError::from_resolve_error)?;

    Ok(Json(json!({ "result": result })))
}

#[derive(Debug, Deserialize)]
struct BatchQuery {
    ips: Option<String>,
    providers: Option<String>,
}

async fn get_resolve_batch(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let raw_ips = split_csv(&query.ips);
    if raw_ips.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "at least one IP address is required",
        ));
    }

    let ips = raw_ips
        .iter()
        .map(|raw| parse_ip(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let providers = split_csv(&query.providers);

    let results = state
        .topographer
        .resolve_all(&state.cancel, &ips, &providers)
        .await
        .map_err(ApiError::from_resolve_error)?;

    Ok(Json(json!({ "results": results })))
}

#[derive(Debug, Deserialize)]
struct BatchBody {
    ips: Vec<String>,
    #[serde(default)]
    providers: Vec<String>,
}

async fn post_resolve_batch(
    State(state): State<AppState>,
    Json(body): Json<BatchBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if body.ips.is_empty() {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "at least one IP address is required",
        ));
    }

    let ips = body
        .ips
        .iter()
        .map(|raw| parse_ip(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let results = state
        .topographer
        .resolve_all(&state.cancel, &ips, &body.providers)
        .await
        .map_err(ApiError::from_resolve_error)?;

    Ok(Json(json!({ "results": results })))
}

async fn get_stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "results": state.topographer.usage_stats() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use crate::countries::alpha2_to_code;
    use crate::provider::{Provider, ProviderLookupResult};
    use crate::topographer::ProviderHandle;

    struct FixedProvider;

    #[async_trait]
    impl Provider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn lookup(&self, _ip: IpAddr) -> anyhow::Result<ProviderLookupResult> {
            Ok(ProviderLookupResult {
                country_code: alpha2_to_code("RU"),
                city: "Moscow".to_string(),
            })
        }
    }

    async fn test_router() -> Router {
        let topographer = Topographer::new(
            vec![ProviderHandle::Online(Arc::new(FixedProvider))],
            16,
        )
        .await
        .unwrap();

        router(Arc::new(topographer), CancellationToken::new())
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_get_single_ip() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/81.2.69.142")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["result"]["ip"], "81.2.69.142");
        assert_eq!(body["result"]["country"]["alpha2_code"], "RU");
        assert_eq!(body["result"]["city"], "Moscow");
        assert_eq!(body["result"]["details"][0]["provider_name"], "fixed");
    }

    #[tokio::test]
    async fn test_get_single_ip_rejects_garbage() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/not-an-ip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]["message"].as_str().unwrap().contains("incorrect IP"));
    }

    #[tokio::test]
    async fn test_get_batch_preserves_order() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?ips=1.2.3.4,5.6.7.8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["ip"], "1.2.3.4");
        assert_eq!(results[1]["ip"], "5.6.7.8");
    }

    #[tokio::test]
    async fn test_get_batch_without_ips_is_bad_request() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_batch() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"ips": ["1.2.3.4"], "providers": ["fixed"]}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["results"][0]["ip"], "1.2.3.4");
    }

    #[tokio::test]
    async fn test_post_batch_unknown_provider() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"ips": ["1.2.3.4"], "providers": ["nope"]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Unknown provider");
    }

    #[tokio::test]
    async fn test_get_stats() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let stats = body["results"].as_array().unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0]["name"], "fixed");
        assert_eq!(stats[0]["last_used"], 0);
    }
}
