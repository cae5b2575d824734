//! HTTP layer for the Medical Buddy record service.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`]. The current user
//! is carried in a signed session cookie (see [`session`]).
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | `GET`  | `/` | — |
//! | `GET`  | `/register` | — |
//! | `POST` | `/register` | sets session |
//! | `GET`  | `/dashboard` | redirect to `/` if absent |
//! | `POST` | `/add_record` | 401 if absent |
//! | `POST` | `/add_appointment` | 401 if absent |
//! | `GET`  | `/api/health` | — |
//!
//! Every route is rate limited per client address (see [`limit`]) and
//! answers cross-origin requests from any origin.

pub mod body;
pub mod config;
pub mod error;
pub mod handlers;
pub mod limit;
pub mod pages;
pub mod session;

pub use config::ServerConfig;
pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  http::{Method, header},
  middleware,
  routing::{get, post},
};
use medbuddy_core::store::RecordStore;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use handlers::{dashboard, health, records, register, views};
use limit::RateLimit;
use session::SessionKey;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RecordStore> {
  pub store:   Arc<S>,
  pub session: Arc<SessionKey>,
  pub limiter: Arc<RateLimit>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the record service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + Clone + 'static,
{
  Router::new()
    .route("/",                get(views::index))
    .route("/register",        get(views::register).post(register::submit::<S>))
    .route("/dashboard",       get(dashboard::handler::<S>))
    .route("/add_record",      post(records::add_record::<S>))
    .route("/add_appointment", post(records::add_appointment::<S>))
    .route("/api/health",      get(health::handler))
    .layer(middleware::from_fn_with_state(state.clone(), limit::enforce::<S>))
    .layer(cors())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Any origin may call the JSON endpoints. Credentials are not allowed
/// cross-origin, so the session cookie only travels same-site.
fn cors() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
  use std::net::SocketAddr;

  use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, header},
  };
  use tower::ServiceExt as _;

  use crate::handlers::test_support::{
    app, body_json, body_text, get, make_state, make_state_with_limit,
  };

  fn from_peer(mut req: Request<Body>, peer: &str) -> Request<Body> {
    let addr: SocketAddr = peer.parse().unwrap();
    req.extensions_mut().insert(ConnectInfo(addr));
    req
  }

  #[tokio::test]
  async fn index_page_renders() {
    let state = make_state().await;
    let resp = app(&state).oneshot(get("/", None, None)).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(body_text(resp).await.contains("Medical Buddy"));
  }

  #[tokio::test]
  async fn register_page_renders() {
    let state = make_state().await;
    let resp = app(&state).oneshot(get("/register", None, None)).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(body_text(resp).await.contains("<form id=\"register\">"));
  }

  #[tokio::test]
  async fn cors_preflight_is_answered() {
    let state = make_state().await;
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/add_record")
      .header(header::ORIGIN, "https://app.example.com")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
      .body(Body::empty())
      .unwrap();

    let resp = app(&state).oneshot(req).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let headers = resp.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
  }

  #[tokio::test]
  async fn cross_origin_responses_carry_allow_origin() {
    let state = make_state().await;
    let req = Request::builder()
      .uri("/api/health")
      .header(header::ORIGIN, "https://app.example.com")
      .body(Body::empty())
      .unwrap();

    let resp = app(&state).oneshot(req).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
  }

  #[tokio::test]
  async fn requests_over_the_limit_get_429() {
    let state = make_state_with_limit(2).await;
    for _ in 0..2 {
      let req = from_peer(get("/api/health", None, None), "10.0.0.1:4000");
      let resp = app(&state).oneshot(req).await.unwrap();
      assert_eq!(resp.status().as_u16(), 200);
    }

    let req = from_peer(get("/api/health", None, None), "10.0.0.1:4001");
    let resp = app(&state).oneshot(req).await.unwrap();
    assert_eq!(resp.status().as_u16(), 429);
    assert_eq!(body_json(resp).await["error"], "Too many requests");

    // Another client is unaffected.
    let req = from_peer(get("/api/health", None, None), "10.0.0.2:4000");
    let resp = app(&state).oneshot(req).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
  }

  #[tokio::test]
  async fn unknown_path_is_404() {
    let state = make_state().await;
    let resp = app(&state).oneshot(get("/nope", None, None)).await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
  }
}
