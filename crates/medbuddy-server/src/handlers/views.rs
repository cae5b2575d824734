//! Static page views: `GET /` and `GET /register`.

use axum::response::Html;

use crate::pages;

/// `GET /`
pub async fn index() -> Html<String> { Html(pages::index()) }

/// `GET /register`
pub async fn register() -> Html<String> { Html(pages::register()) }
