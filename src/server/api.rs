//! JSON API handlers
//!
//! Wire shapes use camelCase field names; responses are `{ message }` on
//! success and `{ error }` with a non-2xx status on failure. Validation
//! always happens before any outbound call is attempted.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::error::ApiError;
use super::AppState;
use crate::comments::{Comment, NewComment};
use crate::content::ContentKind;
use crate::notify::{is_valid_email, CommentNotification};

/// `POST /api/notify/subscribe`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SubscribeRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: Option<String>,
}

pub(super) async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = req.email.trim();
    if email.is_empty() || !is_valid_email(email) {
        return Err(ApiError::BadRequest(
            "a valid email address is required".to_string(),
        ));
    }

    let mailer = state.mailer.as_ref().ok_or(ApiError::NotifyUnavailable)?;
    mailer
        .send_subscription_notification(email, req.name.as_deref())
        .await
        .map_err(ApiError::Upstream)?;

    Ok(Json(json!({ "message": "Thanks for subscribing!" })))
}

/// `POST /api/notify/comment`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentNotifyRequest {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    reaction: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    content_title: String,
    #[serde(default)]
    content_type: String,
    #[serde(default)]
    content_slug: String,
}

pub(super) async fn comment_notify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CommentNotifyRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.author_name.trim().is_empty() || req.comment.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "author name and comment are required".to_string(),
        ));
    }

    let mailer = state.mailer.as_ref().ok_or(ApiError::NotifyUnavailable)?;
    mailer
        .send_comment_notification(&CommentNotification {
            author_name: req.author_name,
            reaction: req.reaction,
            comment: req.comment,
            content_title: req.content_title,
            content_type: req.content_type,
            content_slug: req.content_slug,
        })
        .await
        .map_err(ApiError::Upstream)?;

    Ok(Json(json!({ "message": "Notification sent" })))
}

/// `POST /api/comments`
pub(super) async fn create_comment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewComment>,
) -> Result<Json<Comment>, ApiError> {
    if req.author_name.trim().is_empty() || req.comment.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "author name and comment are required".to_string(),
        ));
    }

    let stored = state
        .comments
        .insert(req)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(stored))
}

/// `GET /api/comments/:kind/:slug`
pub(super) async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path((kind, slug)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let kind = ContentKind::parse(&kind)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown content type: {}", kind)))?;

    let comments = state
        .comments
        .list(kind, &slug)
        .await
        .map_err(ApiError::Upstream)?;
    Ok(Json(comments))
}

/// `GET /api/search?kind=articles&q=...`
#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    kind: String,
    #[serde(default)]
    q: String,
}

/// One search result, trimmed for the client-side search box
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchHit {
    slug: String,
    title: String,
    summary: String,
    date: NaiveDate,
    tags: Vec<String>,
    reading_time: u32,
    url: String,
}

pub(super) async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let kind = ContentKind::parse(&params.kind)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown content type: {}", params.kind)))?;

    let hits = state
        .store
        .search(kind, &params.q)
        .into_iter()
        .map(|item| SearchHit {
            slug: item.slug.clone(),
            title: item.title.clone(),
            summary: item.summary.clone(),
            date: item.date,
            tags: item.tags.clone(),
            reading_time: item.reading_time,
            url: item.url(),
        })
        .collect();

    Ok(Json(hits))
}
