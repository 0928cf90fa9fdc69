//! HTML page handlers

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use chrono::{Datelike, Local};
use serde::Deserialize;
use std::sync::Arc;
use tera::Context;

use super::error::PageError;
use super::AppState;
use crate::content::{toc, ContentItem, ContentKind};
use crate::templates;

/// Query parameters accepted by listing pages
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListQuery {
    tag: Option<String>,
    q: Option<String>,
}

fn base_context(state: &AppState) -> Context {
    let mut context = Context::new();
    context.insert("site", &state.site.config);
    context.insert("year", &Local::now().year());
    context
}

pub(super) async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let articles: Vec<&ContentItem> = state
        .store
        .get_by_kind(ContentKind::Article)
        .iter()
        .take(3)
        .collect();
    let tips: Vec<&ContentItem> = state
        .store
        .get_by_kind(ContentKind::Tip)
        .iter()
        .take(3)
        .collect();

    let mut context = base_context(&state);
    context.insert("articles", &articles);
    context.insert("tips", &tips);

    Ok(Html(state.renderer.render("index.html", &context)?))
}

/// Listing with the original's filter composition: a non-blank search query
/// narrows first, then the primary-tag filter applies on top
async fn list_page(
    state: Arc<AppState>,
    kind: ContentKind,
    params: ListQuery,
) -> Result<Html<String>, PageError> {
    let query = params.q.unwrap_or_default();
    let tag = params.tag;

    let items: Vec<&ContentItem> = if !query.trim().is_empty() {
        let hits = state.store.search(kind, &query);
        match &tag {
            Some(tag) => hits
                .into_iter()
                .filter(|i| i.primary_tag() == Some(tag.as_str()))
                .collect(),
            None => hits,
        }
    } else if let Some(tag) = &tag {
        state.store.get_by_primary_tag(kind, tag)
    } else {
        state.store.get_by_kind(kind).iter().collect()
    };

    let mut context = base_context(&state);
    context.insert("items", &items);
    context.insert("primary_tags", &state.store.primary_tags(kind));
    context.insert("selected_tag", &tag);
    context.insert("query", &query);
    context.insert("kind_label", kind.label());
    context.insert("kind_path", kind.route_prefix());

    Ok(Html(state.renderer.render("list.html", &context)?))
}

async fn detail_page(
    state: Arc<AppState>,
    kind: ContentKind,
    slug: String,
) -> Result<Response, PageError> {
    let Some(item) = state.store.get_by_slug(&slug, Some(kind)) else {
        return not_found_response(&state);
    };

    // Dashboards with an embed target show the frame instead of a rendered
    // body, and get no reading time or TOC
    let (content_html, toc_items) = if item.embed_url.is_some() {
        (String::new(), Vec::new())
    } else {
        (state.markdown.render(&item.content)?, toc::extract(&item.content))
    };

    let mut context = base_context(&state);
    context.insert("item", item);
    context.insert("kind_label", kind.label());
    context.insert("content_html", &content_html);
    context.insert("toc", &toc_items);
    context.insert("related", &state.store.related(item));

    Ok(Html(state.renderer.render("detail.html", &context)?).into_response())
}

pub(super) async fn article_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    list_page(state, ContentKind::Article, params).await
}

pub(super) async fn tip_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    list_page(state, ContentKind::Tip, params).await
}

pub(super) async fn dashboard_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Html<String>, PageError> {
    list_page(state, ContentKind::Dashboard, params).await
}

pub(super) async fn article_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, PageError> {
    detail_page(state, ContentKind::Article, slug).await
}

pub(super) async fn tip_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, PageError> {
    detail_page(state, ContentKind::Tip, slug).await
}

pub(super) async fn dashboard_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, PageError> {
    detail_page(state, ContentKind::Dashboard, slug).await
}

pub(super) async fn about(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let context = base_context(&state);
    Ok(Html(state.renderer.render("about.html", &context)?))
}

pub(super) async fn not_found(State(state): State<Arc<AppState>>) -> Result<Response, PageError> {
    not_found_response(&state)
}

fn not_found_response(state: &AppState) -> Result<Response, PageError> {
    let context = base_context(state);
    let html = state.renderer.render("404.html", &context)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

pub(super) async fn style_css() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        templates::STYLE_CSS,
    )
}

pub(super) async fn site_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        templates::SITE_JS,
    )
}
