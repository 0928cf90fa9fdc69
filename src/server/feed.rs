//! RSS feed generation

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};
use std::sync::Arc;

use super::error::PageError;
use super::AppState;
use crate::helpers::{date, url};

/// `GET /rss.xml` — one feed over every kind, newest first
pub(super) async fn rss(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, PageError> {
    let config = &state.site.config;

    let items: Vec<rss::Item> = state
        .store
        .all()
        .into_iter()
        .map(|item| {
            let link = url::full_url_for(config, &item.url());
            ItemBuilder::default()
                .title(item.title.clone())
                .link(link.clone())
                .description(item.summary.clone())
                .pub_date(date::rfc2822_date(&item.date))
                .guid(GuidBuilder::default().value(link).permalink(true).build())
                .build()
        })
        .collect();

    let channel = ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.url.clone())
        .description(config.description.clone())
        .language(config.language.clone())
        .generator("techtips".to_string())
        .items(items)
        .build();

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        channel.to_string(),
    ))
}
