//! HTTP server: rendered pages, feed, and the JSON API

pub mod api;
mod error;
mod feed;
mod pages;

pub use error::{ApiError, PageError};

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::comments::{CommentStore, HttpCommentStore, MemoryCommentStore};
use crate::content::{ContentStore, MarkdownRenderer};
use crate::notify::Mailer;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Shared server state, constructed once at startup
pub struct AppState {
    pub site: Site,
    pub store: ContentStore,
    pub renderer: TemplateRenderer,
    pub markdown: MarkdownRenderer,
    pub comments: Arc<dyn CommentStore>,
    pub mailer: Option<Mailer>,
}

impl AppState {
    /// Wire up state from the site config: template and markdown renderers,
    /// the comment backend, and the mailer (which may be disabled)
    pub fn new(site: Site, store: ContentStore) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let markdown = MarkdownRenderer::with_options(
            &site.config.highlight.theme,
            site.config.highlight.line_number,
        );

        let comments: Arc<dyn CommentStore> = match &site.config.comments.api_url {
            Some(url) => {
                let api_key = site
                    .config
                    .comments
                    .api_key_env
                    .as_ref()
                    .and_then(|env| std::env::var(env).ok());
                tracing::info!("comments persisted to {}", url);
                Arc::new(HttpCommentStore::new(url.clone(), api_key))
            }
            None => {
                tracing::info!("comments.api_url not set; comments live in process memory");
                Arc::new(MemoryCommentStore::new())
            }
        };

        let mailer = Mailer::from_config(&site.config.notify);

        Ok(Self {
            site,
            store,
            renderer,
            markdown,
            comments,
            mailer,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    // The widgets call these endpoints cross-origin in embedded setups
    let api = Router::new()
        .route("/notify/subscribe", post(api::subscribe))
        .route("/notify/comment", post(api::comment_notify))
        .route("/comments", post(api::create_comment))
        .route("/comments/:kind/:slug", get(api::list_comments))
        .route("/search", get(api::search))
        .layer(CorsLayer::permissive());

    let mut app = Router::new()
        .route("/", get(pages::home))
        .route("/articles", get(pages::article_list))
        .route("/articles/:slug", get(pages::article_detail))
        .route("/tips", get(pages::tip_list))
        .route("/tips/:slug", get(pages::tip_detail))
        .route("/dashboards", get(pages::dashboard_list))
        .route("/dashboards/:slug", get(pages::dashboard_detail))
        .route("/about", get(pages::about))
        .route("/rss.xml", get(feed::rss))
        .route("/assets/style.css", get(pages::style_css))
        .route("/assets/site.js", get(pages::site_js))
        .nest("/api", api)
        .fallback(pages::not_found);

    if let Some(images_dir) = &state.site.config.images_dir {
        let dir = state.site.base_dir.join(images_dir);
        if dir.exists() {
            app = app.nest_service("/images", ServeDir::new(dir));
        } else {
            tracing::warn!("images_dir {:?} does not exist; /images not served", dir);
        }
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Start the server
pub async fn start(site: Site, store: ContentStore, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(site, store)?);
    let app = router(state);

    // Handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
