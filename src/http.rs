mod authors;
mod books;
mod handler;

pub use handler::{ApiError, ApiSuccess, ErrorResponse, ValidationErrors};

use crate::services::{AuthorService, BookService};
use anyhow::Context;
use axum::Router;
use axum::routing::{get, post, put};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub struct AppState<AS: AuthorService, BS: BookService> {
    author_service: Arc<AS>,
    book_service: Arc<BS>,
}

impl<AS: AuthorService, BS: BookService> AppState<AS, BS> {
    pub fn new(author_service: AS, book_service: BS) -> Self {
        Self {
            author_service: Arc::new(author_service),
            book_service: Arc::new(book_service),
        }
    }
}

impl<AS: AuthorService, BS: BookService> Clone for AppState<AS, BS> {
    fn clone(&self) -> Self {
        Self {
            author_service: Arc::clone(&self.author_service),
            book_service: Arc::clone(&self.book_service),
        }
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: u16,
}

impl HttpServerConfig {
    pub const fn new(port: u16) -> Self {
        Self { port }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<AS: AuthorService, BS: BookService>(
        state: AppState<AS, BS>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(addr = ?self.listener.local_addr().ok(), "listening");
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

pub fn router<AS: AuthorService, BS: BookService>(state: AppState<AS, BS>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes<AS: AuthorService, BS: BookService>() -> Router<AppState<AS, BS>> {
    Router::new()
        .route("/authors", post(authors::create_author::<AS, BS>))
        .route(
            "/authors/{author_id}",
            put(authors::update_author::<AS, BS>).delete(authors::delete_author::<AS, BS>),
        )
        .route(
            "/authors/{author_id}/books",
            get(authors::find_author_books::<AS, BS>),
        )
        .route("/books", post(books::create_book::<AS, BS>))
        .route(
            "/books/{book_id}",
            put(books::update_book::<AS, BS>).delete(books::delete_book::<AS, BS>),
        )
}
