//! Web front end: a single page that collects words and answers with a
//! zip of their pronunciations.

pub mod error;
pub mod form;

pub use error::ServerError;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use pronounce_acquire::AudioSource;
use pronounce_archive::{build_archive, ARCHIVE_NAME};
use std::net::SocketAddr;
use std::sync::Arc;

const INDEX_PAGE: &str = include_str!("../assets/index.html");

/// Shared by every request. The audio source holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn AudioSource>,
}

impl AppState {
    pub fn new(source: impl AudioSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(download))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn download(State(state): State<AppState>, body: Bytes) -> Result<Response, ServerError> {
    let words = form::submitted_words(&body);
    if words.is_empty() {
        return Err(ServerError::NoWords);
    }

    tracing::info!(words = words.len(), "Building pronunciation archive");
    let report = build_archive(state.source.as_ref(), &words).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{ARCHIVE_NAME}\""),
        ),
    ];
    Ok((headers, report.bytes).into_response())
}

/// Serve the router on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(err) => {
            tracing::warn!(error = %err, "Cannot listen for Ctrl-C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pronounce_acquire::FetchError;
    use std::io::{Cursor, Read};
    use tower::ServiceExt;
    use zip::ZipArchive;

    const CLIP: &[u8] = b"ID3\x03\x00fake-mp3-frames";

    /// Succeeds with [`CLIP`] for every word except "missing".
    struct FixedSource;

    #[async_trait]
    impl AudioSource for FixedSource {
        async fn fetch(&self, word: &str) -> Result<Vec<u8>, FetchError> {
            if word == "missing" {
                return Err(FetchError::NoAudioReference {
                    url: format!("stub://{word}"),
                });
            }
            Ok(CLIP.to_vec())
        }
    }

    fn app() -> Router {
        router(AppState::new(FixedSource))
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn entry_names(bytes: Vec<u8>) -> Vec<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains(r#"method="POST""#));
        assert!(html.contains("words[]"));
    }

    #[tokio::test]
    async fn test_blank_words_rejected() {
        let response = app()
            .oneshot(post_form("words%5B%5D=+++&words%5B%5D="))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert_eq!(html, "<h3>Please enter at least one word.</h3>");
    }

    #[tokio::test]
    async fn test_no_fields_rejected() {
        let response = app().oneshot(post_form("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_single_word_download() {
        let response = app()
            .oneshot(post_form("words%5B%5D=+Hello+"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/zip"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"pronunciations.zip\""
        );

        let bytes = body_bytes(response).await;
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);
        let mut entry = archive.by_index(0).unwrap();
        assert_eq!(entry.name(), "hello.mp3");
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, CLIP);
    }

    #[tokio::test]
    async fn test_all_missing_gives_empty_archive() {
        let response = app()
            .oneshot(post_form("words%5B%5D=missing"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(entry_names(body_bytes(response).await).is_empty());
    }

    #[tokio::test]
    async fn test_missing_word_omitted() {
        let response = app()
            .oneshot(post_form(
                "words%5B%5D=alpha&words%5B%5D=missing&words%5B%5D=Charlie",
            ))
            .await
            .unwrap();

        assert_eq!(
            entry_names(body_bytes(response).await),
            vec!["alpha.mp3", "charlie.mp3"]
        );
    }

    #[tokio::test]
    async fn test_same_slug_twice() {
        let response = app()
            .oneshot(post_form("words%5B%5D=Run&words%5B%5D=run"))
            .await
            .unwrap();

        assert_eq!(
            entry_names(body_bytes(response).await),
            vec!["run.mp3", "run-2.mp3"]
        );
    }
}
