use crate::error::ApiResult;
use crate::storage::Storage;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio_util::io::ReaderStream;

use super::queries::{download::handle as handle_download, DownloadFileQuery};

pub fn files_routes() -> Router<Storage> {
    Router::new().route("/download/:filename", get(download_file))
}

/// Stream an output artifact
///
/// GET /download/:filename
#[tracing::instrument(skip(storage), fields(filename = %filename))]
async fn download_file(
    State(storage): State<Storage>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    let query = DownloadFileQuery { filename };

    let file = handle_download(&storage, query).await?;
    let handle = storage.open(&file).await.map_err(|e| {
        crate::error::AppError::Storage(format!("Failed to open {}: {}", file.filename, e))
    })?;

    tracing::info!(size = file.size, "Serving artifact");

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.filename.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, HeaderValue::from(file.size)),
        ],
        Body::from_stream(ReaderStream::new(handle)),
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::config::StorageConfig;
    use axum::body::to_bytes;
    use axum::http::Request;
    use tower::ServiceExt;

    fn router(root: &std::path::Path) -> Router {
        files_routes().with_state(Storage::new(StorageConfig::rooted_at(root)))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_download_streams_bytes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.csv"), b"id,ok\n1,yes\n").unwrap();

        let response = get(router(dir.path()), "/download/report.csv").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"report.csv\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"id,ok\n1,yes\n");
    }

    #[tokio::test]
    async fn test_download_missing_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(router(dir.path()), "/download/nope.csv").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_encoded_traversal_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let response = get(router(dir.path()), "/download/..%2Fsecret.txt").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
