use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};
use tracing::{debug, info, warn};

use super::error::ApiError;
use crate::state::data::Operation;
use crate::state::dimensions::{DimPayload, ResizeDimensions};

/// Everything the backend needs to process one image
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub file_name: String,
    pub image: Bytes,
    pub mime_type: &'static str,
    pub operation: Operation,
    /// Only meaningful for [`Operation::Resize`]
    pub dimensions: Option<ResizeDimensions>,
}

/// HTTP client for the processing endpoint
///
/// Both the probe and submissions target the same configured URL.
/// No retries and no timeout: each call is a single attempt that runs to
/// completion or failure.
#[derive(Debug, Clone)]
pub struct BackendClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Check whether the backend answers at all
    ///
    /// Any HTTP response counts as reachable, whatever its status.
    pub async fn probe(&self) -> Result<(), ApiError> {
        match self.http.get(self.endpoint.clone()).send().await {
            Ok(response) => {
                debug!(status = %response.status(), "probe answered");
                Ok(())
            }
            Err(err) => {
                warn!("probe failed: {err}");
                Err(ApiError::unreachable(err))
            }
        }
    }

    /// Upload an image and return the processed result
    pub async fn process(&self, request: ProcessRequest) -> Result<Bytes, ApiError> {
        let form = build_form(&request)?;

        info!(
            operation = %request.operation,
            file = %request.file_name,
            bytes = request.image.len(),
            "📤 submitting image"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::unreachable)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "backend rejected the request");
            return Err(ApiError::Rejected { status: status.as_u16() });
        }

        // A connection dropped mid-body means the server went away
        let body = response.bytes().await.map_err(ApiError::unreachable)?;
        info!(bytes = body.len(), "✅ received processed image");
        Ok(body)
    }
}

/// Assemble the multipart body: `image`, `dim` and `choice`
pub fn build_form(request: &ProcessRequest) -> Result<Form, ApiError> {
    let dim = DimPayload::for_request(request.operation, request.dimensions)
        .to_json()
        .map_err(|e| ApiError::Payload(e.to_string()))?;

    let image = Part::bytes(request.image.to_vec())
        .file_name(request.file_name.clone())
        .mime_str(request.mime_type)
        .map_err(|e| ApiError::Payload(e.to_string()))?;

    Ok(Form::new()
        .part("image", image)
        .text("dim", dim)
        .text("choice", request.operation.wire_code().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode as AxumStatus;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn spawn_backend(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    /// An address nothing is listening on
    async fn dead_endpoint() -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    /// Echo back what arrived in the multipart body as JSON
    async fn echo_form(mut multipart: Multipart) -> Json<Value> {
        let mut fields = serde_json::Map::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_owned);
            let content_type = field.content_type().map(str::to_owned);
            let data = field.bytes().await.unwrap();
            let value = match name.as_str() {
                "image" => json!({
                    "file_name": file_name,
                    "content_type": content_type,
                    "len": data.len(),
                }),
                _ => json!(String::from_utf8_lossy(&data)),
            };
            fields.insert(name, value);
        }
        Json(Value::Object(fields))
    }

    fn request(operation: Operation, dimensions: Option<ResizeDimensions>) -> ProcessRequest {
        ProcessRequest {
            file_name: "cat.png".to_string(),
            image: Bytes::from_static(b"\x89PNG\r\n\x1a\nfake"),
            mime_type: "image/png",
            operation,
            dimensions,
        }
    }

    #[tokio::test]
    async fn test_probe_accepts_any_response() {
        let router = Router::new().route("/", get(|| async { AxumStatus::NOT_FOUND }));
        let client = BackendClient::new(spawn_backend(router).await);

        assert_eq!(client.probe().await, Ok(()));
    }

    #[tokio::test]
    async fn test_probe_fails_when_nothing_listens() {
        let client = BackendClient::new(dead_endpoint().await);

        let err = client.probe().await.unwrap_err();
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_process_returns_body_on_200() {
        let router = Router::new().route(
            "/",
            get(|| async { "up" }).post(|| async { vec![0xFFu8, 0xD8, 0xFF, 0xD9] }),
        );
        let client = BackendClient::new(spawn_backend(router).await);

        let body = client.process(request(Operation::Sepia, None)).await.unwrap();
        assert_eq!(&body[..], &[0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[tokio::test]
    async fn test_process_maps_non_200_to_rejected() {
        let router = Router::new()
            .route("/", axum::routing::post(|| async { AxumStatus::BAD_REQUEST }));
        let client = BackendClient::new(spawn_backend(router).await);

        let err = client.process(request(Operation::Grayscale, None)).await.unwrap_err();
        assert_eq!(err, ApiError::Rejected { status: 400 });
    }

    #[tokio::test]
    async fn test_server_errors_are_still_rejections() {
        let router = Router::new()
            .route("/", axum::routing::post(|| async { AxumStatus::INTERNAL_SERVER_ERROR }));
        let client = BackendClient::new(spawn_backend(router).await);

        let err = client.process(request(Operation::Cartoon, None)).await.unwrap_err();
        assert_eq!(err, ApiError::Rejected { status: 500 });
        assert!(!err.is_unreachable());
    }

    #[tokio::test]
    async fn test_process_reports_unreachable_server() {
        let client = BackendClient::new(dead_endpoint().await);

        let err = client.process(request(Operation::Denoise, None)).await.unwrap_err();
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_multipart_body_for_resize() {
        let router = Router::new().route("/", axum::routing::post(echo_form));
        let client = BackendClient::new(spawn_backend(router).await);

        let dims = ResizeDimensions::new(320, 200).ok();
        let body = client.process(request(Operation::Resize, dims)).await.unwrap();
        let echoed: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(echoed["choice"], "3");
        assert_eq!(
            serde_json::from_str::<DimPayload>(echoed["dim"].as_str().unwrap()).unwrap(),
            DimPayload {
                width: Some("320".into()),
                height: Some("200".into()),
            }
        );
        assert_eq!(echoed["image"]["file_name"], "cat.png");
        assert_eq!(echoed["image"]["content_type"], "image/png");
        assert_eq!(echoed["image"]["len"], 12);
    }

    #[tokio::test]
    async fn test_multipart_body_for_face_detection() {
        let router = Router::new().route("/", axum::routing::post(echo_form));
        let client = BackendClient::new(spawn_backend(router).await);

        let body = client
            .process(request(Operation::FaceDetection, None))
            .await
            .unwrap();
        let echoed: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(echoed["choice"], "1");
        assert_eq!(echoed["dim"], r#"{"width":null,"height":null}"#);
    }

    #[test]
    fn test_build_form_rejects_bad_mime() {
        let mut req = request(Operation::Sketch, None);
        req.mime_type = "not a mime";

        assert!(matches!(build_form(&req), Err(ApiError::Payload(_))));
    }
}
