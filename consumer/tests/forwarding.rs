//! Consumer routes against canned upstream responses and against a live
//! product server.

use std::sync::{Arc, Mutex};

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use product_consumer::{app, app_with, Transport, TransportError, Upstream};
use product_core::{HttpMethod, HttpRequest, HttpResponse, Product, ProductClient};
use tower::ServiceExt;

const UPSTREAM: &str = "http://upstream.test/api";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

/// Answers every request with the same canned response and records what it
/// was asked to send.
struct CannedTransport {
    status: u16,
    body: String,
    seen: Mutex<Vec<HttpRequest>>,
}

impl CannedTransport {
    fn new(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> HttpRequest {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

impl Transport for CannedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}

struct DownTransport;

impl Transport for DownTransport {
    fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError("connection refused".to_string()))
    }
}

fn canned_app(transport: Arc<CannedTransport>) -> axum::Router {
    app_with(Upstream::new(ProductClient::new(UPSTREAM), transport))
}

const WIDGET: &str = r#"{"id":5,"title":"Widget","price":9.99,"description":null}"#;

// --- pass-through ---

#[tokio::test]
async fn find_all_passes_body_through() {
    let transport = CannedTransport::new(200, &format!("[{WIDGET}]"));
    let resp = canned_app(transport.clone())
        .oneshot(empty_request("GET", "/findAllProducts"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, 5);

    let sent = transport.last_request();
    assert_eq!(sent.method, HttpMethod::Get);
    assert_eq!(sent.url, "http://upstream.test/api/products");
}

#[tokio::test]
async fn store_forwards_form_and_returns_product() {
    let transport = CannedTransport::new(201, WIDGET);
    let resp = canned_app(transport.clone())
        .oneshot(json_request(
            "POST",
            "/storeProducts",
            r#"{"title":"Widget","price":9.99}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = body_json(resp).await;
    assert_eq!(product.title, "Widget");

    let sent = transport.last_request();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.url, "http://upstream.test/api/products");
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["title"], "Widget");
    assert_eq!(body["price"], 9.99);
}

#[tokio::test]
async fn delete_forwards_to_product_path() {
    let transport = CannedTransport::new(200, WIDGET);
    let resp = canned_app(transport.clone())
        .oneshot(empty_request("DELETE", "/deleteProduct/5"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let sent = transport.last_request();
    assert_eq!(sent.method, HttpMethod::Delete);
    assert_eq!(sent.url, "http://upstream.test/api/products/5");
}

// --- status translation ---

#[tokio::test]
async fn find_product_maps_any_4xx_to_fixed_not_found() {
    for status in [400, 404, 422] {
        let resp = canned_app(CannedTransport::new(status, ""))
            .oneshot(empty_request("GET", "/findProduct/99999"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "upstream {status}");
        let err: serde_json::Value = body_json(resp).await;
        assert_eq!(err["message"], "the product does not exist");
    }
}

#[tokio::test]
async fn find_product_maps_other_failures_to_internal() {
    for status in [302, 500, 503] {
        let resp = canned_app(CannedTransport::new(status, ""))
            .oneshot(empty_request("GET", "/findProduct/1"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "upstream {status}");
        let err: serde_json::Value = body_json(resp).await;
        assert_eq!(err["error"], "internal");
        assert_eq!(err["message"], "something went wrong");
    }
}

#[tokio::test]
async fn store_keeps_upstream_4xx_status_and_reason() {
    let resp = canned_app(CannedTransport::new(400, r#"{"error":"invalid_argument"}"#))
        .oneshot(json_request("POST", "/storeProducts", r#"{"title":"","price":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = body_json(resp).await;
    assert_eq!(err["error"], "upstream_rejected");
    assert_eq!(err["message"], "Bad Request");
}

#[tokio::test]
async fn store_forwards_null_fields_as_defaults() {
    let transport = CannedTransport::new(400, "");
    let resp = canned_app(transport.clone())
        .oneshot(json_request("POST", "/storeProducts", r#"{"title":null,"price":null}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let sent = transport.last_request();
    let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["title"], "");
    assert_eq!(body["price"], 0.0);
}

#[tokio::test]
async fn find_all_and_delete_map_server_errors_to_internal() {
    for (method, uri) in [("GET", "/findAllProducts"), ("DELETE", "/deleteProduct/5")] {
        let resp = canned_app(CannedTransport::new(503, "unavailable"))
            .oneshot(empty_request(method, uri))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
        let err: serde_json::Value = body_json(resp).await;
        assert_eq!(err["error"], "internal", "{method} {uri}");
    }
}

#[tokio::test]
async fn delete_keeps_upstream_404() {
    let resp = canned_app(CannedTransport::new(404, ""))
        .oneshot(empty_request("DELETE", "/deleteProduct/99999"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: serde_json::Value = body_json(resp).await;
    assert_eq!(err["message"], "Not Found");
}

#[tokio::test]
async fn transport_failure_is_internal() {
    let upstream = Upstream::new(ProductClient::new(UPSTREAM), Arc::new(DownTransport));
    let resp = app_with(upstream)
        .oneshot(empty_request("GET", "/findAllProducts"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- live upstream ---

fn start_product_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            product_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}/api")
}

#[tokio::test]
async fn lifecycle_against_live_product_server() {
    use tower::Service;

    let mut app = app(&start_product_server()).into_service();

    // store
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/storeProducts",
            r#"{"title":"Widget","price":9.99,"description":"via consumer"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let stored: Product = body_json(resp).await;
    assert_eq!(stored.title, "Widget");
    assert_eq!(stored.description.as_deref(), Some("via consumer"));
    let id = stored.id;

    // invalid store is rejected upstream
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/storeProducts", r#"{"title":"Widget","price":0}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // find all
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/findAllProducts"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products, vec![stored.clone()]);

    // find one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/findProduct/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Product = body_json(resp).await;
    assert_eq!(found, stored);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/deleteProduct/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Product = body_json(resp).await;
    assert_eq!(deleted, stored);

    // find after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/findProduct/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: serde_json::Value = body_json(resp).await;
    assert_eq!(err["message"], "the product does not exist");
}
