use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use hackerlearn_gateway::{
    ClientConfig, Clock, GatewayClient, GatewayError, GatewayMethod, GatewayRequest,
    InMemoryTokenStore, TOKEN_TTL_SECS, TokenCache, TokenStore,
};

#[derive(Clone, Default)]
struct Recorder {
    hits: Arc<AtomicUsize>,
    envelopes: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn last_envelope(&self) -> Value {
        self.envelopes.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

/// Fake load balancer: dispatches on the envelope's `endpoint` field.
async fn gateway(State(rec): State<Recorder>, Json(envelope): Json<Value>) -> Response {
    rec.hits.fetch_add(1, Ordering::SeqCst);
    rec.envelopes.lock().unwrap().push(envelope.clone());

    match envelope["endpoint"].as_str().unwrap_or_default() {
        "/course/all" => (StatusCode::OK, Json(json!([{ "id": "1", "name": "Intro" }]))).into_response(),
        "/chapter" => (
            StatusCode::CREATED,
            Json(json!({ "id": "ch-1", "name": envelope["reqBody"]["name"] })),
        )
            .into_response(),
        "/lesson/abc" => (StatusCode::OK, Json(json!({ "deleted": true }))).into_response(),
        "/missing" => (StatusCode::NOT_FOUND, Json(json!({ "message": "no such course" }))).into_response(),
        "/forbidden" => (StatusCode::FORBIDDEN, "forbidden").into_response(),
        "/no-content" => StatusCode::NO_CONTENT.into_response(),
        "/not-json" => (StatusCode::OK, "plain text").into_response(),
        "/slow" => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        _ => (StatusCode::OK, Json(envelope)).into_response(),
    }
}

struct TestServer {
    url: String,
    recorder: Recorder,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let recorder = Recorder::default();
        let app = Router::new()
            .route("/", post(gateway))
            .with_state(recorder.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/", addr),
            recorder,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Debug)]
struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(Self(Mutex::new(Utc::now())))
    }

    fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock().unwrap();
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

fn client(srv: &TestServer, store: Arc<InMemoryTokenStore>) -> GatewayClient {
    GatewayClient::new(&ClientConfig::new(srv.url.clone()), store).unwrap()
}

#[derive(Debug, Deserialize, PartialEq)]
struct CourseSummary {
    id: String,
    name: String,
}

#[tokio::test]
async fn private_calls_without_token_fail_before_network() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(InMemoryTokenStore::new());
    let client = client(&srv, store.clone());

    for method in GatewayMethod::ALL.into_iter().filter(|m| !m.is_public()) {
        let res = client.call::<Value>(method, "/course/all".into()).await;
        assert!(res.data().is_none(), "{method} returned data");
        assert_eq!(res.error(), Some(&GatewayError::MissingToken));
        assert_eq!(res.status(), 500);
    }

    assert_eq!(srv.recorder.hits(), 0);
}

#[tokio::test]
async fn delete_without_token_reports_missing_token() {
    let srv = TestServer::spawn().await;
    let client = client(&srv, Arc::new(InMemoryTokenStore::new()));

    let res = client.delete::<Value>("/lesson/abc").await;

    assert_eq!(
        serde_json::to_value(&res).unwrap(),
        json!({
            "data": null,
            "error": "Access token required but not available",
            "status": 500
        })
    );
    assert_eq!(srv.recorder.hits(), 0);
}

#[tokio::test]
async fn get_with_token_returns_typed_body() {
    let srv = TestServer::spawn().await;
    let client = client(&srv, Arc::new(InMemoryTokenStore::with_token("tok-1")));

    let res = client.get::<Vec<CourseSummary>>("/course/all").await;

    assert_eq!(res.status(), 200);
    assert!(res.error().is_none());
    assert_eq!(
        res.into_data(),
        Some(vec![CourseSummary {
            id: "1".into(),
            name: "Intro".into()
        }])
    );

    let envelope = srv.recorder.last_envelope();
    assert_eq!(
        envelope,
        json!({ "endpoint": "/course/all", "method": "GET", "accessToken": "tok-1" })
    );
}

#[tokio::test]
async fn post_public_never_consults_token_store() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(InMemoryTokenStore::with_token("tok-1"));
    let client = client(&srv, store.clone());

    let request = GatewayRequest::new("/chapter")
        .with_json(&json!({ "name": "Ch1" }))
        .unwrap();
    let res = client.post_public::<Value>(request).await;

    assert_eq!(res.status(), 201);
    assert_eq!(res.data(), Some(&json!({ "id": "ch-1", "name": "Ch1" })));
    assert_eq!(store.read_count(), 0);

    let envelope = srv.recorder.last_envelope();
    assert_eq!(envelope["method"], "POSTPUBLIC");
    assert!(envelope.get("accessToken").is_none());
    assert_eq!(envelope["reqBody"], json!({ "name": "Ch1" }));
}

#[tokio::test]
async fn non_success_status_is_reported_without_data() {
    let srv = TestServer::spawn().await;
    let client = client(&srv, Arc::new(InMemoryTokenStore::with_token("tok")));

    for method in GatewayMethod::ALL {
        let res = client.call::<Value>(method, "/missing".into()).await;
        assert!(res.data().is_none());
        assert_eq!(res.status(), 404);
        assert_eq!(
            res.error_message().as_deref(),
            Some("Request failed with status code 404")
        );
    }

    let res = client.get_public::<Value>("/forbidden").await;
    assert_eq!(res.status(), 403);
    assert_eq!(
        res.error(),
        Some(&GatewayError::Status {
            status: 403,
            body: "forbidden".into()
        })
    );
}

#[tokio::test]
async fn token_is_read_once_within_window_and_again_after() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(InMemoryTokenStore::with_token("tok"));
    let clock = ManualClock::new();
    let cache = TokenCache::with_clock(chrono::Duration::seconds(TOKEN_TTL_SECS), clock.clone());
    let client = GatewayClient::with_token_cache(
        &ClientConfig::new(srv.url.clone()),
        store.clone(),
        cache,
    )
    .unwrap();

    assert!(client.get::<Value>("/course/all").await.is_success());
    clock.advance(chrono::Duration::seconds(60));
    assert!(client.put::<Value>("/course/all").await.is_success());
    assert_eq!(store.read_count(), 1);

    clock.advance(chrono::Duration::seconds(TOKEN_TTL_SECS));
    assert!(client.get::<Value>("/course/all").await.is_success());
    assert_eq!(store.read_count(), 2);
}

#[tokio::test]
async fn cached_token_survives_store_clear_until_expiry() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(InMemoryTokenStore::with_token("tok"));
    let client = client(&srv, store.clone());

    assert!(client.get::<Value>("/course/all").await.is_success());
    store.clear().await.unwrap();

    let res = client.get::<Value>("/echo").await;
    assert_eq!(res.data().unwrap()["accessToken"], "tok");

    client.invalidate_token().await;
    let res = client.get::<Value>("/echo").await;
    assert_eq!(res.error(), Some(&GatewayError::MissingToken));
}

#[tokio::test]
async fn identical_requests_each_hit_the_network() {
    let srv = TestServer::spawn().await;
    let client = client(&srv, Arc::new(InMemoryTokenStore::new()));

    let first = client.get_public::<Value>("/course/all").await;
    let second = client.get_public::<Value>("/course/all").await;

    assert_eq!(first, second);
    assert_eq!(srv.recorder.hits(), 2);
}

#[tokio::test]
async fn concurrent_private_calls_share_one_store_read() {
    let srv = TestServer::spawn().await;
    let store = Arc::new(InMemoryTokenStore::with_token("tok"));
    let client = Arc::new(client(&srv, store.clone()));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.get::<Value>("/course/all").await
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap().is_success());
    }

    assert_eq!(store.read_count(), 1);
    assert_eq!(srv.recorder.hits(), 8);
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let srv = TestServer::spawn().await;
    let client = client(&srv, Arc::new(InMemoryTokenStore::new()));

    let res = client.delete_public::<Value>("/no-content").await;
    assert_eq!(res.status(), 204);
    assert_eq!(res.data(), Some(&Value::Null));

    let res = client.delete_public::<Option<CourseSummary>>("/no-content").await;
    assert_eq!(res.into_result(), Ok(None));
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let srv = TestServer::spawn().await;
    let client = client(&srv, Arc::new(InMemoryTokenStore::new()));

    let res = client.get_public::<Vec<CourseSummary>>("/not-json").await;
    assert!(res.data().is_none());
    assert_eq!(res.status(), 200);
    assert!(matches!(res.error(), Some(GatewayError::Decode { .. })));
}

#[tokio::test]
async fn slow_gateway_times_out_as_transport_failure() {
    let srv = TestServer::spawn().await;
    let config = ClientConfig::new(srv.url.clone()).with_timeout(Duration::from_millis(200));
    let client = GatewayClient::new(&config, Arc::new(InMemoryTokenStore::new())).unwrap();

    let res = client.get_public::<Value>("/slow").await;
    assert!(res.data().is_none());
    assert_eq!(res.status(), 500);
    assert!(matches!(res.error(), Some(GatewayError::Transport(_))));
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{}/", addr));
    let client = GatewayClient::new(&config, Arc::new(InMemoryTokenStore::with_token("tok"))).unwrap();

    let res = client.get::<Value>("/course/all").await;
    assert!(res.data().is_none());
    assert_eq!(res.status(), 500);
    assert!(matches!(res.error(), Some(GatewayError::Transport(_))));
}
