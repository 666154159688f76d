use std::collections::HashMap;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use hackerlearn_gateway::ClientConfig;
use hackerlearn_metrics::{ApiCheckClient, GoRuntimeSnapshot, MetricsError};

const SCRAPE: &str = "\
# HELP go_goroutines Number of goroutines that currently exist.
# TYPE go_goroutines gauge
go_goroutines 9
# TYPE go_memstats_heap_alloc_bytes gauge
go_memstats_heap_alloc_bytes 1048576
";

async fn api_check(Query(q): Query<HashMap<String, String>>) -> (StatusCode, String) {
    match q.get("api").map(String::as_str) {
        Some("http://svc:8080/v1/metrics") => (StatusCode::OK, SCRAPE.to_string()),
        _ => (StatusCode::BAD_GATEWAY, "unknown target".to_string()),
    }
}

struct TestServer {
    url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let app = Router::new().route("/api-check", get(api_check));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            url: format!("http://{}/api-check", addr),
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client(srv: &TestServer) -> ApiCheckClient {
    let config = ClientConfig::new("http://127.0.0.1:1").with_api_check_url(srv.url.clone());
    ApiCheckClient::new(&config).unwrap()
}

#[tokio::test]
async fn fetches_and_parses_target_metrics() {
    let srv = TestServer::spawn().await;
    let set = client(&srv).fetch("http://svc:8080/v1/metrics").await.unwrap();

    assert_eq!(set.len(), 2);
    let snap = GoRuntimeSnapshot::from_metrics(&set);
    assert_eq!(snap.goroutines, 9.0);
    assert_eq!(snap.heap_alloc_bytes, 1_048_576.0);
    assert_eq!(snap.stack_inuse_bytes, 0.0);
}

#[tokio::test]
async fn proxy_failure_is_reported_with_status() {
    let srv = TestServer::spawn().await;
    let err = client(&srv).fetch("http://elsewhere/metrics").await.unwrap_err();
    assert_eq!(
        err,
        MetricsError::Status {
            status: 502,
            body: "unknown target".into()
        }
    );
}

#[test]
fn rejects_unparseable_proxy_url() {
    let config = ClientConfig::new("http://127.0.0.1:1").with_api_check_url("not a url");
    assert!(matches!(
        ApiCheckClient::new(&config),
        Err(MetricsError::InvalidUrl(_))
    ));
}
