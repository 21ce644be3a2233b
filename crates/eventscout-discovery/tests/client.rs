//! Integration tests for `DiscoveryClient` using wiremock HTTP mocks.

use std::io;
use std::sync::{Arc, Mutex};

use eventscout_discovery::query::QueryOptions;
use eventscout_discovery::{ClientSettings, DiscoveryClient, DiscoveryError};
use wiremock::matchers::{method, path, query_param};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENTS_PATH: &str = "/discovery/v2/events.json";

fn test_client(base_url: &str) -> DiscoveryClient {
    let settings = ClientSettings {
        api_host: "https://app.ticketmaster.com".to_string(),
        api_path: EVENTS_PATH.to_string(),
        api_key: "test-key".to_string(),
        query: QueryOptions::default(),
        timeout_secs: 5,
        user_agent: "eventscout-test".to_string(),
    };
    DiscoveryClient::with_base_url(settings, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_normalized_events() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "_embedded": {
            "events": [
                {
                    "id": "Z7r9jZ1AdFa8P",
                    "name": "Warriors vs. Lakers",
                    "url": "https://www.ticketmaster.com/event/Z7r9jZ1AdFa8P",
                    "distance": 12.4,
                    "images": [{ "url": "https://s1.ticketm.net/dam/a.jpg" }],
                    "classifications": [
                        { "segment": { "name": "Sports" } },
                        { "segment": { "name": "Sports" } }
                    ],
                    "_embedded": {
                        "venues": [
                            { "name": "Arena" },
                            {
                                "address": { "line1": "1 Warriors Way" },
                                "city": { "name": "San Francisco" }
                            }
                        ]
                    }
                },
                { "id": "second", "name": "Open Mic" }
            ]
        },
        "page": { "size": 20, "totalElements": 2, "totalPages": 1, "number": 0 }
    });

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("apikey", "test-key"))
        .and(query_param("geoPoint", "9q9hwhb4"))
        .and(query_param("keyword", "basketball"))
        .and(query_param("radius", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(37.38, -122.08, Some("basketball"))
        .await
        .expect("search should succeed");

    assert_eq!(items.len(), 2);
    let first = &items[0];
    assert_eq!(first.item_id(), "Z7r9jZ1AdFa8P");
    assert_eq!(first.name(), "Warriors vs. Lakers");
    assert!((first.distance() - 12.4).abs() < f64::EPSILON);
    assert_eq!(first.address(), "1 Warriors Way,San Francisco");
    assert_eq!(first.image_url(), "https://s1.ticketm.net/dam/a.jpg");
    assert_eq!(first.categories().len(), 1);
    assert!(first.categories().contains("Sports"));

    let second = &items[1];
    assert_eq!(second.item_id(), "second");
    assert_eq!(second.address(), "");
    assert!(second.categories().is_empty());
}

#[tokio::test]
async fn search_sends_default_keyword_and_encoded_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("keyword", "event"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("keyword", "live music"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let defaulted = client.search(37.38, -122.08, None).await.unwrap();
    let spaced = client
        .search(37.38, -122.08, Some("live music"))
        .await
        .unwrap();

    assert!(defaulted.is_empty());
    assert!(spaced.is_empty());
}

#[tokio::test]
async fn non_200_status_yields_empty_result() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "_embedded": { "events": [{ "id": "should-not-appear" }] }
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client
        .search(37.38, -122.08, Some("music"))
        .await
        .expect("non-200 must not surface as an error");
    assert!(items.is_empty());
}

#[tokio::test]
async fn malformed_body_yields_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let items = client.search(37.38, -122.08, None).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn unreachable_host_yields_empty_result() {
    // Port 9 (discard) on loopback is expected to refuse connections.
    let client = test_client("http://127.0.0.1:9");
    let items = client
        .search(37.38, -122.08, None)
        .await
        .expect("transport failure must not surface as an error");
    assert!(items.is_empty());
}

#[tokio::test]
async fn invalid_coordinates_fail_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search(120.0, 0.0, None)
        .await
        .expect_err("latitude 120 is a contract violation");
    assert!(matches!(err, DiscoveryError::InvalidArgument(_)));
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer lock")).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn search_request_log_carries_geo_point_not_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = test_client(&server.uri());
    client.search(37.38, -122.08, Some("jazz")).await.unwrap();

    let output = logs.contents();
    assert!(output.contains("sending discovery search request"), "{output}");
    assert!(output.contains("geo_point=9q9hwhb4"), "{output}");
    assert!(!output.contains("test-key"), "{output}");
}
