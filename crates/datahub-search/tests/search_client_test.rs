//! Integration tests for the search client against a mock endpoint.

use datahub_search::{SearchClient, SearchError, SearchRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PATH: &str = "/metadata/datahub/V2/artifacts";

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::new(5)
        .expect("Failed to create client")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_search_sends_expected_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({
            "filters": [],
            "hostFamily": 4,
            "orderBy": "Default",
            "orderDirection": "",
            "pageNumber": 1,
            "pageSize": 200,
            "supportedTypes": ["Model"],
            "tridentSupportedTypes": ["dataset"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"displayName": "Sales", "workspaceName": "Finance"},
            {"displayName": "Inventory", "workspaceName": "Ops"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server)
        .search("test-token", &SearchRequest::new(["Model"]).page_size(200))
        .await
        .expect("Search should succeed");

    assert_eq!(results.count, 2);
    assert_eq!(results.items.len(), 2);
    assert_eq!(results.items[0].display_name(), Some("Sales"));
    assert_eq!(results.region, "west-europe");
    assert_eq!(
        results.host,
        "wabi-west-europe-e-primary-redirect.analysis.windows.net"
    );
}

#[tokio::test]
async fn test_workspace_filter_and_clamped_page_size() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .and(body_json(json!({
            "filters": [{"datahubFilterType": "workspace", "values": ["ws-42"]}],
            "hostFamily": 4,
            "orderBy": "Default",
            "orderDirection": "",
            "pageNumber": 3,
            "pageSize": 1000,
            "supportedTypes": ["Lakehouse", "SynapseNotebook"],
            "tridentSupportedTypes": ["Lakehouse", "SynapseNotebook"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = SearchRequest::new(["Lakehouse", "SynapseNotebook"])
        .region("uk-south")
        .workspace_id("ws-42")
        .page_size(5000)
        .page_number(3);
    let results = client_for(&mock_server)
        .search("t", &request)
        .await
        .expect("Search should succeed");

    assert_eq!(results.count, 0);
    assert_eq!(results.region, "uk-south");
}

#[tokio::test]
async fn test_http_error_body_is_truncated() {
    let mock_server = MockServer::start().await;
    let long_body = "x".repeat(500);

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(long_body))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .search("expired", &SearchRequest::new(["Model"]))
        .await
        .unwrap_err();

    match &err {
        SearchError::Http { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body.chars().count(), 200);
        }
        other => panic!("Expected HTTP error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("HTTP 401: xxx"));
}

#[tokio::test]
async fn test_unknown_region_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .search("t", &SearchRequest::new(["Model"]).region("moon-base"))
        .await
        .unwrap_err();

    assert_eq!(err, SearchError::UnknownRegion("moon-base".to_string()));
}

#[tokio::test]
async fn test_non_array_body_yields_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"value": [{"displayName": "x"}]})),
        )
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server)
        .search("t", &SearchRequest::new(["Model"]))
        .await
        .expect("Search should succeed");

    assert!(results.items.is_empty());
    assert_eq!(results.count, 0);
}

#[tokio::test]
async fn test_non_object_elements_are_skipped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"displayName": "a"}, 7, "b", null])),
        )
        .mount(&mock_server)
        .await;

    let results = client_for(&mock_server)
        .search("t", &SearchRequest::new(["Model"]))
        .await
        .expect("Search should succeed");

    assert_eq!(results.count, 1);
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .search("t", &SearchRequest::new(["Model"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Decode(_)));
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = SearchClient::new(1)
        .expect("Failed to create client")
        .with_base_url(mock_server.uri());
    let err = client
        .search("t", &SearchRequest::new(["Model"]))
        .await
        .unwrap_err();

    assert_eq!(err, SearchError::Timeout { secs: 1 });
    assert_eq!(err.to_string(), "Request timed out (1s)");
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);

    let client = SearchClient::new(5)
        .expect("Failed to create client")
        .with_base_url(format!("http://{}", addr));
    let err = client
        .search("t", &SearchRequest::new(["Model"]))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Transport(_)), "got {:?}", err);
}
