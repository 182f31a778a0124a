use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lastfm_auth_client::auth::{ApiRequest, Credentials, generate_api_sig};
use lastfm_auth_client::{ErrorKind, LastFmAuthClient, LastFmError, RequestToken};

const API_PATH: &str = "/2.0/";

fn build_client(server: &MockServer) -> LastFmAuthClient {
    LastFmAuthClient::builder()
        .api_url(format!("{}{}", server.uri(), API_PATH))
        .build()
}

fn credentials() -> Credentials {
    Credentials::new("abc123", "secret1")
}

#[tokio::test]
async fn test_fetch_request_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("method", "auth.getToken"))
        .and(query_param("api_key", "abc123"))
        .and(query_param("api_sig", "70ca98856be73f250eae1bd7197dc0e4"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "XYZ"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let token = client.fetch_request_token(&credentials()).await.unwrap();
    assert_eq!(token.as_str(), "XYZ");
}

#[tokio::test]
async fn test_secret_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "XYZ"})))
        .mount(&server)
        .await;

    let client = build_client(&server);
    client.fetch_request_token(&credentials()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.contains("api_sig="));
    assert!(!query.contains("secret1"));
}

#[tokio::test]
async fn test_fetch_request_token_remote_error() {
    let server = MockServer::start().await;
    let response = serde_json::json!({"error": 10, "message": "Invalid API key"});

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.fetch_request_token(&credentials()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteRejected);
    assert_eq!(err.message(), "Invalid API key");
    match err {
        LastFmError::Api(api_error) => assert_eq!(api_error.code, Some(10)),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_request_token_error_on_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"error": 4, "message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.fetch_request_token(&credentials()).await.unwrap_err();
    assert_eq!(err.message(), "Invalid API key");
}

#[tokio::test]
async fn test_fetch_request_token_null_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": null})))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.fetch_request_token(&credentials()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_fetch_request_token_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.fetch_request_token(&credentials()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_fetch_request_token_unknown_shape() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.fetch_request_token(&credentials()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(err.message(), "Unknown error");
}

#[tokio::test]
async fn test_transport_failure() {
    // Nothing listens on the discard port.
    let client = LastFmAuthClient::builder()
        .api_url("http://127.0.0.1:9/2.0/")
        .build();

    let err = client.fetch_request_token(&credentials()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_fetch_session_key() {
    let server = MockServer::start().await;
    let expected_sig = generate_api_sig(
        [("method", "auth.getSession"), ("api_key", "abc123"), ("token", "XYZ")],
        "secret1",
    );

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("method", "auth.getSession"))
        .and(query_param("api_key", "abc123"))
        .and(query_param("token", "XYZ"))
        .and(query_param("api_sig", expected_sig.as_str()))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "session": {"name": "alice", "key": "sk_1", "subscriber": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let session = client
        .fetch_session_key(&credentials(), &RequestToken::new("XYZ"))
        .await
        .unwrap();

    assert_eq!(session.username, "alice");
    assert_eq!(session.session_key, "sk_1");
    assert!(session.is_valid());
}

#[tokio::test]
async fn test_fetch_session_key_missing_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"session": {"name": "alice"}})),
        )
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .fetch_session_key(&credentials(), &RequestToken::new("XYZ"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    assert_eq!(err.message(), "Session key is null");
}

#[tokio::test]
async fn test_fetch_session_key_unauthorized_token() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": 14,
        "message": "Unauthorized Token - This token has not been authorized"
    });

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .fetch_session_key(&credentials(), &RequestToken::new("XYZ"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RemoteRejected);
    assert_eq!(
        err.message(),
        "Unauthorized Token - This token has not been authorized"
    );
}

#[tokio::test]
async fn test_signed_get_escapes_values_on_the_wire() {
    let server = MockServer::start().await;
    let request = ApiRequest::new("track.updateNowPlaying")
        .param("artist", "AC/DC & Friends")
        .param("track", "T.N.T.")
        .sign(&credentials());

    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("artist", "AC/DC & Friends"))
        .and(query_param("api_sig", request.api_sig()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"nowplaying": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let object = client.signed_get(&request).await.unwrap();
    assert!(object.contains_key("nowplaying"));

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default();
    assert!(query.contains("artist=AC%2FDC+%26+Friends"));
}
