use httpmock::prelude::*;
use serde_json::json;
use tweetfw::{ClientConfig, Config, Format, FormParams, Params, Registry, Response, Settings, Twitter, TwitterError};

fn twitter(server: &MockServer) -> Twitter {
    Twitter::with_config(
        ClientConfig::new("consumer-key", "consumer-secret").expect("valid credentials"),
        Config::new("http", server.address().to_string()),
    )
    .expect("failed to build client")
}

fn dummy_form() -> Response {
    let mut expected = FormParams::new();
    expected.insert("dummy_key".to_string(), "dummy_value".to_string());
    Response::Form(expected)
}

#[test]
fn test_get_form() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/url").header_exists("authorization");
        then.status(200).body("dummy_key=dummy_value");
    });

    let actual = twitter(&server)
        .get("url", &Params::new(), Format::Form)
        .expect("failed to call get");

    mock.assert();
    assert_eq!(actual, dummy_form());
}

#[test]
fn test_post_form() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/url");
        then.status(200).body("dummy_key=dummy_value");
    });

    let actual = twitter(&server)
        .post("url", &Params::new(), Format::Form)
        .expect("failed to call post");

    mock.assert();
    assert_eq!(actual, dummy_form());
}

#[test]
fn test_put_form() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/url");
        then.status(200).body("dummy_key=dummy_value");
    });

    let actual = twitter(&server)
        .put("url", &Params::new(), Format::Form)
        .expect("failed to call put");

    mock.assert();
    assert_eq!(actual, dummy_form());
}

#[test]
fn test_delete_form() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/url");
        then.status(200).body("dummy_key=dummy_value");
    });

    let actual = twitter(&server)
        .delete("url", &Params::new(), Format::Form)
        .expect("failed to call delete");

    mock.assert();
    assert_eq!(actual, dummy_form());
}

#[test]
fn test_get_json_with_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/1.1/statuses/user_timeline.json")
            .query_param("screen_name", "rustlang")
            .query_param("count", "2");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"[{"id": 1, "text": "hello"}, {"id": 2, "text": "world"}]"#);
    });

    let mut params = Params::new();
    params.insert("screen_name".to_string(), "rustlang".to_string());
    params.insert("count".to_string(), "2".to_string());

    let actual = twitter(&server)
        .get("1.1/statuses/user_timeline", &params, Format::Json)
        .expect("failed to call user_timeline");

    mock.assert();
    assert_eq!(
        actual,
        Response::Json(json!([{"id": 1, "text": "hello"}, {"id": 2, "text": "world"}]))
    );
    assert_eq!(actual.get_string("1/text"), Some("world".to_string()));
}

#[test]
fn test_post_sends_form_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/1.1/statuses/update.json")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("status=Hello%20Ladies%20%2B%20Gentlemen");
        then.status(200).body(r#"{"id": 42}"#);
    });

    let mut params = Params::new();
    params.insert("status".to_string(), "Hello Ladies + Gentlemen".to_string());

    let actual = twitter(&server)
        .post("1.1/statuses/update", &params, Format::Json)
        .expect("failed to post status");

    mock.assert();
    assert_eq!(actual.get("id"), Some(json!(42)));
}

#[test]
fn test_non_200_is_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/url");
        then.status(201).body("dummy_key=dummy_value");
    });
    server.mock(|when, then| {
        when.method(GET).path("/url.json");
        then.status(201).body("dummy_key=dummy_value");
    });

    let t = twitter(&server);
    for format in [Format::Form, Format::Json] {
        match t.get("url", &Params::new(), format) {
            Err(TwitterError::Api { status, body }) => {
                assert_eq!(status, 201);
                assert_eq!(body, "dummy_key=dummy_value");
            }
            other => panic!("expected TwitterError::Api, got {:?}", other),
        }
    }
}

#[test]
fn test_error_status_carries_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/1.1/account/verify_credentials.json");
        then.status(401).body(r#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#);
    });

    let err = twitter(&server)
        .get("1.1/account/verify_credentials", &Params::new(), Format::Json)
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(err.to_string().starts_with("Code:401 Response:"));
    assert!(err.to_string().contains("Could not authenticate you."));
}

#[test]
fn test_malformed_json_is_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/url.json");
        then.status(200).body("dummy_key=dummy_value");
    });

    let result = twitter(&server).get("url", &Params::new(), Format::Json);
    assert!(matches!(result, Err(TwitterError::Json(_))));
}

#[test]
fn test_get_request_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/oauth/request_token").body("");
        then.status(200)
            .body("oauth_token=req-token&oauth_token_secret=req-secret&oauth_callback_confirmed=true");
    });

    let pairs = twitter(&server)
        .get_request_token()
        .expect("failed to get request token");

    mock.assert();
    assert_eq!(pairs["oauth_token"], "req-token");
    assert_eq!(pairs["oauth_token_secret"], "req-secret");
    assert_eq!(pairs["oauth_callback_confirmed"], "true");
    assert_eq!(pairs.len(), 3);
}

#[test]
fn test_get_access_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/oauth/access_token")
            .header_includes("authorization", r#"oauth_token="token""#)
            .body("oauth_verifier=verifier");
        then.status(200)
            .body("oauth_token=final-token&oauth_token_secret=final-secret&screen_name=rustlang");
    });

    let t = twitter(&server);
    let pairs = t
        .get_access_token("token", "secret", "verifier")
        .expect("failed to get access token");

    mock.assert();
    assert_eq!(pairs["oauth_token"], "final-token");
    assert_eq!(pairs["oauth_token_secret"], "final-secret");
    assert_eq!(pairs["screen_name"], "rustlang");

    // the mock only answers requests signed with the request token, and the
    // token is still in place afterwards
    let token = t.token().expect("token should be set");
    assert_eq!(token.token, "token");
    assert_eq!(token.secret, "secret");
}

#[test]
fn test_access_token_unsigned_request_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/oauth/access_token")
            .header_includes("authorization", r#"oauth_token="token""#);
        then.status(200).body("oauth_token=final-token&oauth_token_secret=final-secret");
    });

    // signed with a different token than the one the endpoint expects
    let t = twitter(&server);
    t.set_token("other", "other-secret");
    let result = t.post("oauth/access_token", &Params::new(), Format::Form);

    assert!(matches!(result, Err(TwitterError::Api { status: 404, .. })));
}

#[test]
fn test_registry_against_mock_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/1.1/account/verify_credentials.json");
        then.status(200).body(r#"{"screen_name": "rustlang"}"#);
    });

    let registry = Registry::new(
        Settings::new()
            .with_consumer("consumer-key", "consumer-secret")
            .with_user_token("user-token", "user-secret")
            .with_endpoint("http", server.address().to_string()),
    );

    let twitter = registry.default_instance().expect("failed to forge default");
    let me = twitter
        .get("1.1/account/verify_credentials", &Params::new(), Format::Json)
        .expect("failed to verify credentials");

    mock.assert();
    assert_eq!(me.get_string("screen_name"), Some("rustlang".to_string()));
    assert!(registry.instance("missing").is_none());
}
