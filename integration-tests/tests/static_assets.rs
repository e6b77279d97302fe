use integration_tests::harness::TestServer;
use reqwest::StatusCode;
use reqwest::header::{ALLOW, CONTENT_TYPE};

#[test]
fn index_is_served_with_title() {
    let srv = TestServer::start_with_title("", Some("Blog <visitors>"));

    let res = srv.get("/").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let body = res.text().unwrap();
    assert!(
        body.contains("<title>Blog &lt;visitors&gt;</title>"),
        "unexpected response body: {body}"
    );
}

#[test]
fn index_without_title_uses_default() {
    let srv = TestServer::start("");

    let body = srv.get("/").send().unwrap().text().unwrap();

    assert!(body.contains("<title>Visitor Map</title>"));
}

#[test]
fn script_resource_is_served() {
    let srv = TestServer::start("");

    let res = srv.get("/resources/map.js").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .contains("javascript")
    );
    assert!(res.text().unwrap().contains("/gidata"));
}

#[test]
fn unknown_resource_is_not_found() {
    let srv = TestServer::start("");

    let res = srv.get("/resources/missing.png").send().unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn unknown_path_is_not_found() {
    let srv = TestServer::start("");

    let res = srv.get("/wp-login.php").send().unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn resource_traversal_is_rejected() {
    let srv = TestServer::start("");

    let res = srv.get("/resources/..%2Findex.html").send().unwrap();

    assert!(
        res.status().is_client_error(),
        "expected client error, got {}",
        res.status()
    );
}

#[test]
fn post_is_not_allowed() {
    let srv = TestServer::start("");

    let res = srv.client().post(srv.url("/gidata")).send().unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[ALLOW], "GET, HEAD");
}

#[test]
fn head_returns_headers_only() {
    let srv = TestServer::start("");

    let res = srv.client().head(srv.url("/gidata")).send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    assert!(res.text().unwrap().is_empty());
}
