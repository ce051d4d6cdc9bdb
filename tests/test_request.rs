use beacon::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_header_retrieval() {
    let mut headers = HashMap::new();
    headers.insert("Host".to_string(), "example.com".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: vec![],
    };

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_content_length_parsing() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/api")
        .header("Content-Length", "42")
        .build()
        .unwrap();

    assert_eq!(req.content_length(), Some(42));
}

#[test]
fn test_request_content_length_missing_or_invalid() {
    let missing = RequestBuilder::new().method(Method::GET).path("/").build().unwrap();
    let invalid = RequestBuilder::new()
        .method(Method::POST)
        .path("/")
        .header("Content-Length", "not-a-number")
        .build()
        .unwrap();

    assert_eq!(missing.content_length(), None);
    assert_eq!(invalid.content_length(), None);
}

#[test]
fn test_last_path_segment() {
    let cases = [
        ("/echo/abc", "abc"),
        ("/files/dir/name.txt", "name.txt"),
        ("/echo/", ""),
        ("/", ""),
        ("plain", "plain"),
    ];

    for (path, expected) in cases {
        let req = RequestBuilder::new().method(Method::GET).path(path).build().unwrap();
        assert_eq!(req.last_path_segment(), expected, "path {}", path);
    }
}

#[test]
fn test_method_parse_and_as_str() {
    assert_eq!(Method::parse("GET"), Method::GET);
    assert_eq!(Method::parse("POST"), Method::POST);
    assert_eq!(Method::parse("PUT"), Method::Other("PUT".to_string()));
    assert_eq!(Method::Other("PATCH".to_string()).as_str(), "PATCH");
}

#[test]
fn test_request_builder_defaults() {
    let req = RequestBuilder::new().method(Method::GET).path("/").build().unwrap();

    assert_eq!(req.version, "HTTP/1.1");
    assert!(req.headers.is_empty());
    assert!(req.body.is_empty());
}

#[test]
fn test_request_builder_version() {
    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/")
        .version("HTTP/1.0")
        .build()
        .unwrap();

    assert_eq!(req.version, "HTTP/1.0");
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}
