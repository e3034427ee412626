//! Edge case tests for weft-net
//!
//! Response helpers, URL resolution and `file://` loading.

use weft_net::*;

// ============================================================================
// RESPONSE TESTS
// ============================================================================

#[test]
fn test_only_200_is_success() {
    let ok = Response { status: 200, headers: vec![], body: vec![] };
    let no_content = Response { status: 204, headers: vec![], body: vec![] };
    let missing = Response { status: 404, headers: vec![], body: vec![] };

    assert!(ok.is_success());
    assert!(!no_content.is_success());
    assert!(!missing.is_success());
}

#[test]
fn test_header_lookup_ignores_case() {
    let resp = Response {
        status: 200,
        headers: vec![("Content-Type".into(), "text/css".into())],
        body: b"p{}".to_vec(),
    };
    assert_eq!(resp.header("content-type"), Some("text/css"));
    assert_eq!(resp.text(), "p{}");
}

#[test]
fn test_text_replaces_invalid_utf8() {
    let resp = Response { status: 200, headers: vec![], body: vec![b'a', 0xff] };
    assert_eq!(resp.text(), "a\u{fffd}");
}

// ============================================================================
// URL TESTS
// ============================================================================

#[test]
fn test_resolve_sibling_file() {
    let url = resolve_url("file:///srv/app/index.html", "components/menu-item/menu-item.css").unwrap();
    assert_eq!(url, "file:///srv/app/components/menu-item/menu-item.css");
}

#[test]
fn test_resolve_bad_base() {
    assert!(matches!(resolve_url("not a url", "x.html"), Err(NetError::InvalidUrl(_))));
}

#[test]
fn test_invalid_url_rejected() {
    let loader = ResourceLoader::new().unwrap();
    let result = smol::block_on(loader.fetch("::nope::"));
    assert!(matches!(result, Err(NetError::InvalidUrl(_))));
}

// ============================================================================
// FILE LOADING TESTS
// ============================================================================

#[test]
fn test_file_fetch_reads_body() {
    let path = std::env::temp_dir().join(format!("weft-net-{}.html", std::process::id()));
    std::fs::write(&path, "<p>{{greeting}}</p>").unwrap();
    let url = Url::from_file_path(&path).unwrap();

    let resp = smol::block_on(fetch(url.as_str())).unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.text(), "<p>{{greeting}}</p>");

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_file_is_404() {
    let path = std::env::temp_dir().join("weft-net-definitely-missing.html");
    let url = Url::from_file_path(&path).unwrap();

    let resp = smol::block_on(fetch(url.as_str())).unwrap();
    assert_eq!(resp.status, 404);
    assert!(!resp.is_success());
}
