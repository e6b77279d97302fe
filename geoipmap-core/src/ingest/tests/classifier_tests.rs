use super::{access_line, access_line_with_agent};
use crate::ingest::{AUTOMATED_TRAFFIC_SIGNATURES, TrafficClassifier};

#[test]
fn browser_line_is_not_automated() {
    let line = access_line("81.2.69.142", "GET / HTTP/1.1");

    assert!(!TrafficClassifier::default().is_automated_traffic(&line));
}

#[test]
fn crawler_user_agent_is_automated() {
    // Arrange
    let line = access_line_with_agent(
        "66.249.66.1",
        "GET /robots.txt HTTP/1.1",
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    );

    // Act
    let automated = TrafficClassifier::default().is_automated_traffic(&line);

    // Assert
    assert!(automated);
}

#[test]
fn signature_anywhere_in_line_matches() {
    // "gzip" in the request path, not the user agent.
    let line = access_line("81.2.69.142", "GET /files/archive.gzip HTTP/1.1");

    assert!(TrafficClassifier::default().is_automated_traffic(&line));
}

#[test]
fn matching_is_case_sensitive() {
    let line = access_line_with_agent("81.2.69.142", "GET / HTTP/1.1", "SomeBOT/1.0");

    assert!(!TrafficClassifier::default().is_automated_traffic(&line));
}

#[test]
fn first_signature_in_list_order_is_reported() {
    let classifier = TrafficClassifier::default();
    let line = access_line_with_agent("66.249.66.1", "GET / HTTP/1.1", "Googlebot/2.1");

    assert_eq!(classifier.matching_signature(&line), Some("bot"));
}

#[test]
fn extra_signatures_extend_built_in_list() {
    // Arrange
    let classifier = TrafficClassifier::new(&["Site24x7".to_string()]);
    let line = access_line_with_agent(
        "81.2.69.142",
        "HEAD / HTTP/1.1",
        "Mozilla/5.0 (compatible; Site24x7)",
    );

    // Act / Assert
    assert_eq!(classifier.len(), AUTOMATED_TRAFFIC_SIGNATURES.len() + 1);
    assert_eq!(classifier.matching_signature(&line), Some("Site24x7"));
    assert!(!TrafficClassifier::default().is_automated_traffic(&line));
}
