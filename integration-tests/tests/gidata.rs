use geoipmap_core::ingest::StopReason;
use integration_tests::harness::fixtures::{CHANGCHUN, LONDON, SAN_DIEGO};
use integration_tests::harness::server::events;
use integration_tests::harness::{TestServer, access_log};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn fetch(srv: &TestServer) -> Value {
    let res = srv.get("/gidata").send().unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );

    res.json().unwrap()
}

#[test]
fn gidata_returns_aggregated_fixture() {
    let srv = TestServer::start(&access_log("access.log"));

    let body = fetch(&srv);

    assert_eq!(
        body,
        json!({
            "countries": {
                "China": { "country": "China", "code": "" },
                "United Kingdom": { "country": "United Kingdom", "code": "" },
                "United States": { "country": "United States", "code": "" }
            },
            "cities": [
                {
                    "country": "United Kingdom",
                    "city": "London",
                    "latitude": 51.5142,
                    "longitude": -0.0931,
                    "count": 3,
                    "ip": LONDON,
                    "pagerequest": "GET / HTTP/1.1; <br />GET /pricing HTTP/1.1"
                },
                {
                    "country": "China",
                    "city": "Changchun",
                    "latitude": 43.88,
                    "longitude": 125.3228,
                    "count": 1,
                    "ip": CHANGCHUN,
                    "pagerequest": "GET /zh HTTP/1.1"
                },
                {
                    "country": "United States",
                    "city": "San Diego",
                    "latitude": 32.7157,
                    "longitude": -117.1611,
                    "count": 1,
                    "ip": SAN_DIEGO,
                    "pagerequest": "POST /contact HTTP/1.1"
                }
            ],
            "total": 5
        })
    );
}

#[test]
fn gidata_equals_serialized_snapshot() {
    let srv = TestServer::start(&access_log("access.log"));

    let body = fetch(&srv);

    assert_eq!(body, serde_json::to_value(srv.store().snapshot()).unwrap());
}

#[test]
fn fixture_report_counts_every_line() {
    let srv = TestServer::start(&access_log("access.log"));

    let report = srv.report();

    assert_eq!(report.lines_read, 7);
    assert_eq!(report.recorded, 5);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.no_match, 1);
    assert_eq!(report.stop_reason, StopReason::EndOfStream);
}

#[test]
fn crawler_line_ends_ingestion() {
    let srv = TestServer::start(&access_log("with_crawler.log"));

    let body = fetch(&srv);

    assert_eq!(srv.report().stop_reason, StopReason::AutomatedTraffic);
    assert_eq!(body["total"], 1);
    assert_eq!(body["cities"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["cities"][0]["ip"], LONDON);
}

#[test]
fn empty_input_serves_empty_aggregate() {
    let srv = TestServer::start("");

    let body = fetch(&srv);

    assert_eq!(body, json!({ "countries": {}, "cities": [], "total": 0 }));
}

#[test]
fn gidata_reflects_later_observations() {
    let srv = TestServer::start(&access_log("access.log"));
    let before = fetch(&srv);

    srv.store()
        .record_observation(geoipmap_core::store::Observation::new(
            geoipmap_core::geo::Location::new("Japan", "Tokyo", 35.6895, 139.6917),
            "1.0.16.1",
            "GET /ja HTTP/1.1",
        ));
    let after = fetch(&srv);

    assert_eq!(before["total"], 5);
    assert_eq!(after["total"], 6);
    assert_eq!(after["cities"][3]["city"], "Tokyo");
}

#[test]
fn ingest_logs_a_summary() {
    let _srv = TestServer::start(&access_log("access.log"));

    let events = events();
    let events = events.lock().unwrap();

    assert!(
        events
            .iter()
            .any(|e| e.message == "ingest finished" && e.field("recorded").is_some()),
        "missing ingest summary event: {events:?}"
    );
}
