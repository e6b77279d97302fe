use super::observation;
use crate::geo::Location;
use crate::store::{AggregateStore, Observation, RecordOutcome};
use pretty_assertions::assert_eq;

#[test]
fn first_observation_opens_bucket() {
    // Arrange
    let store = AggregateStore::new();

    // Act
    let outcome = store.record_observation(observation("Spain", "Madrid", "1.2.3.4", "GET /"));

    // Assert
    assert_eq!(outcome, RecordOutcome::NewBucket);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.total, 1);
    assert_eq!(snapshot.cities.len(), 1);
    assert_eq!(snapshot.cities[0].count, 1);
    assert_eq!(snapshot.cities[0].page_requests, "GET /");
}

#[test]
fn coordinates_and_ip_never_change_after_creation() {
    // Arrange
    let store = AggregateStore::new();
    store.record_observation(Observation::new(
        Location::new("Spain", "Madrid", 40.4, -3.7),
        "1.2.3.4",
        "GET /",
    ));

    // Act
    let outcome = store.record_observation(Observation::new(
        Location::new("Spain", "Madrid", 41.0, -4.0),
        "5.6.7.8",
        "GET /",
    ));

    // Assert
    assert_eq!(outcome, RecordOutcome::ExistingBucket);
    let bucket = &store.snapshot().cities[0];
    assert_eq!(bucket.latitude, 40.4);
    assert_eq!(bucket.longitude, -3.7);
    assert_eq!(bucket.first_ip, "1.2.3.4");
    assert_eq!(bucket.count, 2);
}

#[test]
fn city_names_are_case_sensitive() {
    let store = AggregateStore::new();

    store.record_observation(observation("France", "Paris", "1.1.1.1", "GET /"));
    store.record_observation(observation("France", "paris", "1.1.1.2", "GET /"));

    assert_eq!(store.bucket_count(), 2);
    assert_eq!(store.snapshot().countries.len(), 1);
}

#[test]
fn same_city_in_different_countries_is_two_buckets() {
    let store = AggregateStore::new();

    store.record_observation(observation("United States", "Paris", "1.1.1.1", "GET /"));
    store.record_observation(observation("France", "Paris", "1.1.1.2", "GET /"));

    assert_eq!(store.bucket_count(), 2);
}

#[test]
fn countries_are_recorded_once_with_empty_code() {
    // Arrange
    let store = AggregateStore::new();

    // Act
    store.record_observation(observation("Japan", "Tokyo", "1.1.1.1", "GET /"));
    store.record_observation(observation("Japan", "Osaka", "1.1.1.2", "GET /"));
    store.record_observation(observation("Brazil", "Recife", "1.1.1.3", "GET /"));

    // Assert
    let snapshot = store.snapshot();
    let names: Vec<&str> = snapshot.countries.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Brazil", "Japan"]);
    assert!(snapshot.countries.values().all(|c| c.code.is_empty()));
    assert_eq!(snapshot.countries["Japan"].name, "Japan");
}

#[test]
fn buckets_keep_first_observation_order() {
    let store = AggregateStore::new();

    for city in ["Oslo", "Bergen", "Oslo", "Tromso", "Bergen"] {
        store.record_observation(observation("Norway", city, "1.1.1.1", "GET /"));
    }

    let cities: Vec<String> = store.read(|agg| agg.cities.iter().map(|c| c.city.clone()).collect());
    assert_eq!(cities, vec!["Oslo", "Bergen", "Tromso"]);
    assert_eq!(store.total(), 5);
}

#[test]
fn empty_city_is_its_own_bucket() {
    let store = AggregateStore::new();

    store.record_observation(observation("Chile", "", "1.1.1.1", "GET /"));
    store.record_observation(observation("Chile", "", "1.1.1.2", "GET /x"));

    let snapshot = store.snapshot();
    assert_eq!(snapshot.cities.len(), 1);
    assert_eq!(snapshot.cities[0].city, "");
    assert_eq!(snapshot.cities[0].page_requests, "GET /; <br />GET /x");
}

#[test]
fn total_is_sum_of_counts() {
    let store = AggregateStore::new();
    let hits = [
        ("Kenya", "Nairobi"),
        ("Kenya", "Mombasa"),
        ("Kenya", "Nairobi"),
        ("Ghana", "Accra"),
    ];

    for (country, city) in hits {
        store.record_observation(observation(country, city, "1.1.1.1", "GET /"));
    }

    let snapshot = store.snapshot();
    let sum: u64 = snapshot.cities.iter().map(|c| c.count).sum();
    assert_eq!(snapshot.total, sum);
    assert_eq!(snapshot.total, 4);
}

#[test]
fn snapshot_is_detached_from_later_writes() {
    let store = AggregateStore::new();
    store.record_observation(observation("Peru", "Lima", "1.1.1.1", "GET /"));

    let before = store.snapshot();
    store.record_observation(observation("Peru", "Lima", "1.1.1.1", "GET /next"));

    assert_eq!(before.total, 1);
    assert_eq!(before.cities[0].page_requests, "GET /");
    assert_eq!(store.total(), 2);
}
