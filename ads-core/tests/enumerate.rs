mod common;

use ads_core::error::AdsError;
use ads_core::{PRIMARY_STREAM_NAME, list_streams, remove_streams, RemoveOutcome};
use common::Fixture;

#[test]
fn plain_file_has_only_primary() {
    let fx = Fixture::new();
    let host = fx.host("plain.bin", 42);

    let recs = list_streams(&fx.repo, &host).unwrap();
    assert_eq!(recs.len(), 1);
    assert!(recs[0].is_primary);
    assert_eq!(recs[0].name, PRIMARY_STREAM_NAME);
    assert_eq!(recs[0].length, 42);
}

#[test]
fn named_streams_are_listed_with_lengths() {
    let fx = Fixture::new();
    let host = fx.host("doc.txt", 500);
    fx.repo.insert(&host, "secret.txt", &[7u8; 120]);

    let recs = list_streams(&fx.repo, &host).unwrap();
    assert_eq!(recs.len(), 2);
    let named: Vec<_> = recs.iter().filter(|r| !r.is_primary).collect();
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].name, "secret.txt");
    assert_eq!(named[0].length, 120);
    assert_eq!(recs.iter().find(|r| r.is_primary).unwrap().length, 500);
}

#[test]
fn missing_host_is_not_found() {
    let fx = Fixture::new();
    let err = list_streams(&fx.repo, &fx.dir.path().join("gone.txt")).unwrap_err();
    assert!(matches!(err, AdsError::NotFound { .. }));
    assert!(err.is_not_found());
}

#[test]
fn directory_is_not_a_file() {
    let fx = Fixture::new();
    let err = list_streams(&fx.repo, fx.dir.path()).unwrap_err();
    assert!(matches!(err, AdsError::NotAFile { .. }));
}

#[test]
fn doc_scenario() {
    let fx = Fixture::new();
    let host = fx.host("doc.txt", 500);
    fx.repo.insert(&host, "secret.txt", &[1u8; 120]);
    assert_eq!(list_streams(&fx.repo, &host).unwrap().len(), 2);

    let first = remove_streams(&fx.repo, &host, Some("secret.txt")).unwrap();
    assert!(matches!(first.as_slice(), [RemoveOutcome::Removed { stream }] if stream == "secret.txt"));

    let left = list_streams(&fx.repo, &host).unwrap();
    assert_eq!(left.len(), 1);
    assert!(left[0].is_primary);

    let second = remove_streams(&fx.repo, &host, Some("secret.txt")).unwrap();
    assert!(matches!(second.as_slice(), [RemoveOutcome::NotExists { .. }]));
}

#[test]
fn records_serialize_for_json_output() {
    let fx = Fixture::new();
    let host = fx.host("doc.txt", 3);
    fx.repo.insert(&host, "a", b"xy");

    let recs = list_streams(&fx.repo, &host).unwrap();
    let v = serde_json::to_value(&recs[1]).unwrap();
    assert_eq!(v["name"], "a");
    assert_eq!(v["length"], 2);
    assert_eq!(v["is_primary"], false);
}
