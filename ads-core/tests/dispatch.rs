mod common;

use ads_core::{
    Dispatch, ExtractOptions, Operation, OperationReport, dispatch, dispatch_batch,
};
use common::Fixture;

#[test]
fn listing_is_taken_before_the_operation() {
    let fx = Fixture::new();
    let host = fx.host("doc.txt", 5);
    fx.repo.insert(&host, "s", b"abc");

    let d = dispatch(&fx.repo, &host, &Operation::RemoveAll).unwrap();
    let Dispatch::Processed(report) = d else {
        panic!("host was skipped");
    };
    assert_eq!(report.streams.len(), 2);
    assert!(matches!(report.report, OperationReport::Removed(ref v) if v.len() == 1));
    assert!(fx.repo.stream_bytes(&host, "s").is_none());
}

#[test]
fn directories_are_skipped() {
    let fx = Fixture::new();
    let d = dispatch(&fx.repo, fx.dir.path(), &Operation::List).unwrap();
    assert!(matches!(d, Dispatch::SkippedDirectory(_)));
}

#[test]
fn list_only_changes_nothing() {
    let fx = Fixture::new();
    let host = fx.host("doc.txt", 5);
    fx.repo.insert(&host, "s", b"abc");
    let d = dispatch(&fx.repo, &host, &Operation::default()).unwrap();
    assert!(matches!(
        d,
        Dispatch::Processed(ref r) if matches!(r.report, OperationReport::Listed)
    ));
    assert_eq!(fx.repo.stream_bytes(&host, "s").unwrap(), b"abc");
}

#[test]
fn batch_continues_past_failures() {
    let fx = Fixture::new();
    let a = fx.host("a.txt", 1);
    let missing = fx.dir.path().join("missing.txt");
    let b = fx.host("b.txt", 1);
    fx.repo.insert(&a, "s", b"1");
    fx.repo.insert(&b, "s", b"2");
    let hosts = vec![a.clone(), missing.clone(), fx.dir.path().to_path_buf(), b.clone()];

    let op = Operation::Extract(ExtractOptions {
        output_dir: fx.out_dir(),
    });
    let results = dispatch_batch(&fx.repo, &hosts, &op);
    assert_eq!(results.len(), 4);
    assert!(results[0].1.is_ok());
    assert!(results[1].1.as_ref().unwrap_err().is_not_found());
    assert!(matches!(results[2].1, Ok(Dispatch::SkippedDirectory(_))));
    assert!(results[3].1.is_ok());
    assert!(fx.out_dir().join("a.txt_s").is_file());
    assert!(fx.out_dir().join("b.txt_s").is_file());
}

#[test]
fn add_then_list_shows_new_stream() {
    let fx = Fixture::new();
    let host = fx.host("doc.txt", 5);
    let src = fx.source("extra.dat", b"12345678");
    dispatch(&fx.repo, &host, &Operation::Add { source: src }).unwrap();

    let Dispatch::Processed(r) = dispatch(&fx.repo, &host, &Operation::List).unwrap() else {
        panic!("host was skipped");
    };
    assert!(r.streams.iter().any(|s| s.name == "extra.dat" && s.length == 8));
}
