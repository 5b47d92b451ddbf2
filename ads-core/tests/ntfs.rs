//! Runs against the real filesystem; the temp directory must be on NTFS.
#![cfg(windows)]

use ads_core::repo_ntfs::{NtfsStreamRepo, stream_path};
use ads_core::{
    AddOutcome, ExtractOptions, ExtractOutcome, add_stream, extract_streams, list_streams,
    remove_streams,
};

#[test]
fn round_trip_on_ntfs() {
    let dir = tempfile::tempdir().unwrap();
    let repo = NtfsStreamRepo::new().unwrap();
    let host = dir.path().join("doc.txt");
    std::fs::write(&host, vec![b'x'; 500]).unwrap();

    let recs = list_streams(&repo, &host).unwrap();
    assert_eq!(recs.len(), 1);
    assert!(recs[0].is_primary);
    assert_eq!(recs[0].length, 500);

    let src = dir.path().join("secret.txt");
    std::fs::write(&src, vec![b's'; 120]).unwrap();
    let added = add_stream(&repo, &host, &src).unwrap();
    assert!(matches!(added, AddOutcome::Added { bytes: 120, .. }));
    assert_eq!(std::fs::read(stream_path(&host, "secret.txt")).unwrap().len(), 120);

    let out = dir.path().join("out");
    let ex = extract_streams(&repo, &host, &ExtractOptions { output_dir: out.clone() }).unwrap();
    assert!(matches!(ex.as_slice(), [ExtractOutcome::Extracted { bytes: 120, .. }]));
    assert!(out.join("doc.txt_secret.txt").is_file());

    remove_streams(&repo, &host, None).unwrap();
    assert_eq!(list_streams(&repo, &host).unwrap().len(), 1);
    assert_eq!(std::fs::read(&host).unwrap().len(), 500);
}
