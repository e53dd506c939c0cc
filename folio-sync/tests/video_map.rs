mod common;

use std::collections::BTreeMap;
use std::fs;

use folio_core::{CategoryMap, CoreError};
use folio_sync::{build_video_map, BuildOptions, SyncError, VideoMap, WriteResult};
use tempfile::TempDir;

use common::{query, video, StaticSource};

#[test]
fn writes_grouped_map_and_skips_identical_rewrite() {
    let tmp = TempDir::new().expect("tmp");
    let dir = tmp.path().join("library");
    let source = StaticSource::new(vec![
        video("fl34_31kfQ", "AD"),
        video("dQw4w9WgXcQ", "AF"),
        video("M7lc1UVf-VE", "AD"),
    ]);
    let opts = BuildOptions::new(query(), &dir);

    let (map, result) = build_video_map(&opts, &source, &CategoryMap::default()).expect("build");

    assert!(matches!(result, WriteResult::Written { .. }));
    assert_eq!(map["Philosophical Reasoning"].len(), 2);
    assert_eq!(map["Paranormal Abilities"].len(), 1);
    let on_disk: VideoMap =
        serde_json::from_str(&fs::read_to_string(dir.join("videos.json")).expect("read"))
            .expect("parse");
    assert_eq!(on_disk, map);

    let (_, again) = build_video_map(&opts, &source, &CategoryMap::default()).expect("rebuild");
    assert!(matches!(again, WriteResult::Unchanged { .. }));
}

#[test]
fn custom_category_table_is_used() {
    let tmp = TempDir::new().expect("tmp");
    let source = StaticSource::new(vec![video("fl34_31kfQ", "ZZ")]);
    let table = CategoryMap::new(BTreeMap::from([("ZZ".to_string(), "Misc".to_string())]));

    let (map, _) = build_video_map(&BuildOptions::new(query(), tmp.path()), &source, &table)
        .expect("build");

    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["Misc"]);
}

#[test]
fn unknown_category_fails_without_writing() {
    let tmp = TempDir::new().expect("tmp");
    let dir = tmp.path().join("library");
    let source = StaticSource::new(vec![video("fl34_31kfQ", "AD"), video("x", "QQ")]);

    let err = build_video_map(&BuildOptions::new(query(), &dir), &source, &CategoryMap::default())
        .unwrap_err();

    assert!(
        matches!(err, SyncError::Core(CoreError::CategoryNotFound { ref code }) if code == "QQ"),
        "got: {err}"
    );
    assert!(!dir.join("videos.json").exists());
}

#[test]
fn dry_run_compares_against_disk() {
    let tmp = TempDir::new().expect("tmp");
    let dir = tmp.path().join("library");
    let source = StaticSource::new(vec![video("fl34_31kfQ", "AD")]);
    let mut opts = BuildOptions::new(query(), &dir);
    opts.dry_run = true;

    let (_, fresh) = build_video_map(&opts, &source, &CategoryMap::default()).expect("dry run");
    assert_eq!(
        fresh,
        WriteResult::WouldWrite {
            path: dir.join("videos.json")
        }
    );
    assert!(!dir.exists());

    opts.dry_run = false;
    build_video_map(&opts, &source, &CategoryMap::default()).expect("build");
    opts.dry_run = true;
    let (_, clean) = build_video_map(&opts, &source, &CategoryMap::default()).expect("dry run");
    assert!(matches!(clean, WriteResult::Unchanged { .. }));

    source.set(vec![video("fl34_31kfQ", "AF")]);
    let before = fs::read(dir.join("videos.json")).expect("read");
    let (_, pending) = build_video_map(&opts, &source, &CategoryMap::default()).expect("dry run");
    assert!(matches!(pending, WriteResult::WouldWrite { .. }));
    assert_eq!(fs::read(dir.join("videos.json")).expect("read"), before);
}
