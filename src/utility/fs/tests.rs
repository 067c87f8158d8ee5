// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_file_async, ensure_dir_async, remove_dir_all_async};
use super::walk::{WalkOptions, pruned_walk};
use crate::error::FsError;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

#[test]
fn test_pruned_walk_order() {
    let temp = temp_dir();
    let root = temp.path();
    std::fs::write(root.join("a.txt"), "").unwrap();
    std::fs::create_dir_all(root.join("obj/Debug")).unwrap();
    std::fs::write(root.join("obj/Debug/x.o"), "").unwrap();
    std::fs::create_dir(root.join("src")).unwrap();
    std::fs::write(root.join("src/b.txt"), "").unwrap();

    let mut walk = pruned_walk(root, &WalkOptions::default(), |entry, _| {
        entry.file_name() != "obj"
    });

    let mut events = Vec::new();
    while let Some(entry) = walk.next() {
        for pruned in walk.drain_pruned() {
            events.push(format!("-{}", relative(root, pruned.path())));
        }
        let entry = entry.unwrap();
        events.push(format!("+{}", relative(root, entry.path())));
    }

    insta::assert_snapshot!(events.join(" "), @"+ +a.txt -obj +src +src/b.txt");
}

#[test]
fn test_pruned_walk_reports_directory_flag() {
    let temp = temp_dir();
    let root = temp.path();
    std::fs::create_dir(root.join("build")).unwrap();
    std::fs::write(root.join("notes.tmp"), "").unwrap();

    let mut walk = pruned_walk(root, &WalkOptions::default(), |_, _| false);
    let mut pruned = Vec::new();
    while let Some(entry) = walk.next() {
        entry.unwrap();
        pruned.extend(walk.drain_pruned());
    }
    // Nothing follows the last pruned entry, so drain once more.
    pruned.extend(walk.drain_pruned());

    let flags: Vec<(String, bool)> = pruned
        .iter()
        .map(|p| (relative(root, p.path()), p.is_dir()))
        .collect();
    assert_eq!(
        flags,
        vec![("build".to_string(), true), ("notes.tmp".to_string(), false)]
    );
}

#[tokio::test]
async fn test_copy_file_overwrites_read_only_destination() {
    let temp = temp_dir();
    let src = temp.path().join("src.xml");
    let dst = temp.path().join("dst.xml");
    std::fs::write(&src, "<new/>").unwrap();
    std::fs::write(&dst, "<old/>").unwrap();
    let mut perms = std::fs::metadata(&dst).unwrap().permissions();
    perms.set_readonly(true);
    std::fs::set_permissions(&dst, perms).unwrap();

    let bytes = copy_file_async(&src, &dst).await.unwrap();
    assert_eq!(bytes, 6);
    assert_eq!(std::fs::read_to_string(&dst).unwrap(), "<new/>");
}

#[tokio::test]
async fn test_copy_file_missing_source() {
    let temp = temp_dir();
    let err = copy_file_async(&temp.path().join("gone"), &temp.path().join("dst"))
        .await
        .unwrap_err();
    assert!(matches!(err, FsError::NotFound(_)));
    assert_eq!(Path::new(err.path()), temp.path().join("gone"));
}

#[tokio::test]
async fn test_copy_file_error_names_destination() {
    let temp = temp_dir();
    let src = temp.path().join("About.xml");
    std::fs::write(&src, "<ModMetaData/>").unwrap();
    let dst = temp.path().join("missing/About.xml");

    let err = copy_file_async(&src, &dst).await.unwrap_err();
    assert_eq!(Path::new(err.path()), dst);
}

#[test]
fn test_pruned_walk_unsorted_visits_everything() {
    let temp = temp_dir();
    let root = temp.path();
    std::fs::create_dir_all(root.join("a/b")).unwrap();
    std::fs::write(root.join("a/b/deep.txt"), "").unwrap();
    std::fs::write(root.join("top.txt"), "").unwrap();

    let options = WalkOptions::builder().with_sorted(false).build();
    let count = pruned_walk(root, &options, |_, _| true).count();
    // root, a, a/b, a/b/deep.txt, top.txt
    assert_eq!(count, 5);
}

#[tokio::test]
async fn test_ensure_dir_creates_parents() {
    let temp = temp_dir();
    let dir = temp.path().join("Mods/MyMod/About");
    ensure_dir_async(&dir).await.unwrap();
    assert!(dir.is_dir());
    // Idempotent
    ensure_dir_async(&dir).await.unwrap();
}

#[tokio::test]
async fn test_ensure_dir_blocked_by_file() {
    let temp = temp_dir();
    std::fs::write(temp.path().join("About"), "").unwrap();
    assert!(ensure_dir_async(&temp.path().join("About/Preview")).await.is_err());
}

#[tokio::test]
async fn test_remove_dir_all_tolerates_missing() {
    let temp = temp_dir();
    let dir = temp.path().join("Mods/Old");
    remove_dir_all_async(&dir).await.unwrap();

    std::fs::create_dir_all(dir.join("Defs")).unwrap();
    std::fs::write(dir.join("Defs/a.xml"), "").unwrap();
    remove_dir_all_async(&dir).await.unwrap();
    assert!(!dir.exists());
}
