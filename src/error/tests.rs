// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;

use super::{FsError, PatternError, RimpubError, RimpubResult, ScaffoldError, bail_out};

#[test]
fn test_pattern_error_display() {
    let err = PatternError::InvalidPattern {
        origin: ".rimpub-ignore".to_string(),
        line: 3,
        pattern: "!".to_string(),
        reason: "empty negation".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"invalid pattern '!' at .rimpub-ignore:3: empty negation");
}

#[test]
fn test_scaffold_error_display() {
    let err = ScaffoldError::FileExists {
        path: "mod/.rimpub-ignore".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"file already exists: mod/.rimpub-ignore (pass --force to overwrite)");
}

#[test]
fn test_boxed_conversion() {
    let err: RimpubError = ScaffoldError::FileExists {
        path: "x".to_string(),
    }
    .into();
    assert!(matches!(err, RimpubError::Scaffold(_)));

    let bailed = bail_out("3 entries failed");
    insta::assert_snapshot!(bailed.to_string(), @"fatal error: 3 entries failed");
}

#[test]
fn test_fs_error_classification() {
    let path = Path::new("About/About.xml");
    let not_found = FsError::from_io(path, std::io::Error::from(std::io::ErrorKind::NotFound));
    assert!(matches!(not_found, FsError::NotFound(ref p) if p == "About/About.xml"));

    let denied = FsError::from_io(
        path,
        std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    );
    assert!(matches!(denied, FsError::PermissionDenied(_)));

    let other = FsError::from_io(path, std::io::Error::other("disk on fire"));
    assert!(matches!(other, FsError::IoError { .. }));
    assert_eq!(denied.path(), "About/About.xml");
    assert_eq!(other.path(), "About/About.xml");
}

#[test]
fn test_rimpub_error_size() {
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<RimpubError>();
    assert!(size <= 24, "RimpubError is {size} bytes, expected <= 24");
}

#[test]
fn test_rimpub_result_size() {
    let size = std::mem::size_of::<RimpubResult<()>>();
    assert!(size <= 24, "RimpubResult<()> is {size} bytes, expected <= 24");
}
