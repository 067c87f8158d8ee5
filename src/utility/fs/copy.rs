// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::FsError;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Ensures `dir` exists as a directory, creating missing parents.
///
/// # Example
/// ```no_run
/// use rimpub::utility::fs::copy::ensure_dir_async;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), rimpub::error::FsError> {
/// ensure_dir_async(Path::new("/game/Mods/MyMod/About")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an `FsError` if the directory cannot be created or a file is in
/// the way.
pub async fn ensure_dir_async(dir: &Path) -> Result<(), FsError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| FsError::from_io(dir, e))
}

/// Copies one file's content and permissions, overwriting `dst`.
///
/// Game folders often carry read-only copies from an earlier publish; the
/// destination is made writable first so the overwrite succeeds.
///
/// # Example
/// ```no_run
/// use rimpub::utility::fs::copy::copy_file_async;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), rimpub::error::FsError> {
/// let bytes = copy_file_async(
///     Path::new("/dev/MyMod/About/About.xml"),
///     Path::new("/game/Mods/MyMod/About/About.xml"),
/// )
/// .await?;
/// println!("copied {bytes} bytes");
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an `FsError` whose path is `src` if reading failed and `dst` if
/// writing failed.
pub async fn copy_file_async(src: &Path, dst: &Path) -> Result<u64, FsError> {
    let read_err = |e| FsError::from_io(src, e);
    let write_err = |e| FsError::from_io(dst, e);

    let mut reader = fs::File::open(src).await.map_err(read_err)?;
    let permissions = reader.metadata().await.map_err(read_err)?.permissions();

    if let Ok(meta) = fs::symlink_metadata(dst).await
        && meta.is_file()
        && meta.permissions().readonly()
    {
        let mut perms = meta.permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        fs::set_permissions(dst, perms).await.map_err(write_err)?;
    }

    let mut writer = fs::File::create(dst).await.map_err(write_err)?;
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut bytes = 0u64;
    loop {
        let n = reader.read(&mut buf).await.map_err(read_err)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n]).await.map_err(write_err)?;
        bytes += n as u64;
    }
    writer.flush().await.map_err(write_err)?;
    drop(writer);

    fs::set_permissions(dst, permissions).await.map_err(write_err)?;
    Ok(bytes)
}

/// Removes `dir` and everything beneath it. A missing directory is fine.
///
/// # Errors
///
/// Returns an `FsError` if anything under `dir` cannot be removed.
pub async fn remove_dir_all_async(dir: &Path) -> Result<(), FsError> {
    match fs::remove_dir_all(dir).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::from_io(dir, e)),
    }
}
