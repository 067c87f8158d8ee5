// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game install detection.
//!
//! ```text
//! platform_resolver()
//!   Windows  WindowsRegistryResolver  HKCU\Software\Valve\Steam\SteamPath
//!   other    UnixSteamResolver        ~/.steam/steam, ~/.local/share/Steam, ...
//!        |
//!   steam_root() ──> <steam>/steamapps/common/RimWorld ──> game_dir()
//!                                                  /Mods ──> mods dir
//! ```

use std::path::{Path, PathBuf};
use tracing::debug;

/// Game folder below a Steam library root.
pub const STEAM_GAME_SEGMENTS: [&str; 3] = ["steamapps", "common", "RimWorld"];

/// Mods folder below the game folder.
pub const MODS_DIR_NAME: &str = "Mods";

/// Locates the Steam installation on the current machine.
pub trait PathResolver {
    /// Steam root directory, if Steam is installed.
    fn steam_root(&self) -> Option<PathBuf>;

    /// Game directory in the default Steam library, if it exists.
    fn game_dir(&self) -> Option<PathBuf> {
        let dir = game_dir_in(&self.steam_root()?);
        if dir.is_dir() {
            debug!(path = %dir.display(), "found game directory");
            Some(dir)
        } else {
            debug!(path = %dir.display(), "game not installed in default Steam library");
            None
        }
    }
}

/// `<steam>/steamapps/common/RimWorld`.
#[must_use]
pub fn game_dir_in(steam_root: &Path) -> PathBuf {
    STEAM_GAME_SEGMENTS
        .iter()
        .fold(steam_root.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Probes the usual Steam roots on Linux and macOS.
#[derive(Debug, Clone)]
pub struct UnixSteamResolver {
    home: Option<PathBuf>,
}

impl Default for UnixSteamResolver {
    fn default() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }
}

impl UnixSteamResolver {
    /// Resolver rooted at a specific home directory.
    #[must_use]
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    /// Candidate Steam roots, most common first.
    #[must_use]
    pub fn candidates(&self) -> Vec<PathBuf> {
        let Some(home) = &self.home else {
            return Vec::new();
        };
        [
            ".steam/steam",
            ".local/share/Steam",
            ".var/app/com.valvesoftware.Steam/.local/share/Steam",
            "Library/Application Support/Steam",
        ]
        .iter()
        .map(|rel| home.join(rel))
        .collect()
    }
}

impl PathResolver for UnixSteamResolver {
    fn steam_root(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|dir| dir.is_dir())
    }
}

/// Reads the Steam path Valve's installer writes to the registry.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRegistryResolver;

#[cfg(windows)]
impl PathResolver for WindowsRegistryResolver {
    fn steam_root(&self) -> Option<PathBuf> {
        use windows::Win32::System::Registry::{HKEY_CURRENT_USER, RRF_RT_REG_SZ, RegGetValueW};
        use windows::core::w;

        let mut size: u32 = 0;
        // SAFETY: a null data pointer only queries the required size in bytes
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                w!("Software\\Valve\\Steam"),
                w!("SteamPath"),
                RRF_RT_REG_SZ,
                None,
                None,
                Some(&raw mut size),
            )
        };
        if status.is_err() || size == 0 {
            debug!("SteamPath not found in registry");
            return None;
        }

        let mut buffer = vec![0u16; (size as usize).div_ceil(2)];
        // SAFETY: buffer holds at least `size` bytes
        let status = unsafe {
            RegGetValueW(
                HKEY_CURRENT_USER,
                w!("Software\\Valve\\Steam"),
                w!("SteamPath"),
                RRF_RT_REG_SZ,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&raw mut size),
            )
        };
        if status.is_err() {
            return None;
        }

        let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
        let root = PathBuf::from(String::from_utf16_lossy(&buffer[..len]));
        root.is_dir().then_some(root)
    }
}

/// The resolver for the platform rimpub was built for.
#[must_use]
pub fn platform_resolver() -> Box<dyn PathResolver> {
    #[cfg(windows)]
    {
        Box::new(WindowsRegistryResolver)
    }
    #[cfg(not(windows))]
    {
        Box::new(UnixSteamResolver::default())
    }
}
