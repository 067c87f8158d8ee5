// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use super::loader::ConfigLoader;
use super::paths::{PathResolver, UnixSteamResolver, game_dir_in};
use super::project::{IGNORE_FILE_NAME, PROJECT_CONFIG_FILE_NAME, ProjectConfig};
use super::store::{CONFIG_HEADER, ensure_exists, load, save};
use super::{AppConfig, ConfigProblem};
use crate::error::ConfigError;

struct FixedResolver(Option<PathBuf>);

impl PathResolver for FixedResolver {
    fn steam_root(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

fn config_error(err: &anyhow::Error) -> &ConfigError {
    err.downcast_ref::<ConfigError>()
        .unwrap_or_else(|| panic!("expected a config error, got {err:?}"))
}

// --- AppConfig ---

#[test]
fn test_mods_dir_prefers_path_mods() {
    let mut config = AppConfig::default();
    assert_eq!(config.mods_dir(), None);

    config.path_game = Some(PathBuf::from("/games/RimWorld"));
    assert_eq!(config.mods_dir(), Some(PathBuf::from("/games/RimWorld/Mods")));

    config.path_mods = Some(PathBuf::from("/elsewhere/Mods"));
    assert_eq!(config.mods_dir(), Some(PathBuf::from("/elsewhere/Mods")));
}

#[test]
fn test_set_and_get() {
    let mut config = AppConfig::default();
    config.set("path_game", "/games/RimWorld").expect("set should succeed");
    config.set("no_ask", "yes").expect("set should succeed");
    config.set("build_hook", "  dotnet build  ").expect("set should succeed");

    assert_eq!(
        config.get("path_game").expect("known key").as_deref(),
        Some("/games/RimWorld")
    );
    assert_eq!(config.get("no_ask").expect("known key").as_deref(), Some("true"));
    assert_eq!(
        config.get("build_hook").expect("known key").as_deref(),
        Some("dotnet build")
    );
    assert_eq!(config.get("path_mods").expect("known key"), None);
}

#[test]
fn test_set_empty_value_unsets() {
    let mut config = AppConfig {
        path_mods: Some(PathBuf::from("/mods")),
        ..AppConfig::default()
    };
    config.set("path_mods", "").expect("set should succeed");
    assert_eq!(config.path_mods, None);
}

#[test]
fn test_set_rejects_bad_bool() {
    let mut config = AppConfig::default();
    let err = config.set("no_ask", "maybe").expect_err("should reject");
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "no_ask"));
    assert!(!config.no_ask);
}

#[test]
fn test_unknown_key() {
    let mut config = AppConfig::default();
    assert!(matches!(
        config.set("path_gmae", "/x"),
        Err(ConfigError::UnknownKey { .. })
    ));
    assert!(matches!(
        config.get("nope"),
        Err(ConfigError::UnknownKey { .. })
    ));
}

#[test]
fn test_check_reports_missing_dirs() {
    let config = AppConfig::default();
    assert_eq!(config.check(), vec![ConfigProblem::NoModsDir]);

    let game = PathBuf::from("/nonexistent/rimpub/RimWorld");
    let config = AppConfig {
        path_game: Some(game.clone()),
        ..AppConfig::default()
    };
    assert_eq!(
        config.check(),
        vec![
            ConfigProblem::GameDirMissing(game.clone()),
            ConfigProblem::ModsDirMissing(game.join("Mods")),
        ]
    );
}

#[test]
fn test_check_passes_with_existing_mods_dir() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::create_dir(temp.path().join("Mods")).expect("failed to create Mods");
    let config = AppConfig {
        path_game: Some(temp.path().to_path_buf()),
        ..AppConfig::default()
    };
    assert!(config.check().is_empty());
}

#[test]
fn test_format_options() {
    let config = AppConfig {
        path_game: Some(PathBuf::from("/games/RimWorld")),
        ..AppConfig::default()
    };
    assert_eq!(
        config.format_options(),
        vec![
            "path_mods  = ",
            "path_game  = /games/RimWorld",
            "no_ask     = false",
            "build_hook = ",
        ]
    );
}

// --- store ---

#[test]
fn test_save_writes_header_and_loads_back() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("nested").join("Config.toml");
    let config = AppConfig {
        path_game: Some(PathBuf::from("/games/RimWorld")),
        no_ask: true,
        ..AppConfig::default()
    };

    save(&config, &path).expect("save should succeed");

    let content = std::fs::read_to_string(&path).expect("config should exist");
    assert_eq!(content.lines().next(), Some(CONFIG_HEADER));
    assert!(!content.contains("path_mods"), "unset keys are omitted");

    let loaded = load(&path, &[]).expect("load should succeed");
    assert_eq!(loaded.path_game, config.path_game);
    assert!(loaded.no_ask);
}

#[test]
fn test_load_applies_overrides() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("Config.toml");
    std::fs::write(&path, "path_game = \"/games/RimWorld\"\n").expect("failed to write config");

    let overrides = vec![("path_mods".to_string(), "/custom/Mods".to_string())];
    let config = load(&path, &overrides).expect("load should succeed");
    assert_eq!(config.mods_dir(), Some(PathBuf::from("/custom/Mods")));
}

#[test]
fn test_load_rejects_unknown_override() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let overrides = vec![("colour".to_string(), "blue".to_string())];
    let err = load(&temp.path().join("Config.toml"), &overrides).expect_err("should fail");
    assert!(matches!(config_error(&err), ConfigError::UnknownKey { key } if key == "colour"));
}

#[test]
fn test_load_rejects_invalid_toml() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("Config.toml");
    std::fs::write(&path, "path_game = [unclosed").expect("failed to write config");
    assert!(load(&path, &[]).is_err());
}

#[test]
fn test_ensure_exists_seeds_game_dir() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let steam = temp.path().join("steam");
    let game = game_dir_in(&steam);
    std::fs::create_dir_all(&game).expect("failed to create game dir");
    let path = temp.path().join(".rimpub").join("Config.toml");

    let created = ensure_exists(&path, &FixedResolver(Some(steam))).expect("should succeed");
    assert!(created);
    let config = load(&path, &[]).expect("load should succeed");
    assert_eq!(config.path_game, Some(game));

    let created = ensure_exists(&path, &FixedResolver(None)).expect("should succeed");
    assert!(!created, "existing config is left alone");
}

#[test]
fn test_ensure_exists_without_game() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("Config.toml");
    ensure_exists(&path, &FixedResolver(None)).expect("should succeed");
    let content = std::fs::read_to_string(&path).expect("config should exist");
    assert!(!content.contains("path_game"));
}

// --- ConfigLoader ---

#[test]
fn test_config_loader_with_env_prefix() {
    // SAFETY: the variable name is unique to this test
    unsafe {
        std::env::set_var("RIMPUBLOADERTEST_NO_ASK", "true");
    }

    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let path = temp.path().join("Config.toml");
    std::fs::write(&path, "no_ask = false\npath_game = \"/games/RimWorld\"\n")
        .expect("failed to write file");

    let config: AppConfig = ConfigLoader::new()
        .add_toml_file_optional(&path)
        .with_env_prefix("RIMPUBLOADERTEST")
        .build_as()
        .expect("build should succeed");

    assert!(config.no_ask, "env should override the file");
    assert_eq!(config.path_game, Some(PathBuf::from("/games/RimWorld")));

    // SAFETY: see above
    unsafe {
        std::env::remove_var("RIMPUBLOADERTEST_NO_ASK");
    }
}

#[test]
fn test_config_loader_tracks_files() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let present = temp.path().join("present.toml");
    std::fs::write(&present, "").expect("failed to write file");

    let loader = ConfigLoader::new()
        .add_toml_file_optional(&present)
        .add_toml_file_optional(temp.path().join("absent.toml"));
    assert_eq!(
        loader.format_loaded_files(),
        vec![format!("1. [optional] {}", present.display())]
    );
}

// --- paths ---

#[test]
fn test_game_dir_in() {
    assert_eq!(
        game_dir_in(Path::new("/steam")),
        PathBuf::from("/steam/steamapps/common/RimWorld")
    );
}

#[test]
fn test_unix_resolver_finds_installed_game() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let resolver = UnixSteamResolver::with_home(temp.path());
    assert_eq!(resolver.steam_root(), None);
    assert_eq!(resolver.game_dir(), None);

    let steam = temp.path().join(".local/share/Steam");
    std::fs::create_dir_all(&steam).expect("failed to create steam dir");
    assert_eq!(resolver.steam_root(), Some(steam.clone()));
    assert_eq!(resolver.game_dir(), None, "Steam without the game");

    std::fs::create_dir_all(game_dir_in(&steam)).expect("failed to create game dir");
    assert_eq!(resolver.game_dir(), Some(game_dir_in(&steam)));
}

// --- ProjectConfig ---

#[test]
fn test_project_defaults_without_file() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let project = ProjectConfig::load(temp.path()).expect("load should succeed");
    assert_eq!(project, ProjectConfig::default());
    assert_eq!(project.ignore_file, PathBuf::from(IGNORE_FILE_NAME));
    assert!(project.respect_gitignore);
}

#[test]
fn test_project_load_and_name() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let source = temp.path().join("MyMod");
    std::fs::create_dir(&source).expect("failed to create source");

    let project = ProjectConfig::load(&source).expect("load should succeed");
    assert_eq!(project.resolve_name(&source).expect("has a name"), "MyMod");

    std::fs::write(source.join(PROJECT_CONFIG_FILE_NAME), "name = \"Renamed\"\n")
        .expect("failed to write project config");
    let project = ProjectConfig::load(&source).expect("load should succeed");
    assert_eq!(project.resolve_name(&source).expect("has a name"), "Renamed");
}

#[test]
fn test_project_rejects_unknown_keys() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join(PROJECT_CONFIG_FILE_NAME), "nmae = \"typo\"\n")
        .expect("failed to write project config");
    assert!(ProjectConfig::load(temp.path()).is_err());
}

#[test]
fn test_project_rules_layering() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join(".gitignore"), "obj/\n").expect("failed to write");
    std::fs::write(temp.path().join(IGNORE_FILE_NAME), "*.pdb\n").expect("failed to write");

    let rules = ProjectConfig::default()
        .rules(temp.path())
        .expect("rules should build");
    assert!(rules.is_ignored(".git", true));
    assert!(rules.is_ignored("obj", true));
    assert!(rules.is_ignored("Assemblies/Mod.pdb", false));
    assert!(!rules.is_ignored("Assemblies/Mod.dll", false));

    let project = ProjectConfig {
        respect_gitignore: false,
        ..ProjectConfig::default()
    };
    let rules = project.rules(temp.path()).expect("rules should build");
    assert!(!rules.is_ignored("obj", true));
    assert!(rules.is_ignored("Assemblies/Mod.pdb", false));
}

#[test]
fn test_project_renamed_ignore_file_is_not_published() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join("publish-ignore.txt"), "*.tmp\n").expect("failed to write");

    let project = ProjectConfig {
        ignore_file: PathBuf::from("publish-ignore.txt"),
        ..ProjectConfig::default()
    };
    let rules = project.rules(temp.path()).expect("rules should build");
    assert!(rules.is_ignored("publish-ignore.txt", false));
    assert!(rules.is_ignored("scratch.tmp", false));
    // Copies in subdirectories are rule files too.
    assert!(rules.is_ignored("Defs/publish-ignore.txt", false));
    assert_eq!(rules.nested_files(), [".gitignore", "publish-ignore.txt"]);
}

#[test]
fn test_project_ignore_file_in_subdirectory_is_root_only() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::create_dir(temp.path().join("build")).expect("failed to create dir");
    std::fs::write(temp.path().join("build/publish.ignore"), "*.tmp\n").expect("failed to write");

    let project = ProjectConfig {
        ignore_file: PathBuf::from("build/publish.ignore"),
        ..ProjectConfig::default()
    };
    let rules = project.rules(temp.path()).expect("rules should build");
    assert!(rules.is_ignored("build/publish.ignore", false));
    assert!(!rules.is_ignored("Defs/publish.ignore", false));
    assert_eq!(rules.nested_files(), [".gitignore"]);
}

#[test]
fn test_project_rules_read_git_info_exclude() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::create_dir_all(temp.path().join(".git/info")).expect("failed to create dir");
    std::fs::write(temp.path().join(".git/info/exclude"), "*.local\n").expect("failed to write");

    let rules = ProjectConfig::default()
        .rules(temp.path())
        .expect("rules should build");
    assert!(rules.is_ignored("Defs/test.local", false));

    let project = ProjectConfig {
        respect_gitignore: false,
        ..ProjectConfig::default()
    };
    let rules = project.rules(temp.path()).expect("rules should build");
    assert!(!rules.is_ignored("Defs/test.local", false));
    assert!(rules.nested_files().is_empty());
}

#[test]
fn test_project_rules_tolerate_git_file() {
    // Worktrees and submodules have a `.git` file instead of a directory.
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    std::fs::write(temp.path().join(".git"), "gitdir: ../.git/worktrees/x\n").expect("failed to write");

    let rules = ProjectConfig::default()
        .rules(temp.path())
        .expect("rules should build");
    assert!(rules.is_ignored(".git", false));
}

#[test]
fn test_project_build_hook_precedence() {
    let app = AppConfig {
        build_hook: Some("dotnet build".to_string()),
        ..AppConfig::default()
    };
    let project = ProjectConfig::default();
    assert_eq!(
        project.build_hook(&app).map(|h| h.command().to_string()),
        Some("dotnet build".to_string())
    );

    let project = ProjectConfig {
        build_hook: Some("./build.sh".to_string()),
        ..ProjectConfig::default()
    };
    assert_eq!(
        project.build_hook(&app).map(|h| h.command().to_string()),
        Some("./build.sh".to_string())
    );

    let project = ProjectConfig {
        build_hook: Some("   ".to_string()),
        ..ProjectConfig::default()
    };
    assert!(project.build_hook(&AppConfig::default()).is_none());
}
