// SPDX-License-Identifier: MPL-2.0
use cat_gallery::app::config::{self, Config};
use cat_gallery::i18n::fluent::I18n;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::tempdir;

fn message_ids(locale: &str) -> BTreeSet<String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("assets/i18n")
        .join(format!("{locale}.ftl"));
    let content = std::fs::read_to_string(&path).expect("Failed to read ftl file");
    content
        .lines()
        .filter(|line| line.starts_with(|c: char| c.is_ascii_lowercase()))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim().to_string())
        .collect()
}

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");
    assert_eq!(i18n_en.tr("tab-favourites"), "Favourites");

    let mut french_config = loaded_initial_config;
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn cli_language_overrides_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());

    let i18n = I18n::new(Some("en-US".to_string()), &config);

    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn api_key_from_settings_file_is_loaded() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[api]\napi_key = \"live_test\"\nvotes_limit = 50\n",
    )
    .expect("Failed to write settings file");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert!(warning.is_none());
    assert_eq!(config.api.api_key.as_deref(), Some("live_test"));
    assert_eq!(config.api.vote_query().limit, Some(50));
}

#[test]
fn every_locale_defines_the_same_messages() {
    let english = message_ids("en-US");
    let french = message_ids("fr");

    assert!(!english.is_empty());
    assert_eq!(
        english.symmetric_difference(&french).collect::<Vec<_>>(),
        Vec::<&String>::new()
    );
}
