use std::{collections::HashMap, fs};

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn defaults_match_the_classic_port() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8888");
    assert_eq!(settings.dice_seed, None);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let overrides = read_file_overrides(&dir.path().join(CONFIG_FILE)).expect("read");
    assert!(overrides.is_none());
}

#[test]
fn file_values_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "bind_addr = \"0.0.0.0:9000\"\ndice_seed = 42\nlog_filter = \"debug\"\n",
    )
    .expect("write");

    let table = read_file_overrides(&path).expect("read").expect("table");
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, &table);

    assert_eq!(
        settings,
        Settings {
            server_bind: "0.0.0.0:9000".into(),
            dice_seed: Some(42),
            log_filter: "debug".into(),
        }
    );
}

#[test]
fn quoted_seed_in_file_is_accepted() {
    let table: toml::Table = toml::from_str("dice_seed = \"7\"").expect("toml");
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, &table);
    assert_eq!(settings.dice_seed, Some(7));
}

#[test]
fn bad_file_values_keep_previous_settings() {
    let table: toml::Table =
        toml::from_str("dice_seed = \"lots\"\nbind_addr = [1, 2]").expect("toml");
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, &table);
    assert_eq!(settings, Settings::default());
}

#[test]
fn unparseable_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "bind_addr = ").expect("write");
    assert!(read_file_overrides(&path).is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain_names() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        env_of(&[
            ("SERVER_BIND", "127.0.0.1:1000"),
            ("APP__BIND_ADDR", "127.0.0.1:2000"),
            ("RUST_LOG", "warn"),
            ("APP__LOG_FILTER", "server=trace"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:2000");
    assert_eq!(settings.log_filter, "server=trace");
}

#[test]
fn env_seed_must_parse() {
    let mut settings = Settings {
        dice_seed: Some(3),
        ..Settings::default()
    };
    apply_env_overrides(&mut settings, env_of(&[("APP__DICE_SEED", "-5")]));
    assert_eq!(settings.dice_seed, Some(3));

    apply_env_overrides(&mut settings, env_of(&[("APP__DICE_SEED", " 99 ")]));
    assert_eq!(settings.dice_seed, Some(99));
}
