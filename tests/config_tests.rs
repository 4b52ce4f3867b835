use std::fs;

use rust_decimal_macros::dec;
use sprinkle::application::ConfirmationFailurePolicy;
use sprinkle::domain::units::gwei;
use sprinkle::error::{ConfigError, Error};
use sprinkle::infrastructure::config::settings::Config;

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("sprinkle.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

fn with_secrets(mut config: Config) -> Config {
    config
        .apply_env(|name| match name {
            "RPC_URL" => Some("http://127.0.0.1:8545".into()),
            "CHAIN_ID" => Some("31337".into()),
            "PRIVATE_KEY" => Some(r#"["0xaa", "0xbb"]"#.into()),
            _ => None,
        })
        .unwrap();
    config
}

#[test]
fn file_settings_become_a_wei_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[dispatch]
count = 50
min_amount_eth = "0.0000002"
max_amount_eth = "0.000002"
priority_fee_gwei = "1.5"
replacement_bump_gwei = "3"
receipt_timeout_secs = 30
on_confirmation_failure = "resync"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = with_secrets(Config::read(Some(&path)).unwrap());
    config.validate().unwrap();

    let policy = config.dispatch.policy().unwrap();
    assert_eq!(config.dispatch.count, Some(50));
    assert_eq!(policy.amounts.min, 200_000_000_000);
    assert_eq!(policy.amounts.max, 2_000_000_000_000);
    assert_eq!(policy.priority_fee, 1_500_000_000);
    assert_eq!(policy.replacement_bump, gwei(3));
    assert_eq!(policy.receipt_timeout.as_secs(), 30);
    assert_eq!(
        policy.on_confirmation_failure,
        ConfirmationFailurePolicy::Resync
    );
    assert_eq!(config.logging.format, "json");
}

#[test]
fn inverted_amount_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[dispatch]
min_amount_eth = "0.01"
max_amount_eth = "0.001"
"#,
    );

    let config = with_secrets(Config::read(Some(&path)).unwrap());
    let err = config.validate().unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "max_amount_eth",
            ..
        })
    ));
}

#[test]
fn transfers_above_one_ether_are_rejected() {
    let mut config = with_secrets(Config::default());
    config.dispatch.max_amount_eth = dec!(5);

    assert!(config.validate().is_err());
}

#[test]
fn non_http_endpoint_is_rejected() {
    let mut config = with_secrets(Config::default());
    config.network.rpc_url = Some("ws://127.0.0.1:8546".into());

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("RPC_URL"));
    assert!(err.is_startup_fatal());
}

#[test]
fn private_key_must_be_a_json_list() {
    let mut config = Config::default();
    let err = config
        .apply_env(|name| (name == "PRIVATE_KEY").then(|| "0xabc".to_string()))
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "PRIVATE_KEY",
            ..
        })
    ));
}

#[test]
fn unknown_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::read(Some(&dir.path().join("missing.toml"))).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn example_config_is_valid() {
    let example = include_str!("../sprinkle.toml.example");
    let config = with_secrets(Config::parse_toml(example).unwrap());

    config.validate().unwrap();
    assert_eq!(config.dispatch.count, None);
    assert_eq!(config.logging.level, "warn");
}
