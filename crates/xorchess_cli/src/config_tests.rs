use std::time::Duration;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!(config.search.max_depth, 6);
    assert_eq!(config.search.move_time_ms, 1000);
    assert_eq!(config.log_filter, "info");
    assert_eq!(
        config.limits(),
        SearchLimits::depth_and_time(6, Duration::from_millis(1000))
    );
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = EngineConfig::from_toml("[search]\nmax_depth = 9\n").expect("parse");
    assert_eq!(config.search.max_depth, 9);
    assert_eq!(config.search.move_time_ms, 1000);
    assert_eq!(config.log_filter, "info");
}

#[test]
fn test_full_toml() {
    let text = r#"
log_filter = "xorchess_core=debug"

[search]
max_depth = 4
move_time_ms = 0
"#;
    let config = EngineConfig::from_toml(text).expect("parse");
    assert_eq!(config.log_filter, "xorchess_core=debug");
    assert_eq!(config.limits(), SearchLimits::depth(4));
}

#[test]
fn test_unknown_key_rejected() {
    assert!(EngineConfig::from_toml("[search]\nmax_dpeth = 3\n").is_err());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    assert!(EngineConfig::load(Some(Path::new("/nonexistent/xorchess.toml"))).is_err());
}

#[test]
fn test_flags_override_file() {
    let cli = CliArgs::parse(&args(&["--depth", "3", "-t", "250", "--config", "x.toml"]))
        .expect("parse");
    assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    let mut config = EngineConfig::default();
    cli.apply(&mut config);
    assert_eq!(config.search.max_depth, 3);
    assert_eq!(config.search.move_time_ms, 250);
}

#[test]
fn test_bad_flags() {
    assert!(CliArgs::parse(&args(&["--depth"])).is_err());
    assert!(CliArgs::parse(&args(&["--depth", "deep"])).is_err());
    assert!(CliArgs::parse(&args(&["--frobnicate"])).is_err());
    assert!(CliArgs::parse(&args(&["-h"])).expect("help").help);
}
