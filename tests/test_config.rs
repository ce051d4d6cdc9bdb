use beacon::config::Config;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "0.0.0.0:4221");
    assert_eq!(cfg.directory, None);
    assert_eq!(cfg.read_timeout(), Duration::from_secs(10));
    assert_eq!(cfg.write_timeout(), Duration::from_secs(10));
    assert!(!cfg.legacy_framing);
}

#[test]
fn test_config_env_overrides() {
    let cfg = Config::default().apply_env_from(|key| match key {
        "LISTEN" => Some("127.0.0.1:3000".to_string()),
        "BEACON_DIRECTORY" => Some("/tmp/data/".to_string()),
        _ => None,
    });

    assert_eq!(cfg.listen_addr, "127.0.0.1:3000");
    assert_eq!(cfg.directory, Some(PathBuf::from("/tmp/data/")));
}

#[test]
fn test_config_env_absent_keeps_values() {
    let cfg = Config::default().apply_env_from(|_| None);

    assert_eq!(cfg, Config::default());
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml_str("directory: /srv/files\nread_timeout_secs: 2\n").unwrap();

    assert_eq!(cfg.directory, Some(PathBuf::from("/srv/files")));
    assert_eq!(cfg.read_timeout(), Duration::from_secs(2));
    assert_eq!(cfg.listen_addr, "0.0.0.0:4221");
}

#[test]
fn test_config_from_yaml_full() {
    let yaml = r#"
listen_addr: "127.0.0.1:9000"
directory: /tmp/x
read_timeout_secs: 1
write_timeout_secs: 3
max_request_bytes: 2048
legacy_framing: true
"#;
    let cfg = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:9000");
    assert_eq!(cfg.write_timeout(), Duration::from_secs(3));
    assert_eq!(cfg.max_request_bytes, 2048);
    assert!(cfg.legacy_framing);
}

#[test]
fn test_config_from_yaml_rejects_bad_types() {
    assert!(Config::from_yaml_str("read_timeout_secs: soon\n").is_err());
}

#[test]
fn test_config_from_missing_file() {
    let path = std::env::temp_dir().join("beacon-config-does-not-exist.yaml");

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1, cfg2);
}

#[test]
fn test_config_load_from_file() {
    let path = std::env::temp_dir().join(format!("beacon-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "read_timeout_secs: 7\nmax_request_bytes: 512\n").unwrap();

    let cfg = Config::load(Some(&path)).unwrap();
    assert_eq!(cfg.read_timeout(), Duration::from_secs(7));
    assert_eq!(cfg.max_request_bytes, 512);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_config_load_without_file_uses_defaults() {
    let cfg = Config::load(None).unwrap();

    assert_eq!(cfg.read_timeout(), Config::default().read_timeout());
    assert!(!cfg.legacy_framing);
}

#[test]
fn test_config_load_missing_file_is_error() {
    let path = std::env::temp_dir().join("beacon-config-does-not-exist.yaml");

    assert!(Config::load(Some(&path)).is_err());
}
