use std::io::Write;
use tempfile::NamedTempFile;

use corsgate_lib::config::{load_from_path, OriginPolicy};

fn write_config(toml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    write!(file, "{toml}").expect("write temp config");
    file
}

#[test]
fn loads_minimal_config() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = write_config(
        r#"
[upstream]
url = "https://backend.example.com"
"#,
    );

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.listen.to_string(), "127.0.0.1:8080");
    assert_eq!(cfg.upstream.url, "https://backend.example.com");
    assert_eq!(cfg.origin_policy, OriginPolicy::LocalhostOnly);
    assert!(cfg.cookie_rewrite);
    assert_eq!(cfg.timeout.upstream_secs, 30);
    assert_eq!(cfg.cors.allowed_methods, ["GET", "POST", "PUT", "DELETE", "OPTIONS"]);
    assert_eq!(
        cfg.cors.allowed_headers,
        ["Content-Type", "Authorization", "X-Requested-With"]
    );
    Ok(())
}

#[test]
fn loads_full_config() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = write_config(
        r#"
listen = "127.0.0.1:0"
origin_policy = "permissive"
cookie_rewrite = false

[upstream]
url = "http://10.0.0.5:8069"

[cors]
allowed_methods = ["GET", "POST"]
allowed_headers = ["Content-Type"]
fallback_origin = "http://localhost:50167"
max_age_secs = 600

[timeout]
upstream_secs = 5
shutdown_secs = 10

[pool]
idle_timeout = 30
pool_max_idle_per_host = 4

[logging]
level = "debug"
show_target = true
"#,
    );

    let cfg = load_from_path(file.path())?;
    assert_eq!(cfg.origin_policy, OriginPolicy::Permissive);
    assert!(!cfg.cookie_rewrite);
    assert_eq!(cfg.cors.allowed_methods, ["GET", "POST"]);
    assert_eq!(cfg.cors.fallback_origin.as_deref(), Some("http://localhost:50167"));
    assert_eq!(cfg.cors.max_age_secs, 600);
    assert_eq!(cfg.timeout.upstream_secs, 5);
    assert_eq!(cfg.timeout.shutdown_secs, 10);
    assert_eq!(cfg.pool.idle_timeout, 30);
    assert_eq!(cfg.pool.pool_max_idle_per_host, 4);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.show_target);
    Ok(())
}

#[test]
fn rejects_upstream_without_scheme() {
    let file = write_config(
        r#"
[upstream]
url = "backend.example.com:8069"
"#,
    );

    assert!(load_from_path(file.path()).is_err());
}

#[test]
fn rejects_upstream_with_path() {
    let file = write_config(
        r#"
[upstream]
url = "https://backend.example.com/api"
"#,
    );

    assert!(load_from_path(file.path()).is_err());
}

#[test]
fn rejects_non_http_scheme() {
    let file = write_config(
        r#"
[upstream]
url = "ftp://backend.example.com"
"#,
    );

    assert!(load_from_path(file.path()).is_err());
}

#[test]
fn rejects_zero_upstream_timeout() {
    let file = write_config(
        r#"
[upstream]
url = "https://backend.example.com"

[timeout]
upstream_secs = 0
"#,
    );

    assert!(load_from_path(file.path()).is_err());
}

#[test]
fn rejects_unknown_origin_policy() {
    let file = write_config(
        r#"
origin_policy = "open-bar"

[upstream]
url = "https://backend.example.com"
"#,
    );

    assert!(load_from_path(file.path()).is_err());
}
