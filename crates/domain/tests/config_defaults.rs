use parley_domain::config::Config;

#[test]
fn default_host_is_localhost() {
    let config = Config::default();
    assert_eq!(config.server.host, "127.0.0.1");
}

#[test]
fn default_store_is_unconfigured() {
    let config = Config::default();
    assert!(!config.store.is_configured());
}

#[test]
fn default_cors_allows_only_localhost() {
    let config = Config::default();
    assert!(config
        .server
        .cors
        .allowed_origins
        .contains(&"http://localhost:*".to_string()));
    assert!(config
        .server
        .cors
        .allowed_origins
        .contains(&"http://127.0.0.1:*".to_string()));
}

#[test]
fn empty_toml_uses_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.server.port, 3410);
    assert_eq!(config.collab.model, "gemini-1.5-flash");
    assert_eq!(config.store.table, "interviews");
    assert!(config.interview.greeting.starts_with("Hello!"));
}

#[test]
fn sections_parse_independently() {
    let toml_str = r#"
[server]
host = "0.0.0.0"

[store]
url = "https://example.supabase.co"

[interview]
temperature = 0.3
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 3410);
    assert!(config.store.is_configured());
    assert!((config.interview.temperature - 0.3).abs() < f32::EPSILON);
    assert_eq!(config.collab.timeout_ms, 30_000);
}

#[test]
fn collab_section_overrides_model() {
    let toml_str = r#"
[collab]
model = "gemini-2.0-flash"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.collab.model, "gemini-2.0-flash");
}
