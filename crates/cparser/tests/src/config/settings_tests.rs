use super::*;

fn unique_temp_dir(name: &str) -> PathBuf {
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("valid clock")
        .as_nanos();
    std::env::temp_dir().join(format!("cparser-config-{name}-{}-{nonce}", std::process::id()))
}

#[test]
fn empty_file_yields_defaults() {
    let settings = Settings::from_toml_str("").expect("empty config parses");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.compiler.command, "clang");
    assert_eq!(settings.compiler.language, "c++");
    assert_eq!(settings.server.address(), "127.0.0.1:25333");
    assert_eq!(settings.logging.level, LogLevel::Info);
}

#[test]
fn partial_sections_only_override_given_keys() {
    let settings = Settings::from_toml_str(
        r#"
        [compiler]
        command = "clang-18"
        strict = true
        include_paths = ["  /usr/local/include ", ""]

        [server]
        port = 4000

        [logging]
        level = "debug"
        "#,
    )
    .expect("valid config");

    assert_eq!(settings.compiler.command, "clang-18");
    assert!(settings.compiler.strict);
    assert_eq!(settings.compiler.include_paths, vec!["/usr/local/include".to_string()]);
    assert_eq!(settings.compiler.language, DEFAULT_LANGUAGE);
    assert_eq!(settings.server.host, DEFAULT_HOST);
    assert_eq!(settings.server.port, 4000);
    assert_eq!(settings.logging.level, LogLevel::Debug);
}

#[test]
fn unknown_keys_are_ignored() {
    let settings = Settings::from_toml_str(
        r#"
        future_option = 1

        [compiler]
        language = "C"
        standard = "  "
        experimental = "yes"
        "#,
    )
    .expect("unknown keys tolerated");

    assert_eq!(settings.compiler.language, "c");
    assert_eq!(settings.compiler.standard, None);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        [compiler]
        command = " "

        [server]
        host = ""
        "#,
    )
    .expect("valid config");

    assert_eq!(settings.compiler.command, DEFAULT_COMPILER_COMMAND);
    assert_eq!(settings.server.host, DEFAULT_HOST);
}

#[test]
fn wrong_types_are_reported() {
    let error = Settings::from_toml_str("[server]\nport = \"high\"\n").expect_err("port must be a number");
    assert!(error.to_string().starts_with("invalid configuration"), "got {error}");
}

#[test]
fn load_discovers_config_in_ancestor_directory() {
    let root = unique_temp_dir("discover");
    let nested = root.join("a/b");
    std::fs::create_dir_all(&nested).expect("create nested dirs");
    std::fs::write(root.join(CONFIG_FILENAME), "[server]\nport = 9000\n").expect("write config");

    let (settings, path) = Settings::load(None, &nested).expect("discovered config loads");
    assert_eq!(settings.server.port, 9000);
    assert_eq!(path, Some(root.join(CONFIG_FILENAME)));

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn load_without_any_file_uses_defaults() {
    let root = unique_temp_dir("none");
    std::fs::create_dir_all(&root).expect("create dir");

    // An ancestor of the temp dir could carry a stray config; only assert
    // the explicit-miss behaviour when nothing was found.
    if find_config_file(&root).is_none() {
        let (settings, path) = Settings::load(None, &root).expect("defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(path, None);
    }

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let missing = unique_temp_dir("missing").join(CONFIG_FILENAME);
    let error = Settings::load(Some(&missing), Path::new(".")).expect_err("missing explicit config");
    assert!(matches!(error, ConfigError::Unreadable { .. }), "got {error:?}");
}

#[test]
fn invalid_file_error_names_the_file() {
    let root = unique_temp_dir("invalid");
    std::fs::create_dir_all(&root).expect("create dir");
    let path = root.join(CONFIG_FILENAME);
    std::fs::write(&path, "[compiler\n").expect("write config");

    let error = Settings::load(Some(&path), &root).expect_err("broken toml");
    assert!(error.to_string().contains(&path.display().to_string()), "got {error}");

    let _ = std::fs::remove_dir_all(root);
}
