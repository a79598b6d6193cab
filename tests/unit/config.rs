use pagetools::config::{DEFAULT_ULTIMATE_FAILURE, RenderConfig};
use pagetools::core::SetupError;
use pagetools::templating::Renderer;
use tempfile::TempDir;

#[test]
fn test_full_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pagetools.toml");
    std::fs::write(
        &path,
        r#"
page_dir = "site/pages"
standalone_dir = "site/partials"
inline_dir = "site/static"
delimiters = ["<%", "%>"]
ultimate_failure = "Gone fishing"
autoescape = false
dev_mode = true
"#,
    )
    .unwrap();

    let config = RenderConfig::load_from(&path).unwrap();
    assert_eq!(config.page_dir, Some(temp.path().join("site/pages")));
    assert_eq!(config.standalone_dir, Some(temp.path().join("site/partials")));
    assert_eq!(config.inline_dir, Some(temp.path().join("site/static")));
    assert_eq!(config.delimiters, Some(("<%".to_string(), "%>".to_string())));
    assert_eq!(config.ultimate_failure_bytes(), b"Gone fishing");
    assert!(!config.autoescape);
    assert!(config.is_dev());
}

#[test]
fn test_empty_config_is_default() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("pagetools.toml");
    std::fs::write(&path, "").unwrap();

    let config = RenderConfig::load_from(&path).unwrap();
    assert!(config.autoescape);
    assert!(!config.is_dev());
    assert_eq!(config.ultimate_failure_bytes(), DEFAULT_ULTIMATE_FAILURE.as_bytes());
}

#[test]
fn test_unknown_directory_fails_setup() {
    let config = RenderConfig::default().with_page_dir("/nonexistent/pagetools/pages");
    let err = Renderer::setup(config).unwrap_err();
    assert!(matches!(err, SetupError::Walk { .. }));
}

#[test]
fn test_invalid_delimiters_fail_setup() {
    let config = RenderConfig::default().with_delimiters("", "]]");
    let err = Renderer::setup(config).unwrap_err();
    assert!(matches!(err, SetupError::InvalidDelimiters { .. }));
}

#[test]
fn test_unterminated_delimiter_fails_setup() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("page.html"), "Hello [[ name").unwrap();

    let config = RenderConfig::default().with_page_dir(temp.path()).with_delimiters("[[", "]]");
    let err = Renderer::setup(config).unwrap_err();
    assert!(matches!(err, SetupError::UnterminatedDelimiter { .. }));
}

#[test]
fn test_renderer_without_directories() {
    let renderer = Renderer::setup(RenderConfig::default()).unwrap();
    assert_eq!(renderer.page_names().count(), 0);
    assert_eq!(renderer.standalone_names().count(), 0);
}
