use pagetools::templating::{CONTENT_KEY, PATH_KEY, RenderData, TITLE_KEY};
use serde_json::json;

#[test]
fn test_user_values() {
    let mut data = RenderData::new();
    data.insert("user", "ada");
    data.insert("count", 3);
    assert_eq!(data.get_str("user"), Some("ada"));
    assert_eq!(data.get("count"), Some(&json!(3)));
    assert!(data.contains_key("user"));
    assert_eq!(data.remove("user"), Some(json!("ada")));
    assert!(!data.contains_key("user"));
}

#[test]
fn test_reserved_keys_read_back() {
    let mut data = RenderData::new();
    data.insert(CONTENT_KEY, "<p>hi</p>");
    data.insert(PATH_KEY, "about");
    data.insert(TITLE_KEY, "About");
    assert_eq!(data.content(), Some("<p>hi</p>"));
    assert_eq!(data.path(), Some("about"));
    assert_eq!(data.title(), Some("About"));
}

#[test]
fn test_context_contains_values() {
    let data = RenderData::from_json(json!({"post": {"slug": "hello"}})).unwrap();
    let context = data.to_context();
    assert_eq!(context.get("post"), Some(&json!({"slug": "hello"})));
}
