use pagetools::templating::{
    LAYOUT_NAME, is_private, normalize_page_path, template_hierarchy,
};

#[test]
fn test_depth_plus_one_templates() {
    for (path, expected) in [("a", 2), ("a/b", 3), ("a/b/c", 4), ("a/b/c/d", 5)] {
        assert_eq!(template_hierarchy(path).len(), expected, "{path}");
    }
}

#[test]
fn test_root_layout_always_first() {
    for path in ["about", "blog/post", "x/y/z"] {
        assert_eq!(template_hierarchy(path)[0], LAYOUT_NAME);
    }
}

#[test]
fn test_every_layout_ends_with_index() {
    let chain = template_hierarchy("shop/items/red/shoe");
    let (page, layouts) = chain.split_last().unwrap();
    assert_eq!(page, "shop/items/red/shoe");
    assert!(layouts.iter().all(|name| name == "index" || name.ends_with("/index")));
}

#[test]
fn test_index_pages_are_not_repeated() {
    assert_eq!(template_hierarchy("b/index"), ["index", "b/index"]);
    assert_eq!(template_hierarchy("index"), ["index"]);
}

#[test]
fn test_index_only_matches_whole_segment() {
    assert_eq!(template_hierarchy("b/reindex"), ["index", "b/index", "b/reindex"]);
}

#[test]
fn test_normalization() {
    assert_eq!(normalize_page_path("//blog/post//"), Some("blog/post"));
    assert_eq!(normalize_page_path(""), None);
    assert_eq!(normalize_page_path("$private"), None);
    assert!(is_private("a/b/$c"));
    assert!(!is_private("a/$b/c"));
}
