use pagetools::templating::{RenderData, RenderError};
use pagetools::test_utils::{SiteBuilder, init_test_logging};

fn blog_site() -> pagetools::test_utils::Site {
    init_test_logging(None);
    SiteBuilder::new()
        .unwrap()
        .page("index", "<html><title>{{ title }}</title><body>{{ content | safe }}</body></html>")
        .page("blog/index", "<section class=\"blog\">{{ content | safe }}</section>")
        .page("blog/posts/index", "<article>{{ content | safe }}</article>")
        .page("blog/posts/hello", "{{ title(text=\"Hello\") }}<h1>Hello {{ user }}</h1>")
        .page("about", "{{ title(text=\"About\") }}About")
        .build()
        .unwrap()
}

#[test]
fn test_three_layouts_wrap_page() {
    let site = blog_site();
    let mut data = RenderData::new();
    data.insert("user", "ada");

    let rendered = site.renderer.render("blog/posts/hello", &mut data);
    assert!(rendered.is_ok(), "{:?}", rendered.error);
    assert_eq!(
        rendered.text(),
        "<html><title>Hello</title><body><section class=\"blog\"><article><h1>Hello ada</h1></article></section></body></html>"
    );
    assert_eq!(data.path(), Some("blog/posts/hello"));
    assert_eq!(data.title(), Some("Hello"));
}

#[test]
fn test_top_level_page_uses_root_layout_only() {
    let site = blog_site();
    assert_eq!(
        site.render("/about").text(),
        "<html><title>About</title><body>About</body></html>"
    );
}

#[test]
fn test_unknown_page_is_not_found() {
    let site = blog_site();
    let mut data = RenderData::new();

    let err = site.renderer.render_page("blog/posts/missing", &mut data).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "404 template not found: blog/posts/missing");
}

#[test]
fn test_layouts_are_not_pages_of_their_own_directory() {
    let site = blog_site();
    // `blog/posts` has a layout but no page of that exact name.
    let err = site.renderer.render_page("blog/posts", &mut RenderData::new()).unwrap_err();
    assert!(matches!(err, RenderError::NotFound { .. }));
}

#[test]
fn test_renderer_shared_across_threads() {
    let site = blog_site();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = site.renderer.clone();
            std::thread::spawn(move || {
                let mut data = RenderData::new();
                data.insert("user", format!("user{i}"));
                renderer.render("blog/posts/hello", &mut data).text().into_owned()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let body = handle.join().unwrap();
        assert!(body.contains(&format!("Hello user{i}")), "{body}");
    }
}

#[test]
fn test_render_data_survives_repeated_renders() {
    let site = blog_site();
    let mut data = RenderData::new();
    data.insert("user", "ada");

    site.renderer.render_page("about", &mut data).unwrap();
    site.renderer.render_page("about", &mut data).unwrap();
    // Same data: the title keeps accumulating and the path stays put.
    assert_eq!(data.title(), Some("About | About"));
    assert_eq!(data.path(), Some("about"));
    assert_eq!(data.get_str("user"), Some("ada"));
}

#[test]
fn test_extension_is_not_part_of_name() {
    let site = blog_site();
    let err = site.renderer.render_page("about.html", &mut RenderData::new()).unwrap_err();
    assert!(err.is_not_found());
}
