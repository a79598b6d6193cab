use pagetools::templating::RenderData;
use pagetools::test_utils::SiteBuilder;

#[test]
fn test_title_collects_fragments_from_page_and_partials() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("index", "<title>{{ title }}</title>{{ content | safe }}")
        .page("blog/index", "{{ content | safe }}")
        .page("blog/post", "{{ title(text=\"Post\") }}{{ import_once(path=\"byline\") }}")
        .partial("byline", "{{ title(text=\"Blog\") }}by ada")
        .build()
        .unwrap();

    assert_eq!(site.render("blog/post").text(), "<title>Post | Blog</title>by ada");
}

#[test]
fn test_imports_nest() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("page", "{{ import_once(path=\"outer\") }}")
        .partial("outer", "[{{ import_once(path=\"inner\") }}]")
        .partial("inner", "inner")
        .build()
        .unwrap();

    assert_eq!(site.render("page").text(), "[inner]");
}

#[test]
fn test_import_is_not_escaped() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("page", "{{ import_once(path=\"nav\") }}")
        .partial("nav", "<nav><a href=\"/\">Home</a></nav>")
        .build()
        .unwrap();

    assert_eq!(site.render("page").text(), "<nav><a href=\"/\">Home</a></nav>");
}

#[test]
fn test_inline_once_then_fresh_data_inlines_again() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("page", "{{ inline(path=\"snippet.txt\") }}|{{ inline(path=\"snippet.txt\") }}")
        .inline_file("snippet.txt", "<b>raw</b>")
        .build()
        .unwrap();

    let mut data = RenderData::new();
    let first = site.renderer.render_page("page", &mut data).unwrap();
    assert_eq!(String::from_utf8(first).unwrap(), "<b>raw</b>|");

    // Same data: the file was already inlined.
    let again = site.renderer.render_page("page", &mut data).unwrap();
    assert_eq!(String::from_utf8(again).unwrap(), "|");

    let fresh = site.renderer.render_page("page", &mut RenderData::new()).unwrap();
    assert_eq!(String::from_utf8(fresh).unwrap(), "<b>raw</b>|");
}

#[test]
fn test_inline_and_import_sets_are_independent() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("page", "{{ import_once(path=\"shared\") }}+{{ inline(path=\"shared\") }}")
        .partial("shared", "partial")
        .inline_file("shared", "file")
        .build()
        .unwrap();

    assert_eq!(site.render("page").text(), "partial+file");
}

#[test]
fn test_dev_mode_from_config_rereads_files() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("page", "{{ inline_script(path=\"app.js\") }}")
        .inline_file("app.js", "one()")
        .configure(|mut c| {
            c.dev_mode = true;
            c
        })
        .build()
        .unwrap();

    site.write_inline_file("app.js", "two()").unwrap();
    assert_eq!(
        site.render("page").text(),
        "<script type=\"text/javascript\">\ntwo()\n</script>"
    );
}

#[test]
fn test_active_helpers_are_pure() {
    let site = SiteBuilder::new()
        .unwrap()
        .page(
            "index",
            "<a class=\"{{ active(href=\"/docs/intro\") }}\"></a><a class=\"{{ active(href=\"/docs/intro\") }}\"></a><a class=\"{{ active_prefix(href=\"/docs/\", class=\"open\") }}\"></a>{{ content | safe }}",
        )
        .page("docs/intro", "")
        .build()
        .unwrap();

    assert_eq!(
        site.render("docs/intro").text(),
        "<a class=\"active\"></a><a class=\"active\"></a><a class=\"open\"></a>"
    );
}

#[test]
fn test_missing_function_argument_is_a_rendering_error() {
    let site = SiteBuilder::new().unwrap().page("page", "{{ title() }}").build().unwrap();

    let err = site.renderer.render_page("page", &mut RenderData::new()).unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("page"), "{err}");
}
