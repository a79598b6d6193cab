use std::sync::{Arc, Mutex};

use pagetools::templating::{RenderData, RenderError};
use pagetools::test_utils::SiteBuilder;

const LAYOUT: &str = "<html>{{ content | safe }}</html>";

#[test]
fn test_missing_page_shows_404_page() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("index", LAYOUT)
        .page("404", "Page not found")
        .page("500", "Server error")
        .build()
        .unwrap();

    let rendered = site.render("nope");
    assert_eq!(rendered.status(), 404);
    assert_eq!(rendered.text(), "<html>Page not found</html>");
    assert!(matches!(rendered.error, Some(RenderError::NotFound { .. })));
}

#[test]
fn test_broken_page_shows_500_page() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("index", LAYOUT)
        .page("broken", "{{ undefined_thing }}")
        .page("500", "Server error")
        .build()
        .unwrap();

    let rendered = site.render("broken");
    assert_eq!(rendered.status(), 500);
    assert_eq!(rendered.text(), "<html>Server error</html>");
    match rendered.error {
        Some(RenderError::Rendering { template, .. }) => assert_eq!(template, "broken"),
        other => panic!("expected rendering error, got {other:?}"),
    }
}

#[test]
fn test_oops_payload_when_everything_fails() {
    let logged = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&logged);
    let site = SiteBuilder::new()
        .unwrap()
        .page("404", "{{ nope }}")
        .page("500", "{{ nope }}")
        .configure(move |c| {
            c.with_ultimate_failure("OOPS")
                .with_logger(move |m| sink.lock().unwrap().push(m.to_string()))
        })
        .build()
        .unwrap();

    let rendered = site.render("missing");
    assert_eq!(rendered.text(), "OOPS");
    assert_eq!(rendered.error, Some(RenderError::InternalFallback));
    assert_eq!(logged.lock().unwrap().len(), 1);
}

#[test]
fn test_oops_payload_not_used_when_500_page_works() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("404", "{{ nope }}")
        .page("500", "Server error")
        .configure(|c| c.with_ultimate_failure("OOPS"))
        .build()
        .unwrap();

    assert_eq!(site.render("missing").text(), "Server error");
}

#[test]
fn test_caller_errors_use_their_status_page() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("index", LAYOUT)
        .page("403", "Forbidden for {{ user }}")
        .build()
        .unwrap();
    let mut data = RenderData::new();
    data.insert("user", "ada");

    let error = RenderError::from_error(&"403 permission denied");
    let (body, returned) = site.renderer.render_error(error.clone(), &mut data);
    assert_eq!(String::from_utf8(body).unwrap(), "<html>Forbidden for ada</html>");
    assert_eq!(returned, error);
    assert_eq!(returned.status_code(), 403);
}

#[test]
fn test_error_without_code_uses_500_page() {
    let site = SiteBuilder::new().unwrap().page("500", "Server error").build().unwrap();

    let error = RenderError::from_error(&"database unavailable");
    let (body, returned) = site.renderer.render_error(error, &mut RenderData::new());
    assert_eq!(body, b"Server error");
    assert_eq!(returned.status_code(), 500);
}

#[test]
fn test_missing_status_page_falls_back_through_404_and_500() {
    let site = SiteBuilder::new().unwrap().page("500", "Server error").build().unwrap();

    let (body, returned) = site
        .renderer
        .render_error(RenderError::status(429, "slow down"), &mut RenderData::new());
    assert_eq!(body, b"Server error");
    assert_eq!(returned, RenderError::status(429, "slow down"));
}

#[test]
fn test_error_page_sees_requested_path() {
    let site = SiteBuilder::new()
        .unwrap()
        .page("index", "{{ content | safe }}")
        .page("broken", "{{ undefined_thing }}")
        .page("500", "Failed: {{ path | safe }}")
        .build()
        .unwrap();

    assert_eq!(site.render("broken").text(), "Failed: broken");
}
