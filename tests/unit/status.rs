use pagetools::templating::RenderError;
use pagetools::utils::{code_path, error_code, status_code_of};

#[test]
fn test_error_code_reads_leading_digits() {
    assert_eq!(error_code(&"404 not found"), 404);
    assert_eq!(error_code(&"503"), 503);
    assert_eq!(error_code(&"418teapot"), 418);
}

#[test]
fn test_error_code_defaults_to_500() {
    assert_eq!(error_code(&"oops"), 500);
    assert_eq!(error_code(&" 404 leading space"), 500);
    assert_eq!(error_code(&"200 fine"), 500);
    assert_eq!(error_code(&"600 too high"), 500);
    assert_eq!(error_code(&"99999999999999999999 huge"), 500);
    assert_eq!(error_code(&""), 500);
}

#[test]
fn test_status_of_no_error_is_200() {
    assert_eq!(status_code_of::<RenderError>(None), 200);
    let err = RenderError::status(401, "login required");
    assert_eq!(status_code_of(Some(&err)), 401);
}

#[test]
fn test_code_path_is_decimal() {
    assert_eq!(code_path(404), "404");
    assert_eq!(code_path(500), "500");
}

#[test]
fn test_render_errors_round_trip_through_error_code() {
    let errors = [
        RenderError::from_error(&"429 slow down"),
        RenderError::status(503, "maintenance"),
        RenderError::InternalFallback,
    ];
    for err in &errors {
        assert_eq!(error_code(err), err.status_code());
    }
}
