use hgp_core::errors::{codes, ErrorFamily, ErrorInfo, HgpError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("line", 3)
        .with_context("reason", "example")
}

#[test]
fn parse_error_surface() {
    let err = HgpError::Parse(sample_info(codes::MALFORMED_HEADER, "bad header"));
    assert_eq!(err.info().code, codes::MALFORMED_HEADER);
    assert_eq!(err.family(), ErrorFamily::Parse);
    assert_eq!(err.info().context.get("line").map(String::as_str), Some("3"));
}

#[test]
fn solver_error_surface() {
    let err = HgpError::Solver(sample_info(codes::NOT_CONVERGED, "ran out of restarts"));
    assert!(err.has_code(codes::NOT_CONVERGED));
    assert_eq!(err.family(), ErrorFamily::Solver);
}

#[test]
fn invariant_error_surface() {
    let err = HgpError::Invariant(sample_info(codes::NONZERO_ROW_SUM, "row 2 sums to 1"));
    assert_eq!(err.family(), ErrorFamily::Invariant);
}

#[test]
fn context_and_hint_keep_family() {
    let err = HgpError::Config(ErrorInfo::new(codes::INVALID_CONFIG, "zero multiplier"))
        .with_context("field", "solver.ncv_multiplier")
        .with_hint("use a value of at least 1");
    assert_eq!(err.family(), ErrorFamily::Config);
    assert_eq!(
        err.info().context.get("field").map(String::as_str),
        Some("solver.ncv_multiplier")
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: zero multiplier (code: invalid-config)"));
    assert!(rendered.contains("hint: use a value of at least 1"));
}
