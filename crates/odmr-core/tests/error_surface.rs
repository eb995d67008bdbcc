use odmr_core::errors::{ErrorInfo, OdmrError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("steps", 1)
        .with_context("reason", "example")
}

#[test]
fn invalid_config_surface() {
    let err = OdmrError::InvalidConfig(sample_info("sweep-too-few-points", "need two points"));
    assert_eq!(err.info().code, "sweep-too-few-points");
    assert_eq!(err.info().context["steps"], "1");
    assert!(err.is_invalid_config());
}

#[test]
fn numeric_degenerate_surface() {
    let err =
        OdmrError::NumericDegenerate(ErrorInfo::new("non-positive-off", "off trace reached zero"));
    assert_eq!(err.info().code, "non-positive-off");
    assert!(!err.is_invalid_config());
}

#[test]
fn serde_error_surface() {
    let err = OdmrError::Serde(sample_info("json_serialize", "schema mismatch"));
    assert_eq!(err.info().code, "json_serialize");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = OdmrError::InvalidConfig(
        ErrorInfo::new("non-positive-fwhm", "linewidth must be positive")
            .with_context("fwhm", 0.0)
            .with_hint("use the low-power linewidth in Hz"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("invalid config: linewidth must be positive"));
    assert!(rendered.contains("code: non-positive-fwhm"));
    assert!(rendered.contains("fwhm=0"));
    assert!(rendered.contains("hint: use the low-power linewidth in Hz"));
}

#[test]
fn errors_round_trip_json() {
    let err = OdmrError::NumericDegenerate(sample_info("non-finite-contrast", "nan"));
    let json = serde_json::to_string(&err).expect("serialize");
    assert!(json.contains("\"family\":\"NumericDegenerate\""));
    let decoded: OdmrError = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, err);
}
