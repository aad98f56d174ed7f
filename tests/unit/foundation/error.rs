use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TabletopError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        TabletopError::backend("x")
            .to_string()
            .contains("backend error:")
    );
    assert!(
        TabletopError::codec("x")
            .to_string()
            .contains("codec error:")
    );
}

#[test]
fn dimension_reports_both_sizes() {
    let msg = TabletopError::dimension((4, 3), (2, 3)).to_string();
    assert_eq!(msg, "dimension mismatch: expected 4x3, got 2x3");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TabletopError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
