use super::*;

#[test]
fn severity_orders_most_severe_first() {
    let mut levels = vec![Severity::Debug, Severity::Error, Severity::Info, Severity::Warning];
    levels.sort();
    assert_eq!(
        levels,
        vec![Severity::Error, Severity::Warning, Severity::Info, Severity::Debug]
    );
}

#[test]
fn severity_display() {
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Error.as_str(), "error");
}
