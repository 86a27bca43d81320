use std::path::PathBuf;

use msgflow_core::ExErrorKind;
use msgflow_store::{load_schema, split_paths};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .display()
        .to_string()
}

#[test]
fn test_load_merges_documents_in_order() {
    let paths = vec![
        fixture("notification.yaml"),
        format!("  {}  ", fixture("user.yaml")),
        fixture("analytics.json"),
    ];

    let schema = load_schema(&paths).unwrap();

    let names: Vec<_> = schema.services.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["NotificationService", "UserService", "AnalyticsService"]
    );
}

#[test]
fn test_first_failure_aborts_with_path() {
    let broken = fixture("broken_ref.yaml");
    let err = load_schema(&[fixture("user.yaml"), broken.clone()]).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::UnresolvedReference);
    assert_eq!(err.op(), Some("load_schema"));
    assert_eq!(err.entity(), Some(broken.as_str()));
}

#[test]
fn test_comma_separated_list_round_trip() {
    let list = format!("{}, {}", fixture("user.yaml"), fixture("notification.yaml"));
    let paths = split_paths(&list);

    let schema = load_schema(&paths).unwrap();
    assert_eq!(schema.services.len(), 2);
    assert_eq!(schema.services[0].name, "UserService");
}
