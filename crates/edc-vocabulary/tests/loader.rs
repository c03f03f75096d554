use std::fs;

use edc_model::{ItemId, VocabularyKind};
use edc_vocabulary::{
    VocabularyError, load_default_registry, load_registry_dir, load_vocabulary_csv,
    parse_vocabulary_csv,
};

#[test]
fn parse_orders_by_display_index() {
    let csv = "\u{feff}id,name,display_index\n\
               3,Other,90\n\
               1,Tuberculosis,20\n\
               2,Cryptococcal meningitis,10\n";
    let list = parse_vocabulary_csv(csv.as_bytes(), VocabularyKind::Cause, "test.csv").unwrap();
    let ids: Vec<u32> = list.items().iter().map(|item| item.id.get()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(list.get(ItemId::new(2)).unwrap().short_name, "cryptococcal_meningitis");
}

#[test]
fn missing_display_index_keeps_file_order() {
    let csv = "id,name\n5,Zeta\n4,Alpha\n";
    let list =
        parse_vocabulary_csv(csv.as_bytes(), VocabularyKind::DiagnosisCode, "test.csv").unwrap();
    let names: Vec<&str> = list.items().iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
}

#[test]
fn invalid_id_reports_line() {
    let csv = "id,name,display_index\n1,Fine,1\nabc,Broken,2\n";
    let err = parse_vocabulary_csv(csv.as_bytes(), VocabularyKind::Cause, "bad.csv").unwrap_err();
    match err {
        VocabularyError::InvalidRow { line, message, .. } => {
            assert_eq!(line, 3);
            assert!(message.contains("abc"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_id_is_rejected() {
    let csv = "id,name\n1,One\n1,Uno\n";
    let err = parse_vocabulary_csv(csv.as_bytes(), VocabularyKind::Cause, "dup.csv").unwrap_err();
    assert!(matches!(err, VocabularyError::DuplicateItem { .. }));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_vocabulary_csv(&dir.path().join("cause.csv"), VocabularyKind::Cause)
        .unwrap_err();
    assert!(matches!(err, VocabularyError::Io { .. }));
}

#[test]
fn directory_overrides_only_present_kinds() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("cause.csv"),
        "id,name,short_name,display_index\n100,Road traffic accident,rta,1\n",
    )
    .unwrap();

    let registry = load_registry_dir(dir.path()).unwrap();
    let cause = registry.list(VocabularyKind::Cause).unwrap();
    assert_eq!(cause.len(), 1);
    assert_eq!(cause.first().unwrap().short_name, "rta");

    let defaults = load_default_registry().unwrap();
    assert_eq!(
        registry.list(VocabularyKind::CauseCategory).unwrap().len(),
        defaults.list(VocabularyKind::CauseCategory).unwrap().len()
    );
}
