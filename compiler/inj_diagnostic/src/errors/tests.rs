use super::*;

#[test]
fn every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::has_docs(*code), "{code} has no documentation");
    }
    assert_eq!(ErrorDocs::all_codes().count(), ErrorCode::ALL.len());
}

#[test]
fn docs_start_with_their_code() {
    for code in ErrorDocs::all_codes() {
        let doc = ErrorDocs::get(code).unwrap();
        assert!(
            doc.starts_with(&format!("# {}:", code.as_str())),
            "{code} doc has the wrong heading"
        );
    }
}

#[test]
fn validation_doc_lists_every_error_kind() {
    let doc = ErrorDocs::get(ErrorCode::E3001).unwrap();
    for section in [
        "Missing dependency",
        "Type mismatch",
        "Duplicate token",
        "Duplicate listener",
        "Cycle",
    ] {
        assert!(doc.contains(section), "E3001 doc lacks `{section}`");
    }
}
