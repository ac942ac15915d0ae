use assert_fs::prelude::*;
use predicates::prelude::*;
use proptest::prelude::*;
use rstest::rstest;
use tracwiki_fs::{Error, NormalizedPath, io, page_path, validate_page_name};

#[rstest]
#[case("WikiStart")]
#[case("Project/Notes")]
#[case("Release-1.0")]
#[case("with space")]
#[case(".hidden")]
#[case("Ünïcode")]
fn test_valid_page_names(#[case] name: &str) {
    assert!(validate_page_name(name).is_ok(), "{name} should be valid");
}

#[rstest]
#[case("")]
#[case("/etc/passwd")]
#[case("../outside")]
#[case("a/../../b")]
#[case("a/./b")]
#[case("a//b")]
#[case("trailing/")]
#[case("back\\slash")]
#[case("nul\0byte")]
#[case(".trac_config")]
fn test_invalid_page_names(#[case] name: &str) {
    let result = validate_page_name(name);
    assert!(
        matches!(result, Err(Error::InvalidPageName { .. })),
        "{name:?} should be rejected, got {result:?}"
    );
}

#[test]
fn test_page_path_written_inside_root() {
    let temp = assert_fs::TempDir::new().unwrap();
    let root = NormalizedPath::new(temp.path());

    let path = page_path(&root, "Team/Roadmap").unwrap();
    io::write_text(&path, "Q3 plans").unwrap();

    temp.child("Team/Roadmap")
        .assert(predicate::str::contains("Q3 plans"));
}

proptest! {
    #[test]
    fn test_valid_names_never_escape_root(name in "[a-zA-Z0-9 ./_-]{1,40}") {
        let root = NormalizedPath::new("/work");
        if let Ok(path) = page_path(&root, &name) {
            let relative = path.as_str().strip_prefix("/work/").unwrap();
            prop_assert_eq!(relative, name.as_str());
            prop_assert!(relative.split('/').all(|s| s != ".." && s != "." && !s.is_empty()));
        }
    }
}
