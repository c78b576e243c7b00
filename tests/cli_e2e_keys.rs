//! End-to-end tests for the `catalog-sync keys` command.

mod common;
use common::prelude::*;

#[test]
fn test_keys_lists_leaf_paths_in_document_order() {
    let fixture = TestFixture::new().with_file("en.json", catalogs::EN);

    fixture
        .command()
        .args(["keys", "en.json"])
        .assert()
        .success()
        .stdout("nav.home\nnav.signIn\nevents.browse.title\nevents.browse.foundCount\n");
}

#[test]
fn test_keys_only_filter() {
    let fixture = TestFixture::new().with_file("en.json", catalogs::EN);

    fixture
        .command()
        .args(["keys", "en.json", "--only", "events.*"])
        .assert()
        .success()
        .stdout("events.browse.title\nevents.browse.foundCount\n");
}

#[test]
fn test_keys_invalid_filter() {
    let fixture = TestFixture::new().with_file("en.json", catalogs::EN);

    fixture
        .command()
        .args(["keys", "en.json", "--only", "nav.[x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid key filter: nav.[x"));
}

#[test]
fn test_keys_tree_view() {
    let fixture = TestFixture::new().with_file("en.json", catalogs::EN);

    fixture
        .command()
        .args(["keys", "en.json", "--tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en.json"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains(r#"foundCount: "Found {{count}} events""#));
}

#[test]
fn test_keys_tree_view_prunes_filtered_branches() {
    let fixture = TestFixture::new().with_file("en.json", catalogs::EN);

    fixture
        .command()
        .args(["keys", "en.json", "--tree", "--only", "nav.*"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"home: "Home""#))
        .stdout(predicate::str::contains("events").not());
}
