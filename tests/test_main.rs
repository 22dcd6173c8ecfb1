use assert_cmd::Command;
use predicates::prelude::*;
use rstest::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RESOURCE: &str = "tests/resources/bookmarks.json";

/// A private copy of the test snapshot, so mutating commands do not touch the resource
#[fixture]
fn store() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.json");
    fs::copy(RESOURCE, &path).unwrap();
    (dir, path)
}

fn bookmarkx(store: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("bookmarkx").unwrap();
    cmd.env_remove("BOOKMARKX_STORE_PATH")
        .env_remove("BOOKMARKX_DEFAULT_SORT")
        .args(["--no-color", "--store", store.to_str().unwrap()]);
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn titles(list: &Value) -> Vec<String> {
    list["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap().to_string())
        .collect()
}

#[rstest]
fn test_debug_mode() {
    let mut cmd = Command::cargo_bin("bookmarkx").unwrap();
    cmd.args(["-d", "-d", "--generate-config"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debug mode: debug"));
}

#[rstest]
fn test_generate_config() {
    let mut cmd = Command::cargo_bin("bookmarkx").unwrap();
    cmd.arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("store_path"))
        .stdout(predicate::str::contains("default_sort = \"dateDesc\""));
}

#[rstest]
fn given_store_when_list_then_shows_newest_first(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    let list = json_stdout(bookmarkx(&path).args(["list", "--json"]));

    assert_eq!(
        titles(&list),
        vec!["Rust Book", "Issue Tracker", "Pull Requests", "Crates", "Untitled"]
    );
    assert_eq!(list["totalCount"], 5);
    assert_eq!(list["isFiltered"], false);
}

#[rstest]
fn given_store_when_list_human_then_writes_to_stderr(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("Rust Book [20]"))
        .stderr(predicate::str::contains("Work > Reviews"));
}

#[rstest]
fn given_search_when_list_then_filters_by_domain(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    let list = json_stdout(bookmarkx(&path).args(["list", "--json", "--search", "GITHUB"]));

    assert_eq!(titles(&list), vec!["Issue Tracker", "Pull Requests"]);
    assert_eq!(list["filteredCount"], 2);
    assert_eq!(list["totalCount"], 5);
    assert_eq!(list["isFiltered"], true);
}

#[rstest]
fn given_folder_and_sort_when_list_then_applies_both(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    let by_title = json_stdout(bookmarkx(&path).args(["list", "--json", "--sort", "titleAsc"]));
    assert_eq!(
        titles(&by_title),
        vec!["Crates", "Issue Tracker", "Pull Requests", "Rust Book", "Untitled"]
    );

    let reviews = json_stdout(bookmarkx(&path).args([
        "list",
        "--json",
        "--folder",
        "Work > Reviews",
    ]));
    assert_eq!(titles(&reviews), vec!["Pull Requests"]);
    assert_eq!(reviews["items"][0]["level"], 2);
}

#[rstest]
fn given_malformed_url_when_list_then_domain_is_raw_url(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    let list = json_stdout(bookmarkx(&path).args(["list", "--json", "--search", "not a url"]));

    assert_eq!(list["items"][0]["domain"], "not a url");
}

#[rstest]
fn given_unknown_sort_when_list_then_usage_error(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .args(["list", "--sort", "sideways"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Unknown sort order"));
}

#[rstest]
fn given_store_when_folders_then_lists_counts(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .arg("folders")
        .assert()
        .success()
        .stderr(predicate::str::contains("Work (1)"))
        .stderr(predicate::str::contains("Work > Reviews (1)"));
}

#[rstest]
fn given_store_when_stats_then_reports_totals(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    let stats = json_stdout(bookmarkx(&path).args(["stats", "--json"]));

    assert_eq!(stats["bookmarkCount"], 5);
    assert_eq!(stats["folderCount"], 2);
}

#[rstest]
fn given_url_without_title_when_add_then_title_derived_from_host(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .args(["add", "https://www.example.org/page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added bookmark 25: Example.org"));

    let list = json_stdout(bookmarkx(&path).args(["list", "--json", "--search", "example"]));
    assert_eq!(titles(&list), vec!["Example.org"]);
    assert_eq!(list["items"][0]["folderPath"], "");
}

#[rstest]
fn given_invalid_url_when_add_then_rejected_without_change(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;
    let before = fs::read_to_string(&path).unwrap();

    bookmarkx(&path)
        .args(["add", "not a url", "--title", "Broken"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Please enter a valid URL"));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[rstest]
fn given_unknown_parent_when_add_then_store_failure(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .args(["add", "https://docs.rs", "--parent", "404"])
        .assert()
        .code(69);
}

#[rstest]
fn given_new_title_when_edit_then_updates(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .args(["edit", "20", "The Rust Programming Language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated bookmark 20"));

    bookmarkx(&path)
        .args(["edit", "20", "The Rust Programming Language"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unchanged"));

    let list = json_stdout(bookmarkx(&path).args(["list", "--json", "--search", "programming"]));
    assert_eq!(titles(&list), vec!["The Rust Programming Language"]);
}

#[rstest]
fn given_unknown_id_when_edit_then_not_found(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .args(["edit", "999", "Anything"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("999"));
}

#[rstest]
fn given_bookmark_when_delete_then_removed(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path)
        .args(["delete", "21"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bookmark 21"));

    let stats = json_stdout(bookmarkx(&path).args(["stats", "--json"]));
    assert_eq!(stats["bookmarkCount"], 4);
}

#[rstest]
fn given_folder_id_when_delete_then_dataerr_and_folder_kept(store: (TempDir, PathBuf)) {
    let (_dir, path) = store;

    bookmarkx(&path).args(["delete", "1"]).assert().code(65);
    bookmarkx(&path).args(["delete", "10"]).assert().code(65);

    let stats = json_stdout(bookmarkx(&path).args(["stats", "--json"]));
    assert_eq!(stats["bookmarkCount"], 5);
}

#[rstest]
fn given_missing_store_when_list_then_noinput() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    bookmarkx(&path)
        .arg("list")
        .assert()
        .code(66)
        .stderr(predicate::str::contains("create-store"));
}

#[rstest]
fn test_create_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/bookmarks.json");
    let path_arg = path.to_str().unwrap();

    let mut cmd = Command::cargo_bin("bookmarkx").unwrap();
    cmd.args(["create-store", path_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bookmark store"));
    assert!(path.exists());

    let stats = json_stdout(bookmarkx(&path).args(["stats", "--json"]));
    assert_eq!(stats["bookmarkCount"], 0);

    let mut again = Command::cargo_bin("bookmarkx").unwrap();
    again.args(["create-store", path_arg]).assert().code(64);
}
