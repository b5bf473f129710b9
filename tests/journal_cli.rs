use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn daybook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daybook").unwrap();
    cmd.env("DAYBOOK_HOME", home).env("DAYBOOK_PASSKEY", "open");
    cmd
}

fn setup_gate(home: &Path) {
    daybook(home)
        .args(["gate", "setup", "open", "open"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Passkey set successfully!"));
}

fn write_entry(home: &Path, title: &str, body: &str) {
    daybook(home)
        .args([
            "write",
            title,
            body,
            "--tags",
            "Personal",
            "--entry-passkey",
            "pk",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry saved"));
}

#[test]
fn data_commands_refuse_until_gate_setup() {
    let temp_dir = tempfile::tempdir().unwrap();

    daybook(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("has not been set up"));

    daybook(temp_dir.path())
        .args(["gate", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No store passkey yet"));
}

#[test]
fn wrong_store_passkey_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());

    daybook(temp_dir.path())
        .env("DAYBOOK_PASSKEY", "guess")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("verification failed"));
}

#[test]
fn write_then_list_shows_the_entry() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(temp_dir.path(), "Morning pages", "coffee and a slow start");

    daybook(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning pages"))
        .stdout(predicate::str::contains("Personal"));
}

#[test]
fn write_reports_every_missing_field() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());

    daybook(temp_dir.path())
        .args(["write", "", "", "--entry-passkey", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"))
        .stderr(predicate::str::contains("Content is required"))
        .stderr(predicate::str::contains("At least one tag is required"))
        .stderr(predicate::str::contains("Entry passkey is required"));

    // Nothing may be persisted from a rejected draft.
    daybook(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found"));
}

#[test]
fn view_renders_markup_without_delimiters() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(
        temp_dir.path(),
        "Styled",
        "# A heading\n\nsome **bold words** here",
    );

    daybook(temp_dir.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A heading"))
        .stdout(predicate::str::contains("bold words"))
        .stdout(predicate::str::contains("**").not())
        .stdout(predicate::str::contains("# A heading").not());
}

#[test]
fn edit_is_gated_by_the_entry_passkey() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(temp_dir.path(), "Draft", "first words");

    daybook(temp_dir.path())
        .args([
            "edit",
            "1",
            "--title",
            "Hijacked",
            "--body",
            "other words",
            "--tags",
            "Work",
            "--entry-passkey",
            "wrong",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("verification failed"));

    daybook(temp_dir.path())
        .args([
            "edit",
            "1",
            "--title",
            "Draft, revised",
            "--body",
            "better words",
            "--tags",
            "Work",
            "--entry-passkey",
            "pk",
        ])
        .assert()
        .success();

    daybook(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft, revised"))
        .stdout(predicate::str::contains("Hijacked").not());
}

#[test]
fn delete_is_gated_and_removes_only_the_target() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(temp_dir.path(), "Keep me", "stays");
    write_entry(temp_dir.path(), "Drop me", "goes");

    daybook(temp_dir.path())
        .args(["delete", "2", "--entry-passkey", "nope"])
        .assert()
        .failure();

    daybook(temp_dir.path())
        .args(["delete", "2", "--entry-passkey", "pk"])
        .assert()
        .success();

    daybook(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keep me"))
        .stdout(predicate::str::contains("Drop me").not());
}

#[test]
fn bodies_are_obfuscated_on_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(temp_dir.path(), "Private", "a sentence nobody should grep");

    let raw = std::fs::read_to_string(temp_dir.path().join("entries.json")).unwrap();
    assert!(!raw.contains("a sentence nobody should grep"));
    assert!(raw.contains("Private")); // titles stay searchable
}

#[test]
fn export_writes_a_document_into_the_output_dir() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(temp_dir.path(), "One", "first body");
    write_entry(temp_dir.path(), "Two", "second body");

    daybook(temp_dir.path())
        .args(["export", "--output"])
        .arg(out_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 entries"));

    let exported: Vec<_> = std::fs::read_dir(out_dir.path())
        .unwrap()
        .map(|e| e.unwrap())
        .collect();
    assert_eq!(exported.len(), 1);
    let name = exported[0].file_name().to_string_lossy().to_string();
    assert!(name.starts_with("daybook-export-"));

    let html = std::fs::read_to_string(exported[0].path()).unwrap();
    assert!(html.contains("<h1>One</h1>"));
    assert!(html.contains("second body"));
    assert!(html.contains("Selected Entries: 2"));
}

#[test]
fn stats_summarizes_the_journal() {
    let temp_dir = tempfile::tempdir().unwrap();
    setup_gate(temp_dir.path());
    write_entry(temp_dir.path(), "A", "happy happy morning walk today");
    write_entry(temp_dir.path(), "B", "terrible awful slog of a day");

    daybook(temp_dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries:          2"))
        .stdout(predicate::str::contains("Top Keywords"))
        .stdout(predicate::str::contains("happy"));
}
