use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("trek_core_cli").expect("binary builds");
    cmd.env("TREK_CORE_CLI_SCRIPT", "1")
        .env("TREK_CORE_HOME", home.path());
    cmd
}

#[test]
fn adds_and_lists_treks() {
    let home = TempDir::new().expect("temp home");
    cli(&home)
        .write_stdin("trek add Annapurna Circuit\ntreks\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trek added successfully"))
        .stdout(predicate::str::contains("annapurna-circuit"));
}

#[test]
fn duplicate_trek_is_reported() {
    let home = TempDir::new().expect("temp home");
    cli(&home)
        .write_stdin("trek add ABC\ntrek add ABC\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trek already exists!"));
}

#[test]
fn balance_reflects_contributions_minus_active_spend() {
    let home = TempDir::new().expect("temp home");
    cli(&home)
        .write_stdin(
            "trek add ABC\n\
             person add abc A 1000\n\
             expense add abc food 300\n\
             balance abc\n\
             expense toggle abc food\n\
             balance abc\n\
             quit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining: Rs 700"))
        .stdout(predicate::str::contains("Expense archived"))
        .stdout(predicate::str::contains("Remaining: Rs 1000"));
}

#[test]
fn state_persists_across_invocations() {
    let home = TempDir::new().expect("temp home");
    cli(&home)
        .write_stdin("trek add ABC\nperson add abc A 500\nquit\n")
        .assert()
        .success();

    cli(&home)
        .write_stdin("balance abc\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total contributed: Rs 500"));
}

#[test]
fn clear_empties_the_ledger() {
    let home = TempDir::new().expect("temp home");
    cli(&home)
        .write_stdin("trek add One\ntrek add Two\nclear\ntreks\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("All treks cleared"))
        .stdout(predicate::str::contains("No treks yet"));
}

#[test]
fn unknown_command_suggests_a_correction() {
    let home = TempDir::new().expect("temp home");
    cli(&home)
        .write_stdin("trekz\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Did you mean"));
}

#[test]
fn export_writes_the_report_file() {
    let home = TempDir::new().expect("temp home");
    let out = home.path().join("abc_report.html");
    cli(&home)
        .write_stdin(format!(
            "trek add ABC\nexpense add abc food 300\nexport abc {}\nquit\n",
            out.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("written to"));
    let html = std::fs::read_to_string(&out).expect("report exists");
    assert!(html.contains("<td>food</td>"));
}
