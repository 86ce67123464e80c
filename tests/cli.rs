use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tripbuddy(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tripbuddy").unwrap();
    cmd.env("TRIPBUDDY_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn session_prints_banner_and_results() {
    let dir = TempDir::new().unwrap();

    tripbuddy(&dir)
        .write_stdin(
            "add-expense -n lunch -a 12.50 -c food\n\
             search -k lun\n\
             view-budget\n\
             bye\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to TripBuddy!"))
        .stdout(predicate::str::contains(
            "Expense lunch added successfully to category food.",
        ))
        .stdout(predicate::str::contains(
            " - lunch | 12.50 SGD | food | ",
        ))
        .stdout(predicate::str::contains(
            "This leaves you with a remaining budget of 987.50 SGD.",
        ))
        .stdout(predicate::str::contains("Your TripBuddy session has ended. Bye!"));
}

#[test]
fn trip_is_saved_and_restored() {
    let dir = TempDir::new().unwrap();

    tripbuddy(&dir)
        .write_stdin("set-budget -a 500\nadd-expense -n taxi -a 30 -c transport\nbye\n")
        .assert()
        .success();
    assert!(dir.path().join("tripbuddy.json").exists());

    tripbuddy(&dir)
        .write_stdin("view-budget\nview-categories\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The original budget you set was 500.00 SGD."))
        .stdout(predicate::str::contains("So far, you have spent 30.00 SGD."))
        .stdout(predicate::str::contains(" - transport"));
}

#[test]
fn no_save_leaves_no_file() {
    let dir = TempDir::new().unwrap();

    tripbuddy(&dir)
        .arg("--no-save")
        .write_stdin("add-expense -n taxi -a 30\n")
        .assert()
        .success();

    assert!(!dir.path().join("tripbuddy.json").exists());
    assert!(!dir.path().join("config.json").exists());
}

#[test]
fn command_errors_keep_the_session_alive() {
    let dir = TempDir::new().unwrap();

    tripbuddy(&dir)
        .write_stdin("add-expense -n lunch -a abc\ndelete-category -c nope\nview-categories\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invalid argument '-a abc': Not a number.",
        ))
        .stdout(predicate::str::contains("Category not found: nope"))
        .stdout(predicate::str::contains("There are no categories."));
}

#[test]
fn corrupt_snapshot_falls_back_to_fresh_trip() {
    let dir = TempDir::new().unwrap();
    let data_file = dir.path().join("tripbuddy.json");
    std::fs::write(&data_file, "{ not json").unwrap();

    tripbuddy(&dir)
        .write_stdin("view-budget\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to load data:"))
        .stdout(predicate::str::contains("Error loading data").not())
        .stdout(predicate::str::contains("The unreadable file was kept as"))
        .stdout(predicate::str::contains("The original budget you set was 1000.00 SGD."));

    let backup = dir.path().join("tripbuddy.json.bak");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "{ not json");
    assert!(data_file.exists());
}

#[test]
fn invalid_record_is_kept_aside_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let saved = r#"{"budget": 800.0, "totalExpense": 12.5, "categories": [],
        "expenses": [{"name": "Lunch", "amount": 12.5}]}"#;
    std::fs::write(dir.path().join("tripbuddy.json"), saved).unwrap();

    tripbuddy(&dir)
        .write_stdin("add-expense -n taxi -a 30\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("expenses[0].dateTime"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("tripbuddy.json.bak")).unwrap(),
        saved
    );

    tripbuddy(&dir)
        .arg("--no-save")
        .write_stdin("list-expense\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(" - taxi | 30.00 SGD | "))
        .stdout(predicate::str::contains("Failed to load data").not());
}

#[test]
fn invalid_utf8_input_does_not_lose_the_session() {
    let dir = TempDir::new().unwrap();

    tripbuddy(&dir)
        .write_stdin(&b"add-expense -n tea -a 2\nsearch -k caf\xe9\nadd-expense -n coffee -a 3\n"[..])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense coffee added successfully."));

    tripbuddy(&dir)
        .arg("--no-save")
        .write_stdin("view-budget\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("So far, you have spent 5.00 SGD."));
}

#[test]
fn first_save_writes_default_settings() {
    let dir = TempDir::new().unwrap();

    tripbuddy(&dir).write_stdin("bye\n").assert().success();

    let settings = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(settings.contains("\"default_budget\": 1000"));
    assert!(settings.contains("\"base_currency\": \"SGD\""));
}

#[test]
fn settings_seed_budget_and_currency() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"default_budget": 200, "base_currency": "USD"}"#,
    )
    .unwrap();

    tripbuddy(&dir)
        .arg("--no-save")
        .write_stdin("view-budget\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The original budget you set was 150.00 USD."));
}
