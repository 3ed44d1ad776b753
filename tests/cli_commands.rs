//! Tests for CLI commands, run against the built binary

use std::path::Path;
use std::process::{Command, Output};

use temp_dir::TempDir;

mod helpers;

fn mealweek(config: &Path, args: &[&str]) -> anyhow::Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_mealweek"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()?)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_help_shows_all_commands() -> anyhow::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_mealweek")).arg("--help").output()?;
    let help_text = stdout(&output);

    for command in ["login", "logout", "hash-password", "recipe", "days", "plan", "export"] {
        assert!(help_text.contains(command), "{command} command not in help");
    }

    Ok(())
}

#[test]
fn test_plan_and_export_round() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = helpers::write_config(dir.path(), "")?;

    let output = mealweek(&config, &["recipe", "list", "--category", "fish"])?;
    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().count(), 3);

    let output = mealweek(&config, &["days", "set", "0", "2", "4"])?;
    assert!(output.status.success());

    let output = mealweek(&config, &["plan", "assign", "--week", "2025-W06", "2", "17"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("Klassisk lasagne"));

    let output = mealweek(&config, &["export", "--week", "2025-W06"])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let document = std::fs::read_to_string(dir.child("out").join("mealplan-2025-W06.ics"))?;
    assert!(document.contains("SUMMARY:Dinner: Klassisk lasagne\r\n"));
    assert!(document.contains("DTSTART:20250205T173000\r\n"));

    let output = mealweek(&config, &["recipe", "list", "--search", "lasagne"])?;
    assert!(!stdout(&output).contains("never"));

    Ok(())
}

#[test]
fn test_invalid_week_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = helpers::write_config(dir.path(), "")?;

    let output = mealweek(&config, &["plan", "show", "--week", "2025-6"])?;
    assert!(!output.status.success());

    mealweek(&config, &["plan", "assign", "--week", "2024-W01", "0", "17"])?;
    let output = mealweek(&config, &["export", "--week", "2023-W53"])?;
    assert!(!output.status.success());
    assert!(!dir.child("out").join("mealplan-2023-W53.ics").exists());

    let output = mealweek(&config, &["recipe", "list", "--search", "lasagne"])?;
    assert!(stdout(&output).contains("never"));

    Ok(())
}

#[test]
fn test_password_gate() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let hash = mealweek_store::hash_password("Torsgatan5!")?;
    let extra = format!("[session]\npassword_hash = {hash:?}\n");
    let config = helpers::write_config(dir.path(), &extra)?;

    assert!(!mealweek(&config, &["recipe", "list"])?.status.success());
    assert!(!mealweek(&config, &["login", "--password", "wrong"])?.status.success());
    assert!(mealweek(&config, &["login", "--password", "Torsgatan5!"])?.status.success());
    assert!(mealweek(&config, &["recipe", "list"])?.status.success());

    let output = mealweek(&config, &["logout"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("session was valid until"));
    assert!(!mealweek(&config, &["recipe", "list"])?.status.success());

    let output = mealweek(&config, &["logout"])?;
    assert!(stdout(&output).contains("Not logged in"));

    Ok(())
}

#[test]
fn test_login_without_password_configured() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = helpers::write_config(dir.path(), "")?;

    let output = mealweek(&config, &["login", "--password", "anything"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("login is not required"));

    Ok(())
}
