//! `cfk current|chain|schedule` against the FO fixture roster.
//!
//! GREEN when:
//! - The primary rolls from FOF16 to FOG16 on 2016-01-26.
//! - `chain` prints one `chain[i]=` line per contract.
//! - `schedule` prints unresolved gaps with their error and keeps going.
//! - `--contracts` can come from CFK_CONTRACTS_CSV.
//! - Typed resolution errors exit non-zero with the message on stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn write_roster(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("fo_roster.csv");
    std::fs::write(&path, cfk_testkit::FO_ROSTER_CSV).unwrap();
    path
}

fn cfk() -> Command {
    let mut cmd = Command::cargo_bin("cfk").unwrap();
    cmd.env_remove("CFK_CONTRACTS_CSV").env("RUST_LOG", "warn");
    cmd
}

#[test]
fn current_rolls_on_auto_close_day() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write_roster(&dir);

    for (as_of, expected) in [("2016-01-25", "FOF16"), ("2016-01-26", "FOG16"), ("2016-01-27", "FOG16")] {
        cfk()
            .arg("current")
            .arg("--contracts")
            .arg(&roster)
            .args(["--root", "FO", "--offset", "0", "--as-of", as_of])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("contract={expected}\n")))
            .stdout(predicate::str::contains("continuous_future=FO/0/calendar"));
    }
}

#[test]
fn chain_lists_every_forward_contract() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write_roster(&dir);

    cfk()
        .arg("chain")
        .arg("--contracts")
        .arg(&roster)
        .args(["--root", "FO", "--offset", "1", "--as-of", "2016-01-26"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chain_len=2\n"))
        .stdout(predicate::str::contains("chain[0]=FOH16\n"))
        .stdout(predicate::str::contains("chain[1]=FOJ16\n"));
}

#[test]
fn schedule_prints_segments() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write_roster(&dir);

    cfk()
        .arg("schedule")
        .arg("--contracts")
        .arg(&roster)
        .args(["--root", "FO", "--from", "2016-01-25", "--to", "2016-01-27"])
        .assert()
        .success()
        .stdout(predicate::str::contains("segments=2\n"))
        .stdout(predicate::str::contains(
            "segment[0]=FOF16 active_from=2016-01-25T00:00:00+00:00 active_until=2016-01-26T00:00:00+00:00",
        ))
        .stdout(predicate::str::contains("active_until=open"));
}

#[test]
fn schedule_reports_gaps_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write_roster(&dir);

    cfk()
        .arg("schedule")
        .arg("--contracts")
        .arg(&roster)
        .args(["--root", "FO", "--from", "2016-01-01", "--to", "2021-06-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("segments=6\n"))
        .stdout(predicate::str::contains(
            "segment[4]=unresolved active_from=2016-04-26T00:00:00+00:00 active_until=2021-01-05T00:00:00+00:00",
        ))
        .stdout(predicate::str::contains("segment[4].error=no current contract"))
        .stdout(predicate::str::contains(
            "segment[5]=FOF22 active_from=2021-01-05T00:00:00+00:00 active_until=open",
        ));
}

#[test]
fn contracts_path_falls_back_to_env() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write_roster(&dir);

    cfk()
        .env("CFK_CONTRACTS_CSV", &roster)
        .args(["current", "--root", "FO", "--as-of", "2016-01-25T14:31:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("contract=FOF16\n"));
}

#[test]
fn missing_roster_source_is_reported() {
    cfk()
        .args(["current", "--root", "FO", "--as-of", "2016-01-25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CFK_CONTRACTS_CSV"));
}

#[test]
fn resolution_errors_exit_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let roster = write_roster(&dir);

    // Every FO16 contract has rolled off and FOF22 has not started.
    cfk()
        .arg("current")
        .arg("--contracts")
        .arg(&roster)
        .args(["--root", "FO", "--as-of", "2016-05-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no current contract"));

    cfk()
        .arg("current")
        .arg("--contracts")
        .arg(&roster)
        .args(["--root", "CL", "--as-of", "2016-01-25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CL"));

    cfk()
        .arg("current")
        .arg("--contracts")
        .arg(&roster)
        .args(["--root", "FO", "--offset", "-1", "--as-of", "2016-01-25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("offset"));
}
