use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute").arg("tests/fixtures/seed.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "de_id,de_name,week,city,zone,shift,orders,milestone_1_payout,milestone_5_payout,milestone_10_payout,total_payout",
        ))
        .stdout(predicate::str::contains("104,Kiran,W1,Delhi,Saket,Day,10,25,50,100,175"))
        .stdout(predicate::str::contains("105,Farhan,W2,Delhi,Saket,Night,11,25,50,100,175"))
        .stdout(predicate::str::contains("103,Meena,W1,Pune,Aundh,Day,5,25,50,0,75"))
        .stdout(predicate::str::contains("102,Ravi,W1,Pune,Baner,Night,1,25,0,0,25"))
        .stdout(predicate::str::contains("101,Asha,W1,Pune,Baner,Day,0,0,0,0,0"));

    Ok(())
}

#[test]
fn test_output_sorted_by_total_payout() {
    let output = Command::new(cargo_bin!("surge-payouts"))
        .arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--milestones")
        .arg("1:10,3:20")
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let ids: Vec<&str> = stdout
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    // 103, 104 and 105 tie at 30 and keep input order
    assert_eq!(ids, vec!["103", "104", "105", "102", "101"]);
}

#[test]
fn test_per_zone_milestones_with_fallback() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--zone")
        .arg("Pune/Baner=1:30")
        .arg("--zone")
        .arg("Pune/Aundh=5:60")
        .arg("--fallback")
        .arg("1:10");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "orders,milestone_5_payout,milestone_1_payout,total_payout",
        ))
        .stdout(predicate::str::contains("103,Meena,W1,Pune,Aundh,Day,5,60,,60"))
        .stdout(predicate::str::contains("102,Ravi,W1,Pune,Baner,Night,1,,30,30"))
        // Delhi has no zone milestones of its own
        .stdout(predicate::str::contains("104,Kiran,W1,Delhi,Saket,Day,10,,10,10"));
}

#[test]
fn test_first_defined_zone_is_default_fallback() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--zone")
        .arg("Pune/Aundh=5:60")
        .arg("--zone")
        .arg("Pune/Baner=1:30");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("104,Kiran,W1,Delhi,Saket,Day,10,60,,60"));
}

#[test]
fn test_unknown_fallback_zone_fails() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--zone")
        .arg("Pune/Baner=1:30")
        .arg("--fallback-zone")
        .arg("Goa/Panjim");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Goa/Panjim"));
}

#[test]
fn test_filters() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--city")
        .arg("Pune")
        .arg("--min-orders")
        .arg("1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("102,Ravi"))
        .stdout(predicate::str::contains("103,Meena"))
        .stdout(predicate::str::contains("101,Asha").not())
        .stdout(predicate::str::contains("Delhi").not());
}

#[test]
fn test_week_and_shift_filters() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--week")
        .arg("W2")
        .arg("--shift")
        .arg("Night");

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header plus Farhan
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("105,Farhan"));
}

#[test]
fn test_latest_week_filter() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--latest-week");

    let output = cmd.output().expect("Failed to execute command");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // W2 only holds Farhan
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("105,Farhan,W2"));
}

#[test]
fn test_latest_week_conflicts_with_week() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--latest-week")
        .arg("--week")
        .arg("W1");

    cmd.assert().failure();
}

#[test]
fn test_duplicate_thresholds_double_count() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--milestones")
        .arg("5:50,5:30")
        .arg("--eligibility");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "orders,milestone_5_payout,milestone_5_eligible,total_payout",
        ))
        .stdout(predicate::str::contains("103,Meena,W1,Pune,Aundh,Day,5,30,true,80"))
        .stdout(predicate::str::contains("102,Ravi,W1,Pune,Baner,Night,1,0,false,0"));
}

#[test]
fn test_invalid_milestone_rejected() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--milestones")
        .arg("0:25");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be at least 1"));
}

#[test]
fn test_milestones_conflict_with_zones() {
    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--milestones")
        .arg("1:25")
        .arg("--zone")
        .arg("Pune/Baner=1:30");

    cmd.assert().failure();
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("payouts.csv");

    let mut cmd = Command::new(cargo_bin!("surge-payouts"));
    cmd.arg("compute")
        .arg("tests/fixtures/seed.csv")
        .arg("--output")
        .arg(&out);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 6);
    assert!(content.contains("104,Kiran,W1,Delhi,Saket,Day,10,25,50,100,175"));
}
