//! Integration tests driving the compiled binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bess-sim"))
        .args(args)
        .output()
        .expect("bess-sim process should run")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bess-sim-test-{}-{name}", std::process::id()))
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing report line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid report format for line `{line}`"));

    let numeric = raw.strip_suffix(unit).unwrap_or(raw).trim();
    numeric
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("failed parsing `{numeric}` from report line `{line}`"))
}

#[test]
fn baseline_preset_prints_report_and_one_line_per_hour() {
    let output = run_cli(&["--preset", "baseline"]);
    let stdout = stdout_of(&output);

    assert!(stdout.contains("--- Dispatch Report ---"));
    let step_lines = stdout
        .lines()
        .filter(|l| l.starts_with("2025-"))
        .count();
    assert_eq!(step_lines, 168);
}

#[test]
fn quiet_suppresses_step_lines_but_keeps_the_report() {
    let output = run_cli(&["--preset", "baseline", "--quiet"]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("--- Dispatch Report ---"));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("2025-")).count(), 0);
}

#[test]
fn same_seed_is_deterministic_and_seeds_change_the_run() {
    let run_a = stdout_of(&run_cli(&["--preset", "baseline", "--seed", "7", "--quiet"]));
    let run_b = stdout_of(&run_cli(&["--preset", "baseline", "--seed", "7", "--quiet"]));
    let run_c = stdout_of(&run_cli(&["--preset", "baseline", "--seed", "8", "--quiet"]));

    assert_eq!(run_a, run_b);
    assert_ne!(run_a, run_c);
}

#[test]
fn presets_produce_distinct_dynamics() {
    let baseline = stdout_of(&run_cli(&["--preset", "baseline", "--quiet"]));
    let high_wind = stdout_of(&run_cli(&["--preset", "high_wind", "--quiet"]));

    let baseline_peak = parse_metric(&baseline, "Peak production:", "MW");
    let high_wind_peak = parse_metric(&high_wind, "Peak production:", "MW");
    assert!(
        high_wind_peak > baseline_peak,
        "expected windier peak: baseline={baseline_peak:.2}, high_wind={high_wind_peak:.2}"
    );
}

#[test]
fn input_file_run_matches_hand_computed_totals() {
    let input = temp_path("trace.csv");
    fs::write(
        &input,
        "timestamp,production_mw\n\
         2025-01-06 00,3.0\n\
         2025-01-06 01,8.0\n\
         2025-01-06 02,2.0\n\
         2025-01-06 03,8.0\n\
         2025-01-06 04,0.0\n",
    )
    .expect("fixture write should succeed");

    let output = run_cli(&["--input", input.to_str().expect("utf-8 path"), "--quiet"]);
    let stdout = stdout_of(&output);
    fs::remove_file(&input).ok();

    assert_eq!(parse_metric(&stdout, "Charged into storage:", "MWh"), 6.0);
    assert_eq!(parse_metric(&stdout, "Discharged to grid:", "MWh"), 6.0);
    assert_eq!(parse_metric(&stdout, "Production shifted:", "MWh"), 0.0);
    assert_eq!(parse_metric(&stdout, "Peak grid export:", "MW"), 5.0);
}

#[test]
fn out_flag_writes_importable_telemetry() {
    let out = temp_path("telemetry.csv");
    let output = run_cli(&[
        "--preset",
        "baseline",
        "--quiet",
        "--out",
        out.to_str().expect("utf-8 path"),
    ]);
    stdout_of(&output);

    let content = fs::read_to_string(&out).expect("telemetry file should exist");
    fs::remove_file(&out).ok();

    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("timestamp,production_mw,charge_mw,discharge_mw,grid_export_mw,soc_mwh,cycles_used")
    );
    assert_eq!(lines.count(), 168);
}

#[test]
fn scenario_file_runs_via_cli() {
    let output = run_cli(&["--scenario", "scenarios/small_battery.toml", "--quiet"]);
    let stdout = stdout_of(&output);
    assert!(stdout.contains("--- Dispatch Report ---"));
}

#[test]
fn unknown_preset_fails_with_diagnostic() {
    let output = run_cli(&["--preset", "nonexistent"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"));
}

#[test]
fn scenario_and_preset_together_are_rejected() {
    let output = run_cli(&[
        "--scenario",
        "scenarios/baseline.toml",
        "--preset",
        "baseline",
    ]);
    assert!(!output.status.success());
}

#[test]
fn invalid_battery_config_is_rejected_before_running() {
    let scenario = temp_path("bad.toml");
    fs::write(&scenario, "[battery]\nmax_charge_mw = 0.0\n").expect("fixture write");

    let output = run_cli(&["--scenario", scenario.to_str().expect("utf-8 path")]);
    fs::remove_file(&scenario).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("battery.max_charge_mw"));
}

#[test]
fn unordered_input_is_rejected_with_row_index() {
    let input = temp_path("unordered.csv");
    fs::write(
        &input,
        "timestamp,production_mw\n\
         2025-01-06 02,3.0\n\
         2025-01-06 01,4.0\n",
    )
    .expect("fixture write");

    let output = run_cli(&["--input", input.to_str().expect("utf-8 path")]);
    fs::remove_file(&input).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ordering error"));
}
