use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

// 300 at-rest rows at bias -20, then 50 one-second samples of 8.75 dps forward swing
fn write_trace(dir: &Path) -> PathBuf {
    let path = dir.join("walk.csv");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "rate,interval_ms").unwrap();
    for _ in 0..300 {
        writeln!(f, "-20,10").unwrap();
    }
    for _ in 0..50 {
        writeln!(f, "-1020,1000").unwrap();
    }
    path
}

fn strider() -> Command {
    Command::cargo_bin("strider").unwrap()
}

#[rstest]
#[case(&["--help"], 0, "Usage:", "stdout")]
#[case(&["replay"], 2, "--trace", "stderr")]
#[case(&["fly"], 2, "unrecognized subcommand", "stderr")]
#[case(&["run", "--poll-hz", "0"], 2, "poll-hz", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let assert = strider().args(args).assert().code(exit_code);
    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn replay_prints_distance_and_window_summary() {
    let dir = tempdir().unwrap();
    let trace = write_trace(dir.path());

    // Missing config file falls back to the built-in defaults
    strider()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--log-level")
        .arg("error")
        .arg("replay")
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 11 Meters"))
        .stdout(predicate::str::contains(
            "In the first window you have traveled: 9 meters",
        ));
}

#[rstest]
fn replay_skips_rows_without_data() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gappy.csv");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "rate,interval_ms").unwrap();
    for i in 0..300 {
        writeln!(f, "-20,10").unwrap();
        if i % 50 == 0 {
            writeln!(f, ",0").unwrap();
        }
    }
    for i in 0..50 {
        writeln!(f, "-1020,1000").unwrap();
        if i % 10 == 0 {
            writeln!(f, ",0").unwrap();
            writeln!(f, ",0").unwrap();
        }
    }
    drop(f);

    // Same motion as the gap-free trace, so the same distance
    strider()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--log-level")
        .arg("error")
        .arg("replay")
        .arg("--trace")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 11 Meters"))
        .stdout(predicate::str::contains(
            "In the first window you have traveled: 9 meters",
        ));
}

#[rstest]
fn replay_honours_config_radius() {
    let dir = tempdir().unwrap();
    let trace = write_trace(dir.path());
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[integrator]\nradius_m = 3.1\n").unwrap();

    strider()
        .arg("--config")
        .arg(&cfg)
        .arg("--log-level")
        .arg("error")
        .arg("replay")
        .arg("--trace")
        .arg(&trace)
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 23 Meters"));
}

#[rstest]
#[case("[integrator]\nradius_m = 0.0\n", "integrator.radius_m")]
#[case("[sampling]\npoll_hz = 0\n", "sampling.poll_hz")]
#[case("[calibration]\nsamples = 300\nmax_polls = 10\n", "calibration.max_polls")]
#[case("[integrator\n", "TOML")]
fn invalid_config_exits_with_two(#[case] toml: &str, #[case] needle: &str) {
    let dir = tempdir().unwrap();
    let trace = write_trace(dir.path());
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, toml).unwrap();

    strider()
        .arg("--config")
        .arg(&cfg)
        .arg("replay")
        .arg("--trace")
        .arg(&trace)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration is invalid"))
        .stderr(predicate::str::contains(needle));
}

#[rstest]
fn replay_rejects_bad_trace_header() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "rate,dt\n-20,10\n").unwrap();

    strider()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("replay")
        .arg("--trace")
        .arg(&bad)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected 'rate,interval_ms'"));
}

#[rstest]
fn replay_rejects_trace_shorter_than_calibration() {
    let dir = tempdir().unwrap();
    let short = dir.path().join("short.csv");
    fs::write(&short, "rate,interval_ms\n-20,10\n-20,10\n").unwrap();

    strider()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("replay")
        .arg("--trace")
        .arg(&short)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("calibration needs 300"));
}

#[rstest]
fn run_with_sample_limit_finishes() {
    let dir = tempdir().unwrap();
    strider()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--log-level")
        .arg("error")
        .arg("run")
        .arg("--max-samples")
        .arg("5")
        .arg("--poll-hz")
        .arg("1000")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calibrating"))
        .stdout(predicate::str::contains("Distance:"));
}

#[rstest]
fn self_check_reports_simulated_bias() {
    let dir = tempdir().unwrap();
    strider()
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .arg("--log-level")
        .arg("error")
        .arg("self-check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: bias -25 LSB"));
}
