//! Integration tests for configured sessions and the command-line binary.

mod common;

use std::path::Path;
use std::process::Command;
use std::time::Duration;

use smart_home_sim::config::HomeConfig;
use smart_home_sim::io::export::write_csv;
use smart_home_sim::scenario::Demo;
use smart_home_sim::sim::clock::Clock;
use smart_home_sim::sim::runner::run_session;

#[test]
fn studio_file_session_books_rated_energy() {
    let cfg = HomeConfig::from_toml_file(Path::new("homes/studio.toml")).expect("file loads");
    assert!(cfg.validate().is_empty());

    let (mut ctx, clock) = common::manual_context();
    let outcome = run_session(&cfg, &mut ctx).expect("session runs");

    assert_eq!(clock.now(), Duration::from_secs(1800));
    // (40 + 1200 + 2000) W for half an hour
    assert!((outcome.after.booked_energy_wh - 1620.0).abs() < 1e-9);
    assert_eq!(outcome.sensor_readings, vec![("SO1".to_string(), 220.0)]);
}

#[test]
fn apartment_preset_session_is_consistent() {
    let cfg = HomeConfig::apartment();
    let (mut ctx, _) = common::manual_context();
    let outcome = run_session(&cfg, &mut ctx).expect("session runs");

    assert_eq!(outcome.after.devices.len(), cfg.device_count());
    assert_eq!(outcome.after.devices_created, cfg.device_count() as u64);
    // once everything is off, booked and per-device energy agree
    assert!((outcome.after.booked_energy_wh - outcome.after.fleet_energy_wh).abs() < 1e-9);
    assert!((outcome.during.fleet_energy_wh - outcome.after.fleet_energy_wh).abs() < 1e-9);
    assert_eq!(outcome.after.current_power_w, 0.0);
}

#[test]
fn report_rows_export_as_csv() {
    let (mut ctx, _) = common::manual_context();
    let outcome = run_session(&HomeConfig::demo(), &mut ctx).expect("session runs");

    let mut buf = Vec::new();
    write_csv(&outcome.after.devices, &mut buf).expect("write to vec");
    let text = String::from_utf8(buf).expect("utf8");
    let ids: Vec<&str> = text
        .lines()
        .skip(1)
        .filter_map(|l| l.split(',').next())
        .collect();
    assert_eq!(ids, vec!["LB1", "TH1", "SO1"]);
}

#[test]
fn demos_share_one_context() {
    let (mut ctx, _) = common::manual_context();
    for demo in Demo::ALL {
        demo.run(&mut ctx).expect("demo succeeds");
    }
    assert!(ctx.devices_created() > 0);
    assert!(ctx.total_energy_wh() > 0.0);
}

#[test]
fn binary_runs_studio_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_smart-home-sim"))
        .args(["--config", "homes/studio.toml"])
        .output()
        .expect("smart-home-sim process should run");

    assert!(
        output.status.success(),
        "run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("--- Home Report ---"));
    assert!(stdout.contains("Booked energy (total):  1620.0000 Wh"));
}

#[test]
fn binary_runs_a_demo() {
    let output = Command::new(env!("CARGO_BIN_EXE_smart-home-sim"))
        .args(["--demo", "errors"])
        .output()
        .expect("smart-home-sim process should run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("=== Error handling ==="));
}

#[test]
fn binary_rejects_invalid_config() {
    let output = Command::new(env!("CARGO_BIN_EXE_smart-home-sim"))
        .args(["--preset", "mansion"])
        .output()
        .expect("smart-home-sim process should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"));
}
