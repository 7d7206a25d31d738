//! Smart-home simulator entry point: CLI wiring and config-driven sessions.

use std::process;

use smart_home_sim::cli::{self, CliOptions};
use smart_home_sim::config::HomeConfig;
use smart_home_sim::io::export::export_csv;
use smart_home_sim::sim::context::HomeContext;
use smart_home_sim::sim::runner::run_session;
use tracing_subscriber::EnvFilter;

fn load_config(cli: &CliOptions) -> HomeConfig {
    // --config takes priority, then --preset, then the demo household
    let loaded = if let Some(ref path) = cli.config {
        HomeConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        HomeConfig::from_preset(name)
    } else {
        Ok(HomeConfig::demo())
    };

    let mut cfg = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed {
        cfg.simulation.seed = seed;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

fn context_for(cfg: &HomeConfig) -> HomeContext {
    match cfg.simulation.clock.as_str() {
        "system" => HomeContext::system(),
        _ => HomeContext::manual().0,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if cli.help {
        cli::print_usage();
        return;
    }

    let cfg = load_config(&cli);
    let mut ctx = context_for(&cfg);

    if let Some(selection) = &cli.demo {
        for demo in selection.demos() {
            match demo.run(&mut ctx) {
                Ok(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                    println!();
                }
                Err(e) => {
                    eprintln!("error: demo {demo} failed: {e}");
                    process::exit(1);
                }
            }
        }
        println!("Devices created in this run: {}", ctx.devices_created());
        println!("Energy booked in this run:   {:.4} Wh", ctx.total_energy_wh());
        return;
    }

    let outcome = run_session(&cfg, &mut ctx).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    println!("--- Devices running ---");
    for status in &outcome.statuses {
        println!("{status}");
    }
    for (id, volts) in &outcome.sensor_readings {
        println!("Sensor {id}: {volts:.2} V");
    }

    println!("\n{}", outcome.during);
    println!("\n{}", outcome.after);

    if let Some(ref path) = cli.report_out {
        if let Err(e) = export_csv(&outcome.after.devices, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Report written to {}", path.display());
    }
}
