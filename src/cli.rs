//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::scenario::Demo;

/// Which demonstrations to run instead of a configured session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoSelection {
    One(Demo),
    All,
}

impl DemoSelection {
    pub fn demos(&self) -> Vec<Demo> {
        match self {
            DemoSelection::One(d) => vec![*d],
            DemoSelection::All => Demo::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub demo: Option<DemoSelection>,
    pub report_out: Option<PathBuf>,
    pub help: bool,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions::default();

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                if opts.seed.replace(seed).is_some() {
                    return Err("--seed provided more than once".to_string());
                }
            }
            "--demo" => {
                i += 1;
                let name = args.next_or_err(
                    i,
                    "missing value for --demo (expected a demo name or `all`)",
                )?;
                let selection = if name == "all" {
                    DemoSelection::All
                } else {
                    Demo::from_name(name)
                        .map(DemoSelection::One)
                        .ok_or_else(|| format!("unknown demo: {name}"))?
                };
                if opts.demo.replace(selection).is_some() {
                    return Err("--demo provided more than once".to_string());
                }
            }
            "--report-out" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --report-out (expected a file path)")?;
                if opts.report_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--report-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                opts.help = true;
                return Ok(opts);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.demo.is_some() && opts.report_out.is_some() {
        return Err(
            "`--report-out` has no effect with `--demo`; demonstrations do not produce a report"
                .to_string(),
        );
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("smart-home-sim - household device and energy simulator");
    eprintln!();
    eprintln!("Usage: smart-home-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>       Load the household from a TOML file");
    eprintln!("  --preset <name>       Use a built-in household (demo, apartment)");
    eprintln!("  --seed <u64>          Override the sensor jitter seed");
    eprintln!("  --demo <name|all>     Run demonstrations instead of a session");
    let names: Vec<&str> = Demo::ALL.iter().map(|d| d.name()).collect();
    eprintln!("                        ({})", names.join(", "));
    eprintln!("  --report-out <path>   Export the final device report to CSV");
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the demo household is used.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to see device events.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_is_valid() {
        let opts = parse_args_from(Vec::new()).expect("parse should succeed");
        assert!(opts.config.is_none());
        assert!(opts.preset.is_none());
        assert!(opts.demo.is_none());
        assert!(!opts.help);
    }

    #[test]
    fn supports_config_cli() {
        let opts = parse_args_from(args(&["--config", "home.toml"])).expect("parse should succeed");
        assert_eq!(
            opts.config.as_deref().and_then(|p| p.to_str()),
            Some("home.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn supports_preset_and_seed() {
        let opts = parse_args_from(args(&["--preset", "apartment", "--seed", "7"]))
            .expect("parse should succeed");
        assert_eq!(opts.preset.as_deref(), Some("apartment"));
        assert_eq!(opts.seed, Some(7));
    }

    #[test]
    fn rejects_config_with_preset() {
        let err = parse_args_from(args(&["--config", "a.toml", "--preset", "demo"]))
            .expect_err("should be mutually exclusive");
        assert!(err.contains("mutually exclusive"));
    }

    #[test]
    fn rejects_bad_seed() {
        let err = parse_args_from(args(&["--seed", "-1"])).expect_err("negative seed");
        assert!(err.contains("not a valid u64"));
    }

    #[test]
    fn rejects_repeated_seed() {
        let err = parse_args_from(args(&["--seed", "1", "--seed", "2"])).expect_err("repeated");
        assert_eq!(err, "--seed provided more than once");
    }

    #[test]
    fn rejects_report_out_with_demo() {
        let err = parse_args_from(args(&["--demo", "all", "--report-out", "r.csv"]))
            .expect_err("demo has no report");
        assert!(err.contains("--report-out"));
    }

    #[test]
    fn parses_demo_selection() {
        let one = parse_args_from(args(&["--demo", "sensor"])).expect("parse should succeed");
        assert_eq!(one.demo, Some(DemoSelection::One(Demo::Sensor)));

        let all = parse_args_from(args(&["--demo", "all"])).expect("parse should succeed");
        assert_eq!(all.demo.map(|d| d.demos().len()), Some(Demo::ALL.len()));

        let err = parse_args_from(args(&["--demo", "menu"])).expect_err("unknown demo");
        assert!(err.contains("unknown demo"));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse_args_from(args(&["--report-out"])).expect_err("missing value");
        assert!(err.contains("--report-out"));
    }

    #[test]
    fn help_short_circuits() {
        let opts = parse_args_from(args(&["--help", "--bogus"])).expect("parse should succeed");
        assert!(opts.help);
    }

    #[test]
    fn rejects_unknown_argument() {
        let err = parse_args_from(args(&["--serve"])).expect_err("unknown");
        assert_eq!(err, "unknown argument: --serve");
    }
}
