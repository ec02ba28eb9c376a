//! Command-line argument parsing for the `parking-sim` binary.

use std::env;
use std::path::PathBuf;

/// Default API port for `--serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub steps: Option<usize>,
    pub telemetry_out: Option<PathBuf>,
    pub snapshot_out: Option<PathBuf>,
    pub demo: bool,
    pub quiet: bool,
    pub tui: bool,
    pub serve: bool,
    pub port: u16,
}

/// What `parse_args` asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliOptions),
    Help,
}

/// Parses the process arguments.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

/// Parses an explicit argument list (without the program name).
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args_from(args: &[String]) -> Result<Command, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        config: None,
        preset: None,
        seed: None,
        steps: None,
        telemetry_out: None,
        snapshot_out: None,
        demo: false,
        quiet: false,
        tui: false,
        serve: false,
        port: DEFAULT_PORT,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
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
                opts.seed = Some(seed);
            }
            "--steps" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --steps (expected a step count)")?;
                let steps = raw
                    .parse::<usize>()
                    .map_err(|_| format!("--steps value \"{raw}\" is not a valid count"))?;
                opts.steps = Some(steps);
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --telemetry-out (expected a file path)")?;
                opts.telemetry_out = Some(PathBuf::from(path));
            }
            "--snapshot-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --snapshot-out (expected a file path)")?;
                opts.snapshot_out = Some(PathBuf::from(path));
            }
            "--demo" => opts.demo = true,
            "--quiet" | "-q" => opts.quiet = true,
            "--tui" => opts.tui = true,
            "--serve" => opts.serve = true,
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --port (expected a u16)")?;
                opts.port = raw
                    .parse::<u16>()
                    .map_err(|_| format!("--port value \"{raw}\" is not a valid u16"))?;
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

    if opts.config.is_none() && opts.preset.is_none() {
        opts.preset = Some("demo".to_string());
    }

    Ok(Command::Run(opts))
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

/// Prints usage to stderr.
pub fn print_usage() {
    eprintln!("parking-sim: parking lot model and traffic simulator");
    eprintln!();
    eprintln!("Usage: parking-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load lot and simulation from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (demo, compact, truck_stop)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --steps <n>              Override number of simulation steps");
    eprintln!("  --telemetry-out <path>   Export step results to CSV");
    eprintln!("  --snapshot-out <path>    Export final spot states to CSV");
    eprintln!("  --demo                   Run the scripted walkthrough instead of a simulation");
    eprintln!("  --quiet, -q              Skip per-step output");
    eprintln!("  --tui                    Live terminal view (requires the `tui` feature)");
    eprintln!("  --serve                  Serve the final lot over HTTP (requires `api`)");
    eprintln!("  --port <u16>             API server port (default: {DEFAULT_PORT})");
    eprintln!("  --help, -h               Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the demo preset is used.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostic logging.");
}
