//! Parking simulator entry point: CLI wiring and config-driven runs.

use std::process;

use tracing_subscriber::EnvFilter;

use parking_sim::cli::{self, CliOptions, Command};
use parking_sim::config::LotConfig;
use parking_sim::demo;
use parking_sim::io::export::{export_csv, export_snapshot_csv};
use parking_sim::sim::engine::Engine;
use parking_sim::sim::kpi::KpiReport;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config named on the command line: `--config` file, else preset.
fn load_config(opts: &CliOptions) -> LotConfig {
    let loaded = match (&opts.config, &opts.preset) {
        (Some(path), _) => LotConfig::from_toml_file(path),
        (None, Some(name)) => LotConfig::from_preset(name),
        (None, None) => Ok(LotConfig::demo()),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = opts.seed {
        config.simulation.seed = seed;
    }
    if let Some(steps) = opts.steps {
        config.simulation.steps = steps;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    config
}

fn main() {
    init_logging();

    let opts = match cli::parse_args() {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            cli::print_usage();
            return;
        }
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!("Run with --help for usage.");
            process::exit(1);
        }
    };

    let config = load_config(&opts);

    if opts.demo {
        let mut lot = config.build_lot();
        demo::run(&mut lot);
        return;
    }

    if opts.tui {
        run_tui(config, &opts);
        return;
    }

    let mut engine = Engine::from_config(&config);
    let results = engine.run();

    if !opts.quiet {
        for r in &results {
            println!("{r}");
        }
    }
    println!("\n=== {} ===", config.lot.name);
    println!("{}", KpiReport::from_results(&results));

    let lot = engine.into_lot();
    println!();
    lot.display_availability();

    if let Some(ref path) = opts.telemetry_out {
        if let Err(e) = export_csv(&results, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {}", path.display());
    }

    if let Some(ref path) = opts.snapshot_out {
        if let Err(e) = export_snapshot_csv(&lot.snapshot(), path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Snapshot written to {}", path.display());
    }

    if opts.serve {
        serve(lot, opts.port);
    }
}

#[cfg(feature = "tui")]
fn run_tui(config: LotConfig, opts: &CliOptions) {
    let name = match (&opts.config, &opts.preset) {
        (Some(_), _) => "custom",
        (None, Some(name)) => name.as_str(),
        (None, None) => "demo",
    };
    if let Err(e) = parking_sim::tui::run(config, name) {
        eprintln!("error: TUI crashed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "tui"))]
fn run_tui(_config: LotConfig, _opts: &CliOptions) {
    eprintln!("error: --tui requires building with `--features tui`");
    process::exit(1);
}

#[cfg(feature = "api")]
fn serve(lot: parking_sim::lot::ParkingLot, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let state = Arc::new(parking_sim::api::AppState::new(lot));
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(parking_sim::api::serve(state, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}

#[cfg(not(feature = "api"))]
fn serve(_lot: parking_sim::lot::ParkingLot, _port: u16) {
    eprintln!("error: --serve requires building with `--features api`");
    process::exit(1);
}
