//! BESS simulator entry point — CLI wiring and config-driven dispatch runs.

use std::path::Path;
use std::process;

use bess_sim::config::ScenarioConfig;
use bess_sim::io::export::export_csv;
use bess_sim::io::import::read_production_csv;
use bess_sim::profile;
use bess_sim::sim::engine::Engine;

/// Parsed CLI arguments.
struct CliArgs {
    input_path: Option<String>,
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    out_path: Option<String>,
    quiet: bool,
}

fn print_help() {
    eprintln!("bess-sim — battery storage dispatch simulator for wind-plant output");
    eprintln!();
    eprintln!("Usage: bess-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>       Read the production series from a CSV file");
    eprintln!("                       (columns: timestamp, production_mw)");
    eprintln!("  --scenario <path>    Load scenario from TOML config file");
    eprintln!("  --preset <name>      Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>         Override the synthetic profile seed");
    eprintln!("  --out <path>         Export step records to CSV");
    eprintln!("  --quiet              Suppress per-step output lines");
    eprintln!("  --help               Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("Without --input, a synthetic profile from the [profile] section is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        input_path: None,
        scenario_path: None,
        preset: None,
        seed_override: None,
        out_path: None,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--input" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --input requires a path argument");
                    process::exit(1);
                }
                cli.input_path = Some(args[i].clone());
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a path argument");
                    process::exit(1);
                }
                cli.out_path = Some(args[i].clone());
            }
            "--quiet" => {
                cli.quiet = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive; choose one source");
        process::exit(1);
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario, then --preset, then the baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.profile.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Production series: metered file if given, synthetic profile otherwise
    let rows = if let Some(ref path) = cli.input_path {
        match read_production_csv(Path::new(path)) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        match profile::generate_rows(&scenario.profile) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    };

    // Build and run
    let mut engine = match Engine::new(scenario.battery.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let result = match engine.run(&rows) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print per-step records
    if !cli.quiet {
        for r in &result.records {
            println!("{r}");
        }
    }

    // Print summary report
    println!("\n{}", result.summary);

    // Export CSV if requested
    if let Some(ref path) = cli.out_path {
        if let Err(e) = export_csv(&result.records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Step records written to {path}");
    }
}
