//! Command-line interface for shade_match
//!
//! Analyze a photo and print the recommended shades, as text or JSON.

use shade_match::{analyze_photo, MatchReport, MatcherConfig};
use std::{env, path::Path, process};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut top_k = None;
    let mut json_output = false;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path.clone()),
                    None => {
                        eprintln!("Error: --config requires a file path");
                        process::exit(1);
                    }
                }
            }
            "--top" => {
                i += 1;
                match args.get(i).and_then(|v| v.parse::<usize>().ok()) {
                    Some(k) => top_k = Some(k),
                    None => {
                        eprintln!("Error: --top requires a non-negative number");
                        process::exit(1);
                    }
                }
            }
            "--json" => json_output = true,
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let mut config = match config_path {
        Some(path) => match MatcherConfig::from_json_file(Path::new(&path)) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Error: {}", error);
                process::exit(1);
            }
        },
        None => MatcherConfig::default(),
    };
    if let Some(k) = top_k {
        config.ranking.top_k = k;
    }

    match analyze_photo(Path::new(&image_path_str), &config) {
        Ok(report) if json_output => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Error serializing report: {}", error);
                process::exit(1);
            }
        },
        Ok(report) => print_report(&report),
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Sample the center of a photo and list the closest catalog shades.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    Load settings from a JSON config (see generate_config)");
    eprintln!("  --top N          Number of matches to show (default: 5)");
    eprintln!("  --json           Print the full report as JSON");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=shade_match=debug for sampling and ranking details.");
}

fn print_report(report: &MatchReport) {
    let color = report.color;
    println!("Sampled color: {} (r={}, g={}, b={})", report.hex, color.r, color.g, color.b);
    println!();
    for (rank, result) in report.matches.iter().enumerate() {
        let swatch = result
            .entry
            .rgb()
            .map(|color| color.to_hex_upper())
            .unwrap_or_else(|_| "unknown color".to_string());
        println!(
            "{:>2}. {:>3}% match  {} {} - {} ({})",
            rank + 1,
            result.similarity_percent,
            result.entry.brand,
            result.entry.name,
            result.entry.price,
            swatch,
        );
    }
}
