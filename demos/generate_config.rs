//! Generate the default matcher configuration file
//!
//! Creates a JSON config with all default parameters

use shade_match::MatcherConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/matcher.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = MatcherConfig::default();

    match config.to_json_file(output_path) {
        Ok(()) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Catalog: {}",
                config
                    .catalog_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in".to_string())
            );
            eprintln!(
                "  Sampling: {:.1}% of shorter side, min {}px, canvas {}",
                config.sampling.region_fraction * 100.0,
                config.sampling.min_region_side,
                config
                    .sampling
                    .analysis_size
                    .map(|s| format!("{s}x{s}"))
                    .unwrap_or_else(|| "original size".to_string())
            );
            eprintln!(
                "  Ranking: top {}, {:?} scale (divisor {:.4})",
                config.ranking.top_k,
                config.ranking.scale,
                config.ranking.scale.divisor()
            );
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
