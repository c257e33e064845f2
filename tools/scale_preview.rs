/// Scale Preview: builds a prominence scale from a sample of values and
/// shows where the thresholds land.
///
/// Usage: scale_preview <values_file> [--options <ron>] [--value <n>]...
///
/// The values file holds numbers separated by whitespace or commas; tokens
/// that are not numbers are skipped. Each `--value` is labeled against the
/// resulting scale.

use canonry::core::prominence::{build_prominence_scale, ScaleOptions};
use std::path::Path;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: scale_preview <values_file> [--options <ron>] [--value <n>]...");
        process::exit(0);
    }

    let values_path = &args[1];
    let mut options = ScaleOptions::default();
    let mut probes: Vec<f64> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--options" if i + 1 < args.len() => {
                i += 1;
                options = match ScaleOptions::load_from_ron(Path::new(&args[i])) {
                    Ok(options) => options,
                    Err(e) => {
                        eprintln!("ERROR: Failed to load scale options: {}", e);
                        process::exit(1);
                    }
                };
            }
            "--value" if i + 1 < args.len() => {
                i += 1;
                match args[i].parse() {
                    Ok(v) => probes.push(v),
                    Err(_) => eprintln!("Ignoring non-numeric --value '{}'", args[i]),
                }
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let contents = match std::fs::read_to_string(values_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to read values: {}", e);
            process::exit(1);
        }
    };

    let mut skipped = 0usize;
    let values: Vec<f64> = contents
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .filter_map(|t| match t.parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                skipped += 1;
                None
            }
        })
        .collect();

    let scale = build_prominence_scale(&values, &options);

    println!("=== Prominence Scale ===\n");
    println!("Samples: {} ({} tokens skipped)", values.len(), skipped);
    println!("Range:   [{}, {}]", scale.min, scale.max);
    if values.iter().all(|v| !v.is_finite()) {
        println!("No usable samples: thresholds are evenly spaced.");
    }
    println!();

    let histogram = scale.histogram(&values);
    for (i, (label, count)) in histogram.iter().enumerate() {
        let lower = if i == 0 { scale.min } else { scale.thresholds[i - 1] };
        let upper = scale
            .thresholds
            .get(i)
            .map(|t| format!("{:.3}", t))
            .unwrap_or_else(|| "∞".to_string());
        println!(
            "  {:<12} [{:.3}, {})  weight {:.3}  count {}",
            label, lower, upper, scale.distribution[i], count
        );
    }

    if !probes.is_empty() {
        println!();
        for v in probes {
            println!("  {} -> {}", v, scale.label_for(v));
        }
    }
}
