/// Exclusion Linter: validates random-selection exclusion rules against
/// the artistic and composition style catalogs.
///
/// Usage: exclusion_linter <rules> --styles <path> --compositions <path> [--matrix] [--strict]
///
/// `--matrix` prints, per style, the compositions random selection skips.
/// `--strict` exits non-zero when any warning is reported.

use canonry::core::exclusion::{
    lint_rules, load_artistic_styles, load_composition_styles, load_rules, ExclusionIndex,
};
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
        print_usage();
        process::exit(0);
    }

    let rules_path = &args[1];
    let mut styles_path = None;
    let mut compositions_path = None;
    let mut show_matrix = false;
    let mut strict = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--styles" if i + 1 < args.len() => {
                i += 1;
                styles_path = Some(args[i].clone());
            }
            "--compositions" if i + 1 < args.len() => {
                i += 1;
                compositions_path = Some(args[i].clone());
            }
            "--matrix" => show_matrix = true,
            "--strict" => strict = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let (Some(styles_path), Some(compositions_path)) = (styles_path, compositions_path) else {
        eprintln!("ERROR: --styles and --compositions are required");
        process::exit(1);
    };

    let rules = load_or_exit("rules", load_rules(Path::new(rules_path)));
    let styles = load_or_exit("artistic styles", load_artistic_styles(Path::new(&styles_path)));
    let compositions = load_or_exit(
        "composition styles",
        load_composition_styles(Path::new(&compositions_path)),
    );

    println!(
        "Loaded {} rules, {} styles, {} compositions",
        rules.len(),
        styles.len(),
        compositions.len()
    );

    let lints = lint_rules(&rules, &styles, &compositions);

    println!("\n=== Exclusion Lint Report ===\n");
    if lints.is_empty() {
        println!("All checks passed!");
    }
    for lint in &lints {
        println!("WARNING: {}", lint);
    }

    let index = ExclusionIndex::new(&rules, &styles, &compositions);
    let total = styles.len() * compositions.len();
    let excluded = styles
        .iter()
        .flat_map(|s| compositions.iter().map(move |c| (s, c)))
        .filter(|(s, c)| index.is_excluded(&s.id, &c.id))
        .count();

    if show_matrix {
        println!("\n=== Excluded Pairs ===\n");
        for style in &styles {
            let skipped: Vec<&str> = compositions
                .iter()
                .filter(|c| index.is_excluded(&style.id, &c.id))
                .map(|c| c.id.as_str())
                .collect();
            if !skipped.is_empty() {
                println!("  {}: {}", style.id, skipped.join(", "));
            }
        }
    }

    println!(
        "\nSummary: {} warnings, {}/{} pairs excluded from random selection",
        lints.len(),
        excluded,
        total
    );

    if strict && !lints.is_empty() {
        process::exit(1);
    }
}

fn load_or_exit<T, E: std::fmt::Display>(what: &str, result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("ERROR: Failed to load {}: {}", what, e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        "Usage: exclusion_linter <rules> --styles <path> --compositions <path> [--matrix] [--strict]"
    );
}
