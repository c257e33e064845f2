/// Schema Resolver: merges a project schema slice over the framework
/// baseline and prints the resolved slice.
///
/// Usage: schema_resolver <project_slice> [--baseline <path>] [--json]
///
/// Slices ending in `.json` are read as JSON, anything else as RON.
/// Set `RUST_LOG=canonry=debug` to see merge decisions.

use canonry::core::framework::{framework_baseline, load_slice};
use canonry::core::merge::merge_framework_schema;
use canonry::schema::slice::CanonrySchemaSlice;
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
        println!("Usage: schema_resolver <project_slice> [--baseline <path>] [--json]");
        process::exit(0);
    }

    let project_path = &args[1];
    let mut baseline_path = None;
    let mut as_json = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" if i + 1 < args.len() => {
                i += 1;
                baseline_path = Some(args[i].clone());
            }
            "--json" => as_json = true,
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let project = match load_slice(Path::new(project_path)) {
        Ok(slice) => slice,
        Err(e) => {
            eprintln!("ERROR: Failed to load project slice: {}", e);
            process::exit(1);
        }
    };

    let baseline = match baseline_path {
        Some(ref path) => load_slice(Path::new(path)),
        None => framework_baseline().cloned(),
    };
    let baseline = match baseline {
        Ok(slice) => slice,
        Err(e) => {
            eprintln!("ERROR: Failed to load framework baseline: {}", e);
            process::exit(1);
        }
    };

    let resolved = merge_framework_schema(&baseline, &project);
    print_summary(&resolved);

    let output = if as_json {
        serde_json::to_string_pretty(&resolved).map_err(|e| e.to_string())
    } else {
        ron::ser::to_string_pretty(&resolved, ron::ser::PrettyConfig::default())
            .map_err(|e| e.to_string())
    };

    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("ERROR: Failed to serialize resolved slice: {}", e);
            process::exit(1);
        }
    }
}

fn print_summary(resolved: &CanonrySchemaSlice) {
    fn framework_count(flags: impl Iterator<Item = Option<bool>>) -> usize {
        flags.filter(|f| *f == Some(true)).count()
    }

    eprintln!("=== Resolved Schema ===");
    eprintln!(
        "  entity kinds:       {} ({} framework)",
        resolved.entity_kinds.len(),
        framework_count(resolved.entity_kinds.iter().map(|k| k.is_framework))
    );
    eprintln!(
        "  relationship kinds: {} ({} framework)",
        resolved.relationship_kinds.len(),
        framework_count(resolved.relationship_kinds.iter().map(|k| k.is_framework))
    );
    eprintln!(
        "  cultures:           {} ({} framework)",
        resolved.cultures.len(),
        framework_count(resolved.cultures.iter().map(|c| c.is_framework))
    );
    let tags = resolved.tag_registry.as_deref().unwrap_or(&[]);
    eprintln!(
        "  tags:               {} ({} framework)",
        tags.len(),
        framework_count(tags.iter().map(|t| t.is_framework))
    );
}
