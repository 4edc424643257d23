//! Handler for `bindery resolve`.

use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result};

use bindery_core::config::{GlobalConfig, Strictness};
use bindery_ops::ops_resolve::{self, ResolveOptions};
use bindery_resolver::warning::WarningSink;

/// Prints resolver warnings to stderr.
struct StderrSink;

impl WarningSink for StderrSink {
    fn warn(&mut self, message: &str) {
        eprintln!("{}", style(message).yellow());
    }
}

pub fn exec(manifest_path: Option<&Path>, strict: bool, lenient: bool, json: bool) -> Result<()> {
    let cwd = super::current_dir()?;
    let config = GlobalConfig::load()?;

    let strictness = match (strict, lenient) {
        (true, _) => Some(Strictness::Strict),
        (_, true) => Some(Strictness::Lenient),
        _ => None,
    };
    let opts = ResolveOptions {
        manifest_path: manifest_path.map(Path::to_path_buf),
        strictness,
    };

    let resolution = ops_resolve::resolve(&cwd, &opts, &config, &mut StderrSink)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolution).into_diagnostic()?
        );
        return Ok(());
    }

    let width = resolution
        .bindings
        .iter()
        .map(|b| b.name.len())
        .max()
        .unwrap_or(0);
    for binding in &resolution.bindings {
        println!(
            "{:<width$}  {} ({})",
            binding.name, binding.source, binding.description
        );
    }
    eprintln!(
        "{:>12} {} gems ({} mode)",
        style("Attributed").green().bold(),
        resolution.bindings.len(),
        resolution.strictness
    );
    Ok(())
}
