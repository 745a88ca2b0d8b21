//! Cache hierarchy simulator CLI.
//!
//! Replays a memory access trace through a configured chain of write-back
//! cache levels and prints per-level hit/miss/eviction/writeback
//! statistics. The chain is described by a JSON file (see
//! `HierarchyConfig`); without one, a two-level default is used.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::HierarchyConfig;
use cachesim_core::hierarchy::CacheHierarchy;
use cachesim_core::sim::{self, trace};
use cachesim_core::stats::HierarchyStats;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Multi-level set-associative cache hierarchy simulator",
    long_about = "Replay a memory access trace through a chain of write-back cache levels.\n\nTrace format: one access per line, `<op> <address>` with op in {R, W, B} and a decimal or 0x-hex address. Lines starting with # are skipped.\n\nSet RUST_LOG=cachesim_core=trace to watch individual accesses.\n\nExamples:\n  cachesim traces/gcc.trace\n  cachesim --config two_level.json traces/gcc.trace"
)]
struct Cli {
    /// Access trace file to replay.
    trace: PathBuf,

    /// JSON hierarchy configuration (defaults to a 32 KiB L1 over a 256 KiB L2).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli
        .config
        .as_deref()
        .map_or_else(HierarchyConfig::default, load_config);

    let mut hierarchy = CacheHierarchy::new(&config).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: invalid hierarchy configuration: {e}");
        process::exit(1);
    });

    let entries = trace::load(&cli.trace).unwrap_or_else(|e| {
        eprintln!(
            "\n[!] FATAL: could not load trace '{}': {e}",
            cli.trace.display()
        );
        process::exit(1);
    });

    let mut stats = HierarchyStats::new();
    sim::run(&mut hierarchy, &entries, &mut stats);
    stats.print();
}

/// Reads and parses a JSON hierarchy configuration, exiting on failure.
fn load_config(path: &Path) -> HierarchyConfig {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: could not read config '{}': {e}", path.display());
        process::exit(1);
    });
    HierarchyConfig::from_json(&text).unwrap_or_else(|e| {
        eprintln!(
            "\n[!] FATAL: could not parse config '{}': {e}",
            path.display()
        );
        process::exit(1);
    })
}
