//! # funcscope - Main Entry Point
//!
//! Thin drivers over the library: resolve the target binary, run one
//! lookup or the fold aggregator, print the result. Lookup misses exit
//! nonzero with a diagnostic on stderr, matching how the tracing scripts
//! consume these tools.

use anyhow::{Context, Result};
use clap::Parser;
use funcscope::cli::{Cli, Command, TargetArgs};
use funcscope::image::BinaryImage;
use funcscope::process_lookup::{find_process_by_name, resolve_exe_path};
use funcscope::{fold, locator, probe};
use log::info;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;

fn main() {
    // Lookup diagnostics (ambiguous pattern, malformed metadata) are logged
    // at warn level and should be visible without RUST_LOG set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    std::process::exit(match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    });
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Command::Locate { pattern, target, json, demangle } => {
            locate(&target, &pattern, json, demangle)
        }
        Command::Whois { target, addr } => whois(&target, addr),
        Command::Render { pattern, target } => render(&target, &pattern),
        Command::Fold { file } => run_fold(file.as_deref()),
    }
}

/// Resolve the binary to inspect from CLI arguments.
///
/// Supports three modes:
/// - positional path - inspect that file
/// - `--pid 1234` - inspect the executable of a running process
/// - `--process name` - find a unique process by name, inspect its executable
fn resolve_target_path(target: &TargetArgs) -> Result<PathBuf> {
    if let Some(ref name) = target.process {
        let found = find_process_by_name(name)?;
        info!("matched process {} ({})", found.pid, found.command);
        return Ok(found.exe_path);
    }

    if let Some(pid) = target.pid {
        return resolve_exe_path(pid);
    }

    let Some(ref path) = target.binary else {
        anyhow::bail!(
            "Missing target: pass a BINARY path, --pid <PID> or --process <NAME>\n\n\
             Run 'funcscope --help' for examples"
        );
    };
    std::fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

fn open_target(target: &TargetArgs) -> Result<BinaryImage> {
    let path = resolve_target_path(target)?;
    info!("inspecting {}", path.display());
    BinaryImage::open(&path).with_context(|| format!("Failed to load {}", path.display()))
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid pattern: {pattern}"))
}

fn locate(target: &TargetArgs, pattern: &str, json: bool, demangle: bool) -> Result<i32> {
    let image = open_target(target)?;
    let regex = compile_pattern(pattern)?;

    let Some(range) = locator::resolve(&image, &regex) else {
        eprintln!("range for function {pattern} not found");
        return Ok(EXIT_ERROR);
    };

    let name = if demangle { funcscope::demangle(&range.name) } else { range.name.clone() };
    if json {
        let payload = serde_json::json!({ "name": name, "low": range.low, "high": range.high });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{name} 0x{:x} 0x{:x}", range.low, range.high);
    }
    Ok(EXIT_SUCCESS)
}

fn whois(target: &TargetArgs, addr: u64) -> Result<i32> {
    let image = open_target(target)?;

    match locator::resolve_containing(&image, addr) {
        Some(name) => {
            println!("{name}");
            Ok(EXIT_SUCCESS)
        }
        None => {
            eprintln!("no function covers address 0x{addr:x}");
            Ok(EXIT_ERROR)
        }
    }
}

fn render(target: &TargetArgs, pattern: &str) -> Result<i32> {
    let image = open_target(target)?;
    let regex = compile_pattern(pattern)?;

    let Some(range) = locator::resolve(&image, &regex) else {
        eprintln!("range for function {pattern} not found");
        return Ok(EXIT_ERROR);
    };

    info!("rendering probe for {} [0x{:x}, 0x{:x})", range.name, range.low, range.high);
    print!("{}", probe::render(probe::JUMP_COUNT_TEMPLATE, &range));
    Ok(EXIT_SUCCESS)
}

fn run_fold(file: Option<&Path>) -> Result<i32> {
    let totals = match file {
        Some(path) => {
            let reader = BufReader::new(
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
            );
            fold::fold(reader)?
        }
        None => fold::fold(io::stdin().lock())?,
    };

    let stdout = io::stdout();
    fold::write_folded(&mut stdout.lock(), &totals)?;
    Ok(EXIT_SUCCESS)
}
