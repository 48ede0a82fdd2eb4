//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "funcscope",
    about = "Locate function address ranges for VM tracing",
    after_help = "\
EXAMPLES:
    funcscope locate __rg_alloc ./ckb-debugger     Resolve a range by pattern
    funcscope locate fib --pid 1234                Inspect a running process
    funcscope whois ./fib --addr 0x102ce           Which function covers an address
    funcscope render fib ./fib                     Print the jump-count probe program
    cat report.txt | funcscope fold                Sum duplicate stack lines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a function's address range by name pattern
    Locate {
        /// Regex searched against function names (substring semantics)
        pattern: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,

        /// Demangle the resolved name for display
        #[arg(long)]
        demangle: bool,
    },

    /// Find which function contains an address
    Whois {
        #[command(flatten)]
        target: TargetArgs,

        /// Address to look up (0x-prefixed hex or decimal)
        #[arg(long, value_parser = parse_addr)]
        addr: u64,
    },

    /// Render the jump-count probe program for a function
    Render {
        /// Regex searched against function names (substring semantics)
        pattern: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Sum duplicate-prefixed count lines from a report stream
    Fold {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
}

/// Where to find the binary to inspect.
#[derive(Args)]
pub struct TargetArgs {
    /// Path to the binary
    #[arg(value_name = "BINARY")]
    pub binary: Option<PathBuf>,

    /// Inspect the executable of a running process instead of a path
    #[arg(short, long, conflicts_with_all = ["binary", "process"])]
    pub pid: Option<i32>,

    /// Find a running process by name and inspect its executable
    #[arg(long, conflicts_with = "binary")]
    pub process: Option<String>,
}

fn parse_addr(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid address: {s}"))
}
