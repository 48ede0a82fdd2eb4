//! Resolve a running process to the executable it was started from.
//!
//! The tracing drivers are usually pointed at a live debugger process
//! rather than a file on disk; this module turns a PID or a process name
//! into the binary path the locator should inspect.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A process matched by name.
#[derive(Debug)]
pub struct ProcessInfo {
    pub pid: i32,
    pub exe_path: PathBuf,
    pub command: String,
}

/// Resolve a binary path from a PID via `/proc/<pid>/exe`.
///
/// # Errors
/// Returns an error if the process does not exist or the link is not
/// readable (typically a permissions problem).
pub fn resolve_exe_path(pid: i32) -> Result<PathBuf> {
    let exe_link = format!("/proc/{pid}/exe");
    fs::read_link(&exe_link).with_context(|| format!("Cannot read {exe_link}"))
}

/// Find a unique running process by name.
///
/// Matches against the command name from `/proc/<pid>/comm` and the
/// executable basename, exactly or by substring.
///
/// # Errors
/// - No matching process
/// - More than one matching process (the candidates are listed)
pub fn find_process_by_name(name: &str) -> Result<ProcessInfo> {
    let mut matches: Vec<ProcessInfo> = Vec::new();

    for entry in fs::read_dir("/proc").context("Failed to read /proc")?.flatten() {
        let Ok(pid) = entry.file_name().to_string_lossy().parse::<i32>() else {
            continue;
        };

        // Kernel threads and inaccessible processes have no readable exe link
        let Ok(exe_path) = fs::read_link(format!("/proc/{pid}/exe")) else {
            continue;
        };
        let Ok(command) = fs::read_to_string(format!("/proc/{pid}/comm")) else {
            continue;
        };
        let command = command.trim_end().to_string();

        if name_matches(&command, &exe_path, name) {
            matches.push(ProcessInfo { pid, exe_path, command });
        }
    }

    match matches.len() {
        0 => bail!("No process matching '{name}' found"),
        1 => Ok(matches.remove(0)),
        _ => {
            let list: Vec<String> =
                matches.iter().map(|m| format!("  {} ({})", m.pid, m.command)).collect();
            bail!(
                "Multiple processes match '{name}':\n{}\n\n\
                 Specify the PID instead: --pid <PID>",
                list.join("\n")
            )
        }
    }
}

fn name_matches(command: &str, exe_path: &Path, pattern: &str) -> bool {
    let exe_basename = exe_path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    command == pattern
        || exe_basename == pattern
        || command.contains(pattern)
        || exe_basename.contains(pattern)
}
