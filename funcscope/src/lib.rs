//! # funcscope - function address-range resolution for VM tracing
//!
//! funcscope answers one question about a compiled binary: where does a
//! function live? Given a name pattern it returns the `[low, high)` address
//! range of the matching function, trying the symbol table first and falling
//! back to a walk over the DWARF debug metadata. The resolved range is what
//! tracing drivers splice into their instrumentation programs before
//! attaching them to a running VM debugger.
//!
//! ## Module Structure
//!
//! - [`image`]: load a binary from disk and expose its symbol table and
//!   DWARF metadata ([`object`] and [`gimli`] do the actual parsing)
//! - [`locator`]: the resolution logic - symbol-table lookup, DWARF
//!   subprogram lookup, and address-containment queries
//! - [`probe`]: substitute a resolved range into the embedded
//!   instrumentation program template
//! - [`fold`]: sum duplicate-prefixed count lines from trace reports
//! - [`process_lookup`]: resolve a running process to its executable so the
//!   tools can be pointed at a live debugger
//! - [`cli`]: command-line argument definitions
//! - [`domain`]: core types ([`domain::FunctionRange`]) and errors
//!
//! ## Typical Usage
//!
//! ```bash
//! # Where is __rg_alloc in the debugger binary?
//! funcscope locate __rg_alloc ./ckb-debugger
//!
//! # Which function covers this program counter?
//! funcscope whois ./fib --addr 0x102ce
//!
//! # Fold duplicate stack lines from a pprof text report
//! funcscope fold report.txt
//! ```

pub mod cli;
pub mod domain;
pub mod fold;
pub mod image;
pub mod locator;
pub mod probe;
pub mod process_lookup;

/// Demangle a Rust symbol name for display.
///
/// Non-mangled names pass through unchanged.
#[must_use]
pub fn demangle(name: &str) -> String {
    format!("{:#}", rustc_demangle::demangle(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demangle_rust_symbol() {
        assert_eq!(demangle("_ZN4core3fmt5write17h1234567890abcdefE"), "core::fmt::write");
    }

    #[test]
    fn test_demangle_passthrough() {
        assert_eq!(demangle("main"), "main");
        assert_eq!(demangle("fib"), "fib");
    }
}
