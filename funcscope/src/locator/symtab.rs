//! Symbol-table lookup: the fast, authoritative path.

use crate::domain::FunctionRange;
use crate::image::SymbolRecord;
use log::warn;
use object::SymbolKind;
use regex::Regex;

/// Find the unique function symbol matching `pattern`.
///
/// Only function-kind symbols are considered; data symbols never match even
/// when their names do. Because the pattern has substring semantics, more
/// than one match means the pattern is too loose: the matches are listed in
/// a diagnostic and the caller must narrow the pattern. No tie-break is
/// performed.
#[must_use]
pub fn find_range(symbols: &[SymbolRecord], pattern: &Regex) -> Option<FunctionRange> {
    let matches: Vec<&SymbolRecord> = symbols
        .iter()
        .filter(|sym| sym.kind == SymbolKind::Text && pattern.is_match(&sym.name))
        .collect();

    match matches.as_slice() {
        [] => {
            warn!("no function symbol matches \"{pattern}\", check the search pattern");
            None
        }
        [sym] => Some(FunctionRange {
            name: sym.name.clone(),
            low: sym.address,
            high: sym.address + sym.size,
        }),
        many => {
            let names: Vec<&str> = many.iter().map(|sym| sym.name.as_str()).collect();
            warn!(
                "{} function symbols match \"{pattern}\", narrow the search: {}",
                names.len(),
                names.join(", ")
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func(name: &str, address: u64, size: u64) -> SymbolRecord {
        SymbolRecord { name: name.to_string(), kind: SymbolKind::Text, address, size }
    }

    fn data(name: &str, address: u64, size: u64) -> SymbolRecord {
        SymbolRecord { name: name.to_string(), kind: SymbolKind::Data, address, size }
    }

    fn pattern(s: &str) -> Regex {
        Regex::new(s).unwrap()
    }

    #[test]
    fn test_unique_match_returns_range() {
        let symbols = [func("fib", 0x1000, 0x40), func("main", 0x2000, 0x80)];
        let range = find_range(&symbols, &pattern("fib")).unwrap();
        assert_eq!(range.name, "fib");
        assert_eq!(range.low, 0x1000);
        assert_eq!(range.high, 0x1040);
    }

    #[test]
    fn test_no_match_is_absent() {
        let symbols = [func("fib", 0x1000, 0x40)];
        assert!(find_range(&symbols, &pattern("frobnicate")).is_none());
    }

    #[test]
    fn test_ambiguous_match_is_absent() {
        // Substring semantics: "foo" matches both, so no tie-break happens
        let symbols =
            [func("foo_bar", 0x1000, 0x40), func("foo_baz", 0x2000, 0x40), data("other", 0x0, 8)];
        assert!(find_range(&symbols, &pattern("foo")).is_none());
    }

    #[test]
    fn test_narrowed_pattern_disambiguates() {
        let symbols = [func("foo_bar", 0x1000, 0x40), func("foo_baz", 0x2000, 0x40)];
        let range = find_range(&symbols, &pattern("foo_baz")).unwrap();
        assert_eq!(range.low, 0x2000);
    }

    #[test]
    fn test_non_function_symbols_never_match() {
        // A data symbol with a matching name must not shadow the function,
        // and must not count towards ambiguity either
        let symbols = [data("fib_table", 0x3000, 0x100), func("fib", 0x1000, 0x40)];
        let range = find_range(&symbols, &pattern("fib")).unwrap();
        assert_eq!(range.name, "fib");

        let only_data = [data("fib_table", 0x3000, 0x100)];
        assert!(find_range(&only_data, &pattern("fib")).is_none());
    }

    #[test]
    fn test_search_not_full_match() {
        let symbols = [func("__rg_alloc", 0x1000, 0x40)];
        let range = find_range(&symbols, &pattern("rg_alloc")).unwrap();
        assert_eq!(range.name, "__rg_alloc");
    }

    #[test]
    fn test_empty_table_is_absent() {
        assert!(find_range(&[], &pattern("fib")).is_none());
    }
}
