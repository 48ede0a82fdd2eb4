//! Rendering of the embedded instrumentation program.
//!
//! The tracing drivers keep a BPF program with the traced function's bounds
//! left as placeholders. After a successful lookup the bounds are spliced in
//! as literal decimal constants, which is how the instrumentation compiler
//! expects them. Compiling and attaching the rendered program is the job of
//! the external tracing toolchain, not this crate.

use crate::domain::FunctionRange;

/// Placeholder for the function entry address.
pub const PC_PLACEHOLDER: &str = "@@PC@@";

/// Placeholder for the function end address (one past the last byte).
pub const HIGH_PC_PLACEHOLDER: &str = "@@HIGH_PC@@";

/// Call/return counting program attached to the VM's jump probe.
///
/// The probe fires on every jump the VM executes with two arguments: the
/// link address (current pc + instruction length) and the jump target. A
/// jump *to* the function's entry is a call; a jump whose link falls inside
/// the function's body is a return from it.
pub const JUMP_COUNT_TEMPLATE: &str = r#"#include "riscv.h"

BPF_HASH(num_of_calling, uint64_t);
BPF_HASH(num_of_returning, uint64_t);
BPF_HASH(return_values, uint64_t);
// link addresses of pending calls, with reference counts
BPF_HASH(jump_from_addresses, uint64_t);

int do_jump(struct pt_regs *ctx) {
    uint64_t link = 0;
    bpf_usdt_readarg(1, ctx, &link);

    uint64_t next_pc = 0;
    bpf_usdt_readarg(2, ctx, &next_pc);

    int is_calling = 0;
    int is_returning = 0;

    if (next_pc == @@PC@@) {
        jump_from_addresses.increment(link);
        is_calling = 1;
    }

    // A ret at the very end of the function produces a link equal to
    // @@HIGH_PC@@, so the upper bound check is inclusive.
    if (link > @@PC@@ && link <= @@HIGH_PC@@) {
        uint64_t *refcount = jump_from_addresses.lookup(&next_pc);
        if (refcount == NULL) {
            return 1;
        }
        (*refcount)--;
        if (*refcount == 0) {
            jump_from_addresses.delete(&next_pc);
        }
        is_returning = 1;
    }

    if (is_calling == 1) {
        num_of_calling.increment(1);
    }
    if (is_returning == 1) {
        num_of_returning.increment(1);

        uint64_t regs_addr = 0;
        bpf_usdt_readarg(3, ctx, &regs_addr);

        uint64_t ret = 0;
        bpf_probe_read_user(&ret, sizeof(uint64_t), (void *)(regs_addr + 8 * A0));

        uint64_t zero_value = 0;
        return_values.lookup_or_try_init(&ret, &zero_value);
        return_values.increment(ret);
    }

    return 0;
}
"#;

/// Substitute a resolved range into a program template.
///
/// Every occurrence of [`PC_PLACEHOLDER`] and [`HIGH_PC_PLACEHOLDER`] is
/// replaced with the range bounds as decimal literals.
#[must_use]
pub fn render(template: &str, range: &FunctionRange) -> String {
    template
        .replace(PC_PLACEHOLDER, &range.low.to_string())
        .replace(HIGH_PC_PLACEHOLDER, &range.high.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> FunctionRange {
        FunctionRange { name: "fib".to_string(), low: 0x1000, high: 0x1050 }
    }

    #[test]
    fn test_render_replaces_all_placeholders() {
        let rendered = render(JUMP_COUNT_TEMPLATE, &range());
        assert!(!rendered.contains(PC_PLACEHOLDER));
        assert!(!rendered.contains(HIGH_PC_PLACEHOLDER));
    }

    #[test]
    fn test_render_uses_decimal_literals() {
        let rendered = render("call @@PC@@ .. @@HIGH_PC@@", &range());
        assert_eq!(rendered, "call 4096 .. 4176");
    }

    #[test]
    fn test_render_replaces_repeated_occurrences() {
        let rendered = render("@@PC@@ @@PC@@", &range());
        assert_eq!(rendered, "4096 4096");
    }
}
