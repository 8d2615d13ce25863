//! Syscall entry configuration.
//!
//! The entry stub itself — the instruction that swaps to the kernel stack
//! before any Rust runs — is the machine collaborator's. This module owns
//! what the stub must be configured with: the flag mask that keeps
//! interrupts, traps and IO privilege quiet until the stack swap is done.

mod trapframe;

pub use trapframe::TrapFrame;

use bitflags::bitflags;

bitflags! {
    /// RFLAGS bits masked while the syscall entry runs.
    pub struct EntryFlags: u64 {
        /// Trap (single-step).
        const TF = 1 << 8;
        /// Interrupt enable.
        const IF = 1 << 9;
        /// Direction.
        const DF = 1 << 10;
        /// IO privilege level (both bits).
        const IOPL = 3 << 12;
        /// Nested task.
        const NT = 1 << 14;
        /// Alignment check.
        const AC = 1 << 18;
    }
}

/// The machine collaborator: hardware facilities with exactly one owner.
pub trait Machine: Send + Sync {
    /// Registers the fast-syscall entry point with `mask` cleared from
    /// RFLAGS during entry.
    fn install_syscall_entry(&self, mask: EntryFlags);

    /// Powers off. `halt` ends here.
    fn power_off(&self);
}

/// Flags the handler must not observe before it has switched stacks.
pub fn syscall_entry_mask() -> EntryFlags {
    EntryFlags::IF
        | EntryFlags::TF
        | EntryFlags::DF
        | EntryFlags::IOPL
        | EntryFlags::AC
        | EntryFlags::NT
}

/// Registers the syscall entry configuration with the machine.
pub fn init(machine: &dyn Machine) {
    machine.install_syscall_entry(syscall_entry_mask());
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn entry_mask_covers_the_documented_flags() {
        let mask = syscall_entry_mask();
        assert_eq!(mask.bits(), 0x47700);
    }

    #[test]
    fn frame_convention() {
        let mut tf = TrapFrame::new(9, [3, 0x1000, 16, 0, 0, 0]);
        assert_eq!(tf.syscall_number(), 9);
        assert_eq!(tf.syscall_args()[1], 0x1000);
        tf.set_return(-1isize as usize);
        assert_eq!(tf.return_value(), -1);
    }
}
