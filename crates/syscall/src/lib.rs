//! Syscall interfaces of the kernel.
//!
//! A user program requests service with the fast `syscall` instruction; the
//! trap stub stores the register state and the dispatcher picks the
//! operation by number. This crate owns the numbering, the operation traits
//! the kernel implements, and the result type flowing back toward the
//! dispatcher.
//!
//! The register convention is positional: operand slot 0 carries the
//! syscall number on entry and the result on return, slots 1 through 6
//! carry up to six arguments in order.

#![no_std]

mod file;
mod proc;

use errno::Errno;
pub use file::SyscallFile;
use numeric_enum_macro::numeric_enum;
pub use proc::SyscallProc;

numeric_enum! {
    #[repr(usize)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum SyscallNO {
        HALT = 0,
        EXIT = 1,
        FORK = 2,
        EXEC = 3,
        WAIT = 4,
        CREATE = 5,
        REMOVE = 6,
        OPEN = 7,
        FILESIZE = 8,
        READ = 9,
        WRITE = 10,
        SEEK = 11,
        TELL = 12,
        CLOSE = 13,
    }
}

/// What an operation hands back to the dispatcher.
///
/// `Ok` carries the raw register payload; `Err` carries the error number,
/// and the dispatcher alone decides how (or whether) that number is encoded
/// into the caller's return register.
pub type SyscallResult = Result<usize, Errno>;

#[cfg(test)]
mod tests {
    use super::SyscallNO;

    #[test]
    fn unknown_number_rejected_by_construction() {
        assert_eq!(SyscallNO::try_from(13), Ok(SyscallNO::CLOSE));
        assert!(SyscallNO::try_from(14).is_err());
        assert!(SyscallNO::try_from(usize::MAX).is_err());
    }
}
