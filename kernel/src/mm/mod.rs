//! User memory access.
//!
//! The virtual-memory collaborator exposes each process's user range as an
//! [`AddrSpace`]; the kernel reaches user memory only through [`UserPtr`]
//! and [`UserSlice`] values validated at construction.

mod user_buf;

pub use user_buf::{read_user_str, UserPtr, UserSlice};

use crate::error::KernelResult;

/// A process's user address space, owned by the virtual-memory
/// collaborator.
///
/// Addresses are user virtual addresses. An implementation fails with
/// [`KernelError::BadAddress`](crate::error::KernelError) when the range is
/// not mapped; range checks against the user ceiling happen before any call
/// lands here.
pub trait AddrSpace: Send + Sync {
    /// Copies `buf.len()` bytes from user memory at `addr` into `buf`.
    fn read(&self, addr: usize, buf: &mut [u8]) -> KernelResult;

    /// Copies `buf` into user memory at `addr`.
    fn write(&self, addr: usize, buf: &[u8]) -> KernelResult;
}
