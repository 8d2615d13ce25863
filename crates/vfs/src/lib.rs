//! Traits implemented by the filesystem collaborator.
//!
//! The syscall layer never touches storage itself: `open`/`create`/`remove`
//! go through a [`Vfs`] and byte I/O goes through the [`File`] objects it
//! hands out. File objects are positionless; the read/write cursor belongs
//! to the per-process open-file handle in the kernel, so two handles over
//! the same [`File`] advance independently.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use errno::Errno;

/// An open file object owned by the filesystem.
///
/// Implementations must be safe to share between processes: all methods take
/// `&self` and any internal state is expected to be lock-protected.
pub trait File: Send + Sync {
    /// Reads into `buf` starting at byte `off`.
    ///
    /// Returns the number of bytes read, which is less than `buf.len()` only
    /// at end of file.
    fn read_at(&self, off: usize, buf: &mut [u8]) -> usize;

    /// Writes `buf` starting at byte `off`.
    ///
    /// Returns the number of bytes written. Writing past the end of the file
    /// does not grow it; a write starting at or beyond the end returns 0.
    /// Returns 0 while writes are denied.
    fn write_at(&self, off: usize, buf: &[u8]) -> usize;

    /// Length of the file in bytes.
    fn size(&self) -> usize;

    /// Denies writes to this file until a matching [`File::allow_write`].
    ///
    /// Denials nest: each `deny_write` must be paired with one
    /// `allow_write` before the file becomes writable again.
    fn deny_write(&self);

    /// Reverts one [`File::deny_write`].
    fn allow_write(&self);
}

/// The filesystem collaborator: a flat namespace of named files.
pub trait Vfs: Send + Sync {
    /// Opens an existing file.
    ///
    /// # Error
    /// - `ENOENT`: no file with this name.
    fn open(&self, name: &str) -> Result<Arc<dyn File>, Errno>;

    /// Creates a file of `size` zero bytes.
    ///
    /// # Error
    /// - `EEXIST`: the name is already taken.
    fn create(&self, name: &str, size: usize) -> Result<(), Errno>;

    /// Removes a file from the namespace.
    ///
    /// Processes holding the file open keep their handles; the storage is
    /// reclaimed when the last handle goes away.
    ///
    /// # Error
    /// - `ENOENT`: no file with this name.
    fn remove(&self, name: &str) -> Result<(), Errno>;
}
