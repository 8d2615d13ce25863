use crate::SyscallResult;

/// File-management operations.
///
/// Descriptors live in 0..=127. Descriptor 0 is console input and 1 is
/// console output; 2 is reserved. Slots 3..=127 are assignable by
/// [`SyscallFile::open`].
pub trait SyscallFile {
    /// Creates a file of `size` bytes named by the user-memory string at
    /// `path`. Creating does not open.
    ///
    /// # Error
    /// - `EFAULT`: `path` is not a readable user pointer.
    /// - `EEXIST`: a file with this name already exists.
    fn create(&self, path: usize, size: usize) -> SyscallResult;

    /// Removes the file named by the string at `path`. Open handles keep
    /// working; the name is gone immediately.
    ///
    /// # Error
    /// - `EFAULT`: `path` is not a readable user pointer.
    /// - `ENOENT`: no file with this name.
    fn remove(&self, path: usize) -> SyscallResult;

    /// Opens the file named by the string at `path` and returns the lowest
    /// free descriptor at or above 3.
    ///
    /// Opening the file currently loaded as the caller's own executable
    /// image yields a write-denied handle.
    ///
    /// # Error
    /// - `EFAULT`: `path` is not a readable user pointer.
    /// - `ENOENT`: no file with this name.
    /// - `EMFILE`: every assignable slot is occupied.
    fn open(&self, path: usize) -> SyscallResult;

    /// Returns the length in bytes of the open file at `fd`.
    ///
    /// # Error
    /// - `EINVAL`: `fd` is outside the descriptor space.
    /// - `EBADF`: the slot is empty — a fatal usage error for this
    ///   operation.
    fn filesize(&self, fd: usize) -> SyscallResult;

    /// Reads up to `count` bytes into the user buffer at `buf`.
    ///
    /// Descriptor 0 reads from the console. A regular descriptor reads from
    /// the handle's cursor and advances it; the return value is the byte
    /// count actually read.
    ///
    /// # Error
    /// - `EFAULT`: any byte of the buffer lies outside user space.
    /// - `EBADF`: `fd` is not open for reading (1, 2, out of range, or an
    ///   empty slot).
    fn read(&self, fd: usize, buf: usize, count: usize) -> SyscallResult;

    /// Writes `count` bytes from the user buffer at `buf`.
    ///
    /// Descriptor 1 writes to the console verbatim. A regular descriptor
    /// writes at the handle's cursor and advances it.
    ///
    /// # Error
    /// - `EFAULT`: any byte of the buffer lies outside user space.
    /// - `EBADF`: `fd` is not open for writing.
    /// - `EACCES`: the handle is write-denied.
    fn write(&self, fd: usize, buf: usize, count: usize) -> SyscallResult;

    /// Moves the handle's cursor to `pos` bytes from the start of the file.
    /// Produces no result value.
    ///
    /// # Error
    /// - `EBADF`: `fd` is out of range or the slot is empty — fatal for
    ///   this operation.
    fn seek(&self, fd: usize, pos: usize) -> SyscallResult;

    /// Returns the handle's cursor position.
    ///
    /// # Error
    /// - `EBADF`: `fd` is out of range or the slot is empty — fatal for
    ///   this operation.
    fn tell(&self, fd: usize) -> SyscallResult;

    /// Releases the descriptor at `fd`, restoring write permission first if
    /// the handle was write-denied. Produces no result value.
    ///
    /// Closing an out-of-range or already-empty descriptor is a no-op;
    /// closing twice is safe.
    fn close(&self, fd: usize) -> SyscallResult;
}
