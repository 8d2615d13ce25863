//! Open-file handles and the per-process descriptor table.

mod fd;

pub use fd::{Fd, FdTable};

use alloc::sync::Arc;
use spin::Mutex;
use vfs::File;

/// A process's handle on an open file.
///
/// The underlying [`File`] object belongs to the filesystem; the handle
/// contributes the read/write cursor and the write-denied flag. Because the
/// cursor lives here, two handles over the same file (after `fork`) advance
/// independently.
pub struct OpenFile {
    file: Arc<dyn File>,

    /// Cursor in bytes from the start of the file.
    pos: Mutex<usize>,

    /// Set when the file is the owning process's loaded executable image.
    /// A write through this handle returns 0 instead of touching the file.
    write_denied: bool,
}

impl OpenFile {
    /// Wraps a freshly opened file.
    ///
    /// A write-denied handle asserts the denial on the underlying file;
    /// the matching [`File::allow_write`] runs when the handle is dropped.
    pub fn new(file: Arc<dyn File>, write_denied: bool) -> Self {
        if write_denied {
            file.deny_write();
        }
        Self {
            file,
            pos: Mutex::new(0),
            write_denied,
        }
    }

    /// A second handle over the same file with an independent cursor,
    /// starting where this one currently points.
    pub fn duplicate(&self) -> Self {
        let dup = Self::new(self.file.clone(), self.write_denied);
        *dup.pos.lock() = *self.pos.lock();
        dup
    }

    /// Reads at the cursor and advances it by the bytes read.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        let mut pos = self.pos.lock();
        let n = self.file.read_at(*pos, buf);
        *pos += n;
        n
    }

    /// Writes at the cursor and advances it by the bytes written.
    pub fn write(&self, buf: &[u8]) -> usize {
        let mut pos = self.pos.lock();
        let n = self.file.write_at(*pos, buf);
        *pos += n;
        n
    }

    pub fn seek(&self, pos: usize) {
        *self.pos.lock() = pos;
    }

    pub fn tell(&self) -> usize {
        *self.pos.lock()
    }

    pub fn size(&self) -> usize {
        self.file.size()
    }

    pub fn write_denied(&self) -> bool {
        self.write_denied
    }
}

impl Drop for OpenFile {
    fn drop(&mut self) {
        // Restore write permission before the file reference goes away.
        if self.write_denied {
            self.file.allow_write();
        }
    }
}
