//! In-memory filesystem.
//!
//! File objects created during the initialization of an operating system,
//! before (or instead of) a disk-backed filesystem is mounted. Also the
//! filesystem collaborator used by the kernel's own tests.

#![no_std]

extern crate alloc;

use alloc::{
    borrow::ToOwned,
    collections::BTreeMap,
    string::String,
    sync::Arc,
    vec,
    vec::Vec,
};
use errno::Errno;
use spin::Mutex;
use vfs::{File, Vfs};

struct MemFileInner {
    /// File contents; the length is fixed at creation.
    data: Vec<u8>,

    /// Nested write denials. Writable only when zero.
    deny: usize,
}

/// A file stored entirely in kernel memory.
pub struct MemFile {
    inner: Mutex<MemFileInner>,
}

impl MemFile {
    fn new(data: Vec<u8>) -> Self {
        Self {
            inner: Mutex::new(MemFileInner { data, deny: 0 }),
        }
    }
}

impl File for MemFile {
    fn read_at(&self, off: usize, buf: &mut [u8]) -> usize {
        let inner = self.inner.lock();
        if off >= inner.data.len() {
            return 0;
        }
        let len = buf.len().min(inner.data.len() - off);
        buf[..len].copy_from_slice(&inner.data[off..off + len]);
        len
    }

    fn write_at(&self, off: usize, buf: &[u8]) -> usize {
        let mut inner = self.inner.lock();
        if inner.deny > 0 || off >= inner.data.len() {
            return 0;
        }
        let len = buf.len().min(inner.data.len() - off);
        inner.data[off..off + len].copy_from_slice(&buf[..len]);
        len
    }

    fn size(&self) -> usize {
        self.inner.lock().data.len()
    }

    fn deny_write(&self) {
        self.inner.lock().deny += 1;
    }

    fn allow_write(&self) {
        let mut inner = self.inner.lock();
        debug_assert!(inner.deny > 0);
        inner.deny = inner.deny.saturating_sub(1);
    }
}

/// Flat name-to-file map behind a lock.
pub struct MemFs {
    files: Mutex<BTreeMap<String, Arc<MemFile>>>,
}

impl MemFs {
    /// Creates an empty filesystem.
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
        }
    }

    /// Installs a file with the given contents, replacing any previous one.
    ///
    /// Used to seed program images and test fixtures.
    pub fn install(&self, name: &str, data: &[u8]) -> Arc<MemFile> {
        let file = Arc::new(MemFile::new(data.to_owned()));
        self.files.lock().insert(name.to_owned(), file.clone());
        file
    }
}

impl Default for MemFs {
    fn default() -> Self {
        Self::new()
    }
}

impl Vfs for MemFs {
    fn open(&self, name: &str) -> Result<Arc<dyn File>, Errno> {
        match self.files.lock().get(name) {
            Some(file) => Ok(file.clone()),
            None => Err(Errno::ENOENT),
        }
    }

    fn create(&self, name: &str, size: usize) -> Result<(), Errno> {
        let mut files = self.files.lock();
        if files.contains_key(name) {
            return Err(Errno::EEXIST);
        }
        files.insert(name.to_owned(), Arc::new(MemFile::new(vec![0; size])));
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), Errno> {
        match self.files.lock().remove(name) {
            Some(_) => Ok(()),
            None => Err(Errno::ENOENT),
        }
    }
}
