use alloc::sync::Arc;
use core::{array, fmt};
use errno::Errno;

use super::OpenFile;
use crate::config::{MAX_FDS, RESERVED_FDS};

/// A descriptor already checked against the descriptor space.
///
/// Every boundary crossing goes through [`Fd::try_from`]; table code never
/// sees a raw integer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fd(u8);

impl Fd {
    /// Console input.
    pub const STDIN: Fd = Fd(0);
    /// Console output.
    pub const STDOUT: Fd = Fd(1);
    /// Reserved.
    pub const STDERR: Fd = Fd(2);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Reserved descriptors never hold a table entry.
    pub fn is_reserved(self) -> bool {
        self.index() < RESERVED_FDS
    }
}

impl TryFrom<usize> for Fd {
    type Error = Errno;

    fn try_from(fd: usize) -> Result<Self, Errno> {
        if fd < MAX_FDS {
            Ok(Fd(fd as u8))
        } else {
            Err(Errno::EBADF)
        }
    }
}

impl fmt::Display for Fd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fd {}", self.0)
    }
}

/// Per-process descriptor table: 128 slots, 3..=127 assignable.
///
/// Exclusively owned by its process. A slot's occupancy is the sole source
/// of truth for whether the descriptor is valid.
pub struct FdTable {
    slots: [Option<Arc<OpenFile>>; MAX_FDS],
}

impl FdTable {
    pub fn new() -> Self {
        Self {
            slots: array::from_fn(|_| None),
        }
    }

    /// Shared reference to the handle at `fd`, if the slot is occupied.
    pub fn get(&self, fd: Fd) -> Option<Arc<OpenFile>> {
        self.slots[fd.index()].clone()
    }

    /// Stores `file` in the lowest free slot at or above the reserved
    /// range and returns its descriptor, or [`None`] with the table full.
    pub fn insert(&mut self, file: OpenFile) -> Option<Fd> {
        let idx = (RESERVED_FDS..MAX_FDS).find(|i| self.slots[*i].is_none())?;
        self.slots[idx] = Some(Arc::new(file));
        Some(Fd(idx as u8))
    }

    /// Clears the slot at `fd`, handing back the handle if one was there.
    pub fn remove(&mut self, fd: Fd) -> Option<Arc<OpenFile>> {
        self.slots[fd.index()].take()
    }

    /// Releases every live handle. Used at process exit and halt.
    pub fn close_all(&mut self) {
        for slot in self.slots[RESERVED_FDS..].iter_mut() {
            *slot = None;
        }
    }

    /// A copy of the table for a forked child: every occupied slot gets a
    /// new handle with an independent cursor over the same file.
    pub fn duplicate(&self) -> Self {
        Self {
            slots: array::from_fn(|i| {
                self.slots[i]
                    .as_ref()
                    .map(|file| Arc::new(file.duplicate()))
            }),
        }
    }

    /// Number of occupied slots.
    pub fn open_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for FdTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::sync::Arc;
    use vfs::File;

    struct NullFile;

    impl File for NullFile {
        fn read_at(&self, _off: usize, _buf: &mut [u8]) -> usize {
            0
        }
        fn write_at(&self, _off: usize, _buf: &[u8]) -> usize {
            0
        }
        fn size(&self) -> usize {
            0
        }
        fn deny_write(&self) {}
        fn allow_write(&self) {}
    }

    fn handle() -> OpenFile {
        OpenFile::new(Arc::new(NullFile), false)
    }

    #[test]
    fn fd_bounds() {
        assert!(Fd::try_from(0).is_ok());
        assert!(Fd::try_from(127).is_ok());
        assert_eq!(Fd::try_from(128).err(), Some(Errno::EBADF));
        assert!(Fd::STDERR.is_reserved());
        assert!(!Fd::try_from(3).unwrap().is_reserved());
    }

    #[test]
    fn insert_starts_above_reserved_slots() {
        let mut table = FdTable::new();
        assert_eq!(table.insert(handle()).unwrap().index(), 3);
        assert_eq!(table.insert(handle()).unwrap().index(), 4);
    }

    #[test]
    fn lowest_free_slot_reused() {
        let mut table = FdTable::new();
        let a = table.insert(handle()).unwrap();
        let b = table.insert(handle()).unwrap();
        let _c = table.insert(handle()).unwrap();
        table.remove(b).unwrap();
        table.remove(a).unwrap();
        assert_eq!(table.insert(handle()).unwrap().index(), 3);
        assert_eq!(table.insert(handle()).unwrap().index(), 4);
    }

    #[test]
    fn saturates_at_125_open_files() {
        let mut table = FdTable::new();
        for _ in 0..125 {
            assert!(table.insert(handle()).is_some());
        }
        assert!(table.insert(handle()).is_none());
        assert_eq!(table.open_count(), 125);
    }

    #[test]
    fn close_all_empties_the_table() {
        let mut table = FdTable::new();
        for _ in 0..10 {
            table.insert(handle());
        }
        table.close_all();
        assert_eq!(table.open_count(), 0);
        assert_eq!(table.insert(handle()).unwrap().index(), 3);
    }
}
