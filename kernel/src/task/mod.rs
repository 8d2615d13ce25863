//! Processes and process-control bookkeeping.

mod clone;
mod exit;
mod sched;

pub use clone::do_fork;
pub use exit::{do_exit, do_wait};
pub use sched::Scheduler;

use alloc::{
    string::String,
    sync::{Arc, Weak},
    vec::Vec,
};
use spin::{Mutex, MutexGuard};

use crate::{fs::FdTable, mm::AddrSpace};

/// Two-state model: a process is running until `exit`, then stays a zombie
/// holding its status until the parent's `wait` observes it (or forever
/// never, if no parent remains — the process is destroyed at exit then).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    Zombie,
}

/// Mutable data owned by the process.
pub struct ProcessInner {
    pub state: ProcessState,

    /// Exit status, undefined until `exit` fixes it.
    pub exit_code: i32,

    /// Name of the executable image currently loaded. Opening this name
    /// yields a write-denied handle; `exec` replaces it on success.
    pub image: String,

    /// The initial process has no parent.
    pub parent: Option<Weak<Process>>,

    /// Children still waitable by this process. Cleared at exit: orphans
    /// are not adopted, their status simply has no observer left.
    pub children: Vec<Arc<Process>>,
}

/// One running program image.
///
/// Shared and immutable data sits directly in the struct; mutable data is
/// split between [`ProcessInner`] and the descriptor table so file
/// operations never contend with process-control bookkeeping.
pub struct Process {
    /// Process identification.
    pub pid: usize,

    /// Human-readable name, printed in the termination line.
    pub name: String,

    /// User address space, owned by the virtual-memory collaborator.
    pub mem: Arc<dyn AddrSpace>,

    /// Descriptor table, exclusively owned by this process.
    fd_table: Mutex<FdTable>,

    inner: Mutex<ProcessInner>,
}

impl Process {
    pub fn new(pid: usize, name: String, image: String, mem: Arc<dyn AddrSpace>) -> Self {
        Self {
            pid,
            name,
            mem,
            fd_table: Mutex::new(FdTable::new()),
            inner: Mutex::new(ProcessInner {
                state: ProcessState::Running,
                exit_code: 0,
                image,
                parent: None,
                children: Vec::new(),
            }),
        }
    }

    /// Acquires the lock on the mutable process data.
    pub fn inner_lock(&self) -> MutexGuard<'_, ProcessInner> {
        self.inner.lock()
    }

    /// Acquires the lock on the descriptor table.
    pub fn fd_table_lock(&self) -> MutexGuard<'_, FdTable> {
        self.fd_table.lock()
    }

    pub fn state(&self) -> ProcessState {
        self.inner.lock().state
    }

    pub fn exit_code(&self) -> i32 {
        self.inner.lock().exit_code
    }
}
