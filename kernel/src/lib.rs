//! The system-call boundary of a teaching kernel.
//!
//! This crate is the layer between the trap entry and the rest of the
//! machine: it validates what user mode handed over, keeps the per-process
//! descriptor table consistent, and dispatches to file-I/O and
//! process-control operations. Scheduling, virtual memory, program loading,
//! storage and the console stay behind collaborator traits
//! ([`task::Scheduler`], [`mm::AddrSpace`], [`loader::ProgramLoader`],
//! [`vfs::Vfs`], [`cons::Console`], [`trap::Machine`]), so the layer runs
//! unchanged over real hardware or over test doubles.
//!
//! ```text
//! trap entry (external)
//!     -> syscall::syscall      dispatcher, outcome table
//!         -> mm::UserSlice     both ends of every buffer validated
//!         -> fs::FdTable       handles 3..=127
//!         -> task::*           exit / wait / fork bookkeeping
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod cons;
pub mod error;
pub mod fs;
pub mod loader;
pub mod mm;
pub mod syscall;
pub mod task;
pub mod trap;

use alloc::{string::ToString, sync::Arc};
use id_alloc::{IDAllocator, RecycleAllocator};
use spin::Mutex;

use crate::{
    cons::Console,
    loader::ProgramLoader,
    mm::AddrSpace,
    syscall::Control,
    task::{Process, Scheduler},
    trap::{Machine, TrapFrame},
};

/// The syscall layer and its collaborators, bundled.
///
/// One instance per machine. Everything a syscall needs besides the calling
/// process and its trap frame hangs off this handle, which keeps the layer
/// free of mutable globals and lets tests run isolated kernels in parallel.
pub struct Kernel {
    fs: Arc<dyn vfs::Vfs>,
    sched: Arc<dyn Scheduler>,
    loader: Arc<dyn ProgramLoader>,
    console: Arc<dyn Console>,
    machine: Arc<dyn Machine>,

    /// PID allocator. Pids start at [`config::FIRST_PID`] so 0 stays free
    /// for `fork`'s in-child return value.
    pids: Mutex<RecycleAllocator>,
}

impl Kernel {
    pub fn new(
        fs: Arc<dyn vfs::Vfs>,
        sched: Arc<dyn Scheduler>,
        loader: Arc<dyn ProgramLoader>,
        console: Arc<dyn Console>,
        machine: Arc<dyn Machine>,
    ) -> Self {
        Self {
            fs,
            sched,
            loader,
            console,
            machine,
            pids: Mutex::new(RecycleAllocator::new(config::FIRST_PID)),
        }
    }

    /// Creates a process around an address space the loader has already
    /// populated with `image`. The caller hands the process to the
    /// scheduler when it is ready to run.
    pub fn spawn(&self, name: &str, image: &str, mem: Arc<dyn AddrSpace>) -> Arc<Process> {
        let pid = self.alloc_pid();
        Arc::new(Process::new(
            pid,
            name.to_string(),
            image.to_string(),
            mem,
        ))
    }

    /// Entry point for the trap glue: handles one trapped syscall on
    /// behalf of `proc` and reports what to do next.
    pub fn syscall(&self, proc: &Arc<Process>, tf: &mut TrapFrame) -> Control {
        syscall::syscall(self, proc, tf)
    }

    pub fn fs(&self) -> &dyn vfs::Vfs {
        self.fs.as_ref()
    }

    pub fn sched(&self) -> &dyn Scheduler {
        self.sched.as_ref()
    }

    pub fn loader(&self) -> &dyn ProgramLoader {
        self.loader.as_ref()
    }

    pub fn console(&self) -> &dyn Console {
        self.console.as_ref()
    }

    pub fn machine(&self) -> &dyn Machine {
        self.machine.as_ref()
    }

    pub(crate) fn alloc_pid(&self) -> usize {
        self.pids.lock().alloc()
    }

    pub(crate) fn release_pid(&self, pid: usize) {
        self.pids.lock().dealloc(pid);
    }
}
