use alloc::sync::Arc;

use super::Process;
use crate::{error::KernelResult, mm::AddrSpace};

/// The process-control collaborator.
///
/// Context switching, run queues and address-space construction stay on the
/// other side of this seam; the syscall layer only asks for the pieces
/// `fork` and `wait` cannot provide themselves.
pub trait Scheduler: Send + Sync {
    /// Clones `parent`'s address space for a forked child.
    ///
    /// The collaborator also arranges the child's saved register state so
    /// the child observes 0 as its `fork` return value.
    ///
    /// # Error
    /// - [`KernelError::NoMemory`](crate::error::KernelError): the
    ///   duplication could not be completed.
    fn duplicate_addr_space(&self, parent: &Arc<Process>) -> KernelResult<Arc<dyn AddrSpace>>;

    /// Makes a fully assembled process runnable.
    fn schedule(&self, proc: Arc<Process>) -> KernelResult;

    /// Gives up the processor until the caller is scheduled again. `wait`
    /// spins on this while its child is still running.
    fn yield_now(&self);
}
