use alloc::{string::ToString, sync::Arc};
use log::trace;
use syscall_interface::SyscallResult;

use super::{Process, Scheduler};
use crate::Kernel;

/// Duplicates `parent` into a child named `name`.
///
/// The kernel side of `fork`: pid allocation, descriptor-table duplication
/// and the parent/child link. Address-space duplication and scheduling of
/// the child belong to the scheduler collaborator; if it fails, everything
/// allocated here is rolled back and the caller sees the error as -1.
///
/// Descriptor duplication policy: each occupied slot becomes a new handle
/// with an independent cursor over the same underlying file, so parent and
/// child seek and close without disturbing each other.
pub fn do_fork(kernel: &Kernel, parent: &Arc<Process>, name: &str) -> SyscallResult {
    let mem = kernel.sched().duplicate_addr_space(parent)?;

    let pid = kernel.alloc_pid();
    let image = parent.inner_lock().image.clone();
    let child = Arc::new(Process::new(pid, name.to_string(), image, mem));

    *child.fd_table_lock() = parent.fd_table_lock().duplicate();
    child.inner_lock().parent = Some(Arc::downgrade(parent));
    parent.inner_lock().children.push(child.clone());

    if let Err(err) = kernel.sched().schedule(child) {
        parent.inner_lock().children.retain(|c| c.pid != pid);
        kernel.release_pid(pid);
        return Err(err.into());
    }

    trace!("forked {} (pid {}) from pid {}", name, pid, parent.pid);
    Ok(pid)
}
