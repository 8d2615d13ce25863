use alloc::sync::{Arc, Weak};
use errno::Errno;
use log::info;
use syscall_interface::SyscallResult;

use super::{Process, ProcessState, Scheduler};
use crate::{cons, Kernel};

/// Terminates `proc` with `status`.
///
/// Fixes the exit status, prints the termination line, releases every live
/// descriptor and orphans the children. Safe to call from any syscall error
/// path; a second call on an already dead process does nothing.
///
/// The termination line is printed *before* the state flips to zombie, so
/// a parent blocked in [`do_wait`] can only return after the line is on
/// the console.
pub fn do_exit(kernel: &Kernel, proc: &Arc<Process>, status: i32) {
    {
        let mut inner = proc.inner_lock();
        if inner.state == ProcessState::Zombie {
            return;
        }
        inner.exit_code = status;
    }

    cons::write_fmt(
        kernel.console(),
        format_args!("{}: exit({})\n", proc.name, status),
    );

    // Release handles before the filesystem could see a leaked reference.
    proc.fd_table_lock().close_all();

    // A parent that is itself dead can never wait, so this process has no
    // observer and its pid goes back right away. The parent's state is read
    // with no lock of our own held: `wait` locks parent-then-child, and
    // taking the parent's lock while holding ours would invert that order.
    let parent = proc.inner_lock().parent.clone();
    let orphan = match parent.as_ref().and_then(Weak::upgrade) {
        Some(parent) => parent.state() == ProcessState::Zombie,
        None => true,
    };

    {
        let mut inner = proc.inner_lock();
        // Orphan the children. A zombie among them has no observer left
        // either; its pid is reclaimed here since nobody else will.
        for child in inner.children.drain(..) {
            if child.state() == ProcessState::Zombie {
                kernel.release_pid(child.pid);
            }
        }
        inner.state = ProcessState::Zombie;
    }

    if orphan {
        kernel.release_pid(proc.pid);
    }

    info!("{} (pid {}) exited with code {}", proc.name, proc.pid, status);
}

/// Blocks `caller` until its child `pid` has terminated, then reaps it and
/// returns the exit status as the raw register payload.
///
/// Exactly one wait can observe a given child: reaping removes the child
/// from the caller's children, so a repeat call fails with `ECHILD`.
pub fn do_wait(kernel: &Kernel, caller: &Arc<Process>, pid: usize) -> SyscallResult {
    loop {
        let child = {
            let mut inner = caller.inner_lock();
            let Some(idx) = inner.children.iter().position(|c| c.pid == pid) else {
                return Err(Errno::ECHILD);
            };
            let child = inner.children[idx].clone();
            if child.state() == ProcessState::Zombie {
                inner.children.remove(idx);
                Some(child)
            } else {
                None
            }
        };

        match child {
            Some(child) => {
                let status = child.exit_code();
                kernel.release_pid(child.pid);
                return Ok(status as isize as usize);
            }
            None => kernel.sched().yield_now(),
        }
    }
}
