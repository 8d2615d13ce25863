//! Syscall dispatch.
//!
//! Parse-then-dispatch: the number in operand slot 0 must convert into a
//! [`SyscallNO`] before any operation code runs, arguments are taken
//! positionally from slots 1..=6, and one table at the bottom decides how
//! each operation's outcome reaches the caller's return register. The
//! original per-operation conventions (-1, 0, fatal, silent) are all
//! preserved there, in one visible place.

mod file;
mod proc;

use alloc::sync::Arc;
use errno::Errno;
use log::trace;
use syscall_interface::{SyscallFile, SyscallNO, SyscallProc, SyscallResult};

use crate::{
    task::{do_exit, Process},
    trap::{Machine, TrapFrame},
    Kernel,
};

/// Syscall number and arguments pulled out of the trapped register state.
pub struct SyscallArgs(pub SyscallNO, pub [usize; 6]);

impl SyscallArgs {
    /// Parses a trapped frame; `Err` carries the unrepresentable number.
    pub fn from_frame(tf: &TrapFrame) -> Result<Self, usize> {
        match SyscallNO::try_from(tf.syscall_number()) {
            Ok(id) => Ok(Self(id, tf.syscall_args())),
            Err(_) => Err(tf.syscall_number()),
        }
    }
}

/// What the trap glue does after a syscall: return to the caller, switch
/// away from a dead process, or let the machine power down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Resume,
    Exited,
    Shutdown,
}

/// Operations run against the calling process and the kernel's
/// collaborators.
pub(crate) struct SyscallCtx<'a> {
    pub kernel: &'a Kernel,
    pub proc: &'a Arc<Process>,
}

/// The main system call interface.
pub fn syscall(kernel: &Kernel, proc: &Arc<Process>, tf: &mut TrapFrame) -> Control {
    let SyscallArgs(id, args) = match SyscallArgs::from_frame(tf) {
        Ok(args) => args,
        Err(number) => {
            // Unknown numbers go through the ordinary exit path with status
            // -1 instead of a status-less kill; see DESIGN.md.
            trace!("unknown syscall {} from pid {}", number, proc.pid);
            do_exit(kernel, proc, -1);
            return Control::Exited;
        }
    };

    let ctx = SyscallCtx { kernel, proc };
    let result = match id {
        SyscallNO::HALT => ctx.halt(),
        SyscallNO::EXIT => ctx.exit(args[0] as i32),
        SyscallNO::FORK => ctx.fork(args[0]),
        SyscallNO::EXEC => ctx.exec(args[0]),
        SyscallNO::WAIT => ctx.wait(args[0]),
        SyscallNO::CREATE => ctx.create(args[0], args[1]),
        SyscallNO::REMOVE => ctx.remove(args[0]),
        SyscallNO::OPEN => ctx.open(args[0]),
        SyscallNO::FILESIZE => ctx.filesize(args[0]),
        SyscallNO::READ => ctx.read(args[0], args[1], args[2]),
        SyscallNO::WRITE => ctx.write(args[0], args[1], args[2]),
        SyscallNO::SEEK => ctx.seek(args[0], args[1]),
        SyscallNO::TELL => ctx.tell(args[0]),
        SyscallNO::CLOSE => ctx.close(args[0]),
    };

    apply(kernel, proc, id, result, tf)
}

/// The per-operation outcome table.
///
/// Encodes each operation's register effect and which failures are fatal
/// to the caller. `filesize`'s empty-slot termination versus `close`'s
/// silent no-op is deliberate compatibility, not an accident.
fn apply(
    kernel: &Kernel,
    proc: &Arc<Process>,
    id: SyscallNO,
    result: SyscallResult,
    tf: &mut TrapFrame,
) -> Control {
    use SyscallNO::*;

    match (id, result) {
        // exit carries its status in the return slot of the dead frame
        (EXIT, Ok(status)) => {
            tf.set_return(status);
            Control::Exited
        }

        // descriptors are already closed; nothing comes back from here
        (HALT, Ok(_)) => {
            kernel.machine().power_off();
            Control::Shutdown
        }

        // an invalid user pointer is fatal no matter which operation saw it
        (_, Err(Errno::EFAULT)) => {
            do_exit(kernel, proc, -1);
            Control::Exited
        }

        // empty slot: fatal usage error for these three, unlike close
        (FILESIZE | SEEK | TELL, Err(Errno::EBADF)) => {
            do_exit(kernel, proc, -1);
            Control::Exited
        }

        // no result value; the return slot stays untouched
        (SEEK | CLOSE, Ok(_)) => Control::Resume,

        // the frame now belongs to the freshly loaded image
        (EXEC, Ok(_)) => Control::Resume,

        // write reports refusal as 0 bytes, create/remove as false
        (WRITE | CREATE | REMOVE, Err(_)) => {
            tf.set_return(0);
            Control::Resume
        }

        (_, Err(_)) => {
            tf.set_return(-1isize as usize);
            Control::Resume
        }

        (_, Ok(value)) => {
            tf.set_return(value);
            Control::Resume
        }
    }
}
