use alloc::string::ToString;
use errno::Errno;
use syscall_interface::{SyscallProc, SyscallResult};

use super::SyscallCtx;
use crate::{
    config::CMDLINE_MAX,
    loader::ProgramLoader,
    mm::{read_user_str, UserPtr},
    task::{do_exit, do_fork, do_wait},
};

impl SyscallProc for SyscallCtx<'_> {
    fn halt(&self) -> SyscallResult {
        // Power-off happens after dispatch; only the cleanup lives here.
        self.proc.fd_table_lock().close_all();
        Ok(0)
    }

    fn exit(&self, status: i32) -> SyscallResult {
        do_exit(self.kernel, self.proc, status);
        Ok(status as isize as usize)
    }

    fn fork(&self, name: usize) -> SyscallResult {
        let ptr = UserPtr::check(name)?;
        let name = read_user_str(self.proc.mem.as_ref(), ptr, CMDLINE_MAX)?;
        do_fork(self.kernel, self.proc, &name)
    }

    fn exec(&self, cmdline: usize) -> SyscallResult {
        let ptr = UserPtr::check(cmdline)?;
        // Bounded kernel copy: the loader must never read the caller's
        // address space while replacing it.
        let cmdline = read_user_str(self.proc.mem.as_ref(), ptr, CMDLINE_MAX)?;

        self.kernel
            .loader()
            .exec(self.proc, &cmdline)
            .map_err(Errno::from)?;

        // The image name is the self-write-protection comparand from now on.
        let program = cmdline.split_whitespace().next().unwrap_or_default();
        self.proc.inner_lock().image = program.to_string();
        Ok(0)
    }

    fn wait(&self, pid: usize) -> SyscallResult {
        do_wait(self.kernel, self.proc, pid)
    }
}
