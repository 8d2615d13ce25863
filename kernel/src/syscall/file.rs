use alloc::{string::String, vec};
use errno::Errno;
use syscall_interface::{SyscallFile, SyscallResult};
use vfs::Vfs;

use super::SyscallCtx;
use crate::{
    config::CMDLINE_MAX,
    cons::Console,
    fs::{Fd, OpenFile},
    mm::{read_user_str, UserPtr, UserSlice},
};

impl SyscallCtx<'_> {
    /// Copies a path argument out of user memory.
    fn user_path(&self, path: usize) -> Result<String, Errno> {
        let ptr = UserPtr::check(path)?;
        read_user_str(self.proc.mem.as_ref(), ptr, CMDLINE_MAX)
    }
}

impl SyscallFile for SyscallCtx<'_> {
    fn create(&self, path: usize, size: usize) -> SyscallResult {
        let name = self.user_path(path)?;
        self.kernel.fs().create(&name, size)?;
        Ok(1)
    }

    fn remove(&self, path: usize) -> SyscallResult {
        let name = self.user_path(path)?;
        self.kernel.fs().remove(&name)?;
        Ok(1)
    }

    fn open(&self, path: usize) -> SyscallResult {
        let name = self.user_path(path)?;
        let file = self.kernel.fs().open(&name)?;

        // A running program's own binary must not be writable while it
        // executes.
        let write_denied = self.proc.inner_lock().image == name;
        let handle = OpenFile::new(file, write_denied);

        match self.proc.fd_table_lock().insert(handle) {
            Some(fd) => Ok(fd.index()),
            // Table full: the handle just created is dropped here, which
            // also reverts the write denial it may have asserted.
            None => Err(Errno::EMFILE),
        }
    }

    fn filesize(&self, fd: usize) -> SyscallResult {
        let fd = Fd::try_from(fd).map_err(|_| Errno::EINVAL)?;
        let file = self.proc.fd_table_lock().get(fd).ok_or(Errno::EBADF)?;
        Ok(file.size())
    }

    fn read(&self, fd: usize, buf: usize, count: usize) -> SyscallResult {
        let slice = UserSlice::new(buf, count)?;

        if fd == Fd::STDIN.index() {
            // One character per call, reported as fully satisfied; see
            // DESIGN.md.
            let _ = self.kernel.console().getchar();
            return Ok(count);
        }

        let fd = Fd::try_from(fd)?;
        if fd.is_reserved() {
            return Err(Errno::EBADF);
        }
        let file = self.proc.fd_table_lock().get(fd).ok_or(Errno::EBADF)?;

        let mut kbuf = vec![0u8; count];
        let n = file.read(&mut kbuf);
        slice.copy_to_user(self.proc.mem.as_ref(), &kbuf[..n])?;
        Ok(n)
    }

    fn write(&self, fd: usize, buf: usize, count: usize) -> SyscallResult {
        let slice = UserSlice::new(buf, count)?;

        if fd == Fd::STDOUT.index() {
            let mut kbuf = vec![0u8; count];
            slice.copy_from_user(self.proc.mem.as_ref(), &mut kbuf)?;
            self.kernel.console().write_bytes(&kbuf);
            return Ok(count);
        }

        let fd = Fd::try_from(fd)?;
        if fd.is_reserved() {
            return Err(Errno::EBADF);
        }
        let file = self.proc.fd_table_lock().get(fd).ok_or(Errno::EBADF)?;
        if file.write_denied() {
            return Err(Errno::EACCES);
        }

        let mut kbuf = vec![0u8; count];
        slice.copy_from_user(self.proc.mem.as_ref(), &mut kbuf)?;
        Ok(file.write(&kbuf))
    }

    fn seek(&self, fd: usize, pos: usize) -> SyscallResult {
        let fd = Fd::try_from(fd)?;
        let file = self.proc.fd_table_lock().get(fd).ok_or(Errno::EBADF)?;
        file.seek(pos);
        Ok(0)
    }

    fn tell(&self, fd: usize) -> SyscallResult {
        let fd = Fd::try_from(fd)?;
        let file = self.proc.fd_table_lock().get(fd).ok_or(Errno::EBADF)?;
        Ok(file.tell())
    }

    fn close(&self, fd: usize) -> SyscallResult {
        // Out-of-range and empty slots close silently; a repeat close finds
        // the slot empty and is equally silent.
        if let Ok(fd) = Fd::try_from(fd) {
            self.proc.fd_table_lock().remove(fd);
        }
        Ok(0)
    }
}
