use crate::SyscallResult;

/// Process-control operations.
pub trait SyscallProc {
    /// Releases every open descriptor of the calling process, then powers
    /// off the machine. Does not return to the caller.
    fn halt(&self) -> SyscallResult;

    /// Terminates the calling process.
    ///
    /// Fixes `status` as the process's exit status, prints the termination
    /// line, and releases every open descriptor. The status stays available
    /// to the parent until observed by [`SyscallProc::wait`].
    fn exit(&self, status: i32) -> SyscallResult;

    /// Duplicates the calling process into a child named by the
    /// user-memory string at `name`.
    ///
    /// The child receives a copy of the address space and of the descriptor
    /// table. The parent receives the child's pid; the child is set up by
    /// the scheduler to observe 0.
    ///
    /// # Error
    /// - `EFAULT`: `name` is not a readable user pointer.
    /// - `EAGAIN`: the duplication could not be completed.
    fn fork(&self, name: usize) -> SyscallResult;

    /// Replaces the calling process's program image with the one named by
    /// the command line at `cmdline`.
    ///
    /// On success control continues in the new image and the old register
    /// state is gone. Descriptors survive an exec unchanged.
    ///
    /// # Error
    /// - `EFAULT`: `cmdline` is not a readable user pointer.
    /// - `ENOEXEC`: the image cannot be loaded; the old image keeps running.
    fn exec(&self, cmdline: usize) -> SyscallResult;

    /// Blocks until the child identified by `pid` has terminated, then
    /// returns its exit status.
    ///
    /// A child's status can be observed exactly once; the process is
    /// destroyed by the observation.
    ///
    /// # Error
    /// - `ECHILD`: `pid` is not a live child of the caller, or its status
    ///   was already consumed by an earlier wait.
    fn wait(&self, pid: usize) -> SyscallResult;
}
