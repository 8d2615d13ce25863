//! Program-loading collaborator.

use alloc::sync::Arc;

use crate::{error::KernelResult, task::Process};

/// Stages executable images into a process.
///
/// ELF parsing, segment setup and the initial register state are the
/// collaborator's business. `exec` hands it a command line already copied
/// into kernel memory, so the image swap never reads the caller's dying
/// address space.
pub trait ProgramLoader: Send + Sync {
    /// Replaces `proc`'s program image with the one named by the first
    /// token of `cmdline`.
    ///
    /// On success the process resumes in the new image. On failure the old
    /// image is untouched and keeps running.
    ///
    /// # Error
    /// - [`KernelError::LoadFailed`](crate::error::KernelError): no such
    ///   image, or the image is not loadable.
    fn exec(&self, proc: &Arc<Process>, cmdline: &str) -> KernelResult;
}
