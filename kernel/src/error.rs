use errno::Errno;

/// Failures reported by collaborator seams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// A user address could not be read or written.
    BadAddress,

    /// Out of memory while duplicating an address space.
    NoMemory,

    /// The loader could not stage the requested image.
    LoadFailed,
}

pub type KernelResult<T = ()> = Result<T, KernelError>;

impl From<KernelError> for Errno {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::BadAddress => Errno::EFAULT,
            KernelError::NoMemory => Errno::EAGAIN,
            KernelError::LoadFailed => Errno::ENOEXEC,
        }
    }
}
