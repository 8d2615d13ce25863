//! Error numbers crossing the syscall surface.
//!
//! Operations inside the kernel report failures as an [`Errno`]; how a given
//! number is encoded into the caller's return register (as `-1`, as `0`, or
//! as termination of the caller) is decided by the dispatcher, not here.

#![no_std]

use numeric_enum_macro::numeric_enum;

// Names and values follow POSIX. EFAULT is special: the dispatcher treats
// it as fatal to the caller wherever it surfaces.
numeric_enum! {
    #[repr(i32)]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Errno {
        ENOENT = 2,
        ENOEXEC = 8,
        EBADF = 9,
        ECHILD = 10,
        EAGAIN = 11,
        ENOMEM = 12,
        EACCES = 13,
        EFAULT = 14,
        EEXIST = 17,
        EINVAL = 22,
        EMFILE = 24,
        ENOSYS = 38,
    }
}

#[cfg(test)]
mod tests {
    use super::Errno;

    #[test]
    fn numeric_round_trip() {
        assert_eq!(Errno::try_from(9), Ok(Errno::EBADF));
        assert_eq!(i32::from(Errno::EMFILE), 24);
    }

    #[test]
    fn unknown_number_rejected() {
        assert!(Errno::try_from(1000).is_err());
    }
}
