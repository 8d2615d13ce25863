use alloc::string::String;
use alloc::vec::Vec;
use errno::Errno;

use super::AddrSpace;
use crate::config::USER_TOP;

/// A single user address checked to be non-null and below the user
/// ceiling.
///
/// Construction is the validation; an operation holding a `UserPtr` may
/// dereference through the address space without further checks.
#[derive(Debug, Clone, Copy)]
pub struct UserPtr(usize);

impl UserPtr {
    /// Validates a user address.
    ///
    /// # Error
    /// - `EFAULT`: the address is null or at/above the user ceiling. The
    ///   dispatcher terminates the caller on this error.
    pub fn check(addr: usize) -> Result<Self, Errno> {
        if addr == 0 || addr >= USER_TOP {
            return Err(Errno::EFAULT);
        }
        Ok(Self(addr))
    }

    pub fn value(self) -> usize {
        self.0
    }
}

/// A user buffer whose first and last byte both passed validation.
///
/// Checking only the start address would let a buffer's tail reach into
/// kernel space; both ends are checked here, once, and the resulting value
/// is the only way the kernel copies user memory.
#[derive(Debug, Clone, Copy)]
pub struct UserSlice {
    addr: usize,
    len: usize,
}

impl UserSlice {
    /// Validates the byte range `[addr, addr + len)`.
    ///
    /// A zero-length slice validates the start address only and performs no
    /// I/O.
    ///
    /// # Error
    /// - `EFAULT`: the first or the last byte lies outside user space, or
    ///   the range wraps the address space.
    pub fn new(addr: usize, len: usize) -> Result<Self, Errno> {
        UserPtr::check(addr)?;
        if len > 0 {
            let last = addr.checked_add(len - 1).ok_or(Errno::EFAULT)?;
            if last >= USER_TOP {
                return Err(Errno::EFAULT);
            }
        }
        Ok(Self { addr, len })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copies the leading `buf.len()` bytes of the slice out of user
    /// memory.
    pub fn copy_from_user(&self, mem: &dyn AddrSpace, buf: &mut [u8]) -> Result<(), Errno> {
        debug_assert!(buf.len() <= self.len);
        if buf.is_empty() {
            return Ok(());
        }
        mem.read(self.addr, buf).map_err(Errno::from)
    }

    /// Copies `buf` into the leading bytes of the slice in user memory.
    pub fn copy_to_user(&self, mem: &dyn AddrSpace, buf: &[u8]) -> Result<(), Errno> {
        debug_assert!(buf.len() <= self.len);
        if buf.is_empty() {
            return Ok(());
        }
        mem.write(self.addr, buf).map_err(Errno::from)
    }
}

/// Copies a NUL-terminated string out of user memory into a bounded kernel
/// buffer, decoupling the operation from the caller's memory lifetime.
///
/// Bytes are fetched one at a time so a string ending before an unmapped
/// page never faults, exactly like the trap-time copy it replaces.
///
/// # Error
/// - `EFAULT`: the string runs past the user ceiling or into unmapped
///   memory.
/// - `EINVAL`: no terminator within `max` bytes, or the bytes are not valid
///   UTF-8.
pub fn read_user_str(mem: &dyn AddrSpace, ptr: UserPtr, max: usize) -> Result<String, Errno> {
    let mut bytes = Vec::new();
    let mut addr = ptr.value();
    loop {
        if bytes.len() == max {
            return Err(Errno::EINVAL);
        }
        if addr >= USER_TOP {
            return Err(Errno::EFAULT);
        }
        let mut byte = [0u8; 1];
        mem.read(addr, &mut byte).map_err(Errno::from)?;
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
        addr += 1;
    }
    String::from_utf8(bytes).map_err(|_| Errno::EINVAL)
}
