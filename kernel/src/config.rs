/// Descriptor slots per process, indices 0..=127.
pub const MAX_FDS: usize = 128;

/// Slots 0, 1, 2 never hold a table entry: 0 is console input, 1 is console
/// output, 2 is reserved.
pub const RESERVED_FDS: usize = 3;

/// One beyond the highest user-accessible virtual address.
pub const USER_TOP: usize = 0x4000_0000;

/// Bound for command lines, file names and process names copied in from
/// user memory.
pub const CMDLINE_MAX: usize = 128;

/// Smallest real pid. Pid 0 is what `fork` returns in the child and must
/// never name a process.
pub const FIRST_PID: usize = 1;
