//! Collaborator doubles: a flat user memory, a capture console, a
//! recording scheduler and machine, and a loader backed by the memfs.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use memfs::MemFs;
use minnow_kernel::error::{KernelError, KernelResult};
use minnow_kernel::mm::AddrSpace;
use minnow_kernel::syscall::Control;
use minnow_kernel::task::{Process, Scheduler};
use minnow_kernel::trap::{EntryFlags, Machine, TrapFrame};
use minnow_kernel::{cons::Console, loader::ProgramLoader, Kernel};
use spin::Mutex;
use syscall_interface::SyscallNO;
use vfs::Vfs;

/// User memory size handed to every test process.
pub const MEM_SIZE: usize = 0x10000;

/// Flat, fully mapped user memory starting at address 0.
pub struct FlatMem(Mutex<Vec<u8>>);

impl FlatMem {
    pub fn new(size: usize) -> Self {
        Self(Mutex::new(vec![0; size]))
    }

    fn of(bytes: Vec<u8>) -> Self {
        Self(Mutex::new(bytes))
    }
}

impl AddrSpace for FlatMem {
    fn read(&self, addr: usize, buf: &mut [u8]) -> KernelResult {
        let mem = self.0.lock();
        let end = addr.checked_add(buf.len()).ok_or(KernelError::BadAddress)?;
        if end > mem.len() {
            return Err(KernelError::BadAddress);
        }
        buf.copy_from_slice(&mem[addr..end]);
        Ok(())
    }

    fn write(&self, addr: usize, buf: &[u8]) -> KernelResult {
        let mut mem = self.0.lock();
        let end = addr.checked_add(buf.len()).ok_or(KernelError::BadAddress)?;
        if end > mem.len() {
            return Err(KernelError::BadAddress);
        }
        mem[addr..end].copy_from_slice(buf);
        Ok(())
    }
}

/// Console that records output and serves scripted input.
pub struct CaptureConsole {
    input: Mutex<VecDeque<u8>>,
    output: Mutex<Vec<u8>>,
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self {
            input: Mutex::new(VecDeque::new()),
            output: Mutex::new(Vec::new()),
        }
    }

    pub fn push_input(&self, bytes: &[u8]) {
        self.input.lock().extend(bytes.iter().copied());
    }

    pub fn pending_input(&self) -> usize {
        self.input.lock().len()
    }

    pub fn output(&self) -> String {
        String::from_utf8(self.output.lock().clone()).unwrap()
    }
}

impl Console for CaptureConsole {
    fn getchar(&self) -> u8 {
        self.input.lock().pop_front().unwrap_or(0)
    }

    fn write_bytes(&self, bytes: &[u8]) {
        self.output.lock().extend_from_slice(bytes);
    }
}

/// Scheduler double: duplicates flat memories byte for byte, queues
/// scheduled children for the test to drive, yields to the OS thread
/// scheduler.
pub struct TestSched {
    pub children: Mutex<Vec<Arc<Process>>>,
    pub fail_fork: AtomicBool,
}

impl TestSched {
    pub fn new() -> Self {
        Self {
            children: Mutex::new(Vec::new()),
            fail_fork: AtomicBool::new(false),
        }
    }

    pub fn last_child(&self) -> Arc<Process> {
        self.children.lock().last().unwrap().clone()
    }
}

impl Scheduler for TestSched {
    fn duplicate_addr_space(&self, parent: &Arc<Process>) -> KernelResult<Arc<dyn AddrSpace>> {
        if self.fail_fork.load(Ordering::SeqCst) {
            return Err(KernelError::NoMemory);
        }
        let mut bytes = vec![0; MEM_SIZE];
        parent.mem.read(0, &mut bytes)?;
        Ok(Arc::new(FlatMem::of(bytes)))
    }

    fn schedule(&self, proc: Arc<Process>) -> KernelResult {
        self.children.lock().push(proc);
        Ok(())
    }

    fn yield_now(&self) {
        std::thread::yield_now();
    }
}

/// Loader double: an image loads iff a file of that name exists.
pub struct TestLoader {
    fs: Arc<MemFs>,
    pub last_cmdline: Mutex<Option<String>>,
}

impl ProgramLoader for TestLoader {
    fn exec(&self, _proc: &Arc<Process>, cmdline: &str) -> KernelResult {
        let program = cmdline.split_whitespace().next().unwrap_or_default();
        if self.fs.open(program).is_err() {
            return Err(KernelError::LoadFailed);
        }
        *self.last_cmdline.lock() = Some(cmdline.to_string());
        Ok(())
    }
}

/// Machine double: records the entry mask and the power-off.
pub struct TestMachine {
    pub mask: Mutex<Option<EntryFlags>>,
    pub powered_off: AtomicBool,
}

impl Machine for TestMachine {
    fn install_syscall_entry(&self, mask: EntryFlags) {
        *self.mask.lock() = Some(mask);
    }

    fn power_off(&self) {
        self.powered_off.store(true, Ordering::SeqCst);
    }
}

/// A kernel wired to doubles, plus handles on each double.
pub struct Harness {
    pub kernel: Arc<Kernel>,
    pub fs: Arc<MemFs>,
    pub console: Arc<CaptureConsole>,
    pub sched: Arc<TestSched>,
    pub machine: Arc<TestMachine>,
}

pub fn setup() -> Harness {
    let fs = Arc::new(MemFs::new());
    let console = Arc::new(CaptureConsole::new());
    let sched = Arc::new(TestSched::new());
    let machine = Arc::new(TestMachine {
        mask: Mutex::new(None),
        powered_off: AtomicBool::new(false),
    });
    let loader = Arc::new(TestLoader {
        fs: fs.clone(),
        last_cmdline: Mutex::new(None),
    });
    let kernel = Arc::new(Kernel::new(
        fs.clone(),
        sched.clone(),
        loader,
        console.clone(),
        machine.clone(),
    ));
    Harness {
        kernel,
        fs,
        console,
        sched,
        machine,
    }
}

impl Harness {
    /// A process named `name` running the image `image`, with fresh flat
    /// memory.
    pub fn spawn(&self, name: &str, image: &str) -> Arc<Process> {
        self.kernel
            .spawn(name, image, Arc::new(FlatMem::new(MEM_SIZE)))
    }

    /// Runs one syscall through the dispatcher and reports the control
    /// effect and the value left in the return slot.
    pub fn call(&self, proc: &Arc<Process>, no: SyscallNO, args: &[usize]) -> (Control, isize) {
        let mut padded = [0usize; 6];
        padded[..args.len()].copy_from_slice(args);
        let mut tf = TrapFrame::new(no as usize, padded);
        let control = self.kernel.syscall(proc, &mut tf);
        (control, tf.return_value())
    }

    /// Like [`Harness::call`] with a raw, possibly unrepresentable number.
    pub fn call_raw(&self, proc: &Arc<Process>, no: usize, args: &[usize]) -> (Control, isize) {
        let mut padded = [0usize; 6];
        padded[..args.len()].copy_from_slice(args);
        let mut tf = TrapFrame::new(no, padded);
        let control = self.kernel.syscall(proc, &mut tf);
        (control, tf.return_value())
    }

    /// Plants a NUL-terminated string in a process's user memory.
    pub fn put_str(&self, proc: &Arc<Process>, addr: usize, s: &str) {
        proc.mem.write(addr, s.as_bytes()).unwrap();
        proc.mem.write(addr + s.len(), &[0]).unwrap();
    }

    /// Plants bytes in a process's user memory.
    pub fn put_bytes(&self, proc: &Arc<Process>, addr: usize, bytes: &[u8]) {
        proc.mem.write(addr, bytes).unwrap();
    }

    /// Reads bytes back out of a process's user memory.
    pub fn get_bytes(&self, proc: &Arc<Process>, addr: usize, len: usize) -> Vec<u8> {
        let mut buf = vec![0; len];
        proc.mem.read(addr, &mut buf).unwrap();
        buf
    }
}
