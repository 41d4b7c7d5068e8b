use crate::cpu::Bus;
use crate::{EmuError, MEMORY_SIZE};

/// CP/M BDOS function codes implemented by the shim.
const FUNC_WBOOT: u8 = 0;
const FUNC_WRITESTR: u8 = 9;

/// Byte terminating a C_WRITESTR string; not emitted itself.
const STRING_SENTINEL: u8 = b'$';

/// Host-side sink for console bytes produced by BDOS calls.
pub trait Console {
    fn put_byte(&mut self, byte: u8);
}

/// Capture console output in memory. This is the sink the unit tests use.
impl Console for Vec<u8> {
    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// What the CPU should do after a BDOS call returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BdosOutcome {
    /// Resume at the instruction after the intercepted CALL.
    Continue,
    /// The program asked to terminate (WBOOT).
    Terminate,
}

/// Minimal CP/M BDOS, reached when the CPU takes a `CALL 0x0005`.
///
/// Only the two functions console-oriented CP/M programs lean on are
/// implemented: 0 (WBOOT, terminate) and 9 (C_WRITESTR, print a
/// `$`-terminated string). Everything else is a fault.
pub struct Bdos<C: Console> {
    console: C,
}

impl<C: Console> Bdos<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    /// Dispatch a BDOS call. `func` is taken from register C and `de` from
    /// the DE pair, per the CP/M calling convention.
    pub fn call<B: Bus>(
        &mut self,
        func: u8,
        de: u16,
        bus: &mut B,
    ) -> Result<BdosOutcome, EmuError> {
        match func {
            FUNC_WBOOT => Ok(self.wboot()),
            FUNC_WRITESTR => {
                self.write_str(de, bus);
                Ok(BdosOutcome::Continue)
            }
            _ => Err(EmuError::UnknownBdosCall { func }),
        }
    }

    /// Warm boot: terminate the running program. Also invoked directly when
    /// the CPU takes a jump to the warm-boot vector.
    pub fn wboot(&mut self) -> BdosOutcome {
        log::debug!("BDOS WBOOT");
        BdosOutcome::Terminate
    }

    /// C_WRITESTR: emit bytes starting at `de` until the `$` sentinel.
    ///
    /// The walk wraps at the top of the address space; a string can occupy
    /// at most the whole space, so the scan gives up after one full pass
    /// when no sentinel is found.
    fn write_str<B: Bus>(&mut self, de: u16, bus: &mut B) {
        let mut addr = de;
        for _ in 0..MEMORY_SIZE {
            let byte = bus.read8(addr);
            if byte == STRING_SENTINEL {
                break;
            }
            self.console.put_byte(byte);
            addr = addr.wrapping_add(1);
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}
