use crate::bdos::{Bdos, Console};
use crate::cpu::{Cpu, Step};
use crate::memory::Memory;
use crate::{EmuError, PROGRAM_ORIGIN};

/// Why a bounded run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunExit {
    /// The program terminated (WBOOT or HLT).
    Halted,
    /// The step budget ran out before the program terminated.
    OutOfSteps,
}

/// A complete CP/M machine: CPU, flat memory, and the BDOS shim.
///
/// The machine owns all state; callers drive it one instruction at a time
/// through `step` or hand it a budget through `run`.
pub struct Machine<C: Console> {
    cpu: Cpu,
    memory: Memory,
    bdos: Bdos<C>,
}

impl<C: Console> Machine<C> {
    /// Build a machine around the given console sink.
    pub fn new(console: C) -> Self {
        Self {
            cpu: Cpu::new(),
            memory: Memory::new(),
            bdos: Bdos::new(console),
        }
    }

    /// Load a `.COM` image at the CP/M program origin (0x0100).
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), EmuError> {
        self.memory.load_image(image, PROGRAM_ORIGIN)
    }

    /// Reset CPU state. Memory contents are preserved.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Execute a single instruction.
    pub fn step(&mut self) -> Result<Step, EmuError> {
        self.cpu.step(&mut self.memory, &mut self.bdos)
    }

    /// Run until the program halts, a fault occurs, or `max_steps`
    /// instructions have executed.
    pub fn run(&mut self, max_steps: Option<u64>) -> Result<RunExit, EmuError> {
        let mut steps: u64 = 0;
        loop {
            if let Some(budget) = max_steps {
                if steps >= budget {
                    log::debug!(
                        "step budget of {budget} exhausted at PC=0x{:04X}",
                        self.cpu.regs.pc
                    );
                    return Ok(RunExit::OutOfSteps);
                }
            }
            match self.step()? {
                Step::Continue => steps += 1,
                Step::Halted => {
                    log::debug!("halted after {} instructions: {:?}", steps + 1, self.cpu);
                    return Ok(RunExit::Halted);
                }
            }
        }
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn console(&self) -> &C {
        self.bdos.console()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_print_program_runs_to_termination() {
        // MVI C,9; LXI D,0x0200; CALL 0x0005; JMP 0x0000
        let program = [
            0x0E, 0x09, //
            0x11, 0x00, 0x02, //
            0xCD, 0x05, 0x00, //
            0xC3, 0x00, 0x00,
        ];
        let mut machine = Machine::new(Vec::new());
        machine.load_image(&program).unwrap();
        machine.memory_mut().load_image(b"HI$", 0x0200).unwrap();

        assert_eq!(machine.run(None).unwrap(), RunExit::Halted);
        assert_eq!(machine.console(), b"HI");
    }

    #[test]
    fn run_stops_on_the_step_budget() {
        // JMP 0x0100: a tight loop that never terminates on its own.
        let mut machine = Machine::new(Vec::new());
        machine.load_image(&[0xC3, 0x00, 0x01]).unwrap();

        assert_eq!(machine.run(Some(100)).unwrap(), RunExit::OutOfSteps);
        assert_eq!(machine.cpu().regs.pc, 0x0100);
    }

    #[test]
    fn a_zero_budget_does_not_step() {
        let mut machine = Machine::new(Vec::new());
        machine.load_image(&[0x76]).unwrap();
        assert_eq!(machine.run(Some(0)).unwrap(), RunExit::OutOfSteps);
        assert_eq!(machine.cpu().regs.pc, 0x0100);
    }

    #[test]
    fn faults_bubble_out_of_run() {
        // MVI C,5 selects a BDOS function the shim does not implement.
        let program = [0x0E, 0x05, 0xCD, 0x05, 0x00];
        let mut machine = Machine::new(Vec::new());
        machine.load_image(&program).unwrap();

        assert_eq!(
            machine.run(None),
            Err(EmuError::UnknownBdosCall { func: 5 })
        );
    }

    #[test]
    fn oversized_images_are_rejected() {
        let mut machine = Machine::new(Vec::new());
        let image = vec![0; 0xFF01];
        assert_eq!(
            machine.load_image(&image),
            Err(EmuError::ImageTooLarge { len: image.len() })
        );
    }
}
