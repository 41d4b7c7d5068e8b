use crate::bdos::{Bdos, BdosOutcome, Console};
use crate::cpu::regs::REG_C;
use crate::cpu::{Bus, Cpu, Step};
use crate::{EmuError, BDOS_ENTRY, WBOOT_VECTOR};

fn bdos_step(outcome: BdosOutcome) -> Step {
    match outcome {
        BdosOutcome::Continue => Step::Continue,
        BdosOutcome::Terminate => Step::Halted,
    }
}

impl Cpu {
    /// JMP a16 / Jcc a16. The operand is always consumed; a taken jump to
    /// the warm-boot vector terminates the run instead of transferring.
    fn jmp_cond<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
        cond: bool,
    ) -> Result<Step, EmuError> {
        let target = self.fetch16(bus);
        if !cond {
            return Ok(Step::Continue);
        }
        if target == WBOOT_VECTOR {
            return Ok(bdos_step(bdos.wboot()));
        }
        self.regs.pc = target;
        Ok(Step::Continue)
    }

    pub(super) fn exec_jmp<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
    ) -> Result<Step, EmuError> {
        self.jmp_cond(bus, bdos, true)
    }

    pub(super) fn exec_jmp_cc<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
        opcode: u8,
    ) -> Result<Step, EmuError> {
        let cond = self.condition((opcode >> 3) & 0x07);
        self.jmp_cond(bus, bdos, cond)
    }

    /// CALL a16 / Ccc a16. The operand is always consumed. A taken call to
    /// the BDOS entry point is serviced by the shim (function code in C,
    /// argument in DE) and execution resumes after the operand.
    fn call_cond<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
        cond: bool,
    ) -> Result<Step, EmuError> {
        let target = self.fetch16(bus);
        if !cond {
            return Ok(Step::Continue);
        }
        if target == BDOS_ENTRY {
            let func = self.regs.get(REG_C);
            let de = self.regs.de();
            return Ok(bdos_step(bdos.call(func, de, bus)?));
        }
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = target;
        Ok(Step::Continue)
    }

    pub(super) fn exec_call<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
    ) -> Result<Step, EmuError> {
        self.call_cond(bus, bdos, true)
    }

    pub(super) fn exec_call_cc<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
        opcode: u8,
    ) -> Result<Step, EmuError> {
        let cond = self.condition((opcode >> 3) & 0x07);
        self.call_cond(bus, bdos, cond)
    }

    /// RET / Rcc: pop the return address when the condition holds.
    fn ret_cond<B: Bus>(&mut self, bus: &mut B, cond: bool) {
        if cond {
            self.regs.pc = self.pop16(bus);
        }
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) {
        self.ret_cond(bus, true);
    }

    pub(super) fn exec_ret_cc<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let cond = self.condition((opcode >> 3) & 0x07);
        self.ret_cond(bus, cond);
    }

    /// RST n (11nnn111): push the return address, vector to n*8.
    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let ret = self.regs.pc;
        self.push16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
    }

    /// PCHL: PC ← HL.
    pub(super) fn exec_pchl(&mut self) {
        self.regs.pc = self.regs.hl();
    }
}
