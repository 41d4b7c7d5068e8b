mod alu;
mod control;
mod ld;
mod stack;

use super::{Bus, Cpu, Step};
use crate::bdos::{Bdos, Console};
use crate::EmuError;

impl Cpu {
    /// Decode and execute a single opcode.
    ///
    /// Families with a regular bit layout are matched as groups and their
    /// embedded fields (destination register, register pair, condition
    /// code, ALU operation) extracted from the opcode bits. `pc` is the
    /// address the opcode was fetched from, used for fault reporting.
    pub(super) fn exec_opcode<B: Bus, C: Console>(
        &mut self,
        bus: &mut B,
        bdos: &mut Bdos<C>,
        opcode: u8,
        pc: u16,
    ) -> Result<Step, EmuError> {
        match opcode {
            // NOP, plus the documented one-byte aliases.
            0x00 | 0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Ok(Step::Continue),

            // LXI rp, d16
            0x01 | 0x11 | 0x21 | 0x31 => {
                self.exec_lxi(bus, opcode);
                Ok(Step::Continue)
            }

            // STAX B / STAX D and LDAX B / LDAX D
            0x02 | 0x12 => {
                self.exec_stax(bus, opcode);
                Ok(Step::Continue)
            }
            0x0A | 0x1A => {
                self.exec_ldax(bus, opcode);
                Ok(Step::Continue)
            }

            // INX rp / DCX rp: 16-bit, no flags.
            0x03 | 0x13 | 0x23 | 0x33 => {
                self.exec_inx(opcode);
                Ok(Step::Continue)
            }
            0x0B | 0x1B | 0x2B | 0x3B => {
                self.exec_dcx(opcode);
                Ok(Step::Continue)
            }

            // INR r / DCR r
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
                self.exec_inr(bus, opcode);
                Ok(Step::Continue)
            }
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
                self.exec_dcr(bus, opcode);
                Ok(Step::Continue)
            }

            // MVI r, d8
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                self.exec_mvi(bus, opcode);
                Ok(Step::Continue)
            }

            // RLC / RRC / RAL / RAR
            0x07 | 0x0F | 0x17 | 0x1F => {
                self.exec_rotate(opcode);
                Ok(Step::Continue)
            }

            // DAD rp
            0x09 | 0x19 | 0x29 | 0x39 => {
                self.exec_dad(opcode);
                Ok(Step::Continue)
            }

            // Direct addressing: SHLD / LHLD / STA / LDA
            0x22 => {
                self.exec_shld(bus);
                Ok(Step::Continue)
            }
            0x2A => {
                self.exec_lhld(bus);
                Ok(Step::Continue)
            }
            0x32 => {
                self.exec_sta(bus);
                Ok(Step::Continue)
            }
            0x3A => {
                self.exec_lda(bus);
                Ok(Step::Continue)
            }

            // DAA / CMA / STC / CMC
            0x27 => {
                self.alu_daa();
                Ok(Step::Continue)
            }
            0x2F => {
                self.exec_cma();
                Ok(Step::Continue)
            }
            0x37 => {
                self.exec_stc();
                Ok(Step::Continue)
            }
            0x3F => {
                self.exec_cmc();
                Ok(Step::Continue)
            }

            // HLT sits in the middle of the MOV matrix.
            0x76 => Ok(Step::Halted),

            // MOV d,s
            0x40..=0x7F => {
                self.exec_mov(bus, opcode);
                Ok(Step::Continue)
            }

            // ALU A, s: ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP
            0x80..=0xBF => {
                self.exec_alu_reg(bus, opcode);
                Ok(Step::Continue)
            }

            // Rcc / RET
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
                self.exec_ret_cc(bus, opcode);
                Ok(Step::Continue)
            }
            0xC9 => {
                self.exec_ret(bus);
                Ok(Step::Continue)
            }

            // POP rp / PUSH rp (rp 11 is PSW)
            0xC1 | 0xD1 | 0xE1 | 0xF1 => {
                self.exec_pop(bus, opcode);
                Ok(Step::Continue)
            }
            0xC5 | 0xD5 | 0xE5 | 0xF5 => {
                self.exec_push(bus, opcode);
                Ok(Step::Continue)
            }

            // Jcc / JMP
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
                self.exec_jmp_cc(bus, bdos, opcode)
            }
            0xC3 => self.exec_jmp(bus, bdos),

            // Ccc / CALL
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
                self.exec_call_cc(bus, bdos, opcode)
            }
            0xCD => self.exec_call(bus, bdos),

            // ALU A, d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                self.exec_alu_imm(bus, opcode);
                Ok(Step::Continue)
            }

            // RST n
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
                self.exec_rst(bus, opcode);
                Ok(Step::Continue)
            }

            // XTHL / PCHL / XCHG / SPHL
            0xE3 => {
                self.exec_xthl(bus);
                Ok(Step::Continue)
            }
            0xE9 => {
                self.exec_pchl();
                Ok(Step::Continue)
            }
            0xEB => {
                self.exec_xchg();
                Ok(Step::Continue)
            }
            0xF9 => {
                self.exec_sphl();
                Ok(Step::Continue)
            }

            // Everything left: IN/OUT/EI/DI and the multi-byte aliases
            // (0xCB, 0xD9, 0xDD, 0xED, 0xFD).
            _ => {
                log::error!("unknown opcode 0x{opcode:02X} at PC=0x{pc:04X}");
                Err(EmuError::UnknownOpcode { opcode, pc })
            }
        }
    }
}
