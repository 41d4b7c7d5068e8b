use crate::cpu::regs::{REG_H, REG_L};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// MOV d,s (01dddsss). M is allowed on one side only; 01110110 is HLT
    /// and never reaches here.
    pub(super) fn exec_mov<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.read_operand(bus, opcode & 0x07);
        self.write_operand(bus, (opcode >> 3) & 0x07, value);
    }

    /// MVI r, d8 (00rrr110).
    pub(super) fn exec_mvi<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.fetch8(bus);
        self.write_operand(bus, (opcode >> 3) & 0x07, value);
    }

    /// LXI rp, d16 (00rp0001).
    pub(super) fn exec_lxi<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.fetch16(bus);
        self.rp_set((opcode >> 4) & 0x03, value);
    }

    /// STAX (00rp0010): mem[rp] ← A. Bit 4 selects BC or DE.
    pub(super) fn exec_stax<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.rp_get((opcode >> 4) & 0x01);
        bus.write8(addr, self.regs.a());
    }

    /// LDAX (00rp1010): A ← mem[rp]. Bit 4 selects BC or DE.
    pub(super) fn exec_ldax<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.rp_get((opcode >> 4) & 0x01);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    /// SHLD a16: store L at the operand address, H one above.
    pub(super) fn exec_shld<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.get(REG_L));
        bus.write8(addr.wrapping_add(1), self.regs.get(REG_H));
    }

    /// LHLD a16: load L from the operand address, H from one above.
    pub(super) fn exec_lhld<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let l = bus.read8(addr);
        let h = bus.read8(addr.wrapping_add(1));
        self.regs.set(REG_L, l);
        self.regs.set(REG_H, h);
    }

    /// STA a16: mem[a] ← A.
    pub(super) fn exec_sta<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a());
    }

    /// LDA a16: A ← mem[a].
    pub(super) fn exec_lda<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let value = bus.read8(addr);
        self.regs.set_a(value);
    }

    /// XCHG: swap HL with DE.
    pub(super) fn exec_xchg(&mut self) {
        let de = self.regs.de();
        let hl = self.regs.hl();
        self.regs.set_de(hl);
        self.regs.set_hl(de);
    }
}
