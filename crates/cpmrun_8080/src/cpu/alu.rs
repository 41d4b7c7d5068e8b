use super::Cpu;

impl Cpu {
    /// Update Z, S, and P from an 8-bit result. Parity is even parity of
    /// the full byte.
    #[inline]
    pub(super) fn set_zsp(&mut self, value: u8) {
        self.flags.set_z(value == 0);
        self.flags.set_s(value & 0x80 != 0);
        self.flags.set_p(value.count_ones() % 2 == 0);
    }

    /// Auxiliary carry out of bit 3, derived from both operands and the
    /// result of the widened operation: `((a ^ b ^ result) >> 4) & 1`.
    #[inline]
    fn set_ac(&mut self, a: u8, b: u8, result: u8) {
        self.flags.set_ac((a ^ b ^ result) & 0x10 != 0);
    }

    /// 8-bit add with optional carry-in; the result lands in A.
    pub(super) fn alu_add(&mut self, value: u8, carry_in: bool) {
        let a = self.regs.a();
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;
        self.flags.set_cy(full > 0xFF);
        self.set_ac(a, value, result);
        self.set_zsp(result);
        self.regs.set_a(result);
    }

    /// 8-bit subtract with optional borrow-in; the result lands in A.
    pub(super) fn alu_sub(&mut self, value: u8, borrow_in: bool) {
        let a = self.regs.a();
        let result = self.sub_flags(a, value, borrow_in);
        self.regs.set_a(result);
    }

    /// Compare A with `value`: subtract flags only, A untouched.
    pub(super) fn alu_cmp(&mut self, value: u8) {
        let a = self.regs.a();
        self.sub_flags(a, value, false);
    }

    /// Core subtract: two's-complement add of the operand, with the carry
    /// out inverted so that CY uniformly reads as "borrow occurred"
    /// (CY set exactly when the minuend is smaller).
    fn sub_flags(&mut self, a: u8, value: u8, borrow_in: bool) -> u8 {
        let full = a as u16 + (!value) as u16 + (1 - borrow_in as u16);
        let result = full as u8;
        self.flags.set_cy(full & 0x100 == 0);
        self.set_ac(a, value, result);
        self.set_zsp(result);
        result
    }

    /// A AND value. CY cleared; AC set from the OR of bit 3 of the
    /// operands, which is what the hardware does for ANA.
    pub(super) fn alu_ana(&mut self, value: u8) {
        let a = self.regs.a();
        let result = a & value;
        self.flags.set_cy(false);
        self.flags.set_ac((a | value) & 0x08 != 0);
        self.set_zsp(result);
        self.regs.set_a(result);
    }

    /// A XOR value. CY and AC cleared.
    pub(super) fn alu_xra(&mut self, value: u8) {
        let result = self.regs.a() ^ value;
        self.flags.set_cy(false);
        self.flags.set_ac(false);
        self.set_zsp(result);
        self.regs.set_a(result);
    }

    /// A OR value. CY and AC cleared.
    pub(super) fn alu_ora(&mut self, value: u8) {
        let result = self.regs.a() | value;
        self.flags.set_cy(false);
        self.flags.set_ac(false);
        self.set_zsp(result);
        self.regs.set_a(result);
    }

    /// 8-bit increment. CY is not affected.
    pub(super) fn alu_inr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_ac(value, 1, result);
        self.set_zsp(result);
        result
    }

    /// 8-bit decrement. CY is not affected.
    pub(super) fn alu_dcr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_ac(value, 1, result);
        self.set_zsp(result);
        result
    }

    /// HL ← HL + value. Only CY (the carry out of bit 16) changes.
    pub(super) fn alu_dad(&mut self, value: u16) {
        let hl = self.regs.hl();
        let full = hl as u32 + value as u32;
        self.flags.set_cy(full > 0xFFFF);
        self.regs.set_hl(full as u16);
    }

    /// Decimal adjust A after BCD addition.
    ///
    /// Two corrections: +6 on the low nibble when it exceeds 9 or AC is
    /// set, then +6 on the high nibble when it exceeds 9 or CY is set.
    /// CY is only ever raised here, never cleared.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a();

        if a & 0x0F > 0x09 || self.flags.ac() {
            let adjusted = a.wrapping_add(0x06);
            self.set_ac(a, 0x06, adjusted);
            a = adjusted;
        }

        if a >> 4 > 0x09 || self.flags.cy() {
            let high = (a >> 4) + 0x06;
            if high & 0x10 != 0 {
                self.flags.set_cy(true);
            }
            a = (high << 4) | (a & 0x0F);
        }

        self.set_zsp(a);
        self.regs.set_a(a);
    }
}
