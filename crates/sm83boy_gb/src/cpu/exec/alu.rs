use crate::cpu::{Bus, Cpu, Flag, Reg8};

/// The eight accumulator operations, in opcode-table order (bits 3..5 of
/// the 0x80..0xBF block and of the `op A,d8` column).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Cp,
        }
    }
}

impl Cpu {
    fn apply_alu_op(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, true),
            AluOp::Sub => self.alu_sub(value, false),
            AluOp::Sbc => self.alu_sub(value, true),
            AluOp::And => self.alu_and(value),
            AluOp::Xor => self.alu_xor(value),
            AluOp::Or => self.alu_or(value),
            AluOp::Cp => self.alu_cp(value),
        }
    }

    /// `op A,r` and `op A,(HL)`.
    pub(super) fn exec_alu_reg_group<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let src = Reg8::from_index(opcode);
        let value = self.read_reg8(bus, src);
        self.apply_alu_op(AluOp::from_opcode(opcode), value);

        if src.is_memory() {
            8
        } else {
            4
        }
    }

    /// `op A,d8`.
    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode >= 0xC0 && opcode & 0x07 == 0x06);
        let value = self.fetch8(bus);
        self.apply_alu_op(AluOp::from_opcode(opcode), value);
        8
    }

    /// RLCA, RRCA, RLA, RRA. Z is always cleared for these.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        let a = self.regs.a;
        let carry_in = self.flag_bit(Flag::C);
        let (result, carry_out) = match opcode {
            0x07 => Self::rlc(a),
            0x0F => Self::rrc(a),
            0x17 => Self::rl(a, carry_in),
            0x1F => Self::rr(a, carry_in),
            _ => unreachable!("not an accumulator rotate: {opcode:#04X}"),
        };

        self.regs.a = result;
        self.set_shift_flags(result, carry_out, false);
        4
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        let value = self.read_rr_sp(opcode);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, offset);
        16
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, offset);
        self.regs.set_hl(result);
        12
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        4
    }
}
