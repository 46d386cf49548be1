mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu};

/// Unassigned slots of the base opcode table. Pan Docs lists these as
/// "opcode holes" that hard-lock the real CPU.
pub const ILLEGAL_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

#[inline]
pub fn is_illegal_opcode(opcode: u8) -> bool {
    ILLEGAL_OPCODES.contains(&opcode)
}

impl Cpu {
    // Register pair selected by bits 4..5 of the opcode. Most instructions
    // encode SP as the fourth pair; PUSH/POP encode AF instead.

    fn read_rr_sp(&self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.sp,
        }
    }

    fn write_rr_sp(&mut self, opcode: u8, value: u16) {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    fn read_rr_af(&self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.af(),
        }
    }

    fn write_rr_af(&mut self, opcode: u8, value: u16) {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.set_af(value),
        }
    }

    /// Decode and execute a single base opcode (already fetched) and return
    /// the number of T-cycles it took.
    ///
    /// 0xCB escapes into the extended table handled by `step_cb`.
    pub(super) fn exec_opcode<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        match opcode {
            // NOP
            0x00 => 4,

            // CB prefix
            0xCB => self.step_cb(bus),

            // 16-bit immediate loads.
            0x01 | 0x11 | 0x21 | 0x31 => self.exec_ld_rr_d16(bus, opcode),

            // Rotate A instructions (unprefixed).
            0x07 | 0x0F | 0x17 | 0x1F => self.exec_rotate_a(opcode),

            // 16-bit INC rr / DEC rr
            0x03 | 0x13 | 0x23 | 0x33 => self.exec_inc16_rr(opcode),
            0x0B | 0x1B | 0x2B | 0x3B => self.exec_dec16_rr(opcode),

            // LD r, d8 (and LD (HL), d8)
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                self.exec_ld_r_d8(bus, opcode)
            }

            // HALT sits in the middle of the LD r,r block.
            0x76 => self.exec_halt(),

            // LD r1, r2
            0x40..=0x7F => self.exec_ld_r_r(bus, opcode),

            // LD (BC/DE/HL±), A
            0x02 | 0x12 | 0x22 | 0x32 => self.exec_ld_indirect_a(bus, opcode),

            // LD A, (BC/DE/HL±)
            0x0A | 0x1A | 0x2A | 0x3A => self.exec_ld_a_indirect(bus, opcode),

            // LD (a16), SP
            0x08 => self.exec_ld_a16_sp(bus),

            // STOP
            0x10 => self.exec_stop(bus),

            // LDH (a8),A / LDH A,(a8)
            0xE0 | 0xF0 => self.exec_ldh_a8(bus, opcode),

            // LDH (C),A / LDH A,(C)
            0xE2 | 0xF2 => self.exec_ldh_c(bus, opcode),

            // LD (a16),A / LD A,(a16)
            0xEA | 0xFA => self.exec_ld_a16_a(bus, opcode),

            // ADD SP, r8
            0xE8 => self.exec_add_sp_r8(bus),

            // LD HL, SP+r8
            0xF8 => self.exec_ld_hl_sp_r8(bus),

            // LD SP, HL
            0xF9 => self.exec_ld_sp_hl(),

            // JR r8 / JR cc, r8
            0x18 => self.jr(bus, true),
            0x20 | 0x28 | 0x30 | 0x38 => self.exec_jr_cc(bus, opcode),

            // JP a16 / JP cc, a16 / JP HL
            0xC3 => self.exec_jp_a16(bus),
            0xC2 | 0xCA | 0xD2 | 0xDA => self.exec_jp_cc(bus, opcode),
            0xE9 => self.exec_jp_hl(),

            // ADD HL, rr
            0x09 | 0x19 | 0x29 | 0x39 => self.exec_add_hl_rr(opcode),

            0x27 => self.exec_daa(),
            0x2F => self.exec_cpl(),
            0x37 => self.exec_scf(),
            0x3F => self.exec_ccf(),

            // ADD/ADC/SUB/SBC/AND/XOR/OR/CP with r or (HL)
            0x80..=0xBF => self.exec_alu_reg_group(bus, opcode),

            // ADD/ADC/SUB/SBC/AND/XOR/OR/CP d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                self.exec_alu_imm(bus, opcode)
            }

            // INC r / DEC r
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
                self.exec_inc8_reg(bus, opcode)
            }
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
                self.exec_dec8_reg(bus, opcode)
            }

            0xF3 => self.exec_di(),
            0xFB => self.exec_ei(),

            // CALL a16 / CALL cc, a16
            0xCD => self.exec_call_a16(bus),
            0xC4 | 0xCC | 0xD4 | 0xDC => self.exec_call_cc(bus, opcode),

            // PUSH rr / POP rr
            0xC5 | 0xD5 | 0xE5 | 0xF5 => self.exec_push_rr(bus, opcode),
            0xC1 | 0xD1 | 0xE1 | 0xF1 => self.exec_pop_rr(bus, opcode),

            // RET / RET cc / RETI
            0xC9 => self.exec_ret(bus),
            0xC0 | 0xC8 | 0xD0 | 0xD8 => self.exec_ret_cc(bus, opcode),
            0xD9 => self.exec_reti(bus),

            // RST nn
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => self.exec_rst(bus, opcode),

            0xD3 | 0xDB | 0xDD | 0xE3 | 0xE4 | 0xEB | 0xEC | 0xED | 0xF4 | 0xFC | 0xFD => {
                self.exec_illegal(opcode)
            }
        }
    }
}
