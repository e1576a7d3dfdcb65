//! RV32I Field Decoder.
//!
//! Splits an instruction word into a [`Decoded`] record. The work is:
//! 1. **Format:** The major opcode selects one of the six encoding formats.
//! 2. **Fields:** Register indices and function codes are read in place.
//! 3. **Immediate:** The scattered immediate bits are gathered and
//!    sign-extended according to the format.
//!
//! # Usage
//!
//! ```
//! use pmpsim_core::isa::decode::decode;
//!
//! // lw a0, -4(sp)
//! let d = decode(0xFFC1_2503);
//! assert_eq!((d.rd, d.rs1, d.imm), (10, 2, -4));
//! ```

use crate::isa::instruction::{Decoded, Format, InstructionBits, field};

/// Decodes every field of `inst`.
///
/// Unknown opcodes still decode; they get a zero immediate and the control
/// decoder turns them into a no-op.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    let format = Format::of(opcode);
    Decoded {
        raw: inst,
        format,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm: immediate(inst, format),
    }
}

/// Sign-extended immediate of `inst` read as `format`.
pub const fn immediate(inst: u32, format: Format) -> i32 {
    match format {
        Format::R => 0,
        Format::I => (inst as i32) >> 20,
        Format::S => sign_extend(field(inst, 25, 7) << 5 | field(inst, 7, 5), 12),
        Format::B => sign_extend(
            field(inst, 31, 1) << 12
                | field(inst, 7, 1) << 11
                | field(inst, 25, 6) << 5
                | field(inst, 8, 4) << 1,
            13,
        ),
        Format::U => (inst & 0xFFFF_F000) as i32,
        Format::J => sign_extend(
            field(inst, 31, 1) << 20
                | field(inst, 12, 8) << 12
                | field(inst, 20, 1) << 11
                | field(inst, 21, 10) << 1,
            21,
        ),
    }
}

const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
