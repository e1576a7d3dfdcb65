//! RV32I Disassembler.
//!
//! Renders an instruction word in assembler syntax with ABI register names.
//! Used by the instruction trace and by the CLI when reporting violations.
//!
//! # Usage
//!
//! ```
//! use pmpsim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00513), "addi a0, zero, 10");
//! ```

use crate::isa::abi::reg_name;
use crate::isa::decode::decode;
use crate::isa::instruction::{Decoded, Format};
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Returns the assembler text for `inst`.
///
/// Encodings outside RV32I render as `unknown (0x........)`.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    let Some(mnemonic) = mnemonic(&d) else {
        return format!("unknown ({inst:#010x})");
    };
    let (rd, rs1, rs2) = (reg_name(d.rd), reg_name(d.rs1), reg_name(d.rs2));

    match d.format {
        Format::R => format!("{mnemonic} {rd}, {rs1}, {rs2}"),
        Format::I if d.opcode == opcodes::OP_MISC_MEM => mnemonic.to_string(),
        Format::I if matches!(d.opcode, opcodes::OP_LOAD | opcodes::OP_JALR) => {
            format!("{mnemonic} {rd}, {}({rs1})", d.imm)
        }
        Format::I if is_shift_imm(&d) => format!("{mnemonic} {rd}, {rs1}, {}", d.imm & 0x1F),
        Format::I => format!("{mnemonic} {rd}, {rs1}, {}", d.imm),
        Format::S => format!("{mnemonic} {rs2}, {}({rs1})", d.imm),
        Format::B => format!("{mnemonic} {rs1}, {rs2}, {}", d.imm),
        Format::U => format!("{mnemonic} {rd}, {:#x}", (d.imm as u32) >> 12),
        Format::J => format!("{mnemonic} {rd}, {}", d.imm),
    }
}

const fn is_shift_imm(d: &Decoded) -> bool {
    matches!(d.funct3, funct3::SLL | funct3::SRL_SRA)
}

fn mnemonic(d: &Decoded) -> Option<&'static str> {
    let name = match (d.opcode, d.funct3, d.funct7) {
        (opcodes::OP_LUI, ..) => "lui",
        (opcodes::OP_AUIPC, ..) => "auipc",
        (opcodes::OP_JAL, ..) => "jal",
        (opcodes::OP_JALR, 0, _) => "jalr",
        (opcodes::OP_MISC_MEM, funct3::FENCE, _) => "fence",

        (opcodes::OP_BRANCH, funct3::BEQ, _) => "beq",
        (opcodes::OP_BRANCH, funct3::BNE, _) => "bne",
        (opcodes::OP_BRANCH, funct3::BLT, _) => "blt",
        (opcodes::OP_BRANCH, funct3::BGE, _) => "bge",
        (opcodes::OP_BRANCH, funct3::BLTU, _) => "bltu",
        (opcodes::OP_BRANCH, funct3::BGEU, _) => "bgeu",

        (opcodes::OP_LOAD, funct3::LB, _) => "lb",
        (opcodes::OP_LOAD, funct3::LH, _) => "lh",
        (opcodes::OP_LOAD, funct3::LW, _) => "lw",
        (opcodes::OP_LOAD, funct3::LBU, _) => "lbu",
        (opcodes::OP_LOAD, funct3::LHU, _) => "lhu",

        (opcodes::OP_STORE, funct3::SB, _) => "sb",
        (opcodes::OP_STORE, funct3::SH, _) => "sh",
        (opcodes::OP_STORE, funct3::SW, _) => "sw",

        (opcodes::OP_IMM, funct3::ADD_SUB, _) => "addi",
        (opcodes::OP_IMM, funct3::SLT, _) => "slti",
        (opcodes::OP_IMM, funct3::SLTU, _) => "sltiu",
        (opcodes::OP_IMM, funct3::XOR, _) => "xori",
        (opcodes::OP_IMM, funct3::OR, _) => "ori",
        (opcodes::OP_IMM, funct3::AND, _) => "andi",
        (opcodes::OP_IMM, funct3::SLL, funct7::DEFAULT) => "slli",
        (opcodes::OP_IMM, funct3::SRL_SRA, funct7::DEFAULT) => "srli",
        (opcodes::OP_IMM, funct3::SRL_SRA, funct7::SRA) => "srai",

        (opcodes::OP_REG, funct3::ADD_SUB, funct7::DEFAULT) => "add",
        (opcodes::OP_REG, funct3::ADD_SUB, funct7::SUB) => "sub",
        (opcodes::OP_REG, funct3::SLL, funct7::DEFAULT) => "sll",
        (opcodes::OP_REG, funct3::SLT, funct7::DEFAULT) => "slt",
        (opcodes::OP_REG, funct3::SLTU, funct7::DEFAULT) => "sltu",
        (opcodes::OP_REG, funct3::XOR, funct7::DEFAULT) => "xor",
        (opcodes::OP_REG, funct3::SRL_SRA, funct7::DEFAULT) => "srl",
        (opcodes::OP_REG, funct3::SRL_SRA, funct7::SRA) => "sra",
        (opcodes::OP_REG, funct3::OR, funct7::DEFAULT) => "or",
        (opcodes::OP_REG, funct3::AND, funct7::DEFAULT) => "and",
        _ => return None,
    };
    Some(name)
}
