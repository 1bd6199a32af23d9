// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{grammar, Id, Instruction, Module};
use half::f16;
use spirv::Op;
use std::fmt::Write;

const DEBUG_INFO_SET: &str = "NonSemantic.Shader.DebugInfo.100";
const DEBUG_SOURCE: u32 = 35;
const DEBUG_LINE: u32 = 103;
const DEBUG_NO_LINE: u32 = 104;

impl Module {
    /// Returns a disassembly-like description of the instruction at `index`, for use in
    /// diagnostics.
    ///
    /// If the module carries line information for the instruction, either as `OpLine` or as a
    /// `NonSemantic.Shader.DebugInfo.100` `DebugLine`, the source location is appended on a
    /// second line.
    pub fn describe_instruction(&self, index: usize) -> String {
        if index >= self.instruction_count() {
            return String::new();
        }

        let instruction = self.instruction(index);
        let mut text = String::new();

        if let Some(result_id) = instruction.result_id() {
            let _ = write!(text, "{result_id} = ");
        }

        match instruction.op() {
            Some(op) => {
                let _ = write!(text, "Op{op:?}");
            }
            None => {
                let _ = write!(text, "Op{}", instruction.opcode());
            }
        }

        if let Some(type_id) = instruction.type_id() {
            let _ = write!(text, " {type_id}");
        }

        match instruction.op() {
            Some(Op::Constant | Op::SpecConstant) => self.write_constant(&mut text, instruction),
            Some(op) => write_operands(&mut text, instruction, op),
            None => {
                for word in instruction.operands() {
                    let _ = write!(text, " {word}");
                }
            }
        }

        if let Some((file, line, column)) = self.source_location(instruction) {
            let _ = write!(text, "\n{file}:{line}:{column}");
        }

        text
    }

    fn write_constant(&self, text: &mut String, instruction: Instruction<'_>) {
        let value = instruction.operands();
        let value_type = instruction.type_id().and_then(|id| self.find_def(id));
        let (op, width, signed) = match value_type {
            Some(def) => (def.op(), def.bit_width().unwrap_or(32), def.get_word(3) == Some(1)),
            None => (None, 32, false),
        };
        let wide = match *value {
            [low, high, ..] => (u64::from(high) << 32) | u64::from(low),
            [low] => u64::from(low),
            [] => 0,
        };

        let _ = match (op, width) {
            (Some(Op::TypeFloat), 16) => write!(text, " {}", f16::from_bits(wide as u16)),
            (Some(Op::TypeFloat), 64) => write!(text, " {}", f64::from_bits(wide)),
            (Some(Op::TypeFloat), _) => write!(text, " {}", f32::from_bits(wide as u32)),
            (_, 64) if signed => write!(text, " {}", wide as i64),
            (_, 64) => write!(text, " {wide}"),
            _ if signed => write!(text, " {}", wide as u32 as i32),
            _ => write!(text, " {}", wide as u32),
        };
    }

    /// Finds the line information in effect for `instruction`, looking back to the start of
    /// its block.
    fn source_location(&self, instruction: Instruction<'_>) -> Option<(String, u32, u32)> {
        for index in (0..instruction.index()).rev() {
            let previous = self.instruction(index);

            match previous.op()? {
                Op::Line => {
                    let file = self
                        .debug_string(previous.id_at(1))
                        .unwrap_or("<unknown>")
                        .to_owned();
                    return Some((file, previous.get_word(2)?, previous.get_word(3)?));
                }
                Op::ExtInst if self.is_debug_info_set(previous.id_at(3)) => {
                    match previous.get_word(4)? {
                        DEBUG_LINE => return self.debug_line(previous),
                        DEBUG_NO_LINE => return None,
                        _ => (),
                    }
                }
                Op::NoLine | Op::Function | Op::FunctionEnd | Op::Label => return None,
                op if grammar::is_block_terminator(op) => return None,
                _ => (),
            }
        }

        None
    }

    fn is_debug_info_set(&self, set: Id) -> bool {
        self.ext_inst_import_name(set) == Some(DEBUG_INFO_SET)
    }

    fn debug_line(&self, line: Instruction<'_>) -> Option<(String, u32, u32)> {
        let file = self
            .find_def(line.id_at(5))
            .filter(|source| {
                source.op() == Some(Op::ExtInst) && source.get_word(4) == Some(DEBUG_SOURCE)
            })
            .and_then(|source| self.debug_string(source.id_at(5)))
            .unwrap_or("<unknown>");

        Some((
            file.to_owned(),
            self.constant_value_by_id(line.id_at(6))?,
            self.constant_value_by_id(line.id_at(8)).unwrap_or(0),
        ))
    }
}

/// Returns the position, among the operands, of the literal string an instruction carries.
fn string_operand(op: Op) -> Option<usize> {
    match op {
        Op::String
        | Op::Extension
        | Op::ExtInstImport
        | Op::SourceExtension
        | Op::ModuleProcessed => Some(0),
        Op::Name | Op::DecorateString => Some(1),
        Op::MemberName | Op::MemberDecorateString | Op::EntryPoint => Some(2),
        _ => None,
    }
}

fn write_operands(text: &mut String, instruction: Instruction<'_>, op: Op) {
    let operands = instruction.operands();
    let ids = grammar::id_operands(op);
    let string = string_operand(op).map(|start| {
        let len = instruction.string_len_at(instruction.operands_start() + start);
        (start, len)
    });

    let mut index = 0;

    while index < operands.len() {
        if let Some((start, len)) = string.filter(|&(start, _)| start == index) {
            let value = instruction.string_at(instruction.operands_start() + start);
            let _ = write!(text, " {value:?}");
            index += len.max(1);
            continue;
        }

        if ids.is_id(operands, index) {
            let _ = write!(text, " {}", Id::new(operands[index]));
        } else {
            let _ = write!(text, " {}", operands[index]);
        }

        index += 1;
    }
}
