// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! A tiny word-level assembler for building modules in tests.

use spirv::Op;

/// Encodes a literal string as nul-terminated, zero-padded words.
pub(crate) fn string_words(s: &str) -> Vec<u32> {
    let mut bytes = s.as_bytes().to_vec();
    bytes.push(0);

    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }

    bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

pub(crate) struct Assembler {
    version: (u8, u8),
    next_id: u32,
    words: Vec<u32>,
}

impl Assembler {
    pub(crate) fn new() -> Self {
        Assembler {
            version: (1, 0),
            next_id: 1,
            words: Vec::new(),
        }
    }

    pub(crate) fn version(mut self, major: u8, minor: u8) -> Self {
        self.version = (major, minor);
        self
    }

    /// Allocates a fresh id.
    pub(crate) fn id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends an instruction; `operands` are every word after the opcode word.
    pub(crate) fn inst(&mut self, op: Op, operands: &[u32]) -> &mut Self {
        self.words
            .push(((operands.len() as u32 + 1) << 16) | op as u32);
        self.words.extend_from_slice(operands);
        self
    }

    /// Appends an instruction with a literal string between two runs of operands.
    pub(crate) fn inst_str(
        &mut self,
        op: Op,
        before: &[u32],
        string: &str,
        after: &[u32],
    ) -> &mut Self {
        let mut operands = before.to_vec();
        operands.extend(string_words(string));
        operands.extend_from_slice(after);
        self.inst(op, &operands)
    }

    pub(crate) fn finish(&self) -> Vec<u32> {
        let mut words = vec![
            spirv::MAGIC_NUMBER,
            ((self.version.0 as u32) << 16) | ((self.version.1 as u32) << 8),
            0,
            self.next_id,
            0,
        ];
        words.extend_from_slice(&self.words);
        words
    }
}

/// Common scaffolding: capabilities, memory model, and the ids of a few basic types.
pub(crate) struct Basics {
    pub(crate) void: u32,
    pub(crate) void_fn: u32,
    pub(crate) uint: u32,
    pub(crate) int: u32,
    pub(crate) float: u32,
}

/// Emits `OpCapability Shader` and `OpMemoryModel Logical GLSL450`.
pub(crate) fn preamble(asm: &mut Assembler) {
    asm.inst(Op::Capability, &[spirv::Capability::Shader as u32]);
    asm.inst(
        Op::MemoryModel,
        &[
            spirv::AddressingModel::Logical as u32,
            spirv::MemoryModel::GLSL450 as u32,
        ],
    );
}

/// Emits `void`, `void()`, `uint`, `int` and `float` types.
pub(crate) fn basic_types(asm: &mut Assembler) -> Basics {
    let void = asm.id();
    let void_fn = asm.id();
    let uint = asm.id();
    let int = asm.id();
    let float = asm.id();
    asm.inst(Op::TypeVoid, &[void]);
    asm.inst(Op::TypeFunction, &[void_fn, void]);
    asm.inst(Op::TypeInt, &[uint, 32, 0]);
    asm.inst(Op::TypeInt, &[int, 32, 1]);
    asm.inst(Op::TypeFloat, &[float, 32]);

    Basics {
        void,
        void_fn,
        uint,
        int,
        float,
    }
}
