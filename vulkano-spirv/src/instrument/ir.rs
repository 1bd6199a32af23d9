// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! An editable form of a module.
//!
//! Instructions are owned and grouped into the sections of the logical layout, so that new
//! types, constants and code can be inserted where the binary format requires them.

use super::InstrumentationError;
use crate::{grammar, Header, Instruction, Module};
use foldhash::HashMap;
use smallvec::{smallvec, SmallVec};
use spirv::{Capability, Op, StorageClass};

/// One owned instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrInstruction {
    pub opcode: u16,
    pub result_type: Option<u32>,
    pub result_id: Option<u32>,
    /// Every word after the result type and result id.
    pub operands: SmallVec<[u32; 8]>,
    /// The word offset of the instruction in the binary it was read from, or `None` if it was
    /// inserted.
    pub origin: Option<usize>,
}

impl IrInstruction {
    pub fn new(op: Op, result_type: Option<u32>, result_id: Option<u32>, operands: &[u32]) -> Self {
        IrInstruction {
            opcode: op as u16,
            result_type,
            result_id,
            operands: SmallVec::from_slice(operands),
            origin: None,
        }
    }

    fn from_instruction(instruction: Instruction<'_>) -> Self {
        IrInstruction {
            opcode: instruction.opcode(),
            result_type: instruction.type_id().map(u32::from),
            result_id: instruction.result_id().map(u32::from),
            operands: SmallVec::from_slice(instruction.operands()),
            origin: Some(instruction.offset()),
        }
    }

    #[inline]
    pub fn op(&self) -> Option<Op> {
        Op::from_u32(self.opcode as u32)
    }

    pub fn word_count(&self) -> usize {
        1 + self.result_type.is_some() as usize
            + self.result_id.is_some() as usize
            + self.operands.len()
    }

    fn write_words(&self, words: &mut Vec<u32>) {
        words.push(((self.word_count() as u32) << 16) | self.opcode as u32);
        words.extend(self.result_type);
        words.extend(self.result_id);
        words.extend_from_slice(&self.operands);
    }

    /// Returns whether the operand at `index` is an id.
    pub(crate) fn is_id_operand(&self, index: usize) -> bool {
        self.op()
            .is_some_and(|op| grammar::id_operands(op).is_id(&self.operands, index))
    }

    /// Calls `f` on the result type, the result id and every id operand.
    pub(crate) fn for_each_id_mut(&mut self, mut f: impl FnMut(&mut u32)) {
        if let Some(result_type) = &mut self.result_type {
            f(result_type);
        }

        if let Some(result_id) = &mut self.result_id {
            f(result_id);
        }

        for index in 0..self.operands.len() {
            if self.is_id_operand(index) {
                f(&mut self.operands[index]);
            }
        }
    }
}

/// A basic block. The `OpLabel` is implicit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrBlock {
    pub label: u32,
    /// The instructions of the block, ending with its terminator.
    pub instructions: Vec<IrInstruction>,
}

impl IrBlock {
    pub fn new(label: u32) -> Self {
        IrBlock {
            label,
            instructions: Vec::new(),
        }
    }

    /// Returns the labels of the blocks this block branches to.
    pub fn successors(&self) -> SmallVec<[u32; 2]> {
        let Some(terminator) = self.instructions.last() else {
            return SmallVec::new();
        };
        let operands = &terminator.operands;

        match terminator.op() {
            Some(Op::Branch) => operands.iter().take(1).copied().collect(),
            Some(Op::BranchConditional) => operands.iter().skip(1).take(2).copied().collect(),
            Some(Op::Switch) => operands
                .get(1)
                .into_iter()
                .chain(operands.iter().skip(3).step_by(2))
                .copied()
                .collect(),
            _ => SmallVec::new(),
        }
    }

    /// Returns whether the block is a loop header.
    pub fn has_loop_merge(&self) -> bool {
        self.instructions
            .iter()
            .any(|instruction| instruction.op() == Some(Op::LoopMerge))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IrFunction {
    /// The `OpFunction` instruction.
    pub definition: IrInstruction,
    /// The `OpFunctionParameter` instructions, with any `OpLine` or `OpNoLine` before the first
    /// block, in their original order.
    pub parameters: Vec<IrInstruction>,
    pub blocks: Vec<IrBlock>,
    /// The `OpFunctionEnd` instruction.
    pub end: IrInstruction,
}

impl IrFunction {
    #[inline]
    pub fn id(&self) -> u32 {
        self.definition.result_id.unwrap_or(0)
    }

    /// Calls `f` on every instruction, including the implicit labels.
    pub(crate) fn for_each_instruction_mut(&mut self, mut f: impl FnMut(&mut IrInstruction)) {
        f(&mut self.definition);
        self.parameters.iter_mut().for_each(&mut f);

        for block in &mut self.blocks {
            let mut label = IrInstruction::new(Op::Label, None, Some(block.label), &[]);
            f(&mut label);
            block.label = label.result_id.unwrap_or(block.label);
            block.instructions.iter_mut().for_each(&mut f);
        }

        f(&mut self.end);
    }
}

/// A module split into the sections of the logical layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IrModule {
    pub version: (u8, u8),
    pub generator: u32,
    /// All ids are below this. Allocating an id raises it.
    pub bound: u32,
    pub schema: u32,
    pub capabilities: Vec<IrInstruction>,
    pub extensions: Vec<IrInstruction>,
    pub ext_inst_imports: Vec<IrInstruction>,
    pub memory_model: Vec<IrInstruction>,
    pub entry_points: Vec<IrInstruction>,
    pub execution_modes: Vec<IrInstruction>,
    pub debug: Vec<IrInstruction>,
    pub annotations: Vec<IrInstruction>,
    /// Types, constants, global variables and anything else declared outside functions.
    pub globals: Vec<IrInstruction>,
    pub functions: Vec<IrFunction>,
    result_types: HashMap<u32, u32>,
}

impl IrModule {
    pub fn new(module: &Module) -> Result<IrModule, InstrumentationError> {
        let header = module.header();
        let mut ir = IrModule {
            version: header.version,
            generator: header.generator,
            bound: header.bound,
            schema: header.schema,
            ..IrModule::default()
        };
        let mut function: Option<IrFunction> = None;

        for instruction in module.instructions() {
            let ir_instruction = IrInstruction::from_instruction(instruction);

            if let (Some(result_type), Some(result_id)) =
                (ir_instruction.result_type, ir_instruction.result_id)
            {
                ir.result_types.insert(result_id, result_type);
            }

            if let Some(current) = &mut function {
                match instruction.op() {
                    Some(Op::FunctionParameter | Op::Line | Op::NoLine)
                        if current.blocks.is_empty() =>
                    {
                        current.parameters.push(ir_instruction);
                    }
                    Some(Op::Label) => current
                        .blocks
                        .push(IrBlock::new(ir_instruction.result_id.unwrap_or(0))),
                    Some(Op::FunctionEnd) => {
                        if let Some(mut finished) = function.take() {
                            finished.end = ir_instruction;
                            ir.functions.push(finished);
                        }
                    }
                    _ => match current.blocks.last_mut() {
                        Some(block) => block.instructions.push(ir_instruction),
                        None => {
                            return Err(InstrumentationError::UnsupportedInstruction {
                                opcode: instruction.opcode(),
                                offset: instruction.offset(),
                            });
                        }
                    },
                }

                continue;
            }

            match instruction.op() {
                Some(Op::Capability) => ir.capabilities.push(ir_instruction),
                Some(Op::Extension) => ir.extensions.push(ir_instruction),
                Some(Op::ExtInstImport) => ir.ext_inst_imports.push(ir_instruction),
                Some(Op::MemoryModel) => ir.memory_model.push(ir_instruction),
                Some(Op::EntryPoint) => ir.entry_points.push(ir_instruction),
                Some(Op::ExecutionMode | Op::ExecutionModeId) => {
                    ir.execution_modes.push(ir_instruction)
                }
                Some(
                    Op::String
                    | Op::SourceExtension
                    | Op::Source
                    | Op::SourceContinued
                    | Op::Name
                    | Op::MemberName
                    | Op::ModuleProcessed,
                ) => ir.debug.push(ir_instruction),
                Some(
                    Op::Decorate
                    | Op::DecorateId
                    | Op::DecorateString
                    | Op::MemberDecorate
                    | Op::MemberDecorateString
                    | Op::DecorationGroup
                    | Op::GroupDecorate
                    | Op::GroupMemberDecorate,
                ) => ir.annotations.push(ir_instruction),
                Some(Op::Function) => {
                    function = Some(IrFunction {
                        definition: ir_instruction,
                        parameters: Vec::new(),
                        blocks: Vec::new(),
                        end: IrInstruction::new(Op::FunctionEnd, None, None, &[]),
                    });
                }
                Some(Op::FunctionEnd) => {
                    return Err(InstrumentationError::Inconsistent(
                        "`OpFunctionEnd` outside of a function",
                    ));
                }
                _ => ir.globals.push(ir_instruction),
            }
        }

        if function.is_some() {
            return Err(InstrumentationError::Inconsistent(
                "function without `OpFunctionEnd`",
            ));
        }

        Ok(ir)
    }

    /// Parses and splits a binary.
    pub fn from_words(words: &[u32]) -> Result<IrModule, InstrumentationError> {
        IrModule::new(&Module::new(words)?)
    }

    /// Serializes the module.
    pub fn to_words(&self) -> Vec<u32> {
        let header = Header {
            magic: spirv::MAGIC_NUMBER,
            version: self.version,
            generator: self.generator,
            bound: self.bound,
            schema: self.schema,
        };
        let mut words = header.to_words().to_vec();

        for section in [
            &self.capabilities,
            &self.extensions,
            &self.ext_inst_imports,
            &self.memory_model,
            &self.entry_points,
            &self.execution_modes,
            &self.debug,
            &self.annotations,
            &self.globals,
        ] {
            section
                .iter()
                .for_each(|instruction| instruction.write_words(&mut words));
        }

        for function in &self.functions {
            function.definition.write_words(&mut words);
            function
                .parameters
                .iter()
                .for_each(|parameter| parameter.write_words(&mut words));

            for block in &function.blocks {
                words.push((2 << 16) | Op::Label as u32);
                words.push(block.label);
                block
                    .instructions
                    .iter()
                    .for_each(|instruction| instruction.write_words(&mut words));
            }

            function.end.write_words(&mut words);
        }

        words
    }

    /// Allocates a fresh id.
    pub fn allocate_id(&mut self) -> Result<u32, InstrumentationError> {
        let id = self.bound;
        self.bound = id
            .checked_add(1)
            .ok_or(InstrumentationError::Inconsistent("the id bound overflowed"))?;

        Ok(id)
    }

    /// Returns the type of the value `id`.
    #[inline]
    pub fn result_type(&self, id: u32) -> Option<u32> {
        self.result_types.get(&id).copied()
    }

    /// Records the type of a value created by a pass.
    pub(crate) fn set_result_type(&mut self, id: u32, result_type: u32) {
        self.result_types.insert(id, result_type);
    }

    /// Returns the global instruction that defines `id`.
    pub fn global(&self, id: u32) -> Option<&IrInstruction> {
        self.globals
            .iter()
            .find(|instruction| instruction.result_id == Some(id))
    }

    pub fn function_mut(&mut self, id: u32) -> Option<&mut IrFunction> {
        self.functions.iter_mut().find(|function| function.id() == id)
    }

    /// Returns whether `id` has any decoration.
    pub(crate) fn is_decorated(&self, id: u32) -> bool {
        self.annotations.iter().any(|annotation| {
            annotation.op() != Some(Op::DecorationGroup) && annotation.operands.first() == Some(&id)
        })
    }

    /// Returns the id of a global declared by exactly this opcode, result type and operands,
    /// declaring it if there is none. Decorated declarations are never reused.
    pub fn find_or_add_global(
        &mut self,
        op: Op,
        result_type: Option<u32>,
        operands: &[u32],
    ) -> Result<u32, InstrumentationError> {
        let existing = self.globals.iter().find_map(|instruction| {
            let id = instruction.result_id?;

            (instruction.opcode == op as u16
                && instruction.result_type == result_type
                && instruction.operands.as_slice() == operands
                && !self.is_decorated(id))
            .then_some(id)
        });

        match existing {
            Some(id) => Ok(id),
            None => self.add_global(op, result_type, operands),
        }
    }

    /// Declares a new global and returns its id.
    pub fn add_global(
        &mut self,
        op: Op,
        result_type: Option<u32>,
        operands: &[u32],
    ) -> Result<u32, InstrumentationError> {
        let id = self.allocate_id()?;
        self.globals
            .push(IrInstruction::new(op, result_type, Some(id), operands));

        if let Some(result_type) = result_type {
            self.result_types.insert(id, result_type);
        }

        Ok(id)
    }

    pub fn type_void(&mut self) -> Result<u32, InstrumentationError> {
        self.find_or_add_global(Op::TypeVoid, None, &[])
    }

    pub fn type_bool(&mut self) -> Result<u32, InstrumentationError> {
        self.find_or_add_global(Op::TypeBool, None, &[])
    }

    pub fn type_int(&mut self, width: u32, signed: bool) -> Result<u32, InstrumentationError> {
        if width == 64 {
            self.add_capability(Capability::Int64);
        }

        self.find_or_add_global(Op::TypeInt, None, &[width, signed as u32])
    }

    pub fn type_uint(&mut self) -> Result<u32, InstrumentationError> {
        self.type_int(32, false)
    }

    pub fn type_pointer(
        &mut self,
        storage_class: StorageClass,
        pointee: u32,
    ) -> Result<u32, InstrumentationError> {
        self.find_or_add_global(Op::TypePointer, None, &[storage_class as u32, pointee])
    }

    pub fn type_function(
        &mut self,
        return_type: u32,
        parameters: &[u32],
    ) -> Result<u32, InstrumentationError> {
        let mut operands: SmallVec<[u32; 8]> = smallvec![return_type];
        operands.extend_from_slice(parameters);

        self.find_or_add_global(Op::TypeFunction, None, &operands)
    }

    pub fn constant_uint(&mut self, value: u32) -> Result<u32, InstrumentationError> {
        let uint = self.type_uint()?;
        self.find_or_add_global(Op::Constant, Some(uint), &[value])
    }

    pub fn constant_null(&mut self, result_type: u32) -> Result<u32, InstrumentationError> {
        self.find_or_add_global(Op::ConstantNull, Some(result_type), &[])
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .iter()
            .any(|instruction| instruction.operands.first() == Some(&(capability as u32)))
    }

    pub fn add_capability(&mut self, capability: Capability) {
        if !self.has_capability(capability) {
            self.capabilities.push(IrInstruction::new(
                Op::Capability,
                None,
                None,
                &[capability as u32],
            ));
        }
    }

    /// Adds an `OpExtension` if the module does not have it yet. `words` is the encoded name.
    pub(crate) fn add_extension_words(&mut self, words: &[u32]) {
        if !self
            .extensions
            .iter()
            .any(|extension| extension.operands.as_slice() == words)
        {
            self.extensions
                .push(IrInstruction::new(Op::Extension, None, None, words));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{basic_types, preamble, Assembler};
    use spirv::ExecutionModel;

    fn module_words() -> Vec<u32> {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let main = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        )
        .inst_str(Op::Name, &[main], "main", &[]);
        let basics = basic_types(&mut asm);
        let [label, next] = std::array::from_fn(|_| asm.id());
        asm.inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::Branch, &[next])
            .inst(Op::Label, &[next])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);
        asm.finish()
    }

    #[test]
    fn split_and_serialize() {
        let words = module_words();
        let ir = IrModule::from_words(&words).unwrap();

        assert_eq!(ir.capabilities.len(), 1);
        assert_eq!(ir.entry_points.len(), 1);
        assert_eq!(ir.debug.len(), 1);
        assert_eq!(ir.globals.len(), 5);
        assert_eq!(ir.functions.len(), 1);
        assert_eq!(ir.functions[0].blocks.len(), 2);
        assert_eq!(
            ir.functions[0].blocks[0].successors().as_slice(),
            &[ir.functions[0].blocks[1].label],
        );
        assert_eq!(ir.to_words(), words);
    }

    #[test]
    fn find_or_add() {
        let mut ir = IrModule::from_words(&module_words()).unwrap();
        let bound = ir.bound;

        // `uint` exists already.
        let uint = ir.type_uint().unwrap();
        assert!(uint < bound);
        assert_eq!(ir.bound, bound);

        let seven = ir.constant_uint(7).unwrap();
        assert_eq!(seven, bound);
        assert_eq!(ir.constant_uint(7), Ok(seven));
        assert_eq!(ir.result_type(seven), Some(uint));

        let ulong = ir.type_int(64, false).unwrap();
        assert!(ir.has_capability(Capability::Int64));
        assert_ne!(ulong, uint);

        let reparsed = IrModule::from_words(&ir.to_words()).unwrap();
        assert_eq!(reparsed.bound, ir.bound);
        assert_eq!(reparsed.globals.len(), ir.globals.len());
    }

    #[test]
    fn exhausted_id_bound() {
        let mut ir = IrModule::from_words(&module_words()).unwrap();
        ir.bound = u32::MAX - 1;

        assert_eq!(ir.allocate_id(), Ok(u32::MAX - 1));
        assert_eq!(ir.bound, u32::MAX);
        assert!(matches!(
            ir.allocate_id(),
            Err(InstrumentationError::Inconsistent(_)),
        ));
        assert!(ir.constant_uint(7).is_err());
        assert_eq!(ir.bound, u32::MAX);
    }

    #[test]
    fn lines_before_the_first_block() {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let main = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        );
        let file = asm.id();
        asm.inst_str(Op::String, &[file], "shader.glsl", &[]);
        let basics = basic_types(&mut asm);
        let [helper_type, helper, parameter, label, helper_label] =
            std::array::from_fn(|_| asm.id());
        asm.inst(Op::TypeFunction, &[helper_type, basics.void, basics.uint])
            .inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Line, &[file, 1, 1])
            .inst(Op::Label, &[label])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[])
            .inst(Op::Function, &[basics.void, helper, 0, helper_type])
            .inst(Op::Line, &[file, 4, 2])
            .inst(Op::FunctionParameter, &[basics.uint, parameter])
            .inst(Op::NoLine, &[])
            .inst(Op::Label, &[helper_label])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);
        let words = asm.finish();

        let ir = IrModule::from_words(&words).unwrap();
        assert_eq!(ir.functions.len(), 2);
        assert_eq!(ir.functions[0].parameters[0].op(), Some(Op::Line));
        let ops: Vec<_> = ir.functions[1]
            .parameters
            .iter()
            .map(IrInstruction::op)
            .collect();
        assert_eq!(
            ops,
            [Some(Op::Line), Some(Op::FunctionParameter), Some(Op::NoLine)],
        );
        assert_eq!(ir.functions[1].parameters[0].operands.as_slice(), &[file, 4, 2]);
        assert_eq!(ir.to_words(), words);
    }

    #[test]
    fn entry_point_ids() {
        let ir = IrModule::from_words(&module_words()).unwrap();
        let entry_point = &ir.entry_points[0];

        assert!(!entry_point.is_id_operand(0));
        assert!(entry_point.is_id_operand(1));
        assert!(!entry_point.is_id_operand(2));
    }
}
