// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::{
    access::VariableAccesses,
    binary::{self, InstructionRecord},
    decoration::{self, DecorationSet, ExecutionModeSet},
    entry_point::{self, EntryPoint},
    grammar, layout, AccessFlags, DecorationFlags, Header, Id, Instruction, SpirvError,
    TypeStructInfo,
};
use foldhash::{HashMap, HashSet};
use log::debug;
use smallvec::SmallVec;
use spirv::{BuiltIn, Capability, ExecutionModel, Op, StorageClass};
use std::sync::Arc;

/// A parsed SPIR-V module, and everything derived from it.
///
/// All analysis is done once, in [`Module::new`]. The module is immutable afterwards.
#[derive(Debug)]
pub struct Module {
    words: Vec<u32>,
    header: Header,
    records: Vec<InstructionRecord>,
    definitions: HashMap<u32, usize>,
    statics: StaticData,
    decorations: HashMap<Id, DecorationSet>,
    empty_decorations: DecorationSet,
    execution_modes: HashMap<Id, ExecutionModeSet>,
    type_structs: HashMap<Id, Arc<TypeStructInfo>>,
    accesses: VariableAccesses,
    entry_points: Vec<EntryPoint>,
}

/// Buckets of instructions and facts collected in a single pass over the module.
#[derive(Debug, Default)]
pub(crate) struct StaticData {
    pub(crate) capabilities: Vec<Capability>,
    pub(crate) extensions: Vec<String>,
    pub(crate) ext_inst_imports: HashMap<Id, String>,
    pub(crate) debug_names: HashMap<Id, String>,
    pub(crate) strings: HashMap<Id, String>,
    pub(crate) entry_points: Vec<usize>,
    pub(crate) annotations: Vec<usize>,
    pub(crate) builtin_decorations: Vec<usize>,
    pub(crate) variables: Vec<usize>,
    pub(crate) type_structs: Vec<usize>,
    pub(crate) spec_constants: Vec<usize>,
    pub(crate) image_instructions: Vec<usize>,
    pub(crate) atomic_instructions: Vec<usize>,
    pub(crate) cooperative_matrix_instructions: Vec<usize>,
    pub(crate) function_calls: Vec<usize>,
    pub(crate) emit_vertex: Vec<usize>,
    /// The `[OpFunction, OpFunctionEnd]` instruction range of every function.
    pub(crate) functions: Vec<FunctionRange>,
    pub(crate) function_parameters: HashMap<Id, SmallVec<[Id; 4]>>,
    pub(crate) parameter_arguments: HashMap<Id, SmallVec<[Id; 2]>>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FunctionRange {
    pub(crate) id: Id,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl StaticData {
    fn new(module: &Module) -> StaticData {
        let mut data = StaticData::default();
        let mut current_function: Option<(Id, usize)> = None;

        for instruction in module.instructions() {
            let index = instruction.index();
            let Some(op) = instruction.op() else {
                continue;
            };

            match op {
                Op::Capability => {
                    if let Some(capability) = Capability::from_u32(instruction.word(1)) {
                        data.capabilities.push(capability);
                    }
                }
                Op::Extension => data.extensions.push(instruction.string_at(1)),
                Op::ExtInstImport => {
                    data.ext_inst_imports
                        .insert(instruction.id_at(1), instruction.string_at(2));
                }
                Op::Name => {
                    data.debug_names
                        .insert(instruction.id_at(1), instruction.string_at(2));
                }
                Op::String => {
                    data.strings
                        .insert(instruction.id_at(1), instruction.string_at(2));
                }
                Op::EntryPoint => data.entry_points.push(index),
                Op::Decorate
                | Op::DecorateId
                | Op::DecorateString
                | Op::MemberDecorate
                | Op::MemberDecorateString
                | Op::GroupDecorate
                | Op::GroupMemberDecorate
                | Op::ExecutionMode
                | Op::ExecutionModeId => {
                    if instruction.decoration() == Some(spirv::Decoration::BuiltIn) {
                        data.builtin_decorations.push(index);
                    }

                    data.annotations.push(index);
                }
                Op::Variable => data.variables.push(index),
                Op::TypeStruct => data.type_structs.push(index),
                Op::SpecConstantTrue
                | Op::SpecConstantFalse
                | Op::SpecConstant
                | Op::SpecConstantComposite
                | Op::SpecConstantOp => data.spec_constants.push(index),
                Op::FunctionCall => data.function_calls.push(index),
                Op::EmitVertex | Op::EmitStreamVertex => data.emit_vertex.push(index),
                Op::Function => current_function = Some((instruction.id_at(2), index)),
                Op::FunctionParameter => {
                    if let Some((function, _)) = current_function {
                        data.function_parameters
                            .entry(function)
                            .or_default()
                            .push(instruction.id_at(2));
                    }
                }
                Op::FunctionEnd => {
                    if let Some((id, start)) = current_function.take() {
                        data.functions.push(FunctionRange {
                            id,
                            start,
                            end: index,
                        });
                    }
                }
                _ => (),
            }

            if grammar::image_operand_position(op).is_some() {
                data.image_instructions.push(index);
            }

            if grammar::is_atomic_instruction(op) {
                data.atomic_instructions.push(index);
            }

            if grammar::is_cooperative_matrix_instruction(op) {
                data.cooperative_matrix_instructions.push(index);
            }
        }

        for &index in &data.function_calls {
            let call = module.instruction(index);
            let Some(parameters) = data.function_parameters.get(&call.id_at(3)) else {
                continue;
            };

            for (&parameter, &argument) in parameters.iter().zip(&call.words()[4..]) {
                data.parameter_arguments
                    .entry(parameter)
                    .or_default()
                    .push(Id::new(argument));
            }
        }

        data
    }
}

impl Module {
    /// Parses and analyses a module.
    ///
    /// The words may be in either byte order; a byte-swapped module is swapped back.
    pub fn new(words: &[u32]) -> Result<Module, SpirvError> {
        let mut words = words.to_vec();
        binary::normalize_endianness(&mut words);

        Self::from_words(words)
    }

    /// Parses and analyses a module given as bytes.
    ///
    /// The length must be a multiple of 4.
    pub fn from_bytes(bytes: &[u8]) -> Result<Module, SpirvError> {
        Self::from_words(binary::words_from_bytes(bytes)?)
    }

    fn from_words(words: Vec<u32>) -> Result<Module, SpirvError> {
        let (header, records, definitions) = binary::parse(&words)?;

        debug!(
            "parsed SPIR-V {}.{} module: generator {:#010x}, bound {}, {} instructions",
            header.version.0,
            header.version.1,
            header.generator,
            header.bound,
            records.len(),
        );

        let mut module = Module {
            words,
            header,
            records,
            definitions,
            statics: StaticData::default(),
            decorations: HashMap::default(),
            empty_decorations: DecorationSet::default(),
            execution_modes: HashMap::default(),
            type_structs: HashMap::default(),
            accesses: VariableAccesses::default(),
            entry_points: Vec::new(),
        };

        // Each step only reads what the previous steps built.
        module.statics = StaticData::new(&module);
        let annotations = module.indexed(&module.statics.annotations);
        let decorations = decoration::decoration_sets(annotations.clone());
        let execution_modes = decoration::execution_mode_sets(annotations);
        module.decorations = decorations;
        module.execution_modes = execution_modes;
        module.type_structs = layout::type_struct_infos(&module);
        module.accesses = VariableAccesses::new(&module);
        module.entry_points = entry_point::entry_points(&module);

        Ok(module)
    }

    fn indexed<'a>(
        &'a self,
        indices: &'a [usize],
    ) -> impl Iterator<Item = Instruction<'a>> + Clone + 'a {
        indices.iter().map(move |&index| self.instruction(index))
    }

    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the words of the module.
    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Returns the module as a binary. Identical to the words it was parsed from.
    #[inline]
    pub fn to_binary(&self) -> Vec<u32> {
        self.words.clone()
    }

    /// Returns the number of instructions.
    #[inline]
    pub fn instruction_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the instruction at position `index` of the instruction stream.
    ///
    /// # Panics
    ///
    /// - Panics if `index` is not less than [`instruction_count`](Self::instruction_count).
    #[inline]
    pub fn instruction(&self, index: usize) -> Instruction<'_> {
        Instruction::new(&self.words, index, self.records[index])
    }

    /// Returns an iterator over all instructions, in order.
    pub fn instructions(&self) -> impl ExactSizeIterator<Item = Instruction<'_>> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(move |(index, &record)| Instruction::new(&self.words, index, record))
    }

    /// Returns the instruction that defines `id`.
    #[inline]
    pub fn find_def(&self, id: Id) -> Option<Instruction<'_>> {
        let index = *self.definitions.get(&id.as_raw())?;
        Some(self.instruction(index))
    }

    /// Returns the instruction at the given word offset, if an instruction starts there.
    pub fn instruction_at_offset(&self, offset: usize) -> Option<Instruction<'_>> {
        let index = self
            .records
            .binary_search_by_key(&offset, |record| record.offset)
            .ok()?;
        Some(self.instruction(index))
    }

    pub fn variables(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.variables)
    }

    pub fn entry_point_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.entry_points)
    }

    pub fn type_struct_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.type_structs)
    }

    /// Returns every instruction that accesses an image, an image pointer or a sampled image.
    pub fn image_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.image_instructions)
    }

    pub fn atomic_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.atomic_instructions)
    }

    pub fn cooperative_matrix_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.cooperative_matrix_instructions)
    }

    pub fn function_call_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.function_calls)
    }

    pub fn builtin_decoration_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.builtin_decorations)
    }

    pub fn spec_constant_instructions(&self) -> impl Iterator<Item = Instruction<'_>> + '_ {
        self.indexed(&self.statics.spec_constants)
    }

    /// Returns the instructions of the function `function`, from `OpFunction` to
    /// `OpFunctionEnd` inclusive.
    pub fn function_instructions(
        &self,
        function: Id,
    ) -> impl Iterator<Item = Instruction<'_>> + '_ {
        let range = self
            .statics
            .functions
            .iter()
            .find(|range| range.id == function)
            .map_or(0..0, |range| range.start..range.end + 1);

        range.map(move |index| self.instruction(index))
    }

    /// Returns the id of the function that contains the instruction at `index`.
    pub fn function_of(&self, index: usize) -> Option<Id> {
        let functions = &self.statics.functions;
        let position = functions.partition_point(|range| range.start <= index);
        let range = functions.get(position.checked_sub(1)?)?;

        (index <= range.end).then_some(range.id)
    }

    /// Returns the parameter ids of `function`.
    pub fn function_parameters(&self, function: Id) -> &[Id] {
        self.statics
            .function_parameters
            .get(&function)
            .map_or(&[], |parameters| parameters.as_slice())
    }

    /// Returns every argument passed to the function parameter `parameter`, across all call
    /// sites.
    pub fn function_parameter_arguments(&self, parameter: Id) -> &[Id] {
        self.statics
            .parameter_arguments
            .get(&parameter)
            .map_or(&[], |arguments| arguments.as_slice())
    }

    pub fn capabilities(&self) -> &[Capability] {
        &self.statics.capabilities
    }

    #[inline]
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.statics.capabilities.contains(&capability)
    }

    pub fn extensions(&self) -> &[String] {
        &self.statics.extensions
    }

    pub fn has_extension(&self, extension: &str) -> bool {
        self.statics.extensions.iter().any(|e| e == extension)
    }

    /// Returns the name of the extended instruction set imported as `id`.
    pub fn ext_inst_import_name(&self, id: Id) -> Option<&str> {
        self.statics.ext_inst_imports.get(&id).map(String::as_str)
    }

    /// Returns the `OpName` of `id`.
    pub fn debug_name(&self, id: Id) -> Option<&str> {
        self.statics.debug_names.get(&id).map(String::as_str)
    }

    /// Returns the string declared by `OpString` as `id`.
    pub fn debug_string(&self, id: Id) -> Option<&str> {
        self.statics.strings.get(&id).map(String::as_str)
    }

    pub fn has_specialization_constants(&self) -> bool {
        !self.statics.spec_constants.is_empty()
    }

    pub(crate) fn has_emit_vertex(&self, accessible_ids: &HashSet<Id>) -> bool {
        self.statics.emit_vertex.iter().any(|&index| {
            self.function_of(index)
                .is_some_and(|function| accessible_ids.contains(&function))
        })
    }

    /// Returns the decorations of `id`. Ids without decorations return an empty set.
    #[inline]
    pub fn decoration_set(&self, id: Id) -> &DecorationSet {
        self.decorations.get(&id).unwrap_or(&self.empty_decorations)
    }

    /// Returns the execution modes of the entry point function `entry_point`.
    #[inline]
    pub fn execution_mode_set(&self, entry_point: Id) -> Option<&ExecutionModeSet> {
        self.execution_modes.get(&entry_point)
    }

    /// Returns the layout information of the struct type `id`.
    #[inline]
    pub fn type_struct_info(&self, id: Id) -> Option<&Arc<TypeStructInfo>> {
        self.type_structs.get(&id)
    }

    /// Returns how `variable` is accessed anywhere in the module.
    #[inline]
    pub fn variable_access(&self, variable: Id) -> AccessFlags {
        self.accesses.flags(variable)
    }

    pub(crate) fn accesses(&self) -> &VariableAccesses {
        &self.accesses
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    /// Returns the entry point with the given name and execution model.
    pub fn entry_point(&self, name: &str, execution_model: ExecutionModel) -> Option<&EntryPoint> {
        self.entry_points.iter().find(|entry_point| {
            entry_point.name == name && entry_point.execution_model == execution_model
        })
    }

    /// Returns the numeric value of a scalar constant.
    ///
    /// `OpSpecConstant` returns its default value. Booleans return 0 or 1. Returns `None` for
    /// anything that is not a scalar constant, including specialization constant operations.
    pub fn constant_value_by_id(&self, id: Id) -> Option<u32> {
        let def = self.find_def(id)?;

        match def.op()? {
            Op::Constant | Op::SpecConstant => def.constant_value(),
            Op::ConstantTrue | Op::SpecConstantTrue => Some(1),
            Op::ConstantFalse | Op::SpecConstantFalse | Op::ConstantNull => Some(0),
            _ => None,
        }
    }

    /// Returns the type an `OpVariable` or pointer-typed value points to.
    pub(crate) fn pointee_type(&self, pointer: Id) -> Option<Id> {
        let pointer_type = self.find_def(self.find_def(pointer)?.type_id()?)?;

        (pointer_type.op() == Some(Op::TypePointer)).then(|| pointer_type.id_at(3))
    }

    /// Returns the amount of workgroup memory used by the variables `entry_point` accesses.
    ///
    /// Variables are summed, unless one of them is decorated `Aliased`, in which case they all
    /// share the same memory and the largest one is returned.
    pub fn calculate_workgroup_shared_memory(&self, entry_point: &EntryPoint) -> u32 {
        let mut total = 0u32;
        let mut largest = 0u32;
        let mut aliased = false;

        for variable in self.variables() {
            let Some(id) = variable.result_id() else {
                continue;
            };

            if variable.storage_class() != Some(StorageClass::Workgroup)
                || !entry_point.accessible_ids.contains(&id)
            {
                continue;
            }

            let size = self
                .pointee_type(id)
                .map_or(0, |pointee| self.type_bytes_size(pointee));
            aliased |= self.decoration_set(id).has(DecorationFlags::ALIASED);
            total = total.saturating_add(size);
            largest = largest.max(size);
        }

        if aliased {
            largest
        } else {
            total
        }
    }

    /// Returns the workgroup size of `entry_point`.
    ///
    /// A constant decorated `BuiltIn WorkgroupSize` takes precedence over the `LocalSize` and
    /// `LocalSizeId` execution modes.
    pub fn find_local_size(&self, entry_point: &EntryPoint) -> Option<(u32, u32, u32)> {
        let workgroup_size = self
            .builtin_decoration_instructions()
            .find(|decoration| {
                decoration.op() == Some(Op::Decorate)
                    && decoration.builtin() == Some(BuiltIn::WorkgroupSize)
            })
            .and_then(|decoration| self.find_def(decoration.id_at(1)));

        if let Some(composite) = workgroup_size {
            if let [x, y, z] = *composite.operands() {
                return Some((
                    self.constant_value_by_id(Id::new(x))?,
                    self.constant_value_by_id(Id::new(y))?,
                    self.constant_value_by_id(Id::new(z))?,
                ));
            }
        }

        let modes = &entry_point.execution_mode;

        if modes.has(crate::ExecutionModeFlags::LOCAL_SIZE) {
            Some((modes.local_size_x, modes.local_size_y, modes.local_size_z))
        } else if modes.has(crate::ExecutionModeFlags::LOCAL_SIZE_ID) {
            Some((
                self.constant_value_by_id(Id::new(modes.local_size_x))?,
                self.constant_value_by_id(Id::new(modes.local_size_y))?,
                self.constant_value_by_id(Id::new(modes.local_size_z))?,
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{basic_types, preamble, Assembler};
    use spirv::{Decoration, ExecutionMode};

    /// A compute shader with `LocalSize 8 8 1` and an empty body.
    fn minimal_compute() -> (Vec<u32>, u32) {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let main = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        )
        .inst(
            Op::ExecutionMode,
            &[main, ExecutionMode::LocalSize as u32, 8, 8, 1],
        )
        .inst_str(Op::Name, &[main], "main", &[]);
        let basics = basic_types(&mut asm);
        let label = asm.id();
        asm.inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        (asm.finish(), main)
    }

    #[test]
    fn minimal_compute_shader() {
        let (words, main) = minimal_compute();
        let module = Module::new(&words).unwrap();

        assert_eq!(module.entry_points().len(), 1);
        let entry_point = module
            .entry_point("main", ExecutionModel::GLCompute)
            .unwrap();
        assert_eq!(entry_point.id, Id::new(main));
        assert_eq!(module.find_local_size(entry_point), Some((8, 8, 1)));
        assert!(entry_point.resource_interface_variables.is_empty());
        assert_eq!(module.calculate_workgroup_shared_memory(entry_point), 0);
        assert!(entry_point.accessible_ids.contains(&Id::new(main)));
        assert_eq!(module.debug_name(Id::new(main)), Some("main"));
        assert!(module.has_capability(Capability::Shader));
        assert!(!module.has_specialization_constants());
    }

    /// A function body with `OpSDot` and `OpGroupNonUniformRotateKHR`, and `extra` appended to
    /// it before the return.
    fn extension_results(extra: &[(Op, [u32; 4])]) -> (Vec<u32>, [u32; 4]) {
        let mut asm = Assembler::new().version(1, 6);
        preamble(&mut asm);
        let main = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        );
        let basics = basic_types(&mut asm);
        let [packed, scope, delta, label, dot, rotated] = std::array::from_fn(|_| asm.id());
        asm.inst(Op::Constant, &[basics.uint, packed, 0x0102_0304])
            .inst(Op::Constant, &[basics.uint, scope, 3])
            .inst(Op::Constant, &[basics.uint, delta, 1])
            .inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::SDot, &[basics.int, dot, packed, packed, 0])
            .inst(
                Op::GroupNonUniformRotateKHR,
                &[basics.uint, rotated, scope, packed, delta],
            );

        for &(op, operands) in extra {
            asm.inst(op, &operands);
        }

        asm.inst(Op::Return, &[]).inst(Op::FunctionEnd, &[]);

        (asm.finish(), [basics.int, packed, dot, rotated])
    }

    #[test]
    fn extension_results_are_defined() {
        let (words, [_, _, dot, rotated]) = extension_results(&[]);
        let module = Module::new(&words).unwrap();

        assert_eq!(module.find_def(Id::new(dot)).unwrap().op(), Some(Op::SDot));
        assert_eq!(
            module.find_def(Id::new(rotated)).unwrap().op(),
            Some(Op::GroupNonUniformRotateKHR),
        );
    }

    #[test]
    fn extension_results_are_checked() {
        let (_, [int, packed, dot, _]) = extension_results(&[]);

        let (words, _) = extension_results(&[(Op::SDot, [int, dot, packed, packed])]);
        assert!(matches!(
            Module::new(&words),
            Err(SpirvError::DuplicateId { id, .. }) if id == Id::new(dot),
        ));

        let (words, _) = extension_results(&[(Op::SDot, [int, 9999, packed, packed])]);
        assert!(matches!(
            Module::new(&words),
            Err(SpirvError::IdOutOfBounds { id, .. }) if id == Id::new(9999),
        ));
    }

    #[test]
    fn huge_bound_parses() {
        let (mut words, _) = minimal_compute();
        words[3] = u32::MAX;

        let module = Module::new(&words).unwrap();
        assert_eq!(module.header().bound, u32::MAX);
        assert_eq!(module.entry_points().len(), 1);
    }

    #[test]
    fn round_trip() {
        let (words, _) = minimal_compute();
        let module = Module::new(&words).unwrap();
        assert_eq!(module.to_binary(), words);

        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        assert_eq!(Module::from_bytes(&bytes).unwrap().to_binary(), words);
    }

    #[test]
    fn every_accessible_id_has_a_definition() {
        let (words, _) = minimal_compute();
        let module = Module::new(&words).unwrap();

        for entry_point in module.entry_points() {
            assert!(entry_point.accessible_ids.contains(&entry_point.id));

            for &id in &entry_point.accessible_ids {
                assert!(module.find_def(id).is_some());
            }
        }
    }

    #[test]
    fn function_lookup() {
        let (words, main) = minimal_compute();
        let module = Module::new(&words).unwrap();

        let body: Vec<_> = module
            .function_instructions(Id::new(main))
            .map(|i| i.op())
            .collect();
        assert_eq!(
            body,
            [
                Some(Op::Function),
                Some(Op::Label),
                Some(Op::Return),
                Some(Op::FunctionEnd),
            ],
        );

        let ret = module
            .instructions()
            .find(|i| i.op() == Some(Op::Return))
            .unwrap();
        assert_eq!(module.function_of(ret.index()), Some(Id::new(main)));
        assert_eq!(module.function_of(0), None);
        assert_eq!(
            module
                .instruction_at_offset(ret.offset())
                .map(|i| i.index()),
            Some(ret.index()),
        );
    }

    /// `WorkgroupSize` takes precedence over `LocalSizeId`, and shared memory sums or takes the
    /// largest variable depending on `Aliased`.
    fn workgroup_module(aliased: bool) -> Vec<u32> {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let main = asm.id();
        let size = asm.id();
        let a = asm.id();
        let b = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        );

        if aliased {
            asm.inst(Op::Decorate, &[a, Decoration::Aliased as u32]);
        } else {
            asm.inst(
                Op::Decorate,
                &[size, Decoration::BuiltIn as u32, BuiltIn::WorkgroupSize as u32],
            );
        }

        let basics = basic_types(&mut asm);
        let uvec3 = asm.id();
        let c2 = asm.id();
        let c3 = asm.id();
        let c4 = asm.id();
        let arr = asm.id();
        let ptr_arr = asm.id();
        let ptr_uint = asm.id();
        asm.inst(Op::TypeVector, &[uvec3, basics.uint, 3])
            .inst(Op::Constant, &[basics.uint, c2, 2])
            .inst(Op::Constant, &[basics.uint, c3, 3])
            .inst(Op::Constant, &[basics.uint, c4, 4])
            .inst(Op::ConstantComposite, &[uvec3, size, c4, c2, c3])
            .inst(Op::TypeArray, &[arr, basics.float, c4])
            .inst(
                Op::TypePointer,
                &[ptr_arr, StorageClass::Workgroup as u32, arr],
            )
            .inst(
                Op::TypePointer,
                &[ptr_uint, StorageClass::Workgroup as u32, basics.uint],
            )
            .inst(Op::Variable, &[ptr_arr, a, StorageClass::Workgroup as u32])
            .inst(Op::Variable, &[ptr_uint, b, StorageClass::Workgroup as u32]);

        let label = asm.id();
        let load_a = asm.id();
        let elem = asm.id();
        let zero = asm.id();
        let ptr_float = asm.id();
        asm.inst(
            Op::TypePointer,
            &[ptr_float, StorageClass::Workgroup as u32, basics.float],
        )
        .inst(Op::Constant, &[basics.uint, zero, 0]);
        let load_b = asm.id();
        asm.inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::AccessChain, &[ptr_float, elem, a, zero])
            .inst(Op::Load, &[basics.float, load_a, elem])
            .inst(Op::Load, &[basics.uint, load_b, b])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        asm.finish()
    }

    #[test]
    fn workgroup_size_and_shared_memory() {
        let module = Module::new(&workgroup_module(false)).unwrap();
        let entry_point = &module.entry_points()[0];
        assert_eq!(module.find_local_size(entry_point), Some((4, 2, 3)));
        assert_eq!(module.calculate_workgroup_shared_memory(entry_point), 16 + 4);

        let module = Module::new(&workgroup_module(true)).unwrap();
        let entry_point = &module.entry_points()[0];
        assert_eq!(module.find_local_size(entry_point), None);
        assert_eq!(module.calculate_workgroup_shared_memory(entry_point), 16);
    }

    #[test]
    fn constant_values() {
        let mut asm = Assembler::new();
        let basics = basic_types(&mut asm);
        let bool_ty = asm.id();
        let c = asm.id();
        let s = asm.id();
        let t = asm.id();
        let op = asm.id();
        asm.inst(Op::TypeBool, &[bool_ty])
            .inst(Op::Constant, &[basics.uint, c, 7])
            .inst(Op::SpecConstant, &[basics.uint, s, 9])
            .inst(Op::SpecConstantTrue, &[bool_ty, t])
            .inst(
                Op::SpecConstantOp,
                &[basics.uint, op, Op::IAdd as u32, c, s],
            );

        let module = Module::new(&asm.finish()).unwrap();
        assert_eq!(module.constant_value_by_id(Id::new(c)), Some(7));
        assert_eq!(module.constant_value_by_id(Id::new(s)), Some(9));
        assert_eq!(module.constant_value_by_id(Id::new(t)), Some(1));
        assert_eq!(module.constant_value_by_id(Id::new(op)), None);
        assert_eq!(module.constant_value_by_id(Id::new(999)), None);
        assert!(module.has_specialization_constants());
    }
}
