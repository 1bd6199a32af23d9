// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Sizes, interface consumption and layout of types.

use crate::{grammar, DecorationBase, DecorationSet, Id, Instruction, Module};
use foldhash::HashMap;
use log::warn;
use spirv::{Op, StorageClass};
use std::sync::Arc;

/// The numeric class of a scalar type, or of the scalar inside a composite or pointer type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumericType {
    Sint,
    Uint,
    Float,
    Unknown,
}

/// The layout information of one `OpTypeStruct`.
///
/// Built once per struct type and shared by every variable and member that uses the type.
#[derive(Clone, Debug)]
pub struct TypeStructInfo {
    pub id: Id,
    /// The number of members.
    pub length: u32,
    pub decorations: DecorationSet,
    pub members: Vec<StructMember>,
}

/// One member of a struct type.
#[derive(Clone, Debug)]
pub struct StructMember {
    /// The type id of the member.
    pub id: Id,
    /// The index of the instruction that defines the member type.
    pub instruction: usize,
    /// The layout of the member type, if it is a struct or an array of structs.
    pub type_struct_info: Option<Arc<TypeStructInfo>>,
    pub decorations: Option<DecorationBase>,
}

/// The bytes a struct occupies, as `[offset, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StructRange {
    /// The lowest member offset.
    pub offset: u32,
    /// The offset of the highest member plus that member's size.
    pub end: u32,
}

impl StructRange {
    #[inline]
    pub fn size(&self) -> u32 {
        self.end - self.offset
    }
}

impl TypeStructInfo {
    /// Returns the range of bytes the struct occupies.
    ///
    /// Explicit `Offset` decorations need not be in declaration order, so the range runs from the
    /// smallest member offset to the end of the member with the largest offset. Without explicit
    /// offsets the members are packed in declaration order.
    pub fn range(&self, module: &Module) -> StructRange {
        let highest = self
            .members
            .iter()
            .filter_map(|member| Some((member.decorations.as_ref()?.offset?, member)))
            .max_by_key(|&(offset, _)| offset);

        match highest {
            Some((highest_offset, member)) => {
                let offset = self
                    .members
                    .iter()
                    .filter_map(|member| member.decorations.as_ref()?.offset)
                    .min()
                    .unwrap_or(0);

                StructRange {
                    offset,
                    end: highest_offset.saturating_add(member_size(module, member)),
                }
            }
            None => StructRange {
                offset: 0,
                end: self
                    .members
                    .iter()
                    .map(|member| member_size(module, member))
                    .fold(0, u32::saturating_add),
            },
        }
    }
}

fn member_size(module: &Module, member: &StructMember) -> u32 {
    let Some(def) = module.find_def(member.id) else {
        return 0;
    };

    match def.op() {
        Some(Op::TypeStruct) => member
            .type_struct_info
            .as_ref()
            .map_or(0, |info| info.range(module).end),
        Some(Op::TypeArray) => {
            let length = module.array_length(def);
            let stride = module.decoration_set(member.id).base.array_stride;
            let element_size = stride.unwrap_or_else(|| match &member.type_struct_info {
                Some(info) => info.range(module).end,
                None => module.type_bytes_size(def.id_at(2)),
            });

            length.saturating_mul(element_size)
        }
        Some(Op::TypeRuntimeArray) => 0,
        _ => module.type_bytes_size(member.id),
    }
}

/// Builds the layout information of every struct type in the module.
pub(crate) fn type_struct_infos(module: &Module) -> HashMap<Id, Arc<TypeStructInfo>> {
    let mut infos: HashMap<Id, Arc<TypeStructInfo>> = HashMap::default();

    // Types are declared before use, so nested structs are always built first.
    for instruction in module.type_struct_instructions() {
        let Some(id) = instruction.result_id() else {
            continue;
        };
        let decorations = module.decoration_set(id).clone();

        let members = instruction
            .operands()
            .iter()
            .enumerate()
            .filter_map(|(index, &member_type)| {
                let member_type = Id::new(member_type);
                let def = module.find_def(member_type)?;

                Some(StructMember {
                    id: member_type,
                    instruction: def.index(),
                    type_struct_info: strip_arrays(module, def)
                        .and_then(|base| infos.get(&base.result_id()?).cloned()),
                    decorations: decorations.member(index as u32).cloned(),
                })
            })
            .collect::<Vec<_>>();

        infos.insert(
            id,
            Arc::new(TypeStructInfo {
                id,
                length: instruction.operands().len() as u32,
                decorations,
                members,
            }),
        );
    }

    infos
}

fn strip_arrays<'a>(module: &'a Module, mut def: Instruction<'a>) -> Option<Instruction<'a>> {
    for _ in 0..MAX_TYPE_DEPTH {
        if !def.is_array() {
            return Some(def);
        }

        def = module.find_def(def.id_at(2))?;
    }

    None
}

/// A cooperative matrix type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CooperativeMatrixType {
    pub component_type: Id,
    /// The values of the scope, rows and columns operands, if they are constants. Specialization
    /// constants give their default value.
    pub scope: Option<u32>,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
    /// The `Use` operand; only present on the KHR type.
    pub matrix_use: Option<u32>,
    /// Whether scope, rows and columns are all non-specialization constants.
    pub all_constant: bool,
    pub is_khr: bool,
}

/// Information about the memory operand of an atomic instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtomicInstructionInfo {
    pub storage_class: Option<StorageClass>,
    /// The numeric class of the value operated on.
    pub type_kind: NumericType,
    pub bit_width: u32,
    /// The number of components, 1 for scalars.
    pub vector_size: u32,
    /// The value of the memory scope operand, if it is a constant.
    pub memory_scope: Option<u32>,
}

/// How deep type lookups follow nested types. A malformed module can make a type contain itself.
pub(crate) const MAX_TYPE_DEPTH: u32 = 16;

impl Module {
    /// Returns the numeric class of a type, looking through vectors, matrices, arrays and
    /// pointers.
    pub fn numeric_type(&self, type_id: Id) -> NumericType {
        let mut current = type_id;

        for _ in 0..MAX_TYPE_DEPTH {
            let Some(def) = self.find_def(current) else {
                break;
            };

            match def.op() {
                Some(Op::TypeInt) => {
                    return if def.word(3) == 0 {
                        NumericType::Uint
                    } else {
                        NumericType::Sint
                    };
                }
                Some(Op::TypeFloat) => return NumericType::Float,
                Some(
                    Op::TypeVector
                    | Op::TypeMatrix
                    | Op::TypeArray
                    | Op::TypeRuntimeArray
                    | Op::TypeCooperativeMatrixKHR
                    | Op::TypeCooperativeMatrixNV,
                ) => current = def.id_at(2),
                Some(Op::TypePointer) => current = def.id_at(3),
                _ => break,
            }
        }

        NumericType::Unknown
    }

    /// Returns the length of an `OpTypeArray`, or 0 for `OpTypeRuntimeArray`.
    ///
    /// A length given by a specialization constant uses its default value.
    pub(crate) fn array_length(&self, array_type: Instruction<'_>) -> u32 {
        if array_type.op() != Some(Op::TypeArray) {
            return 0;
        }

        let length = array_type.id_at(3);

        self.constant_value_by_id(length).unwrap_or_else(|| {
            warn!(
                "array type {} has a length {} that is not a constant; assuming 1",
                array_type.id_at(1),
                length,
            );
            1
        })
    }

    /// Returns the size of a type in bits.
    ///
    /// Booleans count as 32 bits. Runtime arrays and opaque types have no size.
    pub fn type_bits_size(&self, type_id: Id) -> u32 {
        self.type_bits_size_at(type_id, MAX_TYPE_DEPTH)
    }

    fn type_bits_size_at(&self, type_id: Id, depth: u32) -> u32 {
        let Some(def) = self.find_def(type_id).filter(|_| depth != 0) else {
            return 0;
        };
        let depth = depth - 1;

        match def.op() {
            Some(Op::TypeInt | Op::TypeFloat) => def.word(2),
            Some(Op::TypeBool) => 32,
            Some(Op::TypeVector | Op::TypeMatrix) => def
                .word(3)
                .saturating_mul(self.type_bits_size_at(def.id_at(2), depth)),
            Some(Op::TypeArray) => self
                .array_length(def)
                .saturating_mul(self.type_bits_size_at(def.id_at(2), depth)),
            Some(Op::TypeStruct) => def
                .operands()
                .iter()
                .map(|&member| self.type_bits_size_at(Id::new(member), depth))
                .fold(0, u32::saturating_add),
            Some(Op::TypePointer) => {
                if def.storage_class() == Some(StorageClass::PhysicalStorageBuffer) {
                    64
                } else {
                    self.type_bits_size_at(def.id_at(3), depth)
                }
            }
            _ => 0,
        }
    }

    /// Returns the size of a type in bytes.
    #[inline]
    pub fn type_bytes_size(&self, type_id: Id) -> u32 {
        self.type_bits_size(type_id).div_ceil(8)
    }

    /// Returns the number of 32-bit components a type consumes in a stage interface. 64-bit
    /// scalars consume two.
    ///
    /// If `strip_array_level` is true, the outermost array level is ignored, as for the
    /// per-vertex interfaces of tessellation and geometry shaders.
    pub fn components_consumed_by_type(&self, type_id: Id, strip_array_level: bool) -> u32 {
        self.components_consumed_at(type_id, strip_array_level, MAX_TYPE_DEPTH)
    }

    fn components_consumed_at(&self, type_id: Id, strip_array_level: bool, depth: u32) -> u32 {
        let Some(def) = self.find_def(type_id).filter(|_| depth != 0) else {
            return 0;
        };
        let depth = depth - 1;

        match def.op() {
            Some(Op::TypeInt | Op::TypeFloat) => {
                if def.word(2) == 64 {
                    2
                } else {
                    1
                }
            }
            Some(Op::TypeBool) => 1,
            Some(Op::TypeVector | Op::TypeMatrix) => def
                .word(3)
                .saturating_mul(self.components_consumed_at(def.id_at(2), false, depth)),
            Some(Op::TypeArray) => {
                let element = self.components_consumed_at(def.id_at(2), false, depth);

                if strip_array_level {
                    element
                } else {
                    self.array_length(def).saturating_mul(element)
                }
            }
            Some(Op::TypeRuntimeArray) => self.components_consumed_at(def.id_at(2), false, depth),
            Some(Op::TypeStruct) => def
                .operands()
                .iter()
                .map(|&member| self.components_consumed_at(Id::new(member), false, depth))
                .fold(0, u32::saturating_add),
            Some(Op::TypePointer) => {
                if def.storage_class() == Some(StorageClass::PhysicalStorageBuffer) {
                    2
                } else {
                    self.components_consumed_at(def.id_at(3), strip_array_level, depth)
                }
            }
            _ => 0,
        }
    }

    /// Returns the number of interface locations a type consumes.
    ///
    /// A location holds 128 bits, so only vectors of three or four 64-bit components take two
    /// locations; every 32-bit vector takes one.
    ///
    /// If `strip_array_level` is true, the outermost array level is ignored.
    pub fn locations_consumed_by_type(&self, type_id: Id, strip_array_level: bool) -> u32 {
        self.locations_consumed_at(type_id, strip_array_level, MAX_TYPE_DEPTH)
    }

    fn locations_consumed_at(&self, type_id: Id, strip_array_level: bool, depth: u32) -> u32 {
        let Some(def) = self.find_def(type_id).filter(|_| depth != 0) else {
            return 0;
        };
        let depth = depth - 1;

        match def.op() {
            Some(Op::TypeVector) => {
                let bits = self
                    .find_def(def.id_at(2))
                    .and_then(|component| component.bit_width())
                    .unwrap_or(32);

                (bits.saturating_mul(def.word(3)) + 127) / 128
            }
            Some(Op::TypeMatrix) => def
                .word(3)
                .saturating_mul(self.locations_consumed_at(def.id_at(2), false, depth)),
            Some(Op::TypeArray) => {
                let element = self.locations_consumed_at(def.id_at(2), false, depth);

                if strip_array_level {
                    element
                } else {
                    self.array_length(def).saturating_mul(element)
                }
            }
            Some(Op::TypeRuntimeArray) => self.locations_consumed_at(def.id_at(2), false, depth),
            Some(Op::TypeStruct) => def
                .operands()
                .iter()
                .map(|&member| self.locations_consumed_at(Id::new(member), false, depth))
                .fold(0, u32::saturating_add),
            Some(Op::TypePointer)
                if def.storage_class() != Some(StorageClass::PhysicalStorageBuffer) =>
            {
                self.locations_consumed_at(def.id_at(3), strip_array_level, depth)
            }
            _ => 1,
        }
    }

    /// Returns the type of a variable, with the pointer and every array level removed.
    pub fn base_type(&self, variable: Id) -> Option<Instruction<'_>> {
        let mut def = self.find_def(self.find_def(variable)?.type_id()?)?;

        if def.op() == Some(Op::TypePointer) {
            def = self.find_def(def.id_at(3))?;
        }

        strip_arrays(self, def)
    }

    /// Returns the description of a cooperative matrix type.
    pub fn cooperative_matrix_type(&self, type_id: Id) -> Option<CooperativeMatrixType> {
        let def = self.find_def(type_id)?;
        let is_khr = match def.op()? {
            Op::TypeCooperativeMatrixKHR => true,
            Op::TypeCooperativeMatrixNV => false,
            _ => return None,
        };

        let operand = |index: usize| Id::new(def.word(index));
        let is_constant = |id: Id| {
            self.find_def(id)
                .is_some_and(|def| def.op() == Some(Op::Constant))
        };

        Some(CooperativeMatrixType {
            component_type: operand(2),
            scope: self.constant_value_by_id(operand(3)),
            rows: self.constant_value_by_id(operand(4)),
            columns: self.constant_value_by_id(operand(5)),
            matrix_use: is_khr
                .then(|| self.constant_value_by_id(operand(6)))
                .flatten(),
            all_constant: (3..6).all(|index| is_constant(operand(index))),
            is_khr,
        })
    }

    /// Returns information about the memory an atomic instruction operates on.
    pub fn atomic_info(&self, instruction: Instruction<'_>) -> Option<AtomicInstructionInfo> {
        let op = instruction.op()?;

        if !grammar::is_atomic_instruction(op) {
            return None;
        }

        let pointer = match op {
            Op::AtomicStore | Op::AtomicFlagClear => instruction.id_at(1),
            _ => instruction.id_at(3),
        };
        let pointer_type = self.find_def(self.find_def(pointer)?.type_id()?)?;

        if pointer_type.op() != Some(Op::TypePointer) {
            return None;
        }

        let mut data_type = self.find_def(pointer_type.id_at(3))?;
        let mut vector_size = 1;

        if data_type.op() == Some(Op::TypeVector) {
            vector_size = data_type.word(3);
            data_type = self.find_def(data_type.id_at(2))?;
        }

        Some(AtomicInstructionInfo {
            storage_class: pointer_type.storage_class(),
            type_kind: self.numeric_type(data_type.result_id()?),
            bit_width: data_type.bit_width().unwrap_or(0),
            vector_size,
            memory_scope: grammar::memory_scope_position(op)
                .and_then(|position| instruction.get_word(position))
                .and_then(|scope| self.constant_value_by_id(Id::new(scope))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{basic_types, preamble, Assembler, Basics};
    use spirv::Decoration;

    struct Types {
        basics: Basics,
        double: u32,
        vec3: u32,
        vec4: u32,
        dvec2: u32,
        dvec3: u32,
        mat3: u32,
        arr4: u32,
        float_struct: u32,
    }

    fn types(asm: &mut Assembler) -> Types {
        let basics = basic_types(asm);
        let [double, vec3, vec4, dvec2, dvec3, mat3, c4, arr4, float_struct] =
            std::array::from_fn(|_| asm.id());
        asm.inst(Op::TypeFloat, &[double, 64])
            .inst(Op::TypeVector, &[vec3, basics.float, 3])
            .inst(Op::TypeVector, &[vec4, basics.float, 4])
            .inst(Op::TypeVector, &[dvec2, double, 2])
            .inst(Op::TypeVector, &[dvec3, double, 3])
            .inst(Op::TypeMatrix, &[mat3, vec3, 3])
            .inst(Op::Constant, &[basics.uint, c4, 4])
            .inst(Op::TypeArray, &[arr4, vec4, c4])
            .inst(
                Op::TypeStruct,
                &[float_struct, basics.float, basics.float, basics.float],
            );

        Types {
            basics,
            double,
            vec3,
            vec4,
            dvec2,
            dvec3,
            mat3,
            arr4,
            float_struct,
        }
    }

    #[test]
    fn interface_consumption() {
        let mut asm = Assembler::new();
        let t = types(&mut asm);
        let module = Module::new(&asm.finish()).unwrap();
        let id = Id::new;

        assert_eq!(module.components_consumed_by_type(id(t.float_struct), false), 3);
        assert_eq!(module.components_consumed_by_type(id(t.double), false), 2);
        assert_eq!(module.components_consumed_by_type(id(t.dvec3), false), 6);
        assert_eq!(module.components_consumed_by_type(id(t.mat3), false), 9);
        assert_eq!(module.components_consumed_by_type(id(t.arr4), false), 16);
        assert_eq!(module.components_consumed_by_type(id(t.arr4), true), 4);

        assert_eq!(module.locations_consumed_by_type(id(t.vec3), false), 1);
        assert_eq!(module.locations_consumed_by_type(id(t.vec4), false), 1);
        assert_eq!(module.locations_consumed_by_type(id(t.dvec2), false), 1);
        assert_eq!(module.locations_consumed_by_type(id(t.dvec3), false), 2);
        assert_eq!(module.locations_consumed_by_type(id(t.mat3), false), 3);
        assert_eq!(module.locations_consumed_by_type(id(t.arr4), false), 4);
        assert_eq!(module.locations_consumed_by_type(id(t.arr4), true), 1);
        assert_eq!(module.locations_consumed_by_type(id(t.basics.float), false), 1);
    }

    #[test]
    fn self_referencing_types() {
        let mut asm = Assembler::new();
        let basics = basic_types(&mut asm);
        let [looped, array, length, pointer, variable] = std::array::from_fn(|_| asm.id());
        asm.inst(Op::Constant, &[basics.uint, length, 4])
            .inst(Op::TypeStruct, &[looped, basics.float, looped, looped])
            .inst(Op::TypeArray, &[array, array, length])
            .inst(Op::TypePointer, &[pointer, StorageClass::Input as u32, array])
            .inst(Op::Variable, &[pointer, variable, StorageClass::Input as u32]);
        let module = Module::new(&asm.finish()).unwrap();
        let id = Id::new;

        // Every level of the struct adds one float before the lookup gives up.
        assert!(module.type_bits_size(id(looped)) > 0);
        assert!(module.components_consumed_by_type(id(looped), false) > 0);
        assert!(module.locations_consumed_by_type(id(looped), false) > 0);

        assert_eq!(module.type_bits_size(id(array)), 0);
        assert_eq!(module.components_consumed_by_type(id(array), false), 0);
        assert_eq!(module.locations_consumed_by_type(id(array), true), 0);
        assert_eq!(module.numeric_type(id(array)), NumericType::Unknown);
        assert!(module.base_type(id(variable)).is_none());
    }

    #[test]
    fn sizes_and_numeric_types() {
        let mut asm = Assembler::new();
        let t = types(&mut asm);
        let module = Module::new(&asm.finish()).unwrap();
        let id = Id::new;

        assert_eq!(module.type_bytes_size(id(t.vec3)), 12);
        assert_eq!(module.type_bytes_size(id(t.dvec3)), 24);
        assert_eq!(module.type_bytes_size(id(t.mat3)), 36);
        assert_eq!(module.type_bytes_size(id(t.arr4)), 64);
        assert_eq!(module.type_bits_size(id(t.float_struct)), 96);

        assert_eq!(module.numeric_type(id(t.basics.uint)), NumericType::Uint);
        assert_eq!(module.numeric_type(id(t.basics.int)), NumericType::Sint);
        assert_eq!(module.numeric_type(id(t.arr4)), NumericType::Float);
        assert_eq!(module.numeric_type(id(t.basics.void)), NumericType::Unknown);
    }

    /// A `Block` struct `{ float a; vec4 b; float c[n]; }` with offsets 0, 16 and 32, where `n`
    /// is a specialization constant defaulting to 3. The `OpMemberDecorate` instructions are
    /// emitted in the order given.
    fn block_module(offset_order: [u32; 3]) -> (Vec<u32>, u32) {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let block = asm.id();
        let arr = asm.id();
        let offsets = [0, 16, 32];
        asm.inst(Op::Decorate, &[block, Decoration::Block as u32]);
        asm.inst(Op::Decorate, &[arr, Decoration::ArrayStride as u32, 4]);

        for member in offset_order {
            asm.inst(
                Op::MemberDecorate,
                &[
                    block,
                    member,
                    Decoration::Offset as u32,
                    offsets[member as usize],
                ],
            );
        }

        let basics = basic_types(&mut asm);
        let vec4 = asm.id();
        let n = asm.id();
        asm.inst(Op::TypeVector, &[vec4, basics.float, 4])
            .inst(Op::SpecConstant, &[basics.uint, n, 3])
            .inst(Op::TypeArray, &[arr, basics.float, n])
            .inst(Op::TypeStruct, &[block, basics.float, vec4, arr]);

        (asm.finish(), block)
    }

    #[test]
    fn struct_range_is_order_invariant() {
        let mut ranges = Vec::new();

        for order in [[0, 1, 2], [2, 0, 1], [1, 2, 0]] {
            let (words, block) = block_module(order);
            let module = Module::new(&words).unwrap();
            let info = module.type_struct_info(Id::new(block)).unwrap();
            assert_eq!(info.length, 3);
            ranges.push(info.range(&module));
        }

        // 32 + 3 * 4, using the default value of the specialization constant.
        assert_eq!(ranges[0], StructRange { offset: 0, end: 44 });
        assert!(ranges.iter().all(|range| *range == ranges[0]));
        assert_eq!(ranges[0].size(), 44);
    }

    #[test]
    fn nested_struct_is_shared() {
        let mut asm = Assembler::new();
        let basics = basic_types(&mut asm);
        let inner = asm.id();
        let outer_a = asm.id();
        let outer_b = asm.id();
        asm.inst(Op::TypeStruct, &[inner, basics.float, basics.uint])
            .inst(Op::TypeStruct, &[outer_a, inner])
            .inst(Op::TypeStruct, &[outer_b, basics.float, inner]);

        let module = Module::new(&asm.finish()).unwrap();
        let inner = module.type_struct_info(Id::new(inner)).unwrap();
        let a = module.type_struct_info(Id::new(outer_a)).unwrap();
        let b = module.type_struct_info(Id::new(outer_b)).unwrap();

        assert!(Arc::ptr_eq(
            a.members[0].type_struct_info.as_ref().unwrap(),
            inner,
        ));
        assert!(Arc::ptr_eq(
            b.members[1].type_struct_info.as_ref().unwrap(),
            inner,
        ));
        // Packed: 4 + 8.
        assert_eq!(b.range(&module), StructRange { offset: 0, end: 12 });
    }

    #[test]
    fn cooperative_matrix_and_atomics() {
        let mut asm = Assembler::new();
        let basics = basic_types(&mut asm);
        let [scope, rows, cols, matrix_use, matrix, ptr, var, f, label, result, sem] =
            std::array::from_fn(|_| asm.id());
        asm.inst(Op::Constant, &[basics.uint, scope, 3])
            .inst(Op::SpecConstant, &[basics.uint, rows, 16])
            .inst(Op::Constant, &[basics.uint, cols, 8])
            .inst(Op::Constant, &[basics.uint, matrix_use, 0])
            .inst(Op::Constant, &[basics.uint, sem, 0])
            .inst(
                Op::TypeCooperativeMatrixKHR,
                &[matrix, basics.float, scope, rows, cols, matrix_use],
            )
            .inst(
                Op::TypePointer,
                &[ptr, StorageClass::Workgroup as u32, basics.int],
            )
            .inst(Op::Variable, &[ptr, var, StorageClass::Workgroup as u32])
            .inst(Op::Function, &[basics.void, f, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::AtomicLoad, &[basics.int, result, var, scope, sem])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        let module = Module::new(&asm.finish()).unwrap();

        let matrix = module.cooperative_matrix_type(Id::new(matrix)).unwrap();
        assert!(matrix.is_khr);
        assert_eq!(matrix.component_type, Id::new(basics.float));
        assert_eq!(
            (matrix.scope, matrix.rows, matrix.columns, matrix.matrix_use),
            (Some(3), Some(16), Some(8), Some(0)),
        );
        assert!(!matrix.all_constant);

        let load = module.atomic_instructions().next().unwrap();
        let info = module.atomic_info(load).unwrap();
        assert_eq!(info.storage_class, Some(StorageClass::Workgroup));
        assert_eq!(info.type_kind, NumericType::Sint);
        assert_eq!(info.bit_width, 32);
        assert_eq!(info.vector_size, 1);
        assert_eq!(info.memory_scope, Some(3));
    }
}
