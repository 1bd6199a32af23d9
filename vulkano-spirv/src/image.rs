// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Resolution of image-accessing instructions to the variables they access.

use crate::{grammar, macros::spirv_bitflags, Id, Instruction, Module};
use foldhash::HashSet;
use log::debug;
use smallvec::{smallvec, SmallVec};
use spirv::{ImageOperands, Op};

spirv_bitflags! {
    /// How an instruction uses an image.
    ImageAccessFlags(u32);

    READ = 1 << 0,
    WRITE = 1 << 1,
    /// Read through `OpImageRead` or `OpImageSparseRead`.
    STORAGE_READ = 1 << 2,
    /// A size, level, sample count, format or order query.
    QUERY = 1 << 3,
    /// A pointer was taken with `OpImageTexelPointer` for use by an atomic.
    ATOMIC = 1 << 4,
    /// A sampler is involved.
    SAMPLED = 1 << 5,
    DREF = 1 << 6,
    /// Sampled with an implicit LOD, a depth reference or a projective coordinate.
    SAMPLER_IMPLICIT_LOD_DREF_PROJ = 1 << 7,
    /// Sampled with a `Bias` or an offset image operand.
    SAMPLER_BIAS_OFFSET = 1 << 8,
    SIGN_EXTEND = 1 << 9,
    ZERO_EXTEND = 1 << 10,
}

/// The index into a descriptor array that an access resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayIndex {
    /// The variable was accessed without indexing.
    Direct,
    /// Every path indexes the variable with this constant.
    Constant(u32),
    /// The index is computed at run time, or different paths use different indices.
    Unknown,
}

/// One instruction that uses an image, with the variables the image and sampler come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageAccess {
    /// The index of the instruction in the module.
    pub instruction: usize,
    /// The function the instruction is in.
    pub function: Option<Id>,
    pub image_variables: SmallVec<[Id; 1]>,
    /// The variables of separate samplers combined with the image by `OpSampledImage`.
    pub sampler_variables: SmallVec<[Id; 1]>,
    pub image_array_index: ArrayIndex,
    pub sampler_array_index: ArrayIndex,
    pub flags: ImageAccessFlags,
    /// For `OpImageWrite`, the number of components in the texel written.
    pub texel_component_count: Option<u32>,
    /// False if some path could not be followed back to a variable. The variables that were
    /// found are still reported.
    pub valid: bool,
}

impl Module {
    /// Resolves an image-accessing instruction.
    ///
    /// Returns `None` if the instruction does not access an image.
    pub fn image_access(&self, instruction: Instruction<'_>) -> Option<ImageAccess> {
        let op = instruction.op()?;
        let image_operand = instruction.get_word(grammar::image_operand_position(op)?)?;

        let mut walk = Walk {
            module: self,
            active_parameters: HashSet::default(),
            finished_parameters: HashSet::default(),
            image_variables: SmallVec::new(),
            sampler_variables: SmallVec::new(),
            image_index: None,
            sampler_index: None,
            valid: true,
        };
        walk.walk(Id::new(image_operand), Branch::Image, None);

        if !walk.valid {
            debug!(
                "image access {:?} at instruction {} is not statically resolvable",
                op,
                instruction.index(),
            );
        }

        Some(ImageAccess {
            instruction: instruction.index(),
            function: self.function_of(instruction.index()),
            image_variables: walk.image_variables,
            sampler_variables: walk.sampler_variables,
            image_array_index: walk.image_index.unwrap_or(ArrayIndex::Direct),
            sampler_array_index: walk.sampler_index.unwrap_or(ArrayIndex::Direct),
            flags: image_access_flags(instruction, op),
            texel_component_count: (op == Op::ImageWrite)
                .then(|| self.texel_component_count(instruction.id_at(3)))
                .flatten(),
            valid: walk.valid,
        })
    }

    fn texel_component_count(&self, texel: Id) -> Option<u32> {
        let texel_type = self.find_def(self.find_def(texel)?.type_id()?)?;

        match texel_type.op()? {
            Op::TypeVector => Some(texel_type.word(3)),
            _ => Some(1),
        }
    }
}

fn image_access_flags(instruction: Instruction<'_>, op: Op) -> ImageAccessFlags {
    let mut flags = match op {
        Op::ImageWrite => ImageAccessFlags::WRITE,
        Op::ImageRead | Op::ImageSparseRead => {
            ImageAccessFlags::READ | ImageAccessFlags::STORAGE_READ
        }
        Op::ImageFetch | Op::ImageSparseFetch => ImageAccessFlags::READ,
        Op::ImageTexelPointer => ImageAccessFlags::ATOMIC,
        Op::ImageQueryLod => ImageAccessFlags::QUERY | ImageAccessFlags::SAMPLED,
        Op::ImageQueryFormat
        | Op::ImageQueryOrder
        | Op::ImageQuerySizeLod
        | Op::ImageQuerySize
        | Op::ImageQueryLevels
        | Op::ImageQuerySamples => ImageAccessFlags::QUERY,
        _ => ImageAccessFlags::READ | ImageAccessFlags::SAMPLED,
    };

    if matches!(
        op,
        Op::ImageSampleDrefImplicitLod
            | Op::ImageSampleDrefExplicitLod
            | Op::ImageSampleProjDrefImplicitLod
            | Op::ImageSampleProjDrefExplicitLod
            | Op::ImageDrefGather
            | Op::ImageSparseSampleDrefImplicitLod
            | Op::ImageSparseSampleDrefExplicitLod
            | Op::ImageSparseDrefGather
    ) {
        flags |= ImageAccessFlags::DREF;
    }

    if matches!(
        op,
        Op::ImageSampleImplicitLod
            | Op::ImageSampleDrefImplicitLod
            | Op::ImageSampleDrefExplicitLod
            | Op::ImageSampleProjImplicitLod
            | Op::ImageSampleProjExplicitLod
            | Op::ImageSampleProjDrefImplicitLod
            | Op::ImageSampleProjDrefExplicitLod
            | Op::ImageSparseSampleImplicitLod
            | Op::ImageSparseSampleDrefImplicitLod
            | Op::ImageSparseSampleDrefExplicitLod
    ) {
        flags |= ImageAccessFlags::SAMPLER_IMPLICIT_LOD_DREF_PROJ;
    }

    let operands = grammar::image_operands_position(op)
        .and_then(|position| instruction.get_word(position))
        .map_or(ImageOperands::NONE, ImageOperands::from_bits_truncate);

    if operands.intersects(
        ImageOperands::BIAS
            | ImageOperands::OFFSET
            | ImageOperands::CONST_OFFSET
            | ImageOperands::CONST_OFFSETS,
    ) && flags.intersects(ImageAccessFlags::SAMPLED)
    {
        flags |= ImageAccessFlags::SAMPLER_BIAS_OFFSET;
    }

    if operands.contains(ImageOperands::SIGN_EXTEND) {
        flags |= ImageAccessFlags::SIGN_EXTEND;
    }

    if operands.contains(ImageOperands::ZERO_EXTEND) {
        flags |= ImageAccessFlags::ZERO_EXTEND;
    }

    flags
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Branch {
    Image,
    Sampler,
}

struct Walk<'a> {
    module: &'a Module,
    /// Parameters whose arguments are being walked. Reaching one again means a cycle.
    active_parameters: HashSet<Id>,
    /// Parameters already walked, with the branch and index they were reached with. Reaching one
    /// with another index walks it again, so that the recorded index becomes unknown.
    finished_parameters: HashSet<(Id, Branch, Option<ArrayIndex>)>,
    image_variables: SmallVec<[Id; 1]>,
    sampler_variables: SmallVec<[Id; 1]>,
    image_index: Option<ArrayIndex>,
    sampler_index: Option<ArrayIndex>,
    valid: bool,
}

impl Walk<'_> {
    /// Walks back from `start` within one function. Each function parameter reached starts a new
    /// walk per call-site argument, with its own visited set.
    fn walk(&mut self, start: Id, branch: Branch, index: Option<ArrayIndex>) {
        let mut visited: HashSet<Id> = HashSet::default();
        let mut stack: SmallVec<[(Id, Branch, Option<ArrayIndex>); 4]> =
            smallvec![(start, branch, index)];

        while let Some((id, branch, index)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }

            let Some(def) = self.module.find_def(id) else {
                self.valid = false;
                continue;
            };

            match def.op() {
                Some(Op::Variable) => self.record(id, branch, index.unwrap_or(ArrayIndex::Direct)),
                Some(Op::SampledImage) => {
                    stack.push((def.id_at(3), branch, index));
                    stack.push((def.id_at(4), Branch::Sampler, index));
                }
                Some(Op::Image | Op::Load | Op::CopyObject | Op::CopyLogical) => {
                    stack.push((def.id_at(3), branch, index));
                }
                Some(op) if grammar::is_access_chain(op) => {
                    let index = match def.get_word(4) {
                        Some(index) => self.array_index(Id::new(index)),
                        None => ArrayIndex::Direct,
                    };
                    stack.push((def.id_at(3), branch, Some(index)));
                }
                Some(Op::FunctionParameter) => self.walk_parameter(id, branch, index),
                _ => self.valid = false,
            }
        }
    }

    fn walk_parameter(&mut self, parameter: Id, branch: Branch, index: Option<ArrayIndex>) {
        if self
            .finished_parameters
            .contains(&(parameter, branch, index))
        {
            return;
        }

        if !self.active_parameters.insert(parameter) {
            self.valid = false;
            return;
        }

        let arguments = self.module.function_parameter_arguments(parameter);

        if arguments.is_empty() {
            self.valid = false;
        }

        for &argument in arguments {
            self.walk(argument, branch, index);
        }

        self.active_parameters.remove(&parameter);
        self.finished_parameters.insert((parameter, branch, index));
    }

    fn array_index(&self, index: Id) -> ArrayIndex {
        match self.module.find_def(index) {
            Some(def) if def.op() == Some(Op::Constant) => def
                .constant_value()
                .map_or(ArrayIndex::Unknown, ArrayIndex::Constant),
            _ => ArrayIndex::Unknown,
        }
    }

    fn record(&mut self, variable: Id, branch: Branch, index: ArrayIndex) {
        let (variables, slot) = match branch {
            Branch::Image => (&mut self.image_variables, &mut self.image_index),
            Branch::Sampler => (&mut self.sampler_variables, &mut self.sampler_index),
        };

        if !variables.contains(&variable) {
            variables.push(variable);
        }

        *slot = match *slot {
            None => Some(index),
            Some(existing) if existing == index => Some(existing),
            Some(_) => Some(ArrayIndex::Unknown),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{basic_types, preamble, Assembler, Basics};
    use spirv::{Dim, ImageFormat, StorageClass};

    struct Fixture {
        asm: Assembler,
        basics: Basics,
        image_type: u32,
        sampled_image_type: u32,
        sampler_type: u32,
        image_ptr: u32,
        array_ptr: u32,
        sampler_ptr: u32,
        images: u32,
        sampler: u32,
        vec4: u32,
        coord: u32,
    }

    /// An array of four sampled 2D images, and a separate sampler, both `UniformConstant`.
    fn fixture() -> Fixture {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let basics = basic_types(&mut asm);
        let [image_type, sampled_image_type, sampler_type, four, array, array_ptr] =
            std::array::from_fn(|_| asm.id());
        let [image_ptr, sampler_ptr, images, sampler, vec2, vec4, coord] =
            std::array::from_fn(|_| asm.id());
        let uniform_constant = StorageClass::UniformConstant as u32;

        asm.inst(
            Op::TypeImage,
            &[
                image_type,
                basics.float,
                Dim::Dim2D as u32,
                0,
                0,
                0,
                1,
                ImageFormat::Unknown as u32,
            ],
        )
        .inst(Op::TypeSampledImage, &[sampled_image_type, image_type])
        .inst(Op::TypeSampler, &[sampler_type])
        .inst(Op::Constant, &[basics.uint, four, 4])
        .inst(Op::TypeArray, &[array, image_type, four])
        .inst(Op::TypePointer, &[array_ptr, uniform_constant, array])
        .inst(Op::TypePointer, &[image_ptr, uniform_constant, image_type])
        .inst(Op::TypePointer, &[sampler_ptr, uniform_constant, sampler_type])
        .inst(Op::Variable, &[array_ptr, images, uniform_constant])
        .inst(Op::Variable, &[sampler_ptr, sampler, uniform_constant])
        .inst(Op::TypeVector, &[vec2, basics.float, 2])
        .inst(Op::TypeVector, &[vec4, basics.float, 4])
        .inst(Op::ConstantNull, &[vec2, coord]);

        Fixture {
            asm,
            basics,
            image_type,
            sampled_image_type,
            sampler_type,
            image_ptr,
            array_ptr,
            sampler_ptr,
            images,
            sampler,
            vec4,
            coord,
        }
    }

    /// Emits a body that samples `images[index]` with the separate sampler.
    fn sample(f: &mut Fixture, index: u32) {
        let [chain, image, s, combined, result] = std::array::from_fn(|_| f.asm.id());
        f.asm
            .inst(Op::AccessChain, &[f.image_ptr, chain, f.images, index])
            .inst(Op::Load, &[f.image_type, image, chain])
            .inst(Op::Load, &[f.sampler_type, s, f.sampler])
            .inst(Op::SampledImage, &[f.sampled_image_type, combined, image, s])
            .inst(
                Op::ImageSampleImplicitLod,
                &[f.vec4, result, combined, f.coord],
            );
    }

    fn only_access(module: &Module) -> ImageAccess {
        let mut accesses = module
            .image_instructions()
            .filter_map(|instruction| module.image_access(instruction));
        let access = accesses.next().unwrap();
        assert!(accesses.next().is_none());
        access
    }

    #[test]
    fn constant_index() {
        let mut f = fixture();
        let [two, main, label] = std::array::from_fn(|_| f.asm.id());
        f.asm
            .inst(Op::Constant, &[f.basics.uint, two, 2])
            .inst(Op::Function, &[f.basics.void, main, 0, f.basics.void_fn])
            .inst(Op::Label, &[label]);
        sample(&mut f, two);
        f.asm.inst(Op::Return, &[]).inst(Op::FunctionEnd, &[]);

        let module = Module::new(&f.asm.finish()).unwrap();
        let access = only_access(&module);

        assert!(access.valid);
        assert_eq!(access.function, Some(Id::new(main)));
        assert_eq!(access.image_variables.as_slice(), &[Id::new(f.images)]);
        assert_eq!(access.sampler_variables.as_slice(), &[Id::new(f.sampler)]);
        assert_eq!(access.image_array_index, ArrayIndex::Constant(2));
        assert_eq!(access.sampler_array_index, ArrayIndex::Direct);
        assert_eq!(
            access.flags,
            ImageAccessFlags::READ
                | ImageAccessFlags::SAMPLED
                | ImageAccessFlags::SAMPLER_IMPLICIT_LOD_DREF_PROJ,
        );
        assert_eq!(access.texel_component_count, None);
    }

    #[test]
    fn parameter_index_is_unknown() {
        let mut f = fixture();
        let [helper_ty, helper, param, label] = std::array::from_fn(|_| f.asm.id());
        f.asm
            .inst(Op::TypeFunction, &[helper_ty, f.basics.void, f.basics.uint])
            .inst(Op::Function, &[f.basics.void, helper, 0, helper_ty])
            .inst(Op::FunctionParameter, &[f.basics.uint, param])
            .inst(Op::Label, &[label]);
        sample(&mut f, param);
        f.asm.inst(Op::Return, &[]).inst(Op::FunctionEnd, &[]);

        let module = Module::new(&f.asm.finish()).unwrap();
        let access = only_access(&module);

        assert!(access.valid);
        assert_eq!(access.image_variables.as_slice(), &[Id::new(f.images)]);
        assert_eq!(access.image_array_index, ArrayIndex::Unknown);
    }

    #[test]
    fn parameter_reached_with_two_indices() {
        let mut f = fixture();
        let [inner_ty, inner, q, inner_label, image, s, combined, result] =
            std::array::from_fn(|_| f.asm.id());
        f.asm
            .inst(Op::TypeFunction, &[inner_ty, f.basics.void, f.image_ptr])
            .inst(Op::Function, &[f.basics.void, inner, 0, inner_ty])
            .inst(Op::FunctionParameter, &[f.image_ptr, q])
            .inst(Op::Label, &[inner_label])
            .inst(Op::Load, &[f.image_type, image, q])
            .inst(Op::Load, &[f.sampler_type, s, f.sampler])
            .inst(Op::SampledImage, &[f.sampled_image_type, combined, image, s])
            .inst(
                Op::ImageSampleImplicitLod,
                &[f.vec4, result, combined, f.coord],
            )
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        // `outer` passes elements 0 and 1 of its array parameter to `inner`.
        let [outer_ty, outer, p, outer_label, zero, one, first, second, call_a, call_b] =
            std::array::from_fn(|_| f.asm.id());
        let [main, main_label, main_call] = std::array::from_fn(|_| f.asm.id());
        f.asm
            .inst(Op::Constant, &[f.basics.uint, zero, 0])
            .inst(Op::Constant, &[f.basics.uint, one, 1])
            .inst(Op::TypeFunction, &[outer_ty, f.basics.void, f.array_ptr])
            .inst(Op::Function, &[f.basics.void, outer, 0, outer_ty])
            .inst(Op::FunctionParameter, &[f.array_ptr, p])
            .inst(Op::Label, &[outer_label])
            .inst(Op::AccessChain, &[f.image_ptr, first, p, zero])
            .inst(Op::FunctionCall, &[f.basics.void, call_a, inner, first])
            .inst(Op::AccessChain, &[f.image_ptr, second, p, one])
            .inst(Op::FunctionCall, &[f.basics.void, call_b, inner, second])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[])
            .inst(Op::Function, &[f.basics.void, main, 0, f.basics.void_fn])
            .inst(Op::Label, &[main_label])
            .inst(Op::FunctionCall, &[f.basics.void, main_call, outer, f.images])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        let module = Module::new(&f.asm.finish()).unwrap();
        let access = only_access(&module);

        assert!(access.valid);
        assert_eq!(access.function, Some(Id::new(inner)));
        assert_eq!(access.image_variables.as_slice(), &[Id::new(f.images)]);
        assert_eq!(access.image_array_index, ArrayIndex::Unknown);
        assert_eq!(access.sampler_variables.as_slice(), &[Id::new(f.sampler)]);
        assert_eq!(access.sampler_array_index, ArrayIndex::Direct);
    }

    #[test]
    fn recursive_parameter_terminates() {
        let mut f = fixture();
        let [helper_ty, helper, param, label, call, main, main_label, main_call, image, written] =
            std::array::from_fn(|_| f.asm.id());
        f.asm
            .inst(
                Op::TypeFunction,
                &[helper_ty, f.basics.void, f.image_ptr],
            )
            .inst(Op::Function, &[f.basics.void, helper, 0, helper_ty])
            .inst(Op::FunctionParameter, &[f.image_ptr, param])
            .inst(Op::Label, &[label])
            .inst(Op::FunctionCall, &[f.basics.void, call, helper, param])
            .inst(Op::Load, &[f.image_type, image, param])
            .inst(Op::ImageWrite, &[image, f.coord, written])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);
        let chain = f.asm.id();
        let zero = f.asm.id();
        f.asm
            .inst(Op::ConstantNull, &[f.vec4, written])
            .inst(Op::Constant, &[f.basics.uint, zero, 0])
            .inst(Op::Function, &[f.basics.void, main, 0, f.basics.void_fn])
            .inst(Op::Label, &[main_label])
            .inst(Op::AccessChain, &[f.image_ptr, chain, f.images, zero])
            .inst(Op::FunctionCall, &[f.basics.void, main_call, helper, chain])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        let module = Module::new(&f.asm.finish()).unwrap();
        let access = only_access(&module);

        assert!(!access.valid);
        assert_eq!(access.image_variables.as_slice(), &[Id::new(f.images)]);
        assert_eq!(access.flags, ImageAccessFlags::WRITE);
        assert_eq!(access.texel_component_count, Some(4));
    }

    #[test]
    fn texel_pointer_is_atomic() {
        let mut f = fixture();
        let [uint_ptr, main, label, pointer, zero] = std::array::from_fn(|_| f.asm.id());
        let single = f.asm.id();
        f.asm
            .inst(
                Op::TypePointer,
                &[uint_ptr, StorageClass::Image as u32, f.basics.uint],
            )
            .inst(Op::Constant, &[f.basics.uint, zero, 0])
            .inst(
                Op::Variable,
                &[f.image_ptr, single, StorageClass::UniformConstant as u32],
            )
            .inst(Op::Function, &[f.basics.void, main, 0, f.basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(
                Op::ImageTexelPointer,
                &[uint_ptr, pointer, single, f.coord, zero],
            )
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        let module = Module::new(&f.asm.finish()).unwrap();
        let access = only_access(&module);

        assert!(access.valid);
        assert_eq!(access.image_variables.as_slice(), &[Id::new(single)]);
        assert_eq!(access.image_array_index, ArrayIndex::Direct);
        assert!(access.sampler_variables.is_empty());
        assert_eq!(access.flags, ImageAccessFlags::ATOMIC);
    }
}
