// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    ir::IrInstruction,
    pass::{Pass, PassContext, Position},
    InstrumentationError,
};
use crate::{Id, Module};
use foldhash::HashMap;
use log::debug;
use smallvec::SmallVec;
use spirv::Op;

pub(super) const HELPER: &str = "inst_descriptor_index";

#[derive(Clone, Copy, Debug)]
struct DescriptorArray {
    set: u32,
    binding: u32,
    /// 0 if runtime-sized.
    length: u32,
}

/// Replaces the index of every access chain into an array of descriptors with the index returned
/// by [`HELPER`].
pub(super) struct DescriptorIndexingPass {
    arrays: HashMap<u32, DescriptorArray>,
}

impl DescriptorIndexingPass {
    pub(super) fn new(analysis: &Module) -> Self {
        let mut arrays = HashMap::default();

        let resources = analysis
            .entry_points()
            .iter()
            .flat_map(|entry_point| &entry_point.resource_interface_variables);

        for resource in resources {
            let is_array = analysis.find_def(resource.type_id).is_some_and(|def| {
                matches!(def.op(), Some(Op::TypeArray | Op::TypeRuntimeArray))
            });

            if is_array {
                arrays.insert(
                    u32::from(resource.id),
                    DescriptorArray {
                        set: resource.set,
                        binding: resource.binding,
                        length: if resource.is_runtime_descriptor_array {
                            0
                        } else {
                            resource.array_length
                        },
                    },
                );
            }
        }

        DescriptorIndexingPass { arrays }
    }
}

impl Pass for DescriptorIndexingPass {
    fn name(&self) -> &'static str {
        "descriptor indexing"
    }

    fn instrument(
        &mut self,
        context: &mut PassContext<'_>,
        position: Position,
    ) -> Result<Option<Position>, InstrumentationError> {
        let Some(instruction) = context.instruction(position) else {
            return Ok(None);
        };

        if !matches!(
            instruction.op(),
            Some(Op::AccessChain | Op::InBoundsAccessChain)
        ) {
            return Ok(None);
        }

        let &[base, index, ..] = instruction.operands.as_slice() else {
            return Ok(None);
        };
        let Some(array) = self.arrays.get(&base).copied() else {
            return Ok(None);
        };
        let offset = instruction.origin.unwrap_or(0) as u32;

        let analysis = context.analysis;
        let index_def = analysis.find_def(Id::new(index));
        let index_type = index_def
            .and_then(|def| def.type_id())
            .and_then(|type_id| analysis.find_def(type_id))
            .filter(|def| def.op() == Some(Op::TypeInt) && def.bit_width() == Some(32));

        let Some(index_type) = index_type else {
            debug!(
                "skipping access chain at word {}: index %{} is not a 32-bit integer",
                offset, index,
            );
            return Ok(None);
        };

        if context.settings.skip_constant_in_bounds {
            let constant = index_def
                .filter(|def| def.op() == Some(Op::Constant))
                .and_then(|def| def.constant_value());

            if constant.is_some_and(|value| array.length != 0 && value < array.length) {
                return Ok(None);
            }
        }

        let uint = context.ir.type_uint()?;
        let mut inserted: SmallVec<[IrInstruction; 2]> = SmallVec::new();

        let index = if index_type.get_word(3) == Some(1) {
            let cast = context.ir.allocate_id()?;
            context.ir.set_result_type(cast, uint);
            inserted.push(IrInstruction::new(Op::Bitcast, Some(uint), Some(cast), &[index]));
            cast
        } else {
            index
        };

        let arguments = [
            context.ir.constant_uint(offset)?,
            context.ir.constant_uint(array.set)?,
            context.ir.constant_uint(array.binding)?,
            index,
            context.ir.constant_uint(array.length)?,
        ];
        let (safe_index, call) = context.call_helper(HELPER, uint, &arguments)?;
        inserted.push(call);

        let inserted_len = inserted.len();
        let block = &mut context.ir.functions[position.function].blocks[position.block];
        block
            .instructions
            .splice(position.index..position.index, inserted);
        block.instructions[position.index + inserted_len].operands[1] = safe_index;

        Ok(Some(Position {
            index: position.index + inserted_len + 1,
            ..position
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        instrument::{ir::IrModule, InstrumentationPipeline, InstrumentationSettings},
        test_utils::{basic_types, preamble, Assembler},
    };
    use spirv::{Decoration, ExecutionModel, StorageClass};

    struct Ids {
        int: u32,
        textures: u32,
        chain: u32,
        dynamic: u32,
        two: u32,
    }

    /// A fragment shader indexing an array of 4 images, first with the dynamic index
    /// `dynamic` (a signed integer) and then with the constant 2.
    fn module() -> (Vec<u32>, Ids) {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let [main, textures, dynamic_in] = std::array::from_fn(|_| asm.id());
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::Fragment as u32, main],
            "main",
            &[textures, dynamic_in],
        )
        .inst(Op::Decorate, &[textures, Decoration::DescriptorSet as u32, 1])
        .inst(Op::Decorate, &[textures, Decoration::Binding as u32, 2])
        .inst(Op::Decorate, &[dynamic_in, Decoration::Location as u32, 0])
        .inst(Op::Decorate, &[dynamic_in, Decoration::Flat as u32]);
        let basics = basic_types(&mut asm);
        let [image, four, array, array_ptr, image_ptr, int_in_ptr, two, label] =
            std::array::from_fn(|_| asm.id());
        let [dynamic, chain, loaded, constant_chain, constant_loaded] =
            std::array::from_fn(|_| asm.id());
        let uniform_constant = StorageClass::UniformConstant as u32;
        asm.inst(Op::TypeImage, &[image, basics.float, 1, 0, 0, 0, 1, 0])
            .inst(Op::Constant, &[basics.uint, four, 4])
            .inst(Op::TypeArray, &[array, image, four])
            .inst(Op::TypePointer, &[array_ptr, uniform_constant, array])
            .inst(Op::TypePointer, &[image_ptr, uniform_constant, image])
            .inst(Op::TypePointer, &[int_in_ptr, StorageClass::Input as u32, basics.int])
            .inst(Op::Variable, &[array_ptr, textures, uniform_constant])
            .inst(Op::Variable, &[int_in_ptr, dynamic_in, StorageClass::Input as u32])
            .inst(Op::Constant, &[basics.int, two, 2])
            .inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::Load, &[basics.int, dynamic, dynamic_in])
            .inst(Op::AccessChain, &[image_ptr, chain, textures, dynamic])
            .inst(Op::Load, &[image, loaded, chain])
            .inst(Op::AccessChain, &[image_ptr, constant_chain, textures, two])
            .inst(Op::Load, &[image, constant_loaded, constant_chain])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        (
            asm.finish(),
            Ids {
                int: basics.int,
                textures,
                chain,
                dynamic,
                two,
            },
        )
    }

    fn settings(skip_constant_in_bounds: bool) -> InstrumentationSettings {
        InstrumentationSettings {
            descriptor_indexing: true,
            skip_constant_in_bounds,
            ..Default::default()
        }
    }

    #[test]
    fn indices_are_replaced() {
        let (words, ids) = module();
        let mut pipeline = InstrumentationPipeline::new(&words).unwrap();

        assert_eq!(pipeline.run(&settings(false)).unwrap(), 2);

        let [request] = pipeline.link_requests() else {
            panic!("expected one link request");
        };
        assert_eq!(request.name, HELPER);

        let ir = pipeline.ir();
        let body = &ir.functions[0].blocks[0].instructions;
        let ops: Vec<_> = body.iter().map(|instruction| instruction.op().unwrap()).collect();
        assert_eq!(
            ops,
            [
                Op::Load,
                Op::Bitcast,
                Op::FunctionCall,
                Op::AccessChain,
                Op::Load,
                Op::Bitcast,
                Op::FunctionCall,
                Op::AccessChain,
                Op::Load,
                Op::Return,
            ],
        );

        let cast = &body[1];
        assert_eq!(cast.operands.as_slice(), &[ids.dynamic]);
        assert_ne!(cast.result_type, Some(ids.int));

        let call = &body[2];
        assert_eq!(call.operands[0], request.function_id);
        assert_eq!(call.operands[4], cast.result_id.unwrap());
        let constant = |id: u32| ir.global(id).unwrap().operands[0];
        assert_eq!(constant(call.operands[2]), 1);
        assert_eq!(constant(call.operands[3]), 2);
        assert_eq!(constant(call.operands[5]), 4);
        assert_eq!(constant(call.operands[1]) as usize, body[3].origin.unwrap());

        let chain = &body[3];
        assert_eq!(chain.result_id, Some(ids.chain));
        assert_eq!(chain.operands.as_slice(), &[ids.textures, call.result_id.unwrap()]);

        // The constant index is checked too.
        assert_eq!(body[5].operands.as_slice(), &[ids.two]);
        assert_eq!(body[7].operands[1], body[6].result_id.unwrap());

        assert!(IrModule::from_words(&pipeline.to_binary()).is_ok());
    }

    #[test]
    fn constant_in_bounds_is_skipped() {
        let (words, ids) = module();
        let mut pipeline = InstrumentationPipeline::new(&words).unwrap();

        assert_eq!(pipeline.run(&settings(true)).unwrap(), 1);

        let body = &pipeline.ir().functions[0].blocks[0].instructions;
        let constant_chain = body
            .iter()
            .filter(|instruction| instruction.op() == Some(Op::AccessChain))
            .nth(1)
            .unwrap();
        assert_eq!(constant_chain.operands[1], ids.two);
    }

    #[test]
    fn limit_is_respected() {
        let (words, _) = module();
        let mut pipeline = InstrumentationPipeline::new(&words).unwrap();
        let settings = InstrumentationSettings {
            max_instrumented_count: 1,
            ..settings(false)
        };

        assert_eq!(pipeline.run(&settings).unwrap(), 1);
    }
}
