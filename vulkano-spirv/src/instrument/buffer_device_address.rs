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
    pass::{self, Pass, PassContext, Position},
    InstrumentationError,
};
use crate::Id;
use log::debug;
use spirv::{Op, StorageClass};

pub(super) const HELPER: &str = "inst_buffer_device_address";

/// Guards every load and store through a physical storage buffer pointer with [`HELPER`].
pub(super) struct BufferDeviceAddressPass;

impl Pass for BufferDeviceAddressPass {
    fn name(&self) -> &'static str {
        "buffer device address"
    }

    fn instrument(
        &mut self,
        context: &mut PassContext<'_>,
        position: Position,
    ) -> Result<Option<Position>, InstrumentationError> {
        let Some(instruction) = context.instruction(position) else {
            return Ok(None);
        };

        let is_store = match instruction.op() {
            Some(Op::Load) => false,
            Some(Op::Store) => true,
            _ => return Ok(None),
        };
        let Some(&pointer) = instruction.operands.first() else {
            return Ok(None);
        };
        let offset = instruction.origin.unwrap_or(0) as u32;

        let analysis = context.analysis;
        let pointer_type = analysis
            .find_def(Id::new(pointer))
            .and_then(|def| def.type_id())
            .and_then(|type_id| analysis.find_def(type_id))
            .filter(|def| {
                def.op() == Some(Op::TypePointer)
                    && def.storage_class() == Some(StorageClass::PhysicalStorageBuffer)
            });

        let Some(pointer_type) = pointer_type else {
            return Ok(None);
        };

        if !pass::can_split(context.ir, position) {
            debug!("skipping access at word {offset}: it is in a loop header");
            return Ok(None);
        }

        let byte_length = analysis.type_bytes_size(pointer_type.id_at(3));
        let ulong = context.ir.type_int(64, false)?;
        let bool_type = context.ir.type_bool()?;

        let address = context.ir.allocate_id()?;
        context.ir.set_result_type(address, ulong);
        let convert = IrInstruction::new(Op::ConvertPtrToU, Some(ulong), Some(address), &[pointer]);

        let arguments = [
            context.ir.constant_uint(offset)?,
            address,
            context.ir.constant_uint(byte_length)?,
            context.ir.constant_uint(is_store as u32)?,
        ];
        let (condition, call) = context.call_helper(HELPER, bool_type, &arguments)?;

        pass::guard_instruction(context.ir, position, vec![convert, call], condition).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        instrument::{ir::IrModule, InstrumentationPipeline, InstrumentationSettings},
        test_utils::{basic_types, Assembler},
    };
    use spirv::{AddressingModel, Capability, ExecutionModel, MemoryAccess, MemoryModel};

    /// Reads a `uint` through a pointer made from a constant address, and writes it back.
    fn module() -> (Vec<u32>, u32) {
        let mut asm = Assembler::new().version(1, 5);
        asm.inst(Op::Capability, &[Capability::Shader as u32])
            .inst(
                Op::Capability,
                &[Capability::PhysicalStorageBufferAddresses as u32],
            )
            .inst(
                Op::MemoryModel,
                &[
                    AddressingModel::PhysicalStorageBuffer64 as u32,
                    MemoryModel::GLSL450 as u32,
                ],
            );
        let main = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        );
        let basics = basic_types(&mut asm);
        let [ulong, address, pointer_type, label, pointer, loaded] =
            std::array::from_fn(|_| asm.id());
        let aligned = MemoryAccess::ALIGNED.bits();
        asm.inst(Op::TypeInt, &[ulong, 64, 0])
            .inst(Op::Constant, &[ulong, address, 0x1000, 0])
            .inst(
                Op::TypePointer,
                &[
                    pointer_type,
                    StorageClass::PhysicalStorageBuffer as u32,
                    basics.uint,
                ],
            )
            .inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::ConvertUToPtr, &[pointer_type, pointer, address])
            .inst(Op::Load, &[basics.uint, loaded, pointer, aligned, 4])
            .inst(Op::Store, &[pointer, loaded, aligned, 4])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        (asm.finish(), loaded)
    }

    #[test]
    fn loads_and_stores_are_guarded() {
        let (words, loaded) = module();
        let mut pipeline = InstrumentationPipeline::new(&words).unwrap();
        let settings = InstrumentationSettings {
            buffer_device_address: true,
            ..Default::default()
        };

        assert_eq!(pipeline.run(&settings).unwrap(), 2);

        let ir = pipeline.ir();
        assert!(ir.has_capability(Capability::Int64));

        let blocks = &ir.functions[0].blocks;
        assert_eq!(blocks.len(), 7);

        let ops = |block: usize| -> Vec<Op> {
            blocks[block]
                .instructions
                .iter()
                .map(|instruction| instruction.op().unwrap())
                .collect()
        };
        assert_eq!(
            ops(0),
            [
                Op::ConvertUToPtr,
                Op::ConvertPtrToU,
                Op::FunctionCall,
                Op::SelectionMerge,
                Op::BranchConditional,
            ],
        );
        assert_eq!(ops(1), [Op::Load, Op::Branch]);
        assert_eq!(ops(2), [Op::Branch]);
        assert_eq!(
            ops(3),
            [
                Op::Phi,
                Op::ConvertPtrToU,
                Op::FunctionCall,
                Op::SelectionMerge,
                Op::BranchConditional,
            ],
        );
        assert_eq!(ops(4), [Op::Store, Op::Branch]);
        assert_eq!(ops(6), [Op::Return]);

        // The store still writes the value of the load, now produced by the phi.
        assert_eq!(blocks[3].instructions[0].result_id, Some(loaded));
        assert_eq!(blocks[4].instructions[0].operands[1], loaded);

        let [request] = pipeline.link_requests() else {
            panic!("expected one link request");
        };
        assert_eq!(request.name, HELPER);

        let constant = |id: u32| ir.global(id).unwrap().operands[0];
        let load_call = &blocks[0].instructions[2];
        let store_call = &blocks[3].instructions[2];
        assert_eq!(load_call.operands[0], request.function_id);
        assert_eq!(load_call.operands[2], blocks[0].instructions[1].result_id.unwrap());
        assert_eq!(constant(load_call.operands[3]), 4);
        assert_eq!(constant(load_call.operands[4]), 0);
        assert_eq!(constant(store_call.operands[4]), 1);
        assert!(constant(store_call.operands[1]) > constant(load_call.operands[1]));

        assert!(IrModule::from_words(&pipeline.to_binary()).is_ok());
    }

    #[test]
    fn other_pointers_are_ignored() {
        let (mut words, _) = module();
        // Turn the pointer into a `Private` one.
        let physical = StorageClass::PhysicalStorageBuffer as u32;
        let position = words
            .windows(2)
            .position(|pair| pair[0] >> 16 == 4 && pair[0] & 0xffff == Op::TypePointer as u32)
            .unwrap();
        assert_eq!(words[position + 2], physical);
        words[position + 2] = StorageClass::Private as u32;

        let mut pipeline = InstrumentationPipeline::new(&words).unwrap();
        let settings = InstrumentationSettings {
            buffer_device_address: true,
            ..Default::default()
        };

        assert_eq!(pipeline.run(&settings).unwrap(), 0);
        assert_eq!(pipeline.to_binary(), words);
    }
}
