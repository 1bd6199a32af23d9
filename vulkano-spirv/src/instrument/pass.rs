// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    ir::{IrBlock, IrInstruction, IrModule},
    InstrumentationError, InstrumentationSettings,
};
use crate::Module;
use spirv::{Op, SelectionControl};

/// A helper function that a pass calls and that has to be linked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkRequest {
    /// The name of the helper in the helper library.
    pub name: &'static str,
    /// The id that calls refer to.
    pub function_id: u32,
}

#[derive(Debug, Default)]
pub(super) struct LinkRegistry {
    requests: Vec<LinkRequest>,
}

impl LinkRegistry {
    /// Returns the id to call the helper `name` with, allocating one on first use.
    pub(super) fn request(
        &mut self,
        ir: &mut IrModule,
        name: &'static str,
    ) -> Result<u32, InstrumentationError> {
        if let Some(request) = self.requests.iter().find(|request| request.name == name) {
            return Ok(request.function_id);
        }

        let function_id = ir.allocate_id()?;
        self.requests.push(LinkRequest { name, function_id });

        Ok(function_id)
    }

    pub(super) fn requests(&self) -> &[LinkRequest] {
        &self.requests
    }

    pub(super) fn take(&mut self) -> Vec<LinkRequest> {
        std::mem::take(&mut self.requests)
    }
}

/// The state a pass works on.
pub(super) struct PassContext<'a> {
    pub(super) analysis: &'a Module,
    pub(super) ir: &'a mut IrModule,
    pub(super) links: &'a mut LinkRegistry,
    pub(super) settings: &'a InstrumentationSettings,
}

impl PassContext<'_> {
    /// Emits a call to the helper `name`. Returns the id of the result and the call.
    pub(super) fn call_helper(
        &mut self,
        name: &'static str,
        return_type: u32,
        arguments: &[u32],
    ) -> Result<(u32, IrInstruction), InstrumentationError> {
        let function = self.links.request(self.ir, name)?;
        let result = self.ir.allocate_id()?;
        self.ir.set_result_type(result, return_type);

        let mut call = IrInstruction::new(Op::FunctionCall, Some(return_type), Some(result), &[]);
        call.operands.push(function);
        call.operands.extend_from_slice(arguments);

        Ok((result, call))
    }

    pub(super) fn instruction(&self, position: Position) -> Option<&IrInstruction> {
        self.ir
            .functions
            .get(position.function)?
            .blocks
            .get(position.block)?
            .instructions
            .get(position.index)
    }
}

/// Where an instruction is, by function, block and index within the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Position {
    pub(super) function: usize,
    pub(super) block: usize,
    pub(super) index: usize,
}

pub(super) trait Pass {
    fn name(&self) -> &'static str;

    /// Instruments the instruction at `position` if the pass targets it.
    ///
    /// Returns `None` if the instruction was left alone, or the position of the next instruction
    /// that was in the block after the target.
    fn instrument(
        &mut self,
        context: &mut PassContext<'_>,
        position: Position,
    ) -> Result<Option<Position>, InstrumentationError>;
}

/// Runs `pass` on every instruction of the original module. Returns the number of instructions
/// that were instrumented.
pub(super) fn run_pass(
    pass: &mut dyn Pass,
    context: &mut PassContext<'_>,
) -> Result<usize, InstrumentationError> {
    let limit = match context.settings.max_instrumented_count {
        0 => usize::MAX,
        limit => limit as usize,
    };
    let mut count = 0;

    for function in 0..context.ir.functions.len() {
        let mut position = Position {
            function,
            block: 0,
            index: 0,
        };

        while position.block < context.ir.functions[function].blocks.len() {
            let block_len = context.ir.functions[function].blocks[position.block]
                .instructions
                .len();

            if position.index >= block_len {
                position.block += 1;
                position.index = 0;
                continue;
            }

            let is_original = context
                .instruction(position)
                .is_some_and(|instruction| instruction.origin.is_some());

            if is_original {
                if count >= limit {
                    return Ok(count);
                }

                if let Some(next) = pass.instrument(context, position)? {
                    count += 1;
                    position = next;
                    continue;
                }
            }

            position.index += 1;
        }
    }

    Ok(count)
}

/// Returns whether the block at `position` can be split.
pub(super) fn can_split(ir: &IrModule, position: Position) -> bool {
    ir.functions
        .get(position.function)
        .and_then(|function| function.blocks.get(position.block))
        .is_some_and(|block| !block.has_loop_merge())
}

/// Makes the instruction at `position` conditional on `condition`.
///
/// The block is split in four. The first keeps the label and the instructions before the
/// target, followed by `prelude`, which has to compute `condition`. The target moves into a
/// block of its own, which runs only if `condition` is true. A third block is taken otherwise.
/// The last block starts with an `OpPhi` that merges the result of the target with a null
/// value, and holds the rest of the original block.
///
/// Returns the position of the first instruction after the target.
pub(super) fn guard_instruction(
    ir: &mut IrModule,
    position: Position,
    prelude: Vec<IrInstruction>,
    condition: u32,
) -> Result<Position, InstrumentationError> {
    let Position {
        function,
        block,
        index,
    } = position;

    let (result_type, result_id) = {
        let target = ir
            .functions
            .get(function)
            .and_then(|function| function.blocks.get(block))
            .and_then(|block| block.instructions.get(index))
            .ok_or(InstrumentationError::Inconsistent("guarded instruction does not exist"))?;
        (target.result_type, target.result_id)
    };

    let phi = match (result_type, result_id) {
        (Some(result_type), Some(result_id)) => {
            let moved_id = ir.allocate_id()?;
            ir.set_result_type(moved_id, result_type);
            let null = ir.constant_null(result_type)?;
            Some((result_type, result_id, moved_id, null))
        }
        _ => None,
    };

    let valid_label = ir.allocate_id()?;
    let invalid_label = ir.allocate_id()?;
    let merge_label = ir.allocate_id()?;

    let blocks = &mut ir.functions[function].blocks;
    let split = &mut blocks[block];
    let original_label = split.label;
    let mut rest = split.instructions.split_off(index);
    let mut target = rest.remove(0);

    if let Some((_, _, moved_id, _)) = phi {
        target.result_id = Some(moved_id);
    }

    split.instructions.extend(prelude);
    split.instructions.push(IrInstruction::new(
        Op::SelectionMerge,
        None,
        None,
        &[merge_label, SelectionControl::NONE.bits()],
    ));
    split.instructions.push(IrInstruction::new(
        Op::BranchConditional,
        None,
        None,
        &[condition, valid_label, invalid_label],
    ));

    let branch_to_merge = IrInstruction::new(Op::Branch, None, None, &[merge_label]);
    let valid = IrBlock {
        label: valid_label,
        instructions: vec![target, branch_to_merge.clone()],
    };
    let invalid = IrBlock {
        label: invalid_label,
        instructions: vec![branch_to_merge],
    };

    let mut merge = IrBlock::new(merge_label);

    if let Some((result_type, result_id, moved_id, null)) = phi {
        merge.instructions.push(IrInstruction::new(
            Op::Phi,
            Some(result_type),
            Some(result_id),
            &[moved_id, valid_label, null, invalid_label],
        ));
    }

    merge.instructions.extend(rest);

    let successors = merge.successors();
    blocks.splice(block + 1..block + 1, [valid, invalid, merge]);
    replace_phi_parents(blocks, &successors, original_label, merge_label);

    Ok(Position {
        function,
        block: block + 3,
        index: phi.is_some() as usize,
    })
}

/// In the blocks labelled `successors`, makes `OpPhi` instructions that refer to the parent
/// `from` refer to `to` instead.
fn replace_phi_parents(blocks: &mut [IrBlock], successors: &[u32], from: u32, to: u32) {
    for block in blocks
        .iter_mut()
        .filter(|block| successors.contains(&block.label))
    {
        for phi in block
            .instructions
            .iter_mut()
            .take_while(|instruction| instruction.op() == Some(Op::Phi))
        {
            for pair in phi.operands.chunks_exact_mut(2) {
                if pair[1] == from {
                    pair[1] = to;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{basic_types, preamble, Assembler};
    use spirv::{ExecutionModel, StorageClass};

    struct Ids {
        uint: u32,
        var: u32,
        loaded: u32,
        entry: u32,
        exit: u32,
    }

    /// `entry` loads a private variable and branches to `exit`, which has an `OpPhi` over it.
    fn module() -> (Vec<u32>, Ids) {
        let mut asm = Assembler::new();
        preamble(&mut asm);
        let main = asm.id();
        asm.inst_str(
            Op::EntryPoint,
            &[ExecutionModel::GLCompute as u32, main],
            "main",
            &[],
        );
        let basics = basic_types(&mut asm);
        let [ptr, var, entry, loaded, exit, merged] = std::array::from_fn(|_| asm.id());
        asm.inst(Op::TypePointer, &[ptr, StorageClass::Private as u32, basics.uint])
            .inst(Op::Variable, &[ptr, var, StorageClass::Private as u32])
            .inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[entry])
            .inst(Op::Load, &[basics.uint, loaded, var])
            .inst(Op::Branch, &[exit])
            .inst(Op::Label, &[exit])
            .inst(Op::Phi, &[basics.uint, merged, loaded, entry])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);

        (
            asm.finish(),
            Ids {
                uint: basics.uint,
                var,
                loaded,
                entry,
                exit,
            },
        )
    }

    #[test]
    fn guard_splits_block() {
        let (words, ids) = module();
        let mut ir = IrModule::from_words(&words).unwrap();
        let position = Position {
            function: 0,
            block: 0,
            index: 0,
        };
        assert!(can_split(&ir, position));

        let condition = ir.allocate_id().unwrap();
        let next = guard_instruction(&mut ir, position, Vec::new(), condition).unwrap();
        let blocks = &ir.functions[0].blocks;

        assert_eq!(blocks.len(), 5);
        assert_eq!(next, Position { function: 0, block: 3, index: 1 });

        let [pre, valid, invalid, merge, exit] = [0, 1, 2, 3, 4].map(|i| &blocks[i]);
        assert_eq!(pre.label, ids.entry);
        assert_eq!(
            pre.successors().as_slice(),
            &[valid.label, invalid.label],
        );
        assert_eq!(pre.instructions[0].op(), Some(Op::SelectionMerge));
        assert_eq!(pre.instructions[0].operands[0], merge.label);

        let moved = &valid.instructions[0];
        assert_eq!(moved.op(), Some(Op::Load));
        assert_eq!(moved.operands.as_slice(), &[ids.var]);
        assert_ne!(moved.result_id, Some(ids.loaded));
        assert_eq!(invalid.successors().as_slice(), &[merge.label]);

        let phi = &merge.instructions[0];
        assert_eq!(phi.op(), Some(Op::Phi));
        assert_eq!(phi.result_id, Some(ids.loaded));
        assert_eq!(phi.result_type, Some(ids.uint));
        assert_eq!(phi.operands[0], moved.result_id.unwrap());
        assert_eq!(phi.operands[1], valid.label);
        assert_eq!(phi.operands[3], invalid.label);
        assert_eq!(ir.global(phi.operands[2]).unwrap().op(), Some(Op::ConstantNull));
        assert_eq!(merge.successors().as_slice(), &[ids.exit]);

        // The phi in the successor now comes from the merge block.
        assert_eq!(exit.instructions[0].operands.as_slice(), &[ids.loaded, merge.label]);

        assert!(IrModule::from_words(&ir.to_words()).is_ok());
    }

    #[test]
    fn loop_headers_are_not_split() {
        let (words, _) = module();
        let mut ir = IrModule::from_words(&words).unwrap();
        let block = &mut ir.functions[0].blocks[0];
        let merge = block.label;
        block.instructions.insert(
            1,
            IrInstruction::new(Op::LoopMerge, None, None, &[merge, merge, 0]),
        );

        assert!(!can_split(
            &ir,
            Position {
                function: 0,
                block: 0,
                index: 0,
            },
        ));
    }

    #[test]
    fn link_requests_are_shared() {
        let (words, _) = module();
        let mut ir = IrModule::from_words(&words).unwrap();
        let mut links = LinkRegistry::default();

        let first = links.request(&mut ir, "inst_a").unwrap();
        let second = links.request(&mut ir, "inst_b").unwrap();
        assert_eq!(links.request(&mut ir, "inst_a"), Ok(first));
        assert_ne!(first, second);
        assert_eq!(links.requests().len(), 2);
        assert_eq!(links.take().len(), 2);
        assert!(links.requests().is_empty());
    }

    #[test]
    fn guard_fails_when_ids_run_out() {
        let (words, _) = module();
        let mut ir = IrModule::from_words(&words).unwrap();
        let position = Position {
            function: 0,
            block: 0,
            index: 0,
        };
        let condition = ir.allocate_id().unwrap();
        let original = ir.clone();
        ir.bound = u32::MAX;

        assert_eq!(
            guard_instruction(&mut ir, position, Vec::new(), condition),
            Err(InstrumentationError::Inconsistent("the id bound overflowed")),
        );
        assert_eq!(ir.functions, original.functions);

        let mut links = LinkRegistry::default();
        assert!(links.request(&mut ir, "inst_a").is_err());
        assert!(links.requests().is_empty());
    }
}
