// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    pass::{self, Pass, PassContext, Position},
    InstrumentationError,
};
use log::debug;
use spirv::Op;

pub(super) const HELPER: &str = "inst_ray_query";

/// Guards every `OpRayQueryInitializeKHR` with [`HELPER`].
pub(super) struct RayQueryPass;

impl Pass for RayQueryPass {
    fn name(&self) -> &'static str {
        "ray query"
    }

    fn instrument(
        &mut self,
        context: &mut PassContext<'_>,
        position: Position,
    ) -> Result<Option<Position>, InstrumentationError> {
        let Some(instruction) = context.instruction(position) else {
            return Ok(None);
        };

        if instruction.op() != Some(Op::RayQueryInitializeKHR) {
            return Ok(None);
        }

        let offset = instruction.origin.unwrap_or(0) as u32;

        // query, acceleration structure, flags, cull mask, origin, t_min, direction, t_max
        let &[_, _, ray_flags, _, origin, t_min, direction, t_max] =
            instruction.operands.as_slice()
        else {
            return Err(InstrumentationError::UnsupportedInstruction {
                opcode: instruction.opcode,
                offset: offset as usize,
            });
        };

        if !pass::can_split(context.ir, position) {
            debug!("skipping ray query at word {offset}: it is in a loop header");
            return Ok(None);
        }

        let bool_type = context.ir.type_bool()?;
        let arguments = [
            context.ir.constant_uint(offset)?,
            ray_flags,
            origin,
            t_min,
            direction,
            t_max,
        ];
        let (condition, call) = context.call_helper(HELPER, bool_type, &arguments)?;

        pass::guard_instruction(context.ir, position, vec![call], condition).map(Some)
    }
}
