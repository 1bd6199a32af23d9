// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Rewriting a module to insert run-time checks.
//!
//! Each family of checks is a pass over an editable copy of the module. A pass replaces or guards
//! the instructions it targets with calls to helper functions, which are identified by name and
//! spliced in from a [`HelperLibrary`] by the final link step.
//!
//! All enabled passes run in order on the same module, and the result is serialized once. If any
//! step fails, nothing is emitted and the caller should use the original binary.
//!
//! # Helper functions
//!
//! The passes call these helpers. Every helper takes the word offset of the instrumented
//! instruction in the original binary as its first parameter. All integer parameters are 32-bit
//! unsigned unless stated otherwise.
//!
//! - `inst_descriptor_index(offset, set, binding, index, length) -> uint`: returns the index to
//!   use in place of `index`. `length` is 0 for runtime-sized descriptor arrays.
//! - `inst_buffer_device_address(offset, address: ulong, byte_length, is_store) -> bool`: returns
//!   whether the access may be performed.
//! - `inst_ray_query(offset, ray_flags, origin: vec3, t_min: float, direction: vec3, t_max:
//!   float) -> bool`: returns whether the ray query may be initialized.

pub use self::{
    ir::{IrBlock, IrFunction, IrInstruction, IrModule},
    link::HelperLibrary,
    pass::LinkRequest,
};
use self::{
    buffer_device_address::BufferDeviceAddressPass,
    descriptor_indexing::DescriptorIndexingPass,
    pass::{LinkRegistry, Pass, PassContext},
    ray_query::RayQueryPass,
};
use crate::{Module, SpirvError};
use log::{debug, info};
use std::{
    error::Error,
    fmt::{Display, Error as FmtError, Formatter},
};

mod buffer_device_address;
mod descriptor_indexing;
mod ir;
mod link;
mod pass;
mod ray_query;

/// Which checks to insert, and how.
///
/// The default inserts nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentationSettings {
    /// Bounds-check indices into arrays of descriptors.
    pub descriptor_indexing: bool,

    /// Range-check loads and stores through physical storage buffer pointers.
    pub buffer_device_address: bool,

    /// Check the parameters of `OpRayQueryInitializeKHR`.
    pub ray_query: bool,

    /// The maximum number of instructions each pass rewrites, or 0 for no limit.
    ///
    /// This is meant for narrowing down a problem caused by instrumentation.
    pub max_instrumented_count: u32,

    /// Leave descriptor array accesses alone when the index is a constant that is known to be in
    /// bounds.
    pub skip_constant_in_bounds: bool,
}

impl InstrumentationSettings {
    /// Returns whether any check is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.descriptor_indexing || self.buffer_device_address || self.ray_query
    }
}

/// Error that can happen when instrumenting a module.
///
/// The module is never partially rewritten. On error, the original binary should be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstrumentationError {
    /// The binary does not start with the SPIR-V magic number.
    InvalidMagic,

    /// The binary could not be parsed.
    Parse(SpirvError),

    /// An instruction appears where it can not be handled.
    UnsupportedInstruction { opcode: u16, offset: usize },

    /// The helper library has no helper by this name.
    MissingHelper { name: String },

    /// The helper library provided a module that can not be linked.
    InvalidHelper { name: String, reason: &'static str },

    /// The module is not structured the way a valid module would be.
    Inconsistent(&'static str),
}

impl Error for InstrumentationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for InstrumentationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::InvalidMagic => {
                write!(f, "the binary does not start with the SPIR-V magic number")
            }
            Self::Parse(_) => write!(f, "the SPIR-V module could not be parsed"),
            Self::UnsupportedInstruction { opcode, offset } => write!(
                f,
                "instruction with opcode {} at word {} can not be instrumented",
                opcode, offset,
            ),
            Self::MissingHelper { name } => {
                write!(f, "the helper library does not provide `{}`", name)
            }
            Self::InvalidHelper { name, reason } => {
                write!(f, "the helper `{}` can not be linked: {}", name, reason)
            }
            Self::Inconsistent(reason) => write!(f, "the module is inconsistent: {}", reason),
        }
    }
}

impl From<SpirvError> for InstrumentationError {
    fn from(err: SpirvError) -> Self {
        Self::Parse(err)
    }
}

/// Instruments one module.
///
/// The pipeline keeps the analysis of the original binary for the whole run. Passes rely on it
/// for facts about ids of the original binary, which no pass removes or retypes.
#[derive(Debug)]
pub struct InstrumentationPipeline {
    analysis: Module,
    ir: IrModule,
    links: LinkRegistry,
}

impl InstrumentationPipeline {
    /// Parses `words` for instrumentation.
    pub fn new(words: &[u32]) -> Result<Self, InstrumentationError> {
        match words.first() {
            Some(&magic)
                if magic == spirv::MAGIC_NUMBER || magic == spirv::MAGIC_NUMBER.swap_bytes() => {}
            _ => return Err(InstrumentationError::InvalidMagic),
        }

        let analysis = Module::new(words)?;
        let ir = IrModule::new(&analysis)?;

        Ok(InstrumentationPipeline {
            analysis,
            ir,
            links: LinkRegistry::default(),
        })
    }

    /// Returns the analysis of the original binary.
    #[inline]
    pub fn analysis(&self) -> &Module {
        &self.analysis
    }

    /// Returns the module as rewritten so far.
    #[inline]
    pub fn ir(&self) -> &IrModule {
        &self.ir
    }

    /// Runs every enabled pass, in order. Returns the number of instructions that were rewritten.
    pub fn run(
        &mut self,
        settings: &InstrumentationSettings,
    ) -> Result<usize, InstrumentationError> {
        let mut passes: Vec<Box<dyn Pass>> = Vec::new();

        if settings.descriptor_indexing {
            passes.push(Box::new(DescriptorIndexingPass::new(&self.analysis)));
        }

        if settings.buffer_device_address {
            passes.push(Box::new(BufferDeviceAddressPass));
        }

        if settings.ray_query {
            passes.push(Box::new(RayQueryPass));
        }

        let mut total = 0;

        for check in &mut passes {
            let mut context = PassContext {
                analysis: &self.analysis,
                ir: &mut self.ir,
                links: &mut self.links,
                settings,
            };
            let count = pass::run_pass(check.as_mut(), &mut context)?;
            info!("{}: instrumented {} instructions", check.name(), count);
            total += count;
        }

        Ok(total)
    }

    /// Returns the helpers that the passes have called and that are not linked yet.
    #[inline]
    pub fn link_requests(&self) -> &[LinkRequest] {
        self.links.requests()
    }

    /// Splices in every requested helper from `library`.
    pub fn link(&mut self, library: &dyn HelperLibrary) -> Result<(), InstrumentationError> {
        for request in self.links.take() {
            let words =
                library
                    .helper(request.name)
                    .ok_or_else(|| InstrumentationError::MissingHelper {
                        name: request.name.to_owned(),
                    })?;
            debug!("linking `{}` as %{}", request.name, request.function_id);
            link::link_helper(&mut self.ir, &request, words)?;
        }

        Ok(())
    }

    /// Serializes the module as rewritten so far.
    #[inline]
    pub fn to_binary(&self) -> Vec<u32> {
        self.ir.to_words()
    }
}

/// Parses, instruments and links a module in one go.
pub fn instrument(
    words: &[u32],
    settings: &InstrumentationSettings,
    library: &dyn HelperLibrary,
) -> Result<Vec<u32>, InstrumentationError> {
    let mut pipeline = InstrumentationPipeline::new(words)?;
    pipeline.run(settings)?;
    pipeline.link(library)?;

    Ok(pipeline.to_binary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{basic_types, preamble, Assembler};
    use foldhash::HashMap;
    use spirv::{ExecutionModel, Op};

    fn trivial_module() -> Vec<u32> {
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
        let label = asm.id();
        asm.inst(Op::Function, &[basics.void, main, 0, basics.void_fn])
            .inst(Op::Label, &[label])
            .inst(Op::Return, &[])
            .inst(Op::FunctionEnd, &[]);
        asm.finish()
    }

    #[test]
    fn rejects_bad_magic() {
        let mut words = trivial_module();
        words[0] = 0x1234_5678;

        assert_eq!(
            InstrumentationPipeline::new(&words).unwrap_err(),
            InstrumentationError::InvalidMagic,
        );
        assert_eq!(
            InstrumentationPipeline::new(&[]).unwrap_err(),
            InstrumentationError::InvalidMagic,
        );
    }

    #[test]
    fn nothing_enabled_round_trips() {
        let words = trivial_module();
        let library: HashMap<String, Vec<u32>> = HashMap::default();
        let settings = InstrumentationSettings::default();

        assert!(!settings.is_enabled());
        assert_eq!(instrument(&words, &settings, &library).unwrap(), words);
    }

    #[test]
    fn everything_enabled_without_targets() {
        let words = trivial_module();
        let settings = InstrumentationSettings {
            descriptor_indexing: true,
            buffer_device_address: true,
            ray_query: true,
            ..Default::default()
        };
        let mut pipeline = InstrumentationPipeline::new(&words).unwrap();

        assert_eq!(pipeline.run(&settings).unwrap(), 0);
        assert!(pipeline.link_requests().is_empty());
        assert_eq!(pipeline.to_binary(), words);
    }

    #[test]
    fn byte_swapped_input_is_emitted_native() {
        let words = trivial_module();
        let swapped: Vec<u32> = words.iter().map(|word| word.swap_bytes()).collect();
        let pipeline = InstrumentationPipeline::new(&swapped).unwrap();

        assert_eq!(pipeline.to_binary(), words);
    }

    #[test]
    fn parse_errors_are_reported() {
        let mut words = trivial_module();
        words.push((3 << 16) | Op::Nop as u32);

        assert!(matches!(
            InstrumentationPipeline::new(&words),
            Err(InstrumentationError::Parse(_)),
        ));
    }
}
