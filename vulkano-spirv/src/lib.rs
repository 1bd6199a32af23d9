// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Static analysis and instrumentation of SPIR-V shader modules.
//!
//! This crate is the shader-facing half of a validation layer. It parses a SPIR-V binary into a
//! [`Module`], and from that derives everything a validator needs to know about each entry point
//! of the module without touching the device:
//!
//! - which instructions and variables are statically reachable from the entry point,
//! - how every variable is accessed (read, written, atomically),
//! - which descriptor bindings the entry point consumes and how (see
//!   [`ResourceInterfaceVariable`]),
//! - the input and output interface slots consumed between stages (see
//!   [`StageInterfaceVariable`]),
//! - the layout of the push constant block and other structs (see [`TypeStructInfo`]).
//!
//! The [`instrument`] module rewrites a binary to insert run-time checks for descriptor indexing,
//! buffer device addresses and ray queries, and links the helper functions those checks call.
//!
//! # Examples
//!
//! ```no_run
//! # fn example(words: &[u32]) -> Result<(), vulkano_spirv::SpirvError> {
//! let module = vulkano_spirv::Module::new(words)?;
//!
//! for entry_point in module.entry_points() {
//!     println!("{} ({:?})", entry_point.name, entry_point.stage);
//!
//!     for variable in &entry_point.resource_interface_variables {
//!         println!("  set {} binding {}", variable.set, variable.binding);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread safety
//!
//! A `Module` is built once, synchronously, and is immutable afterwards. It is `Send + Sync`, so
//! independent modules can be analysed on different threads, and a built module can be shared
//! between threads without locking.

#![doc(html_logo_url = "https://raw.githubusercontent.com/vulkano-rs/vulkano/master/logo.png")]

pub use self::{
    binary::{Header, ParseError, ParseErrors, SpirvError},
    decoration::{
        DecorationBase, DecorationFlags, DecorationSet, ExecutionModeFlags,
        ExecutionModePrimitive, ExecutionModeSet,
    },
    entry_point::{
        EntryPoint, InterfaceSlot, PushConstantVariable, ResourceInterfaceVariable, ResourceKind,
        SamplerUsedByImage, StageInterfaceVariable,
    },
    image::{ArrayIndex, ImageAccess, ImageAccessFlags},
    instruction::{Id, Instruction},
    layout::{
        AtomicInstructionInfo, CooperativeMatrixType, NumericType, StructMember, StructRange,
        TypeStructInfo,
    },
    module::Module,
    access::AccessFlags,
};
pub use spirv;

mod access;
mod binary;
mod decoration;
mod describe;
mod entry_point;
pub mod grammar;
mod image;
pub mod instrument;
mod instruction;
mod layout;
mod macros;
mod module;
#[cfg(test)]
mod test_utils;
