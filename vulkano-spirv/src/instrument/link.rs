// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use super::{
    ir::{IrInstruction, IrModule},
    pass::LinkRequest,
    InstrumentationError,
};
use crate::{binary, grammar, Module};
use foldhash::HashMap;
use spirv::{Capability, Decoration, Op, StorageClass};
use std::{
    collections::{hash_map::Entry, HashMap as StdHashMap},
    hash::BuildHasher,
};

/// A source of helper functions.
///
/// Each helper is provided as a complete SPIR-V module that defines a function with the name of
/// the helper, either through `OpName` or by being its only function. Everything the function
/// uses is linked in with it.
pub trait HelperLibrary {
    /// Returns the words of the module that defines the helper `name`.
    fn helper(&self, name: &str) -> Option<&[u32]>;
}

impl<S> HelperLibrary for StdHashMap<String, Vec<u32>, S>
where
    S: BuildHasher,
{
    #[inline]
    fn helper(&self, name: &str) -> Option<&[u32]> {
        self.get(name).map(Vec::as_slice)
    }
}

/// Maps ids of the helper module to ids of the module it is linked into.
struct IdMap {
    ids: HashMap<u32, u32>,
}

impl IdMap {
    fn get(&mut self, ir: &mut IrModule, id: u32) -> Result<u32, InstrumentationError> {
        match self.ids.entry(id) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => Ok(*entry.insert(ir.allocate_id()?)),
        }
    }

    fn remap(
        &mut self,
        ir: &mut IrModule,
        instruction: &mut IrInstruction,
    ) -> Result<(), InstrumentationError> {
        let mut result = Ok(());
        instruction.for_each_id_mut(|id| {
            if result.is_ok() {
                result = self.get(ir, *id).map(|new_id| *id = new_id);
            }
        });
        result?;
        instruction.origin = None;

        if let (Some(result_type), Some(result_id)) =
            (instruction.result_type, instruction.result_id)
        {
            ir.set_result_type(result_id, result_type);
        }

        Ok(())
    }
}

/// Links the helper requested by `request`, defined by the module `words`, into `ir`.
pub(super) fn link_helper(
    ir: &mut IrModule,
    request: &LinkRequest,
    words: &[u32],
) -> Result<(), InstrumentationError> {
    let invalid = |reason| InstrumentationError::InvalidHelper {
        name: request.name.to_owned(),
        reason,
    };

    let helper = Module::new(words)
        .ok()
        .and_then(|module| IrModule::new(&module).ok())
        .ok_or_else(|| invalid("it is not a valid SPIR-V module"))?;
    let function_id =
        find_function(&helper, request.name).ok_or_else(|| invalid("it has no such function"))?;

    if helper.functions.iter().any(|function| function.blocks.is_empty()) {
        return Err(invalid("it declares a function without a body"));
    }

    let mut map = IdMap {
        ids: HashMap::default(),
    };
    map.ids.insert(function_id, request.function_id);

    for capability in &helper.capabilities {
        match capability.operands.first() {
            Some(&word) if word == Capability::Linkage as u32 => {}
            Some(&word) => {
                if !ir
                    .capabilities
                    .iter()
                    .any(|existing| existing.operands.first() == Some(&word))
                {
                    ir.capabilities
                        .push(IrInstruction::new(Op::Capability, None, None, &[word]));
                }
            }
            None => return Err(invalid("it has an empty `OpCapability`")),
        }
    }

    for extension in &helper.extensions {
        ir.add_extension_words(&extension.operands);
    }

    for import in &helper.ext_inst_imports {
        let Some(helper_id) = import.result_id else {
            continue;
        };
        let existing = ir
            .ext_inst_imports
            .iter()
            .find(|existing| existing.operands == import.operands)
            .and_then(|existing| existing.result_id);

        let id = match existing {
            Some(id) => id,
            None => {
                let id = ir.allocate_id()?;
                ir.ext_inst_imports.push(IrInstruction::new(
                    Op::ExtInstImport,
                    None,
                    Some(id),
                    &import.operands,
                ));
                id
            }
        };
        map.ids.insert(helper_id, id);
    }

    // `OpLine` in the helper refers to these.
    for string in helper
        .debug
        .iter()
        .filter(|instruction| instruction.op() == Some(Op::String))
    {
        let mut string = string.clone();
        map.remap(ir, &mut string)?;
        ir.debug.push(string);
    }

    let mut new_variables = Vec::new();

    for global in &helper.globals {
        let mut global = global.clone();
        let Some(helper_id) = global.result_id.take() else {
            map.remap(ir, &mut global)?;
            ir.globals.push(global);
            continue;
        };
        map.remap(ir, &mut global)?;

        let op = global
            .op()
            .ok_or_else(|| invalid("it declares a global with an unknown opcode"))?;

        if is_shareable(&helper, op, helper_id) && !map.ids.contains_key(&helper_id) {
            let id = ir.find_or_add_global(op, global.result_type, &global.operands)?;
            map.ids.insert(helper_id, id);
            continue;
        }

        let id = map.get(ir, helper_id)?;
        global.result_id = Some(id);

        if let Some(result_type) = global.result_type {
            ir.set_result_type(id, result_type);
        }

        let function_storage = StorageClass::Function as u32;

        if op == Op::Variable && global.operands.first() != Some(&function_storage) {
            new_variables.push(id);
        }

        ir.globals.push(global);
    }

    for annotation in &helper.annotations {
        if is_linkage_attributes(annotation) {
            continue;
        }

        let mut annotation = annotation.clone();
        map.remap(ir, &mut annotation)?;
        ir.annotations.push(annotation);
    }

    // From SPIR-V 1.4, the interface of an entry point lists every global variable it uses.
    if ir.version >= (1, 4) {
        for entry_point in &mut ir.entry_points {
            entry_point.operands.extend_from_slice(&new_variables);
        }
    }

    for function in &helper.functions {
        let mut function = function.clone();
        let mut result = Ok(());
        function.for_each_instruction_mut(|instruction| {
            if result.is_ok() {
                result = map.remap(ir, instruction);
            }
        });
        result?;
        ir.functions.push(function);
    }

    Ok(())
}

/// Returns the id of the function called `name`, or of the only function.
fn find_function(helper: &IrModule, name: &str) -> Option<u32> {
    let named = helper.debug.iter().find_map(|instruction| {
        let (&target, string) = instruction.operands.split_first()?;

        (instruction.op() == Some(Op::Name) && binary::decode_string(string).0 == name)
            .then_some(target)
    });

    named
        .filter(|&id| helper.functions.iter().any(|function| function.id() == id))
        .or_else(|| match helper.functions.as_slice() {
            [function] => Some(function.id()),
            _ => None,
        })
}

/// Returns whether a global of the helper can be replaced by an identical one of the module it is
/// linked into.
fn is_shareable(helper: &IrModule, op: Op, id: u32) -> bool {
    let is_type_or_constant = grammar::is_type_instruction(op)
        || matches!(
            op,
            Op::Constant
                | Op::ConstantTrue
                | Op::ConstantFalse
                | Op::ConstantNull
                | Op::ConstantComposite
        );

    is_type_or_constant && op != Op::TypeStruct && !helper.is_decorated(id)
}

fn is_linkage_attributes(annotation: &IrInstruction) -> bool {
    matches!(annotation.op(), Some(Op::Decorate | Op::DecorateString))
        && annotation.operands.get(1) == Some(&(Decoration::LinkageAttributes as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        instrument::{InstrumentationPipeline, InstrumentationSettings},
        test_utils::{basic_types, preamble, string_words, Assembler},
    };
    use spirv::ExecutionModel;

    const HELPER: &str = "inst_check";

    /// `bool inst_check(uint offset)`, which counts its calls in a private variable and returns
    /// whether `offset` is not 0.
    fn helper() -> Vec<u32> {
        let mut asm = Assembler::new();
        asm.inst(Op::Capability, &[Capability::Shader as u32])
            .inst(Op::Capability, &[Capability::Linkage as u32]);
        let glsl = asm.id();
        asm.inst_str(Op::ExtInstImport, &[glsl], "GLSL.std.450", &[]).inst(
            Op::MemoryModel,
            &[
                spirv::AddressingModel::Logical as u32,
                spirv::MemoryModel::GLSL450 as u32,
            ],
        );
        let [function, counter] = std::array::from_fn(|_| asm.id());
        asm.inst_str(Op::Name, &[function], HELPER, &[])
            .inst(Op::Decorate, &[counter, Decoration::RelaxedPrecision as u32]);
        let mut linkage = vec![function, Decoration::LinkageAttributes as u32];
        linkage.extend(string_words(HELPER));
        linkage.push(spirv::LinkageType::Export as u32);
        asm.inst(Op::Decorate, &linkage);

        let [bool_type, uint, function_type, uint_ptr, zero, one] =
            std::array::from_fn(|_| asm.id());
        let [offset, label, count, incremented, result] = std::array::from_fn(|_| asm.id());
        let private = StorageClass::Private as u32;
        asm.inst(Op::TypeBool, &[bool_type])
            .inst(Op::TypeInt, &[uint, 32, 0])
            .inst(Op::TypeFunction, &[function_type, bool_type, uint])
            .inst(Op::TypePointer, &[uint_ptr, private, uint])
            .inst(Op::Constant, &[uint, zero, 0])
            .inst(Op::Constant, &[uint, one, 1])
            .inst(Op::Variable, &[uint_ptr, counter, private])
            .inst(Op::Function, &[bool_type, function, 0, function_type])
            .inst(Op::FunctionParameter, &[uint, offset])
            .inst(Op::Label, &[label])
            .inst(Op::Load, &[uint, count, counter])
            .inst(Op::IAdd, &[uint, incremented, count, one])
            .inst(Op::Store, &[counter, incremented])
            .inst(Op::INotEqual, &[bool_type, result, offset, zero])
            .inst(Op::ReturnValue, &[result])
            .inst(Op::FunctionEnd, &[]);

        asm.finish()
    }

    fn host() -> Vec<u32> {
        let mut asm = Assembler::new().version(1, 4);
        preamble(&mut asm);
        let glsl = asm.id();
        asm.inst_str(Op::ExtInstImport, &[glsl], "GLSL.std.450", &[]);
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

    fn globals_with(ir: &IrModule, op: Op) -> Vec<&IrInstruction> {
        ir.globals
            .iter()
            .filter(|instruction| instruction.op() == Some(op))
            .collect()
    }

    #[test]
    fn helper_is_linked() {
        let mut ir = IrModule::from_words(&host()).unwrap();
        let request = LinkRequest {
            name: HELPER,
            function_id: ir.allocate_id().unwrap(),
        };

        link_helper(&mut ir, &request, &helper()).unwrap();

        assert_eq!(ir.functions.len(), 2);
        let linked = &ir.functions[1];
        assert_eq!(linked.id(), request.function_id);

        assert!(!ir.has_capability(Capability::Linkage));
        assert_eq!(ir.capabilities.len(), 1);
        assert_eq!(ir.ext_inst_imports.len(), 1);

        // `uint` is shared, `bool` is new.
        let uints: Vec<_> = globals_with(&ir, Op::TypeInt)
            .into_iter()
            .filter(|instruction| instruction.operands.as_slice() == [32, 0])
            .collect();
        let [uint] = uints.as_slice() else {
            panic!("expected a single `uint` type");
        };
        assert_eq!(globals_with(&ir, Op::TypeBool).len(), 1);
        assert_eq!(linked.parameters[0].result_type, uint.result_id);

        let variables = globals_with(&ir, Op::Variable);
        let [variable] = variables.as_slice() else {
            panic!("expected a single variable");
        };
        let variable_id = variable.result_id.unwrap();
        assert!(ir.annotations.iter().any(|annotation| {
            annotation.operands.as_slice() == [variable_id, Decoration::RelaxedPrecision as u32]
        }));
        assert!(!ir.annotations.iter().any(is_linkage_attributes));
        assert_eq!(ir.entry_points[0].operands.last(), Some(&variable_id));

        let body = &linked.blocks[0].instructions;
        assert_eq!(body[0].operands.as_slice(), &[variable_id]);
        assert!(body.iter().all(|instruction| instruction.origin.is_none()));

        let words = ir.to_words();
        let module = Module::new(&words).unwrap();
        assert_eq!(module.header().bound, ir.bound);
    }

    #[test]
    fn missing_and_invalid_helpers() {
        let mut pipeline = InstrumentationPipeline::new(&host()).unwrap();
        pipeline.run(&InstrumentationSettings::default()).unwrap();
        pipeline.links.request(&mut pipeline.ir, HELPER).unwrap();

        let empty: HashMap<String, Vec<u32>> = HashMap::default();
        assert_eq!(
            pipeline.link(&empty).unwrap_err(),
            InstrumentationError::MissingHelper {
                name: HELPER.to_owned(),
            },
        );

        pipeline.links.request(&mut pipeline.ir, HELPER).unwrap();
        let mut broken: HashMap<String, Vec<u32>> = HashMap::default();
        broken.insert(HELPER.to_owned(), vec![spirv::MAGIC_NUMBER, 0]);
        assert!(matches!(
            pipeline.link(&broken),
            Err(InstrumentationError::InvalidHelper { .. }),
        ));

        pipeline.links.request(&mut pipeline.ir, HELPER).unwrap();
        let mut library: HashMap<String, Vec<u32>> = HashMap::default();
        library.insert(HELPER.to_owned(), helper());
        pipeline.link(&library).unwrap();
        assert!(pipeline.link_requests().is_empty());
        assert_eq!(pipeline.ir().functions.len(), 2);
    }

    #[test]
    fn linking_fails_when_ids_run_out() {
        let mut ir = IrModule::from_words(&host()).unwrap();
        let request = LinkRequest {
            name: HELPER,
            function_id: ir.allocate_id().unwrap(),
        };
        ir.bound = u32::MAX - 2;

        assert_eq!(
            link_helper(&mut ir, &request, &helper()),
            Err(InstrumentationError::Inconsistent("the id bound overflowed")),
        );
        assert_eq!(ir.bound, u32::MAX);
    }
}
