// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Reachability from entry points, and how variables are accessed.

use crate::{grammar, macros::spirv_bitflags, Id, Instruction, Module};
use foldhash::{HashMap, HashSet};
use smallvec::{smallvec, SmallVec};
use spirv::Op;

spirv_bitflags! {
    /// How a variable is accessed.
    AccessFlags(u32);

    READ = 1 << 0,
    WRITE = 1 << 1,
    ATOMIC_READ = 1 << 2,
    ATOMIC_WRITE = 1 << 3,
}

/// Returns the ids statically reachable from the entry point function `entry_point`.
///
/// Starting from the entry point, every function body reached is scanned, and the ids that each
/// instruction consumes as a pointer, object, callee or argument are followed in turn. Each id is
/// expanded at most once. Only ids that have a definition are returned.
pub(crate) fn accessible_ids(module: &Module, entry_point: Id) -> HashSet<Id> {
    let mut ids = HashSet::default();
    let mut worklist = vec![entry_point];

    while let Some(id) = worklist.pop() {
        let Some(def) = module.find_def(id) else {
            continue;
        };

        if !ids.insert(id) || def.op() != Some(Op::Function) {
            continue;
        }

        for instruction in module.function_instructions(id) {
            extract_pointers_and_objects(instruction, &mut worklist);
        }
    }

    ids
}

fn extract_pointers_and_objects(instruction: Instruction<'_>, worklist: &mut Vec<Id>) {
    let Some(op) = instruction.op() else {
        return;
    };
    let words = instruction.words();
    let mut push = |index: usize| {
        if let Some(&word) = words.get(index) {
            worklist.push(Id::new(word));
        }
    };

    match op {
        Op::Store | Op::AtomicStore | Op::AtomicFlagClear => push(1),
        Op::CopyMemory | Op::CopyMemorySized => {
            push(1);
            push(2);
        }
        Op::SampledImage => {
            push(3);
            push(4);
        }
        Op::FunctionCall => (3..words.len()).for_each(push),
        Op::ExtInst => (5..words.len()).for_each(push),
        Op::RayQueryInitializeKHR => {
            push(1);
            push(2);
        }
        Op::TraceRayKHR => {
            push(1);
            push(11);
        }
        Op::ExecuteCallableKHR => push(2),
        Op::CooperativeMatrixStoreKHR | Op::CooperativeMatrixStoreNV => push(1),
        Op::Load
        | Op::CopyObject
        | Op::CopyLogical
        | Op::Image
        | Op::ArrayLength
        | Op::ConvertUToAccelerationStructureKHR
        | Op::CooperativeMatrixLoadKHR
        | Op::CooperativeMatrixLoadNV => push(3),
        _ if grammar::is_access_chain(op) || grammar::is_atomic_instruction(op) => push(3),
        _ => {
            if let Some(position) = grammar::image_operand_position(op) {
                push(position);
            }
        }
    }
}

/// One access to a variable, attributed to the function it occurs in.
#[derive(Clone, Copy, Debug)]
pub(crate) struct VariableAccess {
    pub(crate) variable: Id,
    pub(crate) flags: AccessFlags,
    /// The struct member index, when the access goes through an access chain applied directly
    /// to the variable with a constant index.
    pub(crate) member: Option<u32>,
    pub(crate) function: Option<Id>,
}

/// Every variable access in a module.
#[derive(Debug, Default)]
pub(crate) struct VariableAccesses {
    accesses: Vec<VariableAccess>,
    by_variable: HashMap<Id, AccessFlags>,
}

impl VariableAccesses {
    pub(crate) fn new(module: &Module) -> VariableAccesses {
        let mut accesses = Vec::new();

        for instruction in module.instructions() {
            let Some(op) = instruction.op() else {
                continue;
            };

            let pointers: SmallVec<[(u32, AccessFlags); 2]> = match op {
                Op::Load | Op::CooperativeMatrixLoadKHR | Op::CooperativeMatrixLoadNV => {
                    smallvec![(instruction.word(3), AccessFlags::READ)]
                }
                Op::Store | Op::CooperativeMatrixStoreKHR | Op::CooperativeMatrixStoreNV => {
                    smallvec![(instruction.word(1), AccessFlags::WRITE)]
                }
                Op::CopyMemory | Op::CopyMemorySized => smallvec![
                    (instruction.word(1), AccessFlags::WRITE),
                    (instruction.word(2), AccessFlags::READ),
                ],
                Op::AtomicLoad => smallvec![(instruction.word(3), AccessFlags::ATOMIC_READ)],
                Op::AtomicStore | Op::AtomicFlagClear => {
                    smallvec![(instruction.word(1), AccessFlags::ATOMIC_WRITE)]
                }
                _ if grammar::is_atomic_instruction(op) => smallvec![(
                    instruction.word(3),
                    AccessFlags::ATOMIC_READ | AccessFlags::ATOMIC_WRITE,
                )],
                _ => continue,
            };

            let function = module.function_of(instruction.index());

            for (pointer, flags) in pointers {
                for (variable, member) in find_variables(module, Id::new(pointer)) {
                    accesses.push(VariableAccess {
                        variable,
                        flags,
                        member,
                        function,
                    });
                }
            }
        }

        let mut by_variable: HashMap<Id, AccessFlags> = HashMap::default();

        for access in &accesses {
            *by_variable.entry(access.variable).or_default() |= access.flags;
        }

        VariableAccesses {
            accesses,
            by_variable,
        }
    }

    /// Returns the accesses to `variable` anywhere in the module.
    pub(crate) fn flags(&self, variable: Id) -> AccessFlags {
        self.by_variable
            .get(&variable)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the accesses to `variable` from functions in `accessible_ids`.
    pub(crate) fn flags_in(&self, variable: Id, accessible_ids: &HashSet<Id>) -> AccessFlags {
        self.accessible(variable, accessible_ids)
            .fold(AccessFlags::empty(), |flags, access| flags | access.flags)
    }

    /// Returns the struct members of `variable` written from functions in `accessible_ids`.
    /// `None` is a write that is not known to target a single member.
    pub(crate) fn written_members_in<'a>(
        &'a self,
        variable: Id,
        accessible_ids: &'a HashSet<Id>,
    ) -> impl Iterator<Item = Option<u32>> + 'a {
        self.accessible(variable, accessible_ids)
            .filter(|access| {
                access
                    .flags
                    .intersects(AccessFlags::WRITE | AccessFlags::ATOMIC_WRITE)
            })
            .map(|access| access.member)
    }

    fn accessible<'a>(
        &'a self,
        variable: Id,
        accessible_ids: &'a HashSet<Id>,
    ) -> impl Iterator<Item = &'a VariableAccess> + 'a {
        self.accesses.iter().filter(move |access| {
            access.variable == variable
                && access
                    .function
                    .is_some_and(|function| accessible_ids.contains(&function))
        })
    }
}

/// Walks back from a pointer to the variables it is derived from.
///
/// Access chains, texel pointers and copies are followed to their base; function parameters are
/// followed to every argument bound to them at a call site. Anything else ends the walk for that
/// branch without a result.
fn find_variables(module: &Module, pointer: Id) -> SmallVec<[(Id, Option<u32>); 1]> {
    let mut found = SmallVec::new();
    let mut visited: HashSet<Id> = HashSet::default();
    let mut stack: SmallVec<[(Id, Option<u32>); 4]> = smallvec![(pointer, None)];

    while let Some((id, member)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }

        let Some(def) = module.find_def(id) else {
            continue;
        };
        let Some(op) = def.op() else {
            continue;
        };

        match op {
            Op::Variable => found.push((id, member)),
            Op::ImageTexelPointer | Op::CopyObject | Op::CopyLogical => {
                stack.push((def.id_at(3), member));
            }
            Op::FunctionParameter => {
                for &argument in module.function_parameter_arguments(id) {
                    stack.push((argument, member));
                }
            }
            _ if grammar::is_access_chain(op) => {
                let base = def.id_at(3);
                let member = if module
                    .find_def(base)
                    .is_some_and(|base| base.op() == Some(Op::Variable))
                {
                    struct_member_index(module, def, base)
                } else {
                    member
                };

                stack.push((base, member));
            }
            _ => (),
        }
    }

    found
}

/// Returns the constant struct member index that `access_chain` selects in the struct that
/// `variable` points to, looking through one level of array.
fn struct_member_index(
    module: &Module,
    access_chain: Instruction<'_>,
    variable: Id,
) -> Option<u32> {
    let mut position = match access_chain.op()? {
        Op::PtrAccessChain | Op::InBoundsPtrAccessChain => 5,
        _ => 4,
    };
    let mut pointee = module.find_def(module.pointee_type(variable)?)?;

    if pointee.is_array() {
        position += 1;
        pointee = module.find_def(pointee.id_at(2))?;
    }

    if pointee.op() != Some(Op::TypeStruct) {
        return None;
    }

    let index = module.find_def(Id::new(access_chain.get_word(position)?))?;

    match index.op()? {
        Op::Constant => index.constant_value(),
        _ => None,
    }
}
