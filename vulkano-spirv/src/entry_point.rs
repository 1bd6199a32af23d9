// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Per-entry-point views of a module: the descriptors, push constants and stage interface an
//! entry point actually uses.

use crate::{
    access, layout::MAX_TYPE_DEPTH, AccessFlags, ArrayIndex, DecorationFlags, ExecutionModeSet,
    Id, ImageAccess, ImageAccessFlags, Instruction, Module, NumericType, TypeStructInfo,
};
use ash::vk::ShaderStageFlags;
use foldhash::HashSet;
use log::debug;
use smallvec::SmallVec;
use spirv::{BuiltIn, Dim, ExecutionModel, ImageFormat, Op, StorageClass};
use std::{collections::BTreeMap, hash::BuildHasher, sync::Arc};

/// Locations at or past this one are not expanded into interface slots.
const MAX_INTERFACE_LOCATION: u32 = 1 << 12;

/// One `OpEntryPoint` of a module, with everything derived from the code reachable from it.
#[derive(Clone, Debug)]
pub struct EntryPoint {
    /// The id of the entry point function.
    pub id: Id,
    /// The index of the `OpEntryPoint` instruction.
    pub instruction: usize,
    pub name: String,
    pub execution_model: ExecutionModel,
    pub stage: ShaderStageFlags,
    pub execution_mode: ExecutionModeSet,
    /// Every id statically reachable from the entry point function.
    pub accessible_ids: HashSet<Id>,
    pub resource_interface_variables: Vec<ResourceInterfaceVariable>,
    pub stage_interface_variables: Vec<StageInterfaceVariable>,
    pub push_constant_variable: Option<PushConstantVariable>,
    pub written_builtin_point_size: bool,
    pub written_builtin_layer: bool,
    pub written_builtin_viewport_index: bool,
    pub written_builtin_primitive_shading_rate: bool,
    pub written_builtin_viewport_mask_nv: bool,
    /// Whether any stage interface variable is decorated `PassthroughNV`.
    pub has_passthrough: bool,
    /// Whether this is a geometry shader that reaches an `OpEmitVertex` or
    /// `OpEmitStreamVertex`.
    pub emit_vertex_geometry: bool,
}

impl EntryPoint {
    /// Returns the stage interface variables that are not built-ins.
    pub fn user_defined_interface_variables(
        &self,
    ) -> impl Iterator<Item = &StageInterfaceVariable> + '_ {
        self.stage_interface_variables
            .iter()
            .filter(|variable| !variable.is_builtin)
    }

    /// Returns the stage interface variables that are built-ins or built-in blocks.
    pub fn built_in_variables(&self) -> impl Iterator<Item = &StageInterfaceVariable> + '_ {
        self.stage_interface_variables
            .iter()
            .filter(|variable| variable.is_builtin)
    }

    /// Returns the slots consumed by user-defined inputs, keyed by slot.
    pub fn input_interface_slots(&self) -> BTreeMap<u32, InterfaceSlot> {
        self.interface_slots(StorageClass::Input)
    }

    /// Returns the slots consumed by user-defined outputs, keyed by slot.
    pub fn output_interface_slots(&self) -> BTreeMap<u32, InterfaceSlot> {
        self.interface_slots(StorageClass::Output)
    }

    pub fn max_input_slot(&self) -> Option<u32> {
        self.input_interface_slots().last_key_value().map(|(&slot, _)| slot)
    }

    pub fn max_output_slot(&self) -> Option<u32> {
        self.output_interface_slots().last_key_value().map(|(&slot, _)| slot)
    }

    fn interface_slots(&self, storage_class: StorageClass) -> BTreeMap<u32, InterfaceSlot> {
        self.user_defined_interface_variables()
            .filter(|variable| variable.storage_class == storage_class)
            .flat_map(|variable| variable.interface_slots.iter())
            .map(|&slot| (slot.slot, slot))
            .collect()
    }
}

/// A scalar component of a stage interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceSlot {
    /// `location * 4 + component`. A 64-bit scalar takes two consecutive slots.
    pub slot: u32,
    /// The scalar type.
    pub type_id: Id,
    pub numeric_type: NumericType,
    pub bit_width: u32,
}

impl InterfaceSlot {
    #[inline]
    pub fn location(&self) -> u32 {
        self.slot / 4
    }

    #[inline]
    pub fn component(&self) -> u32 {
        self.slot % 4
    }
}

/// The kind of descriptor a resource variable binds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Sampler,
    Buffer,
    AccelerationStructure,
}

/// A sampler that an image is combined with by `OpSampledImage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SamplerUsedByImage {
    /// The element of the image array that is sampled.
    pub image_index: ArrayIndex,
    pub sampler: Id,
    pub sampler_index: ArrayIndex,
}

/// A variable that binds to a descriptor, as used by one entry point.
#[derive(Clone, Debug)]
pub struct ResourceInterfaceVariable {
    pub id: Id,
    pub storage_class: StorageClass,
    /// The type the variable points to.
    pub type_id: Id,
    /// The type with every array level removed.
    pub base_type: Id,
    pub set: u32,
    pub binding: u32,
    /// 1 for a variable that is not an array, 0 for a runtime-sized array.
    pub array_length: u32,
    pub is_runtime_descriptor_array: bool,
    pub kind: ResourceKind,
    /// The layout of the buffer block, for buffers.
    pub type_struct_info: Option<Arc<TypeStructInfo>>,

    pub image_dim: Option<Dim>,
    pub image_format: Option<ImageFormat>,
    pub image_sampled_type: NumericType,
    pub image_sampled_type_width: u32,
    pub is_image_array: bool,
    pub is_multisampled: bool,
    /// An image combined with a sampler in the type.
    pub is_sampled_image: bool,
    /// An image used without a sampler (`Sampled` operand 2).
    pub is_storage_image: bool,
    pub is_input_attachment: bool,
    pub input_attachment_index: Option<u32>,

    pub is_storage_buffer: bool,
    pub is_uniform_buffer: bool,

    /// How the variable is accessed from the entry point.
    pub access: AccessFlags,
    /// How images from the variable are used by the entry point.
    pub image_access: ImageAccessFlags,
    pub is_read_without_format: bool,
    pub is_write_without_format: bool,
    pub is_atomic_operation: bool,
    /// The component counts of the texels written with `OpImageWrite`.
    pub write_texel_component_counts: SmallVec<[u32; 1]>,
    pub samplers_used_by_image: Vec<SamplerUsedByImage>,

    /// A hash over the binding and every type trait above, stable across runs.
    pub descriptor_hash: u64,
}

/// An `Input` or `Output` variable of an entry point.
#[derive(Clone, Debug)]
pub struct StageInterfaceVariable {
    pub id: Id,
    pub storage_class: StorageClass,
    /// The type the variable points to.
    pub type_id: Id,
    /// The type with every array level removed.
    pub base_type: Id,
    pub is_patch: bool,
    pub is_per_vertex: bool,
    pub is_per_task_nv: bool,
    /// Whether the outermost array level indexes vertices or invocations, rather than being
    /// part of the interface type.
    pub is_array_interface: bool,
    /// Whether the variable is a built-in, or a block with built-in members.
    pub is_builtin: bool,
    pub builtin_block: bool,
    pub builtin: Option<BuiltIn>,
    pub type_struct_info: Option<Arc<TypeStructInfo>>,
    /// The slots consumed, for user-defined variables with a location.
    pub interface_slots: SmallVec<[InterfaceSlot; 4]>,
}

/// The push constant block used by an entry point.
#[derive(Clone, Debug)]
pub struct PushConstantVariable {
    pub id: Id,
    pub type_struct_info: Arc<TypeStructInfo>,
    pub offset: u32,
    pub size: u32,
}

/// Builds every entry point of the module.
pub(crate) fn entry_points(module: &Module) -> Vec<EntryPoint> {
    let image_accesses: Vec<ImageAccess> = module
        .image_instructions()
        .filter_map(|instruction| module.image_access(instruction))
        .filter(|access| access.valid)
        .collect();

    module
        .entry_point_instructions()
        .filter_map(|instruction| EntryPoint::new(module, instruction, &image_accesses))
        .collect()
}

impl EntryPoint {
    fn new(
        module: &Module,
        instruction: Instruction<'_>,
        image_accesses: &[ImageAccess],
    ) -> Option<EntryPoint> {
        let execution_model = ExecutionModel::from_u32(instruction.get_word(1)?)?;
        let id = Id::new(instruction.get_word(2)?);
        let name = instruction.string_at(3);
        let interface_start = 3 + instruction.string_len_at(3);
        let interface: HashSet<Id> = instruction.words()[interface_start.min(instruction.len())..]
            .iter()
            .map(|&word| Id::new(word))
            .collect();

        let accessible_ids = access::accessible_ids(module, id);
        let image_accesses: Vec<&ImageAccess> = image_accesses
            .iter()
            .filter(|access| {
                access
                    .function
                    .is_some_and(|function| accessible_ids.contains(&function))
            })
            .collect();

        let mut resource_interface_variables = Vec::new();
        let mut stage_interface_variables = Vec::new();
        let mut push_constant_variable = None;

        for variable in module.variables() {
            let Some(variable_id) = variable.result_id() else {
                continue;
            };
            let Some(storage_class) = variable.storage_class() else {
                continue;
            };

            match storage_class {
                StorageClass::Uniform
                | StorageClass::UniformConstant
                | StorageClass::StorageBuffer
                | StorageClass::PhysicalStorageBuffer
                    if accessible_ids.contains(&variable_id) =>
                {
                    resource_interface_variables.extend(ResourceInterfaceVariable::new(
                        module,
                        variable,
                        &accessible_ids,
                        &image_accesses,
                    ));
                }
                StorageClass::Input | StorageClass::Output
                    if interface.contains(&variable_id)
                        || accessible_ids.contains(&variable_id) =>
                {
                    stage_interface_variables.extend(StageInterfaceVariable::new(
                        module,
                        variable,
                        execution_model,
                    ));
                }
                StorageClass::PushConstant if accessible_ids.contains(&variable_id) => {
                    push_constant_variable = push_constant_variable
                        .or_else(|| PushConstantVariable::new(module, variable_id));
                }
                _ => (),
            }
        }

        let mut entry_point = EntryPoint {
            id,
            instruction: instruction.index(),
            name,
            execution_model,
            stage: stage_flags(execution_model),
            execution_mode: module
                .execution_mode_set(id)
                .cloned()
                .unwrap_or_default(),
            emit_vertex_geometry: execution_model == ExecutionModel::Geometry
                && module.has_emit_vertex(&accessible_ids),
            has_passthrough: stage_interface_variables.iter().any(|variable| {
                module
                    .decoration_set(variable.id)
                    .has(DecorationFlags::PASSTHROUGH)
            }),
            accessible_ids,
            resource_interface_variables,
            stage_interface_variables,
            push_constant_variable,
            written_builtin_point_size: false,
            written_builtin_layer: false,
            written_builtin_viewport_index: false,
            written_builtin_primitive_shading_rate: false,
            written_builtin_viewport_mask_nv: false,
        };
        entry_point.find_written_builtins(module);

        debug!(
            "entry point `{}` ({:?}): {} ids reachable, {} resources, {} stage variables",
            entry_point.name,
            execution_model,
            entry_point.accessible_ids.len(),
            entry_point.resource_interface_variables.len(),
            entry_point.stage_interface_variables.len(),
        );

        Some(entry_point)
    }

    fn find_written_builtins(&mut self, module: &Module) {
        let mut written: SmallVec<[BuiltIn; 4]> = SmallVec::new();

        for variable in &self.stage_interface_variables {
            if variable.storage_class != StorageClass::Output || !variable.is_builtin {
                continue;
            }

            let struct_decorations = module.decoration_set(variable.base_type);

            for member in module
                .accesses()
                .written_members_in(variable.id, &self.accessible_ids)
            {
                match member {
                    _ if variable.builtin.is_some() => written.extend(variable.builtin),
                    Some(member) => {
                        written.extend(struct_decorations.member(member).and_then(|m| m.builtin))
                    }
                    None => written.extend(
                        struct_decorations
                            .member_decorations
                            .values()
                            .filter_map(|m| m.builtin),
                    ),
                }
            }
        }

        for builtin in written {
            match builtin {
                BuiltIn::PointSize => self.written_builtin_point_size = true,
                BuiltIn::Layer => self.written_builtin_layer = true,
                BuiltIn::ViewportIndex => self.written_builtin_viewport_index = true,
                BuiltIn::PrimitiveShadingRateKHR => {
                    self.written_builtin_primitive_shading_rate = true
                }
                BuiltIn::ViewportMaskNV => self.written_builtin_viewport_mask_nv = true,
                _ => (),
            }
        }
    }
}

fn stage_flags(execution_model: ExecutionModel) -> ShaderStageFlags {
    match execution_model {
        ExecutionModel::Vertex => ShaderStageFlags::VERTEX,
        ExecutionModel::TessellationControl => ShaderStageFlags::TESSELLATION_CONTROL,
        ExecutionModel::TessellationEvaluation => ShaderStageFlags::TESSELLATION_EVALUATION,
        ExecutionModel::Geometry => ShaderStageFlags::GEOMETRY,
        ExecutionModel::Fragment => ShaderStageFlags::FRAGMENT,
        ExecutionModel::GLCompute => ShaderStageFlags::COMPUTE,
        ExecutionModel::TaskNV | ExecutionModel::TaskEXT => ShaderStageFlags::TASK_EXT,
        ExecutionModel::MeshNV | ExecutionModel::MeshEXT => ShaderStageFlags::MESH_EXT,
        ExecutionModel::RayGenerationKHR => ShaderStageFlags::RAYGEN_KHR,
        ExecutionModel::IntersectionKHR => ShaderStageFlags::INTERSECTION_KHR,
        ExecutionModel::AnyHitKHR => ShaderStageFlags::ANY_HIT_KHR,
        ExecutionModel::ClosestHitKHR => ShaderStageFlags::CLOSEST_HIT_KHR,
        ExecutionModel::MissKHR => ShaderStageFlags::MISS_KHR,
        ExecutionModel::CallableKHR => ShaderStageFlags::CALLABLE_KHR,
        _ => ShaderStageFlags::empty(),
    }
}

impl ResourceInterfaceVariable {
    fn new(
        module: &Module,
        variable: Instruction<'_>,
        accessible_ids: &HashSet<Id>,
        image_accesses: &[&ImageAccess],
    ) -> Option<ResourceInterfaceVariable> {
        let id = variable.result_id()?;
        let storage_class = variable.storage_class()?;
        let type_id = module.pointee_type(id)?;
        let type_def = module.find_def(type_id)?;
        let base_def = module.base_type(id)?;
        let base_type = base_def.result_id()?;
        let decorations = module.decoration_set(id);

        let (array_length, is_runtime_descriptor_array) = match type_def.op() {
            Some(Op::TypeArray) => (module.array_length(type_def), false),
            Some(Op::TypeRuntimeArray) => (0, true),
            _ => (1, false),
        };

        let (kind, image_def) = match base_def.op() {
            Some(Op::TypeImage) => (ResourceKind::Image, Some(base_def)),
            Some(Op::TypeSampledImage) => (
                ResourceKind::Image,
                Some(module.find_def(base_def.id_at(2))?),
            ),
            Some(Op::TypeSampler) => (ResourceKind::Sampler, None),
            Some(Op::TypeStruct) => (ResourceKind::Buffer, None),
            Some(Op::TypeAccelerationStructureKHR) => (ResourceKind::AccelerationStructure, None),
            op => {
                debug!("skipping resource variable {id} of unsupported type {op:?}");
                return None;
            }
        };

        let block = module.decoration_set(base_type);
        let is_storage_buffer = storage_class == StorageClass::StorageBuffer
            || (storage_class == StorageClass::Uniform
                && block.has(DecorationFlags::BUFFER_BLOCK));
        let access = module.accesses().flags_in(id, accessible_ids);

        let mut resource = ResourceInterfaceVariable {
            id,
            storage_class,
            type_id,
            base_type,
            set: decorations.set().unwrap_or(0),
            binding: decorations.binding().unwrap_or(0),
            array_length,
            is_runtime_descriptor_array,
            kind,
            type_struct_info: module.type_struct_info(base_type).cloned(),
            image_dim: None,
            image_format: None,
            image_sampled_type: NumericType::Unknown,
            image_sampled_type_width: 0,
            is_image_array: false,
            is_multisampled: false,
            is_sampled_image: base_def.op() == Some(Op::TypeSampledImage),
            is_storage_image: false,
            is_input_attachment: false,
            input_attachment_index: decorations.base.input_attachment_index_start,
            is_storage_buffer,
            is_uniform_buffer: kind == ResourceKind::Buffer
                && storage_class == StorageClass::Uniform
                && !is_storage_buffer,
            access,
            image_access: ImageAccessFlags::empty(),
            is_read_without_format: false,
            is_write_without_format: false,
            is_atomic_operation: access
                .intersects(AccessFlags::ATOMIC_READ | AccessFlags::ATOMIC_WRITE),
            write_texel_component_counts: SmallVec::new(),
            samplers_used_by_image: Vec::new(),
            descriptor_hash: 0,
        };

        if let Some(image) = image_def {
            resource.set_image_traits(module, image);
        }

        resource.fold_image_accesses(image_accesses);
        resource.descriptor_hash = resource.compute_descriptor_hash();

        Some(resource)
    }

    fn set_image_traits(&mut self, module: &Module, image: Instruction<'_>) {
        let sampled_type = image.id_at(2);
        let dim = Dim::from_u32(image.word(3));

        self.image_dim = dim;
        self.image_format = ImageFormat::from_u32(image.word(8));
        self.image_sampled_type = module.numeric_type(sampled_type);
        self.image_sampled_type_width = module
            .find_def(sampled_type)
            .and_then(|def| def.bit_width())
            .unwrap_or(0);
        self.is_image_array = image.word(5) != 0;
        self.is_multisampled = image.word(6) != 0;
        self.is_storage_image = image.word(7) == 2;
        self.is_input_attachment = dim == Some(Dim::DimSubpassData);
    }

    fn fold_image_accesses(&mut self, image_accesses: &[&ImageAccess]) {
        for access in image_accesses {
            if access.image_variables.contains(&self.id) {
                self.image_access |= access.flags;

                if let Some(count) = access.texel_component_count {
                    if !self.write_texel_component_counts.contains(&count) {
                        self.write_texel_component_counts.push(count);
                    }
                }

                for &sampler in &access.sampler_variables {
                    let used = SamplerUsedByImage {
                        image_index: access.image_array_index,
                        sampler,
                        sampler_index: access.sampler_array_index,
                    };

                    if !self.samplers_used_by_image.contains(&used) {
                        self.samplers_used_by_image.push(used);
                    }
                }
            }

            if access.sampler_variables.contains(&self.id) {
                self.image_access |= access.flags
                    & (ImageAccessFlags::SAMPLED
                        | ImageAccessFlags::DREF
                        | ImageAccessFlags::SAMPLER_IMPLICIT_LOD_DREF_PROJ
                        | ImageAccessFlags::SAMPLER_BIAS_OFFSET);
            }
        }

        let without_format = self.image_format == Some(ImageFormat::Unknown);
        self.is_read_without_format =
            without_format && self.image_access.intersects(ImageAccessFlags::STORAGE_READ);
        self.is_write_without_format =
            without_format && self.image_access.intersects(ImageAccessFlags::WRITE);
        self.is_atomic_operation |= self.image_access.intersects(ImageAccessFlags::ATOMIC);
    }

    fn compute_descriptor_hash(&self) -> u64 {
        let state = foldhash::fast::FixedState::with_seed(0);

        state.hash_one((
            (self.set, self.binding, self.storage_class as u32),
            (self.array_length, self.is_runtime_descriptor_array, self.kind),
            (
                self.image_dim.map(|dim| dim as u32),
                self.image_format.map(|format| format as u32),
                self.image_sampled_type,
                self.image_sampled_type_width,
            ),
            (
                self.is_image_array,
                self.is_multisampled,
                self.is_sampled_image,
                self.is_storage_image,
                self.is_storage_buffer,
            ),
            (self.access.as_raw(), self.image_access.as_raw()),
            &self.samplers_used_by_image,
        ))
    }
}

impl StageInterfaceVariable {
    fn new(
        module: &Module,
        variable: Instruction<'_>,
        execution_model: ExecutionModel,
    ) -> Option<StageInterfaceVariable> {
        let id = variable.result_id()?;
        let storage_class = variable.storage_class()?;
        let type_id = module.pointee_type(id)?;
        let base_type = module.base_type(id)?.result_id()?;
        let decorations = module.decoration_set(id);
        let struct_decorations = module.decoration_set(base_type);

        let is_patch = decorations.has(DecorationFlags::PATCH);
        let is_per_vertex = decorations.has(DecorationFlags::PER_VERTEX);
        let is_per_task_nv = decorations.has(DecorationFlags::PER_TASK_NV);
        let is_input = storage_class == StorageClass::Input;

        let is_array_interface = match execution_model {
            ExecutionModel::Geometry => is_input,
            ExecutionModel::TessellationControl => !is_patch,
            ExecutionModel::TessellationEvaluation => is_input && !is_patch,
            ExecutionModel::Fragment => is_per_vertex,
            ExecutionModel::MeshNV | ExecutionModel::MeshEXT => !is_input && !is_per_task_nv,
            _ => false,
        };

        let builtin = decorations.base.builtin;
        let builtin_block = struct_decorations.has(DecorationFlags::BLOCK)
            && struct_decorations.has_any_builtin();
        let is_builtin = builtin.is_some() || struct_decorations.has_any_builtin();

        let mut stage_variable = StageInterfaceVariable {
            id,
            storage_class,
            type_id,
            base_type,
            is_patch,
            is_per_vertex,
            is_per_task_nv,
            is_array_interface,
            is_builtin,
            builtin_block,
            builtin,
            type_struct_info: module.type_struct_info(base_type).cloned(),
            interface_slots: SmallVec::new(),
        };

        if !is_builtin {
            stage_variable.collect_interface_slots(module);
        }

        Some(stage_variable)
    }

    fn collect_interface_slots(&mut self, module: &Module) {
        let mut type_id = self.type_id;

        if self.is_array_interface {
            if let Some(def) = module.find_def(type_id).filter(|def| def.is_array()) {
                type_id = def.id_at(2);
            }
        }

        let decorations = module.decoration_set(self.id);
        let component = decorations.base.component.unwrap_or(0);

        if let Some(location) = decorations.base.location {
            push_type_slots(
                module,
                type_id,
                location,
                component,
                MAX_TYPE_DEPTH,
                &mut self.interface_slots,
            );
            return;
        }

        // A block without a variable location places each member by its own location.
        let Some(info) = self.type_struct_info.clone() else {
            return;
        };
        let mut location = 0;

        for member in &info.members {
            let member_decorations = member.decorations.as_ref();

            if let Some(member_location) = member_decorations.and_then(|m| m.location) {
                location = member_location;
            }

            let component = member_decorations.and_then(|m| m.component).unwrap_or(0);
            location = location.saturating_add(push_type_slots(
                module,
                member.id,
                location,
                component,
                MAX_TYPE_DEPTH,
                &mut self.interface_slots,
            ));
        }
    }
}

/// Pushes the slots a value of type `type_id` consumes, starting at `location` and
/// `component`, and returns the number of locations consumed.
fn push_type_slots(
    module: &Module,
    type_id: Id,
    location: u32,
    component: u32,
    depth: u32,
    slots: &mut SmallVec<[InterfaceSlot; 4]>,
) -> u32 {
    let Some(def) = module.find_def(type_id).filter(|_| depth != 0) else {
        return 0;
    };
    let depth = depth - 1;

    if location >= MAX_INTERFACE_LOCATION {
        return 0;
    }

    match def.op() {
        Some(Op::TypeArray | Op::TypeMatrix) => {
            let (count, element) = match def.op() {
                Some(Op::TypeArray) => (module.array_length(def), def.id_at(2)),
                _ => (def.word(3), def.id_at(2)),
            };
            let element_locations = module.locations_consumed_by_type(element, false);

            if element_locations == 0 {
                return 0;
            }

            let mut consumed = 0u32;

            for _ in 0..count {
                push_type_slots(
                    module,
                    element,
                    location.saturating_add(consumed),
                    component,
                    depth,
                    slots,
                );
                consumed = consumed.saturating_add(element_locations);

                if location.saturating_add(consumed) >= MAX_INTERFACE_LOCATION {
                    break;
                }
            }

            consumed
        }
        Some(Op::TypeStruct) => {
            let mut consumed = 0u32;

            for &member in def.operands() {
                consumed = consumed.saturating_add(push_type_slots(
                    module,
                    Id::new(member),
                    location.saturating_add(consumed),
                    0,
                    depth,
                    slots,
                ));
            }

            consumed
        }
        Some(Op::TypeVector) => {
            push_scalar_slots(module, def.id_at(2), def.word(3), location, component, slots);
            module.locations_consumed_by_type(type_id, false)
        }
        Some(Op::TypeInt | Op::TypeFloat | Op::TypeBool) => {
            push_scalar_slots(module, type_id, 1, location, component, slots);
            1
        }
        _ => 0,
    }
}

fn push_scalar_slots(
    module: &Module,
    scalar_type: Id,
    count: u32,
    location: u32,
    component: u32,
    slots: &mut SmallVec<[InterfaceSlot; 4]>,
) {
    let bit_width = module
        .find_def(scalar_type)
        .and_then(|def| def.bit_width())
        .unwrap_or(32);
    let numeric_type = module.numeric_type(scalar_type);
    let per_scalar = if bit_width == 64 { 2 } else { 1 };
    let Some(first) = location
        .checked_mul(4)
        .and_then(|slot| slot.checked_add(component))
    else {
        return;
    };

    for offset in 0..count.min(4) * per_scalar {
        let Some(slot) = first.checked_add(offset) else {
            break;
        };

        slots.push(InterfaceSlot {
            slot,
            type_id: scalar_type,
            numeric_type,
            bit_width,
        });
    }
}

impl PushConstantVariable {
    fn new(module: &Module, id: Id) -> Option<PushConstantVariable> {
        let base_type = module.base_type(id)?.result_id()?;
        let type_struct_info = module.type_struct_info(base_type)?.clone();
        let range = type_struct_info.range(module);

        Some(PushConstantVariable {
            id,
            offset: range.offset,
            size: range.size(),
            type_struct_info,
        })
    }
}
