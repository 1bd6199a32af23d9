// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Aggregation of decorations and execution modes.
//!
//! Decorations and execution modes can appear in any order and any number of times, so they are
//! collected once, up front, into one record per target.

use crate::{macros::spirv_bitflags, Id, Instruction};
use foldhash::HashMap;
use spirv::{BuiltIn, Decoration, ExecutionMode, Op};

spirv_bitflags! {
    /// Boolean decorations of an id or struct member.
    DecorationFlags(u32);

    PATCH = 1 << 0,
    BLOCK = 1 << 1,
    BUFFER_BLOCK = 1 << 2,
    NON_WRITABLE = 1 << 3,
    NON_READABLE = 1 << 4,
    PER_VERTEX = 1 << 5,
    PASSTHROUGH = 1 << 6,
    ALIASED = 1 << 7,
    INPUT_ATTACHMENT = 1 << 8,
    PER_TASK_NV = 1 << 9,
    PER_PRIMITIVE = 1 << 10,
}

/// The decorations of one id, or of one member of a struct type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecorationBase {
    pub flags: DecorationFlags,
    pub location: Option<u32>,
    pub component: Option<u32>,
    pub offset: Option<u32>,
    pub set: Option<u32>,
    pub binding: Option<u32>,
    pub builtin: Option<BuiltIn>,
    pub input_attachment_index_start: Option<u32>,
    pub array_stride: Option<u32>,
}

impl DecorationBase {
    /// Adds one decoration. `value` is the first literal operand, if any.
    ///
    /// Decorations that don't matter for the analysis are ignored.
    pub fn add(&mut self, decoration: Decoration, value: Option<u32>) {
        match decoration {
            Decoration::Location => self.location = value,
            Decoration::Component => self.component = value,
            Decoration::Offset => {
                // Merged instead of overwritten, so that an earlier offset is never lost.
                self.offset = Some(self.offset.unwrap_or(0) | value.unwrap_or(0));
            }
            Decoration::DescriptorSet => self.set = value,
            Decoration::Binding => self.binding = value,
            Decoration::ArrayStride => self.array_stride = value,
            Decoration::BuiltIn => self.builtin = value.and_then(BuiltIn::from_u32),
            Decoration::InputAttachmentIndex => {
                self.flags |= DecorationFlags::INPUT_ATTACHMENT;
                self.input_attachment_index_start = value;
            }
            Decoration::Patch => self.flags |= DecorationFlags::PATCH,
            Decoration::Block => self.flags |= DecorationFlags::BLOCK,
            Decoration::BufferBlock => self.flags |= DecorationFlags::BUFFER_BLOCK,
            Decoration::NonWritable => self.flags |= DecorationFlags::NON_WRITABLE,
            Decoration::NonReadable => self.flags |= DecorationFlags::NON_READABLE,
            Decoration::PerVertexKHR => self.flags |= DecorationFlags::PER_VERTEX,
            Decoration::PassthroughNV => self.flags |= DecorationFlags::PASSTHROUGH,
            Decoration::Aliased => self.flags |= DecorationFlags::ALIASED,
            Decoration::PerTaskNV => self.flags |= DecorationFlags::PER_TASK_NV,
            Decoration::PerPrimitiveEXT => self.flags |= DecorationFlags::PER_PRIMITIVE,
            _ => (),
        }
    }

    /// Merges the decorations of `other` into `self`.
    fn merge(&mut self, other: &DecorationBase) {
        self.flags |= other.flags;
        self.location = other.location.or(self.location);
        self.component = other.component.or(self.component);
        self.set = other.set.or(self.set);
        self.binding = other.binding.or(self.binding);
        self.builtin = other.builtin.or(self.builtin);
        self.array_stride = other.array_stride.or(self.array_stride);
        self.input_attachment_index_start = other
            .input_attachment_index_start
            .or(self.input_attachment_index_start);

        if let Some(offset) = other.offset {
            self.add(Decoration::Offset, Some(offset));
        }
    }

    #[inline]
    pub fn has(&self, flag: DecorationFlags) -> bool {
        self.flags.intersects(flag)
    }
}

/// The decorations of one id, and of the members if the id is a struct type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecorationSet {
    pub base: DecorationBase,
    pub member_decorations: HashMap<u32, DecorationBase>,
}

impl DecorationSet {
    /// Returns whether the id itself has `flag`.
    #[inline]
    pub fn has(&self, flag: DecorationFlags) -> bool {
        self.base.has(flag)
    }

    /// Returns whether the id or any member is decorated `BuiltIn`.
    pub fn has_any_builtin(&self) -> bool {
        self.base.builtin.is_some()
            || self
                .member_decorations
                .values()
                .any(|member| member.builtin.is_some())
    }

    /// Returns whether any member has `flag`.
    pub fn has_in_member(&self, flag: DecorationFlags) -> bool {
        self.member_decorations
            .values()
            .any(|member| member.has(flag))
    }

    /// Returns whether the struct has at least one decorated member, and every decorated member
    /// has `flag`.
    pub fn all_members_have(&self, flag: DecorationFlags) -> bool {
        !self.member_decorations.is_empty()
            && self
                .member_decorations
                .values()
                .all(|member| member.has(flag))
    }

    #[inline]
    pub fn member(&self, index: u32) -> Option<&DecorationBase> {
        self.member_decorations.get(&index)
    }

    pub(crate) fn set(&self) -> Option<u32> {
        self.base.set
    }

    pub(crate) fn binding(&self) -> Option<u32> {
        self.base.binding
    }
}

/// Collects every decoration instruction into one record per target id.
///
/// Decoration groups are expanded: the decorations of a group are copied to every target of
/// `OpGroupDecorate`, and to every member named by `OpGroupMemberDecorate`.
pub(crate) fn decoration_sets<'a>(
    instructions: impl IntoIterator<Item = Instruction<'a>>,
) -> HashMap<Id, DecorationSet> {
    let mut sets: HashMap<Id, DecorationSet> = HashMap::default();
    let mut group_uses = Vec::new();

    for instruction in instructions {
        match instruction.op() {
            Some(Op::Decorate | Op::DecorateId) => {
                let Some(decoration) = instruction.decoration() else {
                    continue;
                };

                sets.entry(instruction.id_at(1))
                    .or_default()
                    .base
                    .add(decoration, instruction.get_word(3));
            }
            Some(Op::MemberDecorate) => {
                let Some(decoration) = instruction.decoration() else {
                    continue;
                };

                sets.entry(instruction.id_at(1))
                    .or_default()
                    .member_decorations
                    .entry(instruction.word(2))
                    .or_default()
                    .add(decoration, instruction.get_word(4));
            }
            Some(Op::GroupDecorate | Op::GroupMemberDecorate) => group_uses.push(instruction),
            _ => (),
        }
    }

    for instruction in group_uses {
        let group = instruction.id_at(1);
        let Some(group_base) = sets.get(&group).map(|set| set.base.clone()) else {
            continue;
        };

        match instruction.op() {
            Some(Op::GroupDecorate) => {
                for &target in &instruction.words()[2..] {
                    sets.entry(Id::new(target))
                        .or_default()
                        .base
                        .merge(&group_base);
                }
            }
            Some(Op::GroupMemberDecorate) => {
                for pair in instruction.words()[2..].chunks_exact(2) {
                    sets.entry(Id::new(pair[0]))
                        .or_default()
                        .member_decorations
                        .entry(pair[1])
                        .or_default()
                        .merge(&group_base);
                }
            }
            _ => (),
        }
    }

    sets
}

spirv_bitflags! {
    /// Boolean execution modes of an entry point.
    ExecutionModeFlags(u32);

    OUTPUT_POINTS = 1 << 0,
    POINT_MODE = 1 << 1,
    POST_DEPTH_COVERAGE = 1 << 2,
    LOCAL_SIZE = 1 << 3,
    LOCAL_SIZE_ID = 1 << 4,
    ISO_LINES = 1 << 5,
    XFB = 1 << 6,
    EARLY_FRAGMENT_TEST = 1 << 7,
    SUBGROUP_UNIFORM_CONTROL_FLOW = 1 << 8,
    SIGNED_ZERO_INF_NAN_PRESERVE_WIDTH_16 = 1 << 9,
    SIGNED_ZERO_INF_NAN_PRESERVE_WIDTH_32 = 1 << 10,
    SIGNED_ZERO_INF_NAN_PRESERVE_WIDTH_64 = 1 << 11,
    DENORM_PRESERVE_WIDTH_16 = 1 << 12,
    DENORM_PRESERVE_WIDTH_32 = 1 << 13,
    DENORM_PRESERVE_WIDTH_64 = 1 << 14,
    DENORM_FLUSH_TO_ZERO_WIDTH_16 = 1 << 15,
    DENORM_FLUSH_TO_ZERO_WIDTH_32 = 1 << 16,
    DENORM_FLUSH_TO_ZERO_WIDTH_64 = 1 << 17,
    ROUNDING_MODE_RTE_WIDTH_16 = 1 << 18,
    ROUNDING_MODE_RTE_WIDTH_32 = 1 << 19,
    ROUNDING_MODE_RTE_WIDTH_64 = 1 << 20,
    ROUNDING_MODE_RTZ_WIDTH_16 = 1 << 21,
    ROUNDING_MODE_RTZ_WIDTH_32 = 1 << 22,
    ROUNDING_MODE_RTZ_WIDTH_64 = 1 << 23,
    DEPTH_REPLACING = 1 << 24,
    STENCIL_REF_REPLACING = 1 << 25,
    ORIGIN_UPPER_LEFT = 1 << 26,
}

/// A primitive shape named by an execution mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecutionModePrimitive {
    Points,
    Lines,
    LinesAdjacency,
    LineStrip,
    Triangles,
    TrianglesAdjacency,
    TriangleStrip,
}

/// The execution modes of one entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionModeSet {
    pub flags: ExecutionModeFlags,
    /// The primitive a geometry shader consumes.
    pub input_primitive: Option<ExecutionModePrimitive>,
    /// The primitive a geometry or mesh shader outputs.
    pub primitive_topology: Option<ExecutionModePrimitive>,
    pub invocations: Option<u32>,
    pub output_vertices: Option<u32>,
    pub output_primitives: Option<u32>,
    /// `SpacingEqual`, `SpacingFractionalEven` or `SpacingFractionalOdd`.
    pub tessellation_spacing: Option<ExecutionMode>,
    /// `VertexOrderCw` or `VertexOrderCcw`.
    pub tessellation_orientation: Option<ExecutionMode>,
    /// `Triangles`, `Quads` or `Isolines`.
    pub tessellation_subdivision: Option<ExecutionMode>,
    /// With `LOCAL_SIZE` these are literals; with `LOCAL_SIZE_ID` they are constant ids.
    pub local_size_x: u32,
    pub local_size_y: u32,
    pub local_size_z: u32,
}

impl ExecutionModeSet {
    /// Adds one execution mode with its operands.
    pub fn add(&mut self, mode: ExecutionMode, operands: &[u32]) {
        let first = operands.first().copied();

        match mode {
            ExecutionMode::EarlyFragmentTests => {
                self.flags |= ExecutionModeFlags::EARLY_FRAGMENT_TEST
            }
            ExecutionMode::PointMode => self.flags |= ExecutionModeFlags::POINT_MODE,
            ExecutionMode::PostDepthCoverage => {
                self.flags |= ExecutionModeFlags::POST_DEPTH_COVERAGE
            }
            ExecutionMode::Xfb => self.flags |= ExecutionModeFlags::XFB,
            ExecutionMode::SubgroupUniformControlFlowKHR => {
                self.flags |= ExecutionModeFlags::SUBGROUP_UNIFORM_CONTROL_FLOW
            }
            ExecutionMode::DepthReplacing => self.flags |= ExecutionModeFlags::DEPTH_REPLACING,
            ExecutionMode::StencilRefReplacingEXT => {
                self.flags |= ExecutionModeFlags::STENCIL_REF_REPLACING
            }
            ExecutionMode::OriginUpperLeft => self.flags |= ExecutionModeFlags::ORIGIN_UPPER_LEFT,
            ExecutionMode::LocalSize | ExecutionMode::LocalSizeId => {
                self.flags |= if mode == ExecutionMode::LocalSize {
                    ExecutionModeFlags::LOCAL_SIZE
                } else {
                    ExecutionModeFlags::LOCAL_SIZE_ID
                };

                if let [x, y, z, ..] = *operands {
                    self.local_size_x = x;
                    self.local_size_y = y;
                    self.local_size_z = z;
                }
            }
            ExecutionMode::SignedZeroInfNanPreserve => self.add_float_control(
                first,
                [
                    ExecutionModeFlags::SIGNED_ZERO_INF_NAN_PRESERVE_WIDTH_16,
                    ExecutionModeFlags::SIGNED_ZERO_INF_NAN_PRESERVE_WIDTH_32,
                    ExecutionModeFlags::SIGNED_ZERO_INF_NAN_PRESERVE_WIDTH_64,
                ],
            ),
            ExecutionMode::DenormPreserve => self.add_float_control(
                first,
                [
                    ExecutionModeFlags::DENORM_PRESERVE_WIDTH_16,
                    ExecutionModeFlags::DENORM_PRESERVE_WIDTH_32,
                    ExecutionModeFlags::DENORM_PRESERVE_WIDTH_64,
                ],
            ),
            ExecutionMode::DenormFlushToZero => self.add_float_control(
                first,
                [
                    ExecutionModeFlags::DENORM_FLUSH_TO_ZERO_WIDTH_16,
                    ExecutionModeFlags::DENORM_FLUSH_TO_ZERO_WIDTH_32,
                    ExecutionModeFlags::DENORM_FLUSH_TO_ZERO_WIDTH_64,
                ],
            ),
            ExecutionMode::RoundingModeRTE => self.add_float_control(
                first,
                [
                    ExecutionModeFlags::ROUNDING_MODE_RTE_WIDTH_16,
                    ExecutionModeFlags::ROUNDING_MODE_RTE_WIDTH_32,
                    ExecutionModeFlags::ROUNDING_MODE_RTE_WIDTH_64,
                ],
            ),
            ExecutionMode::RoundingModeRTZ => self.add_float_control(
                first,
                [
                    ExecutionModeFlags::ROUNDING_MODE_RTZ_WIDTH_16,
                    ExecutionModeFlags::ROUNDING_MODE_RTZ_WIDTH_32,
                    ExecutionModeFlags::ROUNDING_MODE_RTZ_WIDTH_64,
                ],
            ),

            ExecutionMode::InputPoints => {
                self.input_primitive = Some(ExecutionModePrimitive::Points)
            }
            ExecutionMode::InputLines => self.input_primitive = Some(ExecutionModePrimitive::Lines),
            ExecutionMode::InputLinesAdjacency => {
                self.input_primitive = Some(ExecutionModePrimitive::LinesAdjacency)
            }
            ExecutionMode::InputTrianglesAdjacency => {
                self.input_primitive = Some(ExecutionModePrimitive::TrianglesAdjacency)
            }
            ExecutionMode::Triangles => {
                // Geometry input, or tessellation subdivision; the stage tells which.
                self.input_primitive = Some(ExecutionModePrimitive::Triangles);
                self.tessellation_subdivision = Some(mode);
            }
            ExecutionMode::Quads => self.tessellation_subdivision = Some(mode),
            ExecutionMode::Isolines => {
                self.flags |= ExecutionModeFlags::ISO_LINES;
                self.tessellation_subdivision = Some(mode);
            }

            ExecutionMode::OutputPoints => {
                self.flags |= ExecutionModeFlags::OUTPUT_POINTS;
                self.primitive_topology = Some(ExecutionModePrimitive::Points);
            }
            ExecutionMode::OutputLineStrip => {
                self.primitive_topology = Some(ExecutionModePrimitive::LineStrip)
            }
            ExecutionMode::OutputTriangleStrip => {
                self.primitive_topology = Some(ExecutionModePrimitive::TriangleStrip)
            }
            ExecutionMode::OutputLinesEXT => {
                self.primitive_topology = Some(ExecutionModePrimitive::Lines)
            }
            ExecutionMode::OutputTrianglesEXT => {
                self.primitive_topology = Some(ExecutionModePrimitive::Triangles)
            }

            ExecutionMode::Invocations => self.invocations = first,
            ExecutionMode::OutputVertices => self.output_vertices = first,
            ExecutionMode::OutputPrimitivesEXT => self.output_primitives = first,

            ExecutionMode::SpacingEqual
            | ExecutionMode::SpacingFractionalEven
            | ExecutionMode::SpacingFractionalOdd => self.tessellation_spacing = Some(mode),
            ExecutionMode::VertexOrderCw | ExecutionMode::VertexOrderCcw => {
                self.tessellation_orientation = Some(mode)
            }

            _ => (),
        }
    }

    fn add_float_control(&mut self, width: Option<u32>, flags: [ExecutionModeFlags; 3]) {
        match width {
            Some(16) => self.flags |= flags[0],
            Some(32) => self.flags |= flags[1],
            Some(64) => self.flags |= flags[2],
            _ => (),
        }
    }

    #[inline]
    pub fn has(&self, flag: ExecutionModeFlags) -> bool {
        self.flags.intersects(flag)
    }

    /// Returns the primitive that a tessellation evaluation shader outputs.
    pub fn tessellation_output_primitive(&self) -> Option<ExecutionModePrimitive> {
        if self.has(ExecutionModeFlags::POINT_MODE) {
            return Some(ExecutionModePrimitive::Points);
        }

        match self.tessellation_subdivision? {
            ExecutionMode::Isolines => Some(ExecutionModePrimitive::Lines),
            ExecutionMode::Triangles | ExecutionMode::Quads => {
                Some(ExecutionModePrimitive::Triangles)
            }
            _ => None,
        }
    }
}

/// Collects every `OpExecutionMode` and `OpExecutionModeId` into one record per entry point id.
pub(crate) fn execution_mode_sets<'a>(
    instructions: impl IntoIterator<Item = Instruction<'a>>,
) -> HashMap<Id, ExecutionModeSet> {
    let mut sets: HashMap<Id, ExecutionModeSet> = HashMap::default();

    for instruction in instructions {
        if !matches!(
            instruction.op(),
            Some(Op::ExecutionMode | Op::ExecutionModeId)
        ) {
            continue;
        }

        let set = sets.entry(instruction.id_at(1)).or_default();

        if let Some(mode) = ExecutionMode::from_u32(instruction.word(2)) {
            set.add(mode, &instruction.words()[3..]);
        }
    }

    sets
}
