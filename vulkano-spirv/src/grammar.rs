// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Per-opcode lookup tables.
//!
//! These are pure functions of the opcode. They cover what the analysis and the instrumentation
//! passes need to walk instructions they do not otherwise understand: whether an opcode produces
//! a result (and a result type), where its image and memory-scope operands are, and which of its
//! operands are ids.
//!
//! The result and id tables match on every opcode of the `spirv` crate, as generated from the
//! SPIR-V grammar, so that no instruction is silently treated as opaque.

use crate::binary;
use spirv::Op;

/// Returns whether instructions with this opcode carry a result id and a result type id, in that
/// order.
///
/// The match lists every opcode, so a newly added opcode fails to compile until it is classified
/// here.
pub fn has_result_and_type(op: Op) -> (bool, bool) {
    match op {
        Op::Nop
        | Op::SourceContinued
        | Op::Source
        | Op::SourceExtension
        | Op::Name
        | Op::MemberName
        | Op::Line
        | Op::Extension
        | Op::MemoryModel
        | Op::EntryPoint
        | Op::ExecutionMode
        | Op::Capability
        | Op::TypeForwardPointer
        | Op::FunctionEnd
        | Op::Store
        | Op::CopyMemory
        | Op::CopyMemorySized
        | Op::Decorate
        | Op::MemberDecorate
        | Op::GroupDecorate
        | Op::GroupMemberDecorate
        | Op::ImageWrite
        | Op::EmitVertex
        | Op::EndPrimitive
        | Op::EmitStreamVertex
        | Op::EndStreamPrimitive
        | Op::ControlBarrier
        | Op::MemoryBarrier
        | Op::AtomicStore
        | Op::LoopMerge
        | Op::SelectionMerge
        | Op::Branch
        | Op::BranchConditional
        | Op::Switch
        | Op::Kill
        | Op::Return
        | Op::ReturnValue
        | Op::Unreachable
        | Op::LifetimeStart
        | Op::LifetimeStop
        | Op::GroupWaitEvents
        | Op::CommitReadPipe
        | Op::CommitWritePipe
        | Op::GroupCommitReadPipe
        | Op::GroupCommitWritePipe
        | Op::RetainEvent
        | Op::ReleaseEvent
        | Op::SetUserEventStatus
        | Op::CaptureEventProfilingInfo
        | Op::NoLine
        | Op::AtomicFlagClear
        | Op::MemoryNamedBarrier
        | Op::ModuleProcessed
        | Op::ExecutionModeId
        | Op::DecorateId
        | Op::TerminateInvocation
        | Op::TraceRayKHR
        | Op::ExecuteCallableKHR
        | Op::IgnoreIntersectionKHR
        | Op::TerminateRayKHR
        | Op::CooperativeMatrixStoreKHR
        | Op::RayQueryInitializeKHR
        | Op::RayQueryTerminateKHR
        | Op::RayQueryGenerateIntersectionKHR
        | Op::RayQueryConfirmIntersectionKHR
        | Op::FinalizeNodePayloadsAMDX
        | Op::InitializeNodePayloadsAMDX
        | Op::HitObjectRecordHitMotionNV
        | Op::HitObjectRecordHitWithIndexMotionNV
        | Op::HitObjectRecordMissMotionNV
        | Op::HitObjectTraceRayMotionNV
        | Op::HitObjectRecordEmptyNV
        | Op::HitObjectTraceRayNV
        | Op::HitObjectRecordHitNV
        | Op::HitObjectRecordHitWithIndexNV
        | Op::HitObjectRecordMissNV
        | Op::HitObjectExecuteShaderNV
        | Op::HitObjectGetAttributesNV
        | Op::ReorderThreadWithHitObjectNV
        | Op::ReorderThreadWithHintNV
        | Op::EmitMeshTasksEXT
        | Op::SetMeshOutputsEXT
        | Op::WritePackedPrimitiveIndices4x8NV
        | Op::IgnoreIntersectionNV
        | Op::TerminateRayNV
        | Op::TraceNV
        | Op::TraceMotionNV
        | Op::TraceRayMotionNV
        | Op::ExecuteCallableNV
        | Op::CooperativeMatrixStoreNV
        | Op::BeginInvocationInterlockEXT
        | Op::EndInvocationInterlockEXT
        | Op::DemoteToHelperInvocation
        | Op::SamplerImageAddressingModeNV
        | Op::SubgroupBlockWriteINTEL
        | Op::SubgroupImageBlockWriteINTEL
        | Op::SubgroupImageMediaBlockWriteINTEL
        | Op::AssumeTrueKHR
        | Op::DecorateString
        | Op::MemberDecorateString
        | Op::RestoreMemoryINTEL
        | Op::LoopControlINTEL
        | Op::TypeStructContinuedINTEL
        | Op::ConstantCompositeContinuedINTEL
        | Op::SpecConstantCompositeContinuedINTEL
        | Op::ControlBarrierArriveINTEL
        | Op::ControlBarrierWaitINTEL => (false, false),

        Op::String
        | Op::ExtInstImport
        | Op::TypeVoid
        | Op::TypeBool
        | Op::TypeInt
        | Op::TypeFloat
        | Op::TypeVector
        | Op::TypeMatrix
        | Op::TypeImage
        | Op::TypeSampler
        | Op::TypeSampledImage
        | Op::TypeArray
        | Op::TypeRuntimeArray
        | Op::TypeStruct
        | Op::TypeOpaque
        | Op::TypePointer
        | Op::TypeFunction
        | Op::TypeEvent
        | Op::TypeDeviceEvent
        | Op::TypeReserveId
        | Op::TypeQueue
        | Op::TypePipe
        | Op::DecorationGroup
        | Op::Label
        | Op::TypePipeStorage
        | Op::TypeNamedBarrier
        | Op::TypeCooperativeMatrixKHR
        | Op::TypeRayQueryKHR
        | Op::TypeHitObjectNV
        | Op::TypeAccelerationStructureKHR
        | Op::TypeCooperativeMatrixNV
        | Op::TypeVmeImageINTEL
        | Op::TypeAvcImePayloadINTEL
        | Op::TypeAvcRefPayloadINTEL
        | Op::TypeAvcSicPayloadINTEL
        | Op::TypeAvcMcePayloadINTEL
        | Op::TypeAvcMceResultINTEL
        | Op::TypeAvcImeResultINTEL
        | Op::TypeAvcImeResultSingleReferenceStreamoutINTEL
        | Op::TypeAvcImeResultDualReferenceStreamoutINTEL
        | Op::TypeAvcImeSingleReferenceStreaminINTEL
        | Op::TypeAvcImeDualReferenceStreaminINTEL
        | Op::TypeAvcRefResultINTEL
        | Op::TypeAvcSicResultINTEL
        | Op::AliasDomainDeclINTEL
        | Op::AliasScopeDeclINTEL
        | Op::AliasScopeListDeclINTEL
        | Op::TypeBufferSurfaceINTEL => (true, false),

        Op::Undef
        | Op::ExtInst
        | Op::ConstantTrue
        | Op::ConstantFalse
        | Op::Constant
        | Op::ConstantComposite
        | Op::ConstantSampler
        | Op::ConstantNull
        | Op::SpecConstantTrue
        | Op::SpecConstantFalse
        | Op::SpecConstant
        | Op::SpecConstantComposite
        | Op::SpecConstantOp
        | Op::Function
        | Op::FunctionParameter
        | Op::FunctionCall
        | Op::Variable
        | Op::ImageTexelPointer
        | Op::Load
        | Op::AccessChain
        | Op::InBoundsAccessChain
        | Op::PtrAccessChain
        | Op::ArrayLength
        | Op::GenericPtrMemSemantics
        | Op::InBoundsPtrAccessChain
        | Op::VectorExtractDynamic
        | Op::VectorInsertDynamic
        | Op::VectorShuffle
        | Op::CompositeConstruct
        | Op::CompositeExtract
        | Op::CompositeInsert
        | Op::CopyObject
        | Op::Transpose
        | Op::SampledImage
        | Op::ImageSampleImplicitLod
        | Op::ImageSampleExplicitLod
        | Op::ImageSampleDrefImplicitLod
        | Op::ImageSampleDrefExplicitLod
        | Op::ImageSampleProjImplicitLod
        | Op::ImageSampleProjExplicitLod
        | Op::ImageSampleProjDrefImplicitLod
        | Op::ImageSampleProjDrefExplicitLod
        | Op::ImageFetch
        | Op::ImageGather
        | Op::ImageDrefGather
        | Op::ImageRead
        | Op::Image
        | Op::ImageQueryFormat
        | Op::ImageQueryOrder
        | Op::ImageQuerySizeLod
        | Op::ImageQuerySize
        | Op::ImageQueryLod
        | Op::ImageQueryLevels
        | Op::ImageQuerySamples
        | Op::ConvertFToU
        | Op::ConvertFToS
        | Op::ConvertSToF
        | Op::ConvertUToF
        | Op::UConvert
        | Op::SConvert
        | Op::FConvert
        | Op::QuantizeToF16
        | Op::ConvertPtrToU
        | Op::SatConvertSToU
        | Op::SatConvertUToS
        | Op::ConvertUToPtr
        | Op::PtrCastToGeneric
        | Op::GenericCastToPtr
        | Op::GenericCastToPtrExplicit
        | Op::Bitcast
        | Op::SNegate
        | Op::FNegate
        | Op::IAdd
        | Op::FAdd
        | Op::ISub
        | Op::FSub
        | Op::IMul
        | Op::FMul
        | Op::UDiv
        | Op::SDiv
        | Op::FDiv
        | Op::UMod
        | Op::SRem
        | Op::SMod
        | Op::FRem
        | Op::FMod
        | Op::VectorTimesScalar
        | Op::MatrixTimesScalar
        | Op::VectorTimesMatrix
        | Op::MatrixTimesVector
        | Op::MatrixTimesMatrix
        | Op::OuterProduct
        | Op::Dot
        | Op::IAddCarry
        | Op::ISubBorrow
        | Op::UMulExtended
        | Op::SMulExtended
        | Op::Any
        | Op::All
        | Op::IsNan
        | Op::IsInf
        | Op::IsFinite
        | Op::IsNormal
        | Op::SignBitSet
        | Op::LessOrGreater
        | Op::Ordered
        | Op::Unordered
        | Op::LogicalEqual
        | Op::LogicalNotEqual
        | Op::LogicalOr
        | Op::LogicalAnd
        | Op::LogicalNot
        | Op::Select
        | Op::IEqual
        | Op::INotEqual
        | Op::UGreaterThan
        | Op::SGreaterThan
        | Op::UGreaterThanEqual
        | Op::SGreaterThanEqual
        | Op::ULessThan
        | Op::SLessThan
        | Op::ULessThanEqual
        | Op::SLessThanEqual
        | Op::FOrdEqual
        | Op::FUnordEqual
        | Op::FOrdNotEqual
        | Op::FUnordNotEqual
        | Op::FOrdLessThan
        | Op::FUnordLessThan
        | Op::FOrdGreaterThan
        | Op::FUnordGreaterThan
        | Op::FOrdLessThanEqual
        | Op::FUnordLessThanEqual
        | Op::FOrdGreaterThanEqual
        | Op::FUnordGreaterThanEqual
        | Op::ShiftRightLogical
        | Op::ShiftRightArithmetic
        | Op::ShiftLeftLogical
        | Op::BitwiseOr
        | Op::BitwiseXor
        | Op::BitwiseAnd
        | Op::Not
        | Op::BitFieldInsert
        | Op::BitFieldSExtract
        | Op::BitFieldUExtract
        | Op::BitReverse
        | Op::BitCount
        | Op::DPdx
        | Op::DPdy
        | Op::Fwidth
        | Op::DPdxFine
        | Op::DPdyFine
        | Op::FwidthFine
        | Op::DPdxCoarse
        | Op::DPdyCoarse
        | Op::FwidthCoarse
        | Op::AtomicLoad
        | Op::AtomicExchange
        | Op::AtomicCompareExchange
        | Op::AtomicCompareExchangeWeak
        | Op::AtomicIIncrement
        | Op::AtomicIDecrement
        | Op::AtomicIAdd
        | Op::AtomicISub
        | Op::AtomicSMin
        | Op::AtomicUMin
        | Op::AtomicSMax
        | Op::AtomicUMax
        | Op::AtomicAnd
        | Op::AtomicOr
        | Op::AtomicXor
        | Op::Phi
        | Op::GroupAsyncCopy
        | Op::GroupAll
        | Op::GroupAny
        | Op::GroupBroadcast
        | Op::GroupIAdd
        | Op::GroupFAdd
        | Op::GroupFMin
        | Op::GroupUMin
        | Op::GroupSMin
        | Op::GroupFMax
        | Op::GroupUMax
        | Op::GroupSMax
        | Op::ReadPipe
        | Op::WritePipe
        | Op::ReservedReadPipe
        | Op::ReservedWritePipe
        | Op::ReserveReadPipePackets
        | Op::ReserveWritePipePackets
        | Op::IsValidReserveId
        | Op::GetNumPipePackets
        | Op::GetMaxPipePackets
        | Op::GroupReserveReadPipePackets
        | Op::GroupReserveWritePipePackets
        | Op::EnqueueMarker
        | Op::EnqueueKernel
        | Op::GetKernelNDrangeSubGroupCount
        | Op::GetKernelNDrangeMaxSubGroupSize
        | Op::GetKernelWorkGroupSize
        | Op::GetKernelPreferredWorkGroupSizeMultiple
        | Op::CreateUserEvent
        | Op::IsValidEvent
        | Op::GetDefaultQueue
        | Op::BuildNDRange
        | Op::ImageSparseSampleImplicitLod
        | Op::ImageSparseSampleExplicitLod
        | Op::ImageSparseSampleDrefImplicitLod
        | Op::ImageSparseSampleDrefExplicitLod
        | Op::ImageSparseSampleProjImplicitLod
        | Op::ImageSparseSampleProjExplicitLod
        | Op::ImageSparseSampleProjDrefImplicitLod
        | Op::ImageSparseSampleProjDrefExplicitLod
        | Op::ImageSparseFetch
        | Op::ImageSparseGather
        | Op::ImageSparseDrefGather
        | Op::ImageSparseTexelsResident
        | Op::AtomicFlagTestAndSet
        | Op::ImageSparseRead
        | Op::SizeOf
        | Op::ConstantPipeStorage
        | Op::CreatePipeFromPipeStorage
        | Op::GetKernelLocalSizeForSubgroupCount
        | Op::GetKernelMaxNumSubgroups
        | Op::NamedBarrierInitialize
        | Op::GroupNonUniformElect
        | Op::GroupNonUniformAll
        | Op::GroupNonUniformAny
        | Op::GroupNonUniformAllEqual
        | Op::GroupNonUniformBroadcast
        | Op::GroupNonUniformBroadcastFirst
        | Op::GroupNonUniformBallot
        | Op::GroupNonUniformInverseBallot
        | Op::GroupNonUniformBallotBitExtract
        | Op::GroupNonUniformBallotBitCount
        | Op::GroupNonUniformBallotFindLSB
        | Op::GroupNonUniformBallotFindMSB
        | Op::GroupNonUniformShuffle
        | Op::GroupNonUniformShuffleXor
        | Op::GroupNonUniformShuffleUp
        | Op::GroupNonUniformShuffleDown
        | Op::GroupNonUniformIAdd
        | Op::GroupNonUniformFAdd
        | Op::GroupNonUniformIMul
        | Op::GroupNonUniformFMul
        | Op::GroupNonUniformSMin
        | Op::GroupNonUniformUMin
        | Op::GroupNonUniformFMin
        | Op::GroupNonUniformSMax
        | Op::GroupNonUniformUMax
        | Op::GroupNonUniformFMax
        | Op::GroupNonUniformBitwiseAnd
        | Op::GroupNonUniformBitwiseOr
        | Op::GroupNonUniformBitwiseXor
        | Op::GroupNonUniformLogicalAnd
        | Op::GroupNonUniformLogicalOr
        | Op::GroupNonUniformLogicalXor
        | Op::GroupNonUniformQuadBroadcast
        | Op::GroupNonUniformQuadSwap
        | Op::CopyLogical
        | Op::PtrEqual
        | Op::PtrNotEqual
        | Op::PtrDiff
        | Op::ColorAttachmentReadEXT
        | Op::DepthAttachmentReadEXT
        | Op::StencilAttachmentReadEXT
        | Op::SubgroupBallotKHR
        | Op::SubgroupFirstInvocationKHR
        | Op::SubgroupAllKHR
        | Op::SubgroupAnyKHR
        | Op::SubgroupAllEqualKHR
        | Op::GroupNonUniformRotateKHR
        | Op::SubgroupReadInvocationKHR
        | Op::ConvertUToAccelerationStructureKHR
        | Op::SDot
        | Op::UDot
        | Op::SUDot
        | Op::SDotAccSat
        | Op::UDotAccSat
        | Op::SUDotAccSat
        | Op::CooperativeMatrixLoadKHR
        | Op::CooperativeMatrixMulAddKHR
        | Op::CooperativeMatrixLengthKHR
        | Op::RayQueryProceedKHR
        | Op::RayQueryGetIntersectionTypeKHR
        | Op::ImageSampleWeightedQCOM
        | Op::ImageBoxFilterQCOM
        | Op::ImageBlockMatchSSDQCOM
        | Op::ImageBlockMatchSADQCOM
        | Op::GroupIAddNonUniformAMD
        | Op::GroupFAddNonUniformAMD
        | Op::GroupFMinNonUniformAMD
        | Op::GroupUMinNonUniformAMD
        | Op::GroupSMinNonUniformAMD
        | Op::GroupFMaxNonUniformAMD
        | Op::GroupUMaxNonUniformAMD
        | Op::GroupSMaxNonUniformAMD
        | Op::FragmentMaskFetchAMD
        | Op::FragmentFetchAMD
        | Op::ReadClockKHR
        | Op::FinishWritingNodePayloadAMDX
        | Op::HitObjectGetWorldToObjectNV
        | Op::HitObjectGetObjectToWorldNV
        | Op::HitObjectGetObjectRayDirectionNV
        | Op::HitObjectGetObjectRayOriginNV
        | Op::HitObjectGetShaderRecordBufferHandleNV
        | Op::HitObjectGetShaderBindingTableRecordIndexNV
        | Op::HitObjectGetCurrentTimeNV
        | Op::HitObjectGetHitKindNV
        | Op::HitObjectGetPrimitiveIndexNV
        | Op::HitObjectGetGeometryIndexNV
        | Op::HitObjectGetInstanceIdNV
        | Op::HitObjectGetInstanceCustomIndexNV
        | Op::HitObjectGetWorldRayDirectionNV
        | Op::HitObjectGetWorldRayOriginNV
        | Op::HitObjectGetRayTMaxNV
        | Op::HitObjectGetRayTMinNV
        | Op::HitObjectIsEmptyNV
        | Op::HitObjectIsHitNV
        | Op::HitObjectIsMissNV
        | Op::ImageSampleFootprintNV
        | Op::GroupNonUniformPartitionNV
        | Op::FetchMicroTriangleVertexPositionNV
        | Op::FetchMicroTriangleVertexBarycentricNV
        | Op::ReportIntersectionKHR
        | Op::RayQueryGetIntersectionTriangleVertexPositionsKHR
        | Op::CooperativeMatrixLoadNV
        | Op::CooperativeMatrixMulAddNV
        | Op::CooperativeMatrixLengthNV
        | Op::IsHelperInvocationEXT
        | Op::ConvertUToImageNV
        | Op::ConvertUToSamplerNV
        | Op::ConvertImageToUNV
        | Op::ConvertSamplerToUNV
        | Op::ConvertUToSampledImageNV
        | Op::ConvertSampledImageToUNV
        | Op::SubgroupShuffleINTEL
        | Op::SubgroupShuffleDownINTEL
        | Op::SubgroupShuffleUpINTEL
        | Op::SubgroupShuffleXorINTEL
        | Op::SubgroupBlockReadINTEL
        | Op::SubgroupImageBlockReadINTEL
        | Op::SubgroupImageMediaBlockReadINTEL
        | Op::UCountLeadingZerosINTEL
        | Op::UCountTrailingZerosINTEL
        | Op::AbsISubINTEL
        | Op::AbsUSubINTEL
        | Op::IAddSatINTEL
        | Op::UAddSatINTEL
        | Op::IAverageINTEL
        | Op::UAverageINTEL
        | Op::IAverageRoundedINTEL
        | Op::UAverageRoundedINTEL
        | Op::ISubSatINTEL
        | Op::USubSatINTEL
        | Op::IMul32x16INTEL
        | Op::UMul32x16INTEL
        | Op::ConstantFunctionPointerINTEL
        | Op::FunctionPointerCallINTEL
        | Op::AsmTargetINTEL
        | Op::AsmINTEL
        | Op::AsmCallINTEL
        | Op::AtomicFMinEXT
        | Op::AtomicFMaxEXT
        | Op::ExpectKHR
        | Op::VmeImageINTEL
        | Op::SubgroupAvcMceGetDefaultInterBaseMultiReferencePenaltyINTEL
        | Op::SubgroupAvcMceSetInterBaseMultiReferencePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultInterShapePenaltyINTEL
        | Op::SubgroupAvcMceSetInterShapePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultInterDirectionPenaltyINTEL
        | Op::SubgroupAvcMceSetInterDirectionPenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultIntraLumaShapePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultInterMotionVectorCostTableINTEL
        | Op::SubgroupAvcMceGetDefaultHighPenaltyCostTableINTEL
        | Op::SubgroupAvcMceGetDefaultMediumPenaltyCostTableINTEL
        | Op::SubgroupAvcMceGetDefaultLowPenaltyCostTableINTEL
        | Op::SubgroupAvcMceSetMotionVectorCostFunctionINTEL
        | Op::SubgroupAvcMceGetDefaultIntraLumaModePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultNonDcLumaIntraPenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultIntraChromaModeBasePenaltyINTEL
        | Op::SubgroupAvcMceSetAcOnlyHaarINTEL
        | Op::SubgroupAvcMceSetSourceInterlacedFieldPolarityINTEL
        | Op::SubgroupAvcMceSetSingleReferenceInterlacedFieldPolarityINTEL
        | Op::SubgroupAvcMceSetDualReferenceInterlacedFieldPolaritiesINTEL
        | Op::SubgroupAvcMceConvertToImePayloadINTEL
        | Op::SubgroupAvcMceConvertToImeResultINTEL
        | Op::SubgroupAvcMceConvertToRefPayloadINTEL
        | Op::SubgroupAvcMceConvertToRefResultINTEL
        | Op::SubgroupAvcMceConvertToSicPayloadINTEL
        | Op::SubgroupAvcMceConvertToSicResultINTEL
        | Op::SubgroupAvcMceGetMotionVectorsINTEL
        | Op::SubgroupAvcMceGetInterDistortionsINTEL
        | Op::SubgroupAvcMceGetBestInterDistortionsINTEL
        | Op::SubgroupAvcMceGetInterMajorShapeINTEL
        | Op::SubgroupAvcMceGetInterMinorShapeINTEL
        | Op::SubgroupAvcMceGetInterDirectionsINTEL
        | Op::SubgroupAvcMceGetInterMotionVectorCountINTEL
        | Op::SubgroupAvcMceGetInterReferenceIdsINTEL
        | Op::SubgroupAvcMceGetInterReferenceInterlacedFieldPolaritiesINTEL
        | Op::SubgroupAvcImeInitializeINTEL
        | Op::SubgroupAvcImeSetSingleReferenceINTEL
        | Op::SubgroupAvcImeSetDualReferenceINTEL
        | Op::SubgroupAvcImeRefWindowSizeINTEL
        | Op::SubgroupAvcImeAdjustRefOffsetINTEL
        | Op::SubgroupAvcImeConvertToMcePayloadINTEL
        | Op::SubgroupAvcImeSetMaxMotionVectorCountINTEL
        | Op::SubgroupAvcImeSetUnidirectionalMixDisableINTEL
        | Op::SubgroupAvcImeSetEarlySearchTerminationThresholdINTEL
        | Op::SubgroupAvcImeSetWeightedSadINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceStreaminINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceStreaminINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceStreamoutINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceStreamoutINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceStreaminoutINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceStreaminoutINTEL
        | Op::SubgroupAvcImeConvertToMceResultINTEL
        | Op::SubgroupAvcImeGetSingleReferenceStreaminINTEL
        | Op::SubgroupAvcImeGetDualReferenceStreaminINTEL
        | Op::SubgroupAvcImeStripSingleReferenceStreamoutINTEL
        | Op::SubgroupAvcImeStripDualReferenceStreamoutINTEL
        | Op::SubgroupAvcImeGetStreamoutSingleReferenceMajorShapeMotionVectorsINTEL
        | Op::SubgroupAvcImeGetStreamoutSingleReferenceMajorShapeDistortionsINTEL
        | Op::SubgroupAvcImeGetStreamoutSingleReferenceMajorShapeReferenceIdsINTEL
        | Op::SubgroupAvcImeGetStreamoutDualReferenceMajorShapeMotionVectorsINTEL
        | Op::SubgroupAvcImeGetStreamoutDualReferenceMajorShapeDistortionsINTEL
        | Op::SubgroupAvcImeGetStreamoutDualReferenceMajorShapeReferenceIdsINTEL
        | Op::SubgroupAvcImeGetBorderReachedINTEL
        | Op::SubgroupAvcImeGetTruncatedSearchIndicationINTEL
        | Op::SubgroupAvcImeGetUnidirectionalEarlySearchTerminationINTEL
        | Op::SubgroupAvcImeGetWeightingPatternMinimumMotionVectorINTEL
        | Op::SubgroupAvcImeGetWeightingPatternMinimumDistortionINTEL
        | Op::SubgroupAvcFmeInitializeINTEL
        | Op::SubgroupAvcBmeInitializeINTEL
        | Op::SubgroupAvcRefConvertToMcePayloadINTEL
        | Op::SubgroupAvcRefSetBidirectionalMixDisableINTEL
        | Op::SubgroupAvcRefSetBilinearFilterEnableINTEL
        | Op::SubgroupAvcRefEvaluateWithSingleReferenceINTEL
        | Op::SubgroupAvcRefEvaluateWithDualReferenceINTEL
        | Op::SubgroupAvcRefEvaluateWithMultiReferenceINTEL
        | Op::SubgroupAvcRefEvaluateWithMultiReferenceInterlacedINTEL
        | Op::SubgroupAvcRefConvertToMceResultINTEL
        | Op::SubgroupAvcSicInitializeINTEL
        | Op::SubgroupAvcSicConfigureSkcINTEL
        | Op::SubgroupAvcSicConfigureIpeLumaINTEL
        | Op::SubgroupAvcSicConfigureIpeLumaChromaINTEL
        | Op::SubgroupAvcSicGetMotionVectorMaskINTEL
        | Op::SubgroupAvcSicConvertToMcePayloadINTEL
        | Op::SubgroupAvcSicSetIntraLumaShapePenaltyINTEL
        | Op::SubgroupAvcSicSetIntraLumaModeCostFunctionINTEL
        | Op::SubgroupAvcSicSetIntraChromaModeCostFunctionINTEL
        | Op::SubgroupAvcSicSetBilinearFilterEnableINTEL
        | Op::SubgroupAvcSicSetSkcForwardTransformEnableINTEL
        | Op::SubgroupAvcSicSetBlockBasedRawSkipSadINTEL
        | Op::SubgroupAvcSicEvaluateIpeINTEL
        | Op::SubgroupAvcSicEvaluateWithSingleReferenceINTEL
        | Op::SubgroupAvcSicEvaluateWithDualReferenceINTEL
        | Op::SubgroupAvcSicEvaluateWithMultiReferenceINTEL
        | Op::SubgroupAvcSicEvaluateWithMultiReferenceInterlacedINTEL
        | Op::SubgroupAvcSicConvertToMceResultINTEL
        | Op::SubgroupAvcSicGetIpeLumaShapeINTEL
        | Op::SubgroupAvcSicGetBestIpeLumaDistortionINTEL
        | Op::SubgroupAvcSicGetBestIpeChromaDistortionINTEL
        | Op::SubgroupAvcSicGetPackedIpeLumaModesINTEL
        | Op::SubgroupAvcSicGetIpeChromaModeINTEL
        | Op::SubgroupAvcSicGetPackedSkcLumaCountThresholdINTEL
        | Op::SubgroupAvcSicGetPackedSkcLumaSumThresholdINTEL
        | Op::SubgroupAvcSicGetInterRawSadsINTEL
        | Op::VariableLengthArrayINTEL
        | Op::SaveMemoryINTEL
        | Op::ArbitraryFloatSinCosPiINTEL
        | Op::ArbitraryFloatCastINTEL
        | Op::ArbitraryFloatCastFromIntINTEL
        | Op::ArbitraryFloatCastToIntINTEL
        | Op::ArbitraryFloatAddINTEL
        | Op::ArbitraryFloatSubINTEL
        | Op::ArbitraryFloatMulINTEL
        | Op::ArbitraryFloatDivINTEL
        | Op::ArbitraryFloatGTINTEL
        | Op::ArbitraryFloatGEINTEL
        | Op::ArbitraryFloatLTINTEL
        | Op::ArbitraryFloatLEINTEL
        | Op::ArbitraryFloatEQINTEL
        | Op::ArbitraryFloatRecipINTEL
        | Op::ArbitraryFloatRSqrtINTEL
        | Op::ArbitraryFloatCbrtINTEL
        | Op::ArbitraryFloatHypotINTEL
        | Op::ArbitraryFloatSqrtINTEL
        | Op::ArbitraryFloatLogINTEL
        | Op::ArbitraryFloatLog2INTEL
        | Op::ArbitraryFloatLog10INTEL
        | Op::ArbitraryFloatLog1pINTEL
        | Op::ArbitraryFloatExpINTEL
        | Op::ArbitraryFloatExp2INTEL
        | Op::ArbitraryFloatExp10INTEL
        | Op::ArbitraryFloatExpm1INTEL
        | Op::ArbitraryFloatSinINTEL
        | Op::ArbitraryFloatCosINTEL
        | Op::ArbitraryFloatSinCosINTEL
        | Op::ArbitraryFloatSinPiINTEL
        | Op::ArbitraryFloatCosPiINTEL
        | Op::ArbitraryFloatASinINTEL
        | Op::ArbitraryFloatASinPiINTEL
        | Op::ArbitraryFloatACosINTEL
        | Op::ArbitraryFloatACosPiINTEL
        | Op::ArbitraryFloatATanINTEL
        | Op::ArbitraryFloatATanPiINTEL
        | Op::ArbitraryFloatATan2INTEL
        | Op::ArbitraryFloatPowINTEL
        | Op::ArbitraryFloatPowRINTEL
        | Op::ArbitraryFloatPowNINTEL
        | Op::FixedSqrtINTEL
        | Op::FixedRecipINTEL
        | Op::FixedRsqrtINTEL
        | Op::FixedSinINTEL
        | Op::FixedCosINTEL
        | Op::FixedSinCosINTEL
        | Op::FixedSinPiINTEL
        | Op::FixedCosPiINTEL
        | Op::FixedSinCosPiINTEL
        | Op::FixedLogINTEL
        | Op::FixedExpINTEL
        | Op::PtrCastToCrossWorkgroupINTEL
        | Op::CrossWorkgroupCastToPtrINTEL
        | Op::ReadPipeBlockingINTEL
        | Op::WritePipeBlockingINTEL
        | Op::FPGARegINTEL
        | Op::RayQueryGetRayTMinKHR
        | Op::RayQueryGetRayFlagsKHR
        | Op::RayQueryGetIntersectionTKHR
        | Op::RayQueryGetIntersectionInstanceCustomIndexKHR
        | Op::RayQueryGetIntersectionInstanceIdKHR
        | Op::RayQueryGetIntersectionInstanceShaderBindingTableRecordOffsetKHR
        | Op::RayQueryGetIntersectionGeometryIndexKHR
        | Op::RayQueryGetIntersectionPrimitiveIndexKHR
        | Op::RayQueryGetIntersectionBarycentricsKHR
        | Op::RayQueryGetIntersectionFrontFaceKHR
        | Op::RayQueryGetIntersectionCandidateAABBOpaqueKHR
        | Op::RayQueryGetIntersectionObjectRayDirectionKHR
        | Op::RayQueryGetIntersectionObjectRayOriginKHR
        | Op::RayQueryGetWorldRayDirectionKHR
        | Op::RayQueryGetWorldRayOriginKHR
        | Op::RayQueryGetIntersectionObjectToWorldKHR
        | Op::RayQueryGetIntersectionWorldToObjectKHR
        | Op::AtomicFAddEXT
        | Op::ConvertFToBF16INTEL
        | Op::ConvertBF16ToFINTEL
        | Op::GroupIMulKHR
        | Op::GroupFMulKHR
        | Op::GroupBitwiseAndKHR
        | Op::GroupBitwiseOrKHR
        | Op::GroupBitwiseXorKHR
        | Op::GroupLogicalAndKHR
        | Op::GroupLogicalOrKHR
        | Op::GroupLogicalXorKHR => (true, true),
    }
}

/// Returns the smallest word count an instruction with this opcode can have and still be read
/// at the fixed word positions the analysis uses.
pub(crate) fn min_word_count(op: Op) -> u16 {
    let (has_result, has_type) = has_result_and_type(op);
    let base = 1 + has_result as u16 + has_type as u16;

    let fixed = match op {
        Op::Name | Op::String | Op::ExtInstImport | Op::TypeRuntimeArray => 3,
        Op::MemberName | Op::Line | Op::EntryPoint => 4,
        Op::ExecutionMode | Op::ExecutionModeId => 3,
        Op::Decorate | Op::DecorateId | Op::DecorateString => 3,
        Op::MemberDecorate | Op::MemberDecorateString => 4,
        Op::GroupDecorate | Op::GroupMemberDecorate => 2,
        Op::TypeInt | Op::TypeVector | Op::TypeMatrix | Op::TypeArray | Op::TypePointer => 4,
        Op::TypeFloat | Op::TypeSampledImage => 3,
        Op::TypeImage => 9,
        Op::TypeFunction => 3,
        Op::TypeCooperativeMatrixKHR => 7,
        Op::TypeCooperativeMatrixNV => 6,
        Op::Constant | Op::SpecConstant => 4,
        Op::Variable => 4,
        Op::Function => 5,
        Op::FunctionCall => 4,
        Op::Load | Op::CopyObject | Op::CopyLogical | Op::Image => 4,
        Op::Store | Op::CopyMemory => 3,
        Op::AccessChain
        | Op::InBoundsAccessChain
        | Op::PtrAccessChain
        | Op::InBoundsPtrAccessChain => 4,
        Op::SampledImage => 5,
        Op::ImageTexelPointer => 6,
        Op::ImageWrite => 4,
        Op::ExtInst => 5,
        Op::AtomicLoad => 6,
        Op::AtomicStore => 5,
        Op::AtomicFlagClear => 4,
        Op::ControlBarrier => 4,
        Op::MemoryBarrier => 3,
        Op::BranchConditional => 4,
        Op::RayQueryInitializeKHR => 9,
        _ if is_atomic_instruction(op) => 6,
        _ if image_operand_position(op).is_some() => 4,
        _ => 0,
    };

    base.max(fixed)
}

/// Returns the word position of the image (or sampled image, or image pointer) operand of an
/// instruction that accesses an image.
pub fn image_operand_position(op: Op) -> Option<usize> {
    match op {
        Op::ImageWrite => Some(1),
        Op::ImageSampleImplicitLod
        | Op::ImageSampleExplicitLod
        | Op::ImageSampleDrefImplicitLod
        | Op::ImageSampleDrefExplicitLod
        | Op::ImageSampleProjImplicitLod
        | Op::ImageSampleProjExplicitLod
        | Op::ImageSampleProjDrefImplicitLod
        | Op::ImageSampleProjDrefExplicitLod
        | Op::ImageFetch
        | Op::ImageGather
        | Op::ImageDrefGather
        | Op::ImageRead
        | Op::ImageQueryFormat
        | Op::ImageQueryOrder
        | Op::ImageQuerySizeLod
        | Op::ImageQuerySize
        | Op::ImageQueryLod
        | Op::ImageQueryLevels
        | Op::ImageQuerySamples
        | Op::ImageSparseSampleImplicitLod
        | Op::ImageSparseSampleExplicitLod
        | Op::ImageSparseSampleDrefImplicitLod
        | Op::ImageSparseSampleDrefExplicitLod
        | Op::ImageSparseFetch
        | Op::ImageSparseGather
        | Op::ImageSparseDrefGather
        | Op::ImageSparseRead
        | Op::ImageSampleFootprintNV
        | Op::ImageTexelPointer => Some(3),
        _ => None,
    }
}

/// Returns the word position of the optional `Image Operands` mask.
pub fn image_operands_position(op: Op) -> Option<usize> {
    match op {
        Op::ImageWrite => Some(4),
        Op::ImageSampleImplicitLod
        | Op::ImageSampleExplicitLod
        | Op::ImageSampleProjImplicitLod
        | Op::ImageSampleProjExplicitLod
        | Op::ImageFetch
        | Op::ImageRead
        | Op::ImageSparseSampleImplicitLod
        | Op::ImageSparseSampleExplicitLod
        | Op::ImageSparseFetch
        | Op::ImageSparseRead => Some(5),
        Op::ImageSampleDrefImplicitLod
        | Op::ImageSampleDrefExplicitLod
        | Op::ImageSampleProjDrefImplicitLod
        | Op::ImageSampleProjDrefExplicitLod
        | Op::ImageGather
        | Op::ImageDrefGather
        | Op::ImageSparseSampleDrefImplicitLod
        | Op::ImageSparseSampleDrefExplicitLod
        | Op::ImageSparseGather
        | Op::ImageSparseDrefGather => Some(6),
        Op::ImageSampleFootprintNV => Some(7),
        _ => None,
    }
}

/// Returns the word position of the memory `Scope` operand.
pub fn memory_scope_position(op: Op) -> Option<usize> {
    match op {
        Op::MemoryBarrier => Some(1),
        Op::AtomicStore | Op::AtomicFlagClear | Op::ControlBarrier => Some(2),
        _ if is_atomic_instruction(op) => Some(4),
        _ => None,
    }
}

/// Returns whether the opcode is an atomic memory operation.
pub fn is_atomic_instruction(op: Op) -> bool {
    matches!(
        op,
        Op::AtomicLoad
            | Op::AtomicStore
            | Op::AtomicExchange
            | Op::AtomicCompareExchange
            | Op::AtomicCompareExchangeWeak
            | Op::AtomicIIncrement
            | Op::AtomicIDecrement
            | Op::AtomicIAdd
            | Op::AtomicISub
            | Op::AtomicSMin
            | Op::AtomicUMin
            | Op::AtomicSMax
            | Op::AtomicUMax
            | Op::AtomicAnd
            | Op::AtomicOr
            | Op::AtomicXor
            | Op::AtomicFlagTestAndSet
            | Op::AtomicFlagClear
            | Op::AtomicFMinEXT
            | Op::AtomicFMaxEXT
            | Op::AtomicFAddEXT
    )
}

/// Returns whether the opcode operates on cooperative matrices.
pub fn is_cooperative_matrix_instruction(op: Op) -> bool {
    matches!(
        op,
        Op::CooperativeMatrixLoadKHR
            | Op::CooperativeMatrixStoreKHR
            | Op::CooperativeMatrixMulAddKHR
            | Op::CooperativeMatrixLengthKHR
            | Op::CooperativeMatrixLoadNV
            | Op::CooperativeMatrixStoreNV
            | Op::CooperativeMatrixMulAddNV
            | Op::CooperativeMatrixLengthNV
    )
}

/// Returns whether the opcode computes a pointer from a base pointer and indices.
pub fn is_access_chain(op: Op) -> bool {
    matches!(
        op,
        Op::AccessChain | Op::InBoundsAccessChain | Op::PtrAccessChain | Op::InBoundsPtrAccessChain
    )
}

/// Returns whether the opcode declares a constant or a specialization constant.
pub fn is_constant_instruction(op: Op) -> bool {
    matches!(
        op,
        Op::ConstantTrue
            | Op::ConstantFalse
            | Op::Constant
            | Op::ConstantComposite
            | Op::ConstantSampler
            | Op::ConstantNull
            | Op::SpecConstantTrue
            | Op::SpecConstantFalse
            | Op::SpecConstant
            | Op::SpecConstantComposite
            | Op::SpecConstantOp
    )
}

/// Returns whether the opcode declares a type.
pub fn is_type_instruction(op: Op) -> bool {
    matches!(
        op,
        Op::TypeVoid
            | Op::TypeBool
            | Op::TypeInt
            | Op::TypeFloat
            | Op::TypeVector
            | Op::TypeMatrix
            | Op::TypeImage
            | Op::TypeSampler
            | Op::TypeSampledImage
            | Op::TypeArray
            | Op::TypeRuntimeArray
            | Op::TypeStruct
            | Op::TypeOpaque
            | Op::TypePointer
            | Op::TypeFunction
            | Op::TypeEvent
            | Op::TypeDeviceEvent
            | Op::TypeReserveId
            | Op::TypeQueue
            | Op::TypePipe
            | Op::TypePipeStorage
            | Op::TypeNamedBarrier
            | Op::TypeAccelerationStructureKHR
            | Op::TypeRayQueryKHR
            | Op::TypeCooperativeMatrixKHR
            | Op::TypeCooperativeMatrixNV
    )
}

/// Returns whether the opcode ends a basic block.
pub fn is_block_terminator(op: Op) -> bool {
    matches!(
        op,
        Op::Branch
            | Op::BranchConditional
            | Op::Switch
            | Op::Kill
            | Op::Return
            | Op::ReturnValue
            | Op::Unreachable
            | Op::TerminateInvocation
            | Op::IgnoreIntersectionKHR
            | Op::TerminateRayKHR
            | Op::EmitMeshTasksEXT
    )
}

/// Which operands of an instruction, counted after the result type and result id, are ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IdOperands {
    /// No operand is an id.
    None,
    /// Every operand is an id.
    All,
    /// The first `n` operands are ids, the rest are literals.
    Leading(usize),
    /// The first `n` operands are literals, the rest are ids.
    Trailing(usize),
    /// Every operand is an id except the one at index `n`.
    Except(usize),
    /// Only the operands at these indices are ids.
    Positions(&'static [usize]),
    /// The first `n` operands are ids, followed by an optional image operands mask and the ids it
    /// introduces.
    Image(usize),
    /// The first `n` operands are ids, followed by pairs of an id and a literal.
    IdLiteralPairs(usize),
    /// `OpExtInst`: a set id, a literal instruction number, then ids.
    ExtInst,
    /// `OpSwitch`: a selector id, a default label id, then pairs of literal and label id.
    Switch,
    /// `OpEntryPoint`: an execution model, the function id, a name string, then interface ids.
    EntryPoint,
}

impl IdOperands {
    /// Returns whether the operand at `index` (counted after the result type and result id) is
    /// an id.
    pub(crate) fn is_id(self, operands: &[u32], index: usize) -> bool {
        match self {
            IdOperands::None => false,
            IdOperands::All => true,
            IdOperands::Leading(n) => index < n,
            IdOperands::Trailing(n) => index >= n,
            IdOperands::Except(n) => index != n,
            IdOperands::Positions(positions) => positions.contains(&index),
            IdOperands::Image(n) => index < n || (index > n && operands.len() > n),
            IdOperands::IdLiteralPairs(n) => index < n || (index - n) % 2 == 0,
            IdOperands::ExtInst => index != 1,
            IdOperands::Switch => index < 2 || (index - 2) % 2 == 1,
            IdOperands::EntryPoint => {
                let name_len = operands
                    .get(2..)
                    .map_or(0, |words| binary::decode_string(words).1);
                index == 1 || index >= 2 + name_len
            }
        }
    }
}

/// Returns which operands of an instruction with this opcode are ids.
///
/// Like [`has_result_and_type`], this lists every opcode. Operands that follow an enumerant and
/// depend on its value (such as the parameters of a decoration or a memory access mask) are
/// classified by the shape they most commonly take.
pub(crate) fn id_operands(op: Op) -> IdOperands {
    match op {
        Op::Nop
        | Op::Undef
        | Op::SourceContinued
        | Op::Source
        | Op::SourceExtension
        | Op::String
        | Op::Extension
        | Op::ExtInstImport
        | Op::MemoryModel
        | Op::Capability
        | Op::TypeVoid
        | Op::TypeBool
        | Op::TypeInt
        | Op::TypeFloat
        | Op::TypeSampler
        | Op::TypeOpaque
        | Op::TypeEvent
        | Op::TypeDeviceEvent
        | Op::TypeReserveId
        | Op::TypeQueue
        | Op::TypePipe
        | Op::ConstantTrue
        | Op::ConstantFalse
        | Op::Constant
        | Op::ConstantSampler
        | Op::ConstantNull
        | Op::SpecConstantTrue
        | Op::SpecConstantFalse
        | Op::SpecConstant
        | Op::FunctionParameter
        | Op::FunctionEnd
        | Op::DecorationGroup
        | Op::EmitVertex
        | Op::EndPrimitive
        | Op::Label
        | Op::Kill
        | Op::Return
        | Op::Unreachable
        | Op::NoLine
        | Op::TypePipeStorage
        | Op::ConstantPipeStorage
        | Op::TypeNamedBarrier
        | Op::ModuleProcessed
        | Op::TerminateInvocation
        | Op::IgnoreIntersectionKHR
        | Op::TerminateRayKHR
        | Op::TypeRayQueryKHR
        | Op::TypeHitObjectNV
        | Op::IgnoreIntersectionNV
        | Op::TerminateRayNV
        | Op::TypeAccelerationStructureKHR
        | Op::BeginInvocationInterlockEXT
        | Op::EndInvocationInterlockEXT
        | Op::DemoteToHelperInvocation
        | Op::IsHelperInvocationEXT
        | Op::SamplerImageAddressingModeNV
        | Op::AsmTargetINTEL
        | Op::TypeAvcImePayloadINTEL
        | Op::TypeAvcRefPayloadINTEL
        | Op::TypeAvcSicPayloadINTEL
        | Op::TypeAvcMcePayloadINTEL
        | Op::TypeAvcMceResultINTEL
        | Op::TypeAvcImeResultINTEL
        | Op::TypeAvcImeResultSingleReferenceStreamoutINTEL
        | Op::TypeAvcImeResultDualReferenceStreamoutINTEL
        | Op::TypeAvcImeSingleReferenceStreaminINTEL
        | Op::TypeAvcImeDualReferenceStreaminINTEL
        | Op::TypeAvcRefResultINTEL
        | Op::TypeAvcSicResultINTEL
        | Op::SaveMemoryINTEL
        | Op::LoopControlINTEL
        | Op::TypeBufferSurfaceINTEL => IdOperands::None,

        Op::Name
        | Op::MemberName
        | Op::Line
        | Op::ExecutionMode
        | Op::TypeVector
        | Op::TypeMatrix
        | Op::TypeImage
        | Op::TypeForwardPointer
        | Op::Load
        | Op::ArrayLength
        | Op::Decorate
        | Op::MemberDecorate
        | Op::CompositeExtract
        | Op::GenericCastToPtrExplicit
        | Op::SelectionMerge
        | Op::LifetimeStart
        | Op::LifetimeStop
        | Op::DecorateString
        | Op::MemberDecorateString
        | Op::ArbitraryFloatSinCosPiINTEL
        | Op::ArbitraryFloatCastINTEL
        | Op::ArbitraryFloatCastFromIntINTEL
        | Op::ArbitraryFloatCastToIntINTEL
        | Op::ArbitraryFloatRecipINTEL
        | Op::ArbitraryFloatRSqrtINTEL
        | Op::ArbitraryFloatCbrtINTEL
        | Op::ArbitraryFloatSqrtINTEL
        | Op::ArbitraryFloatLogINTEL
        | Op::ArbitraryFloatLog2INTEL
        | Op::ArbitraryFloatLog10INTEL
        | Op::ArbitraryFloatLog1pINTEL
        | Op::ArbitraryFloatExpINTEL
        | Op::ArbitraryFloatExp2INTEL
        | Op::ArbitraryFloatExp10INTEL
        | Op::ArbitraryFloatExpm1INTEL
        | Op::ArbitraryFloatSinINTEL
        | Op::ArbitraryFloatCosINTEL
        | Op::ArbitraryFloatSinCosINTEL
        | Op::ArbitraryFloatSinPiINTEL
        | Op::ArbitraryFloatCosPiINTEL
        | Op::ArbitraryFloatASinINTEL
        | Op::ArbitraryFloatASinPiINTEL
        | Op::ArbitraryFloatACosINTEL
        | Op::ArbitraryFloatACosPiINTEL
        | Op::ArbitraryFloatATanINTEL
        | Op::ArbitraryFloatATanPiINTEL => IdOperands::Leading(1),

        Op::Store
        | Op::CopyMemory
        | Op::VectorShuffle
        | Op::CompositeInsert
        | Op::LoopMerge
        | Op::SDot
        | Op::UDot
        | Op::SUDot
        | Op::AsmINTEL
        | Op::FixedSqrtINTEL
        | Op::FixedRecipINTEL
        | Op::FixedRsqrtINTEL
        | Op::FixedSinINTEL
        | Op::FixedCosINTEL
        | Op::FixedSinCosINTEL
        | Op::FixedSinPiINTEL
        | Op::FixedCosPiINTEL
        | Op::FixedSinCosPiINTEL
        | Op::FixedLogINTEL
        | Op::FixedExpINTEL => IdOperands::Leading(2),

        Op::CopyMemorySized
        | Op::BranchConditional
        | Op::SDotAccSat
        | Op::UDotAccSat
        | Op::SUDotAccSat
        | Op::CooperativeMatrixLoadKHR
        | Op::CooperativeMatrixMulAddKHR
        | Op::CooperativeMatrixLoadNV => IdOperands::Leading(3),

        Op::CooperativeMatrixStoreKHR
        | Op::CooperativeMatrixStoreNV => IdOperands::Leading(4),

        Op::GroupIAdd
        | Op::GroupFAdd
        | Op::GroupFMin
        | Op::GroupUMin
        | Op::GroupSMin
        | Op::GroupFMax
        | Op::GroupUMax
        | Op::GroupSMax
        | Op::ExecutionModeId
        | Op::DecorateId
        | Op::GroupNonUniformBallotBitCount
        | Op::GroupNonUniformIAdd
        | Op::GroupNonUniformFAdd
        | Op::GroupNonUniformIMul
        | Op::GroupNonUniformFMul
        | Op::GroupNonUniformSMin
        | Op::GroupNonUniformUMin
        | Op::GroupNonUniformFMin
        | Op::GroupNonUniformSMax
        | Op::GroupNonUniformUMax
        | Op::GroupNonUniformFMax
        | Op::GroupNonUniformBitwiseAnd
        | Op::GroupNonUniformBitwiseOr
        | Op::GroupNonUniformBitwiseXor
        | Op::GroupNonUniformLogicalAnd
        | Op::GroupNonUniformLogicalOr
        | Op::GroupNonUniformLogicalXor
        | Op::GroupIAddNonUniformAMD
        | Op::GroupFAddNonUniformAMD
        | Op::GroupFMinNonUniformAMD
        | Op::GroupUMinNonUniformAMD
        | Op::GroupSMinNonUniformAMD
        | Op::GroupFMaxNonUniformAMD
        | Op::GroupUMaxNonUniformAMD
        | Op::GroupSMaxNonUniformAMD
        | Op::GroupIMulKHR
        | Op::GroupFMulKHR
        | Op::GroupBitwiseAndKHR
        | Op::GroupBitwiseOrKHR
        | Op::GroupBitwiseXorKHR
        | Op::GroupLogicalAndKHR
        | Op::GroupLogicalOrKHR
        | Op::GroupLogicalXorKHR => IdOperands::Except(1),

        Op::TypePointer
        | Op::SpecConstantOp
        | Op::Function
        | Op::Variable => IdOperands::Trailing(1),

        Op::ImageSampleImplicitLod
        | Op::ImageSampleExplicitLod
        | Op::ImageSampleProjImplicitLod
        | Op::ImageSampleProjExplicitLod
        | Op::ImageFetch
        | Op::ImageRead
        | Op::ImageSparseSampleImplicitLod
        | Op::ImageSparseSampleExplicitLod
        | Op::ImageSparseSampleProjImplicitLod
        | Op::ImageSparseSampleProjExplicitLod
        | Op::ImageSparseFetch
        | Op::ImageSparseRead => IdOperands::Image(2),

        Op::ImageSampleDrefImplicitLod
        | Op::ImageSampleDrefExplicitLod
        | Op::ImageSampleProjDrefImplicitLod
        | Op::ImageSampleProjDrefExplicitLod
        | Op::ImageGather
        | Op::ImageDrefGather
        | Op::ImageWrite
        | Op::ImageSparseSampleDrefImplicitLod
        | Op::ImageSparseSampleDrefExplicitLod
        | Op::ImageSparseSampleProjDrefImplicitLod
        | Op::ImageSparseSampleProjDrefExplicitLod
        | Op::ImageSparseGather
        | Op::ImageSparseDrefGather => IdOperands::Image(3),

        Op::ImageSampleFootprintNV => IdOperands::Image(4),

        Op::ExtInst => IdOperands::ExtInst,

        Op::Switch => IdOperands::Switch,

        Op::GroupMemberDecorate => IdOperands::IdLiteralPairs(1),

        Op::EntryPoint => IdOperands::EntryPoint,

        Op::ArbitraryFloatAddINTEL
        | Op::ArbitraryFloatSubINTEL
        | Op::ArbitraryFloatMulINTEL
        | Op::ArbitraryFloatDivINTEL
        | Op::ArbitraryFloatGTINTEL
        | Op::ArbitraryFloatGEINTEL
        | Op::ArbitraryFloatLTINTEL
        | Op::ArbitraryFloatLEINTEL
        | Op::ArbitraryFloatEQINTEL
        | Op::ArbitraryFloatHypotINTEL
        | Op::ArbitraryFloatATan2INTEL
        | Op::ArbitraryFloatPowINTEL
        | Op::ArbitraryFloatPowRINTEL
        | Op::ArbitraryFloatPowNINTEL => IdOperands::Positions(&[0, 2]),

        Op::TypeSampledImage
        | Op::TypeArray
        | Op::TypeRuntimeArray
        | Op::TypeStruct
        | Op::TypeFunction
        | Op::ConstantComposite
        | Op::SpecConstantComposite
        | Op::FunctionCall
        | Op::ImageTexelPointer
        | Op::AccessChain
        | Op::InBoundsAccessChain
        | Op::PtrAccessChain
        | Op::GenericPtrMemSemantics
        | Op::InBoundsPtrAccessChain
        | Op::GroupDecorate
        | Op::VectorExtractDynamic
        | Op::VectorInsertDynamic
        | Op::CompositeConstruct
        | Op::CopyObject
        | Op::Transpose
        | Op::SampledImage
        | Op::Image
        | Op::ImageQueryFormat
        | Op::ImageQueryOrder
        | Op::ImageQuerySizeLod
        | Op::ImageQuerySize
        | Op::ImageQueryLod
        | Op::ImageQueryLevels
        | Op::ImageQuerySamples
        | Op::ConvertFToU
        | Op::ConvertFToS
        | Op::ConvertSToF
        | Op::ConvertUToF
        | Op::UConvert
        | Op::SConvert
        | Op::FConvert
        | Op::QuantizeToF16
        | Op::ConvertPtrToU
        | Op::SatConvertSToU
        | Op::SatConvertUToS
        | Op::ConvertUToPtr
        | Op::PtrCastToGeneric
        | Op::GenericCastToPtr
        | Op::Bitcast
        | Op::SNegate
        | Op::FNegate
        | Op::IAdd
        | Op::FAdd
        | Op::ISub
        | Op::FSub
        | Op::IMul
        | Op::FMul
        | Op::UDiv
        | Op::SDiv
        | Op::FDiv
        | Op::UMod
        | Op::SRem
        | Op::SMod
        | Op::FRem
        | Op::FMod
        | Op::VectorTimesScalar
        | Op::MatrixTimesScalar
        | Op::VectorTimesMatrix
        | Op::MatrixTimesVector
        | Op::MatrixTimesMatrix
        | Op::OuterProduct
        | Op::Dot
        | Op::IAddCarry
        | Op::ISubBorrow
        | Op::UMulExtended
        | Op::SMulExtended
        | Op::Any
        | Op::All
        | Op::IsNan
        | Op::IsInf
        | Op::IsFinite
        | Op::IsNormal
        | Op::SignBitSet
        | Op::LessOrGreater
        | Op::Ordered
        | Op::Unordered
        | Op::LogicalEqual
        | Op::LogicalNotEqual
        | Op::LogicalOr
        | Op::LogicalAnd
        | Op::LogicalNot
        | Op::Select
        | Op::IEqual
        | Op::INotEqual
        | Op::UGreaterThan
        | Op::SGreaterThan
        | Op::UGreaterThanEqual
        | Op::SGreaterThanEqual
        | Op::ULessThan
        | Op::SLessThan
        | Op::ULessThanEqual
        | Op::SLessThanEqual
        | Op::FOrdEqual
        | Op::FUnordEqual
        | Op::FOrdNotEqual
        | Op::FUnordNotEqual
        | Op::FOrdLessThan
        | Op::FUnordLessThan
        | Op::FOrdGreaterThan
        | Op::FUnordGreaterThan
        | Op::FOrdLessThanEqual
        | Op::FUnordLessThanEqual
        | Op::FOrdGreaterThanEqual
        | Op::FUnordGreaterThanEqual
        | Op::ShiftRightLogical
        | Op::ShiftRightArithmetic
        | Op::ShiftLeftLogical
        | Op::BitwiseOr
        | Op::BitwiseXor
        | Op::BitwiseAnd
        | Op::Not
        | Op::BitFieldInsert
        | Op::BitFieldSExtract
        | Op::BitFieldUExtract
        | Op::BitReverse
        | Op::BitCount
        | Op::DPdx
        | Op::DPdy
        | Op::Fwidth
        | Op::DPdxFine
        | Op::DPdyFine
        | Op::FwidthFine
        | Op::DPdxCoarse
        | Op::DPdyCoarse
        | Op::FwidthCoarse
        | Op::EmitStreamVertex
        | Op::EndStreamPrimitive
        | Op::ControlBarrier
        | Op::MemoryBarrier
        | Op::AtomicLoad
        | Op::AtomicStore
        | Op::AtomicExchange
        | Op::AtomicCompareExchange
        | Op::AtomicCompareExchangeWeak
        | Op::AtomicIIncrement
        | Op::AtomicIDecrement
        | Op::AtomicIAdd
        | Op::AtomicISub
        | Op::AtomicSMin
        | Op::AtomicUMin
        | Op::AtomicSMax
        | Op::AtomicUMax
        | Op::AtomicAnd
        | Op::AtomicOr
        | Op::AtomicXor
        | Op::Phi
        | Op::Branch
        | Op::ReturnValue
        | Op::GroupAsyncCopy
        | Op::GroupWaitEvents
        | Op::GroupAll
        | Op::GroupAny
        | Op::GroupBroadcast
        | Op::ReadPipe
        | Op::WritePipe
        | Op::ReservedReadPipe
        | Op::ReservedWritePipe
        | Op::ReserveReadPipePackets
        | Op::ReserveWritePipePackets
        | Op::CommitReadPipe
        | Op::CommitWritePipe
        | Op::IsValidReserveId
        | Op::GetNumPipePackets
        | Op::GetMaxPipePackets
        | Op::GroupReserveReadPipePackets
        | Op::GroupReserveWritePipePackets
        | Op::GroupCommitReadPipe
        | Op::GroupCommitWritePipe
        | Op::EnqueueMarker
        | Op::EnqueueKernel
        | Op::GetKernelNDrangeSubGroupCount
        | Op::GetKernelNDrangeMaxSubGroupSize
        | Op::GetKernelWorkGroupSize
        | Op::GetKernelPreferredWorkGroupSizeMultiple
        | Op::RetainEvent
        | Op::ReleaseEvent
        | Op::CreateUserEvent
        | Op::IsValidEvent
        | Op::SetUserEventStatus
        | Op::CaptureEventProfilingInfo
        | Op::GetDefaultQueue
        | Op::BuildNDRange
        | Op::ImageSparseTexelsResident
        | Op::AtomicFlagTestAndSet
        | Op::AtomicFlagClear
        | Op::SizeOf
        | Op::CreatePipeFromPipeStorage
        | Op::GetKernelLocalSizeForSubgroupCount
        | Op::GetKernelMaxNumSubgroups
        | Op::NamedBarrierInitialize
        | Op::MemoryNamedBarrier
        | Op::GroupNonUniformElect
        | Op::GroupNonUniformAll
        | Op::GroupNonUniformAny
        | Op::GroupNonUniformAllEqual
        | Op::GroupNonUniformBroadcast
        | Op::GroupNonUniformBroadcastFirst
        | Op::GroupNonUniformBallot
        | Op::GroupNonUniformInverseBallot
        | Op::GroupNonUniformBallotBitExtract
        | Op::GroupNonUniformBallotFindLSB
        | Op::GroupNonUniformBallotFindMSB
        | Op::GroupNonUniformShuffle
        | Op::GroupNonUniformShuffleXor
        | Op::GroupNonUniformShuffleUp
        | Op::GroupNonUniformShuffleDown
        | Op::GroupNonUniformQuadBroadcast
        | Op::GroupNonUniformQuadSwap
        | Op::CopyLogical
        | Op::PtrEqual
        | Op::PtrNotEqual
        | Op::PtrDiff
        | Op::ColorAttachmentReadEXT
        | Op::DepthAttachmentReadEXT
        | Op::StencilAttachmentReadEXT
        | Op::SubgroupBallotKHR
        | Op::SubgroupFirstInvocationKHR
        | Op::SubgroupAllKHR
        | Op::SubgroupAnyKHR
        | Op::SubgroupAllEqualKHR
        | Op::GroupNonUniformRotateKHR
        | Op::SubgroupReadInvocationKHR
        | Op::TraceRayKHR
        | Op::ExecuteCallableKHR
        | Op::ConvertUToAccelerationStructureKHR
        | Op::TypeCooperativeMatrixKHR
        | Op::CooperativeMatrixLengthKHR
        | Op::RayQueryInitializeKHR
        | Op::RayQueryTerminateKHR
        | Op::RayQueryGenerateIntersectionKHR
        | Op::RayQueryConfirmIntersectionKHR
        | Op::RayQueryProceedKHR
        | Op::RayQueryGetIntersectionTypeKHR
        | Op::ImageSampleWeightedQCOM
        | Op::ImageBoxFilterQCOM
        | Op::ImageBlockMatchSSDQCOM
        | Op::ImageBlockMatchSADQCOM
        | Op::FragmentMaskFetchAMD
        | Op::FragmentFetchAMD
        | Op::ReadClockKHR
        | Op::FinalizeNodePayloadsAMDX
        | Op::FinishWritingNodePayloadAMDX
        | Op::InitializeNodePayloadsAMDX
        | Op::HitObjectRecordHitMotionNV
        | Op::HitObjectRecordHitWithIndexMotionNV
        | Op::HitObjectRecordMissMotionNV
        | Op::HitObjectGetWorldToObjectNV
        | Op::HitObjectGetObjectToWorldNV
        | Op::HitObjectGetObjectRayDirectionNV
        | Op::HitObjectGetObjectRayOriginNV
        | Op::HitObjectTraceRayMotionNV
        | Op::HitObjectGetShaderRecordBufferHandleNV
        | Op::HitObjectGetShaderBindingTableRecordIndexNV
        | Op::HitObjectRecordEmptyNV
        | Op::HitObjectTraceRayNV
        | Op::HitObjectRecordHitNV
        | Op::HitObjectRecordHitWithIndexNV
        | Op::HitObjectRecordMissNV
        | Op::HitObjectExecuteShaderNV
        | Op::HitObjectGetCurrentTimeNV
        | Op::HitObjectGetAttributesNV
        | Op::HitObjectGetHitKindNV
        | Op::HitObjectGetPrimitiveIndexNV
        | Op::HitObjectGetGeometryIndexNV
        | Op::HitObjectGetInstanceIdNV
        | Op::HitObjectGetInstanceCustomIndexNV
        | Op::HitObjectGetWorldRayDirectionNV
        | Op::HitObjectGetWorldRayOriginNV
        | Op::HitObjectGetRayTMaxNV
        | Op::HitObjectGetRayTMinNV
        | Op::HitObjectIsEmptyNV
        | Op::HitObjectIsHitNV
        | Op::HitObjectIsMissNV
        | Op::ReorderThreadWithHitObjectNV
        | Op::ReorderThreadWithHintNV
        | Op::EmitMeshTasksEXT
        | Op::SetMeshOutputsEXT
        | Op::GroupNonUniformPartitionNV
        | Op::WritePackedPrimitiveIndices4x8NV
        | Op::FetchMicroTriangleVertexPositionNV
        | Op::FetchMicroTriangleVertexBarycentricNV
        | Op::ReportIntersectionKHR
        | Op::TraceNV
        | Op::TraceMotionNV
        | Op::TraceRayMotionNV
        | Op::RayQueryGetIntersectionTriangleVertexPositionsKHR
        | Op::ExecuteCallableNV
        | Op::TypeCooperativeMatrixNV
        | Op::CooperativeMatrixMulAddNV
        | Op::CooperativeMatrixLengthNV
        | Op::ConvertUToImageNV
        | Op::ConvertUToSamplerNV
        | Op::ConvertImageToUNV
        | Op::ConvertSamplerToUNV
        | Op::ConvertUToSampledImageNV
        | Op::ConvertSampledImageToUNV
        | Op::SubgroupShuffleINTEL
        | Op::SubgroupShuffleDownINTEL
        | Op::SubgroupShuffleUpINTEL
        | Op::SubgroupShuffleXorINTEL
        | Op::SubgroupBlockReadINTEL
        | Op::SubgroupBlockWriteINTEL
        | Op::SubgroupImageBlockReadINTEL
        | Op::SubgroupImageBlockWriteINTEL
        | Op::SubgroupImageMediaBlockReadINTEL
        | Op::SubgroupImageMediaBlockWriteINTEL
        | Op::UCountLeadingZerosINTEL
        | Op::UCountTrailingZerosINTEL
        | Op::AbsISubINTEL
        | Op::AbsUSubINTEL
        | Op::IAddSatINTEL
        | Op::UAddSatINTEL
        | Op::IAverageINTEL
        | Op::UAverageINTEL
        | Op::IAverageRoundedINTEL
        | Op::UAverageRoundedINTEL
        | Op::ISubSatINTEL
        | Op::USubSatINTEL
        | Op::IMul32x16INTEL
        | Op::UMul32x16INTEL
        | Op::ConstantFunctionPointerINTEL
        | Op::FunctionPointerCallINTEL
        | Op::AsmCallINTEL
        | Op::AtomicFMinEXT
        | Op::AtomicFMaxEXT
        | Op::AssumeTrueKHR
        | Op::ExpectKHR
        | Op::VmeImageINTEL
        | Op::TypeVmeImageINTEL
        | Op::SubgroupAvcMceGetDefaultInterBaseMultiReferencePenaltyINTEL
        | Op::SubgroupAvcMceSetInterBaseMultiReferencePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultInterShapePenaltyINTEL
        | Op::SubgroupAvcMceSetInterShapePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultInterDirectionPenaltyINTEL
        | Op::SubgroupAvcMceSetInterDirectionPenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultIntraLumaShapePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultInterMotionVectorCostTableINTEL
        | Op::SubgroupAvcMceGetDefaultHighPenaltyCostTableINTEL
        | Op::SubgroupAvcMceGetDefaultMediumPenaltyCostTableINTEL
        | Op::SubgroupAvcMceGetDefaultLowPenaltyCostTableINTEL
        | Op::SubgroupAvcMceSetMotionVectorCostFunctionINTEL
        | Op::SubgroupAvcMceGetDefaultIntraLumaModePenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultNonDcLumaIntraPenaltyINTEL
        | Op::SubgroupAvcMceGetDefaultIntraChromaModeBasePenaltyINTEL
        | Op::SubgroupAvcMceSetAcOnlyHaarINTEL
        | Op::SubgroupAvcMceSetSourceInterlacedFieldPolarityINTEL
        | Op::SubgroupAvcMceSetSingleReferenceInterlacedFieldPolarityINTEL
        | Op::SubgroupAvcMceSetDualReferenceInterlacedFieldPolaritiesINTEL
        | Op::SubgroupAvcMceConvertToImePayloadINTEL
        | Op::SubgroupAvcMceConvertToImeResultINTEL
        | Op::SubgroupAvcMceConvertToRefPayloadINTEL
        | Op::SubgroupAvcMceConvertToRefResultINTEL
        | Op::SubgroupAvcMceConvertToSicPayloadINTEL
        | Op::SubgroupAvcMceConvertToSicResultINTEL
        | Op::SubgroupAvcMceGetMotionVectorsINTEL
        | Op::SubgroupAvcMceGetInterDistortionsINTEL
        | Op::SubgroupAvcMceGetBestInterDistortionsINTEL
        | Op::SubgroupAvcMceGetInterMajorShapeINTEL
        | Op::SubgroupAvcMceGetInterMinorShapeINTEL
        | Op::SubgroupAvcMceGetInterDirectionsINTEL
        | Op::SubgroupAvcMceGetInterMotionVectorCountINTEL
        | Op::SubgroupAvcMceGetInterReferenceIdsINTEL
        | Op::SubgroupAvcMceGetInterReferenceInterlacedFieldPolaritiesINTEL
        | Op::SubgroupAvcImeInitializeINTEL
        | Op::SubgroupAvcImeSetSingleReferenceINTEL
        | Op::SubgroupAvcImeSetDualReferenceINTEL
        | Op::SubgroupAvcImeRefWindowSizeINTEL
        | Op::SubgroupAvcImeAdjustRefOffsetINTEL
        | Op::SubgroupAvcImeConvertToMcePayloadINTEL
        | Op::SubgroupAvcImeSetMaxMotionVectorCountINTEL
        | Op::SubgroupAvcImeSetUnidirectionalMixDisableINTEL
        | Op::SubgroupAvcImeSetEarlySearchTerminationThresholdINTEL
        | Op::SubgroupAvcImeSetWeightedSadINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceStreaminINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceStreaminINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceStreamoutINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceStreamoutINTEL
        | Op::SubgroupAvcImeEvaluateWithSingleReferenceStreaminoutINTEL
        | Op::SubgroupAvcImeEvaluateWithDualReferenceStreaminoutINTEL
        | Op::SubgroupAvcImeConvertToMceResultINTEL
        | Op::SubgroupAvcImeGetSingleReferenceStreaminINTEL
        | Op::SubgroupAvcImeGetDualReferenceStreaminINTEL
        | Op::SubgroupAvcImeStripSingleReferenceStreamoutINTEL
        | Op::SubgroupAvcImeStripDualReferenceStreamoutINTEL
        | Op::SubgroupAvcImeGetStreamoutSingleReferenceMajorShapeMotionVectorsINTEL
        | Op::SubgroupAvcImeGetStreamoutSingleReferenceMajorShapeDistortionsINTEL
        | Op::SubgroupAvcImeGetStreamoutSingleReferenceMajorShapeReferenceIdsINTEL
        | Op::SubgroupAvcImeGetStreamoutDualReferenceMajorShapeMotionVectorsINTEL
        | Op::SubgroupAvcImeGetStreamoutDualReferenceMajorShapeDistortionsINTEL
        | Op::SubgroupAvcImeGetStreamoutDualReferenceMajorShapeReferenceIdsINTEL
        | Op::SubgroupAvcImeGetBorderReachedINTEL
        | Op::SubgroupAvcImeGetTruncatedSearchIndicationINTEL
        | Op::SubgroupAvcImeGetUnidirectionalEarlySearchTerminationINTEL
        | Op::SubgroupAvcImeGetWeightingPatternMinimumMotionVectorINTEL
        | Op::SubgroupAvcImeGetWeightingPatternMinimumDistortionINTEL
        | Op::SubgroupAvcFmeInitializeINTEL
        | Op::SubgroupAvcBmeInitializeINTEL
        | Op::SubgroupAvcRefConvertToMcePayloadINTEL
        | Op::SubgroupAvcRefSetBidirectionalMixDisableINTEL
        | Op::SubgroupAvcRefSetBilinearFilterEnableINTEL
        | Op::SubgroupAvcRefEvaluateWithSingleReferenceINTEL
        | Op::SubgroupAvcRefEvaluateWithDualReferenceINTEL
        | Op::SubgroupAvcRefEvaluateWithMultiReferenceINTEL
        | Op::SubgroupAvcRefEvaluateWithMultiReferenceInterlacedINTEL
        | Op::SubgroupAvcRefConvertToMceResultINTEL
        | Op::SubgroupAvcSicInitializeINTEL
        | Op::SubgroupAvcSicConfigureSkcINTEL
        | Op::SubgroupAvcSicConfigureIpeLumaINTEL
        | Op::SubgroupAvcSicConfigureIpeLumaChromaINTEL
        | Op::SubgroupAvcSicGetMotionVectorMaskINTEL
        | Op::SubgroupAvcSicConvertToMcePayloadINTEL
        | Op::SubgroupAvcSicSetIntraLumaShapePenaltyINTEL
        | Op::SubgroupAvcSicSetIntraLumaModeCostFunctionINTEL
        | Op::SubgroupAvcSicSetIntraChromaModeCostFunctionINTEL
        | Op::SubgroupAvcSicSetBilinearFilterEnableINTEL
        | Op::SubgroupAvcSicSetSkcForwardTransformEnableINTEL
        | Op::SubgroupAvcSicSetBlockBasedRawSkipSadINTEL
        | Op::SubgroupAvcSicEvaluateIpeINTEL
        | Op::SubgroupAvcSicEvaluateWithSingleReferenceINTEL
        | Op::SubgroupAvcSicEvaluateWithDualReferenceINTEL
        | Op::SubgroupAvcSicEvaluateWithMultiReferenceINTEL
        | Op::SubgroupAvcSicEvaluateWithMultiReferenceInterlacedINTEL
        | Op::SubgroupAvcSicConvertToMceResultINTEL
        | Op::SubgroupAvcSicGetIpeLumaShapeINTEL
        | Op::SubgroupAvcSicGetBestIpeLumaDistortionINTEL
        | Op::SubgroupAvcSicGetBestIpeChromaDistortionINTEL
        | Op::SubgroupAvcSicGetPackedIpeLumaModesINTEL
        | Op::SubgroupAvcSicGetIpeChromaModeINTEL
        | Op::SubgroupAvcSicGetPackedSkcLumaCountThresholdINTEL
        | Op::SubgroupAvcSicGetPackedSkcLumaSumThresholdINTEL
        | Op::SubgroupAvcSicGetInterRawSadsINTEL
        | Op::VariableLengthArrayINTEL
        | Op::RestoreMemoryINTEL
        | Op::AliasDomainDeclINTEL
        | Op::AliasScopeDeclINTEL
        | Op::AliasScopeListDeclINTEL
        | Op::PtrCastToCrossWorkgroupINTEL
        | Op::CrossWorkgroupCastToPtrINTEL
        | Op::ReadPipeBlockingINTEL
        | Op::WritePipeBlockingINTEL
        | Op::FPGARegINTEL
        | Op::RayQueryGetRayTMinKHR
        | Op::RayQueryGetRayFlagsKHR
        | Op::RayQueryGetIntersectionTKHR
        | Op::RayQueryGetIntersectionInstanceCustomIndexKHR
        | Op::RayQueryGetIntersectionInstanceIdKHR
        | Op::RayQueryGetIntersectionInstanceShaderBindingTableRecordOffsetKHR
        | Op::RayQueryGetIntersectionGeometryIndexKHR
        | Op::RayQueryGetIntersectionPrimitiveIndexKHR
        | Op::RayQueryGetIntersectionBarycentricsKHR
        | Op::RayQueryGetIntersectionFrontFaceKHR
        | Op::RayQueryGetIntersectionCandidateAABBOpaqueKHR
        | Op::RayQueryGetIntersectionObjectRayDirectionKHR
        | Op::RayQueryGetIntersectionObjectRayOriginKHR
        | Op::RayQueryGetWorldRayDirectionKHR
        | Op::RayQueryGetWorldRayOriginKHR
        | Op::RayQueryGetIntersectionObjectToWorldKHR
        | Op::RayQueryGetIntersectionWorldToObjectKHR
        | Op::AtomicFAddEXT
        | Op::TypeStructContinuedINTEL
        | Op::ConstantCompositeContinuedINTEL
        | Op::SpecConstantCompositeContinuedINTEL
        | Op::ConvertFToBF16INTEL
        | Op::ConvertBF16ToFINTEL
        | Op::ControlBarrierArriveINTEL
        | Op::ControlBarrierWaitINTEL => IdOperands::All,
    }
}
