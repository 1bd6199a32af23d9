// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

use crate::binary::{self, InstructionRecord};
use spirv::{BuiltIn, Decoration, Op, StorageClass};
use std::fmt::{Display, Error as FmtError, Formatter};

/// A SPIR-V result id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Id(u32);

impl Id {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Id(raw)
    }

    /// Returns the raw numeric value of this id.
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }
}

impl From<Id> for u32 {
    #[inline]
    fn from(id: Id) -> u32 {
        id.as_raw()
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "%{}", self.0)
    }
}

/// A view of one instruction in a [`Module`](crate::Module).
///
/// Word 0 is the combined word count and opcode; the remaining words are the operands, in the
/// order the SPIR-V specification lists them, starting with the result type and result id when
/// the opcode has them.
///
/// The instruction was checked to be long enough for its opcode when the module was parsed, so
/// the accessors for fixed operand positions do not fail for well-framed input. [`word`] panics
/// if asked for a word past the end; use [`get_word`] for optional operands.
///
/// [`word`]: Self::word
/// [`get_word`]: Self::get_word
#[derive(Clone, Copy)]
pub struct Instruction<'a> {
    words: &'a [u32],
    index: usize,
    record: InstructionRecord,
}

impl<'a> Instruction<'a> {
    #[inline]
    pub(crate) fn new(module_words: &'a [u32], index: usize, record: InstructionRecord) -> Self {
        Instruction {
            words: &module_words[record.range()],
            index,
            record,
        }
    }

    /// Returns the raw opcode.
    #[inline]
    pub fn opcode(&self) -> u16 {
        self.words[0] as u16
    }

    /// Returns the opcode, or `None` if it is not known.
    #[inline]
    pub fn op(&self) -> Option<Op> {
        Op::from_u32(self.opcode() as u32)
    }

    /// Returns the number of words of the instruction, including the first.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns the word at position `index`.
    ///
    /// # Panics
    ///
    /// - Panics if `index` is out of range.
    #[inline]
    pub fn word(&self, index: usize) -> u32 {
        self.words[index]
    }

    /// Returns the word at position `index`, or `None` if the instruction is shorter.
    #[inline]
    pub fn get_word(&self, index: usize) -> Option<u32> {
        self.words.get(index).copied()
    }

    /// Returns the word at position `index` as an id.
    #[inline]
    pub fn id_at(&self, index: usize) -> Id {
        Id::new(self.words[index])
    }

    /// Returns all words of the instruction.
    #[inline]
    pub fn words(&self) -> &'a [u32] {
        self.words
    }

    /// Returns the operands that follow the result type and result id, if any.
    #[inline]
    pub fn operands(&self) -> &'a [u32] {
        &self.words[self.operands_start()..]
    }

    #[inline]
    pub(crate) fn operands_start(&self) -> usize {
        1 + self.record.has_result as usize + self.record.has_type as usize
    }

    #[inline]
    pub fn result_id(&self) -> Option<Id> {
        self.record
            .has_result
            .then(|| Id::new(self.words[1 + self.record.has_type as usize]))
    }

    #[inline]
    pub fn type_id(&self) -> Option<Id> {
        self.record.has_type.then(|| Id::new(self.words[1]))
    }

    /// Returns the position of the instruction in the module's instruction stream.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the word offset of the instruction in the binary.
    #[inline]
    pub fn offset(&self) -> usize {
        self.record.offset
    }

    /// Returns the storage class operand of `OpVariable`, `OpTypePointer` and
    /// `OpTypeForwardPointer`.
    pub fn storage_class(&self) -> Option<StorageClass> {
        let word = match self.op()? {
            Op::Variable => self.word(3),
            Op::TypePointer | Op::TypeForwardPointer => self.word(2),
            _ => return None,
        };

        StorageClass::from_u32(word)
    }

    /// Returns whether this is `OpTypeArray` or `OpTypeRuntimeArray`.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self.op(), Some(Op::TypeArray | Op::TypeRuntimeArray))
    }

    /// Returns the low word of the value of `OpConstant` or the default value of
    /// `OpSpecConstant`.
    pub fn constant_value(&self) -> Option<u32> {
        match self.op()? {
            Op::Constant | Op::SpecConstant => Some(self.word(3)),
            _ => None,
        }
    }

    /// Returns the bit width of a scalar type.
    pub fn bit_width(&self) -> Option<u32> {
        match self.op()? {
            Op::TypeInt | Op::TypeFloat => Some(self.word(2)),
            Op::TypeBool => Some(1),
            _ => None,
        }
    }

    /// Returns the decoration of `OpDecorate`, `OpDecorateId`, `OpDecorateString`,
    /// `OpMemberDecorate` and `OpMemberDecorateString`.
    pub fn decoration(&self) -> Option<Decoration> {
        let word = match self.op()? {
            Op::Decorate | Op::DecorateId | Op::DecorateString => self.word(2),
            Op::MemberDecorate | Op::MemberDecorateString => self.word(3),
            _ => return None,
        };

        Decoration::from_u32(word)
    }

    /// Returns the built-in of a `BuiltIn` decoration instruction.
    pub fn builtin(&self) -> Option<BuiltIn> {
        if self.decoration()? != Decoration::BuiltIn {
            return None;
        }

        let word = match self.op()? {
            Op::Decorate => self.get_word(3)?,
            Op::MemberDecorate => self.get_word(4)?,
            _ => return None,
        };

        BuiltIn::from_u32(word)
    }

    /// Decodes the literal string that starts at word `index`.
    pub fn string_at(&self, index: usize) -> String {
        self.words
            .get(index..)
            .map_or_else(String::new, |words| binary::decode_string(words).0)
    }

    /// Returns the number of words taken by the literal string that starts at word `index`.
    pub(crate) fn string_len_at(&self, index: usize) -> usize {
        self.words
            .get(index..)
            .map_or(0, |words| binary::decode_string(words).1)
    }
}

impl std::fmt::Debug for Instruction<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("Instruction")
            .field("index", &self.index)
            .field("op", &self.op())
            .field("words", &self.words)
            .finish()
    }
}
