// Copyright (c) 2024 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

//! Reading the header and framing of a SPIR-V binary.

use crate::{grammar, Id};
use foldhash::HashMap;
use spirv::Op;
use std::{
    collections::hash_map::Entry,
    error::Error,
    fmt::{Display, Error as FmtError, Formatter},
};

pub(crate) const HEADER_LEN: usize = 5;

/// The header of a SPIR-V module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// The magic number. Always `spirv::MAGIC_NUMBER` once parsed.
    pub magic: u32,
    /// The SPIR-V version, as `(major, minor)`.
    pub version: (u8, u8),
    /// The generator magic number; the high 16 bits are the tool id, the low 16 bits its version.
    pub generator: u32,
    /// All result ids of the module are strictly less than this.
    pub bound: u32,
    /// Reserved, normally 0.
    pub schema: u32,
}

impl Header {
    fn from_words(words: &[u32]) -> Result<Header, SpirvError> {
        if words.len() < HEADER_LEN || words[0] != spirv::MAGIC_NUMBER {
            return Err(SpirvError::InvalidHeader);
        }

        let version = words[1];

        // Bytes 0 and 3 of the version word are reserved and must be 0.
        if version & 0xff0000ff != 0 {
            return Err(SpirvError::InvalidHeader);
        }

        Ok(Header {
            magic: words[0],
            version: ((version >> 16) as u8, (version >> 8) as u8),
            generator: words[2],
            bound: words[3],
            schema: words[4],
        })
    }

    /// Returns the header as it is encoded in a binary.
    #[inline]
    pub fn to_words(&self) -> [u32; HEADER_LEN] {
        [
            self.magic,
            self.version_word(),
            self.generator,
            self.bound,
            self.schema,
        ]
    }

    /// Returns the version as it is encoded in the second header word.
    #[inline]
    pub fn version_word(&self) -> u32 {
        ((self.version.0 as u32) << 16) | ((self.version.1 as u32) << 8)
    }

    /// Returns the id of the tool that generated the module.
    #[inline]
    pub fn generator_tool(&self) -> u16 {
        (self.generator >> 16) as u16
    }
}

/// Where one instruction lives in the word stream, and the shape of its leading operands.
#[derive(Clone, Copy, Debug)]
pub(crate) struct InstructionRecord {
    pub(crate) offset: usize,
    pub(crate) len: u16,
    pub(crate) has_result: bool,
    pub(crate) has_type: bool,
}

impl InstructionRecord {
    #[inline]
    pub(crate) fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len as usize
    }
}

/// Checks the framing of `words` and returns the header and the location of every instruction.
///
/// Only the structure is checked: the header, that every instruction fits in the buffer, and that
/// instructions are long enough for the operands read at fixed positions later on. Result ids
/// must be below the bound and defined only once.
///
/// Also returns the definition table: for every defined id, the index of the instruction that
/// defines it. The table is keyed by id, so its size does not depend on the bound.
pub(crate) fn parse(
    words: &[u32],
) -> Result<(Header, Vec<InstructionRecord>, HashMap<u32, usize>), SpirvError> {
    let header = Header::from_words(words)?;
    let mut records = Vec::new();
    let mut offset = HEADER_LEN;
    let mut definitions: HashMap<u32, usize> = HashMap::default();

    while offset < words.len() {
        let instruction = records.len();
        let first = words[offset];
        let len = (first >> 16) as u16;
        let opcode = first as u16;

        if len == 0 {
            return Err(ParseError {
                instruction,
                word: offset,
                kind: ParseErrors::ZeroWordCount,
            }
            .into());
        }

        if offset + len as usize > words.len() {
            return Err(ParseError {
                instruction,
                word: offset,
                kind: ParseErrors::UnexpectedEof,
            }
            .into());
        }

        let (has_result, has_type, required) = match Op::from_u32(opcode as u32) {
            Some(op) => {
                let (has_result, has_type) = grammar::has_result_and_type(op);
                (has_result, has_type, grammar::min_word_count(op))
            }
            None => (false, false, 1),
        };

        if len < required {
            return Err(ParseError {
                instruction,
                word: offset,
                kind: ParseErrors::MissingOperands {
                    opcode,
                    required,
                    found: len,
                },
            }
            .into());
        }

        if has_result {
            let result_id = words[offset + 1 + has_type as usize];

            if result_id >= header.bound {
                return Err(SpirvError::IdOutOfBounds {
                    id: Id::new(result_id),
                    instruction,
                    bound: header.bound,
                });
            }

            match definitions.entry(result_id) {
                Entry::Occupied(entry) => {
                    return Err(SpirvError::DuplicateId {
                        id: Id::new(result_id),
                        first_instruction: *entry.get(),
                        second_instruction: instruction,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(instruction);
                }
            }
        }

        records.push(InstructionRecord {
            offset,
            len,
            has_result,
            has_type,
        });
        offset += len as usize;
    }

    Ok((header, records, definitions))
}

/// Converts little-endian bytes to words, swapping them if the magic number shows that the
/// module was written with the other endianness.
pub(crate) fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u32>, SpirvError> {
    if bytes.len() % 4 != 0 {
        return Err(ParseError {
            instruction: 0,
            word: bytes.len() / 4,
            kind: ParseErrors::NotMultipleOfFour,
        }
        .into());
    }

    let mut words: Vec<u32> = bytemuck::pod_collect_to_vec(bytes);
    normalize_endianness(&mut words);

    Ok(words)
}

/// Byte-swaps every word if the first word is a byte-swapped magic number.
pub(crate) fn normalize_endianness(words: &mut [u32]) {
    if words.first() == Some(&spirv::MAGIC_NUMBER.swap_bytes()) {
        for word in words {
            *word = word.swap_bytes();
        }
    }
}

/// Decodes a nul-terminated literal string starting at the beginning of `words`.
///
/// Returns the string and the number of words it occupies.
pub(crate) fn decode_string(words: &[u32]) -> (String, usize) {
    let mut bytes = Vec::new();

    for (index, word) in words.iter().enumerate() {
        for byte in word.to_le_bytes() {
            if byte == 0 {
                return (String::from_utf8_lossy(&bytes).into_owned(), index + 1);
            }

            bytes.push(byte);
        }
    }

    (String::from_utf8_lossy(&bytes).into_owned(), words.len())
}

/// Error that can happen when reading a SPIR-V module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpirvError {
    /// The header is missing, or its magic number or version word are invalid.
    InvalidHeader,
    /// An instruction could not be framed.
    ParseError(ParseError),
    /// A result id is not below the bound declared in the header.
    IdOutOfBounds {
        id: Id,
        instruction: usize,
        bound: u32,
    },
    /// A result id is defined by more than one instruction.
    DuplicateId {
        id: Id,
        first_instruction: usize,
        second_instruction: usize,
    },
}

impl Error for SpirvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ParseError(err) => Some(err),
            _ => None,
        }
    }
}

impl Display for SpirvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::InvalidHeader => write!(f, "the SPIR-V module header is invalid"),
            Self::ParseError(_) => write!(f, "the SPIR-V module could not be parsed"),
            Self::IdOutOfBounds {
                id,
                instruction,
                bound,
            } => write!(
                f,
                "id {} defined by instruction {} is not below the id bound {}",
                id, instruction, bound,
            ),
            Self::DuplicateId {
                id,
                first_instruction,
                second_instruction,
            } => write!(
                f,
                "id {} is defined by both instruction {} and instruction {}",
                id, first_instruction, second_instruction,
            ),
        }
    }
}

impl From<ParseError> for SpirvError {
    fn from(err: ParseError) -> Self {
        Self::ParseError(err)
    }
}

/// Error that can happen when framing an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// The index of the instruction that failed.
    pub instruction: usize,
    /// The word offset of that instruction in the binary.
    pub word: usize,
    /// What went wrong.
    pub kind: ParseErrors,
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(
            f,
            "at instruction {}, word {}: {}",
            self.instruction, self.word, self.kind,
        )
    }
}

/// The kinds of framing error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrors {
    /// The instruction extends past the end of the binary.
    UnexpectedEof,
    /// The instruction declares a word count of 0.
    ZeroWordCount,
    /// The instruction has fewer words than its opcode requires.
    MissingOperands {
        opcode: u16,
        required: u16,
        found: u16,
    },
    /// The byte length of the binary is not a multiple of 4.
    NotMultipleOfFour,
}

impl Display for ParseErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::UnexpectedEof => write!(f, "encountered unexpected end of file"),
            Self::ZeroWordCount => write!(f, "the instruction has a word count of 0"),
            Self::MissingOperands {
                opcode,
                required,
                found,
            } => write!(
                f,
                "opcode {} requires at least {} words, but has {}",
                opcode, required, found,
            ),
            Self::NotMultipleOfFour => write!(f, "the length is not a multiple of 4 bytes"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::Assembler;

    #[test]
    fn header_fields() {
        let words = Assembler::new().version(1, 3).finish();
        let (header, records, definitions) = parse(&words).unwrap();

        assert_eq!(header.magic, spirv::MAGIC_NUMBER);
        assert_eq!(header.version, (1, 3));
        assert_eq!(header.to_words(), words[..5]);
        assert!(records.is_empty());
        assert!(definitions.is_empty());
    }

    #[test]
    fn huge_bound_is_not_preallocated() {
        let mut words = Assembler::new().finish();
        words[3] = u32::MAX;
        words.extend([(2 << 16) | Op::Capability as u32, 1]);

        let (header, records, definitions) = parse(&words).unwrap();
        assert_eq!(header.bound, u32::MAX);
        assert_eq!(records.len(), 1);
        assert!(definitions.is_empty());
    }

    #[test]
    fn bad_magic() {
        let mut words = Assembler::new().finish();
        words[0] = 0xdeadbeef;
        assert_eq!(parse(&words).unwrap_err(), SpirvError::InvalidHeader);
        assert_eq!(parse(&words[..3]).unwrap_err(), SpirvError::InvalidHeader);
    }

    #[test]
    fn truncated_instruction() {
        let mut words = Assembler::new().finish();
        // OpCapability with a declared length of 2, but no operand.
        words.push((2 << 16) | Op::Capability as u32);

        match parse(&words) {
            Err(SpirvError::ParseError(ParseError {
                instruction: 0,
                word: 5,
                kind: ParseErrors::UnexpectedEof,
            })) => (),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn zero_word_count() {
        let mut words = Assembler::new().finish();
        words.push(Op::Nop as u32);

        assert!(matches!(
            parse(&words),
            Err(SpirvError::ParseError(ParseError {
                kind: ParseErrors::ZeroWordCount,
                ..
            })),
        ));
    }

    #[test]
    fn missing_result_id() {
        let mut words = Assembler::new().finish();
        // OpTypeInt with no operands at all.
        words.push((1 << 16) | Op::TypeInt as u32);

        assert!(matches!(
            parse(&words),
            Err(SpirvError::ParseError(ParseError {
                kind: ParseErrors::MissingOperands { .. },
                ..
            })),
        ));
    }

    #[test]
    fn id_out_of_bounds_and_duplicates() {
        let mut asm = Assembler::new();
        let int = asm.id();
        asm.inst(Op::TypeInt, &[int, 32, 0]);
        let mut words = asm.finish();
        words[3] = int; // bound == id
        assert!(matches!(parse(&words), Err(SpirvError::IdOutOfBounds { .. })));

        let mut asm = Assembler::new();
        let int = asm.id();
        asm.inst(Op::TypeInt, &[int, 32, 0]);
        asm.inst(Op::TypeInt, &[int, 32, 1]);
        assert!(matches!(
            parse(&asm.finish()),
            Err(SpirvError::DuplicateId {
                first_instruction: 0,
                second_instruction: 1,
                ..
            }),
        ));
    }

    #[test]
    fn bytes_and_endianness() {
        let words = Assembler::new().finish();
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        assert_eq!(words_from_bytes(&bytes).unwrap(), words);

        let swapped: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        let mut swapped_words: Vec<u32> = bytemuck::pod_collect_to_vec(&swapped);
        normalize_endianness(&mut swapped_words);
        assert_eq!(swapped_words, words);

        assert!(matches!(
            words_from_bytes(&bytes[..7]),
            Err(SpirvError::ParseError(ParseError {
                kind: ParseErrors::NotMultipleOfFour,
                ..
            })),
        ));
    }

    #[test]
    fn strings() {
        let words = crate::test_utils::string_words("main");
        assert_eq!(words.len(), 2);
        assert_eq!(decode_string(&words), ("main".to_owned(), 2));
    }
}
