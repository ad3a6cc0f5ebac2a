use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::alloc_util::{try_reserve, try_string_from_str, try_vec_from_slice, try_vec_with_capacity};
use crate::options::DecodeOptions;
use crate::utf8;
use crate::value::Value;
use crate::{CborError, ErrorCode};

const BREAK: u8 = 0xff;

/// Decodes RFC 8949 bytes into owned [`Value`] trees.
///
/// A decoder holds only its options; each [`decode`](Decoder::decode) call drives a
/// fresh cursor over the input, so one decoder may serve any number of calls, from
/// any number of threads, without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    /// Options applied to subsequent [`decode`](Decoder::decode) calls.
    pub options: DecodeOptions,
}

impl Decoder {
    /// Construct a decoder with the given options.
    #[must_use]
    pub const fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decode exactly one CBOR data item from `bytes`.
    ///
    /// Both definite and indefinite-length containers are accepted, as are chunked
    /// byte and text strings. Unless the options allow trailing data, every input
    /// byte must belong to the item.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed, truncated, nested beyond the
    /// configured depth, followed by trailing bytes, or if allocation fails while
    /// building the tree.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, CborError> {
        let mut parser = Parser {
            data: bytes,
            pos: 0,
            max_depth: self.options.max_depth,
        };
        let value = parser.parse_item(0)?;
        if parser.pos != bytes.len() && !self.options.allow_trailing_data {
            return Err(CborError::new(ErrorCode::TrailingBytes, parser.pos));
        }
        Ok(value)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecodeOptions::new())
    }
}

/// Decode one CBOR data item using the default options.
///
/// # Errors
///
/// Returns an error under the same conditions as [`Decoder::decode`].
pub fn decode_value(bytes: &[u8]) -> Result<Value, CborError> {
    Decoder::default().decode(bytes)
}

struct Parser<'a> {
    data: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn read_u8(&mut self) -> Result<u8, CborError> {
        let off = self.pos;
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| CborError::new(ErrorCode::UnexpectedEof, off))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_exact(&mut self, n: usize) -> Result<&'a [u8], CborError> {
        let off = self.pos;
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| CborError::new(ErrorCode::LengthOverflow, off))?;
        if end > self.data.len() {
            return Err(CborError::new(ErrorCode::UnexpectedEof, off));
        }
        let s = &self.data[self.pos..end];
        self.pos = end;
        Ok(s)
    }

    fn read_be_u16(&mut self) -> Result<u16, CborError> {
        let s = self.read_exact(2)?;
        Ok(u16::from_be_bytes([s[0], s[1]]))
    }

    fn read_be_u32(&mut self) -> Result<u32, CborError> {
        let s = self.read_exact(4)?;
        Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
    }

    fn read_be_u64(&mut self) -> Result<u64, CborError> {
        let s = self.read_exact(8)?;
        Ok(u64::from_be_bytes([
            s[0], s[1], s[2], s[3], s[4], s[5], s[6], s[7],
        ]))
    }

    /// Decode the argument carried by an initial byte. Indefinite-length markers are
    /// rejected here; string and container paths test for them first.
    fn read_uint_arg(&mut self, ai: u8, off: usize) -> Result<u64, CborError> {
        match ai {
            0..=23 => Ok(u64::from(ai)),
            24 => Ok(u64::from(self.read_u8()?)),
            25 => Ok(u64::from(self.read_be_u16()?)),
            26 => Ok(u64::from(self.read_be_u32()?)),
            27 => Ok(self.read_be_u64()?),
            _ => Err(CborError::new(ErrorCode::InvalidAdditionalInfo(ai), off)),
        }
    }

    /// Decode a definite length argument, bounded by the addressable range.
    fn read_len(&mut self, ai: u8, off: usize) -> Result<usize, CborError> {
        let len = self.read_uint_arg(ai, off)?;
        usize::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, off))
    }

    const fn ensure_depth(&self, depth: usize, off: usize) -> Result<(), CborError> {
        if depth > self.max_depth {
            return Err(CborError::new(ErrorCode::DepthLimitExceeded, off));
        }
        Ok(())
    }

    /// Consume a break byte if one is next. Reaching end-of-input is left for the
    /// following item parse to report.
    fn take_break(&mut self) -> bool {
        if self.data.get(self.pos) == Some(&BREAK) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn parse_item(&mut self, depth: usize) -> Result<Value, CborError> {
        let off = self.pos;
        self.ensure_depth(depth, off)?;
        let ib = self.read_u8()?;
        if ib == BREAK {
            return Err(CborError::new(ErrorCode::UnexpectedBreak, off));
        }
        let major = ib >> 5;
        let ai = ib & 0x1f;

        match major {
            0 => Ok(Value::Unsigned(self.read_uint_arg(ai, off)?)),
            1 => Ok(Value::Negative(self.read_uint_arg(ai, off)?)),
            2 => self.parse_bytes(ai, off, depth),
            3 => self.parse_text(ai, off, depth),
            4 => self.parse_array(ai, off, depth),
            5 => self.parse_map(ai, off, depth),
            6 => self.parse_tag(ai, off, depth),
            7 => self.parse_simple(ai, off),
            _ => Err(CborError::new(ErrorCode::InvalidInitialByte(ib), off)),
        }
    }

    fn parse_bytes(&mut self, ai: u8, off: usize, depth: usize) -> Result<Value, CborError> {
        if ai == 31 {
            let buf = self.parse_chunks(2, depth + 1)?;
            return Ok(Value::Bytes(buf));
        }
        let len = self.read_len(ai, off)?;
        let bytes = self.read_exact(len)?;
        Ok(Value::Bytes(try_vec_from_slice(bytes, off)?))
    }

    fn parse_text(&mut self, ai: u8, off: usize, depth: usize) -> Result<Value, CborError> {
        if ai == 31 {
            // Well-formedness is checked on the concatenation, not per chunk, so a
            // scalar value split across chunk boundaries is accepted.
            let buf = self.parse_chunks(3, depth + 1)?;
            let text = String::from_utf8(buf)
                .map_err(|_| CborError::new(ErrorCode::Utf8Invalid, off))?;
            return Ok(Value::Text(text));
        }
        let len = self.read_len(ai, off)?;
        let bytes = self.read_exact(len)?;
        let text =
            utf8::validate(bytes).map_err(|()| CborError::new(ErrorCode::Utf8Invalid, off))?;
        Ok(Value::Text(try_string_from_str(text, off)?))
    }

    /// Concatenate the chunks of an indefinite-length string. Each chunk must be a
    /// definite-length string of the same major type.
    fn parse_chunks(&mut self, major: u8, depth: usize) -> Result<Vec<u8>, CborError> {
        let mut out = Vec::new();
        loop {
            let off = self.pos;
            let ib = self.read_u8()?;
            if ib == BREAK {
                return Ok(out);
            }
            self.ensure_depth(depth, off)?;
            let ai = ib & 0x1f;
            if ib >> 5 != major || ai == 31 {
                return Err(CborError::new(ErrorCode::InvalidChunkType(major), off));
            }
            let len = self.read_len(ai, off)?;
            let bytes = self.read_exact(len)?;
            try_reserve(&mut out, bytes.len(), off)?;
            out.extend_from_slice(bytes);
        }
    }

    fn parse_array(&mut self, ai: u8, off: usize, depth: usize) -> Result<Value, CborError> {
        if ai == 31 {
            let mut items = Vec::new();
            while !self.take_break() {
                try_reserve(&mut items, 1, self.pos)?;
                items.push(self.parse_item(depth + 1)?);
            }
            return Ok(Value::Array(items));
        }
        let len = self.read_len(ai, off)?;
        // Every element occupies at least one input byte, so the remaining input
        // bounds the preallocation a hostile length argument can trigger.
        let mut items = try_vec_with_capacity(len.min(self.remaining()), off)?;
        for _ in 0..len {
            try_reserve(&mut items, 1, self.pos)?;
            items.push(self.parse_item(depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn parse_map(&mut self, ai: u8, off: usize, depth: usize) -> Result<Value, CborError> {
        if ai == 31 {
            let mut entries = Vec::new();
            while !self.take_break() {
                let key = self.parse_item(depth + 1)?;
                let value = self.parse_item(depth + 1)?;
                try_reserve(&mut entries, 1, self.pos)?;
                entries.push((key, value));
            }
            return Ok(Value::Map(entries));
        }
        let len = self.read_len(ai, off)?;
        let mut entries = try_vec_with_capacity(len.min(self.remaining() / 2), off)?;
        for _ in 0..len {
            let key = self.parse_item(depth + 1)?;
            let value = self.parse_item(depth + 1)?;
            try_reserve(&mut entries, 1, self.pos)?;
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }

    fn parse_tag(&mut self, ai: u8, off: usize, depth: usize) -> Result<Value, CborError> {
        let tag = self.read_uint_arg(ai, off)?;
        let inner = self.parse_item(depth + 1)?;
        Ok(Value::Tag(tag, Box::new(inner)))
    }

    fn parse_simple(&mut self, ai: u8, off: usize) -> Result<Value, CborError> {
        match ai {
            0..=19 => Ok(Value::Simple(ai)),
            20 => Ok(Value::Bool(false)),
            21 => Ok(Value::Bool(true)),
            22 => Ok(Value::Null),
            23 => Ok(Value::Undefined),
            // The simple code is taken as-is; codes below 32 are not rejected.
            24 => Ok(Value::Simple(self.read_u8()?)),
            25 => Ok(Value::Half(self.read_be_u16()?)),
            26 => Ok(Value::Float(f32::from_bits(self.read_be_u32()?))),
            27 => Ok(Value::Double(f64::from_bits(self.read_be_u64()?))),
            _ => Err(CborError::new(ErrorCode::InvalidAdditionalInfo(ai), off)),
        }
    }
}
