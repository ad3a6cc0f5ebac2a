use alloc::vec::Vec;

use crate::alloc_util::{try_reserve, try_vec_with_capacity};
use crate::float::{self, FloatRepr};
use crate::options::EncodeOptions;
use crate::order::cmp_encoded_keys;
use crate::value::Value;
use crate::{CborError, ErrorCode};

/// Encodes [`Value`] trees into RFC 8949 bytes.
///
/// Output always uses definite-length, preferred-width prefixes. With
/// [`EncodeOptions::canonical`] set, maps are additionally emitted in deterministic
/// key order and floats in their narrowest lossless width.
///
/// An encoder holds only its options; [`encode`](Encoder::encode) takes `&self`, so
/// one encoder may serve concurrent calls without coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    /// Options applied to subsequent [`encode`](Encoder::encode) calls.
    pub options: EncodeOptions,
}

impl Encoder {
    /// Construct an encoder with the given options.
    #[must_use]
    pub const fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    /// Encode one data item into a fresh byte buffer.
    ///
    /// Every value expressible in the model is encodable; the only representable
    /// failure is an allocation error while growing the output.
    ///
    /// # Errors
    ///
    /// Returns an error if allocation fails.
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, CborError> {
        let mut buf = Vec::new();
        emit_item(&mut buf, value, self.options.canonical)?;
        Ok(buf)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncodeOptions::new())
    }
}

/// Encode one data item without deterministic ordering.
///
/// # Errors
///
/// Returns an error if allocation fails.
pub fn encode_value(value: &Value) -> Result<Vec<u8>, CborError> {
    Encoder::default().encode(value)
}

/// Encode one data item deterministically (sorted maps, narrowest floats).
///
/// # Errors
///
/// Returns an error if allocation fails.
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, CborError> {
    Encoder::new(EncodeOptions::canonical()).encode(value)
}

fn write(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), CborError> {
    try_reserve(buf, bytes.len(), buf.len())?;
    buf.extend_from_slice(bytes);
    Ok(())
}

fn write_u8(buf: &mut Vec<u8>, byte: u8) -> Result<(), CborError> {
    try_reserve(buf, 1, buf.len())?;
    buf.push(byte);
    Ok(())
}

/// Emit an initial byte plus argument for `(major, arg)`, always in the shortest
/// width that holds the argument.
#[allow(clippy::cast_possible_truncation)]
fn emit_arg(buf: &mut Vec<u8>, major: u8, arg: u64) -> Result<(), CborError> {
    debug_assert!(major <= 7);
    match arg {
        0..=23 => write_u8(buf, (major << 5) | arg as u8),
        24..=0xff => {
            write_u8(buf, (major << 5) | 24)?;
            write_u8(buf, arg as u8)
        }
        0x100..=0xffff => {
            write_u8(buf, (major << 5) | 25)?;
            write(buf, &(arg as u16).to_be_bytes())
        }
        0x1_0000..=0xffff_ffff => {
            write_u8(buf, (major << 5) | 26)?;
            write(buf, &(arg as u32).to_be_bytes())
        }
        _ => {
            write_u8(buf, (major << 5) | 27)?;
            write(buf, &arg.to_be_bytes())
        }
    }
}

fn emit_len(buf: &mut Vec<u8>, major: u8, len: usize) -> Result<(), CborError> {
    let len_u64 =
        u64::try_from(len).map_err(|_| CborError::new(ErrorCode::LengthOverflow, buf.len()))?;
    emit_arg(buf, major, len_u64)
}

fn emit_item(buf: &mut Vec<u8>, value: &Value, canonical: bool) -> Result<(), CborError> {
    match value {
        Value::Unsigned(n) => emit_arg(buf, 0, *n),
        Value::Negative(n) => emit_arg(buf, 1, *n),
        Value::Bytes(b) => {
            emit_len(buf, 2, b.len())?;
            write(buf, b)
        }
        Value::Text(s) => {
            emit_len(buf, 3, s.len())?;
            write(buf, s.as_bytes())
        }
        Value::Array(items) => {
            emit_len(buf, 4, items.len())?;
            for item in items {
                emit_item(buf, item, canonical)?;
            }
            Ok(())
        }
        Value::Map(entries) => emit_map(buf, entries, canonical),
        Value::Tag(tag, inner) => {
            emit_arg(buf, 6, *tag)?;
            emit_item(buf, inner, canonical)
        }
        Value::Simple(code) => {
            if *code < 24 {
                write_u8(buf, 0xe0 | *code)
            } else {
                write(buf, &[0xf8, *code])
            }
        }
        Value::Bool(false) => write_u8(buf, 0xf4),
        Value::Bool(true) => write_u8(buf, 0xf5),
        Value::Null => write_u8(buf, 0xf6),
        Value::Undefined => write_u8(buf, 0xf7),
        Value::Half(bits) => {
            if canonical {
                emit_reduced(buf, float::widen_half(*bits))
            } else {
                write_u8(buf, 0xf9)?;
                write(buf, &bits.to_be_bytes())
            }
        }
        Value::Float(v) => {
            if canonical {
                emit_reduced(buf, f64::from(*v))
            } else {
                write_u8(buf, 0xfa)?;
                write(buf, &v.to_bits().to_be_bytes())
            }
        }
        Value::Double(v) => {
            if canonical {
                emit_reduced(buf, *v)
            } else {
                write_u8(buf, 0xfb)?;
                write(buf, &v.to_bits().to_be_bytes())
            }
        }
    }
}

fn emit_map(buf: &mut Vec<u8>, entries: &[(Value, Value)], canonical: bool) -> Result<(), CborError> {
    emit_len(buf, 5, entries.len())?;
    if !canonical {
        for (key, value) in entries {
            emit_item(buf, key, false)?;
            emit_item(buf, value, false)?;
        }
        return Ok(());
    }

    // Deterministic ordering works on the encoded key bytes, so every key is
    // rendered up front (still in canonical mode) and the pairs sorted by the
    // RFC 8949 bytewise rule before anything is written.
    let mut sorted: Vec<(Vec<u8>, &Value)> = try_vec_with_capacity(entries.len(), buf.len())?;
    for (key, value) in entries {
        let mut encoded_key = Vec::new();
        emit_item(&mut encoded_key, key, true)?;
        sorted.push((encoded_key, value));
    }
    sorted.sort_by(|a, b| cmp_encoded_keys(&a.0, &b.0));
    for (encoded_key, value) in &sorted {
        write(buf, encoded_key)?;
        emit_item(buf, value, true)?;
    }
    Ok(())
}

fn emit_reduced(buf: &mut Vec<u8>, v: f64) -> Result<(), CborError> {
    match float::reduce(v) {
        FloatRepr::Half(bits) => {
            write_u8(buf, 0xf9)?;
            write(buf, &bits.to_be_bytes())
        }
        FloatRepr::Single(bits) => {
            write_u8(buf, 0xfa)?;
            write(buf, &bits.to_be_bytes())
        }
        FloatRepr::Double(bits) => {
            write_u8(buf, 0xfb)?;
            write(buf, &bits.to_be_bytes())
        }
    }
}
