use half::f16;

/// Canonical quiet-NaN bit pattern for binary16. Every NaN collapses to this form
/// under deterministic encoding.
pub(crate) const CANONICAL_NAN_HALF: u16 = 0x7e00;

/// The narrowest IEEE-754 width that preserves a value's bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatRepr {
    Half(u16),
    Single(u32),
    Double(u64),
}

/// Reduce a canonical binary64 view to the narrowest lossless representation.
///
/// Each probe narrows, widens back, and compares **bit patterns** rather than
/// numeric values, so signed zero keeps its sign and a non-canonical NaN payload is
/// never mistaken for a representable value.
pub(crate) fn reduce(v: f64) -> FloatRepr {
    if v.is_nan() {
        return FloatRepr::Half(CANONICAL_NAN_HALF);
    }
    let bits = v.to_bits();
    let narrow16 = f16::from_f64(v);
    if narrow16.to_f64().to_bits() == bits {
        return FloatRepr::Half(narrow16.to_bits());
    }
    #[allow(clippy::cast_possible_truncation)]
    let narrow32 = v as f32;
    if f64::from(narrow32).to_bits() == bits {
        return FloatRepr::Single(narrow32.to_bits());
    }
    FloatRepr::Double(bits)
}

/// Widen a raw binary16 bit pattern to the canonical binary64 view.
pub(crate) fn widen_half(bits: u16) -> f64 {
    f16::from_bits(bits).to_f64()
}
