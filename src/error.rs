use core::fmt;

/// A structured error code identifying the reason a codec operation failed.
///
/// This enum is intentionally stable and string-free to support `no_std` and to remain hot-path friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// Unexpected end-of-input while decoding.
    UnexpectedEof,
    /// A length argument exceeds the addressable range, or an offset computation overflowed.
    LengthOverflow,
    /// Input contains trailing bytes after the single CBOR data item.
    TrailingBytes,
    /// Memory allocation failed while building owned structures.
    AllocationFailed,

    /// Nesting depth limit exceeded.
    DepthLimitExceeded,

    /// An additional-info value that is reserved (28..=30) or an indefinite-length
    /// marker (31) on a major type that does not admit one.
    InvalidAdditionalInfo(u8),
    /// A break byte (`0xff`) was seen at a value position instead of closing an
    /// indefinite-length container.
    UnexpectedBreak,
    /// Structurally impossible initial byte; kept for forward compatibility, as every
    /// major type 0..=7 of an 8-bit initial byte is currently handled.
    InvalidInitialByte(u8),
    /// An indefinite-length string contained a chunk that is not a definite-length
    /// string of the expected major type (the payload).
    InvalidChunkType(u8),

    /// Invalid UTF-8 in a text string.
    Utf8Invalid,

    /// Reserved for a strict map-decoding mode; no current decode path emits it.
    MalformedMap,
}

/// A codec error with a stable code and a byte offset.
///
/// Decode offsets refer to the input position where the error was detected; encode
/// offsets refer to the length of the output produced so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CborError {
    /// The error code.
    pub code: ErrorCode,
    /// Byte offset where the error was detected.
    pub offset: usize,
}

impl CborError {
    /// Construct an error at `offset`.
    #[inline]
    #[must_use]
    pub const fn new(code: ErrorCode, offset: usize) -> Self {
        Self { code, offset }
    }
}

impl fmt::Display for CborError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cbor error at {}: ", self.offset)?;
        match self.code {
            ErrorCode::UnexpectedEof => f.write_str("unexpected end of input"),
            ErrorCode::LengthOverflow => f.write_str("length out of addressable range"),
            ErrorCode::TrailingBytes => f.write_str("trailing bytes after single CBOR item"),
            ErrorCode::AllocationFailed => f.write_str("allocation failed"),
            ErrorCode::DepthLimitExceeded => f.write_str("nesting depth limit exceeded"),
            ErrorCode::InvalidAdditionalInfo(ai) => write!(f, "invalid additional info {ai}"),
            ErrorCode::UnexpectedBreak => f.write_str("unexpected break byte at value position"),
            ErrorCode::InvalidInitialByte(b) => write!(f, "invalid initial byte {b:#04x}"),
            ErrorCode::InvalidChunkType(major) => {
                write!(f, "chunk is not a definite-length major {major} string")
            }
            ErrorCode::Utf8Invalid => f.write_str("text must be valid UTF-8"),
            ErrorCode::MalformedMap => f.write_str("malformed map structure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CborError {}
