//! Result Codes
//!
//! Named numeric codes carried by outcomes and envelopes. These are
//! application conventions, not transport status codes.

use serde::{Deserialize, Serialize};

/// Result code attached to every outcome and envelope.
///
/// The reserved values have named variants. Any other value is a
/// caller-chosen `Custom` code, built with [`ResultCode::custom`] or
/// `ResultCode::from(i32)`. Both map reserved values to their named variant,
/// so a `Custom` code never holds `0`, `-1` or `199` and `==` agrees with
/// `match`.
///
/// ```
/// use carrier_core::ResultCode;
///
/// assert!(matches!(ResultCode::custom(199), ResultCode::ProcessingFailed));
/// assert_eq!(ResultCode::custom(404).as_i32(), 404);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ResultCode {
    /// The operation succeeded. Value `0`.
    Success,
    /// Generic failure with no more specific code. Value `-1`.
    Unknown,
    /// Default for validation and exception failures. Value `199`.
    ProcessingFailed,
    /// Caller-defined code outside the reserved values.
    Custom(CustomCode),
}

/// A caller-defined code value, never one of the reserved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomCode(i32);

impl CustomCode {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl ResultCode {
    pub const SUCCESS: i32 = 0;
    pub const UNKNOWN: i32 = -1;
    pub const PROCESSING_FAILED: i32 = 199;

    /// Build a code from a caller value, using the named variant for
    /// reserved values.
    pub fn custom(value: i32) -> Self {
        match value {
            Self::SUCCESS => Self::Success,
            Self::UNKNOWN => Self::Unknown,
            Self::PROCESSING_FAILED => Self::ProcessingFailed,
            other => Self::Custom(CustomCode(other)),
        }
    }

    /// Numeric value of this code.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Success => Self::SUCCESS,
            Self::Unknown => Self::UNKNOWN,
            Self::ProcessingFailed => Self::PROCESSING_FAILED,
            Self::Custom(code) => code.value(),
        }
    }

    /// True for the named reserved codes.
    pub fn is_reserved(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl Default for ResultCode {
    fn default() -> Self {
        Self::Unknown
    }
}

impl From<i32> for ResultCode {
    fn from(value: i32) -> Self {
        Self::custom(value)
    }
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}
