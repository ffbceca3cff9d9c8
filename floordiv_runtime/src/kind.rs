//! Exact numeric kinds and their display names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language level the engine emulates.
///
/// Controls the display name of the arbitrary-precision integer kind and the
/// default for the legacy coercion protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLevel {
    /// Separate `int` and `long` types, coercion protocol available
    #[default]
    Legacy,
    /// Unified `int` type, no coercion protocol
    Modern,
}

/// A concrete numeric kind whose layout the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExactKind {
    /// Machine-sized integer
    SmallInt,
    /// Arbitrary-precision integer
    BigInt,
    /// 64-bit float
    Float,
}

impl ExactKind {
    /// Canonical display name for this kind under `level`.
    ///
    /// The arbitrary-precision integer reads as `long` at the legacy level and
    /// as `int` at the modern level.
    pub fn display_name(self, level: LanguageLevel) -> &'static str {
        match (self, level) {
            (ExactKind::SmallInt, _) => "int",
            (ExactKind::BigInt, LanguageLevel::Legacy) => "long",
            (ExactKind::BigInt, LanguageLevel::Modern) => "int",
            (ExactKind::Float, _) => "float",
        }
    }

    /// Check if this kind is an integer kind
    pub fn is_integer(self) -> bool {
        matches!(self, ExactKind::SmallInt | ExactKind::BigInt)
    }
}

impl fmt::Display for ExactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExactKind::SmallInt => write!(f, "SmallInt"),
            ExactKind::BigInt => write!(f, "BigInt"),
            ExactKind::Float => write!(f, "Float"),
        }
    }
}
