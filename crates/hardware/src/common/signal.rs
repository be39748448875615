//! Symbolic identifiers for the wrapper's external input lines.

use std::fmt;
use std::str::FromStr;

/// Input line an external controller can raise or lower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignalId {
    /// Reset request, fed through the two-sample synchronizer.
    Reset,
    /// External interrupt request, latched for one commit.
    ExternalIrq,
}

impl SignalId {
    /// Raw identifier of the reset line.
    pub const RESET: u32 = 0;
    /// Raw identifier of the external interrupt line.
    pub const EXTERNAL_IRQ: u32 = 1;

    /// Maps a raw controller id to a signal; unknown ids yield `None`.
    pub const fn from_raw(id: u32) -> Option<Self> {
        match id {
            Self::RESET => Some(Self::Reset),
            Self::EXTERNAL_IRQ => Some(Self::ExternalIrq),
            _ => None,
        }
    }

    /// Returns the raw controller id.
    pub const fn raw(self) -> u32 {
        match self {
            Self::Reset => Self::RESET,
            Self::ExternalIrq => Self::EXTERNAL_IRQ,
        }
    }
}

impl fmt::Display for SignalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "RESET"),
            Self::ExternalIrq => write!(f, "EXTERNAL_IRQ"),
        }
    }
}

impl FromStr for SignalId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RESET" => Ok(Self::Reset),
            "EXTERNAL_IRQ" | "IRQ" => Ok(Self::ExternalIrq),
            other => Err(format!("unknown signal '{other}'")),
        }
    }
}
