use serde::{Deserialize, Serialize};
use std::fmt;

/// Sensitivity level shared by subject clearance and document classification.
///
/// Levels are totally ordered: `Public < Internal < Confidential`.
/// The discriminant is the rank used by the mandatory access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Classification {
    /// Visible to everyone in the organisation
    Public = 1,
    /// Internal business material
    Internal = 2,
    /// Restricted material (payroll, personnel files)
    Confidential = 3,
}

impl Classification {
    /// All levels, lowest first.
    pub const ALL: [Classification; 3] = [
        Classification::Public,
        Classification::Internal,
        Classification::Confidential,
    ];

    /// Returns the ordinal rank (1-3).
    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Returns true if a holder of this clearance may read material at `level`.
    #[inline]
    pub fn dominates(&self, level: Classification) -> bool {
        self.rank() >= level.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Public => "Public",
            Classification::Internal => "Internal",
            Classification::Confidential => "Confidential",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
