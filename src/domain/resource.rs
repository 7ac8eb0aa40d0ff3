use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Borrow;
use std::fmt;

use super::subject::{Department, Role, SubjectId};
use super::Classification;

/// Unique document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        ResourceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lookup by &str in id-keyed maps
impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock hours during which a document may be opened.
///
/// Both bounds are inclusive: `{start: 8, end: 17}` admits 08:00 through 17:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: u8,
    pub end: u8,
}

impl TimeWindow {
    pub fn new(start: u8, end: u8) -> Self {
        TimeWindow { start, end }
    }

    /// Check if an hour of day (0-23) falls inside the window.
    #[inline]
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= u32::from(self.start) && hour <= u32::from(self.end)
    }

    /// Both bounds are valid hours of the day.
    pub fn is_well_formed(&self) -> bool {
        self.start <= 23 && self.end <= 23
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00-{}:00", self.start, self.end)
    }
}

/// A protected document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,

    pub title: String,

    pub classification: Classification,

    /// Subject that owns the document (discretionary grants)
    pub owner_id: SubjectId,

    pub department: Department,

    /// Roles granted access; may list every role
    #[serde(default)]
    pub allowed_roles: Vec<Role>,

    /// Optional access hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_time_range: Option<TimeWindow>,

    /// Subjects granted access individually, regardless of role
    #[serde(default)]
    pub shared_with: SmallVec<[SubjectId; 4]>,

    pub last_modified: NaiveDate,

    #[serde(default)]
    pub content: String,
}

impl Resource {
    #[inline]
    pub fn is_owned_by(&self, subject: &SubjectId) -> bool {
        self.owner_id == *subject
    }

    #[inline]
    pub fn is_shared_with(&self, subject: &SubjectId) -> bool {
        self.shared_with.iter().any(|id| id == subject)
    }

    #[inline]
    pub fn permits_role(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}
