use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use super::Classification;

/// Unique subject (employee) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        SubjectId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lookup by &str in id-keyed maps
impl Borrow<str> for SubjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organisational role. Exactly one per subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SystemAdmin,
    SecurityAdmin,
    HrDirector,
    HrManager,
    DeptManager,
    PayrollOfficer,
    ItSupport,
    ProjectSupervisor,
    SeniorEmployee,
    JuniorEmployee,
    ContractEmployee,
}

impl Role {
    /// Every role in the enumeration.
    pub const ALL: [Role; 11] = [
        Role::SystemAdmin,
        Role::SecurityAdmin,
        Role::HrDirector,
        Role::HrManager,
        Role::DeptManager,
        Role::PayrollOfficer,
        Role::ItSupport,
        Role::ProjectSupervisor,
        Role::SeniorEmployee,
        Role::JuniorEmployee,
        Role::ContractEmployee,
    ];

    /// The role that receives the administrative override grant.
    pub const ADMINISTRATIVE_OVERRIDE: Role = Role::SystemAdmin;

    /// Human-readable role title.
    pub fn title(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "System Administrator",
            Role::SecurityAdmin => "Security Administrator",
            Role::HrDirector => "HR Director",
            Role::HrManager => "HR Manager",
            Role::DeptManager => "Department Manager",
            Role::PayrollOfficer => "Payroll Officer",
            Role::ItSupport => "IT Support Officer",
            Role::ProjectSupervisor => "Project Supervisor",
            Role::SeniorEmployee => "Senior Employee",
            Role::JuniorEmployee => "Junior Employee",
            Role::ContractEmployee => "Contract Employee",
        }
    }

    #[inline]
    pub fn is_administrative_override(&self) -> bool {
        *self == Role::ADMINISTRATIVE_OVERRIDE
    }

    /// Whether this role may read every subject's audit records.
    pub fn can_view_full_audit(&self) -> bool {
        matches!(self, Role::SystemAdmin | Role::SecurityAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Organisational department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    Hr,
    Finance,
    It,
    Operations,
    Rd,
    Marketing,
    Management,
}

impl Department {
    pub fn title(&self) -> &'static str {
        match self {
            Department::Hr => "Human Resources",
            Department::Finance => "Finance",
            Department::It => "Information Technology",
            Department::Operations => "Operations",
            Department::Rd => "Research & Development",
            Department::Marketing => "Marketing",
            Department::Management => "Management",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmploymentStatus {
    #[default]
    Permanent,
    Contract,
}

/// An already-authenticated principal requesting access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique employee identifier
    pub id: SubjectId,

    /// Display name
    pub name: String,

    pub role: Role,

    pub department: Department,

    /// Highest classification this subject may read
    pub clearance: Classification,

    #[serde(default)]
    pub employment_status: EmploymentStatus,

    /// Last day of the contract. Only meaningful for contract staff;
    /// absence means no expiry constraint.
    #[serde(default)]
    pub contract_end_date: Option<NaiveDate>,

    /// Second factor enrolled
    #[serde(default)]
    pub mfa_enabled: bool,

    /// Informational, as supplied by the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl Subject {
    /// Contract expiry date, if one applies to this subject.
    ///
    /// Permanent staff never expire, even if a stale date is present.
    pub fn contract_expiry(&self) -> Option<NaiveDate> {
        match self.employment_status {
            EmploymentStatus::Contract => self.contract_end_date,
            EmploymentStatus::Permanent => None,
        }
    }
}
