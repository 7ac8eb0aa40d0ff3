//! Shared fixtures for unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    Classification, Department, EmploymentStatus, Resource, ResourceId, Role, Subject, SubjectId,
};

pub fn subject(id: &str, role: Role, clearance: Classification) -> Subject {
    Subject {
        id: SubjectId::new(id),
        name: format!("Subject {}", id),
        role,
        department: Department::Operations,
        clearance,
        employment_status: EmploymentStatus::Permanent,
        contract_end_date: None,
        mfa_enabled: false,
        last_login: None,
    }
}

pub fn contractor(id: &str, role: Role, end: Option<NaiveDate>) -> Subject {
    Subject {
        employment_status: EmploymentStatus::Contract,
        contract_end_date: end,
        ..subject(id, role, Classification::Internal)
    }
}

pub fn resource(id: &str, classification: Classification, owner: &str, roles: &[Role]) -> Resource {
    Resource {
        id: ResourceId::new(id),
        title: format!("Document {}", id),
        classification,
        owner_id: SubjectId::new(owner),
        department: Department::Operations,
        allowed_roles: roles.to_vec(),
        allowed_time_range: None,
        shared_with: Default::default(),
        last_modified: date(2025, 11, 12),
        content: String::new(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, 0, 0).expect("valid time")
}
