use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::{Resource, ResourceId, Subject, SubjectId};

/// Errors that can occur during catalog loading.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    subjects: Vec<Subject>,

    #[serde(default)]
    resources: Vec<Resource>,
}

/// Subjects and documents supplied by the directory.
///
/// Unknown roles, departments or classification names are rejected while
/// parsing. Owner and sharing ids are taken as given.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    subjects: Vec<Subject>,
    resources: Vec<Resource>,
    subject_index: AHashMap<SubjectId, usize>,
    resource_index: AHashMap<ResourceId, usize>,
}

impl Catalog {
    /// Build a catalog, validating ids and time windows.
    pub fn new(subjects: Vec<Subject>, resources: Vec<Resource>) -> Result<Self, CatalogError> {
        validate(&subjects, &resources)?;

        let subject_index = subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        let resource_index = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        Ok(Catalog {
            subjects,
            resources,
            subject_index,
            resource_index,
        })
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Catalog::new(file.subjects, file.resources)
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subject_index.get(id).map(|&i| &self.subjects[i])
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resource_index.get(id).map(|&i| &self.resources[i])
    }

    /// Subjects in file order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Documents in file order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

/// Load a catalog from a YAML file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    Catalog::from_yaml_str(&content)
}

fn validate(subjects: &[Subject], resources: &[Resource]) -> Result<(), CatalogError> {
    let mut seen_subjects = HashSet::new();
    for subject in subjects {
        if subject.id.as_str().is_empty() {
            return Err(CatalogError::Validation(
                "Subject id cannot be empty".to_string(),
            ));
        }
        if !seen_subjects.insert(&subject.id) {
            return Err(CatalogError::Validation(format!(
                "Duplicate subject ID: {}",
                subject.id
            )));
        }
    }

    let mut seen_resources = HashSet::new();
    for resource in resources {
        if resource.id.as_str().is_empty() {
            return Err(CatalogError::Validation(
                "Resource id cannot be empty".to_string(),
            ));
        }
        if !seen_resources.insert(&resource.id) {
            return Err(CatalogError::Validation(format!(
                "Duplicate resource ID: {}",
                resource.id
            )));
        }
        if let Some(window) = resource.allowed_time_range {
            if !window.is_well_formed() {
                return Err(CatalogError::Validation(format!(
                    "Resource {} has time range {} outside 0-23",
                    resource.id, window
                )));
            }
        }
    }

    Ok(())
}
