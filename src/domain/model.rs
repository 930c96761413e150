use serde::{Deserialize, Serialize};

/// An attribute/value pair attached to a collection or data object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Avu {
    pub attribute: String,
    pub value: String,
}

impl Avu {
    pub fn new(attribute: impl Into<String>, value: impl ToString) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.to_string(),
        }
    }

    /// Returns a copy with the attribute prefixed by a namespace, e.g.
    /// `experiment_name` under `ont` becomes `ont:experiment_name`.
    pub fn with_namespace(&self, namespace: &str) -> Self {
        Self {
            attribute: format!("{}:{}", namespace, self.attribute),
            value: self.value.clone(),
        }
    }
}

impl std::fmt::Display for Avu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.attribute, self.value)
    }
}

/// Access level, in the icommands spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Null,
    Read,
    Write,
    Own,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::Null => "null",
            Permission::Read => "read",
            Permission::Write => "write",
            Permission::Own => "own",
        }
    }
}

/// A single access-control entry: a user or group and its permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessControl {
    pub subject: String,
    pub permission: Permission,
}

impl AccessControl {
    pub fn new(subject: impl Into<String>, permission: Permission) -> Self {
        Self {
            subject: subject.into(),
            permission,
        }
    }
}

/// The subset of warehouse sample tracking fields carried into metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sample {
    pub sanger_sample_id: Option<String>,
    pub name: Option<String>,
    pub accession_number: Option<String>,
    pub donor_id: Option<String>,
    pub supplier_name: Option<String>,
    pub consent_withdrawn: bool,
}

/// The subset of warehouse study tracking fields carried into metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Study {
    pub id_study_lims: Option<String>,
    pub name: Option<String>,
    pub accession_number: Option<String>,
}

/// One flowcell element of an ONT run at a given instrument position.
///
/// Un-plexed data has no tag identifier and exactly one element per
/// position; multiplexed data has one element per plex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowcellPlex {
    pub tag_identifier: Option<String>,
    pub sample: Sample,
    pub study: Study,
}
