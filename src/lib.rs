pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{DbArgs, EntrypointConfig, SyncCli, SyncCommand};
pub use crate::config::{DbConfig, DbSettings};

pub use crate::core::{metadata, ont, readiness};
pub use crate::domain::model::{AccessControl, Avu, FlowcellPlex, Permission, Sample, Study};
pub use crate::domain::ports::{AnnotationStore, ReadinessProbe};
pub use crate::utils::error::{Result, SyncError};
