pub mod metadata;
pub mod ont;
pub mod readiness;

pub use crate::domain::model::{AccessControl, Avu, FlowcellPlex, Sample, Study};
pub use crate::domain::ports::{AnnotationStore, ReadinessProbe};
pub use crate::utils::error::Result;
