use crate::domain::model::{AccessControl, Avu, Permission, Sample, Study};
use chrono::NaiveDateTime;

pub const ONT_NAMESPACE: &str = "ont";
pub const DUBLIN_CORE_NAMESPACE: &str = "dcterms";

/// SequenceScape sample tracking attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedSample {
    AccessionNumber,
    Cohort,
    CommonName,
    Consent,
    ConsentWithdrawn,
    Control,
    DonorId,
    Id,
    Name,
    PublicName,
    SupplierName,
}

impl TrackedSample {
    pub fn attribute(&self) -> &'static str {
        match self {
            TrackedSample::AccessionNumber => "sample_accession_number",
            TrackedSample::Cohort => "sample_cohort",
            TrackedSample::CommonName => "sample_common_name",
            TrackedSample::Consent => "sample_consent",
            TrackedSample::ConsentWithdrawn => "sample_consent_withdrawn",
            TrackedSample::Control => "sample_control",
            TrackedSample::DonorId => "sample_donor_id",
            TrackedSample::Id => "sample_id",
            TrackedSample::Name => "sample",
            TrackedSample::PublicName => "sample_public_name",
            TrackedSample::SupplierName => "sample_supplier_name",
        }
    }
}

/// SequenceScape study tracking attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedStudy {
    AccessionNumber,
    Id,
    Name,
    Title,
}

impl TrackedStudy {
    pub fn attribute(&self) -> &'static str {
        match self {
            TrackedStudy::AccessionNumber => "study_accession_number",
            TrackedStudy::Id => "study_id",
            TrackedStudy::Name => "study",
            TrackedStudy::Title => "study_title",
        }
    }
}

/// Oxford Nanopore platform attributes, namespaced under `ont`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OntInstrument {
    ExperimentName,
    InstrumentSlot,
}

impl OntInstrument {
    pub fn attribute(&self) -> &'static str {
        match self {
            OntInstrument::ExperimentName => "experiment_name",
            OntInstrument::InstrumentSlot => "instrument_slot",
        }
    }
}

/// Dublin Core provenance attributes, namespaced under `dcterms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DublinCore {
    Creator,
    Created,
    Modified,
}

impl DublinCore {
    pub fn attribute(&self) -> &'static str {
        match self {
            DublinCore::Creator => "creator",
            DublinCore::Created => "created",
            DublinCore::Modified => "modified",
        }
    }
}

// Timestamps are rendered to seconds precision.
fn format_timestamp(when: NaiveDateTime) -> String {
    when.format("%Y-%m-%dT%H:%M:%S").to_string()
}

pub fn make_creation_metadata(creator: &str, created: NaiveDateTime) -> Vec<Avu> {
    vec![
        Avu::new(DublinCore::Creator.attribute(), creator).with_namespace(DUBLIN_CORE_NAMESPACE),
        Avu::new(DublinCore::Created.attribute(), format_timestamp(created))
            .with_namespace(DUBLIN_CORE_NAMESPACE),
    ]
}

pub fn make_modification_metadata(modified: NaiveDateTime) -> Vec<Avu> {
    vec![
        Avu::new(DublinCore::Modified.attribute(), format_timestamp(modified))
            .with_namespace(DUBLIN_CORE_NAMESPACE),
    ]
}

fn avu_if_value(attribute: &str, value: Option<&str>) -> Option<Avu> {
    value.map(|v| Avu::new(attribute, v))
}

/// Returns tracking metadata for a sample, one AVU per populated field.
/// Consent withdrawal contributes an AVU only when the flag is set.
pub fn make_sample_metadata(sample: &Sample) -> Vec<Avu> {
    let consent_withdrawn = if sample.consent_withdrawn {
        Some("1")
    } else {
        None
    };

    let av = [
        (TrackedSample::Id, sample.sanger_sample_id.as_deref()),
        (TrackedSample::Name, sample.name.as_deref()),
        (
            TrackedSample::AccessionNumber,
            sample.accession_number.as_deref(),
        ),
        (TrackedSample::DonorId, sample.donor_id.as_deref()),
        (TrackedSample::SupplierName, sample.supplier_name.as_deref()),
        (TrackedSample::ConsentWithdrawn, consent_withdrawn),
    ];

    av.iter()
        .filter_map(|(attr, value)| avu_if_value(attr.attribute(), *value))
        .collect()
}

/// Returns tracking metadata for a study, one AVU per populated field.
pub fn make_study_metadata(study: &Study) -> Vec<Avu> {
    let av = [
        (TrackedStudy::Id, study.id_study_lims.as_deref()),
        (TrackedStudy::Name, study.name.as_deref()),
        (
            TrackedStudy::AccessionNumber,
            study.accession_number.as_deref(),
        ),
    ];

    av.iter()
        .filter_map(|(attr, value)| avu_if_value(attr.attribute(), *value))
        .collect()
}

/// Returns the access control list for a sample's data. Data belongs to
/// the study's iRODS group; consent withdrawal downgrades access to null.
pub fn make_sample_acl(sample: &Sample, study: &Study) -> Vec<AccessControl> {
    let group = format!(
        "ss_{}",
        study.id_study_lims.as_deref().unwrap_or_default()
    );
    let permission = if sample.consent_withdrawn {
        Permission::Null
    } else {
        Permission::Read
    };

    vec![AccessControl::new(group, permission)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Sample {
        Sample {
            sanger_sample_id: Some("sample_01".to_string()),
            name: Some("sample 1".to_string()),
            accession_number: None,
            donor_id: None,
            supplier_name: Some("Supplier A".to_string()),
            consent_withdrawn: false,
        }
    }

    fn study() -> Study {
        Study {
            id_study_lims: Some("study_02".to_string()),
            name: Some("Study Y".to_string()),
            accession_number: None,
        }
    }

    #[test]
    fn test_sample_metadata_skips_absent_fields() {
        let avus = make_sample_metadata(&sample());

        assert_eq!(
            avus,
            vec![
                Avu::new("sample_id", "sample_01"),
                Avu::new("sample", "sample 1"),
                Avu::new("sample_supplier_name", "Supplier A"),
            ]
        );
    }

    #[test]
    fn test_consent_withdrawn_avu_only_when_set() {
        let mut s = sample();
        assert!(!make_sample_metadata(&s)
            .iter()
            .any(|avu| avu.attribute == "sample_consent_withdrawn"));

        s.consent_withdrawn = true;
        assert!(make_sample_metadata(&s).contains(&Avu::new("sample_consent_withdrawn", "1")));
    }

    #[test]
    fn test_study_metadata() {
        let avus = make_study_metadata(&study());

        assert_eq!(
            avus,
            vec![
                Avu::new("study_id", "study_02"),
                Avu::new("study", "Study Y"),
            ]
        );
    }

    #[test]
    fn test_sample_acl_grants_study_group_read() {
        let acl = make_sample_acl(&sample(), &study());
        assert_eq!(acl, vec![AccessControl::new("ss_study_02", Permission::Read)]);
    }

    #[test]
    fn test_sample_acl_null_on_consent_withdrawn() {
        let mut s = sample();
        s.consent_withdrawn = true;

        let acl = make_sample_acl(&s, &study());
        assert_eq!(acl, vec![AccessControl::new("ss_study_02", Permission::Null)]);
    }

    #[test]
    fn test_creation_metadata_is_namespaced() {
        let created = NaiveDate::from_ymd_opt(2020, 6, 14)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let avus = make_creation_metadata("ont-metasync", created);

        assert_eq!(
            avus,
            vec![
                Avu::new("dcterms:creator", "ont-metasync"),
                Avu::new("dcterms:created", "2020-06-14T12:30:00"),
            ]
        );
    }
}
