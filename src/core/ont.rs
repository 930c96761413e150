use crate::adapters::mlwh;
use crate::core::metadata::{self, OntInstrument, ONT_NAMESPACE};
use crate::domain::model::{Avu, FlowcellPlex};
use crate::domain::ports::AnnotationStore;
use crate::utils::error::{Result, SyncError};
use regex::Regex;
use sqlx::MySqlPool;
use std::path::Path;

const TAG_IDENTIFIER_PATTERN: &str = r"-(?P<tag_index>\d+)$";

fn tag_identifier_regex() -> Regex {
    Regex::new(TAG_IDENTIFIER_PATTERN).unwrap()
}

/// Returns the barcode tag index given a barcode tag identifier,
/// e.g. `ONT_EXP-012-11` has tag index 11.
pub fn tag_index(tag_identifier: &str) -> Result<u32> {
    let re = tag_identifier_regex();
    match re.captures(tag_identifier) {
        Some(caps) => caps["tag_index"]
            .parse::<u32>()
            .map_err(|_| SyncError::InvalidTagIdentifier {
                value: tag_identifier.to_string(),
            }),
        None => Err(SyncError::InvalidTagIdentifier {
            value: tag_identifier.to_string(),
        }),
    }
}

/// Returns the barcode name given a barcode tag identifier. The name is
/// used most often for directory naming in ONT experiment results, in the
/// style created by the Guppy and qcat de-plexers (`barcode01`, `barcode02`...).
pub fn barcode_name(tag_identifier: &str) -> Result<String> {
    let index = tag_index(tag_identifier)?;
    Ok(format!("barcode{:02}", index))
}

/// Annotates an ONT run-folder collection with warehouse-derived metadata.
///
/// The run-folder collection always receives the namespaced experiment name
/// and instrument slot. Multiplexed elements are annotated on their
/// `barcode<0n>` sub-collection; un-plexed elements on the run folder itself.
pub async fn annotate_collection<S: AnnotationStore>(
    store: &S,
    path: &Path,
    experiment_name: &str,
    instrument_slot: i32,
    plexes: &[FlowcellPlex],
) -> Result<()> {
    let avus: Vec<Avu> = [
        Avu::new(OntInstrument::ExperimentName.attribute(), experiment_name),
        Avu::new(OntInstrument::InstrumentSlot.attribute(), instrument_slot),
    ]
    .iter()
    .map(|avu| avu.with_namespace(ONT_NAMESPACE))
    .collect();

    // These AVUs should be present already
    store.add_metadata(path, &avus).await?;

    for plex in plexes {
        tracing::debug!(
            experiment = experiment_name,
            slot = instrument_slot,
            tag_identifier = plex.tag_identifier.as_deref(),
            "Found experiment / slot / tag index"
        );

        let study_avus = metadata::make_study_metadata(&plex.study);
        let sample_avus = metadata::make_sample_metadata(&plex.sample);
        // The ACL could be different for each plex
        let acl = metadata::make_sample_acl(&plex.sample, &plex.study);

        match plex.tag_identifier.as_deref() {
            Some(tag_identifier) => {
                let barcode_path = path.join(barcode_name(tag_identifier)?);
                tracing::debug!(path = %barcode_path.display(), tag_identifier, "Annotating barcode collection");

                let tag_avu = [Avu::new("tag_index", tag_index(tag_identifier)?)];
                store.add_metadata(&barcode_path, &tag_avu).await?;
                store.add_metadata(&barcode_path, &study_avus).await?;
                store.add_metadata(&barcode_path, &sample_avus).await?;
                store.add_permissions(&barcode_path, &acl, true).await?;
            }
            None => {
                // No tag index, so this is not a multiplexed run; the
                // containing collection carries everything.
                store.add_metadata(path, &study_avus).await?;
                store.add_metadata(path, &sample_avus).await?;
                store.add_permissions(path, &acl, true).await?;
            }
        }
    }

    Ok(())
}

/// Looks up the plex information for an experiment position in the
/// warehouse and annotates the results collection accordingly.
pub async fn annotate_results_collection<S: AnnotationStore>(
    pool: &MySqlPool,
    store: &S,
    path: &Path,
    experiment_name: &str,
    instrument_slot: i32,
) -> Result<()> {
    tracing::debug!(
        experiment = experiment_name,
        slot = instrument_slot,
        "Searching the warehouse for plex information"
    );

    let plexes = mlwh::find_plex_info(pool, experiment_name, instrument_slot).await?;
    annotate_collection(store, path, experiment_name, instrument_slot, &plexes).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_index() {
        assert_eq!(tag_index("ONT_EXP-012-11").unwrap(), 11);
        assert_eq!(tag_index("ONT-Tag-Identifier-1").unwrap(), 1);
        assert_eq!(tag_index("abc-0").unwrap(), 0);
    }

    #[test]
    fn test_tag_index_invalid() {
        assert!(matches!(
            tag_index("no_suffix_here"),
            Err(SyncError::InvalidTagIdentifier { .. })
        ));
        assert!(tag_index("trailing-dash-").is_err());
        assert!(tag_index("").is_err());
    }

    #[test]
    fn test_barcode_name_zero_pads_to_two_digits() {
        assert_eq!(barcode_name("ONT_EXP-012-1").unwrap(), "barcode01");
        assert_eq!(barcode_name("ONT_EXP-012-09").unwrap(), "barcode09");
        assert_eq!(barcode_name("ONT_EXP-012-11").unwrap(), "barcode11");
        assert_eq!(barcode_name("ONT_EXP-012-101").unwrap(), "barcode101");
    }

    #[test]
    fn test_barcode_name_invalid() {
        assert!(barcode_name("no_suffix_here").is_err());
    }
}
