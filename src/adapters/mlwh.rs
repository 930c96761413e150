use crate::domain::model::{FlowcellPlex, Sample, Study};
use crate::domain::ports::ReadinessProbe;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{Connection, FromRow, MySqlConnection, MySqlPool};

pub async fn connect(db_url: &str) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    Ok(pool)
}

pub async fn server_version(pool: &MySqlPool) -> Result<String> {
    let version: String = sqlx::query_scalar("SELECT version()").fetch_one(pool).await?;
    Ok(version)
}

/// Finds ONT experiments updated since a given date and time. An update
/// to any element of an experiment (any position of a multi-flowcell
/// experiment, any plex of a multiplexed position) surfaces the whole
/// experiment.
pub async fn find_recent_experiments(
    pool: &MySqlPool,
    since: NaiveDateTime,
) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT experiment_name FROM oseq_flowcell WHERE last_updated >= ?",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Finds ONT experiment name and instrument position pairs updated since
/// a given date and time, ordered by name then position.
pub async fn find_recent_positions(
    pool: &MySqlPool,
    since: NaiveDateTime,
) -> Result<Vec<(String, i32)>> {
    let positions = sqlx::query_as::<_, (String, i32)>(
        "SELECT experiment_name, instrument_slot FROM oseq_flowcell \
         WHERE last_updated >= ? \
         GROUP BY experiment_name, instrument_slot \
         ORDER BY experiment_name ASC, instrument_slot ASC",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(positions)
}

// Flat join row; composed into the domain model below.
#[derive(Debug, FromRow)]
struct PlexRow {
    tag_identifier: Option<String>,
    sanger_sample_id: Option<String>,
    sample_name: Option<String>,
    sample_accession: Option<String>,
    donor_id: Option<String>,
    supplier_name: Option<String>,
    consent_withdrawn: Option<i8>,
    id_study_lims: Option<String>,
    study_name: Option<String>,
    study_accession: Option<String>,
}

impl From<PlexRow> for FlowcellPlex {
    fn from(row: PlexRow) -> Self {
        FlowcellPlex {
            tag_identifier: row.tag_identifier,
            sample: Sample {
                sanger_sample_id: row.sanger_sample_id,
                name: row.sample_name,
                accession_number: row.sample_accession,
                donor_id: row.donor_id,
                supplier_name: row.supplier_name,
                consent_withdrawn: row.consent_withdrawn.unwrap_or(0) != 0,
            },
            study: Study {
                id_study_lims: row.id_study_lims,
                name: row.study_name,
                accession_number: row.study_accession,
            },
        }
    }
}

/// Returns the flowcell elements for one experiment position: a single
/// element for un-plexed data, one per plex for multiplexed data.
pub async fn find_plex_info(
    pool: &MySqlPool,
    experiment_name: &str,
    instrument_slot: i32,
) -> Result<Vec<FlowcellPlex>> {
    let rows = sqlx::query_as::<_, PlexRow>(
        "SELECT f.tag_identifier, \
                s.sanger_sample_id, \
                s.name AS sample_name, \
                s.accession_number AS sample_accession, \
                s.donor_id, \
                s.supplier_name, \
                s.consent_withdrawn, \
                t.id_study_lims, \
                t.name AS study_name, \
                t.accession_number AS study_accession \
         FROM oseq_flowcell f \
         JOIN sample s ON f.id_sample_tmp = s.id_sample_tmp \
         JOIN study t ON f.id_study_tmp = t.id_study_tmp \
         WHERE f.experiment_name = ? AND f.instrument_slot = ? \
         ORDER BY f.experiment_name ASC, f.instrument_slot ASC, \
                  f.tag_identifier ASC, f.tag2_identifier ASC",
    )
    .bind(experiment_name)
    .bind(instrument_slot)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(FlowcellPlex::from).collect())
}

/// Readiness probe that opens a fresh connection and pings it, the
/// `mysqladmin ping` of the pre-pool world.
pub struct MySqlProbe {
    db_url: String,
}

impl MySqlProbe {
    pub fn new(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
        }
    }
}

#[async_trait]
impl ReadinessProbe for MySqlProbe {
    fn name(&self) -> &str {
        "MySQL"
    }

    async fn check(&self) -> Result<()> {
        let mut conn = MySqlConnection::connect(&self.db_url).await?;
        conn.ping().await?;
        conn.close().await?;
        Ok(())
    }
}
