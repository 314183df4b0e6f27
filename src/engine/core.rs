use anyhow::Result;
use rayon::prelude::*;
use std::time::Instant;

use crate::analysis::{
    GwiColumns, InfoTimeColumns, OrganismalityColumns, SmfColumns, SynergyColumns, compute_gwi,
    compute_info_time, compute_organismality, compute_smf, compute_synergy,
};
use crate::config::{ANALYSIS, AnalysisConfig, DATA_FILES, DEBUG_FLAGS};
use crate::data::{DataSources, Table};
use crate::domain::{Reading, VitalSign};

use super::messages::{ReportEnvelope, VitalReport};

/// Column names for every pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineColumns {
    pub organismality: OrganismalityColumns,
    pub synergy: SynergyColumns,
    pub gwi: GwiColumns,
    pub smf: SmfColumns,
    pub info_time: InfoTimeColumns,
}

/// Loads inputs, skips metrics whose files are missing, and runs the pipelines.
pub struct VitalsEngine {
    pub sources: DataSources,
    pub config: AnalysisConfig,
    pub columns: PipelineColumns,
}

impl VitalsEngine {
    pub fn new(sources: DataSources) -> Self {
        Self {
            sources,
            config: ANALYSIS,
            columns: PipelineColumns::default(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_columns(mut self, columns: PipelineColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Run the requested signs concurrently. Output order follows `signs`.
    pub fn run_all(&self, signs: &[VitalSign]) -> Vec<ReportEnvelope> {
        signs.par_iter().map(|&sign| self.run(sign)).collect()
    }

    /// Run one sign, timing it and flattening errors into the envelope.
    pub fn run(&self, sign: VitalSign) -> ReportEnvelope {
        let start = Instant::now();
        let result = self.evaluate(sign).map_err(|e| format!("{:#}", e));
        let duration_ms = start.elapsed().as_millis();

        if cfg!(debug_assertions) && DEBUG_FLAGS.print_engine_timings {
            log::info!("{} finished in {}ms", sign, duration_ms);
        }
        if let Err(e) = &result {
            log::error!("{} failed: {}", sign, e);
        }

        ReportEnvelope {
            sign,
            duration_ms,
            result,
        }
    }

    pub fn evaluate(&self, sign: VitalSign) -> Result<VitalReport> {
        let config = &self.config;
        let columns = &self.columns;

        let report = match sign {
            VitalSign::Organismality => {
                let treaties = self.sources.load_treaties()?;
                let conflict = self.sources.load_conflict()?;
                VitalReport::Organismality(match (&treaties, &conflict) {
                    (Some(t), Some(c)) => Reading::Computed(compute_organismality(
                        t,
                        c,
                        &columns.organismality,
                        &config.organismality,
                    )?),
                    _ => Reading::missing(missing_inputs(&[
                        (DATA_FILES.treaties, &treaties),
                        (DATA_FILES.conflict, &conflict),
                    ])),
                })
            }
            VitalSign::Synergy => {
                let (news, pubs, conflict) = self.sources.load_synergy_streams()?;
                VitalReport::Synergy(match (&news, &pubs) {
                    (Some(n), Some(p)) => Reading::Computed(compute_synergy(
                        n,
                        p,
                        conflict.as_ref(),
                        &columns.synergy,
                        &config.synergy,
                    )?),
                    _ => Reading::missing(missing_inputs(&[
                        (DATA_FILES.synergy_news, &news),
                        (DATA_FILES.synergy_pubs, &pubs),
                    ])),
                })
            }
            VitalSign::Gwi => {
                let (news, wiki) = self.sources.load_gwi_streams()?;
                VitalReport::Gwi(match (&news, &wiki) {
                    (Some(n), Some(w)) => compute_gwi(n, w, &columns.gwi, &config.gwi)?,
                    _ => Reading::missing(missing_inputs(&[
                        (DATA_FILES.gwi_news, &news),
                        (DATA_FILES.gwi_wiki, &wiki),
                    ])),
                })
            }
            VitalSign::Smf => {
                let target = self.sources.load_co2_target()?;
                let actual = self.sources.load_co2_actual()?;
                VitalReport::Smf(match (&target, &actual) {
                    (Some(t), Some(a)) => {
                        Reading::Computed(compute_smf(t, a, &columns.smf, &config.smf)?)
                    }
                    _ => Reading::missing(missing_inputs(&[
                        (DATA_FILES.co2_target, &target),
                        (DATA_FILES.co2_actual, &actual),
                    ])),
                })
            }
            VitalSign::InfoTime => {
                let skill = self.sources.load_skill()?;
                VitalReport::InfoTime(match &skill {
                    Some(s) => Reading::Computed(compute_info_time(
                        s,
                        &columns.info_time,
                        &config.info_time,
                    )?),
                    None => Reading::missing(DATA_FILES.skill),
                })
            }
        };

        Ok(report)
    }
}

fn missing_inputs(inputs: &[(&str, &Option<Table>)]) -> String {
    inputs
        .iter()
        .filter(|(_, table)| table.is_none())
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}
