use serde::Serialize;

use crate::analysis::{GwiResult, InfoTimeResult, OrganismalityResult, SmfResult, SynergyResult};
use crate::domain::{Reading, VitalSign};

/// The outcome of one vital sign. The outer `Reading` is `Unavailable` only when an
/// input file was missing and the pipeline never ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "metric", content = "outcome", rename_all = "snake_case")]
pub enum VitalReport {
    Organismality(Reading<OrganismalityResult>),
    Synergy(Reading<SynergyResult>),
    Gwi(Reading<GwiResult>),
    Smf(Reading<SmfResult>),
    InfoTime(Reading<InfoTimeResult>),
}

impl VitalReport {
    pub fn sign(&self) -> VitalSign {
        match self {
            VitalReport::Organismality(_) => VitalSign::Organismality,
            VitalReport::Synergy(_) => VitalSign::Synergy,
            VitalReport::Gwi(_) => VitalSign::Gwi,
            VitalReport::Smf(_) => VitalSign::Smf,
            VitalReport::InfoTime(_) => VitalSign::InfoTime,
        }
    }
}

/// What the engine hands back for each requested sign
#[derive(Debug, Clone, Serialize)]
pub struct ReportEnvelope {
    pub sign: VitalSign,
    pub duration_ms: u128,

    // Success: the report (which may itself be unavailable)
    // Failure: the error chain rendered as a string (bad schema, unreadable file)
    pub result: Result<VitalReport, String>,
}
