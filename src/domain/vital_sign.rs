use serde::Serialize;
use std::fmt;

/// The five vital signs, in reporting order.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    strum_macros::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum VitalSign {
    Organismality,
    Synergy,
    Gwi,
    Smf,
    InfoTime,
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VitalSign::Organismality => write!(f, "Organismality Index (OI)"),
            VitalSign::Synergy => write!(f, "Synergy / O-information-like indicator"),
            VitalSign::Gwi => write!(f, "Global Workspace Ignition (GWI)"),
            VitalSign::Smf => write!(f, "Self-Model Fidelity (SMF)"),
            VitalSign::InfoTime => write!(f, "Information-time (τ_I)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn iterates_in_reporting_order() {
        let all: Vec<VitalSign> = VitalSign::iter().collect();
        assert_eq!(
            all,
            vec![
                VitalSign::Organismality,
                VitalSign::Synergy,
                VitalSign::Gwi,
                VitalSign::Smf,
                VitalSign::InfoTime
            ]
        );
    }
}
