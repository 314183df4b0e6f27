//! Analysis and computation configuration

use serde::Serialize;

/// Settings for the Organismality Index
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrganismalitySettings {
    // Steepness of the logistic squash applied to coop_z - violence_z
    pub logistic_k: f64,
    // Length of the trailing trend window, in calendar years
    pub trend_window_years: i32,
    // Aligned years needed before latest value and trend are reported
    pub min_rows: usize,
}

/// Settings for the covariance-based synergy index
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SynergySettings {
    // Minimum aligned rows before a covariance estimate means anything
    pub min_rows: usize,
    // det(cov) / prod(diag) at or below this is treated as singular
    pub singular_ratio_floor: f64,
}

/// Settings for Global Workspace Ignition
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GwiSettings {
    // Percentile (0-100) of the ignition column used as the event threshold
    pub ignition_percentile: f64,
    pub logistic_k: f64,
}

/// Settings for Self-Model Fidelity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SmfSettings {
    // Larger steepness punishes a given normalised gap harder
    pub steepness: f64,
    // Floor of the gap denominator so zero trajectories don't divide by zero
    pub epsilon: f64,
}

/// Settings for information-time
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InfoTimeSettings {
    pub min_rows: usize,
}

/// The Master Analysis Configuration
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalysisConfig {
    // Sub-groups
    pub organismality: OrganismalitySettings,
    pub synergy: SynergySettings,
    pub gwi: GwiSettings,
    pub smf: SmfSettings,
    pub info_time: InfoTimeSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    organismality: OrganismalitySettings {
        logistic_k: 1.0,
        trend_window_years: 20,
        min_rows: 2,
    },

    synergy: SynergySettings {
        min_rows: 3,
        singular_ratio_floor: 1e-12,
    },

    gwi: GwiSettings {
        ignition_percentile: 95.0,
        logistic_k: 1.0,
    },

    smf: SmfSettings {
        steepness: 5.0,
        epsilon: 1e-9,
    },

    info_time: InfoTimeSettings { min_rows: 2 },
};

impl Default for AnalysisConfig {
    fn default() -> Self {
        ANALYSIS
    }
}
