//! Input dataset locations and default column names

/// Default directory holding the CSV inputs
pub const DATA_DIR: &str = "data";

/// Topic label attached to GWI results
pub const GWI_TOPIC_NAME: &str = "IPCC";

/// File names of every dataset the vital signs read
pub struct DataFiles {
    pub treaties: &'static str,
    pub conflict: &'static str,

    // Yearly series for synergy
    pub synergy_news: &'static str,
    pub synergy_pubs: &'static str,
    pub synergy_conflict: &'static str, // optional

    // Daily streams for GWI
    pub gwi_news: &'static str,
    pub gwi_wiki: &'static str,

    // CO2 target and actual trajectories for SMF
    pub co2_target: &'static str,
    pub co2_actual: &'static str,

    // Forecast skill for information-time
    pub skill: &'static str,
}

pub const DATA_FILES: DataFiles = DataFiles {
    treaties: "owid_treaties.csv",
    conflict: "conflict_deaths.csv",
    synergy_news: "gdelt_climate_news.csv",
    synergy_pubs: "openalex_climate_pubs.csv",
    synergy_conflict: "conflict_deaths_for_synergy.csv",
    gwi_news: "gdelt_ipcc_daily.csv",
    gwi_wiki: "wikipedia_ipcc_pageviews.csv",
    co2_target: "co2_target_pathway.csv",
    co2_actual: "co2_actual.csv",
    skill: "ecmwf_headline_scores.csv",
};

/// Default column names shared by several datasets
pub const YEAR_COLUMN: &str = "year";
pub const DATE_COLUMN: &str = "date";
