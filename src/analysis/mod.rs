// The five vital-sign pipelines and the alignment they share
pub mod align;
pub mod gwi;
pub mod info_time;
pub mod organismality;
pub mod smf;
pub mod synergy;

// Re-export commonly used types
pub use align::{AlignedFrame, inner_join};
pub use gwi::{GwiColumns, GwiResult, GwiRow, compute_gwi, gwi_from_series};
pub use info_time::{InfoTimeColumns, InfoTimeResult, InfoTimeRow, compute_info_time, info_time_from_series};
pub use organismality::{
    OrganismalityColumns, OrganismalityResult, OrganismalityRow, compute_organismality,
    organismality_from_series,
};
pub use smf::{SmfColumns, SmfResult, SmfRow, compute_smf, smf_from_series};
pub use synergy::{SynergyColumns, SynergyResult, compute_synergy, synergy_from_series};
