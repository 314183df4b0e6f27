// Numeric primitives and date helpers shared by every pipeline
pub mod maths_utils;
pub mod time_utils;

pub use time_utils::TimeUtils;
