//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg!(debug_assertions)`.

pub struct DebugFlags {
    /// Emit row counts before/after each inner join.
    pub print_alignment: bool,
    /// Emit the covariance matrix and determinant used by the synergy index.
    pub print_covariance: bool,
    /// Emit the GWI threshold and number of flagged days.
    pub print_ignition_threshold: bool,
    /// Emit per-metric wall time in the engine.
    pub print_engine_timings: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_alignment: false,
    print_covariance: false,
    print_ignition_threshold: false,
    print_engine_timings: false,
};
