//! Span definitions per pipeline stage.

/// Create a generation span for one subscriber and date.
#[macro_export]
macro_rules! generate_span {
    ($subscriber_id:expr, $date:expr) => {
        tracing::info_span!("mbo.generate", subscriber_id = %$subscriber_id, date = %$date)
    };
}

/// Create an extraction span.
#[macro_export]
macro_rules! extract_span {
    ($game:expr, $session:expr) => {
        tracing::debug_span!("mbo.extract", game = %$game, session = %$session)
    };
}

/// Create an aggregation span.
#[macro_export]
macro_rules! aggregate_span {
    ($game:expr, $session:expr) => {
        tracing::debug_span!("mbo.aggregate", game = %$game, session = %$session)
    };
}

/// Create a gate span.
#[macro_export]
macro_rules! gate_span {
    ($game:expr, $tier:expr) => {
        tracing::debug_span!("mbo.gate", game = %$game, tier = %$tier)
    };
}

/// Create a calibration span.
#[macro_export]
macro_rules! calibrate_span {
    ($outcome:expr) => {
        tracing::info_span!("mbo.calibrate", outcome = %$outcome)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const GENERATE: &str = "mbo.generate";
    pub const EXTRACT: &str = "mbo.extract";
    pub const AGGREGATE: &str = "mbo.aggregate";
    pub const GATE: &str = "mbo.gate";
    pub const CALIBRATE: &str = "mbo.calibrate";
}
