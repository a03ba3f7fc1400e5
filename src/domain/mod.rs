// Domain layer - Charging samples and the values derived from them
pub mod chart;
pub mod sample;
pub mod time_format;
pub mod transition;
pub mod ui_state;
