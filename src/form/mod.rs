pub mod constants;
pub mod controls;
pub mod sequencer;
