pub mod config;
pub mod entry;
pub mod error;
pub mod events;
pub mod recording_result;
pub mod state;
