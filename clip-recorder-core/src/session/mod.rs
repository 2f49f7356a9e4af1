pub mod playback;
pub mod recorder;
pub mod recording;
pub mod ticker;
