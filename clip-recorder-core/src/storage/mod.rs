pub mod list_store;
pub mod naming;
pub mod wav_writer;
