pub mod job;
pub mod preferences;
