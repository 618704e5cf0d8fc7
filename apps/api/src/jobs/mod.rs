// Job tracker: postings owned by one user, moved through the status pipeline.

pub mod handlers;
pub mod repository;
pub mod stats;
