//! Résumé tailoring and interview prep.
//!
//! A request flows extractor → prompts → llm_client → normalizer, driven by
//! [`pipeline::TailoringPipeline`].

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
