//! Command Handlers

mod metadata_handlers;
mod sample_handlers;

pub use metadata_handlers::MergeMetadataHandler;
pub use sample_handlers::{
    GenerateSamplesHandler, ItemOutcome, ItemReport, SamplePipelineConfig, SampleReport,
};
