pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::RunConfig;
pub use crate::core::{
    convert::convert_lines,
    etl::{EtlEngine, RunSummary},
    pipeline::GradePipeline,
};
pub use crate::utils::error::{EtlError, Result};
