pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::{AllocatorConfig, LightReserveRule, ZoneSplit};
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{
    allocator::{allocate, Allocator},
    engine::PlanEngine,
    pipeline::FilePipeline,
};
pub use domain::model::{
    AllocationResult, Endpoint, LotFootprint, OutputFormat, Policy, RoomCategory, RoomKind,
    RoomRecord, RoomRequest, Setback,
};
pub use utils::error::{FloorPlanError, Result};
