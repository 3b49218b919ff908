pub mod allocator;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AllocationResult, FloorPlanRequest, LayoutResponse};
pub use crate::domain::ports::{ConfigProvider, PlanPipeline, Storage};
pub use crate::utils::error::Result;
