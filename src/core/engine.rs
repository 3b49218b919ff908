use crate::core::PlanPipeline;
use crate::domain::model::LayoutResponse;
use crate::utils::error::Result;

pub struct PlanEngine<P: PlanPipeline> {
    pipeline: P,
}

impl<P: PlanPipeline> PlanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let response = self.preview().await?;

        tracing::info!("💾 Writing layout...");
        let output_path = self.pipeline.load(response).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// 讀取並配置, 但不寫出結果
    pub async fn preview(&self) -> Result<LayoutResponse> {
        tracing::info!("📥 Reading request...");
        let request = self.pipeline.extract().await?;
        tracing::info!(
            "Lot {}x{} m, {} rooms requested",
            request.dimensions.width,
            request.dimensions.length,
            request.rooms.total()
        );

        tracing::info!("📐 Allocating layout...");
        let response = self.pipeline.transform(request).await?;
        tracing::info!(
            "Allocated {} records over {:.2}x{:.2} m",
            response.layout.len(),
            response.available_width,
            response.available_length
        );

        Ok(response)
    }
}
