use crate::domain::model::{Endpoint, FloorPlanRequest, LayoutResponse, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn request_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn endpoint(&self) -> Endpoint;
    fn output_format(&self) -> OutputFormat;
    /// 覆蓋請求中的 `optimization` 欄位
    fn optimization_override(&self) -> Option<bool>;
}

#[async_trait]
pub trait PlanPipeline: Send + Sync {
    async fn extract(&self) -> Result<FloorPlanRequest>;
    async fn transform(&self, request: FloorPlanRequest) -> Result<LayoutResponse>;
    async fn load(&self, response: LayoutResponse) -> Result<String>;
}
