use crate::core::allocator::Allocator;
use crate::core::{ConfigProvider, PlanPipeline, Storage};
use crate::domain::model::{ErrorResponse, FloorPlanRequest, LayoutResponse, OutputFormat};
use crate::utils::error::{FloorPlanError, Result};

/// 從 Storage 讀入請求, 配置後再寫回 Storage
pub struct FilePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    allocator: Allocator,
}

impl<S: Storage, C: ConfigProvider> FilePipeline<S, C> {
    pub fn new(storage: S, config: C, allocator: Allocator) -> Self {
        Self {
            storage,
            config,
            allocator,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> PlanPipeline for FilePipeline<S, C> {
    async fn extract(&self) -> Result<FloorPlanRequest> {
        tracing::debug!("Reading request from: {}", self.config.request_path());
        let bytes = self.storage.read_file(self.config.request_path()).await?;
        parse_request(&bytes)
    }

    async fn transform(&self, request: FloorPlanRequest) -> Result<LayoutResponse> {
        let endpoint = self.config.endpoint();
        let optimization = self
            .config
            .optimization_override()
            .or(request.optimization)
            .unwrap_or(false);
        let policy = endpoint.policy(optimization);

        tracing::debug!("Endpoint {:?} resolved to {:?}", endpoint, policy);

        let result = self
            .allocator
            .allocate(&request.dimensions, &request.rooms, policy)?;

        Ok(LayoutResponse::from_result(
            result,
            Some(endpoint.success_message().to_string()),
        ))
    }

    async fn load(&self, response: LayoutResponse) -> Result<String> {
        let data = render_layout(&response, self.config.output_format())?;
        let output_path = self.config.output_path();
        self.storage.write_file(output_path, &data).await?;
        Ok(output_path.to_string())
    }
}

/// 結構錯誤 (缺欄位、未知類別、負數) 視為無效請求, 語法錯誤保留為序列化錯誤
pub fn parse_request(bytes: &[u8]) -> Result<FloorPlanRequest> {
    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        serde_json::error::Category::Data => FloorPlanError::invalid_request(format!(
            "Dimensions and rooms are required: {}",
            e
        )),
        _ => FloorPlanError::SerializationError(e),
    })
}

pub fn render_layout(response: &LayoutResponse, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut data = serde_json::to_vec_pretty(response)?;
            data.push(b'\n');
            Ok(data)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for room in &response.layout {
                writer.serialize(room)?;
            }
            writer
                .into_inner()
                .map_err(|e| FloorPlanError::IoError(e.into_error()))
        }
    }
}

pub fn render_error(error: &FloorPlanError) -> Result<Vec<u8>> {
    let body = ErrorResponse {
        error: error.user_friendly_message(),
    };
    let mut data = serde_json::to_vec_pretty(&body)?;
    data.push(b'\n');
    Ok(data)
}
