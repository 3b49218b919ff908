use anyhow::Context;
use clap::Parser;
use floorplan_allocator::core::pipeline::render_error;
use floorplan_allocator::core::{LayoutResponse, Storage};
use floorplan_allocator::utils::error::ErrorSeverity;
use floorplan_allocator::utils::{logger, validation::Validate};
use floorplan_allocator::{
    Allocator, AllocatorConfig, CliConfig, FilePipeline, FloorPlanError, LocalStorage, PlanEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🚀 Starting floorplan allocator");
    tracing::debug!("CLI config: {:?}", config);

    // 載入配置
    let allocator_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading allocator configuration from: {}", path);
            AllocatorConfig::from_file(path)
                .with_context(|| format!("failed to load allocator config '{}'", path))?
        }
        None => AllocatorConfig::default(),
    };

    if let Err(e) = allocator_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::default();
    let output_path = config.output.clone();
    let dry_run = config.dry_run;
    let pipeline = FilePipeline::new(storage.clone(), config, Allocator::new(allocator_config));
    let engine = PlanEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - no layout will be written");
        match engine.preview().await {
            Ok(response) => display_summary(&response),
            Err(e) => fail(&storage, &output_path, e).await,
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(path) => {
            tracing::info!("✅ Layout generated successfully ({})", path);
        }
        Err(e) => fail(&storage, &output_path, e).await,
    }

    Ok(())
}

async fn fail(storage: &LocalStorage, output_path: &str, e: FloorPlanError) {
    tracing::error!(
        "❌ Layout generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 失敗時輸出 {"error": ...}
    match render_error(&e) {
        Ok(body) => {
            if let Err(write_err) = storage.write_file(output_path, &body).await {
                tracing::warn!("Could not write error response: {}", write_err);
            }
        }
        Err(render_err) => tracing::warn!("Could not render error response: {}", render_err),
    }

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

fn display_summary(response: &LayoutResponse) {
    eprintln!("📋 Layout Summary:");
    eprintln!(
        "  Available: {:.2} x {:.2} m",
        response.available_width, response.available_length
    );
    eprintln!(
        "  Recesses: front {} m, sides {} m, back {} m",
        response.recesses.frontal, response.recesses.lateral, response.recesses.back
    );
    eprintln!("  Records: {}", response.layout.len());
    for room in &response.layout {
        eprintln!("    {:<12} {:>8.2} m²", room.kind.label(), room.area);
    }
}
