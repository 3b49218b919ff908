#![cfg(feature = "cli")]

use anyhow::Result;
use floorplan_allocator::{
    Allocator, AllocatorConfig, CliConfig, Endpoint, FilePipeline, FloorPlanError, LocalStorage,
    OutputFormat, PlanEngine,
};
use tempfile::TempDir;

fn cli_config(endpoint: Endpoint, format: OutputFormat, output: &str) -> CliConfig {
    CliConfig {
        request: "request.json".to_string(),
        output: output.to_string(),
        endpoint,
        optimization: None,
        format,
        config: None,
        verbose: false,
        json_logs: false,
        dry_run: false,
    }
}

async fn write_request(dir: &TempDir, body: serde_json::Value) -> Result<()> {
    tokio::fs::write(dir.path().join("request.json"), serde_json::to_vec(&body)?).await?;
    Ok(())
}

fn engine_for(
    dir: &TempDir,
    config: CliConfig,
    allocator: Allocator,
) -> PlanEngine<FilePipeline<LocalStorage, CliConfig>> {
    let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());
    PlanEngine::new(FilePipeline::new(storage, config, allocator))
}

#[tokio::test]
async fn test_end_to_end_zoned_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 10, "length": 10},
            "rooms": {"bedrooms": 2, "bathrooms": 1, "kitchen": 1, "livingRoom": 1}
        }),
    )
    .await?;

    let config = cli_config(Endpoint::GenerateAi, OutputFormat::Json, "out/layout.json");
    let engine = engine_for(&temp_dir, config, Allocator::default());

    let output_path = engine.run().await?;
    assert_eq!(output_path, "out/layout.json");

    let data = tokio::fs::read(temp_dir.path().join("out/layout.json")).await?;
    let response: serde_json::Value = serde_json::from_slice(&data)?;

    assert_eq!(response["availableWidth"], 7.0);
    assert_eq!(response["recesses"]["frontalRecess"], 3.0);
    assert_eq!(response["recesses"]["backRecess"], 1.5);

    let types: Vec<&str> = response["layout"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec!["light", "leisure", "bedrooms", "bedrooms", "bathrooms", "livingRoom", "kitchen"]
    );

    Ok(())
}

#[tokio::test]
async fn test_proportional_endpoint_renders_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 10, "length": 10},
            "rooms": {"bedrooms": 2, "bathrooms": 1, "kitchen": 1, "livingRoom": 1}
        }),
    )
    .await?;

    let config = cli_config(Endpoint::Generate, OutputFormat::Csv, "layout.csv");
    engine_for(&temp_dir, config, Allocator::default()).run().await?;

    let csv_content = tokio::fs::read_to_string(temp_dir.path().join("layout.csv")).await?;
    let lines: Vec<&str> = csv_content.lines().collect();
    assert_eq!(lines[0], "type,area");
    assert_eq!(lines.len(), 6);
    assert!(lines[1..].iter().all(|line| line.ends_with(",20.0")));
    assert_eq!(lines[5], "livingRoom,20.0");

    Ok(())
}

#[tokio::test]
async fn test_optimization_flag_selects_strict_pairing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 10, "length": 10},
            "rooms": {"bedrooms": 1, "kitchen": 1, "livingRoom": 1},
            "optimization": true
        }),
    )
    .await?;

    let config = cli_config(Endpoint::GenerateAi, OutputFormat::Json, "layout.json");
    let engine = engine_for(
        &temp_dir,
        config,
        Allocator::new(AllocatorConfig::without_reserves()),
    );
    let response = engine.preview().await?;

    // 只有臥室沒有浴室, 私密區整組略過
    let types: Vec<&str> = response.layout.iter().map(|r| r.kind.label()).collect();
    assert_eq!(types, vec!["livingRoom", "kitchen"]);
    assert!(!temp_dir.path().join("layout.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_cli_override_beats_request_flag() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 10, "length": 10},
            "rooms": {"bedrooms": 1, "kitchen": 1},
            "optimization": true
        }),
    )
    .await?;

    let mut config = cli_config(Endpoint::GenerateAi, OutputFormat::Json, "layout.json");
    config.optimization = Some(false);
    let engine = engine_for(
        &temp_dir,
        config,
        Allocator::new(AllocatorConfig::without_reserves()),
    );
    let response = engine.preview().await?;

    // 預設退縮下可建築 7x5.5 = 38.5, 寬鬆模式: 單一類別吸收整區預算
    assert_eq!(response.available_length, 5.5);
    assert_eq!(response.layout.len(), 2);
    assert!((response.layout[0].area - 0.4 * 38.5).abs() < 1e-9);
    assert!((response.layout[1].area - 0.4 * 38.5).abs() < 1e-9);

    Ok(())
}

#[tokio::test]
async fn test_empty_proportional_request_is_invalid() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 10, "length": 10},
            "rooms": {}
        }),
    )
    .await?;

    let config = cli_config(Endpoint::Generate, OutputFormat::Json, "layout.json");
    let result = engine_for(&temp_dir, config, Allocator::default()).run().await;

    assert!(matches!(result, Err(FloorPlanError::InvalidRequest { .. })));
    assert!(!temp_dir.path().join("layout.json").exists());

    Ok(())
}

#[tokio::test]
async fn test_lot_smaller_than_setbacks_is_invalid() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 2, "length": 10},
            "rooms": {"bedrooms": 1}
        }),
    )
    .await?;

    let config = cli_config(Endpoint::GenerateAi, OutputFormat::Json, "layout.json");
    let err = engine_for(&temp_dir, config, Allocator::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, FloorPlanError::InvalidRequest { .. }));
    assert!(err.user_friendly_message().contains("setbacks"));

    Ok(())
}

#[tokio::test]
async fn test_missing_request_file_is_io_error() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let config = cli_config(Endpoint::GenerateAi, OutputFormat::Json, "layout.json");
    let err = engine_for(&temp_dir, config, Allocator::default())
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, FloorPlanError::IoError(_)));

    Ok(())
}

#[tokio::test]
async fn test_allocator_config_from_toml_drives_engine() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("allocator.toml");
    tokio::fs::write(
        &config_path,
        r#"
light_reserve_m2 = 0.0
leisure_fraction = 0.0

[setback]
frontal = 0.0
lateral = 0.0
back = 0.0
"#,
    )
    .await?;
    write_request(
        &temp_dir,
        serde_json::json!({
            "dimensions": {"width": 10, "length": 10},
            "rooms": {"serviceArea": 2}
        }),
    )
    .await?;

    let allocator_config = AllocatorConfig::from_file(&config_path)?;
    let config = cli_config(Endpoint::GenerateAi, OutputFormat::Json, "layout.json");
    let response = engine_for(&temp_dir, config, Allocator::new(allocator_config))
        .preview()
        .await?;

    assert_eq!(response.available_width, 10.0);
    assert_eq!(response.available_length, 10.0);
    assert_eq!(response.layout.len(), 2);
    assert!((response.layout[0].area - 10.0).abs() < 1e-9);

    Ok(())
}
