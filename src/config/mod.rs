pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{Endpoint, OutputFormat};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "floorplan")]
#[command(about = "Allocate floor plan zones and rooms for a rectangular lot")]
pub struct CliConfig {
    /// Request JSON file, `-` reads from stdin
    #[arg(long, default_value = "-")]
    pub request: String,

    /// Output file, `-` writes to stdout
    #[arg(long, default_value = "-")]
    pub output: String,

    #[arg(long, value_enum, default_value = "generate-ai")]
    pub endpoint: Endpoint,

    /// Override the request's optimization flag
    #[arg(long)]
    pub optimization: Option<bool>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Allocator TOML file (setbacks, zone split, reserves)
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Validate and summarize without writing a layout")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn request_path(&self) -> &str {
        &self.request
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    fn output_format(&self) -> OutputFormat {
        self.format
    }

    fn optimization_override(&self) -> Option<bool> {
        self.optimization
    }
}
