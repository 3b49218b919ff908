use crate::core::Storage;
use crate::utils::error::Result;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// 路徑 `-` 代表標準輸入/輸出
pub const STDIO_PATH: &str = "-";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".".to_string())
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        if path == STDIO_PATH {
            let mut data = Vec::new();
            tokio::io::stdin().read_to_end(&mut data).await?;
            return Ok(data);
        }

        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if path == STDIO_PATH {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(data).await?;
            stdout.flush().await?;
            return Ok(());
        }

        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
