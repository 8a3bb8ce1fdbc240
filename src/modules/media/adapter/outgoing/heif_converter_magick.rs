use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::media::application::ports::outgoing::{
    HeifConversionError, HeifConverter, RasterFormat,
};

/// Pipes HEIC bytes through ImageMagick: `convert heic:- -quality N jpeg:-`.
#[derive(Debug, Clone)]
pub struct MagickHeifConverter {
    binary: String,
}

impl MagickHeifConverter {
    pub const DEFAULT_BINARY: &'static str = "convert";

    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Binary from `HEIF_CONVERTER_BIN`, `convert` when unset.
    pub fn from_env() -> Self {
        let binary = std::env::var("HEIF_CONVERTER_BIN")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BINARY.to_string());
        Self::new(binary)
    }

    fn args(format: RasterFormat, quality: u8) -> Vec<String> {
        let output = match format {
            RasterFormat::Jpeg => "jpeg:-",
            RasterFormat::Png => "png:-",
        };
        vec![
            "heic:-".to_string(),
            "-quality".to_string(),
            quality.to_string(),
            output.to_string(),
        ]
    }
}

#[async_trait]
impl HeifConverter for MagickHeifConverter {
    async fn convert(
        &self,
        input: &[u8],
        format: RasterFormat,
        quality: u8,
    ) -> Result<Vec<u8>, HeifConversionError> {
        let mut child = Command::new(&self.binary)
            .args(Self::args(format, quality))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| HeifConversionError::Unavailable(format!("{}: {e}", self.binary)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| HeifConversionError::Failed("stdin not captured".to_string()))?;

        // feed stdin concurrently so a full stdout pipe cannot deadlock us
        let payload = input.to_vec();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&payload).await;
            drop(stdin);
            result
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| HeifConversionError::Failed(e.to_string()))?;

        if let Ok(Err(e)) = writer.await {
            tracing::debug!(error = %e, "Converter closed stdin early");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HeifConversionError::Failed(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(HeifConversionError::Failed(
                "converter produced no output".to_string(),
            ));
        }

        Ok(output.stdout)
    }
}
