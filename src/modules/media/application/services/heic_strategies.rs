use async_trait::async_trait;
use std::sync::Arc;

use crate::media::application::ports::outgoing::{HeifConverter, RasterFormat};
use crate::media::application::services::compression::{decode, encode_jpeg, DEFAULT_QUALITY};

/// One way of turning HEIC bytes into JPEG bytes.
#[async_trait]
pub trait ConversionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn convert(&self, input: &[u8]) -> Result<Vec<u8>, String>;
}

/// The fallback chain, tried in order. First success wins.
pub fn default_heic_strategies(
    converter: Arc<dyn HeifConverter + Send + Sync>,
) -> Vec<Box<dyn ConversionStrategy>> {
    vec![
        Box::new(ConverterToJpeg {
            name: "heic-to-jpeg-q80",
            converter: converter.clone(),
            quality: 80,
        }),
        Box::new(ConverterToJpeg {
            name: "heic-to-jpeg-q60",
            converter: converter.clone(),
            quality: 60,
        }),
        Box::new(NativeRaster),
        Box::new(ConverterViaPng { converter }),
    ]
}

pub struct ConverterToJpeg {
    name: &'static str,
    converter: Arc<dyn HeifConverter + Send + Sync>,
    quality: u8,
}

#[async_trait]
impl ConversionStrategy for ConverterToJpeg {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn convert(&self, input: &[u8]) -> Result<Vec<u8>, String> {
        self.converter
            .convert(input, RasterFormat::Jpeg, self.quality)
            .await
            .map_err(|e| e.to_string())
    }
}

/// Works when the "HEIC" is really something the in-process decoder reads.
pub struct NativeRaster;

#[async_trait]
impl ConversionStrategy for NativeRaster {
    fn name(&self) -> &'static str {
        "native-raster"
    }

    async fn convert(&self, input: &[u8]) -> Result<Vec<u8>, String> {
        let bytes = input.to_vec();
        tokio::task::spawn_blocking(move || {
            let img = decode(&bytes)?;
            encode_jpeg(&img, DEFAULT_QUALITY)
        })
        .await
        .map_err(|e| format!("Conversion task failed: {e}"))?
    }
}

pub struct ConverterViaPng {
    converter: Arc<dyn HeifConverter + Send + Sync>,
}

#[async_trait]
impl ConversionStrategy for ConverterViaPng {
    fn name(&self) -> &'static str {
        "heic-to-png-to-jpeg"
    }

    async fn convert(&self, input: &[u8]) -> Result<Vec<u8>, String> {
        let png = self
            .converter
            .convert(input, RasterFormat::Png, DEFAULT_QUALITY)
            .await
            .map_err(|e| e.to_string())?;

        tokio::task::spawn_blocking(move || {
            let img = decode(&png)?;
            encode_jpeg(&img, DEFAULT_QUALITY)
        })
        .await
        .map_err(|e| format!("Conversion task failed: {e}"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::application::ports::outgoing::HeifConversionError;
    use crate::tests::support::fixtures::{tiny_jpeg, tiny_png};
    use std::sync::Mutex;

    /// Records calls and answers per requested format.
    #[derive(Default)]
    struct ScriptedConverter {
        calls: Mutex<Vec<(RasterFormat, u8)>>,
        jpeg: Option<Vec<u8>>,
        png: Option<Vec<u8>>,
    }

    #[async_trait]
    impl HeifConverter for ScriptedConverter {
        async fn convert(
            &self,
            _input: &[u8],
            format: RasterFormat,
            quality: u8,
        ) -> Result<Vec<u8>, HeifConversionError> {
            self.calls.lock().unwrap().push((format, quality));
            let out = match format {
                RasterFormat::Jpeg => self.jpeg.clone(),
                RasterFormat::Png => self.png.clone(),
            };
            out.ok_or_else(|| HeifConversionError::Failed("no decoder".to_string()))
        }
    }

    #[test]
    fn test_default_chain_order() {
        let names: Vec<_> = default_heic_strategies(Arc::new(ScriptedConverter::default()))
            .iter()
            .map(|s| s.name())
            .collect();

        assert_eq!(
            names,
            vec![
                "heic-to-jpeg-q80",
                "heic-to-jpeg-q60",
                "native-raster",
                "heic-to-png-to-jpeg"
            ]
        );
    }

    #[tokio::test]
    async fn test_converter_strategies_pass_quality() {
        let converter = Arc::new(ScriptedConverter {
            jpeg: Some(tiny_jpeg()),
            ..Default::default()
        });
        let chain = default_heic_strategies(converter.clone());

        chain[0].convert(b"heic").await.unwrap();
        chain[1].convert(b"heic").await.unwrap();

        assert_eq!(
            *converter.calls.lock().unwrap(),
            vec![(RasterFormat::Jpeg, 80), (RasterFormat::Jpeg, 60)]
        );
    }

    #[tokio::test]
    async fn test_native_raster_reencodes_decodable_payload() {
        let out = NativeRaster.convert(&tiny_png()).await.unwrap();
        assert_eq!(&out[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_native_raster_rejects_real_heic() {
        assert!(NativeRaster.convert(b"\0\0\0\x18ftypheic").await.is_err());
    }

    #[tokio::test]
    async fn test_png_intermediate_ends_as_jpeg() {
        let converter = Arc::new(ScriptedConverter {
            png: Some(tiny_png()),
            ..Default::default()
        });
        let strategy = ConverterViaPng {
            converter: converter.clone(),
        };

        let out = strategy.convert(b"heic").await.unwrap();

        assert_eq!(&out[..2], &[0xFF, 0xD8]);
        assert_eq!(converter.calls.lock().unwrap()[0].0, RasterFormat::Png);
    }
}
