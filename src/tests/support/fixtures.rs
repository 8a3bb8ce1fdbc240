use chrono::{Duration, TimeZone, Utc};

use crate::shared_image::application::domain::entities::{EntityRef, EntityType, SharedImage};

pub fn shared_image(id: i64, entity: EntityRef, image_url: &str) -> SharedImage {
    SharedImage {
        id,
        entity_type: entity.entity_type().unwrap_or(EntityType::Blog),
        entity,
        image_url: image_url.to_string(),
        original_filename: format!("image-{id}.jpg"),
        file_size: 1024,
        uploaded_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id),
        is_active: true,
        caption_vi: None,
        caption_en: None,
    }
}

/// Smallest valid JPEG/PNG payloads, produced with the `image` crate.
pub fn tiny_jpeg() -> Vec<u8> {
    encode(image::ImageFormat::Jpeg)
}

pub fn tiny_png() -> Vec<u8> {
    encode(image::ImageFormat::Png)
}

fn encode(format: image::ImageFormat) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        8,
        8,
        image::Rgb([200, 80, 40]),
    ));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode test image");
    out.into_inner()
}

/// Deterministic RGB noise. Compresses badly, which is the point.
pub fn noisy_image(width: u32, height: u32) -> image::DynamicImage {
    let mut state: u32 = 0x2545_F491;
    let img = image::RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state & 0xFF) as u8
        };
        image::Rgb([next(), next(), next()])
    });
    image::DynamicImage::ImageRgb8(img)
}
