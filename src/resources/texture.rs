use image::{ImageFormat, RgbaImage};

use crate::data_structures::texture;

/// Flat colour used when the atlas bitmap cannot be read.
pub const FALLBACK_TEXEL: [u8; 4] = [200, 200, 200, 0];

pub fn atlas_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("atlas_bind_group_layout"),
    })
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = std::path::Path::new("./").join("assets").join(file_name);
    let data = tokio::fs::read(&path).await?;
    Ok(data)
}

/// Decode an uncompressed bitmap into RGBA texels.
///
/// Rows are stored bottom-up, the way the bitmap keeps them, so texture
/// coordinate (0, 0) addresses the lower left corner of the picture. Alpha is
/// forced to zero; opacity never comes from the atlas.
pub fn decode_atlas(bytes: &[u8]) -> anyhow::Result<RgbaImage> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Bmp)?;
    let mut rgba = image::imageops::flip_vertical(&img.to_rgba8());
    for pixel in rgba.pixels_mut() {
        pixel.0[3] = 0;
    }
    Ok(rgba)
}

/// A 2x2 image of [`FALLBACK_TEXEL`].
pub fn fallback_atlas() -> RgbaImage {
    RgbaImage::from_pixel(2, 2, image::Rgba(FALLBACK_TEXEL))
}

/// Load the atlas bitmap, degrading to [`fallback_atlas`] when it is missing or
/// unreadable so the renderer never sees an empty image.
pub async fn load_atlas_image(file_name: &str) -> RgbaImage {
    let decoded = match load_binary(file_name).await {
        Ok(bytes) => decode_atlas(&bytes),
        Err(e) => Err(e),
    };
    match decoded {
        Ok(img) if img.width() > 0 && img.height() > 0 => img,
        Ok(_) => {
            log::warn!("Texture {file_name} is empty, using a flat colour instead");
            fallback_atlas()
        }
        Err(e) => {
            log::warn!("Could not load texture {file_name} ({e}), using a flat colour instead");
            fallback_atlas()
        }
    }
}

pub async fn load_atlas(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> texture::Texture {
    let img = load_atlas_image(file_name).await;
    texture::Texture::from_rgba(device, queue, &img, Some(file_name))
}
