use {
    crate::{
        demo::SceneKind,
        graphics::{
            vulkan_api::{
                mip_level_count, OneTimeSubmitCommandPool, RenderDevice, Texture,
            },
            GraphicsError,
        },
    },
    ash::vk,
    std::{
        io::ErrorKind,
        path::{Path, PathBuf},
        sync::Arc,
    },
};

/// The texture sampled by the Triangle and Quad scenes.
pub const SCENE_TEXTURE_FILE: &str = "texture.jpg";

/// The texture sampled by the Model scene.
pub const MODEL_TEXTURE_FILE: &str = "viking_room.png";

const CHECKER_SIZE: u32 = 256;
const CHECKER_CELL: u32 = 32;

/// Decoded, tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub extent: vk::Extent2D,
    pub rgba: Vec<u8>,
}

impl Pixels {
    /// Read and decode an image file.
    pub fn decode_file(path: &Path) -> Result<Self, GraphicsError> {
        let bytes =
            std::fs::read(path).map_err(|source| GraphicsError::AssetIo {
                path: path.to_owned(),
                source,
            })?;
        Self::decode(&bytes, path)
    }

    /// Decode an in-memory image in any format the `image` crate detects.
    pub fn decode(bytes: &[u8], path: &Path) -> Result<Self, GraphicsError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|source| GraphicsError::TextureDecode {
                path: path.to_owned(),
                source,
            })?
            .into_rgba8();
        Ok(Self {
            extent: vk::Extent2D {
                width: decoded.width(),
                height: decoded.height(),
            },
            rgba: decoded.into_raw(),
        })
    }

    /// A grey and white checkerboard.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let shade = if (x / cell + y / cell) % 2 == 0 {
                    0xff
                } else {
                    0x60
                };
                rgba.extend_from_slice(&[shade, shade, shade, 0xff]);
            }
        }
        Self {
            extent: vk::Extent2D {
                width: size,
                height: size,
            },
            rgba,
        }
    }
}

/// Load the pixels a scene samples from.
///
/// Triangle and Quad fall back to a checkerboard when their texture is
/// missing, the Model texture is required.
pub fn scene_pixels(
    kind: SceneKind,
    asset_dir: &Path,
) -> Result<(Pixels, PathBuf), GraphicsError> {
    let file = match kind {
        SceneKind::Model => MODEL_TEXTURE_FILE,
        SceneKind::Triangle | SceneKind::Quad => SCENE_TEXTURE_FILE,
    };
    let path = asset_dir.join(file);
    match Pixels::decode_file(&path) {
        Err(GraphicsError::AssetIo { source, .. })
            if kind != SceneKind::Model
                && source.kind() == ErrorKind::NotFound =>
        {
            log::warn!("{path:?} not found, using a checkerboard instead");
            Ok((Pixels::checkerboard(CHECKER_SIZE, CHECKER_CELL), path))
        }
        result => result.map(|pixels| (pixels, path)),
    }
}

/// Load and upload the texture for a scene. Only the Model texture gets a
/// full mip chain.
///
/// # Safety
///
/// Unsafe because the texture must be dropped before the render device.
pub unsafe fn load_scene_texture(
    render_device: Arc<RenderDevice>,
    one_time_submit: &OneTimeSubmitCommandPool,
    kind: SceneKind,
    asset_dir: &Path,
) -> Result<Texture, GraphicsError> {
    let (pixels, path) = scene_pixels(kind, asset_dir)?;
    let mip_levels = match kind {
        SceneKind::Model => {
            mip_level_count(pixels.extent.width, pixels.extent.height)
        }
        SceneKind::Triangle | SceneKind::Quad => 1,
    };
    log::info!(
        "Texture {:?}: {}x{}, {} mip levels",
        path,
        pixels.extent.width,
        pixels.extent.height,
        mip_levels
    );
    Texture::from_rgba(
        render_device,
        one_time_submit,
        pixels.extent,
        &pixels.rgba,
        mip_levels,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let pixels = Pixels::checkerboard(4, 2);
        assert_eq!(pixels.rgba.len(), 4 * 4 * 4);
        let at = |x: usize, y: usize| pixels.rgba[(y * 4 + x) * 4];
        assert_eq!(at(0, 0), at(1, 1));
        assert_ne!(at(0, 0), at(2, 0));
        assert_ne!(at(0, 0), at(0, 2));
        assert_eq!(at(0, 0), at(2, 2));
    }

    #[test]
    fn missing_scene_texture_falls_back_to_checkerboard() {
        let (pixels, path) =
            scene_pixels(SceneKind::Quad, Path::new("no/such/dir")).unwrap();
        assert_eq!(pixels.extent.width, CHECKER_SIZE);
        assert!(path.ends_with(SCENE_TEXTURE_FILE));
    }

    #[test]
    fn missing_model_texture_is_an_error() {
        let result = scene_pixels(SceneKind::Model, Path::new("no/such/dir"));
        assert!(matches!(result, Err(GraphicsError::AssetIo { .. })));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let result = Pixels::decode(b"not an image", Path::new("bad.png"));
        assert!(matches!(result, Err(GraphicsError::TextureDecode { .. })));
    }

    #[test]
    fn decoded_images_are_rgba8() {
        let mut encoded = Vec::new();
        image::RgbImage::from_pixel(3, 2, image::Rgb([10, 20, 30]))
            .write_to(
                &mut std::io::Cursor::new(&mut encoded),
                image::ImageOutputFormat::Png,
            )
            .unwrap();

        let pixels = Pixels::decode(&encoded, Path::new("memory.png")).unwrap();
        assert_eq!(pixels.extent.width, 3);
        assert_eq!(pixels.extent.height, 2);
        assert_eq!(&pixels.rgba[..4], &[10, 20, 30, 255]);
    }
}
