use {
    crate::graphics::vulkan_api::VulkanError, ash::vk, std::path::PathBuf,
    thiserror::Error,
};

#[derive(Error, Debug)]
pub enum GraphicsError {
    #[error(transparent)]
    VulkanError(#[from] VulkanError),

    #[error(
        "The surface offers at most {available} images but {required} frames \
         must be in flight at once"
    )]
    TooFewSwapchainImages { available: u32, required: u32 },

    #[error("The window surface has no area, no swapchain can be built")]
    SurfaceHasNoArea,

    #[error("The window surface does not advertise any image formats")]
    NoSurfaceFormats,

    #[error("None of the candidate depth formats can be used as an attachment")]
    NoSuitableDepthFormat,

    #[error("{:?} does not support linear blits, mipmaps can't be generated", .0)]
    LinearBlitUnsupported(vk::Format),

    #[error("Unable to read {path:?}")]
    AssetIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to decode the texture at {path:?}")]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unable to load the model at {path:?}")]
    ModelLoad {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("The model at {path:?} has no texture coordinates")]
    ModelMissingTexCoords { path: PathBuf },

    #[error("A frame was requested before the swapchain was built")]
    SwapchainMissing,
}
