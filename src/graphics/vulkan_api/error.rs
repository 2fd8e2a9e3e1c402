use ash::vk;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VulkanError {
    #[error("Unable to load the Vulkan library")]
    UnableToLoadVulkan(#[from] ash::LoadingError),

    #[error("Vulkan names cannot contain interior nul bytes")]
    InvalidName(#[from] std::ffi::NulError),

    #[error("The following extensions are required but unavailable {:?}", .0)]
    RequiredExtensionsNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan extensions")]
    UnableToListAvailableExtensions(#[source] vk::Result),

    #[error("The following layers are required but unavailable {:?}", .0)]
    RequiredLayersNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan layers")]
    UnableToListAvailableLayers(#[source] vk::Result),

    #[error("Unable to create a Vulkan instance")]
    UnableToCreateInstance(#[source] vk::Result),

    #[error("Unable to create the Vulkan debug messenger")]
    UnableToCreateDebugMessenger(#[source] vk::Result),

    #[error("Unable to create the window surface")]
    UnableToCreateSurface(#[source] vk::Result),

    #[error("Unable to enumerate the physical devices")]
    UnableToEnumeratePhysicalDevices(#[source] vk::Result),

    #[error("No physical device supports presenting to the window surface")]
    NoSuitableDeviceFound,

    #[error("Unable to find a queue family which supports graphics")]
    UnableToFindGraphicsQueue,

    #[error("Unable to find a queue family which can present to the surface")]
    UnableToFindPresentQueue,

    #[error("Unable to create the logical device")]
    UnableToCreateLogicalDevice(#[source] vk::Result),

    #[error("Unable to check surface support for a queue family")]
    UnableToGetSurfaceSupport(#[source] vk::Result),

    #[error("Unable to get the surface capabilities")]
    UnableToGetSurfaceCapabilities(#[source] vk::Result),

    #[error("Unable to get the surface formats")]
    UnableToGetSurfaceFormats(#[source] vk::Result),

    #[error("Unable to get the surface present modes")]
    UnableToGetSurfacePresentModes(#[source] vk::Result),

    #[error("Unable to create the swapchain")]
    UnableToCreateSwapchain(#[source] vk::Result),

    #[error("Unable to get the swapchain images")]
    UnableToGetSwapchainImages(#[source] vk::Result),

    #[error("Unable to acquire the next swapchain image")]
    UnableToAcquireSwapchainImage(#[source] vk::Result),

    #[error("Unable to present the swapchain image")]
    UnableToPresentSwapchainImage(#[source] vk::Result),

    #[error("Unable to create an image view")]
    UnableToCreateImageView(#[source] vk::Result),

    #[error("Unable to create a fence")]
    UnableToCreateFence(#[source] vk::Result),

    #[error("Unable to create a semaphore")]
    UnableToCreateSemaphore(#[source] vk::Result),

    #[error("Unexpected error while waiting for a fence")]
    UnexpectedFenceWaitError(#[source] vk::Result),

    #[error("Unable to reset a fence")]
    UnableToResetFence(#[source] vk::Result),

    #[error("Unable to wait for the device to idle")]
    UnableToWaitForDeviceToIdle(#[source] vk::Result),

    #[error("Unable to wait for the queue to idle")]
    UnableToWaitForQueueToIdle(#[source] vk::Result),

    #[error("Unable to create a command pool")]
    UnableToCreateCommandPool(#[source] vk::Result),

    #[error("Unable to allocate a command buffer")]
    UnableToAllocateCommandBuffer(#[source] vk::Result),

    #[error("Unable to begin recording a command buffer")]
    UnableToBeginCommandBuffer(#[source] vk::Result),

    #[error("Unable to finish recording a command buffer")]
    UnableToEndCommandBuffer(#[source] vk::Result),

    #[error("Unable to submit command buffers to the queue")]
    UnableToSubmitCommandBuffers(#[source] vk::Result),

    #[error("Unable to reset a command pool")]
    UnableToResetCommandPool(#[source] vk::Result),

    #[error("Frame slot {0} has no recorded commands to submit")]
    NoCommandsRecorded(usize),

    #[error("Unable to create a buffer")]
    UnableToCreateBuffer(#[source] vk::Result),

    #[error("Cannot write {needed} elements into a buffer of {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Unable to bind device memory to a buffer")]
    UnableToBindBufferMemory(#[source] vk::Result),

    #[error("Unable to create an image")]
    UnableToCreateImage(#[source] vk::Result),

    #[error("Unable to bind device memory to an image")]
    UnableToBindImageMemory(#[source] vk::Result),

    #[error("Unable to allocate device memory")]
    UnableToAllocateDeviceMemory(#[source] vk::Result),

    #[error("No memory type satisfies {:?}", .0)]
    NoSuitableMemoryType(vk::MemoryPropertyFlags),

    #[error("Unable to map device memory")]
    UnableToMapDeviceMemory(#[source] vk::Result),

    #[error("Device memory must be mapped before it can be accessed")]
    DeviceMemoryIsNotMapped,

    #[error("Device memory is not aligned for {}", .0)]
    DeviceMemoryIsNotAlignedForType(String),

    #[error("Unable to create a framebuffer")]
    UnableToCreateFramebuffer(#[source] vk::Result),

    #[error("Unable to create a render pass")]
    UnableToCreateRenderPass(#[source] vk::Result),

    #[error("Unable to create a pipeline layout")]
    UnableToCreatePipelineLayout(#[source] vk::Result),

    #[error("Unable to create a graphics pipeline")]
    UnableToCreateGraphicsPipeline(#[source] vk::Result),

    #[error("Unable to create a shader module")]
    UnableToCreateShaderModule(#[source] vk::Result),

    #[error("SPIR-V must be a whole number of little-endian u32 words")]
    InvalidSpirv(#[source] std::io::Error),

    #[error("Unable to create a descriptor set layout")]
    UnableToCreateDescriptorSetLayout(#[source] vk::Result),

    #[error("Unable to create a descriptor pool")]
    UnableToCreateDescriptorPool(#[source] vk::Result),

    #[error("Unable to allocate descriptor sets")]
    UnableToAllocateDescriptorSets(#[source] vk::Result),

    #[error("Unable to create a sampler")]
    UnableToCreateSampler(#[source] vk::Result),
}
