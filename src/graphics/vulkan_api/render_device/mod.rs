mod allocator;
mod api;
mod device_queue;
mod physical_device;
mod queue_families;
mod window_surface;

use {
    self::queue_families::QueueFamilies,
    crate::graphics::vulkan_api::{
        instance::name_from_raw, Instance, VulkanError,
    },
    ash::{extensions::khr, vk},
    std::ffi::CString,
};

pub use self::{
    allocator::{Allocation, MemoryAllocator},
    device_queue::Queue,
    window_surface::WindowSurface,
};

/// The Vulkan Logical Device and related resources which are needed for
/// presenting graphics to the screen.
pub struct RenderDevice {
    memory: MemoryAllocator,
    graphics_queue: Queue,
    present_queue: Queue,
    properties: vk::PhysicalDeviceProperties,
    sample_count: vk::SampleCountFlags,
    physical_device: vk::PhysicalDevice,
    swapchain_loader: khr::Swapchain,
    logical_device: ash::Device,
    window_surface: WindowSurface,
    instance: Instance,
}

impl RenderDevice {
    /// Create the logical Vulkan Device for this application.
    ///
    /// # Params
    ///
    /// * `instance` - the Vulkan instance. The device takes ownership so the
    ///   instance is guaranteed to outlive it.
    /// * `surface` - the window surface which swapchain images are presented
    ///   to. The device takes ownership and destroys it on drop.
    ///
    /// # Safety
    ///
    /// Unsafe because every resource created with the device must be dropped
    /// before the device.
    pub unsafe fn new(
        instance: Instance,
        surface: vk::SurfaceKHR,
    ) -> Result<Self, VulkanError> {
        let window_surface = WindowSurface::new(&instance, surface);
        let physical_device = physical_device::find_optimal_physical_device(
            &instance,
            &window_surface,
        )?;
        let queue_families = QueueFamilies::find_for_physical_device(
            &instance,
            &window_surface,
            physical_device,
        )?;

        let extension_names = physical_device::required_device_extensions()
            .into_iter()
            .map(CString::new)
            .collect::<Result<Vec<CString>, _>>()?;
        let extension_ptrs = extension_names
            .iter()
            .map(|name| name.as_ptr())
            .collect::<Vec<_>>();
        let queue_create_infos = queue_families.as_queue_create_infos();
        let features = vk::PhysicalDeviceFeatures {
            sampler_anisotropy: vk::TRUE,
            ..Default::default()
        };
        let create_info = vk::DeviceCreateInfo {
            queue_create_info_count: queue_create_infos.len() as u32,
            p_queue_create_infos: queue_create_infos.as_ptr(),
            enabled_extension_count: extension_ptrs.len() as u32,
            pp_enabled_extension_names: extension_ptrs.as_ptr(),
            p_enabled_features: &features,
            ..Default::default()
        };
        let logical_device =
            instance.create_logical_device(physical_device, &create_info)?;

        let (graphics_queue, present_queue) =
            queue_families.get_queues(&logical_device);
        let properties = instance.get_physical_device_properties(physical_device);
        let sample_count =
            physical_device::pick_max_supported_msaa_count(&properties.limits);
        let memory = MemoryAllocator::new(
            logical_device.clone(),
            instance.get_physical_device_memory_properties(physical_device),
        );
        let swapchain_loader =
            khr::Swapchain::new(instance.ash(), &logical_device);

        log::info!(
            "Using {} with {:?} MSAA, graphics family {}, present family {}",
            name_from_raw(&properties.device_name),
            sample_count,
            graphics_queue.family_index(),
            present_queue.family_index(),
        );

        Ok(Self {
            memory,
            graphics_queue,
            present_queue,
            properties,
            sample_count,
            physical_device,
            swapchain_loader,
            logical_device,
            window_surface,
            instance,
        })
    }

    /// The raw logical device.
    pub fn device(&self) -> &ash::Device {
        &self.logical_device
    }

    /// The Vulkan instance the device was created from.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The physical device backing the logical device.
    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    /// The surface swapchain images are presented to.
    pub fn surface(&self) -> &WindowSurface {
        &self.window_surface
    }

    /// Loader for the VK_KHR_swapchain device functions.
    pub fn swapchain_loader(&self) -> &khr::Swapchain {
        &self.swapchain_loader
    }

    /// The queue used for all graphics and transfer commands.
    pub fn graphics_queue(&self) -> &Queue {
        &self.graphics_queue
    }

    /// The queue used for presentation. May be the same as the graphics
    /// queue.
    pub fn present_queue(&self) -> &Queue {
        &self.present_queue
    }

    /// The device limits.
    pub fn limits(&self) -> &vk::PhysicalDeviceLimits {
        &self.properties.limits
    }

    /// The MSAA sample count used for every color and depth attachment.
    pub fn sample_count(&self) -> vk::SampleCountFlags {
        self.sample_count
    }

    /// The device memory allocator.
    pub fn memory(&self) -> &MemoryAllocator {
        &self.memory
    }

    /// Give a debug name for the Vulkan object owned by this device. The name
    /// set here will be visible in the Vulkan validation layer logs.
    pub fn set_debug_name<Handle>(
        &self,
        handle: Handle,
        object_type: vk::ObjectType,
        name: impl Into<String>,
    ) where
        Handle: vk::Handle + Copy,
    {
        let Ok(cname) = CString::new(name.into()) else {
            log::warn!("Debug names cannot contain nul bytes");
            return;
        };
        let name_info = vk::DebugUtilsObjectNameInfoEXT {
            object_type,
            object_handle: handle.as_raw(),
            p_object_name: cname.as_ptr(),
            ..Default::default()
        };
        self.instance
            .debug_utils_set_object_name(&self.logical_device, &name_info);
    }
}

impl Drop for RenderDevice {
    fn drop(&mut self) {
        unsafe {
            self.logical_device
                .device_wait_idle()
                .expect("Error while idling the device before destruction!");
            self.logical_device.destroy_device(None);
        }
    }
}
