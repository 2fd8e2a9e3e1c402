use {
    super::{availability::name_from_raw, Instance},
    crate::graphics::vulkan_api::VulkanError,
    ash::vk,
};

impl Instance {
    /// Get the set of all physical devices available to the Vulkan instance.
    pub fn enumerate_physical_devices(
        &self,
    ) -> Result<Vec<vk::PhysicalDevice>, VulkanError> {
        unsafe {
            self.ash
                .enumerate_physical_devices()
                .map_err(VulkanError::UnableToEnumeratePhysicalDevices)
        }
    }

    /// Get the properties of queues associated with the given physical device.
    pub fn get_physical_device_queue_family_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        unsafe {
            self.ash
                .get_physical_device_queue_family_properties(physical_device)
        }
    }

    /// Get the names of all device extensions for the given physical device.
    ///
    /// Devices which fail to report their extensions are treated as having
    /// none.
    pub fn device_extension_names(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Vec<String> {
        unsafe {
            self.ash
                .enumerate_device_extension_properties(physical_device)
                .unwrap_or_default()
                .iter()
                .map(|extension| name_from_raw(&extension.extension_name))
                .collect()
        }
    }

    /// Get the physical device's properties, including its limits.
    pub fn get_physical_device_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        unsafe { self.ash.get_physical_device_properties(physical_device) }
    }

    /// Get the physical device's supported features.
    pub fn get_physical_device_features(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceFeatures {
        unsafe { self.ash.get_physical_device_features(physical_device) }
    }

    /// Get the physical device's memory properties.
    pub fn get_physical_device_memory_properties(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceMemoryProperties {
        unsafe {
            self.ash
                .get_physical_device_memory_properties(physical_device)
        }
    }

    /// Get the features a format supports on the physical device.
    pub fn get_physical_device_format_properties(
        &self,
        physical_device: vk::PhysicalDevice,
        format: vk::Format,
    ) -> vk::FormatProperties {
        unsafe {
            self.ash
                .get_physical_device_format_properties(physical_device, format)
        }
    }

    /// Create the logical device.
    ///
    /// # Safety
    ///
    /// Unsafe because the device must be destroyed before the instance.
    pub unsafe fn create_logical_device(
        &self,
        physical_device: vk::PhysicalDevice,
        create_info: &vk::DeviceCreateInfo,
    ) -> Result<ash::Device, VulkanError> {
        self.ash
            .create_device(physical_device, create_info, None)
            .map_err(VulkanError::UnableToCreateLogicalDevice)
    }
}
