use {
    super::{Queue, WindowSurface},
    crate::graphics::vulkan_api::{Instance, VulkanError},
    ash::vk,
};

const QUEUE_PRIORITY: [f32; 1] = [1.0];

/// The indices for all of the required queue families for this application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFamilies {
    graphics_family_index: u32,
    present_family_index: u32,
}

impl QueueFamilies {
    /// Find the queue family indexes for the queues this application needs.
    pub fn find_for_physical_device(
        instance: &Instance,
        window_surface: &WindowSurface,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Self, VulkanError> {
        let families = instance
            .get_physical_device_queue_family_properties(physical_device)
            .iter()
            .enumerate()
            .map(|(index, family)| {
                let present_support = window_surface
                    .get_physical_device_surface_support(
                        physical_device,
                        index as u32,
                    )
                    .unwrap_or_else(|error| {
                        // Other families may still work so this is only
                        // worth a warning.
                        log::warn!(
                            "Error while checking surface support {:?}",
                            error
                        );
                        false
                    });
                (family.queue_flags, present_support)
            })
            .collect::<Vec<_>>();
        Self::pick(&families)
    }

    /// Choose graphics and present families from `(flags, can_present)`
    /// pairs, preferring a single family which can do both.
    fn pick(families: &[(vk::QueueFlags, bool)]) -> Result<Self, VulkanError> {
        let graphics = |flags: &vk::QueueFlags| {
            flags.contains(vk::QueueFlags::GRAPHICS)
        };

        if let Some(index) = families
            .iter()
            .position(|(flags, can_present)| graphics(flags) && *can_present)
        {
            return Ok(Self {
                graphics_family_index: index as u32,
                present_family_index: index as u32,
            });
        }

        let graphics_family_index = families
            .iter()
            .position(|(flags, _)| graphics(flags))
            .ok_or(VulkanError::UnableToFindGraphicsQueue)?
            as u32;
        let present_family_index = families
            .iter()
            .position(|(_, can_present)| *can_present)
            .ok_or(VulkanError::UnableToFindPresentQueue)?
            as u32;

        Ok(Self {
            graphics_family_index,
            present_family_index,
        })
    }

    /// Create a vector of queue create infos.
    /// Automatically handles the situation where the graphics and present
    /// queue are the same.
    pub fn as_queue_create_infos(&self) -> Vec<vk::DeviceQueueCreateInfo> {
        let mut create_infos = vec![vk::DeviceQueueCreateInfo {
            queue_family_index: self.graphics_family_index,
            p_queue_priorities: QUEUE_PRIORITY.as_ptr(),
            queue_count: 1,
            ..Default::default()
        }];

        if self.graphics_family_index != self.present_family_index {
            create_infos.push(vk::DeviceQueueCreateInfo {
                queue_family_index: self.present_family_index,
                p_queue_priorities: QUEUE_PRIORITY.as_ptr(),
                queue_count: 1,
                ..Default::default()
            });
        }

        create_infos
    }

    /// Get the graphics and present queues from the logical device.
    pub fn get_queues(&self, logical_device: &ash::Device) -> (Queue, Queue) {
        let graphics_queue = Queue::from_raw(
            unsafe {
                logical_device.get_device_queue(self.graphics_family_index, 0)
            },
            self.graphics_family_index,
        );
        let present_queue = Queue::from_raw(
            unsafe {
                logical_device.get_device_queue(self.present_family_index, 0)
            },
            self.present_family_index,
        );
        (graphics_queue, present_queue)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const GRAPHICS: vk::QueueFlags = vk::QueueFlags::GRAPHICS;
    const TRANSFER: vk::QueueFlags = vk::QueueFlags::TRANSFER;

    #[test]
    fn prefers_one_family_for_both_queues() {
        let families = [(GRAPHICS, false), (TRANSFER, true), (GRAPHICS, true)];
        let picked = QueueFamilies::pick(&families).unwrap();
        assert_eq!(picked.graphics_family_index, 2);
        assert_eq!(picked.present_family_index, 2);
        assert_eq!(picked.as_queue_create_infos().len(), 1);
    }

    #[test]
    fn falls_back_to_separate_families() {
        let families = [(TRANSFER, true), (GRAPHICS, false)];
        let picked = QueueFamilies::pick(&families).unwrap();
        assert_eq!(picked.graphics_family_index, 1);
        assert_eq!(picked.present_family_index, 0);
        assert_eq!(picked.as_queue_create_infos().len(), 2);
    }

    #[test]
    fn missing_families_are_errors() {
        assert!(matches!(
            QueueFamilies::pick(&[(TRANSFER, true)]),
            Err(VulkanError::UnableToFindGraphicsQueue)
        ));
        assert!(matches!(
            QueueFamilies::pick(&[(GRAPHICS, false)]),
            Err(VulkanError::UnableToFindPresentQueue)
        ));
    }
}
