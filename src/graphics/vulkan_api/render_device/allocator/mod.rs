mod allocation;

use {crate::graphics::vulkan_api::VulkanError, ash::vk};

pub use self::allocation::Allocation;

/// Allocates device memory directly from the logical device, one
/// `vkAllocateMemory` call per resource.
///
/// The demos create a handful of long-lived buffers and images so there is
/// nothing to gain from sub-allocation.
pub struct MemoryAllocator {
    memory_properties: vk::PhysicalDeviceMemoryProperties,
    logical_device: ash::Device,
}

impl MemoryAllocator {
    pub(super) fn new(
        logical_device: ash::Device,
        memory_properties: vk::PhysicalDeviceMemoryProperties,
    ) -> Self {
        Self {
            memory_properties,
            logical_device,
        }
    }

    /// Allocate memory which satisfies the requirements and has every one of
    /// the requested property flags.
    ///
    /// # Safety
    ///
    /// Unsafe because the caller is responsible for calling free when the
    /// memory is no longer needed.
    pub unsafe fn allocate(
        &self,
        requirements: vk::MemoryRequirements,
        property_flags: vk::MemoryPropertyFlags,
    ) -> Result<Allocation, VulkanError> {
        let memory_type_index = find_memory_type_index(
            &self.memory_properties,
            requirements.memory_type_bits,
            property_flags,
        )
        .ok_or(VulkanError::NoSuitableMemoryType(property_flags))?;

        // Memory returned by vkAllocateMemory always meets the alignment
        // in `requirements`.
        let allocate_info = vk::MemoryAllocateInfo {
            allocation_size: requirements.size,
            memory_type_index,
            ..Default::default()
        };
        let memory = self
            .logical_device
            .allocate_memory(&allocate_info, None)
            .map_err(VulkanError::UnableToAllocateDeviceMemory)?;
        Ok(Allocation::new(memory, requirements.size, memory_type_index))
    }

    /// Free an allocated piece of device memory.
    ///
    /// # Safety
    ///
    /// Unsafe because the caller must ensure that no GPU operations refer to
    /// the allocation.
    pub unsafe fn free(&self, allocation: &mut Allocation) {
        allocation.unmap(&self.logical_device);
        self.logical_device
            .free_memory(allocation.device_memory(), None);
    }
}

/// Find the first memory type allowed by `type_bits` which has all of the
/// requested property flags.
fn find_memory_type_index(
    memory_properties: &vk::PhysicalDeviceMemoryProperties,
    type_bits: u32,
    property_flags: vk::MemoryPropertyFlags,
) -> Option<u32> {
    memory_properties.memory_types
        [..memory_properties.memory_type_count as usize]
        .iter()
        .enumerate()
        .find(|(index, memory_type)| {
            type_bits & (1 << index) != 0
                && memory_type.property_flags.contains(property_flags)
        })
        .map(|(index, _)| index as u32)
}

#[cfg(test)]
mod test {
    use super::*;

    fn properties(
        types: &[vk::MemoryPropertyFlags],
    ) -> vk::PhysicalDeviceMemoryProperties {
        let mut memory_properties = vk::PhysicalDeviceMemoryProperties {
            memory_type_count: types.len() as u32,
            ..Default::default()
        };
        for (slot, flags) in
            memory_properties.memory_types.iter_mut().zip(types)
        {
            slot.property_flags = *flags;
        }
        memory_properties
    }

    #[test]
    fn picks_the_first_type_with_every_flag() {
        let props = properties(&[
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
            vk::MemoryPropertyFlags::HOST_VISIBLE,
            vk::MemoryPropertyFlags::HOST_VISIBLE
                | vk::MemoryPropertyFlags::HOST_COHERENT,
        ]);
        let wanted = vk::MemoryPropertyFlags::HOST_VISIBLE
            | vk::MemoryPropertyFlags::HOST_COHERENT;
        assert_eq!(find_memory_type_index(&props, 0b111, wanted), Some(2));
    }

    #[test]
    fn respects_the_resource_type_bits() {
        let props = properties(&[
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
            vk::MemoryPropertyFlags::DEVICE_LOCAL,
        ]);
        assert_eq!(
            find_memory_type_index(
                &props,
                0b10,
                vk::MemoryPropertyFlags::DEVICE_LOCAL
            ),
            Some(1)
        );
        assert_eq!(
            find_memory_type_index(
                &props,
                0b100,
                vk::MemoryPropertyFlags::DEVICE_LOCAL
            ),
            None
        );
    }
}
