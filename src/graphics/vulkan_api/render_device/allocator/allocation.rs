use {crate::graphics::vulkan_api::VulkanError, ash::vk, std::ffi::c_void};

/// An allocated chunk of GPU memory.
#[derive(Debug)]
pub struct Allocation {
    device_memory: vk::DeviceMemory,
    size_in_bytes: vk::DeviceSize,
    memory_type_index: u32,
    cpu_mapped_ptr: Option<*mut c_void>,
}

// public api
impl Allocation {
    /// Get the size of the allocation in bytes.
    pub fn size_in_bytes(&self) -> vk::DeviceSize {
        self.size_in_bytes
    }

    /// Get the device's memory type index.
    pub fn memory_type_index(&self) -> u32 {
        self.memory_type_index
    }

    /// Get the underlying device memory handle. The allocation still owns the
    /// memory.
    pub fn device_memory(&self) -> vk::DeviceMemory {
        self.device_memory
    }

    /// Create a CPU-accessible pointer to the memory in this allocation.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///  - only memory accessible by the host can be mapped
    ///  - memory that is not HOST_COHERENT requires additional synchronization
    ///    after writes/reads
    pub unsafe fn map(
        &mut self,
        logical_device: &ash::Device,
    ) -> Result<(), VulkanError> {
        if self.cpu_mapped_ptr.is_some() {
            return Ok(());
        }
        let ptr = logical_device
            .map_memory(
                self.device_memory,
                0,
                self.size_in_bytes,
                vk::MemoryMapFlags::empty(),
            )
            .map_err(VulkanError::UnableToMapDeviceMemory)?;
        self.cpu_mapped_ptr = Some(ptr);
        Ok(())
    }

    /// Unmap the cpu-accessible pointer to the memory in this allocation.
    pub fn unmap(&mut self, logical_device: &ash::Device) {
        if self.cpu_mapped_ptr.take().is_some() {
            // safe because this will only occur if the memory is already mapped
            unsafe { logical_device.unmap_memory(self.device_memory) }
        }
    }

    /// Access the mapped device memory as a slice of T.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///  - a call to map() must be made by the application prior to calling this
    ///    function
    ///  - the caller must ensure the GPU is not reading or writing the memory
    pub unsafe fn as_slice_mut<T>(&mut self) -> Result<&mut [T], VulkanError> {
        let mapped_ptr = self
            .cpu_mapped_ptr
            .ok_or(VulkanError::DeviceMemoryIsNotMapped)?;

        if (mapped_ptr as usize % std::mem::align_of::<T>()) != 0 {
            return Err(VulkanError::DeviceMemoryIsNotAlignedForType(
                std::any::type_name::<T>().to_owned(),
            ));
        }

        let number_of_elements =
            self.size_in_bytes as usize / std::mem::size_of::<T>();

        Ok(std::slice::from_raw_parts_mut(
            mapped_ptr as *mut T,
            number_of_elements,
        ))
    }
}

// internal api
impl Allocation {
    /// Wrap a raw memory handle.
    ///
    /// The memory object is *not* freed automatically, see
    /// `MemoryAllocator::free`.
    pub(super) fn new(
        device_memory: vk::DeviceMemory,
        size_in_bytes: vk::DeviceSize,
        memory_type_index: u32,
    ) -> Self {
        Self {
            device_memory,
            size_in_bytes,
            memory_type_index,
            cpu_mapped_ptr: None,
        }
    }
}
