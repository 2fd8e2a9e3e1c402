use ash::vk;

/// A Vulkan queue and the family it was created from.
#[derive(Debug, Clone, Copy)]
pub struct Queue {
    queue: vk::Queue,
    family_index: u32,
}

impl Queue {
    /// Create a new queue instance from the raw vulkan resource.
    pub fn from_raw(queue: vk::Queue, family_index: u32) -> Self {
        Self {
            queue,
            family_index,
        }
    }

    /// The raw Vulkan queue handle.
    pub fn raw(&self) -> vk::Queue {
        self.queue
    }

    /// The queue family this queue belongs to.
    pub fn family_index(&self) -> u32 {
        self.family_index
    }
}
