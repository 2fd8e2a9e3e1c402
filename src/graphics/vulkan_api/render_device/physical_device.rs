use {
    crate::{
        graphics::vulkan_api::{
            render_device::{QueueFamilies, WindowSurface},
            Instance, VulkanError,
        },
        logging::PrettyList,
    },
    ash::vk,
};

/// Get the set of required device extensions for this application.
pub fn required_device_extensions() -> Vec<String> {
    vec![ash::extensions::khr::Swapchain::name()
        .to_string_lossy()
        .into_owned()]
}

/// Find the first physical device which can render and present to the
/// window surface.
pub fn find_optimal_physical_device(
    instance: &Instance,
    window_surface: &WindowSurface,
) -> Result<vk::PhysicalDevice, VulkanError> {
    instance
        .enumerate_physical_devices()?
        .into_iter()
        .find(|device| is_device_suitable(instance, window_surface, *device))
        .ok_or(VulkanError::NoSuitableDeviceFound)
}

fn is_device_suitable(
    instance: &Instance,
    window_surface: &WindowSurface,
    physical_device: vk::PhysicalDevice,
) -> bool {
    let available_extensions = instance.device_extension_names(physical_device);
    let missing: Vec<String> = required_device_extensions()
        .into_iter()
        .filter(|name| !available_extensions.contains(name))
        .collect();
    if !missing.is_empty() {
        log::trace!(
            "Physical device {:?} is missing extensions {}",
            physical_device,
            PrettyList(&missing)
        );
        return false;
    }

    if QueueFamilies::find_for_physical_device(
        instance,
        window_surface,
        physical_device,
    )
    .is_err()
    {
        log::trace!(
            "Could not find suitable queue families for physical device {:?}",
            physical_device
        );
        return false;
    }

    let has_formats = window_surface
        .supported_formats(physical_device)
        .map(|formats| !formats.is_empty())
        .unwrap_or(false);
    let has_present_modes = window_surface
        .supported_presentation_modes(physical_device)
        .map(|modes| !modes.is_empty())
        .unwrap_or(false);
    if !has_formats || !has_present_modes {
        log::trace!(
            "Physical device {:?} cannot present to the surface",
            physical_device
        );
        return false;
    }

    let features = instance.get_physical_device_features(physical_device);
    features.sampler_anisotropy == vk::TRUE
}

/// The highest sample count usable for both color and depth attachments.
pub fn pick_max_supported_msaa_count(
    limits: &vk::PhysicalDeviceLimits,
) -> vk::SampleCountFlags {
    let supported = limits.framebuffer_color_sample_counts
        & limits.framebuffer_depth_sample_counts;
    [
        vk::SampleCountFlags::TYPE_64,
        vk::SampleCountFlags::TYPE_32,
        vk::SampleCountFlags::TYPE_16,
        vk::SampleCountFlags::TYPE_8,
        vk::SampleCountFlags::TYPE_4,
        vk::SampleCountFlags::TYPE_2,
    ]
    .into_iter()
    .find(|count| supported.contains(*count))
    .unwrap_or(vk::SampleCountFlags::TYPE_1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn msaa_count_must_work_for_color_and_depth() {
        let limits = vk::PhysicalDeviceLimits {
            framebuffer_color_sample_counts: vk::SampleCountFlags::TYPE_1
                | vk::SampleCountFlags::TYPE_4
                | vk::SampleCountFlags::TYPE_8,
            framebuffer_depth_sample_counts: vk::SampleCountFlags::TYPE_1
                | vk::SampleCountFlags::TYPE_4,
            ..Default::default()
        };
        assert_eq!(
            pick_max_supported_msaa_count(&limits),
            vk::SampleCountFlags::TYPE_4
        );
    }

    #[test]
    fn msaa_count_falls_back_to_one_sample() {
        let limits = vk::PhysicalDeviceLimits::default();
        assert_eq!(
            pick_max_supported_msaa_count(&limits),
            vk::SampleCountFlags::TYPE_1
        );
    }
}
