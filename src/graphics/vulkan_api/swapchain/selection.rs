use {crate::logging::PrettyList, ash::vk};

/// Prefer an sRGB BGRA8 format, otherwise take whatever the surface lists
/// first.
///
/// Returns None only when the surface advertises no formats at all.
pub fn choose_surface_format(
    formats: &[vk::SurfaceFormatKHR],
) -> Option<vk::SurfaceFormatKHR> {
    log::debug!("Available surface formats: {:?}", PrettyList(formats));
    formats
        .iter()
        .copied()
        .find(|format| {
            format.format == vk::Format::B8G8R8A8_SRGB
                && format.color_space == vk::ColorSpaceKHR::SRGB_NONLINEAR
        })
        .or_else(|| formats.first().copied())
}

/// Mailbox when available. FIFO is guaranteed by every implementation.
pub fn choose_present_mode(modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    log::debug!("Available present modes: {:?}", PrettyList(modes));
    if modes.contains(&vk::PresentModeKHR::MAILBOX) {
        vk::PresentModeKHR::MAILBOX
    } else {
        vk::PresentModeKHR::FIFO
    }
}

/// The surface's current extent when it has one, otherwise the target
/// clamped into the surface's limits.
///
/// Returns None when the result has no area, which is what a minimized
/// window reports. No swapchain can be built until that changes.
pub fn choose_swap_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    target: vk::Extent2D,
) -> Option<vk::Extent2D> {
    let extent = if capabilities.current_extent.width != u32::MAX {
        capabilities.current_extent
    } else {
        vk::Extent2D {
            width: target.width.clamp(
                capabilities.min_image_extent.width,
                capabilities.max_image_extent.width,
            ),
            height: target.height.clamp(
                capabilities.min_image_extent.height,
                capabilities.max_image_extent.height,
            ),
        }
    };
    (extent.width > 0 && extent.height > 0).then_some(extent)
}

/// One more than the minimum so the driver never blocks the application
/// while it finishes with an image. A max of zero means there is no limit.
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let proposed = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        proposed.min(capabilities.max_image_count)
    } else {
        proposed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn surface_format(
        format: vk::Format,
        color_space: vk::ColorSpaceKHR,
    ) -> vk::SurfaceFormatKHR {
        vk::SurfaceFormatKHR {
            format,
            color_space,
        }
    }

    #[test]
    fn prefers_srgb_bgra_format() {
        let formats = [
            surface_format(
                vk::Format::R8G8B8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
            surface_format(
                vk::Format::B8G8R8A8_SRGB,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
        ];
        assert_eq!(choose_surface_format(&formats), Some(formats[1]));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [
            surface_format(
                vk::Format::R8G8B8A8_UNORM,
                vk::ColorSpaceKHR::SRGB_NONLINEAR,
            ),
            surface_format(
                vk::Format::B8G8R8A8_SRGB,
                vk::ColorSpaceKHR::DISPLAY_P3_NONLINEAR_EXT,
            ),
        ];
        assert_eq!(choose_surface_format(&formats), Some(formats[0]));
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn present_mode_prefers_mailbox_then_fifo() {
        assert_eq!(
            choose_present_mode(&[
                vk::PresentModeKHR::FIFO,
                vk::PresentModeKHR::MAILBOX
            ]),
            vk::PresentModeKHR::MAILBOX
        );
        assert_eq!(
            choose_present_mode(&[
                vk::PresentModeKHR::IMMEDIATE,
                vk::PresentModeKHR::FIFO
            ]),
            vk::PresentModeKHR::FIFO
        );
    }

    #[test]
    fn extent_uses_current_extent_when_defined() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D {
                width: 640,
                height: 480,
            },
            ..Default::default()
        };
        let extent = choose_swap_extent(
            &capabilities,
            vk::Extent2D {
                width: 800,
                height: 600,
            },
        )
        .unwrap();
        assert_eq!((extent.width, extent.height), (640, 480));
    }

    #[test]
    fn minimized_surface_has_no_extent() {
        for (width, height) in [(0, 0), (0, 480), (640, 0)] {
            let capabilities = vk::SurfaceCapabilitiesKHR {
                current_extent: vk::Extent2D { width, height },
                ..Default::default()
            };
            let extent = choose_swap_extent(
                &capabilities,
                vk::Extent2D {
                    width: 800,
                    height: 600,
                },
            );
            assert_eq!(extent, None);
        }
    }

    #[test]
    fn zero_sized_limits_have_no_extent() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D {
                width: u32::MAX,
                height: u32::MAX,
            },
            ..Default::default()
        };
        let extent = choose_swap_extent(
            &capabilities,
            vk::Extent2D {
                width: 800,
                height: 600,
            },
        );
        assert_eq!(extent, None);
    }

    #[test]
    fn extent_is_clamped_when_surface_defers_to_swapchain() {
        let capabilities = vk::SurfaceCapabilitiesKHR {
            current_extent: vk::Extent2D {
                width: u32::MAX,
                height: u32::MAX,
            },
            min_image_extent: vk::Extent2D {
                width: 100,
                height: 100,
            },
            max_image_extent: vk::Extent2D {
                width: 1000,
                height: 500,
            },
            ..Default::default()
        };
        let extent = choose_swap_extent(
            &capabilities,
            vk::Extent2D {
                width: 50,
                height: 600,
            },
        )
        .unwrap();
        assert_eq!((extent.width, extent.height), (100, 500));
    }

    #[test]
    fn image_count_is_one_more_than_min_within_max() {
        let mut capabilities = vk::SurfaceCapabilitiesKHR {
            min_image_count: 2,
            max_image_count: 0,
            ..Default::default()
        };
        assert_eq!(choose_image_count(&capabilities), 3);

        capabilities.max_image_count = 2;
        assert_eq!(choose_image_count(&capabilities), 2);

        capabilities.max_image_count = 8;
        assert_eq!(choose_image_count(&capabilities), 3);
    }
}
