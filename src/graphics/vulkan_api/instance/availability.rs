use {
    crate::{graphics::vulkan_api::VulkanError, logging::PrettyList},
    std::ffi::CStr,
};

/// Check that each of the required instance extensions is available on the
/// current platform.
pub fn check_extensions(
    entry: &ash::Entry,
    required_extensions: &[String],
) -> Result<(), VulkanError> {
    let available = entry
        .enumerate_instance_extension_properties(None)
        .map_err(VulkanError::UnableToListAvailableExtensions)?
        .iter()
        .map(|ext| name_from_raw(&ext.extension_name))
        .collect::<Vec<String>>();

    log::trace!("Available extensions: {}", PrettyList(&available));

    let missing = missing_names(&available, required_extensions);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(VulkanError::RequiredExtensionsNotFound(missing))
    }
}

/// Check that each of the required layers is available on the current
/// platform.
pub fn check_layers(
    entry: &ash::Entry,
    required_layers: &[String],
) -> Result<(), VulkanError> {
    if required_layers.is_empty() {
        return Ok(());
    }

    let available = entry
        .enumerate_instance_layer_properties()
        .map_err(VulkanError::UnableToListAvailableLayers)?
        .iter()
        .map(|layer| name_from_raw(&layer.layer_name))
        .collect::<Vec<String>>();

    log::trace!("Available layers: {}", PrettyList(&available));

    let missing = missing_names(&available, required_layers);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(VulkanError::RequiredLayersNotFound(missing))
    }
}

/// Read a fixed-size, nul-terminated Vulkan name.
pub(crate) fn name_from_raw(raw: &[std::ffi::c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|c| **c != 0)
        .map(|c| *c as u8)
        .chain(std::iter::once(0))
        .collect();
    CStr::from_bytes_with_nul(&bytes)
        .map(|cstr| cstr.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Every required name which does not appear in the available list.
fn missing_names(available: &[String], required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !available.contains(name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reports_only_the_missing_names() {
        let available = vec![
            "VK_KHR_surface".to_owned(),
            "VK_KHR_xcb_surface".to_owned(),
        ];
        let required = vec![
            "VK_KHR_surface".to_owned(),
            "VK_EXT_debug_utils".to_owned(),
        ];
        assert_eq!(
            missing_names(&available, &required),
            vec!["VK_EXT_debug_utils".to_owned()]
        );
    }

    #[test]
    fn prefixes_do_not_count_as_available() {
        let available = vec!["VK_KHR_surface_protected".to_owned()];
        let required = vec!["VK_KHR_surface".to_owned()];
        assert_eq!(missing_names(&available, &required), required);
    }

    #[test]
    fn raw_names_stop_at_the_first_nul() {
        let mut raw = [0 as std::ffi::c_char; 16];
        for (dst, src) in raw.iter_mut().zip(b"VK_KHR_surface") {
            *dst = *src as std::ffi::c_char;
        }
        assert_eq!(name_from_raw(&raw), "VK_KHR_surface");
    }
}
