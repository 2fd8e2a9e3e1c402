mod api;
mod availability;
mod debug_callback;

pub(crate) use self::availability::name_from_raw;

use {
    crate::{graphics::vulkan_api::VulkanError, logging::PrettyList},
    ash::{extensions::ext::DebugUtils, vk},
    std::ffi::{c_char, CString},
};

const VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// The Vulkan library entrypoint, instance, and (optionally) the debug
/// messenger which forwards validation messages to the log.
pub struct Instance {
    debug: Option<(DebugUtils, vk::DebugUtilsMessengerEXT)>,
    ash: ash::Instance,
    entry: ash::Entry,
}

impl Instance {
    /// Create a Vulkan instance.
    ///
    /// # Params
    ///
    /// * `required_extensions` - the instance extensions needed to present to
    ///   the window. Typically provided by the windowing system.
    /// * `enable_validation` - when true the Khronos validation layer and the
    ///   debug-utils extension are enabled and all validation messages are
    ///   logged.
    ///
    /// # Safety
    ///
    /// Unsafe because the application must drop every object created from
    /// this instance before the instance itself.
    pub unsafe fn new(
        required_extensions: &[String],
        enable_validation: bool,
    ) -> Result<Self, VulkanError> {
        let entry = ash::Entry::load()?;

        let mut extensions = required_extensions.to_vec();
        let mut layers = vec![];
        if enable_validation {
            extensions.push(DebugUtils::name().to_string_lossy().into_owned());
            layers.push(VALIDATION_LAYER.to_owned());
        }

        availability::check_extensions(&entry, &extensions)?;
        availability::check_layers(&entry, &layers)?;

        log::debug!(
            "Instance extensions: {}\nInstance layers: {}",
            PrettyList(&extensions),
            PrettyList(&layers)
        );

        let app_name = CString::new("vk_frames")?;
        let app_info = vk::ApplicationInfo {
            p_application_name: app_name.as_ptr(),
            application_version: vk::make_api_version(0, 1, 0, 0),
            p_engine_name: app_name.as_ptr(),
            engine_version: vk::make_api_version(0, 1, 0, 0),
            api_version: vk::API_VERSION_1_1,
            ..Default::default()
        };

        let (_layer_names, layer_ptrs) = to_os_ptrs(&layers)?;
        let (_extension_names, extension_ptrs) = to_os_ptrs(&extensions)?;
        let create_info = vk::InstanceCreateInfo {
            p_application_info: &app_info,
            enabled_layer_count: layer_ptrs.len() as u32,
            pp_enabled_layer_names: layer_ptrs.as_ptr(),
            enabled_extension_count: extension_ptrs.len() as u32,
            pp_enabled_extension_names: extension_ptrs.as_ptr(),
            ..Default::default()
        };
        let ash = entry
            .create_instance(&create_info, None)
            .map_err(VulkanError::UnableToCreateInstance)?;

        let debug = if enable_validation {
            match debug_callback::create_debug_logger(&entry, &ash) {
                Ok(debug) => Some(debug),
                Err(err) => {
                    ash.destroy_instance(None);
                    return Err(err);
                }
            }
        } else {
            None
        };

        Ok(Self { debug, ash, entry })
    }

    /// The Vulkan library entrypoint.
    pub fn entry(&self) -> &ash::Entry {
        &self.entry
    }

    /// The raw ash instance.
    pub fn ash(&self) -> &ash::Instance {
        &self.ash
    }

    /// Give a Vulkan object a name which shows up in validation messages.
    ///
    /// Does nothing when validation is disabled.
    pub fn debug_utils_set_object_name(
        &self,
        device: &ash::Device,
        name_info: &vk::DebugUtilsObjectNameInfoEXT,
    ) {
        if let Some((debug_utils, _)) = &self.debug {
            let result = unsafe {
                debug_utils
                    .set_debug_utils_object_name(device.handle(), name_info)
            };
            if let Err(err) = result {
                log::warn!("Unable to set debug object name {:?}", err);
            }
        }
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        unsafe {
            if let Some((debug_utils, messenger)) = self.debug.take() {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            }
            self.ash.destroy_instance(None);
        }
    }
}

/// Convert owned strings into the nul-terminated pointers Vulkan expects.
///
/// The returned CStrings own the memory behind the pointers and must outlive
/// every use of them.
fn to_os_ptrs(
    strings: &[String],
) -> Result<(Vec<CString>, Vec<*const c_char>), VulkanError> {
    let cstrings = strings
        .iter()
        .cloned()
        .map(CString::new)
        .collect::<Result<Vec<CString>, _>>()?;
    let ptrs = cstrings.iter().map(|cstr| cstr.as_ptr()).collect();
    Ok((cstrings, ptrs))
}
