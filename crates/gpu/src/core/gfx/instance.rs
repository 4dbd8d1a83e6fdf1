use std::collections::HashSet;
use std::ffi::{c_void, CString};
use anyhow::{anyhow, Error};
use tracing::{debug, error, info, trace, warn};
use vulkanalia::{vk, Entry};
use vulkanalia::loader::{LibloadingLoader, LIBRARY};
use vulkanalia::vk::{DebugUtilsMessengerEXT, EntryV1_0, ExtDebugUtilsExtension, Handle, HasBuilder, InstanceV1_0};
use types::resource_handle::{Resource, ResourceHandle};
use crate::options::Options;

pub(crate) const VALIDATION_LAYER: vk::ExtensionName = vk::ExtensionName::from_bytes(b"VK_LAYER_KHRONOS_validation");

/// Attaches human-readable names to native objects for debugging tools.
pub trait DebugLabel {
    /// Failing to label an object is never fatal.
    fn attach_label(&self, object_type: vk::ObjectType, handle: u64, name: &str);
}

pub struct Instance {
    _entry: Entry,
    messenger: DebugUtilsMessengerEXT,
    instance: vulkanalia::Instance,
    validation_layers: bool,
}

pub type InstanceCtx = ResourceHandle<Instance>;

impl Instance {
    pub fn new(options: &Options) -> Result<Resource<Self>, Error> {
        let entry = unsafe {
            let loader = LibloadingLoader::new(LIBRARY)?;
            Entry::new(loader).map_err(|b| anyhow!("{}", b))?
        };

        let available_layers = unsafe {
            entry.enumerate_instance_layer_properties()?
                .iter()
                .map(|l| l.layer_name)
                .collect::<HashSet<_>>()
        };

        let mut validation_layers = options.rendering.validation_layers;
        if validation_layers && !available_layers.contains(&VALIDATION_LAYER) {
            error!("Validation layer requested but not supported.");
            validation_layers = false;
        }

        let (layers, extensions) = if validation_layers {
            (vec![VALIDATION_LAYER.as_ptr()], vec![vk::EXT_DEBUG_UTILS_EXTENSION.name.as_ptr()])
        } else {
            (Vec::new(), Vec::new())
        };

        let application_name = CString::new(options.application_name.as_str())?;
        let application_info = vk::ApplicationInfo::builder()
            .application_name(application_name.as_bytes_with_nul())
            .application_version(vk::make_version(1, 0, 0))
            .engine_name(b"samplers\0")
            .engine_version(vk::make_version(1, 0, 0))
            .api_version(vk::make_version(1, 0, 0));
        let mut info = vk::InstanceCreateInfo::builder()
            .application_info(&application_info)
            .enabled_layer_names(&layers)
            .enabled_extension_names(&extensions);

        let mut debug_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(vk::DebugUtilsMessageSeverityFlagsEXT::all())
            .message_type(vk::DebugUtilsMessageTypeFlagsEXT::all())
            .user_callback(Some(debug_callback));
        if validation_layers {
            info = info.push_next(&mut debug_info);
        }

        let instance = unsafe { entry.create_instance(&info, None)? };

        let messenger = if validation_layers {
            unsafe { instance.create_debug_utils_messenger_ext(&debug_info, None)? }
        } else {
            DebugUtilsMessengerEXT::null()
        };

        info!("Created vulkan instance (validation layers : {validation_layers})");
        Ok(Resource::new(Self {
            _entry: entry,
            messenger,
            instance,
            validation_layers,
        }))
    }

    pub fn ptr(&self) -> &vulkanalia::Instance {
        &self.instance
    }

    /// Object names can only be set while the debug utils extension is enabled.
    pub fn validation_layers(&self) -> bool {
        self.validation_layers
    }

    pub fn set_object_name(&self, device: vk::Device, object_type: vk::ObjectType, handle: u64, name: &str) -> Result<(), Error> {
        if !self.validation_layers {
            return Ok(());
        }
        let name = CString::new(name)?;
        let info = vk::DebugUtilsObjectNameInfoEXT::builder()
            .object_type(object_type)
            .object_handle(handle)
            .object_name(name.as_bytes_with_nul());
        unsafe { self.instance.set_debug_utils_object_name_ext(device, &info)? };
        Ok(())
    }
}

impl Drop for Instance {
    fn drop(&mut self) {
        unsafe {
            if !self.messenger.is_null() {
                self.instance.destroy_debug_utils_messenger_ext(self.messenger, None);
            }
            self.instance.destroy_instance(None);
        }
    }
}

/// Logs debug messages.
extern "system" fn debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    type_: vk::DebugUtilsMessageTypeFlagsEXT,
    data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _: *mut c_void,
) -> vk::Bool32 {
    let data = unsafe { *data };
    let message = unsafe { std::ffi::CStr::from_ptr(data.message) }.to_string_lossy();

    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        error!("({:?}) {}", type_, message);
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        warn!("({:?}) {}", type_, message);
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        debug!("({:?}) {}", type_, message);
    } else {
        trace!("({:?}) {}", type_, message);
    }

    vk::FALSE
}
