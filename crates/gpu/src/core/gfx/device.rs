use std::sync::Arc;
use anyhow::{anyhow, Error};
use tracing::{info, warn};
use vulkanalia::vk;
use vulkanalia::vk::{DeviceV1_0, Handle, HasBuilder};
use types::resource_handle::{Resource, ResourceHandle};
use crate::core::gfx::instance::{DebugLabel, Instance, InstanceCtx, VALIDATION_LAYER};
use crate::core::gfx::physical_device::PhysicalDevice;

/// Device operations needed by the resources of this crate.
pub trait GpuDevice: DebugLabel {
    /// False once the native device handle is gone. Resources holding a [`ResourceHandle`] on a
    /// dropped device already fail to upgrade it, this covers devices that are still referenced.
    fn is_context_valid(&self) -> bool;

    fn supports_anisotropic_sampling(&self) -> bool;

    fn create_sampler(&self, infos: &vk::SamplerCreateInfo) -> Result<vk::Sampler, Error>;

    fn destroy_sampler(&self, sampler: vk::Sampler);
}

pub type DeviceCtx = ResourceHandle<Device>;

pub struct Device {
    /// Keeps the vulkan instance alive until the device is destroyed, whatever the drop order of
    /// their owners.
    instance: Arc<Instance>,
    physical_device: PhysicalDevice,
    device: vulkanalia::Device,
}

impl Device {
    pub fn new(ctx: InstanceCtx) -> Result<Resource<Self>, Error> {
        let instance = ctx.upgrade().ok_or(anyhow!("Cannot create a device from a destroyed instance"))?;
        let physical_device = PhysicalDevice::new(&instance)?;

        let queue_family = physical_device.graphics_queue_family();
        let queue_priorities = &[1.0];
        let queue_info = [vk::DeviceQueueCreateInfo::builder()
            .queue_family_index(queue_family)
            .queue_priorities(queue_priorities)];

        let features = vk::PhysicalDeviceFeatures::builder()
            .sampler_anisotropy(physical_device.supports_sampler_anisotropy());

        let layers = if instance.validation_layers() {
            vec![VALIDATION_LAYER.as_ptr()]
        } else {
            Vec::new()
        };
        let info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_info)
            .enabled_layer_names(&layers)
            .enabled_features(&features);

        let device = unsafe { instance.ptr().create_device(*physical_device.ptr(), &info, None)? };

        info!("Created logical device : graphic queue family = {}, sampler anisotropy = {} (max {})",
            queue_family,
            physical_device.supports_sampler_anisotropy(),
            physical_device.properties().limits.max_sampler_anisotropy);

        Ok(Resource::new(Self {
            instance,
            physical_device,
            device,
        }))
    }

    pub fn wait_idle(&self) -> Result<(), Error> {
        unsafe { self.device.device_wait_idle()? };
        Ok(())
    }
}

impl GpuDevice for Device {
    // The vulkan device is only destroyed in `Drop`, once no reference to it remains.
    fn is_context_valid(&self) -> bool {
        !self.device.handle().is_null()
    }

    fn supports_anisotropic_sampling(&self) -> bool {
        self.physical_device.supports_sampler_anisotropy()
    }

    fn create_sampler(&self, infos: &vk::SamplerCreateInfo) -> Result<vk::Sampler, Error> {
        Ok(unsafe { self.device.create_sampler(infos, None) }?)
    }

    fn destroy_sampler(&self, sampler: vk::Sampler) {
        unsafe { self.device.destroy_sampler(sampler, None) }
    }
}

impl DebugLabel for Device {
    fn attach_label(&self, object_type: vk::ObjectType, handle: u64, name: &str) {
        if let Err(err) = self.instance.set_object_name(self.device.handle(), object_type, handle, name) {
            warn!("Failed to name {:?} `{}` : {}", object_type, name, err);
        }
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        unsafe {
            if let Err(err) = self.device.device_wait_idle() {
                warn!("Failed to wait for device idle before destruction : {}", err);
            }
            self.device.destroy_device(None);
        }
        // `instance` is released after this, destroying the vulkan instance if the device was its last user.
    }
}
