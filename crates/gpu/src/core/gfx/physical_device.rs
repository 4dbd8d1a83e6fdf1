use anyhow::{anyhow, Error};
use tracing::{info, warn};
use vulkanalia::vk;
use vulkanalia::vk::InstanceV1_0;
use crate::core::gfx::instance::Instance;

pub struct PhysicalDevice {
    physical_device: vk::PhysicalDevice,
    properties: vk::PhysicalDeviceProperties,
    features: vk::PhysicalDeviceFeatures,
    graphics_queue_family: u32,
}

impl PhysicalDevice {
    /// Picks the first discrete GPU exposing a graphic queue, or any other device with a graphic queue.
    pub fn new(instance: &Instance) -> Result<Self, Error> {
        let mut fallback = None;
        unsafe {
            for physical_device in instance.ptr().enumerate_physical_devices()? {
                let properties = instance.ptr().get_physical_device_properties(physical_device);
                match Self::check_physical_device(instance, physical_device) {
                    Ok(queue_family) => {
                        let device = Self {
                            physical_device,
                            properties,
                            features: instance.ptr().get_physical_device_features(physical_device),
                            graphics_queue_family: queue_family,
                        };
                        if properties.device_type == vk::PhysicalDeviceType::DISCRETE_GPU {
                            info!("Selected physical device (`{}`).", properties.device_name);
                            return Ok(device);
                        }
                        if fallback.is_none() {
                            fallback = Some(device);
                        }
                    }
                    Err(err) => {
                        warn!("Skipping physical device (`{}`): {}", properties.device_name, err);
                    }
                }
            }
        }
        let device = fallback.ok_or(anyhow!("Failed to find suitable physical device."))?;
        info!("Selected non discrete physical device (`{}`).", device.properties.device_name);
        Ok(device)
    }

    pub fn ptr(&self) -> &vk::PhysicalDevice {
        &self.physical_device
    }

    pub fn properties(&self) -> &vk::PhysicalDeviceProperties {
        &self.properties
    }

    pub fn graphics_queue_family(&self) -> u32 {
        self.graphics_queue_family
    }

    pub fn supports_sampler_anisotropy(&self) -> bool {
        self.features.sampler_anisotropy == vk::TRUE
    }

    unsafe fn check_physical_device(instance: &Instance, physical_device: vk::PhysicalDevice) -> Result<u32, Error> {
        instance.ptr()
            .get_physical_device_queue_family_properties(physical_device)
            .iter()
            .position(|family| family.queue_flags.contains(vk::QueueFlags::GRAPHICS))
            .map(|index| index as u32)
            .ok_or(anyhow!("There is no available graphic queue on this device"))
    }
}
