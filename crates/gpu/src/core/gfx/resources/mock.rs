use std::cell::{Cell, RefCell};
use std::rc::Rc;
use anyhow::{anyhow, Error};
use vulkanalia::vk;
use vulkanalia::vk::Handle;
use crate::core::gfx::device::GpuDevice;
use crate::core::gfx::instance::DebugLabel;

#[derive(Default)]
pub struct MockLog {
    pub created: Vec<vk::SamplerCreateInfo>,
    pub destroyed: Vec<vk::Sampler>,
    pub labels: Vec<(vk::ObjectType, u64, String)>,
}

/// Records every call instead of talking to a driver.
pub struct MockDevice {
    anisotropy: bool,
    /// Remaining successful creations, unlimited when `None`.
    creation_budget: Cell<Option<usize>>,
    context_valid: Cell<bool>,
    next_handle: Cell<u64>,
    log: Rc<RefCell<MockLog>>,
}

impl Default for MockDevice {
    fn default() -> Self {
        Self {
            anisotropy: true,
            creation_budget: Cell::new(None),
            context_valid: Cell::new(true),
            next_handle: Cell::new(1),
            log: Default::default(),
        }
    }
}

impl MockDevice {
    pub fn without_anisotropy() -> Self {
        Self { anisotropy: false, ..Self::default() }
    }

    pub fn failing() -> Self {
        Self { creation_budget: Cell::new(Some(0)), ..Self::default() }
    }

    /// Let `creations` samplers be created, then fail every following creation.
    pub fn fail_after(&self, creations: usize) {
        self.creation_budget.set(Some(creations));
    }

    pub fn stop_failing(&self) {
        self.creation_budget.set(None);
    }

    /// Shared so it can be inspected after the device is dropped.
    pub fn log(&self) -> Rc<RefCell<MockLog>> {
        self.log.clone()
    }

    pub fn invalidate_context(&self) {
        self.context_valid.set(false);
    }
}

impl GpuDevice for MockDevice {
    fn is_context_valid(&self) -> bool {
        self.context_valid.get()
    }

    fn supports_anisotropic_sampling(&self) -> bool {
        self.anisotropy
    }

    fn create_sampler(&self, infos: &vk::SamplerCreateInfo) -> Result<vk::Sampler, Error> {
        match self.creation_budget.get() {
            Some(0) => return Err(anyhow!("ERROR_OUT_OF_DEVICE_MEMORY")),
            Some(remaining) => self.creation_budget.set(Some(remaining - 1)),
            None => {}
        }
        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.log.borrow_mut().created.push(*infos);
        Ok(vk::Sampler::from_raw(handle))
    }

    fn destroy_sampler(&self, sampler: vk::Sampler) {
        self.log.borrow_mut().destroyed.push(sampler);
    }
}

impl DebugLabel for MockDevice {
    fn attach_label(&self, object_type: vk::ObjectType, handle: u64, name: &str) {
        self.log.borrow_mut().labels.push((object_type, handle, name.to_string()));
    }
}
