use anyhow::{anyhow, Error};
use tracing::debug;
use vulkanalia::vk;
use vulkanalia::vk::{Handle, HasBuilder};
use types::resource_handle::ResourceHandle;
use types::sampler_state::{SamplerCustomKind, SamplerExtendMode, SamplerState, SamplerStateKind};
use crate::core::gfx::device::{Device, GpuDevice};

/// Max LOD used when mipmapping is enabled, large enough to reach every mip level.
const MIPMAP_MAX_LOD: f32 = 1000.0;

pub fn to_vk_address_mode(mode: SamplerExtendMode) -> vk::SamplerAddressMode {
    match mode {
        SamplerExtendMode::Extend => vk::SamplerAddressMode::CLAMP_TO_EDGE,
        SamplerExtendMode::Repeat => vk::SamplerAddressMode::REPEAT,
        SamplerExtendMode::MirroredRepeat => vk::SamplerAddressMode::MIRRORED_REPEAT,
        SamplerExtendMode::ClampToBorder => vk::SamplerAddressMode::CLAMP_TO_BORDER,
    }
}

/// Translate a sampler state into vulkan create infos.
///
/// Anisotropy is only enabled when requested by the state, when `anisotropic_filter` is greater
/// than 1 and when the device supports it.
pub fn sampler_create_info(state: &SamplerState, anisotropic_filter: u32, supports_anisotropy: bool) -> vk::SamplerCreateInfo {
    let mut infos = vk::SamplerCreateInfo::builder()
        .address_mode_u(to_vk_address_mode(state.extend_x))
        .address_mode_v(to_vk_address_mode(state.extend_yz))
        .address_mode_w(to_vk_address_mode(state.extend_yz))
        .min_lod(0.0)
        .max_lod(0.0);

    match state.kind {
        SamplerStateKind::Parameters => {
            if state.filtering.is_linear() {
                infos = infos
                    .mag_filter(vk::Filter::LINEAR)
                    .min_filter(vk::Filter::LINEAR);
            }
            if state.filtering.is_mipmap() {
                infos = infos
                    .mipmap_mode(vk::SamplerMipmapMode::LINEAR)
                    .min_lod(0.0)
                    .max_lod(MIPMAP_MAX_LOD);
            }
            if state.filtering.is_anisotropic() && anisotropic_filter > 1 && supports_anisotropy {
                infos = infos
                    .anisotropy_enable(true)
                    .max_anisotropy(anisotropic_filter as f32);
            }
        }
        SamplerStateKind::Custom(SamplerCustomKind::Icon) => {
            infos = infos
                .mag_filter(vk::Filter::LINEAR)
                .min_filter(vk::Filter::LINEAR)
                .mipmap_mode(vk::SamplerMipmapMode::NEAREST)
                .min_lod(0.0)
                .max_lod(1.0);
        }
        SamplerStateKind::Custom(SamplerCustomKind::Compare) => {
            infos = infos
                .mag_filter(vk::Filter::LINEAR)
                .min_filter(vk::Filter::LINEAR)
                .compare_enable(true)
                .compare_op(vk::CompareOp::LESS_OR_EQUAL);
        }
        SamplerStateKind::Internal => {}
    }

    infos.build()
}

/// Owns a single vulkan sampler. The sampler is released on [`Sampler::free`] or when dropped.
pub struct Sampler<D: GpuDevice = Device> {
    sampler: vk::Sampler,
    ctx: ResourceHandle<D>,
}

impl<D: GpuDevice> Default for Sampler<D> {
    fn default() -> Self {
        Self {
            sampler: vk::Sampler::null(),
            ctx: ResourceHandle::default(),
        }
    }
}

impl<D: GpuDevice> Sampler<D> {
    pub fn new(ctx: &ResourceHandle<D>, state: &SamplerState, anisotropic_filter: u32) -> Result<Self, Error> {
        let mut sampler = Self::default();
        sampler.create(ctx, state, anisotropic_filter)?;
        Ok(sampler)
    }

    /// # Panics
    ///
    /// If `state` is an internal sampler state or if this sampler was already created.
    pub fn create(&mut self, ctx: &ResourceHandle<D>, state: &SamplerState, anisotropic_filter: u32) -> Result<(), Error> {
        assert_ne!(state.kind, SamplerStateKind::Internal, "Internal sampler states cannot be turned into samplers");
        assert!(self.sampler.is_null(), "Sampler `{}` is already created", state);

        let device = ctx.upgrade().ok_or(anyhow!("Cannot create sampler `{}` : device have been destroyed", state))?;
        let infos = sampler_create_info(state, anisotropic_filter, device.supports_anisotropic_sampling());
        let sampler = device.create_sampler(&infos)?;

        let name = state.to_string();
        device.attach_label(vk::ObjectType::SAMPLER, sampler.as_raw(), &name);
        debug!("Created sampler `{}` ({:?})", name, sampler);

        self.sampler = sampler;
        self.ctx = ctx.clone();
        Ok(())
    }

    /// Release the sampler. The native destruction is skipped if the device was already destroyed.
    pub fn free(&mut self) {
        if self.sampler.is_null() {
            return;
        }
        match self.ctx.upgrade() {
            Some(device) if device.is_context_valid() => device.destroy_sampler(self.sampler),
            _ => debug!("Device is gone : skipping destruction of sampler {:?}", self.sampler),
        }
        self.sampler = vk::Sampler::null();
        self.ctx = ResourceHandle::default();
    }

    pub fn is_valid(&self) -> bool {
        !self.sampler.is_null()
    }

    pub fn ptr(&self) -> Result<&vk::Sampler, Error> {
        if self.sampler.is_null() {
            return Err(anyhow!("Sampler is not valid"));
        }
        Ok(&self.sampler)
    }
}

impl<D: GpuDevice> Drop for Sampler<D> {
    fn drop(&mut self) {
        self.free();
    }
}
