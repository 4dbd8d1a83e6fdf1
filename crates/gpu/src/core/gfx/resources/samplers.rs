use std::collections::HashMap;
use anyhow::{anyhow, Error};
use tracing::info;
use types::resource_handle::ResourceHandle;
use types::sampler_state::{SamplerCustomKind, SamplerExtendMode, SamplerFiltering, SamplerState, SamplerStateKind};
use crate::core::gfx::device::{Device, GpuDevice};
use crate::core::gfx::resources::sampler::Sampler;

/// Every sampler a renderer can ask for, created up front.
pub struct SamplerCache<D: GpuDevice = Device> {
    samplers: HashMap<SamplerState, Sampler<D>>,
    anisotropic_filter: u32,
}

impl<D: GpuDevice> SamplerCache<D> {
    pub fn new(ctx: &ResourceHandle<D>, anisotropic_filter: u32) -> Result<Self, Error> {
        Ok(Self {
            samplers: Self::build(ctx, anisotropic_filter)?,
            anisotropic_filter,
        })
    }

    /// All the states the cache holds a sampler for : every parameter combination then every custom sampler.
    pub fn states() -> impl Iterator<Item=SamplerState> {
        let parameters = SamplerExtendMode::ALL.into_iter().flat_map(|extend_yz| {
            SamplerExtendMode::ALL.into_iter().flat_map(move |extend_x| {
                SamplerFiltering::combinations().map(move |filtering| {
                    SamplerState::default_sampler()
                        .with_filtering(filtering)
                        .with_extend(extend_x, extend_yz)
                })
            })
        });
        parameters.chain(SamplerCustomKind::ALL.into_iter().map(SamplerState::custom_sampler))
    }

    /// Creates a sampler for every state. Nothing is kept if one of them fails.
    fn build(ctx: &ResourceHandle<D>, anisotropic_filter: u32) -> Result<HashMap<SamplerState, Sampler<D>>, Error> {
        let mut samplers = HashMap::new();
        for state in Self::states() {
            samplers.insert(state, Sampler::new(ctx, &state, anisotropic_filter)?);
        }
        info!("Created {} samplers (anisotropic filter : {})", samplers.len(), anisotropic_filter);
        Ok(samplers)
    }

    fn is_complete(&self) -> bool {
        self.samplers.len() == Self::states().count()
    }

    // Filtering and extend modes are meaningless for custom samplers.
    fn key(state: &SamplerState) -> SamplerState {
        match state.kind {
            SamplerStateKind::Custom(custom_kind) => SamplerState::custom_sampler(custom_kind),
            _ => *state,
        }
    }

    /// # Panics
    ///
    /// If `state` is an internal sampler state.
    pub fn get(&self, state: &SamplerState) -> Result<&Sampler<D>, Error> {
        assert_ne!(state.kind, SamplerStateKind::Internal, "Internal sampler states have no cached sampler");
        self.samplers.get(&Self::key(state)).ok_or(anyhow!("Sampler `{}` is not available", state))
    }

    pub fn anisotropic_filter(&self) -> u32 {
        self.anisotropic_filter
    }

    /// Recreate every sampler if the user anisotropic filtering level changed.
    ///
    /// On failure the previous samplers and level are kept.
    pub fn update_anisotropy(&mut self, ctx: &ResourceHandle<D>, anisotropic_filter: u32) -> Result<(), Error> {
        if anisotropic_filter == self.anisotropic_filter && self.is_complete() {
            return Ok(());
        }
        let samplers = Self::build(ctx, anisotropic_filter)?;
        self.free();
        self.samplers = samplers;
        self.anisotropic_filter = anisotropic_filter;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samplers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samplers.is_empty()
    }

    /// Release every sampler. Dropping the cache does the same.
    pub fn free(&mut self) {
        for sampler in self.samplers.values_mut() {
            sampler.free();
        }
        self.samplers.clear();
    }
}
