use anyhow::Error;
use tracing::info;
use vulkanalia::vk::Handle;
use gpu::core::gfx::device::Device;
use gpu::core::gfx::instance::Instance;
use gpu::core::gfx::resources::samplers::SamplerCache;
use gpu::options::{Options, RenderingOptions};
use types::sampler_state::{SamplerExtendMode, SamplerFiltering, SamplerState};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().init();
    let options = Options {
        rendering: RenderingOptions {
            validation_layers: true,
            anisotropic_filter: 16,
        },
        ..Default::default()
    };

    let instance = Instance::new(&options)?;
    let device = Device::new(instance.handle())?;
    let mut samplers = SamplerCache::new(&device.handle(), options.rendering.anisotropic_filter)?;

    let states = [
        SamplerState::default_sampler(),
        SamplerState::default_sampler()
            .with_filtering(SamplerFiltering::all())
            .with_extend(SamplerExtendMode::Repeat, SamplerExtendMode::Repeat),
        SamplerState::icon_sampler(),
        SamplerState::compare_sampler(),
    ];
    for state in &states {
        info!("Sampler `{}` : {:#x}", state, samplers.get(state)?.ptr()?.as_raw());
    }

    samplers.update_anisotropy(&device.handle(), 1)?;

    device.wait_idle()?;
    samplers.free();
    drop(device);
    drop(instance);
    Ok(())
}
