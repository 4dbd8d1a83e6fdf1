pub mod resource_handle;
pub mod sampler_state;
