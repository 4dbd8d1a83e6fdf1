pub mod sampler;
pub mod samplers;

#[cfg(test)]
pub(crate) mod mock;
