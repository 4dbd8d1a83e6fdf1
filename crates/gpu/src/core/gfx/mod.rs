pub mod instance;
pub mod physical_device;
pub mod device;
pub mod resources;
