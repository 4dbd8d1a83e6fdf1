pub mod core;
pub mod options;
