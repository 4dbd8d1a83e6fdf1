
#[derive(Clone)]
pub struct RenderingOptions {
    pub validation_layers: bool,
    /// User anisotropic filtering level. Values lower or equal to 1 disable anisotropy.
    pub anisotropic_filter: u32,
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self {
            validation_layers: false,
            anisotropic_filter: 2,
        }
    }
}

#[derive(Clone)]
pub struct Options {
    pub application_name: String,
    pub rendering: RenderingOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            application_name: "samplers".to_string(),
            rendering: RenderingOptions::default(),
        }
    }
}
