use std::fmt::{Display, Formatter};
use bitflags::bitflags;

bitflags! {
    /// Filtering options of a [`SamplerStateKind::Parameters`] sampler. Flags combine freely.
    #[repr(transparent)]
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SamplerFiltering: u8 {
        const LINEAR      = 0b001;
        const MIPMAP      = 0b010;
        const ANISOTROPIC = 0b100;
    }
}

impl SamplerFiltering {
    /// Number of distinct flag combinations.
    pub const COMBINATIONS: u8 = 1 << 3;

    /// Every combination of filtering flags, from empty to all set.
    pub fn combinations() -> impl Iterator<Item=Self> {
        (0..Self::COMBINATIONS).map(Self::from_bits_truncate)
    }

    pub fn is_linear(&self) -> bool {
        self.contains(Self::LINEAR)
    }

    pub fn is_mipmap(&self) -> bool {
        self.contains(Self::MIPMAP)
    }

    pub fn is_anisotropic(&self) -> bool {
        self.contains(Self::ANISOTROPIC)
    }
}

/// How texture coordinates outside of [0, 1] are resolved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerExtendMode {
    /// Clamp to the edge texel.
    #[default]
    Extend,
    Repeat,
    MirroredRepeat,
    ClampToBorder,
}

impl SamplerExtendMode {
    pub const ALL: [Self; 4] = [Self::Extend, Self::Repeat, Self::MirroredRepeat, Self::ClampToBorder];

    fn name(&self) -> &'static str {
        match self {
            SamplerExtendMode::Extend => "extend",
            SamplerExtendMode::Repeat => "repeat",
            SamplerExtendMode::MirroredRepeat => "mirrored-repeat",
            SamplerExtendMode::ClampToBorder => "clamp-to-border",
        }
    }
}

/// Samplers whose configuration cannot be expressed with filtering flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerCustomKind {
    /// Depth comparison sampler used for shadow lookups.
    Compare,
    /// Linear sampler limited to the first mip level, used for icons.
    Icon,
}

impl SamplerCustomKind {
    pub const ALL: [Self; 2] = [Self::Compare, Self::Icon];
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerStateKind {
    /// Built from the filtering flags and extend modes.
    #[default]
    Parameters,
    Custom(SamplerCustomKind),
    /// Owned by the backend itself, never turned into a sampler object.
    Internal,
}

/// Declarative description of a texture sampler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerState {
    pub kind: SamplerStateKind,
    pub filtering: SamplerFiltering,
    pub extend_x: SamplerExtendMode,
    /// Applied to both the second and third axis.
    pub extend_yz: SamplerExtendMode,
}

impl SamplerState {
    pub fn default_sampler() -> Self {
        Self::default()
    }

    pub fn internal_sampler() -> Self {
        Self {
            kind: SamplerStateKind::Internal,
            ..Self::default()
        }
    }

    pub fn icon_sampler() -> Self {
        Self::custom_sampler(SamplerCustomKind::Icon)
    }

    pub fn compare_sampler() -> Self {
        Self::custom_sampler(SamplerCustomKind::Compare)
    }

    pub fn custom_sampler(custom_kind: SamplerCustomKind) -> Self {
        Self {
            kind: SamplerStateKind::Custom(custom_kind),
            ..Self::default()
        }
    }

    pub fn with_filtering(mut self, filtering: SamplerFiltering) -> Self {
        self.filtering = filtering;
        self
    }

    pub fn with_extend(mut self, extend_x: SamplerExtendMode, extend_yz: SamplerExtendMode) -> Self {
        self.extend_x = extend_x;
        self.extend_yz = extend_yz;
        self
    }

    pub fn enable_filtering_flag(&mut self, flag: SamplerFiltering) {
        self.filtering.insert(flag);
    }

    pub fn disable_filtering_flag(&mut self, flag: SamplerFiltering) {
        self.filtering.remove(flag);
    }

    pub fn set_filtering_flag_from_test(&mut self, flag: SamplerFiltering, test: bool) {
        self.filtering.set(flag, test);
    }
}

impl Display for SamplerState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SamplerStateKind::Internal => return f.write_str("internal"),
            SamplerStateKind::Custom(SamplerCustomKind::Compare) => return f.write_str("compare"),
            SamplerStateKind::Custom(SamplerCustomKind::Icon) => return f.write_str("icon"),
            SamplerStateKind::Parameters => {}
        }

        if self.filtering.is_linear() {
            f.write_str("linear-filter_")?;
        }
        if self.filtering.is_mipmap() {
            f.write_str("mipmap_")?;
        }
        if self.filtering.is_anisotropic() {
            f.write_str("anisotropic_")?;
        }
        write!(f, "{}-x_{}-y_{}-z_", self.extend_x.name(), self.extend_yz.name(), self.extend_yz.name())
    }
}
