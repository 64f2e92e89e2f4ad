use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Free-region selection heuristics.
///
/// Every heuristic computes a primary score (lower is better); ties are then
/// broken by leftover area, leftover width, leftover height, lowest `y` and
/// finally lowest `x`, so the choice is always unique.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitHeuristic {
    /// Smallest leftover area (`rw * rh - w * h`).
    #[default]
    BestAreaFit,
    /// Smallest of the two leftover sides.
    BestShortSideFit,
    /// Smallest of the larger leftover side.
    BestLongSideFit,
    /// Lowest bottom edge of the placed slot.
    BottomLeft,
}

impl FromStr for FitHeuristic {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baf" | "bestareafit" | "best_area_fit" => Ok(Self::BestAreaFit),
            "bssf" | "bestshortsidefit" | "best_short_side_fit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" | "best_long_side_fit" => Ok(Self::BestLongSideFit),
            "bl" | "bottomleft" | "bottom_left" => Ok(Self::BottomLeft),
            other => Err(format!("unknown fit heuristic: {other}")),
        }
    }
}

/// Guillotine split applied to the free region consumed by a placement.
///
/// The slot always sits at the region's top-left corner. The right remainder
/// and the bottom remainder never overlap; the rule only decides which of the
/// two spans the corner next to the slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// Right `{rx+w, ry, rw-w, h}`, bottom `{rx, ry+h, rw, rh-h}`.
    #[default]
    BottomFullWidth,
    /// Right `{rx+w, ry, rw-w, rh}`, bottom `{rx, ry+h, w, rh-h}`.
    RightFullHeight,
    /// Full-width bottom when the bottom leftover is shorter than the right
    /// leftover, full-height right otherwise.
    ShorterLeftoverAxis,
}

impl FromStr for SplitRule {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bottom" | "bottomfullwidth" | "bottom_full_width" => Ok(Self::BottomFullWidth),
            "right" | "rightfullheight" | "right_full_height" => Ok(Self::RightFullHeight),
            "slas" | "shorterleftoveraxis" | "shorter_leftover_axis" => {
                Ok(Self::ShorterLeftoverAxis)
            }
            other => Err(format!("unknown split rule: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackerConfig {
    /// Side of a freshly opened page in pixels.
    pub default_page_size: u32,
    /// Upper bound for any page side; padded requests larger than this are rejected.
    pub max_page_size: u32,
    /// Round page sides up to the next power of two.
    pub page_size_is_power_of_two: bool,
    /// Padding applied on all four sides of requests that carry no padding of their own.
    pub default_padding: u32,
    /// Free-region selection heuristic.
    pub heuristic: FitHeuristic,
    /// Guillotine split rule.
    pub split: SplitRule,
    /// Run independent atlases of `pack_many` on the rayon pool (feature "parallel").
    pub parallel: bool,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            default_page_size: 256,
            max_page_size: 4096,
            page_size_is_power_of_two: true,
            default_padding: 0,
            heuristic: FitHeuristic::default(),
            split: SplitRule::default(),
            parallel: false,
        }
    }
}

impl PackerConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if either page size is zero or the default page size
    /// exceeds the maximum.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.default_page_size == 0 {
            return Err(AtlasError::InvalidConfiguration(
                "default_page_size must be positive".into(),
            ));
        }
        if self.max_page_size == 0 {
            return Err(AtlasError::InvalidConfiguration(
                "max_page_size must be positive".into(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(AtlasError::InvalidConfiguration(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }

    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn default_page_size(mut self, v: u32) -> Self {
        self.cfg.default_page_size = v;
        self
    }
    pub fn max_page_size(mut self, v: u32) -> Self {
        self.cfg.max_page_size = v;
        self
    }
    pub fn pow2(mut self, v: bool) -> Self {
        self.cfg.page_size_is_power_of_two = v;
        self
    }
    pub fn default_padding(mut self, v: u32) -> Self {
        self.cfg.default_padding = v;
        self
    }
    pub fn heuristic(mut self, v: FitHeuristic) -> Self {
        self.cfg.heuristic = v;
        self
    }
    pub fn split(mut self, v: SplitRule) -> Self {
        self.cfg.split = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}
