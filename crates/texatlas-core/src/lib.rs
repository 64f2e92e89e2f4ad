//! Deterministic rectangle packing for glyph and image atlases.
//!
//! - Free-space tracking per page with guillotine splits and containment pruning
//! - Region choice: Best Area Fit by default (plus BSSF/BLSF/BL), fully tie-broken
//! - Multi-page overflow: earlier pages are reused before a new page is opened
//! - Geometry only: no pixels, no file formats
//!
//! Quick example:
//! ```
//! use texatlas_core::{pack, PackerConfig, RectRequest};
//! # fn main() -> texatlas_core::Result<()> {
//! let cfg = PackerConfig::builder().default_page_size(64).build();
//! let requests = vec![
//!     RectRequest::new("a".to_string(), 16, 16),
//!     RectRequest::new("b".to_string(), 24, 8),
//! ];
//! let out = pack(requests, &cfg)?;
//! assert_eq!(out.pages.len(), 1);
//! assert_eq!(out.placements.len(), 2);
//! # Ok(()) }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod packer;
pub mod pipeline;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `texatlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::builder::{AtlasBuilder, AtlasEntry, AtlasKey, AtlasLayout};
    pub use crate::config::{FitHeuristic, PackerConfig, PackerConfigBuilder, SplitRule};
    pub use crate::error::{AtlasError, Result};
    pub use crate::model::{
        PackOutput, PackStats, PageGeometry, Placement, Rect, RectRequest,
    };
    pub use crate::pipeline::{PackSession, pack, pack_many};
}
