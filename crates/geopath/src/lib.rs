//! Geographic shapes to SVG path markup.
//!
//! Modules
//! - `oblique`: rotation between a relative frame and absolute (lat, lon).
//! - `edges`: trim/lengthen heuristics for plate carrée frame artifacts.
//! - `centroid`: label anchor for spherical polygons (box, largest part, Monte Carlo).
//! - `path`: `M`/`L`/`Z` command model and `<path>` rendering.
//! - `pipeline`: record filtering and per-shape orchestration.
//! - `label`: two-line label breaking.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`; unit and component order are tracked
//!   by the caller (see `path::{CoordOrder, Units}`).
//! - Geometry functions never fail; degenerate input yields degenerate output.
//!   `Shape::try_new` is the opt-in validating constructor.

pub mod api;
pub mod centroid;
pub mod edges;
pub mod label;
pub mod oblique;
pub mod path;
pub mod pipeline;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use types::{Bounds, Point, Shape, ShapeError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::centroid::{centroid, CentroidCfg};
    pub use crate::edges::{lengthen_edges, trim_edges, EdgeCfg};
    pub use crate::oblique::{obliquify, obliquify_deg, relativize, relativize_deg};
    pub use crate::path::{
        path_commands, CoordOrder, PathCommand, PathData, PathOpts, PathTag, Units,
    };
    pub use crate::pipeline::{render_shapes, FieldValue, PipelineCfg, PolarFix, ShapeRecord};
    pub use crate::types::{Bounds, Point, Shape, ShapeError};
    pub use nalgebra::Vector2 as Vec2;
}
