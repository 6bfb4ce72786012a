//! Curated entry points for callers that only need the end-to-end operations.
//!
//! The submodules stay public for finer control (segments, crossings, path
//! command lists); this module gathers the few calls the CLI and demos use.

// Coordinate transformer
pub use crate::oblique::{normalize_lon, obliquify, obliquify_deg, relativize, relativize_deg};
// Edge corrector
pub use crate::edges::{lengthen_edges, trim_edges, EdgeCfg};
// Centroid estimator
pub use crate::centroid::{centroid, CentroidCfg};
// Path serializer
pub use crate::path::{
    escape_attr, format_coord, path_commands, CoordOrder, PathOpts, PathTag, Units,
};
// Pipeline and labels
pub use crate::label::line_break;
pub use crate::pipeline::{
    prepare, render_shapes, FieldFilter, FieldValue, PipelineCfg, PolarFix, RenderStats,
    ShapeRecord, Skip,
};

use crate::types::{Point, Shape};
use rand::Rng;

/// Label anchor for a whole `Shape` with default thresholds.
pub fn shape_centroid<R: Rng + ?Sized>(shape: &Shape, rng: &mut R) -> Option<Point> {
    centroid(&shape.points, &shape.parts, &CentroidCfg::default(), rng)
}

/// `d` attribute for a shape as an open (lon, lat) degree path.
pub fn shape_path_data(shape: &Shape) -> String {
    path_commands(&shape.points, &shape.part_starts(), PathOpts::default()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn shape_helpers_agree_with_modules() {
        let shape = Shape::new(
            vec![
                vector![0.0, 0.0],
                vector![4.0, 0.0],
                vector![4.0, 4.0],
                vector![0.0, 0.0],
                vector![8.0, 8.0],
                vector![9.0, 9.0],
            ],
            vec![0, 4],
        );
        assert_eq!(shape_path_data(&shape), "M0,0 L4,0 L4,4 ZM8,8 L9,9 ");
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(shape_centroid(&shape, &mut rng), Some(vector![4.5, 4.5]));
    }
}
