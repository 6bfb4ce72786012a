//! Shape pipeline: filter records, correct Antarctic artifacts, emit `<path>` lines.
//!
//! Purpose
//! - Drive the geometry modules over a stream of records supplied by any
//!   reader (JSON, CSV, shapefile bindings) and write one tag per kept shape.
//!
//! Per record, in order
//! 1. Field filter (only when the record carries the filter field).
//! 2. Empty shapes are skipped.
//! 3. Rank filter: the last field whose name contains `rank`.
//! 4. Antarctic handling when the first point lies south of -60°.
//! 5. Optional oblique reprojection around a pole.
//! 6. Serialize as an open path, moves at part starts, (lon, lat) degrees.

use crate::edges::{lengthen_edges, trim_edges, EdgeCfg};
use crate::oblique::obliquify_deg;
use crate::path::{path_commands, CoordOrder, PathOpts, PathTag, Units};
use crate::types::Shape;
use std::io::{self, Write};

/// Latitude of the first point below which a shape is treated as Antarctic.
pub const ANTARCTIC_LAT: f64 = -60.0;

const ANTARCTIC_CLASS: &str = "antarctic";

/// Metadata value attached to a record.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Compare against a filter value given as text.
    pub fn matches(&self, wanted: &str) -> bool {
        match self {
            Self::Null => wanted.is_empty(),
            Self::Text(s) => s == wanted,
            Self::Number(n) => wanted.parse::<f64>().map_or(false, |w| w == *n),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Number(n) => Some(n.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

/// One shape plus its ordered metadata fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeRecord {
    pub shape: Shape,
    pub fields: Vec<(String, FieldValue)>,
}

impl ShapeRecord {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Rank taken from the last field whose name contains `rank`.
    pub fn rank(&self) -> Option<&FieldValue> {
        self.fields
            .iter()
            .rev()
            .find(|(n, _)| n.contains("rank"))
            .map(|(_, v)| v)
    }
}

/// Keep only records whose `field` matches one of `values`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub values: Vec<String>,
}

impl FieldFilter {
    /// Default value list is the empty string, as in unset text fields.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            values: vec![String::new()],
        }
    }

    /// `true` when the record passes; records without the field always pass.
    pub fn accepts(&self, record: &ShapeRecord) -> bool {
        match record.field(&self.field) {
            Some(v) => self.values.iter().any(|w| v.matches(w)),
            None => true,
        }
    }
}

/// Correction applied to Antarctic shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolarFix {
    #[default]
    None,
    Trim,
    Lengthen,
}

#[derive(Clone, Debug)]
pub struct PipelineCfg {
    pub max_rank: Option<f64>,
    pub class: Option<String>,
    pub polar: PolarFix,
    pub mark_antarctic: bool,
    pub filter: Option<FieldFilter>,
    /// Field whose text becomes the `id` attribute.
    pub id_field: Option<String>,
    /// Pole `(lat0, lon0)` in degrees for an oblique reprojection.
    pub pole: Option<(f64, f64)>,
    /// Leading tabs per emitted line.
    pub indent: usize,
    pub edges: EdgeCfg,
}

impl Default for PipelineCfg {
    fn default() -> Self {
        Self {
            max_rank: None,
            class: None,
            polar: PolarFix::None,
            mark_antarctic: false,
            filter: None,
            id_field: None,
            pole: None,
            indent: 3,
            edges: EdgeCfg::default(),
        }
    }
}

/// Why a record produced no output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    Filtered,
    Empty,
    OverRank,
}

/// A record that survived filtering, ready to serialize.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    pub shape: Shape,
    pub class: Option<String>,
    pub id: Option<String>,
    pub antarctic: bool,
}

impl Prepared {
    pub fn tag(&self, indent: usize) -> PathTag<'_> {
        let opts = PathOpts {
            order: CoordOrder::Xy,
            units: Units::Degrees,
            close: false,
        };
        PathTag {
            class: self.class.as_deref(),
            id: self.id.as_deref(),
            indent,
            data: path_commands(&self.shape.points, &self.shape.part_starts(), opts),
        }
    }
}

/// Counters for one `render_shapes` run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub seen: usize,
    pub rendered: usize,
    pub filtered: usize,
    pub empty: usize,
    pub over_rank: usize,
    pub antarctic: usize,
}

/// Filter and correct a single record.
pub fn prepare(record: ShapeRecord, cfg: &PipelineCfg) -> Result<Prepared, Skip> {
    if let Some(filter) = &cfg.filter {
        if !filter.accepts(&record) {
            return Err(Skip::Filtered);
        }
    }
    if record.shape.is_empty() {
        return Err(Skip::Empty);
    }
    if let (Some(max), Some(rank)) = (cfg.max_rank, record.rank().and_then(FieldValue::as_number))
    {
        if rank > max {
            return Err(Skip::OverRank);
        }
    }

    let id = cfg
        .id_field
        .as_deref()
        .and_then(|f| record.field(f))
        .and_then(FieldValue::as_text);
    let mut class = cfg.class.clone();
    let mut shape = record.shape;
    let antarctic = shape.points[0].y < ANTARCTIC_LAT;
    if antarctic {
        shape = match cfg.polar {
            PolarFix::None => shape,
            PolarFix::Trim => trim_edges(shape, &cfg.edges),
            PolarFix::Lengthen => lengthen_edges(shape, &cfg.edges),
        };
        if cfg.mark_antarctic {
            class = Some(mark_antarctic(class));
        }
    }
    if let Some(pole) = cfg.pole {
        for p in shape.points.iter_mut() {
            *p = obliquify_deg(*p, pole);
        }
    }
    Ok(Prepared {
        shape,
        class,
        id,
        antarctic,
    })
}

fn mark_antarctic(class: Option<String>) -> String {
    match class {
        None => ANTARCTIC_CLASS.to_string(),
        Some(c) if c.contains(ANTARCTIC_CLASS) => c,
        Some(c) => format!("{c} {ANTARCTIC_CLASS}"),
    }
}

/// Write one `<path>` line per accepted record.
pub fn render_shapes<I, W>(records: I, cfg: &PipelineCfg, out: &mut W) -> io::Result<RenderStats>
where
    I: IntoIterator<Item = ShapeRecord>,
    W: Write,
{
    let mut stats = RenderStats::default();
    for (index, record) in records.into_iter().enumerate() {
        stats.seen += 1;
        match prepare(record, cfg) {
            Ok(prepared) => {
                if prepared.antarctic {
                    stats.antarctic += 1;
                }
                writeln!(out, "{}", prepared.tag(cfg.indent))?;
                stats.rendered += 1;
            }
            Err(skip) => {
                tracing::debug!(index, reason = ?skip, "shape_skipped");
                match skip {
                    Skip::Filtered => stats.filtered += 1,
                    Skip::Empty => stats.empty += 1,
                    Skip::OverRank => stats.over_rank += 1,
                }
            }
        }
    }
    Ok(stats)
}
