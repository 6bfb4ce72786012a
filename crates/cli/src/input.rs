//! Readers that turn input files into `ShapeRecord`s.
//!
//! - JSON: `[{"points": [[x, y], ...], "parts": [0, ...], "fields": {...}}, ...]`
//! - CSV: point table with columns `shape, part, x, y`; rows of one shape are
//!   contiguous, and a change of `part` starts a new sub-ring.

use anyhow::{bail, Context, Result};
use geopath::api::{FieldValue, ShapeRecord};
use geopath::Shape;
use nalgebra::Vector2;
use polars::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct JsonRecord {
    points: Vec<[f64; 2]>,
    #[serde(default)]
    parts: Vec<usize>,
    #[serde(default)]
    fields: serde_json::Map<String, Value>,
}

/// Load records, picking the reader by file extension.
pub fn load_records(path: &Path) -> Result<Vec<ShapeRecord>> {
    let records = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_csv(path)?,
        _ => load_json(path)?,
    };
    tracing::info!(path = %path.display(), records = records.len(), "input_loaded");
    Ok(records)
}

fn load_json(path: &Path) -> Result<Vec<ShapeRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let raw: Vec<JsonRecord> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| -> Result<ShapeRecord> {
            let points: Vec<_> = r.points.iter().map(|&[x, y]| Vector2::new(x, y)).collect();
            let shape = if points.is_empty() {
                Shape::new(points, r.parts)
            } else {
                Shape::try_new(points, r.parts).with_context(|| format!("record {i}"))?
            };
            let fields = r
                .fields
                .into_iter()
                .map(|(name, v)| (name, field_value(v)))
                .collect();
            Ok(ShapeRecord { shape, fields })
        })
        .collect()
}

fn field_value(v: Value) -> FieldValue {
    match v {
        Value::Null => FieldValue::Null,
        Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
        Value::String(s) => FieldValue::Text(s),
        other => FieldValue::Text(other.to_string()),
    }
}

fn load_csv(path: &Path) -> Result<Vec<ShapeRecord>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let shape_ids = df.column("shape")?.cast(&DataType::Int64)?;
    let part_ids = df.column("part")?.cast(&DataType::Int64)?;
    let xs = df.column("x")?.cast(&DataType::Float64)?;
    let ys = df.column("y")?.cast(&DataType::Float64)?;
    let (shape_ids, part_ids, xs, ys) = (shape_ids.i64()?, part_ids.i64()?, xs.f64()?, ys.f64()?);

    let mut records: Vec<ShapeRecord> = Vec::new();
    let mut current: Option<(i64, i64)> = None;
    for row in 0..df.height() {
        let (Some(s), Some(p), Some(x), Some(y)) =
            (shape_ids.get(row), part_ids.get(row), xs.get(row), ys.get(row))
        else {
            bail!("{}: row {row} has a missing value", path.display());
        };
        match current {
            Some((cs, cp)) if cs == s => {
                if cp != p {
                    if let Some(rec) = records.last_mut() {
                        let start = rec.shape.points.len();
                        rec.shape.parts.push(start);
                    }
                }
            }
            _ => {
                let rec = ShapeRecord::new(Shape::new(Vec::new(), vec![0]))
                    .with_field("shape", FieldValue::Number(s as f64));
                records.push(rec);
            }
        }
        current = Some((s, p));
        if let Some(rec) = records.last_mut() {
            rec.shape.points.push(Vector2::new(x, y));
        }
    }
    Ok(records)
}
