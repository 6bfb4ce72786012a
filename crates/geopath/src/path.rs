//! SVG path serializer.
//!
//! Purpose
//! - Turn an ordered point sequence with designated move indices into the
//!   compact `d` grammar `M x,y `, `L x,y `, `Z`, and wrap it in a `<path>` tag.
//!
//! Rules
//! - A point equal to its input predecessor is skipped (move indices excepted).
//! - A non-move point equal to the latest Move point closes with `Z` instead of
//!   repeating coordinates.
//! - Numbers print with three decimals; a redundant `.000` is dropped.
//! - Empty input gives an empty `d`.
//! - `class` and `id` are attribute-escaped.

use crate::types::Point;
use nalgebra::Vector2;
use std::borrow::Cow;
use std::fmt;

/// Component order of the input pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordOrder {
    /// `(x, y)`, e.g. (lon, lat).
    #[default]
    Xy,
    /// `(y, x)`, e.g. (lat, lon).
    Yx,
}

/// Angular unit of the input pairs; output is always degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Degrees,
    Radians,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PathOpts {
    pub order: CoordOrder,
    pub units: Units,
    /// Append a terminal `Z`.
    pub close: bool,
}

/// One drawing command; points are already in output (x, y) degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    Move(Point),
    Line(Point),
    Close,
}

/// Ordered command list (the `d` attribute).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData(pub Vec<PathCommand>);

impl PathData {
    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the command list for `points`, starting subpaths at `moves`.
pub fn path_commands(points: &[Point], moves: &[usize], opts: PathOpts) -> PathData {
    let mut out = Vec::with_capacity(points.len() + 1);
    let mut last_move: Option<Point> = None;
    for (i, &p) in points.iter().enumerate() {
        let is_move = moves.contains(&i);
        if !is_move {
            if i > 0 && points[i - 1] == p {
                continue;
            }
            if last_move == Some(p) {
                out.push(PathCommand::Close);
                continue;
            }
        }
        let q = to_output(p, opts);
        if is_move {
            last_move = Some(p);
            out.push(PathCommand::Move(q));
        } else {
            out.push(PathCommand::Line(q));
        }
    }
    if opts.close && !matches!(out.last(), None | Some(PathCommand::Close)) {
        out.push(PathCommand::Close);
    }
    PathData(out)
}

fn to_output(p: Point, opts: PathOpts) -> Point {
    let p = match opts.units {
        Units::Degrees => p,
        Units::Radians => p.map(f64::to_degrees),
    };
    match opts.order {
        CoordOrder::Xy => p,
        CoordOrder::Yx => Vector2::new(p.y, p.x),
    }
}

/// Fixed three decimals with `.000` trimmed.
pub fn format_coord(v: f64) -> String {
    format!("{v:.3}").replace(".000", "")
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(p) => write!(f, "M{},{} ", format_coord(p.x), format_coord(p.y)),
            Self::Line(p) => write!(f, "L{},{} ", format_coord(p.x), format_coord(p.y)),
            Self::Close => f.write_str("Z"),
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// A `<path>` element, indented by tabs.
#[derive(Clone, Debug, Default)]
pub struct PathTag<'a> {
    pub class: Option<&'a str>,
    pub id: Option<&'a str>,
    pub indent: usize,
    pub data: PathData,
}

impl fmt::Display for PathTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.indent {
            f.write_str("\t")?;
        }
        f.write_str("<path ")?;
        if let Some(class) = self.class {
            write!(f, "class=\"{}\" ", escape_attr(class))?;
        }
        if let Some(id) = self.id {
            write!(f, "id=\"{}\" ", escape_attr(id))?;
        }
        write!(f, "d=\"{}\" />", self.data)
    }
}

/// Escape text for a double-quoted XML attribute.
pub fn escape_attr(text: &str) -> Cow<'_, str> {
    if !text.contains(|c| matches!(c, '&' | '<' | '>' | '"')) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;
    use std::f64::consts::PI;

    fn square() -> Vec<Point> {
        vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 0.0],
        ]
    }

    #[test]
    fn closed_ring_revisits_move_as_z() {
        let opts = PathOpts {
            close: true,
            ..PathOpts::default()
        };
        let data = path_commands(&square(), &[0], opts);
        assert_eq!(data.to_string(), "M0,0 L1,0 L1,1 Z");
        let tag = PathTag {
            data,
            ..PathTag::default()
        };
        assert_eq!(tag.to_string(), "<path d=\"M0,0 L1,0 L1,1 Z\" />");
    }

    #[test]
    fn open_line_ends_without_close() {
        let pts = vec![vector![0.0, 0.0], vector![2.5, -1.25], vector![3.0, 4.0]];
        let data = path_commands(&pts, &[0], PathOpts::default());
        assert_eq!(data.to_string(), "M0,0 L2.500,-1.250 L3,4 ");
        let closed = path_commands(
            &pts,
            &[0],
            PathOpts {
                close: true,
                ..PathOpts::default()
            },
        );
        assert_eq!(closed.to_string(), "M0,0 L2.500,-1.250 L3,4 Z");
    }

    #[test]
    fn consecutive_duplicates_collapse() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 0.0],
            vector![1.0, 2.0],
        ];
        let data = path_commands(&pts, &[0], PathOpts::default());
        assert_eq!(data.commands().len(), 3);
        assert_eq!(data.to_string(), "M0,0 L1,0 L1,2 ");
    }

    #[test]
    fn every_part_start_moves() {
        let pts = vec![
            vector![0.0, 0.0],
            vector![1.0, 1.0],
            vector![0.0, 0.0],
            vector![5.0, 5.0],
            vector![6.0, 5.0],
            vector![5.0, 5.0],
        ];
        let data = path_commands(&pts, &[0, 3], PathOpts::default());
        assert_eq!(data.to_string(), "M0,0 L1,1 ZM5,5 L6,5 Z");
        let moves = data
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::Move(_)))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn radians_lat_lon_are_converted_and_swapped() {
        let pts = vec![vector![PI / 4.0, -PI / 2.0], vector![0.0, PI]];
        let opts = PathOpts {
            order: CoordOrder::Yx,
            units: Units::Radians,
            close: false,
        };
        let data = path_commands(&pts, &[0], opts);
        assert_eq!(data.to_string(), "M-90,45 L180,0 ");
    }

    #[test]
    fn tag_with_class_id_and_indent() {
        let tag = PathTag {
            class: Some("land antarctic"),
            id: Some("aq"),
            indent: 2,
            data: path_commands(&square()[..3], &[0], PathOpts::default()),
        };
        assert_eq!(
            tag.to_string(),
            "\t\t<path class=\"land antarctic\" id=\"aq\" d=\"M0,0 L1,0 L1,1 \" />"
        );
    }

    #[test]
    fn repeated_point_at_move_index_still_moves() {
        let pts = vec![vector![0.0, 0.0], vector![1.0, 1.0], vector![1.0, 1.0]];
        let data = path_commands(&pts, &[0, 2], PathOpts::default());
        assert_eq!(data.to_string(), "M0,0 L1,1 M1,1 ");
    }

    #[test]
    fn tag_attributes_are_escaped() {
        let tag = PathTag {
            class: Some("a&b"),
            id: Some("Côte \"d'Ivoire\" <x>"),
            indent: 0,
            data: PathData::default(),
        };
        assert_eq!(
            tag.to_string(),
            "<path class=\"a&amp;b\" id=\"Côte &quot;d'Ivoire&quot; &lt;x&gt;\" d=\"\" />"
        );
        assert!(matches!(escape_attr("land"), Cow::Borrowed("land")));
    }

    #[test]
    fn empty_input_gives_empty_d() {
        let opts = PathOpts {
            close: true,
            ..PathOpts::default()
        };
        let tag = PathTag {
            data: path_commands(&[], &[0], opts),
            ..PathTag::default()
        };
        assert_eq!(tag.to_string(), "<path d=\"\" />");
    }

    #[test]
    fn coordinate_formatting() {
        assert_eq!(format_coord(12.0), "12");
        assert_eq!(format_coord(-0.5), "-0.500");
        assert_eq!(format_coord(1.23456), "1.235");
        assert_eq!(format_coord(-0.0001), "-0");
    }
}
