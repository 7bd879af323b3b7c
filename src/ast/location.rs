//! Source coordinates and the interval test used by location queries.
//!
//! A [`Point`] without a column is a "whole line" wildcard: it compares equal
//! to every point on the same line. That makes [`compare_points`] a query
//! relation rather than a total order, which is exactly what the location
//! query needs and nothing else should rely on.

use crate::errors::InputError;
use serde::Deserialize;
use std::cmp::Ordering;

/// A `(line, column?)` source coordinate. Lines are 1-based, columns 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Point {
    pub line: usize,
    #[serde(default)]
    pub column: Option<usize>,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }

    /// A point standing for every column of `line`.
    pub fn whole_line(line: usize) -> Self {
        Self { line, column: None }
    }
}

/// A `{start, end}` range. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Degenerate range covering a single point.
    pub fn point(point: Point) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Range covering every column of lines `first..=last`.
    pub fn lines(first: usize, last: usize) -> Self {
        Self {
            start: Point::whole_line(first),
            end: Point::whole_line(last),
        }
    }

    /// Whether `point` lies in `[start, end]` under [`compare_points`].
    pub fn contains(&self, point: &Point) -> bool {
        compare_points(point, &self.start) != Ordering::Less
            && compare_points(point, &self.end) != Ordering::Greater
    }
}

/// A caller supplied location: a single point or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Point(Point),
    Range(Span),
}

impl Location {
    /// Normalize to a range; a single point becomes a degenerate range.
    pub fn to_span(&self) -> Span {
        match self {
            Location::Point(point) => Span::point(*point),
            Location::Range(span) => *span,
        }
    }

    /// Decode one location object.
    ///
    /// Accepts `{line, column?}` or `{start: {line, column?}, end: {line, column?}}`.
    /// A `null` or missing column means the whole line.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, InputError> {
        let object = value.as_object().ok_or_else(|| InputError::MalformedLocation {
            message: format!("expected an object, found `{value}`"),
        })?;

        let location = if object.contains_key("start") || object.contains_key("end") {
            let span: Span = serde_json::from_value(value.clone()).map_err(|e| {
                InputError::MalformedLocation {
                    message: format!("invalid range `{value}`: {e}"),
                }
            })?;
            Location::Range(span)
        } else {
            let point: Point = serde_json::from_value(value.clone()).map_err(|e| {
                InputError::MalformedLocation {
                    message: format!("invalid point `{value}`: {e}"),
                }
            })?;
            Location::Point(point)
        };

        location.validate()?;
        Ok(location)
    }

    fn validate(&self) -> Result<(), InputError> {
        let span = self.to_span();
        for point in [span.start, span.end] {
            if point.line == 0 {
                return Err(InputError::MalformedLocation {
                    message: "line numbers start at 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Parse a JSON array of location objects.
pub fn parse_locations(input: &str) -> Result<Vec<Location>, InputError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| InputError::MalformedLocation {
            message: e.to_string(),
        })?;
    let items = value.as_array().ok_or(InputError::LocationsNotArray)?;
    items.iter().map(Location::from_json).collect()
}

/// Line-major comparison; a missing column on either side matches any column.
pub fn compare_points(a: &Point, b: &Point) -> Ordering {
    match a.line.cmp(&b.line) {
        Ordering::Equal => match (a.column, b.column) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        },
        other => other,
    }
}

/// Two ranges intersect iff either one starts inside the other.
pub fn ranges_intersect(a: &Span, b: &Span) -> bool {
    b.contains(&a.start) || a.contains(&b.start)
}
