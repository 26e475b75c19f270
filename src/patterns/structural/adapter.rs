//! Adapter: wrap an existing type so it conforms to the interface a caller
//! requires. Here a vector image (lines) is adapted to the raster interface
//! (points) the drawing routine accepts.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Index, IndexMut};

use itertools::Itertools;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::console;
use crate::error::Result;

/// Largest grid `draw` will allocate.
pub const MAX_DRAW_CELLS: u64 = 1 << 20;
/// Longest line the adapter will turn into points.
pub const MAX_LINE_POINTS: u64 = 1 << 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster spans {width}x{height} cells, more than the {limit} that can be drawn")]
    TooLarge { width: u64, height: u64, limit: u64 },
    #[error("line {line:?} covers {points} points, more than the {limit} that can be adapted")]
    LineTooLong { line: Line, points: u64, limit: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Interface we have
// =============================================================================

pub trait Raster {
    fn points(&self) -> &[Point];
}

#[derive(Debug, Default, Clone)]
pub struct RasterImage {
    points: Vec<Point>,
}

impl RasterImage {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl Raster for RasterImage {
    fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Renders `.` for every point, highest row first. The grid always
/// includes the origin and may hold at most [`MAX_DRAW_CELLS`] cells.
pub fn draw(image: &dyn Raster) -> std::result::Result<String, RasterError> {
    let points = image.points();
    if points.is_empty() {
        return Ok(String::new());
    }

    let min_x = i64::from(points.iter().map(|p| p.x).min().unwrap_or(0).min(0));
    let max_x = i64::from(points.iter().map(|p| p.x).max().unwrap_or(0).max(0));
    let min_y = i64::from(points.iter().map(|p| p.y).min().unwrap_or(0).min(0));
    let max_y = i64::from(points.iter().map(|p| p.y).max().unwrap_or(0).max(0));

    let width = (max_x - min_x + 1).unsigned_abs();
    let height = (max_y - min_y + 1).unsigned_abs();
    if width.saturating_mul(height) > MAX_DRAW_CELLS {
        return Err(RasterError::TooLarge {
            width,
            height,
            limit: MAX_DRAW_CELLS,
        });
    }

    let (width, height) = (width as usize, height as usize);
    let mut grid = vec![vec![' '; width]; height];
    for p in points {
        let row = (i64::from(p.y) - min_y) as usize;
        let col = (i64::from(p.x) - min_x) as usize;
        grid[row][col] = '.';
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid.iter().rev() {
        out.extend(row.iter());
        out.push('\n');
    }
    Ok(out)
}

// =============================================================================
// Interface given
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Line {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Line {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

#[derive(Debug, Default, Clone)]
pub struct VectorImage {
    pub lines: Vec<Line>,
}

impl VectorImage {
    /// Outline of a `width` x `height` rectangle anchored at the origin.
    pub fn rectangle(width: i32, height: i32) -> Self {
        let (w, h) = (width - 1, height - 1);
        Self {
            lines: vec![
                Line::new(0, 0, w, 0),
                Line::new(0, 0, 0, h),
                Line::new(0, h, w, h),
                Line::new(w, 0, w, h),
            ],
        }
    }

    /// Diagonal from the origin to `(length, length)`.
    pub fn line(length: i32) -> Self {
        Self {
            lines: vec![Line::new(0, 0, length, length)],
        }
    }
}

/// Lazy Bresenham walk from `(x1, y1)` to `(x2, y2)`, endpoints included.
///
/// Error terms are kept in `i64`, so any pair of `i32` endpoints works.
#[derive(Debug, Clone)]
pub struct LinePoints {
    next: Option<Point>,
    end: Point,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    remaining: u64,
}

impl LinePoints {
    /// Points not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let point = self.next.take()?;
        self.remaining -= 1;
        if point == self.end {
            return Some(point);
        }

        let (mut x, mut y) = (point.x, point.y);
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            y += self.sy;
        }
        self.next = Some(Point { x, y });
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

pub fn rasterize(line: &Line) -> LinePoints {
    let dx = (i64::from(line.x2) - i64::from(line.x1)).abs();
    let dy = -(i64::from(line.y2) - i64::from(line.y1)).abs();
    LinePoints {
        next: Some(Point::new(line.x1, line.y1)),
        end: Point::new(line.x2, line.y2),
        dx,
        dy,
        sx: if line.x1 < line.x2 { 1 } else { -1 },
        sy: if line.y1 < line.y2 { 1 } else { -1 },
        err: dx + dy,
        remaining: dx.max(-dy).unsigned_abs() + 1,
    }
}

// =============================================================================
// Cache
// =============================================================================

pub type LineKey = [u8; 32];

pub trait LineCache {
    fn key(&self, line: &Line) -> Result<LineKey>;
    fn retrieve(&self, key: &LineKey) -> Option<&[Point]>;
    fn store(&mut self, key: LineKey, points: Vec<Point>);
}

/// Unbounded; entries live as long as the cache.
#[derive(Debug, Default)]
pub struct LinesCache {
    entries: HashMap<LineKey, Vec<Point>>,
}

impl LinesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LineCache for LinesCache {
    fn key(&self, line: &Line) -> Result<LineKey> {
        let encoded = serde_json::to_vec(line)?;
        Ok(Sha256::digest(&encoded).into())
    }

    fn retrieve(&self, key: &LineKey) -> Option<&[Point]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn store(&mut self, key: LineKey, points: Vec<Point>) {
        self.entries.insert(key, points);
    }
}

// =============================================================================
// Adapter
// =============================================================================

#[derive(Debug, Default)]
pub struct VectorToRasterAdapter {
    points: Vec<Point>,
}

impl VectorToRasterAdapter {
    pub fn new(image: &VectorImage, cache: &mut dyn LineCache) -> Result<Self> {
        let mut adapter = Self::default();
        for line in &image.lines {
            adapter.add_line(line, cache)?;
        }
        Ok(adapter)
    }

    fn add_line(&mut self, line: &Line, cache: &mut dyn LineCache) -> Result<()> {
        let key = cache.key(line)?;
        if let Some(points) = cache.retrieve(&key) {
            log::debug!("got points from cache for {line:?}");
            self.points.extend_from_slice(points);
            return Ok(());
        }

        let walk = rasterize(line);
        if walk.remaining() > MAX_LINE_POINTS {
            return Err(RasterError::LineTooLong {
                line: *line,
                points: walk.remaining(),
                limit: MAX_LINE_POINTS,
            }
            .into());
        }

        log::debug!("converting {line:?} to points");
        let points: Vec<Point> = walk.collect();
        self.points.extend_from_slice(&points);
        cache.store(key, points);
        Ok(())
    }
}

impl Raster for VectorToRasterAdapter {
    fn points(&self) -> &[Point] {
        &self.points
    }
}

// =============================================================================
// Generic value adapter
// =============================================================================

/// Fixed-size vector; dimension is part of the type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<T, const D: usize>([T; D]);

pub type Vector2i = Vector<i32, 2>;
pub type Vector3f = Vector<f32, 3>;

impl<T, const D: usize> Vector<T, D> {
    pub fn new(values: [T; D]) -> Self {
        Self(values)
    }
}

impl<T: Default + Copy, const D: usize> Default for Vector<T, D> {
    fn default() -> Self {
        Self([T::default(); D])
    }
}

impl<T, const D: usize> Index<usize> for Vector<T, D> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.0[index]
    }
}

impl<T, const D: usize> IndexMut<usize> for Vector<T, D> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.0[index]
    }
}

impl<T: Add<Output = T> + Copy, const D: usize> Add for Vector<T, D> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<T: fmt::Display, const D: usize> fmt::Display for Vector<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

pub fn run() -> Result<()> {
    console::demo("Adapter");

    let raster = RasterImage::new(vec![
        Point::new(2, 1),
        Point::new(7, 1),
        Point::new(4, 2),
        Point::new(5, 2),
        Point::new(4, 3),
        Point::new(5, 3),
    ]);
    print!("{}", draw(&raster)?);

    let rectangle = VectorImage::rectangle(6, 4);
    let mut cache = LinesCache::new();
    let adapted = VectorToRasterAdapter::new(&rectangle, &mut cache)?;
    // Same lines again: served from the cache.
    let _again = VectorToRasterAdapter::new(&rectangle, &mut cache)?;
    print!("{}", draw(&adapted)?);
    println!("Cached lines: {}", cache.len());

    let diagonal = VectorToRasterAdapter::new(&VectorImage::line(3), &mut cache)?;
    print!("{}", draw(&diagonal)?);

    let mut v = Vector2i::default();
    v[0] = 1;
    let w = Vector2i::new([2, 2]);
    println!("{v} + {w} = {}", v + w);
    let f = Vector3f::new([1.1, 2.2, 3.3]);
    println!("{f} + {f} = {}", f + f);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    fn collect(line: Line) -> Vec<Point> {
        rasterize(&line).collect()
    }

    #[test]
    fn test_draw_raster_image() {
        let image = RasterImage::new(vec![Point::new(0, 0), Point::new(2, 1)]);
        assert_eq!(draw(&image).unwrap(), "  .\n.  \n");
        assert_eq!(draw(&RasterImage::default()).unwrap(), "");
    }

    #[test]
    fn test_draw_rejects_huge_extents() {
        let far = RasterImage::new(vec![Point::new(i32::MAX, 0)]);
        assert_eq!(
            draw(&far),
            Err(RasterError::TooLarge {
                width: 1 << 31,
                height: 1,
                limit: MAX_DRAW_CELLS,
            })
        );

        let corners = RasterImage::new(vec![Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX)]);
        assert!(matches!(draw(&corners), Err(RasterError::TooLarge { .. })));
    }

    #[test]
    fn test_rasterize_lines() {
        let horizontal = collect(Line::new(0, 0, 3, 0));
        assert_eq!(horizontal.len(), 4);
        assert!(horizontal.iter().all(|p| p.y == 0));

        let diagonal = collect(Line::new(0, 0, 2, 2));
        assert_eq!(diagonal, [Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]);

        let reversed = collect(Line::new(2, 0, 0, 0));
        assert_eq!(reversed.last(), Some(&Point::new(0, 0)));

        assert_eq!(collect(Line::new(1, 1, 1, 1)), [Point::new(1, 1)]);
    }

    #[test]
    fn test_rasterize_point_count_matches_length() {
        for line in [Line::new(0, 0, 7, 3), Line::new(5, -4, -2, 9), Line::new(-3, 2, -3, -6)] {
            let walk = rasterize(&line);
            let expected = walk.remaining();
            let points: Vec<Point> = walk.collect();
            assert_eq!(points.len() as u64, expected);
            assert_eq!(points.last(), Some(&Point::new(line.x2, line.y2)));
        }
    }

    #[test]
    fn test_rasterize_extreme_coordinates() {
        let mut wide = rasterize(&Line::new(-2_000_000_000, 0, 2_000_000_000, 0));
        assert_eq!(wide.remaining(), 4_000_000_001);
        assert_eq!(wide.next(), Some(Point::new(-2_000_000_000, 0)));
        assert_eq!(wide.next(), Some(Point::new(-1_999_999_999, 0)));

        let mut corner = rasterize(&Line::new(i32::MAX, i32::MIN, i32::MIN, i32::MAX));
        assert_eq!(corner.next(), Some(Point::new(i32::MAX, i32::MIN)));
        assert_eq!(corner.next(), Some(Point::new(i32::MAX - 1, i32::MIN + 1)));

        let tail = collect(Line::new(i32::MAX - 2, i32::MIN + 1, i32::MAX, i32::MIN));
        assert_eq!(tail.first(), Some(&Point::new(i32::MAX - 2, i32::MIN + 1)));
        assert_eq!(tail.last(), Some(&Point::new(i32::MAX, i32::MIN)));
    }

    #[test]
    fn test_adapter_rejects_overlong_lines() {
        let mut cache = LinesCache::new();
        let image = VectorImage {
            lines: vec![Line::new(-2_000_000_000, 0, 2_000_000_000, 0)],
        };
        let err = VectorToRasterAdapter::new(&image, &mut cache).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Raster(RasterError::LineTooLong { points: 4_000_000_001, .. })
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_adapted_rectangle_draws_outline() {
        let mut cache = LinesCache::new();
        let adapted = VectorToRasterAdapter::new(&VectorImage::rectangle(3, 3), &mut cache).unwrap();
        assert_eq!(draw(&adapted).unwrap(), "...\n. .\n...\n");
    }

    #[test]
    fn test_cache_reuses_lines() {
        let mut cache = LinesCache::new();
        let rectangle = VectorImage::rectangle(4, 4);
        let first = VectorToRasterAdapter::new(&rectangle, &mut cache).unwrap();
        assert_eq!(cache.len(), 4);
        let second = VectorToRasterAdapter::new(&rectangle, &mut cache).unwrap();
        assert_eq!(cache.len(), 4);
        assert_eq!(first.points(), second.points());
    }

    #[test]
    fn test_cache_keys_are_stable() {
        let cache = LinesCache::new();
        let line = Line::new(0, 0, 5, 5);
        assert_eq!(cache.key(&line).unwrap(), cache.key(&line).unwrap());
        assert_ne!(
            cache.key(&line).unwrap(),
            cache.key(&Line::new(0, 0, 5, 4)).unwrap()
        );
    }

    #[test]
    fn test_vector_addition() {
        let sum = Vector2i::new([1, 2]) + Vector2i::new([3, 4]);
        assert_eq!(sum, Vector2i::new([4, 6]));
        assert_eq!(sum.to_string(), "(4, 6)");
        assert_eq!(Vector3f::default()[2], 0.0);
    }
}
