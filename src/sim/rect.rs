//! Footprint geometry and the trim against the block below
//!
//! A footprint is an axis-aligned rectangle in the horizontal plane. Vectors
//! here are `Vec2` where `x` is world x and `y` is world z.
//!
//! The rectangle stores its min corner and its size. Moving a rectangle only
//! touches the corner, so a sliding block keeps its size bit-for-bit, and the
//! trim hands back the parent's (or the mover's) own values whenever an axis
//! comes out unchanged.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in the x/z plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    min: Vec2,
    size: Vec2,
}

impl Rectangle {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            size: half_extents * 2.0,
        }
    }

    /// Build from edges. Callers guarantee `min <= max` on both axes.
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y, "inverted rectangle");
        Self {
            min,
            size: max - min,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Full width (x) and depth (z)
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn min_z(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn max_z(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Same size, shifted by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            size: self.size,
        }
    }
}

/// Whether the moving block still rests on its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimVerdict {
    Overlap,
    NoOverlap,
}

/// Which edges snapped onto the parent's edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub min_x: bool,
    pub max_x: bool,
    pub min_z: bool,
    pub max_z: bool,
}

impl Alignment {
    /// All four edges snapped
    pub fn is_perfect(&self) -> bool {
        self.min_x && self.max_x && self.min_z && self.max_z
    }
}

/// Outcome of trimming a moving footprint against its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimResult {
    pub verdict: TrimVerdict,
    /// Clamped footprint on overlap; the snapped but unclamped input otherwise
    pub trimmed: Rectangle,
    pub aligned: Alignment,
}

impl TrimResult {
    pub fn is_overlap(&self) -> bool {
        self.verdict == TrimVerdict::Overlap
    }

    pub fn is_perfect(&self) -> bool {
        self.is_overlap() && self.aligned.is_perfect()
    }
}

/// One axis of a rectangle: min edge and extent
#[derive(Clone, Copy)]
struct Span {
    min: f32,
    size: f32,
}

impl Span {
    fn max(self) -> f32 {
        self.min + self.size
    }
}

/// One axis after the snap and clamp steps
struct AxisTrim {
    /// Snapped but unclamped edges
    snapped_min: f32,
    snapped_max: f32,
    clamped: Span,
    aligned_min: bool,
    aligned_max: bool,
    misses: bool,
}

fn trim_axis(moving: Span, parent: Span, tolerance: f32) -> AxisTrim {
    let (parent_min, parent_max) = (parent.min, parent.max());
    let (moving_min, moving_max) = (moving.min, moving.max());

    let aligned_min = moving_min >= parent_min - tolerance && moving_min <= parent_min + tolerance;
    let aligned_max = moving_max >= parent_max - tolerance && moving_max <= parent_max + tolerance;
    let min = if aligned_min { parent_min } else { moving_min };
    let max = if aligned_max { parent_max } else { moving_max };

    let misses = max < parent_min || min > parent_max;

    let lo = min.max(parent_min);
    let hi = max.min(parent_max);
    // Reuse stored extents when an edge pair is unchanged so sizes stay exact
    let clamped = if lo == parent_min && hi == parent_max {
        parent
    } else if lo == moving_min && hi == moving_max {
        moving
    } else {
        Span {
            min: lo,
            size: hi - lo,
        }
    };

    AxisTrim {
        snapped_min: min,
        snapped_max: max,
        clamped,
        aligned_min,
        aligned_max,
        misses,
    }
}

/// Trim `moving` against `parent`.
///
/// Per axis: snap edges within `tolerance`, reject if there is no overlap
/// left, then clamp to the parent. The overlap test runs on snapped but
/// unclamped edges; touching edges (`max == parent_min`) still count as
/// overlap and produce a zero-width footprint.
pub fn trim(moving: &Rectangle, parent: &Rectangle, tolerance: f32) -> TrimResult {
    let span_x = |r: &Rectangle| Span {
        min: r.min.x,
        size: r.size.x,
    };
    let span_z = |r: &Rectangle| Span {
        min: r.min.y,
        size: r.size.y,
    };
    let x = trim_axis(span_x(moving), span_x(parent), tolerance);
    let z = trim_axis(span_z(moving), span_z(parent), tolerance);
    let aligned = Alignment {
        min_x: x.aligned_min,
        max_x: x.aligned_max,
        min_z: z.aligned_min,
        max_z: z.aligned_max,
    };

    if x.misses || z.misses {
        // Snapping can invert a span that missed; keep the edges ordered
        let min = Vec2::new(
            x.snapped_min.min(x.snapped_max),
            z.snapped_min.min(z.snapped_max),
        );
        let max = Vec2::new(
            x.snapped_min.max(x.snapped_max),
            z.snapped_min.max(z.snapped_max),
        );
        return TrimResult {
            verdict: TrimVerdict::NoOverlap,
            trimmed: Rectangle::from_min_max(min, max),
            aligned,
        };
    }

    TrimResult {
        verdict: TrimVerdict::Overlap,
        trimmed: Rectangle {
            min: Vec2::new(x.clamped.min, z.clamped.min),
            size: Vec2::new(x.clamped.size, z.clamped.size),
        },
        aligned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_x(min_x: f32, max_x: f32) -> Rectangle {
        Rectangle::from_min_max(Vec2::new(min_x, -5.0), Vec2::new(max_x, 5.0))
    }

    #[test]
    fn test_identical_rectangles_are_perfect() {
        let a = Rectangle::new(Vec2::ZERO, Vec2::new(5.0, 5.0));
        let result = trim(&a, &a, 1.0);
        assert_eq!(result.verdict, TrimVerdict::Overlap);
        assert!(result.aligned.is_perfect());
        assert_eq!(result.trimmed.center(), Vec2::ZERO);
        assert_eq!(result.trimmed.half_extents(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_partial_overlap_clamps_max() {
        let moving = Rectangle::new(Vec2::new(8.0, 0.0), Vec2::new(5.0, 5.0));
        let parent = Rectangle::new(Vec2::new(5.0, 0.0), Vec2::new(5.0, 5.0));
        let result = trim(&moving, &parent, 0.5);

        assert!(result.is_overlap());
        assert!(!result.aligned.min_x);
        assert!(!result.aligned.max_x);
        // z edges coincide exactly
        assert!(result.aligned.min_z && result.aligned.max_z);
        assert!(!result.is_perfect());
        assert_eq!(result.trimmed.min_x(), 3.0);
        assert_eq!(result.trimmed.max_x(), 10.0);
        assert_eq!(result.trimmed.center().x, 6.5);
        assert_eq!(result.trimmed.half_extents().x, 3.5);
    }

    #[test]
    fn test_disjoint_is_no_overlap() {
        let result = trim(&rect_x(11.0, 21.0), &rect_x(0.0, 10.0), 0.5);
        assert_eq!(result.verdict, TrimVerdict::NoOverlap);
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_disjoint_on_z_only() {
        let parent = Rectangle::new(Vec2::ZERO, Vec2::new(5.0, 5.0));
        let moving = Rectangle::new(Vec2::new(0.0, -12.0), Vec2::new(5.0, 5.0));
        let result = trim(&moving, &parent, 1.0);
        assert_eq!(result.verdict, TrimVerdict::NoOverlap);
        // x edges still report their alignment
        assert!(result.aligned.min_x && result.aligned.max_x);
    }

    #[test]
    fn test_touching_edge_is_zero_width_overlap() {
        let result = trim(&rect_x(10.0, 20.0), &rect_x(0.0, 10.0), 0.0);
        assert!(result.is_overlap());
        assert_eq!(result.trimmed.min_x(), 10.0);
        assert_eq!(result.trimmed.max_x(), 10.0);
        assert_eq!(result.trimmed.size().x, 0.0);
    }

    #[test]
    fn test_snap_inside_tolerance_moves_edge() {
        // min is 0.4 right of parent min, max is 0.4 right of parent max
        let result = trim(&rect_x(0.4, 10.4), &rect_x(0.0, 10.0), 0.5);
        assert!(result.aligned.min_x && result.aligned.max_x);
        assert_eq!(result.trimmed.min_x(), 0.0);
        assert_eq!(result.trimmed.max_x(), 10.0);
        assert!(result.is_perfect());
    }

    #[test]
    fn test_snap_boundary_is_inclusive() {
        let result = trim(&rect_x(1.0, 11.0), &rect_x(0.0, 10.0), 1.0);
        assert!(result.aligned.min_x);
        assert!(result.aligned.max_x);
        assert_eq!(result.trimmed, rect_x(0.0, 10.0));
    }

    #[test]
    fn test_max_edge_snaps_symmetrically() {
        // Only the max edge is near the parent's
        let result = trim(&rect_x(-3.0, 9.8), &rect_x(0.0, 10.0), 0.5);
        assert!(!result.aligned.min_x);
        assert!(result.aligned.max_x);
        assert_eq!(result.trimmed.min_x(), 0.0);
        assert_eq!(result.trimmed.max_x(), 10.0);
    }

    #[test]
    fn test_translation_keeps_size_exact() {
        let parent = Rectangle::from_min_max(Vec2::new(0.37, -4.9), Vec2::new(7.13, 3.3));
        let mut offset = 0.0f32;
        for _ in 0..720 {
            offset += 0.0277;
            let moved = parent.translated(Vec2::new(offset, 0.0));
            assert_eq!(moved.size(), parent.size());
        }
        assert_eq!(parent.translated(Vec2::ZERO), parent);
    }

    #[test]
    fn test_unchanged_axis_keeps_stored_size() {
        // Non-round parent; the mover only overhangs on x
        let parent = Rectangle::from_min_max(Vec2::new(0.37, -4.9), Vec2::new(7.13, 3.3));
        let moving = parent.translated(Vec2::new(2.3, 0.0));
        let result = trim(&moving, &parent, 0.0);
        assert!(result.is_overlap());
        assert_eq!(result.trimmed.size().y, parent.size().y);
        assert_eq!(result.trimmed.min_z(), parent.min_z());
        assert_eq!(result.trimmed.min_x(), moving.min_x());
    }

    proptest! {
        #[test]
        fn prop_inside_parent_is_unchanged(
            cx in -50.0f32..50.0,
            cz in -50.0f32..50.0,
            hx in 5.0f32..20.0,
            hz in 5.0f32..20.0,
            tol in 0.0f32..1.0,
            left in 0.0f32..1.0,
            right in 0.0f32..1.0,
            near in 0.0f32..1.0,
            far in 0.0f32..1.0,
        ) {
            let parent = Rectangle::new(Vec2::new(cx, cz), Vec2::new(hx, hz));
            // Inset each edge by more than the tolerance, at most ~40% of the extent
            let inset = |t: f32, h: f32| tol + 0.01 + t * (h * 0.8 - tol - 0.01);
            let min = Vec2::new(parent.min_x() + inset(left, hx), parent.min_z() + inset(near, hz));
            let max = Vec2::new(parent.max_x() - inset(right, hx), parent.max_z() - inset(far, hz));
            prop_assume!(min.x <= max.x && min.y <= max.y);
            let moving = Rectangle::from_min_max(min, max);

            let result = trim(&moving, &parent, tol);
            prop_assert_eq!(result.verdict, TrimVerdict::Overlap);
            prop_assert_eq!(result.trimmed, moving);
        }

        #[test]
        fn prop_disjoint_never_overlaps(
            cx in -50.0f32..50.0,
            hx in 1.0f32..20.0,
            mhx in 1.0f32..20.0,
            gap in 0.01f32..30.0,
            to_right in any::<bool>(),
            tol in 0.0f32..1.0,
        ) {
            let parent = Rectangle::new(Vec2::new(cx, 0.0), Vec2::new(hx, 5.0));
            let moving_cx = if to_right {
                parent.max_x() + gap + mhx
            } else {
                parent.min_x() - gap - mhx
            };
            let moving = Rectangle::new(Vec2::new(moving_cx, 0.0), Vec2::new(mhx, 5.0));
            prop_assume!(moving.min_x() > parent.max_x() || moving.max_x() < parent.min_x());

            let result = trim(&moving, &parent, tol);
            prop_assert_eq!(result.verdict, TrimVerdict::NoOverlap);
        }

        #[test]
        fn prop_snapped_min_is_exact(
            pmin in -50.0f32..50.0,
            width in 2.0f32..20.0,
            tol in 0.01f32..1.0,
            t in 0.0f32..=1.0,
        ) {
            let parent = rect_x(pmin, pmin + width);
            let offset = (t * 2.0 - 1.0) * tol * 0.9;
            let moving = rect_x(pmin + offset, pmin + offset + width);
            prop_assume!((moving.min_x() - pmin).abs() <= tol);

            let result = trim(&moving, &parent, tol);
            prop_assert!(result.aligned.min_x);
            prop_assert_eq!(result.trimmed.min_x(), parent.min_x());
        }

        #[test]
        fn prop_perfect_trim_equals_parent(
            cx in -50.0f32..50.0,
            cz in -50.0f32..50.0,
            hx in 1.0f32..20.0,
            hz in 1.0f32..20.0,
            dx in -0.5f32..0.5,
            dz in -0.5f32..0.5,
        ) {
            let parent = Rectangle::new(Vec2::new(cx, cz), Vec2::new(hx, hz));
            let moving = parent.translated(Vec2::new(dx, dz));
            let result = trim(&moving, &parent, 1.0);
            prop_assert!(result.is_perfect());
            prop_assert_eq!(result.trimmed, parent);
        }
    }
}
