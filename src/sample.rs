//! Narrowing of stretchable regions to the compact sample that actually gets exported.
//!
//! A renderer only needs a repeating unit of an edge or of the center, so instead of the
//! full region the compiler emits a sub-rectangle of it. Requests are never rejected: a
//! sample that would leave its parent is shifted and shrunk until it fits.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Sample along the single free axis of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSample {
    pub offset: u32,
    pub length: u32,
}

impl Default for EdgeSample {
    fn default() -> Self {
        Self { offset: 0, length: 1 }
    }
}

/// Two-axis sample of the center region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterSample {
    pub offset_x: u32,
    pub offset_y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for CenterSample {
    fn default() -> Self {
        Self { offset_x: 0, offset_y: 0, width: 3, height: 3 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSpec {
    pub top: EdgeSample,
    pub bottom: EdgeSample,
    pub left: EdgeSample,
    pub right: EdgeSample,
    pub center: CenterSample,
}

/// Which axis of an edge region is free. Top and bottom edges run horizontally,
/// left and right vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAxis {
    Horizontal,
    Vertical,
}

/// Clamp a 1D `(offset, length)` request into `[0, extent)`.
///
/// The length is at least 1 and at most `extent`; an empty parent yields an empty span.
pub fn clamp_span(extent: u32, offset: u32, length: u32) -> (u32, u32) {
    let length = length.max(1).min(extent);
    let offset = offset.min(extent - length);
    (offset, length)
}

pub fn select_edge_sample(parent: Rect, axis: EdgeAxis, sample: EdgeSample) -> Rect {
    match axis {
        EdgeAxis::Horizontal => {
            let (off, len) = clamp_span(parent.w, sample.offset, sample.length);
            Rect::new(parent.x + off, parent.y, len, parent.h)
        }
        EdgeAxis::Vertical => {
            let (off, len) = clamp_span(parent.h, sample.offset, sample.length);
            Rect::new(parent.x, parent.y + off, parent.w, len)
        }
    }
}

pub fn select_center_sample(parent: Rect, sample: CenterSample) -> Rect {
    let (off_x, w) = clamp_span(parent.w, sample.offset_x, sample.width);
    let (off_y, h) = clamp_span(parent.h, sample.offset_y, sample.height);
    Rect::new(parent.x + off_x, parent.y + off_y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pixel_top_sample() {
        let top = Rect::new(30, 0, 39, 28);
        let s = select_edge_sample(top, EdgeAxis::Horizontal, EdgeSample { offset: 0, length: 1 });
        assert_eq!(s, Rect::new(30, 0, 1, 28));
    }

    #[test]
    fn zero_length_becomes_one() {
        let left = Rect::new(0, 28, 30, 19);
        let s = select_edge_sample(left, EdgeAxis::Vertical, EdgeSample { offset: 5, length: 0 });
        assert_eq!(s, Rect::new(0, 33, 30, 1));
    }

    #[test]
    fn offset_is_pulled_back_inside() {
        let top = Rect::new(10, 0, 20, 4);
        let s = select_edge_sample(top, EdgeAxis::Horizontal, EdgeSample { offset: 25, length: 3 });
        assert_eq!(s, Rect::new(27, 0, 3, 4));
    }

    #[test]
    fn oversized_sample_shrinks_to_parent() {
        let center = Rect::new(5, 6, 4, 2);
        let s = select_center_sample(
            center,
            CenterSample { offset_x: 3, offset_y: 9, width: 100, height: 7 },
        );
        assert_eq!(s, center);
    }

    #[test]
    fn empty_parent_gives_empty_sample() {
        let top = Rect::new(15, 0, 0, 5);
        let s = select_edge_sample(top, EdgeAxis::Horizontal, EdgeSample::default());
        assert_eq!(s, Rect::new(15, 0, 0, 5));
        assert!(s.is_empty());
    }

    #[test]
    fn clamped_span_always_fits() {
        for extent in 0..12u32 {
            for offset in 0..16u32 {
                for length in 0..16u32 {
                    let (o, l) = clamp_span(extent, offset, length);
                    assert!(o + l <= extent);
                    if extent > 0 {
                        assert!(l >= 1);
                    }
                }
            }
        }
    }

    #[test]
    fn samples_stay_inside_parent() {
        let parent = Rect::new(3, 7, 9, 5);
        for offset in [0, 4, 8, 40] {
            for length in [0, 1, 5, 9, 50] {
                let sample = EdgeSample { offset, length };
                for axis in [EdgeAxis::Horizontal, EdgeAxis::Vertical] {
                    assert!(parent.contains(&select_edge_sample(parent, axis, sample)));
                }
                let c = CenterSample {
                    offset_x: offset,
                    offset_y: length,
                    width: length,
                    height: offset,
                };
                assert!(parent.contains(&select_center_sample(parent, c)));
            }
        }
    }
}
