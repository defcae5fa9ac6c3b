//! Nine-region decomposition of an image from its border thicknesses.

use serde::{Deserialize, Serialize};

use crate::{NinePatchError, Result};

/// Axis-aligned pixel rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x as u64 + other.w as u64 <= self.x as u64 + self.w as u64
            && other.y as u64 + other.h as u64 <= self.y as u64 + self.h as u64
    }
}

/// Thickness in pixels of the four edge bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSpec {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl BorderSpec {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self::new(30, 31, 28, 33)
    }
}

/// Optional width/height of a single corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerSize {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Per-corner overrides. Anything left unset follows the adjacent border thickness,
/// which keeps the corners locked to the border and the nine regions tiling the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerOverrides {
    pub top_left: CornerSize,
    pub top_right: CornerSize,
    pub bottom_left: CornerSize,
    pub bottom_right: CornerSize,
}

impl CornerOverrides {
    pub fn is_locked(&self) -> bool {
        *self == Self::default()
    }
}

/// The nine base rectangles of a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Regions {
    pub top_left: Rect,
    pub top: Rect,
    pub top_right: Rect,
    pub left: Rect,
    pub center: Rect,
    pub right: Rect,
    pub bottom_left: Rect,
    pub bottom: Rect,
    pub bottom_right: Rect,
}

impl Regions {
    /// Rectangles in emission order (top-left .. bottom-right, row by row).
    pub fn as_array(&self) -> [Rect; 9] {
        [
            self.top_left,
            self.top,
            self.top_right,
            self.left,
            self.center,
            self.right,
            self.bottom_left,
            self.bottom,
            self.bottom_right,
        ]
    }
}

/// Split a `width x height` image into nine regions.
///
/// Borders that do not fit the image are rejected rather than clamped. Stretchable
/// regions may still come out with zero width or height, which is valid.
pub fn decompose(
    width: u32,
    height: u32,
    border: &BorderSpec,
    corners: &CornerOverrides,
) -> Result<Regions> {
    check_fits("left + right", border.left as u64 + border.right as u64, "width", width)?;
    check_fits("top + bottom", border.top as u64 + border.bottom as u64, "height", height)?;

    let tl_w = corners.top_left.width.unwrap_or(border.left);
    let tl_h = corners.top_left.height.unwrap_or(border.top);
    let tr_w = corners.top_right.width.unwrap_or(border.right);
    let tr_h = corners.top_right.height.unwrap_or(border.top);
    let bl_w = corners.bottom_left.width.unwrap_or(border.left);
    let bl_h = corners.bottom_left.height.unwrap_or(border.bottom);
    let br_w = corners.bottom_right.width.unwrap_or(border.right);
    let br_h = corners.bottom_right.height.unwrap_or(border.bottom);

    for (name, w, h) in [
        ("top-left corner", tl_w, tl_h),
        ("top-right corner", tr_w, tr_h),
        ("bottom-left corner", bl_w, bl_h),
        ("bottom-right corner", br_w, br_h),
    ] {
        check_fits(name, w as u64, "width", width)?;
        check_fits(name, h as u64, "height", height)?;
    }

    let mid_h = height.saturating_sub(border.top + border.bottom);

    Ok(Regions {
        top_left: Rect::new(0, 0, tl_w, tl_h),
        top: Rect::new(tl_w, 0, width.saturating_sub(tl_w.saturating_add(tr_w)), border.top),
        top_right: Rect::new(width - tr_w, 0, tr_w, tr_h),
        left: Rect::new(0, border.top, tl_w, mid_h),
        center: Rect::new(tl_w, border.top, width.saturating_sub(tl_w.saturating_add(tr_w)), mid_h),
        right: Rect::new(width - tr_w, border.top, tr_w, mid_h),
        bottom_left: Rect::new(0, height - bl_h, bl_w, bl_h),
        bottom: Rect::new(
            bl_w,
            height - border.bottom,
            width.saturating_sub(bl_w.saturating_add(br_w)),
            border.bottom,
        ),
        bottom_right: Rect::new(width - br_w, height - br_h, br_w, br_h),
    })
}

fn check_fits(what: &str, required: u64, axis: &'static str, available: u32) -> Result<()> {
    if required > available as u64 {
        return Err(NinePatchError::Validation {
            what: what.to_string(),
            required,
            axis,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked(width: u32, height: u32, border: BorderSpec) -> Regions {
        decompose(width, height, &border, &CornerOverrides::default()).unwrap()
    }

    #[test]
    fn default_border_layout() {
        let r = locked(100, 80, BorderSpec::new(30, 31, 28, 33));
        assert_eq!(r.center, Rect::new(30, 28, 39, 19));
        assert_eq!(r.top_left, Rect::new(0, 0, 30, 28));
        assert_eq!(r.bottom_right, Rect::new(69, 47, 31, 33));
        assert_eq!(r.top, Rect::new(30, 0, 39, 28));
        assert_eq!(r.left, Rect::new(0, 28, 30, 19));
        assert_eq!(r.right, Rect::new(69, 28, 31, 19));
        assert_eq!(r.bottom, Rect::new(30, 47, 39, 33));
    }

    #[test]
    fn locked_regions_tile_the_image() {
        for (w, h) in [(1, 1), (7, 5), (64, 64), (100, 80)] {
            for left in 0..=w.min(6) {
                for top in 0..=h.min(6) {
                    let border = BorderSpec::new(left, (w - left) / 2, top, (h - top) / 3);
                    let regions = locked(w, h, border);
                    let total: u64 = regions.as_array().iter().map(Rect::area).sum();
                    assert_eq!(total, w as u64 * h as u64, "{w}x{h} {border:?}");
                    let image = Rect::new(0, 0, w, h);
                    assert!(regions.as_array().iter().all(|r| image.contains(r)));
                }
            }
        }
    }

    #[test]
    fn borders_meeting_collapse_middle_column() {
        let r = locked(40, 20, BorderSpec::new(15, 25, 5, 5));
        assert_eq!(r.top.w, 0);
        assert_eq!(r.center.w, 0);
        assert_eq!(r.bottom.w, 0);
        assert_eq!(r.center.h, 10);
    }

    #[test]
    fn oversized_borders_are_rejected() {
        let err = decompose(40, 20, &BorderSpec::new(20, 21, 0, 0), &CornerOverrides::default())
            .unwrap_err();
        assert!(matches!(
            err,
            NinePatchError::Validation { required: 41, available: 40, axis: "width", .. }
        ));
        let err = decompose(40, 20, &BorderSpec::new(0, 0, 10, 11), &CornerOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn corner_overrides_change_only_their_corner_and_neighbours() {
        let mut corners = CornerOverrides::default();
        corners.bottom_left = CornerSize { width: Some(4), height: Some(2) };
        let r = decompose(20, 20, &BorderSpec::new(3, 3, 3, 3), &corners).unwrap();
        assert!(!corners.is_locked());
        assert_eq!(r.bottom_left, Rect::new(0, 18, 4, 2));
        assert_eq!(r.bottom, Rect::new(4, 17, 13, 3));
        assert_eq!(r.top, Rect::new(3, 0, 14, 3));
        assert_eq!(r.left, Rect::new(0, 3, 3, 14));
    }

    #[test]
    fn corner_override_larger_than_image_is_rejected() {
        let mut corners = CornerOverrides::default();
        corners.top_right.width = Some(50);
        let err = decompose(20, 20, &BorderSpec::new(3, 3, 3, 3), &corners).unwrap_err();
        assert!(err.to_string().contains("top-right corner"));
    }
}
