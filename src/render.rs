//! Reconstruction of an arbitrarily sized rectangle from a compiled set, the same way the
//! on-device renderer draws it. Used for previews.

use image::{Rgb, RgbImage};

use crate::geometry::{BorderSpec, Rect};
use crate::pixel::decode_rgb565;
use crate::{EncodedRegion, NinePatchSet, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Repeat the source, `src[y % h][x % w]`.
    #[default]
    Tile,
    /// Nearest-neighbour scale to the target.
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub edge_mode: FillMode,
    pub center_mode: FillMode,
}

/// Row-major RGB565 target buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas565 {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u16>,
}

impl Canvas565 {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![0; width as usize * height as usize] }
    }

    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(decode_rgb565(self.get(x, y))))
    }

    fn blit(&mut self, src: &EncodedRegion, dst: Rect, mode: FillMode) {
        if src.is_empty() || dst.is_empty() {
            return;
        }
        for yy in 0..dst.h {
            let sy = match mode {
                FillMode::Tile => yy % src.height,
                FillMode::Stretch => (yy as u64 * src.height as u64 / dst.h as u64) as u32,
            };
            let row = &src.pixels[(sy * src.width) as usize..][..src.width as usize];
            let out = ((dst.y + yy) * self.width + dst.x) as usize;
            for xx in 0..dst.w {
                let sx = match mode {
                    FillMode::Tile => xx % src.width,
                    FillMode::Stretch => (xx as u64 * src.width as u64 / dst.w as u64) as u32,
                };
                self.pixels[out + xx as usize] = row[sx as usize];
            }
        }
    }
}

/// Interior of a `width x height` box once the borders are removed.
pub fn content_rect(x: u32, y: u32, width: u32, height: u32, border: &BorderSpec) -> Rect {
    Rect::new(
        x + border.left,
        y + border.top,
        width.saturating_sub(border.left + border.right),
        height.saturating_sub(border.top + border.bottom),
    )
}

/// Draw `set` into a new `width x height` canvas. Border thicknesses come from the edge
/// pieces, corner sizes from the corner pieces. The target grows to fit the corners if
/// it is smaller than them.
pub fn render(set: &NinePatchSet, width: u32, height: u32, options: &RenderOptions) -> Canvas565 {
    let (tl, tr, bl, br) = (&set.top_left, &set.top_right, &set.bottom_left, &set.bottom_right);
    let left_w = set.left.width;
    let right_w = set.right.width;
    let top_h = set.top.height;
    let bottom_h = set.bottom.height;

    let width = width
        .max(tl.width + tr.width)
        .max(bl.width + br.width)
        .max(left_w + right_w);
    let height = height
        .max(tl.height + bl.height)
        .max(tr.height + br.height)
        .max(top_h + bottom_h);

    let mut canvas = Canvas565::new(width, height);
    let slots = [
        (Role::TopLeft, Rect::new(0, 0, tl.width, tl.height)),
        (Role::TopRight, Rect::new(width - tr.width, 0, tr.width, tr.height)),
        (Role::BottomLeft, Rect::new(0, height - bl.height, bl.width, bl.height)),
        (Role::BottomRight, Rect::new(width - br.width, height - br.height, br.width, br.height)),
        (Role::Top, Rect::new(tl.width, 0, width.saturating_sub(tl.width + tr.width), top_h)),
        (
            Role::Bottom,
            Rect::new(
                bl.width,
                height - bottom_h,
                width.saturating_sub(bl.width + br.width),
                bottom_h,
            ),
        ),
        (Role::Left, Rect::new(0, tl.height, left_w, height.saturating_sub(tl.height + bl.height))),
        (
            Role::Right,
            Rect::new(
                width - right_w,
                tr.height,
                right_w,
                height.saturating_sub(tr.height + br.height),
            ),
        ),
        (
            Role::Center,
            Rect::new(
                left_w,
                top_h,
                width.saturating_sub(left_w + right_w),
                height.saturating_sub(top_h + bottom_h),
            ),
        ),
    ];

    for (role, dst) in slots {
        let mode = match role {
            Role::Center => options.center_mode,
            r if r.is_corner() => FillMode::Stretch,
            _ => options.edge_mode,
        };
        canvas.blit(set.region(role), dst, mode);
    }
    canvas
}
