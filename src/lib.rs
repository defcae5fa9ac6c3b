//! Nine-patch asset compiler: splits a bitmap into corners, edges and center and
//! exports compact RGB565 samples of each piece.

pub mod config;
pub mod emit;
pub mod extract;
pub mod geometry;
pub mod pixel;
pub mod render;
pub mod sample;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::CompileRequest;
pub use emit::{emit_header, emit_json, EmitOptions, OutputFormat};
pub use extract::{extract, EncodedRegion};
pub use geometry::{decompose, BorderSpec, CornerOverrides, CornerSize, Rect, Regions};
pub use pixel::{decode_rgb565, encode_rgb565, PixelSource};
pub use sample::{CenterSample, EdgeSample, SampleSpec};

use sample::{select_center_sample, select_edge_sample, EdgeAxis};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NinePatchError {
    #[error("Validation error: {what} needs {required}px but the image {axis} is {available}px")]
    Validation {
        what: String,
        required: u64,
        axis: &'static str,
        available: u32,
    },
    #[error("Invalid prefix {0:?}: use ASCII letters, digits and '_'")]
    InvalidPrefix(String),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NinePatchError>;

/// The nine pieces, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Role {
    pub const ALL: [Role; 9] = [
        Role::TopLeft,
        Role::Top,
        Role::TopRight,
        Role::Left,
        Role::Center,
        Role::Right,
        Role::BottomLeft,
        Role::Bottom,
        Role::BottomRight,
    ];

    /// Suffix appended to the prefix in emitted constant names.
    pub fn suffix(self) -> &'static str {
        match self {
            Role::TopLeft => "_TOP_LEFT",
            Role::Top => "_TOP",
            Role::TopRight => "_TOP_RIGHT",
            Role::Left => "_LEFT",
            Role::Center => "_CENTER",
            Role::Right => "_RIGHT",
            Role::BottomLeft => "_BOTTOM_LEFT",
            Role::Bottom => "_BOTTOM",
            Role::BottomRight => "_BOTTOM_RIGHT",
        }
    }

    /// Member name in the runtime's `NinePatchSet` struct.
    pub fn member(self) -> &'static str {
        match self {
            Role::TopLeft => "tl",
            Role::Top => "t",
            Role::TopRight => "tr",
            Role::Left => "l",
            Role::Center => "c",
            Role::Right => "r",
            Role::BottomLeft => "bl",
            Role::Bottom => "b",
            Role::BottomRight => "br",
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(self, Role::TopLeft | Role::TopRight | Role::BottomLeft | Role::BottomRight)
    }

    fn pick(self, regions: &Regions) -> Rect {
        match self {
            Role::TopLeft => regions.top_left,
            Role::Top => regions.top,
            Role::TopRight => regions.top_right,
            Role::Left => regions.left,
            Role::Center => regions.center,
            Role::Right => regions.right,
            Role::BottomLeft => regions.bottom_left,
            Role::Bottom => regions.bottom,
            Role::BottomRight => regions.bottom_right,
        }
    }
}

/// Base decomposition plus the rectangles actually exported (corners unchanged,
/// edges and center narrowed to their samples).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub base: Regions,
    pub export: Regions,
}

impl Layout {
    pub fn export_rect(&self, role: Role) -> Rect {
        role.pick(&self.export)
    }

    pub fn base_rect(&self, role: Role) -> Rect {
        role.pick(&self.base)
    }
}

/// Output of one compile: nine encoded regions named by `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NinePatchSet {
    #[serde(skip)]
    pub prefix: String,
    pub top_left: EncodedRegion,
    pub top: EncodedRegion,
    pub top_right: EncodedRegion,
    pub left: EncodedRegion,
    pub center: EncodedRegion,
    pub right: EncodedRegion,
    pub bottom_left: EncodedRegion,
    pub bottom: EncodedRegion,
    pub bottom_right: EncodedRegion,
}

impl NinePatchSet {
    pub fn region(&self, role: Role) -> &EncodedRegion {
        match role {
            Role::TopLeft => &self.top_left,
            Role::Top => &self.top,
            Role::TopRight => &self.top_right,
            Role::Left => &self.left,
            Role::Center => &self.center,
            Role::Right => &self.right,
            Role::BottomLeft => &self.bottom_left,
            Role::Bottom => &self.bottom,
            Role::BottomRight => &self.bottom_right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &EncodedRegion)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.region(role)))
    }
}

/// Requested vs. selected sample along one axis, for clamp reporting.
struct SampleSpan {
    region: &'static str,
    offset: u32,
    length: u32,
    origin: u32,
    start: u32,
    len: u32,
}

/// Compiles images into nine-patch sets. Holds only the request, so one compiler can be
/// shared across threads and reused for any number of images.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    request: CompileRequest,
}

impl Compiler {
    pub fn new(request: CompileRequest) -> Self {
        Self { request }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.request.prefix = prefix.into();
        self
    }

    pub fn with_border(mut self, border: BorderSpec) -> Self {
        self.request.border = border;
        self
    }

    pub fn with_corners(mut self, corners: CornerOverrides) -> Self {
        self.request.corners = corners;
        self
    }

    pub fn with_samples(mut self, samples: SampleSpec) -> Self {
        self.request.samples = samples;
        self
    }

    pub fn request(&self) -> &CompileRequest {
        &self.request
    }

    /// Decompose a `width x height` image and select the exported samples.
    pub fn layout(&self, width: u32, height: u32) -> Result<Layout> {
        if width == 0 || height == 0 {
            return Err(NinePatchError::Input(format!("image has no pixels ({width}x{height})")));
        }
        let req = &self.request;
        let base = decompose(width, height, &req.border, &req.corners)?;
        let samples = &req.samples;

        let export = Regions {
            top: select_edge_sample(base.top, EdgeAxis::Horizontal, samples.top),
            bottom: select_edge_sample(base.bottom, EdgeAxis::Horizontal, samples.bottom),
            left: select_edge_sample(base.left, EdgeAxis::Vertical, samples.left),
            right: select_edge_sample(base.right, EdgeAxis::Vertical, samples.right),
            center: select_center_sample(base.center, samples.center),
            ..base
        };

        let spans = [
            SampleSpan {
                region: "top",
                offset: samples.top.offset,
                length: samples.top.length,
                origin: base.top.x,
                start: export.top.x,
                len: export.top.w,
            },
            SampleSpan {
                region: "bottom",
                offset: samples.bottom.offset,
                length: samples.bottom.length,
                origin: base.bottom.x,
                start: export.bottom.x,
                len: export.bottom.w,
            },
            SampleSpan {
                region: "left",
                offset: samples.left.offset,
                length: samples.left.length,
                origin: base.left.y,
                start: export.left.y,
                len: export.left.h,
            },
            SampleSpan {
                region: "right",
                offset: samples.right.offset,
                length: samples.right.length,
                origin: base.right.y,
                start: export.right.y,
                len: export.right.h,
            },
            SampleSpan {
                region: "center x",
                offset: samples.center.offset_x,
                length: samples.center.width,
                origin: base.center.x,
                start: export.center.x,
                len: export.center.w,
            },
            SampleSpan {
                region: "center y",
                offset: samples.center.offset_y,
                length: samples.center.height,
                origin: base.center.y,
                start: export.center.y,
                len: export.center.h,
            },
        ];
        for span in spans {
            let got_offset = span.start - span.origin;
            if got_offset != span.offset || span.len != span.length {
                tracing::warn!(
                    region = span.region,
                    offset = span.offset,
                    length = span.length,
                    got_offset,
                    got_length = span.len,
                    "sample clamped"
                );
            }
        }

        Ok(Layout { base, export })
    }

    /// Run the whole pipeline on `source`. Either all nine regions are produced or an
    /// error is returned before any pixel is read.
    #[tracing::instrument(skip(self, source), fields(prefix = %self.request.prefix))]
    pub fn compile<S: PixelSource + ?Sized>(&self, source: &S) -> Result<NinePatchSet> {
        config::validate_prefix(&self.request.prefix)?;
        let layout = self.layout(source.width(), source.height())?;
        let grab = |role: Role| {
            let rect = layout.export_rect(role);
            tracing::debug!(?role, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "extracting");
            extract(source, rect)
        };

        Ok(NinePatchSet {
            prefix: self.request.prefix.clone(),
            top_left: grab(Role::TopLeft),
            top: grab(Role::Top),
            top_right: grab(Role::TopRight),
            left: grab(Role::Left),
            center: grab(Role::Center),
            right: grab(Role::Right),
            bottom_left: grab(Role::BottomLeft),
            bottom: grab(Role::Bottom),
            bottom_right: grab(Role::BottomRight),
        })
    }
}

/// Compile `source` with `request` in one call.
pub fn compile<S: PixelSource + ?Sized>(
    source: &S,
    request: &CompileRequest,
) -> Result<NinePatchSet> {
    Compiler::new(request.clone()).compile(source)
}
