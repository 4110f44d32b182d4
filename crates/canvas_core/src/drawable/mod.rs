//! Drawable Definitions
//!
//! This module defines the drawable kinds supported by the per-kind pool
//! system, the pooled drawable itself, and the partial-update patch used by
//! batched mutations. Each kind corresponds to a separate pool managed by
//! the `TypedPoolRegistry`.

use crate::pool::PoolResource;
use nalgebra::Vector2;

/// Enumeration of supported drawable kinds for the per-kind object pools
///
/// A closed enum rather than a free-text tag: dispatch on kind is checked
/// exhaustively at compile time, and every drawable carries its kind as an
/// immutable tag assigned at construction so `release` can route back to the
/// originating pool in O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawableKind {
    /// Axis-aligned rectangle
    Rectangle,
    /// Ellipse within its bounding box
    Ellipse,
    /// Closed polygon defined by its point list
    Polygon,
    /// A run of laid-out text
    TextRun,
    /// Bitmap image referenced by source
    Raster,
    /// Container grouping other drawables on the surface
    Group,
}

impl DrawableKind {
    /// Get all available drawable kinds
    pub fn all() -> &'static [DrawableKind] {
        &[
            DrawableKind::Rectangle,
            DrawableKind::Ellipse,
            DrawableKind::Polygon,
            DrawableKind::TextRun,
            DrawableKind::Raster,
            DrawableKind::Group,
        ]
    }

    /// Get the human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            DrawableKind::Rectangle => "Rectangle",
            DrawableKind::Ellipse => "Ellipse",
            DrawableKind::Polygon => "Polygon",
            DrawableKind::TextRun => "TextRun",
            DrawableKind::Raster => "Raster",
            DrawableKind::Group => "Group",
        }
    }
}

impl std::fmt::Display for DrawableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// RGBA color with components in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component
    pub a: f32,
}

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    /// Opaque white
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    /// Construct a color from RGBA components
    pub fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Stroke style: color plus line width in surface units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color
    pub color: Color,
    /// Line width
    pub width: f32,
}

/// A pooled drawable object
///
/// Generic fields (position, scale, rotation, opacity, visibility,
/// interactivity, fill, stroke) are restored to their defaults by `reset`,
/// so a freshly acquired drawable always starts from a known state.
/// Kind-specific fields (`text`, `image_source`, `points`) are the caller's
/// responsibility to set after acquiring; `reset` clears them too.
///
/// The `kind` tag is immutable for the drawable's entire lifetime: it is
/// assigned by the pool factory at construction and is how `release` finds
/// the originating pool without any identity search.
#[derive(Debug, Clone)]
pub struct Drawable {
    kind: DrawableKind,
    in_use: bool,
    /// Position of the drawable's origin on the surface
    pub position: Vector2<f32>,
    /// Per-axis scale factors
    pub scale: Vector2<f32>,
    /// Rotation around the origin, in radians
    pub rotation: f32,
    /// Opacity in `[0.0, 1.0]`
    pub opacity: f32,
    /// Whether the drawable is rendered
    pub visible: bool,
    /// Whether the drawable responds to pointer interaction
    pub interactive: bool,
    /// Fill color, if any
    pub fill: Option<Color>,
    /// Stroke style, if any
    pub stroke: Option<Stroke>,
    /// Text content (kind-specific: `TextRun`)
    pub text: String,
    /// Image source reference (kind-specific: `Raster`)
    pub image_source: Option<String>,
    /// Polygon points (kind-specific: `Polygon`)
    pub points: Vec<Vector2<f32>>,
}

impl Drawable {
    /// Construct a new drawable of the given kind, at reset defaults
    pub fn new(kind: DrawableKind) -> Self {
        Self {
            kind,
            in_use: false,
            position: Vector2::zeros(),
            scale: Vector2::new(1.0, 1.0),
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            interactive: true,
            fill: None,
            stroke: None,
            text: String::new(),
            image_source: None,
            points: Vec::new(),
        }
    }

    /// The immutable kind tag assigned at construction
    pub fn kind(&self) -> DrawableKind {
        self.kind
    }
}

impl PoolResource for Drawable {
    fn reset(&mut self) {
        self.position = Vector2::zeros();
        self.scale = Vector2::new(1.0, 1.0);
        self.rotation = 0.0;
        self.opacity = 1.0;
        self.visible = true;
        self.interactive = true;
        self.fill = None;
        self.stroke = None;
        self.text.clear();
        self.image_source = None;
        self.points.clear();
    }

    fn is_in_use(&self) -> bool {
        self.in_use
    }

    fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }
}

/// Partial update over a drawable's generic fields
///
/// Every field is optional; `apply` writes only the fields that are set.
/// `fill` and `stroke` are doubly optional so a patch can clear them
/// (`Some(None)`) as well as set them.
#[derive(Debug, Clone, Default)]
pub struct DrawablePatch {
    /// New position
    pub position: Option<Vector2<f32>>,
    /// New scale
    pub scale: Option<Vector2<f32>>,
    /// New rotation in radians
    pub rotation: Option<f32>,
    /// New opacity
    pub opacity: Option<f32>,
    /// New visibility
    pub visible: Option<bool>,
    /// New interactivity
    pub interactive: Option<bool>,
    /// New fill (`Some(None)` clears it)
    pub fill: Option<Option<Color>>,
    /// New stroke (`Some(None)` clears it)
    pub stroke: Option<Option<Stroke>>,
}

impl DrawablePatch {
    /// Apply the set fields to the target drawable
    pub fn apply(&self, target: &mut Drawable) {
        if let Some(position) = self.position {
            target.position = position;
        }
        if let Some(scale) = self.scale {
            target.scale = scale;
        }
        if let Some(rotation) = self.rotation {
            target.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            target.opacity = opacity;
        }
        if let Some(visible) = self.visible {
            target.visible = visible;
        }
        if let Some(interactive) = self.interactive {
            target.interactive = interactive;
        }
        if let Some(fill) = self.fill {
            target.fill = fill;
        }
        if let Some(stroke) = self.stroke {
            target.stroke = stroke;
        }
    }
}
