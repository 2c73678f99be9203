// Copyright 2025 the Beckon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the node tree: identifiers, flags, dimensions, and node properties.

use alloc::string::String;
use kurbo::Vec2;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility, input, and draw order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is drawn.
        const VISIBLE           = 0b0000_0001;
        /// Node and its descendants accept pointer input.
        const ACTIVE            = 0b0000_0010;
        /// Billboard draws above world geometry.
        const ALWAYS_ON_TOP     = 0b0000_0100;
        /// Descendants are clipped to this node's bounds.
        const CLIPS_DESCENDANTS = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Kind of a node. Fixed at insertion.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    /// Screen-space root that billboards are parented into.
    Layer,
    /// Container anchored to a world object.
    Billboard,
    /// Plain rectangular panel.
    Frame,
    /// Image.
    Image,
    /// Text label.
    Text,
    /// Invisible interactive area.
    Button,
}

/// One axis of a dimension: a fraction of the parent plus a pixel offset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UDim {
    /// Fraction of the parent extent.
    pub scale: f64,
    /// Pixel offset added after scaling.
    pub offset: f64,
}

impl UDim {
    /// Create a dimension from a scale and an offset.
    pub const fn new(scale: f64, offset: f64) -> Self {
        Self { scale, offset }
    }
}

/// Two-axis dimension used for sizes and positions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct UDim2 {
    /// Horizontal component.
    pub x: UDim,
    /// Vertical component.
    pub y: UDim,
}

impl UDim2 {
    /// Create a dimension from all four components.
    pub const fn new(x_scale: f64, x_offset: f64, y_scale: f64, y_offset: f64) -> Self {
        Self {
            x: UDim::new(x_scale, x_offset),
            y: UDim::new(y_scale, y_offset),
        }
    }

    /// Scale-only dimension.
    pub const fn from_scale(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, y, 0.0)
    }

    /// Offset-only dimension.
    pub const fn from_offset(x: f64, y: f64) -> Self {
        Self::new(0.0, x, 0.0, y)
    }

    /// Linear interpolation of every component.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self::new(
            mix(self.x.scale, to.x.scale),
            mix(self.x.offset, to.x.offset),
            mix(self.y.scale, to.y.scale),
            mix(self.y.offset, to.y.offset),
        )
    }
}

/// How a node derives its size from its parent.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SizeConstraint {
    /// Each axis scales against the matching parent axis.
    #[default]
    RelativeXY,
    /// Both axes scale against the parent height.
    RelativeYY,
}

/// Font face used for text nodes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Font {
    /// Regular weight.
    #[default]
    Regular,
    /// Semi-bold weight.
    SemiBold,
}

/// Horizontal text alignment.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum TextAlign {
    /// Left aligned.
    Left,
    /// Centered.
    #[default]
    Center,
}

/// Linear RGB color with components in `[0, 1]`.
pub type Rgb = [f32; 3];

/// Opaque reference to the world object a billboard is anchored to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Adornee(pub u64);

/// Per-node properties.
///
/// Not every property is meaningful for every [`NodeKind`]; unused ones are ignored by renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct Props {
    /// Debug name; also used by [`Tree::find_child`](crate::Tree::find_child).
    pub name: String,
    /// Size relative to the parent.
    pub size: UDim2,
    /// Position relative to the parent.
    pub position: UDim2,
    /// Point of the node placed at `position`, as a fraction of its own size.
    pub anchor_point: Vec2,
    /// Sizing rule.
    pub size_constraint: SizeConstraint,
    /// Background fill.
    pub background_color: Rgb,
    /// Background transparency; `1.0` is fully transparent.
    pub background_transparency: f64,
    /// Rounded corner radius, if any.
    pub corner_radius: Option<UDim>,
    /// Image reference for image nodes.
    pub image: Option<String>,
    /// Image transparency.
    pub image_transparency: f64,
    /// Text content.
    pub text: String,
    /// Text size in pixels.
    pub text_size: f64,
    /// Text color.
    pub text_color: Rgb,
    /// Text transparency.
    pub text_transparency: f64,
    /// Horizontal text alignment.
    pub text_align: TextAlign,
    /// Font face.
    pub font: Font,
    /// Uniform scale applied to the node and its descendants.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Scalar progress in `[0, 1]`, see [`Tree::bind_rotation`](crate::Tree::bind_rotation).
    pub progress: f64,
    /// Billboard offset in multiples of its own size.
    pub size_offset: Vec2,
    /// World object a billboard follows.
    pub adornee: Option<Adornee>,
    /// Whether text is run through the host's translator.
    pub auto_localize: bool,
    /// Localization table used for text, if any.
    pub localization_table: Option<String>,
    /// Visibility and input flags.
    pub flags: NodeFlags,
}

impl Default for Props {
    fn default() -> Self {
        Self {
            name: String::new(),
            size: UDim2::default(),
            position: UDim2::default(),
            anchor_point: Vec2::ZERO,
            size_constraint: SizeConstraint::default(),
            background_color: [1.0, 1.0, 1.0],
            background_transparency: 0.0,
            corner_radius: None,
            image: None,
            image_transparency: 0.0,
            text: String::new(),
            text_size: 14.0,
            text_color: [0.0, 0.0, 0.0],
            text_transparency: 0.0,
            text_align: TextAlign::default(),
            font: Font::default(),
            scale: 1.0,
            rotation: 0.0,
            progress: 0.0,
            size_offset: Vec2::ZERO,
            adornee: None,
            auto_localize: true,
            localization_table: None,
            flags: NodeFlags::default(),
        }
    }
}

/// Animatable property of a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Property {
    /// [`Props::background_transparency`].
    BackgroundTransparency,
    /// [`Props::image_transparency`].
    ImageTransparency,
    /// [`Props::text_transparency`].
    TextTransparency,
    /// [`Props::size`].
    Size,
    /// [`Props::scale`].
    Scale,
    /// [`Props::rotation`].
    Rotation,
    /// [`Props::progress`].
    Progress,
}

/// Value of an animatable property.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    /// Scalar properties.
    Scalar(f64),
    /// Dimension properties.
    Dim(UDim2),
}

impl Value {
    /// Interpolate toward `to`. Mismatched variants snap to `to`.
    pub fn lerp(self, to: Self, t: f64) -> Self {
        match (self, to) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(a + (b - a) * t),
            (Self::Dim(a), Self::Dim(b)) => Self::Dim(a.lerp(b, t)),
            _ => to,
        }
    }

    /// The scalar payload, if any.
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Dim(_) => None,
        }
    }
}
