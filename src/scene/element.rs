use crate::{
    animation::tween::{Animated, Lerp},
    data::district::DistrictId,
    foundation::core::{Affine, BezPath, Point, Rect, Rgb8},
};

/// Stable join key of an element inside its layer.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKey {
    /// Keyed by district; carries the district as datum.
    District(DistrictId),
    /// Fixed decoration such as an axis or label.
    Named(String),
}

impl ElementKey {
    /// Named key from any string.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl std::fmt::Display for ElementKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::District(id) => write!(f, "district-{id}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Scene-unique element identity. A new id means the element was recreated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Horizontal text alignment at the label anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centered on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` value.
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Primitive geometry. Circles, lines, and label anchors take their positions from [`Attrs`].
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Arbitrary outline, used for district polygons.
    Path(BezPath),
    /// Circle at `pos` with `radius`.
    Circle,
    /// Segment from `pos` to `pos2`.
    Line,
    /// Text anchored at `pos`.
    Label {
        /// Label text.
        text: String,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// Font size in logical units.
        size: f64,
    },
}

/// Paint applied to a primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Fill color; `None` leaves the shape unfilled.
    pub fill: Option<Rgb8>,
    /// Stroke color; `None` draws no outline.
    pub stroke: Option<Rgb8>,
    /// Stroke width in logical units.
    pub stroke_width: f64,
    /// Stroke opacity, multiplied by the element opacity.
    pub stroke_opacity: f64,
    /// Dash pattern `(on, off)`.
    pub dash: Option<(f64, f64)>,
}

impl Style {
    /// Fill only.
    pub fn fill(color: Rgb8) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    /// Stroke only.
    pub fn stroke(color: Rgb8, width: f64) -> Self {
        Self {
            stroke: Some(color),
            stroke_width: width,
            ..Self::default()
        }
    }

    /// Add an outline.
    pub fn with_stroke(mut self, color: Rgb8, width: f64, opacity: f64) -> Self {
        self.stroke = Some(color);
        self.stroke_width = width;
        self.stroke_opacity = opacity;
        self
    }

    /// Dash the stroke.
    pub fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = Some((on, off));
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 0.0,
            stroke_opacity: 1.0,
            dash: None,
        }
    }
}

/// Animatable attributes shared by every primitive.
///
/// `pos` is a circle center, a line start, or a label anchor; `pos2` is a line end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attrs {
    /// Circle center, line start, or label anchor.
    pub pos: Point,
    /// Line end.
    pub pos2: Point,
    /// Circle radius.
    pub radius: f64,
    /// Element opacity.
    pub opacity: f64,
}

impl Attrs {
    /// Attributes that only carry an opacity.
    pub fn opacity(opacity: f64) -> Self {
        Self {
            pos: Point::ZERO,
            pos2: Point::ZERO,
            radius: 0.0,
            opacity,
        }
    }

    /// Circle attributes.
    pub fn circle(center: Point, radius: f64, opacity: f64) -> Self {
        Self {
            pos: center,
            pos2: Point::ZERO,
            radius,
            opacity,
        }
    }

    /// Line attributes.
    pub fn line(from: Point, to: Point, opacity: f64) -> Self {
        Self {
            pos: from,
            pos2: to,
            radius: 0.0,
            opacity,
        }
    }

    /// Anchored label or shape attributes.
    pub fn at(pos: Point, opacity: f64) -> Self {
        Self {
            pos,
            pos2: Point::ZERO,
            radius: 0.0,
            opacity,
        }
    }

    /// Same attributes at `opacity`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

impl Lerp for Attrs {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            pos: <Point as Lerp>::lerp(&a.pos, &b.pos, t),
            pos2: <Point as Lerp>::lerp(&a.pos2, &b.pos2, t),
            radius: a.radius + (b.radius - a.radius) * t,
            opacity: a.opacity + (b.opacity - a.opacity) * t,
        }
    }
}

/// Hover override. Applied on top of the animated baseline without touching it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverOverride {
    /// Radius shown while hovered.
    pub radius: f64,
    /// Opacity shown while hovered.
    pub opacity: f64,
}

/// Desired state of one element, as produced by a render path.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSpec {
    /// Join key.
    pub key: ElementKey,
    /// Class written to SVG.
    pub class: &'static str,
    /// Geometry.
    pub primitive: Primitive,
    /// Paint.
    pub style: Style,
    /// Target attributes.
    pub attrs: Attrs,
    /// District the element represents, for hover and tooltips.
    pub datum: Option<DistrictId>,
}

/// Live element owned by the scene graph.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) id: ElementId,
    pub(crate) key: ElementKey,
    pub(crate) class: &'static str,
    pub(crate) primitive: Primitive,
    pub(crate) style: Style,
    pub(crate) attrs: Animated<Attrs>,
    pub(crate) transform: Affine,
    pub(crate) hover: Option<HoverOverride>,
    pub(crate) exiting: bool,
    pub(crate) datum: Option<DistrictId>,
}

impl Element {
    pub(crate) fn from_spec(id: ElementId, spec: ElementSpec, initial: Attrs) -> Self {
        Self {
            id,
            key: spec.key,
            class: spec.class,
            primitive: spec.primitive,
            style: spec.style,
            attrs: Animated::new(initial),
            transform: Affine::IDENTITY,
            hover: None,
            exiting: false,
            datum: spec.datum,
        }
    }

    /// Scene-unique identity.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Join key.
    pub fn key(&self) -> &ElementKey {
        &self.key
    }

    /// Class written to SVG.
    pub fn class(&self) -> &'static str {
        self.class
    }

    /// Geometry.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Paint.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// District behind the element.
    pub fn datum(&self) -> Option<DistrictId> {
        self.datum
    }

    /// Own transform; anything but identity breaks the alignment rule.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Fading out after leaving its join.
    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    /// A transition is running.
    pub fn is_animating(&self) -> bool {
        self.attrs.is_running()
    }

    /// Not exiting and drawn with a non-zero baseline opacity. Only such elements take hover.
    pub fn is_interactive(&self) -> bool {
        !self.exiting && self.attrs.current().opacity > 0.0
    }

    /// Animated baseline, ignoring hover.
    pub fn baseline(&self) -> Attrs {
        *self.attrs.current()
    }

    /// Attributes the element is transitioning to.
    pub fn target(&self) -> Attrs {
        *self.attrs.target()
    }

    /// Active hover override.
    pub fn hover(&self) -> Option<HoverOverride> {
        self.hover
    }

    /// Attributes as drawn this frame.
    pub fn display_attrs(&self) -> Attrs {
        let mut a = *self.attrs.current();
        if let Some(h) = self.hover {
            a.radius = h.radius;
            a.opacity = h.opacity;
        }
        a
    }

    /// Whether `p` (alignment-group coordinates) falls inside the drawn shape.
    pub fn contains(&self, p: Point) -> bool {
        use kurbo::Shape as _;
        let a = self.display_attrs();
        match &self.primitive {
            Primitive::Circle => a.pos.distance(p) <= a.radius,
            Primitive::Path(path) => path.contains(p),
            Primitive::Rect(r) => r.contains(p),
            Primitive::Line | Primitive::Label { .. } => false,
        }
    }
}
