//! Layered scene graph with keyed reconciliation.
//!
//! Structure is fixed at construction:
//!
//! ```text
//! surface (viewport scale)
//! └── alignment (plot margin offset)
//!     ├── layer-background
//!     ├── layer-axes
//!     ├── ...
//!     └── layer-labels
//! ```
//!
//! Every spatially-correlated primitive lives in a layer group directly under the alignment group
//! and carries no transform of its own, so all primitives resolve to the same effective matrix.

use std::collections::BTreeMap;

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{Affine, Point, Viewport},
        error::{MorphError, MorphResult},
        math::approx_eq,
    },
    scene::element::{Element, ElementId, ElementKey, ElementSpec, HoverOverride},
};

/// Layers in paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Plot regions.
    Background,
    /// Axes, ticks, and tick labels.
    Axes,
    /// District polygons.
    Districts,
    /// Scatter markers.
    Markers,
    /// Fitted regression lines.
    FitLines,
    /// Means and gap annotations.
    Effects,
    /// Axis titles and captions.
    Labels,
}

impl Layer {
    /// Every layer in paint order.
    pub const ALL: [Layer; 7] = [
        Layer::Background,
        Layer::Axes,
        Layer::Districts,
        Layer::Markers,
        Layer::FitLines,
        Layer::Effects,
        Layer::Labels,
    ];

    /// Class name of the layer's group.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Background => "layer-background",
            Self::Axes => "layer-axes",
            Self::Districts => "layer-districts",
            Self::Markers => "layer-markers",
            Self::FitLines => "layer-fit-lines",
            Self::Effects => "layer-effects",
            Self::Labels => "layer-labels",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Group classes that survive a retaining clear.
pub const RETAINED_CLASSES: [&str; 4] = [
    ALIGNMENT_CLASS,
    "layer-markers",
    "layer-fit-lines",
    "layer-effects",
];

/// Class of the root group carrying the viewport scale.
pub const SURFACE_CLASS: &str = "surface";
/// Class of the group carrying the plot margin offset.
pub const ALIGNMENT_CLASS: &str = "alignment";

/// How a render pass clears the scene before rebuilding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearPolicy {
    /// Remove every element.
    Full,
    /// Keep elements whose layer class is in [`RETAINED_CLASSES`]; clear the rest.
    RetainTransitionLayers,
}

/// Index of a group inside its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(usize);

/// Transform node in the group tree.
#[derive(Clone, Debug)]
pub struct Group {
    /// Class written to SVG.
    pub class: String,
    /// Transform applied to children.
    pub transform: Affine,
    /// Parent group; `None` only for the surface.
    pub parent: Option<GroupId>,
}

/// How new keys appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enter {
    /// Appear at the target attributes.
    Immediate,
    /// Appear at the target position with zero opacity, then fade to the target opacity.
    FadeIn,
}

/// How surviving keys reach their new attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// Snap to the target, cancelling any running transition.
    Immediate,
    /// Transition from the current attributes.
    Transition,
}

/// How departed keys leave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// Drop immediately.
    Remove,
    /// Fade to zero opacity in place, then remove.
    FadeOut,
}

/// Per-join behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoinOpts {
    /// Enter behavior.
    pub enter: Enter,
    /// Update behavior.
    pub update: Update,
    /// Exit behavior.
    pub exit: Exit,
    /// Transition length for animated behaviors.
    pub duration_ms: f64,
    /// Transition curve.
    pub ease: Ease,
}

impl JoinOpts {
    /// Snap everything: used by per-frame rebuilt layers.
    pub fn immediate() -> Self {
        Self {
            enter: Enter::Immediate,
            update: Update::Immediate,
            exit: Exit::Remove,
            duration_ms: 0.0,
            ease: Ease::Linear,
        }
    }

    /// Fade in, transition, fade out over `duration_ms`.
    pub fn animated(duration_ms: f64, ease: Ease) -> Self {
        Self {
            enter: Enter::FadeIn,
            update: Update::Transition,
            exit: Exit::FadeOut,
            duration_ms,
            ease,
        }
    }
}

/// Outcome of a join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinStats {
    /// New keys.
    pub entered: usize,
    /// Surviving keys.
    pub updated: usize,
    /// Keys that started leaving.
    pub exited: usize,
}

/// The scene owned and mutated by the render pass.
#[derive(Clone, Debug)]
pub struct SceneGraph {
    viewport: Viewport,
    groups: Vec<Group>,
    surface: GroupId,
    alignment: GroupId,
    layer_groups: [GroupId; 7],
    layers: [Vec<Element>; 7],
    next_id: u64,
}

impl SceneGraph {
    /// Fixed group tree for `viewport`, with every layer empty.
    pub fn new(viewport: Viewport) -> Self {
        let mut groups = vec![
            Group {
                class: SURFACE_CLASS.to_string(),
                transform: viewport.surface_transform(),
                parent: None,
            },
            Group {
                class: ALIGNMENT_CLASS.to_string(),
                transform: viewport.plot_transform(),
                parent: Some(GroupId(0)),
            },
        ];
        let layer_groups = Layer::ALL.map(|layer| {
            groups.push(Group {
                class: layer.class_name().to_string(),
                transform: Affine::IDENTITY,
                parent: Some(GroupId(1)),
            });
            GroupId(groups.len() - 1)
        });
        Self {
            viewport,
            groups,
            surface: GroupId(0),
            alignment: GroupId(1),
            layer_groups,
            layers: Default::default(),
            next_id: 1,
        }
    }

    /// Logical space and current surface scale.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Root group.
    pub fn surface_group(&self) -> GroupId {
        self.surface
    }

    /// Group every layer hangs off.
    pub fn alignment_group(&self) -> GroupId {
        self.alignment
    }

    /// Group holding `layer`.
    pub fn layer_group(&self, layer: Layer) -> GroupId {
        self.layer_groups[layer.index()]
    }

    /// Group by id.
    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    /// Every group with its id.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    #[cfg(test)]
    pub(crate) fn set_group_transform(&mut self, id: GroupId, transform: Affine) {
        self.groups[id.0].transform = transform;
    }

    /// Move `id` under `parent`. Rejects moves that would put `id` on its own ancestor chain.
    #[cfg(test)]
    pub(crate) fn reparent_group(&mut self, id: GroupId, parent: GroupId) -> MorphResult<()> {
        if id == self.surface {
            return Err(MorphError::evaluation("cannot reparent the surface group"));
        }
        let mut cur = Some(parent);
        while let Some(g) = cur {
            if g == id {
                return Err(MorphError::evaluation(format!(
                    "reparenting {} would create a cycle",
                    self.groups[id.0].class
                )));
            }
            cur = self.groups[g.0].parent;
        }
        self.groups[id.0].parent = Some(parent);
        Ok(())
    }

    /// Update viewport scale; the logical coordinate space is unchanged.
    pub fn set_surface_scale(&mut self, scale: f64) {
        self.viewport.scale = scale;
        self.groups[self.surface.0].transform = self.viewport.surface_transform();
    }

    /// Elements of `layer` in paint order.
    pub fn elements(&self, layer: Layer) -> &[Element] {
        &self.layers[layer.index()]
    }

    /// Element of `layer` keyed `key`.
    pub fn element(&self, layer: Layer, key: &ElementKey) -> Option<&Element> {
        self.layers[layer.index()].iter().find(|e| &e.key == key)
    }

    #[cfg(test)]
    pub(crate) fn set_element_transform(
        &mut self,
        layer: Layer,
        key: &ElementKey,
        transform: Affine,
    ) -> bool {
        match self.layers[layer.index()].iter_mut().find(|e| &e.key == key) {
            Some(e) => {
                e.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Elements across all layers, exiting ones included.
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    /// Remove every element of `layer`; returns how many were removed.
    pub fn clear_layer(&mut self, layer: Layer) -> usize {
        let n = self.layers[layer.index()].len();
        self.layers[layer.index()].clear();
        n
    }

    /// Clear elements according to `policy`, comparing layer group class names.
    pub fn clear(&mut self, policy: ClearPolicy) -> usize {
        let mut removed = 0;
        for layer in Layer::ALL {
            let class = self.group(self.layer_group(layer)).class.as_str();
            let keep = match policy {
                ClearPolicy::Full => false,
                ClearPolicy::RetainTransitionLayers => RETAINED_CLASSES.contains(&class),
            };
            if !keep {
                removed += self.clear_layer(layer);
            }
        }
        removed
    }

    /// Keyed reconciliation of `layer` against `specs`.
    ///
    /// Existing elements whose key reappears keep their [`ElementId`]. Keys missing from
    /// `specs` exit per `opts.exit`.
    pub fn join(
        &mut self,
        layer: Layer,
        specs: Vec<ElementSpec>,
        opts: JoinOpts,
        now_ms: f64,
    ) -> JoinStats {
        let mut stats = JoinStats::default();
        let old = std::mem::take(&mut self.layers[layer.index()]);
        let mut by_key: BTreeMap<ElementKey, Element> =
            old.into_iter().map(|e| (e.key.clone(), e)).collect();

        let mut next: Vec<Element> = Vec::with_capacity(specs.len());
        for spec in specs {
            let target = spec.attrs;
            match by_key.remove(&spec.key) {
                Some(mut el) => {
                    el.class = spec.class;
                    el.primitive = spec.primitive;
                    el.style = spec.style;
                    el.datum = spec.datum;
                    let revived = std::mem::replace(&mut el.exiting, false);
                    match opts.update {
                        Update::Immediate => el.attrs.set(target),
                        Update::Transition => {
                            if revived {
                                // Force a fresh run back from the fading state.
                                let current = *el.attrs.current();
                                el.attrs.set(current);
                            }
                            el.attrs
                                .transition_to(target, now_ms, opts.duration_ms, opts.ease)
                        }
                    }
                    stats.updated += 1;
                    next.push(el);
                }
                None => {
                    let id = self.alloc_id();
                    let el = match opts.enter {
                        Enter::Immediate => Element::from_spec(id, spec, target),
                        Enter::FadeIn => {
                            let mut el = Element::from_spec(id, spec, target.with_opacity(0.0));
                            el.attrs
                                .transition_to(target, now_ms, opts.duration_ms, opts.ease);
                            el
                        }
                    };
                    stats.entered += 1;
                    next.push(el);
                }
            }
        }

        for (_, mut el) in by_key {
            match opts.exit {
                Exit::Remove => stats.exited += 1,
                Exit::FadeOut => {
                    if !el.exiting {
                        el.exiting = true;
                        el.hover = None;
                        let faded = el.attrs.current().with_opacity(0.0);
                        el.attrs
                            .transition_to(faded, now_ms, opts.duration_ms, opts.ease);
                        stats.exited += 1;
                    }
                    next.push(el);
                }
            }
        }

        self.layers[layer.index()] = next;
        stats
    }

    /// Advance element transitions and drop exited elements whose fade finished.
    pub fn advance(&mut self, now_ms: f64) {
        for layer in &mut self.layers {
            for el in layer.iter_mut() {
                el.attrs.advance(now_ms);
            }
            layer.retain(|el| !(el.exiting && !el.attrs.is_running()));
        }
    }

    /// Some element transition is running.
    pub fn is_animating(&self) -> bool {
        self.layers
            .iter()
            .any(|l| l.iter().any(|e| e.attrs.is_running()))
    }

    /// Topmost live, visible element of `layer` under `p` (alignment-group coordinates).
    ///
    /// Elements whose baseline opacity is zero are not hit, so a pointer over a marker that has
    /// not faded in yet falls through to the layer below.
    pub fn hit_test(&self, layer: Layer, p: Point) -> Option<&Element> {
        self.layers[layer.index()]
            .iter()
            .rev()
            .find(|e| e.is_interactive() && e.contains(p))
    }

    /// Hover the element keyed `key` and clear hover on the rest of `layer`. Returns `false`
    /// when no interactive element carries the key.
    pub fn set_hover(&mut self, layer: Layer, key: &ElementKey, hover: HoverOverride) -> bool {
        let mut found = false;
        for el in self.layers[layer.index()].iter_mut() {
            if &el.key == key && el.is_interactive() {
                el.hover = Some(hover);
                found = true;
            } else {
                el.hover = None;
            }
        }
        found
    }

    /// Drop every hover override.
    pub fn clear_hover(&mut self) {
        for layer in &mut self.layers {
            for el in layer.iter_mut() {
                el.hover = None;
            }
        }
    }

    /// Product of group transforms from the surface down to `id`.
    pub fn group_effective_transform(&self, id: GroupId) -> Affine {
        let mut chain = Vec::new();
        let mut cur = Some(id);
        while let Some(g) = cur {
            chain.push(self.groups[g.0].transform);
            cur = self.groups[g.0].parent;
        }
        chain.iter().rev().fold(Affine::IDENTITY, |acc, t| acc * *t)
    }

    /// Effective transform of an element, including its own transform.
    pub fn effective_transform(&self, layer: Layer, key: &ElementKey) -> Option<Affine> {
        let el = self.element(layer, key)?;
        Some(self.group_effective_transform(self.layer_group(layer)) * el.transform)
    }

    /// Map a point from surface (physical) space into alignment-group coordinates.
    pub fn to_plot_space(&self, physical: Point) -> Point {
        self.group_effective_transform(self.alignment).inverse() * physical
    }

    /// Check that every primitive shares the alignment group's coordinate frame.
    ///
    /// Each layer must be a direct child of the alignment group with an identity transform,
    /// every element must have an identity transform, and one representative element per
    /// layer must resolve to the same effective matrix as the alignment group itself.
    pub fn verify_alignment(&self) -> MorphResult<()> {
        let frame = self.group_effective_transform(self.alignment);
        for layer in Layer::ALL {
            let gid = self.layer_group(layer);
            let group = self.group(gid);
            if group.parent != Some(self.alignment) {
                return Err(MorphError::evaluation(format!(
                    "{} is not a direct child of the alignment group",
                    group.class
                )));
            }
            if group.transform != Affine::IDENTITY {
                return Err(MorphError::evaluation(format!(
                    "{} carries its own transform {:?}",
                    group.class,
                    group.transform.as_coeffs()
                )));
            }
            let elements = self.elements(layer);
            if let Some(el) = elements.iter().find(|e| e.transform != Affine::IDENTITY) {
                return Err(MorphError::evaluation(format!(
                    "element {} in {} carries its own transform",
                    el.key, group.class
                )));
            }
            if let Some(rep) = elements.first() {
                let eff = self.group_effective_transform(gid) * rep.transform;
                if !affine_close(eff, frame) {
                    return Err(MorphError::evaluation(format!(
                        "element {} in {} resolves to {:?}, alignment frame is {:?}",
                        rep.key,
                        group.class,
                        eff.as_coeffs(),
                        frame.as_coeffs()
                    )));
                }
            }
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn affine_close(a: Affine, b: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| approx_eq(*x, *y, 1e-9))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
