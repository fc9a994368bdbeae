/// Visual primitives and their animatable attributes.
pub mod element;
/// Layered scene graph, keyed join, and the alignment group.
pub mod graph;
/// PNG rasterization of exported scenes.
pub mod raster;
/// SVG export.
pub mod svg;
