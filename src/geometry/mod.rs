/// Centroids and boundary adjacency precomputed per load.
pub mod index;
