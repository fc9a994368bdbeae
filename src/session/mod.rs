/// Scene configuration.
pub mod config;
/// Scene controller: steps in, frames out.
pub mod controller;
