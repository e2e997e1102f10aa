//! layerseg-config: configuration resolution for layer-segmentation patch collection
//!
//! A library for turning a partially specified collection configuration,
//! plus experiment overrides, into a complete and consistent configuration.
//! Geometry defaults are derived by probing the first input scan and its
//! ground truth through pluggable loaders.

pub mod config;
pub mod loader;
