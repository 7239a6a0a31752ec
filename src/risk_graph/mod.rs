//! Dependency risk domain: package coordinates, severity scoring,
//! per-package aggregation, and graph assembly.

pub mod domain;
pub mod services;
