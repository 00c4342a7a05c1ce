//! NestJS artifact generation from the entity model.
//!
//! One module per artifact kind. Each generator is a pure function from
//! an entity (plus configuration and layout) to file content; nothing in
//! here touches the sink. The emitted template shapes are load-bearing:
//! the patch engine in `crate::patch` matches literal anchors against
//! these exact shapes when it retrofits relations into generated files,
//! so template changes and `patch::anchors` must move together.

pub mod contract;
pub mod controller;
pub mod dto;
pub mod entity;
pub mod layout;
pub mod mapper;
pub mod module;
pub mod project;
pub mod repository;
pub mod schema;
pub mod service;
pub mod usecase;

/// First line of every generated file. Doubles as a stable insertion
/// anchor for retrofitted import lines.
pub const FILE_BANNER: &str = "// Generated by nestforge\n";

/// Generated files, path → content pairs in emission order.
pub struct GeneratedCode {
    pub files: Vec<(String, String)>,
}
