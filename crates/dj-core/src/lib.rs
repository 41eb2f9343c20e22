#[path = "core_domain/mod.rs"]
pub mod core;
