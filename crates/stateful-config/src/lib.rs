//! stateful-config — layered configuration for stateful services.
//!
//! Resolves the configuration of a managed stateful service from
//! hardcoded defaults plus a partial, operator-edited YAML document, and
//! translates its resource sizing into scheduler requests and limits.
//!
//! # Resolution
//!
//! ```text
//! build_defaults()             complete baseline, built as values
//!     │
//!     ▼
//! merge_overlay(doc)           absent key  → keep
//!     │                        present key → replace (even false/0/"")
//!     │                        null on image/cpuLimit → clear
//!     ▼
//! ServiceConfig                immutable snapshot for the caller
//!     │
//!     ▼
//! to_resource_requirements()   requests {cpu, memory}
//!                              limits   {memory, cpu only if configured}
//! ```
//!
//! # Components
//!
//! - **`defaults`** — the baseline configuration
//! - **`overlay`** — partial-document merge with tri-state optional fields
//! - **`resources`** — quantity validation and request/limit assembly
//! - **`template`** — the commented example document for operators
//! - **`configmap`** — reading and seeding the stored document by key

pub mod configmap;
pub mod defaults;
pub mod error;
pub mod model;
pub mod overlay;
pub mod resources;
pub mod template;

pub use configmap::{CONFIG_KEY, resolve_from_data, seed_example};
pub use defaults::build_defaults;
pub use error::{ConfigError, ConfigResult};
pub use model::*;
pub use overlay::{Patch, merge_overlay, resolve};
pub use resources::{ResourceList, ResourceName, ResourceRequirements};
pub use template::render_example_document;
