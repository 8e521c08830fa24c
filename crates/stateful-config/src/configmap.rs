//! Bridge to the platform's key-value configuration resource.
//!
//! The resource itself is stored and fetched elsewhere; here it is just
//! its string data map.

use std::collections::BTreeMap;

use tracing::debug;

use crate::defaults::build_defaults;
use crate::error::ConfigResult;
use crate::model::ServiceConfig;
use crate::overlay::resolve;
use crate::template::render_example_document;

/// Key under which the configuration document is stored.
pub const CONFIG_KEY: &str = "config.yaml";

/// Seed the resource data with the commented example document.
pub fn seed_example(data: &mut BTreeMap<String, String>) {
    data.insert(CONFIG_KEY.to_string(), render_example_document().to_string());
}

/// Resolve the configuration stored in the resource data.
///
/// A missing document resolves to the defaults.
pub fn resolve_from_data(data: &BTreeMap<String, String>) -> ConfigResult<ServiceConfig> {
    match data.get(CONFIG_KEY) {
        Some(document) => resolve(document),
        None => {
            debug!(key = CONFIG_KEY, "no configuration document, using defaults");
            Ok(build_defaults())
        }
    }
}
