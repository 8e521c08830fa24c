//! Overlay merge — apply a partial document onto a resolved configuration.
//!
//! The document is first read into an *overlay* mirror of the model in
//! which every field records whether the document mentioned it:
//!
//! - mandatory fields and nested sections are `Option<T>`: `None` when
//!   the key is absent or null, so the target keeps its value;
//! - optional fields (`image`, `cpuLimit`) are [`Patch<T>`], which also
//!   distinguishes an explicit null (clear the field) from absence.
//!
//! The overlay is then applied section by section, so a partial section
//! never disturbs siblings it does not name. Nothing is written to the
//! target until the whole document has parsed.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::defaults::build_defaults;
use crate::error::ConfigResult;
use crate::model::*;

/// A change to an optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was not in the document; keep the current value.
    Unset,
    /// The key was present with a null value; clear the field.
    Cleared,
    /// The key was present with a value; replace the field.
    Value(T),
}

impl<T> Patch<T> {
    /// Apply the change to `slot`. Returns whether `slot` was written.
    pub fn apply_to(self, slot: &mut Option<T>) -> bool {
        match self {
            Patch::Unset => false,
            Patch::Cleared => {
                *slot = None;
                true
            }
            Patch::Value(value) => {
                *slot = Some(value);
                true
            }
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Unset => Patch::Unset,
            Patch::Cleared => Patch::Cleared,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unset
    }
}

// Only reached when the key is present; absence comes from `#[serde(default)]`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Cleared,
            Some(value) => Patch::Value(value),
        })
    }
}

/// A scalar read as text.
///
/// Operators write `cpuLimit: 1` as often as `cpuLimit: "1"`; both mean
/// the string `1`. Booleans are kept as their text too.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scalar")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        scalar.0
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ServiceConfigOverlay {
    autoscaler: Option<AutoscalerOverlay>,
    proxy: Option<ProxyOverlay>,
    user_function: Option<UserFunctionOverlay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AutoscalerOverlay {
    enabled: Option<bool>,
    min_replicas: Option<i32>,
    max_replicas: Option<i32>,
    cpu_utilization_threshold: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProxyOverlay {
    image: Patch<Scalar>,
    image_pull_policy: Option<ImagePullPolicy>,
    resources: Option<ResourceOverlay>,
    initial_heap_size: Option<Scalar>,
    max_heap_size: Option<Scalar>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UserFunctionOverlay {
    resources: Option<ResourceOverlay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ResourceOverlay {
    cpu_request: Option<Scalar>,
    cpu_limit: Patch<Scalar>,
    memory_request: Option<Scalar>,
    memory_limit: Option<Scalar>,
}

/// Overwrite `slot` if the document supplied a value.
fn set<T, V: Into<T>>(slot: &mut T, value: Option<V>, section: &str, field: &str) {
    if let Some(value) = value {
        trace!(section, field, "overlay sets field");
        *slot = value.into();
    }
}

/// Apply an optional-field patch to `slot`.
fn patch(slot: &mut Option<String>, value: Patch<Scalar>, section: &str, field: &str) {
    let cleared = matches!(value, Patch::Cleared);
    if value.map(|scalar| scalar.0).apply_to(slot) {
        trace!(section, field, cleared, "overlay patches optional field");
    }
}

impl ServiceConfigOverlay {
    fn apply(self, target: &mut ServiceConfig) {
        if let Some(autoscaler) = self.autoscaler {
            autoscaler.apply(&mut target.autoscaler);
        }
        if let Some(proxy) = self.proxy {
            proxy.apply(&mut target.proxy);
        }
        if let Some(user_function) = self.user_function {
            user_function.apply(&mut target.user_function);
        }
    }
}

impl AutoscalerOverlay {
    fn apply(self, target: &mut AutoscalerConfig) {
        const SECTION: &str = "autoscaler";
        set(&mut target.enabled, self.enabled, SECTION, "enabled");
        set(&mut target.min_replicas, self.min_replicas, SECTION, "minReplicas");
        set(&mut target.max_replicas, self.max_replicas, SECTION, "maxReplicas");
        set(
            &mut target.cpu_utilization_threshold,
            self.cpu_utilization_threshold,
            SECTION,
            "cpuUtilizationThreshold",
        );
    }
}

impl ProxyOverlay {
    fn apply(self, target: &mut ProxyConfig) {
        const SECTION: &str = "proxy";
        patch(&mut target.image, self.image, SECTION, "image");
        if let Some(policy) = self.image_pull_policy {
            trace!(
                section = SECTION,
                field = "imagePullPolicy",
                policy = policy.as_str(),
                "overlay sets field"
            );
            target.image_pull_policy = policy;
        }
        if let Some(resources) = self.resources {
            resources.apply(&mut target.resources, "proxy.resources");
        }
        set(
            &mut target.initial_heap_size,
            self.initial_heap_size,
            SECTION,
            "initialHeapSize",
        );
        set(&mut target.max_heap_size, self.max_heap_size, SECTION, "maxHeapSize");
    }
}

impl UserFunctionOverlay {
    fn apply(self, target: &mut UserFunctionConfig) {
        if let Some(resources) = self.resources {
            resources.apply(&mut target.resources, "userFunction.resources");
        }
    }
}

impl ResourceOverlay {
    fn apply(self, target: &mut ResourceConfig, section: &str) {
        set(&mut target.cpu_request, self.cpu_request, section, "cpuRequest");
        patch(&mut target.cpu_limit, self.cpu_limit, section, "cpuLimit");
        set(&mut target.memory_request, self.memory_request, section, "memoryRequest");
        set(&mut target.memory_limit, self.memory_limit, section, "memoryLimit");
    }
}

/// True when the document holds nothing but blank lines, comments and
/// document markers.
fn has_no_settings(document: &str) -> bool {
    document.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Drop every mapping entry whose key is not a string.
///
/// Keys such as `true:`, `null:` or `0:` can never name a setting, so
/// they are unknown keys like any other.
fn retain_string_keys(value: &mut serde_yaml::Value) {
    match value {
        serde_yaml::Value::Mapping(mapping) => {
            mapping.retain(|key, _| key.is_string());
            for (_, nested) in mapping.iter_mut() {
                retain_string_keys(nested);
            }
        }
        serde_yaml::Value::Sequence(items) => items.iter_mut().for_each(retain_string_keys),
        serde_yaml::Value::Tagged(tagged) => retain_string_keys(&mut tagged.value),
        _ => {}
    }
}

/// Merge a partial YAML document onto `target` in place.
///
/// Keys absent from the document leave `target` untouched. Keys present
/// replace the target value, even with `false`, `0` or `""`. For the
/// optional fields `image` and `cpuLimit`, an explicit null clears the
/// field. Unknown keys are ignored.
///
/// On error the caller should discard `target`; this implementation
/// happens to leave it unmodified, but callers must not rely on that.
pub fn merge_overlay(target: &mut ServiceConfig, document: &str) -> ConfigResult<()> {
    if has_no_settings(document) {
        debug!("overlay document has no settings");
        return Ok(());
    }
    // Only the first document of a multi-document stream is read.
    let Some(first) = serde_yaml::Deserializer::from_str(document).next() else {
        debug!("overlay document is empty");
        return Ok(());
    };
    let mut value = serde_yaml::Value::deserialize(first)?;
    if value.is_null() {
        debug!("overlay document is null");
        return Ok(());
    }
    retain_string_keys(&mut value);
    let overlay: ServiceConfigOverlay = serde_yaml::from_value(value)?;
    overlay.apply(target);
    Ok(())
}

/// Build the defaults and merge `document` onto them.
pub fn resolve(document: &str) -> ConfigResult<ServiceConfig> {
    let mut config = build_defaults();
    merge_overlay(&mut config, document)?;
    debug!(
        autoscaler_enabled = config.autoscaler.enabled,
        proxy_image_override = config.proxy.image.is_some(),
        "resolved service configuration"
    );
    Ok(config)
}
