//! Resolved configuration for a stateful service.
//!
//! These are the fully-populated values handed to the orchestration
//! layer. Every field always holds a value; the only fields that may be
//! absent are the ones where absence itself means something
//! ([`ProxyConfig::image`] and [`ResourceConfig::cpu_limit`]).

use serde::{Deserialize, Serialize};

/// Root configuration, one per stateful service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    pub autoscaler: AutoscalerConfig,
    pub proxy: ProxyConfig,
    pub user_function: UserFunctionConfig,
}

/// Horizontal autoscaling bounds and target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoscalerConfig {
    pub enabled: bool,
    pub min_replicas: i32,
    pub max_replicas: i32,
    /// Average CPU utilization, as a percentage of the CPU request, at
    /// which the autoscaler scales up or down.
    pub cpu_utilization_threshold: i32,
}

/// Settings for the proxy sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Image override. `None` lets the orchestration layer pick an image
    /// for the configured store; `Some("")` is kept as written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub image_pull_policy: ImagePullPolicy,
    pub resources: ResourceConfig,
    /// JVM initial heap, e.g. `256m`.
    pub initial_heap_size: String,
    /// JVM maximum heap, e.g. `256m`.
    pub max_heap_size: String,
}

/// Settings for the user function container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFunctionConfig {
    pub resources: ResourceConfig,
}

/// Raw resource sizing as written in the document.
///
/// Values stay as text until [`ResourceConfig::to_resource_requirements`]
/// validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    pub cpu_request: String,
    /// `None` means no CPU limit is imposed at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_limit: Option<String>,
    pub memory_request: String,
    pub memory_limit: String,
}

/// When the container runtime should pull the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImagePullPolicy {
    Always,
    IfNotPresent,
    Never,
}

impl ImagePullPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImagePullPolicy::Always => "Always",
            ImagePullPolicy::IfNotPresent => "IfNotPresent",
            ImagePullPolicy::Never => "Never",
        }
    }
}

impl ServiceConfig {
    /// Render the configuration as a YAML document in the same schema
    /// the overlay reads.
    pub fn to_yaml_string(&self) -> crate::ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_policy_wire_names() {
        assert_eq!(ImagePullPolicy::IfNotPresent.as_str(), "IfNotPresent");
        let parsed: ImagePullPolicy = serde_yaml::from_str("Never").unwrap();
        assert_eq!(parsed, ImagePullPolicy::Never);
        assert!(serde_yaml::from_str::<ImagePullPolicy>("Sometimes").is_err());
    }

    #[test]
    fn yaml_uses_camel_case_and_omits_absent_optionals() {
        let yaml = ServiceConfig::default().to_yaml_string().unwrap();
        assert!(yaml.contains("userFunction:"));
        assert!(yaml.contains("cpuUtilizationThreshold: 80"));
        assert!(yaml.contains("imagePullPolicy: IfNotPresent"));
        assert!(!yaml.contains("cpuLimit"));
        assert!(!yaml.contains("image:"));
    }
}
