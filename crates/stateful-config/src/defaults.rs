//! Baseline configuration.
//!
//! Defaults are built as values, never by parsing a document, so the
//! overlay always has a complete target to merge onto.

use crate::model::*;

/// Build the default configuration for a stateful service.
pub fn build_defaults() -> ServiceConfig {
    ServiceConfig::default()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            autoscaler: AutoscalerConfig::default(),
            proxy: ProxyConfig::default(),
            user_function: UserFunctionConfig::default(),
        }
    }
}

impl Default for AutoscalerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_replicas: 1,
            max_replicas: 10,
            cpu_utilization_threshold: 80,
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            image: None,
            image_pull_policy: ImagePullPolicy::default(),
            resources: ResourceConfig::default(),
            initial_heap_size: "256m".to_string(),
            max_heap_size: "256m".to_string(),
        }
    }
}

impl Default for UserFunctionConfig {
    fn default() -> Self {
        Self {
            resources: ResourceConfig::default(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            cpu_request: "400m".to_string(),
            cpu_limit: None,
            memory_request: "512Mi".to_string(),
            memory_limit: "512Mi".to_string(),
        }
    }
}

impl Default for ImagePullPolicy {
    fn default() -> Self {
        Self::IfNotPresent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autoscaler_defaults() {
        let config = build_defaults();
        assert!(config.autoscaler.enabled);
        assert_eq!(config.autoscaler.min_replicas, 1);
        assert_eq!(config.autoscaler.max_replicas, 10);
        assert_eq!(config.autoscaler.cpu_utilization_threshold, 80);
    }

    #[test]
    fn proxy_defaults() {
        let proxy = build_defaults().proxy;
        assert_eq!(proxy.image, None);
        assert_eq!(proxy.image_pull_policy, ImagePullPolicy::IfNotPresent);
        assert_eq!(proxy.initial_heap_size, "256m");
        assert_eq!(proxy.max_heap_size, "256m");
        assert_eq!(proxy.resources.cpu_request, "400m");
        assert_eq!(proxy.resources.cpu_limit, None);
        assert_eq!(proxy.resources.memory_request, "512Mi");
        assert_eq!(proxy.resources.memory_limit, "512Mi");
    }

    #[test]
    fn user_function_shares_proxy_resource_shape() {
        let config = build_defaults();
        assert_eq!(config.user_function.resources, config.proxy.resources);
    }

    #[test]
    fn defaults_are_deterministic() {
        assert_eq!(build_defaults(), build_defaults());
    }
}
