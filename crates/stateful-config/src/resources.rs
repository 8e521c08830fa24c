//! Translate resource sizing into scheduler requests and limits.

use std::collections::BTreeMap;

use serde::Serialize;
use stateful_quantity::Quantity;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{ProxyConfig, ResourceConfig, UserFunctionConfig};

/// A schedulable resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceName {
    Cpu,
    Memory,
}

/// Quantities keyed by resource kind. A missing key means no entry, which
/// is different from an entry of zero.
pub type ResourceList = BTreeMap<ResourceName, Quantity>;

/// Requests and limits for one container.
///
/// `requests` always holds CPU and memory. `limits` always holds memory
/// and holds CPU only when a CPU limit was configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRequirements {
    pub requests: ResourceList,
    pub limits: ResourceList,
}

impl ResourceRequirements {
    pub fn request(&self, name: ResourceName) -> Option<&Quantity> {
        self.requests.get(&name)
    }

    pub fn limit(&self, name: ResourceName) -> Option<&Quantity> {
        self.limits.get(&name)
    }
}

fn parse_field(field: &'static str, raw: &str) -> ConfigResult<Quantity> {
    Quantity::parse(raw).map_err(|source| ConfigError::Quantity {
        field,
        raw: raw.to_string(),
        source,
    })
}

impl ResourceConfig {
    /// Parse every quantity and assemble requests and limits.
    ///
    /// The first field that fails to parse is reported; no partial
    /// result is returned.
    pub fn to_resource_requirements(&self) -> ConfigResult<ResourceRequirements> {
        let cpu_request = parse_field("cpuRequest", &self.cpu_request)?;
        let memory_request = parse_field("memoryRequest", &self.memory_request)?;
        let memory_limit = parse_field("memoryLimit", &self.memory_limit)?;

        let mut requirements = ResourceRequirements {
            requests: BTreeMap::from([
                (ResourceName::Cpu, cpu_request),
                (ResourceName::Memory, memory_request),
            ]),
            limits: BTreeMap::from([(ResourceName::Memory, memory_limit)]),
        };
        if let Some(cpu_limit) = &self.cpu_limit {
            let cpu_limit = parse_field("cpuLimit", cpu_limit)?;
            requirements.limits.insert(ResourceName::Cpu, cpu_limit);
        }
        Ok(requirements)
    }
}

impl ProxyConfig {
    pub fn resource_requirements(&self) -> ConfigResult<ResourceRequirements> {
        self.resources.to_resource_requirements()
    }
}

impl UserFunctionConfig {
    pub fn resource_requirements(&self) -> ConfigResult<ResourceRequirements> {
        self.resources.to_resource_requirements()
    }
}
