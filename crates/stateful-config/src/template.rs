//! Commented example document.
//!
//! Seeded into the persisted configuration so operators can find a
//! setting, uncomment it and change it. Every setting is commented out,
//! so the document resolves to the defaults.
//!
//! No line may end in whitespace: the platform only renders the text as
//! a YAML block scalar when that holds, and otherwise escapes it into a
//! single quoted line.

const EXAMPLE_DOCUMENT: &str = "\
# Autoscaler settings
autoscaler:

  # Turn the autoscaler on or off
  # enabled: true

  # Never scale below this many replicas
  # minReplicas: 1

  # Never scale above this many replicas
  # maxReplicas: 10

  # Target average CPU utilization, as a percentage of the CPU request.
  # The autoscaler adds or removes replicas to stay near this value.
  # cpuUtilizationThreshold: 80

# Proxy settings
proxy:

  # Proxy image. Leave unset to use the image chosen for the configured
  # state store.
  # image: registry.example.com/stateful-proxy-postgres:1.0.0

  # When to pull the proxy image (Always, IfNotPresent or Never)
  # imagePullPolicy: IfNotPresent

  # Proxy container resources
  resources:

    # CPU request
    # cpuRequest: 400m

    # CPU limit. Unset by default; a CPU limit usually hurts latency.
    # cpuLimit:

    # Memory request
    # memoryRequest: 512Mi

    # Memory limit
    # memoryLimit: 512Mi

  # Initial JVM heap size for the proxy
  # initialHeapSize: 256m

  # Maximum JVM heap size for the proxy
  # maxHeapSize: 256m

# User function settings
userFunction:

  # User function container resources
  resources:

    # CPU request
    # cpuRequest: 400m

    # CPU limit. Unset by default; a CPU limit usually hurts latency.
    # cpuLimit:

    # Memory request
    # memoryRequest: 512Mi

    # Memory limit
    # memoryLimit: 512Mi
";

/// The example document, with every setting commented out.
pub fn render_example_document() -> &'static str {
    EXAMPLE_DOCUMENT
}
