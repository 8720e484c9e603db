//! Turns a "new application from source" configuration into the cluster
//! API objects that realize it: an image stream, a build config, a
//! deployment config and, when the builder image exposes a port, a
//! service and a route.
//!
//! The crate only builds the in-memory objects; submitting them to the
//! cluster is the caller's job.
//!
//! ```
//! use newapp::{AppConfig, AppObjectBuilder};
//! use serde_json::json;
//!
//! let config = AppConfig::from_json(json!({
//!     "name": "myapp",
//!     "repository": "https://example.com/r.git",
//!     "imageStreamTag": {
//!         "metadata": {"name": "node", "namespace": "openshift"},
//!         "image": {
//!             "dockerImageMetadata": {
//!                 "Config": {"ExposedPorts": {"8080/tcp": {}}}
//!             }
//!         }
//!     }
//! }))?;
//!
//! let objects = AppObjectBuilder::new().api_objects(&config);
//! assert_eq!(objects.len(), 5);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use crate::builder::AppObjectBuilder;
pub use crate::config::{AppConfig, ImageStreamTagRef};
pub use crate::models::ApiObject;
pub use crate::ports::{get_ports, ContainerPort};
pub use crate::secrets::{RandomSecretSource, SecretSource};

mod builder;
pub mod config;
pub mod models;
pub mod ports;
pub mod secrets;
