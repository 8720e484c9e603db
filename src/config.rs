use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap as Map;

/// Input for one "new app from source" build. The console collects these
/// fields from the user and hands the whole thing over in one call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Base name for every generated object, also the image tag base and
    /// the `app` label value.
    pub name: String,

    /// Source repository URI.
    pub repository: String,

    /// Branch or tag to build. Empty means "master".
    #[serde(default)]
    pub git_ref: String,

    /// Subdirectory of the repository to build from. Empty means the root.
    #[serde(default)]
    pub context_dir: String,

    /// The builder image tag the build runs on top of.
    pub image_stream_tag: ImageStreamTagRef,
}

impl AppConfig {
    pub fn from_json(value: Value) -> Result<AppConfig> {
        let config = serde_json::from_value(value)?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<AppConfig> {
        let config = serde_yaml::from_str(text)?;
        Ok(config)
    }

    pub fn git_ref_or_default(&self) -> &str {
        if self.git_ref.is_empty() {
            "master"
        } else {
            &self.git_ref
        }
    }
}

/// The slice of an image stream tag the builder reads. The full object is
/// owned by the image metadata provider; everything below `metadata` is
/// optional here so partial payloads deserialize without fuss.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageStreamTagRef {
    pub metadata: TagMetadata,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TagImage>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TagMetadata {
    pub name: String,
    pub namespace: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TagImage {
    #[serde(
        rename = "dockerImageMetadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub docker_image_metadata: Option<DockerImageMetadata>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DockerImageMetadata {
    #[serde(rename = "Config", default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ImageConfig>,

    #[serde(
        rename = "ContainerConfig",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub container_config: Option<ImageConfig>,
}

/// Exposed-port keys look like "8080/tcp"; the mapped values carry no
/// information, only the keys matter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(
        rename = "ExposedPorts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exposed_ports: Option<Map<String, Value>>,
}

impl ImageStreamTagRef {
    /// Resolves the exposed-ports mapping, preferring the image config over
    /// the container config. A present-but-empty mapping does not fall
    /// through to the container config.
    pub fn exposed_ports(&self) -> Option<&Map<String, Value>> {
        let metadata = self
            .image
            .as_ref()
            .and_then(|image| image.docker_image_metadata.as_ref())?;

        metadata
            .config
            .as_ref()
            .and_then(|config| config.exposed_ports.as_ref())
            .or_else(|| {
                metadata
                    .container_config
                    .as_ref()
                    .and_then(|config| config.exposed_ports.as_ref())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_a_console_payload() {
        let config = AppConfig::from_json(json!({
            "name": "myapp",
            "repository": "https://example.com/r.git",
            "imageStreamTag": {
                "metadata": {"name": "node", "namespace": "openshift"},
                "image": {
                    "dockerImageMetadata": {
                        "Config": {"ExposedPorts": {"8080/tcp": {}}}
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(config.name, "myapp");
        assert_eq!(config.git_ref, "");
        assert_eq!(config.git_ref_or_default(), "master");
        assert_eq!(config.image_stream_tag.metadata.namespace, "openshift");

        let ports = config.image_stream_tag.exposed_ports().unwrap();
        assert!(ports.contains_key("8080/tcp"));
    }

    #[test]
    fn falls_back_to_the_container_config_ports() {
        let tag: ImageStreamTagRef = serde_json::from_value(json!({
            "metadata": {"name": "node", "namespace": "openshift"},
            "image": {
                "dockerImageMetadata": {
                    "ContainerConfig": {"ExposedPorts": {"9000/udp": {}}}
                }
            }
        }))
        .unwrap();

        let ports = tag.exposed_ports().unwrap();
        assert!(ports.contains_key("9000/udp"));
    }

    #[test]
    fn empty_image_config_ports_do_not_fall_through() {
        let tag: ImageStreamTagRef = serde_json::from_value(json!({
            "metadata": {"name": "node", "namespace": "openshift"},
            "image": {
                "dockerImageMetadata": {
                    "Config": {"ExposedPorts": {}},
                    "ContainerConfig": {"ExposedPorts": {"9000/udp": {}}}
                }
            }
        }))
        .unwrap();

        let ports = tag.exposed_ports().unwrap();
        assert!(ports.is_empty());
    }

    #[test]
    fn tolerates_missing_image_metadata() {
        let tag: ImageStreamTagRef = serde_json::from_value(json!({
            "metadata": {"name": "node", "namespace": "openshift"}
        }))
        .unwrap();

        assert!(tag.exposed_ports().is_none());
    }

    #[test]
    fn reads_a_yaml_payload() {
        let config = AppConfig::from_yaml(
            r#"
name: myapp
repository: https://example.com/r.git
gitRef: develop
contextDir: web
imageStreamTag:
  metadata:
    name: node
    namespace: openshift
"#,
        )
        .unwrap();

        assert_eq!(config.git_ref_or_default(), "develop");
        assert_eq!(config.context_dir, "web");
    }
}
