use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::ImageStreamTagRef;

/// A port the builder image exposes, parsed from an image-metadata key
/// like "8080/tcp".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub container_port: u16,
    pub protocol: String,
}

impl ContainerPort {
    /// Port name shared by the Service port and the Route target, e.g.
    /// 8080/TCP becomes "8080-tcp". The same convention `oc new-app` uses,
    /// so objects from either path interoperate.
    pub fn name(&self) -> String {
        format!("{}-{}", self.container_port, self.protocol.to_lowercase())
    }
}

/// Parses the ports the image stream tag's image exposes. Tags without
/// port metadata yield an empty list.
pub fn get_ports(image_stream_tag: &ImageStreamTagRef) -> Vec<ContainerPort> {
    let mut ports = Vec::new();

    let exposed_ports = match image_stream_tag.exposed_ports() {
        Some(exposed_ports) => exposed_ports,
        None => return ports,
    };

    for port_spec in exposed_ports.keys() {
        let mut parts = port_spec.splitn(2, '/');
        let number = parts.next().unwrap_or_default();
        let protocol = parts.next().unwrap_or("tcp");

        match number.parse::<u16>() {
            Ok(container_port) => ports.push(ContainerPort {
                container_port,
                protocol: protocol.to_uppercase(),
            }),
            Err(_) => warn!(
                "skipping exposed port {:?}, the port number doesn't parse",
                port_spec
            ),
        }
    }

    ports
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tag_with_ports(exposed_ports: serde_json::Value) -> ImageStreamTagRef {
        serde_json::from_value(json!({
            "metadata": {"name": "node", "namespace": "openshift"},
            "image": {
                "dockerImageMetadata": {
                    "Config": {"ExposedPorts": exposed_ports}
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn parses_a_port_with_a_protocol() {
        let ports = get_ports(&tag_with_ports(json!({"8080/tcp": {}})));

        assert_eq!(
            ports,
            vec![ContainerPort {
                container_port: 8080,
                protocol: "TCP".into(),
            }]
        );
    }

    #[test]
    fn defaults_the_protocol_to_tcp() {
        let ports = get_ports(&tag_with_ports(json!({"8080": {}})));

        assert_eq!(
            ports,
            vec![ContainerPort {
                container_port: 8080,
                protocol: "TCP".into(),
            }]
        );
    }

    #[test]
    fn skips_ports_that_do_not_parse() {
        let ports = get_ports(&tag_with_ports(json!({"abc/tcp": {}})));

        assert!(ports.is_empty());
    }

    #[test]
    fn keeps_parseable_ports_around_a_bad_one() {
        let ports = get_ports(&tag_with_ports(json!({
            "443/tcp": {},
            "8o8o/tcp": {},
            "9000/udp": {},
        })));

        assert_eq!(
            ports,
            vec![
                ContainerPort {
                    container_port: 443,
                    protocol: "TCP".into(),
                },
                ContainerPort {
                    container_port: 9000,
                    protocol: "UDP".into(),
                },
            ]
        );
    }

    #[test]
    fn no_port_metadata_means_no_ports() {
        let tag: ImageStreamTagRef = serde_json::from_value(json!({
            "metadata": {"name": "node", "namespace": "openshift"}
        }))
        .unwrap();

        assert!(get_ports(&tag).is_empty());
    }

    #[test]
    fn names_ports_by_number_and_lowercase_protocol() {
        let port = ContainerPort {
            container_port: 8080,
            protocol: "TCP".into(),
        };

        assert_eq!(port.name(), "8080-tcp");
    }
}
