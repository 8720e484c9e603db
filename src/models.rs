//! API object shapes for the resources the builder emits. Only the fields
//! the builder fills in are modeled; the cluster fills in the rest on
//! submission.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap as Map;

use crate::ports::ContainerPort;

/// One generated resource, in the order the builder emits them.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ApiObject {
    ImageStream(ImageStream),
    BuildConfig(BuildConfig),
    DeploymentConfig(DeploymentConfig),
    Service(Service),
    Route(Route),
}

impl ApiObject {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiObject::ImageStream(_) => "ImageStream",
            ApiObject::BuildConfig(_) => "BuildConfig",
            ApiObject::DeploymentConfig(_) => "DeploymentConfig",
            ApiObject::Service(_) => "Service",
            ApiObject::Route(_) => "Route",
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ApiObject::ImageStream(object) => &object.metadata,
            ApiObject::BuildConfig(object) => &object.metadata,
            ApiObject::DeploymentConfig(object) => &object.metadata,
            ApiObject::Service(object) => &object.metadata,
            ApiObject::Route(object) => &object.metadata,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub labels: Map<String, String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub annotations: Map<String, String>,
}

/// Reference to another object, e.g. the ImageStreamTag a build pulls its
/// builder image from or pushes its output to.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub kind: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStream {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: BuildConfigSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigSpec {
    pub output: BuildOutput,
    pub source: BuildSource,
    pub strategy: BuildStrategy,
    pub triggers: Vec<BuildTrigger>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    pub to: ObjectReference,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSource {
    #[serde(rename = "type")]
    pub source_type: String,

    pub git: GitBuildSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_dir: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GitBuildSource {
    pub uri: String,

    #[serde(rename = "ref")]
    pub git_ref: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStrategy {
    #[serde(rename = "type")]
    pub strategy_type: String,

    pub source_strategy: SourceBuildStrategy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBuildStrategy {
    pub from: ObjectReference,
}

/// Build triggers serialize with a `type` discriminator next to an
/// optional trigger-specific body, matching the wire shape:
/// `{"type": "Generic", "generic": {"secret": "..."}}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildTrigger {
    ImageChange {
        #[serde(rename = "imageChange")]
        image_change: ImageChangeTrigger,
    },
    ConfigChange,
    Generic {
        generic: WebhookTrigger,
    },
    GitHub {
        github: WebhookTrigger,
    },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageChangeTrigger {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WebhookTrigger {
    pub secret: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: DeploymentConfigSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    pub replicas: u32,
    pub selector: Map<String, String>,
    pub triggers: Vec<DeploymentTrigger>,
    pub template: PodTemplate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DeploymentTrigger {
    ImageChange {
        #[serde(rename = "imageChangeParams")]
        image_change_params: ImageChangeParams,
    },
    ConfigChange,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageChangeParams {
    pub automatic: bool,
    pub container_names: Vec<String>,
    pub from: ObjectReference,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplate {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    pub containers: Vec<Container>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    pub image: String,
    pub ports: Vec<ContainerPort>,
    pub env: Vec<EnvVar>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    pub selector: Map<String, String>,
    pub ports: Vec<ServicePort>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    pub name: String,
    pub port: u16,
    pub target_port: u16,
    pub protocol: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: RouteSpec,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    pub to: ObjectReference,
    pub port: RoutePort,
    pub wildcard_policy: String,
}

/// Routes address the service port by name so a renamed or renumbered
/// container port can't silently break the route.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePort {
    pub target_port: String,
}
