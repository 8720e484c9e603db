use std::collections::BTreeMap as Map;

use crate::{
    config::AppConfig,
    models::{
        ApiObject, BuildConfig, BuildConfigSpec, BuildOutput, BuildSource, BuildStrategy,
        BuildTrigger, Container, DeploymentConfig, DeploymentConfigSpec, DeploymentTrigger,
        GitBuildSource, ImageChangeParams, ImageChangeTrigger, ImageStream, ObjectMeta,
        ObjectReference, PodSpec, PodTemplate, Route, RoutePort, RouteSpec, Service, ServicePort,
        ServiceSpec, SourceBuildStrategy, WebhookTrigger,
    },
    ports::{get_ports, ContainerPort},
    secrets::{RandomSecretSource, SecretSource},
};

const LABEL_APP: &str = "app";
const SELECTOR_DEPLOYMENT_CONFIG: &str = "deploymentconfig";

const ANNOTATION_GENERATED_BY: &str = "openshift.io/generated-by";
const GENERATED_BY: &str = "OpenShiftWebConsole";

/// Builds the API objects for one application created from source: an
/// image stream for the built image, a build config to produce it, a
/// deployment config to run it, and, when the builder image exposes a
/// port, a service and a route in front of it.
///
/// Every call builds the objects from scratch; the builder keeps no state
/// between calls beyond the secret source.
pub struct AppObjectBuilder<S = RandomSecretSource> {
    secret_source: S,
}

impl AppObjectBuilder {
    pub fn new() -> AppObjectBuilder {
        AppObjectBuilder::with_secret_source(RandomSecretSource)
    }
}

impl Default for AppObjectBuilder {
    fn default() -> AppObjectBuilder {
        AppObjectBuilder::new()
    }
}

impl<S: SecretSource> AppObjectBuilder<S> {
    pub fn with_secret_source(secret_source: S) -> AppObjectBuilder<S> {
        AppObjectBuilder { secret_source }
    }

    /// Builds the ordered object list for `config`. Always image stream,
    /// build config and deployment config, in that order; when the image
    /// exposes at least one parseable port, a service and a route for the
    /// first port follow.
    pub fn api_objects(&mut self, config: &AppConfig) -> Vec<ApiObject> {
        let ports = get_ports(&config.image_stream_tag);

        let mut objects = vec![
            ApiObject::ImageStream(self.image_stream(config)),
            ApiObject::BuildConfig(self.build_config(config)),
            ApiObject::DeploymentConfig(self.deployment_config(config, ports.clone())),
        ];

        if let Some(first_port) = ports.first() {
            objects.push(ApiObject::Service(self.service(config, first_port)));
            objects.push(ApiObject::Route(self.route(config, first_port)));
        }

        objects
    }

    fn image_stream(&self, config: &AppConfig) -> ImageStream {
        ImageStream {
            api_version: "v1".into(),
            kind: "ImageStream".into(),
            metadata: self.object_meta(config),
        }
    }

    fn build_config(&mut self, config: &AppConfig) -> BuildConfig {
        let context_dir = if config.context_dir.is_empty() {
            None
        } else {
            Some(config.context_dir.clone())
        };

        BuildConfig {
            api_version: "v1".into(),
            kind: "BuildConfig".into(),
            metadata: self.object_meta(config),
            spec: BuildConfigSpec {
                output: BuildOutput {
                    to: ObjectReference {
                        kind: "ImageStreamTag".into(),
                        name: output_image_tag(config),
                        namespace: None,
                    },
                },
                source: BuildSource {
                    source_type: "Git".into(),
                    git: GitBuildSource {
                        uri: config.repository.clone(),
                        git_ref: config.git_ref_or_default().into(),
                    },
                    context_dir,
                },
                strategy: BuildStrategy {
                    strategy_type: "Source".into(),
                    source_strategy: SourceBuildStrategy {
                        from: ObjectReference {
                            kind: "ImageStreamTag".into(),
                            name: config.image_stream_tag.metadata.name.clone(),
                            namespace: Some(config.image_stream_tag.metadata.namespace.clone()),
                        },
                    },
                },
                triggers: vec![
                    BuildTrigger::ImageChange {
                        image_change: ImageChangeTrigger::default(),
                    },
                    BuildTrigger::ConfigChange,
                    BuildTrigger::Generic {
                        generic: WebhookTrigger {
                            secret: self.secret_source.generate(),
                        },
                    },
                    BuildTrigger::GitHub {
                        github: WebhookTrigger {
                            secret: self.secret_source.generate(),
                        },
                    },
                ],
            },
        }
    }

    fn deployment_config(&self, config: &AppConfig, ports: Vec<ContainerPort>) -> DeploymentConfig {
        let mut selector = Map::new();
        selector.insert(SELECTOR_DEPLOYMENT_CONFIG.into(), config.name.clone());

        let mut app_label = Map::new();
        app_label.insert(LABEL_APP.into(), config.name.clone());

        DeploymentConfig {
            api_version: "v1".into(),
            kind: "DeploymentConfig".into(),
            metadata: self.object_meta(config),
            spec: DeploymentConfigSpec {
                replicas: 1,
                selector: selector.clone(),
                triggers: vec![
                    DeploymentTrigger::ImageChange {
                        image_change_params: ImageChangeParams {
                            automatic: true,
                            container_names: vec![config.name.clone()],
                            from: ObjectReference {
                                kind: "ImageStreamTag".into(),
                                name: output_image_tag(config),
                                namespace: None,
                            },
                        },
                    },
                    DeploymentTrigger::ConfigChange,
                ],
                template: PodTemplate {
                    metadata: ObjectMeta {
                        name: config.name.clone(),
                        labels: merge_labels(selector, app_label),
                        annotations: self.annotations(),
                    },
                    spec: PodSpec {
                        containers: vec![Container {
                            name: config.name.clone(),
                            image: output_image_tag(config),
                            ports,
                            env: Vec::new(),
                        }],
                    },
                },
            },
        }
    }

    fn service(&self, config: &AppConfig, port: &ContainerPort) -> Service {
        let mut selector = Map::new();
        selector.insert(SELECTOR_DEPLOYMENT_CONFIG.into(), config.name.clone());

        Service {
            api_version: "v1".into(),
            kind: "Service".into(),
            metadata: self.object_meta(config),
            spec: ServiceSpec {
                selector,
                ports: vec![ServicePort {
                    name: port.name(),
                    port: port.container_port,
                    target_port: port.container_port,
                    protocol: port.protocol.clone(),
                }],
            },
        }
    }

    fn route(&self, config: &AppConfig, port: &ContainerPort) -> Route {
        Route {
            api_version: "v1".into(),
            kind: "Route".into(),
            metadata: self.object_meta(config),
            spec: RouteSpec {
                to: ObjectReference {
                    kind: "Service".into(),
                    name: config.name.clone(),
                    namespace: None,
                },
                port: RoutePort {
                    target_port: port.name(),
                },
                wildcard_policy: "None".into(),
            },
        }
    }

    fn object_meta(&self, config: &AppConfig) -> ObjectMeta {
        let mut labels = Map::new();
        labels.insert(LABEL_APP.into(), config.name.clone());

        ObjectMeta {
            name: config.name.clone(),
            labels,
            annotations: self.annotations(),
        }
    }

    fn annotations(&self) -> Map<String, String> {
        let mut annotations = Map::new();
        annotations.insert(ANNOTATION_GENERATED_BY.into(), GENERATED_BY.into());
        annotations
    }
}

fn output_image_tag(config: &AppConfig) -> String {
    format!("{}:latest", config.name)
}

/// Merges two label maps. Keys already present in `base` win, so callers
/// can layer defaults under labels they must not clobber.
fn merge_labels(base: Map<String, String>, defaults: Map<String, String>) -> Map<String, String> {
    let mut merged = base;

    for (key, value) in defaults {
        merged.entry(key).or_insert(value);
    }

    merged
}
