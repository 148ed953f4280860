//! The resource generation walk.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use bridge_config::{ArtifactResolver, GeneratorDocument};
use bridge_model::{ArtifactCarrier, TopologyModel};

use crate::error::{GenerateError, GenerateResult};

/// Walks the topology tree and attaches the resolved artifacts to every
/// node that opts in with a resource map key.
///
/// The walk is single-threaded and accumulate-only: running it twice over
/// the same model appends a second set of attachments rather than
/// replacing the first. Cancellation is checked once per application, so
/// a request can be observed with latency proportional to one
/// application's artifact count; nodes processed before the cancellation
/// keep their attachments.
#[derive(Debug, Default)]
pub struct ResourceGenerator;

impl ResourceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Resolves artifacts for every node of the model.
    ///
    /// A model without a message bus is not an error; the walk logs a
    /// warning and returns successfully with nothing populated.
    pub fn generate(
        &self,
        model: &mut TopologyModel,
        documents: &[GeneratorDocument],
        token: &CancellationToken,
    ) -> GenerateResult<()> {
        let target_variant = model.target_variant.as_str();
        let deployment_environment = model.deployment_environment.clone();
        let resolver = ArtifactResolver::new(documents);

        let Some(bus) = model.message_bus.as_mut() else {
            warn!("Topology model has no message bus; no resources generated");
            return Ok(());
        };

        populate(&resolver, target_variant, &deployment_environment, bus)?;

        for application in &mut bus.applications {
            if token.is_cancelled() {
                debug!("Generation cancelled before application '{}'", application.name);
                return Err(GenerateError::Cancelled);
            }

            populate(&resolver, target_variant, &deployment_environment, application)?;

            for message in &mut application.messages {
                populate(&resolver, target_variant, &deployment_environment, message)?;
            }
            for channel in &mut application.channels {
                populate(&resolver, target_variant, &deployment_environment, channel)?;
            }
            for intermediary in &mut application.intermediaries {
                populate(&resolver, target_variant, &deployment_environment, intermediary)?;
            }
            for endpoint in &mut application.endpoints {
                populate(&resolver, target_variant, &deployment_environment, endpoint)?;
            }
        }

        Ok(())
    }
}

/// Resolves and appends the artifacts for a single node.
///
/// A node without a resource map key legitimately produces no artifacts;
/// a key that no document defines is downgraded to a warning. Malformed
/// definitions abort the walk.
fn populate(
    resolver: &ArtifactResolver<'_>,
    target_variant: &str,
    deployment_environment: &str,
    node: &mut dyn ArtifactCarrier,
) -> GenerateResult<()> {
    let Some(map_key) = node.resource_map_key().map(String::from) else {
        debug!(
            "No resource map key on {} '{}', skipping",
            node.kind(),
            node.name()
        );
        return Ok(());
    };

    debug!("Loading target resources for '{}'", node.key());

    match resolver.resolve(&map_key, target_variant, deployment_environment) {
        Ok(resolved) => {
            node.resources_mut().extend(resolved.templates);
            node.snippets_mut().extend(resolved.snippets);
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            warn!(
                "Resource map '{}' referenced by '{}' is missing from configuration",
                map_key,
                node.name()
            );
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
