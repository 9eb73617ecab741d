//! Service layer for protocol registration and lookup.

use crate::protocol::{
    domain::{MethodContract, ProtocolDomainError, ProtocolKey, ServiceProtocol},
    ports::{ProtocolRepository, ProtocolRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for protocol registry operations.
#[derive(Debug, Error)]
pub enum ProtocolRegistryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProtocolDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProtocolRepositoryError),
}

/// Result type for protocol registry service operations.
pub type ProtocolRegistryServiceResult<T> = Result<T, ProtocolRegistryServiceError>;

/// Protocol registration and lookup service.
#[derive(Clone)]
pub struct ProtocolRegistryService<R, C>
where
    R: ProtocolRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProtocolRegistryService<R, C>
where
    R: ProtocolRepository,
    C: Clock + Send + Sync,
{
    /// Creates a protocol registry service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a protocol, replacing any with the same service and name.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolRegistryServiceError`] when a name is blank or the
    /// repository rejects the write.
    pub async fn register(
        &self,
        service_name: &str,
        protocol_name: &str,
        methods: BTreeMap<String, MethodContract>,
    ) -> ProtocolRegistryServiceResult<ServiceProtocol> {
        let key = ProtocolKey::new(service_name, protocol_name)?;
        let protocol = ServiceProtocol::new(key, methods, self.clock.utc())?;
        let previous = self.repository.upsert(&protocol).await?;
        info!(
            protocol = %protocol.key(),
            methods = protocol.methods().len(),
            replaced = previous.is_some(),
            "service protocol registered"
        );
        Ok(protocol)
    }

    /// Finds a protocol.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolRegistryServiceError`] when a name is blank or the
    /// lookup fails.
    pub async fn get(
        &self,
        service_name: &str,
        protocol_name: &str,
    ) -> ProtocolRegistryServiceResult<Option<ServiceProtocol>> {
        let key = ProtocolKey::new(service_name, protocol_name)?;
        Ok(self.repository.find(&key).await?)
    }

    /// Lists protocols, optionally only those of one service.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolRegistryServiceError::Repository`] when the lookup
    /// fails.
    pub async fn list(
        &self,
        service_name: Option<&str>,
    ) -> ProtocolRegistryServiceResult<Vec<ServiceProtocol>> {
        Ok(self.repository.list(service_name.map(str::trim)).await?)
    }

    /// Returns the number of registered protocols.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolRegistryServiceError::Repository`] when the count
    /// fails.
    pub async fn count(&self) -> ProtocolRegistryServiceResult<usize> {
        Ok(self.repository.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProtocolRegistryService, ProtocolRegistryServiceError};
    use crate::protocol::{
        adapters::memory::InMemoryProtocolRepository,
        domain::{MethodContract, ProtocolDomainError},
    };
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    type TestService = ProtocolRegistryService<InMemoryProtocolRepository, DefaultClock>;

    #[fixture]
    fn service() -> TestService {
        ProtocolRegistryService::new(
            Arc::new(InMemoryProtocolRepository::new()),
            Arc::new(DefaultClock),
        )
    }

    fn methods(names: &[&str]) -> BTreeMap<String, MethodContract> {
        names
            .iter()
            .map(|name| {
                (
                    (*name).to_owned(),
                    MethodContract::new(json!({"type": "object"}), json!({"type": "object"})),
                )
            })
            .collect()
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn re_registering_a_protocol_replaces_its_methods(service: TestService) {
        service
            .register("FileParserService", "FileParserProtocol", methods(&["parse"]))
            .await
            .expect("first registration should succeed");
        service
            .register(
                "FileParserService",
                "FileParserProtocol",
                methods(&["parse", "detect"]),
            )
            .await
            .expect("second registration should succeed");

        let stored = service
            .get("FileParserService", "FileParserProtocol")
            .await
            .expect("lookup should succeed")
            .expect("protocol should exist");
        let names: Vec<&String> = stored.methods().keys().collect();
        assert_eq!(names, vec!["detect", "parse"]);
        assert_eq!(service.count().await.expect("count should succeed"), 1);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn list_filters_by_service(service: TestService) {
        service
            .register("A", "AlphaProtocol", methods(&["run"]))
            .await
            .expect("alpha should register");
        service
            .register("B", "BetaProtocol", methods(&["run"]))
            .await
            .expect("beta should register");

        let only_a = service.list(Some("A")).await.expect("list should succeed");
        let all = service.list(None).await.expect("list should succeed");

        assert_eq!(only_a.len(), 1);
        assert_eq!(all.len(), 2);
    }

    #[rstest]
    #[case("", "Proto", &["run"])]
    #[case("Svc", " ", &["run"])]
    #[case("Svc", "Proto", &[""])]
    #[tokio::test(flavor = "multi_thread")]
    async fn blank_names_are_rejected(
        service: TestService,
        #[case] service_name: &str,
        #[case] protocol_name: &str,
        #[case] method_names: &[&str],
    ) {
        let result = service
            .register(service_name, protocol_name, methods(method_names))
            .await;
        assert!(matches!(
            result,
            Err(ProtocolRegistryServiceError::Domain(
                ProtocolDomainError::EmptyServiceName
                    | ProtocolDomainError::EmptyProtocolName
                    | ProtocolDomainError::EmptyMethodName { .. }
            ))
        ));
    }
}
