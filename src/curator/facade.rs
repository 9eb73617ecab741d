//! The [`Curator`] facade.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, error, info, warn};

use super::{CapabilityServiceProvider, CuratorResponse, CuratorStatus};
use crate::access::{
    AccessGuard,
    domain::{AccessAction, AccessResource, CallerContext},
};
use crate::agent_capability::{
    domain::{AgentCapability, AgentCapabilityReport, CapabilityAnalytics, CapabilityUsage},
    services::{AgentCapabilityRegistration, AgentCapabilityRegistry},
};
use crate::agent_health::{
    adapters::ReportedHealthProbe,
    domain::{
        AgentHealthMetrics, AgentHealthReport, HealthHistoryEntry, HealthObservation,
        HealthSummary,
    },
    ports::AgentHealthProbe,
    services::AgentHealthMonitor,
};
use crate::capability::{
    adapters::memory::InMemoryCapabilityRepository,
    domain::CapabilityDefinition,
    ports::DiscoveryBackend,
    services::{
        CapabilityRegistration, CapabilityRegistryService, CapabilityRemoval,
        RegisterCapabilityRequest,
    },
};
use crate::config::CuratorConfig;
use crate::discovery::{
    adapters::memory::InMemoryServiceDirectory,
    domain::{
        DiscoveredService, DiscoveryPattern, DiscoveryReport, RegistrationReport, ServiceManifest,
    },
    ports::ServiceDirectory,
    services::AutoDiscoveryService,
};
use crate::error::{CuratorError, ResourceKind};
use crate::mesh_policy::{
    adapters::memory::InMemoryPolicyReportRepository,
    domain::{PolicyReport, PolicySnapshot, ServiceMeshPolicyReport},
    services::ServiceMeshPolicyReporter,
};
use crate::protocol::{
    adapters::memory::InMemoryProtocolRepository,
    domain::{MethodContract, ServiceProtocol},
    services::ProtocolRegistryService,
};
use crate::route::{
    adapters::memory::InMemoryRouteRepository,
    domain::{Route, RouteFilter, RouteMetadata},
    services::RouteRegistryService,
};
use crate::specialization::{
    domain::{
        AgentSpecialization, SpecializationAnalytics, SpecializationHealthReport,
        SpecializationRequest,
    },
    ports::SpecializationCatalog,
    services::AgentSpecializationRegistry,
};

type CapabilityService<C> = CapabilityRegistryService<InMemoryCapabilityRepository, C>;

/// Entry point for every Curator registry, monitor, and discovery operation.
///
/// Operations never return `Err`: failures are folded into the returned
/// [`CuratorResponse`] with a stable error code. Only [`Curator::initialize`]
/// reports failure as a `Result` so that startup can abort.
pub struct Curator<C>
where
    C: Clock + Send + Sync + 'static,
{
    config: Arc<CuratorConfig>,
    clock: Arc<C>,
    access: AccessGuard,
    capability_repository: Arc<InMemoryCapabilityRepository>,
    capabilities: Arc<CapabilityService<C>>,
    protocols: ProtocolRegistryService<InMemoryProtocolRepository, C>,
    routes: RouteRegistryService<InMemoryRouteRepository, C>,
    policies: ServiceMeshPolicyReporter<InMemoryPolicyReportRepository, C>,
    agent_capabilities: AgentCapabilityRegistry<C>,
    health: AgentHealthMonitor<C>,
    reported_health: Option<ReportedHealthProbe>,
    specializations: AgentSpecializationRegistry<C>,
    discovery: AutoDiscoveryService,
}

impl<C> Curator<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a Curator over in-memory stores with a permissive access guard.
    ///
    /// Agent health is fed by a [`ReportedHealthProbe`]; agents push
    /// observations through [`Curator::report_agent_observation`].
    #[must_use]
    pub fn new(config: CuratorConfig, clock: Arc<C>) -> Self {
        let capability_repository = Arc::new(InMemoryCapabilityRepository::new());
        let capabilities = Arc::new(CapabilityRegistryService::new(
            Arc::clone(&capability_repository),
            Arc::clone(&clock),
        ));
        let reported_health = ReportedHealthProbe::new();
        let discovery = AutoDiscoveryService::new(Arc::new(InMemoryServiceDirectory::new()))
            .with_fallback(Arc::new(CapabilityServiceProvider::new(Arc::clone(
                &capabilities,
            ))));

        Self {
            protocols: ProtocolRegistryService::new(
                Arc::new(InMemoryProtocolRepository::new()),
                Arc::clone(&clock),
            ),
            routes: RouteRegistryService::new(
                Arc::new(InMemoryRouteRepository::new()),
                Arc::clone(&clock),
            ),
            policies: ServiceMeshPolicyReporter::new(
                Arc::new(InMemoryPolicyReportRepository::new()),
                Arc::clone(&clock),
            ),
            agent_capabilities: AgentCapabilityRegistry::new(
                config.capability_monitor.clone(),
                Arc::clone(&clock),
            ),
            health: AgentHealthMonitor::new(
                Arc::new(reported_health.clone()),
                config.health.clone(),
                Arc::clone(&clock),
            ),
            reported_health: Some(reported_health),
            specializations: AgentSpecializationRegistry::new(
                config.specialization.clone(),
                Arc::clone(&clock),
            ),
            discovery,
            access: AccessGuard::permissive(),
            capability_repository,
            capabilities,
            config: Arc::new(config),
            clock,
        }
    }

    /// Replaces the access guard.
    #[must_use]
    pub fn with_access_guard(mut self, access: AccessGuard) -> Self {
        self.access = access;
        self
    }

    /// Mirrors capability registrations into an external backend.
    #[must_use]
    pub fn with_discovery_backend(mut self, backend: Arc<dyn DiscoveryBackend>) -> Self {
        self.capabilities = Arc::new(
            CapabilityRegistryService::new(
                Arc::clone(&self.capability_repository),
                Arc::clone(&self.clock),
            )
            .with_backend(backend, self.config.discovery_backend.timeout()),
        );
        self
    }

    /// Samples agent health through `probe` instead of self-reported
    /// observations.
    #[must_use]
    pub fn with_health_probe(mut self, probe: Arc<dyn AgentHealthProbe>) -> Self {
        self.health =
            AgentHealthMonitor::new(probe, self.config.health.clone(), Arc::clone(&self.clock));
        self.reported_health = None;
        self
    }

    /// Validates specialization bindings against `catalog`.
    #[must_use]
    pub fn with_specialization_catalog(mut self, catalog: Arc<dyn SpecializationCatalog>) -> Self {
        self.specializations = self.specializations.with_catalog(catalog);
        self
    }

    /// Uses `directory` as the source of already-registered services.
    #[must_use]
    pub fn with_service_directory(mut self, directory: Arc<dyn ServiceDirectory>) -> Self {
        self.discovery = self.discovery.with_directory(directory);
        self
    }

    /// Declares services up front.
    #[must_use]
    pub fn with_service_manifest(mut self, manifest: ServiceManifest) -> Self {
        self.discovery = self.discovery.with_manifest(manifest);
        self
    }

    /// Supplements the manifest with a source-tree scan.
    #[must_use]
    pub fn with_discovery_patterns(
        mut self,
        patterns: impl IntoIterator<Item = DiscoveryPattern>,
    ) -> Self {
        self.discovery = self.discovery.with_patterns(patterns);
        self
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    async fn guarded<T, Fut>(
        &self,
        caller: Option<&CallerContext>,
        resource: AccessResource,
        action: AccessAction,
        operation: &'static str,
        run: impl FnOnce() -> Fut,
    ) -> CuratorResponse<T>
    where
        Fut: Future<Output = Result<T, CuratorError>>,
    {
        self.access.record(operation, "started");
        if let Err(denied) = self
            .access
            .authorize(caller, resource, action, operation)
            .await
        {
            return CuratorResponse::failure(&CuratorError::from(denied));
        }

        match run().await {
            Ok(data) => {
                debug!(operation, "curator operation succeeded");
                self.access.record(operation, "success");
                CuratorResponse::success(data)
            }
            Err(err) => {
                if err.is_caller_error() {
                    warn!(
                        operation,
                        error_code = err.code(),
                        error = %err,
                        "curator operation rejected"
                    );
                } else {
                    error!(
                        operation,
                        error_code = err.code(),
                        error = %err,
                        "curator operation failed"
                    );
                }
                self.access.record(operation, "error");
                CuratorResponse::failure(&err)
            }
        }
    }

    // Capability registry

    /// Registers or replaces a capability definition.
    pub async fn register_capability(
        &self,
        caller: Option<&CallerContext>,
        request: RegisterCapabilityRequest,
    ) -> CuratorResponse<CapabilityRegistration> {
        self.guarded(
            caller,
            AccessResource::CapabilityRegistry,
            AccessAction::Write,
            "register_capability",
            || async move { self.capabilities.register(request).await.map_err(CuratorError::from) },
        )
        .await
    }

    /// Looks up a capability by `service.capability` key.
    pub async fn get_capability(
        &self,
        caller: Option<&CallerContext>,
        capability_key: &str,
    ) -> CuratorResponse<CapabilityDefinition> {
        self.guarded(
            caller,
            AccessResource::CapabilityRegistry,
            AccessAction::Read,
            "get_capability",
            || async {
                self.capabilities
                    .get(capability_key)
                    .await?
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::Capability, capability_key.trim())
                    })
            },
        )
        .await
    }

    /// Lists capabilities ordered by key, optionally within one realm.
    pub async fn list_capabilities(
        &self,
        caller: Option<&CallerContext>,
        realm: Option<&str>,
    ) -> CuratorResponse<Vec<CapabilityDefinition>> {
        self.guarded(
            caller,
            AccessResource::CapabilityRegistry,
            AccessAction::Read,
            "list_capabilities",
            || async { self.capabilities.list(realm).await.map_err(CuratorError::from) },
        )
        .await
    }

    /// Lists the capabilities one service registered.
    pub async fn get_capabilities_by_service(
        &self,
        caller: Option<&CallerContext>,
        service_name: &str,
    ) -> CuratorResponse<Vec<CapabilityDefinition>> {
        self.guarded(
            caller,
            AccessResource::CapabilityRegistry,
            AccessAction::Read,
            "get_capabilities_by_service",
            || async {
                self.capabilities
                    .get_by_service(service_name)
                    .await
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Removes a capability and returns the removed definition.
    ///
    /// An unknown key fails with `CAPABILITY_NOT_FOUND`.
    pub async fn unregister_capability(
        &self,
        caller: Option<&CallerContext>,
        capability_key: &str,
    ) -> CuratorResponse<CapabilityDefinition> {
        self.guarded(
            caller,
            AccessResource::CapabilityRegistry,
            AccessAction::Write,
            "unregister_capability",
            || async {
                match self.capabilities.unregister(capability_key).await? {
                    CapabilityRemoval::Removed { definition, .. } => Ok(definition),
                    CapabilityRemoval::NotFound(key) => Err(CuratorError::not_found(
                        ResourceKind::Capability,
                        key.as_str(),
                    )),
                }
            },
        )
        .await
    }

    // Protocol registry

    /// Registers or replaces a service protocol.
    pub async fn register_service_protocol(
        &self,
        caller: Option<&CallerContext>,
        service_name: &str,
        protocol_name: &str,
        methods: BTreeMap<String, MethodContract>,
    ) -> CuratorResponse<ServiceProtocol> {
        self.guarded(
            caller,
            AccessResource::ProtocolRegistry,
            AccessAction::Write,
            "register_service_protocol",
            || async move {
                self.protocols
                    .register(service_name, protocol_name, methods)
                    .await
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Looks up one protocol of one service.
    pub async fn get_service_protocol(
        &self,
        caller: Option<&CallerContext>,
        service_name: &str,
        protocol_name: &str,
    ) -> CuratorResponse<ServiceProtocol> {
        self.guarded(
            caller,
            AccessResource::ProtocolRegistry,
            AccessAction::Read,
            "get_service_protocol",
            || async {
                self.protocols
                    .get(service_name, protocol_name)
                    .await?
                    .ok_or_else(|| {
                        CuratorError::not_found(
                            ResourceKind::Protocol,
                            format!("{}/{}", service_name.trim(), protocol_name.trim()),
                        )
                    })
            },
        )
        .await
    }

    /// Lists protocols, optionally only those of one service.
    pub async fn list_protocols(
        &self,
        caller: Option<&CallerContext>,
        service_name: Option<&str>,
    ) -> CuratorResponse<Vec<ServiceProtocol>> {
        self.guarded(
            caller,
            AccessResource::ProtocolRegistry,
            AccessAction::Read,
            "list_protocols",
            || async { self.protocols.list(service_name).await.map_err(CuratorError::from) },
        )
        .await
    }

    // Route registry

    /// Registers or replaces a route.
    pub async fn register_route(
        &self,
        caller: Option<&CallerContext>,
        metadata: RouteMetadata,
    ) -> CuratorResponse<Route> {
        self.guarded(
            caller,
            AccessResource::RouteRegistry,
            AccessAction::Write,
            "register_route",
            || async move {
                self.routes
                    .register_route(metadata)
                    .await
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Returns routes matching every criterion of `filter`, ordered by id.
    pub async fn discover_routes(
        &self,
        caller: Option<&CallerContext>,
        filter: RouteFilter,
    ) -> CuratorResponse<Vec<Route>> {
        self.guarded(
            caller,
            AccessResource::RouteRegistry,
            AccessAction::Read,
            "discover_routes",
            || async move { self.routes.discover_routes(filter).await.map_err(CuratorError::from) },
        )
        .await
    }

    /// Looks up a route by id.
    pub async fn get_route(
        &self,
        caller: Option<&CallerContext>,
        route_id: &str,
    ) -> CuratorResponse<Route> {
        self.guarded(
            caller,
            AccessResource::RouteRegistry,
            AccessAction::Read,
            "get_route",
            || async {
                self.routes
                    .get_route(route_id)
                    .await?
                    .ok_or_else(|| CuratorError::not_found(ResourceKind::Route, route_id.trim()))
            },
        )
        .await
    }

    // Service mesh policies

    /// Appends a policy report for a service.
    pub async fn report_service_mesh_policies(
        &self,
        caller: Option<&CallerContext>,
        service_name: &str,
        snapshot: PolicySnapshot,
    ) -> CuratorResponse<PolicyReport> {
        self.guarded(
            caller,
            AccessResource::ServiceMeshPolicies,
            AccessAction::Write,
            "report_service_mesh_policies",
            || async move {
                self.policies
                    .report(service_name, snapshot)
                    .await
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Returns the effective policies of a service.
    pub async fn get_service_mesh_policy_report(
        &self,
        caller: Option<&CallerContext>,
        service_name: &str,
    ) -> CuratorResponse<ServiceMeshPolicyReport> {
        self.guarded(
            caller,
            AccessResource::ServiceMeshPolicies,
            AccessAction::Read,
            "get_service_mesh_policy_report",
            || async { self.policies.aggregate(service_name).await.map_err(CuratorError::from) },
        )
        .await
    }

    // Agent capabilities

    /// Replaces an agent's capability list.
    pub async fn register_agent_capabilities(
        &self,
        caller: Option<&CallerContext>,
        registration: AgentCapabilityRegistration,
    ) -> CuratorResponse<Vec<AgentCapability>> {
        self.guarded(
            caller,
            AccessResource::AgentCapabilityRegistry,
            AccessAction::Write,
            "register_agent_capabilities",
            || async move {
                self.agent_capabilities
                    .register_agent_capabilities(registration)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Records one use of a capability by an agent.
    pub async fn update_capability_usage(
        &self,
        caller: Option<&CallerContext>,
        capability_name: &str,
        agent_id: &str,
    ) -> CuratorResponse<CapabilityUsage> {
        self.guarded(
            caller,
            AccessResource::AgentCapabilityRegistry,
            AccessAction::Write,
            "update_capability_usage",
            || async {
                self.agent_capabilities
                    .update_capability_usage(capability_name, agent_id)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Removes an agent's capabilities and stops its capability monitor.
    pub async fn unregister_agent_capabilities(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<bool> {
        self.guarded(
            caller,
            AccessResource::AgentCapabilityRegistry,
            AccessAction::Write,
            "unregister_agent_capabilities",
            || async {
                if self.agent_capabilities.unregister_agent(agent_id)? {
                    Ok(true)
                } else {
                    Err(CuratorError::not_found(
                        ResourceKind::AgentCapabilities,
                        agent_id.trim(),
                    ))
                }
            },
        )
        .await
    }

    /// Summarises one agent's capabilities.
    pub async fn get_agent_capability_report(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<AgentCapabilityReport> {
        self.guarded(
            caller,
            AccessResource::AgentCapabilityRegistry,
            AccessAction::Read,
            "get_agent_capability_report",
            || async {
                self.agent_capabilities
                    .get_agent_capability_report(agent_id)?
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::AgentCapabilities, agent_id.trim())
                    })
            },
        )
        .await
    }

    /// Summarises every agent's capabilities.
    pub async fn get_all_agent_reports(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<Vec<AgentCapabilityReport>> {
        self.guarded(
            caller,
            AccessResource::AgentCapabilityRegistry,
            AccessAction::Read,
            "get_all_agent_reports",
            || async {
                self.agent_capabilities
                    .get_all_agent_reports()
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Fleet-wide capability analytics.
    pub async fn get_capability_analytics(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<CapabilityAnalytics> {
        self.guarded(
            caller,
            AccessResource::AgentCapabilityRegistry,
            AccessAction::Read,
            "get_capability_analytics",
            || async {
                self.agent_capabilities
                    .get_capability_analytics()
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    // Agent health

    /// Starts monitoring an agent.
    pub async fn register_agent_for_monitoring(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
        agent_name: &str,
    ) -> CuratorResponse<AgentHealthMetrics> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Write,
            "register_agent_for_monitoring",
            || async {
                self.health
                    .register_agent(agent_id, agent_name)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Stops monitoring an agent and drops its health state.
    pub async fn unregister_agent_from_monitoring(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<bool> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Write,
            "unregister_agent_from_monitoring",
            || async {
                if let Some(reported) = &self.reported_health {
                    reported.forget(agent_id)?;
                }
                if self.health.unregister_agent(agent_id)? {
                    Ok(true)
                } else {
                    Err(CuratorError::not_found(
                        ResourceKind::AgentHealth,
                        agent_id.trim(),
                    ))
                }
            },
        )
        .await
    }

    /// Stores an agent's self-reported health observation.
    ///
    /// Fails with `VALIDATION_ERROR` when a custom health probe replaced the
    /// self-reporting one.
    pub async fn report_agent_observation(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
        observation: HealthObservation,
    ) -> CuratorResponse<()> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Write,
            "report_agent_observation",
            || async move {
                let Some(reported) = &self.reported_health else {
                    return Err(CuratorError::Validation(
                        "health observations come from the configured probe".to_owned(),
                    ));
                };
                reported
                    .report_observation(agent_id, observation)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Runs one health check cycle for an agent now.
    pub async fn run_health_check(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<AgentHealthMetrics> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Write,
            "run_health_check",
            || async { self.health.run_health_check(agent_id).await.map_err(CuratorError::from) },
        )
        .await
    }

    /// Current health metrics of an agent.
    pub async fn get_agent_health(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<AgentHealthMetrics> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Read,
            "get_agent_health",
            || async {
                self.health
                    .get_agent_health(agent_id)?
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::AgentHealth, agent_id.trim())
                    })
            },
        )
        .await
    }

    /// Scored health report with trends for an agent.
    pub async fn get_agent_health_report(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<AgentHealthReport> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Read,
            "get_agent_health_report",
            || async {
                self.health
                    .get_agent_health_report(agent_id)?
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::AgentHealth, agent_id.trim())
                    })
            },
        )
        .await
    }

    /// Health reports for every monitored agent.
    pub async fn get_all_agent_health_reports(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<Vec<AgentHealthReport>> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Read,
            "get_all_agent_health_reports",
            || async { self.health.get_all_agent_health_reports().map_err(CuratorError::from) },
        )
        .await
    }

    /// Fleet-wide health summary.
    pub async fn get_health_summary(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<HealthSummary> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Read,
            "get_health_summary",
            || async { self.health.get_health_summary().map_err(CuratorError::from) },
        )
        .await
    }

    /// Health history of an agent, oldest first.
    pub async fn get_health_history(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<Vec<HealthHistoryEntry>> {
        self.guarded(
            caller,
            AccessResource::AgentHealthMonitoring,
            AccessAction::Read,
            "get_health_history",
            || async {
                self.health
                    .get_health_history(agent_id)?
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::AgentHealth, agent_id.trim())
                    })
            },
        )
        .await
    }

    // Specializations

    /// Binds an agent to a specialization, replacing any earlier binding.
    pub async fn register_agent_specialization(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
        agent_name: &str,
        request: SpecializationRequest,
    ) -> CuratorResponse<AgentSpecialization> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Write,
            "register_agent_specialization",
            || async move {
                self.specializations
                    .register_agent_specialization(agent_id, agent_name, request)
                    .await
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Records one use of an agent's specialization.
    pub async fn update_specialization_usage(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
        success: bool,
        capability_used: Option<&str>,
    ) -> CuratorResponse<AgentSpecialization> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Write,
            "update_specialization_usage",
            || async {
                self.specializations
                    .update_specialization_usage(agent_id, success, capability_used)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Current specialization binding of an agent.
    pub async fn get_agent_specialization(
        &self,
        caller: Option<&CallerContext>,
        agent_id: &str,
    ) -> CuratorResponse<AgentSpecialization> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Read,
            "get_agent_specialization",
            || async {
                self.specializations
                    .get_agent_specialization(agent_id)?
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::AgentSpecialization, agent_id.trim())
                    })
            },
        )
        .await
    }

    /// Latest rollup for one specialization.
    pub async fn get_specialization_analytics(
        &self,
        caller: Option<&CallerContext>,
        specialization_id: &str,
    ) -> CuratorResponse<SpecializationAnalytics> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Read,
            "get_specialization_analytics",
            || async {
                self.specializations
                    .get_specialization_analytics(specialization_id)?
                    .ok_or_else(|| {
                        CuratorError::not_found(
                            ResourceKind::Specialization,
                            specialization_id.trim(),
                        )
                    })
            },
        )
        .await
    }

    /// Latest rollup for every specialization.
    pub async fn get_all_specialization_analytics(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<Vec<SpecializationAnalytics>> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Read,
            "get_all_specialization_analytics",
            || async {
                self.specializations
                    .get_all_specialization_analytics()
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Specialization ids filed under a pillar.
    pub async fn get_pillar_specializations(
        &self,
        caller: Option<&CallerContext>,
        pillar: &str,
    ) -> CuratorResponse<Vec<String>> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Read,
            "get_pillar_specializations",
            || async {
                self.specializations
                    .get_pillar_specializations(pillar)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Agents bound to a specialization.
    pub async fn get_agents_by_specialization(
        &self,
        caller: Option<&CallerContext>,
        specialization_id: &str,
    ) -> CuratorResponse<Vec<String>> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Read,
            "get_agents_by_specialization",
            || async {
                self.specializations
                    .get_agents_by_specialization(specialization_id)
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    /// Fleet-wide specialization health.
    pub async fn get_specialization_health_report(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<SpecializationHealthReport> {
        self.guarded(
            caller,
            AccessResource::AgentSpecializationManagement,
            AccessAction::Read,
            "get_specialization_health_report",
            || async {
                self.specializations
                    .get_specialization_health_report()
                    .map_err(CuratorError::from)
            },
        )
        .await
    }

    // Discovery

    /// Scans the manifest and source tree for services.
    pub async fn discover_all_services(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<DiscoveryReport> {
        self.guarded(
            caller,
            AccessResource::AutoDiscovery,
            AccessAction::Read,
            "discover_all_services",
            || async { self.discovery.discover_all_services().await.map_err(CuratorError::from) },
        )
        .await
    }

    /// Runs a discovery pass and registers what it found with the service
    /// directory, so later passes report those services as skipped.
    pub async fn register_discovered_services(
        &self,
        caller: Option<&CallerContext>,
    ) -> CuratorResponse<RegistrationReport> {
        self.guarded(
            caller,
            AccessResource::AutoDiscovery,
            AccessAction::Write,
            "register_discovered_services",
            || async {
                let report = self.discovery.discover_all_services().await?;
                Ok(self.discovery.register_discovered_services(&report).await)
            },
        )
        .await
    }

    /// Finds a service through the discovery lookup chain.
    pub async fn locate_service(
        &self,
        caller: Option<&CallerContext>,
        service_name: &str,
    ) -> CuratorResponse<DiscoveredService> {
        self.guarded(
            caller,
            AccessResource::AutoDiscovery,
            AccessAction::Read,
            "locate_service",
            || async {
                self.discovery
                    .locate(service_name)
                    .await
                    .map(|located| located.service)
                    .ok_or_else(|| {
                        CuratorError::not_found(ResourceKind::Service, service_name.trim())
                    })
            },
        )
        .await
    }

    // Lifecycle

    /// Loads the specialization catalog and starts the analytics rollup.
    ///
    /// Returns the number of catalog specializations loaded.
    ///
    /// # Errors
    ///
    /// Returns [`CuratorError`] when the catalog cannot be read or the rollup
    /// cannot be started; startup should abort.
    pub async fn initialize(&self) -> Result<usize, CuratorError> {
        let loaded = self.specializations.initialize().await.map_err(|err| {
            error!(error = %err, "curator initialization failed");
            CuratorError::from(err)
        })?;
        info!(
            specializations = loaded,
            health_monitoring = self.config.health.enabled,
            capability_monitoring = self.config.capability_monitor.enabled,
            analytics = self.config.specialization.analytics_enabled,
            "curator initialized"
        );
        Ok(loaded)
    }

    /// Registry sizes and running monitor counts.
    pub async fn status(&self) -> CuratorResponse<CuratorStatus> {
        CuratorResponse::from(self.collect_status().await.inspect_err(|err| {
            error!(error = %err, "curator status unavailable");
        }))
    }

    async fn collect_status(&self) -> Result<CuratorStatus, CuratorError> {
        Ok(CuratorStatus {
            capabilities: self.capabilities.count().await?,
            protocols: self.protocols.count().await?,
            routes: self.routes.count().await?,
            policy_services: self.policies.service_count().await?,
            capability_agents: self.agent_capabilities.agent_count()?,
            monitored_agents: self.health.monitored_count()?,
            specialized_agents: self.specializations.agent_count()?,
            specializations: self.specializations.specialization_count()?,
            discovered_services: self.discovery.discovered_count()?,
            running_monitors: self.health.running_monitors()
                + self.agent_capabilities.running_monitors()
                + usize::from(self.specializations.analytics_running()),
        })
    }

    /// Cancels every background task and waits for them to finish.
    pub async fn shutdown(&self) {
        self.health.shutdown().await;
        self.agent_capabilities.shutdown().await;
        self.specializations.shutdown().await;
        info!("curator shut down");
    }
}
