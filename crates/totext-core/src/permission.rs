use std::sync::Arc;

use totext_platform::CapabilityProvider;
use totext_types::{Capability, GrantResults, RequestCode};

/// Camera needs camera + storage, gallery needs storage only.
/// Grants are always read from the provider, never cached here.
#[derive(Clone)]
pub struct PermissionGate {
    provider: Arc<dyn CapabilityProvider>,
}

impl PermissionGate {
    pub fn new(provider: Arc<dyn CapabilityProvider>) -> Self {
        Self { provider }
    }

    pub fn check(&self, capability: Capability) -> bool {
        self.provider.check(capability)
    }

    pub fn camera_ready(&self) -> bool {
        RequestCode::Camera
            .capabilities()
            .iter()
            .all(|c| self.check(*c))
    }

    pub fn storage_ready(&self) -> bool {
        RequestCode::Storage
            .capabilities()
            .iter()
            .all(|c| self.check(*c))
    }

    pub async fn request(&self, code: RequestCode) -> GrantResults {
        tracing::debug!("Requesting {:?}", code.capabilities());
        self.provider.request(code).await
    }
}
