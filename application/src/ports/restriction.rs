//! Restriction policy port

use conclave_domain::ProviderFamily;

/// Deployment-level gate on which models may be used
pub trait RestrictionPolicy: Send + Sync {
    fn is_allowed(&self, family: ProviderFamily, model_name: &str) -> bool;
}

/// Policy that permits everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl RestrictionPolicy for AllowAll {
    fn is_allowed(&self, _family: ProviderFamily, _model_name: &str) -> bool {
        true
    }
}
