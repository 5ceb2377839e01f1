use std::sync::Arc;

use nl_tensor::{ComputeBackend, CpuBackend};

use crate::error::{ActivationError, Result};

/// Handle to the compute backend used by the arithmetic helpers and the
/// activation evaluator.
///
/// Passed explicitly to every call; cloning shares the backend.
#[derive(Debug, Clone)]
pub struct OperatorContext {
    backend: Arc<dyn ComputeBackend>,
}

impl OperatorContext {
    pub fn new(backend: Arc<dyn ComputeBackend>) -> Self {
        Self { backend }
    }

    /// Context backed by the reference CPU backend.
    pub fn cpu() -> Self {
        Self::new(Arc::new(CpuBackend::new()))
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn backend(&self) -> &dyn ComputeBackend {
        self.backend.as_ref()
    }
}

impl Default for OperatorContext {
    fn default() -> Self {
        Self::cpu()
    }
}

/// Builder for [`OperatorContext`]. A backend must be supplied before
/// [`ContextBuilder::build`].
#[derive(Debug, Default)]
pub struct ContextBuilder {
    backend: Option<Arc<dyn ComputeBackend>>,
}

impl ContextBuilder {
    pub fn with_backend(mut self, backend: Arc<dyn ComputeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn build(self) -> Result<OperatorContext> {
        self.backend
            .map(OperatorContext::new)
            .ok_or(ActivationError::UninitializedContext)
    }
}
