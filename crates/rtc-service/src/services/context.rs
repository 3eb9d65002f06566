//! Service context - dependency container for services
//!
//! Holds the durable store and the identity provider; everything the service
//! layer touches goes through these two ports.

use std::sync::Arc;

use rtc_core::traits::{ChatStore, IdentityProvider};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn ChatStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(store: Arc<dyn ChatStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    /// Get the durable chat store
    pub fn store(&self) -> &dyn ChatStore {
        self.store.as_ref()
    }

    /// Get the identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish()
    }
}

/// Builder for `ServiceContext`
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn ChatStore>>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

/// Error building a `ServiceContext`
#[derive(Debug, thiserror::Error)]
pub enum ContextBuildError {
    #[error("Missing dependency: {0}")]
    Missing(&'static str),
}

impl ServiceContextBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chat store
    #[must_use]
    pub fn store(mut self, store: Arc<dyn ChatStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the identity provider
    #[must_use]
    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Build the context, failing if a dependency is missing
    pub fn build(self) -> Result<ServiceContext, ContextBuildError> {
        Ok(ServiceContext {
            store: self.store.ok_or(ContextBuildError::Missing("store"))?,
            identity: self
                .identity
                .ok_or(ContextBuildError::Missing("identity provider"))?,
        })
    }
}
