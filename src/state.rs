use crate::auth::CredentialVerifier;
use crate::store::{ContentRepository, SiteStore};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub content: ContentRepository,
    pub store: Arc<dyn SiteStore>,
    pub verifier: Arc<CredentialVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn SiteStore>, verifier: CredentialVerifier) -> Self {
        Self {
            content: ContentRepository::new(store.clone()),
            store,
            verifier: Arc::new(verifier),
        }
    }
}
