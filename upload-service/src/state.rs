//! Application state management

use std::sync::Arc;

use crate::media_storage::UploadUrlSigner;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Signer used to mint upload authorizations
    pub signer: Arc<dyn UploadUrlSigner>,
}
