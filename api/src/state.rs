//! Shared application state

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{FeedbackDocument, ProjectDocument, UserDocument};

/// In-memory stores, one per collection.
///
/// All handlers share these behind read/write locks; there is no other
/// mutable state in the service.
#[derive(Clone, Default)]
pub struct AppState {
    pub users: Arc<RwLock<Vec<UserDocument>>>,
    pub projects: Arc<RwLock<Vec<ProjectDocument>>>,
    pub feedback: Arc<RwLock<Vec<FeedbackDocument>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
