use crate::domain::archive::TokenArchive;
use crate::domain::audit::TokenReleaseRepository;
use crate::domain::identity::IdentityResolver;
use crate::domain::tokens::TokenProvider;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub identity: Arc<dyn IdentityResolver>,
    pub provider: Arc<dyn TokenProvider>,
    pub archive: Arc<dyn TokenArchive>,
    pub releases: Arc<dyn TokenReleaseRepository>,
    /// Minutes assumed when the upstream omits the validity duration
    pub default_minutes_valid: i32,
}
