use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{AuthService, RecordStore, StoreResult};
use crate::supabase::Supabase;

/// Everything a handler may touch. Cloned per request; all members are shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn AuthService>,
    pub records: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        auth: Arc<dyn AuthService>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            records,
        }
    }

    /// State backed by the Supabase project named in `config.remote`
    pub fn supabase(config: AppConfig) -> StoreResult<Self> {
        let backend = Arc::new(Supabase::new(&config.remote)?);
        Ok(Self::new(config, backend.clone(), backend))
    }
}
