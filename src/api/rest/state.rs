use std::sync::Arc;

use crate::application::services::device_lifecycle::DeviceLifecycleService;
use crate::infrastructure::data::store::DeviceStore;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: DeviceLifecycleService,
}

impl AppState {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self {
            lifecycle: DeviceLifecycleService::new(store),
        }
    }
}
