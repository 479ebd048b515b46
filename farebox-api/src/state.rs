use std::sync::Arc;

use farebox_store::DbClient;

use crate::notifier::NotificationDispatcher;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbClient>,
    pub notifier: NotificationDispatcher,
}
