//! Navigation adapter for the headless binary

use backoffice_domain::EntityId;

use crate::ports::outbound::NavigationPort;

/// Reports where the UI would go next instead of going there
#[derive(Clone, Default)]
pub struct LogNavigator;

impl NavigationPort for LogNavigator {
    fn open_entity(&self, entity_type: &str, id: &EntityId) {
        tracing::info!(entity_type, entity_id = %id, "Open /{}/{}", entity_type, id);
    }
}
