//! Navigation Port - leaves the wizard once an entity exists

use backoffice_domain::EntityId;

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NavigationPort: Send + Sync {
    /// Open the detail view of a freshly created entity
    fn open_entity(&self, entity_type: &str, id: &EntityId);
}
