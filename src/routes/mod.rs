pub mod events;

pub mod turnitin;

pub use events::configure_event_routes;
pub use turnitin::configure_turnitin_routes;
