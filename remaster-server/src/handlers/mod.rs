pub mod batch_handlers;
pub mod bridge_handlers;
