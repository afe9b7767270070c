//! Event broadcast plumbing

mod dispatcher;

pub use dispatcher::{EventDispatcher, EventDispatcherConfig};
