pub mod dispatch;
pub mod queue;
pub mod schema;
pub mod stats;
pub mod study;
pub mod sync;
pub mod uncertain;
