mod channel;
mod scheduler;

pub use channel::{Channel, EventEmitter, EventObserver, SubscriptionId, Unsubscriber};
pub use scheduler::{CancellationToken, TaskQueue};
