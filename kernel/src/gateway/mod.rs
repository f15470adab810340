pub mod notifier;
pub mod payment;
