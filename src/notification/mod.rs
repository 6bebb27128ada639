//! Publishing of formatted notifications.
//!
//! The dispatcher only knows the [`Publisher`] trait. [`SnsPublisher`] sends
//! to an SNS topic; [`StdoutPublisher`] prints the payload instead, for dry
//! runs.
pub mod sns;
pub mod stdout;

pub use crate::core::Publisher;
pub use sns::SnsPublisher;
pub use stdout::StdoutPublisher;

#[cfg(feature = "test-utils")]
pub mod fake;
