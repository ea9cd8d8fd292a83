pub mod cancellation;

pub use cancellation::{cancellation, CancellationHandle, CancellationSignal};
