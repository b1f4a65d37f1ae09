//! Trait definition module

mod progress;

pub use progress::{NoopProgress, ProgressObserver};
