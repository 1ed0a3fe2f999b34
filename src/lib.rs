//! # rxperhaps: Reactive Extensions for 0-or-1 value sources
//!
//! A `Perhaps` is a reactive source that emits **at most one value** and then
//! terminates, either successfully or with an error. This crate implements
//! the backpressure-aware subscription machinery for such sources: demand is
//! requested explicitly, cancellation is observable at any point, and a value
//! is only ever delivered while demand is outstanding.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxperhaps::prelude::*;
//!
//! let mut value = 0;
//! perhaps::of(2).subscribe(|v| value = v);
//! assert_eq!(value, 2);
//! ```
//!
//! Recovering from a failed source with a fallback item:
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use rxperhaps::prelude::*;
//!
//! let result = Arc::new(Mutex::new(0));
//! let captured = result.clone();
//! perhaps::throw::<i32, _>("boom")
//!   .on_error_return_item(9)
//!   .subscribe_complete(move |v| *captured.lock().unwrap() = v, || {});
//! assert_eq!(*result.lock().unwrap(), 9);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Perhaps`] | A source of 0 or 1 value followed by one terminal signal |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Demand (`request`) and cancellation (`unsubscribe`) handle |
//! | [`DeferredSubscription`] | Holds a pending value until demand arrives |
//! | [`FusionSource`] | Lets cooperating stages `poll` a known value directly |
//!
//! [`Perhaps`]: perhaps::Perhaps
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`DeferredSubscription`]: subscription::DeferredSubscription
//! [`FusionSource`]: fused::FusionSource

pub mod assembly;
pub mod fused;
pub mod observer;
pub mod ops;
pub mod perhaps;
pub mod prelude;
pub mod rc;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
