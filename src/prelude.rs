//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

// Assembly diagnostics
pub use crate::assembly::{AssemblyError, AssemblyStackTrace};
// Fusion contract
pub use crate::fused::{FusedQueue, FusedQueueError, FusionMode, FusionSource};
// Observer trait and closure adapters
pub use crate::observer::{FnMutObserver, Observer, ObserverAll, ObserverComp, ObserverErr};
// Operators
pub use crate::ops::on_assembly::OnAssemblyScalarOp;
pub use crate::ops::on_error_return_item::OnErrorReturnItemOp;
// Source module (`perhaps::of`, `perhaps::empty`, ...) and core traits
pub use crate::perhaps;
pub use crate::perhaps::{Perhaps, PerhapsExt, PerhapsSource, ScalarValue};
// Shared cell
pub use crate::rc::{MutArc, RcDeref, RcDerefMut};
// Subscription
pub use crate::subscription::{
  set_once, validate_demand, BoxSubscription, DeferredSubscription, SingleSubscription,
  Subscription, UNBOUNDED,
};
