//! Operator fusion: cooperating stages may agree to bypass signal-based
//! delivery and pull an already-materialized value directly.
//!
//! The contract is split in two. [`FusionSource`] is the minimal capability
//! a fusing consumer needs: negotiate a mode, then `poll`/`is_empty`/`clear`
//! a single-slot value view. [`FusedQueue`] additionally carries the
//! queue-shaped operations that exist only so a fused stage fits call sites
//! written against a general queue; none of them is ever legal on a
//! single-slot source and every one fails fast with
//! [`FusedQueueError::Unsupported`].

use thiserror::Error;

/// Fusion negotiation modes.
///
/// A consumer asks for a mode with [`FusionSource::request_fusion`]; the
/// source answers with the mode it actually established, which is
/// [`FusionMode::None`] unless it supports the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FusionMode {
  /// No fusion; values are delivered through `next`.
  None,
  /// The consumer pulls values synchronously during subscribe.
  Sync,
  /// The value becomes available later; the source signals readiness and
  /// the consumer pulls it via `poll`.
  Async,
  /// The consumer accepts whatever the source supports.
  Any,
}

/// Errors produced by the fused-queue facade.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FusedQueueError {
  /// The operation is queue-shaped but has no meaning on a single-slot
  /// fused source.
  #[error("`{0}` is not supported on a single-slot fused source")]
  Unsupported(&'static str),
}

/// A disposable resource that can also act as a single-slot value queue, so
/// that an adjacent operator can take the value without demand signaling.
pub trait FusionSource {
  type Item;

  /// Negotiate a fusion mode. Returns the established mode;
  /// [`FusionMode::None`] means delivery stays signal-based.
  fn request_fusion(&mut self, mode: FusionMode) -> FusionMode;

  /// Take the held value, leaving the slot empty. Returns `None` when no
  /// value is held or the resource is disposed. Safe to call whether or not
  /// fusion was negotiated.
  fn poll(&mut self) -> Option<Self::Item>;

  /// True iff no value is currently held.
  fn is_empty(&self) -> bool;

  /// Discard any held value; used during cancellation.
  fn clear(&mut self);
}

/// The queue-shaped facade of a fused source.
///
/// Implementors get every method below for free, and must leave them as
/// they are: each one reports [`FusedQueueError::Unsupported`] so that
/// accidental use by a future operator surfaces immediately instead of
/// degrading into an empty result.
pub trait FusedQueue: FusionSource {
  fn offer(&mut self, _value: Self::Item) -> Result<(), FusedQueueError> {
    Err(FusedQueueError::Unsupported("offer"))
  }

  fn offer_all<I>(&mut self, _values: I) -> Result<(), FusedQueueError>
  where
    I: IntoIterator<Item = Self::Item>,
  {
    Err(FusedQueueError::Unsupported("offer_all"))
  }

  fn peek(&self) -> Result<Option<&Self::Item>, FusedQueueError> {
    Err(FusedQueueError::Unsupported("peek"))
  }

  fn contains<F>(&self, _predicate: F) -> Result<bool, FusedQueueError>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    Err(FusedQueueError::Unsupported("contains"))
  }

  fn remove_if<F>(&mut self, _predicate: F) -> Result<bool, FusedQueueError>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    Err(FusedQueueError::Unsupported("remove_if"))
  }

  fn len(&self) -> Result<usize, FusedQueueError> { Err(FusedQueueError::Unsupported("len")) }

  fn to_vec(&mut self) -> Result<Vec<Self::Item>, FusedQueueError> {
    Err(FusedQueueError::Unsupported("to_vec"))
  }
}
