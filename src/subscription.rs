//! Subscription: the downstream's handle onto an active source.
//!
//! A subscription carries both sides of the backpressure contract: demand
//! flows up through [`Subscription::request`], cancellation through
//! [`Subscription::unsubscribe`]. A source may only deliver a value while
//! requested demand is outstanding; terminal signals need no demand.

mod deferred;
pub use deferred::DeferredSubscription;

/// Demand amount meaning "deliver everything you will ever produce".
pub const UNBOUNDED: i64 = i64::MAX;

/// Returned from `PerhapsSource::actual_subscribe` to allow requesting
/// demand and deregistering before the terminal signal arrives.
pub trait Subscription {
  /// Authorize the source to deliver up to `n` more values. Demand is
  /// additive across calls. Non-positive amounts are ignored (see
  /// [`validate_demand`]).
  fn request(&mut self, n: i64);

  /// Stop the subscription. Idempotent; after this call no further signal
  /// reaches the observer.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

/// A type-erased subscription, used where an operator stores the upstream
/// handle it must later cancel.
pub type BoxSubscription = Box<dyn Subscription + Send>;

impl<S> Subscription for Box<S>
where
  S: Subscription + ?Sized,
{
  #[inline]
  fn request(&mut self, n: i64) { (**self).request(n); }

  #[inline]
  fn unsubscribe(&mut self) { (**self).unsubscribe(); }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// Checks a requested demand amount. `request(n <= 0)` is a caller mistake
/// the protocol tolerates: it is reported and dropped, never propagated as
/// an error signal.
pub fn validate_demand(n: i64) -> bool {
  if n > 0 {
    true
  } else {
    log::warn!("request amount must be positive but was {n}; ignored");
    false
  }
}

/// Installs `incoming` as the one and only upstream subscription of `slot`.
///
/// A slot accepts exactly one subscription for its lifetime. A second
/// install is a protocol violation: the incoming subscription is cancelled,
/// the violation is reported, and `false` is returned. The violation is
/// fatal only to that subscription attempt, never to the process.
pub fn set_once(slot: &mut Option<BoxSubscription>, mut incoming: BoxSubscription) -> bool {
  if slot.is_some() {
    incoming.unsubscribe();
    log::error!("subscription already set; cancelling the later one");
    false
  } else {
    *slot = Some(incoming);
    true
  }
}

/// A subscription for sources that signal synchronously during subscribe.
///
/// It has nothing to deliver on demand, so `request` only validates the
/// amount and `unsubscribe` flips the closed flag.
#[derive(Clone, Debug, Default)]
pub struct SingleSubscription {
  closed: bool,
}

impl SingleSubscription {
  /// A subscription that is already terminated, for sources whose terminal
  /// signal was emitted during subscribe.
  #[inline]
  pub fn closed() -> Self { SingleSubscription { closed: true } }
}

impl Subscription for SingleSubscription {
  #[inline]
  fn request(&mut self, n: i64) { validate_demand(n); }

  #[inline]
  fn unsubscribe(&mut self) { self.closed = true; }

  #[inline]
  fn is_closed(&self) -> bool { self.closed }
}
