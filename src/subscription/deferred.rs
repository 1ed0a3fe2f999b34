//! The deferred single-value subscription: a combined demand tracker and
//! value holder for sources that emit at most one value.
//!
//! Producers park their result here with [`DeferredSubscription::set_value`]
//! (or terminate it empty / with an error); the downstream pulls via
//! [`Subscription::request`]. Whichever side arrives second triggers the
//! one-shot delivery, `next(value)` then `complete()`.

use std::marker::PhantomData;

use crate::fused::{FusedQueue, FusionMode, FusionSource};
use crate::observer::Observer;
use crate::rc::{MutArc, RcDeref, RcDerefMut};
use crate::subscription::{set_once, validate_demand, BoxSubscription, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeferredState {
  /// No value yet, no outstanding demand.
  Empty,
  /// No value yet, positive demand outstanding.
  Requested,
  /// Value held, waiting for demand or for a fused `poll`.
  Holding,
  /// Delivered, cancelled, or completed; nothing further may be signalled.
  Terminated,
}

struct DeferredCore<Item, O> {
  state: DeferredState,
  requested: i64,
  fused: bool,
  value: Option<Item>,
  observer: Option<O>,
  upstream: Option<BoxSubscription>,
}

impl<Item, O> DeferredCore<Item, O> {
  /// Moves everything out of the core and marks it terminated. The caller
  /// signals or drops the parts after releasing the lock.
  fn take_terminal(&mut self) -> (Option<O>, Option<Item>, Option<BoxSubscription>) {
    self.state = DeferredState::Terminated;
    self.requested = 0;
    (self.observer.take(), self.value.take(), self.upstream.take())
  }
}

/// Demand-tracking subscription and value holder for a 0-or-1 value source.
///
/// Cloning shares the same core: the producing side typically keeps one
/// clone to park the result while the consuming side holds another as its
/// `Unsub` handle. A value is delivered at most once, only while demand is
/// outstanding, and never after `unsubscribe`.
///
/// No observer callback, upstream cancellation, or value drop ever runs
/// while the internal lock is held, so an observer may re-enter `request`
/// or `unsubscribe` from inside its own signal handlers.
pub struct DeferredSubscription<Item, Err, O> {
  core: MutArc<DeferredCore<Item, O>>,
  _marker: PhantomData<Err>,
}

impl<Item, Err, O> Clone for DeferredSubscription<Item, Err, O> {
  fn clone(&self) -> Self {
    DeferredSubscription { core: self.core.clone(), _marker: PhantomData }
  }
}

enum Settled<Item, O> {
  /// Demand was already outstanding: deliver `next` + `complete` now.
  Deliver(Option<O>, Item, Option<BoxSubscription>),
  /// Fused: the value is parked for `poll`, completion pings readiness.
  Parked(Option<O>),
  /// Stored for later, or dropped because the subscription terminated.
  Kept,
}

impl<Item, Err, O> DeferredSubscription<Item, Err, O>
where
  O: Observer<Item, Err>,
{
  pub fn new(observer: O) -> Self {
    DeferredSubscription {
      core: MutArc::own(DeferredCore {
        state: DeferredState::Empty,
        requested: 0,
        fused: false,
        value: None,
        observer: Some(observer),
        upstream: None,
      }),
      _marker: PhantomData,
    }
  }

  /// Records `value` as the pending result.
  ///
  /// With demand already outstanding this delivers `next(value)` then
  /// `complete()` immediately and terminates the subscription; otherwise
  /// the value is held until [`Subscription::request`] arrives. A held
  /// value is never overwritten: the slot has room for exactly one result,
  /// and the 0-or-1 producer contract makes a second call a caller error.
  pub fn set_value(&self, value: Item) {
    let settled = {
      let mut core = self.core.rc_deref_mut();
      match core.state {
        DeferredState::Terminated | DeferredState::Holding => Settled::Kept,
        DeferredState::Requested if !core.fused => {
          let (observer, _held, upstream) = core.take_terminal();
          Settled::Deliver(observer, value, upstream)
        }
        _ => {
          core.value = Some(value);
          core.state = DeferredState::Holding;
          if core.fused { Settled::Parked(core.observer.take()) } else { Settled::Kept }
        }
      }
    };
    match settled {
      Settled::Deliver(observer, value, _upstream) => {
        if let Some(mut observer) = observer {
          observer.next(value);
          observer.complete();
        }
      }
      Settled::Parked(observer) => {
        if let Some(observer) = observer {
          observer.complete();
        }
      }
      Settled::Kept => {}
    }
  }

  /// Finish with `value`. Equivalent to [`set_value`](Self::set_value);
  /// reads better at operator call sites that terminate the upstream leg.
  #[inline]
  pub fn complete(&self, value: Item) { self.set_value(value); }

  /// Complete without a value. Terminal signals need no demand, so the
  /// downstream `complete()` fires immediately unless the subscription has
  /// already terminated.
  pub fn complete_empty(&self) {
    let (observer, _value, _upstream) = {
      let mut core = self.core.rc_deref_mut();
      if core.state == DeferredState::Terminated {
        return;
      }
      core.take_terminal()
    };
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  /// Fail the downstream. Like [`complete_empty`](Self::complete_empty),
  /// fires immediately and at most once.
  pub fn error(&self, err: Err) {
    let (observer, _value, _upstream) = {
      let mut core = self.core.rc_deref_mut();
      if core.state == DeferredState::Terminated {
        return;
      }
      core.take_terminal()
    };
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  /// Installs the upstream subscription this one should cancel when the
  /// downstream unsubscribes. Accepts at most one upstream for the lifetime
  /// of the subscription; a later or post-terminal install cancels the
  /// incoming subscription and returns `false`.
  pub fn set_upstream(&self, upstream: BoxSubscription) -> bool {
    let mut rejected = {
      let mut core = self.core.rc_deref_mut();
      if core.state != DeferredState::Terminated {
        return set_once(&mut core.upstream, upstream);
      }
      upstream
    };
    rejected.unsubscribe();
    false
  }

  fn do_request(&self, n: i64) {
    if !validate_demand(n) {
      return;
    }
    let deliver = {
      let mut core = self.core.rc_deref_mut();
      match core.state {
        DeferredState::Empty | DeferredState::Requested => {
          core.requested = core.requested.saturating_add(n);
          core.state = DeferredState::Requested;
          None
        }
        DeferredState::Holding if !core.fused => {
          let (observer, value, upstream) = core.take_terminal();
          observer.zip(value).map(|pair| (pair, upstream))
        }
        // Holding under fusion: the consumer pulls via `poll`.
        _ => None,
      }
    };
    if let Some(((mut observer, value), _upstream)) = deliver {
      observer.next(value);
      observer.complete();
    }
  }

  fn do_unsubscribe(&self) {
    let (_observer, _value, upstream) = {
      let mut core = self.core.rc_deref_mut();
      if core.state == DeferredState::Terminated {
        return;
      }
      core.take_terminal()
    };
    if let Some(mut upstream) = upstream {
      upstream.unsubscribe();
    }
  }
}

impl<Item, Err, O> Subscription for DeferredSubscription<Item, Err, O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn request(&mut self, n: i64) { self.do_request(n); }

  #[inline]
  fn unsubscribe(&mut self) { self.do_unsubscribe(); }

  #[inline]
  fn is_closed(&self) -> bool { self.core.rc_deref().state == DeferredState::Terminated }
}

impl<Item, Err, O> FusionSource for DeferredSubscription<Item, Err, O> {
  type Item = Item;

  fn request_fusion(&mut self, mode: FusionMode) -> FusionMode {
    match mode {
      FusionMode::Async | FusionMode::Any => {
        let mut core = self.core.rc_deref_mut();
        if core.state == DeferredState::Terminated {
          FusionMode::None
        } else {
          core.fused = true;
          FusionMode::Async
        }
      }
      _ => FusionMode::None,
    }
  }

  fn poll(&mut self) -> Option<Item> {
    let (value, _observer, _upstream) = {
      let mut core = self.core.rc_deref_mut();
      if core.value.is_none() {
        return None;
      }
      let (observer, value, upstream) = core.take_terminal();
      (value, observer, upstream)
    };
    value
  }

  fn is_empty(&self) -> bool { self.core.rc_deref().value.is_none() }

  fn clear(&mut self) {
    let _value = self.core.rc_deref_mut().value.take();
  }
}

impl<Item, Err, O> FusedQueue for DeferredSubscription<Item, Err, O> {}
