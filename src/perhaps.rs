//! The `Perhaps` type: a reactive source of 0 or 1 value.
//!
//! A `Perhaps` signals at most one `next`, then exactly one of `error` or
//! `complete`. Subscribing returns a [`Subscription`]: the source holds its
//! result until the downstream requests demand, and the downstream may
//! unsubscribe at any point to suppress delivery.

use std::convert::Infallible;

use crate::observer::{FnMutObserver, Observer, ObserverAll, ObserverComp, ObserverErr};
use crate::ops::on_assembly::OnAssemblyScalarOp;
use crate::ops::on_error_return_item::OnErrorReturnItemOp;
use crate::subscription::{Subscription, UNBOUNDED};

mod of;
pub use of::{of, of_result, OfPerhaps, ResultPerhaps};
mod trivial;
pub use trivial::{empty, never, throw, EmptyPerhaps, NeverPerhaps, ThrowPerhaps};

/// Associates a source with its value and error types.
pub trait Perhaps {
  type Item;
  type Err;
}

/// The subscribe half of a [`Perhaps`] for a concrete observer type.
///
/// `actual_subscribe` consumes the source and hands back the subscription
/// the downstream drives: demand via [`Subscription::request`],
/// cancellation via [`Subscription::unsubscribe`].
pub trait PerhapsSource<O>: Perhaps
where
  O: Observer<Self::Item, Self::Err>,
{
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// A source whose value is already materialized at assembly time.
///
/// Callers that know this may read the value without subscribing at all;
/// pipeline optimizations use the capability to skip demand signaling.
pub trait ScalarValue: Perhaps {
  fn value(&self) -> Self::Item;
}

/// Operator constructors and subscribe sugar for every [`Perhaps`].
///
/// The subscribe family consumes eagerly: it subscribes, then immediately
/// requests [`UNBOUNDED`] demand on the returned subscription.
pub trait PerhapsExt: Perhaps + Sized {
  /// Substitute `item` as the result if this source fails. A genuine value
  /// and an empty-but-successful completion pass through unchanged.
  #[inline]
  fn on_error_return_item(self, item: Self::Item) -> OnErrorReturnItemOp<Self, Self::Item> {
    OnErrorReturnItemOp::new(self, Some(item))
  }

  /// Swallow a failure of this source into an empty completion.
  #[inline]
  fn on_error_complete(self) -> OnErrorReturnItemOp<Self, Self::Item> {
    OnErrorReturnItemOp::new(self, None)
  }

  /// Attach the call-site stack trace of this very call to any failure the
  /// source later signals. The trace is captured once, here.
  #[inline]
  fn on_assembly(self) -> OnAssemblyScalarOp<Self>
  where
    Self: ScalarValue,
  {
    OnAssemblyScalarOp::new(self)
  }

  fn subscribe<N>(self, next: N) -> <Self as PerhapsSource<FnMutObserver<N>>>::Unsub
  where
    Self: PerhapsSource<FnMutObserver<N>> + Perhaps<Err = Infallible>,
    N: FnMut(Self::Item),
  {
    let mut sub = self.actual_subscribe(FnMutObserver(next));
    sub.request(UNBOUNDED);
    sub
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> <Self as PerhapsSource<ObserverErr<N, E>>>::Unsub
  where
    Self: PerhapsSource<ObserverErr<N, E>>,
    N: FnMut(Self::Item),
    E: FnOnce(Self::Err),
  {
    let mut sub = self.actual_subscribe(ObserverErr::new(next, error));
    sub.request(UNBOUNDED);
    sub
  }

  fn subscribe_complete<N, C>(
    self,
    next: N,
    complete: C,
  ) -> <Self as PerhapsSource<ObserverComp<N, C>>>::Unsub
  where
    Self: PerhapsSource<ObserverComp<N, C>> + Perhaps<Err = Infallible>,
    N: FnMut(Self::Item),
    C: FnOnce(),
  {
    let mut sub = self.actual_subscribe(ObserverComp::new(next, complete));
    sub.request(UNBOUNDED);
    sub
  }

  fn subscribe_all<N, E, C>(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> <Self as PerhapsSource<ObserverAll<N, E, C>>>::Unsub
  where
    Self: PerhapsSource<ObserverAll<N, E, C>>,
    N: FnMut(Self::Item),
    E: FnOnce(Self::Err),
    C: FnOnce(),
  {
    let mut sub = self.actual_subscribe(ObserverAll::new(next, error, complete));
    sub.request(UNBOUNDED);
    sub
  }
}

impl<T: Perhaps + Sized> PerhapsExt for T {}
