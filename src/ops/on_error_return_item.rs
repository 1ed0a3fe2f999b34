//! Return a configured item if the upstream fails.

use std::convert::Infallible;

use crate::observer::Observer;
use crate::perhaps::{Perhaps, PerhapsSource};
use crate::subscription::{DeferredSubscription, Subscription, UNBOUNDED};

/// Decorates a source so that upstream failure becomes a successful result:
/// the configured item when one is present, an empty completion otherwise.
///
/// A genuine upstream value and a genuine empty completion pass through
/// unchanged; the item is strictly an error-recovery value, never a
/// default for an empty success.
#[derive(Clone)]
pub struct OnErrorReturnItemOp<S, Item> {
  source: S,
  item: Option<Item>,
}

impl<S, Item> OnErrorReturnItemOp<S, Item> {
  #[inline]
  pub(crate) fn new(source: S, item: Option<Item>) -> Self { OnErrorReturnItemOp { source, item } }
}

impl<S, Item> Perhaps for OnErrorReturnItemOp<S, Item>
where
  S: Perhaps<Item = Item>,
{
  type Item = Item;
  // failures never leave this operator
  type Err = Infallible;
}

impl<S, Item, O> PerhapsSource<O> for OnErrorReturnItemOp<S, Item>
where
  S: Perhaps<Item = Item> + PerhapsSource<OnErrorReturnItemObserver<O, Item>>,
  <S as PerhapsSource<OnErrorReturnItemObserver<O, Item>>>::Unsub: Send + 'static,
  O: Observer<Item, Infallible>,
{
  type Unsub = DeferredSubscription<Item, Infallible, O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let deferred = DeferredSubscription::new(observer);
    let mut upstream = self.source.actual_subscribe(OnErrorReturnItemObserver {
      deferred: deferred.clone(),
      item: self.item,
      value: None,
    });
    // at most one value can ever arrive, so consume the upstream eagerly
    // instead of relaying downstream demand
    upstream.request(UNBOUNDED);
    deferred.set_upstream(Box::new(upstream));
    deferred
  }
}

/// Mediating subscriber between the upstream and the downstream's deferred
/// subscription. It owns the captured value for the duration of one
/// subscription and only decides what to forward at the terminal signal.
pub struct OnErrorReturnItemObserver<O, Item> {
  deferred: DeferredSubscription<Item, Infallible, O>,
  item: Option<Item>,
  value: Option<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for OnErrorReturnItemObserver<O, Item>
where
  O: Observer<Item, Infallible>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    self.value = Some(value);
  }

  fn error(self, _err: Err) {
    // failure after a captured value still counts as failure: the captured
    // value is dropped, not delivered
    match self.item {
      Some(item) => self.deferred.complete(item),
      None => self.deferred.complete_empty(),
    }
  }

  fn complete(self) {
    match self.value {
      Some(value) => self.deferred.complete(value),
      None => self.deferred.complete_empty(),
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.deferred.is_closed() }
}

#[cfg(test)]
mod test {
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::{Arc, Mutex};

  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  #[test]
  fn value_passes_through() {
    let value = Arc::new(Mutex::new(0));
    let completed = Arc::new(Mutex::new(false));
    let (v, c) = (value.clone(), completed.clone());

    perhaps::of(5)
      .on_error_return_item(9)
      .subscribe_complete(move |x| *v.lock().unwrap() = x, move || *c.lock().unwrap() = true);

    assert_eq!(*value.lock().unwrap(), 5);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn empty_success_does_not_use_the_item() {
    let next = Arc::new(Mutex::new(0_usize));
    let completed = Arc::new(Mutex::new(false));
    let (n, c) = (next.clone(), completed.clone());

    perhaps::empty::<i32>()
      .on_error_return_item(9)
      .subscribe_complete(move |_| *n.lock().unwrap() += 1, move || *c.lock().unwrap() = true);

    assert_eq!(*next.lock().unwrap(), 0);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn error_is_replaced_by_the_item() {
    let value = Arc::new(Mutex::new(0));
    let completed = Arc::new(Mutex::new(false));
    let (v, c) = (value.clone(), completed.clone());

    perhaps::throw::<i32, _>("boom")
      .on_error_return_item(9)
      .subscribe_complete(move |x| *v.lock().unwrap() = x, move || *c.lock().unwrap() = true);

    assert_eq!(*value.lock().unwrap(), 9);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn error_without_item_completes_empty() {
    let next = Arc::new(Mutex::new(0_usize));
    let completed = Arc::new(Mutex::new(false));
    let (n, c) = (next.clone(), completed.clone());

    perhaps::throw::<i32, _>("boom")
      .on_error_complete()
      .subscribe_complete(move |_| *n.lock().unwrap() += 1, move || *c.lock().unwrap() = true);

    assert_eq!(*next.lock().unwrap(), 0);
    assert!(*completed.lock().unwrap());
  }

  /// Emits a value and then still fails, in one synchronous burst.
  #[derive(Clone)]
  struct ValueThenError(i32);

  impl Perhaps for ValueThenError {
    type Item = i32;
    type Err = &'static str;
  }

  impl<O> PerhapsSource<O> for ValueThenError
  where
    O: Observer<i32, &'static str>,
  {
    type Unsub = SingleSubscription;

    fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
      observer.next(self.0);
      observer.error("late failure");
      SingleSubscription::closed()
    }
  }

  #[test]
  fn late_error_discards_the_captured_value() {
    let value = Arc::new(Mutex::new(0));
    let v = value.clone();

    ValueThenError(5)
      .on_error_return_item(9)
      .subscribe_complete(move |x| *v.lock().unwrap() = x, || {});

    // the 5 that arrived before the failure is dropped, not delivered
    assert_eq!(*value.lock().unwrap(), 9);
  }

  /// Records the demand its subscription receives and whether it was
  /// cancelled; never signals.
  #[derive(Clone)]
  struct RequestProbe {
    requested: Arc<Mutex<Vec<i64>>>,
    cancelled: Arc<AtomicBool>,
  }

  struct ProbeSubscription {
    requested: Arc<Mutex<Vec<i64>>>,
    cancelled: Arc<AtomicBool>,
  }

  impl Subscription for ProbeSubscription {
    fn request(&mut self, n: i64) { self.requested.lock().unwrap().push(n); }

    fn unsubscribe(&mut self) { self.cancelled.store(true, Ordering::SeqCst); }

    fn is_closed(&self) -> bool { self.cancelled.load(Ordering::SeqCst) }
  }

  impl Perhaps for RequestProbe {
    type Item = i32;
    type Err = &'static str;
  }

  impl<O> PerhapsSource<O> for RequestProbe
  where
    O: Observer<i32, &'static str>,
  {
    type Unsub = ProbeSubscription;

    fn actual_subscribe(self, _observer: O) -> Self::Unsub {
      ProbeSubscription { requested: self.requested, cancelled: self.cancelled }
    }
  }

  #[test]
  fn upstream_demand_is_eager_and_unbounded() {
    let probe = RequestProbe {
      requested: Arc::new(Mutex::new(vec![])),
      cancelled: Arc::new(AtomicBool::new(false)),
    };
    let requested = probe.requested.clone();

    let _sub = probe.on_error_return_item(9).actual_subscribe(FnMutObserver(|_: i32| {}));
    assert_eq!(*requested.lock().unwrap(), vec![UNBOUNDED]);
  }

  #[test]
  fn downstream_cancel_reaches_the_upstream() {
    let probe = RequestProbe {
      requested: Arc::new(Mutex::new(vec![])),
      cancelled: Arc::new(AtomicBool::new(false)),
    };
    let cancelled = probe.cancelled.clone();

    let mut sub = probe.on_error_return_item(9).actual_subscribe(FnMutObserver(|_: i32| {}));
    assert!(!cancelled.load(Ordering::SeqCst));
    sub.unsubscribe();
    assert!(cancelled.load(Ordering::SeqCst));
  }

  #[test]
  fn forwarding_waits_for_downstream_demand() {
    let value = Arc::new(Mutex::new(0));
    let v = value.clone();

    let mut sub = perhaps::of(5)
      .on_error_return_item(9)
      .actual_subscribe(FnMutObserver(move |x| *v.lock().unwrap() = x));

    // the upstream already completed, but nothing was requested downstream
    assert_eq!(*value.lock().unwrap(), 0);
    sub.request(1);
    assert_eq!(*value.lock().unwrap(), 5);
  }

  fn base_function() {
    let value = Arc::new(Mutex::new(0));
    let v = value.clone();
    perhaps::throw::<i32, _>("boom")
      .on_error_return_item(9)
      .subscribe_complete(move |x| *v.lock().unwrap() = x, || {});
    assert_eq!(*value.lock().unwrap(), 9);
  }

  #[test]
  fn bench_fallback() { bench_f(); }

  benchmark_group!(bench_f, bench_fallback_function);

  fn bench_fallback_function(b: &mut Bencher) { b.iter(base_function); }
}
