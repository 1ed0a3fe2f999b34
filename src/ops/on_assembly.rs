//! Wraps a scalar source and injects assembly info into its failures.

use std::fmt::{Debug, Display};

use crate::assembly::{AssemblyError, AssemblyStackTrace};
use crate::observer::Observer;
use crate::perhaps::{Perhaps, PerhapsSource, ScalarValue};

/// Decorates a source whose value is already materialized, attaching the
/// stack trace of the decoration site to any failure that flows through.
///
/// The trace is captured exactly once, in the constructor; subscribing any
/// number of times (via clones) shares that one capture. Values and plain
/// completion pass through untouched, and so does the source's
/// [`ScalarValue`] fast path.
#[derive(Clone)]
pub struct OnAssemblyScalarOp<S> {
  source: S,
  assembled: AssemblyStackTrace,
}

impl<S> OnAssemblyScalarOp<S> {
  #[inline]
  pub(crate) fn new(source: S) -> Self {
    OnAssemblyScalarOp { source, assembled: AssemblyStackTrace::capture() }
  }
}

impl<S> Perhaps for OnAssemblyScalarOp<S>
where
  S: Perhaps,
  S::Err: Display + Debug,
{
  type Item = S::Item;
  type Err = AssemblyError<S::Err>;
}

impl<S, O> PerhapsSource<O> for OnAssemblyScalarOp<S>
where
  S: PerhapsSource<OnAssemblyObserver<O>>,
  S::Err: Display + Debug,
  O: Observer<S::Item, AssemblyError<S::Err>>,
{
  type Unsub = <S as PerhapsSource<OnAssemblyObserver<O>>>::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(OnAssemblyObserver { observer, assembled: self.assembled })
  }
}

impl<S> ScalarValue for OnAssemblyScalarOp<S>
where
  S: ScalarValue,
  S::Err: Display + Debug,
{
  #[inline]
  fn value(&self) -> S::Item { self.source.value() }
}

pub struct OnAssemblyObserver<O> {
  observer: O,
  assembled: AssemblyStackTrace,
}

impl<Item, Err, O> Observer<Item, Err> for OnAssemblyObserver<O>
where
  Err: Display + Debug,
  O: Observer<Item, AssemblyError<Err>>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value); }

  #[inline]
  fn error(self, err: Err) {
    self.observer.error(AssemblyError::new(err, self.assembled));
  }

  #[inline]
  fn complete(self) { self.observer.complete(); }

  #[inline]
  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::sync::{Arc, Mutex};

  use crate::prelude::*;

  /// A source whose value is known at assembly time but whose subscription
  /// path still fails.
  #[derive(Clone)]
  struct FailingScalar(i32);

  impl Perhaps for FailingScalar {
    type Item = i32;
    type Err = &'static str;
  }

  impl<O> PerhapsSource<O> for FailingScalar
  where
    O: Observer<i32, &'static str>,
  {
    type Unsub = SingleSubscription;

    fn actual_subscribe(self, observer: O) -> Self::Unsub {
      observer.error("boom");
      SingleSubscription::closed()
    }
  }

  impl ScalarValue for FailingScalar {
    fn value(&self) -> i32 { self.0 }
  }

  #[test]
  fn value_and_completion_pass_through() {
    let value = Arc::new(Mutex::new(0));
    let completed = Arc::new(Mutex::new(false));
    let (v, c) = (value.clone(), completed.clone());

    perhaps::of(7).on_assembly().subscribe_all(
      move |x| *v.lock().unwrap() = x,
      |_| {},
      move || *c.lock().unwrap() = true,
    );

    assert_eq!(*value.lock().unwrap(), 7);
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn scalar_fast_path_is_preserved() {
    let op = perhaps::of(11).on_assembly();
    // the value is readable without subscribing at all
    assert_eq!(op.value(), 11);
  }

  #[test]
  fn failure_carries_the_assembly_trace() {
    let seen = Arc::new(Mutex::new(None));
    let s = seen.clone();

    FailingScalar(1)
      .on_assembly()
      .subscribe_err(|_| {}, move |e| *s.lock().unwrap() = Some(e));

    let guard = seen.lock().unwrap();
    let err = guard.as_ref().unwrap();
    assert_eq!(*err.error(), "boom");
    assert!(err.to_string().starts_with("boom\nassembled at:\n"));
  }

  #[test]
  fn two_subscriptions_share_one_capture() {
    let first = Arc::new(Mutex::new(None));
    let second = Arc::new(Mutex::new(None));

    let op = FailingScalar(1).on_assembly();
    let other = op.clone();

    let f = first.clone();
    op.subscribe_err(|_| {}, move |e| *f.lock().unwrap() = Some(e));
    let s = second.clone();
    other.subscribe_err(|_| {}, move |e| *s.lock().unwrap() = Some(e));

    let first = first.lock().unwrap();
    let second = second.lock().unwrap();
    let (a, b) = (first.as_ref().unwrap(), second.as_ref().unwrap());
    // independently forwarded failures, identical captured content
    assert_eq!(a.assembled(), b.assembled());
    assert_eq!(a.assembled().to_string(), b.assembled().to_string());
  }

  #[test]
  fn each_decoration_captures_its_own_site() {
    let op_a = FailingScalar(1).on_assembly();
    let op_b = FailingScalar(1).on_assembly();
    assert_ne!(op_a.assembled, op_b.assembled);
  }
}
