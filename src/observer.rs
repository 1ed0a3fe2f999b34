//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! For a 0-or-1 value source the consumer sees at most one `next`, followed
//! by exactly one of `error` or `complete`.

use std::convert::Infallible;

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives at most one value, then exactly one terminal
/// notification from a source.
pub trait Observer<Item, Err> {
  /// Receive the single value from the source
  fn next(&mut self, value: Item);

  /// Handle an error from the source
  ///
  /// This consumes the observer, as no more signals may follow an error
  fn error(self, err: Err);

  /// Handle completion of the source
  ///
  /// This consumes the observer, as no more signals may follow completion
  fn complete(self);

  /// Checks if the observer is closed.
  ///
  /// Returns `true` if the observer is closed and will not accept more
  /// signals.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// FnMutObserver - Closure adapter
// ============================================================================

/// Blanket implementation of Observer for closures
///
/// This enables ergonomic subscription syntax:
/// `source.subscribe(|v| println!("{}", v))`. The closure becomes the `next`
/// handler; `error` is ruled out by `Infallible` and `complete` is ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item, Infallible> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, _err: Infallible) {}

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Closure triples and pairs for the subscribe sugar
// ============================================================================

/// Observer built from `next`, `error` and `complete` closures.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer built from `next` and `error` closures; completion is ignored.
#[derive(Clone)]
pub struct ObserverErr<N, E> {
  next: N,
  error: E,
}

impl<N, E> ObserverErr<N, E> {
  #[inline]
  pub fn new(next: N, error: E) -> Self { ObserverErr { next, error } }
}

impl<Item, Err, N, E> Observer<Item, Err> for ObserverErr<N, E>
where
  N: FnMut(Item),
  E: FnOnce(Err),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer built from `next` and `complete` closures, for sources that
/// cannot fail.
#[derive(Clone)]
pub struct ObserverComp<N, C> {
  next: N,
  complete: C,
}

impl<N, C> ObserverComp<N, C> {
  #[inline]
  pub fn new(next: N, complete: C) -> Self { ObserverComp { next, complete } }
}

impl<Item, N, C> Observer<Item, Infallible> for ObserverComp<N, C>
where
  N: FnMut(Item),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, _err: Infallible) {}

  #[inline]
  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod test {
  use super::*;

  struct TestObserver {
    values: Vec<i32>,
  }

  impl Observer<i32, ()> for TestObserver {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(self, _: ()) {}

    fn complete(self) {}

    fn is_closed(&self) -> bool { false }
  }

  #[test]
  fn observer_trait() {
    let mut obs = TestObserver { values: vec![] };
    obs.next(1);
    assert_eq!(obs.values, vec![1]);
    assert!(!obs.is_closed());
  }

  #[test]
  fn closure_as_observer() {
    let mut count = 0;
    let mut closure_obs = FnMutObserver(|v: i32| {
      count += v;
    });

    closure_obs.next(10);
    closure_obs.next(20);
    assert_eq!(count, 30);
  }

  #[test]
  fn observer_all_terminal_consumes() {
    let mut seen = None;
    let mut completed = false;
    {
      let mut obs = ObserverAll::new(|v: i32| seen = Some(v), |_: ()| {}, || completed = true);
      obs.next(3);
      obs.complete();
    }
    assert_eq!(seen, Some(3));
    assert!(completed);
  }
}
