use std::convert::Infallible;

use crate::observer::Observer;
use crate::perhaps::{Perhaps, PerhapsSource, ScalarValue};
use crate::subscription::DeferredSubscription;

/// Creates a source holding a single, already-materialized value.
///
/// The value is delivered once the downstream requests demand, then the
/// source completes. Never emits an error.
///
/// # Arguments
///
/// * `v` - The value to emit.
///
/// # Examples
///
/// ```
/// use rxperhaps::prelude::*;
///
/// perhaps::of(123).subscribe(|v| println!("{},", v));
/// ```
pub fn of<Item>(v: Item) -> OfPerhaps<Item> { OfPerhaps(v) }

#[derive(Clone)]
pub struct OfPerhaps<Item>(pub(crate) Item);

impl<Item> Perhaps for OfPerhaps<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<Item, O> PerhapsSource<O> for OfPerhaps<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = DeferredSubscription<Item, Infallible, O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let sub = DeferredSubscription::new(observer);
    sub.complete(self.0);
    sub
  }
}

impl<Item> ScalarValue for OfPerhaps<Item>
where
  Item: Clone,
{
  #[inline]
  fn value(&self) -> Item { self.0.clone() }
}

/// Creates a source that emits the value or the error of a [`Result`].
///
/// # Arguments
///
/// * `r` - A [`Result`] to take the value, or the error to fail with, from.
///
/// # Examples
///
/// ```
/// use rxperhaps::prelude::*;
///
/// perhaps::of_result(Ok::<_, ()>(1234)).subscribe_all(
///   |v| println!("{},", v),
///   |_| {},
///   || {},
/// );
/// ```
pub fn of_result<Item, Err>(r: Result<Item, Err>) -> ResultPerhaps<Item, Err> { ResultPerhaps(r) }

#[derive(Clone)]
pub struct ResultPerhaps<Item, Err>(pub(crate) Result<Item, Err>);

impl<Item, Err> Perhaps for ResultPerhaps<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> PerhapsSource<O> for ResultPerhaps<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = DeferredSubscription<Item, Err, O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let sub = DeferredSubscription::new(observer);
    match self.0 {
      Ok(value) => sub.complete(value),
      Err(err) => sub.error(err),
    }
    sub
  }
}
