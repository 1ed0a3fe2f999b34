use std::convert::Infallible;
use std::marker::PhantomData;

use crate::observer::Observer;
use crate::perhaps::{Perhaps, PerhapsSource};
use crate::subscription::SingleSubscription;

/// Creates a source that produces no value.
///
/// Completes immediately on subscribe. Never emits an error.
///
/// # Examples
/// ```
/// use rxperhaps::prelude::*;
///
/// perhaps::empty()
///   .subscribe(|v: i32| println!("{},", v));
///
/// // Result: nothing printed
/// ```
pub fn empty<Item>() -> EmptyPerhaps<Item> { EmptyPerhaps(PhantomData) }

#[derive(Clone)]
pub struct EmptyPerhaps<Item>(PhantomData<Item>);

impl<Item> Perhaps for EmptyPerhaps<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<Item, O> PerhapsSource<O> for EmptyPerhaps<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = SingleSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    observer.complete();
    SingleSubscription::closed()
  }
}

/// Creates a source that emits no value and terminates with an error.
///
/// # Arguments
///
/// * `err` - The error to terminate with.
pub fn throw<Item, Err>(err: Err) -> ThrowPerhaps<Item, Err> {
  ThrowPerhaps { err, _hint: PhantomData }
}

#[derive(Clone)]
pub struct ThrowPerhaps<Item, Err> {
  err: Err,
  _hint: PhantomData<Item>,
}

impl<Item, Err> Perhaps for ThrowPerhaps<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> PerhapsSource<O> for ThrowPerhaps<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = SingleSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    observer.error(self.err);
    SingleSubscription::closed()
  }
}

/// Creates a source that never signals anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item, Err>() -> NeverPerhaps<Item, Err> { NeverPerhaps(PhantomData) }

#[derive(Clone)]
pub struct NeverPerhaps<Item, Err>(PhantomData<(Item, Err)>);

impl<Item, Err> Perhaps for NeverPerhaps<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> PerhapsSource<O> for NeverPerhaps<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = SingleSubscription;

  fn actual_subscribe(self, _observer: O) -> Self::Unsub { SingleSubscription::default() }
}
