//! Shared-ownership cell used by subscription state that is mutated from
//! both the producing and the consuming side of a pipeline.

use std::sync::{Arc, Mutex, MutexGuard};

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

/// `Arc<Mutex<T>>` with a compact deref surface. Every component of this
/// crate is thread-safe, so this is the only shared cell flavor.
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> RcDeref for MutArc<T> {
  type Target<'a>
    = MutexGuard<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> { self.0.lock().unwrap() }
}

impl<T> RcDerefMut for MutArc<T> {
  type Target<'a>
    = MutexGuard<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> { self.0.lock().unwrap() }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn shared_mutation() {
    let a = MutArc::own(1);
    let b = a.clone();
    *b.rc_deref_mut() += 1;
    assert_eq!(*a.rc_deref(), 2);
  }
}
