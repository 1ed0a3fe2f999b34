//! Assembly-time diagnostics: capture where a pipeline was put together so
//! a later runtime failure can be attributed to its construction site.

use std::backtrace::Backtrace;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use thiserror::Error;

/// An immutable stack-trace record captured when a pipeline stage was
/// assembled.
///
/// Cloning shares the underlying capture; the record is never recomputed
/// once taken. Two traces compare equal when they originate from the same
/// capture, regardless of how many signals they were attached to.
#[derive(Clone, Debug)]
pub struct AssemblyStackTrace {
  trace: Arc<Backtrace>,
}

impl AssemblyStackTrace {
  /// Capture the current call stack. This is the only point at which any
  /// stack inspection happens; everything downstream shares the result.
  pub fn capture() -> Self { AssemblyStackTrace { trace: Arc::new(Backtrace::force_capture()) } }

  /// Append this record's summary to an existing failure description.
  pub fn append_to(&self, description: &str) -> String {
    format!("{description}\nassembled at:\n{}", self.trace)
  }
}

impl Display for AssemblyStackTrace {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "assembled at:\n{}", self.trace)
  }
}

impl PartialEq for AssemblyStackTrace {
  fn eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.trace, &other.trace) }
}

impl Eq for AssemblyStackTrace {}

/// A failure augmented with the assembly record of the pipeline stage it
/// crossed. The original error stays accessible unchanged.
#[derive(Error, Debug)]
#[error("{}", .assembled.append_to(&.error.to_string()))]
pub struct AssemblyError<E>
where
  E: Display + Debug,
{
  error: E,
  assembled: AssemblyStackTrace,
}

impl<E> AssemblyError<E>
where
  E: Display + Debug,
{
  pub fn new(error: E, assembled: AssemblyStackTrace) -> Self { AssemblyError { error, assembled } }

  pub fn error(&self) -> &E { &self.error }

  pub fn assembled(&self) -> &AssemblyStackTrace { &self.assembled }

  pub fn into_inner(self) -> E { self.error }
}
