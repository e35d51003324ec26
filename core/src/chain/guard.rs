// stagechain/src/chain/guard.rs

//! Tracks which thread is currently running a chain, so that a stage calling
//! back into its own chain is reported instead of deadlocking on the
//! non-reentrant chain lock.

use parking_lot::Mutex;
use std::thread::{self, ThreadId};

#[derive(Debug, Default)]
pub(crate) struct RunOwner {
  thread: Mutex<Option<ThreadId>>,
}

impl RunOwner {
  /// True if the calling thread is inside a run of this chain.
  pub(crate) fn is_current_thread(&self) -> bool {
    *self.thread.lock() == Some(thread::current().id())
  }

  /// Marks the calling thread as the running one until the returned guard drops.
  /// Must only be called while holding the chain lock.
  pub(crate) fn claim(&self) -> RunOwnerGuard<'_> {
    *self.thread.lock() = Some(thread::current().id());
    RunOwnerGuard { owner: self }
  }
}

/// Releases ownership on drop, including when a stage panics.
pub(crate) struct RunOwnerGuard<'a> {
  owner: &'a RunOwner,
}

impl Drop for RunOwnerGuard<'_> {
  fn drop(&mut self) {
    *self.owner.thread.lock() = None;
  }
}
