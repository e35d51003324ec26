// stagechain/src/chain/execution.rs

//! Contains `Chain::process()` and its non-blocking variants.
//!
//! All of them hold the chain lock for the entire run: stages execute
//! synchronously, nested inside the call that acquired it.

use crate::chain::definition::Chain;
use crate::core::next::Next;
use crate::core::step::StageDef;
use crate::error::{ChainError, ChainResult};
use parking_lot::MutexGuard;
use std::time::Duration;
use tracing::{event, instrument, Level};

impl<P, E> Chain<P, E>
where
  P: 'static,
  E: 'static,
{
  /// Runs the chain on `plan`, starting at the first stage with no error.
  ///
  /// Execution goes exactly as far as the stages call their continuations.
  /// Nothing about the outcome is returned; stages report through the plan.
  /// Blocks while another run of this chain is in flight.
  ///
  /// # Panics
  ///
  /// If called from inside one of this chain's stages.
  #[instrument(name = "Chain::process", skip_all, fields(chain = %self.name))]
  pub fn process(&self, plan: &mut P) -> &Self {
    self.ensure_not_reentrant("process");
    let stages = self.stages.lock();
    self.run_locked(stages, plan);
    self
  }

  /// Like `process`, but fails with `ChainError::Busy` instead of waiting
  /// for another run to finish.
  #[instrument(name = "Chain::try_process", skip_all, fields(chain = %self.name), err(Display))]
  pub fn try_process(&self, plan: &mut P) -> ChainResult<&Self> {
    self.check_not_reentrant("try_process")?;
    let stages = self.stages.try_lock().ok_or_else(|| {
      event!(Level::DEBUG, "Chain lock held by another run.");
      ChainError::Busy {
        chain: self.name.clone(),
      }
    })?;
    self.run_locked(stages, plan);
    Ok(self)
  }

  /// Like `process`, but gives up with `ChainError::LockTimeout` after
  /// waiting `timeout` for another run to finish.
  #[instrument(name = "Chain::try_process_for", skip_all, fields(chain = %self.name, timeout = ?timeout), err(Display))]
  pub fn try_process_for(&self, plan: &mut P, timeout: Duration) -> ChainResult<&Self> {
    self.check_not_reentrant("try_process_for")?;
    let stages = self.stages.try_lock_for(timeout).ok_or_else(|| ChainError::LockTimeout {
      chain: self.name.clone(),
      timeout,
    })?;
    self.run_locked(stages, plan);
    Ok(self)
  }

  fn check_not_reentrant(&self, operation: &'static str) -> ChainResult<()> {
    if self.owner.is_current_thread() {
      return Err(ChainError::Reentrant {
        chain: self.name.clone(),
        operation,
      });
    }
    Ok(())
  }

  fn run_locked(&self, stages: MutexGuard<'_, Vec<StageDef<P, E>>>, plan: &mut P) {
    if stages.is_empty() {
      event!(Level::DEBUG, "Chain is empty, nothing to run.");
      return;
    }
    event!(Level::DEBUG, num_stages = stages.len(), "Chain run starting.");
    // Declared after `stages` so ownership is released before the lock.
    let _owner = self.owner.claim();
    Next::new(&stages, 0).call(plan, None);
    event!(Level::DEBUG, "Chain run returned.");
  }
}
