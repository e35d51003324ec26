// stagechain/src/chain/definition.rs

//! Contains the `Chain<P, E>` struct and the methods that build and inspect it.

use crate::chain::guard::RunOwner;
use crate::core::control::ChainState;
use crate::core::next::Next;
use crate::core::step::{BoxedStage, Stage, StageDef};
use parking_lot::Mutex;
use tracing::{event, instrument, Level};

const DEFAULT_CHAIN_NAME: &str = "chain";

/// An ordered list of stages run by explicit continuation.
///
/// `P` is the plan threaded through every stage and `E` the error value
/// handed from stage to stage (`anyhow::Error` unless chosen otherwise).
///
/// One lock guards the stage list. `process` holds it for the whole run, so
/// runs of the same chain are serialized and `add`/`clear` wait for an
/// in-flight run to finish.
///
/// # Usage contract
///
/// A stage must not call `add`, `process` or `clear` on the chain that is
/// running it. On the running thread this is caught and panics (the `try_*`
/// variants return `ChainError::Reentrant` instead). If a stage hands such a
/// call to another thread and waits for it, the two deadlock.
pub struct Chain<P, E = anyhow::Error>
where
  P: 'static,
  E: 'static,
{
  pub(crate) name: String,
  pub(crate) stages: Mutex<Vec<StageDef<P, E>>>,
  pub(crate) owner: RunOwner,
}

impl<P, E> Chain<P, E>
where
  P: 'static,
  E: 'static,
{
  /// Creates an empty chain named `"chain"`.
  pub fn new() -> Self {
    Self::named(DEFAULT_CHAIN_NAME)
  }

  /// Creates an empty chain with a name used in logs and errors.
  pub fn named<S: Into<String>>(name: S) -> Self {
    Self {
      name: name.into(),
      stages: Mutex::new(Vec::new()),
      owner: RunOwner::default(),
    }
  }

  /// Panics if the calling thread is currently running this chain.
  pub(crate) fn ensure_not_reentrant(&self, operation: &'static str) {
    if self.owner.is_current_thread() {
      event!(Level::ERROR, chain = %self.name, operation, "Chain re-entered from one of its own stages.");
      // Waiting on the lock here would never return.
      panic!(
        "stagechain usage error: chain '{}' re-entered from one of its own stages via `{}`",
        self.name, operation
      );
    }
  }

  /// Appends a stage. It is named `stage-{index}` in logs.
  ///
  /// The stage receives `(plan, err, next)`; see [`Stage`].
  pub fn add<F>(&self, stage_fn: F) -> &Self
  where
    F: Fn(&mut P, Option<E>, Next<'_, P, E>) + Send + Sync + 'static,
  {
    self.push_stage(None, Box::new(stage_fn))
  }

  /// Appends a named stage.
  pub fn add_named<S, F>(&self, stage_name: S, stage_fn: F) -> &Self
  where
    S: Into<String>,
    F: Fn(&mut P, Option<E>, Next<'_, P, E>) + Send + Sync + 'static,
  {
    self.push_stage(Some(stage_name.into()), Box::new(stage_fn))
  }

  /// Appends a named stage given as a [`Stage`] implementor.
  pub fn add_stage<S, T>(&self, stage_name: S, stage: T) -> &Self
  where
    S: Into<String>,
    T: Stage<P, E> + 'static,
  {
    self.push_stage(Some(stage_name.into()), Box::new(stage))
  }

  #[instrument(name = "Chain::add", skip_all, fields(chain = %self.name))]
  fn push_stage(&self, stage_name: Option<String>, stage: BoxedStage<P, E>) -> &Self {
    self.ensure_not_reentrant("add");
    let mut stages = self.stages.lock();
    let index = stages.len();
    let stage_name = stage_name.unwrap_or_else(|| format!("stage-{}", index));
    // The previous last stage's continuation resolves to this index from now on.
    event!(Level::DEBUG, stage_name = %stage_name, stage_index = index, "Stage added.");
    stages.push(StageDef::new(stage_name, stage));
    self
  }

  /// Removes every stage. Waits for an in-flight run to finish first.
  #[instrument(name = "Chain::clear", skip_all, fields(chain = %self.name))]
  pub fn clear(&self) -> &Self {
    self.ensure_not_reentrant("clear");
    let mut stages = self.stages.lock();
    event!(Level::DEBUG, removed = stages.len(), "Chain cleared.");
    stages.clear();
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Number of registered stages. Waits for an in-flight run.
  pub fn len(&self) -> usize {
    self.ensure_not_reentrant("len");
    self.stages.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn state(&self) -> ChainState {
    ChainState::for_len(self.len())
  }

  /// Stage names in invocation order.
  pub fn stage_names(&self) -> Vec<String> {
    self.ensure_not_reentrant("stage_names");
    self.stages.lock().iter().map(|s| s.name.clone()).collect()
  }
}

impl<P: 'static, E: 'static> Default for Chain<P, E> {
  fn default() -> Self {
    Self::new()
  }
}

// Doesn't block on a running chain; shows `<running>` instead of the stages.
impl<P: 'static, E: 'static> std::fmt::Debug for Chain<P, E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut dbg = f.debug_struct("Chain");
    dbg.field("name", &self.name);
    match self.stages.try_lock() {
      Some(stages) => dbg.field("stages", &stages.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()),
      None => dbg.field("stages", &format_args!("<running>")),
    };
    dbg.finish()
  }
}
