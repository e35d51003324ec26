// stagechain/src/core/step.rs

//! Defines the `Stage` trait and the chain's internal record of a registered stage.

use super::next::Next;
use tracing::{event, span, Level};

/// One unit of work in a chain.
///
/// A stage receives the plan, the error handed over by the previous stage
/// (`None` for the first stage) and the continuation for the rest of the chain.
/// It is free to mutate the plan, replace the error, and call `next` zero, one
/// or several times. Not calling `next` ends the run after this stage.
///
/// Closures of the shape `Fn(&mut P, Option<E>, Next<'_, P, E>)` implement this
/// trait, so most callers never name it; implement it directly for stages that
/// carry their own configuration.
pub trait Stage<P, E>: Send + Sync
where
  P: 'static,
  E: 'static,
{
  fn call(&self, plan: &mut P, err: Option<E>, next: Next<'_, P, E>);
}

impl<P, E, F> Stage<P, E> for F
where
  P: 'static,
  E: 'static,
  F: Fn(&mut P, Option<E>, Next<'_, P, E>) + Send + Sync,
{
  fn call(&self, plan: &mut P, err: Option<E>, next: Next<'_, P, E>) {
    self(plan, err, next)
  }
}

pub(crate) type BoxedStage<P, E> = Box<dyn Stage<P, E> + Send + Sync>;

/// A registered stage together with the name it is logged under.
pub(crate) struct StageDef<P: 'static, E: 'static> {
  pub(crate) name: String,
  pub(crate) stage: BoxedStage<P, E>,
}

impl<P: 'static, E: 'static> StageDef<P, E> {
  pub(crate) fn new(name: String, stage: BoxedStage<P, E>) -> Self {
    Self { name, stage }
  }

  /// Runs this stage as position `index` of `stages`, handing it the
  /// continuation bound to `index + 1`.
  pub(crate) fn invoke(&self, index: usize, stages: &[StageDef<P, E>], plan: &mut P, err: Option<E>) {
    let stage_span = span!(
      Level::DEBUG,
      "chain_stage",
      stage_name = self.name.as_str(),
      stage_index = index,
      has_error = err.is_some()
    );
    let _stage_span_guard = stage_span.enter();
    event!(Level::TRACE, "Invoking stage.");
    self.stage.call(plan, err, Next::new(stages, index + 1));
  }
}

// Stage objects don't implement Debug; show the name only.
impl<P: 'static, E: 'static> std::fmt::Debug for StageDef<P, E> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StageDef").field("name", &self.name).finish()
  }
}
