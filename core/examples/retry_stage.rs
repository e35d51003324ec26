// stagechain/examples/retry_stage.rs

//! A stage that retries the rest of the chain by calling `next` more than once.

use stagechain::{Chain, Next, Stage};
use tracing::{info, warn};

#[derive(Debug, Default)]
struct DeployPlan {
  attempts: u32,
  succeeded: bool,
}

#[derive(Debug, thiserror::Error)]
#[error("cluster unreachable (attempt {0})")]
struct Unreachable(u32);

/// Re-runs the remaining stages until they mark the plan successful.
struct Retry {
  max_attempts: u32,
}

impl Stage<DeployPlan, Unreachable> for Retry {
  fn call(&self, plan: &mut DeployPlan, err: Option<Unreachable>, next: Next<'_, DeployPlan, Unreachable>) {
    if let Some(e) = err {
      warn!(error = %e, "Upstream error before retry stage");
    }
    for attempt in 1..=self.max_attempts {
      info!(attempt, "Running remaining stages");
      next.call(plan, None);
      if plan.succeeded {
        return;
      }
    }
    warn!(max_attempts = self.max_attempts, "Giving up");
  }
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let chain = Chain::<DeployPlan, Unreachable>::named("deploy");
  chain
    .add_stage("retry", Retry { max_attempts: 5 })
    .add_named("connect", |plan, err, next| {
      plan.attempts += 1;
      if plan.attempts < 3 {
        next.call(plan, Some(Unreachable(plan.attempts)));
      } else {
        next.call(plan, err);
      }
    })
    .add_named("apply", |plan, err, _next| match err {
      Some(e) => warn!(error = %e, "Apply skipped"),
      None => plan.succeeded = true,
    });

  let mut plan = DeployPlan::default();
  chain.process(&mut plan);
  info!(?plan, "Done");
}
