// stagechain/examples/basic_chain.rs

use stagechain::Chain;
use tracing::info;

// 1. Define the plan threaded through the chain
#[derive(Debug, Default)]
struct ImportPlan {
  source: String,
  components: Vec<String>,
  imported: usize,
}

fn main() {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

  info!("--- Basic Chain Example ---");

  // 2. Build the chain. Every stage decides whether to continue.
  let chain = Chain::<ImportPlan>::named("import");
  chain
    .add_named("parse", |plan, err, next| {
      plan.components = plan.source.split(',').map(|c| c.trim().to_string()).collect();
      info!(count = plan.components.len(), "Parsed components");
      next.call(plan, err);
    })
    .add_named("validate", |plan, _err, next| {
      let invalid: Vec<_> = plan.components.iter().filter(|c| c.is_empty()).collect();
      if invalid.is_empty() {
        next.call(plan, None);
      } else {
        let err = anyhow::anyhow!("{} empty component name(s)", invalid.len());
        next.call(plan, Some(err));
      }
    })
    .add_named("store", |plan, err, _next| {
      // Last stage: report and stop.
      match err {
        Some(e) => info!(error = %e, "Import rejected"),
        None => {
          plan.imported = plan.components.len();
          info!(imported = plan.imported, "Import stored");
        }
      }
    });

  // 3. Run it
  let mut plan = ImportPlan {
    source: "Deployment, Service, ConfigMap".to_string(),
    ..Default::default()
  };
  chain.process(&mut plan);
  info!(?plan, "Final plan");

  let mut broken = ImportPlan {
    source: "Deployment,,Service".to_string(),
    ..Default::default()
  };
  chain.process(&mut broken);
  info!(imported = broken.imported, "Broken plan imported nothing");
}
