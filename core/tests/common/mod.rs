// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use stagechain::{Chain, Next};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;

// --- Common Plan Types ---
#[derive(Clone, Debug, Default)]
pub struct TestPlan {
  pub count: i32,
  pub stages_executed: Vec<String>,
  pub errors_seen: Vec<Option<String>>,
  pub stop_at: Option<String>,
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Upstream unavailable: {0}")]
  Upstream(String),
}

pub type TestChain = Chain<TestPlan, TestError>;

// --- Common Stage Creators ---

/// Records itself, bumps the counter and continues unless `stop_at` names it.
pub fn recording_stage(
  stage_name: &'static str,
) -> impl Fn(&mut TestPlan, Option<TestError>, Next<'_, TestPlan, TestError>) + Send + Sync + 'static {
  move |plan, err, next| {
    plan.count += 1;
    plan.stages_executed.push(stage_name.to_string());
    plan.errors_seen.push(err.as_ref().map(|e| e.to_string()));
    tracing::debug!(target: "test_stages", stage = stage_name, count = plan.count, "executed");
    if plan.stop_at.as_deref() == Some(stage_name) {
      return;
    }
    next.call(plan, err);
  }
}

/// Records itself and continues with `error` replacing whatever it received.
pub fn failing_stage(
  stage_name: &'static str,
  error: TestError,
) -> impl Fn(&mut TestPlan, Option<TestError>, Next<'_, TestPlan, TestError>) + Send + Sync + 'static {
  move |plan, _err, next| {
    plan.stages_executed.push(stage_name.to_string());
    tracing::warn!(target: "test_stages", stage = stage_name, error = %error, "handing error to next stage");
    next.call(plan, Some(error.clone()));
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Atomic counters for checking execution counts ---
pub static STAGE_EXEC_COUNTER: Lazy<Arc<AtomicUsize>> = Lazy::new(|| Arc::new(AtomicUsize::new(0)));

pub fn reset_counters() {
  STAGE_EXEC_COUNTER.store(0, Ordering::SeqCst);
}
