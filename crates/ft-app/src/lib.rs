//! Fit360 Application Orchestration Layer
//!
//! This crate contains business logic use cases and runtime orchestration:
//! the onboarding state engine, the session gate, and the thin
//! authentication and plan-selection use cases.

pub mod builder;
pub mod usecases;

pub use builder::{App, AppDeps};
pub use usecases::auth::{RequestPasswordReset, SignIn, SignOut, SignUp};
pub use usecases::onboarding::OnboardingEngine;
pub use usecases::plan::ChoosePlan;
pub use usecases::session::SessionGate;
