//! iolens-toric
//!
//! The toric IOL power-vector decision engine: astigmatism vector math,
//! the posterior-cornea estimator, SIA composition, the ELP-dependent
//! toricity conversion, catalog search, and the policy-driven
//! recommendation layer.
//!
//! Everything here is pure and deterministic. Inputs arrive as plain
//! scalars from the parsing and base-formula layers; the output is a
//! [`iolens_core::models::decision::ToricDecisionResult`].

pub mod calculator;
pub mod decision;
pub mod policy;
pub mod posterior;
pub mod selector;
pub mod toricity;
pub mod vector;
