//! Mamdani fuzzy inference over discretized linguistic variables.
//!
//! ```
//! use fuzzy_inference::{
//!     DefuzzificationMethod, FuzzyInferenceSystem, FuzzySet, InferenceType, Inputs, Linspace, LinguisticVariable,
//! };
//!
//! let grid = || Linspace::with_step(0., 10., 1.);
//! let service = LinguisticVariable::with_sets(
//!     "Service",
//!     [
//!         FuzzySet::sample("Poor", grid(), |x| 1. - x / 10.)?,
//!         FuzzySet::sample("Good", grid(), |x| x / 10.)?,
//!     ],
//! )?;
//! let tip = LinguisticVariable::with_sets(
//!     "Tip",
//!     [
//!         FuzzySet::sample("Low", grid(), |x| 1. - x / 5.)?,
//!         FuzzySet::sample("High", grid(), |x| x / 5. - 1.)?,
//!     ],
//! )?;
//!
//! let mut tipper = FuzzyInferenceSystem::new("Tipper");
//!
//! tipper
//!     .add_input(service)?
//!     .add_output(tip)?
//!     .add_rule("IF Service IS Poor THEN Tip IS Low")?
//!     .add_rule("IF Service IS Good THEN Tip IS High")?;
//!
//! let tip = tipper.solve(
//!     InferenceType::Mamdani,
//!     &Inputs::from([("Service", 10.)]),
//!     DefuzzificationMethod::LargestOfMaxima,
//! )?;
//!
//! assert_eq!(tip, 10.);
//! # Ok::<(), fuzzy_inference::FisError>(())
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod ops;
mod outputs;
mod rules;
mod set;
mod system;
mod variable;

pub use config::{GridLookup, SolverConfig, ZeroHeightPolicy};
pub use dsl::RuleSpec;
pub use error::{EmptyPart, ErrorCode, FisError, Result, VariableRole};
pub use inference::{combine_sets_with_maximum, MamdaniInference};
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use ops::{DefuzzificationMethod, InferenceType, RuleOperator};
pub use outputs::Outputs;
pub use rules::{Antecedent, Consequent, LinguisticRule, Proposition};
pub use set::{FuzzySet, FuzzyValue};
pub use system::FuzzyInferenceSystem;
pub use variable::LinguisticVariable;
