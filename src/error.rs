use serde::{Deserialize, Serialize};

pub type Result<T, E = FisError> = std::result::Result<T, E>;

/// Stable codes for programmatic error handling
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Rule construction (1xxx)
    RuleMalformed = 1000,
    NoAntecedents = 1001,
    NoConsequent = 1002,
    AntecedentArity = 1003,
    ConsequentArity = 1004,
    UnknownAntecedentReference = 1005,
    UnknownConsequentReference = 1006,

    // Registries (2xxx)
    DuplicateVariable = 2000,
    DuplicateSet = 2001,
    NoSuchSet = 2002,
    InvalidFuzzySet = 2003,

    // Solving (3xxx)
    MissingArgument = 3000,
    EmptySystem = 3001,
    DomainMismatch = 3002,
    UnknownDefuzzificationMethod = 3003,
    UnknownInferenceType = 3004,
    OffGridInput = 3005,
    UnresolvedReference = 3006,
}

/// Which side of a system a variable lives on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableRole {
    Input,
    Output,
}

impl std::fmt::Display for VariableRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => f.write_str("input"),
            Self::Output => f.write_str("output"),
        }
    }
}

/// What a system was missing when asked to solve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmptyPart {
    Inputs,
    Outputs,
    Rules,
}

impl std::fmt::Display for EmptyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inputs => f.write_str("No inputs defined"),
            Self::Outputs => f.write_str("No outputs defined"),
            Self::Rules => f.write_str("No rules defined"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FisError {
    #[error("Rule string is malformed: {0}")]
    RuleMalformed(String),

    #[error("No antecedents (inputs) specified")]
    NoAntecedents,

    #[error("No consequent (output) specified")]
    NoConsequent,

    #[error("Antecedent {index} must have exactly two parts, found {found}")]
    AntecedentArity { index: usize, found: usize },

    #[error("Consequent must have exactly two parts, found {found}")]
    ConsequentArity { found: usize },

    #[error("Antecedents could not be created (at least one set or variable does not exist)")]
    UnknownAntecedentReference,

    #[error("Consequent cannot be created (variable {variable} or set {set} do not exist)")]
    UnknownConsequentReference { variable: String, set: String },

    #[error("An {role} with the name {name} already exists")]
    DuplicateVariable { role: VariableRole, name: String },

    #[error("A set with the name {0} already exists")]
    DuplicateSet(String),

    #[error("No set with the name {0} exists")]
    NoSuchSet(String),

    #[error("Invalid fuzzy set {name}: {reason}")]
    InvalidFuzzySet { name: String, reason: String },

    #[error("Not all input variables have an argument provided (missing {0})")]
    MissingArgument(String),

    #[error("Cannot solve: {0}")]
    EmptySystem(EmptyPart),

    #[error("Fuzzy sets {left} and {right} are not defined over the same value grid")]
    DomainMismatch { left: String, right: String },

    #[error("Unknown defuzzification method: {0}")]
    UnknownDefuzzificationMethod(String),

    #[error("Unknown inference type: {0}")]
    UnknownInferenceType(String),

    #[error("Value {value} is not a sample of set {set}")]
    OffGridInput { set: String, value: f64 },

    #[error("Unable to find variable {variable} with set {set}")]
    UnresolvedReference { variable: String, set: String },
}

impl FisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RuleMalformed(_) => ErrorCode::RuleMalformed,
            Self::NoAntecedents => ErrorCode::NoAntecedents,
            Self::NoConsequent => ErrorCode::NoConsequent,
            Self::AntecedentArity { .. } => ErrorCode::AntecedentArity,
            Self::ConsequentArity { .. } => ErrorCode::ConsequentArity,
            Self::UnknownAntecedentReference => ErrorCode::UnknownAntecedentReference,
            Self::UnknownConsequentReference { .. } => ErrorCode::UnknownConsequentReference,
            Self::DuplicateVariable { .. } => ErrorCode::DuplicateVariable,
            Self::DuplicateSet(_) => ErrorCode::DuplicateSet,
            Self::NoSuchSet(_) => ErrorCode::NoSuchSet,
            Self::InvalidFuzzySet { .. } => ErrorCode::InvalidFuzzySet,
            Self::MissingArgument(_) => ErrorCode::MissingArgument,
            Self::EmptySystem(_) => ErrorCode::EmptySystem,
            Self::DomainMismatch { .. } => ErrorCode::DomainMismatch,
            Self::UnknownDefuzzificationMethod(_) => ErrorCode::UnknownDefuzzificationMethod,
            Self::UnknownInferenceType(_) => ErrorCode::UnknownInferenceType,
            Self::OffGridInput { .. } => ErrorCode::OffGridInput,
            Self::UnresolvedReference { .. } => ErrorCode::UnresolvedReference,
        }
    }
}

#[test]
fn test_empty_system_messages() {
    assert_eq!(
        FisError::EmptySystem(EmptyPart::Inputs).to_string(),
        "Cannot solve: No inputs defined"
    );
    assert_eq!(
        FisError::EmptySystem(EmptyPart::Rules).to_string(),
        "Cannot solve: No rules defined"
    );
    assert_eq!(
        FisError::DuplicateVariable {
            role: VariableRole::Output,
            name: "Tip".into()
        }
        .to_string(),
        "An output with the name Tip already exists"
    );
    assert_eq!(FisError::NoSuchSet("Good".into()).code(), ErrorCode::NoSuchSet);
}
