//! Error taxonomy (spec §7). Each variant carries the context (constraint
//! index, wire name, debug string) a caller needs for direct diagnosis,
//! matching the teacher's `SynthesisError` pattern of one `thiserror` enum
//! per failure surface rather than a single opaque string.

use crate::hint::HintId;

/// Errors produced while compiling a circuit (`Builder`/`compile`).
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error("circuit.Define must be called through a pointer/owned receiver")]
    BadReceiver,
    #[error("define failed: {0}")]
    DefineFailed(String),
    #[error("define panicked: {0}")]
    BuilderPanic(String),
    #[error(transparent)]
    Unconstrained(#[from] UnconstrainedInput),
    #[error(transparent)]
    Scheduling(#[from] SchedulerError),
    #[error("assertIsLessOrEqual bound needs {bound_bits} bits but the field only has {field_bits}")]
    BoundTooWide { bound_bits: usize, field_bits: usize },
}

#[derive(thiserror::Error, Debug)]
#[error("input '{name}' is never referenced by a constraint")]
pub struct UnconstrainedInput {
    pub name: String,
}

/// Errors produced by the layer scheduler (spec §4.3).
#[derive(thiserror::Error, Debug)]
pub enum SchedulerError {
    #[error("constraint #{constraint_index} is malformed: {reason}")]
    Malformed {
        constraint_index: usize,
        reason: String,
    },
    #[error("system has a wire that never becomes solvable")]
    UnsolvableSystem,
}

/// Errors produced while solving a compiled system against a witness
/// (spec §4.4).
#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("an assignment for a variable could not be computed")]
    AssignmentMissing,
    #[error("division by zero")]
    DivisionByZero,
    #[error("witness size mismatch: got {got}, expected {expected}")]
    WitnessSizeMismatch { got: usize, expected: usize },
    #[error("output buffer size mismatch: a/b/c must each have length {expected}")]
    BufferSizeMismatch { expected: usize },
    #[error("constraint #{index} is not satisfied: {rendered_debug}")]
    UnsatisfiedConstraint {
        index: usize,
        rendered_debug: String,
    },
    #[error("hint error on wire {wire}: {cause}")]
    HintError { wire: usize, cause: String },
    #[error("missing hint function with id {id}")]
    MissingHintFunction { id: HintId },
    #[error(transparent)]
    Malformed(#[from] SchedulerError),
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Errors produced by `codec::encode`/`codec::decode` (spec §4.5).
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("encoding failed: {0}")]
    Encode(String),
    #[error("decoding failed: {0}")]
    Decode(String),
    #[error("decoded payload exceeds the configured size limit of {limit} bytes")]
    TooLarge { limit: u64 },
}
