//! Top-level `compile()` entry point (spec §4, §6).
//!
//! Compiling a circuit is a two-pass field walk followed by one call to
//! `Circuit::define`:
//!
//! 1. Visit every field the circuit declares and allocate a public or
//!    secret wire for each, in two full passes — every `Public` field
//!    across the whole circuit first, then every `Secret` field — so
//!    wire ids land in the contiguous `[ONE, public…, secret…]` ranges
//!    the rest of the crate assumes. gnark's own struct-tag walk
//!    allocates in declaration order, interleaving public and secret
//!    fields; nothing in the wire-id contract requires that exact
//!    interleaving, so this compiler picks the simpler two-pass order
//!    (recorded in DESIGN.md as an Open Question resolution).
//! 2. Run `circuit.define(&mut builder)`, catching panics so a buggy
//!    `define` body reports as `CompileError::BuilderPanic` instead of
//!    aborting the process — mirroring gnark's own `recover()` around
//!    `circuit.Define` in `frontend/compile.go`.
//! 3. Check whether `define` poisoned the builder with a compile-time
//!    input rejection (e.g. an `assertIsLessOrEqual` bound that doesn't
//!    fit the field), surfacing it as a typed error rather than a panic.
//! 4. Check every declared input was referenced by at least one
//!    constraint, unless the caller opted out.
//! 5. Compute the layer schedule and freeze the result.

use std::panic::{catch_unwind, AssertUnwindSafe};

use ff::PrimeField;

use crate::builder::CircuitBuilder;
use crate::circuit::{Circuit, CircuitSchema, FieldTag};
use crate::compiled::CompiledR1cs;
use crate::error::CompileError;
use crate::field::CurveId;
use crate::scheduler;

/// Options controlling a single `compile()` call.
pub struct CompilerConfig {
    /// Initial constraint-vector capacity, a pure allocation hint.
    pub capacity: usize,
    /// When `true`, an input that is never referenced by a constraint is
    /// silently accepted instead of rejected with
    /// `CompileError::Unconstrained`. Mirrors gnark's
    /// `frontend.IgnoreUnconstrainedInputs()` compile option.
    pub ignore_unconstrained_inputs: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig { capacity: 0, ignore_unconstrained_inputs: false }
    }
}

/// Compiles `circuit` for `curve` into an R1CS with a computed layer
/// schedule.
pub fn compile<F, C>(curve: CurveId, circuit: &mut C, config: &CompilerConfig) -> Result<CompiledR1cs<F>, CompileError>
where
    F: PrimeField,
    C: Circuit<F>,
{
    let mut builder = CircuitBuilder::with_capacity(curve, config.capacity);

    for slot in circuit.visit_fields() {
        if slot.tag == FieldTag::Public {
            *slot.slot = builder.new_public_variable(&slot.name);
        }
    }
    for slot in circuit.visit_fields() {
        if slot.tag == FieldTag::Secret {
            *slot.slot = builder.new_secret_variable(&slot.name);
        }
    }

    let define_result = catch_unwind(AssertUnwindSafe(|| circuit.define(&mut builder)));
    let define_result = match define_result {
        Ok(r) => r,
        Err(payload) => return Err(CompileError::BuilderPanic(panic_message(payload))),
    };
    define_result.map_err(CompileError::DefineFailed)?;

    if let Some(e) = builder.take_poison() {
        return Err(e);
    }

    if !config.ignore_unconstrained_inputs {
        builder.check_variables()?;
    }

    let mut compiled = builder.finish();
    let layers = scheduler::schedule(&compiled)?;
    compiled.layers = Some(layers);

    Ok(compiled)
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "circuit definition panicked with a non-string payload".to_string()
    }
}
