//! Hint records and hint functions (spec §3, §6).
//!
//! A hint is a trusted, caller-supplied function the solver invokes to
//! compute one or more internal wires from already-solved inputs; the
//! surrounding constraint structure is expected to then *check* the hint's
//! output (e.g. `to_binary`'s aggregate constraint checks the bits a hint
//! produced). Built-in hints for bit decomposition, `is_zero` and division
//! by inverse are registered by default, mirroring gnark's
//! `hint.GetAll()`.

use std::collections::HashMap;
use std::sync::Arc;

use ff::{Field, PrimeField};
use num_bigint::BigUint;

use crate::error::SynthesisError;
use crate::field::CurveId;
use crate::term::LinearExpression;
use crate::wire::WireId;

/// A stable 64-bit id identifying a hint function, analogous to gnark's
/// hint UUIDs.
pub type HintId = u64;

pub const BIT_DECOMPOSITION_HINT_ID: HintId = 0x4249_5444_4543_4F4D; // "BITDECOM"
pub const IS_ZERO_HINT_ID: HintId = 0x4953_5A45_524F_0000; // "ISZERO"
pub const INVERSE_HINT_ID: HintId = 0x494E_5645_5253_4500; // "INVERSE"

/// One input to a hint: either a linear expression to evaluate, or a
/// constant coefficient (interned in the owning system's coefficient
/// table). Folding a term or a linear expression into the same shape is
/// handled by the solver's single `evaluate` helper (spec §9).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum HintInput {
    Expr(LinearExpression),
    Constant(usize),
}

/// `{ id: hint_fn_id, inputs: [LE | constant], outputs: [wire_id] }`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Hint {
    pub id: HintId,
    pub inputs: Vec<HintInput>,
    pub outputs: Vec<WireId>,
}

/// A hint function: `fn(curve_id, inputs, outputs) -> Result<(), _>`, with a
/// stable id and an `nb_outputs` signature (spec §6).
pub trait HintFunction<F: PrimeField>: Send + Sync {
    fn id(&self) -> HintId;

    fn nb_outputs(&self, curve: CurveId, nb_inputs: usize) -> usize;

    fn call(
        &self,
        curve: CurveId,
        inputs: &[BigUint],
        outputs: &mut [BigUint],
    ) -> Result<(), SynthesisError>;
}

/// Read-only table of registered hint functions, looked up by id during
/// solving.
pub struct HintRegistry<F: PrimeField> {
    functions: HashMap<HintId, Arc<dyn HintFunction<F>>>,
}

impl<F: PrimeField> Default for HintRegistry<F> {
    fn default() -> Self {
        let mut registry = HintRegistry { functions: HashMap::new() };
        registry.register(Arc::new(BitDecompositionHint));
        registry.register(Arc::new(IsZeroHint));
        registry.register(Arc::new(InverseHint));
        registry
    }
}

impl<F: PrimeField> HintRegistry<F> {
    pub fn empty() -> Self {
        HintRegistry { functions: HashMap::new() }
    }

    /// Registers `f`, overwriting any previously registered function with
    /// the same id. Caller-supplied hints (`SolverConfig::hint_functions`)
    /// are appended after the default set this way, consistent with
    /// `backend.WithHints`.
    pub fn register(&mut self, f: Arc<dyn HintFunction<F>>) {
        self.functions.insert(f.id(), f);
    }

    pub fn get(&self, id: HintId) -> Option<&Arc<dyn HintFunction<F>>> {
        self.functions.get(&id)
    }
}

/// Decomposes a field element into `nb_outputs` little-endian bits.
/// Invoked by `Builder::to_binary`; the builder's aggregate constraint
/// checks that `Sum 2^i * b_i == a`.
pub struct BitDecompositionHint;

impl<F: PrimeField> HintFunction<F> for BitDecompositionHint {
    fn id(&self) -> HintId {
        BIT_DECOMPOSITION_HINT_ID
    }

    fn nb_outputs(&self, _curve: CurveId, _nb_inputs: usize) -> usize {
        // The number of bits is carried by the caller via the number of
        // output wires it reserved; this default is only used when a
        // caller queries it without that context.
        0
    }

    fn call(
        &self,
        _curve: CurveId,
        inputs: &[BigUint],
        outputs: &mut [BigUint],
    ) -> Result<(), SynthesisError> {
        let value = &inputs[0];
        for (i, out) in outputs.iter_mut().enumerate() {
            *out = (value >> i) & BigUint::from(1u8);
        }
        Ok(())
    }
}

/// Computes the pair `(v, w)` used by `Builder::is_zero`: `v = (a == 0) ?
/// 1 : 0`, and `w` the helper satisfying `v + a*w = 1` — `w = 1/a` when
/// `a != 0`, and `w = 0` (arbitrary, since the constraint collapses to
/// `1 = 1` in that case) when `a == 0`. Computing both in one hint call
/// avoids a second, fallible inversion hint that would reject zero input.
pub struct IsZeroHint;

impl<F: PrimeField> HintFunction<F> for IsZeroHint {
    fn id(&self) -> HintId {
        IS_ZERO_HINT_ID
    }

    fn nb_outputs(&self, _curve: CurveId, _nb_inputs: usize) -> usize {
        2
    }

    fn call(
        &self,
        _curve: CurveId,
        inputs: &[BigUint],
        outputs: &mut [BigUint],
    ) -> Result<(), SynthesisError> {
        let zero = BigUint::from(0u8);
        if inputs[0] == zero {
            outputs[0] = BigUint::from(1u8);
            outputs[1] = zero;
            return Ok(());
        }
        let a: F = crate::field::biguint_to_field(&inputs[0])
            .ok_or(SynthesisError::DivisionByZero)?;
        let inv: Option<F> = a.invert().into();
        let inv = inv.ok_or(SynthesisError::DivisionByZero)?;
        outputs[0] = zero;
        outputs[1] = crate::field::field_to_biguint(&inv);
        Ok(())
    }
}

/// Computes the multiplicative inverse of `a` mod the field's modulus.
/// Invoked by `Builder::inverse`. Fails (`HintError`) when `a == 0`,
/// matching the spec's "fails to solve when a = 0".
pub struct InverseHint;

impl<F: PrimeField> HintFunction<F> for InverseHint {
    fn id(&self) -> HintId {
        INVERSE_HINT_ID
    }

    fn nb_outputs(&self, _curve: CurveId, _nb_inputs: usize) -> usize {
        1
    }

    fn call(
        &self,
        _curve: CurveId,
        inputs: &[BigUint],
        outputs: &mut [BigUint],
    ) -> Result<(), SynthesisError> {
        let a: F = crate::field::biguint_to_field(&inputs[0])
            .ok_or(SynthesisError::DivisionByZero)?;
        let inv: Option<F> = a.invert().into();
        let inv = inv.ok_or(SynthesisError::DivisionByZero)?;
        outputs[0] = crate::field::field_to_biguint(&inv);
        Ok(())
    }
}
