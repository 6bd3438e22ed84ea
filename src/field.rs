//! Field-level primitives the rest of the crate is generic over.
//!
//! The crate never implements modular arithmetic itself: it is generic over
//! `F: ff::PrimeField`, which already supplies addition, multiplication,
//! negation, inversion, equality and canonical byte encoding. This module
//! only adds the small amount of glue the R1CS model needs on top: a curve
//! tag opaque to the core, and canonical-byte helpers used by the
//! coefficient interner and the codec.

use ff::PrimeField;
use num_bigint::BigUint;

/// Opaque tag identifying the field/curve pair a compiled system and its
/// hint functions were built for. The core never interprets this beyond
/// passing it through to hint functions (mirrors gnark's `ecc.ID`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CurveId(pub u16);

impl CurveId {
    pub const UNKNOWN: CurveId = CurveId(0);
    /// BLS12-381 scalar field, the default curve used by this crate's own
    /// tests and benchmarks.
    pub const BLS12_381: CurveId = CurveId(1);
}

/// Canonical little-endian byte encoding of a field element, used as the
/// interning key for coefficients and for the deterministic codec.
pub fn canonical_bytes<F: PrimeField>(value: &F) -> Vec<u8> {
    value.to_repr().as_ref().to_vec()
}

/// `BitLen(F_q)`: number of bits needed to represent any element of the
/// field's modulus, i.e. the number of bits `to_binary`/`assert_is_less_or_equal`
/// decompose into by default.
pub fn bit_len<F: PrimeField>() -> usize {
    F::NUM_BITS as usize
}

/// Converts a field element to its canonical big-integer representative in
/// `[0, q)`, the representation hint functions are called with (spec §4.4.1).
pub fn field_to_biguint<F: PrimeField>(value: &F) -> BigUint {
    BigUint::from_bytes_le(value.to_repr().as_ref())
}

/// Converts a big-integer representative (assumed already reduced into
/// `[0, q)` by the caller, per the hint contract in spec §6) back into a
/// field element. Returns `None` if `value` does not fit the canonical
/// repr, e.g. because it was not actually reduced mod `q`.
pub fn biguint_to_field<F: PrimeField>(value: &BigUint) -> Option<F> {
    let mut repr = F::Repr::default();
    let bytes = value.to_bytes_le();
    let buf = repr.as_mut();
    if bytes.len() > buf.len() {
        return None;
    }
    buf[..bytes.len()].copy_from_slice(&bytes);
    F::from_repr(repr).into()
}
