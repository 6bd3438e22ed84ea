//! Deterministic encode/decode for `CompiledR1cs<F>` (spec §4.5).
//!
//! Encoding is plain bincode over the `serde` impls derived on every type
//! in this crate. Two compilations of the same circuit on the same curve
//! produce byte-identical output because every collection reachable from
//! `CompiledR1cs` is either a `Vec` in emission order or a `BTreeMap`
//! (never a `HashMap`), so iteration order never depends on hasher state.
//!
//! Decoding caps the number of bytes bincode is willing to walk before it
//! starts growing `Vec`/`BTreeMap` allocations, so a payload that lies
//! about its own length prefixes can't be used to force an out-of-memory
//! abort before a single length check runs. It also rebuilds
//! `CoefficientTable`'s skip-serialized lookup index, so a decoded
//! `CompiledR1cs` is immediately ready for further `intern` calls, not
//! just reads.

use ff::PrimeField;

use crate::compiled::CompiledR1cs;
use crate::error::CodecError;

/// Default ceiling on a single encoded payload, applied by `encode`/
/// `decode`. Callers with different resource constraints can use
/// `encode_with_limit`/`decode_with_limit` directly.
pub const MAX_PAYLOAD_BYTES: u64 = 1 << 30; // 1 GiB

/// Serializes `compiled` to its canonical byte representation.
pub fn encode<F: PrimeField>(compiled: &CompiledR1cs<F>) -> Result<Vec<u8>, CodecError> {
    encode_with_limit(compiled, MAX_PAYLOAD_BYTES)
}

pub fn encode_with_limit<F: PrimeField>(compiled: &CompiledR1cs<F>, limit: u64) -> Result<Vec<u8>, CodecError> {
    bincode::config().limit(limit).serialize(compiled).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Deserializes a payload produced by `encode`, rejecting anything whose
/// declared or actual size exceeds `MAX_PAYLOAD_BYTES`.
pub fn decode<F: PrimeField>(bytes: &[u8]) -> Result<CompiledR1cs<F>, CodecError> {
    decode_with_limit(bytes, MAX_PAYLOAD_BYTES)
}

pub fn decode_with_limit<F: PrimeField>(bytes: &[u8], limit: u64) -> Result<CompiledR1cs<F>, CodecError> {
    if bytes.len() as u64 > limit {
        return Err(CodecError::TooLarge { limit });
    }
    let mut compiled: CompiledR1cs<F> = bincode::config().limit(limit).deserialize(bytes).map_err(|e| match *e {
        bincode::ErrorKind::SizeLimit => CodecError::TooLarge { limit },
        other => CodecError::Decode(other.to_string()),
    })?;
    // `index` is `#[serde(skip)]`'d on `CoefficientTable` (it's a pure
    // function of `values`), so it comes back empty and must be rebuilt
    // before any further `intern` call on the decoded table is sound.
    compiled.coefficients.rebuild_index();
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CircuitBuilder;
    use crate::field::CurveId;
    use blstrs::Scalar as Fr;

    fn sample_compiled() -> CompiledR1cs<Fr> {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let x = b.new_secret_variable("x");
        let y = b.new_public_variable("y");
        let x2 = b.mul(&x, &x);
        b.assert_is_equal(&y, &x2);
        b.finish()
    }

    #[test]
    fn round_trips_structurally() {
        let compiled = sample_compiled();
        let bytes = encode(&compiled).unwrap();
        let decoded: CompiledR1cs<Fr> = decode(&bytes).unwrap();
        assert_eq!(decoded.nb_public(), compiled.nb_public());
        assert_eq!(decoded.nb_secret(), compiled.nb_secret());
        assert_eq!(decoded.nb_constraints(), compiled.nb_constraints());
        assert_eq!(decoded.coefficients.len(), compiled.coefficients.len());
        assert_eq!(decoded.schema.public_names, compiled.schema.public_names);
        assert_eq!(decoded.schema.secret_names, compiled.schema.secret_names);
    }

    #[test]
    fn two_compilations_of_the_same_circuit_are_byte_identical() {
        let a = encode(&sample_compiled()).unwrap();
        let b = encode(&sample_compiled()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn oversized_payload_is_rejected_before_allocating() {
        let compiled = sample_compiled();
        let bytes = encode(&compiled).unwrap();
        let limit = (bytes.len() as u64).saturating_sub(1);
        let err = decode_with_limit::<Fr>(&bytes, limit).unwrap_err();
        assert!(matches!(err, CodecError::TooLarge { .. }));
    }

    #[test]
    fn decoded_coefficient_table_index_is_rebuilt() {
        let compiled = sample_compiled();
        let bytes = encode(&compiled).unwrap();
        let mut decoded: CompiledR1cs<Fr> = decode(&bytes).unwrap();
        // Interning a value already present in the decoded table must reuse
        // its existing id rather than appending a duplicate, which only
        // holds if `rebuild_index` actually repopulated the lookup map.
        let existing = decoded.coefficients.get(crate::coeff::COEFF_ID_MINUS_ONE);
        let before = decoded.coefficients.len();
        assert_eq!(decoded.coefficients.intern(existing), crate::coeff::COEFF_ID_MINUS_ONE);
        assert_eq!(decoded.coefficients.len(), before);
    }

    #[test]
    fn truncated_payload_is_a_decode_error_not_a_panic() {
        let compiled = sample_compiled();
        let bytes = encode(&compiled).unwrap();
        let truncated = &bytes[..bytes.len() / 2];
        let err = decode::<Fr>(truncated).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
