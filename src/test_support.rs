//! Test-only helpers for asserting things about a compiled system without
//! hand-counting constraint indices: a deterministic fingerprint of a
//! `CompiledR1cs` and a human-readable pretty-printer, both grounded in the
//! teacher's `gadgets::test::TestConstraintSystem` (`hash`/`pretty_print`),
//! generalized from bellman's namespaced `LinearCombination` to this
//! crate's `LinearExpression`/coefficient-table representation.

use std::fmt::Write as _;

use blake2s_simd::{Params as Blake2sParams, State as Blake2sState};
use byteorder::{BigEndian, ByteOrder};
use ff::PrimeField;

use crate::coeff::CoefficientTable;
use crate::compiled::CompiledR1cs;
use crate::term::LinearExpression;
use crate::wire::WireId;

/// Sums duplicate-wire terms and drops zero coefficients by calling the
/// real `LinearExpression::normalized` (spec §4.1's normalizer) against a
/// scratch clone of the coefficient table, then resolves each resulting
/// term back to `(wire, value)`. `normalized` accumulates over a
/// `BTreeMap` keyed by wire id, so the returned pairs are already in
/// ascending wire order.
fn proc_le<F: PrimeField>(le: &LinearExpression, coeffs: &CoefficientTable<F>) -> Vec<(WireId, F)> {
    let mut scratch = coeffs.clone();
    let normalized = le.normalized(&mut scratch);
    normalized.iter().map(|t| (t.wire, scratch.get(t.coeff_id))).collect()
}

fn hash_le<F: PrimeField>(le: &LinearExpression, coeffs: &CoefficientTable<F>, h: &mut Blake2sState) {
    let pairs = proc_le(le, coeffs);
    let mut len_buf = [0u8; 8];
    BigEndian::write_u64(&mut len_buf, pairs.len() as u64);
    h.update(&len_buf);

    for (wire, coeff) in pairs {
        let mut buf = [0u8; 8];
        BigEndian::write_u64(&mut buf, wire as u64);
        h.update(&buf);
        let mut bytes = coeff.to_repr();
        bytes.as_mut().reverse();
        h.update(bytes.as_ref());
    }
}

/// A blake2s digest over every constraint's (normalized L, R, O), plus the
/// wire counts. Two compilations of the same circuit hash identically;
/// any change to the emitted constraints changes the digest.
pub fn hash_compiled<F: PrimeField>(compiled: &CompiledR1cs<F>) -> String {
    let mut h = Blake2sParams::new().hash_length(32).to_state();
    let mut header = [0u8; 24];
    BigEndian::write_u64(&mut header[0..8], compiled.nb_public() as u64);
    BigEndian::write_u64(&mut header[8..16], compiled.nb_secret() as u64);
    BigEndian::write_u64(&mut header[16..24], compiled.nb_constraints() as u64);
    h.update(&header);

    for r1c in &compiled.constraints {
        hash_le(&r1c.l, &compiled.coefficients, &mut h);
        hash_le(&r1c.r, &compiled.coefficients, &mut h);
        hash_le(&r1c.o, &compiled.coefficients, &mut h);
    }

    let mut s = String::new();
    for b in h.finalize().as_ref() {
        write!(s, "{:02x}", b).unwrap();
    }
    s
}

fn wire_name<F: PrimeField>(compiled: &CompiledR1cs<F>, wire: WireId) -> String {
    if wire == crate::wire::ONE_WIRE {
        return "ONE".to_string();
    }
    let public_end = compiled.nb_public();
    if wire < public_end {
        return compiled.schema.public_names.get(wire - 1).cloned().unwrap_or_else(|| format!("pub[{wire}]"));
    }
    let secret_end = public_end + compiled.nb_secret();
    if wire < secret_end {
        return compiled
            .schema
            .secret_names
            .get(wire - public_end)
            .cloned()
            .unwrap_or_else(|| format!("sec[{wire}]"));
    }
    format!("w{wire}")
}

fn pretty_le<F: PrimeField>(compiled: &CompiledR1cs<F>, le: &LinearExpression, out: &mut String) {
    write!(out, "(").unwrap();
    let pairs = proc_le(le, &compiled.coefficients);
    let mut first = true;
    for (wire, coeff) in &pairs {
        if !first {
            write!(out, " + ").unwrap();
        }
        first = false;
        if *coeff != F::one() {
            write!(out, "{:?} . ", coeff).unwrap();
        }
        write!(out, "`{}`", wire_name(compiled, *wire)).unwrap();
    }
    if first {
        write!(out, "0").unwrap();
    }
    write!(out, ")").unwrap();
}

/// Renders every constraint as `(L) * (R) = (O)` with wires shown by name,
/// for failed-test diagnostics.
pub fn pretty_print<F: PrimeField>(compiled: &CompiledR1cs<F>) -> String {
    let mut s = String::new();
    for (i, r1c) in compiled.constraints.iter().enumerate() {
        let tag = compiled.debug.get(&i).map(|d| d.tag.as_str()).unwrap_or("");
        writeln!(s, "#{i} [{tag}]:").unwrap();
        pretty_le(compiled, &r1c.l, &mut s);
        write!(s, " * ").unwrap();
        pretty_le(compiled, &r1c.r, &mut s);
        write!(s, " = ").unwrap();
        pretty_le(compiled, &r1c.o, &mut s);
        writeln!(s).unwrap();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CircuitBuilder;
    use crate::field::CurveId;
    use blstrs::Scalar as Fr;

    fn sample() -> CompiledR1cs<Fr> {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let x = b.new_secret_variable("x");
        let x2 = b.mul(&x, &x);
        let y = b.new_public_variable("y");
        b.assert_is_equal(&y, &x2);
        b.finish()
    }

    #[test]
    fn hash_is_stable_across_compilations() {
        assert_eq!(hash_compiled(&sample()), hash_compiled(&sample()));
    }

    #[test]
    fn pretty_print_mentions_declared_names() {
        let rendered = pretty_print(&sample());
        assert!(rendered.contains('`'));
        assert!(rendered.contains("y"));
    }
}
