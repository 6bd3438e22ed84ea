//! End-to-end scenarios from spec §8's literal test list, each compiling
//! (or building directly) and solving a small circuit and checking the
//! outcome the spec names. Placed as a `#[cfg(test)]` module alongside
//! the other unit tests rather than under `tests/`, matching the
//! teacher's own all-unit-tests style (it has no `tests/` directory).

#![cfg(test)]

use blstrs::Scalar as Fr;
use ff::{Field, PrimeField};
use num_bigint::BigUint;

use crate::builder::{Bound, CircuitBuilder};
use crate::circuit::{Circuit, Variable};
use crate::circuit_fields;
use crate::compile::{compile, CompilerConfig};
use crate::error::{CompileError, SynthesisError};
use crate::field::CurveId;
use crate::scheduler::schedule;
use crate::solver::{solve, SolverConfig};

fn finish_and_schedule(b: CircuitBuilder<Fr>) -> crate::compiled::CompiledR1cs<Fr> {
    let mut compiled = b.finish();
    compiled.layers = Some(schedule(&compiled).unwrap());
    compiled
}

/// Scenario 1: `X_out = ((X·X) + X + 42)^10000` with `X = 1`. Exponentiation
/// is done by square-and-multiply to keep the constraint count linear in
/// the exponent's bit length rather than its value. The scenario only
/// requires that compiling and solving succeed with every `a_i·b_i = c_i`
/// (Property S); it does not pin `X_out` to a literal value, since that
/// value is a field element with no short closed form.
#[test]
fn scenario_1_large_power_circuit_solves_and_satisfies_every_constraint() {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
    let x = b.new_secret_variable("x");

    let x2 = b.mul(&x, &x);
    let forty_two = b.constant(Fr::from(42u64));
    let base = b.add(&[x2, x.clone(), forty_two]);

    let mut result = b.constant(Fr::one());
    let mut cur = base;
    let mut e: u32 = 10000;
    while e > 0 {
        if e & 1 == 1 {
            result = b.mul(&result, &cur);
        }
        cur = b.mul(&cur, &cur);
        e >>= 1;
    }
    // Touch the result so it isn't flagged as dead circuit output.
    b.assert_is_equal(&result, &result);

    let compiled = finish_and_schedule(b);
    let witness = vec![Fr::one()]; // x = 1
    let mut config = SolverConfig::default();
    let solution = solve(&compiled, &witness, &mut config).unwrap();
    for i in 0..solution.a.len() {
        assert_eq!(solution.a[i] * solution.b[i], solution.c[i]);
    }
}

/// Scenario 2: `assert_is_equal(5, 5)` still compiles to one constraint
/// and solves with no witness at all.
#[test]
fn scenario_2_equal_constants_still_emit_and_solve_a_constraint() {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
    let five = Variable::Constant(Fr::from(5u64));
    b.assert_is_equal(&five, &five);
    let compiled = finish_and_schedule(b);
    assert_eq!(compiled.nb_constraints(), 1);

    let mut config = SolverConfig::default();
    let solution = solve(&compiled, &[], &mut config).unwrap();
    assert_eq!(solution.a[0] * solution.b[0], solution.c[0]);
}

/// Scenario 3: `assert_is_different(x, y)` with `x = y = 3` fails because
/// the inverse of the (zero) difference cannot be computed. The crate's
/// error taxonomy has a dedicated `HintError` for exactly this failure
/// (a hint function itself erroring), so that is what surfaces here
/// rather than `UnsatisfiedConstraint` — see DESIGN.md.
#[test]
fn scenario_3_assert_is_different_on_equal_witnesses_fails_via_hint_error() {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
    let x = b.new_secret_variable("x");
    let y = b.new_secret_variable("y");
    b.assert_is_different(&x, &y);
    let compiled = finish_and_schedule(b);

    let witness = vec![Fr::from(3u64), Fr::from(3u64)];
    let mut config = SolverConfig::default();
    let err = solve(&compiled, &witness, &mut config).unwrap_err();
    assert!(matches!(err, SynthesisError::HintError { .. }));
}

/// Scenario 4: `assert_is_less_or_equal(x, 7)` with `x = 8` fails.
#[test]
fn scenario_4_assert_is_less_or_equal_rejects_an_out_of_range_witness() {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
    let x = b.new_secret_variable("x");
    b.assert_is_less_or_equal(&x, Bound::Constant(BigUint::from(7u8)));
    let compiled = finish_and_schedule(b);

    let witness = vec![Fr::from(8u64)];
    let mut config = SolverConfig::default();
    let err = solve(&compiled, &witness, &mut config).unwrap_err();
    assert!(matches!(err, SynthesisError::UnsatisfiedConstraint { .. }));
}

/// Scenario 5: an unused public input is rejected by `compile` in strict
/// mode and accepted with `ignore_unconstrained_inputs`.
#[test]
fn scenario_5_unused_public_input_is_rejected_unless_ignored() {
    struct Loose<F: PrimeField> {
        unused: Variable<F>,
    }
    circuit_fields!(Loose<F: PrimeField> { unused: "unused,public" });
    impl<F: PrimeField> Circuit<F> for Loose<F> {
        fn define(&self, _builder: &mut CircuitBuilder<F>) -> Result<(), String> {
            Ok(())
        }
    }

    let mut strict = Loose::<Fr> { unused: Variable::Constant(Fr::zero()) };
    let err = compile(CurveId::BLS12_381, &mut strict, &CompilerConfig::default()).unwrap_err();
    assert!(matches!(err, CompileError::Unconstrained(_)));

    let lenient_config = CompilerConfig { ignore_unconstrained_inputs: true, ..CompilerConfig::default() };
    let mut lenient = Loose::<Fr> { unused: Variable::Constant(Fr::zero()) };
    assert!(compile(CurveId::BLS12_381, &mut lenient, &lenient_config).is_ok());
}

/// Scenario 6: `to_binary(13, 4)` fills bits `[1, 0, 1, 1]`
/// (little-endian), and the aggregate constraint it emits is satisfied.
#[test]
fn scenario_6_to_binary_of_13_over_4_bits_yields_1011() {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
    let x = b.new_secret_variable("x");
    let bits = b.to_binary(&x, 4);
    assert_eq!(bits.len(), 4);
    let compiled = finish_and_schedule(b);

    let witness = vec![Fr::from(13u64)];
    let mut config = SolverConfig::default();
    let solution = solve(&compiled, &witness, &mut config).unwrap();

    // x is wire 1; the four bit wires follow at 2..=5 in allocation order.
    let expected = [Fr::one(), Fr::zero(), Fr::one(), Fr::one()];
    for (i, exp) in expected.iter().enumerate() {
        assert_eq!(solution.assignment[2 + i], *exp, "bit {i}");
    }
}
