//! `r1cs-weave` compiles arithmetic circuit descriptions into rank-1
//! constraint systems (R1CS) and solves them against a witness with a
//! layer-parallel solver.
//!
//! A circuit is any type implementing [`circuit::Circuit`]: it declares its
//! public/secret inputs through [`circuit::CircuitSchema`] (usually derived
//! with the [`circuit_fields!`] macro) and builds constraints against a
//! [`builder::CircuitBuilder`] in `define`. [`compile::compile`] turns that
//! into a [`compiled::CompiledR1cs`], and [`solver::solve`] turns a
//! `CompiledR1cs` plus a witness into every wire's value along with the
//! `A`/`B`/`C` vectors the constraint system evaluates to.
//!
//! # Example
//!
//! ```no_run
//! use r1cs_weave::builder::CircuitBuilder;
//! use r1cs_weave::circuit::{Circuit, Variable};
//! use r1cs_weave::circuit_fields;
//! use r1cs_weave::compile::{compile, CompilerConfig};
//! use r1cs_weave::field::CurveId;
//! use r1cs_weave::solver::{solve, SolverConfig};
//! use blstrs::Scalar as Fr;
//!
//! /// Proves knowledge of `y` such that `y * y == x`.
//! struct Square<F> {
//!     x: Variable<F>,
//!     y: Variable<F>,
//! }
//!
//! circuit_fields!(Square<F: ff::PrimeField> { x: "x,public", y: "y,secret" });
//!
//! impl<F: ff::PrimeField> Circuit<F> for Square<F> {
//!     fn define(&self, builder: &mut CircuitBuilder<F>) -> Result<(), String> {
//!         let y2 = builder.mul(&self.y, &self.y);
//!         builder.assert_is_equal(&self.x, &y2);
//!         Ok(())
//!     }
//! }
//!
//! let mut circuit = Square::<Fr> {
//!     x: Variable::Constant(Fr::from(0u64)),
//!     y: Variable::Constant(Fr::from(0u64)),
//! };
//! let compiled = compile(CurveId::BLS12_381, &mut circuit, &CompilerConfig::default()).unwrap();
//! let witness = [Fr::from(3u64)]; // y = 3, so x = 9
//! let solution = solve(&compiled, &witness, &mut SolverConfig::default()).unwrap();
//! assert_eq!(solution.assignment[1], Fr::from(9u64));
//! ```

pub mod builder;
pub mod circuit;
pub mod codec;
pub mod coeff;
pub mod compile;
pub mod compiled;
pub mod debug;
pub mod error;
pub mod field;
pub mod hint;
pub mod r1c;
pub mod scheduler;
pub mod solver;
pub mod term;
pub mod wire;

#[cfg(test)]
pub mod test_support;
#[cfg(test)]
mod scenarios;
