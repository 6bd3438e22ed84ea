// --chain-length <num>     Number of chained squarings in the benchmark circuit
// --samples <num>          Number of timed runs
use std::time::Instant;

use blstrs::Scalar as Fr;
use ff::Field;
use r1cs_weave::builder::CircuitBuilder;
use r1cs_weave::field::CurveId;
use r1cs_weave::scheduler;
use r1cs_weave::solver::{self, SolverConfig};
use structopt::StructOpt;

macro_rules! timer {
    ($e:expr) => {{
        let before = Instant::now();
        let ret = $e;
        (ret, before.elapsed().as_secs() * 1000 + u64::from(before.elapsed().subsec_millis()))
    }};
}

#[derive(StructOpt)]
#[structopt(name = "solver-bench", about = "Benchmarks compile + schedule + solve on a chained-squaring circuit")]
struct Opt {
    #[structopt(long, default_value = "10000")]
    chain_length: usize,

    #[structopt(long, default_value = "5")]
    samples: usize,
}

/// Builds `x_n = x_0^(2^chain_length)` as `chain_length` chained squarings,
/// the same shape as the teacher's `DummyDemo` chain of `x * x = x2`
/// constraints, generalized from Groth16 allocation to this crate's
/// builder.
fn build_chain(chain_length: usize) -> r1cs_weave::compiled::CompiledR1cs<Fr> {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::with_capacity(CurveId::BLS12_381, chain_length);
    let mut x = b.new_public_variable("x0");
    for _ in 0..chain_length {
        x = b.mul(&x, &x);
    }
    let out = b.new_public_variable("xn");
    b.assert_is_equal(&x, &out);
    b.finish()
}

fn main() {
    let opt = Opt::from_args();

    println!("chain-length={} samples={}", opt.chain_length, opt.samples);

    for sample in 0..opt.samples {
        let (mut compiled, build_ms) = timer!(build_chain(opt.chain_length));
        let (layers, schedule_ms) = timer!(scheduler::schedule(&compiled).expect("schedulable"));
        compiled.layers = Some(layers);

        let x0 = Fr::from(2u64);
        let mut xn = x0;
        for _ in 0..opt.chain_length {
            xn = xn.square();
        }
        let witness = vec![x0, xn]; // public inputs in allocation order: x0, then xn

        let mut config = SolverConfig::default();
        let (result, solve_ms) = timer!(solver::solve(&compiled, &witness, &mut config));
        result.expect("solve should succeed for a correct witness");

        println!(
            "sample {}: build={}ms schedule={}ms solve={}ms constraints={}",
            sample,
            build_ms,
            schedule_ms,
            solve_ms,
            compiled.nb_constraints()
        );
    }
}
