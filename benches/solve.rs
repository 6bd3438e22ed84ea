use blstrs::Scalar as Fr;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use ff::Field;

use r1cs_weave::builder::CircuitBuilder;
use r1cs_weave::field::CurveId;
use r1cs_weave::scheduler;
use r1cs_weave::solver::{self, SolverConfig};

fn chained_squaring_circuit(chain_length: usize) -> (r1cs_weave::compiled::CompiledR1cs<Fr>, Vec<Fr>) {
    let mut b: CircuitBuilder<Fr> = CircuitBuilder::with_capacity(CurveId::BLS12_381, chain_length);
    let mut x = b.new_public_variable("x0");
    for _ in 0..chain_length {
        x = b.mul(&x, &x);
    }
    let out = b.new_public_variable("xn");
    b.assert_is_equal(&x, &out);
    let mut compiled = b.finish();
    compiled.layers = Some(scheduler::schedule(&compiled).unwrap());

    let x0 = Fr::from(2u64);
    let mut xn = x0;
    for _ in 0..chain_length {
        xn = xn.square();
    }
    (compiled, vec![x0, xn])
}

fn bench_solve(c: &mut Criterion) {
    for &chain_length in &[8usize, 64, 512] {
        let (compiled, witness) = chained_squaring_circuit(chain_length);
        c.bench_function(&format!("solve/chain-{}", chain_length), |b| {
            b.iter_batched(
                SolverConfig::default,
                |mut config| solver::solve(&compiled, &witness, &mut config).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_schedule(c: &mut Criterion) {
    for &chain_length in &[8usize, 64, 512] {
        c.bench_function(&format!("schedule/chain-{}", chain_length), |b| {
            b.iter_batched(
                || {
                    let mut builder: CircuitBuilder<Fr> = CircuitBuilder::with_capacity(CurveId::BLS12_381, chain_length);
                    let mut x = builder.new_public_variable("x0");
                    for _ in 0..chain_length {
                        x = builder.mul(&x, &x);
                    }
                    let out = builder.new_public_variable("xn");
                    builder.assert_is_equal(&x, &out);
                    builder.finish()
                },
                |compiled| scheduler::schedule(&compiled).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
}

criterion_group!(benches, bench_solve, bench_schedule);
criterion_main!(benches);
