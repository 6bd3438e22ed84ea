//! The layer-parallel witness solver (spec §4.4).
//!
//! One task per constraint within a layer; layers run one after another
//! with a pool-scope join acting as the barrier. Because the scheduler
//! (spec §4.3) guarantees no constraint depends on another constraint in
//! its own layer, tasks only ever *read* wires solved by strictly earlier
//! layers and *write* the single wire (or hint-output set) they alone are
//! responsible for — so no locking is needed on `values`/`solved` beyond
//! publishing each layer's results before the next layer starts. Each
//! task reports its outcome over a `crossbeam-channel`, mirroring the
//! "error channel, write-many read-once after join" shape spec §5
//! describes; results are applied to the shared arrays back on the
//! joining thread, single-threaded, once the scope has closed.
//!
//! Term accumulation goes through [`compute_term`], which special-cases
//! the four reserved coefficient ids via `CoefficientTable::mul_term`
//! instead of a lookup-then-multiply.

use std::io::Write as _;
use std::sync::Arc;

use ff::PrimeField;

use crate::compiled::CompiledR1cs;
use crate::debug::{LogEntry, Resolvable, UNSOLVED_PLACEHOLDER};
use crate::error::{SchedulerError, SynthesisError};
use crate::hint::{Hint, HintFunction, HintInput, HintRegistry};
use crate::r1c::R1c;
use crate::term::{LinearExpression, Term};
use crate::wire::{WireId, ONE_WIRE};

/// Solver options (spec §6's "Solver configuration").
pub struct SolverConfig<F: PrimeField> {
    /// Skip the `a * b = c` check and complete even on an unsatisfied
    /// constraint; the resulting assignment is not a valid witness.
    /// Intended for benchmarking the solve path in isolation.
    pub force: bool,
    /// Appended to the built-in hint set (bit decomposition, `is_zero`,
    /// inverse), overriding a built-in registered under the same id.
    pub hint_functions: Vec<Arc<dyn HintFunction<F>>>,
    /// Where `Println` output is written; `None` disables log rendering.
    pub log_output: Option<Box<dyn std::io::Write + Send>>,
}

impl<F: PrimeField> Default for SolverConfig<F> {
    fn default() -> Self {
        SolverConfig { force: false, hint_functions: Vec::new(), log_output: None }
    }
}

/// A full wire assignment plus the three per-constraint evaluation
/// vectors `a · b = c`, the byproduct `solve` produces alongside the
/// witness (spec §4.4).
pub struct Solution<F: PrimeField> {
    pub assignment: Vec<F>,
    pub a: Vec<F>,
    pub b: Vec<F>,
    pub c: Vec<F>,
}

/// Solves `compiled` against `witness` (public-minus-ONE || secret,
/// length `nbPublic - 1 + nbSecret`), allocating fresh `a`/`b`/`c`
/// vectors.
pub fn solve<F: PrimeField>(
    compiled: &CompiledR1cs<F>,
    witness: &[F],
    config: &mut SolverConfig<F>,
) -> Result<Solution<F>, SynthesisError> {
    let n = compiled.nb_constraints();
    let mut a = vec![F::zero(); n];
    let mut b = vec![F::zero(); n];
    let mut c = vec![F::zero(); n];
    let assignment = solve_into(compiled, witness, &mut a, &mut b, &mut c, config)?;
    Ok(Solution { assignment, a, b, c })
}

/// Same as [`solve`] but writes `a`/`b`/`c` into caller-supplied buffers,
/// which must each have length `compiled.nb_constraints()`.
pub fn solve_into<F: PrimeField>(
    compiled: &CompiledR1cs<F>,
    witness: &[F],
    a: &mut [F],
    b: &mut [F],
    c: &mut [F],
    config: &mut SolverConfig<F>,
) -> Result<Vec<F>, SynthesisError> {
    let n = compiled.nb_constraints();
    if a.len() != n || b.len() != n || c.len() != n {
        return Err(SynthesisError::BufferSizeMismatch { expected: n });
    }

    let expected_witness_len = compiled.nb_public() - 1 + compiled.nb_secret();
    if witness.len() != expected_witness_len {
        return Err(SynthesisError::WitnessSizeMismatch { got: witness.len(), expected: expected_witness_len });
    }

    let layers = compiled
        .layers
        .as_ref()
        .ok_or(SynthesisError::Malformed(SchedulerError::UnsolvableSystem))?;

    let nb_wires = compiled.nb_wires();
    let mut values = vec![F::zero(); nb_wires];
    let mut solved = vec![false; nb_wires];
    values[ONE_WIRE] = F::one();
    solved[ONE_WIRE] = true;
    for (i, w) in witness.iter().enumerate() {
        let wid = 1 + i;
        values[wid] = *w;
        solved[wid] = true;
    }

    let mut hints = HintRegistry::<F>::default();
    for f in &config.hint_functions {
        hints.register(f.clone());
    }

    let nb_threads = num_cpus::get().max(1);
    let pool = yastl::Pool::new(nb_threads);

    let result = (|| -> Result<(), SynthesisError> {
        for layer in layers.layers.iter() {
            if layer.is_empty() {
                continue;
            }
            let (tx, rx) = crossbeam_channel::unbounded::<(usize, Result<ConstraintOutcome<F>, SynthesisError>)>();

            pool.scoped(|scope| {
                for &idx in layer {
                    let tx = tx.clone();
                    let values_ref: &[F] = &values;
                    let solved_ref: &[bool] = &solved;
                    let hints_ref = &hints;
                    let r1c = &compiled.constraints[idx];
                    let force = config.force;
                    scope.execute(move || {
                        let outcome = solve_constraint(compiled, hints_ref, values_ref, solved_ref, idx, r1c, force);
                        let _ = tx.send((idx, outcome));
                    });
                }
            });
            drop(tx);

            let mut outcomes = Vec::with_capacity(layer.len());
            let mut errors: Vec<(usize, SynthesisError)> = Vec::new();
            for (idx, res) in rx.iter() {
                match res {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => errors.push((idx, e)),
                }
            }
            if let Some((_, e)) = errors.into_iter().min_by_key(|(idx, _)| *idx) {
                return Err(e);
            }

            for outcome in outcomes {
                for (wid, v) in outcome.writes {
                    values[wid] = v;
                    solved[wid] = true;
                }
                a[outcome.constraint_index] = outcome.a;
                b[outcome.constraint_index] = outcome.b;
                c[outcome.constraint_index] = outcome.c;
            }
        }
        Ok(())
    })();

    if let Some(sink) = config.log_output.as_mut() {
        for line in render_logs(compiled, &values, &solved) {
            let _ = writeln!(sink, "{}", line);
        }
    }

    result?;
    Ok(values)
}

struct ConstraintOutcome<F: PrimeField> {
    constraint_index: usize,
    a: F,
    b: F,
    c: F,
    writes: Vec<(WireId, F)>,
}

/// `coeff_id . value`, using `CoefficientTable::mul_term`'s reserved-id
/// fast path rather than a plain `get(id) * value` (gnark's
/// `mulByCoeff`, see `SPEC_FULL.md`).
fn compute_term<F: PrimeField>(compiled: &CompiledR1cs<F>, coeff_id: usize, value: F) -> F {
    compiled.coefficients.mul_term(coeff_id, value)
}

fn lookup<F: PrimeField>(values: &[F], solved: &[bool], writes: &[(WireId, F)], wire: WireId) -> Option<F> {
    if wire == ONE_WIRE {
        return Some(F::one());
    }
    if let Some((_, v)) = writes.iter().find(|(w, _)| *w == wire) {
        return Some(*v);
    }
    if solved[wire] {
        return Some(values[wire]);
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn accumulate<F: PrimeField>(
    compiled: &CompiledR1cs<F>,
    hints: &HintRegistry<F>,
    values: &[F],
    solved: &[bool],
    le: &LinearExpression,
    side: u8,
    constraint_index: usize,
    loc: &mut Option<(u8, Term)>,
    writes: &mut Vec<(WireId, F)>,
) -> Result<F, SynthesisError> {
    let mut acc = F::zero();
    for t in le.iter() {
        if let Some(v) = lookup(values, solved, writes, t.wire) {
            acc = acc + compute_term(compiled, t.coeff_id, v);
            continue;
        }
        if let Some(hint) = compiled.hints.get(&t.wire) {
            invoke_hint(compiled, hints, values, solved, writes, hint)?;
            let v = lookup(values, solved, writes, t.wire).ok_or_else(|| SynthesisError::HintError {
                wire: t.wire,
                cause: "hint did not produce the expected output".to_string(),
            })?;
            acc = acc + compute_term(compiled, t.coeff_id, v);
            continue;
        }
        if loc.is_some() {
            return Err(SynthesisError::Malformed(SchedulerError::Malformed {
                constraint_index,
                reason: "more than one unknown non-hint wire encountered while solving".to_string(),
            }));
        }
        *loc = Some((side, *t));
    }
    Ok(acc)
}

/// Invokes `hint` unless its outputs have already been written this
/// task (idempotent within one constraint's solve). Hint functions are
/// required to be pure, so a redundant call — possible if two
/// constraints each depend on a different output of the same
/// multi-output hint and land in the same layer — is wasteful but not
/// unsound; it is not memoized across constraints.
fn invoke_hint<F: PrimeField>(
    compiled: &CompiledR1cs<F>,
    hints: &HintRegistry<F>,
    values: &[F],
    solved: &[bool],
    writes: &mut Vec<(WireId, F)>,
    hint: &Hint,
) -> Result<(), SynthesisError> {
    if hint.outputs.iter().any(|w| writes.iter().any(|(wid, _)| wid == w)) {
        return Ok(());
    }
    let func = hints.get(hint.id).ok_or(SynthesisError::MissingHintFunction { id: hint.id })?;

    let mut inputs = Vec::with_capacity(hint.inputs.len());
    for input in &hint.inputs {
        let value = match input {
            HintInput::Expr(le) => {
                let mut v = F::zero();
                for t in le.iter() {
                    let wire_value = lookup(values, solved, writes, t.wire).ok_or_else(|| SynthesisError::HintError {
                        wire: t.wire,
                        cause: "hint input wire is not yet solved".to_string(),
                    })?;
                    v = v + compute_term(compiled, t.coeff_id, wire_value);
                }
                v
            }
            HintInput::Constant(cid) => compiled.coefficients.get(*cid),
        };
        inputs.push(crate::field::field_to_biguint(&value));
    }

    let mut outputs = vec![num_bigint::BigUint::from(0u8); hint.outputs.len()];
    func.call(compiled.curve, &inputs, &mut outputs)
        .map_err(|e| SynthesisError::HintError { wire: hint.outputs[0], cause: e.to_string() })?;

    for (&wid, out) in hint.outputs.iter().zip(outputs.iter()) {
        let v: F = crate::field::biguint_to_field(out)
            .ok_or_else(|| SynthesisError::HintError { wire: wid, cause: "hint output does not fit the field".to_string() })?;
        writes.push((wid, v));
    }
    Ok(())
}

fn solve_constraint<F: PrimeField>(
    compiled: &CompiledR1cs<F>,
    hints: &HintRegistry<F>,
    values: &[F],
    solved: &[bool],
    constraint_index: usize,
    r1c: &R1c,
    force: bool,
) -> Result<ConstraintOutcome<F>, SynthesisError> {
    let mut loc: Option<(u8, Term)> = None;
    let mut writes: Vec<(WireId, F)> = Vec::new();

    let mut a_c = accumulate(compiled, hints, values, solved, &r1c.l, 1, constraint_index, &mut loc, &mut writes)?;
    let mut b_c = accumulate(compiled, hints, values, solved, &r1c.r, 2, constraint_index, &mut loc, &mut writes)?;
    let mut c_c = accumulate(compiled, hints, values, solved, &r1c.o, 3, constraint_index, &mut loc, &mut writes)?;

    if let Some((side, term)) = loc {
        let coeff = compiled.coefficients.get(term.coeff_id);
        let inv_coeff: F = Option::from(coeff.invert()).ok_or(SynthesisError::DivisionByZero)?;
        let wire_value = match side {
            1 => {
                let b_inv: F = Option::from(b_c.invert()).ok_or(SynthesisError::DivisionByZero)?;
                (c_c * b_inv - a_c) * inv_coeff
            }
            2 => {
                let a_inv: F = Option::from(a_c.invert()).ok_or(SynthesisError::DivisionByZero)?;
                (c_c * a_inv - b_c) * inv_coeff
            }
            3 => (a_c * b_c - c_c) * inv_coeff,
            _ => unreachable!("side is always 1, 2 or 3"),
        };
        writes.push((term.wire, wire_value));
        match side {
            1 => a_c = a_c + compute_term(compiled, term.coeff_id, wire_value),
            2 => b_c = b_c + compute_term(compiled, term.coeff_id, wire_value),
            3 => c_c = c_c + compute_term(compiled, term.coeff_id, wire_value),
            _ => unreachable!("side is always 1, 2 or 3"),
        }
    }

    if !force && !bool::from((a_c * b_c - c_c).is_zero()) {
        let rendered_debug = compiled
            .debug
            .get(&constraint_index)
            .map(|d| d.tag.clone())
            .unwrap_or_else(|| format!("constraint #{}", constraint_index));
        return Err(SynthesisError::UnsatisfiedConstraint { index: constraint_index, rendered_debug });
    }

    Ok(ConstraintOutcome { constraint_index, a: a_c, b: b_c, c: c_c, writes })
}

// ---- log rendering (spec §4.4.2) -------------------------------------

fn render_logs<F: PrimeField>(compiled: &CompiledR1cs<F>, values: &[F], solved: &[bool]) -> Vec<String> {
    compiled.logs.iter().map(|entry| render_log_entry(compiled, values, solved, entry)).collect()
}

fn render_log_entry<F: PrimeField>(compiled: &CompiledR1cs<F>, values: &[F], solved: &[bool], entry: &LogEntry) -> String {
    let mut rendered = Vec::with_capacity(entry.resolvables.len());
    for r in &entry.resolvables {
        match r {
            Resolvable::Term(t) => rendered.push(render_term(compiled, values, solved, t)),
            Resolvable::Eval(terms) => rendered.push(render_eval(compiled, values, solved, terms)),
        }
    }
    apply_format(&entry.format, &rendered)
}

fn render_term<F: PrimeField>(compiled: &CompiledR1cs<F>, values: &[F], solved: &[bool], t: &Term) -> String {
    if t.wire != ONE_WIRE && !solved[t.wire] {
        return UNSOLVED_PLACEHOLDER.to_string();
    }
    let wire_value = if t.wire == ONE_WIRE { F::one() } else { values[t.wire] };
    format!("{:?}", compiled.coefficients.get(t.coeff_id) * wire_value)
}

fn render_eval<F: PrimeField>(compiled: &CompiledR1cs<F>, values: &[F], solved: &[bool], terms: &[Term]) -> String {
    if terms.iter().any(|t| t.wire != ONE_WIRE && !solved[t.wire]) {
        return UNSOLVED_PLACEHOLDER.to_string();
    }
    let mut sum = F::zero();
    for t in terms {
        let wire_value = if t.wire == ONE_WIRE { F::one() } else { values[t.wire] };
        sum = sum + compiled.coefficients.get(t.coeff_id) * wire_value;
    }
    format!("{:?}", sum)
}

/// Substitutes each `%v` placeholder in `format` with the corresponding
/// rendered resolvable, in order — the same minimal template gnark's
/// `api.Println` uses.
fn apply_format(format: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut arg_iter = args.iter();
    let mut chars = format.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '%' && chars.peek() == Some(&'v') {
            chars.next();
            if let Some(a) = arg_iter.next() {
                out.push_str(a);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
