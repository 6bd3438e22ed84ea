//! `CircuitBuilder`: the mutable compile-time context a `Circuit::define`
//! body records constraints into (spec §4.1). Each operation either folds
//! into a pure linear combination (`add`/`sub`/`neg`, constant-folded
//! `mul`) or emits exactly the constraints described in spec §4.1 for that
//! operation, grounded throughout in gnark's
//! `frontend/cs/r1cs/api.go` and `frontend/cs/r1cs/assertions.go`.
//!
//! `new_public_variable`/`new_secret_variable` must be called in two
//! separate passes — every public field across the whole circuit, then
//! every secret field — so that wire ids stay partitioned into the
//! contiguous `[ONE, public…, secret…, internal…]` ranges the rest of the
//! crate assumes. `compile()` is responsible for enforcing that ordering;
//! the builder itself just trusts it.

use std::collections::{BTreeMap, HashSet};

use ff::{Field, PrimeField};

use crate::circuit::Variable;
use crate::coeff::{CoefficientTable, COEFF_ID_ONE};
use crate::compiled::{CompiledR1cs, Schema};
use crate::debug::{DebugInfo, LogEntry, Resolvable};
use crate::error::{CompileError, UnconstrainedInput};
use crate::field::{bit_len, CurveId};
use crate::hint::{Hint, HintId, HintInput, BIT_DECOMPOSITION_HINT_ID, INVERSE_HINT_ID, IS_ZERO_HINT_ID};
use crate::r1c::R1c;
use crate::term::{LinearExpression, Term};
use crate::wire::{Visibility, WireCounts, WireId, ONE_WIRE};

/// An upper bound for `assert_is_less_or_equal`: either another circuit
/// value, or a compile-time constant (spec §4.1's two variants).
pub enum Bound<F: PrimeField> {
    Constant(num_bigint::BigUint),
    Variable(Variable<F>),
}

pub struct CircuitBuilder<F: PrimeField> {
    coefficients: CoefficientTable<F>,
    constraints: Vec<R1c>,
    hints: BTreeMap<WireId, Hint>,
    debug: BTreeMap<usize, DebugInfo>,
    logs: Vec<LogEntry>,
    nb_public: usize,
    nb_secret: usize,
    nb_internal: usize,
    public_names: Vec<String>,
    secret_names: Vec<String>,
    boolean_marked: HashSet<WireId>,
    touched: HashSet<WireId>,
    curve: CurveId,
    /// Set by a builder method that rejects its input at compile time
    /// (e.g. `assertIsLessOrEqual`'s bound-bit-length check) instead of
    /// panicking. `compile()` checks and clears this after `define`
    /// returns, surfacing it as a typed `CompileError` distinct from
    /// `BuilderPanic`, which is reserved for genuine `define`-body panics.
    poison: Option<CompileError>,
}

/// A `Variable` backed by exactly one wire with coefficient 1, i.e. a
/// freshly allocated variable or a hint/mul output rather than a general
/// linear combination. `assert_is_boolean`/`mark_boolean` key their
/// idempotency tracking off this, matching gnark's per-variable
/// `IsBoolean` flag as closely as a value type (rather than a shared
/// pointer) allows; general linear combinations always re-emit.
fn single_wire<F: PrimeField>(v: &Variable<F>) -> Option<WireId> {
    match v {
        Variable::Linear(le) if le.0.len() == 1 => {
            let t = le.0[0];
            if t.coeff_id == COEFF_ID_ONE && t.visibility != Visibility::Virtual {
                Some(t.wire)
            } else {
                None
            }
        }
        _ => None,
    }
}

impl<F: PrimeField> CircuitBuilder<F> {
    pub fn new(curve: CurveId) -> Self {
        Self::with_capacity(curve, 0)
    }

    pub fn with_capacity(curve: CurveId, capacity: usize) -> Self {
        CircuitBuilder {
            coefficients: CoefficientTable::new(),
            constraints: Vec::with_capacity(capacity),
            hints: BTreeMap::new(),
            debug: BTreeMap::new(),
            logs: Vec::new(),
            nb_public: 1,
            nb_secret: 0,
            nb_internal: 0,
            public_names: Vec::new(),
            secret_names: Vec::new(),
            boolean_marked: HashSet::new(),
            touched: HashSet::new(),
            curve,
            poison: None,
        }
    }

    /// Takes the compile-time rejection recorded by a builder method, if
    /// any, leaving `None` behind. Checked by `compile()` right after
    /// `define` returns.
    pub fn take_poison(&mut self) -> Option<CompileError> {
        self.poison.take()
    }

    pub fn curve(&self) -> CurveId {
        self.curve
    }

    // ---- wire and coefficient plumbing -----------------------------

    fn constant_le(&mut self, v: F) -> LinearExpression {
        if bool::from(v.is_zero()) {
            return LinearExpression::new();
        }
        let coeff_id = self.coefficients.intern(v);
        LinearExpression::single(Term::new(coeff_id, ONE_WIRE, Visibility::Virtual))
    }

    fn to_le(&mut self, v: &Variable<F>) -> LinearExpression {
        match v {
            Variable::Constant(x) => self.constant_le(*x),
            Variable::Linear(le) => le.clone(),
        }
    }

    fn scale_le(&mut self, le: &LinearExpression, k: F) -> LinearExpression {
        if bool::from(k.is_zero()) {
            return LinearExpression::new();
        }
        let mut out = LinearExpression::new();
        for t in le.iter() {
            let scaled = self.coefficients.get(t.coeff_id) * k;
            if bool::from(scaled.is_zero()) {
                continue;
            }
            let cid = self.coefficients.intern(scaled);
            out.push(Term::new(cid, t.wire, t.visibility));
        }
        out
    }

    fn scale(&mut self, v: &Variable<F>, k: F) -> Variable<F> {
        match v {
            Variable::Constant(x) => Variable::Constant(*x * k),
            Variable::Linear(le) => Variable::Linear(self.scale_le(le, k)),
        }
    }

    fn alloc_internal(&mut self) -> WireId {
        let id = self.nb_public + self.nb_secret + self.nb_internal;
        self.nb_internal += 1;
        id
    }

    fn touch(&mut self, wire: WireId) {
        if wire != ONE_WIRE {
            self.touched.insert(wire);
        }
    }

    fn touch_le(&mut self, le: &LinearExpression) {
        for t in le.iter() {
            if t.visibility != Visibility::Virtual {
                self.touch(t.wire);
            }
        }
    }

    fn add_constraint(&mut self, r1c: R1c, debug: Option<DebugInfo>) -> usize {
        self.touch_le(&r1c.l);
        self.touch_le(&r1c.r);
        self.touch_le(&r1c.o);
        let idx = self.constraints.len();
        if let Some(d) = debug {
            self.debug.insert(idx, d);
        }
        self.constraints.push(r1c);
        idx
    }

    // ---- input allocation (spec §4, §6) ----------------------------

    pub fn new_public_variable(&mut self, name: &str) -> Variable<F> {
        let id = self.nb_public;
        self.nb_public += 1;
        self.public_names.push(name.to_string());
        Variable::Linear(LinearExpression::single(Term::new(COEFF_ID_ONE, id, Visibility::Public)))
    }

    pub fn new_secret_variable(&mut self, name: &str) -> Variable<F> {
        let id = self.nb_public + self.nb_secret;
        self.nb_secret += 1;
        self.secret_names.push(name.to_string());
        Variable::Linear(LinearExpression::single(Term::new(COEFF_ID_ONE, id, Visibility::Secret)))
    }

    pub fn constant(&self, x: F) -> Variable<F> {
        Variable::Constant(x)
    }

    // ---- arithmetic (spec §4.1) ------------------------------------

    /// Sums constants and linear combinations; never emits a constraint.
    pub fn add(&mut self, terms: &[Variable<F>]) -> Variable<F> {
        let mut const_sum = F::zero();
        let mut le = LinearExpression::new();
        for t in terms {
            match t {
                Variable::Constant(x) => const_sum = const_sum + *x,
                Variable::Linear(l) => {
                    for term in l.iter() {
                        le.push(*term);
                    }
                }
            }
        }
        if le.is_empty() {
            return Variable::Constant(const_sum);
        }
        if !bool::from(const_sum.is_zero()) {
            let cid = self.coefficients.intern(const_sum);
            le.push(Term::new(cid, ONE_WIRE, Visibility::Virtual));
        }
        Variable::Linear(le)
    }

    pub fn sub(&mut self, base: &Variable<F>, subtrahends: &[Variable<F>]) -> Variable<F> {
        let mut terms = Vec::with_capacity(subtrahends.len() + 1);
        terms.push(base.clone());
        for s in subtrahends {
            terms.push(self.negate(s));
        }
        self.add(&terms)
    }

    fn negate(&mut self, v: &Variable<F>) -> Variable<F> {
        self.scale(v, -F::one())
    }

    pub fn neg(&mut self, a: &Variable<F>) -> Variable<F> {
        self.negate(a)
    }

    /// Folds away if either operand is constant; otherwise allocates a
    /// fresh internal wire and emits `a * b = out`.
    pub fn mul(&mut self, a: &Variable<F>, b: &Variable<F>) -> Variable<F> {
        match (a, b) {
            (Variable::Constant(x), Variable::Constant(y)) => Variable::Constant(*x * *y),
            (Variable::Constant(k), other) | (other, Variable::Constant(k)) => self.scale(other, *k),
            (Variable::Linear(_), Variable::Linear(_)) => {
                let la = self.to_le(a);
                let lb = self.to_le(b);
                let out_wire = self.alloc_internal();
                let lo = LinearExpression::single(Term::new(COEFF_ID_ONE, out_wire, Visibility::Internal));
                self.add_constraint(R1c::new(la, lb, lo.clone()), Some(DebugInfo::new("mul")));
                Variable::Linear(lo)
            }
        }
    }

    /// `1/a`, via a hint for non-constant `a`; panics on a zero constant
    /// (caught by `compile()`'s panic boundary, matching gnark's
    /// `system.Inverse` panicking on a known-zero constant rather than
    /// producing an unsatisfiable circuit).
    pub fn inverse(&mut self, a: &Variable<F>) -> Variable<F> {
        if let Variable::Constant(v) = a {
            let inv: Option<F> = v.invert().into();
            let inv = inv.expect("inverse of the constant 0 has no value");
            return Variable::Constant(inv);
        }
        let la = self.to_le(a);
        let out_wire = self.alloc_internal();
        let hint = Hint {
            id: INVERSE_HINT_ID,
            inputs: vec![HintInput::Expr(la.clone())],
            outputs: vec![out_wire],
        };
        self.hints.insert(out_wire, hint);
        let lo = LinearExpression::single(Term::new(COEFF_ID_ONE, out_wire, Visibility::Internal));
        let one_le = self.constant_le(F::one());
        self.add_constraint(R1c::new(la, lo.clone(), one_le), Some(DebugInfo::new("inverse")));
        Variable::Linear(lo)
    }

    pub fn div(&mut self, a: &Variable<F>, b: &Variable<F>) -> Variable<F> {
        let inv = self.inverse(b);
        self.mul(a, &inv)
    }

    // ---- bit-level helpers (spec §4.1) ------------------------------

    /// Bit-decomposes `a` via a hint and emits the aggregate check `Sum
    /// 2^i * b_i == a`, but — unlike `to_binary` — no per-bit booleanity
    /// constraint. Used internally by `assert_is_less_or_equal`'s chain,
    /// which booleanizes each bit as a side effect of its own constraint.
    fn to_binary_unchecked(&mut self, a: &Variable<F>, n: usize) -> Vec<Variable<F>> {
        let la = self.to_le(a);
        let bit_wires: Vec<WireId> = (0..n).map(|_| self.alloc_internal()).collect();
        let hint = Hint {
            id: BIT_DECOMPOSITION_HINT_ID,
            inputs: vec![HintInput::Expr(la.clone())],
            outputs: bit_wires.clone(),
        };
        for &w in &bit_wires {
            self.hints.insert(w, hint.clone());
        }
        let bits: Vec<Variable<F>> = bit_wires
            .iter()
            .map(|&w| Variable::Linear(LinearExpression::single(Term::new(COEFF_ID_ONE, w, Visibility::Internal))))
            .collect();

        let mut acc = LinearExpression::new();
        let mut pow = F::one();
        for &w in &bit_wires {
            let coeff_id = self.coefficients.intern(pow);
            acc.push(Term::new(coeff_id, w, Visibility::Internal));
            pow = pow + pow;
        }
        let one_le = self.constant_le(F::one());
        self.add_constraint(R1c::new(one_le, acc, la), Some(DebugInfo::new("toBinary")));
        bits
    }

    /// `n` little-endian bits of `a`: a hint decomposition, an aggregate
    /// equality constraint, and a booleanity constraint per bit.
    pub fn to_binary(&mut self, a: &Variable<F>, n: usize) -> Vec<Variable<F>> {
        let bits = self.to_binary_unchecked(a, n);
        for b in &bits {
            self.assert_is_boolean(b);
        }
        bits
    }

    /// Recomposes little-endian bits into a value; a pure linear
    /// combination, no constraint.
    pub fn from_binary(&mut self, bits: &[Variable<F>]) -> Variable<F> {
        let mut le = LinearExpression::new();
        let mut acc_const = F::zero();
        let mut all_const = true;
        let mut pow = F::one();
        for b in bits {
            match b {
                Variable::Constant(v) => acc_const = acc_const + *v * pow,
                Variable::Linear(l) => {
                    all_const = false;
                    for t in l.iter() {
                        let v = self.coefficients.get(t.coeff_id) * pow;
                        if !bool::from(v.is_zero()) {
                            let cid = self.coefficients.intern(v);
                            le.push(Term::new(cid, t.wire, t.visibility));
                        }
                    }
                }
            }
            pow = pow + pow;
        }
        if all_const {
            return Variable::Constant(acc_const);
        }
        if !bool::from(acc_const.is_zero()) {
            let cid = self.coefficients.intern(acc_const);
            le.push(Term::new(cid, ONE_WIRE, Visibility::Virtual));
        }
        Variable::Linear(le)
    }

    // ---- boolean algebra (spec §4.1) --------------------------------

    pub fn select(&mut self, cond: &Variable<F>, on_true: &Variable<F>, on_false: &Variable<F>) -> Variable<F> {
        let diff = self.sub(on_true, std::slice::from_ref(on_false));
        let scaled = self.mul(cond, &diff);
        self.add(&[scaled, on_false.clone()])
    }

    pub fn xor(&mut self, a: &Variable<F>, b: &Variable<F>) -> Variable<F> {
        let ab = self.mul(a, b);
        let two_ab = self.scale(&ab, F::from(2u64));
        let sum = self.add(&[a.clone(), b.clone()]);
        self.sub(&sum, std::slice::from_ref(&two_ab))
    }

    pub fn and(&mut self, a: &Variable<F>, b: &Variable<F>) -> Variable<F> {
        self.mul(a, b)
    }

    pub fn or(&mut self, a: &Variable<F>, b: &Variable<F>) -> Variable<F> {
        let ab = self.mul(a, b);
        let sum = self.add(&[a.clone(), b.clone()]);
        self.sub(&sum, std::slice::from_ref(&ab))
    }

    /// `v = (a == 0) ? 1 : 0`. Two constraints driven by a single
    /// `IsZeroHint` call that produces both `v` and the helper `w`
    /// satisfying `a*w == 1 - v`.
    pub fn is_zero(&mut self, a: &Variable<F>) -> Variable<F> {
        let la = self.to_le(a);
        let v_wire = self.alloc_internal();
        let w_wire = self.alloc_internal();
        let hint = Hint {
            id: IS_ZERO_HINT_ID,
            inputs: vec![HintInput::Expr(la.clone())],
            outputs: vec![v_wire, w_wire],
        };
        self.hints.insert(v_wire, hint.clone());
        self.hints.insert(w_wire, hint);

        let lv = LinearExpression::single(Term::new(COEFF_ID_ONE, v_wire, Visibility::Internal));
        let lw = LinearExpression::single(Term::new(COEFF_ID_ONE, w_wire, Visibility::Internal));
        let zero_le = self.constant_le(F::zero());
        self.add_constraint(R1c::new(la.clone(), lv.clone(), zero_le), Some(DebugInfo::new("isZero")));

        let v_var = Variable::Linear(lv);
        let one_minus_v = self.sub(&Variable::Constant(F::one()), std::slice::from_ref(&v_var));
        let rhs_le = self.to_le(&one_minus_v);
        self.add_constraint(R1c::new(la, lw, rhs_le), Some(DebugInfo::new("isZero")));

        v_var
    }

    // ---- assertions (spec §4.1) -------------------------------------

    /// Always emits `1 * a == b`, even when both sides are already
    /// compile-time constants — matching `frontend/cs/r1cs`'s
    /// `AssertIsEqual`, which does not special-case the all-constant
    /// case away.
    pub fn assert_is_equal(&mut self, a: &Variable<F>, b: &Variable<F>) {
        let one_le = self.constant_le(F::one());
        let la = self.to_le(a);
        let lb = self.to_le(b);
        self.add_constraint(R1c::new(one_le, la, lb), Some(DebugInfo::new("assertIsEqual")));
    }

    /// Emits `inverse(a - b)`; solving fails iff `a == b`.
    pub fn assert_is_different(&mut self, a: &Variable<F>, b: &Variable<F>) {
        let diff = self.sub(a, std::slice::from_ref(b));
        self.inverse(&diff);
    }

    /// `a * (1 - a) == 0`. Idempotent per single-wire variable: repeated
    /// calls on the same freshly-allocated or hint/mul-output variable
    /// emit only one constraint, matching gnark's per-variable
    /// `IsBoolean` cache. General linear combinations always re-emit,
    /// since there is no shared handle to cache against.
    pub fn assert_is_boolean(&mut self, a: &Variable<F>) {
        if let Variable::Constant(v) = a {
            assert!(bool::from(v.is_zero()) || *v == F::one(), "assertIsBoolean failed on a non-0/1 constant");
            return;
        }
        if let Some(w) = single_wire(a) {
            if self.boolean_marked.contains(&w) {
                return;
            }
            self.boolean_marked.insert(w);
        }
        let la = self.to_le(a);
        let one_minus_a = self.sub(&Variable::Constant(F::one()), std::slice::from_ref(a));
        let l_one_minus_a = self.to_le(&one_minus_a);
        let zero_le = self.constant_le(F::zero());
        self.add_constraint(R1c::new(la, l_one_minus_a, zero_le), Some(DebugInfo::new("assertIsBoolean")));
    }

    /// Records `w` as already known-boolean without emitting a
    /// constraint — used when another constraint already enforces
    /// booleanity as a side effect (e.g. the `assert_is_less_or_equal`
    /// chain).
    pub fn mark_boolean(&mut self, w: &Variable<F>) {
        if let Some(id) = single_wire(w) {
            self.boolean_marked.insert(id);
        }
    }

    pub fn is_boolean(&self, w: &Variable<F>) -> bool {
        single_wire(w).map(|id| self.boolean_marked.contains(&id)).unwrap_or(false)
    }

    pub fn assert_is_less_or_equal(&mut self, a: &Variable<F>, bound: Bound<F>) {
        match bound {
            Bound::Variable(b) => self.must_be_less_or_eq_var(a, &b),
            Bound::Constant(c) => self.must_be_less_or_eq_cst(a, &c),
        }
    }

    /// Grounded in `mustBeLessOrEqVar`: walk bits MSB-first, maintaining
    /// `p[i]`, "the prefix at-and-above bit i of a equals that of
    /// bound's". At each bit, `t = select(bound_i, 0, p[i+1])` and the
    /// constraint `(1 - t - a_i) * a_i == 0` both booleanizes `a_i` and
    /// enforces the inequality.
    fn must_be_less_or_eq_var(&mut self, a: &Variable<F>, bound: &Variable<F>) {
        let n = bit_len::<F>();
        let a_bits = self.to_binary_unchecked(a, n);
        let bound_bits = self.to_binary(bound, n);

        let one = Variable::Constant(F::one());
        let zero = Variable::Constant(F::zero());
        let mut p: Vec<Variable<F>> = vec![zero.clone(); n + 1];
        p[n] = one.clone();

        for i in (0..n).rev() {
            let prefix_and_bit = self.mul(&p[i + 1], &a_bits[i]);
            let next_p = self.select(&bound_bits[i], &prefix_and_bit, &p[i + 1]);
            let t = self.select(&bound_bits[i], &zero, &p[i + 1]);
            let one_minus_t_minus_a = self.sub(&one, &[t, a_bits[i].clone()]);
            let l_le = self.to_le(&one_minus_t_minus_a);
            let a_le = self.to_le(&a_bits[i]);
            let zero_le = self.constant_le(F::zero());
            self.add_constraint(R1c::new(l_le, a_le, zero_le), Some(DebugInfo::new("mustBeLessOrEqVar")));
            self.mark_boolean(&a_bits[i]);
            p[i] = next_p;
        }
    }

    /// Grounded in `mustBeLessOrEqCst`: same chain, but `bound`'s bits
    /// are known at compile time, so the branch on `bound_i` is taken in
    /// Rust rather than compiled into a `select`. `t` trailing 1-bits of
    /// `bound` (from the LSB) are skipped entirely (`p[i] = p[i+1]`);
    /// bits where `bound_i == 1` get a plain booleanity constraint
    /// instead of joining the chain.
    ///
    /// A bound that does not fit in the field's bit length is a
    /// circuit-author input error, not a panic: it poisons the builder
    /// (see `take_poison`) and emits nothing further for this call,
    /// which `compile()` turns into `CompileError::BoundTooWide`.
    fn must_be_less_or_eq_cst(&mut self, a: &Variable<F>, bound: &num_bigint::BigUint) {
        let n = bit_len::<F>();
        let bound_bits = bound.bits() as usize;
        if bound_bits > n {
            self.poison = Some(CompileError::BoundTooWide { bound_bits, field_bits: n });
            return;
        }
        let a_bits = self.to_binary_unchecked(a, n);

        let mut t = 0usize;
        while t < n && bound.bit(t as u64) {
            t += 1;
        }

        let mut p: Vec<Option<Variable<F>>> = vec![None; n + 1];
        p[n] = Some(Variable::Constant(F::one()));
        for i in (t..n).rev() {
            if bound.bit(i as u64) {
                let prod = self.mul(p[i + 1].as_ref().unwrap(), &a_bits[i]);
                p[i] = Some(prod);
            } else {
                p[i] = p[i + 1].clone();
            }
        }

        for i in (0..n).rev() {
            if bound.bit(i as u64) {
                self.assert_is_boolean(&a_bits[i]);
            } else {
                let one = Variable::Constant(F::one());
                let l = self.sub(&one, &[p[i + 1].clone().unwrap(), a_bits[i].clone()]);
                let l_le = self.to_le(&l);
                let a_le = self.to_le(&a_bits[i]);
                let zero_le = self.constant_le(F::zero());
                self.add_constraint(R1c::new(l_le, a_le, zero_le), Some(DebugInfo::new("mustBeLessOrEqCst")));
                self.mark_boolean(&a_bits[i]);
            }
        }
    }

    // ---- hints, logging, wiring hygiene ------------------------------

    /// Registers a caller-supplied hint call: allocates `nb_outputs`
    /// fresh internal wires and records the inputs for the solver to
    /// evaluate against the witness (spec §6).
    pub fn add_hint(&mut self, id: HintId, inputs: &[Variable<F>], nb_outputs: usize) -> Vec<Variable<F>> {
        let mut hint_inputs = Vec::with_capacity(inputs.len());
        for v in inputs {
            let le = self.to_le(v);
            self.touch_le(&le);
            hint_inputs.push(HintInput::Expr(le));
        }
        let outputs: Vec<WireId> = (0..nb_outputs).map(|_| self.alloc_internal()).collect();
        let hint = Hint { id, inputs: hint_inputs, outputs: outputs.clone() };
        for &w in &outputs {
            self.hints.insert(w, hint.clone());
        }
        outputs
            .into_iter()
            .map(|w| Variable::Linear(LinearExpression::single(Term::new(COEFF_ID_ONE, w, Visibility::Internal))))
            .collect()
    }

    /// Records a circuit-authored log line (spec §4.4.2). Multi-term
    /// arguments are recorded as a delimited span to be summed at
    /// render time; this does not touch wires or emit a constraint.
    pub fn println(&mut self, format: impl Into<String>, args: &[Variable<F>]) {
        let mut resolvables = Vec::with_capacity(args.len());
        for a in args {
            let le = self.to_le(a);
            if le.0.len() == 1 {
                resolvables.push(Resolvable::Term(le.0[0]));
            } else {
                resolvables.push(Resolvable::Eval(le.0));
            }
        }
        self.logs.push(LogEntry { format: format.into(), resolvables });
    }

    /// Verifies every declared public/secret input was referenced by at
    /// least one constraint or hint call (spec §4, "unconstrained
    /// input"). The ONE wire is exempt.
    pub fn check_variables(&self) -> Result<(), UnconstrainedInput> {
        for i in 1..self.nb_public {
            if !self.touched.contains(&i) {
                return Err(UnconstrainedInput { name: self.public_names[i - 1].clone() });
            }
        }
        for i in 0..self.nb_secret {
            let wid = self.nb_public + i;
            if !self.touched.contains(&wid) {
                return Err(UnconstrainedInput { name: self.secret_names[i].clone() });
            }
        }
        Ok(())
    }

    pub fn finish(self) -> CompiledR1cs<F> {
        CompiledR1cs {
            wires: WireCounts { nb_public: self.nb_public, nb_secret: self.nb_secret, nb_internal: self.nb_internal },
            constraints: self.constraints,
            coefficients: self.coefficients,
            hints: self.hints,
            logs: self.logs,
            debug: self.debug,
            schema: Schema { public_names: self.public_names, secret_names: self.secret_names },
            curve: self.curve,
            layers: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blstrs::Scalar as Fr;

    #[test]
    fn add_and_mul_fold_constants() {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let x = b.new_secret_variable("x");
        let five = b.constant(Fr::from(5u64));
        let sum = b.add(&[x.clone(), five.clone()]);
        assert!(matches!(sum, Variable::Linear(_)));
        let folded = b.mul(&Variable::Constant(Fr::from(2u64)), &Variable::Constant(Fr::from(3u64)));
        assert_eq!(folded.as_constant(), Some(Fr::from(6u64)));
        assert_eq!(b.constraints.len(), 0);
    }

    #[test]
    fn mul_of_two_variables_emits_one_constraint() {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let x = b.new_secret_variable("x");
        let y = b.new_secret_variable("y");
        let _ = b.mul(&x, &y);
        assert_eq!(b.constraints.len(), 1);
    }

    #[test]
    fn assert_is_boolean_is_idempotent_on_single_wire() {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let x = b.new_secret_variable("x");
        b.assert_is_boolean(&x);
        b.assert_is_boolean(&x);
        assert_eq!(b.constraints.len(), 1);
    }

    #[test]
    fn check_variables_flags_unconstrained_secret_input() {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let _unused = b.new_secret_variable("unused");
        let err = b.check_variables().unwrap_err();
        assert_eq!(err.name, "unused");
    }

    #[test]
    fn assert_is_equal_on_constants_still_emits_a_constraint() {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let five = Variable::Constant(Fr::from(5u64));
        b.assert_is_equal(&five, &five);
        assert_eq!(b.constraints.len(), 1);
    }

    #[test]
    fn too_wide_constant_bound_poisons_the_builder_instead_of_panicking() {
        let mut b: CircuitBuilder<Fr> = CircuitBuilder::new(CurveId::BLS12_381);
        let x = b.new_secret_variable("x");
        let too_wide = num_bigint::BigUint::from(1u8) << (bit_len::<Fr>() + 1);
        b.assert_is_less_or_equal(&x, Bound::Constant(too_wide));
        assert!(matches!(b.take_poison(), Some(crate::error::CompileError::BoundTooWide { .. })));
    }
}
