//! Terms and linear expressions (spec §3).

use std::collections::BTreeMap;

use ff::{Field, PrimeField};

use crate::coeff::CoefficientTable;
use crate::wire::{Visibility, WireId};

/// A packed triple `(coeff_idx, wire_id, visibility)`, meaning `coeff *
/// w[wire_id]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Term {
    pub coeff_id: usize,
    pub wire: WireId,
    pub visibility: Visibility,
}

impl Term {
    pub fn new(coeff_id: usize, wire: WireId, visibility: Visibility) -> Self {
        Term { coeff_id, wire, visibility }
    }
}

/// An ordered list of terms; its value under an assignment is the sum.
/// Duplicate wires may appear and the evaluator must not deduplicate them
/// implicitly: ordering is part of what makes compilation deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LinearExpression(pub Vec<Term>);

impl LinearExpression {
    pub fn new() -> Self {
        LinearExpression(Vec::new())
    }

    pub fn single(term: Term) -> Self {
        LinearExpression(vec![term])
    }

    pub fn push(&mut self, term: Term) {
        self.0.push(term);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges duplicate wire ids and drops zero-coefficient terms. This is a
    /// read-time normalization only (constraints as emitted keep their
    /// original, possibly-duplicated term list); normalization is
    /// deterministic by sorting on wire id, matching spec §4.1's
    /// "linear-expression normalizer".
    pub fn normalized<F: PrimeField>(&self, coeffs: &mut CoefficientTable<F>) -> LinearExpression {
        let mut acc: BTreeMap<WireId, (F, Visibility)> = BTreeMap::new();
        for t in &self.0 {
            let v = coeffs.get(t.coeff_id);
            acc.entry(t.wire)
                .and_modify(|(sum, _)| *sum = *sum + v)
                .or_insert((v, t.visibility));
        }

        let mut out = LinearExpression::new();
        for (wire, (sum, visibility)) in acc {
            if bool::from(sum.is_zero()) {
                continue;
            }
            let coeff_id = coeffs.intern(sum);
            out.push(Term::new(coeff_id, wire, visibility));
        }
        out
    }
}

impl IntoIterator for LinearExpression {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinearExpression {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
