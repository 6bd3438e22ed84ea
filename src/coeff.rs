//! Coefficient interning table (spec §3 "Coefficient table").
//!
//! Four ids are reserved: `0 -> 0`, `1 -> 1`, `2 -> 2`, `3 -> -1`. All other
//! coefficients are interned by canonical byte representation, so two
//! compilations of the same circuit intern coefficients in the same order
//! and therefore produce the same ids (Property D, byte-determinism).

use std::collections::HashMap;

use ff::{Field as _, PrimeField};

use crate::field::canonical_bytes;

pub const COEFF_ID_ZERO: usize = 0;
pub const COEFF_ID_ONE: usize = 1;
pub const COEFF_ID_TWO: usize = 2;
pub const COEFF_ID_MINUS_ONE: usize = 3;

/// Ordered, deduplicated table of field-element coefficients referenced by
/// constraints via small integer ids.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CoefficientTable<F: PrimeField> {
    values: Vec<F>,
    #[serde(skip)]
    index: HashMap<Vec<u8>, usize>,
}

impl<F: PrimeField> Default for CoefficientTable<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PrimeField> CoefficientTable<F> {
    pub fn new() -> Self {
        let zero = F::zero();
        let one = F::one();
        let two = one + one;
        let minus_one = -one;

        let values = vec![zero, one, two, minus_one];
        let mut index = HashMap::with_capacity(4);
        for (id, v) in values.iter().enumerate() {
            index.insert(canonical_bytes(v), id);
        }

        CoefficientTable { values, index }
    }

    /// Rebuilds the lookup index from `values` after deserialization, where
    /// the index itself is not carried (it is a pure function of `values`).
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (id, v) in self.values.iter().enumerate() {
            self.index.insert(canonical_bytes(v), id);
        }
    }

    /// Interns `value`, returning its id. A value equal to an already
    /// interned one (including the four reserved ids) reuses that id.
    pub fn intern(&mut self, value: F) -> usize {
        let key = canonical_bytes(&value);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.values.len();
        self.values.push(value);
        self.index.insert(key, id);
        id
    }

    pub fn get(&self, id: usize) -> F {
        self.values[id]
    }

    /// Computes `self.get(id) * value`, special-casing the four reserved
    /// ids with a direct field op (`double`/`neg`) instead of a table
    /// lookup plus a multiply — gnark's `mulByCoeff` fast path, kept here
    /// as the hot-path term-accumulation primitive the solver calls.
    pub fn mul_term(&self, id: usize, value: F) -> F {
        match id {
            COEFF_ID_ZERO => F::zero(),
            COEFF_ID_ONE => value,
            COEFF_ID_TWO => value.double(),
            COEFF_ID_MINUS_ONE => -value,
            _ => self.values[id] * value,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.values
    }
}
