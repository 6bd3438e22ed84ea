//! The compiled R1CS, the serializable unit described in spec §3 and §4.2:
//! a frozen, pure-data representation. All constraint data is append-only
//! during building and immutable thereafter; the only mutation after
//! `compile()` is population of the layer schedule (spec §4.3).

use std::collections::BTreeMap;

use ff::PrimeField;

use crate::coeff::CoefficientTable;
use crate::debug::{DebugInfo, LogEntry};
use crate::field::CurveId;
use crate::hint::Hint;
use crate::r1c::R1c;
use crate::wire::{WireCounts, WireId};

/// Names for the public/secret wires, used in error messages and carried
/// through serialization so a deserialized system can still be introspected
/// by field name (spec §3's "schema").
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    /// Indexed like `wire_id - 1` (the reserved ONE wire has no name).
    pub public_names: Vec<String>,
    /// Indexed like `wire_id - nb_public`.
    pub secret_names: Vec<String>,
}

/// The partition of constraint indices into layers computed by the
/// scheduler (spec §4.3): `layers[k]` lists, in ascending emission order,
/// the constraints assigned to layer `k`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LayerSchedule {
    pub layers: Vec<Vec<usize>>,
}

impl LayerSchedule {
    pub fn nb_constraints(&self) -> usize {
        self.layers.iter().map(|l| l.len()).sum()
    }
}

/// The compiled constraint system: everything in spec §3's "Compiled
/// R1CS" plus the layer schedule, which is computed once at
/// compile-finalize or deserialize time (spec §3 Lifecycle).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CompiledR1cs<F: PrimeField> {
    pub wires: WireCounts,
    pub constraints: Vec<R1c>,
    pub coefficients: CoefficientTable<F>,
    /// `wid -> Hint`, keyed by every output wire the hint produces (a
    /// multi-output hint appears once per key, sharing the same `Hint`
    /// value), mirroring gnark's `MHints`.
    pub hints: BTreeMap<WireId, Hint>,
    pub logs: Vec<LogEntry>,
    /// `constraint_index -> DebugInfo`.
    pub debug: BTreeMap<usize, DebugInfo>,
    pub schema: Schema,
    pub curve: CurveId,
    pub layers: Option<LayerSchedule>,
}

impl<F: PrimeField> CompiledR1cs<F> {
    pub fn nb_public(&self) -> usize {
        self.wires.nb_public
    }

    pub fn nb_secret(&self) -> usize {
        self.wires.nb_secret
    }

    pub fn nb_internal(&self) -> usize {
        self.wires.nb_internal
    }

    pub fn nb_wires(&self) -> usize {
        self.wires.total()
    }

    pub fn nb_constraints(&self) -> usize {
        self.constraints.len()
    }
}
