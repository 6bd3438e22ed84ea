//! Layer scheduler (spec §4.3), grounded directly in gnark's
//! `internal/backend/bn254/cs/r1cs.go` `Layers()`: a single forward pass
//! over constraints in emission order that assigns each constraint to the
//! layer one past the highest layer any of its already-solved inputs sit
//! in, and marks that constraint's own freshly-computed wire (if any) as
//! solved at that layer.
//!
//! A constraint normally introduces at most one genuinely new wire — the
//! one its arithmetic directly computes, or (exclusively) one output wire
//! of a hint the constraint only checks. Two constraints can mark
//! different output wires of the same multi-output hint solved
//! independently, each at the layer of the constraint it first appears
//! unsolved in.

use ff::PrimeField;

use crate::compiled::{CompiledR1cs, LayerSchedule};
use crate::error::SchedulerError;
use crate::hint::HintInput;
use crate::term::Term;
use crate::wire::{Visibility, WireId};

/// Examines one term of one constraint (`loc_value` says whether it came
/// from `L`, `R`, or `O`), updating the running `high`/`loc`/`hint_flag`/
/// `term_to_compute` state for that constraint.
#[allow(clippy::too_many_arguments)]
fn process_term<F: PrimeField>(
    compiled: &CompiledR1cs<F>,
    solved: &mut [bool],
    variable_layer: &mut [usize],
    constraint_index: usize,
    t: Term,
    loc_value: u8,
    high: &mut usize,
    loc: &mut u8,
    hint_flag: &mut bool,
    term_to_compute: &mut Option<Term>,
) -> Result<(), SchedulerError> {
    let vid: WireId = t.wire;

    if solved[vid] {
        let h = variable_layer[vid];
        if h > *high {
            *high = h;
        }
        return Ok(());
    }

    if let Some(hint) = compiled.hints.get(&vid) {
        if !*hint_flag {
            *hint_flag = true;
            *term_to_compute = Some(t);
        }
        for input in &hint.inputs {
            let le = match input {
                HintInput::Expr(le) => le,
                HintInput::Constant(_) => continue,
            };
            for it in le.iter() {
                if it.visibility == Visibility::Virtual {
                    continue;
                }
                if solved[it.wire] {
                    let h = variable_layer[it.wire];
                    if h > *high {
                        *high = h;
                    }
                } else {
                    return Err(SchedulerError::Malformed {
                        constraint_index,
                        reason: "hint input wire not yet solved when scheduling its output".to_string(),
                    });
                }
            }
        }
        return Ok(());
    }

    if *loc != 0 {
        return Err(SchedulerError::Malformed {
            constraint_index,
            reason: "more than one wire to instantiate in a single constraint".to_string(),
        });
    }
    *term_to_compute = Some(t);
    *loc = loc_value;
    Ok(())
}

/// Computes the layer schedule for `compiled`. `layers[0]` is always
/// empty (reserved for the input wires, which start pre-solved); real
/// constraints start at layer 1.
pub fn schedule<F: PrimeField>(compiled: &CompiledR1cs<F>) -> Result<LayerSchedule, SchedulerError> {
    let inputs = compiled.nb_public() + compiled.nb_secret();
    let nb_wires = compiled.nb_wires();
    let mut solved = vec![false; nb_wires];
    let mut variable_layer = vec![0usize; nb_wires];
    for w in solved.iter_mut().take(inputs) {
        *w = true;
    }

    let mut layers: Vec<Vec<usize>> = vec![Vec::new(), Vec::new()];

    for (i, r1c) in compiled.constraints.iter().enumerate() {
        let mut high = 0usize;
        let mut loc: u8 = 0;
        let mut hint_flag = false;
        let mut term_to_compute: Option<Term> = None;

        for t in r1c.l.iter() {
            process_term(compiled, &mut solved, &mut variable_layer, i, *t, 1, &mut high, &mut loc, &mut hint_flag, &mut term_to_compute)?;
        }
        for t in r1c.r.iter() {
            process_term(compiled, &mut solved, &mut variable_layer, i, *t, 2, &mut high, &mut loc, &mut hint_flag, &mut term_to_compute)?;
        }
        for t in r1c.o.iter() {
            process_term(compiled, &mut solved, &mut variable_layer, i, *t, 3, &mut high, &mut loc, &mut hint_flag, &mut term_to_compute)?;
        }

        high += 1;
        while high >= layers.len() {
            layers.push(Vec::new());
        }
        layers[high].push(i);

        if loc != 0 || hint_flag {
            let wire = term_to_compute
                .expect("loc or hint_flag set implies a term was recorded this constraint")
                .wire;
            solved[wire] = true;
            variable_layer[wire] = high;
        }
    }

    if solved.iter().any(|&s| !s) {
        return Err(SchedulerError::UnsolvableSystem);
    }

    Ok(LayerSchedule { layers })
}
