//! Circuit interface (spec §6) and the `Variable` sum type (spec §9).
//!
//! gnark's original circuit interface discovers public/secret fields via
//! Go struct tags and runtime reflection. Rust has neither; per spec §9's
//! design note, reflection is replaced with an explicit `visit_fields`
//! method each circuit provides (hand-written, or generated by the
//! `circuit_fields!` macro below) that hands the compiler `(name, tag,
//! slot)` triples to allocate into. No runtime type introspection is
//! needed.

use ff::PrimeField;

use crate::term::LinearExpression;

/// A circuit-DSL value: either a constant field element, or a linear
/// combination of wires. Most builder operations lift a constant into a
/// one-term linear expression on demand rather than special-casing it
/// everywhere; `mul` and a few assertions special-case constants directly
/// for efficiency (spec §4.1).
#[derive(Clone, Debug)]
pub enum Variable<F: PrimeField> {
    Constant(F),
    Linear(LinearExpression),
}

impl<F: PrimeField> Variable<F> {
    pub fn is_constant(&self) -> bool {
        matches!(self, Variable::Constant(_))
    }

    pub fn as_constant(&self) -> Option<F> {
        match self {
            Variable::Constant(v) => Some(*v),
            Variable::Linear(_) => None,
        }
    }
}

/// How a declared field of a circuit should be allocated, parsed from the
/// spec's tag grammar: `"<name>,public"`, `"<name>,secret"` (the default),
/// or `"-"` to skip the field entirely. An empty name falls back to the
/// Rust field's own identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldTag {
    Public,
    Secret,
    Ignore,
}

/// Parses one struct-tag-shaped string, e.g. `"exponent,public"`, `"-"`,
/// or `",secret"` (name falls back to `field_name`).
pub fn parse_tag(raw: &str, field_name: &str) -> (String, FieldTag) {
    if raw == "-" {
        return (field_name.to_string(), FieldTag::Ignore);
    }
    let mut parts = raw.splitn(2, ',');
    let name = parts.next().unwrap_or("").trim();
    let visibility = parts.next().unwrap_or("secret").trim();
    let name = if name.is_empty() { field_name.to_string() } else { name.to_string() };
    let tag = match visibility {
        "public" => FieldTag::Public,
        _ => FieldTag::Secret,
    };
    (name, tag)
}

/// One declared input slot a circuit exposes to the compiler: its name,
/// its visibility tag, and a mutable reference to where the freshly
/// allocated `Variable` should be written back.
pub struct FieldSlot<'a, F: PrimeField> {
    pub name: String,
    pub tag: FieldTag,
    pub slot: &'a mut Variable<F>,
}

impl<'a, F: PrimeField> FieldSlot<'a, F> {
    pub fn new(field_name: &str, raw_tag: &str, slot: &'a mut Variable<F>) -> Self {
        let (name, tag) = parse_tag(raw_tag, field_name);
        FieldSlot { name, tag, slot }
    }
}

/// Generates a `visit_fields` implementation for a circuit struct, playing
/// the role gnark's reflection-based field walk plays, but resolved at
/// compile time instead of at runtime.
///
/// ```ignore
/// struct MyCircuit<F: PrimeField> {
///     x: Variable<F>,
///     y: Variable<F>,
/// }
/// circuit_fields!(MyCircuit<F: PrimeField> { x: "x,public", y: "-" });
/// ```
#[macro_export]
macro_rules! circuit_fields {
    ($ty:ident < $lt:ident : $bound:path > { $($field:ident : $tag:expr),* $(,)? }) => {
        impl<$lt: $bound> $crate::circuit::CircuitSchema<$lt> for $ty<$lt> {
            fn visit_fields(&mut self) -> Vec<$crate::circuit::FieldSlot<'_, $lt>> {
                vec![
                    $(
                        $crate::circuit::FieldSlot::new(stringify!($field), $tag, &mut self.$field)
                    ),*
                ]
            }
        }
    };
}

/// Implemented by circuits that declare public/secret input slots.
pub trait CircuitSchema<F: PrimeField> {
    fn visit_fields(&mut self) -> Vec<FieldSlot<'_, F>>;
}

/// A circuit value: declares public/secret fields via `CircuitSchema` and
/// records constraints via `define`.
pub trait Circuit<F: PrimeField>: CircuitSchema<F> {
    fn define(&self, builder: &mut crate::builder::CircuitBuilder<F>) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_grammar() {
        assert_eq!(parse_tag("exponent,public", "y"), ("exponent".to_string(), FieldTag::Public));
        assert_eq!(parse_tag(",secret", "y"), ("y".to_string(), FieldTag::Secret));
        assert_eq!(parse_tag("-", "y"), ("y".to_string(), FieldTag::Ignore));
        assert_eq!(parse_tag("", "y"), ("y".to_string(), FieldTag::Secret));
    }
}
