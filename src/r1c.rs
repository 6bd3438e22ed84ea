//! The R1C constraint record (spec §3): `L(w) * R(w) = O(w)`.

use crate::term::LinearExpression;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct R1c {
    pub l: LinearExpression,
    pub r: LinearExpression,
    pub o: LinearExpression,
}

impl R1c {
    pub fn new(l: LinearExpression, r: LinearExpression, o: LinearExpression) -> Self {
        R1c { l, r, o }
    }
}
