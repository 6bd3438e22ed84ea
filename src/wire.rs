//! Wire ids and visibility tags (spec §3).

/// A non-negative wire identifier. Wire `0` is always the reserved "ONE"
/// wire, whose value is fixed at `1`.
pub type WireId = usize;

pub const ONE_WIRE: WireId = 0;

/// Tags the role a term's wire plays. `Virtual` denotes a term whose "wire"
/// is really the constant-one wire combined with a coefficient, i.e. a pure
/// constant contribution with no real storage behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Visibility {
    Public,
    Secret,
    Internal,
    Virtual,
}

/// The wire-id partition counts fixed at compile time: `[ONE, public…,
/// secret…, internal…]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WireCounts {
    /// Includes the reserved ONE wire, i.e. `nb_public >= 1`.
    pub nb_public: usize,
    pub nb_secret: usize,
    pub nb_internal: usize,
}

impl WireCounts {
    pub fn total(&self) -> usize {
        self.nb_public + self.nb_secret + self.nb_internal
    }

    /// Classifies a wire id into the visibility partition it falls in.
    /// Panics if `id` is out of range; callers are expected to only query
    /// ids they allocated themselves.
    pub fn visibility_of(&self, id: WireId) -> Visibility {
        if id < self.nb_public {
            Visibility::Public
        } else if id < self.nb_public + self.nb_secret {
            Visibility::Secret
        } else if id < self.total() {
            Visibility::Internal
        } else {
            panic!("wire id {} out of range (total wires = {})", id, self.total())
        }
    }
}
