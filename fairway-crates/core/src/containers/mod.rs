//! Contains containers which are used by the solver.
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use keyed_vec::*;
pub(crate) use keyed_vec::storage_key;

/// [`std::collections::HashMap`] that defaults to a deterministic hasher.
#[allow(clippy::disallowed_types, reason = "this is how we define our HashMap")]
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
