//! Collections keyed by the identifiers of the solver, and hash collections with a fixed hasher
//! so that iteration order does not change between runs.
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use keyed_vec::*;

#[allow(clippy::disallowed_types, reason = "the one place where the std map is aliased")]
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
#[allow(clippy::disallowed_types, reason = "the one place where the std set is aliased")]
pub type HashSet<K, Hasher = FnvBuildHasher> = std::collections::HashSet<K, Hasher>;
