mod errors;
mod load;

pub use errors::*;
pub use load::Load;

/// The hash map used throughout the crate.
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, fnv::FnvBuildHasher>;
