//! Deterministic `HashMap` and `HashSet`. The standard library maps are randomly seeded, so
//! their iteration order differs between runs; the `rustc-hash` variants are not.
//!
//! `HashMap<K, V, S>` has no `new` for a custom hasher; use `HashMap::default()`.

pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
