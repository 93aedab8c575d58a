//! Stable per-type identifiers.
//!
//! Every element kind and every property slot is keyed by a [`TypeTag`]:
//! an FNV-1a hash of the compiler-provided type name. Tags are identical
//! for all instances of a type within one build and are never persisted,
//! so renames across builds are harmless. Hash collisions across distinct
//! types are an accepted (astronomically unlikely) risk; they are not
//! detected.

pub type TypeTag = u64;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

pub const fn fnv1a(text: &str) -> TypeTag {
    let bytes = text.as_bytes();
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Tag of a concrete type, recomputed on demand from its canonical name.
pub fn type_tag<T: ?Sized + 'static>() -> TypeTag {
    fnv1a(std::any::type_name::<T>())
}

/// Last path segment of a type name, without generic arguments.
/// Used in error messages and log events.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
