//! Element identity: handles, identifier domains, and the per-graph
//! handle manager.
//!
//! The identifier domain is chosen by the embedding application: unsigned
//! integers, strings, or [`OpaqueId`] tokens. Each domain brings its own
//! allocation strategy (`origin`/`succ`) and its own diagram-facing text
//! form.

use crate::diagram::DiagramType;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

/// Underlying identifier domain for [`Handle`]s.
///
/// `origin` and `succ` define the built-in allocation sequence; it must be
/// strictly monotonic so that released identifiers are never re-minted.
pub trait HandleDomain: Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display + 'static {
    /// First identifier the allocation strategy mints.
    fn origin() -> Self;

    /// Next identifier in the allocation sequence.
    fn succ(&self) -> Self;

    /// Diagram-facing text form of the raw identifier.
    fn render(&self, diagram: DiagramType) -> String {
        let _ = diagram;
        self.to_string()
    }
}

macro_rules! integral_handle_domain {
    ($($ty:ty),* $(,)?) => {$(
        impl HandleDomain for $ty {
            fn origin() -> Self {
                0
            }

            fn succ(&self) -> Self {
                self + 1
            }

            fn render(&self, diagram: DiagramType) -> String {
                // Sequence participant identifiers must not read as numbers.
                match diagram {
                    DiagramType::Sequence => format!("OBJ{self}"),
                    _ => self.to_string(),
                }
            }
        }
    )*};
}

integral_handle_domain!(u16, u32, u64, usize);

impl HandleDomain for String {
    fn origin() -> Self {
        "handle_0".to_string()
    }

    fn succ(&self) -> Self {
        let next = self
            .strip_prefix("handle_")
            .and_then(|suffix| suffix.parse::<u64>().ok())
            .map_or(0, |n| n + 1);
        format!("handle_{next}")
    }
}

/// Process-monotonic counter disguised as an address-shaped token.
///
/// The ordering between tokens is an artifact of the counter and carries
/// no meaning for callers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct OpaqueId(usize);

impl OpaqueId {
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl HandleDomain for OpaqueId {
    fn origin() -> Self {
        Self(0x1000)
    }

    fn succ(&self) -> Self {
        Self(self.0 + 0x10)
    }
}

/// Identity of one element within one graph.
///
/// Handles are plain values: cloning one does not extend the owning
/// object's lifetime, and a handle minted by a different graph instance
/// resolves to nothing meaningful here (a documented caller error, not
/// checked at run time).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Handle<U: HandleDomain>(U);

impl<U: HandleDomain> Handle<U> {
    pub fn new(id: U) -> Self {
        Self(id)
    }

    pub fn id(&self) -> &U {
        &self.0
    }

    /// Diagram-facing text form.
    pub fn render(&self, diagram: DiagramType) -> String {
        self.0.render(diagram)
    }
}

impl<U: HandleDomain> From<U> for Handle<U> {
    fn from(id: U) -> Self {
        Self(id)
    }
}

impl From<&str> for Handle<String> {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<U: HandleDomain> Default for Handle<U> {
    fn default() -> Self {
        Self(U::origin())
    }
}

impl<U: HandleDomain> fmt::Display for Handle<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Tracks which identifiers of a domain are currently in use.
///
/// Allocation is monotonic: a cursor walks the domain's `succ` sequence
/// and never moves backwards, so identifiers released through
/// [`deallocate`](Self::deallocate) are not handed out again. Explicitly
/// reserved identifiers ([`allocate_at`](Self::allocate_at)) are skipped
/// over when the cursor reaches them.
pub struct HandleManager<U: HandleDomain> {
    used: BTreeSet<U>,
    cursor: U,
}

impl<U: HandleDomain> HandleManager<U> {
    pub fn new() -> Self {
        Self {
            used: BTreeSet::new(),
            cursor: U::origin(),
        }
    }

    /// Mints the next free handle and marks it used.
    pub fn allocate(&mut self) -> Handle<U> {
        let mut id = self.cursor.clone();
        while self.used.contains(&id) {
            id = id.succ();
        }
        self.cursor = id.succ();
        self.used.insert(id.clone());
        tracing::trace!(handle = %id, "allocated handle");
        Handle::new(id)
    }

    /// Reserves a caller-supplied handle. Returns `false` (and changes
    /// nothing) when the identifier is already in use.
    pub fn allocate_at(&mut self, handle: &Handle<U>) -> bool {
        self.used.insert(handle.id().clone())
    }

    /// Marks a handle free. Freed identifiers stay retired from the
    /// automatic allocation sequence.
    pub fn deallocate(&mut self, handle: &Handle<U>) {
        self.used.remove(handle.id());
    }

    pub fn is_allocated(&self, handle: &Handle<U>) -> bool {
        self.used.contains(handle.id())
    }

    pub fn allocated_count(&self) -> usize {
        self.used.len()
    }
}

impl<U: HandleDomain> Default for HandleManager<U> {
    fn default() -> Self {
        Self::new()
    }
}
