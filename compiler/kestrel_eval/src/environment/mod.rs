//! Lexical scope chain.
//!
//! Each frame is a `LocalScope<Scope>`: a map of bindings plus an optional
//! parent. Frames are shared, not copied: closures keep the frame they were
//! created in alive, and blocks, loop iterations and calls push fresh children.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use kestrel_ir::Name;

use crate::Value;

/// Reference to a scope frame.
pub type ScopeRef = LocalScope<Scope>;

/// Why a binding operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// `define` of a name already bound in this frame.
    Duplicate,
    /// `assign` of a name bound in no frame of the chain.
    Undefined,
}

/// Single-threaded shared cell for scope frames.
///
/// All frame allocations go through [`LocalScope::new`] or [`Scope::child`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Whether both handles refer to the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Frames can be reachable from their own bindings through closures,
        // so only the address is printed.
        write!(f, "LocalScope({:p})", Rc::as_ptr(&self.0))
    }
}

/// One frame of bindings.
#[derive(Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    /// Empty root frame.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Allocate a new frame whose parent is `parent`.
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent.clone()),
        })
    }

    /// Bind `name` in this frame. Shadowing a parent binding is allowed;
    /// rebinding in the same frame is not.
    pub fn define(&mut self, name: Name, value: Value) -> Result<(), ScopeError> {
        use std::collections::hash_map::Entry;
        match self.bindings.entry(name) {
            Entry::Occupied(_) => Err(ScopeError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Nearest binding of `name`, walking outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), ScopeError> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(ScopeError::Undefined),
        }
    }

    /// Whether this frame (not its ancestors) binds `name`.
    pub fn has_local(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of frames from this one to the root, inclusive.
    pub fn depth(&self) -> usize {
        match &self.parent {
            Some(parent) => 1 + parent.borrow().depth(),
            None => 1,
        }
    }

    /// Names bound in this frame, sorted.
    pub fn local_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.bindings.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.local_names())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
