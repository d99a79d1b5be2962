//! Chained variable scopes.
//!
//! A [`Scope`] is a shared handle to one frame: a mutable map from
//! identifier to [`Value`] plus an optional parent frame. Handles are cheap
//! to clone and every clone refers to the same frame, so closures, call
//! frames and loop frames can all read and write one ancestor.
//!
//! Two rules govern the frame graph:
//! - Lookup walks outwards and yields [`Value::Absent`] for unknown names.
//! - Assignment writes to the nearest frame that already owns the name, or
//!   creates the name in the innermost frame when no frame has it:
//! ```paxl
//! total = 0; for (i = 0; i < 3; i = i + 1) { total = total + i }; total   // 3
//! ```

use crate::values::Value;
use core::fmt;
use hashbrown::HashMap;
use std::{cell::RefCell, rc::Rc};

struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Scope>,
}

/// Shared handle to a scope frame.
#[derive(Clone)]
pub struct Scope(Rc<RefCell<Frame>>);

impl Scope {
    /// Create a root frame with no parent.
    pub fn new() -> Self {
        Self::with_parent(None)
    }

    /// Create an empty frame whose parent is `parent`.
    pub fn new_frame(parent: &Scope) -> Self {
        Self::with_parent(Some(parent.clone()))
    }

    fn with_parent(parent: Option<Scope>) -> Self {
        Scope(Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent,
        })))
    }

    /// Copy this frame's own bindings into a new frame that shares this
    /// frame's parent.
    pub fn snapshot(&self) -> Self {
        let frame = self.0.borrow();
        Scope(Rc::new(RefCell::new(Frame {
            bindings: frame.bindings.clone(),
            parent: frame.parent.clone(),
        })))
    }

    pub fn parent(&self) -> Option<Scope> {
        self.0.borrow().parent.clone()
    }

    /// Look up `name` in this frame, then in each ancestor.
    pub fn lookup(&self, name: &str) -> Value {
        let parent = {
            let frame = self.0.borrow();
            if let Some(value) = frame.bindings.get(name) {
                return value.clone();
            }
            frame.parent.clone()
        };

        match parent {
            Some(parent) => parent.lookup(name),
            None => Value::Absent,
        }
    }

    /// Assign `value` to `name`, delegating to the ancestor that owns the
    /// binding when this frame does not.
    pub fn assign(&self, name: &str, value: Value) {
        if self.contains_own(name) || self.lookup(name).is_absent() {
            self.bind(name, value);
            return;
        }

        match self.parent() {
            Some(parent) => parent.assign(name, value),
            None => self.bind(name, value),
        }
    }

    /// Bind `name` in this frame only, shadowing any ancestor binding.
    pub fn bind(&self, name: &str, value: Value) {
        self.0.borrow_mut().bindings.insert(name.to_string(), value);
    }

    /// Whether `name` is bound in this frame itself (ancestors ignored).
    pub fn contains_own(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Names bound in this frame itself, sorted.
    pub fn own_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.0.borrow().bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Whether both handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

// Frames can reach themselves through a block's `this` binding, so only the
// names of the own bindings are printed.
impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.own_names())
            .field("has_parent", &self.0.borrow().parent.is_some())
            .finish()
    }
}
