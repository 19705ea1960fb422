use std::collections::HashMap;

use super::prelude::Object;

/// Handle to a scope owned by an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug, Default)]
struct Scope {
    store: HashMap<String, Object>,
    outer: Option<ScopeId>,
}

/// Arena of lexical scopes. Closures keep a `ScopeId` instead of owning their
/// defining scope, so recursive bindings don't form reference cycles. Scopes
/// that nothing can reach anymore are reclaimed by [`Environment::sweep`].
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Option<Scope>>,
    free: Vec<usize>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Some(Scope::default())],
            free: vec![],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Creates an empty scope whose lookups fall back to `outer`.
    pub fn enclose(&mut self, outer: ScopeId) -> ScopeId {
        let scope = Scope {
            store: HashMap::new(),
            outer: Some(outer),
        };

        match self.free.pop() {
            Some(idx) => {
                self.scopes[idx] = Some(scope);
                ScopeId(idx)
            },
            None => {
                self.scopes.push(Some(scope));
                ScopeId(self.scopes.len() - 1)
            }
        }
    }

    fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0).and_then(Option::as_ref)
    }

    /// Looks `name` up in `scope` and then in each enclosing scope.
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&Object> {
        let mut current = self.scope(scope);

        while let Some(scope) = current {
            if let Some(value) = scope.store.get(name) {
                return Some(value);
            }

            current = scope.outer.and_then(|outer| self.scope(outer));
        }

        None
    }

    /// Binds `name` in `scope` itself, shadowing any outer binding.
    pub fn set(&mut self, scope: ScopeId, name: impl Into<String>, value: Object) {
        match self.scopes.get_mut(scope.0).and_then(Option::as_mut) {
            Some(scope) => {
                scope.store.insert(name.into(), value);
            },
            None => log::warn!("binding into released scope {}", scope.0)
        }
    }

    /// Number of live scopes, the root included.
    pub fn len(&self) -> usize {
        self.scopes.len() - self.free.len()
    }

    /// Releases every scope unreachable from the root scope and `roots`.
    /// A scope is reachable through `outer` links and through function
    /// values bound in reachable scopes. Returns the number of released
    /// scopes; their slots are reused by later `enclose` calls.
    pub fn sweep(&mut self, roots: &[ScopeId]) -> usize {
        let mut marked = vec![false; self.scopes.len()];
        let mut stack = vec![self.root()];
        stack.extend_from_slice(roots);

        while let Some(id) = stack.pop() {
            if marked.get(id.0).copied().unwrap_or(true) {
                continue;
            }

            let Some(scope) = self.scope(id) else {
                continue;
            };

            marked[id.0] = true;

            stack.extend(scope.outer);
            stack.extend(scope.store.values().filter_map(Object::captured_scope));
        }

        let mut released = 0;

        for (idx, slot) in self.scopes.iter_mut().enumerate() {
            if !marked[idx] && slot.is_some() {
                *slot = None;
                self.free.push(idx);
                released += 1;
            }
        }

        log::debug!("released {released} scopes, {} alive", self.len());

        released
    }
}
