use crate::error::{SpartieError, SpartieResult};
use crate::scanner::Token;
use crate::value::Value;
use std::collections::HashMap;

/// Handle to one scope inside an [`Environment`].
///
/// A handle outlives its scope only as a dead key: once the scope is popped,
/// every lookup through it misses, even if a newer scope reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId {
    index: usize,
    generation: u64,
}

#[derive(Debug, Default)]
struct Scope {
    values: HashMap<String, Value>,
    enclosing: Option<ScopeId>,
    generation: u64,
}

/// Arena of scopes linked innermost-to-outermost by index.
///
/// Slot 0 is the global scope and has no enclosing scope. Scopes are released
/// in stack order with [`Environment::pop_scope`].
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    next_generation: u64,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            next_generation: 1,
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId {
            index: 0,
            generation: 0,
        }
    }

    pub fn push_scope(&mut self, enclosing: ScopeId) -> ScopeId {
        let id = ScopeId {
            index: self.scopes.len(),
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.scopes.push(Scope {
            values: HashMap::new(),
            enclosing: Some(enclosing),
            generation: id.generation,
        });
        tracing::trace!(scope = id.index, enclosing = enclosing.index, "push scope");
        id
    }

    /// Drops `scope` and every scope pushed after it. The global scope is
    /// never dropped, and popping a released scope does nothing.
    pub fn pop_scope(&mut self, scope: ScopeId) {
        if scope.index > 0 && self.is_live(scope) {
            self.scopes.truncate(scope.index);
            tracing::trace!(scope = scope.index, "pop scope");
        }
    }

    pub fn is_live(&self, scope: ScopeId) -> bool {
        self.scope(scope).is_some()
    }

    pub fn enclosing(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scope(scope).and_then(|scope| scope.enclosing)
    }

    /// Binds `name` in `scope` itself, replacing any previous value there.
    pub fn define(&mut self, scope: ScopeId, name: &str, value: Value) -> SpartieResult<()> {
        let entry = self.scope_mut(scope).ok_or(SpartieError::ReleasedScope)?;
        entry.values.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&Value> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(value) = scope.values.get(name) {
                return Some(value);
            }
            current = scope.enclosing;
        }
        None
    }

    /// Overwrites the innermost binding of `name` visible from `scope`.
    /// Fails when no scope in the chain defines it.
    pub fn assign(&mut self, scope: ScopeId, name: &Token, value: Value) -> SpartieResult<()> {
        if !self.is_live(scope) {
            return Err(SpartieError::ReleasedScope);
        }

        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(scope) = self.scope_mut(id) else {
                break;
            };
            if let Some(slot) = scope.values.get_mut(name.lexeme.as_str()) {
                *slot = value;
                return Ok(());
            }
            current = scope.enclosing;
        }

        Err(SpartieError::UndefinedVariable {
            line: name.line,
            span: name.span,
            name: name.lexeme.clone(),
        })
    }

    fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes
            .get(id.index)
            .filter(|scope| scope.generation == id.generation)
    }

    fn scope_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.scopes
            .get_mut(id.index)
            .filter(|scope| scope.generation == id.generation)
    }
}
