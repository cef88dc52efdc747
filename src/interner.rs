//! Identifier handles produced from code-unit ranges, equal by value.
//!
//! Interning is optional for correctness (plain string equality would also
//! work) but nearly free with a `HashMap`, and collapses repeated
//! identifiers (`this.x.x.x`, keyword-like property names) to a single
//! allocation.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Eq)]
pub struct Identifier(Rc<str>);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::hash::Hash for Identifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Interner {
    table: HashMap<Rc<str>, ()>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, text: &str) -> Identifier {
        if let Some((key, _)) = self.table.get_key_value(text) {
            return Identifier(key.clone());
        }
        let rc: Rc<str> = Rc::from(text);
        self.table.insert(rc.clone(), ());
        Identifier(rc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_text_interns_to_equal_handles() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
        assert!(Rc::ptr_eq(&a.0, &b.0));
    }

    #[test]
    fn distinct_text_is_not_equal() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }
}
