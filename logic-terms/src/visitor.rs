//! Double dispatch over the closed set of term kinds.

use crate::term::Handle;
use crate::{Arena, Term};

/// Visits the two kinds of terms that carry structure: variables and
/// structs.
pub trait TermVisitor {
    type Output;

    /// Called for every variable, the anonymous one included.
    fn visit_var(&mut self, arena: &Arena, var: Term) -> Self::Output;

    /// Called for every struct, zero-arity structs included.
    fn visit_struct(&mut self, arena: &Arena, term: Term) -> Self::Output;
}

/// A [`TermVisitor`] that also handles atoms and all other values.
pub trait ExtendedTermVisitor: TermVisitor {
    fn visit_atom(&mut self, arena: &Arena, name: &str) -> Self::Output;

    /// Called for numbers and opaque values.
    fn visit_other(&mut self, arena: &Arena, term: Term) -> Self::Output;
}

impl Arena {
    /// Dispatches `term` to `visitor`.  Returns `None` when `term` is
    /// neither a variable nor a struct.
    pub fn accept<V>(&self, term: Term, visitor: &mut V) -> Option<V::Output>
    where
        V: TermVisitor + ?Sized,
    {
        match term.0 {
            Handle::Var(_) | Handle::Anon | Handle::WholeSolution => Some(visitor.visit_var(self, term)),
            Handle::Struct(_) | Handle::Cut | Handle::True | Handle::False => {
                Some(visitor.visit_struct(self, term))
            }
            _ => None,
        }
    }

    /// Dispatches any term to `visitor`.
    pub fn accept_extended<V>(&self, term: Term, visitor: &mut V) -> V::Output
    where
        V: ExtendedTermVisitor + ?Sized,
    {
        match term.0 {
            Handle::Var(_) | Handle::Anon | Handle::WholeSolution => visitor.visit_var(self, term),
            Handle::Struct(_) | Handle::Cut | Handle::True | Handle::False => {
                visitor.visit_struct(self, term)
            }
            Handle::Atom(name) => visitor.visit_atom(self, name.as_str()),
            Handle::Int(_) | Handle::Real(_) | Handle::Opaque(_) => visitor.visit_other(self, term),
        }
    }
}
