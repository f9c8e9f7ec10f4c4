//! Defines [`View`], a borrowed read-only representation of a [`Term`],
//! and the two equalities over terms.
//!
//! Structural equality treats variables by identity; value equality
//! compares variables by name and index.

use crate::arena::Node;
use crate::term::{Handle, OpaqueValue};
use crate::{Arena, Symbol, Term, TermError};
use core::fmt;

/// A borrowed view into the contents of a [`Term`].
///
/// Use [`Arena::view`] to obtain a view.  No allocations are performed;
/// names and argument slices are borrowed from the interning table and
/// the arena.
#[derive(Clone, Copy)]
pub enum View<'a> {
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Real(f64),
    /// An interned atom name.
    Atom(&'a str),
    /// A host value carried without interpretation.
    Opaque(&'a dyn OpaqueValue),
    /// A variable name.  The anonymous variable is `_`.
    Var(&'a str),
    /// A struct view containing the functor name and a slice of
    /// arguments.  The arguments are `Term` handles owned by the arena;
    /// zero-arity structs have an empty slice.
    Struct(&'a Arena, &'a str, &'a [Term]),
}

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            View::Int(i) => f.debug_tuple("Int").field(&i).finish(),
            View::Real(r) => f.debug_tuple("Real").field(&r).finish(),
            View::Atom(a) => f.debug_tuple("Atom").field(&a).finish(),
            View::Opaque(o) => f.debug_tuple("Opaque").field(&o).finish(),
            View::Var(v) => f.debug_tuple("Var").field(&v).finish(),
            View::Struct(a, name, ts) => f
                .debug_tuple("Struct")
                .field(&a.arena_id)
                .field(&name)
                .field(&ts.iter().map(|t| a.view(t)).collect::<Vec<_>>())
                .finish(),
        }
    }
}

impl Term {
    /// Produce a [`View`] of this term that borrows from the given
    /// [`Arena`].  See [`View`] for details.
    #[inline]
    pub fn view<'a>(&self, arena: &'a Arena) -> Result<View<'a>, TermError> {
        match self.0 {
            Handle::Int(i) => Ok(View::Int(i)),
            Handle::Real(r) => Ok(View::Real(r)),
            Handle::Atom(a) => Ok(View::Atom(a.as_str())),
            Handle::Anon => Ok(View::Var(Symbol::ANON.as_str())),
            Handle::WholeSolution => Ok(View::Var(Symbol::WHOLE_SOLUTION.as_str())),
            Handle::Cut | Handle::True | Handle::False => {
                Ok(View::Struct(arena, arena.name(*self)?, &[]))
            }
            Handle::Var(r) | Handle::Struct(r) | Handle::Opaque(r) => {
                match arena.node(*self, r)? {
                    Node::Var { name, .. } => Ok(View::Var(name.as_str())),
                    Node::Struct { name, args, .. } => Ok(View::Struct(
                        arena,
                        name.as_str(),
                        arena
                            .term_slice(args)
                            .map_err(|_| TermError::ForeignTerm(*self))?,
                    )),
                    Node::Opaque(value) => Ok(View::Opaque(&**value)),
                }
            }
        }
    }
}

impl Arena {
    /// Returns the functor and arguments of a struct term.
    pub(crate) fn struct_parts(&self, term: Term) -> Option<(Symbol, &[Term])> {
        let name = self.struct_name(term).ok()?;
        let args = self.args(term).ok()?;
        Some((name, args))
    }

    /// Compares two terms by shape.
    ///
    /// The same handle is always equal to itself.  Two distinct variables
    /// are never equal, whatever their names.  Two structs are equal when
    /// functor, arity and every pair of arguments are.  Numbers, atoms and
    /// opaque values compare by value.  Terms that do not belong to this
    /// arena compare unequal.
    pub fn structurally_equals(&self, a: Term, b: Term) -> bool {
        if a == b {
            return true;
        }
        match (a.0, b.0) {
            (Handle::Var(_) | Handle::Anon | Handle::WholeSolution, _)
            | (_, Handle::Var(_) | Handle::Anon | Handle::WholeSolution) => false,
            (Handle::Opaque(_), Handle::Opaque(_)) => {
                match (self.opaque_value(a), self.opaque_value(b)) {
                    (Some(x), Some(y)) => x.eq_dyn(y),
                    _ => false,
                }
            }
            _ if a.is_struct() && b.is_struct() => {
                let (Some((name_a, args_a)), Some((name_b, args_b))) =
                    (self.struct_parts(a), self.struct_parts(b))
                else {
                    return false;
                };
                name_a == name_b
                    && args_a.len() == args_b.len()
                    && args_a
                        .iter()
                        .zip(args_b)
                        .all(|(x, y)| self.structurally_equals(*x, *y))
            }
            (Handle::Int(x), Handle::Int(y)) => x == y,
            (Handle::Real(x), Handle::Real(y)) => x.to_bits() == y.to_bits(),
            _ => false,
        }
    }

    /// Compares two terms by value.
    ///
    /// Unlike [`Arena::structurally_equals`], two variables are equal when
    /// they have the same name and the same index.
    pub fn value_equals(&self, a: Term, b: Term) -> bool {
        if a == b {
            return true;
        }
        match (a.0, b.0) {
            (Handle::Var(_), Handle::Var(_)) => {
                match (self.var_node(a), self.var_node(b)) {
                    (Some((name_a, _)), Some((name_b, _))) => {
                        name_a == name_b && self.index(a).ok() == self.index(b).ok()
                    }
                    _ => false,
                }
            }
            _ if a.is_struct() && b.is_struct() => {
                let (Some((name_a, args_a)), Some((name_b, args_b))) =
                    (self.struct_parts(a), self.struct_parts(b))
                else {
                    return false;
                };
                name_a == name_b
                    && args_a.len() == args_b.len()
                    && args_a
                        .iter()
                        .zip(args_b)
                        .all(|(x, y)| self.value_equals(*x, *y))
            }
            _ => self.structurally_equals(a, b),
        }
    }
}
