//! Logic variables: declared value types, typed handles and the
//! constructors that create variables in an [`Arena`].

use crate::symbol::fresh_var_name;
use crate::term::Handle;
use crate::{Arena, Symbol, Term, TermError};
use smartstring::alias::String;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// The declared type of the values a variable is expected to bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarType {
    Any,
    Str,
    Int,
    Long,
    Double,
    Bool,
    Term,
}

/// A host type that a bound term can be extracted as.
pub trait TermValue: Sized {
    const TYPE: VarType;

    /// Extracts a value of this type from `term`, if it has the right shape.
    fn from_term(arena: &Arena, term: Term) -> Option<Self>;
}

impl TermValue for Term {
    const TYPE: VarType = VarType::Term;

    fn from_term(_arena: &Arena, term: Term) -> Option<Self> {
        Some(term)
    }
}

impl TermValue for String {
    const TYPE: VarType = VarType::Str;

    fn from_term(arena: &Arena, term: Term) -> Option<Self> {
        if !arena.is_atom(term) {
            return None;
        }
        arena.name(term).ok().map(String::from)
    }
}

impl TermValue for i32 {
    const TYPE: VarType = VarType::Int;

    fn from_term(_arena: &Arena, term: Term) -> Option<Self> {
        match term.0 {
            Handle::Int(i) => i32::try_from(i).ok(),
            _ => None,
        }
    }
}

impl TermValue for i64 {
    const TYPE: VarType = VarType::Long;

    fn from_term(_arena: &Arena, term: Term) -> Option<Self> {
        match term.0 {
            Handle::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl TermValue for f64 {
    const TYPE: VarType = VarType::Double;

    fn from_term(_arena: &Arena, term: Term) -> Option<Self> {
        match term.0 {
            Handle::Real(r) => Some(r),
            Handle::Int(i) => Some(i as f64),
            _ => None,
        }
    }
}

impl TermValue for bool {
    const TYPE: VarType = VarType::Bool;

    fn from_term(_arena: &Arena, term: Term) -> Option<Self> {
        match term.0 {
            Handle::True => Some(true),
            Handle::False => Some(false),
            _ => None,
        }
    }
}

/// A variable handle carrying the host type of its bindings.
///
/// `Var<T>` is the key used to project solutions onto typed values.
pub struct Var<T> {
    term: Term,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Var<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Var<T> {}

impl<T> PartialEq for Var<T> {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl<T> fmt::Debug for Var<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Var").field(&self.term).finish()
    }
}

impl<T> Var<T> {
    #[inline]
    pub fn term(&self) -> Term {
        self.term
    }

    #[inline]
    pub fn name(&self, arena: &Arena) -> Result<&'static str, TermError> {
        arena.name(self.term)
    }
}

impl<T> From<Var<T>> for Term {
    fn from(var: Var<T>) -> Self {
        var.term
    }
}

impl<T> crate::IntoTerm for Var<T> {
    #[inline]
    fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
        Ok(self.term)
    }
}

impl Arena {
    /// Creates a new untyped variable.
    ///
    /// Fails if `name` is blank or names one of the singletons `_` and `.`.
    #[inline]
    pub fn var(&mut self, name: impl AsRef<str>) -> Result<Term, TermError> {
        self.new_var(name.as_ref(), VarType::Any)
    }

    /// Creates a new variable whose bindings are read as `T`.
    pub fn typed_var<T: TermValue>(&mut self, name: impl AsRef<str>) -> Result<Var<T>, TermError> {
        let term = self.new_var(name.as_ref(), T::TYPE)?;
        Ok(Var {
            term,
            _marker: PhantomData,
        })
    }

    /// Creates a new variable named `_<n>`, unique within the process.
    pub fn fresh_var<T: TermValue>(&mut self) -> Var<T> {
        let term = self.push_var(fresh_var_name(), T::TYPE);
        Var {
            term,
            _marker: PhantomData,
        }
    }

    /// Returns a new variable with the name, type and index of `term`.
    pub fn copy_var(&mut self, term: Term) -> Result<Term, TermError> {
        if term.is_anon() || term.is_whole_solution() {
            return Err(TermError::SingletonCopy(self.var_name(term)?));
        }
        let Some((name, ty)) = self.var_node(term) else {
            self.verify(term)?;
            return Err(TermError::UnexpectedKind {
                expected: "var",
                found: term.kind_name(),
            });
        };
        let index = self.index(term)?;
        let copy = self.push_var(name, ty);
        self.set_index(copy, index);
        Ok(copy)
    }

    /// Returns the declared type of a variable; `None` for the anonymous one.
    pub fn var_type(&self, term: Term) -> Result<Option<VarType>, TermError> {
        if term.is_anon() {
            return Ok(None);
        }
        if term.is_whole_solution() {
            return Ok(Some(VarType::Any));
        }
        match self.var_node(term) {
            Some((_, ty)) => Ok(Some(ty)),
            None => {
                self.verify(term)?;
                Err(TermError::UnexpectedKind {
                    expected: "var",
                    found: term.kind_name(),
                })
            }
        }
    }

    /// Returns `true` if `term` is a variable whose name starts with `_`
    /// but which is not the anonymous variable.
    pub fn is_underscored_var(&self, term: Term) -> bool {
        self.var_node(term)
            .is_some_and(|(name, _)| name.as_str().starts_with('_'))
    }

    /// Orders two variables by name.
    pub fn cmp_var_names(&self, a: Term, b: Term) -> Result<Ordering, TermError> {
        Ok(self.var_name(a)?.cmp(self.var_name(b)?))
    }

    /// Returns the name of a variable.
    pub fn var_name(&self, term: Term) -> Result<&'static str, TermError> {
        if term.is_anon() {
            return Ok(Symbol::ANON.as_str());
        }
        if term.is_whole_solution() {
            return Ok(Symbol::WHOLE_SOLUTION.as_str());
        }
        match self.var_node(term) {
            Some((name, _)) => Ok(name.as_str()),
            None => {
                self.verify(term)?;
                Err(TermError::UnexpectedKind {
                    expected: "var",
                    found: term.kind_name(),
                })
            }
        }
    }
}
