//! Defines the core [`Term`] handle and the coercion of host values
//! into terms.
//!
//! A `Term` is a small copyable handle.  Numbers and plain atoms are
//! stored inline; variables, compound terms and opaque host payloads
//! live in an [`Arena`] and the handle only carries their position.

use crate::{Arena, ArenaID, Symbol, TermError};
use core::fmt;
use smartstring::alias::String;
use std::any::Any;
use std::borrow::Cow;

/// Position of a node inside a particular arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef {
    pub(crate) arena_id: ArenaID,
    pub(crate) id: u32,
}

/// Internal handle describing the kind of a term and storing its data.
///
/// Each variant stores the associated value directly.  The `repr(u8)`
/// attribute ensures the discriminant occupies a single byte, which
/// together with the payloads yields a `Term` size of 16 bytes on
/// 64‑bit targets.
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(u8)]
pub(crate) enum Handle {
    Int(i64),
    Real(f64),
    Atom(Symbol),
    Opaque(NodeRef),
    Anon,
    WholeSolution,
    Var(NodeRef),
    Struct(NodeRef),
    Cut,
    True,
    False,
}

/// A compact, copyable handle referencing a term.
///
/// Equality of two `Term`s (`==`) is identity: two handles are equal when
/// they denote the very same variable or compound node, or the same inline
/// value.  Use [`Arena::structurally_equals`] and [`Arena::value_equals`]
/// for the two kinds of structural comparison.
#[derive(Copy, Clone, PartialEq)]
pub struct Term(pub(crate) Handle);

impl AsRef<Term> for Term {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// A host value that is carried by a term without being interpreted.
///
/// Opaque values are atomic: they have no arguments and two of them are
/// equal when the underlying host values are equal.
pub trait OpaqueValue: Any + fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn eq_dyn(&self, other: &dyn OpaqueValue) -> bool;
}

impl<T> OpaqueValue for T
where
    T: Any + fmt::Debug + fmt::Display + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn OpaqueValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// Wraps a host value so that [`IntoTerm`] stores it as an opaque payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque<T>(pub T);

/// Conversion of a host value into a [`Term`].
///
/// Numbers are narrowed to the two numeric kinds, booleans become the
/// `true` and `false` atoms, text is classified as a variable or an atom
/// following Prolog's naming convention, and terms pass through
/// unchanged.  Only an absent value (`None`) is rejected.
pub trait IntoTerm {
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError>;
}

macro_rules! impl_intoterm_for_integers {
    ($($t:ty),* $(,)?) => {$(
        impl IntoTerm for $t {
            #[inline]
            fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
                Ok(Term::int(self as i64))
            }
        }
    )*};
}
impl_intoterm_for_integers!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers stay whole numbers while they fit, and degrade to reals.
macro_rules! impl_intoterm_for_wide_integers {
    ($($t:ty),* $(,)?) => {$(
        impl IntoTerm for $t {
            #[inline]
            fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
                Ok(match i64::try_from(self) {
                    Ok(i) => Term::int(i),
                    Err(_) => Term::real(self as f64),
                })
            }
        }
    )*};
}
impl_intoterm_for_wide_integers!(u64, usize, isize, i128, u128);

macro_rules! impl_intoterm_for_floats {
    ($($t:ty),* $(,)?) => {$(
        impl IntoTerm for $t {
            #[inline]
            fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
                Ok(Term::real(self as f64))
            }
        }
    )*};
}
impl_intoterm_for_floats!(f32, f64);

impl IntoTerm for bool {
    #[inline]
    fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
        Ok(if self { Term::TRUE } else { Term::FALSE })
    }
}

impl<'a> IntoTerm for &'a str {
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        arena.value_of_str(self)
    }
}

impl<'a> IntoTerm for Cow<'a, str> {
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        arena.value_of_str(&self)
    }
}

impl IntoTerm for String {
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        arena.value_of_str(&self)
    }
}

impl IntoTerm for std::string::String {
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        arena.value_of_str(&self)
    }
}

impl IntoTerm for char {
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        let mut buf = [0u8; 4];
        arena.value_of_str(self.encode_utf8(&mut buf))
    }
}

impl<T> IntoTerm for Opaque<T>
where
    T: Any + fmt::Debug + fmt::Display + PartialEq + Send + Sync,
{
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        Ok(arena.opaque(self.0))
    }
}

impl<T: IntoTerm> IntoTerm for Option<T> {
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        match self {
            Some(value) => value.into_term(arena),
            None => Err(TermError::AbsentValue),
        }
    }
}

impl IntoTerm for Term {
    #[inline]
    fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
        Ok(self)
    }
}

impl IntoTerm for &Term {
    #[inline]
    fn into_term(self, _arena: &mut Arena) -> Result<Term, TermError> {
        Ok(*self)
    }
}

impl<F> IntoTerm for F
where
    F: FnOnce(&mut Arena) -> Result<Term, TermError>,
{
    #[inline]
    fn into_term(self, arena: &mut Arena) -> Result<Term, TermError> {
        self(arena)
    }
}

impl Term {
    /// Construct a new whole-number term.
    #[inline]
    pub fn int(i: impl Into<i64>) -> Self {
        Self(Handle::Int(i.into()))
    }

    /// Construct a new floating point term.
    #[inline]
    pub fn real(f: impl Into<f64>) -> Self {
        Self(Handle::Real(f.into()))
    }

    /// Returns the canonical atom for `name`.
    ///
    /// Ordinary names yield an interned atom.  The control functors `!`,
    /// `true` and `false` yield the shared zero-arity structs
    /// [`Term::CUT`], [`Term::TRUE`] and [`Term::FALSE`] instead, so that
    /// they can be recognized by identity.
    #[inline]
    pub fn atom(name: impl AsRef<str>) -> Self {
        Self::atom_symbol(Symbol::intern(name.as_ref()))
    }

    pub(crate) fn atom_symbol(name: Symbol) -> Self {
        match name {
            Symbol::CUT => Self::CUT,
            Symbol::TRUE => Self::TRUE,
            Symbol::FALSE => Self::FALSE,
            _ => Self(Handle::Atom(name)),
        }
    }

    /// The anonymous variable `_`.  There is exactly one in the process.
    pub const ANON: Self = Self(Handle::Anon);

    /// The variable `.` standing for a whole solution of a goal.  Like
    /// the anonymous variable it is a process-wide singleton without an
    /// index.
    pub const WHOLE_SOLUTION: Self = Self(Handle::WholeSolution);

    /// The cut, a zero-arity struct shared by every arena.
    pub const CUT: Self = Self(Handle::Cut);

    pub const TRUE: Self = Self(Handle::True);

    pub const FALSE: Self = Self(Handle::False);

    /// Returns `true` if the term is a variable, including the anonymous one.
    #[inline]
    pub fn is_var(&self) -> bool {
        matches!(
            self.0,
            Handle::Var(_) | Handle::Anon | Handle::WholeSolution
        )
    }

    /// Returns `true` if the term is the anonymous variable.
    #[inline]
    pub fn is_anon(&self) -> bool {
        matches!(self.0, Handle::Anon)
    }

    #[inline]
    pub fn is_whole_solution(&self) -> bool {
        matches!(self.0, Handle::WholeSolution)
    }

    /// Returns `true` if the term is an ordinary variable, neither `_` nor `.`.
    #[inline]
    pub fn is_free_named_var(&self) -> bool {
        matches!(self.0, Handle::Var(_))
    }

    /// Returns `true` if the term is a compound term or a zero-arity struct.
    #[inline]
    pub fn is_struct(&self) -> bool {
        matches!(
            self.0,
            Handle::Struct(_) | Handle::Cut | Handle::True | Handle::False
        )
    }

    /// Returns `true` if the term is an interned atom (not a struct).
    #[inline]
    pub fn is_plain_atom(&self) -> bool {
        matches!(self.0, Handle::Atom(_))
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self.0, Handle::Int(_))
    }

    #[inline]
    pub fn is_real(&self) -> bool {
        matches!(self.0, Handle::Real(_))
    }

    /// Returns `true` if the term is a number (`int` or `real`).
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self.0, Handle::Int(_) | Handle::Real(_))
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        matches!(self.0, Handle::Opaque(_))
    }

    /// Returns a string describing the kind of this term.
    #[inline]
    pub fn kind_name(&self) -> &'static str {
        match &self.0 {
            Handle::Int(_) => "int",
            Handle::Real(_) => "real",
            Handle::Atom(_) => "atom",
            Handle::Opaque(_) => "opaque",
            Handle::Anon | Handle::WholeSolution | Handle::Var(_) => "var",
            Handle::Struct(_) | Handle::Cut | Handle::True | Handle::False => "struct",
        }
    }

    /// Returns the arena node this handle points to, if any.
    #[inline]
    pub(crate) fn node_ref(&self) -> Option<NodeRef> {
        match self.0 {
            Handle::Opaque(r) | Handle::Var(r) | Handle::Struct(r) => Some(r),
            _ => None,
        }
    }
}

/// Implements the standard [`Debug`] formatter for [`Term`].
///
/// The output shows the kind of the handle and its inline payload or
/// arena position; it is meant for diagnostics, not for parsing.
impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Handle::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Handle::Real(r) => f.debug_tuple("Real").field(r).finish(),
            Handle::Atom(a) => f.debug_struct("Atom").field("name", &a.as_str()).finish(),
            Handle::Anon => f.write_str("Anon"),
            Handle::WholeSolution => f.write_str("WholeSolution"),
            Handle::Cut => f.write_str("Cut"),
            Handle::True => f.write_str("True"),
            Handle::False => f.write_str("False"),
            Handle::Opaque(r) => f
                .debug_struct("Opaque")
                .field("arena_id", &r.arena_id)
                .field("id", &r.id)
                .finish(),
            Handle::Var(r) => f
                .debug_struct("Var")
                .field("arena_id", &r.arena_id)
                .field("id", &r.id)
                .finish(),
            Handle::Struct(r) => f
                .debug_struct("Struct")
                .field("arena_id", &r.arena_id)
                .field("id", &r.id)
                .finish(),
        }
    }
}

/// Convenience macros to construct structs, atoms and variables.
///
/// Each macro either takes an explicit arena (`=> arena`) and returns a
/// `Result<Term, TermError>`, or returns a closure that [`IntoTerm`]
/// accepts, so that macros nest without repeating the arena.
#[macro_export]
macro_rules! func {
    // explicit arena
    ($functor:expr; $($arg:expr),+ $(,)? => $arena:expr) => {
        $crate::func!($functor; $($arg),+)($arena)
    };
    // implicit arena
    ($functor:expr; $($arg:expr),+ $(,)?) => {
        (|__arena: &mut $crate::Arena| -> ::core::result::Result<$crate::Term, $crate::TermError> {
            let __args: &[$crate::Term] = &[$($crate::IntoTerm::into_term($arg, __arena)?),+];
            __arena.func($functor, __args.iter().copied())
        })
    };
}

#[macro_export]
macro_rules! atom {
    // explicit arena
    ($name:expr => $arena:expr) => {
        $crate::atom!($name)($arena)
    };
    // implicit arena
    ($name:expr) => {
        (|__arena: &mut $crate::Arena| -> ::core::result::Result<$crate::Term, $crate::TermError> {
            Ok(__arena.atom($name))
        })
    };
}

#[macro_export]
macro_rules! var {
    // explicit arena
    ($name:expr => $arena:expr) => {
        $crate::var!($name)($arena)
    };
    // implicit arena
    ($name:expr) => {
        (|__arena: &mut $crate::Arena| -> ::core::result::Result<$crate::Term, $crate::TermError> {
            __arena.var($name)
        })
    };
}

#[macro_export]
macro_rules! anon {
    () => {
        $crate::Term::ANON
    };
}
