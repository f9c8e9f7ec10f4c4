//! Defines [`TermError`], the unified error type for term operations.
//!
//! Every failure of this crate is raised synchronously at the point of
//! violation: malformed construction, malformed signature strings,
//! misuse of accessors and handles that do not belong to the arena they
//! are resolved against.

use crate::arena::Slice;
use crate::{ArenaID, Term};
use smartstring::alias::String;
use thiserror::Error;

/// Represents all possible errors raised while building or inspecting terms.
///
/// A [`TermError`] is not meant to be recovered from for the offending
/// term: it signals that the term, or the request made about it, is
/// invalid.
#[derive(Debug, Clone, Error)]
pub enum TermError {
    #[error("cannot create a term from an absent value")]
    AbsentValue,

    #[error("cannot create struct \"{functor}\": absent argument at index {index}")]
    MissingArgument { functor: String, index: usize },

    #[error("the functor of a non-atom struct cannot be an empty string")]
    EmptyFunctor,

    #[error("name of a variable may not be empty or whitespace")]
    BlankVarName,

    #[error("must not instantiate the variables `_` or `.` (which are singletons)")]
    ReservedVarName,

    #[error("cannot copy the singleton variable `{0}`")]
    SingletonCopy(&'static str),

    #[error("cannot find character '/' in predicate signature \"{0}\" (supposed to be functor/arity)")]
    InvalidSignature(String),

    #[error("cannot get the left or right hand side of {0:?} (arity is not 2)")]
    NotBinary(Term),

    #[error("argument index {index} is out of range for arity {arity}")]
    ArgumentOutOfRange { index: usize, arity: usize },

    #[error("term {0:?} does not belong to this arena")]
    ForeignTerm(Term),

    #[error("type mismatch: expected {expected}, found {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unexpected functor in {0:?}")]
    UnexpectedName(Term),

    #[error("arity mismatch: expected {expected}, found {found}")]
    UnexpectedArity { expected: usize, found: usize },
}

/// Failures of handle resolution, reported to callers as
/// [`TermError::ForeignTerm`] together with the offending term.
#[derive(Debug, Clone, Error)]
pub(crate) enum InternalTermError {
    #[error("node belongs to arena {0:?}")]
    ForeignArena(ArenaID),

    #[error("invalid node id {0}")]
    InvalidNode(u32),

    #[error("invalid slice {0:?}")]
    InvalidSlice(Slice),
}
