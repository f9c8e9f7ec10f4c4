//! # Logic Terms
//!
//! An arena-backed model of Prolog-like terms and the algorithms that
//! prepare them for a resolution engine.
//!
//! A [`Term`] is a 16 byte copyable handle.  Numbers and atoms live in
//! the handle itself; variables, compound terms and opaque host values
//! are stored in an [`Arena`].  Atom, functor and variable names are
//! interned process-wide as [`Symbol`]s, so name comparisons are integer
//! comparisons.
//!
//! Two terms can be compared in two ways.  [`Arena::structurally_equals`]
//! compares shapes, but two distinct variables are never equal even when
//! they share a name.  [`Arena::value_equals`] compares variables by name
//! and index.  [`Arena::normalize`] makes the two agree for variables of
//! one term: it shares every duplicated sub-term, merges variables of the
//! same name, and numbers the variables depth-first.
//!
//! ## Example
//! ```rust
//! # use logic_terms::{Arena, TermIndex, func};
//! let mut arena = Arena::new();
//!
//! // each "X" is a new variable
//! let term = func!("p"; "X", func!("f"; "Y", "X"), 42, "abc" => &mut arena).unwrap();
//! let x1 = arena.arg(term, 0).unwrap();
//! let f = arena.arg(term, 1).unwrap();
//! let x2 = arena.arg(f, 1).unwrap();
//! assert!(!arena.structurally_equals(x1, x2));
//!
//! let norm = arena.normalize(term).unwrap();
//! assert_eq!(arena.display(&norm).to_string(), "p(X, f(Y, X), 42, abc)");
//! assert_eq!(arena.distinct_vars(norm).len(), 2);
//! assert_eq!(arena.index(norm).unwrap(), TermIndex::Assigned(2));
//! ```
//!
//! ## License
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod arena;
mod display;
mod error;
mod normalize;
mod signature;
mod symbol;
mod term;
mod var;
mod view;
mod visitor;

pub use arena::{Arena, ArenaID, ArenaStats, TermIndex};
pub use display::{TermDisplay, quote_if_needed};
pub(crate) use error::InternalTermError;
pub use error::TermError;
pub use signature::{arity_from_signature, functor_from_signature};
pub use symbol::{Symbol, fresh_var_name};
pub use term::{IntoTerm, Opaque, OpaqueValue, Term};
pub use var::{TermValue, Var, VarType};
pub use view::View;
pub use visitor::{ExtendedTermVisitor, TermVisitor};
