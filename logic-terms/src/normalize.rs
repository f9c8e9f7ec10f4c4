//! Algorithms that prepare a term for resolution.
//!
//! [`Arena::normalize`] factorizes a term, so that structurally equal
//! sub-terms and same-named variables share one handle, and then numbers
//! its variables depth-first.  The numbering is what a solver uses to size
//! the binding frame of a goal or clause.

use crate::term::Handle;
use crate::{Arena, Symbol, Term, TermError, TermIndex, TermVisitor};
use smartstring::alias::String;

impl Arena {
    /// Returns every sub-term of `term` in depth-first post-order,
    /// excluding `term` itself.
    ///
    /// Duplicates are kept.  As a side effect, the index of every visited
    /// variable and struct is reset to [`TermIndex::Unassigned`].
    pub fn collect_terms(&mut self, term: Term) -> Result<Vec<Term>, TermError> {
        let mut collected = Vec::new();
        self.collect_terms_into(term, &mut collected)?;
        collected.pop();
        Ok(collected)
    }

    /// Appends `term` and all its sub-terms to `collected` in depth-first
    /// post-order, resetting their indexes.
    pub fn collect_terms_into(
        &mut self,
        term: Term,
        collected: &mut Vec<Term>,
    ) -> Result<(), TermError> {
        self.verify(term)?;
        self.clear_index(term);
        if let Handle::Struct(_) = term.0 {
            let arity = self.arity(term)?;
            for i in 0..arity {
                let arg = self.arg(term, i)?;
                self.collect_terms_into(arg, collected)?;
            }
        }
        collected.push(term);
        Ok(())
    }

    /// Returns a term equal in shape to `term` in which structurally
    /// equal sub-terms share one handle and all variables of the same
    /// name are one variable.
    ///
    /// When nothing needs sharing, `term` itself is returned.  Applying
    /// `factorize` to its own result returns that result unchanged.
    pub fn factorize(&mut self, term: Term) -> Result<Term, TermError> {
        let mut pool = self.collect_terms(term)?;
        self.factorize_within(term, &mut pool)
    }

    /// Factorizes `term` against the candidates in `pool`.
    ///
    /// A struct is first rebuilt from its factorized arguments, then
    /// replaced by the first struct of the pool with the same functor and
    /// the very same argument handles, so that sharing reaches every
    /// level.  A rebuilt struct with no such match joins the pool.  A variable is
    /// replaced by the first variable of the pool with the same name.
    /// Numbers, atoms and opaque values are returned unchanged.
    pub fn factorize_within(
        &mut self,
        term: Term,
        pool: &mut Vec<Term>,
    ) -> Result<Term, TermError> {
        match term.0 {
            Handle::Var(_) => {
                let (name, _) = self.var_node(term).ok_or(TermError::ForeignTerm(term))?;
                let shared = pool
                    .iter()
                    .copied()
                    .find(|t| self.var_node(*t).is_some_and(|(n, _)| n == name));
                Ok(match shared {
                    Some(var) => {
                        if var != term {
                            log::trace!("factorize: {} shares variable {:?}", name, var);
                        }
                        var
                    }
                    None => term,
                })
            }
            Handle::Struct(_) => {
                let args = self.args(term)?.to_vec();
                let mut new_args = Vec::with_capacity(args.len());
                let mut changed = false;
                for arg in &args {
                    let new_arg = self.factorize_within(*arg, pool)?;
                    changed |= new_arg != *arg;
                    new_args.push(new_arg);
                }
                let candidate = if changed {
                    self.clone_with_new_arguments(term, new_args)?
                } else {
                    term
                };
                if let Some(shared) = pool
                    .iter()
                    .copied()
                    .find(|t| self.same_shell(*t, candidate))
                {
                    if shared != term {
                        log::trace!(
                            "factorize: {} shared as {:?}",
                            candidate.display(self),
                            shared
                        );
                    }
                    return Ok(shared);
                }
                if changed {
                    log::trace!("factorize: rebuilt {}", candidate.display(self));
                    pool.push(candidate);
                }
                Ok(candidate)
            }
            _ => Ok(term),
        }
    }

    /// Returns `true` if `a` and `b` are structs with the same functor and
    /// identical argument handles.
    fn same_shell(&self, a: Term, b: Term) -> bool {
        match (self.struct_parts(a), self.struct_parts(b)) {
            (Some((name_a, args_a)), Some((name_b, args_b))) => {
                name_a == name_b && args_a == args_b
            }
            _ => false,
        }
    }

    /// Numbers the variables of `term` depth-first, left to right,
    /// starting at `start`, and returns the next free number.
    ///
    /// A term that already has an index is left alone, together with
    /// everything under it.  The anonymous variable never takes a number.
    /// A struct records the running count reached after its last
    /// argument.  Numbers, atoms and opaque values do not count.
    pub fn assign_indexes(&mut self, term: Term, start: u32) -> Result<u32, TermError> {
        if self.index(term)?.is_assigned() {
            return Ok(start);
        }
        match term.0 {
            Handle::Var(_) => {
                self.set_index(term, TermIndex::Assigned(start));
                Ok(start + 1)
            }
            Handle::Struct(_) => {
                let mut running = start;
                for i in 0..self.arity(term)? {
                    let arg = self.arg(term, i)?;
                    running = self.assign_indexes(arg, running)?;
                }
                self.set_index(term, TermIndex::Assigned(running));
                Ok(running)
            }
            _ => Ok(start),
        }
    }

    /// Factorizes `term` and numbers its variables from 0.
    ///
    /// This is the form in which goals and clauses are handed to a solver.
    /// The printed form of the result is the printed form of `term`.
    pub fn normalize(&mut self, term: Term) -> Result<Term, TermError> {
        let factorized = self.factorize(term)?;
        let vars = self.assign_indexes(factorized, 0)?;
        log::debug!(
            "normalized {} with {} variable(s){}",
            factorized.display(self),
            vars,
            if factorized == term { "" } else { " (rebuilt)" }
        );
        Ok(factorized)
    }

    /// Returns the distinct variables of `term` in order of first
    /// occurrence, depth-first.  The singletons `_` and `.` are not included.
    pub fn distinct_vars(&self, term: Term) -> Vec<Term> {
        struct DistinctVars(Vec<Term>);

        impl TermVisitor for DistinctVars {
            type Output = ();

            fn visit_var(&mut self, _arena: &Arena, var: Term) {
                if var.is_free_named_var() && !self.0.contains(&var) {
                    self.0.push(var);
                }
            }

            fn visit_struct(&mut self, arena: &Arena, term: Term) {
                for arg in arena.args(term).unwrap_or_default() {
                    arena.accept(*arg, self);
                }
            }
        }

        let mut visitor = DistinctVars(Vec::new());
        self.accept(term, &mut visitor);
        visitor.0
    }

    /// Returns the first variable named `name` found depth-first in `term`.
    ///
    /// The name `.` always yields [`Term::WHOLE_SOLUTION`].
    pub fn find_var(&self, term: Term, name: &str) -> Option<Term> {
        if name == Symbol::WHOLE_SOLUTION.as_str() {
            return Some(Term::WHOLE_SOLUTION);
        }
        match term.0 {
            Handle::Anon => (name == Symbol::ANON.as_str()).then_some(term),
            Handle::Var(_) => self
                .var_node(term)
                .filter(|(n, _)| n.as_str() == name)
                .map(|_| term),
            Handle::Struct(_) => self
                .args(term)
                .ok()?
                .iter()
                .find_map(|arg| self.find_var(*arg, name)),
            _ => None,
        }
    }

    /// Rebuilds `term` bottom-up, passing every struct through `mapper`
    /// after its arguments have been transformed.
    ///
    /// A struct whose arguments all come back unchanged is handed to
    /// `mapper` as is; if `mapper` returns its argument everywhere, the
    /// result is `term` itself.  Other terms are returned unchanged.
    pub fn depth_first_struct_transform<F>(
        &mut self,
        term: Term,
        mapper: &mut F,
    ) -> Result<Term, TermError>
    where
        F: FnMut(&mut Arena, Term) -> Result<Term, TermError>,
    {
        if !term.is_struct() {
            return Ok(term);
        }
        let args = self.args(term)?.to_vec();
        let mut new_args = Vec::with_capacity(args.len());
        let mut changed = false;
        for arg in &args {
            let new_arg = self.depth_first_struct_transform(*arg, mapper)?;
            changed |= new_arg != *arg;
            new_args.push(new_arg);
        }
        let rebuilt = if changed {
            self.clone_with_new_arguments(term, new_args)?
        } else {
            term
        };
        mapper(self, rebuilt)
    }

    /// Replaces every indexed variable of `term` by the value at its index
    /// in `frame`.
    ///
    /// A variable whose slot is missing or holds a variable is kept.
    /// Structs are rebuilt only where something was replaced.
    pub fn substitute(&mut self, term: Term, frame: &[Term]) -> Result<Term, TermError> {
        match term.0 {
            Handle::Var(_) => {
                let bound = self
                    .index(term)?
                    .value()
                    .and_then(|i| frame.get(i as usize))
                    .copied();
                Ok(match bound {
                    Some(value) if !value.is_var() => value,
                    _ => term,
                })
            }
            Handle::Struct(_) => {
                let args = self.args(term)?.to_vec();
                let mut new_args = Vec::with_capacity(args.len());
                let mut changed = false;
                for arg in &args {
                    let new_arg = self.substitute(*arg, frame)?;
                    changed |= new_arg != *arg;
                    new_args.push(new_arg);
                }
                if changed {
                    self.clone_with_new_arguments(term, new_args)
                } else {
                    Ok(term)
                }
            }
            _ => Ok(term),
        }
    }

    /// Returns the `name/arity` signature of a struct, or the printed form
    /// of any other term followed by `/0`.
    pub fn predicate_signature(&self, term: Term) -> Result<String, TermError> {
        if term.is_struct() {
            return Ok(String::from(self.signature(term)?));
        }
        self.verify(term)?;
        let mut signature = String::from(term.display(self).to_string());
        signature.push_str("/0");
        Ok(signature)
    }

    /// Returns `name/N`, the signature shared by every arity of a struct.
    pub fn varargs_signature(&self, term: Term) -> Result<String, TermError> {
        let mut signature = String::from(self.struct_name(term)?.as_str());
        signature.push_str("/N");
        Ok(signature)
    }
}
