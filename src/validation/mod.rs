//! Validation Engine - Declarative per-field rules plus standalone format
//! checks.
//!
//! A [`Rule`] is a static per-field configuration (required, length bounds,
//! pattern, custom predicate) evaluated in a fixed short-circuiting order.
//! [`Validator`] holds the rules for a form, an error set with at most one
//! entry per field, and an independent touched set that consumers use to
//! decide when to *display* errors.
//!
//! [`rules`] provides ready-made rule constructors (email, Luhn credit
//! card, value ranges, …); [`checks`] exposes the underlying predicates for
//! direct use.

pub mod checks;
pub mod rules;

mod rule;
mod validator;

pub use rule::{CheckOutcome, Rule};
pub use validator::Validator;
