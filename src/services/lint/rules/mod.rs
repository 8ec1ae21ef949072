//! Built-in lint rules

mod dot_notation;
mod forbidden_operators;
mod naming;
mod no_var_in_else;

pub use dot_notation::DotNotationLimit;
pub use forbidden_operators::ForbiddenOperators;
pub use naming::NamingConventions;
pub use no_var_in_else::NoVarInElse;

use super::LintRule;

/// Every rule the engine knows, in reporting order
pub fn builtin() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(NoVarInElse),
        Box::new(DotNotationLimit),
        Box::new(NamingConventions),
        Box::new(ForbiddenOperators),
    ]
}
