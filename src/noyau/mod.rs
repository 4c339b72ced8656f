//! Noyau expression (flottant, sans `eval`)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard -> RPN (postfix)
//! - fonctions.rs : registre fixe (sin, cos, …, min, max, clamp) + constantes pi, e
//! - eval.rs      : évaluation RPN (pile de valeurs) + liaisons de variables
//! - compile.rs   : compile(texte) -> Compilee réutilisable
//! - erreur.rs    : LexError / ParseError / EvalError / CompileError

pub mod compile;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use compile::{compile, Compilee};
pub use erreur::{CompileError, EvalError, LexError, ParseError};
pub use eval::{eval_expression, Xy};
