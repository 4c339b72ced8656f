// src/noyau/erreur.rs
//
// Erreurs du noyau, une par phase :
// - LexError     : jetons (caractère ou nombre invalide)
// - ParseError   : shunting-yard (structure)
// - EvalError    : évaluation RPN (une seule évaluation, la compilée reste valide)
// - CompileError : jetons + RPN (ce que renvoie `compile`)
//
// Les messages (`Display`) sont affichés tels quels sous le champ de saisie.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character: \"{c}\" at position {pos}")]
    CaractereInattendu { c: char, pos: usize },

    #[error("invalid number \"{texte}\" at position {pos}")]
    NombreInvalide { texte: String, pos: usize },
}

impl LexError {
    /// Position (indice de caractère) du fautif dans le texte source.
    pub fn position(&self) -> usize {
        match self {
            LexError::CaractereInattendu { pos, .. } | LexError::NombreInvalide { pos, .. } => {
                *pos
            }
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("mismatched parentheses")]
    ParenthesesDesequilibrees,

    #[error("misplaced comma")]
    VirguleMalPlacee,

    #[error("comma outside function call")]
    VirguleHorsAppel,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("unknown identifier: {0}")]
    IdentifiantInconnu(String),

    #[error("unknown function: {0}")]
    FonctionInconnue(String),

    #[error("bad unary minus")]
    MoinsUnaireInvalide,

    #[error("bad operator")]
    OperateurInvalide,

    #[error("not enough args for {0}()")]
    ArgumentsInsuffisants(String),

    #[error("too many args for {0}()")]
    ArgumentsEnTrop(String),

    #[error("expression did not resolve to a single value")]
    PasUneValeurUnique,

    #[error("expression returned non-finite number")]
    NonFini,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
