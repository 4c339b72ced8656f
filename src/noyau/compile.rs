// src/noyau/compile.rs
//
// Point d’entrée de compilation : texte -> jetons -> RPN, UNE fois.
// La `Compilee` est ensuite réévaluée autant que voulu (chaque mouvement du
// pointeur) : seule l’évaluation RPN est rejouée.
//
// Immuable après construction => partageable entre threads (Send + Sync) ;
// la pile de valeurs reste locale à chaque évaluation.

use super::erreur::{CompileError, EvalError};
use super::eval::{eval_rpn, Variables};
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::to_rpn;

#[derive(Clone, Debug, PartialEq)]
pub struct Compilee {
    source: String,
    jetons: Vec<Tok>,
    rpn: Vec<Tok>,
}

impl Compilee {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn jetons(&self) -> &[Tok] {
        &self.jetons
    }

    pub fn rpn(&self) -> &[Tok] {
        &self.rpn
    }

    /// RPN lisible (panneau "Démarche").
    pub fn rpn_texte(&self) -> String {
        format_tokens(&self.rpn)
    }

    /// Jetons lisibles (panneau "Démarche").
    pub fn jetons_texte(&self) -> String {
        format_tokens(&self.jetons)
    }

    /// Évalue avec la liaison donnée. Peut rendre ±∞ / NaN.
    pub fn evaluer<V: Variables + ?Sized>(&self, vars: &V) -> Result<f64, EvalError> {
        eval_rpn(&self.rpn, vars)
    }

    /// Comme `evaluer`, mais un résultat non fini devient une erreur.
    pub fn evaluer_fini<V: Variables + ?Sized>(&self, vars: &V) -> Result<f64, EvalError> {
        let v = self.evaluer(vars)?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err(EvalError::NonFini)
        }
    }
}

/// Compile une expression (jetons + shunting-yard). Aucune évaluation ici :
/// "foo(x)" compile, l’erreur "unknown function" n’arrive qu’à l’évaluation.
pub fn compile(text: &str) -> Result<Compilee, CompileError> {
    let jetons = tokenize(text)?;
    let rpn = to_rpn(&jetons)?;
    Ok(Compilee {
        source: text.to_string(),
        jetons,
        rpn,
    })
}
