//! Noyau — évaluation d’une RPN
//!
//! Une seule pile de valeurs, un passage sur la RPN : O(longueur), aucune
//! allocation en dehors de la pile elle-même (les arguments d’un appel sont une
//! tranche de la pile).
//!
//! Remarque : l’évaluateur ne rejette pas les résultats non finis (1/0 = +∞).
//! C’est `Compilee::evaluer_fini` qui s’en charge pour le pad.

use std::collections::HashMap;

use super::compile::compile;
use super::erreur::EvalError;
use super::fonctions::{chercher, constante, AriteInvalide};
use super::jetons::{Op, Tok};

/// Liaison des variables, fournie à chaque évaluation.
pub trait Variables {
    fn valeur(&self, nom: &str) -> Option<f64>;
}

/// Liaison du pad : exactement `x` et `y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl Xy {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Variables for Xy {
    fn valeur(&self, nom: &str) -> Option<f64> {
        match nom {
            "x" => Some(self.x),
            "y" => Some(self.y),
            _ => None,
        }
    }
}

/// Aucune variable (expressions constantes).
impl Variables for () {
    fn valeur(&self, _nom: &str) -> Option<f64> {
        None
    }
}

impl Variables for [(&str, f64)] {
    fn valeur(&self, nom: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == nom).map(|(_, v)| *v)
    }
}

impl Variables for HashMap<String, f64> {
    fn valeur(&self, nom: &str) -> Option<f64> {
        self.get(nom).copied()
    }
}

/// Évalue une RPN produite par `to_rpn`.
pub fn eval_rpn<V: Variables + ?Sized>(rpn: &[Tok], vars: &V) -> Result<f64, EvalError> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Ident(name) => {
                let v = constante(name)
                    .or_else(|| vars.valeur(name))
                    .ok_or_else(|| EvalError::IdentifiantInconnu(name.clone()))?;
                st.push(v);
            }

            Tok::Op(Op::Neg) => {
                let a = st.pop().ok_or(EvalError::MoinsUnaireInvalide)?;
                st.push(-a);
            }

            Tok::Op(op) => {
                // droite d’abord : l’ordre compte pour - / ^
                let b = st.pop().ok_or(EvalError::OperateurInvalide)?;
                let a = st.pop().ok_or(EvalError::OperateurInvalide)?;

                let r = match op {
                    Op::Plus => a + b,
                    Op::Minus => a - b,
                    Op::Star => a * b,
                    Op::Slash => a / b,
                    Op::Caret => a.powf(b),
                    Op::LPar | Op::RPar | Op::Comma | Op::Neg => {
                        return Err(EvalError::OperateurInvalide)
                    }
                };
                st.push(r);
            }

            Tok::Call { nom, argc } => {
                let f = chercher(nom).ok_or_else(|| EvalError::FonctionInconnue(nom.clone()))?;
                if st.len() < *argc {
                    return Err(EvalError::ArgumentsInsuffisants(nom.clone()));
                }

                // arguments dans l’ordre d’origine (gauche -> droite)
                let debut = st.len() - argc;
                let r = f.appliquer(&st[debut..]).map_err(|e| match e {
                    AriteInvalide::PasAssez => EvalError::ArgumentsInsuffisants(nom.clone()),
                    AriteInvalide::Trop => EvalError::ArgumentsEnTrop(nom.clone()),
                })?;
                st.truncate(debut);
                st.push(r);
            }
        }
    }

    match st.as_slice() {
        [v] => Ok(*v),
        _ => Err(EvalError::PasUneValeurUnique),
    }
}

/// API publique "une fois" : compile puis évalue (sans vérifier la finitude).
/// Pour évaluer souvent la même expression, passer par `compile`.
pub fn eval_expression<V: Variables + ?Sized>(
    expr_str: &str,
    vars: &V,
) -> Result<f64, String> {
    let c = compile(expr_str).map_err(|e| e.to_string())?;
    c.evaluer(vars).map_err(|e| e.to_string())
}
