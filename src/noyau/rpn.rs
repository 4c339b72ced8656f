// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), évaluable avec une seule pile
//
// Règles:
// - Ident(name) suivi de '(' => marqueur de fonction (sur la pile), sinon => sortie directe
// - Appels : nombre d’arguments = virgules de premier niveau + 1, ou 0 pour "f()"
// - Moins unaire (Neg) : '-' en tête, après un opérateur autre que ')', ou après un appel
//
// NOTE:
// - La règle du moins unaire est volontairement conservatrice (heuristique).
//   Elle est couverte par des tests ciblés plus bas : ne pas la "corriger" en douce.

use super::erreur::ParseError;
use super::jetons::{Op, Tok};

/// Élément de la pile d’opérateurs.
#[derive(Clone, Debug)]
enum Pile {
    Op(Op),
    LPar,
    Fonction(String),
}

fn precedence(op: Op) -> u8 {
    match op {
        Op::Neg => 4,
        Op::Caret => 3,
        Op::Star | Op::Slash => 2,
        Op::Plus | Op::Minus => 1,
        _ => 0,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Caret | Op::Neg)
}

/// '-' unaire ? (jeton précédent absent, opérateur autre que ')', ou appel)
fn est_moins_unaire(prev: Option<&Tok>) -> bool {
    match prev {
        None => true,
        Some(Tok::Op(op)) => *op != Op::RPar,
        Some(Tok::Call { .. }) => true,
        Some(_) => false,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("min"), LPar, Ident("x"), Comma, Num(2), RPar]
///   rpn:    [Ident("x"), Num(2), Call { nom: "min", argc: 2 }]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ParseError> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // Un compteur de virgules par appel de fonction ouvert.
    let mut argc_pile: Vec<usize> = Vec::new();

    let mut prev: Option<&Tok> = None;

    for (k, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Call { .. } => out.push(tok.clone()),

            Tok::Ident(name) => {
                if matches!(tokens.get(k + 1), Some(Tok::Op(Op::LPar))) {
                    // fonction : on la garde sur la pile (elle sortira après ')')
                    ops.push(Pile::Fonction(name.clone()));
                } else {
                    // variable/constante : sortie directe
                    out.push(tok.clone());
                }
            }

            Tok::Op(Op::LPar) => {
                // si une fonction est juste en dessous, on ouvre son compteur
                if matches!(ops.last(), Some(Pile::Fonction(_))) {
                    argc_pile.push(0);
                }
                ops.push(Pile::LPar);
            }

            Tok::Op(Op::RPar) => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Pile::LPar) => break,
                        Some(Pile::Op(op)) => out.push(Tok::Op(op)),
                        Some(Pile::Fonction(_)) | None => {
                            return Err(ParseError::ParenthesesDesequilibrees)
                        }
                    }
                }

                // si une fonction est au sommet, on la sort aussi (en appel résolu)
                if matches!(ops.last(), Some(Pile::Fonction(_))) {
                    if let Some(Pile::Fonction(nom)) = ops.pop() {
                        let virgules = argc_pile.pop().unwrap_or(0);
                        let vide = matches!(prev, Some(Tok::Op(Op::LPar)));
                        let argc = if vide { 0 } else { virgules + 1 };
                        out.push(Tok::Call { nom, argc });
                    }
                }
            }

            Tok::Op(Op::Comma) => {
                // séparateur d’arguments : dépile jusqu’à '(' (sans la retirer)
                loop {
                    match ops.last() {
                        Some(Pile::LPar) => break,
                        Some(Pile::Op(op)) => {
                            out.push(Tok::Op(*op));
                            ops.pop();
                        }
                        Some(Pile::Fonction(_)) | None => return Err(ParseError::VirguleMalPlacee),
                    }
                }
                match argc_pile.last_mut() {
                    Some(n) => *n += 1,
                    None => return Err(ParseError::VirguleHorsAppel),
                }
            }

            Tok::Op(op) => {
                let entrant = if *op == Op::Minus && est_moins_unaire(prev) {
                    Op::Neg
                } else {
                    *op
                };

                // dépile tant que l’opérateur du haut lie plus fort
                // (bloqué par '(' et par les fonctions)
                while let Some(Pile::Op(top)) = ops.last() {
                    let p_top = precedence(*top);
                    let p_tok = precedence(entrant);

                    let doit_pop =
                        p_top > p_tok || (p_top == p_tok && !is_right_associative(entrant));

                    if doit_pop {
                        out.push(Tok::Op(*top));
                        ops.pop();
                    } else {
                        break;
                    }
                }

                ops.push(Pile::Op(entrant));
            }
        }

        prev = Some(tok);
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::Op(op) => out.push(Tok::Op(op)),
            Pile::LPar | Pile::Fonction(_) => return Err(ParseError::ParenthesesDesequilibrees),
        }
    }

    Ok(out)
}
