// src/noyau/jetons.rs

use super::erreur::LexError;

/// Opérateurs et ponctuation.
/// `Neg` (moins unaire) n’est jamais produit par `tokenize` : c’est le parser qui
/// re-étiquette un `Minus` quand une valeur est attendue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
    Comma,

    Neg, // moins unaire (synthétique)
}

impl Op {
    pub fn symbole(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Caret => "^",
            Op::LPar => "(",
            Op::RPar => ")",
            Op::Comma => ",",
            Op::Neg => "neg",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Variables, constantes et noms de fonctions (minuscules).
    // NOTE: le parser décide : suivi de '(' => fonction, sinon => variable/constante.
    Ident(String),

    Op(Op),

    // Appel résolu (produit SEULEMENT par le parser) : nom + nombre d’arguments.
    Call { nom: String, argc: usize },
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .25) -> Num (doit être fini)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - opérateurs + - * / ^, parenthèses ( ), virgule ,
pub fn tokenize(s: &str) -> Result<Vec<Tok>, LexError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffre, ou '.' immédiatement suivi d’un chiffre.
        // On prend la plus longue suite [0-9.] puis on laisse f64 trancher.
        let debut_nombre = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()));
        if debut_nombre {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            let v = texte
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LexError::NombreInvalide {
                    texte: texte.clone(),
                    pos: start,
                })?;
            out.push(Tok::Num(v));
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_ascii_lowercase()));
            continue;
        }

        let op = match c {
            '+' => Op::Plus,
            '-' => Op::Minus,
            '*' => Op::Star,
            '/' => Op::Slash,
            '^' => Op::Caret,
            '(' => Op::LPar,
            ')' => Op::RPar,
            ',' => Op::Comma,
            _ => return Err(LexError::CaractereInattendu { c, pos: i }),
        };
        out.push(Tok::Op(op));
        i += 1;
    }

    Ok(out)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),
            Tok::Op(op) => op.symbole().to_string(),
            Tok::Call { nom, argc } => format!("{nom}/{argc}"),
        };
        out.push(s);
    }
    out.join(" ")
}
