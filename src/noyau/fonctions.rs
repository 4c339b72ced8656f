// src/noyau/fonctions.rs
//
// Registre des fonctions + constantes.
// - table fixe, construite une seule fois (OnceLock), jamais modifiée
// - noms insensibles à la casse (le tokenizer normalise déjà en minuscules)
// - min/max/clamp propagent NaN (un NaN en argument donne NaN)
// - fonctions à un argument : les arguments en trop sont ignorés (sin(1,2) = sin(1)) ;
//   seul clamp refuse un 4e argument

use std::collections::HashMap;
use std::f64::consts;
use std::sync::OnceLock;

/// Nombre d’arguments accepté par une fonction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Exacte(usize),
    AuMoins(usize),
}

impl Arite {
    pub fn minimum(self) -> usize {
        match self {
            Arite::Exacte(n) | Arite::AuMoins(n) => n,
        }
    }

    pub fn maximum(self) -> Option<usize> {
        match self {
            Arite::Exacte(n) => Some(n),
            Arite::AuMoins(_) => None,
        }
    }
}

/// Refus d’appliquer une fonction : arguments en trop ou manquants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AriteInvalide {
    PasAssez,
    Trop,
}

#[derive(Clone, Copy, Debug)]
pub struct Fonction {
    pub nom: &'static str,
    pub arite: Arite,
    f: fn(&[f64]) -> f64,
}

impl Fonction {
    /// Applique la fonction (arité vérifiée ici : jamais de panique sur `args`).
    pub fn appliquer(&self, args: &[f64]) -> Result<f64, AriteInvalide> {
        if args.len() < self.arite.minimum() {
            return Err(AriteInvalide::PasAssez);
        }
        if self.arite.maximum().is_some_and(|max| args.len() > max) {
            return Err(AriteInvalide::Trop);
        }
        Ok((self.f)(args))
    }
}

fn min_nan(args: &[f64]) -> f64 {
    args.iter().fold(f64::INFINITY, |acc, &v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.min(v)
        }
    })
}

fn max_nan(args: &[f64]) -> f64 {
    args.iter().fold(f64::NEG_INFINITY, |acc, &v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

/// Arrondi "demi vers +∞" : round(2.5) = 3, round(-2.5) = -2.
fn arrondi(v: f64) -> f64 {
    let f = v.floor();
    if v - f >= 0.5 {
        f + 1.0
    } else {
        f
    }
}

/// clamp(v, bas, haut) = max(bas, min(haut, v)) ; si bas > haut, bas gagne.
fn borne(a: &[f64]) -> f64 {
    max_nan(&[a[1], min_nan(&[a[2], a[0]])])
}

const FONCTIONS: &[Fonction] = &[
    Fonction { nom: "sin", arite: Arite::AuMoins(1), f: |a| a[0].sin() },
    Fonction { nom: "cos", arite: Arite::AuMoins(1), f: |a| a[0].cos() },
    Fonction { nom: "tan", arite: Arite::AuMoins(1), f: |a| a[0].tan() },
    Fonction { nom: "asin", arite: Arite::AuMoins(1), f: |a| a[0].asin() },
    Fonction { nom: "acos", arite: Arite::AuMoins(1), f: |a| a[0].acos() },
    Fonction { nom: "atan", arite: Arite::AuMoins(1), f: |a| a[0].atan() },
    Fonction { nom: "sqrt", arite: Arite::AuMoins(1), f: |a| a[0].sqrt() },
    Fonction { nom: "abs", arite: Arite::AuMoins(1), f: |a| a[0].abs() },
    Fonction { nom: "floor", arite: Arite::AuMoins(1), f: |a| a[0].floor() },
    Fonction { nom: "ceil", arite: Arite::AuMoins(1), f: |a| a[0].ceil() },
    Fonction { nom: "round", arite: Arite::AuMoins(1), f: |a| arrondi(a[0]) },
    Fonction { nom: "min", arite: Arite::AuMoins(2), f: min_nan },
    Fonction { nom: "max", arite: Arite::AuMoins(2), f: max_nan },
    Fonction { nom: "clamp", arite: Arite::Exacte(3), f: borne },
];

static REGISTRE: OnceLock<HashMap<&'static str, Fonction>> = OnceLock::new();

/// Registre complet (lecture seule, partagé par toutes les évaluations).
pub fn registre() -> &'static HashMap<&'static str, Fonction> {
    REGISTRE.get_or_init(|| FONCTIONS.iter().map(|f| (f.nom, *f)).collect())
}

/// Recherche insensible à la casse.
pub fn chercher(nom: &str) -> Option<&'static Fonction> {
    let r = registre();
    r.get(nom).or_else(|| r.get(nom.to_ascii_lowercase().as_str()))
}

/// Constantes nommées : `pi`, `e`.
pub fn constante(nom: &str) -> Option<f64> {
    if nom.eq_ignore_ascii_case("pi") {
        Some(consts::PI)
    } else if nom.eq_ignore_ascii_case("e") {
        Some(consts::E)
    } else {
        None
    }
}
