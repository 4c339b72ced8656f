//! Propriétés (proptest) : aller-retour précédence, idempotence, robustesse.
//!
//! La référence "directe" évalue une chaîne plate `a op b op c …` (opérandes
//! éventuellement précédés d’un moins unaire) niveau par niveau : moins unaire
//! sur l’opérande, puis `^` de droite à gauche, puis `*` `/`, puis `+` `-`
//! (gauche -> droite).

use proptest::prelude::*;

use super::compile;
use super::eval::Xy;

const MAX_INPUT_CHARS: usize = 64;

fn nombre() -> impl Strategy<Value = f64> {
    (0u32..1000).prop_map(|n| n as f64 / 8.0)
}

fn operateur() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['+', '-', '*', '/', '^'])
}

/// Opérande : (valeur, précédé d’un moins unaire ?).
fn operande() -> impl Strategy<Value = (f64, bool)> {
    (nombre(), any::<bool>())
}

fn texte_operande((v, neg): (f64, bool)) -> String {
    if neg {
        format!("-{v}")
    } else {
        format!("{v}")
    }
}

fn valeur_operande((v, neg): (f64, bool)) -> f64 {
    if neg {
        -v
    } else {
        v
    }
}

/// Référence : moins unaire, puis `^` (à droite), puis `*` `/`, puis `+` `-`.
fn reference_plate(premier: f64, suite: &[(char, f64)]) -> f64 {
    // chaînes de puissances regroupées, réduites de droite à gauche
    let mut groupes: Vec<(char, Vec<f64>)> = vec![('+', vec![premier])];
    for &(op, v) in suite {
        if op == '^' {
            if let Some((_, chaine)) = groupes.last_mut() {
                chaine.push(v);
                continue;
            }
        }
        groupes.push((op, vec![v]));
    }
    let facteurs = groupes.into_iter().map(|(op, chaine)| {
        let v = chaine
            .into_iter()
            .rev()
            .reduce(|exposant, base| base.powf(exposant))
            .unwrap_or(f64::NAN);
        (op, v)
    });

    let mut termes: Vec<(char, f64)> = Vec::new();
    for (op, v) in facteurs {
        if let (Some((_, dernier)), '*' | '/') = (termes.last_mut(), op) {
            if op == '*' {
                *dernier *= v;
            } else {
                *dernier /= v;
            }
            continue;
        }
        termes.push((op, v));
    }
    termes
        .into_iter()
        .fold(0.0, |acc, (op, v)| if op == '-' { acc - v } else { acc + v })
}

fn meme_valeur(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

proptest! {
    #[test]
    fn precedence_aller_retour(
        premier in operande(),
        suite in prop::collection::vec((operateur(), operande()), 0..8)
    ) {
        let mut texte = texte_operande(premier);
        for &(op, o) in &suite {
            texte.push_str(&format!(" {op} {}", texte_operande(o)));
        }

        let valeurs: Vec<(char, f64)> =
            suite.iter().map(|&(op, o)| (op, valeur_operande(o))).collect();
        let attendu = reference_plate(valeur_operande(premier), &valeurs);
        let obtenu = compile(&texte)
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .evaluer(&())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(meme_valeur(obtenu, attendu), "{texte}: {obtenu} != {attendu}");
    }

    #[test]
    fn puissance_avant_produit(a in nombre(), b in 0u32..4, c in nombre()) {
        let texte = format!("{a} * {c} ^ {b}");
        let attendu = a * c.powf(b as f64);
        let obtenu = compile(&texte)
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .evaluer(&())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!(meme_valeur(obtenu, attendu), "{texte}: {obtenu} != {attendu}");
    }

    #[test]
    fn puissance_associative_a_droite(
        bases in prop::collection::vec(1u32..4, 1..4)
    ) {
        let texte = bases.iter().map(|b| b.to_string()).collect::<Vec<_>>().join("^");
        let attendu = bases
            .iter()
            .rev()
            .map(|&b| b as f64)
            .reduce(|exposant, base| base.powf(exposant))
            .unwrap_or(f64::NAN);
        let obtenu = compile(&texte)
            .map_err(|e| TestCaseError::fail(e.to_string()))?
            .evaluer(&())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(obtenu, attendu);
    }

    #[test]
    fn moins_unaire_est_une_negation(v in nombre(), x in -10.0f64..10.0) {
        let c = compile("-x").map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(c.evaluer(&Xy::new(x, 0.0)), Ok(-x));

        let texte = format!("x - {v}");
        let c = compile(&texte).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(c.evaluer(&Xy::new(x, 0.0)), Ok(x - v));
    }

    #[test]
    fn compilation_idempotente(
        texte in "[0-9xy.+*/^(),-]{0,24}",
        x in 0.0f64..=1.0,
        y in 0.0f64..=1.0
    ) {
        let a = compile(&texte);
        let b = compile(&texte);
        prop_assert_eq!(&a, &b);
        if let (Ok(a), Ok(b)) = (a, b) {
            let v = Xy::new(x, y);
            match (a.evaluer(&v), b.evaluer(&v)) {
                (Ok(ra), Ok(rb)) => prop_assert!(meme_valeur(ra, rb)),
                (ra, rb) => prop_assert_eq!(ra, rb),
            }
        }
    }

    #[test]
    fn clamp_reste_dans_les_bornes(x in -1e6f64..1e6) {
        let c = compile("clamp(x, 0, 1)").map_err(|e| TestCaseError::fail(e.to_string()))?;
        let r = c.evaluer_fini(&Xy::new(x, 0.0)).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert!((0.0..=1.0).contains(&r));
    }

    #[test]
    fn texte_arbitraire_sans_panique(texte in ".{0,64}") {
        prop_assume!(texte.chars().count() <= MAX_INPUT_CHARS);
        if let Ok(c) = compile(&texte) {
            let _ = c.evaluer(&Xy::new(0.5, 0.5));
        }
    }
}
