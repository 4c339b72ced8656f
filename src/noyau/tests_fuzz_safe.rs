//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : une expression générée entièrement parenthésée donne la
//!   même valeur que l’arbre qui l’a produite (NaN == NaN)

use std::time::{Duration, Instant};

use super::compile;
use super::erreur::{CompileError, EvalError};
use super::eval::Xy;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération (texte + valeur attendue) ------------------------ */

fn meme_valeur(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

/// Feuille : nombre, variable ou constante.
fn gen_feuille(rng: &mut Rng, v: Xy) -> (String, f64) {
    match rng.pick(5) {
        0 => ("x".into(), v.x),
        1 => ("Y".into(), v.y),
        2 => ("pi".into(), std::f64::consts::PI),
        _ => {
            let n = rng.pick(20) as f64 / 4.0;
            (format!("{n}"), n)
        }
    }
}

/// Expression entièrement parenthésée + sa valeur calculée directement.
fn gen_expr(rng: &mut Rng, v: Xy, profondeur: u32) -> (String, f64) {
    if profondeur == 0 || rng.pick(4) == 0 {
        return gen_feuille(rng, v);
    }

    match rng.pick(7) {
        0 => {
            let (a, va) = gen_expr(rng, v, profondeur - 1);
            (format!("-({a})"), -va)
        }
        1 => {
            let (a, va) = gen_expr(rng, v, profondeur - 1);
            let (nom, f): (&str, fn(f64) -> f64) = match rng.pick(4) {
                0 => ("sin", f64::sin),
                1 => ("cos", f64::cos),
                2 => ("abs", f64::abs),
                _ => ("floor", f64::floor),
            };
            (format!("{nom}({a})"), f(va))
        }
        2 => {
            let (a, va) = gen_expr(rng, v, profondeur - 1);
            let (b, vb) = gen_expr(rng, v, profondeur - 1);
            // le registre propage NaN (f64::min/max l’ignorent)
            let nan = va.is_nan() || vb.is_nan();
            if rng.coin() {
                (format!("min({a}, {b})"), if nan { f64::NAN } else { va.min(vb) })
            } else {
                (format!("max({a},{b})"), if nan { f64::NAN } else { va.max(vb) })
            }
        }
        _ => {
            let (a, va) = gen_expr(rng, v, profondeur - 1);
            let (b, vb) = gen_expr(rng, v, profondeur - 1);
            let (op, r) = match rng.pick(5) {
                0 => ("+", va + vb),
                1 => ("-", va - vb),
                2 => ("*", va * vb),
                3 => ("/", va / vb),
                _ => ("^", va.powf(vb)),
            };
            (format!("({a}){op}({b})"), r)
        }
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_aller_retour_arbre() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for i in 0..2000 {
        budget(start, max);

        let v = Xy::new(rng.pick(101) as f64 / 100.0, rng.pick(101) as f64 / 100.0);
        let (texte, attendu) = gen_expr(&mut rng, v, 4);

        let c = compile(&texte).unwrap_or_else(|e| panic!("#{i} compile({texte:?}) erreur: {e}"));
        match c.evaluer(&v) {
            Ok(obtenu) => assert!(
                meme_valeur(obtenu, attendu) || (!obtenu.is_finite() && !attendu.is_finite()),
                "#{i} {texte:?}: obtenu {obtenu}, attendu {attendu}"
            ),
            Err(e) => panic!("#{i} eval({texte:?}) erreur: {e}"),
        }
    }
}

#[test]
fn fuzz_texte_arbitraire_sans_panique() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(42);

    let alphabet: Vec<char> = "0123456789.+-*/^(),xyzpie sincoamx_ #".chars().collect();

    for _ in 0..5000 {
        budget(start, max);

        let len = rng.pick(24) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // Compile : Ok ou erreur typée, jamais de panique.
        match compile(&s) {
            Ok(c) => {
                // Évaluation : Ok ou EvalError, jamais de panique ; déterministe.
                let v = Xy::new(0.25, 0.75);
                let r1 = c.evaluer(&v);
                let r2 = c.evaluer(&v);
                match (&r1, &r2) {
                    (Ok(a), Ok(b)) => assert!(meme_valeur(*a, *b), "{s:?}"),
                    (Err(a), Err(b)) => assert_eq!(a, b, "{s:?}"),
                    _ => panic!("évaluation non déterministe pour {s:?}"),
                }
                if let Err(EvalError::NonFini) = r1 {
                    panic!("evaluer ne doit jamais rendre NonFini ({s:?})");
                }
            }
            Err(CompileError::Lex(_)) | Err(CompileError::Parse(_)) => {}
        }
    }
}

#[test]
fn fuzz_profondeur_de_parentheses() {
    // imbrication profonde : la RPN est itérative, pas de récursion
    let n = 2000;
    let s = format!("{}x{}", "(".repeat(n), ")".repeat(n));
    let c = compile(&s).unwrap_or_else(|e| panic!("erreur: {e}"));
    assert_eq!(c.evaluer(&Xy::new(0.5, 0.0)), Ok(0.5));

    let s = format!("{}x{}", "abs(".repeat(n), ")".repeat(n));
    let c = compile(&s).unwrap_or_else(|e| panic!("erreur: {e}"));
    assert_eq!(c.evaluer(&Xy::new(-0.5, 0.0)), Ok(0.5));

    let s = format!("{}x{}", "(".repeat(n), ")".repeat(n - 1));
    assert!(compile(&s).is_err());
}
