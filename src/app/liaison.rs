//! src/app/liaison.rs
//!
//! Liaison réactive : texte saisi -> `Compilee` -> valeur par échantillon.
//!
//! Contrats :
//! - Recompilation "debounced" : seulement après `debounce` secondes sans frappe.
//!   L’horloge est fournie par l’appelant (temps egui), aucun timer interne.
//! - Échec de compilation : l’erreur est affichée, la DERNIÈRE compilée valide
//!   reste en service jusqu’à la prochaine compilation réussie.
//! - Échec d’évaluation (ou résultat non fini) : erreur affichée, valeur 0.
//!   La compilée reste valide (l’échantillon suivant peut réussir).

use crate::noyau::{compile, CompileError, Compilee, Xy};

/// Texte fautif + curseur `^` sous le caractère en cause (police à chasse fixe).
fn souligner(texte: &str, pos: usize) -> String {
    format!("{texte}\n{}^", " ".repeat(pos))
}

#[derive(Clone, Debug)]
pub struct LiaisonExpr {
    compilee: Option<Compilee>,
    erreur_compile: Option<String>,
    // erreur de tokenisation : texte souligné à la position fautive
    repere: Option<String>,
    erreur_eval: Option<String>,
    // Instant (secondes) auquel compiler ; repoussé à chaque frappe.
    echeance: Option<f64>,
    debounce: f64,
}

impl LiaisonExpr {
    pub fn new(debounce: f64) -> Self {
        Self {
            compilee: None,
            erreur_compile: None,
            repere: None,
            erreur_eval: None,
            echeance: None,
            debounce,
        }
    }

    /// Le texte vient de changer : (re)programme la compilation.
    pub fn texte_modifie(&mut self, maintenant: f64) {
        self.echeance = Some(maintenant + self.debounce);
    }

    /// Secondes restantes avant la compilation programmée (None si rien en attente).
    pub fn restant(&self, maintenant: f64) -> Option<f64> {
        self.echeance.map(|t| (t - maintenant).max(0.0))
    }

    /// À appeler à chaque frame. Compile si l’échéance est passée.
    /// Retourne true si une compilation a eu lieu.
    pub fn tick(&mut self, texte: &str, maintenant: f64) -> bool {
        match self.echeance {
            Some(t) if maintenant >= t => {
                self.echeance = None;
                self.compiler_maintenant(texte);
                true
            }
            _ => false,
        }
    }

    /// Compilation immédiate (démarrage, AC, touche Entrée).
    pub fn compiler_maintenant(&mut self, texte: &str) {
        self.echeance = None;

        let deja_compile = self.erreur_compile.is_none()
            && self.compilee.as_ref().is_some_and(|c| c.source() == texte);
        if deja_compile {
            return;
        }

        match compile(texte) {
            Ok(c) => {
                log::debug!("expression compilée: {texte:?} -> [{}]", c.rpn_texte());
                self.compilee = Some(c);
                self.erreur_compile = None;
                self.repere = None;
                self.erreur_eval = None;
            }
            Err(e) => {
                log::debug!("échec de compilation pour {texte:?}: {e}");
                // on garde l’ancienne compilée
                self.repere = match &e {
                    CompileError::Lex(l) => Some(souligner(texte, l.position())),
                    CompileError::Parse(_) => None,
                };
                self.erreur_compile = Some(e.to_string());
            }
        }
    }

    /// Évalue la compilée courante. Toute erreur (ou absence de compilée) donne 0.
    pub fn evaluer(&mut self, xy: Xy) -> f64 {
        let Some(c) = &self.compilee else {
            return 0.0;
        };

        match c.evaluer_fini(&xy) {
            Ok(v) => {
                self.erreur_eval = None;
                v
            }
            Err(e) => {
                log::trace!("évaluation de {:?} en {xy:?}: {e}", c.source());
                self.erreur_eval = Some(e.to_string());
                0.0
            }
        }
    }

    /// Message à afficher : compilation d’abord, puis évaluation.
    pub fn erreur(&self) -> Option<&str> {
        self.erreur_compile
            .as_deref()
            .or(self.erreur_eval.as_deref())
    }

    /// Texte rejeté par le tokenizer, souligné à la position fautive.
    pub fn repere(&self) -> Option<&str> {
        self.repere.as_deref()
    }

    pub fn compilee(&self) -> Option<&Compilee> {
        self.compilee.as_ref()
    }

    /// Oublie tout (compilée, erreurs, échéance).
    pub fn reinitialiser(&mut self) {
        *self = Self::new(self.debounce);
    }
}
