//! src/app/etat.rs
//!
//! État UI du pad laser (sans dessin).
//!
//! Rôle : contenir l’entrée, la liaison réactive (compilation "debounced"),
//! le modèle de mouvement et la dernière lecture, et offrir des actions
//! simples (C / AC / insertion) sans logique d’affichage.
//!
//! Contrats :
//! - Aucun parsing ici : tout passe par `LiaisonExpr` (donc par le noyau).
//! - Actions déterministes ; l’horloge est toujours passée en argument.

use eframe::egui::{Pos2, Rect};

use super::config::{LaserConfig, EXPRESSION_DEFAUT};
use super::liaison::LiaisonExpr;
use super::mouvement::{normaliser, Mouvement};
use crate::noyau::Xy;

/// Dernier échantillon du pad (panneau "Démarche").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lecture {
    pub xy: Xy,
    pub brute: f64,
}

#[derive(Clone, Debug)]
pub struct AppLaser {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- noyau (via liaison) ---
    pub liaison: LiaisonExpr,

    // --- sorties ---
    pub mouvement: Mouvement,
    pub lecture: Option<Lecture>,

    // --- paramètres ---
    pub config: LaserConfig,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppLaser {
    fn default() -> Self {
        Self::new(LaserConfig::default())
    }
}

impl AppLaser {
    pub fn new(config: LaserConfig) -> Self {
        let mut liaison = LiaisonExpr::new(config.debounce);
        // au lancement : compilée tout de suite (pas d’attente)
        liaison.compiler_maintenant(EXPRESSION_DEFAUT);

        Self {
            entree: EXPRESSION_DEFAUT.to_string(),
            liaison,
            mouvement: Mouvement::new(config),
            lecture: None,
            config,
            focus_entree: true,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (expression par défaut, pad au repos).
    pub fn reset_total(&mut self) {
        *self = Self::new(self.config);
    }

    /// C : effacer seulement l’entrée (la compilée en service reste active).
    pub fn clear_entree(&mut self, maintenant: f64) {
        self.entree.clear();
        self.liaison.texte_modifie(maintenant);
        self.focus_entree = true;
    }

    /// L’entrée a été modifiée au clavier.
    pub fn entree_modifiee(&mut self, maintenant: f64) {
        self.liaison.texte_modifie(maintenant);
    }

    /// Insère un fragment (fonction, variable, constante) en fin d’entrée.
    pub fn inserer(&mut self, fragment: &str, maintenant: f64) {
        self.entree.push_str(fragment);
        self.liaison.texte_modifie(maintenant);
        self.focus_entree = true;
    }

    /// Entrée : compile sans attendre le silence.
    pub fn compiler_maintenant(&mut self) {
        self.liaison.compiler_maintenant(&self.entree);
    }

    /// À appeler à chaque frame : compilation programmée échue ?
    pub fn tick(&mut self, maintenant: f64) -> bool {
        self.liaison.tick(&self.entree, maintenant)
    }

    /* ------------------------ Pad ------------------------ */

    /// Position du pointeur (px écran) sur le pad `pad`, relevée à chaque frame.
    /// Seul un déplacement fait un échantillon : évalue l’expression et alimente
    /// barre + halo. Retourne true si un échantillon a été pris.
    pub fn echantillonner(&mut self, pad: Rect, p: Pos2) -> bool {
        let local = p - pad.min.to_vec2();
        if self.mouvement.position() == Some(local) {
            return false;
        }

        let xy = normaliser(pad, p);
        self.mouvement.suivre(local);

        let brute = self.liaison.evaluer(xy);
        self.mouvement.alimenter(brute);
        self.lecture = Some(Lecture { xy, brute });
        true
    }

    /// Pointeur (ou doigt) sorti du pad.
    pub fn quitter_pad(&mut self) {
        self.mouvement.quitter();
    }

    /// Message d’erreur courant (compilation ou évaluation).
    pub fn erreur(&self) -> Option<&str> {
        self.liaison.erreur()
    }
}
