//! src/app/config.rs
//!
//! Réglages du pad (constantes + `LaserConfig`).
//! Les valeurs par défaut reproduisent le comportement de la démo web.

/// Titre unique (natif + web).
pub const TITRE_APP: &str = "Laser pad";

/// Expression chargée au démarrage (et par AC).
pub const EXPRESSION_DEFAUT: &str = "clamp(sin(x*6.28)+y,0,1)";

/// Attente (secondes) après la dernière frappe avant de recompiler.
const DEBOUNCE_DEFAUT: f64 = 0.120;

/// Taille de la fenêtre native (px).
pub const TAILLE_FENETRE: [f32; 2] = [560.0, 720.0];
pub const TAILLE_FENETRE_MIN: [f32; 2] = [420.0, 560.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserConfig {
    /// Recompilation après `debounce` secondes sans frappe.
    pub debounce: f64,
    /// Fraction de l’écart d’angle rattrapée à chaque échantillon (girouette).
    pub lissage_angle: f32,
    /// Déplacement minimal (px², au carré) pour réorienter le ver.
    pub seuil_mouvement2: f32,
    /// Poids de l’ancienne valeur dans le lissage de la barre.
    pub lissage_barre: f64,
    /// Plage d’opacité du halo.
    pub alpha_min: f32,
    pub alpha_max: f32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_DEFAUT,
            lissage_angle: 0.25,
            seuil_mouvement2: 0.5,
            lissage_barre: 0.2,
            alpha_min: 0.08,
            alpha_max: 1.0,
        }
    }
}
