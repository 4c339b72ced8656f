//! src/app/mouvement.rs
//!
//! Modèle de mouvement du pad (sans dessin) :
//! - position normalisée du pointeur (x, y dans [0,1])
//! - ver "girouette" : orienté à l’opposé du déplacement, angle lissé
//! - barre laser : valeur lissée (lerp) de l’expression bornée à [0,1]
//! - halo : opacité proportionnelle à l’intensité

use std::f32::consts::PI;

use eframe::egui::{Pos2, Rect};

use super::config::LaserConfig;
use crate::noyau::Xy;

/// Borne dans [0,1].
pub fn clamp01(t: f64) -> f64 {
    num_traits::clamp(t, 0.0, 1.0)
}

/// Position du pointeur -> liaison (x, y) normalisée au rectangle du pad.
/// y vaut 0 en haut, 1 en bas (comme l’écran).
pub fn normaliser(pad: Rect, p: Pos2) -> Xy {
    let w = f64::from(pad.width().max(f32::EPSILON));
    let h = f64::from(pad.height().max(f32::EPSILON));
    Xy::new(
        clamp01(f64::from(p.x - pad.left()) / w),
        clamp01(f64::from(p.y - pad.top()) / h),
    )
}

#[derive(Clone, Debug)]
pub struct Mouvement {
    config: LaserConfig,
    // dernière position (px, relative au pad) ; None = pointeur sorti
    dernier: Option<Pos2>,
    angle: f32,
    barre: f64,
}

impl Mouvement {
    pub fn new(config: LaserConfig) -> Self {
        Self {
            config,
            dernier: None,
            angle: 0.0,
            barre: 0.0,
        }
    }

    /// Nouvel échantillon de position (px relatifs au pad).
    /// Le ver ne se réoriente que si le pas dépasse le seuil.
    pub fn suivre(&mut self, p: Pos2) {
        if let Some(d) = self.dernier {
            let v = p - d;
            if v.length_sq() > self.config.seuil_mouvement2 {
                // derrière le mouvement
                let cible = v.y.atan2(v.x) + PI;
                // écart ramené dans ]-π, π] : on tourne par le plus court
                let ecart = (cible - self.angle).sin().atan2((cible - self.angle).cos());
                self.angle += ecart * self.config.lissage_angle;
            }
        }
        self.dernier = Some(p);
    }

    /// Nouvelle valeur brute de l’expression : bornée à [0,1] puis lissée.
    pub fn alimenter(&mut self, valeur: f64) {
        let s = self.config.lissage_barre;
        self.barre = self.barre * s + clamp01(valeur) * (1.0 - s);
    }

    /// Pointeur sorti du pad : ver caché, dernière position oubliée.
    pub fn quitter(&mut self) {
        self.dernier = None;
    }

    pub fn visible(&self) -> bool {
        self.dernier.is_some()
    }

    pub fn position(&self) -> Option<Pos2> {
        self.dernier
    }

    /// Angle du ver (radians).
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Hauteur de la barre laser, dans [0,1].
    pub fn barre(&self) -> f64 {
        self.barre
    }

    /// Opacité du halo, pilotée par l’intensité (barre).
    pub fn alpha_halo(&self) -> f32 {
        let i = clamp01(self.barre) as f32;
        self.config.alpha_min + (self.config.alpha_max - self.config.alpha_min) * i
    }
}
