// src/app.rs
//
// Pad laser — module App (racine)
// -------------------------------
// Rôle:
// - Déclarer les sous-modules (config, etat, liaison, mouvement, vue)
// - Ré-exporter AppLaser (pour main.rs: use crate::app::AppLaser;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)

pub mod config;
pub mod etat;
pub mod liaison;
pub mod mouvement;
pub mod vue;

// Ré-export pratique : `use crate::app::AppLaser;`
pub use etat::AppLaser;

use eframe::egui;

impl eframe::App for AppLaser {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement l’entrée (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            let maintenant = ctx.input(|i| i.time);
            self.clear_entree(maintenant);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
