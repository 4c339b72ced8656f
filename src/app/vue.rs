// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppLaser (etat.rs) pour natif + wasm
// - Clavier : la frappe programme une recompilation (debounce), Enter compile tout de suite
// - Pad : souris ou doigt ; le ver suit le pointeur, la barre suit l’expression
// - Tactile : gros boutons, focus redonné après clic (focus_entree)

use std::time::Duration;

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke};

use super::etat::AppLaser;

/// Hauteur du pad (px) ; la largeur suit la fenêtre.
const HAUTEUR_PAD: f32 = 320.0;
const LARGEUR_BARRE: f32 = 28.0;

const COULEUR_LASER: Color32 = Color32::from_rgb(230, 30, 40);
const COULEUR_VER: Color32 = Color32::from_rgb(240, 150, 60);

impl AppLaser {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let maintenant = ui.input(|i| i.time);
        self.tick(maintenant);

        // compilation en attente : on redemande une frame à l’échéance
        if let Some(restant) = self.liaison.restant(maintenant) {
            ui.ctx()
                .request_repaint_after(Duration::from_secs_f64(restant));
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Laser pad");
                ui.add_space(6.0);

                self.ui_entree(ui, maintenant);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pad(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui, maintenant: f64) {
        ui.label("f(x, y) :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: clamp(sin(x*6.28)+y,0,1), max(x,y)^2, abs(x-0.5)*2")
                .id_salt("entree_expr")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        if resp.changed() {
            self.entree_modifiee(maintenant);
        }

        // Enter : pas d’attente
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (resp.has_focus() || resp.lost_focus()) && enter {
            self.compiler_maintenant();
            self.focus_entree = true;
        }

        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            for nom in [
                "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "abs", "floor", "ceil",
                "round", "min", "max", "clamp",
            ] {
                self.bouton_insert(ui, nom, &format!("{nom}("), maintenant);
            }

            ui.separator();

            for mot in ["x", "y", "pi", "e", "(", ")", ",", "^"] {
                self.bouton_insert(ui, mot, mot, maintenant);
            }

            ui.separator();

            if ui
                .add_sized([56.0, 30.0], egui::Button::new("C"))
                .on_hover_text("Efface seulement l’entrée")
                .clicked()
            {
                self.clear_entree(maintenant);
            }
            if ui
                .add_sized([56.0, 30.0], egui::Button::new("AC"))
                .on_hover_text("Expression par défaut, pad au repos")
                .clicked()
            {
                self.reset_total();
            }
        });

        if let Some(msg) = self.erreur() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }
        if let Some(repere) = self.liaison.repere() {
            ui.label(
                egui::RichText::new(repere)
                    .monospace()
                    .color(ui.visuals().error_fg_color),
            );
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, fragment: &str, maintenant: f64) {
        if ui.add_sized([46.0, 28.0], egui::Button::new(label)).clicked() {
            self.inserer(fragment, maintenant);
        }
    }

    fn ui_pad(&mut self, ui: &mut egui::Ui) {
        let largeur = (ui.available_width() - LARGEUR_BARRE - 12.0).max(80.0);

        ui.horizontal(|ui| {
            let (pad, resp) =
                ui.allocate_exact_size(egui::vec2(largeur, HAUTEUR_PAD), Sense::drag());

            // souris : survol ; doigt : position d’interaction tant qu’il est posé dans le pad
            let pointeur = resp.hover_pos().or_else(|| {
                ui.input(|i| i.pointer.interact_pos())
                    .filter(|p| resp.dragged() && pad.contains(*p))
            });

            // pas d’échantillon sans déplacement du pointeur
            match pointeur {
                Some(p) => {
                    self.echantillonner(pad, p);
                }
                None => self.quitter_pad(),
            }

            self.dessiner_pad(ui, pad);

            let (barre, _) =
                ui.allocate_exact_size(egui::vec2(LARGEUR_BARRE, HAUTEUR_PAD), Sense::hover());
            self.dessiner_barre(ui, barre);
        });
    }

    fn dessiner_pad(&self, ui: &egui::Ui, pad: Rect) {
        let painter = ui.painter_at(pad);
        painter.rect_filled(pad, 8.0, ui.visuals().extreme_bg_color);

        let Some(local) = self.mouvement.position() else {
            return;
        };
        let p = pad.min + local.to_vec2();

        // halo : opacité pilotée par l’intensité
        let a = (self.mouvement.alpha_halo() * 255.0).round() as u8;
        let halo = Color32::from_rgba_unmultiplied(
            COULEUR_LASER.r(),
            COULEUR_LASER.g(),
            COULEUR_LASER.b(),
            a,
        );
        painter.circle_filled(p, 36.0, halo);

        // ver : anneaux de plus en plus fins dans la direction de l’angle (derrière le mouvement)
        let dir = egui::vec2(self.mouvement.angle().cos(), self.mouvement.angle().sin());
        let mut precedent: Pos2 = p;
        for k in 1..=6 {
            let suivant = p + dir * (k as f32 * 7.0);
            let epaisseur = 9.0 - k as f32;
            painter.line_segment([precedent, suivant], Stroke::new(epaisseur, COULEUR_VER));
            precedent = suivant;
        }
        painter.circle_filled(p, 5.5, COULEUR_VER);
    }

    fn dessiner_barre(&self, ui: &egui::Ui, zone: Rect) {
        let painter = ui.painter_at(zone);
        painter.rect_filled(zone, 4.0, ui.visuals().extreme_bg_color);

        let h = zone.height() * self.mouvement.barre() as f32;
        let plein = Rect::from_min_max(egui::pos2(zone.left(), zone.bottom() - h), zone.max);
        painter.rect_filled(plein, 4.0, COULEUR_LASER);
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                let (jetons, rpn) = match self.liaison.compilee() {
                    Some(c) => (c.jetons_texte(), c.rpn_texte()),
                    None => (String::new(), String::new()),
                };
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &rpn);

                let lecture = match self.lecture {
                    Some(l) => format!(
                        "x = {:.3}, y = {:.3} -> {:.4} (barre {:.3})",
                        l.xy.x,
                        l.xy.y,
                        l.brute,
                        self.mouvement.barre()
                    ),
                    None => "pointeur hors du pad".to_string(),
                };
                Self::champ_demarche(ui, "Lecture", "demarche_lecture", &lecture);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
