// src/app.rs
//
// Calculatrice X — module App (racine)
// ------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand le champ a le focus).
// - Ici, seulement les raccourcis globaux : ESC = C, Ctrl+ESC = AC.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (esc, ctrl) = ctx.input(|i| (i.key_pressed(egui::Key::Escape), i.modifiers.ctrl));
        match (esc, ctrl) {
            (true, true) => self.reset_total(),
            (true, false) => self.clear_entree(),
            _ => {}
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
