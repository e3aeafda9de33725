// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ a le focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Graphe : points du noyau dessinés au painter, pas de dépendance de tracé
//
// Note :
// - Le noyau est appelé ici seulement (eval_via_noyau / trace_via_noyau).
// - Une erreur s’affiche "Error" ; le détail interne reste en petit dessous.

use eframe::egui;

use super::etat::{AppCalc, BORNE_MAX};
use calculatrice_graphe::noyau::format::{formate_resultat, ERREUR};
use calculatrice_graphe::noyau::{Cadre, ErreurCalcul, Moteur};

/// Taille du graphe (pixels logiques).
const GRAPHE_TAILLE: egui::Vec2 = egui::vec2(480.0, 320.0);
const RAYON_POINT: f32 = 1.5;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice X");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_graphe(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2^3^4, sin(X)/X, 7 mod 3, 1.5E5")
                .id_salt("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter : un champ une ligne perd le focus à la validation.
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.lost_focus() && enter {
            self.eval_via_noyau();
        }

        ui.add_space(6.0);

        // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche + graphe",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);

            ui.separator();

            ui.label("X =");
            let mut x = self.moteur.variable();
            let resp = ui.add(
                egui::DragValue::new(&mut x)
                    .speed(0.1)
                    .range(-BORNE_MAX..=BORNE_MAX),
            );
            if resp.changed() {
                self.set_x(x);
            }
        });

        ui.add_space(8.0);

        // Fonctions + opérateurs + "="
        ui.horizontal_wrapped(|ui| {
            for f in ["sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "ln", "log"] {
                self.bouton_insert(ui, f, &format!("{f}("), InsertKind::Func);
            }

            ui.separator();

            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);
            self.bouton_insert(ui, "mod", "mod", InsertKind::Op);
            self.bouton_insert(ui, "X", "X", InsertKind::Word);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "*", "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                self.bouton_insert(ui, "E", "E", InsertKind::Digit);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                ui.end_row();

                ui.label("");
                ui.label("");
                ui.label("");
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                ui.end_row();
            });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 1);

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.small(&self.erreur);
        }

        ui.add_space(6.0);

        egui::CollapsingHeader::new("Démarche (RPN)")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_monospace(ui, "demarche_rpn", &self.rpn, 2);
            });
    }

    fn ui_graphe(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            let mut c = self.cadre;
            let mut change = false;
            for (nom, v) in [
                ("x min", &mut c.x_min),
                ("x max", &mut c.x_max),
                ("y min", &mut c.y_min),
                ("y max", &mut c.y_max),
            ] {
                ui.label(nom);
                change |= ui
                    .add(egui::DragValue::new(v).speed(1.0).range(-BORNE_MAX..=BORNE_MAX))
                    .changed();
            }
            if change {
                self.set_cadre(c);
            }

            ui.add_space(10.0);

            if ui.add_sized([72.0, 30.0], egui::Button::new("Graphe")).clicked() {
                self.trace_via_noyau();
            }
        });

        ui.add_space(6.0);

        let (resp, painter) = ui.allocate_painter(GRAPHE_TAILLE, egui::Sense::hover());
        let rect = resp.rect;
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        let cadre = self.cadre;
        if !cadre.est_valide() {
            return;
        }

        let vers_ecran = |x: f64, y: f64| {
            let fx = ((x - cadre.x_min) / (cadre.x_max - cadre.x_min)) as f32;
            let fy = ((y - cadre.y_min) / (cadre.y_max - cadre.y_min)) as f32;
            egui::pos2(
                rect.left() + fx * rect.width(),
                rect.bottom() - fy * rect.height(),
            )
        };

        // Axes (seulement s’ils passent dans le cadre)
        let axe = egui::Stroke::new(1.0, egui::Color32::GRAY);
        if (cadre.y_min..=cadre.y_max).contains(&0.0) {
            painter.line_segment([vers_ecran(cadre.x_min, 0.0), vers_ecran(cadre.x_max, 0.0)], axe);
        }
        if (cadre.x_min..=cadre.x_max).contains(&0.0) {
            painter.line_segment([vers_ecran(0.0, cadre.y_min), vers_ecran(0.0, cadre.y_max)], axe);
        }

        for &(x, y) in &self.points {
            painter.circle_filled(vers_ecran(x, y), RAYON_POINT, egui::Color32::RED);
        }
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() {
            return;
        }
        insere(&mut self.entree, to_insert, kind);
        self.focus_entree = true;
    }

    /// Évalue l’entrée avec X lié, puis dépose résultat + démarche dans l’état UI.
    fn eval_via_noyau(&mut self) {
        let calcul = calcule(&self.moteur, &self.entree);
        self.rpn = calcul.demarche;
        self.set_resultat(calcul.resultat, calcul.erreur);
    }

    /// Trace l’entrée sur le cadre courant. Vide => rien à dessiner (et on dit pourquoi).
    fn trace_via_noyau(&mut self) {
        self.eval_via_noyau();

        let cadre: Cadre = self.cadre;
        let points = self.moteur.tracer_courbe(&self.entree, &cadre);
        if points.is_empty() && self.erreur.is_empty() {
            self.erreur = "aucun point dans le cadre".to_string();
        }
        self.set_points(points);
    }
}

/// Sorties d’un calcul, prêtes pour l’état UI.
struct Calcul {
    resultat: String,
    demarche: String,
    erreur: Option<String>,
}

/// Une seule compilation : la RPN sert à la démarche ET à la valeur.
fn calcule(moteur: &Moteur, entree: &str) -> Calcul {
    let postfixe = match moteur.compile(entree) {
        Ok(p) => p,
        Err(e) => {
            return Calcul {
                resultat: ERREUR.to_string(),
                demarche: String::new(),
                erreur: Some(detail(&e)),
            }
        }
    };

    let mut demarche = format!("{postfixe}   [{} jetons", postfixe.jetons().len());
    if postfixe.contient_variable() {
        demarche.push_str(&format!(", X = {}", formate_resultat(moteur.variable())));
    }
    demarche.push(']');

    match moteur.valeur_compilee(&postfixe) {
        Ok(v) => Calcul {
            resultat: formate_resultat(v),
            demarche,
            erreur: None,
        },
        Err(e) => Calcul {
            resultat: ERREUR.to_string(),
            demarche,
            erreur: Some(detail(&e)),
        },
    }
}

fn detail(e: &ErreurCalcul) -> String {
    let categorie = if e.est_syntaxe() {
        "syntaxe"
    } else if e.est_domaine() {
        "domaine"
    } else {
        "structure"
    };
    format!("{categorie} : {e}")
}

/// Insertion d’un motif en fin d’entrée (espaces auto, ignorés par le noyau).
/// Pas de multiplication implicite : `2` puis `sin(` donne `2 * sin(`.
fn insere(entree: &mut String, motif: &str, kind: InsertKind) {
    let dernier = entree.chars().rev().find(|c| !c.is_whitespace());
    match kind {
        InsertKind::CloseParen => {
            let fin = entree.trim_end().len();
            entree.truncate(fin);
        }
        InsertKind::OpenParen | InsertKind::Func | InsertKind::Word => {
            if matches!(dernier, Some(c) if c.is_ascii_digit() || c == '.' || c == ')' || c == 'X') {
                let fin = entree.trim_end().len();
                entree.truncate(fin);
                entree.push_str(" * ");
            }
        }
        InsertKind::Op => {
            let fin = entree.trim_end().len();
            entree.truncate(fin);
            if !entree.is_empty() {
                entree.push(' ');
            }
        }
        InsertKind::Digit => {}
    }

    entree.push_str(motif);
    if let InsertKind::Op = kind {
        entree.push(' ');
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
