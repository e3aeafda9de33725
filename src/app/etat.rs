//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, X, cadre du graphe, résultat,
//! points tracés) et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (le noyau est appelé depuis vue.rs).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes du cadre limitées et toujours ordonnées.

use calculatrice_graphe::noyau::{Cadre, Moteur};

/// Cadre par défaut du graphe.
pub const CADRE_DEFAUT: Cadre = Cadre::new(-30.0, 30.0, -100.0, 100.0);

/// Garde-fou : bornes du cadre (plage des champs numériques).
pub const BORNE_MAX: f64 = 1_000_000.0;

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub moteur: Moteur, // porte X (seul état du noyau)
    pub cadre: Cadre,

    // --- sorties ---
    pub resultat: String, // nombre mis en forme ou "Error"
    pub erreur: String,   // détail interne (non bloquant, affiché en petit)
    pub rpn: String,      // démarche : RPN de la dernière expression compilée
    pub points: Vec<(f64, f64)>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            moteur: Moteur::new(),
            cadre: CADRE_DEFAUT,
            resultat: String::new(),
            erreur: String::new(),
            rpn: String::new(),
            points: Vec::new(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + X + cadre par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.moteur = Moteur::new();
        self.cadre = CADRE_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche + graphe (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.rpn.clear();
        self.points.clear();
        self.focus_entree = true;
    }

    /// DEL : retire d’un coup les motifs utiles ("sin(", "mod", ...), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        const MOTIFS: [&str; 10] = [
            "asin(", "acos(", "atan(", "sqrt(", "sin(", "cos(", "tan(", "log(", "ln(", "mod",
        ];

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);

        match MOTIFS.iter().find(|m| self.entree.ends_with(*m)) {
            Some(m) => {
                let reste = self.entree.len() - m.len();
                self.entree.truncate(reste);
            }
            None => {
                self.entree.pop();
            }
        }
        self.focus_entree = true;
    }

    /// Résultat d’un calcul. Une erreur garde le graphe affiché (pas d’écran “vidé” sur une faute).
    pub fn set_resultat(&mut self, resultat: impl Into<String>, erreur: Option<String>) {
        self.resultat = resultat.into();
        self.erreur = erreur.unwrap_or_default();
        self.focus_entree = true;
    }

    pub fn set_points(&mut self, points: Vec<(f64, f64)>) {
        self.points = points;
        self.focus_entree = true;
    }

    /// Garde-fou : borne X (même plage que le cadre).
    pub fn set_x(&mut self, x: f64) {
        self.moteur.set_variable(borne(x));
    }

    /// Garde-fou : bornes limitées ; si elles se croisent, on les remet dans l’ordre.
    pub fn set_cadre(&mut self, cadre: Cadre) {
        let (x_min, x_max) = ordonne(borne(cadre.x_min), borne(cadre.x_max));
        let (y_min, y_max) = ordonne(borne(cadre.y_min), borne(cadre.y_max));
        self.cadre = Cadre::new(x_min, x_max, y_min, y_max);
    }
}

fn borne(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(-BORNE_MAX, BORNE_MAX)
    }
}

fn ordonne(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
