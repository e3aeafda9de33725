// src/noyau/trace.rs
//
// Tracé adaptatif d’une courbe y = f(X) dans un cadre [x_min,x_max]×[y_min,y_max].
//
// - pas de base   : largeur / resolution_x
// - seuil vertical: hauteur / resolution_y
// - si deux points successifs sont trop loin verticalement, on réduit le pas
//   (÷ facteur) et on recalcule depuis le x précédent ; sinon le pas regrossit
//   (× facteur) sans dépasser le pas de base.
// - un point n’est gardé que si y ∈ [y_min, y_max] et y != 0.
//
// L’état du tracé est local à chaque appel : rien ne survit entre deux tracés.

use tracing::debug;

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::rpn::Postfixe;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cadre {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Cadre {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bornes finies, non inversées, d’étendue finie.
    pub fn est_valide(&self) -> bool {
        let largeur = self.x_max - self.x_min;
        let hauteur = self.y_max - self.y_min;
        largeur.is_finite() && hauteur.is_finite() && largeur > 0.0 && hauteur > 0.0
    }

    /// NaN n’est jamais contenu.
    pub fn contient_y(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigTrace {
    /// Subdivisions horizontales (pas de base).
    pub resolution_x: u32,
    /// Subdivisions verticales (seuil d’écart entre deux points).
    pub resolution_y: u32,
    /// Réduction / croissance du pas, > 1.
    pub facteur: f64,
    /// Le pas ne descend pas sous pas_base / raffinement_max.
    pub raffinement_max: f64,
    /// Réductions successives autorisées pour UN point.
    pub iterations_max: u32,
    /// Garde-fou global sur la taille de la sortie.
    pub points_max: usize,
}

impl Default for ConfigTrace {
    fn default() -> Self {
        Self {
            resolution_x: 290,
            resolution_y: 250,
            facteur: 1.01,
            raffinement_max: 1000.0,
            iterations_max: 1000,
            points_max: 200_000,
        }
    }
}

impl ConfigTrace {
    pub fn est_valide(&self) -> bool {
        self.resolution_x > 0
            && self.resolution_y > 0
            && self.facteur > 1.0
            && self.raffinement_max >= 1.0
            && self.points_max > 0
    }
}

/// Compteurs d’un passage (journalisation seulement).
#[derive(Debug, Default)]
struct Bilan {
    evaluations: usize,
    raffinements: usize,
}

struct EtatTrace {
    pas: f64,
    pas_base: f64,
    pas_min: f64,
    seuil_y: f64,
    x_prec: f64,
    y_prec: f64,
}

impl EtatTrace {
    /// Écart vertical seulement : y_courant - y_précédent.
    fn trop_loin(&self, y: f64) -> bool {
        self.y_prec.is_finite() && y.is_finite() && (y - self.y_prec).abs() > self.seuil_y
    }

    /// Point suivant, pas adapté. `None` si x n’avance plus (saturation flottante).
    fn avance(
        &mut self,
        postfixe: &Postfixe,
        config: &ConfigTrace,
        bilan: &mut Bilan,
    ) -> ResultatCalcul<Option<(f64, f64)>> {
        let mut pas = self.pas;
        let mut x = self.x_prec + pas;
        let mut y = postfixe.evalue(x)?;
        bilan.evaluations += 1;

        let mut iterations = 0u32;
        while iterations < config.iterations_max
            && pas / config.facteur >= self.pas_min
            && self.trop_loin(y)
        {
            pas /= config.facteur;
            x = self.x_prec + pas;
            y = postfixe.evalue(x)?;
            bilan.evaluations += 1;
            iterations += 1;
        }

        if x <= self.x_prec {
            return Ok(None);
        }

        bilan.raffinements += iterations as usize;
        self.pas = if iterations == 0 {
            (pas * config.facteur).min(self.pas_base)
        } else {
            pas
        };
        self.x_prec = x;
        self.y_prec = y;
        Ok(Some((x, y)))
    }
}

/// Échantillonne `postfixe` sur `cadre`, points triés par x croissant.
///
/// Cadre ou configuration invalide => suite vide.
/// Échec au premier point => erreur : RPN mal formée (`Structure`) ou
/// valeur non finie en `x_min` (`Domaine`). Plus loin, un point non fini est seulement écarté.
#[tracing::instrument(level = "debug", skip_all, fields(x_min = cadre.x_min, x_max = cadre.x_max))]
pub fn echantillonne(
    postfixe: &Postfixe,
    cadre: &Cadre,
    config: &ConfigTrace,
) -> ResultatCalcul<Vec<(f64, f64)>> {
    if !cadre.est_valide() || !config.est_valide() {
        debug!(?cadre, "cadre ou configuration invalide: tracé vide");
        return Ok(Vec::new());
    }

    let pas_base = (cadre.x_max - cadre.x_min) / f64::from(config.resolution_x);
    let y0 = postfixe.evalue(cadre.x_min)?;
    if !y0.is_finite() {
        debug!(y0, "premier point hors domaine: tracé vide");
        return Err(ErreurCalcul::Domaine(y0));
    }

    let mut etat = EtatTrace {
        pas: pas_base,
        pas_base,
        pas_min: pas_base / config.raffinement_max,
        seuil_y: (cadre.y_max - cadre.y_min) / f64::from(config.resolution_y),
        x_prec: cadre.x_min,
        y_prec: y0,
    };
    let mut bilan = Bilan {
        evaluations: 1,
        ..Bilan::default()
    };

    let mut points = Vec::with_capacity(config.resolution_x as usize + 1);
    garde_point(cadre, &mut points, cadre.x_min, y0);

    while points.len() < config.points_max {
        let Some((x, y)) = etat.avance(postfixe, config, &mut bilan)? else {
            break;
        };
        if x > cadre.x_max {
            break;
        }
        garde_point(cadre, &mut points, x, y);
    }

    debug!(
        points = points.len(),
        evaluations = bilan.evaluations,
        raffinements = bilan.raffinements,
        "tracé terminé"
    );
    Ok(points)
}

fn garde_point(cadre: &Cadre, points: &mut Vec<(f64, f64)>, x: f64, y: f64) {
    // y == 0 exclu : bruit d’évaluation aux bords de domaine
    if cadre.contient_y(y) && y != 0.0 {
        points.push((x, y));
    }
}
