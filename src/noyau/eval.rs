//! Noyau — évaluation (pipeline réel)
//!
//! texte -> substitution -> grammaire -> RPN -> évaluation (X lié) -> format
//!                                          \-> tracé adaptatif (X balayé)
//!
//! Le moteur ne garde que la valeur de X : tout le reste (jetons, piles, état du
//! tracé) vit le temps d’un appel.

use tracing::{debug, trace};

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::format::{formate_resultat, ERREUR};
use super::grammaire::verifie;
use super::lexique::substitue;
use super::rpn::{compile, Postfixe};
use super::trace::{echantillonne, Cadre, ConfigTrace};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moteur {
    x: f64,
}

impl Moteur {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lie la variable libre X pour les évaluations suivantes.
    pub fn set_variable(&mut self, x: f64) {
        self.x = x;
    }

    pub fn variable(&self) -> f64 {
        self.x
    }

    /// Substitution + vérification de forme + shunting-yard.
    /// Si la forme est fausse, on ne compile pas.
    pub fn compile(&self, expression: &str) -> ResultatCalcul<Postfixe> {
        let texte = substitue(expression);
        trace!(%texte, "substitution");

        if let Err(e) = verifie(&texte) {
            debug!(%expression, erreur = %e, "expression refusée");
            return Err(e);
        }

        let postfixe = compile(&texte)?;
        trace!(rpn = %postfixe, "compilation");
        Ok(postfixe)
    }

    /// Valeur numérique finie, sinon erreur (NaN / ±inf => Domaine).
    pub fn valeur(&self, expression: &str) -> ResultatCalcul<f64> {
        self.valeur_compilee(&self.compile(expression)?)
    }

    /// Même contrat que `valeur`, sur une RPN déjà compilée (pas de seconde compilation).
    pub fn valeur_compilee(&self, postfixe: &Postfixe) -> ResultatCalcul<f64> {
        let v = postfixe.evalue(self.x)?;
        if v.is_finite() {
            Ok(v)
        } else {
            Err(ErreurCalcul::Domaine(v))
        }
    }

    /// Résultat mis en forme (8 décimales, zéros de droite retirés).
    pub fn evaluer(&self, expression: &str) -> ResultatCalcul<String> {
        self.valeur(expression).map(formate_resultat)
    }

    /// API publique « écran » : le nombre mis en forme, ou "Error" (quelle que soit la cause).
    pub fn calculer(&self, expression: &str) -> String {
        self.evaluer(expression).unwrap_or_else(|e| {
            debug!(%expression, erreur = %e, "calcul en erreur");
            ERREUR.to_string()
        })
    }

    /// Points de la courbe (configuration par défaut).
    /// Vide si l’expression est invalide ou si son évaluation échoue en `x_min`.
    pub fn tracer_courbe(&self, expression: &str, cadre: &Cadre) -> Vec<(f64, f64)> {
        self.tracer_courbe_avec(expression, cadre, &ConfigTrace::default())
    }

    pub fn tracer_courbe_avec(
        &self,
        expression: &str,
        cadre: &Cadre,
        config: &ConfigTrace,
    ) -> Vec<(f64, f64)> {
        let resultat = self
            .compile(expression)
            .and_then(|p| echantillonne(&p, cadre, config));

        match resultat {
            Ok(points) => points,
            Err(e) => {
                debug!(%expression, erreur = %e, "tracé impossible");
                Vec::new()
            }
        }
    }
}
