//! Noyau de calcul (une variable X)
//!
//! Organisation interne :
//! - erreur.rs    : erreurs typées (syntaxe / structure / domaine)
//! - jetons.rs    : jetons + tables figées (fonctions, opérateurs, priorités)
//! - lexique.rs   : substitutions + lecteur (classification à une position)
//! - grammaire.rs : vérification de forme avant compilation
//! - rpn.rs       : shunting-yard + évaluation de la RPN
//! - format.rs    : mise en forme du résultat ("Error" si non fini)
//! - trace.rs     : tracé adaptatif d’une courbe
//! - eval.rs      : pipeline complet (Moteur)

pub mod erreur;
pub mod eval;
pub mod format;
pub mod grammaire;
pub mod jetons;
pub mod lexique;
pub mod rpn;
pub mod trace;

#[cfg(test)]
mod tests_reference;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::Moteur;
pub use trace::{Cadre, ConfigTrace};
