//! Calculatrice X — noyau de calcul (bibliothèque).
//!
//! L’application egui (main.rs) n’en est qu’un client : `noyau::Moteur` est l’API publique.

pub mod noyau;
