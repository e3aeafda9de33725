// src/noyau/format.rs
//
// Affichage du résultat numérique.
// Règle exacte : 8 décimales fixes (arrondi standard), puis on retire les '0' de
// droite, puis un '.' resté seul. Non fini => "Error".

/// Chaîne unique renvoyée pour toute erreur (syntaxe, domaine, structure).
pub const ERREUR: &str = "Error";

pub const DECIMALES: usize = 8;

pub fn formate_resultat(v: f64) -> String {
    if !v.is_finite() {
        return ERREUR.to_string();
    }

    let mut s = format!("{v:.prec$}", prec = DECIMALES);
    let utile = s.trim_end_matches('0').len();
    s.truncate(utile);
    if s.ends_with('.') {
        s.pop();
    }
    s
}
