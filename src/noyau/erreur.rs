// src/noyau/erreur.rs
//
// Erreurs du noyau.
// Trois familles :
// - syntaxe   : détectée avant la construction de la RPN
// - structure : opérande manquant pendant l’évaluation de la RPN
// - domaine   : résultat NaN / ±inf
//
// Côté interface, tout est replié en une seule chaîne "Error" (voir eval.rs).

pub type ResultatCalcul<T> = Result<T, ErreurCalcul>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ErreurCalcul {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu '{car}' (position {pos})")]
    CaractereInattendu { car: char, pos: usize },

    #[error("nombre invalide: {0:?}")]
    NombreInvalide(String),

    #[error("parenthèse fermante sans parenthèse ouvrante")]
    ParentheseNonOuverte,

    #[error("syntaxe invalide (position {pos}): {detail}")]
    Syntaxe { pos: usize, detail: String },

    #[error("expression trop imbriquée")]
    TropImbriquee,

    #[error("opérande manquant (RPN mal formée)")]
    Structure,

    #[error("résultat hors domaine: {0}")]
    Domaine(f64),
}

impl ErreurCalcul {
    pub fn syntaxe(pos: usize, detail: impl Into<String>) -> Self {
        Self::Syntaxe {
            pos,
            detail: detail.into(),
        }
    }

    /// Vrai si l’erreur est détectée avant toute évaluation.
    pub fn est_syntaxe(&self) -> bool {
        matches!(
            self,
            Self::Vide
                | Self::CaractereInattendu { .. }
                | Self::NombreInvalide(_)
                | Self::ParentheseNonOuverte
                | Self::Syntaxe { .. }
                | Self::TropImbriquee
        )
    }

    pub fn est_domaine(&self) -> bool {
        matches!(self, Self::Domaine(_))
    }
}
