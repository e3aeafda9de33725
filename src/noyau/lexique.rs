// src/noyau/lexique.rs
//
// Lecteur (classification lexicale) : à une position donnée, décide si ce qui suit
// est un nombre, la variable X, une fonction, une parenthèse ou un opérateur.
//
// Le lecteur ne construit rien : c’est le compilateur (rpn.rs) et le vérificateur
// (grammaire.rs) qui le pilotent, jeton par jeton.

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::jetons::{operateur_de, Fonction, Jeton, Operateur, NOMS_FONCTIONS, VARIABLE};

/// Réécritures appliquées UNE fois avant toute lecture, dans cet ordre.
///
/// Attention à l’échange voulu : le texte `log` devient `log10` (décimal),
/// puis le texte `ln` devient `log`, qui désigne le logarithme naturel.
const SUBSTITUTIONS: [(&str, &str); 4] = [
    ("log", "log10"),
    ("ln", "log"),
    ("mod", "%"),
    ("E", "*10^"),
];

/// Normalise le texte saisi : espaces retirés puis alias réécrits.
/// `2.1E2` devient `2.1*10^2`, `7mod2` devient `7%2`.
pub fn substitue(source: &str) -> String {
    let mut s: String = source.chars().filter(|c| !c.is_whitespace()).collect();
    for (de, vers) in SUBSTITUTIONS {
        s = s.replace(de, vers);
    }
    s
}

pub struct Lecteur<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lecteur<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn fin(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Octet courant (le texte utile est ASCII ; tout le reste est refusé plus loin).
    pub fn courant(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    pub fn is_numeric_at(&self) -> bool {
        matches!(self.courant(), Some(c) if c.is_ascii_digit() || c == b'.')
    }

    pub fn is_variable_at(&self) -> bool {
        self.courant() == Some(VARIABLE)
    }

    /// Consomme chiffres et points, puis convertit en f64.
    pub fn extract_number(&mut self) -> ResultatCalcul<f64> {
        let debut = self.pos;
        while self.is_numeric_at() {
            self.pos += 1;
        }
        let texte = &self.src[debut..self.pos];
        texte
            .parse::<f64>()
            .map_err(|_| ErreurCalcul::NombreInvalide(texte.to_string()))
    }

    /// Consomme le `X`.
    pub fn extract_variable(&mut self) -> bool {
        if self.is_variable_at() {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Nom de fonction le plus long, ou `-` unaire si (et seulement si) on attend un unaire.
    /// N’avance que si quelque chose est reconnu.
    pub fn match_function(&mut self, expect_unary: bool) -> Option<Fonction> {
        let reste = &self.src[self.pos..];

        if expect_unary && reste.starts_with('-') {
            self.pos += 1;
            return Some(Fonction::MoinsUnaire);
        }

        let (nom, f) = NOMS_FONCTIONS
            .iter()
            .find(|(nom, _)| reste.starts_with(nom))?;
        self.pos += nom.len();
        Some(*f)
    }

    pub fn match_brace(&mut self) -> Option<Jeton> {
        let j = match self.courant()? {
            b'(' => Jeton::ParOuvrante,
            b')' => Jeton::ParFermante,
            _ => return None,
        };
        self.pos += 1;
        Some(j)
    }

    /// Dernier recours : opérateur binaire, sinon caractère inconnu (fatal).
    pub fn char_to_lexem(&mut self) -> ResultatCalcul<Operateur> {
        let c = self.courant().and_then(operateur_de);
        match c {
            Some(op) => {
                self.pos += 1;
                Ok(op)
            }
            None => Err(self.inattendu()),
        }
    }

    /// Jeton suivant, dans l’ordre de priorité de la classification :
    /// nombre, variable, fonction, parenthèse, opérateur.
    pub fn suivant(&mut self, expect_unary: bool) -> Option<ResultatCalcul<Jeton>> {
        if self.fin() {
            return None;
        }

        let j = if self.is_numeric_at() {
            self.extract_number().map(Jeton::Nombre)
        } else if self.extract_variable() {
            Ok(Jeton::VarX)
        } else if let Some(f) = self.match_function(expect_unary) {
            Ok(Jeton::Fonction(f))
        } else if let Some(par) = self.match_brace() {
            Ok(par)
        } else {
            self.char_to_lexem().map(Jeton::Operateur)
        };
        Some(j)
    }

    pub fn inattendu(&self) -> ErreurCalcul {
        match self.src[self.pos..].chars().next() {
            Some(car) => ErreurCalcul::CaractereInattendu { car, pos: self.pos },
            None => ErreurCalcul::syntaxe(self.pos, "fin inattendue"),
        }
    }
}
