// src/noyau/jetons.rs
//
// Jetons + tables figées (noms de fonctions, opérateurs, priorités).
// Tout est `const` : aucune table n’est modifiée à l’exécution.

use std::fmt;

/// Fonctions unaires. Le moins unaire est rangé ici : il se comporte
/// comme une fonction (un opérande, priorité forte).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Ln,
    Log10,
    MoinsUnaire,
}

/// Opérateurs binaires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Puissance, // ^
    Mul,
    Div,
    Mod, // % (reste flottant)
    Plus,
    Moins,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    VarX,
    Fonction(Fonction),
    Operateur(Operateur),

    // Sortie du lecteur seulement : jamais présents dans une RPN.
    ParOuvrante,
    ParFermante,
}

/// Symbole de la variable libre (sensible à la casse).
pub const VARIABLE: u8 = b'X';

/// Noms reconnus, après substitution (voir lexique::substitue).
/// `log10` doit rester AVANT `log` (préfixe commun).
/// NOTE: `log` désigne ici le logarithme NATUREL (le texte `ln` est réécrit en `log`).
pub const NOMS_FONCTIONS: [(&str, Fonction); 9] = [
    ("log10", Fonction::Log10),
    ("asin", Fonction::Asin),
    ("acos", Fonction::Acos),
    ("atan", Fonction::Atan),
    ("sqrt", Fonction::Sqrt),
    ("sin", Fonction::Sin),
    ("cos", Fonction::Cos),
    ("tan", Fonction::Tan),
    ("log", Fonction::Ln),
];

pub const fn operateur_de(c: u8) -> Option<Operateur> {
    match c {
        b'^' => Some(Operateur::Puissance),
        b'*' => Some(Operateur::Mul),
        b'/' => Some(Operateur::Div),
        b'%' => Some(Operateur::Mod),
        b'+' => Some(Operateur::Plus),
        b'-' => Some(Operateur::Moins),
        _ => None,
    }
}

/// Plus petit = lie plus fort.
pub const fn priorite_fonction(f: Fonction) -> u8 {
    match f {
        Fonction::MoinsUnaire => 1,
        _ => 0,
    }
}

pub const fn priorite_operateur(op: Operateur) -> u8 {
    match op {
        Operateur::Puissance => 2,
        Operateur::Mul | Operateur::Div | Operateur::Mod => 3,
        Operateur::Plus | Operateur::Moins => 4,
    }
}

impl Fonction {
    pub fn applique(self, v: f64) -> f64 {
        match self {
            Fonction::Sin => v.sin(),
            Fonction::Cos => v.cos(),
            Fonction::Tan => v.tan(),
            Fonction::Asin => v.asin(),
            Fonction::Acos => v.acos(),
            Fonction::Atan => v.atan(),
            Fonction::Sqrt => v.sqrt(),
            Fonction::Ln => v.ln(),
            Fonction::Log10 => v.log10(),
            Fonction::MoinsUnaire => -v,
        }
    }

    /// Nom affiché (démarche). `ln` et non `log` : on montre le sens, pas le texte substitué.
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sqrt => "sqrt",
            Fonction::Ln => "ln",
            Fonction::Log10 => "log10",
            Fonction::MoinsUnaire => "neg",
        }
    }
}

impl Operateur {
    pub fn applique(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operateur::Puissance => lhs.powf(rhs),
            Operateur::Mul => lhs * rhs,
            Operateur::Div => lhs / rhs,
            Operateur::Mod => lhs % rhs,
            Operateur::Plus => lhs + rhs,
            Operateur::Moins => lhs - rhs,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Puissance => '^',
            Operateur::Mul => '*',
            Operateur::Div => '/',
            Operateur::Mod => '%',
            Operateur::Plus => '+',
            Operateur::Moins => '-',
        }
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(v) => write!(f, "{v}"),
            Jeton::VarX => write!(f, "X"),
            Jeton::Fonction(fct) => write!(f, "{}", fct.nom()),
            Jeton::Operateur(op) => write!(f, "{}", op.symbole()),
            Jeton::ParOuvrante => write!(f, "("),
            Jeton::ParFermante => write!(f, ")"),
        }
    }
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(Jeton::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
