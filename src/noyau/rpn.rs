// src/noyau/rpn.rs
//
// Shunting-yard -> RPN, puis évaluation de la RPN
// Objectif:
// - Convertir le flux du lecteur en RPN (postfix), priorités comprises
// - Évaluer cette RPN pour une valeur de X
//
// Règles:
// - Moins unaire: reconnu par le lecteur quand on ATTEND un unaire
//   (début, après '(' ou après un opérateur binaire) ; c’est alors une fonction.
// - '^' est associatif à droite : "2^3^4" => 2^(3^4).
// - Les fonctions restent sur la pile et sortent au prochain opérateur (priorité 0).

use std::fmt;

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::jetons::{
    format_jetons, priorite_fonction, priorite_operateur, Fonction, Jeton, Operateur,
};
use super::lexique::Lecteur;

/// Élément de la pile d’opérateurs. Pas de variante nombre : un nombre ne peut
/// pas y entrer.
#[derive(Clone, Copy, Debug)]
enum Empile {
    Fonction(Fonction),
    Operateur(Operateur),
    Marqueur, // '('
}

impl Empile {
    fn priorite(self) -> Option<u8> {
        match self {
            Empile::Fonction(f) => Some(priorite_fonction(f)),
            Empile::Operateur(op) => Some(priorite_operateur(op)),
            Empile::Marqueur => None,
        }
    }

    fn en_jeton(self) -> Option<Jeton> {
        match self {
            Empile::Fonction(f) => Some(Jeton::Fonction(f)),
            Empile::Operateur(op) => Some(Jeton::Operateur(op)),
            Empile::Marqueur => None,
        }
    }
}

/// Expression compilée : RPN prête à être évaluée (autant de fois que voulu).
#[derive(Clone, Debug, PartialEq)]
pub struct Postfixe {
    jetons: Vec<Jeton>,
}

/// Convertit un texte DÉJÀ substitué en RPN (notation polonaise inversée).
///
/// Exemple:
///   texte: "sin(X)+2*3"
///   rpn:   [X, sin, 2, 3, *, +]
pub fn compile(source: &str) -> ResultatCalcul<Postfixe> {
    let mut lecteur = Lecteur::new(source);
    let mut out: Vec<Jeton> = Vec::new();
    let mut ops: Vec<Empile> = Vec::new();

    let mut expect_unary = true;

    while let Some(jeton) = lecteur.suivant(expect_unary) {
        match jeton? {
            j @ (Jeton::Nombre(_) | Jeton::VarX) => {
                out.push(j);
                expect_unary = false;
            }

            Jeton::Fonction(f) => {
                ops.push(Empile::Fonction(f));
                expect_unary = false;
            }

            Jeton::ParOuvrante => {
                ops.push(Empile::Marqueur);
                expect_unary = true;
            }

            Jeton::ParFermante => {
                // dépile jusqu’au marqueur ; pile vide avant => parenthèse orpheline
                loop {
                    match ops.pop() {
                        Some(Empile::Marqueur) => break,
                        Some(top) => out.extend(top.en_jeton()),
                        None => return Err(ErreurCalcul::ParentheseNonOuverte),
                    }
                }
                expect_unary = false;
            }

            Jeton::Operateur(op) => {
                let p_op = priorite_operateur(op);

                while let Some(&top) = ops.last() {
                    // '^' sur '^' : on garde (associativité à droite)
                    if op == Operateur::Puissance
                        && matches!(top, Empile::Operateur(Operateur::Puissance))
                    {
                        break;
                    }
                    match top.priorite() {
                        Some(p_top) if p_top <= p_op => {
                            ops.pop();
                            out.extend(top.en_jeton());
                        }
                        // marqueur ou priorité plus faible
                        _ => break,
                    }
                }

                ops.push(Empile::Operateur(op));
                expect_unary = true;
            }
        }
    }

    // vide la pile ops (marqueurs orphelins ignorés)
    while let Some(top) = ops.pop() {
        out.extend(top.en_jeton());
    }

    Ok(Postfixe { jetons: out })
}

impl Postfixe {
    pub fn jetons(&self) -> &[Jeton] {
        &self.jetons
    }

    pub fn contient_variable(&self) -> bool {
        self.jetons.iter().any(|j| matches!(j, Jeton::VarX))
    }

    /// Évalue la RPN avec X = `x`.
    ///
    /// Le résultat peut être NaN / ±inf (domaine) : c’est à l’appelant de trancher.
    /// Un opérande manquant ou un reste sur la pile => `ErreurCalcul::Structure`.
    pub fn evalue(&self, x: f64) -> ResultatCalcul<f64> {
        let mut pile: Vec<f64> = Vec::with_capacity(16);

        for jeton in &self.jetons {
            match *jeton {
                Jeton::Nombre(v) => pile.push(v),
                Jeton::VarX => pile.push(x),

                Jeton::Fonction(f) => {
                    let v = pile.pop().ok_or(ErreurCalcul::Structure)?;
                    pile.push(f.applique(v));
                }

                Jeton::Operateur(op) => {
                    let rhs = pile.pop().ok_or(ErreurCalcul::Structure)?;
                    let lhs = pile.pop().ok_or(ErreurCalcul::Structure)?;
                    pile.push(op.applique(lhs, rhs));
                }

                // jamais produit par compile()
                Jeton::ParOuvrante | Jeton::ParFermante => return Err(ErreurCalcul::Structure),
            }
        }

        match pile.as_slice() {
            [v] => Ok(*v),
            _ => Err(ErreurCalcul::Structure),
        }
    }
}

#[cfg(test)]
impl From<Vec<Jeton>> for Postfixe {
    /// RPN fournie telle quelle : `evalue` ne lui fait pas confiance.
    fn from(jetons: Vec<Jeton>) -> Self {
        Self { jetons }
    }
}

impl fmt::Display for Postfixe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_jetons(&self.jetons))
    }
}
