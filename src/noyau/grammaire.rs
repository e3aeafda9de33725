// src/noyau/grammaire.rs
//
// Vérification de forme AVANT compilation (descente récursive, sans rien construire).
// Si la forme est fausse, on ne compile pas : la RPN ne voit jamais d’entrée invalide.
//
//   somme     := produit (('+'|'-') produit)*
//   produit   := signe (('*'|'/'|'%') signe)*
//   signe     := '-' puissance | puissance
//   puissance := primaire ('^' signe)?
//   primaire  := nombre | 'X' | fonction '(' somme ')' | '(' somme ')'
//
// Les fonctions exigent leurs parenthèses ; `--2` est refusé (un seul signe).
// Parenthèses et `^` (récursif à droite) partagent le même budget de profondeur.

use super::erreur::{ErreurCalcul, ResultatCalcul};
use super::lexique::Lecteur;

/// Garde-fou : profondeur de parenthèses + chaîne de `^` (pile d’appels bornée).
pub const PROFONDEUR_MAX: usize = 256;

/// Vérifie un texte DÉJÀ substitué (voir lexique::substitue).
pub fn verifie(source: &str) -> ResultatCalcul<()> {
    if source.is_empty() {
        return Err(ErreurCalcul::Vide);
    }

    let mut v = Verificateur {
        lecteur: Lecteur::new(source),
        profondeur: 0,
    };
    v.somme()?;

    if !v.lecteur.fin() {
        return Err(v.attendu("fin d’expression"));
    }
    Ok(())
}

struct Verificateur<'a> {
    lecteur: Lecteur<'a>,
    profondeur: usize,
}

impl Verificateur<'_> {
    fn prend(&mut self, c: u8) -> bool {
        if self.lecteur.courant() == Some(c) {
            // `(`/`)` passent par match_brace, le reste par l’opérateur
            if c == b'(' || c == b')' {
                self.lecteur.match_brace();
            } else {
                let _ = self.lecteur.char_to_lexem();
            }
            true
        } else {
            false
        }
    }

    fn attendu(&self, quoi: &str) -> ErreurCalcul {
        if self.lecteur.fin() {
            ErreurCalcul::syntaxe(self.lecteur.position(), format!("{quoi} attendu, fin trouvée"))
        } else {
            match self.lecteur.inattendu() {
                ErreurCalcul::CaractereInattendu { car, pos } => {
                    ErreurCalcul::syntaxe(pos, format!("{quoi} attendu, '{car}' trouvé"))
                }
                autre => autre,
            }
        }
    }

    fn somme(&mut self) -> ResultatCalcul<()> {
        self.produit()?;
        while self.prend(b'+') || self.prend(b'-') {
            self.produit()?;
        }
        Ok(())
    }

    fn produit(&mut self) -> ResultatCalcul<()> {
        self.signe()?;
        while self.prend(b'*') || self.prend(b'/') || self.prend(b'%') {
            self.signe()?;
        }
        Ok(())
    }

    fn signe(&mut self) -> ResultatCalcul<()> {
        self.prend(b'-');
        self.puissance()
    }

    fn puissance(&mut self) -> ResultatCalcul<()> {
        self.primaire()?;
        if self.prend(b'^') {
            self.descend()?;
            self.signe()?;
            self.profondeur -= 1;
        }
        Ok(())
    }

    fn descend(&mut self) -> ResultatCalcul<()> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ErreurCalcul::TropImbriquee);
        }
        Ok(())
    }

    fn primaire(&mut self) -> ResultatCalcul<()> {
        if self.lecteur.is_numeric_at() {
            self.lecteur.extract_number()?;
            return Ok(());
        }
        if self.lecteur.extract_variable() {
            return Ok(());
        }

        // fonction : son nom doit être collé à une parenthèse ouvrante
        let fonction = self.lecteur.match_function(false).is_some();
        if fonction && self.lecteur.courant() != Some(b'(') {
            return Err(self.attendu("'(' après le nom de fonction"));
        }

        if self.prend(b'(') {
            self.descend()?;
            self.somme()?;
            if !self.prend(b')') {
                return Err(self.attendu("')'"));
            }
            self.profondeur -= 1;
            return Ok(());
        }

        Err(self.attendu("opérande"))
    }
}
