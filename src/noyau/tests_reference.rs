//! Tests de référence (campagne) : valeurs attendues au chiffre près.
//!
//! But : figer le comportement visible de bout en bout (texte -> "résultat").
//! - chaque résultat passe par la mise en forme 8 décimales
//! - toutes les erreurs doivent sortir en "Error", jamais en panique
//! - le moteur reste réutilisable après une erreur

use std::time::{Duration, Instant};

use super::format::ERREUR;
use super::{Cadre, Moteur};

fn assert_resultat(expr: &str, attendu: &str) {
    let obtenu = Moteur::new().calculer(expr);
    assert_eq!(obtenu, attendu, "expr={expr:?}");
}

fn assert_erreur(expr: &str) {
    assert_resultat(expr, ERREUR);
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Valeurs de référence ------------------------ */

#[test]
fn ref_log_decimal() {
    assert_resultat("log(4)", "0.60205999");
}

#[test]
fn ref_multifold() {
    assert_resultat(
        "15/(7-(1+1))*3-(2+(1+1))*15/(7-(200+1))*3-(2+(1+1))*(15/(7-(1+1))*3-(2+(1+1))+15/(7-(1+1))*3-(2+(1+1)))",
        "-30.07216495",
    );
}

#[test]
fn ref_toutes_les_fonctions() {
    assert_resultat(
        "sin(1)+cos(1)+asin(1)+acos(1)+atan(1)+tan(1)+sqrt(16)+ln(10)+log(10)",
        "12.5979606",
    );
}

#[test]
fn ref_fonctions_imbriquees() {
    assert_resultat(
        "(132+sin(asin(sqrt(ln(log(228.11)))))-4*5^6*(123))",
        "-7687367.07378458",
    );
}

#[test]
fn ref_notation_scientifique() {
    assert_resultat("2.5*10^3+1.8*10^-2*(3.7E-5+2.1E2)", "2503.78000067");
    assert_resultat("1.5E5", "150000");
}

#[test]
fn ref_puissances() {
    assert_resultat("2^3^4", "2417851639229258349412352");
    assert_resultat("sin(.2)^(cos(1)+tan(1.1))^sin(.6)", "0.06624972");
    assert_resultat("2^-3", "0.125");
}

#[test]
fn ref_variable() {
    let mut m = Moteur::new();
    m.set_variable(0.8);
    assert_eq!(
        m.calculer("sqrt((7.2+3.5-2.8)/(5.6*4.2))+sin(X)-cos(1.3)"),
        "1.02941257"
    );
}

#[test]
fn ref_modulo() {
    assert_resultat(
        "((sin(2.3)*(sqrt(7.8)+cos(1.2)))mod4.5)/(log(5.6)+atan(0.9))",
        "1.588689",
    );
    assert_resultat("-7 mod 3", "-1");
}

#[test]
fn ref_espaces_toleres() {
    assert_resultat(" 1 + 2 * 3 ", "7");
    assert_resultat("sqrt ( 16 )", "4");
}

/* ------------------------ Erreurs (toutes repliées) ------------------------ */

#[test]
fn ref_erreurs_domaine() {
    assert_erreur("1/0");
    assert_erreur("sqrt(-1)");
    assert_erreur("asin(2)");
    assert_erreur("acos(-1.5)");
    assert_erreur("ln(0)");
    assert_erreur("log(-1)");
    assert_erreur("0/0");
    assert_erreur("10^400");
}

#[test]
fn ref_erreurs_syntaxe() {
    assert_erreur("1234g43s;;");
    assert_erreur("");
    assert_erreur("1x");
    assert_erreur("1;02941257");
    assert_erreur("qwerty");
    assert_erreur("sin(x)");
    assert_erreur("cocos(X)");
    assert_erreur("(1+2");
    assert_erreur("1+2)");
    assert_erreur("2*");
    assert_erreur("1.2.3");
    assert_erreur("π");
}

#[test]
fn ref_deux_calculs_successifs() {
    let m = Moteur::new();
    assert_eq!(m.calculer("2^3^4"), "2417851639229258349412352");
    assert_eq!(
        m.calculer("sin(1)+cos(1)+asin(1)+acos(1)+atan(1)+tan(1)+sqrt(16)+ln(10)+log(10)"),
        "12.5979606"
    );
}

#[test]
fn ref_longue_chaine_de_puissances() {
    // refus net (profondeur), jamais de débordement de pile
    let m = Moteur::new();
    assert_eq!(m.calculer(&format!("{}1", "1^".repeat(200_000))), ERREUR);
    assert_eq!(m.calculer(&format!("{}1", "1^".repeat(200))), "1");
}

#[test]
fn ref_reutilisable_apres_erreur() {
    let m = Moteur::new();
    assert_eq!(m.calculer("1/0"), ERREUR);
    assert_eq!(m.calculer("1234g43s;;"), ERREUR);
    assert_eq!(m.calculer("log(4)"), "0.60205999");
}

/* ------------------------ Tracé ------------------------ */

#[test]
fn ref_trace_inverse() {
    let cadre = Cadre::new(-30.0, 30.0, -100.0, 100.0);
    let pts = Moteur::new().tracer_courbe("1/X", &cadre);
    assert!(!pts.is_empty());
    for (x, y) in pts {
        assert!((-30.0..=30.0).contains(&x), "x={x}");
        assert!((-100.0..=100.0).contains(&y), "y={y}");
    }
}

#[test]
fn ref_trace_echec() {
    let cadre = Cadre::new(-30.0, 30.0, -100.0, 100.0);
    let m = Moteur::new();
    assert!(m.tracer_courbe("cocos(X)", &cadre).is_empty());
    assert_eq!(m.calculer("cocos(X)"), ERREUR);
}

#[test]
fn ref_trace_premier_point_hors_domaine() {
    // échec de l’évaluation en x_min => aucun point, même si la suite du cadre est définie
    let cadre = Cadre::new(-30.0, 30.0, -100.0, 100.0);
    let m = Moteur::new();
    assert!(m.tracer_courbe("sqrt(X)", &cadre).is_empty());
    assert!(m.tracer_courbe("ln(X)", &cadre).is_empty());

    // même expression, cadre qui démarre dans le domaine : des points
    let droite = Cadre::new(1.0, 30.0, -100.0, 100.0);
    assert!(!m.tracer_courbe("sqrt(X)", &droite).is_empty());
}

#[test]
fn ref_trace_axe_inverse() {
    let cadre = Cadre::new(30.0, -30.0, -30.0, 900.0);
    assert!(Moteur::new().tracer_courbe("X^2", &cadre).is_empty());
}

#[test]
fn ref_trace_budget() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let cadre = Cadre::new(-30.0, 30.0, -100.0, 100.0);
    let m = Moteur::new();

    for expr in ["tan(X)", "1/X", "1/sin(X)", "X^3", "ln(X+31)", "sqrt(X+30)*10"] {
        let pts = m.tracer_courbe(expr, &cadre);
        assert!(!pts.is_empty(), "expr={expr:?}");
        budget(t0, max);
    }
}
