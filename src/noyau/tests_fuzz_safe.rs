//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : "Error" <=> evaluer() en erreur ; sinon la chaîne est un nombre fini

use std::time::{Duration, Instant};

use super::format::ERREUR;
use super::{Cadre, ConfigTrace, Moteur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants ------------------------ */

fn check_invariant_erreur(m: &Moteur, expr: &str) -> bool {
    let ecran = m.calculer(expr);
    match m.evaluer(expr) {
        Ok(s) => {
            assert_eq!(s, ecran, "expr={expr:?}");
            assert_ne!(ecran, ERREUR, "expr={expr:?}");
            let v: f64 = ecran
                .parse()
                .unwrap_or_else(|_| panic!("résultat non numérique: {ecran:?} (expr={expr:?})"));
            assert!(v.is_finite());
            assert!(!ecran.ends_with('.'), "point final: {ecran:?}");
            if ecran.contains('.') {
                assert!(!ecran.ends_with('0'), "zéro final: {ecran:?}");
            }
            true
        }
        Err(_) => {
            assert_eq!(ecran, ERREUR, "expr={expr:?}");
            false
        }
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS: [&str; 9] = ["sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "ln", "log"];
const OPERATEURS: [&str; 7] = ["+", "-", "*", "/", "^", "mod", "%"];

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(100);
    match rng.pick(4) {
        0 => format!("{entier}"),
        1 => format!("{entier}.{}", rng.pick(1000)),
        2 => format!(".{}", rng.pick(100)),
        _ => format!("{}E{}", rng.pick(10), rng.pick(4)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    if rng.coin() {
        "X".to_string()
    } else {
        gen_nombre(rng)
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(6) {
        0 => gen_atom(rng),
        1 | 2 => {
            let op = OPERATEURS[rng.pick(OPERATEURS.len() as u32) as usize];
            format!(
                "{}{op}{}",
                gen_expr(rng, depth - 1),
                gen_expr(rng, depth - 1)
            )
        }
        3 => format!("({})", gen_expr(rng, depth - 1)),
        4 => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        _ => format!("-{}", gen_expr(rng, depth - 1)),
    }
}

/// Bruit : remplace / insère / retire un caractère au hasard.
fn mutation(rng: &mut Rng, s: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789.X()+-*/%^Esincolgqtx ;";
    let mut octets = s.as_bytes().to_vec();
    let c = ALPHABET[rng.pick(ALPHABET.len() as u32) as usize];
    let i = rng.pick(octets.len() as u32 + 1) as usize;

    match rng.pick(3) {
        0 if i < octets.len() => octets[i] = c,
        1 if i < octets.len() => {
            octets.remove(i);
        }
        _ => octets.insert(i, c),
    }
    // ASCII uniquement : la conversion ne peut pas échouer
    String::from_utf8(octets).unwrap_or_default()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_invariant_erreur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut m = Moteur::new();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        m.set_variable(f64::from(rng.pick(200)) / 10.0 - 10.0);

        let premier = m.calculer(&expr);
        assert_eq!(premier, m.calculer(&expr), "non déterministe: {expr:?}");

        if check_invariant_erreur(&m, &expr) {
            seen_ok += 1;
        } else {
            seen_err += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 30, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_mutations_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);
    let m = Moteur::new();

    for _ in 0..400 {
        budget(t0, max);

        let mut expr = gen_expr(&mut rng, 3);
        for _ in 0..=rng.pick(3) {
            expr = mutation(&mut rng, &expr);
        }
        check_invariant_erreur(&m, &expr);
    }
}

#[test]
fn fuzz_safe_trace_borne() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0x5EED_u64);
    let m = Moteur::new();
    // raffinement borné : une expression très oscillante ne doit pas exploser le budget
    let config = ConfigTrace {
        raffinement_max: 50.0,
        ..ConfigTrace::default()
    };

    for _ in 0..25 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let x_min = -f64::from(rng.pick(50) + 1);
        let y_min = -f64::from(rng.pick(200) + 1);
        let cadre = Cadre::new(x_min, -x_min, y_min, -y_min);

        let pts = m.tracer_courbe_avec(&expr, &cadre, &config);
        assert!(pts.windows(2).all(|w| w[0].0 < w[1].0), "expr={expr:?}");
        for (x, y) in pts {
            assert!(x >= cadre.x_min && x <= cadre.x_max, "expr={expr:?} x={x}");
            assert!(cadre.contient_y(y) && y != 0.0, "expr={expr:?} y={y}");
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(Moteur::new().calculer(&expr), "400");
}

#[test]
fn fuzz_safe_chaine_plate_longue() {
    // pas de récursion sur une chaîne plate : 10 000 termes passent
    let expr = vec!["1"; 10_000].join("+");
    assert_eq!(Moteur::new().calculer(&expr), "10000");
}
