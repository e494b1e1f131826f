use super::*;

#[test]
fn test_startpos_is_balanced() {
    let terms = eval_terms(&Position::startpos());
    assert_eq!(terms.mg, 0);
    assert_eq!(terms.eg, 0);
    assert_eq!(terms.phase, TOTAL_PHASE);
    assert_eq!(evaluate(&Position::startpos()), 0);
}

#[test]
fn test_blend_boundaries() {
    let full = EvalTerms {
        mg: 120,
        eg: -40,
        phase: TOTAL_PHASE,
    };
    assert_eq!(blend(full), 120);
    assert_eq!(blend(EvalTerms { phase: 0, ..full }), -40);
    // Extra queens from promotion push the phase past the ceiling.
    assert_eq!(blend(EvalTerms { phase: 30, ..full }), 120);
    assert_eq!(blend(EvalTerms { phase: 12, ..full }), 40);
}

#[test]
fn test_blend_truncates_toward_zero() {
    let terms = EvalTerms {
        mg: -1,
        eg: 0,
        phase: 12,
    };
    assert_eq!(blend(terms), 0);
    let terms = EvalTerms {
        mg: -25,
        eg: 0,
        phase: 12,
    };
    assert_eq!(blend(terms), -12);
}

#[test]
fn test_colour_mirror_negates_score() {
    let white = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("fen");
    let black = Position::from_fen("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1").expect("fen");
    assert!(evaluate(&white) > 0);
    assert_eq!(evaluate(&white), -evaluate(&black));
}

#[test]
fn test_material_dominates() {
    let up_a_queen = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("fen");
    assert!(evaluate(&up_a_queen) > 800);
}
