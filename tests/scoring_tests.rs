//! Score engine properties: both policies, back-to-back, combo, levels.

use quadris::config::{GameConfig, ScorePolicy};
use quadris::core::scoring::fall_interval_ms;
use quadris::core::Score;
use quadris::types::TSpinKind;

fn score(policy: ScorePolicy, start_level: u32) -> Score {
    Score::new(&GameConfig {
        score_policy: policy,
        start_level,
        ..GameConfig::modern()
    })
}

#[test]
fn classic_table_scales_with_level() {
    let mut s = score(ScorePolicy::Classic, 0);
    assert_eq!(s.on_lock(4, 0, 0, TSpinKind::None).points_awarded, 1200);

    let mut s = score(ScorePolicy::Classic, 4);
    assert_eq!(s.on_lock(1, 0, 0, TSpinKind::None).points_awarded, 200);
}

#[test]
fn classic_ignores_combo_and_b2b_bonuses() {
    let mut s = score(ScorePolicy::Classic, 0);
    s.on_lock(4, 0, 0, TSpinKind::None);
    let second = s.on_lock(4, 0, 0, TSpinKind::None);
    // The chain is tracked (for banners) but pays nothing extra.
    assert!(second.back_to_back);
    assert_eq!(second.combo, 1);
    assert_eq!(second.points_awarded, 1200);
}

#[test]
fn modern_back_to_back_pays_three_halves() {
    let mut s = score(ScorePolicy::Modern, 0);
    assert_eq!(s.on_lock(4, 0, 0, TSpinKind::None).points_awarded, 800);
    // 800 * 3/2 = 1200, plus the 50-point combo step.
    let second = s.on_lock(4, 0, 0, TSpinKind::None);
    assert!(second.back_to_back);
    assert_eq!(second.points_awarded, 1250);
}

#[test]
fn single_after_tetris_resets_the_difficult_flag() {
    let mut s = score(ScorePolicy::Modern, 0);
    s.on_lock(4, 0, 0, TSpinKind::None);
    let single = s.on_lock(1, 0, 0, TSpinKind::None);
    assert!(!single.back_to_back);
    assert!(!s.back_to_back_armed());
}

#[test]
fn non_clearing_locks_never_touch_the_difficult_flag() {
    let mut s = score(ScorePolicy::Modern, 0);
    s.on_lock(4, 0, 0, TSpinKind::None);
    for _ in 0..10 {
        s.on_lock(0, 0, 0, TSpinKind::None);
    }
    assert!(s.back_to_back_armed());
    assert!(s.on_lock(4, 0, 0, TSpinKind::None).back_to_back);
}

#[test]
fn combo_runs_zero_one_two_then_resets() {
    let mut s = score(ScorePolicy::Modern, 0);
    let combos: Vec<i32> = (0..3).map(|_| s.on_lock(1, 0, 0, TSpinKind::None).combo).collect();
    assert_eq!(combos, vec![0, 1, 2]);
    assert_eq!(s.on_lock(0, 0, 0, TSpinKind::None).combo, -1);
    // The clear after a break starts a fresh chain with no bonus term.
    let restart = s.on_lock(1, 0, 0, TSpinKind::None);
    assert_eq!(restart.combo, 0);
    assert_eq!(restart.points_awarded, 100);
}

#[test]
fn t_spin_clears_use_their_own_table() {
    let mut s = score(ScorePolicy::Modern, 0);
    assert_eq!(s.on_lock(2, 0, 0, TSpinKind::Full).points_awarded, 1200);
    assert_eq!(s.tspin_total(), 1);

    let mut s = score(ScorePolicy::Modern, 0);
    assert_eq!(s.on_lock(2, 0, 0, TSpinKind::Mini).points_awarded, 400);
    assert_eq!(s.mini_tspin_total(), 1);
}

#[test]
fn mini_t_spin_single_is_difficult_but_zero_line_spins_are_not() {
    let mut s = score(ScorePolicy::Modern, 0);
    s.on_lock(1, 0, 0, TSpinKind::Mini);
    assert!(s.back_to_back_armed());

    let mut s = score(ScorePolicy::Modern, 0);
    s.on_lock(0, 0, 0, TSpinKind::Mini);
    assert!(!s.back_to_back_armed());
    s.on_lock(0, 0, 0, TSpinKind::Full);
    assert!(!s.back_to_back_armed());
}

#[test]
fn level_progress_wraps_every_ten_lines() {
    let mut s = score(ScorePolicy::Modern, 3);
    assert_eq!(s.level(), 3);
    s.on_lock(4, 0, 0, TSpinKind::None);
    s.on_lock(4, 0, 0, TSpinKind::None);
    let third = s.on_lock(4, 0, 0, TSpinKind::None);
    assert!(third.leveled_up);
    assert_eq!(s.level(), 4);
    assert_eq!(s.level_progress(), 2);
}

#[test]
fn per_size_line_counters_accumulate() {
    let mut s = score(ScorePolicy::Modern, 0);
    s.on_lock(1, 0, 0, TSpinKind::None);
    s.on_lock(1, 0, 0, TSpinKind::None);
    s.on_lock(2, 0, 0, TSpinKind::None);
    s.on_lock(4, 0, 0, TSpinKind::None);
    assert_eq!(s.lines_by_clear(), [2, 1, 0, 1]);
    assert_eq!(s.line_total(), 8);
}

#[test]
fn gravity_curve_endpoints() {
    assert_eq!(fall_interval_ms(0), 800);
    assert_eq!(fall_interval_ms(1), 716);
    assert_eq!(fall_interval_ms(9), 100);
    assert_eq!(fall_interval_ms(19), 33);
    assert_eq!(fall_interval_ms(29), 16);
    // Monotonically non-increasing.
    let mut last = u32::MAX;
    for level in 0..40 {
        let interval = fall_interval_ms(level);
        assert!(interval <= last, "level {level}");
        last = interval;
    }
}
