//! Vertical motion of the player
//!
//! Semi-implicit Euler with a one-frame timestep: velocity first, then
//! position, then the ground clamp.

use super::state::{Player, RunPhase};
use crate::tuning::Tuning;

/// Advance the player by one tick
pub fn integrate(player: &mut Player, tuning: &Tuning) {
    player.vel_y += tuning.gravity;
    player.y += player.vel_y;

    if player.y >= tuning.ground_y {
        player.y = tuning.ground_y;
        player.vel_y = 0.0;
        player.airborne = false;
    }
}

/// Launch a jump if grounded and the run is live
///
/// Returns whether the jump happened. Any other call is a no-op, which is
/// what stops double jumps.
pub fn jump(player: &mut Player, phase: RunPhase, tuning: &Tuning) -> bool {
    if player.airborne || phase != RunPhase::Running {
        return false;
    }
    player.vel_y = tuning.jump_velocity;
    player.airborne = true;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grounded_player_stays_put() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        for _ in 0..10 {
            integrate(&mut player, &tuning);
            assert_eq!(player.y, tuning.ground_y);
            assert_eq!(player.vel_y, 0.0);
            assert!(!player.airborne);
        }
    }

    #[test]
    fn test_first_tick_after_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(jump(&mut player, RunPhase::Running, &tuning));
        integrate(&mut player, &tuning);
        assert!((player.vel_y - -14.2).abs() < 1e-4);
        assert!((player.y - 235.8).abs() < 1e-3);
        assert!(player.airborne);
    }

    #[test]
    fn test_jump_lands_and_resets() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        jump(&mut player, RunPhase::Running, &tuning);

        let mut ticks = 0;
        while player.airborne {
            integrate(&mut player, &tuning);
            ticks += 1;
            assert!(ticks < 100, "never landed");
            if player.airborne {
                assert!(player.y < tuning.ground_y);
            }
        }
        assert_eq!(player.y, tuning.ground_y);
        assert_eq!(player.vel_y, 0.0);
        // 18 ticks up, 19 back down
        assert_eq!(ticks, 37);
    }

    #[test]
    fn test_no_double_jump() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(jump(&mut player, RunPhase::Running, &tuning));
        integrate(&mut player, &tuning);
        let before = player.clone();
        assert!(!jump(&mut player, RunPhase::Running, &tuning));
        assert!(!jump(&mut player, RunPhase::Running, &tuning));
        assert_eq!(player, before);
    }

    #[test]
    fn test_jump_ignored_outside_running() {
        let tuning = Tuning::default();
        for phase in [RunPhase::Idle, RunPhase::Ended] {
            let mut player = Player::new(&tuning);
            assert!(!jump(&mut player, phase, &tuning));
            assert_eq!(player, Player::new(&tuning));
        }
    }

    proptest! {
        #[test]
        fn prop_height_stays_in_band(jump_ticks in proptest::collection::vec(any::<bool>(), 1..400)) {
            let tuning = Tuning::default();
            let top = tuning.ground_y - tuning.jump_apex() - 1e-3;
            let mut player = Player::new(&tuning);
            for want_jump in jump_ticks {
                if want_jump {
                    jump(&mut player, RunPhase::Running, &tuning);
                }
                integrate(&mut player, &tuning);
                prop_assert!(player.y <= tuning.ground_y);
                prop_assert!(player.y >= top, "y {} above apex {}", player.y, top);
                prop_assert_eq!(player.vel_y == 0.0 && !player.airborne, player.y == tuning.ground_y);
            }
        }
    }
}
