//! Player physics
//!
//! One explicit Euler step per tick. Jump arcs and spawn spacing were tuned
//! together against this step, so there is no delta-time scaling here.

use super::state::Player;

/// Start a jump; ignored while airborne. Returns whether the jump took.
pub fn jump(player: &mut Player) -> bool {
    if player.airborne {
        return false;
    }
    player.velocity_y = -player.jump_power;
    player.airborne = true;
    true
}

/// Integrate one tick. Returns true on the tick the player lands.
pub fn step(player: &mut Player) -> bool {
    if !player.airborne {
        return false;
    }

    player.pos.y += player.velocity_y;
    player.velocity_y += player.gravity;

    if player.pos.y >= player.rest_y {
        player.pos.y = player.rest_y;
        player.velocity_y = 0.0;
        player.airborne = false;
        return true;
    }
    false
}
