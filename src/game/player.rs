// The player: movement, crouching, collisions and its sprite

use glam::Vec4;

use super::animation::AnimationPlayer;
use super::state::{facing_inverted, select_animation, MotionState};
use super::stats::PlayerStats;
use crate::core::{Aabb, Vector2D};
use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{resolve_collisions, Body, CollisionSide, Wall};
use crate::engine::renderer::RenderSurface;

/// Drawn in place of the sprite when its frame image is unavailable
const FALLBACK_COLOR: Vec4 = Vec4::ONE;

/// The controlled character
#[derive(Debug)]
pub struct Player {
    pub body: Body,
    pub on_ground: bool,
    pub crouching: bool,
    /// False while a wall blocks standing up from a crouch
    pub can_uncrouch: bool,
    /// Sprite mirrored to face left
    pub inverted: bool,
    pub animation: AnimationPlayer,
    pub stats: PlayerStats,
}

impl Player {
    /// Standing, airborne player at `spawn` (top-left of the collision box)
    pub fn new(spawn: Vector2D, stats: PlayerStats) -> Self {
        Self {
            body: Body::new(spawn, stats.standing_size),
            on_ground: false,
            crouching: false,
            can_uncrouch: true,
            inverted: false,
            animation: AnimationPlayer::standard(),
            stats,
        }
    }

    /// Advance one frame of `dt` seconds against `walls`
    pub fn update(&mut self, dt: f32, input: &PlayerInput, walls: &[Wall]) {
        let dt = dt.min(self.stats.max_frame_dt);

        // Position moves with last frame's velocity
        self.body.integrate(dt);

        if self.on_ground {
            self.can_uncrouch = self.update_crouching(input.is_pressed(Action::Crouch), walls);
        } else {
            self.leave_crouch_airborne();
        }

        self.on_ground = resolve_collisions(&mut self.body, self.crouching, walls);

        self.body.velocity.y += self.stats.gravity * dt;

        if !self.crouching {
            self.apply_movement(dt, input);
        }

        let speed = self.stats.speed;
        let vertical_cap = self.stats.vertical_speed_cap;
        self.body.velocity.x = self.body.velocity.x.clamp(-speed, speed);
        self.body.velocity.y = self.body.velocity.y.clamp(-vertical_cap, vertical_cap);

        self.animation.advance(dt);
        self.update_animation(input);
    }

    fn apply_movement(&mut self, dt: f32, input: &PlayerInput) {
        let acceleration = if input.is_pressed(Action::Walk) {
            self.stats.acceleration / self.stats.walk_divisor
        } else {
            self.stats.acceleration
        };
        self.body.velocity.x += input.horizontal() * acceleration * dt;

        // Jumping ignores the walk modifier
        if self.on_ground && input.is_pressed(Action::Jump) {
            self.body.velocity.y -= self.stats.acceleration * dt * self.stats.jump_force;
        }
    }

    fn update_animation(&mut self, input: &PlayerInput) {
        let motion = MotionState {
            on_ground: self.on_ground,
            crouching: self.crouching,
            velocity: self.body.velocity,
            walking: input.is_pressed(Action::Walk),
        };
        if let Some(kind) = select_animation(&motion, self.stats.animation_threshold) {
            self.animation.play(kind);
        }
        self.inverted = facing_inverted(self.body.velocity.x, self.inverted);
    }

    /// Crouch or stand according to `requested`.
    ///
    /// Returns false, changing nothing, when a crouched player cannot stand
    /// because a wall would be hit from any side other than from above.
    /// Feet stay where they are in every transition.
    pub fn update_crouching(&mut self, requested: bool, walls: &[Wall]) -> bool {
        let delta = self.stats.crouch_delta;

        if self.crouching {
            if self.standing_blocked(walls) {
                log::debug!("Cannot stand up at {:?}", self.body.position);
                return false;
            }
            if !requested {
                self.body.position.y -= delta;
                self.body.size.y += delta;
                self.crouching = false;
            }
        } else if requested {
            self.body.position.y += delta;
            self.body.size.y -= delta;
            self.crouching = true;
        }

        true
    }

    /// The collision box the player would have after standing up
    pub fn standing_probe(&self) -> Aabb {
        let delta = self.stats.crouch_delta;
        Aabb::new(
            Vector2D::new(self.body.position.x, self.body.position.y - delta),
            Vector2D::new(self.body.size.x, self.body.size.y + delta),
        )
    }

    fn standing_blocked(&self, walls: &[Wall]) -> bool {
        let probe = self.standing_probe();
        walls.iter().any(|wall| {
            !matches!(
                wall.resolve(&probe).side,
                CollisionSide::Top | CollisionSide::None
            )
        })
    }

    /// Crouching needs ground: in the air the player stands up again
    fn leave_crouch_airborne(&mut self) {
        if self.crouching {
            self.body.position.y -= self.stats.crouch_delta;
            self.body.size.y += self.stats.crouch_delta;
        }
        self.crouching = false;
        self.can_uncrouch = true;
    }

    /// One friction tick on the horizontal velocity
    pub fn apply_friction(&mut self, input: &PlayerInput) {
        if !self.can_uncrouch {
            return;
        }
        if input.single_horizontal_held() && !self.crouching {
            return;
        }

        let friction = if self.crouching {
            self.stats.crouch_friction
        } else if !self.on_ground {
            self.stats.air_friction
        } else {
            self.stats.ground_friction
        };
        self.body.velocity.x *= friction;
    }

    /// Draw the current frame centred on the body and standing on its
    /// bottom edge
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let size = self.stats.animation_size;
        let position = Vector2D::new(
            self.body.position.x + self.body.size.x / 2.0 - size.x / 2.0,
            self.body.position.y + self.body.size.y - size.y,
        );

        let drawn = self
            .animation
            .current_frame_path()
            .map(|path| surface.draw_image(&path, position, size, self.inverted))
            .unwrap_or(false);

        if !drawn {
            surface.fill_rect(self.body.position, self.body.size, FALLBACK_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::surface::{DrawCommand, RecordingSurface};
    use crate::game::animation::AnimationKind;
    use approx::assert_relative_eq;

    const FRAME: f32 = 1.0 / 60.0;

    fn floor() -> Wall {
        Wall::from_rect(0.0, 300.0, 1000.0, 50.0)
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vector2D::new(x, y), PlayerStats::standard())
    }

    fn input_with(actions: &[Action]) -> PlayerInput {
        let mut input = PlayerInput::new();
        for action in actions {
            input.press(*action);
        }
        input
    }

    /// Player dropped onto the floor and left to come to rest
    fn settled_player() -> Player {
        let mut player = player_at(100.0, 100.0);
        let idle = PlayerInput::new();
        for _ in 0..60 {
            player.update(FRAME, &idle, &[floor()]);
        }
        assert!(player.on_ground);
        player
    }

    #[test]
    fn test_falls_and_lands_on_floor() {
        let mut player = player_at(100.0, 100.0);
        let input = PlayerInput::new();
        let walls = [floor()];

        let mut frames = 0;
        while !player.on_ground && frames < 120 {
            player.update(FRAME, &input, &walls);
            frames += 1;
        }

        assert!(player.on_ground);
        assert_eq!(player.body.position.y, 300.0 - 96.0);
        // Gravity is applied after the landing zeroed the velocity
        assert_relative_eq!(player.body.velocity.y, 4000.0 * FRAME);
    }

    #[test]
    fn test_lands_at_clamped_frame_rate() {
        let mut player = player_at(100.0, 100.0);
        let input = PlayerInput::new();
        let walls = [floor()];

        let mut frames = 0;
        while player.body.bounds().bottom() < 300.0 {
            // 0.25s frames are integrated as 0.1s
            player.update(0.25, &input, &walls);
            frames += 1;
        }

        assert_eq!(frames, 3);
        assert!(player.on_ground);
        assert_eq!(player.body.position.y, 204.0);
        assert_relative_eq!(player.body.velocity.y, 400.0);
    }

    #[test]
    fn test_deep_penetration_resolves_through_bottom_face() {
        let mut player = player_at(100.0, 100.0);
        player.body.velocity.y = 2400.0;

        player.update(0.1, &PlayerInput::new(), &[floor()]);

        // 136 units into the top face but only 10 past the bottom one
        assert_eq!(player.body.position.y, 350.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_horizontal_speed_never_exceeds_cap() {
        let mut player = settled_player();
        let walls = [floor()];

        for actions in [&[Action::MoveRight][..], &[Action::MoveLeft, Action::Walk][..]] {
            let input = input_with(actions);
            for _ in 0..120 {
                player.update(FRAME, &input, &walls);
                assert!(player.body.velocity.x.abs() <= 750.0);
            }
        }
    }

    #[test]
    fn test_idle_to_running_resets_clock() {
        let mut player = settled_player();
        assert_eq!(player.animation.current(), AnimationKind::Idle);
        assert!(player.animation.elapsed() > 0.0);

        player.body.velocity.x = 200.0;
        player.update(FRAME, &PlayerInput::new(), &[floor()]);

        assert_eq!(player.animation.current(), AnimationKind::Running);
        assert_eq!(player.animation.elapsed(), 0.0);
        assert!(!player.inverted);
    }

    #[test]
    fn test_walk_modifier_selects_walking() {
        let mut player = settled_player();
        player.body.velocity.x = -200.0;
        player.update(FRAME, &input_with(&[Action::Walk]), &[floor()]);

        assert_eq!(player.animation.current(), AnimationKind::Walking);
        assert!(player.inverted);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut player = settled_player();
        player.update(FRAME, &input_with(&[Action::Jump]), &[floor()]);

        assert!(player.body.velocity.y < -3000.0);

        player.update(FRAME, &PlayerInput::new(), &[floor()]);
        assert!(!player.on_ground);
        assert!(player.body.position.y < 204.0);
    }

    #[test]
    fn test_crouching_player_cannot_jump() {
        let mut player = settled_player();
        player.update(FRAME, &input_with(&[Action::Crouch]), &[floor()]);
        player.update(FRAME, &input_with(&[Action::Crouch, Action::Jump]), &[floor()]);

        assert!(player.crouching);
        assert!(player.body.velocity.y > 0.0);
    }

    #[test]
    fn test_crouch_keeps_feet_on_floor() {
        let mut player = settled_player();
        let crouch = input_with(&[Action::Crouch]);

        player.update(FRAME, &crouch, &[floor()]);
        assert!(player.crouching);
        assert_eq!(player.body.size.y, 56.0);
        assert_eq!(player.body.bounds().bottom(), 300.0);
        assert_eq!(player.animation.current(), AnimationKind::Crouching);

        player.update(FRAME, &crouch, &[floor()]);
        assert_eq!(player.body.size.y, 56.0);
        assert_eq!(player.body.position.y, 244.0);
    }

    #[test]
    fn test_crouch_request_is_idempotent() {
        let mut player = player_at(100.0, 204.0);

        assert!(player.update_crouching(true, &[]));
        let once = player.body;
        assert!(player.update_crouching(true, &[]));

        assert_eq!(player.body, once);
        assert_eq!(once.position.y, 244.0);
        assert_eq!(once.size.y, 56.0);
    }

    #[test]
    fn test_ceiling_blocks_standing_up() {
        let ceiling = Wall::from_rect(0.0, 200.0, 1000.0, 20.0);
        let mut player = player_at(100.0, 204.0);
        player.update_crouching(true, &[]);
        let crouched = player.body;

        assert!(!player.update_crouching(false, &[floor(), ceiling]));
        assert!(player.crouching);
        assert_eq!(player.body, crouched);

        assert!(player.update_crouching(false, &[floor()]));
        assert!(!player.crouching);
        assert_eq!(player.body.position.y, 204.0);
        assert_eq!(player.body.size.y, 96.0);
    }

    #[test]
    fn test_floor_contact_does_not_block_standing() {
        let mut player = player_at(100.0, 204.0);
        player.update_crouching(true, &[]);
        // Sunk slightly into the floor, as between frames
        player.body.position.y += 1.0;

        assert!(player.update_crouching(false, &[floor()]));
        assert!(!player.crouching);
    }

    #[test]
    fn test_airborne_player_stands_up() {
        let mut player = player_at(100.0, 0.0);
        player.update_crouching(true, &[]);
        player.can_uncrouch = false;

        player.update(FRAME, &input_with(&[Action::Crouch]), &[]);

        assert!(!player.crouching);
        assert!(player.can_uncrouch);
        assert_eq!(player.body.size.y, 96.0);
    }

    #[test]
    fn test_side_hit_while_sliding_bounces() {
        let wall = Wall::from_rect(300.0, 0.0, 50.0, 300.0);
        let mut player = settled_player();
        player.update(FRAME, &input_with(&[Action::Crouch]), &[floor()]);

        player.body.position.x = 255.0;
        player.body.velocity.x = 600.0;
        player.update(FRAME, &input_with(&[Action::Crouch]), &[floor(), wall]);

        assert_eq!(player.body.position.x, 260.0);
        assert_relative_eq!(player.body.velocity.x, -600.0);
    }

    #[test]
    fn test_friction_by_state() {
        let none = PlayerInput::new();

        let mut grounded = player_at(0.0, 0.0);
        grounded.on_ground = true;
        grounded.body.velocity.x = 100.0;
        grounded.apply_friction(&none);
        assert_relative_eq!(grounded.body.velocity.x, 80.0);

        let mut airborne = player_at(0.0, 0.0);
        airborne.body.velocity.x = 100.0;
        airborne.apply_friction(&none);
        assert_relative_eq!(airborne.body.velocity.x, 90.0);

        let mut sliding = player_at(0.0, 0.0);
        sliding.on_ground = true;
        sliding.crouching = true;
        sliding.body.velocity.x = 100.0;
        sliding.apply_friction(&input_with(&[Action::MoveRight]));
        assert_relative_eq!(sliding.body.velocity.x, 99.0);
    }

    #[test]
    fn test_friction_skip_rules() {
        let mut steering = player_at(0.0, 0.0);
        steering.on_ground = true;
        steering.body.velocity.x = 100.0;
        steering.apply_friction(&input_with(&[Action::MoveLeft]));
        assert_eq!(steering.body.velocity.x, 100.0);

        // Both directions held cancel out, so friction applies
        steering.apply_friction(&input_with(&[Action::MoveLeft, Action::MoveRight]));
        assert_relative_eq!(steering.body.velocity.x, 80.0);

        let mut stuck = player_at(0.0, 0.0);
        stuck.crouching = true;
        stuck.can_uncrouch = false;
        stuck.body.velocity.x = 100.0;
        stuck.apply_friction(&PlayerInput::new());
        assert_eq!(stuck.body.velocity.x, 100.0);
    }

    #[test]
    fn test_draw_centres_sprite_on_feet() {
        let mut player = player_at(100.0, 204.0);
        player.inverted = true;
        let mut surface = RecordingSurface {
            available_images: vec!["animations/player/idle/0000.png".to_string()],
            ..Default::default()
        };

        player.draw(&mut surface);

        assert_eq!(
            surface.commands,
            vec![DrawCommand::Image {
                path: "animations/player/idle/0000.png".to_string(),
                position: Vector2D::new(72.0, 204.0),
                size: Vector2D::new(96.0, 96.0),
                flip_horizontal: true,
            }]
        );
    }

    #[test]
    fn test_draw_falls_back_to_rectangle() {
        let player = player_at(100.0, 204.0);
        let mut surface = RecordingSurface::default();

        player.draw(&mut surface);

        assert_eq!(
            surface.commands,
            vec![DrawCommand::Rect {
                position: Vector2D::new(100.0, 204.0),
                size: Vector2D::new(40.0, 96.0),
                color: Vec4::ONE,
            }]
        );
    }
}
