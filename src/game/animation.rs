// Frame-duration driven sprite animation

use std::collections::HashMap;


/// Placeholder replaced by the zero-padded frame index in a source pattern
const FRAME_PLACEHOLDER: &str = "{frame}";

/// Every animation the player can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Idle,
    Walking,
    Running,
    Jumping,
    Falling,
    Crouching,
}

impl AnimationKind {
    /// Directory name under `animations/player/`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Running => "running",
            Self::Jumping => "jumping",
            Self::Falling => "falling",
            Self::Crouching => "crouching",
        }
    }

    fn source_pattern(&self) -> String {
        format!("animations/player/{}/{}.png", self.name(), FRAME_PLACEHOLDER)
    }
}

/// One clip: a source path pattern and how long each frame is shown
#[derive(Debug, Clone)]
pub struct Animation {
    source: String,
    /// Per-frame durations in milliseconds
    frames: Vec<u32>,
    total: u32,
}

impl Animation {
    pub fn new(source: impl Into<String>, frames: Vec<u32>) -> Self {
        let total = frames.iter().sum();
        Self {
            source: source.into(),
            frames,
            total,
        }
    }

    /// Index of the frame showing `elapsed` seconds into the clip.
    ///
    /// Time wraps around the clip length. A frame covers the half-open
    /// interval ending at its cumulative duration, inclusive of the end.
    pub fn frame_at(&self, elapsed: f32) -> usize {
        if self.total == 0 {
            return 0;
        }

        let t = (elapsed * 1000.0).rem_euclid(self.total as f32);
        let mut cumulative = 0.0;
        for (i, duration) in self.frames.iter().enumerate() {
            cumulative += *duration as f32;
            if t <= cumulative {
                return i;
            }
        }
        self.frames.len().saturating_sub(1)
    }

    /// Asset path of frame `index`
    pub fn frame_path(&self, index: usize) -> String {
        self.source
            .replace(FRAME_PLACEHOLDER, &format!("{:04}", index))
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Length of one loop in milliseconds
    #[cfg(test)]
    pub fn total_duration_ms(&self) -> u32 {
        self.total
    }
}

/// The player's clip library plus the clock of the clip being shown
#[derive(Debug)]
pub struct AnimationPlayer {
    clips: HashMap<AnimationKind, Animation>,
    current: AnimationKind,
    /// Seconds since `current` was selected
    elapsed: f32,
}

impl AnimationPlayer {
    pub fn new(clips: HashMap<AnimationKind, Animation>, initial: AnimationKind) -> Self {
        Self {
            clips,
            current: initial,
            elapsed: 0.0,
        }
    }

    /// Library with a clip for every [`AnimationKind`], starting idle
    pub fn standard() -> Self {
        let clip = |kind: AnimationKind, frames: Vec<u32>| {
            (kind, Animation::new(kind.source_pattern(), frames))
        };

        let clips = HashMap::from([
            clip(
                AnimationKind::Idle,
                vec![3000, 100, 100, 1000, 100, 100, 200, 1000],
            ),
            clip(AnimationKind::Walking, vec![150; 6]),
            clip(AnimationKind::Running, vec![80; 8]),
            clip(AnimationKind::Jumping, vec![100, 100, 200]),
            clip(AnimationKind::Falling, vec![120, 120]),
            clip(AnimationKind::Crouching, vec![200, 1000]),
        ]);

        Self::new(clips, AnimationKind::Idle)
    }

    /// Switch to `kind`, restarting its clock. Selecting the clip already
    /// playing does nothing. Returns whether a switch happened.
    pub fn play(&mut self, kind: AnimationKind) -> bool {
        if kind == self.current {
            return false;
        }

        log::debug!("Animation {} -> {}", self.current.name(), kind.name());
        self.current = kind;
        self.reset();
        true
    }

    /// Restart the current clip
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    #[cfg(test)]
    pub fn current(&self) -> AnimationKind {
        self.current
    }

    #[cfg(test)]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn current_clip(&self) -> Option<&Animation> {
        self.clips.get(&self.current)
    }

    pub fn current_frame(&self) -> usize {
        self.current_clip()
            .map(|clip| clip.frame_at(self.elapsed))
            .unwrap_or(0)
    }

    /// Asset path of the frame to draw now, if the clip exists
    pub fn current_frame_path(&self) -> Option<String> {
        self.current_clip()
            .map(|clip| clip.frame_path(self.current_frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> Animation {
        Animation::new(
            "animations/player/idle/{frame}.png",
            vec![3000, 100, 100, 1000, 100, 100, 200, 1000],
        )
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(idle().total_duration_ms(), 5600);
        assert_eq!(idle().frame_count(), 8);
    }

    #[test]
    fn test_frame_boundaries_are_inclusive() {
        let clip = idle();
        assert_eq!(clip.frame_at(0.0), 0);
        assert_eq!(clip.frame_at(2.9), 0);
        assert_eq!(clip.frame_at(3.05), 1);
        assert_eq!(clip.frame_at(3.15), 2);
        assert_eq!(clip.frame_at(4.0), 3);
        assert_eq!(clip.frame_at(5.5), 7);
    }

    #[test]
    fn test_frame_wraps_around() {
        let clip = idle();
        assert_eq!(clip.frame_at(5.65), 0);
        assert_eq!(clip.frame_at(5.6 + 3.05), 1);
    }

    #[test]
    fn test_empty_clip_shows_first_frame() {
        let clip = Animation::new("x/{frame}.png", Vec::new());
        assert_eq!(clip.frame_at(12.0), 0);
    }

    #[test]
    fn test_frame_path_is_zero_padded() {
        let clip = idle();
        assert_eq!(clip.frame_path(3), "animations/player/idle/0003.png");
        assert_eq!(clip.frame_path(12), "animations/player/idle/0012.png");
    }

    #[test]
    fn test_play_switch_resets_clock() {
        let mut player = AnimationPlayer::standard();
        player.advance(1.5);

        assert!(player.play(AnimationKind::Running));
        assert_eq!(player.current(), AnimationKind::Running);
        assert_eq!(player.elapsed(), 0.0);
    }

    #[test]
    fn test_play_same_clip_keeps_clock() {
        let mut player = AnimationPlayer::standard();
        player.advance(1.5);

        assert!(!player.play(AnimationKind::Idle));
        assert_eq!(player.elapsed(), 1.5);
    }

    #[test]
    fn test_standard_library_is_complete() {
        let mut player = AnimationPlayer::standard();
        for kind in [
            AnimationKind::Idle,
            AnimationKind::Walking,
            AnimationKind::Running,
            AnimationKind::Jumping,
            AnimationKind::Falling,
            AnimationKind::Crouching,
        ] {
            player.play(kind);
            let clip = player.current_clip().expect("clip missing");
            assert!(clip.frame_count() > 0);
            assert_eq!(
                player.current_frame_path().as_deref(),
                Some(format!("animations/player/{}/0000.png", kind.name()).as_str())
            );
        }
    }

    #[test]
    fn test_current_frame_follows_clock() {
        let mut player = AnimationPlayer::standard();
        player.advance(3.05);
        assert_eq!(player.current_frame(), 1);

        player.reset();
        assert_eq!(player.current_frame(), 0);
    }
}
