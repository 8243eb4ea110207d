//! Game loop driver
//!
//! Owns the ball and its collaborators. Each step reads a frame, asks the
//! detector for a hand, and ticks the ball with the resulting trampoline.
//! A failed frame read skips the tick without touching the ball.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Ball, BallError, BallSnapshot, Clock, Playfield, Segment, SystemClock};
use crate::sim::{TickInput, TickReport, tick};
use crate::tracking::{FrameError, FrameSource, HandDetector, trampoline_from_landmarks};

/// User commands from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Discard the ball and spawn a fresh one
    Restart,
    Quit,
}

/// Fatal loop errors
#[derive(Debug)]
pub enum GameError {
    /// Frame source reported unusable dimensions
    BadDimensions(u32, u32),
    Ball(BallError),
    Camera(FrameError),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadDimensions(w, h) => write!(f, "bad frame dimensions: {w}x{h}"),
            Self::Ball(e) => write!(f, "cannot spawn ball: {e}"),
            Self::Camera(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<BallError> for GameError {
    fn from(err: BallError) -> Self {
        GameError::Ball(err)
    }
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Ticked {
        report: TickReport,
        snapshot: BallSnapshot,
    },
    /// Frame read failed; the ball was left untouched
    Skipped,
}

/// Running totals since the game was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub ticks: u64,
    pub skipped: u64,
    pub bounces: u64,
    pub restarts: u64,
}

pub struct Game<S, D, C = SystemClock>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
    C: Clock + Clone,
{
    settings: Settings,
    source: S,
    detector: D,
    clock: C,
    field: Playfield,
    ball: Ball<C>,
    trampoline: Option<Segment>,
    stats: GameStats,
}

impl<S, D, C> Game<S, D, C>
where
    S: FrameSource,
    D: HandDetector<S::Frame>,
    C: Clock + Clone,
{
    pub fn new(settings: Settings, source: S, detector: D, clock: C) -> Result<Self, GameError> {
        let (w, h) = source.dimensions();
        let field = Playfield::new(w as f32, h as f32).ok_or(GameError::BadDimensions(w, h))?;
        let ball = spawn_ball(&settings, field, clock.clone())?;
        log::info!("Game initialized on {w}x{h} playfield");

        Ok(Self {
            settings,
            source,
            detector,
            clock,
            field,
            ball,
            trampoline: None,
            stats: GameStats::default(),
        })
    }

    pub fn ball(&self) -> &Ball<C> {
        &self.ball
    }

    pub fn playfield(&self) -> Playfield {
        self.field
    }

    /// Trampoline used on the most recent tick, for drawing
    pub fn trampoline(&self) -> Option<Segment> {
        self.trampoline
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Run one frame
    ///
    /// Read failures skip the tick. An unavailable camera is fatal.
    pub fn step(&mut self) -> Result<StepOutcome, GameError> {
        let frame = match self.source.next_frame() {
            Ok(frame) => frame,
            Err(FrameError::ReadFailed(msg)) => {
                log::warn!("Skipping tick: failed to capture frame: {msg}");
                self.stats.skipped += 1;
                return Ok(StepOutcome::Skipped);
            }
            Err(e) => return Err(GameError::Camera(e)),
        };

        let (w, h) = self.source.dimensions();
        self.trampoline = self
            .detector
            .detect(&frame)
            .and_then(|hand| trampoline_from_landmarks(&hand, w, h));

        let input = TickInput {
            trampoline: self.trampoline,
        };
        let report = tick(&mut self.ball, &input, self.field);

        self.stats.ticks += 1;
        if report.bounced {
            self.stats.bounces += 1;
        }

        Ok(StepOutcome::Ticked {
            report,
            snapshot: self.ball.snapshot(),
        })
    }

    /// Apply a user command; returns false when the loop should stop
    pub fn handle(&mut self, command: Command) -> Result<bool, GameError> {
        match command {
            Command::Restart => {
                self.restart()?;
                Ok(true)
            }
            Command::Quit => Ok(false),
        }
    }

    /// Replace the ball with a freshly spawned one
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.ball = spawn_ball(&self.settings, self.field, self.clock.clone())?;
        self.trampoline = None;
        self.stats.restarts += 1;
        log::info!("Game restarted");
        Ok(())
    }
}

fn spawn_ball<C: Clock>(settings: &Settings, field: Playfield, clock: C) -> Result<Ball<C>, BallError> {
    let center = settings.spawn_point(field.width, field.height);
    Ball::with_params(center, settings.color, settings.ball, clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ManualClock;
    use crate::tracking::HandLandmarks;
    use glam::Vec2;
    use std::collections::VecDeque;

    /// Frame source that replays a script; frames are just their index
    struct ScriptedCamera {
        dims: (u32, u32),
        frames: VecDeque<Result<u32, FrameError>>,
        next: u32,
    }

    impl ScriptedCamera {
        fn new(dims: (u32, u32)) -> Self {
            Self {
                dims,
                frames: VecDeque::new(),
                next: 0,
            }
        }
    }

    impl FrameSource for ScriptedCamera {
        type Frame = u32;

        fn dimensions(&self) -> (u32, u32) {
            self.dims
        }

        fn next_frame(&mut self) -> Result<u32, FrameError> {
            self.next += 1;
            self.frames.pop_front().unwrap_or(Ok(self.next))
        }
    }

    /// Detector that always reports the same hand (or none)
    struct FixedHand(Option<HandLandmarks>);

    impl HandDetector<u32> for FixedHand {
        fn detect(&mut self, _frame: &u32) -> Option<HandLandmarks> {
            self.0
        }
    }

    // Thumb (50,150) to index (150,150) on a 200x200 field
    fn flat_hand() -> HandLandmarks {
        HandLandmarks::from_tips(Vec2::new(0.25, 0.75), Vec2::new(0.75, 0.75))
    }

    fn settings_with_spawn(x: f32, y: f32) -> Settings {
        Settings {
            spawn: Some([x, y]),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let clock = ManualClock::new(0.0);
        let result = Game::new(Settings::default(), ScriptedCamera::new((0, 480)), FixedHand(None), &clock);
        assert!(matches!(result, Err(GameError::BadDimensions(0, 480))));
    }

    #[test]
    fn test_default_spawn_point() {
        let clock = ManualClock::new(0.0);
        let game = Game::new(Settings::default(), ScriptedCamera::new((640, 480)), FixedHand(None), &clock).unwrap();
        assert_eq!(game.ball().pos, Vec2::new(320.0, 120.0));
    }

    #[test]
    fn test_step_without_hand_falls() {
        let clock = ManualClock::new(0.0);
        let mut game = Game::new(Settings::default(), ScriptedCamera::new((640, 480)), FixedHand(None), &clock).unwrap();

        let outcome = game.step().unwrap();
        let StepOutcome::Ticked { report, snapshot } = outcome else {
            panic!("expected a tick, got {outcome:?}");
        };
        assert!(!report.bounced);
        assert_eq!(snapshot.vel, Vec2::new(0.0, GRAVITY));
        assert!(game.trampoline().is_none());
    }

    #[test]
    fn test_step_bounces_off_hand() {
        let clock = ManualClock::new(1.0);
        let settings = settings_with_spawn(100.0, 135.0);
        let mut game = Game::new(settings, ScriptedCamera::new((200, 200)), FixedHand(Some(flat_hand())), &clock).unwrap();

        let outcome = game.step().unwrap();
        let StepOutcome::Ticked { report, snapshot } = outcome else {
            panic!("expected a tick, got {outcome:?}");
        };
        assert!(report.bounced);
        assert!(snapshot.in_cooldown);
        assert_eq!(snapshot.vel, Vec2::new(0.0, -TRAMPOLINE_BOOST + GRAVITY));
        assert_eq!(
            game.trampoline(),
            Some(Segment::new(Vec2::new(50.0, 150.0), Vec2::new(150.0, 150.0)))
        );
        assert_eq!(game.stats().bounces, 1);
    }

    #[test]
    fn test_read_failure_skips_tick() {
        let clock = ManualClock::new(0.0);
        let mut camera = ScriptedCamera::new((640, 480));
        camera.frames.push_back(Err(FrameError::ReadFailed("usb hiccup".into())));
        let mut game = Game::new(settings_with_spawn(300.0, 200.0), camera, FixedHand(None), &clock).unwrap();

        assert_eq!(game.step().unwrap(), StepOutcome::Skipped);
        assert_eq!(game.ball().pos, Vec2::new(300.0, 200.0));
        assert_eq!(game.ball().vel, Vec2::ZERO);

        assert!(matches!(game.step().unwrap(), StepOutcome::Ticked { .. }));
        let stats = game.stats();
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.ticks, 1);
    }

    #[test]
    fn test_unavailable_camera_is_fatal() {
        let clock = ManualClock::new(0.0);
        let mut camera = ScriptedCamera::new((640, 480));
        camera.frames.push_back(Err(FrameError::Unavailable("unplugged".into())));
        let mut game = Game::new(Settings::default(), camera, FixedHand(None), &clock).unwrap();

        assert!(matches!(game.step(), Err(GameError::Camera(FrameError::Unavailable(_)))));
    }

    #[test]
    fn test_restart_spawns_fresh_ball() {
        let clock = ManualClock::new(1.0);
        let settings = settings_with_spawn(100.0, 135.0);
        let mut game = Game::new(settings, ScriptedCamera::new((200, 200)), FixedHand(Some(flat_hand())), &clock).unwrap();
        game.step().unwrap();
        assert!(game.ball().in_cooldown());

        assert!(game.handle(Command::Restart).unwrap());
        let ball = game.ball();
        assert_eq!(ball.pos, Vec2::new(100.0, 135.0));
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.last_bounce_time(), None);
        assert!(!ball.in_cooldown());
        assert_eq!(game.stats().restarts, 1);
    }

    #[test]
    fn test_quit_command() {
        let clock = ManualClock::new(0.0);
        let mut game = Game::new(Settings::default(), ScriptedCamera::new((640, 480)), FixedHand(None), &clock).unwrap();
        assert!(!game.handle(Command::Quit).unwrap());
    }
}
