// Player state machine

use log::{debug, warn};

use super::animation::{AnimationClip, Frame};
use crate::engine::assets::AssetLoader;

/// Folder holding the player's animation frame sets, relative to `assets/images`
pub const HERO_FRAMES_DIR: &str = "hero_knight";

/// Represents the current state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Run,
    Attack1,
    Attack2,
    /// Double-click heavy attack
    Heavy,
    Block,
    Hurt,
    Death,
}

/// Where a state's frames live and how they play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub folder: &'static str,
    pub fps: f32,
    pub looping: bool,
}

impl PlayerState {
    pub const ALL: [PlayerState; 9] = [
        Self::Idle,
        Self::Walk,
        Self::Run,
        Self::Attack1,
        Self::Attack2,
        Self::Heavy,
        Self::Block,
        Self::Hurt,
        Self::Death,
    ];

    /// Position of this state in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Idle, Walk and Run accept new actions
    pub fn is_unoccupied(self) -> bool {
        matches!(self, Self::Idle | Self::Walk | Self::Run)
    }

    /// One-shot states that return to Idle once their clip finishes
    pub fn is_committed(self) -> bool {
        matches!(self, Self::Attack1 | Self::Attack2 | Self::Heavy | Self::Hurt)
    }

    /// Check if a jump may start from this state
    pub fn can_jump(self) -> bool {
        !matches!(self, Self::Block | Self::Death)
    }

    /// Get the animation clip spec for this state
    pub fn animation(self) -> AnimationSpec {
        let (folder, fps, looping) = match self {
            Self::Idle => ("idle", 7.0, true),
            Self::Walk => ("walk", 8.0, true),
            Self::Run => ("run", 8.0, true),
            Self::Attack1 => ("attack_1", 5.0, false),
            Self::Attack2 => ("attack_2", 5.0, false),
            Self::Heavy => ("heavy_attack", 6.0, false),
            Self::Block => ("defend", 1.0, true),
            Self::Hurt => ("hurt", 4.0, false),
            Self::Death => ("death", 12.0, false),
        };
        AnimationSpec {
            folder,
            fps,
            looping,
        }
    }
}

/// State machine that owns one clip per state and drives their playback
///
/// Entering a state restarts its clip from frame 0; leaving a state stops its
/// clip where it is.
#[derive(Debug, Clone)]
pub struct PlayerStateMachine {
    current_state: PlayerState,
    /// Indexed by `PlayerState::index`
    clips: Vec<AnimationClip>,
    removed: bool,
}

impl PlayerStateMachine {
    /// Build a machine from a clip factory, starting in Idle
    pub fn with_clips(mut make_clip: impl FnMut(PlayerState) -> AnimationClip) -> Self {
        let clips = PlayerState::ALL.iter().map(|&state| make_clip(state)).collect();
        let mut machine = Self {
            current_state: PlayerState::Idle,
            clips,
            removed: false,
        };
        machine.clip_mut(PlayerState::Idle).start();
        machine
    }

    /// Load every state's frames from `images/hero_knight/<folder>`
    ///
    /// Missing frame sets are replaced by the placeholder frame.
    pub fn load(loader: &AssetLoader) -> Self {
        Self::with_clips(|state| {
            let spec = state.animation();
            let folder = format!("{}/{}", HERO_FRAMES_DIR, spec.folder);
            let frames = loader.load_frames_or_placeholder(&folder);
            AnimationClip::new(frames, spec.fps, spec.looping).unwrap_or_else(|e| {
                warn!("Bad animation for {:?}: {}", state, e);
                placeholder_clip(spec)
            })
        })
    }

    /// A machine whose every clip is the single placeholder frame
    pub fn placeholder() -> Self {
        Self::with_clips(|state| placeholder_clip(state.animation()))
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    /// True once the Death clip has played through
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Get the clip for a state
    pub fn clip(&self, state: PlayerState) -> &AnimationClip {
        &self.clips[state.index()]
    }

    fn clip_mut(&mut self, state: PlayerState) -> &mut AnimationClip {
        &mut self.clips[state.index()]
    }

    /// Enter `new_state`, restarting its clip even if it is already active
    pub fn force_transition(&mut self, new_state: PlayerState) {
        debug!("Player state {:?} -> {:?}", self.current_state, new_state);
        let old_state = self.current_state;
        self.clip_mut(old_state).stop();
        self.current_state = new_state;
        self.clip_mut(new_state).start();
    }

    /// Enter `new_state` unless it is already active
    pub fn transition(&mut self, new_state: PlayerState) {
        if self.current_state != new_state {
            self.force_transition(new_state);
        }
    }

    /// Run the per-tick transition rules
    pub fn update(&mut self, moving: bool, sprinting: bool) {
        if self.removed {
            return;
        }

        let state = self.current_state;
        if state.is_committed() {
            if self.clip(state).is_finished() {
                self.force_transition(PlayerState::Idle);
            }
            return;
        }

        match state {
            PlayerState::Death => {
                if self.clip(state).is_finished() {
                    debug!("Death animation finished, removing player");
                    self.removed = true;
                }
            }
            // Only stop_block leaves Block
            PlayerState::Block => {}
            _ => {
                let desired = match (moving, sprinting) {
                    (true, true) => PlayerState::Run,
                    (true, false) => PlayerState::Walk,
                    (false, _) => PlayerState::Idle,
                };
                self.transition(desired);
            }
        }
    }

    /// Advance the active clip and return the frame to draw
    pub fn animate(&mut self, dt: f32, flip_x: bool) -> Frame {
        let state = self.current_state;
        self.clip_mut(state).advance_and_sample(dt, flip_x, false)
    }

    /// The active clip's current frame without advancing it
    pub fn current_frame(&self, flip_x: bool) -> Frame {
        self.clip(self.current_state).sample(flip_x, false)
    }
}

fn placeholder_clip(spec: AnimationSpec) -> AnimationClip {
    AnimationClip::placeholder(spec.fps, spec.looping)
}
