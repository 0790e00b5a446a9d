// Frame-sequence animation clips

use crate::engine::assets::FrameHandle;

/// Errors raised when building a clip
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimationError {
    #[error("Animation clip needs at least one frame")]
    NoFrames,

    #[error("Animation frame rate must be positive, got {0}")]
    InvalidFps(f32),
}

/// The frame to draw this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub handle: FrameHandle,
    pub flip_x: bool,
    pub flip_y: bool,
}

/// A fixed-rate sequence of frames, looping or one-shot
///
/// At most one frame is advanced per call, and the time left over past a frame
/// boundary is dropped. A one-shot clip that runs past its last frame wraps to
/// frame 0 and stops; it then reports `is_finished` until restarted.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    frames: Vec<FrameHandle>,
    fps: f32,
    /// Duration of each frame in seconds
    frame_duration: f32,
    looping: bool,
    index: usize,
    playing: bool,
    /// Time since the last frame change
    since_advance: f32,
}

impl AnimationClip {
    /// Create a clip; fails on an empty frame list or a non-positive rate
    pub fn new(frames: Vec<FrameHandle>, fps: f32, looping: bool) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::NoFrames);
        }
        if !(fps > 0.0) {
            return Err(AnimationError::InvalidFps(fps));
        }
        Ok(Self {
            frames,
            fps,
            frame_duration: 1.0 / fps,
            looping,
            index: 0,
            playing: false,
            since_advance: 0.0,
        })
    }

    /// A single placeholder frame, used when a frame set could not be loaded
    pub fn placeholder(fps: f32, looping: bool) -> Self {
        let fps = if fps > 0.0 { fps } else { 1.0 };
        Self {
            frames: vec![FrameHandle::PLACEHOLDER],
            fps,
            frame_duration: 1.0 / fps,
            looping,
            index: 0,
            playing: false,
            since_advance: 0.0,
        }
    }

    /// Create a clip that repeats
    pub fn looping(frames: Vec<FrameHandle>, fps: f32) -> Result<Self, AnimationError> {
        Self::new(frames, fps, true)
    }

    /// Create a clip that holds its last frame
    pub fn one_shot(frames: Vec<FrameHandle>, fps: f32) -> Result<Self, AnimationError> {
        Self::new(frames, fps, false)
    }

    /// Rewind to the first frame and play
    pub fn start(&mut self) {
        self.index = 0;
        self.playing = true;
        self.since_advance = 0.0;
    }

    /// Halt on the current frame
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Advance the clock by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }
        self.since_advance += dt;
        if self.since_advance < self.frame_duration {
            return;
        }
        self.since_advance = 0.0;
        self.index += 1;
        if self.index >= self.frames.len() {
            self.index = 0;
            if !self.looping {
                self.playing = false;
            }
        }
    }

    /// The current frame with the requested mirroring
    pub fn sample(&self, flip_x: bool, flip_y: bool) -> Frame {
        Frame {
            handle: self.frames[self.index],
            flip_x,
            flip_y,
        }
    }

    /// Advance by `dt` seconds and return the frame to draw
    pub fn advance_and_sample(&mut self, dt: f32, flip_x: bool, flip_y: bool) -> Frame {
        self.advance(dt);
        self.sample(flip_x, flip_y)
    }

    /// A one-shot clip that has played through
    pub fn is_finished(&self) -> bool {
        !self.looping && !self.playing
    }

    /// Check if the clip is still playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the clip repeats
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Get the index of the current frame
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Get the number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Get the playback rate in frames per second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time for one pass over every frame
    pub fn total_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }
}
