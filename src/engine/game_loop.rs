/// Frame timing and pacing
///
/// The gameplay core is advanced exactly once per rendered frame with the
/// frame's elapsed time. This type measures that time, optionally caps the
/// frame rate, and keeps a rolling FPS average for diagnostics.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame gaps longer than this (window drags, breakpoints) are clamped
const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Frame timing state
pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Epoch for input timestamps
    start_time: Instant,

    /// Whether the game is paused
    paused: bool,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Frame cap; `None` means uncapped (or vsync-paced)
    fps_limit: Option<u32>,
}

impl GameLoop {
    /// Create a new uncapped game loop
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            start_time: now,
            paused: false,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
            fps_limit: None,
        }
    }

    /// Create a game loop with a frame cap
    pub fn with_fps_limit(fps_limit: Option<u32>) -> Self {
        let mut game_loop = Self::new();
        game_loop.set_fps_limit(fps_limit);
        game_loop
    }

    /// Change the frame cap; zero is treated as uncapped
    pub fn set_fps_limit(&mut self, fps_limit: Option<u32>) {
        let fps_limit = fps_limit.filter(|fps| *fps > 0);
        if fps_limit != self.fps_limit {
            log::info!("Frame cap set to {:?}", fps_limit);
            self.fps_limit = fps_limit;
        }
    }

    /// Get the frame cap, if any
    pub fn fps_limit(&self) -> Option<u32> {
        self.fps_limit
    }

    /// Begin a new frame, returning the elapsed time in seconds to feed the
    /// core with (zero while paused)
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.pop_front();
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.paused {
            return 0.0;
        }

        frame_time.min(MAX_FRAME_TIME).as_secs_f32()
    }

    /// When the next frame should start under the current cap
    pub fn next_frame_deadline(&self) -> Option<Instant> {
        self.fps_limit
            .map(|fps| self.last_frame_time + Duration::from_secs_f64(1.0 / fps as f64))
    }

    /// Milliseconds since the loop was created, used to timestamp input
    pub fn elapsed_ms(&self) -> u64 {
        Instant::now().duration_since(self.start_time).as_millis() as u64
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames run
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Don't report the paused stretch as one giant frame
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert!(!game_loop.is_paused());
        assert_eq!(game_loop.fps_limit(), None);
    }

    #[test]
    fn test_pause_resume() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        assert!(game_loop.is_paused());
        game_loop.resume();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::new();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_paused_frames_have_no_time() {
        let mut game_loop = GameLoop::new();
        game_loop.pause();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(game_loop.begin_frame(), 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_frame_time_is_measured() {
        let mut game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(10));
        let dt = game_loop.begin_frame();
        assert!(dt >= 0.01);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(300));
        let dt = game_loop.begin_frame();
        assert!(dt <= MAX_FRAME_TIME.as_secs_f32());
    }

    #[test]
    fn test_fps_limit_deadline() {
        let mut game_loop = GameLoop::with_fps_limit(Some(60));
        assert!(game_loop.next_frame_deadline().is_some());

        game_loop.set_fps_limit(Some(0));
        assert_eq!(game_loop.fps_limit(), None);
        assert!(game_loop.next_frame_deadline().is_none());
    }

    #[test]
    fn test_elapsed_ms_advances() {
        let game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(5));
        assert!(game_loop.elapsed_ms() >= 5);
    }
}
