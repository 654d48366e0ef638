//! Playlist and playback-mode state shared by every view.
//!
//! Commands here never touch the audio element. The audio controller reads
//! this state and drives the surface, and feeds surface events back in.

use crate::api::models::Episode;
use rand::Rng;

/// Chooses the next index while shuffling.
pub trait IndexPicker {
    /// Returns an index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl IndexPicker for ThreadRngPicker {
    fn pick(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

#[derive(Debug, Clone)]
pub struct PlayerState<P: IndexPicker = ThreadRngPicker> {
    episode_list: Vec<Episode>,
    current_episode_index: usize,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    picker: P,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::with_picker(ThreadRngPicker)
    }
}

impl<P: IndexPicker> PlayerState<P> {
    pub fn with_picker(picker: P) -> Self {
        Self {
            episode_list: Vec::new(),
            current_episode_index: 0,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            picker,
        }
    }

    pub fn episode_list(&self) -> &[Episode] {
        &self.episode_list
    }

    pub fn current_episode_index(&self) -> usize {
        self.current_episode_index
    }

    /// `None` when the playlist is empty or the index is out of range.
    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_list.get(self.current_episode_index)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn has_previous(&self) -> bool {
        self.current_episode_index > 0
    }

    /// Always true while shuffling, even on the last position.
    pub fn has_next(&self) -> bool {
        self.is_shuffling || self.current_episode_index + 1 < self.episode_list.len()
    }

    pub fn play(&mut self, episode: Episode) {
        self.episode_list = vec![episode];
        self.current_episode_index = 0;
        self.is_playing = true;
    }

    /// The caller keeps `index` in bounds; it is stored as given.
    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.episode_list = list;
        self.current_episode_index = index;
        self.is_playing = true;
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn set_playing_state(&mut self, active: bool) {
        self.is_playing = active;
    }

    pub fn play_next(&mut self) {
        if self.is_shuffling {
            if self.episode_list.is_empty() {
                return;
            }
            self.current_episode_index = self.picker.pick(self.episode_list.len());
        } else if self.has_next() {
            self.current_episode_index += 1;
        }
    }

    pub fn play_previous(&mut self) {
        if self.has_previous() {
            self.current_episode_index -= 1;
        }
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
    }

    /// Leaves `is_playing` alone; with no episode selected it has no effect.
    pub fn clear_player_state(&mut self) {
        self.episode_list.clear();
        self.current_episode_index = 0;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed sequence of picks, wrapping each into range.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct ScriptedPicker {
        picks: VecDeque<usize>,
    }

    impl ScriptedPicker {
        pub(crate) fn new(picks: impl IntoIterator<Item = usize>) -> Self {
            Self {
                picks: picks.into_iter().collect(),
            }
        }
    }

    impl IndexPicker for ScriptedPicker {
        fn pick(&mut self, len: usize) -> usize {
            self.picks.pop_front().unwrap_or(0) % len
        }
    }

    pub(crate) fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: format!("Episode {id}"),
            members: "Diego e Richard".to_string(),
            thumbnail: format!("https://cdn.example/{id}.jpg"),
            duration: 3600,
            duration_as_string: "01:00:00".to_string(),
            url: format!("https://cdn.example/{id}.m4a"),
            published_at: "8 jan 21".to_string(),
            description: String::new(),
        }
    }

    fn abc() -> Vec<Episode> {
        vec![episode("a"), episode("b"), episode("c")]
    }

    #[test]
    fn starts_empty_and_paused() {
        let state = PlayerState::default();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.current_episode().is_none());
        assert!(!state.is_playing());
        assert!(!state.has_next());
        assert!(!state.has_previous());
    }

    #[test]
    fn play_replaces_list_with_single_episode() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 2);
        state.set_playing_state(false);

        state.play(episode("e"));

        assert_eq!(state.episode_list(), &[episode("e")]);
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.is_playing());
    }

    #[test]
    fn play_list_stores_list_and_index() {
        for index in 0..3 {
            let mut state = PlayerState::default();
            state.play_list(abc(), index);
            assert_eq!(state.current_episode_index(), index);
            assert_eq!(state.episode_list(), abc().as_slice());
            assert!(state.is_playing());
        }
    }

    #[test]
    fn out_of_range_index_has_no_current_episode() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 7);
        assert_eq!(state.current_episode_index(), 7);
        assert!(state.current_episode().is_none());
    }

    #[test]
    fn toggle_play_and_set_playing_state() {
        let mut state = PlayerState::default();
        state.toggle_play();
        assert!(state.is_playing());
        state.toggle_play();
        assert!(!state.is_playing());
        state.set_playing_state(true);
        assert!(state.is_playing());
        state.set_playing_state(true);
        assert!(state.is_playing());
    }

    #[test]
    fn play_next_advances_sequentially() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 0);
        state.play_next();
        assert_eq!(state.current_episode_index(), 1);
        assert!(state.has_previous());
        assert!(state.has_next());
    }

    #[test]
    fn last_episode_has_no_next_and_play_next_is_noop() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 2);
        assert!(!state.has_next());
        state.play_next();
        assert_eq!(state.current_episode_index(), 2);
    }

    #[test]
    fn shuffle_uses_picker_and_always_has_next() {
        let mut state = PlayerState::with_picker(ScriptedPicker::new([2, 0, 2, 1]));
        state.play_list(abc(), 2);
        state.toggle_shuffle();
        assert!(state.has_next());

        let mut seen = Vec::new();
        for _ in 0..4 {
            state.play_next();
            seen.push(state.current_episode_index());
        }
        // Repeats are allowed, including staying on the same index.
        assert_eq!(seen, vec![2, 0, 2, 1]);
    }

    #[test]
    fn shuffled_index_stays_in_bounds_with_real_rng() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 0);
        state.toggle_shuffle();
        for _ in 0..200 {
            state.play_next();
            assert!(state.current_episode_index() < 3);
        }
    }

    #[test]
    fn shuffle_on_empty_list_is_noop() {
        let mut state = PlayerState::with_picker(ScriptedPicker::new([5]));
        state.toggle_shuffle();
        state.play_next();
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.current_episode().is_none());
    }

    #[test]
    fn play_previous_stops_at_first() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 1);
        state.play_previous();
        assert_eq!(state.current_episode_index(), 0);
        state.play_previous();
        assert_eq!(state.current_episode_index(), 0);
    }

    #[test]
    fn loop_and_shuffle_toggle_independently() {
        let mut state = PlayerState::default();
        state.toggle_loop();
        state.toggle_shuffle();
        assert!(state.is_looping());
        assert!(state.is_shuffling());
        state.toggle_loop();
        assert!(!state.is_looping());
        assert!(state.is_shuffling());
    }

    #[test]
    fn clear_empties_list_and_keeps_playing_flag() {
        let mut state = PlayerState::default();
        state.play_list(abc(), 2);
        state.clear_player_state();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
        assert!(state.is_playing());
        assert!(state.current_episode().is_none());

        state.clear_player_state();
        assert!(state.episode_list().is_empty());
        assert_eq!(state.current_episode_index(), 0);
    }
}
