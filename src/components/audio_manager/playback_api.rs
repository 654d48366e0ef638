// Public playback utility API consumed by UI components.
/// Seek the current episode, updating the displayed progress right away.
pub fn seek_to(mut progress: Signal<ProgressTracker>, amount: u32) {
    let command = progress.with_mut(|progress| progress.seek(amount));
    run_command(command);
}
