//! Draft editing of timer settings
//!
//! The editor keeps its own copy of the settings so slider changes never
//! reach a running countdown until saved.

use thiserror::Error;

use super::settings::{
    TimerSettings, BREAK_STEP_MINUTES, FOCUS_STEP_MINUTES, MAX_BREAK_MINUTES, MAX_FOCUS_MINUTES,
    MIN_BREAK_MINUTES, MIN_FOCUS_MINUTES,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("settings editor is not open")]
    EditorClosed,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsEditor {
    draft: Option<TimerSettings>,
}

impl SettingsEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Current draft, if the editor is open
    pub fn draft(&self) -> Option<TimerSettings> {
        self.draft
    }

    /// Open the editor with a copy of the committed settings
    pub fn open(&mut self, committed: TimerSettings) -> TimerSettings {
        let draft = committed.clamped();
        self.draft = Some(draft);
        draft
    }

    pub fn set_focus_minutes(&mut self, minutes: u32) -> Result<TimerSettings, EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::EditorClosed)?;
        draft.focus_minutes = snap(minutes, MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES, FOCUS_STEP_MINUTES);
        Ok(*draft)
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> Result<TimerSettings, EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::EditorClosed)?;
        draft.break_minutes = snap(minutes, MIN_BREAK_MINUTES, MAX_BREAK_MINUTES, BREAK_STEP_MINUTES);
        Ok(*draft)
    }

    /// Drop the draft and close
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Close and hand back the draft to be committed
    pub fn save(&mut self) -> Result<TimerSettings, EditorError> {
        self.draft.take().ok_or(EditorError::EditorClosed)
    }
}

/// Clamp to `[min, max]`, then round to the nearest `step` counted from `min`
fn snap(value: u32, min: u32, max: u32, step: u32) -> u32 {
    let clamped = value.clamp(min, max);
    if step <= 1 {
        return clamped;
    }
    let offset = clamped - min;
    let rounded = min + ((offset + step / 2) / step) * step;
    rounded.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_snapshots_committed() {
        let mut editor = SettingsEditor::new();
        assert!(!editor.is_open());
        let draft = editor.open(TimerSettings::new(30, 10));
        assert_eq!(draft, TimerSettings::new(30, 10));
        assert_eq!(editor.draft(), Some(draft));
    }

    #[test]
    fn test_focus_is_clamped_and_stepped() {
        let mut editor = SettingsEditor::new();
        editor.open(TimerSettings::default());
        assert_eq!(editor.set_focus_minutes(0).unwrap().focus_minutes, 5);
        assert_eq!(editor.set_focus_minutes(61).unwrap().focus_minutes, 60);
        assert_eq!(editor.set_focus_minutes(500).unwrap().focus_minutes, 60);
        assert_eq!(editor.set_focus_minutes(22).unwrap().focus_minutes, 20);
        assert_eq!(editor.set_focus_minutes(23).unwrap().focus_minutes, 25);
        assert_eq!(editor.set_focus_minutes(45).unwrap().focus_minutes, 45);
    }

    #[test]
    fn test_break_is_clamped() {
        let mut editor = SettingsEditor::new();
        editor.open(TimerSettings::default());
        assert_eq!(editor.set_break_minutes(0).unwrap().break_minutes, 1);
        assert_eq!(editor.set_break_minutes(31).unwrap().break_minutes, 30);
        assert_eq!(editor.set_break_minutes(17).unwrap().break_minutes, 17);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut editor = SettingsEditor::new();
        editor.open(TimerSettings::default());
        editor.set_focus_minutes(50).unwrap();
        editor.cancel();
        assert!(!editor.is_open());

        let draft = editor.open(TimerSettings::default());
        assert_eq!(draft.focus_minutes, 25);
    }

    #[test]
    fn test_save_returns_draft_and_closes() {
        let mut editor = SettingsEditor::new();
        editor.open(TimerSettings::default());
        editor.set_focus_minutes(40).unwrap();
        editor.set_break_minutes(8).unwrap();
        assert_eq!(editor.save(), Ok(TimerSettings::new(40, 8)));
        assert!(!editor.is_open());
    }

    #[test]
    fn test_closed_editor_rejects_edits() {
        let mut editor = SettingsEditor::new();
        assert_eq!(editor.set_focus_minutes(30), Err(EditorError::EditorClosed));
        assert_eq!(editor.set_break_minutes(3), Err(EditorError::EditorClosed));
        assert_eq!(editor.save(), Err(EditorError::EditorClosed));
    }
}
