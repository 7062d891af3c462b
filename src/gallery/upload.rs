// SPDX-License-Identifier: MPL-2.0
//! State of the Upload screen.

use crate::api::UploadSource;

#[derive(Debug, Default)]
pub struct UploadState {
    /// Raw text of the URL / path input.
    input: String,
    /// Source picked with the file dialog or by drag and drop.
    picked: Option<UploadSource>,
    uploading: bool,
    last_error: Option<String>,
}

impl UploadState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Updates the text input. Typing replaces any picked file.
    pub fn set_input(&mut self, input: String) {
        self.input = input;
        self.picked = None;
    }

    /// Records a picked or dropped file, mirrored into the text input.
    pub fn pick(&mut self, source: UploadSource) {
        self.input = source.to_string();
        self.picked = Some(source);
    }

    /// Source that would be uploaded now, if any.
    #[must_use]
    pub fn selected(&self) -> Option<UploadSource> {
        self.picked
            .clone()
            .or_else(|| UploadSource::parse(&self.input))
    }

    /// Starts an upload. Returns `None` when one is already running or when
    /// nothing is selected.
    pub fn begin(&mut self) -> Option<UploadSource> {
        if self.uploading {
            return None;
        }
        let source = self.selected()?;
        self.uploading = true;
        self.last_error = None;
        Some(source)
    }

    /// Ends a successful upload and clears the selection.
    pub fn succeed(&mut self) {
        self.uploading = false;
        self.input.clear();
        self.picked = None;
    }

    /// Ends a failed upload; the selection is kept for another attempt.
    pub fn fail(&mut self, message: String) {
        self.uploading = false;
        self.last_error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn nothing_selected_gives_no_upload() {
        let mut state = UploadState::new();
        assert_eq!(state.begin(), None);
        assert!(!state.is_uploading());
    }

    #[test]
    fn typed_url_is_selected() {
        let mut state = UploadState::new();
        state.set_input("https://example.com/cat.jpg".to_string());
        assert_eq!(
            state.begin(),
            Some(UploadSource::Remote("https://example.com/cat.jpg".to_string()))
        );
        assert!(state.is_uploading());
    }

    #[test]
    fn second_upload_is_refused_while_in_flight() {
        let mut state = UploadState::new();
        state.pick(UploadSource::File(PathBuf::from("/tmp/cat.png")));
        assert!(state.begin().is_some());
        assert_eq!(state.begin(), None);
    }

    #[test]
    fn success_clears_selection() {
        let mut state = UploadState::new();
        state.pick(UploadSource::File(PathBuf::from("/tmp/cat.png")));
        state.begin();
        state.succeed();
        assert!(!state.is_uploading());
        assert_eq!(state.selected(), None);
        assert_eq!(state.input(), "");
    }

    #[test]
    fn failure_keeps_selection_and_error() {
        let mut state = UploadState::new();
        state.pick(UploadSource::File(PathBuf::from("/tmp/cat.png")));
        state.begin();
        state.fail("Failed to upload image: Unexpected error".to_string());
        assert!(state.selected().is_some());
        assert_eq!(
            state.last_error(),
            Some("Failed to upload image: Unexpected error")
        );
    }
}
