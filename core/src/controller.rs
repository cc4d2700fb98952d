//! Preview state machine.
//!
//! ```text
//! Idle ──select_file──▶ Previewing ──begin_submit──▶ Submitting
//!   ▲                       ▲                            │
//!   └──parse failure──┐     └──── request failed ────────┤
//!                     │                                  ▼
//!               any state ◀──select_file──────────── Resolved
//! ```
//!
//! All view state lives in one [`PreviewController`]; the UI mutates it only
//! through the transitions below. The controller is generic over the file
//! handle `F` so the browser can keep its native file object while tests
//! use plain values.

use crate::api::{ExportFormat, RequestForm, TransformResult};
use crate::error::{ClientError, ClientResult, ParseError, RequestError, ValidationError};
use crate::parser::{parse_preview, Preview};

/// Which table the content area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// The uploaded file, highlighted once a regex is known.
    #[default]
    Original,
    /// The service result, with changed cells marked.
    After,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Tab::Original => "original",
            Tab::After => "after",
        }
    }
}

/// Coarse state derived from the controller's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Previewing,
    Submitting,
    Resolved,
}

/// The currently selected upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    pub name: String,
    pub handle: F,
}

/// Everything needed to send one request, captured when it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest<F> {
    pub file: SelectedFile<F>,
    pub form: RequestForm,
    /// File selection this request belongs to.
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct PreviewController<F> {
    file: Option<SelectedFile<F>>,
    instruction: String,
    preview: Option<Preview>,
    result: Option<TransformResult>,
    tab: Tab,
    busy: bool,
    error: Option<String>,
    generation: u64,
}

impl<F> Default for PreviewController<F> {
    fn default() -> Self {
        Self {
            file: None,
            instruction: String::new(),
            preview: None,
            result: None,
            tab: Tab::Original,
            busy: false,
            error: None,
            generation: 0,
        }
    }
}

impl<F: Clone> PreviewController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Submitting
        } else if self.result.is_some() {
            Phase::Resolved
        } else if self.preview.is_some() {
            Phase::Previewing
        } else {
            Phase::Idle
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&TransformResult> {
        self.result.as_ref()
    }

    /// Pattern to highlight the original tab with, once a result exists.
    pub fn highlight_pattern(&self) -> Option<&str> {
        self.result
            .as_ref()
            .map(|r| r.regex_used.as_str())
            .filter(|p| !p.is_empty())
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `tab` has content to show.
    pub fn can_view(&self, tab: Tab) -> bool {
        match tab {
            Tab::Original => self.preview.is_some(),
            Tab::After => self.result.is_some(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Start a new file selection and return its token.
    ///
    /// Clears the file, preview and result right away. Only the latest token
    /// is accepted by [`Self::finish_selection`] and [`Self::reject_selection`],
    /// so a slow read of an earlier pick cannot replace a later one.
    pub fn begin_selection(&mut self) -> u64 {
        self.start_selection();
        self.generation
    }

    /// Parse the bytes of the selection started with token `selection`.
    ///
    /// Returns `None` without touching state when a newer selection exists.
    /// On failure the controller is back to [`Phase::Idle`].
    pub fn finish_selection(
        &mut self,
        selection: u64,
        name: impl Into<String>,
        handle: F,
        bytes: &[u8],
    ) -> Option<ClientResult<&Preview>> {
        let name = name.into();
        if selection != self.generation {
            log::debug!("Ignoring superseded read of '{}'", name);
            return None;
        }
        Some(self.load_preview(name, handle, bytes))
    }

    /// Refuse the selection started with token `selection` before its bytes
    /// are parsed (too large, unreadable). `None` when superseded.
    pub fn reject_selection(
        &mut self,
        selection: u64,
        message: impl Into<String>,
    ) -> Option<ClientError> {
        if selection != self.generation {
            return None;
        }
        Some(self.fail(ParseError::Rejected(message.into())))
    }

    /// Replace the current file with a new upload and parse its preview.
    ///
    /// Any previous result is discarded. On failure the file and preview are
    /// cleared and the controller is back to [`Phase::Idle`].
    pub fn select_file(
        &mut self,
        name: impl Into<String>,
        handle: F,
        bytes: &[u8],
    ) -> ClientResult<&Preview> {
        self.start_selection();
        self.load_preview(name.into(), handle, bytes)
    }

    pub fn set_instruction(&mut self, instruction: impl Into<String>) {
        self.instruction = instruction.into();
    }

    /// Validate and start a transform request.
    ///
    /// The file is checked before the instruction. Nothing but the error
    /// message changes when validation fails.
    pub fn begin_submit(&mut self) -> ClientResult<PendingRequest<F>> {
        self.error = None;

        if self.busy {
            return Err(self.fail(ValidationError::RequestInFlight));
        }
        let Some(file) = self.file.clone() else {
            return Err(self.fail(ValidationError::MissingFile));
        };
        if self.instruction.trim().is_empty() {
            return Err(self.fail(ValidationError::MissingInstruction));
        }

        self.busy = true;
        Ok(PendingRequest {
            file,
            form: RequestForm::transform(self.instruction.clone()),
            generation: self.generation,
        })
    }

    /// Apply the outcome of a transform request started by [`Self::begin_submit`].
    ///
    /// Outcomes for a file that has since been replaced are dropped.
    pub fn finish_submit(
        &mut self,
        generation: u64,
        outcome: Result<TransformResult, RequestError>,
    ) {
        self.busy = false;
        if generation != self.generation {
            log::debug!("Dropping transform result for a replaced file");
            return;
        }

        match outcome {
            Ok(result) => {
                log::info!(
                    "Transform applied {:?} to {} of {} rows",
                    result.regex_used,
                    result.rows.len(),
                    result.total_rows
                );
                self.result = Some(result);
                self.tab = Tab::After;
            }
            Err(e) => {
                self.result = None;
                self.tab = Tab::Original;
                self.fail(e);
            }
        }
    }

    /// Validate and start a download of the transformed file.
    pub fn begin_download(&mut self, format: ExportFormat) -> ClientResult<PendingRequest<F>> {
        self.error = None;

        if self.busy {
            return Err(self.fail(ValidationError::RequestInFlight));
        }
        let file = match self.file.clone() {
            Some(file) if !self.instruction.trim().is_empty() => file,
            _ => return Err(self.fail(ValidationError::NothingToDownload)),
        };

        self.busy = true;
        Ok(PendingRequest {
            file,
            form: RequestForm::download(self.instruction.clone(), format),
            generation: self.generation,
        })
    }

    /// Apply the outcome of a download started by [`Self::begin_download`].
    pub fn finish_download(&mut self, generation: u64, outcome: Result<(), RequestError>) {
        self.busy = false;
        if generation != self.generation {
            return;
        }
        if let Err(e) = outcome {
            self.fail(e);
        }
    }

    /// Switch tabs. Refused when the tab has nothing to show.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if !self.can_view(tab) {
            return false;
        }
        self.tab = tab;
        true
    }

    fn start_selection(&mut self) {
        self.generation += 1;
        self.error = None;
        self.result = None;
        self.preview = None;
        self.file = None;
        self.tab = Tab::Original;
    }

    fn load_preview(&mut self, name: String, handle: F, bytes: &[u8]) -> ClientResult<&Preview> {
        match parse_preview(bytes, &name) {
            Ok(preview) => {
                log::info!(
                    "Loaded '{}': {} columns, {} rows",
                    name,
                    preview.table.columns.len(),
                    preview.decoded_rows
                );
                self.file = Some(SelectedFile { name, handle });
                self.tab = Tab::Original;
                let preview: &Preview = self.preview.insert(preview);
                Ok(preview)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, err: impl Into<ClientError>) -> ClientError {
        let err = err.into();
        log::warn!("{}", err);
        self.error = Some(err.to_string());
        err
    }
}
