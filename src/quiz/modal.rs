// modal.rs - Confirmation dialog state machine
//
// The submit interceptor consults this on every submit event. The bypass
// latch is one-shot: exactly the submission triggered by "Yes" passes
// through; anything after that validates again.

/// What the submit interceptor should do with a submit event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitAction {
    /// Block the event and surface validation errors.
    ShowErrors,
    /// Block the event and open the confirmation dialog.
    OpenModal,
    /// Let the native submission proceed.
    PassThrough,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modal {
    open: bool,
    bypass: bool,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True when the next submit event is the confirmed one and must not
    /// be intercepted.
    pub fn armed(&self) -> bool {
        self.bypass
    }

    /// Route a submit event. `valid` is the outcome of field validation.
    pub fn on_submit(&mut self, valid: bool) -> SubmitAction {
        if self.bypass {
            self.bypass = false;
            return SubmitAction::PassThrough;
        }
        if !valid {
            return SubmitAction::ShowErrors;
        }
        self.open = true;
        SubmitAction::OpenModal
    }

    /// "Yes" clicked: close and arm the bypass for the re-submit. Returns
    /// false (and does nothing) when the dialog was not open.
    pub fn confirm(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.bypass = true;
        true
    }

    /// "No", backdrop click, or Escape: close without arming anything.
    pub fn dismiss(&mut self) {
        self.open = false;
    }
}
