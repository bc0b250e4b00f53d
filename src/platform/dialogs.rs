//! One-shot user-facing alert dialogs.

/// Modal alert surface used for permission explanations and denials.
///
/// Permission denial is a valid terminal state; the dialog is the only
/// user-visible signal the pipeline emits for it.
pub trait DialogService: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}
