//! System clipboard output

use crate::core::{AppError, AppResult};

/// Replace the clipboard contents with `text`
#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(text: &str) -> AppResult<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| AppError::Clipboard(e.to_string()))?;
    tracing::info!(bytes = text.len(), "Exported to clipboard");
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_text: &str) -> AppResult<()> {
    Err(AppError::Clipboard(
        "built without the `clipboard` feature".to_string(),
    ))
}
