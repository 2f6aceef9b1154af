use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{PredictionError, Theme};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Info => "info-circle",
            ToastKind::Success => "check-circle",
            ToastKind::Error => "exclamation-circle",
        }
    }
}

/// A toast notification. The UI renders it and removes it after the
/// configured lifetime or when closed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
    pub icon: String,
}

impl Toast {
    pub fn new(title: impl Into<String>, message: impl Into<String>, kind: ToastKind) -> Self {
        Toast {
            title: title.into(),
            message: message.into(),
            kind,
            icon: kind.icon().to_string(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Toast::new(title, message, ToastKind::Info)
    }

    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Toast::new(title, message, ToastKind::Success)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Toast::new(title, message, ToastKind::Error)
    }

    pub fn theme_changed(theme: Theme) -> Self {
        Toast::info("Theme Changed", format!("Switched to {theme} theme"))
    }

    pub fn prediction_complete() -> Self {
        Toast::success(
            "Prediction Complete",
            "Sales prediction has been calculated successfully",
        )
    }

    /// Validation failures get a generic prompt; the field messages are shown
    /// inline.
    pub fn for_error(error: &PredictionError) -> Self {
        match error {
            PredictionError::Validation(_) => {
                Toast::error("Validation Error", "Please fix the errors in the form")
            }
            PredictionError::Computation(message) => Toast::error("Prediction Error", message),
        }
    }

    pub fn export_succeeded() -> Self {
        Toast::success(
            "Export Successful",
            "The prediction data has been exported to CSV",
        )
    }

    pub fn export_failed() -> Self {
        Toast::error("Export Failed", "Failed to export prediction data")
    }

    pub fn shared() -> Self {
        Toast::success("Shared Successfully", "The prediction has been shared")
    }

    pub fn share_failed() -> Self {
        Toast::error("Share Failed", "Failed to share prediction")
    }

    pub fn copied() -> Self {
        Toast::success(
            "Copied to Clipboard",
            "The prediction details have been copied to your clipboard",
        )
    }

    pub fn copy_failed() -> Self {
        Toast::error("Copy Failed", "Failed to copy prediction to clipboard")
    }

    /// Toast for an About card button, matched on its visible text.
    pub fn for_about_button(button_text: &str) -> Option<Self> {
        let text = button_text.trim();
        if text.contains("Source Code") {
            Some(Toast::info(
                "Source Code",
                "Opening source code repository in a new tab",
            ))
        } else if text.contains("Report Issue") {
            Some(Toast::info("Report Issue", "Opening issue reporter in a new tab"))
        } else if text.contains("Help") {
            Some(Toast::info(
                "Help",
                "Documentation is available in the Help section",
            ))
        } else {
            None
        }
    }
}
