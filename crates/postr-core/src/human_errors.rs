// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the search and poster UI.
//
// Every technical error is mapped to plain English with a clear suggestion.
// `retriable` tells the UI whether offering a "Try again" button makes sense;
// the core itself never retries.

use crate::error::PostrError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip or provider hiccup; trying again may work.
    Transient,
    /// User must change something (pick another movie, fix settings).
    ActionRequired,
    /// Retrying with the same input will fail the same way.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether offering a manual retry makes sense.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `PostrError` into a `HumanError` suitable for display.
pub fn humanize_error(err: &PostrError) -> HumanError {
    match err {
        PostrError::ProviderUnavailable(detail) => humanize_provider_error(detail),

        PostrError::MissingAsset(_) => HumanError {
            message: "This movie doesn't have any artwork we can use.".into(),
            suggestion: "Pick a different search result, or try another title.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PostrError::AssetFetch(detail) => HumanError {
            message: "We couldn't download everything needed for the poster.".into(),
            suggestion: format!("Check your connection and try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        PostrError::InvalidArtwork(_) => HumanError {
            message: "The artwork for this movie looks broken.".into(),
            suggestion: "Pick a different search result.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        PostrError::UnknownTemplate(name) => HumanError {
            message: "That poster size isn't available.".into(),
            suggestion: format!(
                "Choose one of A4, POSTER_18x24, POSTER_24x36 or SQUARE. (Got: {name})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PostrError::Pdf(_) => HumanError {
            message: "We couldn't build the poster file.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        PostrError::Config(detail) => HumanError {
            message: "The settings need attention.".into(),
            suggestion: format!("Open the settings and correct the highlighted value. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        PostrError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: "Check the font folder in the settings points at the right place.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or choose a different folder.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your storage may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        PostrError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

/// Parse provider error details into human-readable messages.
fn humanize_provider_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("401") || lower.contains("unauthorized") {
        HumanError {
            message: "The movie database rejected our access key.".into(),
            suggestion: "Check the API token in the settings.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("timed out") || lower.contains("timeout") {
        HumanError {
            message: "The movie database didn't respond in time.".into(),
            suggestion: "Check your connection and try again.".into(),
            retriable: true,
            severity: Severity::Transient,
        }
    } else if lower.contains("404") {
        HumanError {
            message: "That movie couldn't be found anymore.".into(),
            suggestion: "Search again and pick another result.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else {
        HumanError {
            message: "We couldn't reach the movie database.".into(),
            suggestion: format!("Check your connection and try again. (Detail: {detail})"),
            retriable: true,
            severity: Severity::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_is_transient() {
        let err = PostrError::ProviderUnavailable("GET /search/movie: operation timed out".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }

    #[test]
    fn bad_token_needs_user_action() {
        let err = PostrError::ProviderUnavailable("GET /movie/27205 returned 401 Unauthorized".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn missing_artwork_asks_for_another_movie() {
        let human = humanize_error(&PostrError::MissingAsset("no backdrops".into()));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn download_failure_is_transient() {
        let human = humanize_error(&PostrError::AssetFetch("font Inter-Bold.ttf".into()));
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.suggestion.contains("Inter-Bold.ttf"));
    }
}
