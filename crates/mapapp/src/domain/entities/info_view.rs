//! Info View Entity
//!
//! Describes how the host renders the detail popup of a feature.

use serde::{Deserialize, Serialize};

/// Rendering descriptor attached to a search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InfoView {
    /// Balloon popup anchored at the feature
    Balloon {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        balloon_title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        balloon_subtitle: Option<String>,
        /// UI component rendering the balloon body
        component: String,
    },
}

impl InfoView {
    pub fn balloon(name: impl Into<String>, component: impl Into<String>) -> Self {
        Self::Balloon {
            name: name.into(),
            balloon_title: None,
            balloon_subtitle: None,
            component: component.into(),
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        let Self::Balloon { balloon_title, .. } = &mut self;
        *balloon_title = title;
        self
    }

    pub fn with_subtitle(mut self, subtitle: Option<String>) -> Self {
        let Self::Balloon {
            balloon_subtitle, ..
        } = &mut self;
        *balloon_subtitle = subtitle;
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Balloon { name, .. } => name,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Balloon { balloon_title, .. } => balloon_title.as_deref(),
        }
    }

    pub fn subtitle(&self) -> Option<&str> {
        match self {
            Self::Balloon {
                balloon_subtitle, ..
            } => balloon_subtitle.as_deref(),
        }
    }
}
