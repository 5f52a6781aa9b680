//! Source framework detection.

use std::fmt;

use serde::Serialize;

/// UI framework a component appears to be written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Framework {
    React,
    #[serde(rename = "React Native")]
    ReactNative,
    Vue,
    Angular,
}

impl Framework {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::React => "React",
            Self::ReactNative => "React Native",
            Self::Vue => "Vue",
            Self::Angular => "Angular",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markers checked in order; the first framework with a hit wins.
const MARKERS: &[(Framework, &[&str])] = &[
    (
        Framework::React,
        &["import React", "from \"react\"", "from 'react'"],
    ),
    (
        Framework::ReactNative,
        &["import { View", "from \"react-native\"", "from 'react-native'"],
    ),
    (
        Framework::Vue,
        &["Vue.", "<template>", "export default {"],
    ),
    (Framework::Angular, &["@angular"]),
];

/// Guess the framework from import statements and template markers.
///
/// Falls back to [`Framework::React`].
#[must_use]
pub fn detect_framework(code: &str) -> Framework {
    MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| code.contains(marker)))
        .map_or(Framework::React, |(framework, _)| *framework)
}
