// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the hierarchy of error types for the runtime's external seams.

use std::fmt;

/// An error produced by the network-fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The requested URL does not resolve to any payload.
    NotFound {
        /// The URL that was requested.
        url: String,
    },
    /// The transport failed while retrieving the payload.
    Transport {
        /// The URL that was requested.
        url: String,
        /// Description of the underlying transport failure.
        detail: String,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound { url } => {
                write!(f, "No payload found at '{url}'")
            }
            FetchError::Transport { url, detail } => {
                write!(f, "Transport failure while fetching '{url}': {detail}")
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// An error produced while loading a single resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The resource bytes could not be retrieved.
    Transport {
        /// The locator of the resource that failed.
        locator: String,
        /// Description of the underlying transport failure.
        detail: String,
    },
    /// The resource bytes were retrieved but could not be decoded.
    Decode {
        /// The locator of the resource that failed.
        locator: String,
        /// Description of the decoder failure.
        detail: String,
    },
}

impl LoadError {
    /// Returns the locator of the resource this error refers to.
    pub fn locator(&self) -> &str {
        match self {
            LoadError::Transport { locator, .. } => locator,
            LoadError::Decode { locator, .. } => locator,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Transport { locator, detail } => {
                write!(f, "Failed to retrieve resource '{locator}': {detail}")
            }
            LoadError::Decode { locator, detail } => {
                write!(f, "Failed to decode resource '{locator}': {detail}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// An error produced while interpreting the application configuration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The payload could not be parsed at all.
    Malformed {
        /// Description of the parse failure.
        detail: String,
    },
    /// The payload parsed but a required property is absent.
    MissingProperty {
        /// Name of the missing property.
        name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Malformed { detail } => {
                write!(f, "Malformed configuration payload: {detail}")
            }
            ConfigError::MissingProperty { name } => {
                write!(f, "Configuration is missing required property '{name}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
