// Copyright 2026 Daniel Pelikan
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

//! Slider command framing.
//!
//! The command file's first character selects the mode. A leading `'r'`
//! marks a multi-character command that is sent whole, minus newlines.
//! Anything else is a single-character command.

use std::path::Path;

use tracing::{debug, info};

use crate::bluetooth::CommandSink;
use crate::error::{Result, SliderError};

/// Leading character of a multi-character command.
pub const COMPLEX_MARKER: char = 'r';

/// A framed slider command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Single character, e.g. a step direction.
    Simple(char),
    /// Marker followed by parameters, with newlines removed.
    Complex(String),
}

impl Command {
    /// Frame the contents of a command file.
    pub fn parse(buffer: &str) -> Result<Self> {
        let first = buffer.chars().next().ok_or(SliderError::EmptyCommand)?;

        if first == COMPLEX_MARKER {
            Ok(Self::Complex(buffer.chars().filter(|&c| c != '\n').collect()))
        } else {
            Ok(Self::Simple(first))
        }
    }

    /// Characters to transmit, in order.
    pub fn payloads(&self) -> Box<dyn Iterator<Item = char> + '_> {
        match self {
            Self::Simple(c) => Box::new(std::iter::once(*c)),
            Self::Complex(body) => Box::new(body.chars()),
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Self::Complex(_))
    }
}

/// Read the whole command file. The file is closed before this returns.
pub async fn load_command(path: &Path) -> Result<String> {
    let buffer = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SliderError::CommandFile {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} byte(s) from {}", buffer.len(), path.display());
    Ok(buffer)
}

/// Send a command one character per write. Returns the number of writes.
pub async fn transmit<S: CommandSink>(sink: &mut S, command: &Command) -> Result<usize> {
    let mut sent = 0;
    let mut buf = [0u8; 4];

    for c in command.payloads() {
        sink.send(c.encode_utf8(&mut buf).as_bytes()).await?;
        sent += 1;
    }

    info!(
        "Sent {} command ({} character(s))",
        if command.is_complex() { "complex" } else { "simple" },
        sent
    );
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<Vec<u8>>,
    }

    impl CommandSink for RecordingSink {
        async fn send(&mut self, payload: &[u8]) -> Result<()> {
            self.writes.push(payload.to_vec());
            Ok(())
        }

        async fn close(self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_parse_complex() {
        let command = Command::parse("r12\n34").unwrap();
        assert_eq!(command, Command::Complex("r1234".to_string()));
        assert!(command.is_complex());
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(Command::parse("L5").unwrap(), Command::Simple('L'));
        assert_eq!(Command::parse("3\n2\nu").unwrap(), Command::Simple('3'));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Command::parse(""), Err(SliderError::EmptyCommand)));
    }

    #[test]
    fn test_only_newlines_are_stripped() {
        let command = Command::parse("r1\r\n 2\n\n").unwrap();
        let chars: String = command.payloads().collect();
        assert_eq!(chars, "r1\r 2");
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert_eq!(Command::parse("R12").unwrap(), Command::Simple('R'));
    }

    #[tokio::test]
    async fn test_transmit_one_write_per_char() {
        let mut sink = RecordingSink::default();
        let command = Command::parse("r12\n34").unwrap();

        let sent = transmit(&mut sink, &command).await.unwrap();

        assert_eq!(sent, 5);
        let expected: Vec<Vec<u8>> = ["r", "1", "2", "3", "4"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        assert_eq!(sink.writes, expected);
    }

    #[tokio::test]
    async fn test_transmit_simple() {
        let mut sink = RecordingSink::default();
        let command = Command::parse("L5").unwrap();

        assert_eq!(transmit(&mut sink, &command).await.unwrap(), 1);
        assert_eq!(sink.writes, vec![b"L".to_vec()]);
    }

    #[tokio::test]
    async fn test_load_command() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bluetooth.txt");
        std::fs::write(&path, "r5\n0\n").unwrap();

        assert_eq!(load_command(&path).await.unwrap(), "r5\n0\n");
    }

    #[tokio::test]
    async fn test_load_missing_command() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = load_command(&path).await.unwrap_err();
        assert!(matches!(err, SliderError::CommandFile { .. }));
    }
}
