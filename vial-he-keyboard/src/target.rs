//! Selection targets: what the user clicked on

use std::fmt;

/// A selectable key widget, resolved once at selection time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionTarget {
    /// Switch in the key matrix
    Matrix { row: u8, col: u8 },
    /// Rotary encoder action (direction 0 = CCW, 1 = CW)
    Encoder { index: u8, direction: u8 },
}

impl SelectionTarget {
    pub fn matrix(row: u8, col: u8) -> Self {
        Self::Matrix { row, col }
    }

    pub fn encoder(index: u8, direction: u8) -> Self {
        Self::Encoder { index, direction }
    }

    /// Matrix coordinate, or `None` for encoders
    pub fn coordinate(&self) -> Option<(u8, u8)> {
        match *self {
            Self::Matrix { row, col } => Some((row, col)),
            Self::Encoder { .. } => None,
        }
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix { .. })
    }
}

impl fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matrix { row, col } => write!(f, "Row {row}, Col {col}"),
            Self::Encoder { index, direction } => {
                let dir = if *direction == 0 { "CCW" } else { "CW" };
                write!(f, "Encoder {index} {dir}")
            }
        }
    }
}

/// Label shown above the analog options
///
/// Only matrix keys carry analog settings, so encoders read as "None".
pub fn key_label(target: Option<&SelectionTarget>) -> String {
    match target.and_then(SelectionTarget::coordinate) {
        Some((row, col)) => format!("Key: Row {row}, Col {col}"),
        None => "Key: None".to_string(),
    }
}
