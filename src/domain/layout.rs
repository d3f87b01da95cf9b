//! Grid layout variants and their derived geometry.

use super::grid::Dimensions;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How the grid is shaped and labeled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridLayout {
    /// Plain rows × columns grid
    Uniform {
        #[serde(default = "default_uniform_size")]
        rows: usize,
        #[serde(default = "default_uniform_size")]
        columns: usize,
    },
    /// One row per hour between `time_start` and `time_end`
    Schedule {
        #[serde(default = "default_time_start")]
        time_start: u32,
        #[serde(default = "default_time_end")]
        time_end: u32,
        #[serde(default = "default_schedule_columns")]
        columns: usize,
    },
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::uniform(default_uniform_size(), default_uniform_size())
    }
}

fn default_uniform_size() -> usize {
    5
}

fn default_time_start() -> u32 {
    9
}

fn default_time_end() -> u32 {
    18
}

fn default_schedule_columns() -> usize {
    2
}

impl GridLayout {
    pub fn uniform(rows: usize, columns: usize) -> Self {
        Self::Uniform { rows, columns }
    }

    pub fn schedule(time_start: u32, time_end: u32, columns: usize) -> Self {
        Self::Schedule {
            time_start,
            time_end,
            columns,
        }
    }

    /// Schedule with the stock 09:00–18:00, two column setup
    pub fn default_schedule() -> Self {
        Self::schedule(
            default_time_start(),
            default_time_end(),
            default_schedule_columns(),
        )
    }

    /// Grid size implied by this layout
    pub fn dimensions(&self) -> Dimensions {
        match *self {
            Self::Uniform { rows, columns } => Dimensions::new(rows, columns),
            Self::Schedule {
                time_start,
                time_end,
                columns,
            } => Dimensions::new(time_end.saturating_sub(time_start) as usize, columns),
        }
    }

    /// Whether rows carry a leading time label
    pub fn has_row_labels(&self) -> bool {
        matches!(self, Self::Schedule { .. })
    }

    /// Label for a row, formatted as a zero-padded 24-hour time (`HH:00`)
    pub fn row_label(&self, row: usize) -> Option<String> {
        match *self {
            Self::Uniform { .. } => None,
            Self::Schedule { time_start, .. } => {
                Some(format!("{:02}:00", time_start as usize + row))
            }
        }
    }

    /// Display title for the layout
    pub fn title(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "Editable Grid",
            Self::Schedule { .. } => "Schedule",
        }
    }

    /// Reject layouts that cannot produce a usable grid
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Uniform { rows, columns } => {
                if rows == 0 || columns == 0 {
                    return Err(ConfigError::Invalid(format!(
                        "uniform grid needs at least one row and column, got {}x{}",
                        rows, columns
                    )));
                }
            }
            Self::Schedule {
                time_start,
                time_end,
                columns,
            } => {
                if time_start >= time_end {
                    return Err(ConfigError::Invalid(format!(
                        "schedule time_start ({}) must be before time_end ({})",
                        time_start, time_end
                    )));
                }
                if time_end > 24 {
                    return Err(ConfigError::Invalid(format!(
                        "schedule time_end ({}) must not exceed 24",
                        time_end
                    )));
                }
                if columns == 0 {
                    return Err(ConfigError::Invalid(
                        "schedule needs at least one column".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_5x5_uniform() {
        let layout = GridLayout::default();
        assert_eq!(layout.dimensions(), Dimensions::new(5, 5));
        assert!(!layout.has_row_labels());
        assert_eq!(layout.row_label(0), None);
    }

    #[test]
    fn test_default_schedule_dimensions() {
        let layout = GridLayout::default_schedule();
        assert_eq!(layout.dimensions(), Dimensions::new(9, 2));
        assert_eq!(layout.row_label(0).as_deref(), Some("09:00"));
        assert_eq!(layout.row_label(8).as_deref(), Some("17:00"));
    }

    #[test]
    fn test_schedule_labels() {
        let layout = GridLayout::schedule(9, 12, 1);
        assert_eq!(layout.dimensions(), Dimensions::new(3, 1));

        let labels: Vec<String> = (0..3).filter_map(|row| layout.row_label(row)).collect();
        insta::assert_snapshot!(labels.join("\n"), @r"
        09:00
        10:00
        11:00
        ");
    }

    #[test]
    fn test_validate() {
        assert!(GridLayout::uniform(1, 1).validate().is_ok());
        assert!(GridLayout::uniform(0, 3).validate().is_err());
        assert!(GridLayout::schedule(0, 24, 1).validate().is_ok());
        assert!(GridLayout::schedule(12, 12, 1).validate().is_err());
        assert!(GridLayout::schedule(18, 9, 1).validate().is_err());
        assert!(GridLayout::schedule(9, 25, 1).validate().is_err());
        assert!(GridLayout::schedule(9, 18, 0).validate().is_err());
    }

    #[test]
    fn test_deserialize_tagged() {
        let layout: GridLayout =
            serde_json::from_str(r#"{"kind":"schedule","time_start":8}"#).unwrap();
        assert_eq!(layout, GridLayout::schedule(8, 18, 2));

        let layout: GridLayout = serde_json::from_str(r#"{"kind":"uniform","rows":3}"#).unwrap();
        assert_eq!(layout, GridLayout::uniform(3, 5));
    }
}
