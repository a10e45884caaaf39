use crate::domain::errors::{DomainError, Result};

const MIN_COLUMNS: u8 = 1;
const MAX_COLUMNS: u8 = 4;

/// Grid column count; presentation only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    columns: u8,
}

impl GridLayout {
    pub fn new(columns: u8) -> Result<Self> {
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
            return Err(DomainError::InvalidGridColumns(columns));
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Number of grid cells an expanded tile spans in each direction
    pub fn span_for(&self, expanded: bool) -> u8 {
        if expanded {
            self.columns.min(2)
        } else {
            1
        }
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self { columns: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_one_to_four_columns() {
        for columns in 1..=4 {
            assert_eq!(GridLayout::new(columns).unwrap().columns(), columns);
        }
        assert!(GridLayout::new(0).is_err());
        assert!(GridLayout::new(5).is_err());
    }

    #[test]
    fn test_expanded_span_is_capped_by_columns() {
        assert_eq!(GridLayout::new(1).unwrap().span_for(true), 1);
        assert_eq!(GridLayout::new(4).unwrap().span_for(true), 2);
        assert_eq!(GridLayout::default().span_for(false), 1);
    }
}
