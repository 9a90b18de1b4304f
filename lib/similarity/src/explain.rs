//! Explainability for Gower distances
//!
//! Breaks a distance down into per-column partial dissimilarities so a plot
//! can show which columns make two rows differ.

use crate::gower::{gower_partials, mean};
use mixdist_core::{
    compute_ranges, normalize, normalize_values, ColumnKind, Error, Observation, Result, Table,
};
use serde::Serialize;

/// Contribution of one column to a Gower distance
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnContribution {
    pub column: String,
    pub kind: ColumnKind,
    /// Partial dissimilarity in [0.0, 1.0]
    pub partial: f64,
    /// Range used to scale the column (0.0 for non-numeric columns)
    pub range: f64,
}

/// A Gower distance with its per-column breakdown
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GowerExplanation {
    /// Row of the dataset the query was compared with
    pub row: usize,
    pub distance: f64,
    pub contributions: Vec<ColumnContribution>,
}

impl GowerExplanation {
    /// Columns sorted by how much they add to the distance, largest first
    pub fn ranked(&self) -> Vec<&ColumnContribution> {
        let mut ranked: Vec<_> = self.contributions.iter().collect();
        ranked.sort_by(|a, b| b.partial.total_cmp(&a.partial));
        ranked
    }
}

/// Explain the Gower distance between `query` and row `row` of `dataset`
///
/// Uses the same ranges as [`gower_distances`](crate::gower::gower_distances),
/// so `distance` matches the value it reports for that row.
pub fn explain_gower(dataset: &Table, query: &Observation, row: usize) -> Result<GowerExplanation> {
    let reference = normalize(dataset)?;
    let target = reference.rows.get(row).ok_or(Error::RowOutOfBounds {
        index: row,
        len: reference.rows.len(),
    })?;
    let query = normalize_values(query.values(), dataset.kinds())?;
    let ranges = compute_ranges(&reference.rows, &query, &reference.kinds)?;
    let partials = gower_partials(target, &query, &ranges, &reference.kinds)?;

    let contributions = dataset
        .columns()
        .iter()
        .zip(&partials)
        .zip(ranges.as_slice())
        .map(|((column, partial), range)| ColumnContribution {
            column: column.name.clone(),
            kind: column.kind,
            partial: *partial,
            range: *range,
        })
        .collect();

    Ok(GowerExplanation {
        row,
        distance: mean(&partials),
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gower::gower_distances;
    use mixdist_core::ColumnSpec;
    use serde_json::json;

    fn table() -> Table {
        Table::new(
            vec![
                ColumnSpec::numeric("age"),
                ColumnSpec::categorical("gender"),
                ColumnSpec::boolean("children"),
            ],
            vec![
                vec![20.into(), "M".into(), true.into()],
                vec![30.into(), "F".into(), true.into()],
                vec![40.into(), "F".into(), false.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_explain_matches_distance() {
        let table = table();
        let query = table.row(0).unwrap();
        let distances = gower_distances(&table, &query).unwrap();
        for row in 0..table.n_rows() {
            let explained = explain_gower(&table, &query, row).unwrap();
            assert!((explained.distance - distances[row]).abs() < 1e-12);
            assert_eq!(explained.contributions.len(), 3);
        }
    }

    #[test]
    fn test_explain_breakdown() {
        let table = table();
        let explained = explain_gower(&table, &table.row(0).unwrap(), 1).unwrap();
        assert_eq!(explained.contributions[0].range, 20.0);
        assert_eq!(explained.contributions[0].partial, 0.5);
        assert_eq!(explained.contributions[1].partial, 1.0);
        assert_eq!(explained.contributions[2].partial, 0.0);
        assert_eq!(explained.ranked()[0].column, "gender");
    }

    #[test]
    fn test_explain_row_out_of_bounds() {
        let table = table();
        assert!(matches!(
            explain_gower(&table, &table.row(0).unwrap(), 9),
            Err(Error::RowOutOfBounds { index: 9, len: 3 })
        ));
    }

    #[test]
    fn test_explain_serializes() {
        let table = table();
        let explained = explain_gower(&table, &table.row(0).unwrap(), 1).unwrap();
        let value = serde_json::to_value(&explained).unwrap();
        assert_eq!(value["row"], json!(1));
        assert_eq!(value["contributions"][1]["column"], json!("gender"));
        assert_eq!(value["contributions"][1]["kind"], json!("categorical"));
    }
}
