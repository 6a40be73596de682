use crate::value::{Record, Records};
use serde::{Deserialize, Serialize};

/// Where each region sits on the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Layout {
    /// `[x, y, id]` triples, in caller order.
    Triples(Vec<(u32, u32, String)>),
    /// Spreadsheet-style grid: one row per line, cells separated by `,` or
    /// tab, blank cells left empty on the map.
    Grid(String),
}

/// A placed region.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub id: String,
    pub x: u32,
    pub y: u32,
    /// Snapshot of the caller's record for this id, if there is one.
    pub data: Option<Record>,
}

impl Layout {
    /// Flatten to `(x, y, id)` placements. Grid layouts come out row-major.
    pub fn placements(&self) -> Vec<(u32, u32, String)> {
        match self {
            Layout::Triples(t) => t.clone(),
            Layout::Grid(text) => parse_grid(text),
        }
    }
}

fn parse_grid(text: &str) -> Vec<(u32, u32, String)> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = Vec::new();
    for (y, row) in normalized.split('\n').enumerate() {
        for (x, item) in row.split(['\t', ',']).enumerate() {
            let id = item.trim();
            if !id.is_empty() {
                out.push((x as u32, y as u32, id.to_string()));
            }
        }
    }
    out
}

/// Merge the layout with the region records into a list of cells.
pub fn prepare(layout: &Layout, records: &Records) -> Vec<Cell> {
    layout
        .placements()
        .into_iter()
        .map(|(x, y, id)| Cell {
            data: records.get(&id).cloned(),
            id,
            x,
            y,
        })
        .collect()
}

/// Record ids that have no cell in the layout. These are never drawn.
pub fn unplaced<'a>(cells: &[Cell], records: &'a Records) -> Vec<&'a str> {
    records
        .keys()
        .filter(|id| !cells.iter().any(|c| &c.id == *id))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn records() -> Records {
        let mut r = Records::new();
        let mut ny = Record::new();
        ny.insert("value".into(), Value::from("$4"));
        r.insert("NY".into(), ny);
        r.insert("GU".into(), Record::new());
        r
    }

    #[test]
    fn test_triples_keep_order() {
        let layout = Layout::Triples(vec![(2, 0, "NY".into()), (0, 1, "AL".into())]);
        let cells = prepare(&layout, &records());
        assert_eq!(cells[0].id, "NY");
        assert_eq!((cells[1].x, cells[1].y), (0, 1));
        assert!(cells[0].data.is_some());
        assert!(cells[1].data.is_none());
    }

    #[test]
    fn test_grid_skips_blank_cells() {
        let layout = Layout::Grid("AK,,ME\n\tNY\tVT".into());
        let placed = layout.placements();
        assert_eq!(
            placed,
            vec![
                (0, 0, "AK".to_string()),
                (2, 0, "ME".to_string()),
                (1, 1, "NY".to_string()),
                (2, 1, "VT".to_string()),
            ]
        );
    }

    #[test]
    fn test_grid_crlf_is_single_break() {
        let layout = Layout::Grid("AK\r\nME\rNY".into());
        let ys: Vec<u32> = layout.placements().iter().map(|p| p.1).collect();
        assert_eq!(ys, vec![0, 1, 2]);
    }

    #[test]
    fn test_unplaced_records_reported() {
        let layout = Layout::Triples(vec![(0, 0, "NY".into())]);
        let r = records();
        let cells = prepare(&layout, &r);
        assert_eq!(unplaced(&cells, &r), vec!["GU"]);
    }

    #[test]
    fn test_deserialize_both_forms() {
        let t: Layout = serde_json::from_str(r#"[[0,0,"AK"],[1,0,"ME"]]"#).unwrap();
        assert!(matches!(t, Layout::Triples(ref v) if v.len() == 2));
        let g: Layout = serde_json::from_str(r#""AK,ME""#).unwrap();
        assert_eq!(g.placements().len(), 2);
    }

    fn grid_text(cells: &BTreeSet<(u32, u32)>) -> String {
        let max_x = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_y = cells.iter().map(|c| c.1).max().unwrap_or(0);
        (0..=max_y)
            .map(|y| {
                (0..=max_x)
                    .map(|x| {
                        if cells.contains(&(x, y)) {
                            format!("R{x}_{y}")
                        } else {
                            String::new()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    proptest! {
        #[test]
        fn grid_and_triples_place_the_same_cells(
            cells in prop::collection::btree_set((0u32..12, 0u32..9), 1..40)
        ) {
            let triples = Layout::Triples(
                cells.iter().rev().map(|&(x, y)| (x, y, format!("R{x}_{y}"))).collect(),
            );
            let grid = Layout::Grid(grid_text(&cells));
            let a: BTreeSet<_> = triples.placements().into_iter().collect();
            let b: BTreeSet<_> = grid.placements().into_iter().collect();
            prop_assert_eq!(a, b);
        }
    }
}
