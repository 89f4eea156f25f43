//! Reference dataset: lecturer selection at STMIK Primakara.
//!
//! Four criteria, five lecturers, judgments on a three-decimal Saaty scale.
//! The "Pengabdian Masyarakat" matrix is not reciprocal in the source data
//! and is kept as recorded.

use std::collections::BTreeMap;

use super::{AhpError, ComparisonMatrix, Hierarchy};

pub const REFERENCE_GOAL: &str = "Menentukan Dosen Terbaik STMIK Primakara";

pub const REFERENCE_CRITERIA: [&str; 4] = [
    "Pendidikan",
    "Penelitian",
    "Pengabdian Masyarakat",
    "Kegiatan Penunjang",
];

pub const REFERENCE_ALTERNATIVES: [&str; 5] =
    ["Dosen A", "Dosen B", "Dosen C", "Dosen D", "Dosen E"];

/// Published criteria weights, nine decimals.
pub const EXPECTED_CRITERIA_WEIGHTS: [f64; 4] =
    [0.519410666, 0.200870008, 0.200870008, 0.078849319];

/// Published ranking as (name, score, rank), nine decimals.
pub const EXPECTED_RANKING: [(&str, f64, usize); 5] = [
    ("Dosen E", 0.212612471, 1),
    ("Dosen A", 0.204581431, 2),
    ("Dosen B", 0.204581431, 2),
    ("Dosen D", 0.203965566, 4),
    ("Dosen C", 0.174259100, 5),
];

const CRITERIA_ROWS: [[f64; 4]; 4] = [
    [1.000, 3.000, 3.000, 5.000],
    [0.333, 1.000, 1.000, 3.000],
    [0.333, 1.000, 1.000, 3.000],
    [0.200, 0.333, 0.333, 1.000],
];

const ALTERNATIVE_ROWS: [[[f64; 5]; 5]; 4] = [
    // Pendidikan
    [
        [1.000, 1.000, 1.000, 0.333, 0.333],
        [1.000, 1.000, 1.000, 0.333, 0.333],
        [1.000, 1.000, 1.000, 0.333, 0.333],
        [3.000, 3.000, 3.000, 1.000, 1.000],
        [3.000, 3.000, 3.000, 1.000, 1.000],
    ],
    // Penelitian
    [
        [1.000, 1.000, 1.000, 5.000, 3.000],
        [1.000, 1.000, 1.000, 5.000, 3.000],
        [1.000, 1.000, 1.000, 5.000, 3.000],
        [0.200, 0.200, 0.200, 1.000, 0.333],
        [0.333, 0.333, 0.333, 3.000, 1.000],
    ],
    // Pengabdian Masyarakat
    [
        [1.000, 1.000, 1.000, 5.000, 5.000],
        [1.000, 1.000, 1.000, 5.000, 5.000],
        [0.333, 0.333, 1.000, 3.000, 3.000],
        [0.200, 0.200, 0.333, 1.000, 1.000],
        [0.200, 0.200, 0.333, 1.000, 1.000],
    ],
    // Kegiatan Penunjang
    [
        [1.000, 1.000, 1.000, 5.000, 7.000],
        [1.000, 1.000, 1.000, 5.000, 7.000],
        [1.000, 1.000, 1.000, 5.000, 7.000],
        [0.200, 0.200, 0.200, 1.000, 3.000],
        [0.143, 0.143, 0.143, 0.333, 1.000],
    ],
];

/// Builds the reference hierarchy with its recorded judgments.
pub fn reference_hierarchy() -> Result<Hierarchy, AhpError> {
    let criteria_matrix = ComparisonMatrix::from_rows(to_rows(&CRITERIA_ROWS))?;

    let mut alternative_matrices = BTreeMap::new();
    for (criterion, rows) in REFERENCE_CRITERIA.iter().zip(ALTERNATIVE_ROWS.iter()) {
        alternative_matrices.insert(
            criterion.to_string(),
            ComparisonMatrix::from_rows(to_rows(rows))?,
        );
    }

    Hierarchy::from_parts(
        REFERENCE_GOAL.to_string(),
        owned(&REFERENCE_CRITERIA),
        owned(&REFERENCE_ALTERNATIVES),
        criteria_matrix,
        alternative_matrices,
    )
}

/// Same goal and names as the reference, with every judgment neutral.
pub fn default_hierarchy() -> Result<Hierarchy, AhpError> {
    Hierarchy::new(
        REFERENCE_GOAL,
        owned(&REFERENCE_CRITERIA),
        owned(&REFERENCE_ALTERNATIVES),
    )
}

fn to_rows<const N: usize>(rows: &[[f64; N]; N]) -> Vec<Vec<f64>> {
    rows.iter().map(|row| row.to_vec()).collect()
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
