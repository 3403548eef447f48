use anyhow::Context;

use crate::net::Network;

/// Load a game-layer network from a square 0/1 adjacency matrix in CSV form.
/// Numeric cells are parsed, non-numeric header cells are skipped. The matrix
/// must be square, symmetric, with a zero diagonal.
pub fn load_adjacency_csv(path: &str) -> anyhow::Result<Network> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open adjacency CSV: {path}"))?;

    let mut matrix: Vec<Vec<f64>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<f64> = Vec::new();
        for field in record.iter() {
            if let Ok(v) = field.trim().parse::<f64>() {
                row.push(v);
            }
        }
        if !row.is_empty() {
            matrix.push(row);
        }
    }

    let n = matrix.len();
    anyhow::ensure!(n > 0, "adjacency matrix empty or unparsable");
    anyhow::ensure!(
        matrix.iter().all(|r| r.len() == n),
        "adjacency matrix must be square (n x n)"
    );

    let mut edges = Vec::new();
    for i in 0..n {
        anyhow::ensure!(matrix[i][i] == 0.0, "nonzero diagonal at node {i}");
        for j in (i + 1)..n {
            let v = matrix[i][j];
            anyhow::ensure!(v == 0.0 || v == 1.0, "entry ({i},{j}) must be 0 or 1 (got {v})");
            anyhow::ensure!(
                matrix[j][i] == v,
                "adjacency matrix must be symmetric (mismatch at ({i},{j}))"
            );
            if v == 1.0 {
                edges.push((i, j));
            }
        }
    }
    Network::from_edges(n, &edges)
}
