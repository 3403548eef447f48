use anyhow::Context;

use crate::game::driver::RoundRecord;

/// Append one trial's round records to `<out_dir>/<tag>.csv`, creating the
/// file (with a header row) on first use. Independent trials with the same
/// tag accumulate rows in the same table.
pub fn append_round_records_csv(
    out_dir: impl AsRef<std::path::Path>,
    tag: &str,
    trial: u64,
    records: &[RoundRecord],
) -> anyhow::Result<std::path::PathBuf> {
    std::fs::create_dir_all(out_dir.as_ref()).context("create results dir failed")?;
    let path = out_dir.as_ref().join(format!("{tag}.csv"));
    let fresh = !path.exists();

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open results file failed (path={path:?})"))?;
    let mut wtr = csv::Writer::from_writer(file);

    if fresh {
        wtr.write_record([
            "trial",
            "round",
            "pre_game_density",
            "post_game_density",
            "negative_type_entries",
            "max_column_sum_dev",
            "out_of_range_p_c",
        ])?;
    }
    for r in records {
        wtr.write_record([
            trial.to_string(),
            r.round.to_string(),
            format!("{:.9}", r.pre_game_density),
            format!("{:.9}", r.post_game_density),
            r.negative_type_entries.to_string(),
            format!("{:.3e}", r.max_column_sum_dev),
            r.out_of_range_p_c.to_string(),
        ])?;
    }
    wtr.flush().context("flush results file failed")?;
    Ok(path)
}
