/// Render key/value rows as an aligned two-column table for the progress
/// printouts (config summary, cluster properties).
pub fn render(rows: &[(&'static str, String)]) -> String {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("  {key:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
