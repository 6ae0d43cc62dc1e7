use super::script_json;
use crate::error::Result;
use crate::report::Report;

/// Render the `js/data.js` file read by a hand-written chart page:
///
/// ```js
/// const datasetsJS = { "alice": { "hornet": 5 } };
/// const colorMapJS = { "hornet": "#F26060" };
/// ```
pub fn render_data_script(report: &Report) -> Result<String> {
    let datasets = script_json(&report.collection.counts_by_dataset(), true)?;
    let colors = script_json(&report.color_map, true)?;
    Ok(format!(
        "const datasetsJS = {datasets};\nconst colorMapJS = {colors};\n"
    ))
}
