//! Standalone HTML page with Chart.js charts.
//!
//! The page has three sections:
//! - one pie chart per dataset, with headline stats
//! - a colour legend, then one bar chart per label comparing datasets that recorded it
//! - a two-dataset comparison chart driven by `<select>` elements

use std::collections::BTreeMap;
use std::fmt::Write;

use serde_json::{json, Value};

use super::template::{
    BORDER_COLOR, CHART_JS_CDN, COMPARE_FIRST, COMPARE_SCRIPT, COMPARE_SECOND, GRID_COLOR,
    NOTE_NOTHING_IN_COMMON, NOTE_NOTHING_RECORDED, STYLE, TEXT_COLOR,
};
use super::{html_escape, script_json};
use crate::data::model::Dataset;
use crate::data::query::{compare, label_breakdown};
use crate::error::Result;
use crate::report::Report;

/// A chart to instantiate: canvas id and Chart.js configuration.
type ChartSpec = (String, Value);

/// Render the full page.
pub fn render_page(report: &Report) -> Result<String> {
    let mut out = String::new();
    let mut charts: Vec<ChartSpec> = Vec::new();

    write_head(&mut out, &report.title);
    out.push_str("<body>\n    <div class=\"container\">\n");
    let _ = writeln!(out, "        <h1>{}</h1>", html_escape(&report.title));

    write_dataset_section(&mut out, report, &mut charts);
    write_label_section(&mut out, report, &mut charts);
    write_compare_section(&mut out, report, &mut charts);

    let _ = writeln!(
        out,
        "        <div class=\"footer\">{} datasets, {} labels</div>",
        report.collection.len(),
        report.collection.labels().len()
    );
    out.push_str("    </div>\n");

    write_scripts(&mut out, report, &charts)?;
    out.push_str("</body>\n</html>\n");
    Ok(out)
}

fn write_head(out: &mut String, title: &str) {
    let _ = write!(
        out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{CHART_JS_CDN}"></script>
    <style>{STYLE}    </style>
</head>
"#,
        title = html_escape(title),
    );
}

// ---------------------------------------------------------------------------
// Per-dataset pie charts
// ---------------------------------------------------------------------------

fn write_dataset_section(out: &mut String, report: &Report, charts: &mut Vec<ChartSpec>) {
    out.push_str("        <h2>Datasets</h2>\n        <div id=\"datasetCharts\" class=\"chart-grid\">\n");

    for (i, ds) in report.collection.iter().enumerate() {
        let id = format!("pie{i}");
        let summary = ds.summary();
        let (top_label, top_count) = summary
            .top
            .as_ref()
            .map(|(label, count)| (report.display_label(label), *count))
            .unwrap_or_else(|| ("N/A".to_string(), 0));

        let _ = writeln!(
            out,
            r#"            <div class="chart-container">
                <h3>{name}</h3>
                <canvas id="{id}"></canvas>
                <div class="stats">
                    <p><b>Total:</b> {total}</p>
                    <p><b>Unique labels:</b> {unique}</p>
                    <p><b>Highest:</b> {top} ({top_count})</p>
                    <p><b>Average per label:</b> {average:.2}</p>
                </div>
            </div>"#,
            name = html_escape(&ds.name),
            total = summary.total,
            unique = summary.unique,
            top = html_escape(&top_label),
            average = summary.average,
        );

        charts.push((id, pie_config(report, ds)));
    }

    out.push_str("        </div>\n");
}

fn pie_config(report: &Report, ds: &Dataset) -> Value {
    let ranked = ds.ranked();
    let labels: Vec<String> = ranked.iter().map(|(l, _)| report.display_label(l)).collect();
    let values: Vec<u64> = ranked.iter().map(|&(_, c)| c).collect();
    let colors: Vec<&str> = ranked
        .iter()
        .map(|(l, _)| report.color_map.color_for(l))
        .collect();

    json!({
        "type": "pie",
        "data": {
            "labels": labels,
            "datasets": [{
                "data": values,
                "backgroundColor": colors,
                "borderColor": BORDER_COLOR,
                "borderWidth": 2
            }]
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": true,
            "plugins": { "legend": { "display": false } }
        }
    })
}

// ---------------------------------------------------------------------------
// Per-label bar charts
// ---------------------------------------------------------------------------

fn write_label_section(out: &mut String, report: &Report, charts: &mut Vec<ChartSpec>) {
    out.push_str("        <h2>Labels</h2>\n");
    write_legend(out, report);
    out.push_str("        <div id=\"labelCharts\" class=\"chart-grid\">\n");

    if report.collection.labels().is_empty() {
        out.push_str("            <p class=\"empty\">No labels recorded.</p>\n");
    }

    let mut i = 0;
    for label in report.collection.labels().iter() {
        let rows = label_breakdown(&report.collection, label);
        if rows.is_empty() {
            continue;
        }
        let id = format!("bar{i}");
        let display = report.display_label(label);

        let _ = writeln!(
            out,
            r#"            <div class="chart-container">
                <h3>{}</h3>
                <canvas id="{id}"></canvas>
            </div>"#,
            html_escape(&display),
        );

        let names: Vec<&str> = rows.iter().map(|&(n, _)| n).collect();
        let values: Vec<u64> = rows.iter().map(|&(_, c)| c).collect();
        let config = json!({
            "type": "bar",
            "data": {
                "labels": names,
                "datasets": [{
                    "label": display,
                    "data": values,
                    "backgroundColor": report.color_map.color_for(label),
                    "borderColor": BORDER_COLOR,
                    "borderWidth": 2
                }]
            },
            "options": {
                "responsive": true,
                "maintainAspectRatio": true,
                "plugins": { "legend": { "display": false } },
                "scales": axis_scales()
            }
        });
        charts.push((id, config));
        i += 1;
    }

    out.push_str("        </div>\n");
}

/// Swatch and name for every label, in colour-assignment order.
fn write_legend(out: &mut String, report: &Report) {
    let entries = report.color_map.legend_entries();
    if entries.is_empty() {
        return;
    }
    out.push_str("        <ul class=\"legend\">\n");
    for (label, color) in &entries {
        let _ = writeln!(
            out,
            r#"            <li><span class="swatch" style="background: {color}"></span>{}</li>"#,
            html_escape(&report.display_label(label)),
        );
    }
    out.push_str("        </ul>\n");
}

fn axis_scales() -> Value {
    json!({
        "y": {
            "beginAtZero": true,
            "ticks": { "color": TEXT_COLOR, "stepSize": 1 },
            "grid": { "color": GRID_COLOR }
        },
        "x": {
            "ticks": { "color": TEXT_COLOR },
            "grid": { "color": GRID_COLOR }
        }
    })
}

// ---------------------------------------------------------------------------
// Comparison chart
// ---------------------------------------------------------------------------

fn write_compare_section(out: &mut String, report: &Report, charts: &mut Vec<ChartSpec>) {
    let names: Vec<&str> = report.collection.names().collect();
    let first = names.first().copied();
    let second = names.get(1).copied().or(first);

    out.push_str("        <h2>Compare</h2>\n        <div class=\"compare-container\">\n");
    out.push_str("            <div class=\"compare-controls\">\n");
    write_select(out, "compareFirst", &names, first);
    write_select(out, "compareSecond", &names, second);
    out.push_str("            </div>\n");
    out.push_str("            <canvas id=\"compareChart\"></canvas>\n");

    let rows = compare(&report.collection, first, second);
    let note = match (first, second) {
        _ if !rows.is_empty() => "",
        (Some(_), Some(_)) => NOTE_NOTHING_IN_COMMON,
        (Some(_), None) | (None, Some(_)) => NOTE_NOTHING_RECORDED,
        (None, None) => "",
    };
    let _ = writeln!(out, "            <small class=\"compare-note\">{note}</small>");
    out.push_str("        </div>\n");

    let labels: Vec<String> = rows.iter().map(|r| report.display_label(&r.label)).collect();
    let mut series = Vec::new();
    if !rows.is_empty() {
        for (name, colors, counts) in [
            (first, COMPARE_FIRST, rows.iter().map(|r| r.first).collect::<Vec<_>>()),
            (second, COMPARE_SECOND, rows.iter().map(|r| r.second).collect::<Vec<_>>()),
        ] {
            if let Some(name) = name {
                series.push(json!({
                    "label": name,
                    "data": counts,
                    "backgroundColor": colors.0,
                    "borderColor": colors.1,
                    "borderWidth": 1
                }));
            }
        }
    }

    let config = json!({
        "type": "bar",
        "data": { "labels": labels, "datasets": series },
        "options": {
            "responsive": true,
            "maintainAspectRatio": true,
            "plugins": { "legend": { "labels": { "color": TEXT_COLOR } } },
            "scales": axis_scales()
        }
    });
    charts.push(("compareChart".to_string(), config));
}

fn write_select(out: &mut String, id: &str, names: &[&str], selected: Option<&str>) {
    let _ = writeln!(out, "                <select id=\"{id}\">");
    out.push_str("                    <option value=\"\">(none)</option>\n");
    for name in names {
        let attr = if Some(*name) == selected { " selected" } else { "" };
        let escaped = html_escape(name);
        let _ = writeln!(
            out,
            "                    <option value=\"{escaped}\"{attr}>{escaped}</option>"
        );
    }
    out.push_str("                </select>\n");
}

// ---------------------------------------------------------------------------
// Embedded data and chart instantiation
// ---------------------------------------------------------------------------

fn write_scripts(out: &mut String, report: &Report, charts: &[ChartSpec]) -> Result<()> {
    let label_names: BTreeMap<&str, String> = report
        .collection
        .labels()
        .iter()
        .map(|l| (l, report.display_label(l)))
        .collect();

    out.push_str("    <script>\n");
    let _ = writeln!(
        out,
        "const datasetsJS = {};",
        script_json(&report.collection.counts_by_dataset(), false)?
    );
    let _ = writeln!(out, "const colorMapJS = {};", script_json(&report.color_map, false)?);
    let _ = writeln!(out, "const labelNamesJS = {};", script_json(&label_names, false)?);
    let _ = writeln!(
        out,
        "const FIRST_COLORS = {};\nconst SECOND_COLORS = {};",
        script_json(&[COMPARE_FIRST.0, COMPARE_FIRST.1], false)?,
        script_json(&[COMPARE_SECOND.0, COMPARE_SECOND.1], false)?
    );
    let _ = writeln!(
        out,
        "const NOTE_COMMON = {};\nconst NOTE_RECORDED = {};",
        script_json(NOTE_NOTHING_IN_COMMON, false)?,
        script_json(NOTE_NOTHING_RECORDED, false)?
    );

    for (id, config) in charts {
        let _ = writeln!(
            out,
            "new Chart(document.getElementById({}), {});",
            script_json(id, false)?,
            script_json(config, false)?
        );
    }

    out.push_str(COMPARE_SCRIPT);
    out.push_str("    </script>\n");
    Ok(())
}
