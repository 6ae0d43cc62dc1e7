//! Static pieces of the generated page: styles, chart theme colours and the
//! comparison script.

pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js@4";

/// Slice and bar outline colour (matches the page background).
pub const BORDER_COLOR: &str = "#1E0F0F";
pub const TEXT_COLOR: &str = "#F2E9DC";
pub const GRID_COLOR: &str = "rgba(242,233,220,0.2)";

/// `(fill, border)` for the first and second series of the comparison chart.
pub const COMPARE_FIRST: (&str, &str) = ("#F5C16C", "#C78F43");
pub const COMPARE_SECOND: (&str, &str) = ("#F2E9DC", "#CFC3AD");

pub const NOTE_NOTHING_IN_COMMON: &str = "Nothing in common between the two selected datasets.";
pub const NOTE_NOTHING_RECORDED: &str = "Selected dataset has nothing recorded.";

pub const STYLE: &str = r#"
        :root {
            --color-bg: #1e0f0f;
            --color-card: #2b1616;
            --color-border: #4a2a2a;
            --color-text: #f2e9dc;
            --color-text-muted: rgba(242, 233, 220, 0.7);
            --color-accent: #f5c16c;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
            background: var(--color-bg);
            color: var(--color-text);
            line-height: 1.6;
            padding: 2rem;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        h1 { font-size: 2rem; font-weight: 700; margin-bottom: 1.5rem; color: var(--color-accent); text-align: center; }
        h2 { font-size: 1.25rem; font-weight: 600; margin: 2rem 0 1rem; }
        .chart-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 1rem; }
        .chart-container { background: var(--color-card); border: 1px solid var(--color-border); border-radius: 0.5rem; padding: 1.25rem; }
        .chart-container h3 { font-size: 1.05rem; font-weight: 600; margin-bottom: 0.75rem; text-align: center; }
        .stats { margin-top: 0.75rem; font-size: 0.875rem; }
        .stats p { margin: 0.125rem 0; }
        .legend { list-style: none; display: flex; flex-wrap: wrap; gap: 0.5rem 1.25rem; margin-bottom: 1rem; font-size: 0.875rem; }
        .legend li { display: inline-flex; align-items: center; gap: 0.375rem; }
        .legend .swatch { width: 0.875rem; height: 0.875rem; border-radius: 0.2rem; border: 1px solid var(--color-border); }
        .empty { color: var(--color-text-muted); font-style: italic; }
        .compare-container { background: var(--color-card); border: 1px solid var(--color-border); border-radius: 0.5rem; padding: 1.25rem; }
        .compare-controls { display: flex; gap: 0.75rem; justify-content: center; margin-bottom: 1rem; flex-wrap: wrap; }
        .compare-controls select { background: var(--color-bg); color: var(--color-text); border: 1px solid var(--color-border); border-radius: 0.375rem; padding: 0.375rem 0.75rem; }
        .compare-note { display: block; text-align: center; margin-top: 8px; color: var(--color-text-muted); }
        .footer { margin-top: 2rem; padding-top: 1rem; border-top: 1px solid var(--color-border); font-size: 0.75rem; color: var(--color-text-muted); text-align: center; }
"#;

/// Re-computes the comparison chart when either `<select>` changes.
///
/// Expects `datasetsJS` and `labelNamesJS` to be defined and the chart to
/// already exist on `#compareChart`.
pub const COMPARE_SCRIPT: &str = r#"
(function () {
  const firstSel = document.getElementById('compareFirst');
  const secondSel = document.getElementById('compareSecond');
  const canvas = document.getElementById('compareChart');
  const note = document.querySelector('.compare-note');
  if (!firstSel || !secondSel || !canvas) return;
  const chart = Chart.getChart(canvas);
  if (!chart) return;

  function byCountThenLabel(count) {
    return (a, b) => (count(b) - count(a)) || (a < b ? -1 : a > b ? 1 : 0);
  }

  function update() {
    const a = firstSel.value;
    const b = secondSel.value;
    const da = a ? (datasetsJS[a] || {}) : null;
    const db = b ? (datasetsJS[b] || {}) : null;

    let labels = [];
    if (da && db) {
      labels = Object.keys(da).filter(l => db[l] !== undefined);
      labels.sort(byCountThenLabel(l => da[l] + db[l]));
    } else if (da || db) {
      const only = da || db;
      labels = Object.keys(only);
      labels.sort(byCountThenLabel(l => only[l]));
    }

    const series = [];
    if (a) series.push({ name: a, data: da, colors: FIRST_COLORS });
    if (b) series.push({ name: b, data: db, colors: SECOND_COLORS });

    chart.data.labels = labels.map(l => labelNamesJS[l] || l);
    chart.data.datasets = labels.length === 0 ? [] : series.map(s => ({
      label: s.name,
      data: labels.map(l => s.data[l] || 0),
      backgroundColor: s.colors[0],
      borderColor: s.colors[1],
      borderWidth: 1
    }));
    chart.update();

    if (note) {
      if (labels.length > 0 || (!a && !b)) note.textContent = '';
      else note.textContent = (a && b) ? NOTE_COMMON : NOTE_RECORDED;
    }
  }

  firstSel.addEventListener('change', update);
  secondSel.addEventListener('change', update);
})();
"#;
