pub fn render_index(endpoint: &str) -> String {
    INDEX_HTML.replace("{{ENDPOINT}}", &escape_html(endpoint))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Rainfall Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #e9f1f5;
      --bg-2: #b9d6e4;
      --ink: #1f2a30;
      --accent: #2f7fb5;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #dcecf3 60%, #f2f7f9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #55606a;
      font-size: 1rem;
    }

    .filters {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
      align-items: end;
    }

    .filters label {
      display: grid;
      gap: 6px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d878f;
    }

    .filters input {
      border: 1px solid rgba(47, 72, 88, 0.18);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
      font-size: 1rem;
      text-transform: none;
      letter-spacing: normal;
      color: var(--ink);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat span {
      display: block;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d878f;
    }

    .stat .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      transition: transform 150ms ease, box-shadow 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-apply {
      background: var(--accent);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 127, 181, 0.3);
    }

    .btn-clear {
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    .chart-area {
      display: grid;
      gap: 16px;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    .chart-header h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      background: transparent;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.9rem;
      color: #5f6a72;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    #chart {
      width: 100%;
      height: 280px;
      display: block;
    }

    #chart text {
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--accent);
      opacity: 0.85;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    .chart-label {
      fill: #6f7a82;
      font-size: 11px;
    }

    .status {
      font-size: 0.95rem;
      color: #5f6a72;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .hint {
      margin: 0;
      color: #6f7a82;
      font-size: 0.9rem;
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Rainfall Dashboard</h1>
      <p class="subtitle">Rainfall records from <code>{{ENDPOINT}}</code>.</p>
    </header>

    <form id="filters" class="filters">
      <label>Start date <input type="datetime-local" name="startDate" step="1" /></label>
      <label>End date <input type="datetime-local" name="endDate" step="1" /></label>
      <label>Min rainfall <input type="number" name="minRainfall" step="any" min="0" /></label>
      <label>Max rainfall <input type="number" name="maxRainfall" step="any" min="0" /></label>
      <button class="btn-apply" type="submit">Apply</button>
      <button class="btn-clear" id="clear-btn" type="button">Clear filters</button>
    </form>

    <section class="panel" id="stats">
      <div class="stat"><span class="label">Highest</span><span class="value" id="stat-highest">--</span></div>
      <div class="stat"><span class="label">Lowest</span><span class="value" id="stat-lowest">--</span></div>
      <div class="stat"><span class="label">Mean</span><span class="value" id="stat-mean">--</span></div>
      <div class="stat"><span class="label">Median</span><span class="value" id="stat-median">--</span></div>
      <div class="stat"><span class="label">Std deviation</span><span class="value" id="stat-standard_deviation">--</span></div>
      <div class="stat"><span class="label">Range</span><span class="value" id="stat-range">--</span></div>
      <div class="stat"><span class="label">Records</span><span class="value" id="stat-total_count">--</span></div>
    </section>

    <section class="chart-area">
      <div class="chart-header">
        <h2 id="chart-title">Rainfall over time</h2>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-tab="line" role="tab" aria-selected="true">Over time</button>
          <button class="tab" type="button" data-tab="bars" role="tab" aria-selected="false">Value counts</button>
        </div>
      </div>
      <div class="chart-card">
        <svg id="chart" viewBox="0 0 600 280" aria-label="Rainfall chart" role="img"></svg>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">Equal min and max rainfall filters for one exact value. Statistics come from the data service when it provides them.</p>
  </main>

  <script>
    const form = document.getElementById('filters');
    const clearBtn = document.getElementById('clear-btn');
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');
    const chartTitleEl = document.getElementById('chart-title');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const statKeys = ['highest', 'lowest', 'mean', 'median', 'standard_deviation', 'range', 'total_count'];

    let view = null;
    let activeTab = 'line';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatValue = (value, decimals) => {
      if (typeof value !== 'number' || Number.isNaN(value)) {
        return '--';
      }
      return value.toFixed(decimals);
    };

    const renderStats = (statistics) => {
      statKeys.forEach((key) => {
        const el = document.getElementById(`stat-${key}`);
        const value = statistics ? statistics[key] : undefined;
        el.textContent = formatValue(value, key === 'total_count' ? 0 : 2);
      });
    };

    const axes = (min, max, width, height, paddingX, paddingY, top) => {
      const range = max - min;
      const y = (value) => height - paddingY - ((value - min) * (height - top - paddingY)) / range;
      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = min + (range * i) / 4;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${value.toFixed(1)}</text>`;
      }
      return { y, grid };
    };

    const renderLineChart = (records) => {
      const width = 600, height = 280, paddingX = 48, paddingY = 34, top = 20;
      const values = records.map((record) => record.value);
      let min = Math.min(0, ...values);
      let max = Math.max(...values);
      if (min === max) {
        max += 1;
      }
      const { y, grid } = axes(min, max, width, height, paddingX, paddingY, top);
      const xStep = records.length > 1 ? (width - paddingX * 2) / (records.length - 1) : 0;
      const x = (index) => paddingX + index * xStep;
      const path = records
        .map((record, index) => `${index === 0 ? 'M' : 'L'} ${x(index).toFixed(2)} ${y(record.value).toFixed(2)}`)
        .join(' ');
      const labelEvery = Math.max(1, Math.ceil(records.length / 6));
      const labels = records
        .map((record, index) => index % labelEvery !== 0 ? '' :
          `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${record.instant.slice(0, 10)}</text>`)
        .join('');
      chartEl.innerHTML = `${grid}<path class="chart-line" d="${path}" />${labels}`;
    };

    const renderBarChart = (counts) => {
      if (!counts.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No value counts</text>';
        return;
      }
      const width = 600, height = 280, paddingX = 48, paddingY = 34, top = 20;
      const max = Math.max(1, ...counts.map((bar) => bar.count));
      const { y, grid } = axes(0, max, width, height, paddingX, paddingY, top);
      const slot = (width - paddingX * 2) / counts.length;
      const bars = counts
        .map((bar, index) => {
          const x = paddingX + index * slot + slot * 0.1;
          return `<rect class="chart-bar" x="${x}" y="${y(bar.count)}" width="${slot * 0.8}" height="${y(0) - y(bar.count)}" />`;
        })
        .join('');
      const labelEvery = Math.max(1, Math.ceil(counts.length / 10));
      const labels = counts
        .map((bar, index) => index % labelEvery !== 0 ? '' :
          `<text class="chart-label" x="${paddingX + (index + 0.5) * slot}" y="${height - paddingY + 18}" text-anchor="middle">${formatValue(bar.value, 2)}</text>`)
        .join('');
      chartEl.innerHTML = `${grid}${bars}${labels}`;
    };

    const renderChart = () => {
      const hasData = view && view.records.length > 0;
      if (!hasData) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data</text>';
        return;
      }
      if (activeTab === 'bars') {
        chartTitleEl.textContent = 'Value counts';
        renderBarChart(view.value_counts);
      } else {
        chartTitleEl.textContent = 'Rainfall over time';
        renderLineChart(view.records);
      }
    };

    const renderView = (next) => {
      view = next;
      renderStats(view.statistics);
      renderChart();
      if (view.status === 'fetch_failed' || view.status === 'no_data') {
        setStatus(view.message || 'No data available', view.status === 'fetch_failed' ? 'error' : '');
      } else if (view.skipped > 0) {
        setStatus(`${view.skipped} unreadable records were left out.`, '');
      } else {
        setStatus('', '');
      }
    };

    const load = async (params) => {
      setStatus('Loading...', 'info');
      const res = await fetch(`/api/dashboard?${params.toString()}`);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      renderView(await res.json());
    };

    const formParams = () => {
      const params = new URLSearchParams();
      new FormData(form).forEach((value, key) => {
        if (String(value).trim() !== '') {
          params.append(key, value);
        }
      });
      return params;
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => {
        const isActive = button.dataset.tab === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      renderChart();
    };

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      load(formParams()).catch((err) => setStatus(err.message, 'error'));
    });

    clearBtn.addEventListener('click', () => {
      form.reset();
      load(new URLSearchParams()).catch((err) => setStatus(err.message, 'error'));
    });

    load(new URLSearchParams()).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_shows_escaped_endpoint() {
        let html = render_index("http://backend/data?a=1&b=<2>");
        assert!(html.contains("http://backend/data?a=1&amp;b=&lt;2&gt;"));
        assert!(!html.contains("{{ENDPOINT}}"));
    }

    #[test]
    fn bar_chart_guards_empty_counts() {
        let html = render_index("http://backend/data");
        assert!(html.contains("if (!counts.length)"));
    }

    #[test]
    fn index_has_filter_fields() {
        let html = render_index("http://backend/data");
        for name in ["startDate", "endDate", "minRainfall", "maxRainfall"] {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
    }
}
