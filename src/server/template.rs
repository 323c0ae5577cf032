//! Dashboard page rendering.
//! One static template, filled by plain string substitution; chart data
//! travels as an embedded JSON blob the page scripts read back.

pub struct HomeData {
    pub active_session: Option<String>,
    pub year_options: Vec<i32>,
    pub current_year: i32,
    pub payload: String,
}

pub fn render_home(data: &HomeData) -> String {
    let session_block = match &data.active_session {
        Some(activity) => format!(
            r#"<div class="instruction">Session for the activity <b>{}</b> is currently active.
  To start a new session click Stop first to end the current session.</div>
<form action="/sessions/end" method="get">
  <button type="submit" class="stop">Stop</button>
</form>"#,
            escape_html(activity)
        ),
        None => r#"<div class="instruction">Enter your activity name below and click Start to begin a new session.</div>
<form id="start-session-form">
  <input type="text" name="activity" placeholder="Enter activity name" required />
  <button type="submit">Start Session</button>
</form>"#
            .to_string(),
    };

    let year_options = data
        .year_options
        .iter()
        .map(|y| {
            let selected = if *y == data.current_year { " selected" } else { "" };
            format!(r#"<option value="{y}"{selected}>{y}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    HOME_PAGE
        .replace("__SESSION_BLOCK__", &session_block)
        .replace("__YEAR_OPTIONS__", &year_options)
        .replace("__PAYLOAD__", &escape_json_for_script(&data.payload))
}

/// Escape the characters that could terminate the surrounding `<script>`
/// element (or open a new one) from inside a JSON string value, e.g. an
/// activity named `</script>`. The `\uXXXX` forms are plain JSON string
/// escapes, so the parsed payload is unchanged.
fn escape_json_for_script(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const HOME_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>timeit</title>
  <style>
    body { font-family: sans-serif; background: #f3f4f6; }
    .card {
      background: #fff; padding: 30px 25px; border-radius: 12px;
      box-shadow: 0 4px 20px rgba(0, 0, 0, 0.2);
      max-width: 500px; display: flex; flex-direction: column;
      margin: 20px auto; align-items: center; gap: 20px;
    }
    .instruction { font-size: 15px; color: #444; line-height: 1.4; }
    input[type="text"] {
      padding: 10px 12px; border: 1px solid #ccc; border-radius: 8px; font-size: 16px;
    }
    button {
      background-color: #007bff; color: white; border: none; padding: 10px 16px;
      border-radius: 8px; font-size: 16px; cursor: pointer;
    }
    button.stop { background-color: red; width: 100%; margin-top: 9px; }
    .charts { display: flex; margin: auto; align-items: center; justify-content: center; gap: 24px; }
    #heatmap { margin: 30px auto; width: fit-content; }
    #heatmap table { border-collapse: collapse; }
    #heatmap td { width: 11px; height: 11px; border-radius: 2px; }
    .lvl0 { background: #ebedf0; } .lvl1 { background: #9be9a8; }
    .lvl2 { background: #40c463; } .lvl3 { background: #30a14e; }
    .lvl4 { background: #216e39; } .pad  { background: transparent; }
    #month-labels { position: relative; height: 16px; font-size: 11px; color: #555; }
    #month-labels span { position: absolute; }
  </style>
</head>
<body>
  <div class="card">
    <div id="user-action">
      __SESSION_BLOCK__
    </div>
  </div>

  <div class="card">
    <label for="year-select">Activity chart for year:</label>
    <select id="year-select">
      __YEAR_OPTIONS__
    </select>
    <div id="month-labels"></div>
    <div id="heatmap"></div>
  </div>

  <div class="charts">
    <div id="today"></div>
    <div id="currentyear_monthly"></div>
    <div id="over_the_years"></div>
  </div>

  <script src="https://cdn.jsdelivr.net/npm/apexcharts"></script>
  <script type="application/json" id="activity-data">__PAYLOAD__</script>
  <script>
    const tmplData = JSON.parse(document.getElementById("activity-data").textContent);

    const startForm = document.getElementById("start-session-form");
    if (startForm) {
      startForm.addEventListener("submit", function (event) {
        event.preventDefault();
        const activityName = encodeURIComponent(event.target.activity.value);
        window.location.href = "/sessions/start/" + activityName;
      });
    }

    function renderHeatmap(grid) {
      const labels = document.getElementById("month-labels");
      labels.innerHTML = grid.month_labels
        .map(m => `<span style="left:${m.pixel_offset}px">${m.name.slice(0, 3)}</span>`)
        .join("");

      const rows = [];
      for (let day = 0; day < 7; day++) {
        const cells = grid.weeks.map(week => {
          const d = week.days[day];
          if (!d.date) return `<td class="pad"></td>`;
          return `<td class="lvl${d.level}" title="${d.date}: ${d.total_hours.toFixed(2)} hrs"></td>`;
        });
        rows.push(`<tr>${cells.join("")}</tr>`);
      }
      document.getElementById("heatmap").innerHTML = `<table>${rows.join("")}</table>`;
    }

    renderHeatmap(tmplData.calendar);

    document.getElementById("year-select").addEventListener("change", function (event) {
      fetch("/summary?year=" + event.target.value)
        .then(resp => resp.json())
        .then(renderHeatmap);
    });

    new ApexCharts(document.querySelector("#today"), {
      chart: { height: 350, width: 300, type: "pie", animations: { enabled: false } },
      legend: { position: "bottom" },
      title: { text: "Time spent on activities today" },
      series: tmplData.todays_data.series,
      labels: tmplData.todays_data.labels
    }).render();

    new ApexCharts(document.querySelector("#currentyear_monthly"), {
      series: tmplData.monthly_data.series,
      chart: { type: "bar", height: 350, width: 600, stacked: true },
      plotOptions: { bar: { horizontal: true } },
      title: { text: tmplData.monthly_data.title },
      xaxis: {
        categories: ["January", "February", "March", "April", "May", "June", "July",
                     "August", "September", "October", "November", "December"],
        labels: { formatter: v => v + " hrs" }
      },
      legend: { position: "bottom" }
    }).render();

    new ApexCharts(document.querySelector("#over_the_years"), {
      chart: { height: 350, width: 450, type: "line", animations: { enabled: false } },
      stroke: tmplData.overall_data.stroke,
      title: { text: "Overall" },
      series: tmplData.overall_data.series,
      xaxis: { categories: tmplData.overall_data.categories }
    }).render();
  </script>
</body>
</html>
"##;
