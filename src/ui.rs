use crate::models::Goal;

pub fn render_index(goals: &[Goal]) -> String {
    let rows = if goals.is_empty() {
        r#"<p class="empty">No goals yet. Add your first one.</p>"#.to_string()
    } else {
        let cards: String = goals.iter().map(goal_card).collect();
        format!(r#"<div class="grid">{cards}</div>"#)
    };
    layout("My Goals", &fill(INDEX_HTML, &[("GOALS", rows.as_str())]))
}

pub fn render_goal(goal: &Goal) -> String {
    let body = fill(
        GOAL_HTML,
        &[
            ("IMAGE", image_tag(goal).as_str()),
            ("TYPE", escape(&goal.goal_type).as_str()),
            ("DESCRIPTION", escape(&goal.description).as_str()),
            ("DAYS", goal.target_days.to_string().as_str()),
            ("PERCENT", goal.percentage_of_achievement.to_string().as_str()),
            ("ID", goal.goal_id.to_string().as_str()),
        ],
    );
    layout(&goal.goal_type, &body)
}

pub fn render_add_goal() -> String {
    let form = fill(
        GOAL_FORM_HTML,
        &[
            ("ACTION", "/addGoal"),
            ("HEADING", "Add Goal"),
            ("CURRENT_IMAGE", ""),
            ("TYPE", ""),
            ("DESCRIPTION", ""),
            ("DAYS", ""),
            ("PERCENT", ""),
            ("SUBMIT", "Add goal"),
        ],
    );
    layout("Add Goal", &form)
}

pub fn render_update_goal(goal: &Goal) -> String {
    let current = match &goal.image {
        Some(_) => format!(
            r#"<div class="current"><span class="label">Current image</span>{}</div>"#,
            image_tag(goal)
        ),
        None => String::new(),
    };
    let form = fill(
        GOAL_FORM_HTML,
        &[
            ("ACTION", format!("/updateGoal/{}", goal.goal_id).as_str()),
            ("HEADING", "Update Goal"),
            ("CURRENT_IMAGE", current.as_str()),
            ("TYPE", escape(&goal.goal_type).as_str()),
            ("DESCRIPTION", escape(&goal.description).as_str()),
            ("DAYS", goal.target_days.to_string().as_str()),
            ("PERCENT", goal.percentage_of_achievement.to_string().as_str()),
            ("SUBMIT", "Save changes"),
        ],
    );
    layout("Update Goal", &form)
}

pub fn render_contact() -> String {
    layout("Contact", CONTACT_HTML)
}

pub fn render_bmi() -> String {
    layout("BMI Calculator", BMI_HTML)
}

fn goal_card(goal: &Goal) -> String {
    format!(
        r#"<article class="card">
  {image}
  <h2>{goal_type}</h2>
  <p>{description}</p>
  <div class="meta"><span>{days} days</span><span>{percent}% achieved</span></div>
  <nav class="links">
    <a href="/goal/{id}">View</a>
    <a href="/updateGoal/{id}">Edit</a>
    <a class="danger" href="/deleteGoal/{id}" onclick="return confirm('Delete this goal?')">Delete</a>
  </nav>
</article>"#,
        image = image_tag(goal),
        goal_type = escape(&goal.goal_type),
        description = escape(&goal.description),
        days = goal.target_days,
        percent = goal.percentage_of_achievement,
        id = goal.goal_id,
    )
}

fn image_tag(goal: &Goal) -> String {
    match &goal.image {
        Some(image) => format!(
            r#"<img src="/images/{}" alt="{}" />"#,
            escape(image),
            escape(&goal.goal_type)
        ),
        None => String::new(),
    }
}

fn layout(title: &str, body: &str) -> String {
    fill(LAYOUT_HTML, &[("TITLE", escape(title).as_str()), ("BODY", body)])
}

/// Substitutes `{{KEY}}` placeholders in one pass over `template`, so
/// substituted values are never scanned again. Unknown keys are left as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .top {
      display: flex;
      gap: 18px;
      justify-content: center;
      margin-bottom: 24px;
    }

    .top a {
      color: var(--accent-2);
      font-weight: 600;
      text-decoration: none;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .card h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    img {
      width: 100%;
      max-height: 220px;
      object-fit: cover;
      border-radius: 12px;
    }

    .meta,
    .links {
      display: flex;
      gap: 12px;
      color: #8b857d;
      font-size: 0.9rem;
    }

    .links a {
      color: var(--accent-2);
      font-weight: 600;
    }

    .links a.danger {
      color: var(--accent);
    }

    .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    form {
      display: grid;
      gap: 14px;
    }

    input,
    textarea {
      width: 100%;
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font: inherit;
    }

    button,
    .button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
      text-decoration: none;
      text-align: center;
      box-shadow: 0 10px 24px rgba(255, 107, 74, 0.3);
    }

    .empty,
    .status {
      color: #5f5c57;
    }

    .status.error {
      color: #c0392b;
    }
  </style>
</head>
<body>
  <nav class="top">
    <a href="/">Goals</a>
    <a href="/addGoal">Add goal</a>
    <a href="/bmi">BMI</a>
    <a href="/contact">Contact</a>
  </nav>
  <main class="app">
{{BODY}}
  </main>
</body>
</html>
"#;

const INDEX_HTML: &str = r#"<header>
  <h1>My Goals</h1>
</header>
{{GOALS}}
<a class="button" href="/addGoal">Add a goal</a>"#;

const GOAL_HTML: &str = r#"<header>
  <h1>{{TYPE}}</h1>
</header>
{{IMAGE}}
<p>{{DESCRIPTION}}</p>
<div class="meta">
  <span>Target: {{DAYS}} days</span>
  <span>Achieved: {{PERCENT}}%</span>
</div>
<nav class="links">
  <a href="/updateGoal/{{ID}}">Edit</a>
  <a class="danger" href="/deleteGoal/{{ID}}">Delete</a>
  <a href="/">Back</a>
</nav>"#;

const GOAL_FORM_HTML: &str = r#"<header>
  <h1>{{HEADING}}</h1>
</header>
<form action="{{ACTION}}" method="POST" enctype="multipart/form-data">
  <label><span class="label">Goal type</span>
    <input name="goal_type" value="{{TYPE}}" required /></label>
  <label><span class="label">Description</span>
    <textarea name="description" rows="3" required>{{DESCRIPTION}}</textarea></label>
  <label><span class="label">Target days</span>
    <input name="target_days" type="number" min="0" value="{{DAYS}}" required /></label>
  <label><span class="label">Achievement (%)</span>
    <input name="percentage_of_achievement" type="number" step="any" min="0" value="{{PERCENT}}" required /></label>
  {{CURRENT_IMAGE}}
  <label><span class="label">Image</span>
    <input name="image" type="file" accept="image/*" /></label>
  <button type="submit">{{SUBMIT}}</button>
</form>"#;

const CONTACT_HTML: &str = r#"<header>
  <h1>Contact</h1>
</header>
<form action="/contact" method="POST">
  <label><span class="label">Name</span><input name="name" /></label>
  <label><span class="label">Email</span><input name="email" type="email" /></label>
  <label><span class="label">Message</span><textarea name="message" rows="4"></textarea></label>
  <button type="submit">Send</button>
</form>"#;

const BMI_HTML: &str = r#"<header>
  <h1>BMI Calculator</h1>
</header>
<form id="bmi-form">
  <label><span class="label">Weight (kg)</span><input name="weight" type="number" step="any" /></label>
  <label><span class="label">Height (cm)</span><input name="height" type="number" step="any" /></label>
  <button type="submit">Calculate</button>
</form>
<p class="status" id="result"></p>
<script>
  const form = document.getElementById('bmi-form');
  const result = document.getElementById('result');

  form.addEventListener('submit', async (event) => {
    event.preventDefault();
    const res = await fetch('/calculateBMI', {
      method: 'POST',
      headers: { 'content-type': 'application/x-www-form-urlencoded' },
      body: new URLSearchParams(new FormData(form))
    });
    const data = await res.json();
    if (!res.ok) {
      result.className = 'status error';
      result.textContent = data.error;
      return;
    }
    result.className = 'status';
    result.textContent = `Your BMI is ${data.bmi} (${data.category})`;
  });
</script>"#;
