//! Hand-written HTML pages. No templating engine; every piece of
//! user-supplied text passes through [`escape`].

use std::fmt::Write as _;

use medbuddy_core::store::Dashboard;

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title} · Medical Buddy</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
  )
}

pub fn index() -> String {
  layout(
    "Welcome",
    "<h1>Medical Buddy</h1>\n\
     <p>Keep track of your conditions, medications and appointments.</p>\n\
     <p><a href=\"/register\">Register</a> · <a href=\"/dashboard\">Dashboard</a></p>",
  )
}

pub fn register() -> String {
  layout(
    "Register",
    r#"<h1>Register</h1>
<form id="register">
  <label>Name <input name="name" required></label>
  <label>Email <input name="email" type="email" required></label>
  <label>Phone <input name="phone" required></label>
  <button type="submit">Register</button>
</form>
<script>
document.getElementById("register").addEventListener("submit", async (e) => {
  e.preventDefault();
  const body = Object.fromEntries(new FormData(e.target));
  const res = await fetch("/register", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify(body),
  });
  if (res.ok) window.location = "/dashboard";
});
</script>"#,
  )
}

pub fn dashboard(view: &Dashboard) -> String {
  let user = &view.user;
  let mut body = format!(
    "<h1>Hello, {}</h1>\n<p>{} · {}</p>\n",
    escape(&user.name),
    escape(&user.email),
    escape(&user.phone),
  );

  body.push_str("<h2>Medical records</h2>\n");
  if view.records.is_empty() {
    body.push_str("<p>No records yet.</p>\n");
  } else {
    body.push_str("<table>\n<tr><th>Condition</th><th>Medication</th><th>Added</th></tr>\n");
    for r in &view.records {
      let _ = writeln!(
        body,
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&r.condition),
        escape(&r.medication),
        r.date_added.to_rfc3339(),
      );
    }
    body.push_str("</table>\n");
  }

  body.push_str("<h2>Appointments</h2>\n");
  if view.appointments.is_empty() {
    body.push_str("<p>No appointments yet.</p>\n");
  } else {
    body.push_str("<table>\n<tr><th>Doctor</th><th>Date</th><th>Notes</th></tr>\n");
    for a in &view.appointments {
      let _ = writeln!(
        body,
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        escape(&a.doctor_name),
        escape(&a.appointment_date),
        escape(&a.notes),
      );
    }
    body.push_str("</table>\n");
  }

  layout("Dashboard", &body)
}
