//! Server-rendered index page.

use crate::model::attendance::{AttendanceEntry, DayAttendance};
use crate::model::face_status::FaceStatus;
use std::fmt::Write;

pub struct IndexView<'a> {
    pub status: &'a FaceStatus,
    pub notice: Option<&'a str>,
    /// Date as typed by the user, echoed back into the form
    pub selected_date: &'a str,
    pub attendance: Option<&'a DayAttendance<AttendanceEntry>>,
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl IndexView<'_> {
    pub fn render(&self) -> String {
        let mut body = String::new();

        if let Some(notice) = self.notice {
            let _ = write!(body, "<p class=\"notice\">{}</p>", escape(notice));
        }

        let _ = write!(
            body,
            "<h2>Status</h2><ul>\
<li>Face images: <strong>{}</strong></li>\
<li>Features extracted: <strong>{}</strong></li>\
</ul>",
            yes_no(self.status.has_images),
            yes_no(self.status.has_features),
        );

        if self.status.people.is_empty() {
            body.push_str("<p>No people registered yet.</p>");
        } else {
            body.push_str("<h3>Registered people</h3><ul class=\"people\">");
            for person in &self.status.people {
                let _ = write!(body, "<li>{}</li>", escape(person));
            }
            body.push_str("</ul>");
        }

        body.push_str(
            "<form method=\"post\" action=\"/start_register\">\
<button type=\"submit\">Register faces</button></form>\
<form method=\"post\" action=\"/start_attendance\">\
<button type=\"submit\">Start attendance</button></form>",
        );

        let date = escape(self.selected_date);
        let _ = write!(
            body,
            "<h2>Attendance</h2>\
<form method=\"post\" action=\"/attendance\">\
<input type=\"date\" name=\"selected_date\" value=\"{date}\" required>\
<button type=\"submit\">Show</button></form>"
        );

        match self.attendance {
            Some(DayAttendance::Found(rows)) => {
                body.push_str("<table><thead><tr><th>Name</th><th>Time</th></tr></thead><tbody>");
                for row in rows {
                    let _ = write!(
                        body,
                        "<tr><td>{}</td><td>{}</td></tr>",
                        escape(&row.name),
                        escape(&row.time)
                    );
                }
                body.push_str("</tbody></table>");
            }
            Some(DayAttendance::NoData) => {
                let _ = write!(
                    body,
                    "<p class=\"no-data\">No attendance data for {date}.</p>"
                );
            }
            None => {}
        }

        if !self.selected_date.is_empty() {
            let _ = write!(
                body,
                "<p><a href=\"/export?selected_date={date}\">Download CSV</a></p>"
            );
        }

        format!(
            "<!doctype html><html><head><meta charset=\"utf-8\">\
<title>Face Attendance</title></head>\
<body><h1>Face Attendance</h1>{body}</body></html>"
        )
    }
}
