//! Server-side HTML rendering of a [`DashboardView`].

use std::fmt::Write;

use rolescope_application::{DashboardView, RoleDisplay, RolePanel, UserResults};
use rolescope_domain::{RoleAssignment, RoleHeatmap, UserRecord};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;margin:1rem 0}\
th,td{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}\
.error{background:#fde2e1;color:#8a1c14;padding:.8rem}\
.info{background:#e6f0fb;color:#1b4f8a;padding:.8rem}\
td.cell{text-align:center;min-width:3rem}";

/// Lightest heatmap color, used for absent roles.
const HEAT_LOW: (u8, u8, u8) = (0xf7, 0xfb, 0xff);
/// Darkest heatmap color, used for assigned roles.
const HEAT_HIGH: (u8, u8, u8) = (0x08, 0x30, 0x6b);

pub fn render_page(view: &DashboardView) -> String {
    let mut html = String::new();
    let title = escape(&view.title);
    let _ = write!(
        html,
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title}</title>\
         <style>{STYLE}</style></head><body><h1>{title}</h1>"
    );

    if let Some(message) = &view.auth_error {
        let _ = write!(html, "<div class=\"error\">{}</div>", escape(message));
        html.push_str("</body></html>");
        return html;
    }

    render_search_form(&mut html, view);
    render_users(&mut html, view);
    render_roles(&mut html, &view.roles);

    html.push_str("</body></html>");
    html
}

fn view_param(view: RoleDisplay) -> &'static str {
    match view {
        RoleDisplay::Table => "table",
        RoleDisplay::Heatmap => "heatmap",
    }
}

fn render_search_form(html: &mut String, view: &DashboardView) {
    let query = escape(&view.query);
    let _ = write!(
        html,
        "<form method=\"get\" action=\"/\">\
         <label>Filter by name, email or principal name \
         <input type=\"text\" name=\"q\" value=\"{query}\"></label> \
         <select name=\"view\">\
         <option value=\"table\"{table}>Role table</option>\
         <option value=\"heatmap\"{heatmap}>Role heatmap</option>\
         </select> \
         <button type=\"submit\" name=\"search\" value=\"1\">Search</button></form>",
        table = selected_attr(view.role_display == RoleDisplay::Table),
        heatmap = selected_attr(view.role_display == RoleDisplay::Heatmap),
    );
}

fn selected_attr(selected: bool) -> &'static str {
    if selected { " selected" } else { "" }
}

fn render_users(html: &mut String, view: &DashboardView) {
    match &view.users {
        UserResults::NotRequested => {}
        UserResults::NoMatches => {
            html.push_str("<div class=\"info\">No user matches this filter.</div>");
        }
        UserResults::Rows(rows) => {
            html.push_str(
                "<table><thead><tr><th></th><th>Name</th><th>Email</th>\
                 <th>User principal name</th><th></th></tr></thead><tbody>",
            );
            for (index, record) in rows.iter().enumerate() {
                render_user_row(html, view, index, record);
            }
            html.push_str("</tbody></table>");
        }
    }
}

fn render_user_row(html: &mut String, view: &DashboardView, index: usize, record: &UserRecord) {
    let query = escape(&view.query);
    let view_name = view_param(view.role_display);
    let is_selected = view
        .selected_user
        .as_ref()
        .is_some_and(|user| user.as_str() == record.user_principal_name);

    let _ = write!(
        html,
        "<tr><td><form method=\"post\" action=\"/selection/row\">\
         <input type=\"hidden\" name=\"index\" value=\"{index}\">\
         <input type=\"hidden\" name=\"q\" value=\"{query}\">\
         <input type=\"hidden\" name=\"view\" value=\"{view_name}\">\
         <button type=\"submit\">{marker}</button></form></td>\
         <td>{name}</td><td>{mail}</td><td>{upn}</td><td>",
        marker = if is_selected { "&#9679;" } else { "&#9675;" },
        name = escape(&record.display_name),
        mail = escape(&record.mail),
        upn = escape(&record.user_principal_name),
    );

    if !record.user_principal_name.trim().is_empty() {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/selection\">\
             <input type=\"hidden\" name=\"upn\" value=\"{upn}\">\
             <input type=\"hidden\" name=\"q\" value=\"{query}\">\
             <input type=\"hidden\" name=\"view\" value=\"{view_name}\">\
             <button type=\"submit\">View roles</button></form>",
            upn = escape(&record.user_principal_name),
        );
    }
    html.push_str("</td></tr>");
}

fn render_roles(html: &mut String, panel: &RolePanel) {
    match panel {
        RolePanel::Hidden => {}
        RolePanel::NoRoles { user } => {
            let _ = write!(
                html,
                "<div class=\"info\">{} has no role assigned.</div>",
                escape(user.as_str())
            );
        }
        RolePanel::Table { user, assignments } => {
            let _ = write!(html, "<h2>Roles of {}</h2>", escape(user.as_str()));
            render_role_table(html, assignments);
        }
        RolePanel::Heatmap { user, heatmap } => {
            let _ = write!(
                html,
                "<h2>Role presence (selected: {})</h2>",
                escape(user.as_str())
            );
            render_heatmap(html, heatmap);
        }
    }
}

fn render_role_table(html: &mut String, assignments: &[RoleAssignment]) {
    html.push_str(
        "<table><thead><tr><th>Role</th><th>Resource</th><th>Assigned</th></tr></thead><tbody>",
    );
    for assignment in assignments {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(assignment.role_key()),
            escape(assignment.resource_display_name.as_deref().unwrap_or_default()),
            escape(assignment.created_date_time.as_deref().unwrap_or_default()),
        );
    }
    html.push_str("</tbody></table>");
}

fn render_heatmap(html: &mut String, heatmap: &RoleHeatmap) {
    html.push_str("<table class=\"heatmap\"><thead><tr><th>User</th>");
    for role in heatmap.roles() {
        let _ = write!(html, "<th>{}</th>", escape(role));
    }
    html.push_str("</tr></thead><tbody>");

    for row in heatmap.rows() {
        let _ = write!(
            html,
            "<tr><th>{}</th>",
            escape(row.user_principal_name.as_str())
        );
        for cell in &row.cells {
            let value = f64::from(*cell);
            let text_color = if value >= 0.5 { "#ffffff" } else { "#000000" };
            let _ = write!(
                html,
                "<td class=\"cell\" style=\"background:{};color:{text_color}\">{cell}</td>",
                heat_color(value)
            );
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>");
}

/// Linear interpolation between the low and high heatmap colors.
pub fn heat_color(intensity: f64) -> String {
    let intensity = intensity.clamp(0.0, 1.0);
    let channel = |low: u8, high: u8| -> u8 {
        let value = f64::from(low) + (f64::from(high) - f64::from(low)) * intensity;
        value.round().clamp(0.0, 255.0) as u8
    };

    format!(
        "#{:02x}{:02x}{:02x}",
        channel(HEAT_LOW.0, HEAT_HIGH.0),
        channel(HEAT_LOW.1, HEAT_HIGH.1),
        channel(HEAT_LOW.2, HEAT_HIGH.2),
    )
}

/// Escapes text for HTML element and attribute contexts.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
