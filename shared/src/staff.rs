use serde::{Deserialize, Serialize};

use crate::markup::push_escaped;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffRoster {
    #[serde(default)]
    pub roles: Vec<StaffRole>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffRole {
    pub role: String,
    #[serde(default)]
    pub members: Vec<StaffMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profile_image: String,
}

/// Markup for the staff directory: one section per role, one card per member.
/// Roles without members are skipped.
pub fn render_staff_roster(roster: &StaffRoster) -> String {
    let mut html = String::new();
    for role in roster.roles.iter().filter(|r| !r.members.is_empty()) {
        html.push_str(r#"<div class="staff-role"><h3 class="staff-role-title">"#);
        push_escaped(&mut html, &role.role);
        html.push_str(r#"</h3><div class="staff-grid">"#);
        for member in &role.members {
            render_member_card(&mut html, &role.role, member);
        }
        html.push_str("</div></div>");
    }
    html
}

fn render_member_card(html: &mut String, role: &str, member: &StaffMember) {
    html.push_str(r#"<div class="staff-card">"#);
    if member.profile_image.is_empty() {
        // Initial as avatar when no picture is set.
        html.push_str(r#"<div class="staff-avatar placeholder">"#);
        if let Some(initial) = member.name.chars().next() {
            push_escaped(html, &initial.to_uppercase().to_string());
        }
        html.push_str("</div>");
    } else {
        html.push_str(r#"<img class="staff-avatar" src=""#);
        push_escaped(html, &member.profile_image);
        html.push_str(r#"" alt=""#);
        push_escaped(html, &member.name);
        html.push_str(r#"" loading="lazy">"#);
    }
    html.push_str(r#"<h4 class="staff-name">"#);
    push_escaped(html, &member.name);
    html.push_str(r#"</h4><span class="staff-badge">"#);
    push_escaped(html, role);
    html.push_str("</span>");
    if !member.description.is_empty() {
        html.push_str(r#"<p class="staff-description">"#);
        push_escaped(html, &member.description);
        html.push_str("</p>");
    }
    html.push_str("</div>");
}
