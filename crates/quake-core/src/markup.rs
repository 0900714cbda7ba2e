// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::popup::PopupContent;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Renders popup fields as the HTML fragment a web map would bind to a layer.
pub fn popup_html(popup: &PopupContent) -> String {
    let mut html = String::new();
    let title = match popup.glyph {
        Some(glyph) => format!("{} {}", glyph, popup.title),
        None => popup.title.clone(),
    };

    html.push_str("<div style=\"color: #1f2937; font-family: 'Segoe UI', sans-serif;\">");
    let _ = write!(
        html,
        "<h3 style=\"margin: 0 0 10px 0; color: {}; font-size: 16px;\">{}</h3>",
        encode_double_quoted_attribute(&popup.accent),
        encode_text(&title)
    );
    html.push_str("<div style=\"font-size: 14px; line-height: 1.5;\">");
    for field in &popup.fields {
        let _ = write!(
            html,
            "<strong>{}:</strong> {}<br>",
            encode_text(field.label),
            encode_text(&field.value)
        );
    }
    if let Some(note) = &popup.note {
        let _ = write!(html, "<br><em>{}</em>", encode_text(note));
    }
    html.push_str("</div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::popup::{affected_area_popup, tsunami_popup};

    #[test]
    fn test_fields_in_order() {
        let data = Dataset::kamchatka();
        let html = popup_html(&tsunami_popup(&data.tsunami_areas[0]));
        let height = html.find("Max Wave Height").unwrap();
        let level = html.find("Damage Level").unwrap();
        let status = html.find("Tsunami Warning Lifted").unwrap();
        assert!(height < level && level < status);
        assert!(html.contains("🌊 Avacha Bay"));
    }

    #[test]
    fn test_escapes_text() {
        let mut data = Dataset::kamchatka();
        data.affected_areas[0].name = "<script>alert(1)</script>".to_string();
        let html = popup_html(&affected_area_popup(&data.affected_areas[0]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("<em>Main city"));
    }
}
