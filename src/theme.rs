use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub sub_font_size: f32,
    pub title_size: f32,
    pub background: String,
    pub glow_color: String,
    pub title_color: String,
    pub sub_label_color: String,
    pub line_color: String,
    pub node_ring_color: String,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            sub_font_size: 11.0,
            title_size: 22.0,
            background: "#FFFFFF".to_string(),
            glow_color: "#E8EDFF".to_string(),
            title_color: "#1C2430".to_string(),
            sub_label_color: "#7A8AA6".to_string(),
            line_color: "#C7D2E5".to_string(),
            node_ring_color: "#FFFFFF".to_string(),
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            sub_font_size: 11.0,
            title_size: 22.0,
            background: "#0F1420".to_string(),
            glow_color: "#1B2340".to_string(),
            title_color: "#F2F5FF".to_string(),
            sub_label_color: "#8A94AD".to_string(),
            line_color: "#3A4663".to_string(),
            node_ring_color: "#0F1420".to_string(),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }
}
