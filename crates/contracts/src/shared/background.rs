use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Image,
    Video,
}

/// Пользовательский фон (data URI + прозрачность)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSettings {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub data: String,
    #[serde(default = "default_opacity")]
    pub opacity: u8,
}

fn default_opacity() -> u8 {
    100
}

impl BackgroundSettings {
    pub fn new(kind: BackgroundKind, data: impl Into<String>, opacity: u8) -> Self {
        Self {
            kind,
            data: data.into(),
            opacity: opacity.min(100),
        }
    }

    pub fn clamped(mut self) -> Self {
        self.opacity = self.opacity.min(100);
        self
    }

    pub fn with_opacity(self, opacity: i32) -> Self {
        Self {
            opacity: opacity.clamp(0, 100) as u8,
            ..self
        }
    }

    /// CSS opacity value, 0.0..=1.0
    pub fn css_opacity(&self) -> f64 {
        f64::from(self.opacity) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let s = BackgroundSettings::new(BackgroundKind::Video, "data:video/mp4;base64,AA", 40);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["opacity"], 40);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let s = BackgroundSettings::new(BackgroundKind::Image, "x", 250);
        assert_eq!(s.opacity, 100);
        assert_eq!(s.clone().with_opacity(-5).opacity, 0);
        assert_eq!(s.with_opacity(55).css_opacity(), 0.55);
    }
}
