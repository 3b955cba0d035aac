/// Linear RGB colour in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const GRAY: Color = Color::rgb8(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb8(211, 211, 211);
    pub const DODGER_BLUE: Color = Color::rgb8(30, 144, 255);
    pub const YELLOW: Color = Color::rgb8(255, 255, 0);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parses `#rrggbb`, `#rgb` or one of the named colours the plot uses.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "gray" | "grey" => Color::GRAY,
            "lightgray" | "lightgrey" => Color::LIGHT_GRAY,
            "dodgerblue" => Color::DODGER_BLUE,
            "yellow" => Color::YELLOW,
            _ => return None,
        };
        Some(named)
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// `#rrggbb`, as used by canvas fill styles.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<_>>()?;
    match digits.as_slice() {
        [r, g, b] => Some(Color::rgb8(r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some(Color::rgb8(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
        _ => None,
    }
}

/// Surface appearance. Unset colours fall back to the renderer's defaults.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub diffuse: Option<Color>,
    pub emissive: Option<Color>,
    pub ambient_intensity: Option<f32>,
    pub shininess: Option<f32>,
}

impl Material {
    pub fn diffuse(color: Color) -> Self {
        Self {
            diffuse: Some(color),
            emissive: None,
            ambient_intensity: None,
            shininess: None,
        }
    }

    pub fn emissive(color: Color) -> Self {
        Self {
            diffuse: None,
            emissive: Some(color),
            ambient_intensity: None,
            shininess: None,
        }
    }

    /// Colour used for flat rendering: emissive wins over diffuse.
    pub fn display_color(&self) -> Color {
        self.emissive.or(self.diffuse).unwrap_or(Color::GRAY)
    }
}
