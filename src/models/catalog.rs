use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreset {
    pub id: String,
    pub display_name: String,
    pub prompt_template: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub value: String,
    pub display_name: String,
}

impl StylePreset {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        prompt_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            prompt_template: prompt_template.into(),
        }
    }
}

impl SizeOption {
    pub fn new(value: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display_name: display_name.into(),
        }
    }
}

/// Immutable style and size tables handed to the workflow at construction.
///
/// Both tables are guaranteed non-empty; the first style is the fallback for
/// unknown ids and the first size is the initial selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    styles: Vec<StylePreset>,
    sizes: Vec<SizeOption>,
}

impl Catalog {
    /// Returns `None` when either table is empty.
    pub fn new(styles: Vec<StylePreset>, sizes: Vec<SizeOption>) -> Option<Self> {
        if styles.is_empty() || sizes.is_empty() {
            return None;
        }
        Some(Self { styles, sizes })
    }

    pub fn styles(&self) -> &[StylePreset] {
        &self.styles
    }

    pub fn sizes(&self) -> &[SizeOption] {
        &self.sizes
    }

    pub fn default_style(&self) -> &StylePreset {
        &self.styles[0]
    }

    pub fn default_size(&self) -> &SizeOption {
        &self.sizes[0]
    }

    pub fn find_style(&self, id: &str) -> Option<&StylePreset> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn find_size(&self, value: &str) -> Option<&SizeOption> {
        self.sizes.iter().find(|s| s.value == value)
    }

    /// Looks up a preset, falling back to the first entry for unknown ids.
    pub fn resolve_style(&self, id: &str) -> &StylePreset {
        self.find_style(id).unwrap_or_else(|| self.default_style())
    }

    /// Template first, then the user's text, separated by a single space.
    pub fn compose_prompt(&self, style_id: &str, user_prompt: &str) -> String {
        format!("{} {}", self.resolve_style(style_id).prompt_template, user_prompt)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            styles: default_styles(),
            sizes: default_sizes(),
        }
    }
}

const FAMILY_FRIENDLY: &str = "Please maintain a family-friendly style suitable for all audiences.";

fn template(specialty: &str, traits: &[&str]) -> String {
    let mut out = format!(
        "You are a master AI artist specializing in {}. Create images with:\n",
        specialty
    );
    for t in traits {
        out.push_str("- ");
        out.push_str(t);
        out.push('\n');
    }
    out.push_str(FAMILY_FRIENDLY);
    out
}

pub fn default_styles() -> Vec<StylePreset> {
    vec![
        StylePreset::new(
            "anime",
            "Anime",
            template(
                "creating stunning anime and manga-style illustrations",
                &[
                    "Vivid, eye-catching colors and dynamic lighting",
                    "Clean, precise linework and detailed character designs",
                    "Wide-angle perspective with a medium distance from the subject",
                    "Professional composition emphasizing depth and scale",
                    "Modern anime aesthetics with attention to highlights and shadows",
                    "Careful attention to proportions and anatomical accuracy",
                    "Balanced background elements that enhance the overall scene",
                    "Consistent focal length that maintains a cinematic wide field of view",
                ],
            ),
        ),
        StylePreset::new(
            "realistic",
            "Realistic",
            template(
                "creating photorealistic images",
                &[
                    "Natural lighting and true-to-life colors",
                    "High attention to detail and textures",
                    "Proper perspective and depth of field",
                    "Photographic composition principles",
                    "Realistic shadows and reflections",
                    "Accurate proportions and scale",
                    "Environmental context and atmosphere",
                    "Professional photography aesthetics",
                ],
            ),
        ),
        StylePreset::new(
            "watercolor",
            "Watercolor",
            template(
                "watercolor paintings",
                &[
                    "Soft, flowing colors with gentle transitions",
                    "Visible brush strokes and paper texture",
                    "Natural color bleeding and gradients",
                    "Light and airy composition",
                    "Translucent layers and washes",
                    "Loose, expressive style",
                    "Organic shapes and forms",
                ],
            ),
        ),
        StylePreset::new(
            "pixel-art",
            "Pixel Art",
            template(
                "pixel art",
                &[
                    "Clear pixel-by-pixel detail",
                    "Limited color palette",
                    "Sharp, distinct edges",
                    "Retro gaming aesthetic",
                    "Careful dithering and shading",
                    "Isometric or side-on perspective",
                    "Classic 8-bit or 16-bit style",
                ],
            ),
        ),
        StylePreset::new(
            "3d-render",
            "3D Render",
            template(
                "3D rendered images",
                &[
                    "Clean, polished 3D modeling",
                    "Professional material textures",
                    "Global illumination and ray-tracing effects",
                    "Realistic reflections and refractions",
                    "Proper depth of field",
                    "Modern CGI aesthetics",
                    "Physically accurate lighting",
                ],
            ),
        ),
    ]
}

pub fn default_sizes() -> Vec<SizeOption> {
    vec![
        SizeOption::new("1024x1024", "Square (1024x1024)"),
        SizeOption::new("1024x1792", "Portrait (1024x1792)"),
        SizeOption::new("1792x1024", "Landscape (1792x1024)"),
    ]
}
