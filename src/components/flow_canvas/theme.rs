//! Visual theming for the flow canvas.
//!
//! Provides colors, per-kind node accents and the styles for the grid,
//! edges, handles and minimap.

use crate::graph::NodeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * (1.0 - t) + other.r as f64 * t) as u8,
			g: (self.g as f64 * (1.0 - t) + other.g as f64 * t) as u8,
			b: (self.b as f64 * (1.0 - t) + other.b as f64 * t) as u8,
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Self> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 {
				return None;
			}
			let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
			return Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
		}
		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		if parts.len() < 3 {
			return None;
		}
		let r = parts[0].parse().ok()?;
		let g = parts[1].parse().ok()?;
		let b = parts[2].parse().ok()?;
		let a = match parts.get(3) {
			Some(a) => a.parse().ok()?,
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}
}

/// Accent color per node kind.
#[derive(Clone, Debug)]
pub struct KindPalette {
	pub input: Color,
	pub default: Color,
	pub output: Color,
}

impl KindPalette {
	pub fn get(&self, kind: NodeKind) -> Color {
		match kind {
			NodeKind::Input => self.input,
			NodeKind::Default => self.default,
			NodeKind::Output => self.output,
		}
	}

	pub fn set(&mut self, kind: NodeKind, color: Color) {
		match kind {
			NodeKind::Input => self.input = color,
			NodeKind::Default => self.default = color,
			NodeKind::Output => self.output = color,
		}
	}
}

/// Background fill and dot grid.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	pub dot_color: Color,
}

/// Node box style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub fill: Color,
	pub text: Color,
	/// Border of unselected nodes
	pub border: Color,
	/// Outline of the selected node
	pub selected_border: Color,
	/// Soft halo drawn under the selected node
	pub selected_glow: Color,
	pub handle: Color,
	/// Whether the accent color tints the box with a vertical gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Color of hovered/highlighted and focused edges
	pub highlight: Color,
	/// Line drawn while a connection is being dragged
	pub preview: Color,
}

/// Minimap overlay style.
#[derive(Clone, Debug)]
pub struct MinimapStyle {
	pub background: Color,
	pub border: Color,
	/// Tint of the area outside the viewport
	pub mask: Color,
	pub viewport_border: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
	pub minimap: MinimapStyle,
	pub palette: KindPalette,
}

impl Theme {
	/// Look a theme up by its configuration name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"light" => Some(Self::light()),
			"dark" => Some(Self::dark()),
			_ => None,
		}
	}

	/// Bright workspace look (default)
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(250, 250, 250),
				dot_color: Color::rgb(145, 145, 154),
			},
			node: NodeStyle {
				fill: Color::rgb(255, 255, 255),
				text: Color::rgb(34, 34, 34),
				border: Color::rgb(26, 25, 43),
				selected_border: Color::rgb(59, 130, 246),
				selected_glow: Color::rgba(59, 130, 246, 0.25),
				handle: Color::rgb(26, 25, 43),
				use_gradient: false,
			},
			edge: EdgeStyle {
				color: Color::rgb(177, 177, 183),
				highlight: Color::rgb(85, 85, 95),
				preview: Color::rgb(59, 130, 246),
			},
			minimap: MinimapStyle {
				background: Color::rgb(255, 255, 255),
				border: Color::rgba(0, 0, 0, 0.15),
				mask: Color::rgba(240, 240, 240, 0.6),
				viewport_border: Color::rgba(59, 130, 246, 0.8),
			},
			palette: KindPalette {
				input: Color::rgb(0, 137, 123),
				default: Color::rgb(94, 129, 172),
				output: Color::rgb(230, 81, 0),
			},
		}
	}

	/// Dark slate look
	pub fn dark() -> Self {
		Self {
			name: "dark",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				dot_color: Color::rgb(70, 78, 90),
			},
			node: NodeStyle {
				fill: Color::rgb(36, 42, 51),
				text: Color::rgb(230, 234, 240),
				border: Color::rgb(100, 110, 125),
				selected_border: Color::rgb(129, 161, 193),
				selected_glow: Color::rgba(129, 161, 193, 0.3),
				handle: Color::rgb(180, 190, 205),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.6),
				highlight: Color::rgb(200, 215, 230),
				preview: Color::rgb(129, 161, 193),
			},
			minimap: MinimapStyle {
				background: Color::rgb(30, 35, 42),
				border: Color::rgba(255, 255, 255, 0.1),
				mask: Color::rgba(15, 18, 24, 0.6),
				viewport_border: Color::rgba(129, 161, 193, 0.9),
			},
			palette: KindPalette {
				input: Color::rgb(100, 148, 160),
				default: Color::rgb(94, 129, 172),
				output: Color::rgb(180, 136, 100),
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::light()
	}
}
