use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

const WEDGE_PALETTE: &[&str] = &[
    "#f59e0b", "#3b82f6", "#10b981", "#ef4444", "#8b5cf6", "#f97316", "#06b6d4", "#84cc16",
    "#eab308", "#22c55e", "#dc2626", "#6366f1",
];

pub struct ThemeColors {
    pub wedges: Vec<Srgba<f64>>,
    pub label: Srgba<f64>,
    pub rim: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub hub_border: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub highlight: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            wedges: wedge_palette(),
            label: Srgba::new(0.07, 0.09, 0.15, 1.0),
            rim: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.9),
                Some(0.9),
            ),
            hub: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                Some(1.0),
            ),
            hub_border: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.9, 0.91, 0.92, 1.0),
                None,
            ),
            pointer: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                Some(1.0),
            ),
            highlight: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
        }
    }

    /// Fill for wedge `index`; the palette repeats around large wheels.
    pub fn wedge(&self, index: usize) -> Srgba<f64> {
        self.wedges[index % self.wedges.len()]
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

fn wedge_palette() -> Vec<Srgba<f64>> {
    let colors: Vec<_> = WEDGE_PALETTE
        .iter()
        .filter_map(|hex| hex.parse::<Srgb<u8>>().ok())
        .map(|c| c.into_format::<f64>().with_alpha(1.0))
        .collect();
    if colors.is_empty() {
        vec![Srgba::new(0.5, 0.5, 0.5, 1.0)]
    } else {
        colors
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spindle-window {
    background: none;
    background-color: transparent;
}
.spindle-panel {
    background-color: alpha(@theme_bg_color, 0.94);
    border-radius: 18px;
    padding: 18px;
}
.spindle-result {
    font-size: 1.6em;
    font-weight: bold;
}
.spindle-tag {
    border-radius: 999px;
    padding: 2px 4px 2px 10px;
    background-color: alpha(@theme_fg_color, 0.08);
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_parses_every_entry() {
        let colors = wedge_palette();
        assert_eq!(colors.len(), WEDGE_PALETTE.len());
        let first = colors[0];
        assert!((first.red - 0xf5 as f64 / 255.0).abs() < 1e-9);
        assert_eq!(first.alpha, 1.0);
    }
}
