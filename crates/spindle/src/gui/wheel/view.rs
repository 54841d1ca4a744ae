use super::{
    HUB_RADIUS, LABEL_FONT_SIZE, LABEL_RADIUS_FACTOR, POINTER_HALF_WIDTH, POINTER_LENGTH,
    REFERENCE_RADIUS, RIM_MARGIN,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use flywheel::{Point, Wheel, angle};
use palette::Srgba;
use std::f64::consts::{FRAC_PI_2, PI};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct WedgeRenderer<'a> {
    index: usize,
    count: usize,
    label: &'a str,
    radius: f64,
    current: bool,
}

impl WedgeRenderer<'_> {
    /// Draws into a context already translated to the wheel center and
    /// rotated by the wheel angle.
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (start, end) = angle::wedge_span(self.index, self.count);

        cr.move_to(0.0, 0.0);
        cr.arc(0.0, 0.0, self.radius, start, end);
        cr.close_path();
        set_color(cr, colors.wedge(self.index));
        cr.fill_preserve()?;

        if self.current {
            set_color(cr, colors.highlight);
            cr.set_line_width(3.0);
            cr.stroke()?;
        } else {
            cr.new_path();
        }

        self.draw_label(cr, colors, (start + end) / 2.0)
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors, mid: f64) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.rotate(mid);
        cr.translate(self.radius * LABEL_RADIUS_FACTOR, 0.0);
        // text runs tangentially, reading outward from the hub
        cr.rotate(FRAC_PI_2);

        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE * self.radius / REFERENCE_RADIUS);
        if let Ok(ext) = cr.text_extents(self.label) {
            cr.move_to(
                -(ext.x_bearing() + ext.width() / 2.0),
                -(ext.y_bearing() + ext.height() / 2.0),
            );
            cr.show_text(self.label)?;
        }
        cr.restore()
    }
}

pub fn draw(cr: &Context, wheel: &Wheel, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = wheel.center();
    let radius = (center.x.min(center.y) - RIM_MARGIN - POINTER_LENGTH / 2.0).max(0.0);
    if radius <= HUB_RADIUS {
        return Ok(());
    }

    draw_rim(cr, center, radius, colors)?;

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(wheel.angle());

    let wedges = wheel.wedges();
    let current = wheel.current_index();
    for (i, label) in wedges.iter().enumerate() {
        WedgeRenderer {
            index: i,
            count: wedges.len(),
            label: label.as_str(),
            radius,
            current: current == Some(i),
        }
        .draw(cr, colors)?;
    }

    draw_hub(cr, colors)?;
    cr.restore()?;

    draw_pointer(cr, center, radius, wheel.pointer().radians(), colors)
}

fn draw_rim(
    cr: &Context,
    center: Point,
    radius: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.rim);
    cr.arc(center.x, center.y, radius + RIM_MARGIN, 0.0, 2.0 * PI);
    cr.fill()
}

fn draw_hub(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.arc(0.0, 0.0, HUB_RADIUS, 0.0, 2.0 * PI);
    set_color(cr, colors.hub);
    cr.fill_preserve()?;
    set_color(cr, colors.hub_border);
    cr.set_line_width(2.0);
    cr.stroke()
}

/// Triangle outside the rim, tip pointing at the center.
fn draw_pointer(
    cr: &Context,
    center: Point,
    radius: f64,
    direction: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let tip = center.offset(direction, radius - POINTER_LENGTH / 2.0);
    let base = center.offset(direction, radius + POINTER_LENGTH / 2.0);
    let left = base.offset(direction - FRAC_PI_2, POINTER_HALF_WIDTH);
    let right = base.offset(direction + FRAC_PI_2, POINTER_HALF_WIDTH);

    cr.move_to(tip.x, tip.y);
    cr.line_to(left.x, left.y);
    cr.line_to(right.x, right.y);
    cr.close_path();
    set_color(cr, colors.pointer);
    cr.fill()
}
