use std::sync::Arc;

use fukidashi::{
    BackgroundSystem,
    fontdb::{self, Family, Query},
    geometry::Color,
    measure::{FontMeasure, TextMeasure},
    style::{Alignment, OutlineStyle, StyleConfig},
    surface::CpuSurface,
    text::{Paragraph, ParagraphConfig},
};
use image::{Rgba, RgbaImage};

const TEXT: &str = "Stepped backgrounds\n\
                    hug every line of text\n\
                    short one\n\
                    and blend the steps with rounded joins.";
const FONT_SIZE: f32 = 28.0;
const MARGIN: f32 = 24.0;
const WIDTH: u32 = 640;

fn pick_system_font(system: &BackgroundSystem) -> Option<(fontdb::ID, Arc<fontdue::Font>)> {
    system.load_system_fonts();

    const FAMILIES: &[Family<'_>] = &[Family::SansSerif];
    let query = Query {
        families: FAMILIES,
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    system.query(&query).or_else(|| {
        let id = system.faces().first()?.id;
        system.font(id).map(|font| (id, font))
    })
}

/// Blends the glyphs of every line in white on top of the backgrounds.
fn draw_text(
    image: &mut RgbaImage,
    paragraph: &Paragraph<'_>,
    font: &fontdue::Font,
    measure: &FontMeasure,
    alignment: Alignment,
) {
    for line in &paragraph.lines {
        let Some(text) = line.slice() else { continue };
        let width = measure.text_width(text).unwrap_or(0.0);
        let mut pen_x = MARGIN
            + match alignment {
                Alignment::Start => 0.0,
                Alignment::Center => (line.right - width) / 2.0,
                Alignment::End => line.right - width,
            };

        for ch in text.chars() {
            let (metrics, coverage) = font.rasterize(ch, measure.font_size());
            let origin_x = pen_x.round() as i64 + metrics.xmin as i64;
            let origin_y = (MARGIN + line.baseline).round() as i64
                - metrics.height as i64
                - metrics.ymin as i64;

            for (i, &c) in coverage.iter().enumerate() {
                let x = origin_x + (i % metrics.width.max(1)) as i64;
                let y = origin_y + (i / metrics.width.max(1)) as i64;
                let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                    continue;
                };
                let Some(Rgba(px)) = image.get_pixel_mut_checked(x, y) else {
                    continue;
                };
                let alpha = c as u32;
                for channel in &mut px[..3] {
                    *channel = ((255 * alpha + *channel as u32 * (255 - alpha)) / 255) as u8;
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

#[allow(clippy::unwrap_used)]
fn main() {
    let system = BackgroundSystem::new();
    let Some((font_id, font)) = pick_system_font(&system) else {
        eprintln!("no system fonts found; nothing to render");
        return;
    };
    let measure = system.font_measure(font_id, FONT_SIZE).unwrap();
    let metrics = measure.line_metrics().unwrap();

    let container = WIDTH as f32 - 2.0 * MARGIN;
    let config = ParagraphConfig {
        right: container,
        max_width: Some(container),
        ..Default::default()
    };
    let paragraph = Paragraph::layout(TEXT, metrics, &config, &measure);
    let height = (paragraph.total_height + 2.0 * MARGIN).ceil() as u32;

    println!(
        "Layout: lines={} total_height={}",
        paragraph.lines.len(),
        paragraph.total_height
    );

    let variants = [
        ("start", Alignment::Start, false),
        ("center", Alignment::Center, false),
        ("end", Alignment::End, false),
        ("outline", Alignment::Center, true),
    ];

    for (name, alignment, outlined) in variants {
        if outlined {
            system.set_outline_style(OutlineStyle {
                outer_color: Color::WHITE,
                inner_color: Color::rgba(0.1, 0.1, 0.1, 1.0),
                inner_padding: 8.0,
                outer_padding: 11.0,
                corner_radius: 10.0,
                alignment,
            });
        } else {
            system.set_fill_style(
                StyleConfig::default()
                    .with_fill_color(Color::rgba(0.15, 0.35, 0.85, 0.9))
                    .with_padding(10.0)
                    .with_corner_radius(10.0)
                    .with_alignment(alignment),
            );
        }
        system.text_changed();

        let mut surface = CpuSurface::new(WIDTH, height)
            .unwrap()
            .with_translation(MARGIN, MARGIN);
        surface.clear(Color::rgba(0.95, 0.95, 0.92, 1.0));

        let timer = std::time::Instant::now();
        let report = system.render_pass(&mut surface, &paragraph.lines, &measure);
        let elapsed = timer.elapsed();

        let mut image = RgbaImage::from_raw(WIDTH, height, surface.to_rgba8()).unwrap();
        draw_text(&mut image, &paragraph, &font, &measure, alignment);

        let file = format!("step_background_{name}.png");
        image.save(&file).unwrap();

        println!(
            "{file}: painted={} skipped={} (elapsed: {:.2?})",
            report.painted,
            report.failures.len(),
            elapsed
        );
    }
}
