use std::fmt::Write as _;

use crate::error::{NarrativeError, NarrativeResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign, TextRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SvgRenderStats {
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderer that serializes each frame into a standalone SVG document.
///
/// The latest document is kept in memory; hosts write it wherever they like.
#[derive(Debug)]
pub struct SvgRenderer {
    background: Color,
    document: String,
    last_stats: SvgRenderStats,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            document: String::new(),
            last_stats: SvgRenderStats::default(),
        }
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the most recent `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn last_stats(&self) -> SvgRenderStats {
        self.last_stats
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> NarrativeResult<()> {
        frame.validate()?;
        self.document = write_document(frame, self.background)?;
        self.last_stats = SvgRenderStats {
            lines_drawn: frame.lines.len(),
            polylines_drawn: frame.polylines.len(),
            texts_drawn: frame.texts.len(),
        };
        Ok(())
    }
}

fn write_document(frame: &RenderFrame, background: Color) -> NarrativeResult<String> {
    let mut svg = String::new();
    let width = frame.viewport.width;
    let height = frame.viewport.height;

    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
    .map_err(map_fmt_error)?;
    writeln!(
        svg,
        r#"  <rect width="100%" height="100%" fill="{}"/>"#,
        background.to_hex()
    )
    .map_err(map_fmt_error)?;

    for line in &frame.lines {
        writeln!(
            svg,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
            line.x1,
            line.y1,
            line.x2,
            line.y2,
            line.color.to_hex(),
            line.color.alpha,
            line.stroke_width
        )
        .map_err(map_fmt_error)?;
    }

    for polyline in &frame.polylines {
        let points = polyline
            .points
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            svg,
            r#"  <polyline class="trend" points="{points}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
            polyline.color.to_hex(),
            polyline.color.alpha,
            polyline.stroke_width
        )
        .map_err(map_fmt_error)?;
    }

    for text in &frame.texts {
        let anchor = match text.h_align {
            TextHAlign::Left => "start",
            TextHAlign::Center => "middle",
            TextHAlign::Right => "end",
        };
        let class = match text.role {
            TextRole::Title => "title",
            TextRole::TickLabel => "tick",
            TextRole::AxisTitle => "axis-label",
            TextRole::Annotation => "annotation",
        };
        let transform = if text.rotation_deg == 0.0 {
            String::new()
        } else {
            format!(
                r#" transform="rotate({}, {:.2}, {:.2})""#,
                text.rotation_deg, text.x, text.y
            )
        };
        writeln!(
            svg,
            r#"  <text class="{class}" x="{:.2}" y="{:.2}" font-size="{}" fill="{}" text-anchor="{anchor}"{transform}>{}</text>"#,
            text.x,
            text.y,
            text.font_size_px,
            text.color.to_hex(),
            escape_text(&text.text)
        )
        .map_err(map_fmt_error)?;
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn map_fmt_error(err: std::fmt::Error) -> NarrativeError {
    NarrativeError::InvalidData(format!("failed to write svg: {err}"))
}

#[cfg(test)]
mod tests {
    use super::{SvgRenderer, escape_text};
    use crate::core::{LineVertex, Viewport};
    use crate::render::{
        Color, PolylinePrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextRole,
    };

    #[test]
    fn document_contains_trend_and_rotated_label() {
        let frame = RenderFrame::new(Viewport::new(890, 470))
            .with_polyline(PolylinePrimitive::new(
                vec![LineVertex { x: 60.0, y: 420.0 }, LineVertex { x: 860.0, y: 20.0 }],
                1.5,
                Color::STEEL_BLUE,
            ))
            .with_text(
                TextPrimitive::new(
                    "Daily Cases",
                    15.0,
                    220.0,
                    12.0,
                    Color::BLACK,
                    TextHAlign::Center,
                    TextRole::AxisTitle,
                )
                .rotated(-90.0),
            );

        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render");
        let svg = renderer.document();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"points="60.00,420.00 860.00,20.00""#));
        assert!(svg.contains(r##"stroke="#4682b4""##));
        assert!(svg.contains("rotate(-90, 15.00, 220.00)"));
        assert!(svg.contains(">Daily Cases</text>"));
        assert_eq!(renderer.last_stats().polylines_drawn, 1);
    }

    #[test]
    fn label_text_is_escaped() {
        assert_eq!(escape_text("A & <B>"), "A &amp; &lt;B&gt;");
    }
}
