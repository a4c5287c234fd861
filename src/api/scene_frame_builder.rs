use crate::core::primitives::date_to_unix_seconds;
use crate::core::project_polyline;
use crate::error::NarrativeResult;
use crate::render::{
    LinePrimitive, PolylinePrimitive, RenderFrame, TextHAlign, TextPrimitive, TextRole,
};
use crate::scene::{SceneFocus, SceneView};

use super::NarrativeConfig;
use super::axis_ticks::{time_ticks, value_ticks};

const TICK_LABEL_GAP_PX: f64 = 3.0;
const ANNOTATION_OFFSET_PX: f64 = 6.0;
// Annotations right of this share of the plot width flip to right-aligned.
const ANNOTATION_FLIP_RATIO: f64 = 0.6;

/// Converts a scene view into surface-pixel draw commands.
///
/// Pure: the same view and config always produce the same frame. Axes and
/// titles come first, then the trend line, then the annotation.
pub fn build_scene_frame(
    view: &SceneView,
    config: &NarrativeConfig,
) -> NarrativeResult<RenderFrame> {
    let layout = config.layout;
    let mut frame = RenderFrame::new(layout.surface());

    append_time_axis(&mut frame, view, config)?;
    append_value_axis(&mut frame, view, config)?;
    append_axis_titles(&mut frame, config);
    append_scene_title(&mut frame, view, config);

    let vertices = project_polyline(&view.trend_points(), view.x_domain, view.y_domain, layout)?;
    if !vertices.is_empty() {
        frame.polylines.push(PolylinePrimitive::new(
            vertices,
            config.style.trend_width_px,
            config.style.trend_color,
        ));
    }

    append_annotation(&mut frame, view, config)?;
    Ok(frame)
}

fn append_time_axis(
    frame: &mut RenderFrame,
    view: &SceneView,
    config: &NarrativeConfig,
) -> NarrativeResult<()> {
    let layout = config.layout;
    let style = config.style;
    let (left, bottom) = layout.to_surface(0.0, layout.plot_height());
    let right = left + layout.plot_width();

    frame.lines.push(LinePrimitive::new(
        left,
        bottom,
        right,
        bottom,
        style.axis_width_px,
        style.axis_color,
    ));

    let scale = view.x_domain.scale(layout.plot_width())?;
    for tick in time_ticks(view.x_domain, layout.plot_width(), config.time_tick_spacing_px) {
        let x = left + scale.domain_to_pixel(date_to_unix_seconds(tick.date))?;
        if style.tick_size_px > 0.0 {
            frame.lines.push(LinePrimitive::new(
                x,
                bottom,
                x,
                bottom + style.tick_size_px,
                style.axis_width_px,
                style.axis_color,
            ));
        }
        frame.texts.push(TextPrimitive::new(
            tick.label,
            x,
            bottom + style.tick_size_px + TICK_LABEL_GAP_PX + style.tick_font_size_px,
            style.tick_font_size_px,
            style.axis_color,
            TextHAlign::Center,
            TextRole::TickLabel,
        ));
    }
    Ok(())
}

fn append_value_axis(
    frame: &mut RenderFrame,
    view: &SceneView,
    config: &NarrativeConfig,
) -> NarrativeResult<()> {
    let layout = config.layout;
    let style = config.style;
    let (left, top) = layout.to_surface(0.0, 0.0);
    let bottom = top + layout.plot_height();

    frame.lines.push(LinePrimitive::new(
        left,
        top,
        left,
        bottom,
        style.axis_width_px,
        style.axis_color,
    ));

    let scale = view.y_domain.scale(layout.plot_height())?;
    for tick in value_ticks(view.y_domain, config.y_tick_count) {
        let y = top + scale.domain_to_pixel(tick.value)?;
        if style.tick_size_px > 0.0 {
            frame.lines.push(LinePrimitive::new(
                left - style.tick_size_px,
                y,
                left,
                y,
                style.axis_width_px,
                style.axis_color,
            ));
        }
        frame.texts.push(TextPrimitive::new(
            tick.label,
            left - style.tick_size_px - TICK_LABEL_GAP_PX,
            y + style.tick_font_size_px * 0.35,
            style.tick_font_size_px,
            style.axis_color,
            TextHAlign::Right,
            TextRole::TickLabel,
        ));
    }
    Ok(())
}

fn append_axis_titles(frame: &mut RenderFrame, config: &NarrativeConfig) {
    let layout = config.layout;
    let style = config.style;

    let (date_x, date_y) = layout.to_surface(
        layout.plot_width() / 2.0,
        layout.plot_height() + layout.margins.bottom - 10.0,
    );
    frame.texts.push(TextPrimitive::new(
        "Date",
        date_x,
        date_y,
        style.axis_title_font_size_px,
        style.axis_color,
        TextHAlign::Center,
        TextRole::AxisTitle,
    ));

    let (cases_x, cases_y) =
        layout.to_surface(-layout.margins.left + 15.0, layout.plot_height() / 2.0);
    frame.texts.push(
        TextPrimitive::new(
            "Daily Cases",
            cases_x,
            cases_y,
            style.axis_title_font_size_px,
            style.axis_color,
            TextHAlign::Center,
            TextRole::AxisTitle,
        )
        .rotated(-90.0),
    );
}

fn append_scene_title(frame: &mut RenderFrame, view: &SceneView, config: &NarrativeConfig) {
    let layout = config.layout;
    let style = config.style;
    let baseline = (layout.margins.top - 6.0).max(style.title_font_size_px);

    frame.texts.push(TextPrimitive::new(
        format!("{} ({}/{})", view.title, view.index + 1, view.scene_count),
        layout.margins.left,
        baseline,
        style.title_font_size_px,
        style.axis_color,
        TextHAlign::Left,
        TextRole::Title,
    ));

    if let SceneFocus::Region { selector } = &view.focus {
        if let Some(selected) = &selector.selected {
            frame.texts.push(TextPrimitive::new(
                format!("State: {selected}"),
                layout.margins.left + layout.plot_width(),
                baseline,
                style.title_font_size_px,
                style.axis_color,
                TextHAlign::Right,
                TextRole::Title,
            ));
        }
    }
}

fn append_annotation(
    frame: &mut RenderFrame,
    view: &SceneView,
    config: &NarrativeConfig,
) -> NarrativeResult<()> {
    let Some(annotation) = &view.annotation else {
        return Ok(());
    };
    let layout = config.layout;
    let style = config.style;

    let x_px = view.x_domain.date_to_pixel(annotation.date, layout.plot_width())?;
    let y_px = view.y_domain.scale(layout.plot_height())?.domain_to_pixel(annotation.value)?;

    let (h_align, dx) = if x_px > layout.plot_width() * ANNOTATION_FLIP_RATIO {
        (TextHAlign::Right, -ANNOTATION_OFFSET_PX)
    } else {
        (TextHAlign::Left, ANNOTATION_OFFSET_PX)
    };
    // Keep the baseline inside the plot so peaks at the top stay readable.
    let y = (y_px - ANNOTATION_OFFSET_PX).max(style.annotation_font_size_px);
    let (x, y) = layout.to_surface(x_px + dx, y);

    frame.texts.push(TextPrimitive::new(
        annotation.text.clone(),
        x,
        y,
        style.annotation_font_size_px,
        style.annotation_color,
        h_align,
        TextRole::Annotation,
    ));
    Ok(())
}
