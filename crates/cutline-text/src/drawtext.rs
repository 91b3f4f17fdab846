//! Compile text overlays to the backend's `drawtext` filter.

use cutline_core::{fmt_num, Filter, FilterChain};
use tracing::debug;

use crate::animation::{TextAnimation, TextAnimationType};
use crate::color::Rgb;
use crate::overlay::{TextAlign, TextOverlay, TextStyle, VerticalAlign};

fn font_pattern(style: &TextStyle) -> String {
    let bold = style.font_weight >= 600;
    match (bold, style.italic) {
        (false, false) => style.font_family.clone(),
        (true, false) => format!("{}:style=Bold", style.font_family),
        (false, true) => format!("{}:style=Italic", style.font_family),
        (true, true) => format!("{}:style=Bold Italic", style.font_family),
    }
}

fn x_expr(overlay: &TextOverlay, canvas_w: u32) -> String {
    let px = fmt_num(overlay.position.x / 100.0 * f64::from(canvas_w));
    match overlay.position.align {
        TextAlign::Left => px,
        TextAlign::Center => format!("{px}-text_w/2"),
        TextAlign::Right => format!("{px}-text_w"),
    }
}

fn y_expr(overlay: &TextOverlay, canvas_h: u32) -> String {
    let py = fmt_num(overlay.position.y / 100.0 * f64::from(canvas_h));
    match overlay.position.vertical_align {
        VerticalAlign::Top => py,
        VerticalAlign::Middle => format!("{py}-text_h/2"),
        VerticalAlign::Bottom => format!("{py}-text_h"),
    }
}

fn fades(anim: Option<TextAnimation>) -> Option<TextAnimation> {
    let anim = anim?;
    match anim.animation_type {
        TextAnimationType::Fade if anim.duration > 0.0 => Some(anim),
        TextAnimationType::None | TextAnimationType::Fade => None,
        other => {
            debug!(animation = ?other, "animation is preview-only");
            None
        }
    }
}

/// Alpha expression: base opacity times linear fade ramps.
fn alpha_expr(overlay: &TextOverlay) -> Option<String> {
    let mut factors = Vec::new();
    if let Some(anim) = fades(overlay.animation_in) {
        let start = overlay.start_time + anim.delay;
        factors.push(format!(
            "clip((t-{})/{},0,1)",
            fmt_num(start),
            fmt_num(anim.duration)
        ));
    }
    if let Some(anim) = fades(overlay.animation_out) {
        factors.push(format!(
            "clip(({}-t)/{},0,1)",
            fmt_num(overlay.end_time()),
            fmt_num(anim.duration)
        ));
    }

    let opacity = overlay.style.opacity.clamp(0.0, 1.0);
    if factors.is_empty() {
        return (opacity < 1.0).then(|| fmt_num(opacity));
    }
    if opacity < 1.0 {
        factors.insert(0, fmt_num(opacity));
    }
    Some(factors.join("*"))
}

fn enable_expr(overlay: &TextOverlay) -> String {
    format!(
        "between(t,{},{})",
        fmt_num(overlay.start_time),
        fmt_num(overlay.end_time())
    )
}

/// Fixed-size background box for an overlay whose position gives a width
/// and height. The text keeps its anchor and sits `padding` in from the
/// anchored edges. `None` when the overlay has no background or its box
/// fits to the text, in which case `drawtext` draws the box itself.
pub fn compile_text_box(overlay: &TextOverlay, canvas_w: u32, canvas_h: u32) -> Option<Filter> {
    let style = &overlay.style;
    let bg = style.background_color.as_deref()?;
    let (w, h) = overlay.position.box_size(canvas_w, canvas_h)?;
    let bg_color = Rgb::parse_hex(bg).unwrap_or(Rgb::BLACK);

    let anchor_x = overlay.position.x / 100.0 * f64::from(canvas_w);
    let anchor_y = overlay.position.y / 100.0 * f64::from(canvas_h);
    let x = match overlay.position.align {
        TextAlign::Left => anchor_x - style.padding,
        TextAlign::Center => anchor_x - w / 2.0,
        TextAlign::Right => anchor_x - w + style.padding,
    };
    let y = match overlay.position.vertical_align {
        VerticalAlign::Top => anchor_y - style.padding,
        VerticalAlign::Middle => anchor_y - h / 2.0,
        VerticalAlign::Bottom => anchor_y - h + style.padding,
    };

    Some(
        Filter::new("drawbox")
            .num("x", x)
            .num("y", y)
            .num("w", w)
            .num("h", h)
            .arg("color", bg_color.to_ffmpeg(style.background_opacity))
            .arg("t", "fill")
            .arg("enable", enable_expr(overlay)),
    )
}

/// Compile one overlay to a `drawtext` filter for a `canvas_w` x `canvas_h`
/// output. The filter is gated to the overlay's time window.
pub fn compile_drawtext(overlay: &TextOverlay, canvas_w: u32, canvas_h: u32) -> Filter {
    let style = &overlay.style;
    let color = Rgb::parse_hex(&style.color).unwrap_or(Rgb::WHITE);

    let mut filter = Filter::new("drawtext")
        .arg("text", overlay.content.as_str())
        .arg("expansion", "none")
        .arg("font", font_pattern(style))
        .num("fontsize", style.font_size)
        .arg("fontcolor", color.to_ffmpeg(1.0));

    if let Some(alpha) = alpha_expr(overlay) {
        filter = filter.arg("alpha", alpha);
    }
    filter = filter
        .arg("x", x_expr(overlay, canvas_w))
        .arg("y", y_expr(overlay, canvas_h));

    if let Some(shadow) = &style.shadow {
        let shadow_color = Rgb::parse_hex(&shadow.color).unwrap_or(Rgb::BLACK);
        filter = filter
            .arg("shadowcolor", shadow_color.to_ffmpeg(shadow.opacity))
            .num("shadowx", shadow.offset_x)
            .num("shadowy", shadow.offset_y);
    }

    if let Some(stroke) = style.stroke.as_ref().filter(|s| s.width > 0.0) {
        let stroke_color = Rgb::parse_hex(&stroke.color).unwrap_or(Rgb::BLACK);
        filter = filter
            .arg("bordercolor", stroke_color.to_ffmpeg(1.0))
            .num("borderw", stroke.width);
    }

    let sized = overlay.position.box_size(canvas_w, canvas_h).is_some();
    if let Some(bg) = style.background_color.as_deref().filter(|_| !sized) {
        let bg_color = Rgb::parse_hex(bg).unwrap_or(Rgb::BLACK);
        filter = filter
            .num("box", 1.0)
            .arg("boxcolor", bg_color.to_ffmpeg(style.background_opacity))
            .num("boxborderw", style.padding);
    }

    if overlay.position.rotation != 0.0 {
        debug!(overlay = %overlay.id, rotation = overlay.position.rotation, "rotation is preview-only");
    }

    filter.arg("enable", enable_expr(overlay))
}

/// Compile every visible overlay, in order, into one chain.
pub fn compile_text_chain<'a>(
    overlays: impl IntoIterator<Item = &'a TextOverlay>,
    canvas_w: u32,
    canvas_h: u32,
) -> FilterChain {
    let mut chain = FilterChain::new();
    for overlay in overlays {
        if !overlay.visible || overlay.content.trim().is_empty() {
            debug!(overlay = %overlay.id, "skipping hidden or empty overlay");
            continue;
        }
        if let Some(text_box) = compile_text_box(overlay, canvas_w, canvas_h) {
            chain.push(text_box);
        }
        chain.push(compile_drawtext(overlay, canvas_w, canvas_h));
    }
    chain
}
