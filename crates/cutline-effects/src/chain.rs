//! Effect chain compilation for export and preview.

use cutline_core::{Filter, FilterChain};
use tracing::debug;

use crate::effect::{
    effect_config, effect_value_to_css, effect_value_to_ffmpeg, ClipEffect, EffectType,
};

/// Enabled effects in chain order. The sort is stable, so equal orders keep
/// their insertion order.
fn ordered(effects: &[ClipEffect]) -> Vec<&ClipEffect> {
    let mut enabled: Vec<&ClipEffect> = effects.iter().filter(|e| e.enabled).collect();
    enabled.sort_by_key(|e| e.order);
    enabled
}

/// Compile a clip's effects into an export filter chain.
///
/// Brightness, contrast and saturation fold into one `eq` stage placed
/// first; only non-neutral components are emitted and a later effect of the
/// same kind replaces an earlier one. Every other effect becomes a discrete
/// stage in order. No-op stages are left out entirely.
pub fn compile_effect_chain(effects: &[ClipEffect]) -> FilterChain {
    let effects = ordered(effects);

    let mut brightness = None;
    let mut contrast = None;
    let mut saturation = None;
    for effect in effects.iter().filter(|e| e.effect_type.is_eq_component()) {
        let slot = match effect.effect_type {
            EffectType::Brightness => &mut brightness,
            EffectType::Contrast => &mut contrast,
            _ => &mut saturation,
        };
        *slot = Some(effect);
    }

    let mut chain = FilterChain::new();

    let mut eq = Filter::new("eq");
    for (key, effect) in [
        ("brightness", brightness),
        ("contrast", contrast),
        ("saturation", saturation),
    ] {
        if let Some(effect) = effect.filter(|e| e.is_active()) {
            eq = eq.num(key, effect_value_to_ffmpeg(effect.effect_type, effect.value()));
        }
    }
    if eq.arg_count() > 0 {
        chain.push(eq);
    }

    for effect in effects.iter().filter(|e| !e.effect_type.is_eq_component()) {
        if !effect.is_active() {
            debug!(effect = ?effect.effect_type, "skipping neutral effect");
            continue;
        }
        chain.push(discrete_filter(effect.effect_type, effect.value()));
    }

    chain
}

fn discrete_filter(effect_type: EffectType, value: f64) -> Filter {
    let mapped = effect_value_to_ffmpeg(effect_type, value);
    let filter = Filter::new(effect_config(effect_type).ffmpeg_filter_name);
    match effect_type {
        EffectType::Exposure => filter.num("exposure", mapped),
        EffectType::Temperature => filter.num("temperature", mapped),
        EffectType::Hue => filter.num("h", mapped),
        EffectType::Blur => filter.num("sigma", mapped),
        EffectType::Sharpen => filter
            .num("luma_msize_x", 5.0)
            .num("luma_msize_y", 5.0)
            .num("luma_amount", mapped),
        EffectType::Grayscale => filter.num("s", mapped),
        EffectType::Sepia => sepia_mixer(filter, mapped),
        EffectType::Invert => {
            let keep = 1.0 - mapped;
            let expr = format!(
                "val*{}+negval*{}",
                cutline_core::fmt_num(keep),
                cutline_core::fmt_num(mapped)
            );
            filter
                .arg("r", expr.clone())
                .arg("g", expr.clone())
                .arg("b", expr)
        }
        EffectType::Vignette => filter.num("angle", mapped),
        EffectType::Noise => filter.num("alls", mapped).arg("allf", "t"),
        EffectType::Brightness | EffectType::Contrast | EffectType::Saturation => filter,
    }
}

/// Classic sepia matrix blended with identity by `amount` (0..1).
fn sepia_mixer(mut filter: Filter, amount: f64) -> Filter {
    const SEPIA: [[f64; 3]; 3] = [
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ];
    const KEYS: [[&str; 3]; 3] = [["rr", "rg", "rb"], ["gr", "gg", "gb"], ["br", "bg", "bb"]];

    for (row, keys) in KEYS.iter().enumerate() {
        for (col, key) in keys.iter().enumerate() {
            let identity = if row == col { 1.0 } else { 0.0 };
            let value = identity * (1.0 - amount) + SEPIA[row][col] * amount;
            filter = filter.num(*key, value);
        }
    }
    filter
}

/// Compile enabled effects into a CSS `filter` value for preview.
/// Neutral effects and effects without a CSS counterpart are skipped.
pub fn compile_css_filter(effects: &[ClipEffect]) -> String {
    let parts: Vec<String> = ordered(effects)
        .into_iter()
        .filter(|e| e.is_active())
        .filter_map(|e| effect_value_to_css(e.effect_type, e.value()))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" ")
    }
}
