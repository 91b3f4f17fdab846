//! Named looks built from stacks of basic effects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::{ClipEffect, EffectType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectPreset {
    Vintage,
    Noir,
    Vivid,
    Warm,
    Cool,
    Dreamy,
    Dramatic,
}

impl EffectPreset {
    pub const ALL: [EffectPreset; 7] = [
        EffectPreset::Vintage,
        EffectPreset::Noir,
        EffectPreset::Vivid,
        EffectPreset::Warm,
        EffectPreset::Cool,
        EffectPreset::Dreamy,
        EffectPreset::Dramatic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectPreset::Vintage => "Vintage",
            EffectPreset::Noir => "Noir",
            EffectPreset::Vivid => "Vivid",
            EffectPreset::Warm => "Warm",
            EffectPreset::Cool => "Cool",
            EffectPreset::Dreamy => "Dreamy",
            EffectPreset::Dramatic => "Dramatic",
        }
    }

    /// Effect stack as (type, primary value) in chain order.
    pub fn effects(self) -> &'static [(EffectType, f64)] {
        match self {
            EffectPreset::Vintage => &[
                (EffectType::Sepia, 40.0),
                (EffectType::Contrast, -10.0),
                (EffectType::Saturation, -20.0),
                (EffectType::Vignette, 30.0),
            ],
            EffectPreset::Noir => &[
                (EffectType::Grayscale, 100.0),
                (EffectType::Contrast, 30.0),
                (EffectType::Vignette, 40.0),
            ],
            EffectPreset::Vivid => &[
                (EffectType::Saturation, 40.0),
                (EffectType::Contrast, 15.0),
                (EffectType::Sharpen, 20.0),
            ],
            EffectPreset::Warm => &[
                (EffectType::Temperature, 30.0),
                (EffectType::Saturation, 10.0),
            ],
            EffectPreset::Cool => &[
                (EffectType::Temperature, -30.0),
                (EffectType::Brightness, 5.0),
            ],
            EffectPreset::Dreamy => &[
                (EffectType::Blur, 2.0),
                (EffectType::Brightness, 10.0),
                (EffectType::Saturation, -10.0),
            ],
            EffectPreset::Dramatic => &[
                (EffectType::Contrast, 40.0),
                (EffectType::Exposure, -10.0),
                (EffectType::Vignette, 50.0),
            ],
        }
    }
}

/// Instantiate a preset's effects for a clip, numbering orders from
/// `start_order`.
pub fn apply_preset(clip_id: Uuid, preset: EffectPreset, start_order: u32) -> Vec<ClipEffect> {
    preset
        .effects()
        .iter()
        .zip(start_order..)
        .map(|(&(ty, value), order)| ClipEffect::with_value(clip_id, ty, value, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::compile_effect_chain;
    use crate::effect::validate_effect;

    #[test]
    fn test_presets_are_valid_and_compile() {
        let clip_id = Uuid::new_v4();
        for preset in EffectPreset::ALL {
            let effects = apply_preset(clip_id, preset, 0);
            assert_eq!(effects.len(), preset.effects().len());
            assert!(effects.iter().all(|e| validate_effect(e).is_empty()));
            assert!(effects.iter().all(|e| e.clip_id == clip_id));
            assert!(!compile_effect_chain(&effects).is_empty(), "{}", preset.name());
        }
    }

    #[test]
    fn test_orders_continue_from_start() {
        let effects = apply_preset(Uuid::nil(), EffectPreset::Noir, 4);
        let orders: Vec<u32> = effects.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![4, 5, 6]);

        let chain = compile_effect_chain(&effects);
        assert_eq!(chain.names(), vec!["eq", "hue", "vignette"]);
    }
}
