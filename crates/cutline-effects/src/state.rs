//! Per-clip effect stacks and the actions that edit them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::effect::ClipEffect;
use crate::preset::{apply_preset, EffectPreset};

/// Effect stacks keyed by clip id. Each stack is kept sorted by `order`.
/// Removal and reordering renumber densely (0, 1, 2, ...); appends go one
/// past the highest order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectsState {
    pub effects: BTreeMap<Uuid, Vec<ClipEffect>>,
}

impl EffectsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects for a clip in chain order.
    pub fn effects_for(&self, clip_id: Uuid) -> &[ClipEffect] {
        self.effects.get(&clip_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, clip_id: Uuid, effect_id: Uuid) -> Option<&ClipEffect> {
        self.effects_for(clip_id).iter().find(|e| e.id == effect_id)
    }

    fn find_mut(&mut self, clip_id: Uuid, effect_id: Uuid) -> Option<&mut ClipEffect> {
        self.effects
            .get_mut(&clip_id)?
            .iter_mut()
            .find(|e| e.id == effect_id)
    }

    fn stack_mut(&mut self, clip_id: Uuid) -> &mut Vec<ClipEffect> {
        self.effects.entry(clip_id).or_default()
    }

    /// One past the highest order in the stack. Stacks loaded from disk
    /// may have holes, so the length is not enough.
    fn next_order(stack: &[ClipEffect]) -> u32 {
        stack.iter().map(|e| e.order + 1).max().unwrap_or(0)
    }

    fn renumber(stack: &mut [ClipEffect]) {
        stack.sort_by_key(|e| e.order);
        for (order, effect) in (0u32..).zip(stack.iter_mut()) {
            effect.order = order;
        }
    }
}

/// An edit to a clip's effect stack.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectsAction {
    /// Append an effect to the end of its clip's stack.
    Add(ClipEffect),
    Remove { clip_id: Uuid, effect_id: Uuid },
    UpdateParam {
        clip_id: Uuid,
        effect_id: Uuid,
        param: String,
        value: f64,
    },
    Toggle { clip_id: Uuid, effect_id: Uuid },
    /// Move the effect at index `from` to index `to`.
    Reorder { clip_id: Uuid, from: usize, to: usize },
    /// Append a preset's effects.
    ApplyPreset { clip_id: Uuid, preset: EffectPreset },
    ClearClip { clip_id: Uuid },
}

impl EffectsAction {
    pub fn apply(self, state: &mut EffectsState) {
        match self {
            Self::Add(mut effect) => {
                let stack = state.stack_mut(effect.clip_id);
                effect.order = EffectsState::next_order(stack);
                stack.push(effect);
            }
            Self::Remove { clip_id, effect_id } => {
                if let Some(stack) = state.effects.get_mut(&clip_id) {
                    stack.retain(|e| e.id != effect_id);
                    EffectsState::renumber(stack);
                    if stack.is_empty() {
                        state.effects.remove(&clip_id);
                    }
                }
            }
            Self::UpdateParam {
                clip_id,
                effect_id,
                param,
                value,
            } => match state.find_mut(clip_id, effect_id) {
                Some(effect) => {
                    if !effect.set_param(&param, value) {
                        debug!(%effect_id, %param, "unknown effect parameter");
                    }
                }
                None => debug!(%effect_id, "update ignored: no such effect"),
            },
            Self::Toggle { clip_id, effect_id } => {
                if let Some(effect) = state.find_mut(clip_id, effect_id) {
                    effect.enabled = !effect.enabled;
                }
            }
            Self::Reorder { clip_id, from, to } => {
                let Some(stack) = state.effects.get_mut(&clip_id) else {
                    return;
                };
                if from >= stack.len() || to >= stack.len() {
                    debug!(from, to, len = stack.len(), "reorder out of range");
                    return;
                }
                let effect = stack.remove(from);
                stack.insert(to, effect);
                for (order, effect) in (0u32..).zip(stack.iter_mut()) {
                    effect.order = order;
                }
            }
            Self::ApplyPreset { clip_id, preset } => {
                let stack = state.stack_mut(clip_id);
                let start = EffectsState::next_order(stack);
                stack.extend(apply_preset(clip_id, preset, start));
            }
            Self::ClearClip { clip_id } => {
                state.effects.remove(&clip_id);
            }
        }
    }
}
