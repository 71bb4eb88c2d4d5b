//! Hook configuration merge logic
//!
//! Implements the scope merge with:
//! - Matcher-bearing events: override by pattern string (later scope wins,
//!   position of the first occurrence is kept)
//! - Direct events: concatenate in scope order
//! - Events absent from every layer: stay absent

use hookguard_model::{DirectEvent, HookCommand, HookMatcher, HooksConfiguration, MatcherEvent};

/// Merge the three scope documents into the effective configuration.
///
/// Precedence is local > project > user. Inputs are not modified.
pub fn merge(
    user: &HooksConfiguration,
    project: &HooksConfiguration,
    local: &HooksConfiguration,
) -> HooksConfiguration {
    merge_layers(&[user, project, local])
}

/// Merge any number of layers, lowest precedence first.
pub fn merge_layers(layers: &[&HooksConfiguration]) -> HooksConfiguration {
    let mut merged = HooksConfiguration::default();

    for event in MatcherEvent::ALL {
        if layers.iter().all(|l| l.matchers(event).is_none()) {
            continue;
        }
        let lists: Vec<&[HookMatcher]> = layers
            .iter()
            .map(|l| l.matchers(event).unwrap_or_default())
            .collect();
        merged.set_matchers(event, Some(override_by_pattern(&lists)));
    }

    for event in DirectEvent::ALL {
        let lists: Vec<&[HookCommand]> = layers.iter().filter_map(|l| l.commands(event)).collect();
        if !lists.is_empty() {
            merged.set_commands(event, Some(lists.concat()));
        }
    }

    merged
}

/// Fold matcher lists over a copy of the lowest layer.
///
/// An absent event counts as an empty list. A later matcher with the same
/// pattern replaces the earlier one in place; its command list is taken
/// whole, never combined with the replaced one.
fn override_by_pattern(lists: &[&[HookMatcher]]) -> Vec<HookMatcher> {
    let Some((base, rest)) = lists.split_first() else {
        return Vec::new();
    };
    let mut accumulated: Vec<HookMatcher> = base.to_vec();
    for list in rest {
        for matcher in list.iter() {
            match accumulated.iter_mut().find(|m| m.matcher == matcher.matcher) {
                Some(slot) => *slot = matcher.clone(),
                None => accumulated.push(matcher.clone()),
            }
        }
    }
    accumulated
}
