//! Discovery of branch relationships and binding of navigation behaviors.

use crate::models::{KeyRole, Palette};
use crate::registry::PaletteRegistry;

use super::bindings::{KeyAction, KeyBindings};

/// Non-fatal problem found while wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WiringIssue {
    /// A branch key names a palette that is not registered
    UnresolvedTarget { palette: String, key: String, target: String },
}

impl std::fmt::Display for WiringIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WiringIssue::UnresolvedTarget { palette, key, target } => write!(
                f,
                "key '{}' of palette '{}' branches to unknown palette '{}'",
                key, palette, target
            ),
        }
    }
}

/// Summary of one wiring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WiringReport {
    /// Branch keys bound during this pass
    pub forward_bound: usize,
    /// Back keys bound during this pass
    pub back_bound: usize,
    /// Branch keys skipped because they were already bound
    pub already_wired: usize,
    pub issues: Vec<WiringIssue>,
}

impl WiringReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Bind the palette's back key, at most once per palette.
///
/// Activating the key pops the navigation stack and displays the popped
/// palette in `container`. Returns true if a binding was attached by this
/// call; false if the palette was already configured or has no back key.
pub fn wire_back_key<C: Clone>(
    palette: &mut Palette,
    bindings: &mut KeyBindings<C>,
    container: &C,
) -> bool {
    if palette.back_configured {
        return false;
    }
    let Some(back_key) = palette.back_key() else {
        return false;
    };

    let key_id = back_key.id.clone();
    bindings.bind(
        &palette.name,
        &key_id,
        KeyAction::Back { palette: palette.name.clone() },
        container.clone(),
    );
    palette.back_configured = true;
    true
}

/// Walk every registered palette and bind its navigation keys.
///
/// Branch keys whose target resolves get a forward binding (push the owning
/// palette, display the target); unresolved targets are reported and the
/// key stays unbound. Back keys are delegated to [`wire_back_key`]. Normal
/// keys are left alone. Running it again over an unchanged registry binds
/// nothing new.
pub fn wire_all<C: Clone>(
    registry: &mut PaletteRegistry,
    bindings: &mut KeyBindings<C>,
    container: &C,
) -> WiringReport {
    let mut report = WiringReport::default();
    let names: Vec<String> = registry.names().map(str::to_owned).collect();

    for name in &names {
        let Some(palette) = registry.get(name) else {
            continue;
        };

        let mut forward = Vec::new();
        let mut has_back_key = false;
        for key in palette.keys.values() {
            match &key.role {
                KeyRole::Branch { target } => {
                    if key.wired {
                        report.already_wired += 1;
                    } else if registry.contains(target) {
                        forward.push((key.id.clone(), target.clone()));
                    } else {
                        tracing::warn!(palette = %name, key = %key.id, target = %target, "branch target not registered");
                        report.issues.push(WiringIssue::UnresolvedTarget {
                            palette: name.clone(),
                            key: key.id.clone(),
                            target: target.clone(),
                        });
                    }
                }
                KeyRole::BranchBack => has_back_key = true,
                KeyRole::Normal => {}
            }
        }

        let Some(palette) = registry.get_mut(name) else {
            continue;
        };
        for (key_id, target) in forward {
            let action = KeyAction::Forward { source: name.clone(), target };
            if !bindings.bind(name, &key_id, action, container.clone()) {
                report.already_wired += 1;
                continue;
            }
            if let Some(key) = palette.key_mut(&key_id) {
                key.wired = true;
            }
            report.forward_bound += 1;
        }
        if has_back_key && wire_back_key(palette, bindings, container) {
            report.back_bound += 1;
        }
    }

    tracing::info!(
        palettes = names.len(),
        forward = report.forward_bound,
        back = report.back_bound,
        issues = report.issues.len(),
        "navigation wired"
    );
    report
}
