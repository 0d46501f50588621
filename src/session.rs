//! A navigation session: registry, stack, bindings and renderer together
//!
//! The session owns everything navigation needs, so several sessions can
//! coexist without sharing state. Hosts report key activations with
//! [`Session::activate`]; each activation runs to completion before the next.

use thiserror::Error;

use crate::models::Palette;
use crate::navigation::{
    wire_all, KeyAction, KeyBindings, NavigationError, NavigationStack, WiringReport,
};
use crate::registry::{PaletteRegistry, RegistryError};
use crate::render::Renderer;

/// Error from session operations that name a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("Palette '{0}' not found")]
    UnknownPalette(String),
}

/// Result of activating a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Followed a branch key: `from` was pushed and `to` displayed
    Navigated { from: String, to: String },
    /// Popped the stack and displayed `to`
    WentBack { to: String },
    /// Back key pressed with an empty stack; the current palette stays
    NothingToReturnTo,
    /// Stack full; the branch was not followed
    CapacityExceeded(NavigationError),
    /// The key has no navigation behavior
    Unbound,
}

/// Navigation state for one user session.
pub struct Session<R: Renderer> {
    registry: PaletteRegistry,
    stack: NavigationStack,
    bindings: KeyBindings<R::Container>,
    renderer: R,
    current: Option<String>,
}

impl<R: Renderer> Session<R> {
    /// Create a session with a default-capacity stack.
    pub fn new(registry: PaletteRegistry, renderer: R) -> Self {
        Self::with_stack(registry, NavigationStack::new(), renderer)
    }

    pub fn with_stack(registry: PaletteRegistry, stack: NavigationStack, renderer: R) -> Self {
        Self { registry, stack, bindings: KeyBindings::new(), renderer, current: None }
    }

    /// Bind navigation keys of every registered palette to `container`.
    ///
    /// Safe to call again after registering more palettes: keys bound by an
    /// earlier call are left as they are.
    pub fn wire(&mut self, container: &R::Container) -> WiringReport {
        wire_all(&mut self.registry, &mut self.bindings, container)
    }

    /// Register a palette after the session started (e.g. one synthesized
    /// at runtime). Call [`Session::wire`] to bind its keys.
    pub fn add_palette(&mut self, palette: Palette) -> Result<(), RegistryError> {
        self.registry.add(palette)
    }

    /// Display a palette without touching the stack. Used for the initial
    /// palette, which is never pushed.
    pub fn show(&mut self, name: &str, container: &R::Container) -> Result<(), SessionError> {
        let palette =
            self.registry.get(name).ok_or_else(|| SessionError::UnknownPalette(name.to_string()))?;
        self.renderer.render(palette, container);
        self.current = Some(name.to_string());
        Ok(())
    }

    /// Run the navigation behavior bound to `key` of `palette`.
    pub fn activate(&mut self, palette: &str, key: &str) -> ActivationOutcome {
        let Some(binding) = self.bindings.get(palette, key) else {
            tracing::debug!(palette, key, "activated key has no navigation binding");
            return ActivationOutcome::Unbound;
        };
        let container = binding.container.clone();

        match binding.action.clone() {
            KeyAction::Forward { source, target } => self.follow_branch(&source, &target, &container),
            KeyAction::Back { .. } => self.go_back(&container),
        }
    }

    fn follow_branch(
        &mut self,
        source: &str,
        target: &str,
        container: &R::Container,
    ) -> ActivationOutcome {
        let Some(target_palette) = self.registry.get(target) else {
            tracing::warn!(palette = %target, "branch target vanished from registry");
            return ActivationOutcome::Unbound;
        };

        if let Err(err) = self.stack.push(self.registry.get(source)) {
            return ActivationOutcome::CapacityExceeded(err);
        }
        self.renderer.render(target_palette, container);
        self.current = Some(target.to_string());
        ActivationOutcome::Navigated { from: source.to_string(), to: target.to_string() }
    }

    fn go_back(&mut self, container: &R::Container) -> ActivationOutcome {
        let Some(previous) = self.stack.pop() else {
            tracing::warn!("no previous palette to go back to");
            return ActivationOutcome::NothingToReturnTo;
        };

        match self.registry.get(&previous) {
            Some(palette) => {
                self.renderer.render(palette, container);
                self.current = Some(previous.clone());
                ActivationOutcome::WentBack { to: previous }
            }
            None => {
                tracing::warn!(palette = %previous, "popped palette is not registered");
                ActivationOutcome::NothingToReturnTo
            }
        }
    }

    /// Name of the palette currently displayed.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn registry(&self) -> &PaletteRegistry {
        &self.registry
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn bindings(&self) -> &KeyBindings<R::Container> {
        &self.bindings
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
