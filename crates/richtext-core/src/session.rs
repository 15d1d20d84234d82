//! Editing-surface session.
//!
//! [`EditorSession`] owns the document model for one editing surface and is
//! the single mutation path into it: host mutations go through the scoped
//! [`update`](EditorSession::update) boundary, commands through
//! [`dispatch`](EditorSession::dispatch), raw surface events through
//! [`process_event`](EditorSession::process_event). Everything runs to
//! completion synchronously on the calling turn; there is no queue.
//!
//! The session also carries the per-surface composition flag. It is a field
//! here, not module state, so concurrent editing surfaces never leak
//! composition state into each other.

use crate::commands::{CommandPriority, Dispatch, EditorCommand};
use crate::input::{InputNormalizer, Normalized, SurfaceEvent};
use crate::model::{EditorModel, NodeId};

/// Identifier of a registered command handler.
pub type HandlerId = u64;

struct Registration<M> {
    id: HandlerId,
    priority: CommandPriority,
    handler: Box<dyn FnMut(&mut M, &EditorCommand) -> Dispatch>,
}

/// Registrations installed by `mount`, torn down as one unit by `unmount`.
pub(crate) struct Installed {
    pub(crate) handler: HandlerId,
    pub(crate) normalizer: InputNormalizer,
}

/// A document session bound to one editing surface.
pub struct EditorSession<M: EditorModel> {
    pub(crate) model: M,
    pub(crate) composing: bool,
    pub(crate) installed: Option<Installed>,
    handlers: Vec<Registration<M>>,
    next_handler_id: HandlerId,
    version: u64,
}

impl<M: EditorModel> EditorSession<M> {
    /// Wrap `model` in a fresh, unmounted session.
    pub fn new(model: M) -> Self {
        Self {
            model,
            composing: false,
            installed: None,
            handlers: Vec::new(),
            next_handler_id: 0,
            version: 0,
        }
    }

    /// Read access to the model. Mutation goes through [`update`].
    ///
    /// [`update`]: EditorSession::update
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Consume the session and hand the model back.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Commit count of this session; each update boundary bumps it once.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether an IME composition span is currently open on this surface.
    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Run `mutator` inside a scoped update boundary and commit.
    pub fn update<R>(&mut self, mutator: impl FnOnce(&mut M) -> R) -> R {
        let result = mutator(&mut self.model);
        self.version += 1;
        result
    }

    /// Run `mutator` inside a scoped update boundary, then invoke
    /// `on_update` once after the commit.
    pub fn update_with<R>(
        &mut self,
        mutator: impl FnOnce(&mut M) -> R,
        on_update: impl FnOnce(),
    ) -> R {
        let result = self.update(mutator);
        on_update();
        result
    }

    /// Register a command handler at `priority`.
    ///
    /// Handlers run from highest to lowest priority, in registration order
    /// within a tier; the first to claim a command short-circuits the rest.
    pub fn register_handler(
        &mut self,
        priority: CommandPriority,
        handler: impl FnMut(&mut M, &EditorCommand) -> Dispatch + 'static,
    ) -> HandlerId {
        let id = self.next_handler_id;
        self.next_handler_id += 1;
        let position = self
            .handlers
            .iter()
            .position(|registration| registration.priority < priority)
            .unwrap_or(self.handlers.len());
        self.handlers.insert(
            position,
            Registration {
                id,
                priority,
                handler: Box::new(handler),
            },
        );
        id
    }

    /// Remove a registered handler. Returns whether it was present.
    pub fn unregister_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|registration| registration.id != id);
        self.handlers.len() != before
    }

    /// Dispatch one command through the registered handlers.
    ///
    /// This is the re-entrant command entry point the host may call
    /// directly; the normalizer feeds it for every emitted command. A
    /// claimed command commits one update boundary.
    pub fn dispatch(&mut self, command: &EditorCommand) -> Dispatch {
        tracing::trace!(command = command.name(), "dispatch");
        for registration in self.handlers.iter_mut() {
            if (registration.handler)(&mut self.model, command).is_handled() {
                self.version += 1;
                return Dispatch::Handled;
            }
        }
        Dispatch::Unhandled
    }

    /// Feed one raw surface event through the active normalizer
    /// configuration and dispatch whatever it emits.
    ///
    /// Returns [`Dispatch::Handled`] when the event's command was claimed,
    /// telling the caller to suppress the default platform behavior. An
    /// unmounted session leaves every event to the platform.
    pub fn process_event(&mut self, event: SurfaceEvent) -> Dispatch {
        let normalized = match &self.installed {
            Some(installed) => installed.normalizer.normalize(self.composing, event),
            None => return Dispatch::Unhandled,
        };
        match normalized {
            Normalized::Command(command) => self.dispatch(&command),
            Normalized::BeginComposition => {
                self.composing = true;
                Dispatch::Unhandled
            }
            Normalized::EndComposition => {
                self.composing = false;
                Dispatch::Unhandled
            }
            Normalized::Ignored => Dispatch::Unhandled,
        }
    }

    /// Reconcile an observed text-node content change that did not flow
    /// through a command (spell correction, IME commit) back into the model.
    ///
    /// Inert while unmounted and while a composition span is open; returns
    /// whether the mutation was applied.
    pub fn observe_mutation(&mut self, node: NodeId, text: &str) -> bool {
        if self.installed.is_none() {
            return false;
        }
        if self.composing {
            tracing::trace!(node = node.index(), "mutation ignored during composition");
            return false;
        }
        self.update(|model| model.set_text_content(node, text));
        true
    }
}
