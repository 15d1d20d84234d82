//! Editing-surface lifecycle.
//!
//! Mounting installs the rich-text mode on a session: the recognized block
//! kinds are registered with the model, the [`RichTextHandler`] is installed
//! at the lowest priority tier, and the normalizer configuration is selected
//! once from the surface's capabilities. Unmounting tears all of that down
//! as one unit. `clear` resets the document to the canonical empty state: a
//! root with exactly one empty paragraph.

use thiserror::Error;

use crate::commands::CommandPriority;
use crate::dispatch::{CaretPolicy, RichTextHandler};
use crate::input::{InputNormalizer, SurfaceCapabilities};
use crate::model::{BlockKind, EditorModel};
use crate::session::{EditorSession, Installed};

/// The block kinds the rich-text mode registers at mount.
pub const RECOGNIZED_BLOCKS: [BlockKind; 5] = [
    BlockKind::Paragraph,
    BlockKind::Heading,
    BlockKind::ListItem,
    BlockKind::Quote,
    BlockKind::CodeBlock,
];

/// Lifecycle state of an editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No rich-text mode installed.
    Unmounted,
    /// Rich-text mode installed and processing events.
    Mounted,
}

/// Lifecycle misuse.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// `mount` on a session that is already mounted.
    #[error("editing surface is already mounted")]
    AlreadyMounted,
    /// `unmount` on a session that is not mounted.
    #[error("editing surface is not mounted")]
    NotMounted,
}

/// Configuration for [`EditorSession::mount`].
pub struct MountOptions {
    /// Seed an empty document with a single paragraph.
    pub init_empty_document: bool,
    /// What the input surface can deliver, detected once by the host.
    pub capabilities: SurfaceCapabilities,
    /// Arrow-key override predicate; defaults to trusting native motion.
    pub caret_policy: Option<Box<dyn CaretPolicy>>,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            init_empty_document: false,
            capabilities: SurfaceCapabilities::native(),
            caret_policy: None,
        }
    }
}

impl<M: EditorModel> EditorSession<M> {
    /// Current lifecycle state.
    pub fn lifecycle(&self) -> LifecycleState {
        if self.installed.is_some() {
            LifecycleState::Mounted
        } else {
            LifecycleState::Unmounted
        }
    }

    /// Install the rich-text mode on this session.
    pub fn mount(&mut self, options: MountOptions) -> Result<(), LifecycleError> {
        if self.installed.is_some() {
            return Err(LifecycleError::AlreadyMounted);
        }

        self.update(|model| model.register_block_kinds(&RECOGNIZED_BLOCKS));

        let handler = match options.caret_policy {
            Some(policy) => RichTextHandler::with_policy(policy),
            None => RichTextHandler::new(),
        };
        let handler_id = self.register_handler(CommandPriority::Editor, move |model, command| {
            handler.handle(model, command)
        });
        let normalizer = InputNormalizer::for_surface(options.capabilities);
        self.installed = Some(Installed {
            handler: handler_id,
            normalizer,
        });

        if options.init_empty_document {
            self.init_paragraph();
        }
        tracing::debug!("editing surface mounted");
        Ok(())
    }

    /// Tear down every registration installed at mount, as one unit.
    pub fn unmount(&mut self) -> Result<(), LifecycleError> {
        let Some(installed) = self.installed.take() else {
            return Err(LifecycleError::NotMounted);
        };
        self.unregister_handler(installed.handler);
        self.composing = false;
        tracing::debug!("editing surface unmounted");
        Ok(())
    }

    /// Wipe the document back to a root with a single empty paragraph.
    pub fn clear(&mut self) {
        self.clear_with(|| {});
    }

    /// Like [`clear`](EditorSession::clear), invoking `on_done` exactly once
    /// after the wiped state is committed.
    pub fn clear_with(&mut self, on_done: impl FnOnce()) {
        tracing::debug!("clearing document");
        self.update_with(
            |model| {
                let root = model.root();
                let selection_visible = model.selection_anchor().is_some() || model.has_focus();
                model.clear_children(root);
                let paragraph = model.append_paragraph(root);
                if selection_visible {
                    model.select_inside(paragraph);
                }
            },
            on_done,
        );
    }

    /// Seed an empty root with a single paragraph, placing the selection
    /// inside it when the surface would show it. A root that already has a
    /// first child is left untouched.
    fn init_paragraph(&mut self) {
        self.update(|model| {
            let root = model.root();
            if model.first_child(root).is_some() {
                return;
            }
            let selection_visible = model.selection_anchor().is_some() || model.has_focus();
            let paragraph = model.append_paragraph(root);
            if selection_visible {
                model.select_inside(paragraph);
            }
        });
    }
}
