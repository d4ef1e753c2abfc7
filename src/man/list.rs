//! Nested list context.
//!
//! Every open `<ol>`/`<ul>` has a [`ListFrame`] on the stack. Besides the list
//! kind (and the running number of ordered lists), each frame carries the
//! [`ItemSlot`] of its current item, so the "first child of a description
//! item is its label" bookkeeping resets with every item and cannot leak into
//! sibling or enclosing items.
//!
//! An ordered list starting at 0 is a description list: each item's first
//! child element becomes the `.IP "label"` and the rest of the item its
//! indented body.

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// List element as it appears in the HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// What a list frame renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    /// Numbered items; `next` is the number of the next item.
    Ordered { next: u32 },
    Bulleted,
    /// `<ol start="0">`, rendered as a description list.
    Description,
}

/// Where the current item of a frame stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemSlot {
    #[default]
    Idle,
    /// The item has started but none of its child elements has.
    AwaitingFirstChild,
    /// A description item's first child is open and collecting the label.
    Label(String),
    /// The next start tag begins the item body; its paragraph macro is
    /// suppressed so no blank line separates it from the item macro.
    BodyStart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFrame {
    pub kind: FrameKind,
    pub slot: ItemSlot,
}

/// The nroff macro opening a paragraph at the current nesting level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphMacro {
    /// `.P`, outside of any list.
    #[default]
    Paragraph,
    /// `.IP`, keeping list indentation.
    IndentedItem,
}

impl ParagraphMacro {
    pub fn as_line(self) -> &'static str {
        match self {
            ParagraphMacro::Paragraph => ".P\n",
            ParagraphMacro::IndentedItem => ".IP\n",
        }
    }
}

/// Stack of open lists.
#[derive(Debug, Default)]
pub struct ListStack {
    frames: Vec<ListFrame>,
    paragraph: ParagraphMacro,
}

impl ListStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn paragraph_macro(&self) -> ParagraphMacro {
        self.paragraph
    }

    pub fn top(&self) -> Option<&ListFrame> {
        self.frames.last()
    }

    /// Open a list, emitting its nroff preamble into `man`.
    ///
    /// Returns the kind the list renders as; [`FrameKind::Description`] means
    /// the caller must rewrite the `<ol>` tag as `<dl>`.
    pub fn enter_list(&mut self, kind: ListKind, start: u32, man: &mut String) -> &FrameKind {
        if !self.frames.is_empty() {
            man.push_str(".RS\n");
        }
        man.push_str(self.paragraph.as_line());
        self.paragraph = ParagraphMacro::IndentedItem;

        let kind = match kind {
            ListKind::Ordered if start == 0 => FrameKind::Description,
            ListKind::Ordered => FrameKind::Ordered { next: start },
            ListKind::Unordered => FrameKind::Bulleted,
        };
        debug!(depth = self.frames.len() + 1, ?kind, "enter list");
        self.frames.push(ListFrame {
            kind,
            slot: ItemSlot::Idle,
        });
        &self.frames[self.frames.len() - 1].kind
    }

    /// Close the innermost list, emitting its nroff epilogue into `man`.
    ///
    /// Returns the kind of the closed list, or `None` for an unbalanced end tag.
    pub fn exit_list(&mut self, man: &mut String) -> Option<FrameKind> {
        let frame = self.frames.pop()?;
        if self.frames.is_empty() {
            self.paragraph = ParagraphMacro::Paragraph;
        } else {
            man.push_str(".RE\n");
        }
        debug!(depth = self.frames.len(), kind = ?frame.kind, "exit list");
        Some(frame.kind)
    }

    /// Start an item of the innermost list, emitting its item macro.
    ///
    /// Description items emit nothing here: their `.IP` carries the label,
    /// which is only known once the item's first child element has closed.
    pub fn enter_item(&mut self, man: &mut String) -> Option<&FrameKind> {
        let frame = self.frames.last_mut()?;
        match &mut frame.kind {
            FrameKind::Ordered { next } => {
                man.push_str(&format!(".IP {next}.\n"));
                match next.checked_add(1) {
                    Some(n) => *next = n,
                    None => warn!(number = *next, "ordered list numbering overflows, repeating"),
                }
            }
            FrameKind::Bulleted => man.push_str(".IP o\n"),
            FrameKind::Description => {}
        }
        frame.slot = ItemSlot::AwaitingFirstChild;
        Some(&frame.kind)
    }

    /// End the current item of the innermost list.
    ///
    /// A description item must have produced its label by now; `text` is the
    /// item's pending text, quoted in the error.
    pub fn exit_item(&mut self, text: &str) -> Result<Option<FrameKind>> {
        let Some(frame) = self.frames.last_mut() else {
            return Ok(None);
        };
        let slot = std::mem::take(&mut frame.slot);
        if frame.kind == FrameKind::Description {
            match slot {
                ItemSlot::AwaitingFirstChild => {
                    return Err(Error::MalformedDescriptionList(format!(
                        "item {:?} of a list starting at 0 has no child element to use as its label",
                        text.trim()
                    )));
                }
                ItemSlot::Label(tag) => {
                    return Err(Error::MalformedDescriptionList(format!(
                        "item of a list starting at 0 ended inside its <{tag}> label"
                    )));
                }
                ItemSlot::Idle | ItemSlot::BodyStart => {}
            }
        }
        Ok(Some(frame.kind.clone()))
    }

    /// Consume the "first child element" state of the current item.
    ///
    /// Returns the innermost frame's kind if the item was still waiting for
    /// its first child element.
    pub fn take_first_child(&mut self) -> Option<FrameKind> {
        let frame = self.frames.last_mut()?;
        if frame.slot != ItemSlot::AwaitingFirstChild {
            return None;
        }
        frame.slot = ItemSlot::Idle;
        Some(frame.kind.clone())
    }

    /// Consume the "body starts here" state of the current item.
    pub fn take_body_start(&mut self) -> bool {
        match self.frames.last_mut() {
            Some(frame) if frame.slot == ItemSlot::BodyStart => {
                frame.slot = ItemSlot::Idle;
                true
            }
            _ => false,
        }
    }

    /// Mark the element `tag` as the label holder of the current item.
    pub fn begin_label(&mut self, tag: &str) {
        if let Some(frame) = self.frames.last_mut() {
            frame.slot = ItemSlot::Label(tag.to_string());
        }
    }

    /// Whether `tag` closes the label holder of the current item.
    pub fn closes_label(&self, tag: &str) -> bool {
        matches!(self.top(), Some(ListFrame { slot: ItemSlot::Label(label), .. }) if label == tag)
    }

    /// The label is complete; what follows is the item body.
    pub fn finish_label(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.slot = ItemSlot::BodyStart;
        }
    }
}
