//! Menu items: one navigable row each.

use crate::{
    catalog::{OptionSource, Select, Spinner},
    context::TaskHandle,
    page::PageId,
    value::{ValueRef, ValueType},
};

/// Title of the synthesized back item.
pub const BACK_TITLE: &str = "Back";

/// Arena index of a [`MenuItem`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(pub(crate) u16);

impl ItemId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Auxiliary value handed to a callback so one function can serve several items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Payload<'a> {
    None,
    Byte(u8),
    Integer(i32),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Text(&'a str),
    Opaque(usize),
}

/// Arguments passed to item callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionArgs<'a> {
    pub item: Option<ItemId>,
    pub payload: Payload<'a>,
}

/// What the engine should do after a callback returns.
#[derive(Clone, Copy)]
pub enum Reaction<'a> {
    Stay,
    /// Hand key input to a modal task until it finishes.
    EnterContext(TaskHandle<'a>),
}

pub type ActionFn<'a> = dyn Fn(&ActionArgs<'a>) -> Reaction<'a> + 'a;

/// Callback plus the payload it receives.
#[derive(Clone, Copy)]
pub struct Callback<'a> {
    action: &'a ActionFn<'a>,
    payload: Payload<'a>,
}

impl<'a> Callback<'a> {
    pub const fn new(action: &'a ActionFn<'a>) -> Self {
        Self {
            action,
            payload: Payload::None,
        }
    }

    pub const fn with_payload(action: &'a ActionFn<'a>, payload: Payload<'a>) -> Self {
        Self { action, payload }
    }

    pub const fn payload(&self) -> Payload<'a> {
        self.payload
    }

    pub fn invoke(&self, item: Option<ItemId>) -> Reaction<'a> {
        (self.action)(&ActionArgs {
            item,
            payload: self.payload,
        })
    }
}

/// Variable binding of a value item.
#[derive(Clone, Copy, Debug)]
pub struct ValueBinding<'a> {
    pub value: ValueRef<'a>,
    pub options: Option<OptionSource<'a>>,
    /// Digits after the decimal point for float and double values.
    pub precision: u8,
}

#[derive(Clone, Copy)]
pub enum ItemKind<'a> {
    Value(ValueBinding<'a>),
    Link(PageId),
    Back(PageId),
    Button(Callback<'a>),
}

pub struct MenuItem<'a> {
    title: &'a str,
    kind: ItemKind<'a>,
    readonly: bool,
    on_save: Option<Callback<'a>>,
    pub(crate) hidden: bool,
    pub(crate) parent: Option<PageId>,
    pub(crate) next: Option<ItemId>,
}

impl<'a> MenuItem<'a> {
    const fn with_kind(title: &'a str, kind: ItemKind<'a>) -> Self {
        Self {
            title,
            kind,
            readonly: false,
            on_save: None,
            hidden: false,
            parent: None,
            next: None,
        }
    }

    /// Editable scalar.
    pub const fn value(title: &'a str, value: ValueRef<'a>) -> Self {
        Self::with_kind(
            title,
            ItemKind::Value(ValueBinding {
                value,
                options: None,
                precision: 2,
            }),
        )
    }

    /// Value cycled through a fixed option catalog.
    pub const fn select(title: &'a str, value: ValueRef<'a>, select: Select<'a>) -> Self {
        Self::with_kind(
            title,
            ItemKind::Value(ValueBinding {
                value,
                options: Some(OptionSource::Select(select)),
                precision: 2,
            }),
        )
    }

    /// Numeric value stepped by a spinner.
    pub const fn spinner(title: &'a str, value: ValueRef<'a>, spinner: Spinner) -> Self {
        Self::with_kind(
            title,
            ItemKind::Value(ValueBinding {
                value,
                options: Some(OptionSource::Spinner(spinner)),
                precision: 2,
            }),
        )
    }

    pub const fn link(title: &'a str, page: PageId) -> Self {
        Self::with_kind(title, ItemKind::Link(page))
    }

    pub const fn button(title: &'a str, action: Callback<'a>) -> Self {
        Self::with_kind(title, ItemKind::Button(action))
    }

    pub(crate) const fn back(parent: PageId) -> Self {
        Self::with_kind(BACK_TITLE, ItemKind::Back(parent))
    }

    pub const fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub const fn with_precision(mut self, precision: u8) -> Self {
        if let ItemKind::Value(binding) = &mut self.kind {
            binding.precision = precision;
        }
        self
    }

    /// Callback fired after a value edit is committed.
    pub const fn on_save(mut self, callback: Callback<'a>) -> Self {
        self.on_save = Some(callback);
        self
    }

    pub const fn title(&self) -> &'a str {
        self.title
    }

    pub const fn kind(&self) -> ItemKind<'a> {
        self.kind
    }

    pub const fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn parent(&self) -> Option<PageId> {
        self.parent
    }

    pub const fn save_callback(&self) -> Option<Callback<'a>> {
        self.on_save
    }

    pub const fn binding(&self) -> Option<ValueBinding<'a>> {
        match self.kind {
            ItemKind::Value(binding) => Some(binding),
            _ => None,
        }
    }

    pub const fn is_back(&self) -> bool {
        matches!(self.kind, ItemKind::Back(_))
    }

    /// Scalar type of a value item without an option source.
    pub fn edit_type(&self) -> Option<ValueType> {
        self.binding()
            .filter(|binding| binding.options.is_none())
            .map(|binding| binding.value.value_type())
    }

    pub(crate) fn set_back_target(&mut self, parent: PageId) {
        if let ItemKind::Back(target) = &mut self.kind {
            *target = parent;
        }
    }
}
