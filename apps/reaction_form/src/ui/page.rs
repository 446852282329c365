//! Headless model of the host document the form controller drives.
//!
//! Only the elements the controller touches are modelled. Each one can be
//! shown or hidden (the `d-none` toggle), hold text or verbatim markup, and,
//! depending on its role, carry an input value, select options or the
//! example-compound entries.

use std::collections::BTreeMap;

use shared::protocol::PredictionForm;
use thiserror::Error;

pub const REACTION_TYPE_PLACEHOLDER: &str = "Select reaction type";
pub const CATALYST_PLACEHOLDER: &str = "Select catalyst/reagent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Form,
    Loading,
    ErrorPanel,
    ErrorText,
    ResultsPanel,
    InitialMessage,
    ExampleList,
    CompoundInput,
    ReactionTypeSelect,
    CatalystSelect,
    ReactantStructure,
    ReactantName,
    ProductStructure,
    ProductName,
    ResultReactionType,
    ResultCatalyst,
    ReactionDetails,
    SaveTrigger,
    SaveSuccess,
    SaveError,
    SaveErrorText,
}

impl ElementId {
    /// Elements the controller cannot start without.
    pub const REQUIRED: &'static [ElementId] = &[
        ElementId::Form,
        ElementId::Loading,
        ElementId::ErrorPanel,
        ElementId::ErrorText,
        ElementId::ResultsPanel,
        ElementId::InitialMessage,
        ElementId::ExampleList,
        ElementId::CompoundInput,
        ElementId::ReactionTypeSelect,
        ElementId::CatalystSelect,
        ElementId::ReactantStructure,
        ElementId::ReactantName,
        ElementId::ProductStructure,
        ElementId::ProductName,
        ElementId::ResultReactionType,
        ElementId::ResultCatalyst,
        ElementId::ReactionDetails,
    ];

    /// Optional save affordance. Pages without it get no save wiring.
    pub const SAVE_CONTROLS: &'static [ElementId] = &[
        ElementId::SaveTrigger,
        ElementId::SaveSuccess,
        ElementId::SaveError,
        ElementId::SaveErrorText,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            ElementId::Form => "reaction-form",
            ElementId::Loading => "loading",
            ElementId::ErrorPanel => "error-message",
            ElementId::ErrorText => "error-text",
            ElementId::ResultsPanel => "results-container",
            ElementId::InitialMessage => "initial-message",
            ElementId::ExampleList => "alcohol-examples",
            ElementId::CompoundInput => "compound",
            ElementId::ReactionTypeSelect => "reaction_type",
            ElementId::CatalystSelect => "catalyst",
            ElementId::ReactantStructure => "reactant-structure",
            ElementId::ReactantName => "reactant-name",
            ElementId::ProductStructure => "product-structure",
            ElementId::ProductName => "product-name",
            ElementId::ResultReactionType => "result-reaction-type",
            ElementId::ResultCatalyst => "result-catalyst",
            ElementId::ReactionDetails => "reaction-details",
            ElementId::SaveTrigger => "save-reaction",
            ElementId::SaveSuccess => "save-success",
            ElementId::SaveError => "save-error",
            ElementId::SaveErrorText => "save-error-text",
        }
    }

    fn hidden_initially(self) -> bool {
        matches!(
            self,
            ElementId::Loading
                | ElementId::ErrorPanel
                | ElementId::ResultsPanel
                | ElementId::SaveSuccess
                | ElementId::SaveError
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("required element #{0} is missing from the page")]
    MissingElement(&'static str),
    #[error("#{select} has no option '{value}'")]
    UnknownOption { select: &'static str, value: String },
    #[error("option '{value}' of #{select} is disabled")]
    DisabledOption { select: &'static str, value: String },
    #[error("please fill out #{0}")]
    ValueMissing(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            label: label.into(),
            disabled: true,
        }
    }
}

/// A clickable `a.dropdown-item` inside the example list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleEntry {
    pub text: String,
    pub href: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    hidden: bool,
    content: Content,
    value: String,
    options: Vec<SelectOption>,
    selected: Option<usize>,
    entries: Vec<ExampleEntry>,
}

impl Element {
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Like `textContent`: replaces any markup.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Content::Text(text.into());
    }

    /// Like `innerHTML`: the markup is kept verbatim.
    pub fn set_markup(&mut self, markup: impl Into<String>) {
        self.content = Content::Markup(markup.into());
    }

    pub fn text(&self) -> &str {
        match &self.content {
            Content::Text(text) => text,
            Content::Empty | Content::Markup(_) => "",
        }
    }

    pub fn markup(&self) -> Option<&str> {
        match &self.content {
            Content::Markup(markup) => Some(markup),
            Content::Empty | Content::Text(_) => None,
        }
    }

    pub fn value(&self) -> &str {
        match self.selected_option() {
            Some(option) => &option.value,
            None => &self.value,
        }
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|idx| self.options.get(idx))
    }

    pub fn clear_options(&mut self) {
        self.options.clear();
        self.selected = None;
    }

    /// Appends an option. With nothing selected yet, the first enabled option
    /// (or one pushed with `selected`) becomes the selection.
    pub fn push_option(&mut self, option: SelectOption, selected: bool) {
        let take_selection = selected || (self.selected.is_none() && !option.disabled);
        self.options.push(option);
        if take_selection {
            self.selected = Some(self.options.len() - 1);
        }
    }

    pub fn entries(&self) -> &[ExampleEntry] {
        &self.entries
    }

    pub fn push_entry(&mut self, text: impl Into<String>) {
        self.entries.push(ExampleEntry {
            text: text.into(),
            href: "#",
        });
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    elements: BTreeMap<ElementId, Element>,
}

impl Page {
    /// The full page, save affordance included.
    pub fn standard() -> Self {
        Self::with_elements(
            ElementId::REQUIRED
                .iter()
                .chain(ElementId::SAVE_CONTROLS)
                .copied(),
        )
    }

    pub fn without_save_controls() -> Self {
        Self::with_elements(ElementId::REQUIRED.iter().copied())
    }

    pub fn with_elements(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let elements = ids
            .into_iter()
            .map(|id| {
                let mut element = Element {
                    hidden: id.hidden_initially(),
                    ..Element::default()
                };
                match id {
                    ElementId::ReactionTypeSelect => element
                        .push_option(SelectOption::placeholder(REACTION_TYPE_PLACEHOLDER), true),
                    ElementId::CatalystSelect => element
                        .push_option(SelectOption::placeholder(CATALYST_PLACEHOLDER), true),
                    _ => {}
                }
                (id, element)
            })
            .collect();
        Self { elements }
    }

    pub fn without(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn check_required(&self) -> Result<(), PageError> {
        match ElementId::REQUIRED.iter().find(|id| !self.contains(**id)) {
            Some(missing) => Err(PageError::MissingElement(missing.dom_id())),
            None => Ok(()),
        }
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(Element::is_visible)
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.element(id).map_or("", Element::text)
    }

    pub fn markup(&self, id: ElementId) -> Option<&str> {
        self.element(id).and_then(Element::markup)
    }

    pub fn value(&self, id: ElementId) -> &str {
        self.element(id).map_or("", Element::value)
    }

    pub fn options(&self, id: ElementId) -> &[SelectOption] {
        match self.element(id) {
            Some(element) => element.options(),
            None => &[],
        }
    }

    /// What typing into the compound field does.
    pub fn type_compound(&mut self, text: &str) -> Result<(), PageError> {
        self.required_mut(ElementId::CompoundInput)?.set_value(text);
        Ok(())
    }

    /// What picking an option with the mouse does. Disabled options can't be picked.
    pub fn choose_option(&mut self, id: ElementId, value: &str) -> Result<(), PageError> {
        let select = self.required_mut(id)?;
        let Some(idx) = select.options.iter().position(|o| o.value == value) else {
            return Err(PageError::UnknownOption {
                select: id.dom_id(),
                value: value.to_string(),
            });
        };
        if select.options[idx].disabled {
            return Err(PageError::DisabledOption {
                select: id.dom_id(),
                value: value.to_string(),
            });
        }
        select.selected = Some(idx);
        Ok(())
    }

    /// The `required` attribute check the browser runs before a submit event.
    pub fn validate_form(&self) -> Result<(), PageError> {
        for id in [
            ElementId::CompoundInput,
            ElementId::ReactionTypeSelect,
            ElementId::CatalystSelect,
        ] {
            if self.value(id).is_empty() {
                return Err(PageError::ValueMissing(id.dom_id()));
            }
        }
        Ok(())
    }

    pub fn form_data(&self) -> PredictionForm {
        PredictionForm::new(
            self.value(ElementId::CompoundInput),
            self.value(ElementId::CatalystSelect),
            self.value(ElementId::ReactionTypeSelect),
        )
    }

    fn required_mut(&mut self, id: ElementId) -> Result<&mut Element, PageError> {
        self.elements
            .get_mut(&id)
            .ok_or(PageError::MissingElement(id.dom_id()))
    }
}
