//! Page updates for each controller transition.
//!
//! Optional elements (the save banners) may be absent; writes to them are
//! skipped. Required elements are checked once when the controller attaches.

use shared::{
    catalog::{
        catalyst_label_or_raw, catalysts_for_key, reaction_type_label_or_raw, Catalyst,
        ReactionType, EXAMPLE_COMPOUNDS,
    },
    protocol::{PredictionResult, NO_PRODUCT},
};

use crate::ui::page::{Content, Element, ElementId, Page, SelectOption, CATALYST_PLACEHOLDER};

pub const NO_PRODUCT_VISUALIZATION: &str =
    r#"<div class="alert alert-warning">No product visualization available</div>"#;

fn update(page: &mut Page, id: ElementId, f: impl FnOnce(&mut Element)) {
    if let Some(element) = page.element_mut(id) {
        f(element);
    }
}

fn show(page: &mut Page, id: ElementId) {
    update(page, id, Element::show);
}

fn hide(page: &mut Page, id: ElementId) {
    update(page, id, Element::hide);
}

fn set_text(page: &mut Page, id: ElementId, text: &str) {
    update(page, id, |element| element.set_text(text));
}

fn set_markup(page: &mut Page, id: ElementId, markup: &str) {
    update(page, id, |element| element.set_markup(markup));
}

pub fn populate_examples(page: &mut Page) {
    update(page, ElementId::ExampleList, |list| {
        for compound in EXAMPLE_COMPOUNDS {
            list.push_entry(*compound);
        }
    });
}

pub fn populate_reaction_types(page: &mut Page) {
    update(page, ElementId::ReactionTypeSelect, |select| {
        for reaction_type in ReactionType::ALL {
            select.push_option(
                SelectOption::new(reaction_type.key(), reaction_type.label()),
                false,
            );
        }
    });
}

pub fn populate_catalysts(page: &mut Page) {
    update(page, ElementId::CatalystSelect, |select| {
        push_catalysts(select, Catalyst::ALL);
    });
}

/// Placeholder first, then the catalysts the filter table lists for `reaction_type`.
pub fn filter_catalysts(page: &mut Page, reaction_type: &str) {
    update(page, ElementId::CatalystSelect, |select| {
        select.clear_options();
        select.push_option(SelectOption::placeholder(CATALYST_PLACEHOLDER), true);
        push_catalysts(select, catalysts_for_key(reaction_type));
    });
}

fn push_catalysts(select: &mut Element, catalysts: &[Catalyst]) {
    for catalyst in catalysts {
        select.push_option(SelectOption::new(catalyst.key(), catalyst.label()), false);
    }
}

pub fn set_compound(page: &mut Page, compound: &str) {
    update(page, ElementId::CompoundInput, |input| input.set_value(compound));
}

pub fn begin_prediction(page: &mut Page) {
    show_loading(page);
    hide(page, ElementId::ErrorPanel);
    hide(page, ElementId::ResultsPanel);
    hide(page, ElementId::InitialMessage);
    clear_save_banners(page);
}

pub fn show_loading(page: &mut Page) {
    show(page, ElementId::Loading);
}

pub fn render_prediction(page: &mut Page, result: &PredictionResult) {
    hide(page, ElementId::Loading);
    hide(page, ElementId::ErrorPanel);
    show(page, ElementId::ResultsPanel);

    set_markup(page, ElementId::ReactantStructure, &result.reactant_svg);
    set_text(page, ElementId::ReactantName, &result.reactant);

    match &result.product_svg {
        Some(svg) => {
            set_markup(page, ElementId::ProductStructure, svg);
            set_text(
                page,
                ElementId::ProductName,
                result.product.as_deref().unwrap_or_default(),
            );
        }
        None => {
            set_markup(page, ElementId::ProductStructure, NO_PRODUCT_VISUALIZATION);
            set_text(
                page,
                ElementId::ProductName,
                result.product.as_deref().unwrap_or(NO_PRODUCT),
            );
        }
    }

    set_text(
        page,
        ElementId::ResultReactionType,
        reaction_type_label_or_raw(&result.reaction_type),
    );
    set_text(
        page,
        ElementId::ResultCatalyst,
        catalyst_label_or_raw(&result.catalyst),
    );
    set_text(page, ElementId::ReactionDetails, result.details_text());
}

pub fn render_prediction_error(page: &mut Page, message: &str) {
    hide(page, ElementId::Loading);
    hide(page, ElementId::ResultsPanel);
    show(page, ElementId::ErrorPanel);
    set_text(page, ElementId::ErrorText, message);
}

pub fn clear_save_banners(page: &mut Page) {
    hide(page, ElementId::SaveSuccess);
    hide(page, ElementId::SaveError);
}

pub fn render_save_success(page: &mut Page) {
    hide(page, ElementId::SaveError);
    show(page, ElementId::SaveSuccess);
}

pub fn hide_save_success(page: &mut Page) {
    hide(page, ElementId::SaveSuccess);
}

pub fn render_save_error(page: &mut Page, message: &str) {
    hide(page, ElementId::SaveSuccess);
    show(page, ElementId::SaveError);
    set_text(page, ElementId::SaveErrorText, message);
}

/// Plain-text rendering of whatever the page currently shows.
pub fn describe(page: &Page) -> String {
    let mut lines = Vec::new();
    let line = |id: ElementId| -> String {
        let shown = match page.element(id).map(Element::content) {
            Some(Content::Text(text)) => text.clone(),
            Some(Content::Markup(markup)) => format!("[markup, {} bytes]", markup.len()),
            Some(Content::Empty) | None => String::new(),
        };
        format!("{:>22}: {shown}", id.dom_id())
    };

    if page.is_visible(ElementId::Loading) {
        lines.push("loading...".to_string());
    }
    if page.is_visible(ElementId::InitialMessage) {
        lines.push("no prediction yet".to_string());
    }
    if page.is_visible(ElementId::ErrorPanel) {
        lines.push(line(ElementId::ErrorText));
    }
    if page.is_visible(ElementId::ResultsPanel) {
        for id in [
            ElementId::ReactantName,
            ElementId::ReactantStructure,
            ElementId::ProductName,
            ElementId::ProductStructure,
            ElementId::ResultReactionType,
            ElementId::ResultCatalyst,
            ElementId::ReactionDetails,
        ] {
            lines.push(line(id));
        }
    }
    if page.is_visible(ElementId::SaveSuccess) {
        lines.push("reaction saved".to_string());
    }
    if page.is_visible(ElementId::SaveError) {
        lines.push(line(ElementId::SaveErrorText));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethanol_result() -> PredictionResult {
        PredictionResult {
            reactant: "ethanol".to_string(),
            reactant_svg: "<svg/>".to_string(),
            product: None,
            product_svg: None,
            reaction_type: "oxidation".to_string(),
            catalyst: "kmno4".to_string(),
            reaction_details: Some("...".to_string()),
        }
    }

    #[test]
    fn missing_product_renders_notice_and_fallback_name() {
        let mut page = Page::standard();
        render_prediction(&mut page, &ethanol_result());

        assert_eq!(page.text(ElementId::ReactantName), "ethanol");
        assert_eq!(page.markup(ElementId::ReactantStructure), Some("<svg/>"));
        assert_eq!(page.text(ElementId::ProductName), "No product");
        assert_eq!(
            page.markup(ElementId::ProductStructure),
            Some(NO_PRODUCT_VISUALIZATION)
        );
        assert_eq!(
            page.text(ElementId::ResultCatalyst),
            "Potassium Permanganate (KMnO₄)"
        );
        assert_eq!(page.text(ElementId::ResultReactionType), "Oxidation");
    }

    #[test]
    fn product_name_without_structure_is_kept() {
        let mut page = Page::standard();
        let mut result = ethanol_result();
        result.product = Some("acetaldehyde".to_string());
        render_prediction(&mut page, &result);
        assert_eq!(page.text(ElementId::ProductName), "acetaldehyde");
        assert_eq!(
            page.markup(ElementId::ProductStructure),
            Some(NO_PRODUCT_VISUALIZATION)
        );
    }

    #[test]
    fn unknown_keys_render_raw() {
        let mut page = Page::standard();
        let mut result = ethanol_result();
        result.reaction_type = "reduction".to_string();
        result.catalyst = "lialh4".to_string();
        result.reaction_details = None;
        render_prediction(&mut page, &result);
        assert_eq!(page.text(ElementId::ResultReactionType), "reduction");
        assert_eq!(page.text(ElementId::ResultCatalyst), "lialh4");
        assert_eq!(
            page.text(ElementId::ReactionDetails),
            "No detailed information available."
        );
    }

    #[test]
    fn result_and_error_panels_replace_each_other() {
        let mut page = Page::standard();
        render_prediction(&mut page, &ethanol_result());
        render_prediction_error(&mut page, "bad compound");
        assert!(page.is_visible(ElementId::ErrorPanel));
        assert!(!page.is_visible(ElementId::ResultsPanel));

        render_prediction(&mut page, &ethanol_result());
        assert!(page.is_visible(ElementId::ResultsPanel));
        assert!(!page.is_visible(ElementId::ErrorPanel));
    }

    #[test]
    fn save_banner_writes_are_skipped_without_save_controls() {
        let mut page = Page::without_save_controls();
        render_save_success(&mut page);
        render_save_error(&mut page, "Failed to save reaction.");
        assert!(!page.contains(ElementId::SaveError));
        assert_eq!(page.text(ElementId::SaveErrorText), "");
    }

    #[test]
    fn describe_lists_visible_results() {
        let mut page = Page::standard();
        begin_prediction(&mut page);
        assert!(describe(&page).contains("loading"));

        render_prediction(&mut page, &ethanol_result());
        let text = describe(&page);
        assert!(text.contains("reactant-name: ethanol"));
        assert!(!text.contains("loading"));
    }
}
