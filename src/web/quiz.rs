// quiz.rs - DOM controller for the quiz form
//
// Binds the pure quiz logic to the page: the OS-conditional Q5 blocks,
// inline error messages, and the confirmation dialog. Element ids match
// the markup the page ships with; a missing optional element leaves that
// one feature inert.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    KeyboardEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::quiz::{
    validate, Answer, FieldId, FormState, Modal, Os, SubmitAction, QUESTION_COUNT,
};

const FORM_ID: &str = "quiz-form";
const NAME_ID: &str = "nom";
const OS_ID: &str = "os";
const MODAL_ID: &str = "confirm-modal";
const MODAL_YES_ID: &str = "modal-yes";
const MODAL_NO_ID: &str = "modal-no";
const SUBMIT_ID: &str = "submit-btn";
const BODY_MODAL_CLASS: &str = "below-modal";
const ERROR_CLASS: &str = "error-msg";

struct Controller {
    document: Document,
    form: HtmlFormElement,
    modal: RefCell<Modal>,
}

/// Attach the controller. Returns false (and installs nothing) when the
/// page has no quiz form.
pub fn init(document: &Document) -> Result<bool, JsValue> {
    let Some(form_el) = document.get_element_by_id(FORM_ID) else {
        return Ok(false);
    };
    let form: HtmlFormElement = form_el.dyn_into()?;

    let ctl = Rc::new(Controller {
        document: document.clone(),
        form,
        modal: RefCell::new(Modal::new()),
    });

    ensure_question_block_ids(&ctl.form)?;
    ctl.sync_q5_blocks(ctl.selected_os());

    install_os_listener(&ctl)?;
    install_clear_listeners(&ctl)?;
    install_submit_listener(&ctl)?;
    install_modal_listeners(&ctl)?;

    Ok(true)
}

impl Controller {
    fn selected_os(&self) -> Option<Os> {
        let select = self
            .document
            .get_element_by_id(OS_ID)?
            .dyn_into::<HtmlSelectElement>()
            .ok()?;
        Os::parse(&select.value())
    }

    /// Exactly one Q5 block is visible at a time; no selection hides all
    /// three.
    fn sync_q5_blocks(&self, selected: Option<Os>) {
        for os in Os::ALL {
            let Some(block) = self
                .document
                .get_element_by_id(&format!("q5-{}", os.key()))
            else {
                continue;
            };
            if Some(os) == selected {
                let _ = block.remove_attribute("hidden");
            } else {
                let _ = block.set_attribute("hidden", "");
            }
        }
    }

    fn read_form(&self) -> FormState {
        let name = self
            .document
            .get_element_by_id(NAME_ID)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();

        // Radio groups share a name per question, so one checked query
        // per group is enough.
        let mut answers = [None; QUESTION_COUNT];
        for (i, slot) in answers.iter_mut().enumerate() {
            let selector = format!("input[name=\"q{}\"]:checked", i + 1);
            *slot = self
                .form
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .and_then(|input| Answer::parse(&input.value()));
        }

        FormState {
            name,
            os: self.selected_os(),
            answers,
        }
    }

    /// Container element an error for `field` anchors to. Q5 anchors to
    /// whichever OS block is currently visible; with no OS chosen there is
    /// nowhere sensible to anchor it.
    fn field_container(&self, field: FieldId) -> Option<Element> {
        match field {
            FieldId::Name => self
                .document
                .get_element_by_id(NAME_ID)
                .and_then(|el| el.closest(".field").ok().flatten()),
            FieldId::Os => self
                .document
                .get_element_by_id(OS_ID)
                .and_then(|el| el.closest(".field").ok().flatten()),
            FieldId::Question(5) => {
                let os = self.selected_os()?;
                self.document.get_element_by_id(&format!("q5-{}", os.key()))
            }
            FieldId::Question(n) => self.document.get_element_by_id(&format!("q-block-q{n}")),
        }
    }

    /// Validate and paint a verdict on every field container. Returns
    /// whether the form may proceed to confirmation.
    fn run_validation(&self) -> bool {
        let form = self.read_form();
        let errors = validate(&form);

        let mut fields = vec![FieldId::Name, FieldId::Os];
        fields.extend((1..=QUESTION_COUNT as u8).map(FieldId::Question));

        for field in fields {
            let Some(container) = self.field_container(field) else {
                continue;
            };
            match errors.iter().find(|e| e.field == field) {
                Some(err) => set_error(&self.document, &container, &err.message),
                None => mark_valid(&container),
            }
        }

        if !errors.is_empty() {
            self.scroll_to_first_invalid();
        }
        errors.is_empty()
    }

    fn scroll_to_first_invalid(&self) {
        if let Ok(Some(first)) = self.form.query_selector(".invalid") {
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Center);
            first.scroll_into_view_with_scroll_into_view_options(&opts);
        }
    }

    fn open_modal(&self) {
        let Some(modal) = self.document.get_element_by_id(MODAL_ID) else {
            return;
        };
        let _ = modal.remove_attribute("hidden");
        if let Some(body) = self.document.body() {
            let _ = body.class_list().add_1(BODY_MODAL_CLASS);
        }
        focus_by_id(&self.document, MODAL_YES_ID);
    }

    fn close_modal(&self) {
        let Some(modal) = self.document.get_element_by_id(MODAL_ID) else {
            return;
        };
        let _ = modal.set_attribute("hidden", "");
        if let Some(body) = self.document.body() {
            let _ = body.class_list().remove_1(BODY_MODAL_CLASS);
        }
        focus_by_id(&self.document, SUBMIT_ID);
    }
}

// The validation anchors on block ids; assign them when the markup left
// them out.
fn ensure_question_block_ids(form: &HtmlFormElement) -> Result<(), JsValue> {
    let blocks = form.query_selector_all(".q-block")?;
    for i in 0..blocks.length() {
        let Some(node) = blocks.item(i) else { continue };
        let Ok(el) = node.dyn_into::<Element>() else { continue };
        if el.id().is_empty() {
            el.set_id(&format!("q-block-q{}", i + 1));
        }
    }
    Ok(())
}

fn install_os_listener(ctl: &Rc<Controller>) -> Result<(), JsValue> {
    let Some(select) = ctl.document.get_element_by_id(OS_ID) else {
        return Ok(());
    };
    let on_change = {
        let ctl = ctl.clone();
        Closure::wrap(Box::new(move || {
            ctl.sync_q5_blocks(ctl.selected_os());
        }) as Box<dyn FnMut()>)
    };
    select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

// Any edit clears the verdict on its own field container.
fn install_clear_listeners(ctl: &Rc<Controller>) -> Result<(), JsValue> {
    for kind in ["input", "change"] {
        let on_edit = Closure::wrap(Box::new(move |e: Event| {
            let Some(target) = e.target() else { return };
            let Some(el) = target.dyn_ref::<Element>() else { return };
            if let Ok(Some(wrapper)) = el.closest(".field, .q-block") {
                clear_error(&wrapper);
            }
        }) as Box<dyn FnMut(Event)>);
        ctl.form
            .add_event_listener_with_callback(kind, on_edit.as_ref().unchecked_ref())?;
        on_edit.forget();
    }
    Ok(())
}

fn install_submit_listener(ctl: &Rc<Controller>) -> Result<(), JsValue> {
    let on_submit = {
        let ctl = ctl.clone();
        Closure::wrap(Box::new(move |e: Event| {
            if ctl.modal.borrow().armed() {
                // The confirmed submission; spend the latch and let the
                // event through untouched.
                ctl.modal.borrow_mut().on_submit(true);
                return;
            }
            e.prevent_default();
            let valid = ctl.run_validation();
            if ctl.modal.borrow_mut().on_submit(valid) == SubmitAction::OpenModal {
                ctl.open_modal();
            }
        }) as Box<dyn FnMut(Event)>)
    };
    ctl.form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

// Clicks are delegated at the document so the buttons and the backdrop
// share one listener; Escape closes from anywhere.
fn install_modal_listeners(ctl: &Rc<Controller>) -> Result<(), JsValue> {
    let on_click = {
        let ctl = ctl.clone();
        Closure::wrap(Box::new(move |e: Event| {
            let Some(target) = e.target() else { return };
            let Some(el) = target.dyn_ref::<Element>() else { return };
            match el.id().as_str() {
                MODAL_YES_ID => {
                    if ctl.modal.borrow_mut().confirm() {
                        ctl.close_modal();
                        // Native submission; the armed latch lets it pass
                        // the interceptor if the browser routes it there.
                        let _ = ctl.form.submit();
                    }
                }
                MODAL_NO_ID | MODAL_ID => {
                    ctl.modal.borrow_mut().dismiss();
                    ctl.close_modal();
                }
                _ => {}
            }
        }) as Box<dyn FnMut(Event)>)
    };
    ctl.document
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_key = {
        let ctl = ctl.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if e.key() == "Escape" && ctl.modal.borrow().is_open() {
                ctl.modal.borrow_mut().dismiss();
                ctl.close_modal();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    ctl.document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    Ok(())
}

fn ensure_error_el(document: &Document, container: &Element) -> Option<Element> {
    if let Ok(Some(existing)) = container.query_selector(&format!(".{ERROR_CLASS}")) {
        return Some(existing);
    }
    let err = document.create_element("div").ok()?;
    err.set_class_name(ERROR_CLASS);
    container.append_child(&err).ok()?;
    Some(err)
}

fn set_error(document: &Document, container: &Element, message: &str) {
    let classes = container.class_list();
    let _ = classes.add_1("invalid");
    let _ = classes.remove_1("valid");
    if let Some(err) = ensure_error_el(document, container) {
        err.set_text_content(Some(message));
    }
    if let Ok(Some(input)) = container.query_selector("input, select, textarea, fieldset") {
        let _ = input.set_attribute("aria-invalid", "true");
    }
}

fn mark_valid(container: &Element) {
    let classes = container.class_list();
    let _ = classes.remove_1("invalid");
    let _ = classes.add_1("valid");
    reset_error_state(container);
}

fn clear_error(container: &Element) {
    let classes = container.class_list();
    let _ = classes.remove_1("invalid");
    let _ = classes.remove_1("valid");
    reset_error_state(container);
}

fn reset_error_state(container: &Element) {
    if let Ok(Some(err)) = container.query_selector(&format!(".{ERROR_CLASS}")) {
        err.set_text_content(Some(""));
    }
    if let Ok(Some(input)) = container.query_selector("input, select, textarea, fieldset") {
        let _ = input.remove_attribute("aria-invalid");
    }
}

fn focus_by_id(document: &Document, id: &str) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = el.focus();
    }
}
