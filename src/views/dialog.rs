use crate::state::Workspace;
use dioxus::prelude::*;

/// Blocking error modal. Open whenever the workspace holds an error message.
#[component]
pub fn ErrorDialog(workspace: Signal<Workspace>) -> Element {
    let mut workspace = workspace;
    let message = workspace.read().error.clone();

    rsx! {
        if let Some(message) = message {
            div { id: "errorModal", class: "modal-overlay", role: "alertdialog", aria_modal: "true",
                div { class: "modal",
                    h3 { "Something went wrong" }
                    p { id: "errorMessage", "{message}" }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        autofocus: true,
                        onclick: move |_| workspace.write().dismiss_error(),
                        "Close"
                    }
                }
            }
        }
    }
}
