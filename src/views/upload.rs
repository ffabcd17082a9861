use crate::api::{HttpBackend, UploadFile};
use crate::config;
use crate::error::UploadError;
use crate::state::{Admission, Workspace};
use crate::timer;
use crate::upload::{
    self, FileCandidate, MAIN_VIEW_DELAY, PROGRESS_TICK, UploadPhase, UploadProgress,
};
use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use futures::future::{Either, select};
use std::sync::Arc;

const FILE_INPUT_ID: &str = "fileInput";

#[component]
pub fn UploadView(workspace: Signal<Workspace>) -> Element {
    let mut workspace = workspace;
    let backend = use_context::<HttpBackend>();
    let max_bytes = config::get().max_upload_bytes;
    let max_mb = max_bytes / (1024 * 1024);
    let panel = workspace.read().upload.clone();
    let area_class = if panel.dragover {
        "upload-area dragover"
    } else {
        "upload-area"
    };

    rsx! {
        section { id: "uploadSection", class: "upload-section",
            label {
                class: area_class,
                r#for: FILE_INPUT_ID,
                ondragenter: move |ev| {
                    ev.prevent_default();
                    if !workspace.peek().upload.dragover {
                        workspace.write().upload.dragover = true;
                    }
                },
                ondragover: move |ev| {
                    ev.prevent_default();
                    if !workspace.peek().upload.dragover {
                        workspace.write().upload.dragover = true;
                    }
                },
                ondragleave: move |ev| {
                    ev.prevent_default();
                    workspace.write().upload.dragover = false;
                },
                ondrop: move |ev| {
                    ev.prevent_default();
                    workspace.write().upload.dragover = false;
                    if let Some(engine) = ev.files() {
                        spawn(handle_files(workspace, backend.clone(), engine, max_bytes));
                    }
                },
                if panel.phase == UploadPhase::Idle {
                    div { class: "upload-content",
                        div { class: "upload-icon", "📄" }
                        h2 { "Upload your PDF" }
                        p { "Drag and drop a file here, or" }
                        span { class: "btn btn-primary", "Browse files" }
                        p { class: "upload-hint", "PDF only, up to {max_mb}MB" }
                    }
                } else {
                    UploadProgressBar { progress: panel.progress, status: panel.status.clone() }
                }
            }
            for generation in std::iter::once(panel.picker_generation) {
                FilePicker { key: "{generation}", workspace }
            }
        }
    }
}

/// Hidden file input behind the drop zone's label. Keyed on the panel's
/// picker generation so a reset gives a fresh, empty input.
#[component]
fn FilePicker(workspace: Signal<Workspace>) -> Element {
    let backend = use_context::<HttpBackend>();
    let max_bytes = config::get().max_upload_bytes;
    let uploading = workspace.read().is_uploading();

    rsx! {
        input {
            id: FILE_INPUT_ID,
            class: "visually-hidden",
            r#type: "file",
            accept: ".pdf,application/pdf",
            disabled: uploading,
            onchange: move |ev| {
                if let Some(engine) = ev.files() {
                    spawn(handle_files(workspace, backend.clone(), engine, max_bytes));
                }
            },
        }
    }
}

#[component]
fn UploadProgressBar(progress: f64, status: String) -> Element {
    rsx! {
        div { id: "uploadProgress", class: "upload-progress",
            div { class: "progress-bar",
                div { id: "progressFill", class: "progress-fill", style: "width: {progress:.1}%;" }
            }
            p { id: "uploadStatus", class: "upload-status", "{status}" }
        }
    }
}

/// Validate, read, and send the first file, ticking the cosmetic progress
/// bar while the request is outstanding.
async fn handle_files(
    mut workspace: Signal<Workspace>,
    backend: HttpBackend,
    engine: Arc<dyn FileEngine>,
    max_bytes: u64,
) {
    let Some(name) = engine.files().into_iter().next() else {
        return;
    };
    let size = engine.file_size(&name).await.unwrap_or_default();
    let candidate = FileCandidate::new(name.clone(), size);
    if workspace.write().admit_upload(&candidate, max_bytes) != Admission::Accepted {
        return;
    }

    let Some(bytes) = engine.read_file(&name).await else {
        workspace.write().abort_upload(UploadError::Unreadable(name));
        return;
    };
    // file_size is best effort on some platforms
    if bytes.len() as u64 > max_bytes {
        workspace.write().abort_upload(UploadError::TooLarge {
            size: bytes.len() as u64,
            limit: max_bytes,
        });
        return;
    }

    let file = UploadFile {
        name,
        mime: candidate.mime,
        bytes,
    };
    let request = std::pin::pin!(upload::send_file(&backend, file));
    let ticker = std::pin::pin!(async move {
        let mut progress = UploadProgress::default();
        let mut rng = rand::thread_rng();
        while workspace.peek().is_uploading() {
            timer::sleep(PROGRESS_TICK).await;
            let percent = progress.advance(&mut rng);
            workspace.write().set_upload_progress(percent);
        }
    });

    let result = match select(request, ticker).await {
        Either::Left((result, _)) => result,
        Either::Right(((), request)) => request.await,
    };

    if workspace.write().finish_upload(result) {
        timer::sleep(MAIN_VIEW_DELAY).await;
        workspace.write().show_main();
    }
}
