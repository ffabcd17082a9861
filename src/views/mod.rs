pub mod chat;
pub mod dialog;
pub mod preview;
pub mod upload;

pub use chat::ChatPanel;
pub use dialog::ErrorDialog;
pub use preview::PreviewPane;
pub use upload::UploadView;
