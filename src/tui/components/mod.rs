//! # TUI Components
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ TitleBar        endpoint | status | verdict  │
//! │ ╭ DAX expression ──────────────────────────╮ │
//! │ │ InputBox                                 │ │
//! │ ╰──────────────────────────────────────────╯ │
//! │ [ Validate ]              ValidateButton     │
//! │ ✓ Quick-sanity OK         (hint line, ui.rs) │
//! │ ╭ Result ──────────────────────────────────╮ │
//! │ │ ResultView                               │ │
//! │ ╰──────────────────────────────────────────╯ │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Stateless components (`TitleBar`, `ValidateButton`) receive everything as
//! props. Stateful ones keep their state in `TuiState`: `InputBox` owns the
//! text buffer and cursor, `ResultViewState` owns the scroll offset.

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod result_view;
pub use result_view::{ResultView, ResultViewState};
pub mod validate_button;
pub use validate_button::ValidateButton;
