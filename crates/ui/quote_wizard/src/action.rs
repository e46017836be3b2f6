use quote_core::Intent;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),
    /// Forwarded to the wizard session.
    Wizard(Intent),
    ShowAlert { title: String, message: String },
    ClosePopup,
}
