/// User-level actions produced by input mapping and consumed by `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),

    MoveDown,
    MoveUp,
    GoTop,
    GoBottom,
    PageDown,
    PageUp,
    /// Enter: open chat from the library, enter directory / select file in
    /// the picker, confirm a modal.
    DrillIn,
    /// Esc: back out of a screen, cancel a modal or search.
    NavigateBack,

    StartSearch,
    /// A character in search or compose mode (`'\x08'` = backspace sentinel).
    TextInput(char),
    /// Enter while searching or composing.
    TextConfirm,
    /// Esc while searching or composing.
    TextCancel,

    /// Request deletion of the selected paper (opens the confirmation modal).
    Delete,
    /// Open the upload screen.
    OpenUpload,
    /// Start uploading the selected file.
    StartUpload,
    /// Manual collection refresh.
    Refresh,

    ToggleHelp,
    None,
}
