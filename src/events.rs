use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

/// What the user asked the app to do this frame.
pub enum Event {
    /// Flip between running and paused
    TogglePause,

    /// Advance a single generation while paused
    Step,

    /// Toggle the cell under the pointer. Coordinates are screen cells;
    /// the renderer converts them to grid coordinates.
    Click { col: u16, row: u16 },

    /// Double the grid density
    ZoomIn,

    /// Halve the grid density
    ZoomOut,

    /// Kill every cell
    Clear,

    /// Exit the application
    Exit,
}

/// Convert a crossterm event into an app event, if it maps to one.
pub fn convert_event(event: CtEvent) -> Option<Event> {
    match event {
        CtEvent::Key(key_event) => convert_key(key_event),
        CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Event::Click { col: column, row }),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    // ignore key release on terminals that report it
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    match key_event {
        KeyEvent {
            code: KeyCode::Char('q'),
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Event::Exit),
        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Some(Event::TogglePause),
        KeyEvent {
            code: KeyCode::Char('n'),
            ..
        } => Some(Event::Step),
        KeyEvent {
            code: KeyCode::Char('+' | '='),
            ..
        } => Some(Event::ZoomIn),
        KeyEvent {
            code: KeyCode::Char('-'),
            ..
        } => Some(Event::ZoomOut),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => Some(Event::Clear),
        _ => None,
    }
}
