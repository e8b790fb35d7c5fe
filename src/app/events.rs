//! Eingabe-Modell der Zeichenfläche und Aufgaben der Dispatch-Queue.

use glam::Vec2;

/// Gedrückte Maustasten zum Zeitpunkt des Events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

/// Gedrückte Modifier-Tasten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

/// Zeiger-Event in Fensterkoordinaten (vor Zoom-Korrektur).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
    pub click_count: u32,
}

impl PointerEvent {
    /// Einfacher Klick mit der Primärtaste.
    pub fn primary(position: Vec2) -> Self {
        Self {
            position,
            buttons: MouseButtons {
                primary: true,
                ..Default::default()
            },
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }

    /// Einfacher Klick mit der Sekundärtaste.
    pub fn secondary(position: Vec2) -> Self {
        Self {
            buttons: MouseButtons {
                secondary: true,
                ..Default::default()
            },
            ..Self::primary(position)
        }
    }

    /// Zeigerbewegung ohne gedrückte Taste.
    pub fn hover(position: Vec2) -> Self {
        Self {
            buttons: MouseButtons::default(),
            click_count: 0,
            ..Self::primary(position)
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_click_count(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Genau die Primärtaste, keine weiteren Tasten oder Modifier.
    pub fn is_primary_only(&self) -> bool {
        self.buttons.primary && !self.buttons.secondary && !self.buttons.middle && self.modifiers.none()
    }

    /// Primärtaste mit Shift (weitere Modifier erlaubt).
    pub fn is_shift_primary(&self) -> bool {
        self.buttons.primary && self.modifiers.shift
    }

    /// Genau die Sekundärtaste, nichts sonst.
    pub fn is_secondary_only(&self) -> bool {
        self.buttons.secondary && !self.buttons.primary && !self.buttons.middle && self.modifiers.none()
    }

    /// Genau die mittlere Taste, nichts sonst.
    pub fn is_middle_only(&self) -> bool {
        self.buttons.middle && !self.buttons.primary && !self.buttons.secondary && self.modifiers.none()
    }
}

/// Tasten, die von Gesten ausgewertet werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
    Character(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Alle Eingaben, die der Host an die Zeichenfläche liefert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerPressed(PointerEvent),
    PointerReleased(PointerEvent),
    PointerDragged(PointerEvent),
    PointerMoved(PointerEvent),
    KeyPressed(KeyEvent),
    KeyTyped(char),
    /// Mausrad: positive Rotation zoomt hinein
    Wheel { rotation: i32 },
    PointerEntered,
    PointerExited,
}

impl InputEvent {
    /// Zeiger-Event, falls vorhanden.
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            InputEvent::PointerPressed(e)
            | InputEvent::PointerReleased(e)
            | InputEvent::PointerDragged(e)
            | InputEvent::PointerMoved(e) => Some(e),
            _ => None,
        }
    }

    /// Gleiches Event mit transformierter Zeigerposition.
    pub fn map_position(self, f: impl Fn(Vec2) -> Vec2) -> Self {
        let map = |mut e: PointerEvent| {
            e.position = f(e.position);
            e
        };
        match self {
            InputEvent::PointerPressed(e) => InputEvent::PointerPressed(map(e)),
            InputEvent::PointerReleased(e) => InputEvent::PointerReleased(map(e)),
            InputEvent::PointerDragged(e) => InputEvent::PointerDragged(map(e)),
            InputEvent::PointerMoved(e) => InputEvent::PointerMoved(map(e)),
            other => other,
        }
    }
}

/// Die beiden Hervorhebungs-Timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Selected,
    Focused,
}

/// Eintrag der seriellen Dispatch-Queue: Eingaben und Timer-Ticks
/// werden in Ankunftsreihenfolge abgearbeitet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasTask {
    Input(InputEvent),
    Tick(TimerKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_predicates() {
        let p = PointerEvent::primary(Vec2::ZERO);
        assert!(p.is_primary_only());
        assert!(!p.is_shift_primary());
        assert!(!p.with_shift().is_primary_only());
        assert!(p.with_shift().is_shift_primary());

        let s = PointerEvent::secondary(Vec2::ZERO);
        assert!(s.is_secondary_only());
        assert!(!s.is_primary_only());
        assert!(!s.is_middle_only());
    }

    #[test]
    fn test_map_position_only_touches_pointer_events() {
        let e = InputEvent::PointerMoved(PointerEvent::hover(Vec2::new(10.0, 20.0)));
        let mapped = e.map_position(|p| p * 0.5);
        assert_eq!(mapped.pointer().unwrap().position, Vec2::new(5.0, 10.0));

        let wheel = InputEvent::Wheel { rotation: 1 };
        assert_eq!(wheel.map_position(|p| p * 0.5), wheel);
    }
}
