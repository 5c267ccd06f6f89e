//! Display output.
//!
//! Keeps what the 240x320 screen would show and logs every change. Title
//! scrolling and fades are left to a real screen driver.

use std::path::PathBuf;

use tracing::info;

use crate::domains::tools::{DispatchError, DisplayOut, DisplayText};

/// Display that records its content instead of drawing it.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    title: Option<String>,
    background: Option<PathBuf>,
    text: Option<String>,
    asleep: bool,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the screen to a new tool: title, background, no description.
    pub fn set_tool(&mut self, title: &str, background: Option<PathBuf>) {
        info!("Display: tool '{}' (background {:?})", title, background);
        self.title = Some(title.to_string());
        self.background = background;
        self.text = None;
    }

    /// Turn the backlight off and stop drawing.
    pub fn sleep(&mut self) {
        if !self.asleep {
            info!("Display: sleeping");
            self.asleep = true;
        }
    }

    /// Turn the backlight back on.
    pub fn wake(&mut self) {
        if self.asleep {
            info!("Display: awake");
            self.asleep = false;
        }
    }

    pub fn is_asleep(&self) -> bool {
        self.asleep
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn background(&self) -> Option<&PathBuf> {
        self.background.as_ref()
    }

    /// Description currently on screen.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl DisplayOut for ConsoleDisplay {
    fn show(&mut self, text: DisplayText<'_>) -> Result<(), DispatchError> {
        match text {
            DisplayText::Show(text) => {
                info!("Display: {}", text);
                self.text = Some(text.to_string());
            }
            DisplayText::Clear => {
                info!("Display: (cleared)");
                self.text = None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_clear() {
        let mut display = ConsoleDisplay::new();
        display.show(DisplayText::Show("Paint some more stuff")).unwrap();
        assert_eq!(display.text(), Some("Paint some more stuff"));

        display.show(DisplayText::Clear).unwrap();
        assert_eq!(display.text(), None);
    }

    #[test]
    fn test_set_tool_clears_description() {
        let mut display = ConsoleDisplay::new();
        display.show(DisplayText::Show("old")).unwrap();
        display.set_tool("Weld", Some(PathBuf::from("weld.png")));

        assert_eq!(display.title(), Some("Weld"));
        assert_eq!(display.background(), Some(&PathBuf::from("weld.png")));
        assert_eq!(display.text(), None);
    }

    #[test]
    fn test_sleep_and_wake() {
        let mut display = ConsoleDisplay::new();
        assert!(!display.is_asleep());
        display.sleep();
        assert!(display.is_asleep());
        display.wake();
        assert!(!display.is_asleep());
    }
}
