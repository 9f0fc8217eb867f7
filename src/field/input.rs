use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::MaterialTextField;

impl MaterialTextField {
    /// Feeds one key event into the field. Returns true when the event
    /// changed the content (and therefore ran the pipeline).
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.config.is_disabled {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                let mut next = self.content.get();
                next.push(ch);
                self.apply_change(next);
                true
            }
            KeyCode::Backspace => {
                let mut next = self.content.get();
                next.pop();
                self.apply_change(next);
                true
            }
            KeyCode::Delete => {
                self.clear();
                true
            }
            _ => false,
        }
    }
}
