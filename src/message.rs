use serde::{Deserialize, Serialize};

use crate::colors::Color;

// list of messages, each message has its text and color
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    messages: Vec<(String, Color)>,
}

impl Messages {
    pub fn new() -> Self {
        Self { messages: vec![] }
    }

    // add new message as tuple
    pub fn add<T: Into<String>>(&mut self, message: T, color: Color) {
        self.messages.push((message.into(), color));
    }

    // double ended so the frontend can draw newest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &(String, Color)> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(|(text, _)| text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, WHITE};

    #[test]
    fn keeps_insertion_order() {
        let mut messages = Messages::new();
        messages.add("first", WHITE);
        messages.add(String::from("second"), RED);

        let texts: Vec<_> = messages.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, ["first", "second"]);
        assert_eq!(messages.iter().rev().next().map(|m| m.1), Some(RED));
        assert_eq!(messages.last(), Some("second"));
    }
}
