//! Terminal shell for the page model
//!
//! Draws a [`Page`] as indented text and numbers every interactive element so
//! the user can activate it by typing its number, optionally followed by
//! input (`2 New Name`).

use std::fmt::Write;

use crate::ui::presentation::{Element, Page, UiAction};

/// A drawn page and the actions its numbers refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    /// `actions[n - 1]` is the action shown as `[n]`
    pub actions: Vec<UiAction>,
}

pub fn draw(page: &Page) -> Screen {
    let mut screen = Screen {
        text: String::new(),
        actions: Vec::new(),
    };

    for region in page.regions() {
        draw_element(region.child(), 0, &mut screen);
    }

    screen
}

fn draw_element(element: &Element, depth: usize, screen: &mut Screen) {
    let indent = "  ".repeat(depth);

    if element.is_placeholder() {
        let _ = writeln!(screen.text, "{indent}--");
        return;
    }

    if let Some(text) = &element.text {
        let marker = match element.tag.as_str() {
            "h2" => "## ",
            "li" => "- ",
            _ => "",
        };

        let number = match &element.action {
            Some(action) => {
                screen.actions.push(action.clone());
                format!("[{}] ", screen.actions.len())
            }
            None => String::new(),
        };

        let _ = writeln!(screen.text, "{indent}{number}{marker}{text}");
    }

    // Only grouped content (categories, status boxes) is indented.
    let child_depth = depth + usize::from(element.class.is_some());
    for child in &element.children {
        draw_element(child, child_depth, screen);
    }
}

/// Parse `N` or `N input` into a 1-based action number and trimmed input.
pub fn parse_input(line: &str) -> Option<(usize, Option<String>)> {
    let line = line.trim();
    let (number, rest) = match line.split_once(char::is_whitespace) {
        Some((number, rest)) => (number, Some(rest.trim())),
        None => (line, None),
    };

    let number = number.parse::<usize>().ok().filter(|n| *n > 0)?;
    let input = rest.filter(|r| !r.is_empty()).map(str::to_string);
    Some((number, input))
}
