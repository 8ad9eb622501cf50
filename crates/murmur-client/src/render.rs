//! HTML fragments for the message and user lists.

use std::borrow::Cow;
use std::fmt::Write;

use murmur_types::{BlockList, Message, UserList};

/// Shown in place of a blocked author's message.
pub const REDACTED_LABEL: &str = "BLOCKED";

pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Whether `message` must be redacted: its author resolves (first nickname
/// match) to a user index present in `blocks`.
pub fn is_redacted(message: &Message, users: &UserList, blocks: &BlockList) -> bool {
    users
        .position(&message.author)
        .is_some_and(|id| blocks.contains(id))
}

/// Messages newest first.
pub fn messages(messages: &[Message], users: &UserList, blocks: &BlockList) -> String {
    let mut html = String::new();
    for message in messages.iter().rev() {
        let _ = write!(
            html,
            "<div class=\"message\">\
             <div class=\"message-user\">{}</div>\
             <div class=\"message-content\">",
            escape(&message.author),
        );
        if is_redacted(message, users, blocks) {
            let _ = write!(html, "<b style=\"color: lightcoral\">{}</b>", REDACTED_LABEL);
        } else {
            html.push_str(&escape(&message.content));
        }
        html.push_str("</div></div>\n");
    }
    html
}

/// Label of the toggle button next to a user.
pub fn toggle_label(blocked: bool) -> &'static str {
    if blocked { "Unblock" } else { "Block" }
}

/// One list item per user, in server order, each with a block toggle.
pub fn users(users: &UserList, blocks: &BlockList) -> String {
    let mut html = String::new();
    for (id, nickname) in users.iter() {
        let _ = writeln!(
            html,
            "<li class=\"user\">{} <button data-user-id=\"{}\">{}</button></li>",
            escape(nickname),
            id,
            toggle_label(blocks.contains(id)),
        );
    }
    html
}
