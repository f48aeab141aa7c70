//! Chat-completion message assembly.
//!
//! Turns a composed system prompt, prior conversation turns, and the
//! latest user utterance into the message list a completion request
//! expects: system first, then a bounded history window, then the user.

use personae_core::{ChatMessage, Role};

/// Assemble the message list for one completion request.
///
/// History is bounded to the last `max_pairs` user/assistant pairs; a
/// leading system message in the incoming history is dropped (the freshly
/// composed prompt replaces it). `max_pairs == 0` drops history entirely.
pub fn build_messages(
    system_prompt: &str,
    history: &[ChatMessage],
    user_text: &str,
    max_pairs: usize,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(system_prompt)];
    messages.extend(bound_history(history, max_pairs).iter().cloned());
    messages.push(ChatMessage::user(user_text));
    messages
}

fn bound_history(history: &[ChatMessage], max_pairs: usize) -> &[ChatMessage] {
    let history = match history.first() {
        Some(first) if first.role == Role::System => &history[1..],
        _ => history,
    };
    let keep = 2 * max_pairs;
    &history[history.len().saturating_sub(keep)..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(pairs: usize) -> Vec<ChatMessage> {
        let mut history = Vec::new();
        for i in 0..pairs {
            history.push(ChatMessage::user(format!("question {i}")));
            history.push(ChatMessage::assistant(format!("answer {i}")));
        }
        history
    }

    #[test]
    fn system_leads_and_user_closes() {
        let messages = build_messages("SYSTEM", &turns(1), "latest", 8);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "SYSTEM");
        assert_eq!(messages.last().unwrap().role, Role::User);
        assert_eq!(messages.last().unwrap().content, "latest");
    }

    #[test]
    fn history_is_bounded_to_recent_pairs() {
        let messages = build_messages("SYSTEM", &turns(20), "latest", 8);
        // system + 16 history + user
        assert_eq!(messages.len(), 18);
        // the oldest surviving turn is pair 12
        assert_eq!(messages[1].content, "question 12");
        assert_eq!(messages[16].content, "answer 19");
    }

    #[test]
    fn leading_system_message_is_dropped() {
        let mut history = vec![ChatMessage::system("stale system prompt")];
        history.extend(turns(2));

        let messages = build_messages("fresh", &history, "latest", 8);
        assert_eq!(messages[0].content, "fresh");
        assert!(
            messages
                .iter()
                .filter(|m| m.role == Role::System)
                .count()
                == 1
        );
    }

    #[test]
    fn zero_pairs_drops_history() {
        let messages = build_messages("SYSTEM", &turns(5), "latest", 0);
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn empty_history_is_fine() {
        let messages = build_messages("SYSTEM", &[], "latest", 8);
        assert_eq!(messages.len(), 2);
    }
}
