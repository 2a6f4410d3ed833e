use crate::infer::Message;

pub const PERSONA: &str = "You are a supportive mental coach.";

pub fn system() -> Message {
    Message::new_text_system(PERSONA)
}

/// The full exchange sent upstream for one user message: persona first, then
/// the message exactly as received.
pub fn coach_exchange(user_message: &str) -> [Message; 2] {
    [system(), Message::new_text_user(user_message)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::MessageRole;

    #[test]
    fn exchange_is_persona_then_verbatim_user_message() {
        let [first, second] = coach_exchange("  I feel stuck\n");

        assert_eq!(first.role, MessageRole::System);
        assert_eq!(&*first.content, "You are a supportive mental coach.");
        assert_eq!(second.role, MessageRole::User);
        assert_eq!(&*second.content, "  I feel stuck\n");
    }

    #[test]
    fn empty_message_is_passed_through() {
        let [_, user] = coach_exchange("");
        assert_eq!(&*user.content, "");
    }
}
