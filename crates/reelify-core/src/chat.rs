//! Scripted chat replies: an ordered keyword table, first match wins.

pub const REPLY_PREFIX: &str = "Hmm, I see! ";

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["sad", "cry", "emotional", "ağla", "üzgün", "duygusal"],
        reply: "You want something emotional! 😢 I'd suggest \"The Green Mile\" or \"Titanic\". Try the 😢 Sad mood!",
    },
    Rule {
        keywords: &["comedy", "laugh", "fun", "komedi", "gül", "eğlen"],
        reply: "So you want a good laugh! 😄 \"The Hangover\" or \"Deadpool\" are great picks. Try the Happy mood!",
    },
    Rule {
        keywords: &["horror", "scary", "korku", "kork"],
        reply: "Brave one! 😱 Try \"The Conjuring\" or \"Get Out\". Pick the Scared mood!",
    },
    Rule {
        keywords: &["action", "thrill", "aksiyon", "heyecan"],
        reply: "Adrenaline time! 🤩 \"The Matrix\" or \"The Dark Knight\" are made for you!",
    },
    Rule {
        keywords: &["romance", "love", "romantik", "aşk"],
        reply: "Love is in the air! 🥰 \"The Notebook\" or \"La La Land\" are perfect for a romantic night!",
    },
];

const GENERIC_HINT: &str = "Type what you're after into search or pick one of the moods. I'll find you the best movies! 🎬";

/// Reply to a chat message. Blank input gets no reply.
pub fn respond(message: &str) -> Option<String> {
    let message = message.trim();
    if message.is_empty() {
        return None;
    }

    let lower = message.to_lowercase();
    let reply = RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(GENERIC_HINT);

    Some(format!("{}{}", REPLY_PREFIX, reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_has_no_reply() {
        assert_eq!(respond(""), None);
        assert_eq!(respond("   \n"), None);
    }

    #[test]
    fn test_every_reply_has_prefix() {
        for message in ["I want to cry", "bana komedi öner", "something else", "LOVE stories"] {
            let reply = respond(message).unwrap();
            assert!(reply.starts_with(REPLY_PREFIX), "{}", reply);
        }
    }

    #[test]
    fn test_turkish_and_english_keywords() {
        assert_eq!(respond("Bugün çok üzgünüm"), respond("I feel sad today"));
        assert!(respond("korku filmi istiyorum").unwrap().contains("The Conjuring"));
        assert!(respond("Something with ACTION please").unwrap().contains("The Matrix"));
    }

    #[test]
    fn test_first_match_wins() {
        // Matches both the sad and the romance rule
        let reply = respond("a sad love story").unwrap();
        assert!(reply.contains("The Green Mile"));
    }

    #[test]
    fn test_unknown_input_gets_generic_hint() {
        let reply = respond("what's on tonight?").unwrap();
        assert_eq!(reply, format!("{}{}", REPLY_PREFIX, GENERIC_HINT));
    }
}
