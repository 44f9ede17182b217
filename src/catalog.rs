//! Static persona and topic tables.
//!
//! These are reference data: nothing mutates them at runtime, callers only look
//! entries up by id.

use crate::models::Selector;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub followers: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_PERSONA_ID: &str = "solomon";

pub static PERSONAS: &[Persona] = &[
    Persona {
        id: "solomon",
        name: "King Solomon",
        image: "/solomon-icon.jpg",
        description: "The wisest king who ever lived",
        followers: "352.4k",
    },
    Persona {
        id: "david",
        name: "King David",
        image: "/david-icon.jpg",
        description: "A man after God's own heart",
        followers: "289.1k",
    },
    Persona {
        id: "paul",
        name: "Apostle Paul",
        image: "/paul-icon.jpg",
        description: "The great apostle to the Gentiles",
        followers: "421.3k",
    },
    Persona {
        id: "moses",
        name: "Moses",
        image: "/moses-icon.jpg",
        description: "The great lawgiver and deliverer",
        followers: "385.2k",
    },
    Persona {
        id: "abraham",
        name: "Abraham",
        image: "/abraham-icon.jpg",
        description: "Father of faith and nations",
        followers: "312.8k",
    },
    Persona {
        id: "peter",
        name: "Apostle Peter",
        image: "/peter-icon.jpg",
        description: "The rock of the early church",
        followers: "298.6k",
    },
    Persona {
        id: "daniel",
        name: "Daniel",
        image: "/daniel-icon.jpg",
        description: "Prophet of dreams and visions",
        followers: "276.4k",
    },
    Persona {
        id: "john",
        name: "Apostle John",
        image: "/john-icon.jpg",
        description: "The disciple whom Jesus loved",
        followers: "265.9k",
    },
    Persona {
        id: "joseph",
        name: "Joseph",
        image: "/joseph-icon.jpg",
        description: "From prisoner to prince",
        followers: "254.3k",
    },
    Persona {
        id: "esther",
        name: "Queen Esther",
        image: "/esther-icon.jpg",
        description: "Courage that saved a nation",
        followers: "243.7k",
    },
];

pub static TOPICS: &[Topic] = &[
    Topic {
        id: "wisdom",
        title: "Wisdom & Knowledge",
        icon: "psychology",
        description: "Biblical principles for wise living",
    },
    Topic {
        id: "love",
        title: "Love & Relationships",
        icon: "favorite",
        description: "Understanding godly relationships",
    },
    Topic {
        id: "faith",
        title: "Faith & Belief",
        icon: "church",
        description: "Growing stronger in faith",
    },
    Topic {
        id: "prayer",
        title: "Prayer & Worship",
        icon: "volunteer_activism",
        description: "Deepening your spiritual life",
    },
    Topic {
        id: "leadership",
        title: "Leadership",
        icon: "group",
        description: "Biblical principles of leadership",
    },
    Topic {
        id: "purpose",
        title: "Purpose & Calling",
        icon: "explore",
        description: "Discovering God's plan for you",
    },
    Topic {
        id: "forgiveness",
        title: "Forgiveness & Grace",
        icon: "healing",
        description: "Finding peace through forgiveness",
    },
    Topic {
        id: "family",
        title: "Family Life",
        icon: "family_restroom",
        description: "Building strong families",
    },
    Topic {
        id: "prosperity",
        title: "Success & Prosperity",
        icon: "trending_up",
        description: "Biblical view of success",
    },
    Topic {
        id: "warfare",
        title: "Spiritual Warfare",
        icon: "security",
        description: "Standing firm in faith",
    },
];

pub fn find_persona(id: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|p| p.id == id)
}

pub fn find_topic(id: &str) -> Option<&'static Topic> {
    TOPICS.iter().find(|t| t.id == id)
}

/// Display name for the speaker of assistant turns.
pub fn speaker_name(selector: &Selector) -> &'static str {
    match selector {
        Selector::Character(id) => find_persona(id)
            .or_else(|| find_persona(DEFAULT_PERSONA_ID))
            .map(|p| p.name)
            .unwrap_or("Sage"),
        Selector::Topic(id) => find_topic(id).map(|t| t.title).unwrap_or("Mentor"),
    }
}

/// Opening assistant message for a freshly created session.
pub fn greeting(selector: &Selector) -> String {
    match selector {
        Selector::Topic(id) => match find_topic(id) {
            Some(topic) => format!(
                "Welcome. Let us talk about {}: {}. What is on your heart today?",
                topic.title.to_lowercase(),
                topic.description.to_lowercase()
            ),
            None => solomon_greeting(),
        },
        Selector::Character(id) if id == DEFAULT_PERSONA_ID => solomon_greeting(),
        Selector::Character(id) => match find_persona(id) {
            Some(persona) => format!(
                "Greetings, I am {}, {}. What would you like to ask me?",
                persona.name,
                lowercase_first(persona.description)
            ),
            None => solomon_greeting(),
        },
    }
}

/// Title a session carries until its first user message arrives.
pub fn default_title(selector: &Selector) -> String {
    format!("Chat with {}", speaker_name(selector))
}

fn solomon_greeting() -> String {
    "Greetings, I am Solomon, son of David, king of Israel. I have been blessed by the LORD \
     with wisdom to share understanding about the Proverbs and matters of life. What wisdom \
     do you seek?"
        .to_string()
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
