//! Display-only entries for the Sessions, Community and Resources panels.
//!
//! None of this data has a lifecycle; it is rendered as-is.

/// An upcoming counselling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEntry {
    pub title: &'static str,
    pub counselor: &'static str,
    pub when: &'static str,
}

/// A community board post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommunityPost {
    pub author: &'static str,
    pub body: &'static str,
}

/// A self-help resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEntry {
    pub title: &'static str,
    pub summary: &'static str,
}

pub const SESSIONS: &[SessionEntry] = &[
    SessionEntry {
        title: "Weekly check-in",
        counselor: "Dr. Rivera",
        when: "Thursday, 3:00 PM",
    },
    SessionEntry {
        title: "Stress management group",
        counselor: "J. Okafor",
        when: "Saturday, 10:00 AM",
    },
];

pub const COMMUNITY_POSTS: &[CommunityPost] = &[
    CommunityPost {
        author: "Anonymous",
        body: "Took a short walk today instead of doomscrolling. Small win.",
    },
    CommunityPost {
        author: "Sam",
        body: "Breathing exercises before exams are helping more than I expected.",
    },
];

pub const RESOURCES: &[ResourceEntry] = &[
    ResourceEntry {
        title: "Box breathing",
        summary: "Inhale 4s, hold 4s, exhale 4s, hold 4s. Repeat four times.",
    },
    ResourceEntry {
        title: "Grounding: 5-4-3-2-1",
        summary: "Name five things you see, four you feel, three you hear, two you smell, one you taste.",
    },
    ResourceEntry {
        title: "Sleep hygiene",
        summary: "Keep a regular wake time and put screens away an hour before bed.",
    },
];
